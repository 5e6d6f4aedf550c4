//! Fill-crop geometry: scale a frame to cover a target box, then crop the
//! centred overflow. Never letterboxes.

/// Pixel dimensions of a frame or render target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameSize {
    pub width: u32,
    pub height: u32,
}

impl FrameSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Round a layout size in logical points up to whole pixels
    pub fn from_points(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0).ceil() as u32,
            height: height.max(0.0).ceil() as u32,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Byte length of an RGBA8 buffer with these dimensions
    pub fn rgba_len(&self) -> usize {
        self.width as usize * self.height as usize * 4
    }
}

/// Clockwise rotation a frame needs before display, from the container's
/// display matrix. Phones record portrait video as rotated landscape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotation {
    #[default]
    None,
    Clockwise90,
    Rotate180,
    Clockwise270,
}

impl Rotation {
    /// Read the rotation out of a 3x3 display matrix side data blob: nine
    /// native-endian 16.16 fixed-point `i32`s, row major.
    pub fn from_display_matrix(data: &[u8]) -> Self {
        if data.len() < 36 {
            return Rotation::None;
        }
        let entry = |i: usize| {
            let mut bytes = [0u8; 4];
            bytes.copy_from_slice(&data[i * 4..i * 4 + 4]);
            i32::from_ne_bytes(bytes) as f64 / 65536.0
        };

        let scale_x = entry(0).hypot(entry(3));
        let scale_y = entry(1).hypot(entry(4));
        if scale_x == 0.0 || scale_y == 0.0 {
            return Rotation::None;
        }
        let degrees = (entry(1) / scale_y).atan2(entry(0) / scale_x).to_degrees();
        Self::from_degrees(degrees)
    }

    /// Snap clockwise degrees to the nearest quarter turn
    pub fn from_degrees(degrees: f64) -> Self {
        if !degrees.is_finite() {
            return Rotation::None;
        }
        match ((degrees / 90.0).round() as i64).rem_euclid(4) {
            1 => Rotation::Clockwise90,
            2 => Rotation::Rotate180,
            3 => Rotation::Clockwise270,
            _ => Rotation::None,
        }
    }

    pub fn swaps_axes(&self) -> bool {
        matches!(self, Rotation::Clockwise90 | Rotation::Clockwise270)
    }

    /// Size of a `size` frame once rotated
    pub fn apply_to_size(&self, size: FrameSize) -> FrameSize {
        if self.swaps_axes() {
            FrameSize::new(size.height, size.width)
        } else {
            size
        }
    }

    /// Rotate a tightly packed RGBA8 plane of `size` pixels
    pub fn rotate_rgba(&self, plane: &[u8], size: FrameSize) -> Vec<u8> {
        if *self == Rotation::None {
            return plane.to_vec();
        }

        let (w, h) = (size.width as usize, size.height as usize);
        let out_size = self.apply_to_size(size);
        let out_w = out_size.width as usize;
        let mut out = vec![0u8; size.rgba_len()];

        for y in 0..out_size.height as usize {
            for x in 0..out_w {
                let (sx, sy) = match self {
                    Rotation::Clockwise90 => (y, h - 1 - x),
                    Rotation::Rotate180 => (w - 1 - x, h - 1 - y),
                    Rotation::Clockwise270 => (w - 1 - y, x),
                    Rotation::None => (x, y),
                };
                let src = (sy * w + sx) * 4;
                let dst = (y * out_w + x) * 4;
                out[dst..dst + 4].copy_from_slice(&plane[src..src + 4]);
            }
        }
        out
    }
}

/// Result of [`fill_crop`]: scale the source to `scaled`, then take the
/// `target`-sized window whose top-left corner is at (`x`, `y`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    pub scaled: FrameSize,
    pub x: u32,
    pub y: u32,
    pub target: FrameSize,
}

/// Compute the fill-crop of `src` into `dst`.
/// Returns `None` when either size is empty.
pub fn fill_crop(src: FrameSize, dst: FrameSize) -> Option<CropRect> {
    if src.is_empty() || dst.is_empty() {
        return None;
    }

    let scale = f64::max(
        dst.width as f64 / src.width as f64,
        dst.height as f64 / src.height as f64,
    );
    // Rounding may land one pixel short of the target on the covering axis
    let scaled = FrameSize {
        width: ((src.width as f64 * scale).round() as u32).max(dst.width),
        height: ((src.height as f64 * scale).round() as u32).max(dst.height),
    };

    Some(CropRect {
        scaled,
        x: (scaled.width - dst.width) / 2,
        y: (scaled.height - dst.height) / 2,
        target: dst,
    })
}

/// Copy the crop window out of a scaled RGBA8 plane with the given row stride.
pub fn crop_rgba(plane: &[u8], stride: usize, crop: &CropRect) -> Vec<u8> {
    let row_bytes = crop.target.width as usize * 4;
    let mut out = Vec::with_capacity(crop.target.rgba_len());

    for row in 0..crop.target.height as usize {
        let start = (row + crop.y as usize) * stride + crop.x as usize * 4;
        out.extend_from_slice(&plane[start..start + row_bytes]);
    }
    out
}

/// Like [`crop_rgba`], for a plane still in stored orientation: `crop` is
/// computed against the rotated size and the plane is turned upright first.
pub fn crop_rotated(plane: &[u8], stride: usize, rotation: Rotation, crop: &CropRect) -> Vec<u8> {
    if rotation == Rotation::None {
        return crop_rgba(plane, stride, crop);
    }

    let stored = rotation.apply_to_size(crop.scaled);
    let whole = CropRect {
        scaled: stored,
        x: 0,
        y: 0,
        target: stored,
    };
    let upright = rotation.rotate_rgba(&crop_rgba(plane, stride, &whole), stored);
    crop_rgba(&upright, crop.scaled.width as usize * 4, crop)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landscape_into_portrait_crops_sides() {
        let crop = fill_crop(FrameSize::new(1920, 1080), FrameSize::new(200, 300)).unwrap();
        assert_eq!(crop.scaled.height, 300);
        assert_eq!(crop.scaled.width, 533);
        assert_eq!(crop.y, 0);
        assert_eq!(crop.x, (533 - 200) / 2);
    }

    #[test]
    fn test_portrait_into_landscape_crops_top_and_bottom() {
        let crop = fill_crop(FrameSize::new(1080, 1920), FrameSize::new(160, 50)).unwrap();
        assert_eq!(crop.scaled.width, 160);
        assert!(crop.scaled.height >= 50);
        assert_eq!(crop.x, 0);
        assert_eq!(crop.y, (crop.scaled.height - 50) / 2);
    }

    #[test]
    fn test_matching_aspect_has_no_overflow() {
        let crop = fill_crop(FrameSize::new(640, 480), FrameSize::new(320, 240)).unwrap();
        assert_eq!(crop.scaled, FrameSize::new(320, 240));
        assert_eq!((crop.x, crop.y), (0, 0));
    }

    #[test]
    fn test_empty_sizes() {
        assert!(fill_crop(FrameSize::new(0, 480), FrameSize::new(10, 10)).is_none());
        assert!(fill_crop(FrameSize::new(640, 480), FrameSize::new(10, 0)).is_none());
    }

    fn matrix_bytes(matrix: [i32; 9]) -> Vec<u8> {
        matrix.iter().flat_map(|v| v.to_ne_bytes()).collect()
    }

    // One byte per pixel repeated across RGBA, so plane contents read back as indices
    fn indexed_plane(size: FrameSize) -> Vec<u8> {
        (0..size.width * size.height).flat_map(|i| [i as u8; 4]).collect()
    }

    fn pixel_indices(plane: &[u8]) -> Vec<u8> {
        plane.chunks(4).map(|px| px[0]).collect()
    }

    #[test]
    fn test_portrait_phone_matrix_rotates_clockwise() {
        // What iPhones write for video shot in portrait
        let one = 1 << 16;
        let data = matrix_bytes([0, one, 0, -one, 0, 0, 0, 0, 1 << 30]);
        let rotation = Rotation::from_display_matrix(&data);

        assert_eq!(rotation, Rotation::Clockwise90);
        assert_eq!(rotation.apply_to_size(FrameSize::new(1920, 1080)), FrameSize::new(1080, 1920));
    }

    #[test]
    fn test_identity_and_malformed_matrices() {
        let one = 1 << 16;
        let identity = matrix_bytes([one, 0, 0, 0, one, 0, 0, 0, 1 << 30]);
        assert_eq!(Rotation::from_display_matrix(&identity), Rotation::None);

        let upside_down = matrix_bytes([-one, 0, 0, 0, -one, 0, 0, 0, 1 << 30]);
        assert_eq!(Rotation::from_display_matrix(&upside_down), Rotation::Rotate180);

        assert_eq!(Rotation::from_display_matrix(&identity[..20]), Rotation::None);
        assert_eq!(Rotation::from_display_matrix(&[0u8; 36]), Rotation::None);
    }

    #[test]
    fn test_degrees_snap_to_quarter_turns() {
        assert_eq!(Rotation::from_degrees(-90.0), Rotation::Clockwise270);
        assert_eq!(Rotation::from_degrees(89.6), Rotation::Clockwise90);
        assert_eq!(Rotation::from_degrees(540.0), Rotation::Rotate180);
        assert_eq!(Rotation::from_degrees(f64::NAN), Rotation::None);
    }

    #[test]
    fn test_rotate_rgba() {
        // 2x3 source:
        //   0 1
        //   2 3
        //   4 5
        let size = FrameSize::new(2, 3);
        let plane = indexed_plane(size);

        let cw = Rotation::Clockwise90.rotate_rgba(&plane, size);
        assert_eq!(pixel_indices(&cw), vec![4, 2, 0, 5, 3, 1]);

        let flipped = Rotation::Rotate180.rotate_rgba(&plane, size);
        assert_eq!(pixel_indices(&flipped), vec![5, 4, 3, 2, 1, 0]);

        let ccw = Rotation::Clockwise270.rotate_rgba(&plane, size);
        assert_eq!(pixel_indices(&ccw), vec![1, 3, 5, 0, 2, 4]);

        assert_eq!(Rotation::None.rotate_rgba(&plane, size), plane);
    }

    #[test]
    fn test_crop_rotated_crops_upright_frame() {
        // Stored 4x2 landscape with 4 bytes row padding, shown as 2x4 portrait
        let stored = FrameSize::new(4, 2);
        let stride = 4 * 4 + 4;
        let mut plane = vec![0u8; stride * 2];
        for row in 0..2 {
            for col in 0..4 {
                let i = row * stride + col * 4;
                plane[i..i + 4].copy_from_slice(&[(row * 4 + col) as u8; 4]);
            }
        }
        let rotation = Rotation::Clockwise90;
        let crop = fill_crop(rotation.apply_to_size(stored), FrameSize::new(2, 2)).unwrap();
        assert_eq!(crop.scaled, FrameSize::new(2, 4));
        assert_eq!((crop.x, crop.y), (0, 1));

        // Upright rows are 4 0 / 5 1 / 6 2 / 7 3, the middle two survive
        let out = crop_rotated(&plane, stride, rotation, &crop);
        assert_eq!(pixel_indices(&out), vec![5, 1, 6, 2]);
    }

    #[test]
    fn test_crop_rgba_takes_centre_window() {
        // 4x2 scaled plane with 4 bytes of row padding, pixel value = column index
        let stride = 4 * 4 + 4;
        let mut plane = vec![0u8; stride * 2];
        for row in 0..2 {
            for col in 0..4 {
                let i = row * stride + col * 4;
                plane[i..i + 4].copy_from_slice(&[col as u8; 4]);
            }
        }
        let crop = CropRect {
            scaled: FrameSize::new(4, 2),
            x: 1,
            y: 0,
            target: FrameSize::new(2, 2),
        };

        let out = crop_rgba(&plane, stride, &crop);
        assert_eq!(out.len(), crop.target.rgba_len());
        assert_eq!(&out[0..8], &[1, 1, 1, 1, 2, 2, 2, 2]);
        assert_eq!(&out[8..16], &[1, 1, 1, 1, 2, 2, 2, 2]);
    }
}
