//! FFmpeg-backed frame extraction.
//! Output frames are RGBA8, fill-cropped to the requested size.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use ffmpeg_next as ffmpeg;
use ffmpeg::format::Pixel;
use ffmpeg::media::Type;
use ffmpeg::software::scaling::{Context as ScalingContext, Flags as ScalingFlags};
use ffmpeg::util::frame::video::Video as RawFrame;
use tracing::debug;

use crate::core::time::{self, Time, ZERO};
use crate::decode::geometry::{crop_rotated, fill_crop, FrameSize, Rotation};
use crate::decode::stream_info::{StreamInfo, VideoStreamInfo};

/// Error type for decoding operations
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("FFmpeg error: {0}")]
    Ffmpeg(#[from] ffmpeg::Error),
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),
    #[error("No video stream found")]
    NoVideoStream,
    #[error("Cannot fill {target:?} from a {source_size:?} frame")]
    InvalidSize { source_size: FrameSize, target: FrameSize },
    #[error("No frame decoded at {0}ns")]
    NoFrame(Time),
    #[error("Decoder lock poisoned")]
    Poisoned,
}

/// Decoded video frame (RGBA8, tightly packed)
#[derive(Debug, Clone, PartialEq)]
pub struct VideoFrame {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub timestamp: Time,  // Presentation time of the decoded frame in nanoseconds
}

impl VideoFrame {
    pub fn size(&self) -> FrameSize {
        FrameSize::new(self.width, self.height)
    }
}

/// Anything that can produce the frame nearest to a timestamp.
///
/// Implementations are shared across decode workers, so a call must not
/// depend on state left behind by another call.
pub trait FrameSource: Send + Sync {
    fn decode_frame(&self, at: Time, size: FrameSize) -> Result<VideoFrame, DecodeError>;
}

/// Open FFmpeg demuxer + decoder for the best video stream of one file
pub struct FfmpegDecoder {
    input: ffmpeg::format::context::Input,
    decoder: ffmpeg::codec::decoder::Video,
    info: VideoStreamInfo,
    time_base: (i32, i32),
    start_time: Time,  // First presentation time of the stream, asset time zero
}

// FFmpeg contexts are only touched through `&mut self`; shared use goes through `SharedDecoder`'s mutex
unsafe impl Send for FfmpegDecoder {}

impl FfmpegDecoder {
    /// Open a media file and prepare its best video stream for decoding
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, DecodeError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(DecodeError::FileNotFound(path.to_path_buf()));
        }

        ffmpeg::init()?;
        let input = ffmpeg::format::input(path)?;

        let (index, time_base, start, stream_duration, fps, rotation, parameters) = {
            let stream = input
                .streams()
                .best(Type::Video)
                .ok_or(DecodeError::NoVideoStream)?;
            let tb = stream.time_base();
            let rate = stream.avg_frame_rate();
            let fps = if rate.denominator() == 0 {
                0.0
            } else {
                rate.numerator() as f64 / rate.denominator() as f64
            };
            let rotation = stream
                .side_data()
                .find(|side| side.kind() == ffmpeg::packet::side_data::Type::DisplayMatrix)
                .map_or(Rotation::None, |side| Rotation::from_display_matrix(side.data()));
            (
                stream.index(),
                (tb.numerator(), tb.denominator()),
                stream.start_time(),
                stream.duration(),
                fps,
                rotation,
                stream.parameters(),
            )
        };

        let context = ffmpeg::codec::context::Context::from_parameters(parameters)?;
        let decoder = context.decoder().video()?;

        let start_time = time::start_from_timebase(start, time_base.0, time_base.1);

        // Container duration is in AV_TIME_BASE units; fall back to the stream's own
        let duration = if input.duration() > 0 {
            time::from_micros(input.duration())
        } else if stream_duration > 0 {
            time::from_timebase(stream_duration, time_base.0, time_base.1)
        } else {
            ZERO
        };

        let info = VideoStreamInfo {
            stream_info: StreamInfo {
                index,
                duration,
                codec_name: format!("{:?}", decoder.id()),
            },
            width: decoder.width(),
            height: decoder.height(),
            fps,
            pixel_format: format!("{:?}", decoder.format()),
            rotation,
        };

        debug!(path = %path.display(), ?info, start_time, "opened video");

        Ok(Self {
            input,
            decoder,
            info,
            time_base,
            start_time,
        })
    }

    pub fn info(&self) -> &VideoStreamInfo {
        &self.info
    }

    /// Decode the first frame presented at or after `at`, or the last frame of
    /// the stream when `at` lies past it, fill-cropped to `size`.
    ///
    /// `at` is measured from the first frame of the stream, whatever the
    /// container's start time. Returned timestamps use the same origin.
    pub fn decode_frame_at(&mut self, at: Time, size: FrameSize) -> Result<VideoFrame, DecodeError> {
        let at = at.clamp(ZERO, self.info.duration().max(ZERO));
        let start = self.start_time;
        let stream_at = time::to_stream_time(at, start);
        let target = time::to_micros(stream_at);

        // Land on the keyframe at or before the target, then decode forward
        self.input.seek(target, ..target)?;
        self.decoder.flush();

        let stream_index = self.info.stream_info.index;
        let rotation = self.info.rotation;
        let (num, den) = self.time_base;
        let mut decoded = RawFrame::empty();
        let mut last = RawFrame::empty();
        let mut last_ts: Option<Time> = None;

        for (stream, packet) in self.input.packets() {
            if stream.index() != stream_index {
                continue;
            }
            self.decoder.send_packet(&packet)?;

            while self.decoder.receive_frame(&mut decoded).is_ok() {
                let ts = frame_time(&decoded, num, den).unwrap_or(stream_at);
                if ts >= stream_at {
                    return scale_and_crop(&decoded, time::from_stream_time(ts, start), rotation, size);
                }
                std::mem::swap(&mut decoded, &mut last);
                last_ts = Some(ts);
            }
        }

        // Drain whatever the codec is still holding at end of stream
        self.decoder.send_eof()?;
        while self.decoder.receive_frame(&mut decoded).is_ok() {
            let ts = frame_time(&decoded, num, den).unwrap_or(stream_at);
            if ts >= stream_at {
                return scale_and_crop(&decoded, time::from_stream_time(ts, start), rotation, size);
            }
            std::mem::swap(&mut decoded, &mut last);
            last_ts = Some(ts);
        }

        match last_ts {
            Some(ts) => scale_and_crop(&last, time::from_stream_time(ts, start), rotation, size),
            None => Err(DecodeError::NoFrame(at)),
        }
    }
}

fn frame_time(frame: &RawFrame, num: i32, den: i32) -> Option<Time> {
    frame
        .timestamp()
        .or_else(|| frame.pts())
        .map(|ts| time::from_timebase(ts, num, den))
}

/// Scale to cover `size` as displayed, rotate, then cut the centred window.
fn scale_and_crop(
    frame: &RawFrame,
    timestamp: Time,
    rotation: Rotation,
    size: FrameSize,
) -> Result<VideoFrame, DecodeError> {
    let stored_size = FrameSize::new(frame.width(), frame.height());
    let source_size = rotation.apply_to_size(stored_size);
    let crop = fill_crop(source_size, size).ok_or(DecodeError::InvalidSize {
        source_size,
        target: size,
    })?;

    // The scaler works in stored orientation
    let scaled = rotation.apply_to_size(crop.scaled);
    let mut scaler = ScalingContext::get(
        frame.format(),
        frame.width(),
        frame.height(),
        Pixel::RGBA,
        scaled.width,
        scaled.height,
        ScalingFlags::BILINEAR,
    )?;
    let mut rgba = RawFrame::empty();
    scaler.run(frame, &mut rgba)?;

    Ok(VideoFrame {
        data: crop_rotated(rgba.data(0), rgba.stride(0), rotation, &crop),
        width: size.width,
        height: size.height,
        timestamp,
    })
}

/// Opens a fresh decoder for every request, so concurrent workers never
/// share demuxer state.
#[derive(Debug, Clone)]
pub struct FfmpegSource {
    path: PathBuf,
}

impl FfmpegSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl FrameSource for FfmpegSource {
    fn decode_frame(&self, at: Time, size: FrameSize) -> Result<VideoFrame, DecodeError> {
        FfmpegDecoder::open(&self.path)?.decode_frame_at(at, size)
    }
}

/// Keeps one decoder open between requests. Suited to the preview, which
/// seeks the same file over and over from a single thread.
pub struct SharedDecoder {
    path: PathBuf,
    inner: Mutex<Option<FfmpegDecoder>>,
}

impl SharedDecoder {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            inner: Mutex::new(None),
        }
    }
}

impl FrameSource for SharedDecoder {
    fn decode_frame(&self, at: Time, size: FrameSize) -> Result<VideoFrame, DecodeError> {
        let mut guard = self.inner.lock().map_err(|_| DecodeError::Poisoned)?;
        let mut decoder = match guard.take() {
            Some(decoder) => decoder,
            None => FfmpegDecoder::open(&self.path)?,
        };

        // A failed decoder is dropped and reopened on the next request
        let frame = decoder.decode_frame_at(at, size)?;
        *guard = Some(decoder);
        Ok(frame)
    }
}
