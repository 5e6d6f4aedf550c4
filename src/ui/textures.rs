//! Uploading decoded frames to egui textures.

use egui::{ColorImage, Context, TextureHandle, TextureOptions};

use crate::core::time::Time;
use crate::decode::decoder::VideoFrame;
use crate::decode::geometry::FrameSize;
use crate::thumbnail::strip::ThumbnailStrip;

pub fn to_color_image(frame: &VideoFrame) -> ColorImage {
    ColorImage::from_rgba_unmultiplied([frame.width as usize, frame.height as usize], &frame.data)
}

/// One texture per strip slot, re-uploaded only when the slot's frame changes
#[derive(Default)]
pub struct StripTextures {
    slots: Vec<Option<(Time, FrameSize, TextureHandle)>>,
}

impl StripTextures {
    pub fn sync(&mut self, ctx: &Context, strip: &ThumbnailStrip) {
        self.slots.resize_with(strip.slot_count(), || None);

        for (index, (slot, texture)) in strip.slots().zip(self.slots.iter_mut()).enumerate() {
            let Some(thumbnail) = slot else {
                *texture = None;
                continue;
            };

            let frame = &thumbnail.frame;
            let fresh = texture
                .as_ref()
                .is_some_and(|(ts, size, _)| *ts == frame.timestamp && *size == frame.size());
            if !fresh {
                let handle = ctx.load_texture(
                    format!("thumbnail-{index}"),
                    to_color_image(frame),
                    TextureOptions::LINEAR,
                );
                *texture = Some((frame.timestamp, frame.size(), handle));
            }
        }
    }

    pub fn get(&self, index: usize) -> Option<&TextureHandle> {
        self.slots.get(index)?.as_ref().map(|(_, _, handle)| handle)
    }
}

/// The preview texture, tracking the surface revision it was built from
#[derive(Default)]
pub struct PreviewTexture {
    revision: u64,
    handle: Option<TextureHandle>,
}

impl PreviewTexture {
    pub fn sync(&mut self, ctx: &Context, frame: Option<&VideoFrame>, revision: u64) {
        if self.handle.is_some() && self.revision == revision {
            return;
        }
        let Some(frame) = frame else {
            return;
        };

        match self.handle.as_mut() {
            Some(handle) => handle.set(to_color_image(frame), TextureOptions::LINEAR),
            None => {
                self.handle = Some(ctx.load_texture("cover-preview", to_color_image(frame), TextureOptions::LINEAR));
            }
        }
        self.revision = revision;
    }

    pub fn get(&self) -> Option<&TextureHandle> {
        self.handle.as_ref()
    }
}
