//! The cover picker screen: sole owner of the strip, scrub state and preview.
//! UI events come in as [`ScreenCommand`]s; thumbnail results come in through
//! [`CoverScreen::poll_thumbnails`]. Nothing else mutates screen state.

use std::sync::Arc;

use tokio::runtime::Handle;
use tracing::{debug, error, info};

use crate::config::PickerSettings;
use crate::core::progress::Progress;
use crate::core::time::{self, Time, ZERO};
use crate::decode::asset::VideoAsset;
use crate::decode::decoder::{DecodeError, FfmpegSource, FrameSource, SharedDecoder, VideoFrame};
use crate::preview::surface::PreviewSurface;
use crate::scrub::controller::ScrubController;
use crate::thumbnail::generator::{ThumbnailGenerator, ThumbnailJob};
use crate::thumbnail::strip::ThumbnailStrip;

/// Command sent to the screen by the UI
#[derive(Debug, Clone, PartialEq)]
pub enum ScreenCommand {
    /// Pointer pressed on the strip, strip-local x in points
    BeginDrag(f32),
    /// Pointer moved while pressed
    DragTo(f32),
    EndDrag,
    /// Strip laid out at a new width in points, on a display with the given
    /// scale factor
    Layout { strip_width: f32, pixels_per_point: f32 },
    Back,
    Done,
    AddFromCameraRoll,
}

/// Error type for opening the screen
#[derive(Debug, thiserror::Error)]
pub enum ScreenError {
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),
}

pub struct CoverScreen {
    settings: PickerSettings,
    asset: Option<VideoAsset>,
    generator: Option<ThumbnailGenerator>,
    job: Option<ThumbnailJob>,
    preview: Option<PreviewSurface>,
    scrub: ScrubController,
    empty_strip: ThumbnailStrip,
}

impl CoverScreen {
    /// Load the configured video and prepare FFmpeg-backed decoding
    pub fn open(settings: PickerSettings, runtime: Handle) -> Result<Self, ScreenError> {
        let asset = VideoAsset::load(&settings.video_path)?;
        info!(
            path = %asset.path().display(),
            duration = %time::format_time(asset.duration()),
            size = ?asset.info().display_size(),
            rotation = ?asset.info().rotation,
            "loaded video"
        );

        let thumbnails: Arc<dyn FrameSource> = Arc::new(FfmpegSource::new(asset.path()));
        let preview: Arc<dyn FrameSource> = Arc::new(SharedDecoder::new(asset.path()));
        Ok(Self::with_sources(settings, Some(asset), thumbnails, preview, runtime))
    }

    /// Like [`CoverScreen::open`], but a video that cannot be loaded leaves
    /// the screen empty instead of failing.
    pub fn open_or_empty(settings: PickerSettings, runtime: Handle) -> Self {
        match Self::open(settings.clone(), runtime) {
            Ok(screen) => screen,
            Err(e) => {
                error!(path = %settings.video_path.display(), "failed to load video: {}", e);
                Self::empty(settings)
            }
        }
    }

    /// Screen with explicit frame sources. `asset` may be absent, in which
    /// case the duration is zero and every seek lands on time zero.
    pub fn with_sources(
        settings: PickerSettings,
        asset: Option<VideoAsset>,
        thumbnails: Arc<dyn FrameSource>,
        preview: Arc<dyn FrameSource>,
        runtime: Handle,
    ) -> Self {
        let preview = PreviewSurface::new(preview, settings.preview_size, settings.cache_capacity);
        let mut screen = Self {
            scrub: ScrubController::new(settings.strip_metrics(0.0)),
            generator: Some(ThumbnailGenerator::new(thumbnails, runtime)),
            preview: Some(preview),
            job: None,
            asset,
            settings,
            empty_strip: ThumbnailStrip::default(),
        };
        screen.refresh_preview();
        screen
    }

    /// Screen with nothing to show: no strip, no preview
    pub fn empty(settings: PickerSettings) -> Self {
        Self {
            scrub: ScrubController::new(settings.strip_metrics(0.0)),
            generator: None,
            preview: None,
            job: None,
            asset: None,
            settings,
            empty_strip: ThumbnailStrip::default(),
        }
    }

    /// Process a UI command
    pub fn process(&mut self, command: ScreenCommand) {
        match command {
            ScreenCommand::BeginDrag(x) => {
                self.scrub.begin_drag(x);
                self.refresh_preview();
            }
            ScreenCommand::DragTo(x) => {
                self.scrub.drag_to(x);
                self.refresh_preview();
            }
            ScreenCommand::EndDrag => {
                let progress = self.scrub.end_drag();
                debug!(progress = progress.value(), at = %time::format_time(self.selected_time()), "cover selected");
            }
            ScreenCommand::Layout {
                strip_width,
                pixels_per_point,
            } => self.layout(strip_width, pixels_per_point),
            ScreenCommand::Back | ScreenCommand::Done | ScreenCommand::AddFromCameraRoll => {
                debug!(?command, "not implemented");
            }
        }
    }

    fn layout(&mut self, strip_width: f32, pixels_per_point: f32) {
        if strip_width != self.scrub.metrics().strip_width {
            self.scrub.set_metrics(self.settings.strip_metrics(strip_width));
        }

        let preview_size = self.settings.preview_pixels(pixels_per_point);
        let resized = match self.preview.as_mut() {
            Some(preview) if preview.size() != preview_size => {
                preview.set_size(preview_size);
                true
            }
            _ => false,
        };
        if resized {
            self.refresh_preview();
        }

        let Some(generator) = self.generator.as_ref() else {
            return;
        };
        let size = self.settings.thumbnail_size(strip_width, pixels_per_point);
        if size.is_empty() || self.job.as_ref().is_some_and(|job| job.size() == size) {
            return;
        }

        // Replacing the job cancels the one decoding at the old size
        self.job = Some(generator.start(self.duration(), self.settings.thumbnail_count, size));
    }

    fn refresh_preview(&mut self) {
        let progress = self.scrub.progress();
        let duration = self.duration();
        if let Some(preview) = self.preview.as_mut() {
            preview.seek(progress, duration);
        }
    }

    /// Apply finished thumbnail decodes; returns how many were placed
    pub fn poll_thumbnails(&mut self) -> usize {
        self.job.as_mut().map_or(0, ThumbnailJob::poll)
    }

    /// Cancel outstanding work; the screen is being torn down
    pub fn shutdown(&mut self) {
        if let Some(mut job) = self.job.take() {
            job.cancel();
        }
    }

    pub fn settings(&self) -> &PickerSettings {
        &self.settings
    }

    pub fn asset(&self) -> Option<&VideoAsset> {
        self.asset.as_ref()
    }

    /// Asset duration, zero while no asset is loaded
    pub fn duration(&self) -> Time {
        self.asset.as_ref().map_or(ZERO, VideoAsset::duration)
    }

    pub fn scrub(&self) -> &ScrubController {
        &self.scrub
    }

    pub fn progress(&self) -> Progress {
        self.scrub.progress()
    }

    /// Timestamp of the frame picked as cover
    pub fn selected_time(&self) -> Time {
        self.progress().to_time(self.duration())
    }

    pub fn strip(&self) -> &ThumbnailStrip {
        self.job.as_ref().map_or(&self.empty_strip, ThumbnailJob::strip)
    }

    pub fn thumbnails_finished(&self) -> bool {
        self.job.as_ref().map_or(true, ThumbnailJob::is_finished)
    }

    pub fn preview(&self) -> Option<&PreviewSurface> {
        self.preview.as_ref()
    }

    pub fn preview_frame(&self) -> Option<&VideoFrame> {
        self.preview.as_ref().and_then(PreviewSurface::frame)
    }
}

impl Drop for CoverScreen {
    fn drop(&mut self) {
        self.shutdown();
    }
}
