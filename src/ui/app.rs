//! Cover picker window.
//!
//! Top bar chrome, the fill-cropped cover preview, caption, the scrub strip
//! and the camera-roll button. Buttons are placeholders.

use eframe::{App, CreationContext};
use egui::{vec2, Align, Button, CentralPanel, Color32, Context, Layout, RichText, Sense, TopBottomPanel, Ui};

use crate::core::time;
use crate::screen::{CoverScreen, ScreenCommand};
use crate::ui::strip_view::StripView;
use crate::ui::textures::PreviewTexture;

const CAPTION: &str = "To select a cover image, choose one from\nyour video or an image from your camera roll.";
const PREVIEW_ROUNDING: f32 = 15.0;
const STRIP_MARGIN: f32 = 15.0;

pub struct CoverPickerApp {
    screen: CoverScreen,
    strip: StripView,
    preview: PreviewTexture,
    // Keeps the decode worker pool alive for the app's lifetime
    _runtime: tokio::runtime::Runtime,
}

impl CoverPickerApp {
    pub fn new(_cc: &CreationContext<'_>, screen: CoverScreen, runtime: tokio::runtime::Runtime) -> Self {
        Self {
            screen,
            strip: StripView::new(),
            preview: PreviewTexture::default(),
            _runtime: runtime,
        }
    }

    fn top_bar(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            if ui.button(RichText::new("<").heading()).clicked() {
                self.screen.process(ScreenCommand::Back);
            }
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                if ui.button("Done").clicked() {
                    self.screen.process(ScreenCommand::Done);
                }
                ui.centered_and_justified(|ui| {
                    ui.label(RichText::new("Cover").strong());
                });
            });
        });
    }

    fn cover_preview(&mut self, ui: &mut Ui) {
        let preview_size = self.screen.settings().preview_size;
        let size = vec2(preview_size.width as f32, preview_size.height as f32);
        let (rect, _) = ui.allocate_exact_size(size, Sense::hover());

        let revision = self.screen.preview().map_or(0, |p| p.revision());
        self.preview.sync(ui.ctx(), self.screen.preview_frame(), revision);

        match self.preview.get() {
            Some(texture) => {
                egui::Image::new((texture.id(), size))
                    .rounding(PREVIEW_ROUNDING)
                    .paint_at(ui, rect);
            }
            None => {
                ui.put(rect, egui::Spinner::new());
            }
        }
    }
}

impl App for CoverPickerApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        if self.screen.poll_thumbnails() > 0 {
            ctx.request_repaint();
        }

        TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| self.top_bar(ui));

        TopBottomPanel::bottom("camera_roll")
            .resizable(false)
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    if ui.add(Button::new("+  Add From Camera Roll").frame(false)).clicked() {
                        self.screen.process(ScreenCommand::AddFromCameraRoll);
                    }
                });
            });

        CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(20.0);
                self.cover_preview(ui);
                ui.label(
                    RichText::new(time::format_time(self.screen.selected_time()))
                        .small()
                        .color(Color32::GRAY),
                );
                ui.add_space(30.0);
                ui.label(RichText::new(CAPTION).small().color(Color32::GRAY));
                ui.add_space(50.0);
            });

            ui.horizontal(|ui| {
                ui.add_space(STRIP_MARGIN);
                ui.vertical(|ui| {
                    ui.set_width(ui.available_width() - STRIP_MARGIN);
                    self.strip.show(ui, &mut self.screen);
                });
            });
        });

        // Keep polling while decodes are outstanding
        if !self.screen.thumbnails_finished() {
            ctx.request_repaint_after(std::time::Duration::from_millis(30));
        }
    }
}
