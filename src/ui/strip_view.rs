//! Thumbnail strip with the draggable scrub handle.

use egui::{pos2, vec2, Color32, Rect, Sense, Stroke, Ui};

use crate::screen::{CoverScreen, ScreenCommand};
use crate::ui::textures::StripTextures;

const STRIP_ROUNDING: f32 = 6.0;
const HANDLE_ROUNDING: f32 = 4.0;
const HANDLE_OVERHANG: f32 = 4.0;

/// Strip view component
#[derive(Default)]
pub struct StripView {
    textures: StripTextures,
}

impl StripView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lay out the strip across the available width, feed pointer input to
    /// the screen and paint thumbnails plus handle.
    pub fn show(&mut self, ui: &mut Ui, screen: &mut CoverScreen) {
        let height = screen.settings().strip_height;
        let (rect, response) = ui.allocate_exact_size(vec2(ui.available_width(), height), Sense::click_and_drag());

        screen.process(ScreenCommand::Layout {
            strip_width: rect.width(),
            pixels_per_point: ui.ctx().pixels_per_point(),
        });

        let pointer_x = response.interact_pointer_pos().map(|pointer| pointer.x - rect.left());
        let dragging = screen.scrub().phase().is_dragging();
        if let Some(command) = pointer_command(dragging, pointer_x, response.is_pointer_button_down_on()) {
            screen.process(command);
        }

        self.textures.sync(ui.ctx(), screen.strip());
        self.paint(ui, rect, screen);
    }

    fn paint(&self, ui: &Ui, rect: Rect, screen: &CoverScreen) {
        let painter = ui.painter_at(rect.expand(HANDLE_OVERHANG));
        let strip = screen.strip();
        let slot_width = rect.width() / strip.slot_count().max(1) as f32;
        let uv = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));

        painter.rect_filled(rect, STRIP_ROUNDING, ui.visuals().extreme_bg_color);

        // Missing thumbnails stay as gaps
        for index in 0..strip.slot_count() {
            if let Some(texture) = self.textures.get(index) {
                let slot = Rect::from_min_size(
                    pos2(rect.left() + slot_width * index as f32, rect.top()),
                    vec2(slot_width, rect.height()),
                );
                painter.image(texture.id(), slot, uv, Color32::WHITE);
            }
        }

        let handle_width = screen.scrub().metrics().handle_width;
        let handle = Rect::from_min_size(
            pos2(rect.left() + screen.scrub().offset(), rect.top() - HANDLE_OVERHANG),
            vec2(handle_width, rect.height() + HANDLE_OVERHANG * 2.0),
        );
        painter.rect_stroke(handle, HANDLE_ROUNDING, Stroke::new(3.0, Color32::WHITE));
    }
}

/// Map the strip's pointer state for one frame to a scrub command.
///
/// Any press or movement while the button is held on the strip drags,
/// including small moves that egui does not yet count as a drag.
fn pointer_command(dragging: bool, pointer_x: Option<f32>, button_down: bool) -> Option<ScreenCommand> {
    match (dragging, pointer_x, button_down) {
        // A tap pressed and released within one frame still lands; the
        // release is seen next frame
        (false, Some(x), _) => Some(ScreenCommand::BeginDrag(x)),
        (true, Some(x), true) => Some(ScreenCommand::DragTo(x)),
        (true, _, false) => Some(ScreenCommand::EndDrag),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_begins_drag() {
        assert_eq!(pointer_command(false, Some(12.0), true), Some(ScreenCommand::BeginDrag(12.0)));
    }

    #[test]
    fn test_small_move_after_press_follows_pointer() {
        // A couple of points of travel is below egui's drag threshold
        assert_eq!(pointer_command(true, Some(14.0), true), Some(ScreenCommand::DragTo(14.0)));
    }

    #[test]
    fn test_release_ends_drag() {
        assert_eq!(pointer_command(true, Some(14.0), false), Some(ScreenCommand::EndDrag));
        assert_eq!(pointer_command(true, None, false), Some(ScreenCommand::EndDrag));
    }

    #[test]
    fn test_quick_tap_selects_then_ends() {
        assert_eq!(pointer_command(false, Some(12.0), false), Some(ScreenCommand::BeginDrag(12.0)));
        assert_eq!(pointer_command(true, None, false), Some(ScreenCommand::EndDrag));
    }

    #[test]
    fn test_idle_pointer_does_nothing() {
        assert_eq!(pointer_command(false, None, false), None);
        assert_eq!(pointer_command(false, None, true), None);
        assert_eq!(pointer_command(true, None, true), None);
    }
}
