pub mod form;
pub mod layout;
pub mod popup;

// Re-export commonly used items for convenience
pub use form::{ConnectionForm, FormValues, draw_form_popup};
pub use layout::draw_main;
pub use popup::{draw_confirm_popup, draw_error_popup, draw_language_popup};

use ratatui::layout::Rect;

/// A `width` x `height` rect centered inside `area`, clamped to fit
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
