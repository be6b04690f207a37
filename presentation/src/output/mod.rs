//! Output formatting

pub mod console;

/// Force plain output when `enabled` is false; otherwise leave terminal detection alone
pub fn set_color_enabled(enabled: bool) {
    if !enabled {
        colored::control::set_override(false);
    }
}
