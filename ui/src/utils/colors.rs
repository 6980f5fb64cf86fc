//! Shared color constants for the UI.

use egui::Color32;

/// Success notices and enabled flags.
pub const COLOR_GREEN: Color32 = Color32::from_rgb(34, 139, 34);

/// Error notices and destructive actions.
pub const COLOR_RED: Color32 = Color32::from_rgb(220, 53, 69);

/// Informational notices.
pub const COLOR_BLUE: Color32 = Color32::from_rgb(13, 110, 253);

/// Table frame stroke.
pub const TABLE_BORDER_COLOR: Color32 = Color32::from_rgb(200, 200, 200);
