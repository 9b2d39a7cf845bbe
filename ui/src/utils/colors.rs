//! Shared color constants for the UI.

use egui::Color32;

/// Success notifications.
pub const COLOR_GREEN: Color32 = Color32::from_rgb(34, 139, 34);

/// Validation errors and unknown log actions.
pub const COLOR_RED: Color32 = Color32::from_rgb(220, 53, 69);

/// Blocked accounts.
pub const COLOR_AMBER: Color32 = Color32::from_rgb(255, 193, 7);
