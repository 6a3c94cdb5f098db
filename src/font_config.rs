// src/font_config.rs

// Font style constants for plot rendering.
// Every chart takes its text styles from here so titles, axes and annotations stay consistent.

use crate::constants::{
    FONT_SIZE_ANNOTATION, FONT_SIZE_AXIS_LABEL, FONT_SIZE_LEGEND, FONT_SIZE_TICK_LABEL,
    FONT_SIZE_TITLE,
};

/// Font family name for system fonts. plotters resolves "sans-serif" through the platform font list.
pub const FONT_FAMILY_SYSTEM: &str = "sans-serif";

// Tuple representations for use with plotters' IntoFont trait
pub const FONT_TUPLE_TITLE: (&str, i32) = (FONT_FAMILY_SYSTEM, FONT_SIZE_TITLE);
pub const FONT_TUPLE_AXIS_LABEL: (&str, i32) = (FONT_FAMILY_SYSTEM, FONT_SIZE_AXIS_LABEL);
pub const FONT_TUPLE_TICK_LABEL: (&str, i32) = (FONT_FAMILY_SYSTEM, FONT_SIZE_TICK_LABEL);
pub const FONT_TUPLE_LEGEND: (&str, i32) = (FONT_FAMILY_SYSTEM, FONT_SIZE_LEGEND);
pub const FONT_TUPLE_ANNOTATION: (&str, i32) = (FONT_FAMILY_SYSTEM, FONT_SIZE_ANNOTATION);

/// Pixel height reserved for one line of title text.
pub fn title_line_height() -> i32 {
    FONT_SIZE_TITLE + FONT_SIZE_TITLE / 2
}
