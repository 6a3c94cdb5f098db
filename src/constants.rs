// src/constants.rs

use plotters::style::colors::full_palette::{BLUE, GREY, ORANGE};
use plotters::style::RGBColor;

// Scope chart dimensions (10 x 6 inch at 100 dpi).
pub const SCOPE_PLOT_WIDTH: u32 = 1000;
pub const SCOPE_PLOT_HEIGHT: u32 = 600;

// Bode chart dimensions (12 x 6 inch at 100 dpi).
pub const BODE_PLOT_WIDTH: u32 = 1200;
pub const BODE_PLOT_HEIGHT: u32 = 600;

// --- Peak analysis ---
// Fraction of the channel 1 maximum a sample must reach to count as a peak.
pub const PEAK_THRESHOLD_RATIO: f64 = 0.8;
// Minimum spacing between two maxima, in samples. Fixed, not derived from the sample rate.
pub const MIN_PEAK_DISTANCE_SAMPLES: usize = 5000;

// --- Scope CSV layout ---
pub const SCOPE_X_COLUMN: &str = "x-axis";
pub const SCOPE_CHANNEL_1_COLUMN: &str = "1";
pub const SCOPE_CHANNEL_2_COLUMN: &str = "2";
pub const SCOPE_FILE_EXTENSION: &str = ".csv";

// --- Bode CSV layout ---
pub const BODE_FREQUENCY_COLUMN: &str = "Frequenz";
pub const BODE_UE_COLUMN: &str = "Ue";
pub const BODE_UA_COLUMN: &str = "Ua";
pub const BODE_PHASE_COLUMN: &str = "Phase";
pub const BODE_DELIMITER: u8 = b';';
pub const DEFAULT_BODE_INPUT: &str = "1.Versuch_korrekt.CSV";

// Reference markers drawn on every Bode chart.
pub const BODE_CUTOFF_HZ: f64 = 340.0;
pub const BODE_CUTOFF_DB: f64 = -3.0;
// Marker label offsets as fractions of the current axis span.
pub const BODE_CUTOFF_LABEL_Y_FRACTION: f64 = 0.1;
pub const BODE_DB_LABEL_X_FRACTION: f64 = 0.05;

// Vertical offset of the curve labels above the annotated sample, in data units (volts).
pub const CURVE_LABEL_OFFSET: f64 = 0.1;

// --- Plot Color Assignments ---
pub const COLOR_CHANNEL_1: &RGBColor = &BLUE;
pub const COLOR_CHANNEL_2: &RGBColor = &ORANGE;
pub const COLOR_BODE_RATIO: RGBColor = RGBColor(31, 119, 180);
pub const COLOR_BODE_PHASE: RGBColor = RGBColor(214, 39, 40);
pub const COLOR_REFERENCE_LINE: &RGBColor = &GREY;
pub const COLOR_GRID: RGBColor = RGBColor(200, 200, 200);

// Stroke widths for lines
pub const LINE_WIDTH_PLOT: u32 = 1;
pub const LINE_WIDTH_CHANNEL_2: u32 = 2;
pub const LINE_WIDTH_LEGEND: u32 = 2;
pub const LINE_WIDTH_REFERENCE: u32 = 1;

// Dash pattern (pixels) for dashed series and reference lines.
pub const DASH_LENGTH_PX: u32 = 8;
pub const DASH_GAP_PX: u32 = 5;

// Font sizes
pub const FONT_SIZE_TITLE: i32 = 16;
pub const FONT_SIZE_AXIS_LABEL: i32 = 14;
pub const FONT_SIZE_TICK_LABEL: i32 = 12;
pub const FONT_SIZE_LEGEND: i32 = 13;
pub const FONT_SIZE_ANNOTATION: i32 = 13;

// src/constants.rs
