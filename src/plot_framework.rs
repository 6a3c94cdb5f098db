// src/plot_framework.rs

use plotters::backend::BitMapBackend;
use plotters::coord::Shift;
use plotters::drawing::DrawingArea;
use plotters::element::{PathElement, Polygon, Rectangle, Text};
use plotters::style::colors::{BLACK, WHITE};
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{Color, FontTransform, IntoFont, RGBColor};

use ndarray::ArrayView1;
use std::path::{Path, PathBuf};

use crate::constants::{COLOR_REFERENCE_LINE, LINE_WIDTH_REFERENCE};
use crate::error::AnalysisResult;
use crate::font_config::{title_line_height, FONT_TUPLE_ANNOTATION, FONT_TUPLE_TITLE};

const TITLE_TOP_MARGIN_PX: i32 = 8;
const LABEL_PADDING_PX: i32 = 5;
const ARROW_HEAD_LENGTH_PX: f64 = 10.0;
const ARROW_HEAD_HALF_WIDTH_PX: f64 = 4.0;

/// Calculate plot range with padding.
/// Adds `padding_ratio` of the span on both sides, or a fixed padding for very small ranges.
pub fn calculate_range(min_val: f64, max_val: f64, padding_ratio: f64) -> (f64, f64) {
    let (min, max) = if min_val <= max_val {
        (min_val, max_val)
    } else {
        (max_val, min_val)
    };
    let range = (max - min).abs();
    let padding = if range < 1e-6 { 0.5 } else { range * padding_ratio };
    (min - padding, max + padding)
}

/// Smallest and largest finite value, or `None` if there is none.
pub fn finite_bounds<I: IntoIterator<Item = f64>>(values: I) -> Option<(f64, f64)> {
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Pairs `xs` with `ys`, dropping every point where either value is not finite.
pub fn finite_points(xs: ArrayView1<f64>, ys: ArrayView1<f64>) -> Vec<(f64, f64)> {
    xs.iter()
        .zip(ys.iter())
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .map(|(&x, &y)| (x, y))
        .collect()
}

/// Tick label with just enough decimals for an axis spanning `span`.
/// A span of 0.02 gets three decimals, a span of 2 one, a span of 10 or more none.
pub fn format_tick_label(value: f64, span: f64) -> String {
    if !span.is_finite() || span <= 0.0 {
        return format!("{value}");
    }
    let decimals = (1.0 - span.log10().floor()).clamp(0.0, 9.0) as usize;
    let label = format!("{value:.decimals$}");
    // Avoid "-0.00" style labels on the zero line.
    if label.starts_with('-') && label[1..].chars().all(|c| c == '0' || c == '.') {
        label[1..].to_string()
    } else {
        label
    }
}

/// Frequency tick label with "k" and "M" notation for large values.
pub fn format_frequency_label(hz: f64) -> String {
    if hz.abs() >= 1_000_000.0 {
        format!("{:.1}M", hz / 1_000_000.0)
    } else if hz.abs() >= 1000.0 {
        let khz = hz / 1000.0;
        if khz.fract().abs() < 1e-9 {
            format!("{khz:.0}k")
        } else {
            format!("{khz:.1}k")
        }
    } else if hz.abs() < 10.0 && hz.fract() != 0.0 {
        format!("{hz:.1}")
    } else {
        format!("{hz:.0}")
    }
}

/// `<output_dir>/<input stem><suffix>.png`
pub fn png_output_path(input_path: &Path, output_dir: &Path, suffix: &str) -> PathBuf {
    let stem = input_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    output_dir.join(format!("{stem}{suffix}.png"))
}

/// Where a boxed label sits relative to its anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelAlign {
    /// Box centred horizontally on the anchor, bottom edge on the anchor.
    BottomCenter,
    /// Box centred vertically on the anchor, left edge on the anchor.
    CenterLeft,
}

/// Draws a white label box with a grey border. `anchor` is in pixels of `area`.
/// Vertical labels read bottom to top.
pub fn draw_boxed_label(
    area: &DrawingArea<BitMapBackend, Shift>,
    anchor: (i32, i32),
    text: &str,
    align: LabelAlign,
    vertical: bool,
) -> AnalysisResult<()> {
    let mut style = FONT_TUPLE_ANNOTATION
        .into_font()
        .color(COLOR_REFERENCE_LINE)
        .pos(Pos::new(HPos::Center, VPos::Center));
    let (text_w, text_h) = area.estimate_text_size(text, &style)?;
    let (text_w, text_h) = if vertical {
        (text_h as i32, text_w as i32)
    } else {
        (text_w as i32, text_h as i32)
    };
    let box_w = text_w + 2 * LABEL_PADDING_PX;
    let box_h = text_h + 2 * LABEL_PADDING_PX;

    let center = match align {
        LabelAlign::BottomCenter => (anchor.0, anchor.1 - box_h / 2),
        LabelAlign::CenterLeft => (anchor.0 + box_w / 2, anchor.1),
    };
    let top_left = (center.0 - box_w / 2, center.1 - box_h / 2);
    let bottom_right = (top_left.0 + box_w, top_left.1 + box_h);

    area.draw(&Rectangle::new([top_left, bottom_right], WHITE.filled()))?;
    area.draw(&Rectangle::new(
        [top_left, bottom_right],
        COLOR_REFERENCE_LINE.stroke_width(LINE_WIDTH_REFERENCE),
    ))?;

    if vertical {
        style = style.transform(FontTransform::Rotate270);
    }
    area.draw(&Text::new(text.to_string(), center, style))?;
    Ok(())
}

/// Draws a straight arrow from `tail` to `tip` (pixels of `area`).
pub fn draw_arrow(
    area: &DrawingArea<BitMapBackend, Shift>,
    tail: (i32, i32),
    tip: (i32, i32),
    color: &RGBColor,
) -> AnalysisResult<()> {
    area.draw(&PathElement::new(vec![tail, tip], color.stroke_width(1)))?;

    let dx = (tip.0 - tail.0) as f64;
    let dy = (tip.1 - tail.1) as f64;
    let length = dx.hypot(dy);
    if length < 1.0 {
        return Ok(());
    }
    let (ux, uy) = (dx / length, dy / length);
    let head_length = ARROW_HEAD_LENGTH_PX.min(length);
    let base = (tip.0 as f64 - ux * head_length, tip.1 as f64 - uy * head_length);
    let left = (
        (base.0 - uy * ARROW_HEAD_HALF_WIDTH_PX).round() as i32,
        (base.1 + ux * ARROW_HEAD_HALF_WIDTH_PX).round() as i32,
    );
    let right = (
        (base.0 + uy * ARROW_HEAD_HALF_WIDTH_PX).round() as i32,
        (base.1 - ux * ARROW_HEAD_HALF_WIDTH_PX).round() as i32,
    );
    area.draw(&Polygon::new(vec![tip, left, right], color.filled()))?;
    Ok(())
}

/// Draws centred title lines at the top of `area` and returns the pixel height they occupy.
pub fn draw_title_block(
    area: &DrawingArea<BitMapBackend, Shift>,
    lines: &[String],
) -> AnalysisResult<i32> {
    if lines.is_empty() {
        return Ok(0);
    }
    let line_height = title_line_height();
    let (width, _) = area.dim_in_pixel();
    let style = FONT_TUPLE_TITLE
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Top));

    for (i, line) in lines.iter().enumerate() {
        area.draw(&Text::new(
            line.clone(),
            (width as i32 / 2, TITLE_TOP_MARGIN_PX + i as i32 * line_height),
            style.clone(),
        ))?;
    }
    Ok(TITLE_TOP_MARGIN_PX + lines.len() as i32 * line_height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_range_pads_both_sides() {
        let (lo, hi) = calculate_range(0.0, 10.0, 0.05);
        assert!((lo + 0.5).abs() < 1e-12);
        assert!((hi - 10.5).abs() < 1e-12);
    }

    #[test]
    fn test_calculate_range_swapped_and_flat_inputs() {
        assert_eq!(calculate_range(10.0, 0.0, 0.15), calculate_range(0.0, 10.0, 0.15));
        assert_eq!(calculate_range(2.0, 2.0, 0.15), (1.5, 2.5));
    }

    #[test]
    fn test_finite_bounds_skips_non_finite() {
        let values = [f64::NAN, 3.0, f64::NEG_INFINITY, -1.0, f64::INFINITY];
        assert_eq!(finite_bounds(values), Some((-1.0, 3.0)));
        assert_eq!(finite_bounds([f64::NAN]), None);
    }

    #[test]
    fn test_finite_points_drops_gaps() {
        let xs = ndarray::array![0.0, 1.0, 2.0, f64::NAN];
        let ys = ndarray::array![1.0, f64::NAN, 3.0, 4.0];
        assert_eq!(finite_points(xs.view(), ys.view()), vec![(0.0, 1.0), (2.0, 3.0)]);
    }

    #[test]
    fn test_png_output_path_uses_stem() {
        let path = png_output_path(Path::new("data/messung 1.csv"), Path::new("out"), "");
        assert_eq!(path, Path::new("out").join("messung 1.png"));
        let bode = png_output_path(Path::new("1.Versuch_korrekt.CSV"), Path::new("."), "_bode");
        assert_eq!(bode, Path::new(".").join("1.Versuch_korrekt_bode.png"));
    }
}
