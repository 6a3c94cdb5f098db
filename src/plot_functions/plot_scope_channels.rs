// src/plot_functions/plot_scope_channels.rs

use plotters::backend::BitMapBackend;
use plotters::chart::{ChartBuilder, SeriesLabelPosition};
use plotters::drawing::IntoDrawingArea;
use plotters::element::{PathElement, Text};
use plotters::series::{DashedLineSeries, LineSeries};
use plotters::style::colors::{BLACK, WHITE};
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{Color, IntoFont, RGBColor};
use std::path::Path;

use crate::constants::{
    COLOR_CHANNEL_1, COLOR_CHANNEL_2, COLOR_GRID, CURVE_LABEL_OFFSET, DASH_GAP_PX, DASH_LENGTH_PX,
    LINE_WIDTH_CHANNEL_2, LINE_WIDTH_LEGEND, LINE_WIDTH_PLOT, SCOPE_PLOT_HEIGHT,
    SCOPE_PLOT_WIDTH, SCOPE_X_COLUMN,
};
use crate::data_analysis::signal_metrics::ScopeAnalysis;
use crate::data_input::scope_table::ScopeTable;
use crate::error::{AnalysisError, AnalysisResult};
use crate::font_config::{
    FONT_TUPLE_ANNOTATION, FONT_TUPLE_AXIS_LABEL, FONT_TUPLE_LEGEND, FONT_TUPLE_TICK_LABEL,
};
use crate::plot_framework::{
    calculate_range, draw_arrow, draw_title_block, finite_bounds, finite_points,
    format_tick_label,
};

pub const CHANNEL_1_LABEL: &str = "Kurve 1";
pub const CHANNEL_2_LABEL: &str = "Kurve 2";
const X_AXIS_DESC: &str = "x-axis (second)";
const Y_AXIS_DESC: &str = "Spannung (Volt)";
const AXIS_PADDING_RATIO: f64 = 0.05;

/// Title lines embedding the derived metrics: 2 decimals for amplitude, frequency and phase,
/// 4 for periods.
pub fn format_title_lines(analysis: &ScopeAnalysis) -> Vec<String> {
    let c1 = &analysis.channel_1;
    let mut lines = vec![
        format!("Peak-to-Peak Kurve 1: {:.2} V", c1.peak_to_peak),
        format!(
            "Periode T1: {:.4} s, Frequenz f1: {:.2} Hz",
            c1.period, c1.frequency
        ),
    ];

    if let Some(c2) = &analysis.channel_2 {
        lines.push(format!("Peak-to-Peak Kurve 2: {:.2} V", c2.peak_to_peak));
        lines.push(format!(
            "Periode T2: {:.4} s, Frequenz f2: {:.2} Hz",
            c2.period, c2.frequency
        ));
        lines.push(format!(
            "Phasenverschiebung: {:.2}°",
            analysis.phase_shift_degrees.unwrap_or(0.0)
        ));
    }
    lines
}

/// Renders both channels over the shared time base, with a metrics title, grid, legend and
/// a labelled arrow on each curve at the middle sample. Writes a PNG to `output_file`.
pub fn plot_scope_channels(
    table: &ScopeTable,
    analysis: &ScopeAnalysis,
    output_file: &Path,
) -> AnalysisResult<()> {
    let channel_1_points = finite_points(table.x_axis.view(), table.channel_1.view());
    let channel_2_points = table
        .channel_2
        .as_ref()
        .map(|values| finite_points(table.x_axis.view(), values.view()));

    let (x_min, x_max) = finite_bounds(table.x_axis.iter().copied()).ok_or_else(|| {
        AnalysisError::EmptyChannel {
            column: SCOPE_X_COLUMN.to_string(),
        }
    })?;

    // Curve label anchors: (x, y) of the middle sample per channel.
    let mid = table.mid_index();
    let mut label_anchors: Vec<(&str, (f64, f64), &RGBColor)> = Vec::new();
    if mid < table.len() {
        label_anchors.push((
            CHANNEL_1_LABEL,
            (table.x_axis[mid], table.channel_1[mid]),
            COLOR_CHANNEL_1,
        ));
        if let Some(values) = &table.channel_2 {
            label_anchors.push((
                CHANNEL_2_LABEL,
                (table.x_axis[mid], values[mid]),
                COLOR_CHANNEL_2,
            ));
        }
    }
    label_anchors.retain(|(_, (x, y), _)| x.is_finite() && y.is_finite());

    let y_values = channel_1_points
        .iter()
        .chain(channel_2_points.iter().flatten())
        .map(|&(_, y)| y)
        .chain(
            label_anchors
                .iter()
                .map(|(_, (_, y), _)| y + CURVE_LABEL_OFFSET),
        );
    let (y_min, y_max) = finite_bounds(y_values).unwrap_or((0.0, 0.0));

    let (x_lo, x_hi) = calculate_range(x_min, x_max, AXIS_PADDING_RATIO);
    let (y_lo, y_hi) = calculate_range(y_min, y_max, AXIS_PADDING_RATIO);
    let x_span = x_hi - x_lo;
    let y_span = y_hi - y_lo;

    let root = BitMapBackend::new(output_file, (SCOPE_PLOT_WIDTH, SCOPE_PLOT_HEIGHT))
        .into_drawing_area();
    root.fill(&WHITE)?;

    let title_height = draw_title_block(&root, &format_title_lines(analysis))?;
    let plot_area = root.margin(title_height + 5, 5, 5, 15);

    let mut chart = ChartBuilder::on(&plot_area)
        .margin(5)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)?;

    chart
        .configure_mesh()
        .x_desc(X_AXIS_DESC)
        .y_desc(Y_AXIS_DESC)
        .x_labels(10)
        .y_labels(10)
        .x_label_formatter(&|x| format_tick_label(*x, x_span))
        .y_label_formatter(&|y| format_tick_label(*y, y_span))
        .bold_line_style(COLOR_GRID.mix(0.8))
        .light_line_style(COLOR_GRID.mix(0.3))
        .label_style(FONT_TUPLE_TICK_LABEL)
        .axis_desc_style(FONT_TUPLE_AXIS_LABEL)
        .draw()?;

    chart
        .draw_series(LineSeries::new(
            channel_1_points,
            COLOR_CHANNEL_1.stroke_width(LINE_WIDTH_PLOT),
        ))?
        .label(CHANNEL_1_LABEL)
        .legend(|(x, y)| {
            PathElement::new(
                vec![(x, y), (x + 20, y)],
                COLOR_CHANNEL_1.stroke_width(LINE_WIDTH_LEGEND),
            )
        });

    if let Some(points) = channel_2_points {
        chart
            .draw_series(DashedLineSeries::new(
                points,
                DASH_LENGTH_PX,
                DASH_GAP_PX,
                COLOR_CHANNEL_2.stroke_width(LINE_WIDTH_CHANNEL_2),
            ))?
            .label(CHANNEL_2_LABEL)
            .legend(|(x, y)| {
                PathElement::new(
                    vec![(x, y), (x + 20, y)],
                    COLOR_CHANNEL_2.stroke_width(LINE_WIDTH_LEGEND),
                )
            });
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .label_font(FONT_TUPLE_LEGEND)
        .draw()?;

    // Label text sits CURVE_LABEL_OFFSET above the sample, the arrow points back down at it.
    let label_style = FONT_TUPLE_ANNOTATION
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Left, VPos::Bottom));
    for (label, (x, y), color) in label_anchors {
        let tip = chart.backend_coord(&(x, y));
        let tail = chart.backend_coord(&(x, y + CURVE_LABEL_OFFSET));
        draw_arrow(&root, tail, tip, color)?;
        root.draw(&Text::new(label, tail, label_style.clone()))?;
    }

    root.present()?;
    Ok(())
}
