// src/plot_functions/plot_bode.rs

use log::warn;
use plotters::backend::BitMapBackend;
use plotters::chart::ChartBuilder;
use plotters::drawing::IntoDrawingArea;
use plotters::prelude::IntoLogRange;
use plotters::series::{DashedLineSeries, LineSeries};
use plotters::style::colors::WHITE;
use plotters::style::{Color, IntoFont};
use std::path::Path;

use crate::constants::{
    BODE_CUTOFF_DB, BODE_CUTOFF_HZ, BODE_CUTOFF_LABEL_Y_FRACTION, BODE_DB_LABEL_X_FRACTION,
    BODE_PLOT_HEIGHT, BODE_PLOT_WIDTH, COLOR_BODE_PHASE, COLOR_BODE_RATIO, COLOR_GRID,
    COLOR_REFERENCE_LINE, DASH_GAP_PX, DASH_LENGTH_PX, LINE_WIDTH_PLOT, LINE_WIDTH_REFERENCE,
};
use crate::data_analysis::bode_response::ratio_db;
use crate::data_input::bode_table::BodeTable;
use crate::error::{AnalysisError, AnalysisResult};
use crate::font_config::{FONT_TUPLE_AXIS_LABEL, FONT_TUPLE_TICK_LABEL};
use crate::plot_framework::{
    calculate_range, draw_boxed_label, finite_bounds, format_frequency_label, format_tick_label,
    LabelAlign,
};

const X_AXIS_DESC: &str = "Frequenz / Hz";
const RATIO_AXIS_DESC: &str = "Verhältnis Ua/Ue / dB";
const PHASE_AXIS_DESC: &str = "Phasenverschiebung / °";
const AXIS_PADDING_RATIO: f64 = 0.05;

/// Frequency range padded by the same fraction on both sides of a logarithmic axis.
fn log_range(min_hz: f64, max_hz: f64, padding_ratio: f64) -> (f64, f64) {
    if max_hz <= min_hz {
        return (min_hz / 2.0, min_hz * 2.0);
    }
    let factor = (max_hz / min_hz).powf(padding_ratio);
    (min_hz / factor, max_hz * factor)
}

/// Points that can be shown on a log-frequency axis: positive, finite frequency and finite value.
fn plottable_points(frequency_hz: &[f64], values: &[f64]) -> Vec<(f64, f64)> {
    frequency_hz
        .iter()
        .zip(values)
        .filter(|(f, v)| f.is_finite() && **f > 0.0 && v.is_finite())
        .map(|(&f, &v)| (f, v))
        .collect()
}

/// Renders the gain (left axis, dB) and phase (right axis, degrees) of a frequency sweep on a
/// logarithmic frequency axis, with the 340 Hz / -3 dB reference lines and their labels.
pub fn plot_bode(table: &BodeTable, output_file: &Path) -> AnalysisResult<()> {
    let frequency_hz = table.frequency_hz.to_vec();
    let gain_db = ratio_db(table.ue.view(), table.ua.view()).to_vec();
    let phase_deg = table.phase_deg.to_vec();

    let gain_points = plottable_points(&frequency_hz, &gain_db);
    let phase_points = plottable_points(&frequency_hz, &phase_deg);

    if gain_points.len() < table.len() {
        warn!(
            "{} of {} gain points are not finite (non-positive Ua/Ue or frequency) and are not drawn",
            table.len() - gain_points.len(),
            table.len()
        );
    }
    if phase_points.len() < table.len() {
        warn!(
            "{} of {} phase points are not finite and are not drawn",
            table.len() - phase_points.len(),
            table.len()
        );
    }
    if gain_points.is_empty() && phase_points.is_empty() {
        return Err(AnalysisError::Plot(
            "no finite gain or phase values to plot".to_string(),
        ));
    }

    // Axis limits include the reference markers, like an autoscaled chart would.
    let (f_min, f_max) = finite_bounds(
        gain_points
            .iter()
            .chain(&phase_points)
            .map(|&(f, _)| f)
            .chain(std::iter::once(BODE_CUTOFF_HZ)),
    )
    .unwrap_or((BODE_CUTOFF_HZ, BODE_CUTOFF_HZ));
    let (db_min, db_max) = finite_bounds(
        gain_points
            .iter()
            .map(|&(_, db)| db)
            .chain(std::iter::once(BODE_CUTOFF_DB)),
    )
    .unwrap_or((BODE_CUTOFF_DB, BODE_CUTOFF_DB));
    let (phase_min, phase_max) =
        finite_bounds(phase_points.iter().map(|&(_, p)| p)).unwrap_or((0.0, 0.0));

    let (f_lo, f_hi) = log_range(f_min, f_max, AXIS_PADDING_RATIO);
    let (db_lo, db_hi) = calculate_range(db_min, db_max, AXIS_PADDING_RATIO);
    let (phase_lo, phase_hi) = calculate_range(phase_min, phase_max, AXIS_PADDING_RATIO);
    let db_span = db_hi - db_lo;
    let phase_span = phase_hi - phase_lo;

    let root =
        BitMapBackend::new(output_file, (BODE_PLOT_WIDTH, BODE_PLOT_HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .right_y_label_area_size(70)
        .build_cartesian_2d((f_lo..f_hi).log_scale(), db_lo..db_hi)?
        .set_secondary_coord((f_lo..f_hi).log_scale(), phase_lo..phase_hi);

    chart
        .configure_mesh()
        .x_desc(X_AXIS_DESC)
        .y_desc(RATIO_AXIS_DESC)
        .x_label_formatter(&|f| format_frequency_label(*f))
        .y_label_formatter(&|db| format_tick_label(*db, db_span))
        .bold_line_style(COLOR_GRID.mix(0.8))
        .light_line_style(COLOR_GRID.mix(0.4))
        .x_label_style(FONT_TUPLE_TICK_LABEL.into_font())
        .y_label_style(FONT_TUPLE_TICK_LABEL.into_font().color(&COLOR_BODE_RATIO))
        .axis_desc_style(FONT_TUPLE_AXIS_LABEL.into_font())
        .draw()?;

    chart
        .configure_secondary_axes()
        .y_desc(PHASE_AXIS_DESC)
        .y_label_formatter(&|p| format_tick_label(*p, phase_span))
        .label_style(FONT_TUPLE_TICK_LABEL.into_font().color(&COLOR_BODE_PHASE))
        .axis_desc_style(FONT_TUPLE_AXIS_LABEL.into_font())
        .draw()?;

    chart.draw_series(LineSeries::new(
        gain_points,
        COLOR_BODE_RATIO.stroke_width(LINE_WIDTH_PLOT),
    ))?;

    // Reference lines: cutoff frequency (vertical) and -3 dB level (horizontal).
    chart.draw_series(DashedLineSeries::new(
        vec![(BODE_CUTOFF_HZ, db_lo), (BODE_CUTOFF_HZ, db_hi)],
        DASH_LENGTH_PX,
        DASH_GAP_PX,
        COLOR_REFERENCE_LINE.stroke_width(LINE_WIDTH_REFERENCE),
    ))?;
    chart.draw_series(DashedLineSeries::new(
        vec![(f_lo, BODE_CUTOFF_DB), (f_hi, BODE_CUTOFF_DB)],
        DASH_LENGTH_PX,
        DASH_GAP_PX,
        COLOR_REFERENCE_LINE.stroke_width(LINE_WIDTH_REFERENCE),
    ))?;

    chart.draw_secondary_series(DashedLineSeries::new(
        phase_points,
        DASH_LENGTH_PX,
        DASH_GAP_PX,
        COLOR_BODE_PHASE.stroke_width(LINE_WIDTH_PLOT),
    ))?;

    // Label positions are computed from the current axis limits in data units, so the
    // "-3 dB" label sits 5 % of the linear frequency span right of the left edge.
    let cutoff_label_y = db_lo + (db_hi - db_lo) * BODE_CUTOFF_LABEL_Y_FRACTION;
    let db_label_x = f_lo + (f_hi - f_lo) * BODE_DB_LABEL_X_FRACTION;

    let cutoff_anchor = chart.backend_coord(&(BODE_CUTOFF_HZ, cutoff_label_y));
    draw_boxed_label(
        &root,
        cutoff_anchor,
        &format!("{BODE_CUTOFF_HZ} Hz"),
        LabelAlign::BottomCenter,
        true,
    )?;
    let db_anchor = chart.backend_coord(&(db_label_x, BODE_CUTOFF_DB));
    draw_boxed_label(
        &root,
        db_anchor,
        &format!("{BODE_CUTOFF_DB} dB"),
        LabelAlign::CenterLeft,
        false,
    )?;

    root.present()?;
    Ok(())
}
