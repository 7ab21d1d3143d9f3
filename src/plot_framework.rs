// src/plot_framework.rs

use plotters::backend::BitMapBackend;
use plotters::chart::{ChartBuilder, SeriesLabelPosition};
use plotters::drawing::{DrawingArea, IntoDrawingArea};
use plotters::element::PathElement;
use plotters::element::Text;
use plotters::series::LineSeries;
use plotters::style::colors::{BLACK, RED, WHITE};
use plotters::style::{Color, IntoFont, RGBColor};

use std::ops::Range;
use std::path::Path;

use crate::constants::{
    COLOR_ZERO_LINE, FONT_SIZE_AXIS_LABEL, FONT_SIZE_CHART_TITLE, FONT_SIZE_LEGEND,
    FONT_SIZE_MESSAGE, LINE_WIDTH_LEGEND, LINE_WIDTH_ZERO_LINE, PLOT_HEIGHT, PLOT_WIDTH,
};
use crate::types::PlotResult;

/// Calculate plot range with padding.
/// Adds 15% padding, or a fixed padding for very small ranges.
pub fn calculate_range(min_val: f64, max_val: f64) -> (f64, f64) {
    let (min, max) = if min_val <= max_val {
        (min_val, max_val)
    } else {
        (max_val, min_val)
    };
    let range = (max - min).abs();
    let padding = if range < 1e-6 { 0.5 } else { range * 0.15 };
    (min - padding, max + padding)
}

/// Draw a "Data Unavailable" message on a plot area.
pub fn draw_unavailable_message(
    area: &DrawingArea<BitMapBackend, plotters::coord::Shift>,
    plot_type: &str,
    reason: &str,
) -> PlotResult {
    const CHAR_WIDTH_RATIO: f32 = 0.6; // Approximate character width relative to font size
    const LINE_HEIGHT_SPACING: i32 = 4;

    let (x_range, y_range) = area.get_pixel_range();
    let (width, height) = (
        (x_range.end - x_range.start) as u32,
        (y_range.end - y_range.start) as u32,
    );
    let message = format!("{plot_type} Data Unavailable:\n{reason}");

    let estimated_char_width = (FONT_SIZE_MESSAGE as f32 * CHAR_WIDTH_RATIO) as i32;
    let estimated_line_height = FONT_SIZE_MESSAGE + LINE_HEIGHT_SPACING;

    let lines: Vec<&str> = message.split('\n').collect();
    let max_line_length = lines.iter().map(|line| line.len()).max().unwrap_or(0);
    let estimated_text_width = max_line_length.saturating_mul(estimated_char_width as usize) as i32;
    let estimated_text_height = lines.len().saturating_mul(estimated_line_height as usize) as i32;

    let center_x = width as i32 / 2 - estimated_text_width / 2;
    let center_y = height as i32 / 2 - estimated_text_height / 2;

    let text_style = ("sans-serif", FONT_SIZE_MESSAGE).into_font().color(&RED);
    area.draw(&Text::new(message, (center_x, center_y), text_style))?;
    Ok(())
}

#[derive(Clone)]
pub struct PlotSeries {
    pub data: Vec<(f64, f64)>,
    pub label: String,
    pub color: RGBColor,
    pub stroke_width: u32,
}

#[derive(Clone)]
pub struct PlotConfig {
    pub title: String,
    pub x_range: Range<f64>,
    pub y_range: Range<f64>,
    pub series: Vec<PlotSeries>,
    pub x_label: String,
    pub y_label: String,
}

/// Min and max of a slice of values, None when empty or without finite values.
pub fn value_bounds(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    let (min, max) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if min <= max {
        Some((min, max))
    } else {
        None
    }
}

fn draw_single_chart(
    area: &DrawingArea<BitMapBackend, plotters::coord::Shift>,
    plot_config: &PlotConfig,
) -> PlotResult {
    let mut chart = ChartBuilder::on(area)
        .caption(&plot_config.title, ("sans-serif", FONT_SIZE_CHART_TITLE))
        .margin(5)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(plot_config.x_range.clone(), plot_config.y_range.clone())?;

    chart
        .configure_mesh()
        .x_desc(&plot_config.x_label)
        .y_desc(&plot_config.y_label)
        .x_labels(20)
        .y_labels(10)
        .x_label_formatter(&|x| format!("{:.2}", x))
        .y_label_formatter(&|y| {
            if y.abs() < 10.0 && y.fract() != 0.0 {
                format!("{:.1}", y)
            } else {
                format!("{:.0}", y)
            }
        })
        .light_line_style(WHITE.mix(0.7))
        .label_style(("sans-serif", FONT_SIZE_AXIS_LABEL))
        .draw()?;

    // Zero reference line under the data.
    if plot_config.y_range.start < 0.0 && plot_config.y_range.end > 0.0 {
        chart.draw_series(LineSeries::new(
            vec![
                (plot_config.x_range.start, 0.0),
                (plot_config.x_range.end, 0.0),
            ],
            COLOR_ZERO_LINE.stroke_width(LINE_WIDTH_ZERO_LINE),
        ))?;
    }

    let mut legend_series_count = 0;
    for s in &plot_config.series {
        if s.data.is_empty() {
            continue;
        }
        let series = chart.draw_series(LineSeries::new(
            s.data.iter().cloned(),
            s.color.stroke_width(s.stroke_width),
        ))?;
        if !s.label.is_empty() {
            let legend_color = s.color;
            series.label(&s.label).legend(move |(x, y)| {
                PathElement::new(
                    vec![(x, y), (x + 20, y)],
                    legend_color.stroke_width(LINE_WIDTH_LEGEND),
                )
            });
            legend_series_count += 1;
        }
    }

    if legend_series_count > 0 {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font(("sans-serif", FONT_SIZE_LEGEND))
            .draw()?;
    }
    Ok(())
}

/// Renders one full-size chart to `output_path`.
///
/// `get_plot_data` supplies the chart; when it returns None, or the series are empty,
/// or the ranges are degenerate, the image carries a "Data Unavailable" message instead.
pub fn draw_trace_plot<F>(
    output_path: &Path,
    plot_type_name: &str,
    get_plot_data: F,
) -> PlotResult
where
    F: FnOnce() -> Option<PlotConfig>,
{
    let root_area = BitMapBackend::new(output_path, (PLOT_WIDTH, PLOT_HEIGHT)).into_drawing_area();
    root_area.fill(&WHITE)?;
    let margined_root_area = root_area.margin(10, 10, 10, 10);

    match get_plot_data() {
        Some(plot_config) => {
            let has_data = plot_config.series.iter().any(|s| !s.data.is_empty());
            let valid_ranges = plot_config.x_range.end > plot_config.x_range.start
                && plot_config.y_range.end > plot_config.y_range.start;
            if has_data && valid_ranges {
                draw_single_chart(&margined_root_area, &plot_config)?;
                root_area.present()?;
                println!("  Plot saved as '{}'.", output_path.display());
                return Ok(());
            }
            let reason = if !has_data {
                "No data points"
            } else {
                "Invalid ranges"
            };
            draw_unavailable_message(&margined_root_area, plot_type_name, reason)?;
        }
        None => {
            draw_unavailable_message(&margined_root_area, plot_type_name, "No samples above threshold")?;
        }
    }
    root_area.present()?;
    println!(
        "  '{}' saved with placeholder message only: no data available to plot.",
        output_path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_range_pads() {
        let (lo, hi) = calculate_range(-10.0, 10.0);
        assert!((lo + 13.0).abs() < 1e-12);
        assert!((hi - 13.0).abs() < 1e-12);
    }

    #[test]
    fn test_calculate_range_flat_and_swapped() {
        assert_eq!(calculate_range(2.0, 2.0), (1.5, 2.5));
        let (lo, hi) = calculate_range(5.0, -5.0);
        assert!(lo < -5.0 && hi > 5.0);
    }

    #[test]
    fn test_value_bounds() {
        assert_eq!(value_bounds(vec![3.0, -1.0, f64::NAN, 2.0]), Some((-1.0, 3.0)));
        assert_eq!(value_bounds(Vec::new()), None);
        assert_eq!(value_bounds(vec![f64::NAN]), None);
    }
}

// src/plot_framework.rs
