//! # XRD 图表生成
//!
//! 使用 `plotters` 库绘制一维衍射图谱。
//!
//! ## 功能
//! - 任选横轴 (q / 2θ / d)
//! - 可选背景曲线与峰位标记
//! - 支持 PNG 和 SVG 输出
//!
//! ## 依赖关系
//! - 被 `commands/plot.rs` 调用
//! - 使用 `xrd/pattern.rs` 的 PatternTable
//! - 使用 `plotters` 渲染图表

use crate::error::{Result, XrdError};
use crate::models::XAxis;
use crate::xrd::PatternTable;

use plotters::prelude::*;
use std::path::Path;

/// 图表配置
#[derive(Debug, Clone)]
pub struct PlotOptions<'a> {
    pub title: &'a str,
    pub x_axis: XAxis,
    pub wavelength: Option<f64>,
    pub width: u32,
    pub height: u32,
    pub show_background: bool,
    pub use_svg: bool,
}

/// 生成图谱图表
pub fn generate_pattern_plot(
    data: &PatternTable,
    peaks: Option<&PatternTable>,
    output_path: &Path,
    options: &PlotOptions<'_>,
) -> Result<()> {
    if options.use_svg {
        let root = SVGBackend::new(output_path, (options.width, options.height)).into_drawing_area();
        draw_pattern_chart(&root, data, peaks, options)?;
        root.present()
            .map_err(|e| XrdError::PlotError(e.to_string()))?;
    } else {
        let root =
            BitMapBackend::new(output_path, (options.width, options.height)).into_drawing_area();
        draw_pattern_chart(&root, data, peaks, options)?;
        root.present()
            .map_err(|e| XrdError::PlotError(e.to_string()))?;
    }
    Ok(())
}

/// 有限值的最小/最大
fn finite_bounds<'a>(values: impl Iterator<Item = &'a f64>) -> Option<(f64, f64)> {
    values
        .filter(|v| v.is_finite())
        .fold(None, |acc, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// 绘制图谱的核心逻辑
fn draw_pattern_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    data: &PatternTable,
    peaks: Option<&PatternTable>,
    options: &PlotOptions<'_>,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    let plot_err = |e: DrawingAreaErrorKind<DB::ErrorType>| XrdError::PlotError(format!("{:?}", e));

    root.fill(&WHITE).map_err(plot_err)?;

    let xs = data.axis(options.x_axis);
    let (x_min, x_max) = finite_bounds(xs.iter()).ok_or_else(|| {
        XrdError::PlotError(format!(
            "no finite {} values to plot (missing wavelength?)",
            options.x_axis
        ))
    })?;
    if x_min == x_max {
        return Err(XrdError::PlotError(format!(
            "{} axis is constant ({}), nothing to plot",
            options.x_axis, x_min
        )));
    }

    let y_values = data
        .intensity
        .iter()
        .chain(data.background.iter().filter(|_| options.show_background));
    let (y_lo, y_hi) = finite_bounds(y_values).unwrap_or((0.0, 1.0));
    let y_pad = ((y_hi - y_lo) * 0.08).max(1e-9);
    let (y_min, y_max) = (y_lo.min(0.0), y_hi + y_pad);

    let mut chart = ChartBuilder::on(root)
        .caption(options.title, ("sans-serif", 28).into_font())
        .margin(30)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .x_desc(options.x_axis.label())
        .y_desc("Intensity (counts)")
        .x_label_style(("sans-serif", 16))
        .y_label_style(("sans-serif", 16))
        .axis_desc_style(("sans-serif", 18))
        .draw()
        .map_err(plot_err)?;

    let finite_points = |ys: &[f64]| -> Vec<(f64, f64)> {
        xs.iter()
            .zip(ys)
            .filter(|(x, y)| x.is_finite() && y.is_finite())
            .map(|(x, y)| (*x, *y))
            .collect()
    };

    // 强度曲线
    let line_color = RGBColor(0, 102, 204);
    chart
        .draw_series(LineSeries::new(
            finite_points(&data.intensity),
            line_color.stroke_width(2),
        ))
        .map_err(plot_err)?
        .label("data")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_color));

    // 背景曲线
    if options.show_background && data.background.iter().any(|b| *b != 0.0) {
        let bg_color = RGBColor(204, 102, 0);
        chart
            .draw_series(LineSeries::new(
                finite_points(&data.background),
                bg_color.stroke_width(2),
            ))
            .map_err(plot_err)?
            .label("background")
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], bg_color));
    }

    // 峰位
    if let Some(peaks) = peaks.filter(|p| !p.is_empty()) {
        let peak_color = RGBColor(204, 0, 51);
        let markers: Vec<(f64, f64)> = peaks
            .axis(options.x_axis)
            .iter()
            .zip(&peaks.intensity)
            .filter(|(x, y)| x.is_finite() && y.is_finite())
            .map(|(x, y)| (*x, *y))
            .collect();

        chart
            .draw_series(
                markers
                    .iter()
                    .map(|&(x, y)| Circle::new((x, y), 5, peak_color.filled())),
            )
            .map_err(plot_err)?
            .label(format!("peaks ({})", markers.len()))
            .legend(move |(x, y)| Circle::new((x + 10, y), 5, peak_color.filled()));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .position(SeriesLabelPosition::UpperRight)
        .draw()
        .map_err(plot_err)?;

    // 添加波长信息
    if let Some(wavelength) = options.wavelength {
        let wavelength_text = format!("λ = {:.4} Å", wavelength);
        chart
            .draw_series(std::iter::once(Text::new(
                wavelength_text,
                (x_min + 0.02 * (x_max - x_min), y_max - y_pad * 0.5),
                ("sans-serif", 14).into_font().color(&BLACK),
            )))
            .map_err(plot_err)?;
    }

    Ok(())
}
