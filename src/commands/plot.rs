//! # plot 子命令实现
//!
//! 绘制活动区间内的图谱，可叠加背景与峰位。
//!
//! ## 依赖关系
//! - 使用 `cli/plot.rs` 定义的 PlotArgs
//! - 使用 `xrd/plot.rs` 渲染 PNG/SVG

use crate::cli::plot::{ImageFormat, PlotArgs};
use crate::commands::common;
use crate::error::{Result, XrdError};
use crate::utils::output;
use crate::xrd::plot::{self, PlotOptions};
use crate::xrd::{LocalMaxima, RangeMode, RelativeThreshold};

use std::path::Path;

/// 执行 plot 命令
pub fn execute(args: PlotArgs) -> Result<()> {
    let format = match args.format {
        Some(format) => format,
        None => detect_format(&args.output)?,
    };

    let mut pattern = common::load_pattern(&args.input, &args.source)?;
    common::apply_range(&mut pattern, &args.range)?;

    if !pattern.has_axis(args.x_axis) {
        return Err(XrdError::InvalidArgument(format!(
            "cannot plot against {} without a wavelength (use --wavelength)",
            args.x_axis
        )));
    }

    if pattern.mode() == RangeMode::Trimmed {
        output::print_active_range(pattern.range(), pattern.len());
    }
    let data = pattern.active_slice(false);
    let peaks = if args.show_peaks {
        let peaks = pattern.find_peaks(
            false,
            args.threshold,
            &LocalMaxima::default(),
            &RelativeThreshold,
        )?;
        output::print_info(&format!("Marking {} peaks", peaks.len()));
        Some(peaks)
    } else {
        None
    };

    let title = args
        .title
        .clone()
        .unwrap_or_else(|| common::display_name(&pattern, &args.input));

    let options = PlotOptions {
        title: &title,
        x_axis: args.x_axis,
        wavelength: pattern.wavelength(),
        width: args.width,
        height: args.height,
        show_background: args.range.fit_background,
        use_svg: format == ImageFormat::Svg,
    };

    plot::generate_pattern_plot(&data, peaks.as_ref(), &args.output, &options)?;
    output::print_export(&args.input, &args.output);

    Ok(())
}

fn detect_format(path: &Path) -> Result<ImageFormat> {
    match common::extension(path).as_deref() {
        Some("png") => Ok(ImageFormat::Png),
        Some("svg") => Ok(ImageFormat::Svg),
        _ => Err(XrdError::InvalidArgument(format!(
            "cannot infer image format from '{}' (use --format png|svg)",
            path.display()
        ))),
    }
}
