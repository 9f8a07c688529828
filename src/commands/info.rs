//! # info 子命令实现
//!
//! 打印图谱元数据（波长、能量、标定参数）与三种横轴的取值范围。
//!
//! ## 依赖关系
//! - 使用 `cli/info.rs` 定义的 InfoArgs
//! - 使用 `commands/common.rs` 读取图谱

use crate::cli::info::InfoArgs;
use crate::commands::common;
use crate::error::Result;
use crate::models::XAxis;
use crate::utils::output;
use crate::xrd::Pattern1D;

use tabled::{Table, Tabled};

#[derive(Tabled)]
struct AxisRow {
    #[tabled(rename = "Axis")]
    axis: String,
    #[tabled(rename = "Min")]
    min: String,
    #[tabled(rename = "Max")]
    max: String,
    #[tabled(rename = "Mean step")]
    step: String,
}

/// 执行 info 命令
pub fn execute(args: InfoArgs) -> Result<()> {
    let pattern = common::load_pattern(&args.input, &args.source)?;
    let name = common::display_name(&pattern, &args.input);

    output::print_header(&format!("Pattern: {}", name));
    output::print_info(&format!("Source: {}", args.input.display()));
    output::print_info(&format!("Samples: {}", pattern.len()));
    output::print_info(&format!("Native axis: {}", pattern.native_axis().label()));

    output::print_wavelength(pattern.wavelength(), pattern.energy());

    print_calibration(&pattern);

    let rows: Vec<AxisRow> = XAxis::ALL.iter().map(|&axis| axis_row(&pattern, axis)).collect();
    println!("\n{}", Table::new(&rows));

    Ok(())
}

fn print_calibration(pattern: &Pattern1D) {
    let cal = &pattern.calibration;
    if cal.is_empty() {
        return;
    }

    if let Some(distance) = cal.distance {
        output::print_info(&format!("Sample-detector distance: {} m", distance));
    }
    if let Some([p1, p2]) = cal.poni {
        output::print_info(&format!("PONI: {:.4e}, {:.4e} m", p1, p2));
    }
    if let Some([r1, r2, r3]) = cal.rotation {
        output::print_info(&format!("Rotations: {:.6} {:.6} {:.6} rad", r1, r2, r3));
    }
    if let Some([a, b]) = cal.pixel_size {
        output::print_info(&format!("Pixel size: {:.3e}, {:.3e} m", a, b));
    }
    if let Some(ref spline) = cal.spline_file {
        output::print_info(&format!("Spline file: {}", spline));
    }
    if let Some(p) = cal.polarization {
        output::print_info(&format!("Polarization factor: {}", p));
    }
    if let Some(n) = cal.normalization {
        output::print_info(&format!("Normalization factor: {}", n));
    }
}

fn axis_row(pattern: &Pattern1D, axis: XAxis) -> AxisRow {
    let values = pattern.axis(axis);
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();

    if !pattern.has_axis(axis) || finite.is_empty() {
        return AxisRow {
            axis: axis.label().to_string(),
            min: "-".to_string(),
            max: "-".to_string(),
            step: "-".to_string(),
        };
    }

    let min = finite.iter().copied().fold(f64::INFINITY, f64::min);
    let max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let step = if values.len() > 1 {
        (values[values.len() - 1] - values[0]) / (values.len() - 1) as f64
    } else {
        0.0
    };

    AxisRow {
        axis: axis.label().to_string(),
        min: format!("{:.5}", min),
        max: format!("{:.5}", max),
        step: if step.is_finite() {
            format!("{:.5}", step)
        } else {
            "-".to_string()
        },
    }
}
