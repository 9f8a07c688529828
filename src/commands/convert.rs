//! # convert 子命令实现
//!
//! 读取图谱，按需截取与扣背景，导出为 CSV 或 XY。
//!
//! ## 依赖关系
//! - 使用 `cli/convert.rs` 定义的 ConvertArgs
//! - 使用 `xrd/export.rs` 写出文件

use crate::cli::convert::{ConvertArgs, ExportFormat};
use crate::commands::common;
use crate::error::{Result, XrdError};
use crate::utils::output;
use crate::xrd::export::{self, XyMetadata};
use crate::xrd::RangeMode;

/// 执行 convert 命令
pub fn execute(args: ConvertArgs) -> Result<()> {
    if args.output.exists() && !args.overwrite {
        output::print_existing_output(&args.output);
        return Ok(());
    }

    let format = match args.format {
        Some(format) => format,
        None => detect_format(&args.output)?,
    };

    let mut pattern = common::load_pattern(&args.input, &args.source)?;
    common::apply_range(&mut pattern, &args.range)?;

    if args.subtract_background && !args.range.fit_background {
        output::print_warning("--subtract-background without --fit-background subtracts a zero background");
    }

    let table = pattern.active_slice(args.subtract_background);
    if pattern.mode() == RangeMode::Trimmed {
        output::print_active_range(pattern.range(), pattern.len());
    }

    match format {
        ExportFormat::Csv => export::to_csv(&table, &args.output)?,
        ExportFormat::Xy => {
            if !pattern.has_axis(args.x_axis) {
                return Err(XrdError::InvalidArgument(format!(
                    "cannot write {} axis without a wavelength (use --wavelength)",
                    args.x_axis
                )));
            }
            let label = common::display_name(&pattern, &args.input);
            let meta = XyMetadata {
                label: &label,
                wavelength: pattern.wavelength(),
                calibration: &pattern.calibration,
            };
            export::to_xy(&table, args.x_axis, meta, &args.output)?;
        }
    }

    output::print_export(&args.input, &args.output);
    Ok(())
}

fn detect_format(path: &std::path::Path) -> Result<ExportFormat> {
    match common::extension(path).as_deref() {
        Some("csv") => Ok(ExportFormat::Csv),
        Some("xy") | Some("dat") => Ok(ExportFormat::Xy),
        _ => Err(XrdError::InvalidArgument(format!(
            "cannot infer export format from '{}' (use --format csv|xy)",
            path.display()
        ))),
    }
}
