//! # convert 子命令 CLI 定义
//!
//! 截取、扣背景后导出图谱 (CSV 五列 / pyFAI 风格 XY)
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/convert.rs`

use crate::cli::common::{RangeArgs, SourceArgs};
use crate::models::XAxis;

use clap::{Args, ValueEnum};
use std::path::PathBuf;

/// 导出格式
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum ExportFormat {
    /// CSV with q, 2theta, d, intensity, background columns
    Csv,
    /// Two-column XY file with a pyFAI-style header
    Xy,
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Csv => write!(f, "csv"),
            ExportFormat::Xy => write!(f, "xy"),
        }
    }
}

/// convert 子命令参数
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Input pattern file
    pub input: PathBuf,

    /// Output file (.csv or .xy)
    #[arg(short, long)]
    pub output: PathBuf,

    /// Output format (auto-detected from extension if not specified)
    #[arg(short, long, value_enum)]
    pub format: Option<ExportFormat>,

    /// X axis written to XY output
    #[arg(long, value_enum, default_value = "q")]
    pub x_axis: XAxis,

    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub range: RangeArgs,

    /// Subtract the fitted background from the exported intensity
    #[arg(long, default_value_t = false)]
    pub subtract_background: bool,

    /// Overwrite existing output file
    #[arg(long, default_value_t = false)]
    pub overwrite: bool,
}
