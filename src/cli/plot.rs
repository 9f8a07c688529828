//! # plot 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/plot.rs`

use crate::cli::common::{RangeArgs, SourceArgs};
use crate::models::XAxis;

use clap::{Args, ValueEnum};
use std::path::PathBuf;

/// 图像输出格式
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum ImageFormat {
    /// PNG image
    Png,
    /// SVG vector image
    Svg,
}

/// plot 子命令参数
#[derive(Args, Debug)]
pub struct PlotArgs {
    /// Input pattern file
    pub input: PathBuf,

    /// Output image (.png or .svg)
    #[arg(short, long, default_value = "xrd_pattern.png")]
    pub output: PathBuf,

    /// Output format (auto-detected from extension if not specified)
    #[arg(short, long, value_enum)]
    pub format: Option<ImageFormat>,

    /// Horizontal axis of the plot
    #[arg(long, value_enum, default_value = "q")]
    pub x_axis: XAxis,

    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub range: RangeArgs,

    /// Mark peaks found with the default local-maxima search
    #[arg(long, default_value_t = false)]
    pub show_peaks: bool,

    /// Relative threshold (0-1) applied to the marked peaks
    #[arg(short, long)]
    pub threshold: Option<f64>,

    /// Figure width in pixels (for PNG) or points (for SVG)
    #[arg(long, default_value_t = 1200)]
    pub width: u32,

    /// Figure height in pixels (for PNG) or points (for SVG)
    #[arg(long, default_value_t = 800)]
    pub height: u32,

    /// Title for the plot (default: pattern label)
    #[arg(long)]
    pub title: Option<String>,
}
