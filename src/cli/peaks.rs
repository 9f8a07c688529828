//! # peaks 子命令 CLI 定义
//!
//! 单文件寻峰或目录批量寻峰
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/peaks.rs`

use crate::cli::common::{RangeArgs, SourceArgs};

use clap::Args;
use std::path::PathBuf;

/// peaks 子命令参数
#[derive(Args, Debug)]
pub struct PeaksArgs {
    /// Input: pattern file or directory containing pattern files
    pub input: PathBuf,

    /// Output: CSV peak table (single mode) or directory (batch mode)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub range: RangeArgs,

    /// Search peaks on background-subtracted intensity
    #[arg(long, default_value_t = false)]
    pub subtract_background: bool,

    /// Keep peaks whose height above the window minimum is at least this fraction of the span (0-1)
    #[arg(short, long)]
    pub threshold: Option<f64>,

    /// Minimum absolute peak intensity
    #[arg(long)]
    pub min_height: Option<f64>,

    /// Minimum peak prominence
    #[arg(long)]
    pub min_prominence: Option<f64>,

    /// Minimum distance between peaks in samples
    #[arg(long)]
    pub min_distance: Option<usize>,

    /// Number of peaks to print in the summary table
    #[arg(long, default_value_t = 20)]
    pub top_n: usize,

    // ─────────────────────────────────────────────────────────────
    // 批量处理参数
    // ─────────────────────────────────────────────────────────────
    /// Glob pattern for input files (batch mode, e.g., "*.xy,*.dat")
    #[arg(long, default_value = "*.xy,*.dat,*.chi")]
    pub pattern: String,

    /// Number of parallel jobs (0 = auto, batch mode only)
    #[arg(short, long, default_value_t = 0)]
    pub jobs: usize,

    /// Recurse into subdirectories (batch mode)
    #[arg(long, default_value_t = false)]
    pub recursive: bool,

    /// Overwrite existing output files
    #[arg(long, default_value_t = false)]
    pub overwrite: bool,
}
