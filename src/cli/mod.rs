//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `info`: 图谱元数据与横轴范围
//! - `convert`: 截取 / 扣背景后导出 CSV 或 XY
//! - `peaks`: 寻峰（单文件或目录批量）
//! - `plot`: 绘制图谱
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: common, info, convert, peaks, plot

pub mod common;
pub mod convert;
pub mod info;
pub mod peaks;
pub mod plot;

use clap::{Parser, Subcommand};

/// xrd1d - 一维 X 射线衍射图谱工具
#[derive(Parser)]
#[command(name = "xrd1d")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "Inspect, trim, background-subtract and peak-search 1D XRD patterns", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Show pattern metadata and the range of every axis
    Info(info::InfoArgs),

    /// Export a (trimmed, background-subtracted) pattern to CSV or XY
    Convert(convert::ConvertArgs),

    /// Find peaks in a pattern file or a directory of pattern files
    Peaks(peaks::PeaksArgs),

    /// Plot a pattern against q, 2θ or d (PNG/SVG)
    Plot(plot::PlotArgs),
}
