//! # info 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/info.rs`

use crate::cli::common::SourceArgs;

use clap::Args;
use std::path::PathBuf;

/// info 子命令参数
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Input pattern file (.xy, .dat, .txt, .chi, .csv)
    pub input: PathBuf,

    #[command(flatten)]
    pub source: SourceArgs,
}
