//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `parsers/`, `xrd/`, `utils/`
//! - 子模块: common, info, convert, peaks, plot

pub mod common;
pub mod convert;
pub mod info;
pub mod peaks;
pub mod plot;

use crate::cli::Commands;
use crate::error::Result;

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Info(args) => info::execute(args),
        Commands::Convert(args) => convert::execute(args),
        Commands::Peaks(args) => peaks::execute(args),
        Commands::Plot(args) => plot::execute(args),
    }
}
