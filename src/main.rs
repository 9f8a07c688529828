//! # xrd1d - 一维 X 射线衍射图谱工具
//!
//! 读取积分后的一维衍射图谱（pyFAI .xy 等），在 q / 2θ / d 三种横轴间换算，
//! 截取区间、拟合扣除背景并寻峰。
//!
//! ## 子命令
//! - `info`    - 图谱元数据与横轴范围
//! - `convert` - 导出 CSV / XY
//! - `peaks`   - 寻峰（单文件或批量）
//! - `plot`    - 绘制图谱 (PNG/SVG)
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── parsers/   (文件解析器)
//!   │     ├── xrd/       (图谱、背景、寻峰、导出、绘图)
//!   │     ├── batch/     (批量并行处理)
//!   │     └── models/    (横轴与标定参数)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod cli;
mod commands;
mod error;
mod models;
mod parsers;
mod utils;
mod xrd;

use clap::Parser;
use cli::Cli;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
