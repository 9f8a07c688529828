//! # 终端输出
//!
//! 统一的彩色状态行（`[OK]` / `[*]` / `[WARN]` / `[ERR]` / `[SKIP]`），
//! 以及图谱处理中反复出现的消息：导出、活动区间、寻峰数量、波长与批量汇总。
//!
//! ## 依赖关系
//! - 被 `main.rs` 与所有 `commands/` 模块使用
//! - 使用 `batch/runner.rs` 的 BatchResult
//! - 使用 `colored` crate

use crate::batch::BatchResult;

use colored::{ColoredString, Colorize};
use std::path::Path;

/// 批量汇总中最多列出的条目数
const SUMMARY_LIMIT: usize = 10;

fn tagged(tag: ColoredString, msg: &str) {
    println!("{} {}", tag, msg);
}

pub fn print_success(msg: &str) {
    tagged("[OK]".green().bold(), msg);
}

/// 错误写到 stderr
pub fn print_error(msg: &str) {
    eprintln!("{} {}", "[ERR]".red().bold(), msg);
}

pub fn print_warning(msg: &str) {
    tagged("[WARN]".yellow().bold(), msg);
}

pub fn print_info(msg: &str) {
    tagged("[*]".blue().bold(), msg);
}

pub fn print_skip(msg: &str) {
    tagged("[SKIP]".dimmed(), msg);
}

// ─────────────────────────────────────────────────────────────
// 图谱相关消息
// ─────────────────────────────────────────────────────────────

/// 输入图谱 -> 输出文件
pub fn print_export(input: &Path, output: &Path) {
    println!(
        "{} {} {} {}",
        "[OK]".green().bold(),
        input.display().to_string().dimmed(),
        "->".cyan(),
        output.display()
    );
}

/// 输出已存在且未指定 --overwrite
pub fn print_existing_output(output: &Path) {
    print_skip(&format!(
        "Output exists, use --overwrite to replace: {}",
        output.display()
    ));
}

/// 活动区间 `[start, end)` 与总样本数
pub fn print_active_range(range: (usize, usize), total: usize) {
    let (start, end) = range;
    print_info(&format!(
        "Active range: samples {}..{} of {} ({} kept)",
        start,
        end,
        total,
        end - start
    ));
}

/// 寻峰结果数量
pub fn print_peak_count(count: usize, range: (usize, usize), total: usize) {
    let (start, end) = range;
    let noun = if count == 1 { "peak" } else { "peaks" };
    print_success(&format!(
        "Found {} {} in samples {}..{} of {}",
        count, noun, start, end, total
    ));
}

/// 波长与能量；缺失时提示派生横轴为零
pub fn print_wavelength(wavelength: Option<f64>, energy: Option<f64>) {
    match (wavelength, energy) {
        (Some(wl), Some(e)) => print_info(&format!("Wavelength: {:.6} Å ({:.3} keV)", wl, e)),
        _ => print_warning("No wavelength: 2θ-dependent axes are zero-filled"),
    }
}

/// 批量处理汇总：计数、跳过原因与失败列表
pub fn print_batch_summary(result: &BatchResult) {
    print_separator();
    print_success(&format!(
        "Batch complete ({} files): {} success, {} skipped, {} failed",
        result.total(),
        result.success,
        result.skipped,
        result.failed
    ));

    for msg in result.skips.iter().take(SUMMARY_LIMIT) {
        print_skip(msg);
    }

    if !result.failures.is_empty() {
        print_warning("Failed files:");
        for (path, err) in result.failures.iter().take(SUMMARY_LIMIT) {
            print_error(&format!("  {}: {}", path, err));
        }
        if result.failures.len() > SUMMARY_LIMIT {
            print_warning(&format!(
                "  ... and {} more",
                result.failures.len() - SUMMARY_LIMIT
            ));
        }
    }
}

// ─────────────────────────────────────────────────────────────
// 版式
// ─────────────────────────────────────────────────────────────

pub fn print_header(title: &str) {
    let line = "─".repeat(60);
    println!("\n{}", line.dimmed());
    println!("  {}", title.bold());
    println!("{}\n", line.dimmed());
}

pub fn print_separator() {
    println!("{}", "─".repeat(60).dimmed());
}
