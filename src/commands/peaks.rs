//! # peaks 子命令实现
//!
//! 在活动区间内寻峰，打印峰表并可导出 CSV。
//!
//! ## 功能
//! - 支持单文件和批量目录处理
//! - 并行处理（rayon），每个文件独立构造图谱
//! - 可选截取区间、背景拟合与扣除、相对阈值过滤
//!
//! ## 依赖关系
//! - 使用 `cli/peaks.rs` 定义的 PeaksArgs
//! - 使用 `batch/` 模块进行批量处理
//! - 使用 `xrd/` 模块寻峰与导出

use crate::batch::{BatchRunner, FileCollector, ProcessResult};
use crate::cli::common::{RangeArgs, SourceArgs};
use crate::cli::peaks::PeaksArgs;
use crate::commands::common;
use crate::error::{Result, XrdError};
use crate::utils::output;
use crate::xrd::{self, LocalMaxima, Pattern1D, PatternTable, PeakSearchOptions, RelativeThreshold};

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tabled::{Table, Tabled};

/// 寻峰任务配置（单文件与批量共用）
struct PeakJob {
    source: SourceArgs,
    range: RangeArgs,
    subtract_background: bool,
    threshold: Option<f64>,
    detector: LocalMaxima,
}

impl PeakJob {
    fn from_args(args: &PeaksArgs) -> Result<Self> {
        if let Some(t) = args.threshold {
            if !t.is_finite() || t < 0.0 {
                return Err(XrdError::InvalidArgument(format!(
                    "threshold must be a non-negative fraction, got {}",
                    t
                )));
            }
        }

        Ok(Self {
            source: args.source.clone(),
            range: args.range.clone(),
            subtract_background: args.subtract_background,
            threshold: args.threshold,
            detector: LocalMaxima::new(PeakSearchOptions {
                min_height: args.min_height,
                min_prominence: args.min_prominence,
                min_distance: args.min_distance,
            }),
        })
    }

    /// 读取、截取、拟合背景并寻峰
    fn run(&self, input: &Path) -> Result<(Pattern1D, PatternTable)> {
        let mut pattern = common::load_pattern(input, &self.source)?;
        common::apply_range(&mut pattern, &self.range)?;
        let peaks = pattern.find_peaks(
            self.subtract_background,
            self.threshold,
            &self.detector,
            &RelativeThreshold,
        )?;
        Ok((pattern, peaks))
    }
}

/// 执行寻峰
pub fn execute(args: PeaksArgs) -> Result<()> {
    output::print_header("Peak Search");

    if args.input.is_file() {
        execute_single_file(&args)
    } else if args.input.is_dir() {
        execute_batch(&args)
    } else {
        Err(XrdError::FileNotFound {
            path: args.input.display().to_string(),
        })
    }
}

/// 单文件模式
fn execute_single_file(args: &PeaksArgs) -> Result<()> {
    output::print_info(&format!("Single file mode: '{}'", args.input.display()));

    let job = PeakJob::from_args(args)?;
    let (pattern, peaks) = job.run(&args.input)?;

    output::print_peak_count(peaks.len(), pattern.range(), pattern.len());
    print_peak_table(&peaks, pattern.peaks(), args.top_n);

    if let Some(ref out) = args.output {
        if out.exists() && !args.overwrite {
            output::print_existing_output(out);
        } else {
            xrd::export::to_csv(&peaks, out)?;
            output::print_export(&args.input, out);
        }
    }

    Ok(())
}

/// 批量处理模式
fn execute_batch(args: &PeaksArgs) -> Result<()> {
    output::print_info(&format!("Batch mode: directory '{}'", args.input.display()));

    let files = FileCollector::new(args.input.clone())
        .with_pattern(&args.pattern)?
        .recursive(args.recursive)
        .collect();

    if files.is_empty() {
        return Err(XrdError::NoFilesFound {
            pattern: args.pattern.clone(),
        });
    }

    output::print_info(&format!("Found {} pattern files", files.len()));

    if let Some(ref dir) = args.output {
        fs::create_dir_all(dir).map_err(|e| XrdError::FileWriteError {
            path: dir.display().to_string(),
            source: e,
        })?;
    }

    let config = Arc::new(BatchPeakConfig {
        job: PeakJob::from_args(args)?,
        output_dir: args.output.clone(),
        overwrite: args.overwrite,
    });

    let runner = BatchRunner::new(args.jobs);
    let result = runner.run(files, |file| process_batch_file(file, &config));

    output::print_batch_summary(&result);

    Ok(())
}

/// 批量处理配置
struct BatchPeakConfig {
    job: PeakJob,
    /// 为空时写在输入文件旁
    output_dir: Option<PathBuf>,
    overwrite: bool,
}

/// 批量模式下的峰表路径：`<stem>_peaks.csv`
fn batch_output_path(input: &Path, output_dir: Option<&Path>) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("pattern");
    let dir = output_dir
        .or_else(|| input.parent())
        .unwrap_or_else(|| Path::new("."));
    dir.join(format!("{}_peaks.csv", stem))
}

/// 处理批量模式中的单个文件
fn process_batch_file(input: &PathBuf, config: &Arc<BatchPeakConfig>) -> ProcessResult {
    let output_file = batch_output_path(input, config.output_dir.as_deref());

    if output_file.exists() && !config.overwrite {
        return ProcessResult::Skipped(format!(
            "Output exists, skipping: {}",
            output_file.display()
        ));
    }

    let result = config
        .job
        .run(input)
        .and_then(|(_, peaks)| xrd::export::to_csv(&peaks, &output_file).map(|_| peaks.len()));

    match result {
        Ok(count) => ProcessResult::Success(format!(
            "{} -> {} ({} peaks)",
            input.display(),
            output_file.display(),
            count
        )),
        Err(e) => ProcessResult::Failed(input.display().to_string(), e.to_string()),
    }
}

/// 打印峰表（按强度降序取前 count 个）
///
/// `indices` 为各峰在完整图谱中的下标，与 `peaks` 逐行对应。
fn print_peak_table(peaks: &PatternTable, indices: &[usize], count: usize) {
    #[derive(Tabled)]
    struct PeakRow {
        #[tabled(rename = "Index")]
        index: usize,
        #[tabled(rename = "q (1/Å)")]
        q: String,
        #[tabled(rename = "2θ (°)")]
        two_theta: String,
        #[tabled(rename = "d (Å)")]
        d: String,
        #[tabled(rename = "Intensity")]
        intensity: String,
        #[tabled(rename = "Background")]
        background: String,
    }

    let mut rows: Vec<(usize, [f64; 5])> = indices.iter().copied().zip(peaks.rows()).collect();
    rows.sort_by(|a, b| b.1[3].total_cmp(&a.1[3]));

    let rows: Vec<PeakRow> = rows
        .into_iter()
        .take(count)
        .map(|(index, [q, two_theta, d, intensity, background])| PeakRow {
            index,
            q: format!("{:.4}", q),
            two_theta: format!("{:.3}", two_theta),
            d: format!("{:.4}", d),
            intensity: format!("{:.1}", intensity),
            background: format!("{:.1}", background),
        })
        .collect();

    if !rows.is_empty() {
        output::print_header(&format!("Top {} Peaks", rows.len()));
        let table = Table::new(&rows);
        println!("{}", table);
    }
}
