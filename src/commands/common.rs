//! # 命令公共步骤
//!
//! 读取图谱、覆盖波长、截取区间与拟合背景。
//!
//! ## 依赖关系
//! - 被 `commands/` 下各子命令使用
//! - 使用 `parsers/` 读取文件，`xrd/` 处理图谱

use crate::cli::common::{RangeArgs, SourceArgs};
use crate::error::{Result, XrdError};
use crate::parsers;
use crate::xrd::{Pattern1D, SonneveldVisser};

use log::debug;
use std::path::Path;

/// 解析 "LOW-HIGH" 形式的区间（允许负数与科学计数法）
pub fn parse_range(range: &str) -> Result<(f64, f64)> {
    let range = range.trim();
    let split = range.char_indices().skip(1).find(|&(i, c)| {
        c == '-' && !matches!(range[..i].chars().last(), Some('e' | 'E' | '-'))
    });

    let (low, high) = match split {
        Some((i, _)) => (&range[..i], &range[i + 1..]),
        None => return Err(XrdError::InvalidRange(format!("{} (expected LOW-HIGH)", range))),
    };

    let parse = |s: &str| {
        s.trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| XrdError::InvalidRange(range.to_string()))
    };

    Ok((parse(low)?, parse(high)?))
}

/// 读取图谱文件，必要时以命令行波长覆盖文件头
pub fn load_pattern(input: &Path, source: &SourceArgs) -> Result<Pattern1D> {
    let pattern = parsers::parse_pattern_file(input, source.axis)?;

    match source.wavelength {
        Some(wl) => {
            debug!(
                "overriding wavelength {:?} with {} Å for {}",
                pattern.wavelength(),
                wl,
                input.display()
            );
            pattern.with_wavelength(wl)
        }
        None => Ok(pattern),
    }
}

/// 应用截取区间，并按需拟合背景
pub fn apply_range(pattern: &mut Pattern1D, range: &RangeArgs) -> Result<()> {
    if let Some(ref bounds) = range.range {
        let (low, high) = parse_range(bounds)?;
        pattern.set_trim(range.range_axis, low, high);
    }

    if range.fit_background {
        pattern.fit_background(&SonneveldVisser::default())?;
    }

    Ok(())
}

/// 图谱显示名称：标签或文件名
pub fn display_name(pattern: &Pattern1D, input: &Path) -> String {
    pattern.label.clone().unwrap_or_else(|| {
        input
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("pattern")
            .to_string()
    })
}

/// 小写扩展名
pub fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase())
}
