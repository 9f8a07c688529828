//! # 解析器模块
//!
//! 提供一维衍射数据文件的解析器。
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 构造 `xrd/pattern.rs` 的 Pattern1D
//! - 子模块: xy

pub mod xy;

use crate::error::{Result, XrdError};
use crate::models::XAxis;
use crate::xrd::Pattern1D;
use std::path::Path;

/// 从文件路径推断格式并解析
///
/// `fallback_axis` 用于没有横轴标记的纯两列文件。
pub fn parse_pattern_file(path: &Path, fallback_axis: Option<XAxis>) -> Result<Pattern1D> {
    if !path.is_file() {
        return Err(XrdError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "xy" | "dat" | "txt" | "chi" | "csv" => xy::parse_xy_file(path, fallback_axis),
        _ => Err(XrdError::ParseError {
            format: "pattern".to_string(),
            path: path.display().to_string(),
            reason: format!("unsupported extension '.{}' (expected .xy, .dat, .txt, .chi, .csv)", ext),
        }),
    }
}
