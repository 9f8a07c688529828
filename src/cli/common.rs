//! # 公共 CLI 参数
//!
//! 多个子命令共用的参数组与取值解析。
//!
//! ## 依赖关系
//! - 被 `cli/` 下各子命令参数使用
//! - 使用 `models/axis.rs` 的 XAxis

use crate::models::XAxis;
use crate::xrd::convert;

use clap::Args;

/// 预定义辐射源波长 (Å)
pub fn get_predefined_wavelength(name: &str) -> Option<f64> {
    match name.to_lowercase().as_str() {
        "cu-ka" | "cuka" => Some(1.5418),
        "cu-ka1" | "cuka1" => Some(1.5406),
        "cu-ka2" | "cuka2" => Some(1.5444),
        "cu-kb1" | "cukb1" => Some(1.3922),
        "mo-ka" | "moka" => Some(0.7107),
        "mo-ka1" | "moka1" => Some(0.7093),
        "co-ka" | "coka" => Some(1.7903),
        "fe-ka" | "feka" => Some(1.9373),
        "cr-ka" | "crka" => Some(2.2910),
        "ag-ka" | "agka" => Some(0.5609),
        _ => None,
    }
}

/// 解析波长输入（辐射源名称、以 Å 为单位的正数，或带 keV 后缀的能量）
pub fn parse_wavelength(input: &str) -> Result<f64, String> {
    if let Some(wl) = get_predefined_wavelength(input) {
        return Ok(wl);
    }
    let trimmed = input.trim();
    let lower = trimmed.to_lowercase();
    let parsed = match lower.strip_suffix("kev") {
        Some(energy) => energy
            .trim()
            .parse::<f64>()
            .map(convert::wavelength_from_energy),
        None => trimmed.parse::<f64>(),
    };
    match parsed {
        Ok(wl) if wl.is_finite() && wl > 0.0 => Ok(wl),
        _ => Err(format!(
            "Invalid wavelength '{}'. Use a positive number in Å (e.g., 0.424589), an energy (e.g., 29.2keV) or a name: cu-ka, mo-ka, co-ka, fe-ka, cr-ka, ag-ka",
            input
        )),
    }
}

/// 横轴与波长（读取图谱时使用）
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Axis of the first column when the file header carries no axis marker
    #[arg(long, value_enum)]
    pub axis: Option<XAxis>,

    /// X-ray wavelength overriding the file header: source name (cu-ka, mo-ka, ...), value in Å, or energy such as 29.2keV
    #[arg(short, long, value_parser = parse_wavelength)]
    pub wavelength: Option<f64>,
}

/// 截取区间与背景
#[derive(Args, Debug, Clone)]
pub struct RangeArgs {
    /// Active range as "LOW-HIGH" on the --range-axis (e.g., "1.5-4.2")
    #[arg(short, long)]
    pub range: Option<String>,

    /// Axis the --range bounds refer to
    #[arg(long, value_enum, default_value = "q")]
    pub range_axis: XAxis,

    /// Fit a Sonneveld-Visser background inside the active range
    #[arg(long, default_value_t = false)]
    pub fit_background: bool,
}
