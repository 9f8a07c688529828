//! # 横轴类型
//!
//! 衍射图谱的三种等价横轴：动量转移 q、散射角 2θ、晶面间距 d。
//!
//! ## 依赖关系
//! - 被 `xrd/convert.rs`, `xrd/pattern.rs`, `parsers/xy.rs` 使用
//! - 被 `cli/` 作为命令行参数使用

use crate::error::XrdError;

use clap::ValueEnum;
use std::fmt;
use std::str::FromStr;

/// 横轴类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum XAxis {
    /// Momentum transfer q (1/Å)
    #[value(name = "q")]
    Q,
    /// Scattering angle 2θ (degrees)
    #[value(name = "2th", aliases = ["tth", "twotheta"])]
    TwoTheta,
    /// Lattice spacing d (Å)
    #[value(name = "d")]
    D,
}

impl XAxis {
    /// 全部横轴，按列顺序 (q, 2θ, d)
    pub const ALL: [XAxis; 3] = [XAxis::Q, XAxis::TwoTheta, XAxis::D];

    /// 由 `from` 换算到 `to` 是否需要波长
    ///
    /// 只有涉及 2θ 的换算需要波长；q ↔ d 恒可换算。
    pub fn needs_wavelength(from: XAxis, to: XAxis) -> bool {
        from != to && (from == XAxis::TwoTheta || to == XAxis::TwoTheta)
    }

    /// 列名（用于 CSV 表头）
    pub fn column_name(self) -> &'static str {
        match self {
            XAxis::Q => "q",
            XAxis::TwoTheta => "2theta",
            XAxis::D => "d",
        }
    }

    /// 坐标轴标签（用于图表）
    pub fn label(self) -> &'static str {
        match self {
            XAxis::Q => "q (1/Å)",
            XAxis::TwoTheta => "2θ (°)",
            XAxis::D => "d (Å)",
        }
    }

    /// pyFAI .xy 文件中的横轴标记
    pub fn xy_marker(self) -> &'static str {
        match self {
            XAxis::Q => "q_A^-1",
            XAxis::TwoTheta => "2th_deg",
            XAxis::D => "d_A",
        }
    }
}

impl fmt::Display for XAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            XAxis::Q => write!(f, "q"),
            XAxis::TwoTheta => write!(f, "2th"),
            XAxis::D => write!(f, "d"),
        }
    }
}

impl FromStr for XAxis {
    type Err = XrdError;

    /// 按前缀识别：`q...`, `2th...`/`tth...`/`twotheta...`, `d...`
    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        let lower = tag.trim().to_lowercase();
        if lower.starts_with('q') {
            Ok(XAxis::Q)
        } else if lower.starts_with("2th") || lower.starts_with("tth") || lower.starts_with("twotheta")
        {
            Ok(XAxis::TwoTheta)
        } else if lower.starts_with('d') {
            Ok(XAxis::D)
        } else {
            Err(XrdError::InvalidAxis(tag.to_string()))
        }
    }
}
