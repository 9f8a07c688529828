//! # 探测器标定参数
//!
//! 存储 pyFAI 积分文件头部携带的实验几何信息。
//! 所有字段均为可选：数组构造的图谱没有这些信息。
//!
//! ## 依赖关系
//! - 被 `parsers/xy.rs` 填充
//! - 被 `xrd/pattern.rs`, `xrd/export.rs`, `commands/info.rs` 使用

/// 探测器标定参数（长度单位 m，角度单位 rad）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Calibration {
    /// 样品到探测器距离
    pub distance: Option<f64>,
    /// 法向入射点 (PONI)
    pub poni: Option<[f64; 2]>,
    /// 探测器旋转角
    pub rotation: Option<[f64; 3]>,
    /// 像素尺寸
    pub pixel_size: Option<[f64; 2]>,
    /// 畸变校正文件
    pub spline_file: Option<String>,
    /// 偏振因子
    pub polarization: Option<f64>,
    /// 归一化因子
    pub normalization: Option<f64>,
}

impl Calibration {
    /// 是否没有任何标定信息
    pub fn is_empty(&self) -> bool {
        *self == Calibration::default()
    }
}
