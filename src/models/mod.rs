//! # 数据模型模块
//!
//! 定义横轴类型与探测器标定等基础数据模型。
//!
//! ## 依赖关系
//! - 被 `xrd/`, `parsers/` 和 `commands/` 使用
//! - 子模块: axis, calibration

pub mod axis;
pub mod calibration;

pub use axis::XAxis;
pub use calibration::Calibration;
