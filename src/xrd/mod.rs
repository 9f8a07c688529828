//! # XRD 图谱模块
//!
//! 一维 X 射线衍射图谱的核心数据结构与分析工具。
//!
//! ## 子模块
//! - `convert`: q / 2θ / d 横轴换算
//! - `pattern`: 一维图谱容器（截取区间、背景、峰位）
//! - `background`: 背景估计接口与默认实现
//! - `peaks`: 寻峰与峰过滤接口与默认实现
//! - `plot`: 图表生成
//! - `export`: 数据导出
//!
//! ## 依赖关系
//! - 被 `commands/` 与 `parsers/` 使用
//! - 使用 `models/` 的 XAxis, Calibration

pub mod background;
pub mod convert;
pub mod export;
pub mod pattern;
pub mod peaks;
pub mod plot;

pub use background::{BackgroundEstimator, SonneveldVisser};
pub use pattern::{Pattern1D, PatternTable, RangeMode};
pub use peaks::{LocalMaxima, PeakDetector, PeakFilter, PeakSearchOptions, RelativeThreshold};
