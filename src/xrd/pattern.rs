//! # 一维 XRD 图谱
//!
//! 保存强度与三种横轴 (q, 2θ, d)，并维护：
//! - 活动区间（截取窗口）`[range_start, range_end)`
//! - 与活动区间等长的背景曲线
//! - 寻峰得到的峰下标（相对完整数组）
//!
//! ## 状态
//! 只有两种模式：完整区间 (Full) 与截取区间 (Trimmed)，
//! 仅由 `set_trim` / `reset_range` 切换。
//!
//! ## 依赖关系
//! - 使用 `xrd/convert.rs` 生成横轴
//! - 使用 `xrd/background.rs`, `xrd/peaks.rs` 的接口
//! - 被 `parsers/xy.rs` 构造，被 `commands/` 使用

use crate::error::{Result, XrdError};
use crate::models::{Calibration, XAxis};
use crate::xrd::convert::{self, Axes};
use crate::xrd::{BackgroundEstimator, PeakDetector, PeakFilter};

use log::{debug, warn};
use std::path::PathBuf;

/// 区间模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeMode {
    /// 完整区间
    Full,
    /// 截取区间
    Trimmed,
}

/// 五列表格：q, 2θ, d, 强度, 背景
///
/// 既用于活动区间切片，也用于寻峰结果（每行一个峰）。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatternTable {
    pub q: Vec<f64>,
    pub two_theta: Vec<f64>,
    pub d: Vec<f64>,
    pub intensity: Vec<f64>,
    pub background: Vec<f64>,
}

impl PatternTable {
    /// 行数
    pub fn len(&self) -> usize {
        self.intensity.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intensity.is_empty()
    }

    /// 指定横轴的列
    pub fn axis(&self, axis: XAxis) -> &[f64] {
        match axis {
            XAxis::Q => &self.q,
            XAxis::TwoTheta => &self.two_theta,
            XAxis::D => &self.d,
        }
    }

    /// 取出第 i 行 (q, 2θ, d, I, bkgd)
    pub fn row(&self, i: usize) -> Option<[f64; 5]> {
        Some([
            *self.q.get(i)?,
            *self.two_theta.get(i)?,
            *self.d.get(i)?,
            *self.intensity.get(i)?,
            *self.background.get(i)?,
        ])
    }

    /// 按行遍历
    pub fn rows(&self) -> impl Iterator<Item = [f64; 5]> + '_ {
        (0..self.len()).filter_map(move |i| self.row(i))
    }

    /// 按下标抽取若干行
    fn select(&self, indices: &[usize]) -> PatternTable {
        let pick = |col: &[f64]| indices.iter().map(|&i| col[i]).collect::<Vec<f64>>();
        PatternTable {
            q: pick(&self.q),
            two_theta: pick(&self.two_theta),
            d: pick(&self.d),
            intensity: pick(&self.intensity),
            background: pick(&self.background),
        }
    }
}

/// 一维 XRD 图谱
#[derive(Debug, Clone)]
pub struct Pattern1D {
    /// 数据名称
    pub label: Option<String>,
    /// 来源文件
    pub source: Option<PathBuf>,
    /// 探测器标定参数
    pub calibration: Calibration,

    intensity: Vec<f64>,
    q: Vec<f64>,
    two_theta: Vec<f64>,
    d: Vec<f64>,
    native_axis: XAxis,
    wavelength: Option<f64>,

    range_start: usize,
    range_end: usize,
    background: Vec<f64>,
    peak_indices: Vec<usize>,
}

impl Pattern1D {
    /// 由原生横轴与强度数组构造
    ///
    /// 另外两种横轴立即换算得到；缺少波长时对应横轴为全零。
    pub fn from_axis(
        x: Vec<f64>,
        axis: XAxis,
        intensity: Vec<f64>,
        wavelength: Option<f64>,
    ) -> Result<Self> {
        if x.is_empty() {
            return Err(XrdError::ShapeMismatch {
                context: "pattern construction".to_string(),
                expected: 1,
                actual: 0,
            });
        }
        if x.len() != intensity.len() {
            return Err(XrdError::ShapeMismatch {
                context: format!("{} axis vs intensity", axis),
                expected: x.len(),
                actual: intensity.len(),
            });
        }
        if let Some(wl) = wavelength {
            if !wl.is_finite() || wl <= 0.0 {
                return Err(XrdError::InvalidArgument(format!(
                    "wavelength must be a positive number of Å, got {}",
                    wl
                )));
            }
        }

        let Axes { q, two_theta, d } = convert::convert(&x, axis, wavelength);
        let len = intensity.len();

        Ok(Self {
            label: None,
            source: None,
            calibration: Calibration::default(),
            intensity,
            q,
            two_theta,
            d,
            native_axis: axis,
            wavelength,
            range_start: 0,
            range_end: len,
            background: vec![0.0; len],
            peak_indices: Vec::new(),
        })
    }

    /// 设置数据名称
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// 替换波长并由原生横轴重新换算另外两种横轴
    pub fn with_wavelength(mut self, wavelength: f64) -> Result<Self> {
        if !wavelength.is_finite() || wavelength <= 0.0 {
            return Err(XrdError::InvalidArgument(format!(
                "wavelength must be a positive number of Å, got {}",
                wavelength
            )));
        }
        let x = self.axis(self.native_axis).to_vec();
        let Axes { q, two_theta, d } = convert::convert(&x, self.native_axis, Some(wavelength));
        self.q = q;
        self.two_theta = two_theta;
        self.d = d;
        self.wavelength = Some(wavelength);
        Ok(self)
    }

    // ─────────────────────────────────────────────────────────────
    // 访问器
    // ─────────────────────────────────────────────────────────────

    /// 样本数
    pub fn len(&self) -> usize {
        self.intensity.len()
    }

    pub fn intensity(&self) -> &[f64] {
        &self.intensity
    }

    pub fn q(&self) -> &[f64] {
        &self.q
    }

    pub fn two_theta(&self) -> &[f64] {
        &self.two_theta
    }

    pub fn d(&self) -> &[f64] {
        &self.d
    }

    /// 指定横轴的完整数组
    pub fn axis(&self, axis: XAxis) -> &[f64] {
        match axis {
            XAxis::Q => &self.q,
            XAxis::TwoTheta => &self.two_theta,
            XAxis::D => &self.d,
        }
    }

    pub fn native_axis(&self) -> XAxis {
        self.native_axis
    }

    /// 该横轴是否有真实数值（缺少波长时 2θ 相关横轴为全零）
    pub fn has_axis(&self, axis: XAxis) -> bool {
        self.wavelength.is_some() || !XAxis::needs_wavelength(self.native_axis, axis)
    }

    /// 入射波长（Å）
    pub fn wavelength(&self) -> Option<f64> {
        self.wavelength
    }

    /// 入射能量（keV）
    pub fn energy(&self) -> Option<f64> {
        self.wavelength.map(convert::energy_from_wavelength)
    }

    /// 当前活动区间 `[start, end)`
    pub fn range(&self) -> (usize, usize) {
        (self.range_start, self.range_end)
    }

    pub fn mode(&self) -> RangeMode {
        if self.range() == (0, self.len()) {
            RangeMode::Full
        } else {
            RangeMode::Trimmed
        }
    }

    /// 活动区间内的背景
    pub fn background(&self) -> &[f64] {
        &self.background
    }

    /// 最近一次寻峰得到的峰下标（相对完整数组）
    pub fn peaks(&self) -> &[usize] {
        &self.peak_indices
    }

    fn active_len(&self) -> usize {
        self.range_end - self.range_start
    }

    // ─────────────────────────────────────────────────────────────
    // 活动区间
    // ─────────────────────────────────────────────────────────────

    /// 按横轴数值截取活动区间
    ///
    /// 两端各自取最近的采样点（包含该点）；低于最小值取最小值所在点，
    /// 高于最大值取最大值所在点。少于两个点的窗口退回完整区间。
    pub fn set_trim(&mut self, axis: XAxis, low: f64, high: f64) {
        let x = self.axis(axis);
        let (lo, hi) = (low.min(high), low.max(high));

        let (start, end) = match (resolve_index(x, lo), resolve_index(x, hi)) {
            (Some(a), Some(b)) => (a.min(b), a.max(b) + 1),
            _ => (0, x.len()),
        };

        if end - start < 2 {
            debug!(
                "trim {}..{} on {} is degenerate, keeping full range",
                low, high, axis
            );
            self.range_start = 0;
            self.range_end = self.len();
        } else {
            self.range_start = start;
            self.range_end = end;
        }
        debug!("active range set to {:?}", self.range());
        self.sync_background();
    }

    /// 恢复完整区间
    pub fn reset_range(&mut self) {
        self.range_start = 0;
        self.range_end = self.len();
        self.sync_background();
    }

    /// 背景长度与活动区间不一致时重置为零
    fn sync_background(&mut self) {
        let len = self.active_len();
        if self.background.len() != len {
            debug!(
                "background length {} does not match active range {}, zero-filling",
                self.background.len(),
                len
            );
            self.background = vec![0.0; len];
        }
    }

    /// 活动区间切片
    ///
    /// `subtract_background` 为真时强度列减去背景。
    pub fn active_slice(&mut self, subtract_background: bool) -> PatternTable {
        self.sync_background();
        let (start, end) = self.range();

        let intensity = if subtract_background {
            self.intensity[start..end]
                .iter()
                .zip(&self.background)
                .map(|(i, b)| i - b)
                .collect()
        } else {
            self.intensity[start..end].to_vec()
        };

        PatternTable {
            q: self.q[start..end].to_vec(),
            two_theta: self.two_theta[start..end].to_vec(),
            d: self.d[start..end].to_vec(),
            intensity,
            background: self.background.clone(),
        }
    }

    // ─────────────────────────────────────────────────────────────
    // 背景与寻峰
    // ─────────────────────────────────────────────────────────────

    /// 在活动区间内拟合背景 (q, I)
    ///
    /// 估计结果恰好短一个点时重复最后一个值补齐，其余长度不符报错。
    pub fn fit_background<E>(&mut self, estimator: &E) -> Result<()>
    where
        E: BackgroundEstimator + ?Sized,
    {
        let (start, end) = self.range();
        let expected = end - start;
        let mut curve = estimator.estimate(&self.q[start..end], &self.intensity[start..end]);

        // TODO: drop once every estimator returns full-length curves
        if curve.len() + 1 == expected {
            if let Some(&last) = curve.last() {
                warn!("background estimate is one sample short, padding with last value");
                curve.push(last);
            }
        }

        if curve.len() != expected {
            return Err(XrdError::ShapeMismatch {
                context: "background estimate".to_string(),
                expected,
                actual: curve.len(),
            });
        }

        self.background = curve;
        Ok(())
    }

    /// 背景清零
    pub fn reset_background(&mut self) {
        self.background = vec![0.0; self.active_len()];
    }

    /// 在活动区间内寻峰
    ///
    /// 返回每个峰一行的五列表格；没有峰时返回空表。
    pub fn find_peaks<D, F>(
        &mut self,
        subtract_background: bool,
        threshold: Option<f64>,
        detector: &D,
        filter: &F,
    ) -> Result<PatternTable>
    where
        D: PeakDetector + ?Sized,
        F: PeakFilter + ?Sized,
    {
        let table = self.active_slice(subtract_background);

        let mut indices = detector.detect(&table.intensity);
        if let Some(threshold) = threshold {
            indices = filter.filter(threshold, &indices, &table.intensity);
        }

        if let Some(&bad) = indices.iter().find(|&&i| i >= table.len()) {
            return Err(XrdError::PeakIndexOutOfRange {
                index: bad,
                len: table.len(),
            });
        }

        let peaks = table.select(&indices);
        self.peak_indices = indices.iter().map(|i| i + self.range_start).collect();
        debug!("found {} peaks in range {:?}", peaks.len(), self.range());

        Ok(peaks)
    }
}

/// 将横轴数值解析为最近采样点下标（忽略 NaN）
fn resolve_index(x: &[f64], value: f64) -> Option<usize> {
    let finite = || x.iter().enumerate().filter(|(_, v)| !v.is_nan());

    let (imin, vmin) = finite().min_by(|a, b| a.1.total_cmp(b.1))?;
    let (imax, vmax) = finite().max_by(|a, b| a.1.total_cmp(b.1))?;

    if value <= *vmin {
        return Some(imin);
    }
    if value >= *vmax {
        return Some(imax);
    }

    finite()
        .min_by(|a, b| (a.1 - value).abs().total_cmp(&(b.1 - value).abs()))
        .map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xrd::background::SonneveldVisser;
    use crate::xrd::peaks::{LocalMaxima, PeakSearchOptions, RelativeThreshold};

    use std::f64::consts::PI;

    fn simple_pattern() -> Pattern1D {
        Pattern1D::from_axis(
            vec![1.0, 2.0, 3.0, 4.0, 5.0],
            XAxis::Q,
            vec![0.0, 5.0, 10.0, 5.0, 0.0],
            Some(1.0),
        )
        .unwrap()
    }

    fn two_peak_pattern() -> Pattern1D {
        let q: Vec<f64> = (0..400).map(|i| 1.0 + i as f64 * 0.01).collect();
        let intensity: Vec<f64> = q
            .iter()
            .map(|&x| {
                5.0 + 100.0 * (-(x - 2.0).powi(2) / 0.0008).exp()
                    + 40.0 * (-(x - 4.0).powi(2) / 0.0008).exp()
            })
            .collect();
        Pattern1D::from_axis(q, XAxis::Q, intensity, Some(0.7)).unwrap()
    }

    fn assert_lengths(p: &Pattern1D) {
        let n = p.len();
        assert_eq!(p.q().len(), n);
        assert_eq!(p.two_theta().len(), n);
        assert_eq!(p.d().len(), n);
        assert_eq!(p.intensity().len(), n);
        let (start, end) = p.range();
        assert!(start < end && end <= n);
        assert_eq!(p.background().len(), end - start);
    }

    /// 总是少返回一个点的估计器
    struct ShortBy(usize);

    impl BackgroundEstimator for ShortBy {
        fn estimate(&self, _x: &[f64], y: &[f64]) -> Vec<f64> {
            let n = y.len().saturating_sub(self.0);
            (0..n).map(|i| i as f64).collect()
        }
    }

    /// 返回越界下标的寻峰器
    struct OutOfRange;

    impl PeakDetector for OutOfRange {
        fn detect(&self, intensity: &[f64]) -> Vec<usize> {
            vec![intensity.len()]
        }
    }

    #[test]
    fn test_scenario_q_native() {
        let mut p = simple_pattern();
        for (q, d) in p.q().iter().zip(p.d()) {
            assert!((d - 2.0 * PI / q).abs() < 1e-12);
        }
        assert_eq!(p.native_axis(), XAxis::Q);
        assert_eq!(p.mode(), RangeMode::Full);

        p.set_trim(XAxis::Q, 2.0, 4.0);
        assert_eq!(p.range(), (1, 4));
        assert_eq!(p.mode(), RangeMode::Trimmed);

        let slice = p.active_slice(false);
        assert_eq!(slice.intensity, vec![5.0, 10.0, 5.0]);
        assert_eq!(slice.q, vec![2.0, 3.0, 4.0]);
        assert_eq!(slice.background, vec![0.0; 3]);
        assert_lengths(&p);
    }

    #[test]
    fn test_scenario_two_theta_without_wavelength() {
        let p = Pattern1D::from_axis(
            vec![10.0, 20.0, 30.0],
            XAxis::TwoTheta,
            vec![1.0, 2.0, 3.0],
            None,
        )
        .unwrap();
        assert_eq!(p.q(), &[0.0, 0.0, 0.0]);
        assert_eq!(p.d(), &[0.0, 0.0, 0.0]);
        assert_eq!(p.energy(), None);
        assert_lengths(&p);
    }

    #[test]
    fn test_scenario_flat_zero_background() {
        let q: Vec<f64> = (1..=30).map(|i| i as f64 * 0.1).collect();
        let mut p = Pattern1D::from_axis(q, XAxis::Q, vec![0.0; 30], Some(1.0)).unwrap();
        p.fit_background(&SonneveldVisser::default()).unwrap();
        assert!(p.background().iter().all(|b| b.abs() < 1e-12));
        let slice = p.active_slice(true);
        assert!(slice.intensity.iter().all(|i| i.abs() < 1e-12));
    }

    #[test]
    fn test_construction_errors() {
        assert!(matches!(
            Pattern1D::from_axis(vec![], XAxis::Q, vec![], None),
            Err(XrdError::ShapeMismatch { .. })
        ));
        assert!(matches!(
            Pattern1D::from_axis(vec![1.0, 2.0], XAxis::Q, vec![1.0], None),
            Err(XrdError::ShapeMismatch { expected: 2, actual: 1, .. })
        ));
        assert!(matches!(
            Pattern1D::from_axis(vec![1.0], XAxis::Q, vec![1.0], Some(0.0)),
            Err(XrdError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_trim_then_reset_restores_full_range() {
        let mut p = two_peak_pattern();
        p.set_trim(XAxis::Q, 1.5, 2.5);
        assert_ne!(p.range(), (0, p.len()));
        p.reset_range();
        assert_eq!(p.range(), (0, p.len()));
        assert_eq!(p.mode(), RangeMode::Full);
        assert_lengths(&p);
    }

    #[test]
    fn test_trim_beyond_data_clamps_to_ends() {
        let mut p = simple_pattern();
        p.set_trim(XAxis::Q, -10.0, 3.2);
        assert_eq!(p.range(), (0, 3));
        p.set_trim(XAxis::Q, 2.6, 100.0);
        assert_eq!(p.range(), (2, 5));
    }

    #[test]
    fn test_trim_bounds_in_any_order() {
        let mut p = simple_pattern();
        p.set_trim(XAxis::Q, 4.0, 2.0);
        assert_eq!(p.range(), (1, 4));
    }

    #[test]
    fn test_trim_on_descending_d_axis() {
        let mut p = simple_pattern();
        // d = 2π/q 降序；d ∈ [2π/4, 2π/2] 对应 q ∈ [2, 4]
        p.set_trim(XAxis::D, 2.0 * PI / 4.0, 2.0 * PI / 2.0);
        assert_eq!(p.range(), (1, 4));
    }

    #[test]
    fn test_degenerate_trim_falls_back_to_full_range() {
        let mut p = simple_pattern();
        p.set_trim(XAxis::Q, 3.0, 3.1);
        assert_eq!(p.range(), (0, 5));

        // 无波长时 2θ 全零
        let mut p = Pattern1D::from_axis(
            vec![1.0, 2.0, 3.0],
            XAxis::Q,
            vec![1.0, 1.0, 1.0],
            None,
        )
        .unwrap();
        p.set_trim(XAxis::TwoTheta, 5.0, 10.0);
        assert_eq!(p.range(), (0, 3));
    }

    #[test]
    fn test_active_slice_within_nearest_bounds() {
        let mut p = two_peak_pattern();
        p.set_trim(XAxis::Q, 1.734, 3.456);
        let slice = p.active_slice(false);
        assert!(slice.q.iter().all(|&q| (1.73 - 1e-9..=3.46 + 1e-9).contains(&q)));
        assert!((slice.q[0] - 1.73).abs() < 1e-9);
        assert!((slice.q[slice.len() - 1] - 3.46).abs() < 1e-9);
    }

    #[test]
    fn test_background_resized_after_range_change() {
        let mut p = two_peak_pattern();
        p.fit_background(&SonneveldVisser::default()).unwrap();
        assert_eq!(p.background().len(), p.len());

        p.set_trim(XAxis::Q, 1.5, 2.5);
        let (start, end) = p.range();
        let slice = p.active_slice(true);
        assert_eq!(slice.background.len(), end - start);
        assert!(slice.background.iter().all(|&b| b == 0.0));
        assert_lengths(&p);
    }

    #[test]
    fn test_background_subtraction() {
        let mut p = two_peak_pattern();
        p.fit_background(&SonneveldVisser::default()).unwrap();
        let raw = p.active_slice(false);
        let net = p.active_slice(true);
        for i in 0..raw.len() {
            assert!((raw.intensity[i] - raw.background[i] - net.intensity[i]).abs() < 1e-12);
        }
        // 远离峰处基线约为 5
        assert!((raw.background[50] - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_background_one_short_is_padded() {
        let mut p = simple_pattern();
        p.fit_background(&ShortBy(1)).unwrap();
        assert_eq!(p.background(), &[0.0, 1.0, 2.0, 3.0, 3.0]);
    }

    #[test]
    fn test_background_larger_mismatch_is_error() {
        let mut p = simple_pattern();
        let err = p.fit_background(&ShortBy(2)).unwrap_err();
        assert!(matches!(
            err,
            XrdError::ShapeMismatch { expected: 5, actual: 3, .. }
        ));
        assert_eq!(p.background(), &[0.0; 5]);
    }

    #[test]
    fn test_reset_background() {
        let mut p = two_peak_pattern();
        p.set_trim(XAxis::Q, 1.5, 2.5);
        p.fit_background(&SonneveldVisser::default()).unwrap();
        p.reset_background();
        let (start, end) = p.range();
        assert_eq!(p.background(), vec![0.0; end - start].as_slice());
    }

    #[test]
    fn test_find_peaks_full_range() {
        let mut p = two_peak_pattern();
        let peaks = p
            .find_peaks(false, None, &LocalMaxima::default(), &RelativeThreshold)
            .unwrap();
        assert_eq!(peaks.len(), 2);
        assert_eq!(p.peaks(), &[100, 300]);
        assert!((peaks.q[0] - 2.0).abs() < 1e-9);
        assert!((peaks.q[1] - 4.0).abs() < 1e-9);
        assert!((peaks.d[0] - PI).abs() < 1e-9);
    }

    #[test]
    fn test_find_peaks_indices_are_absolute() {
        let mut p = two_peak_pattern();
        p.set_trim(XAxis::Q, 3.5, 4.5);
        let peaks = p
            .find_peaks(false, None, &LocalMaxima::default(), &RelativeThreshold)
            .unwrap();
        assert_eq!(peaks.len(), 1);
        assert_eq!(p.peaks(), &[300]);
        assert_eq!(peaks.row(0).map(|r| r[0]), Some(p.q()[300]));
    }

    #[test]
    fn test_threshold_only_shrinks_peak_set() {
        let mut p = two_peak_pattern();
        let detector = LocalMaxima::default();
        let all = p
            .find_peaks(false, None, &detector, &RelativeThreshold)
            .unwrap();
        for threshold in [0.0, 0.2, 0.5, 0.99] {
            let filtered = p
                .find_peaks(false, Some(threshold), &detector, &RelativeThreshold)
                .unwrap();
            assert!(all.len() >= filtered.len());
        }
        let strong = p
            .find_peaks(false, Some(0.5), &detector, &RelativeThreshold)
            .unwrap();
        assert_eq!(p.peaks(), &[100]);
        assert_eq!(strong.len(), 1);
    }

    #[test]
    fn test_find_peaks_empty_table() {
        let mut p = Pattern1D::from_axis(
            vec![1.0, 2.0, 3.0, 4.0],
            XAxis::Q,
            vec![1.0, 2.0, 3.0, 4.0],
            Some(1.0),
        )
        .unwrap();
        let peaks = p
            .find_peaks(false, None, &LocalMaxima::default(), &RelativeThreshold)
            .unwrap();
        assert!(peaks.is_empty());
        assert_eq!(peaks.rows().count(), 0);
        assert!(p.peaks().is_empty());
    }

    #[test]
    fn test_find_peaks_with_background_subtraction() {
        let mut p = two_peak_pattern();
        p.fit_background(&SonneveldVisser::default()).unwrap();
        let detector = LocalMaxima::new(PeakSearchOptions {
            min_height: Some(20.0),
            ..Default::default()
        });
        let peaks = p.find_peaks(true, None, &detector, &RelativeThreshold).unwrap();
        assert_eq!(p.peaks(), &[100, 300]);
        for row in peaks.rows() {
            assert!(row[3] > 20.0);
        }
    }

    #[test]
    fn test_find_peaks_rejects_out_of_range_index() {
        let mut p = simple_pattern();
        let err = p
            .find_peaks(false, None, &OutOfRange, &RelativeThreshold)
            .unwrap_err();
        assert!(matches!(err, XrdError::PeakIndexOutOfRange { index: 5, len: 5 }));
    }

    #[test]
    fn test_with_wavelength_fills_derived_axes() {
        let p = Pattern1D::from_axis(
            vec![10.0, 20.0, 30.0],
            XAxis::TwoTheta,
            vec![1.0, 2.0, 3.0],
            None,
        )
        .unwrap();
        assert!(p.q().iter().all(|&v| v == 0.0));

        let p = p.with_wavelength(1.5406).unwrap();
        assert_eq!(p.two_theta(), &[10.0, 20.0, 30.0]);
        let expected_q = 4.0 * PI * (5.0f64.to_radians()).sin() / 1.5406;
        assert!((p.q()[0] - expected_q).abs() < 1e-9);
        assert!((p.d()[0] - 2.0 * PI / expected_q).abs() < 1e-9);
        assert!(p.clone().with_wavelength(-1.0).is_err());
    }

    #[test]
    fn test_fit_background_without_wavelength_follows_slope() {
        let two_theta: Vec<f64> = (0..200).map(|i| 5.0 + i as f64 * 0.1).collect();
        let intensity: Vec<f64> = (0..200).map(|i| 10.0 + 0.5 * i as f64).collect();
        let mut p = Pattern1D::from_axis(two_theta, XAxis::TwoTheta, intensity, None).unwrap();
        assert!(p.q().iter().all(|&q| q == 0.0));

        p.fit_background(&SonneveldVisser::default()).unwrap();
        let net = p.active_slice(true);
        assert!(net.intensity[0].abs() < 1.0);
        assert!(net.intensity[199].abs() < 1.0, "net[199] = {}", net.intensity[199]);
        assert!(p.background()[199] > 100.0);
    }

    #[test]
    fn test_has_axis_without_wavelength() {
        let d_native =
            Pattern1D::from_axis(vec![4.0, 2.0, 1.0], XAxis::D, vec![1.0, 2.0, 3.0], None).unwrap();
        assert!(d_native.has_axis(XAxis::D));
        assert!(d_native.has_axis(XAxis::Q));
        assert!(!d_native.has_axis(XAxis::TwoTheta));
        assert!((d_native.q()[0] - PI / 2.0).abs() < 1e-12);

        let tth_native = Pattern1D::from_axis(
            vec![10.0, 20.0, 30.0],
            XAxis::TwoTheta,
            vec![1.0, 2.0, 3.0],
            None,
        )
        .unwrap();
        assert!(!tth_native.has_axis(XAxis::Q));
        assert!(!tth_native.has_axis(XAxis::D));
        assert!(tth_native.with_wavelength(1.0).unwrap().has_axis(XAxis::Q));
    }
}
