//! # 寻峰
//!
//! 定义寻峰与峰过滤接口，并提供默认实现。
//!
//! ## 功能
//! - `LocalMaxima`: 局部极大值寻峰（平台取中点），支持最小高度、
//!   最小显著度 (prominence) 与最小间距约束
//! - `RelativeThreshold`: 按相对强度阈值过滤候选峰
//!
//! ## 依赖关系
//! - 被 `xrd/pattern.rs` 的 `find_peaks` 调用
//! - 被 `commands/peaks.rs` 根据命令行参数构造

use std::cmp::Ordering;

/// 寻峰接口：返回强度数组中的候选峰下标（升序）
pub trait PeakDetector {
    fn detect(&self, intensity: &[f64]) -> Vec<usize>;
}

/// 峰过滤接口：返回 `indices` 的子集
pub trait PeakFilter {
    fn filter(&self, threshold: f64, indices: &[usize], intensity: &[f64]) -> Vec<usize>;
}

/// 寻峰参数
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PeakSearchOptions {
    /// 最小峰高
    pub min_height: Option<f64>,
    /// 最小显著度
    pub min_prominence: Option<f64>,
    /// 相邻峰最小间距（采样点数）
    pub min_distance: Option<usize>,
}

/// 局部极大值寻峰器
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalMaxima {
    pub options: PeakSearchOptions,
}

impl LocalMaxima {
    pub fn new(options: PeakSearchOptions) -> Self {
        Self { options }
    }
}

impl PeakDetector for LocalMaxima {
    fn detect(&self, intensity: &[f64]) -> Vec<usize> {
        let mut peaks = local_maxima(intensity);

        if let Some(height) = self.options.min_height {
            peaks.retain(|&i| intensity[i] >= height);
        }

        if let Some(min_prominence) = self.options.min_prominence {
            peaks.retain(|&i| prominence(intensity, i) >= min_prominence);
        }

        if let Some(distance) = self.options.min_distance {
            if distance > 1 && peaks.len() > 1 {
                peaks = enforce_distance(intensity, &peaks, distance);
            }
        }

        peaks
    }
}

/// 按相对强度过滤：保留 y[i] - min(y) >= threshold·(max(y) - min(y)) 的峰
#[derive(Debug, Clone, Copy, Default)]
pub struct RelativeThreshold;

impl PeakFilter for RelativeThreshold {
    fn filter(&self, threshold: f64, indices: &[usize], intensity: &[f64]) -> Vec<usize> {
        let (lo, hi) = intensity
            .iter()
            .filter(|v| !v.is_nan())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        if !lo.is_finite() || !hi.is_finite() {
            return Vec::new();
        }

        let cutoff = threshold * (hi - lo);
        indices
            .iter()
            .copied()
            .filter(|&i| intensity.get(i).is_some_and(|&v| v - lo >= cutoff))
            .collect()
    }
}

/// 查找局部极大值，平台取中点
fn local_maxima(y: &[f64]) -> Vec<usize> {
    let mut peaks = Vec::new();
    if y.len() < 3 {
        return peaks;
    }

    let last = y.len() - 1;
    let mut i = 1;
    while i < last {
        if y[i - 1] < y[i] {
            let mut ahead = i + 1;
            while ahead < last && y[ahead] == y[i] {
                ahead += 1;
            }
            if y[ahead] < y[i] {
                let left_edge = i;
                let right_edge = ahead - 1;
                peaks.push((left_edge + right_edge) / 2);
                i = ahead;
                continue;
            }
        }
        i += 1;
    }

    peaks
}

/// 峰的显著度
///
/// 左右各自向外搜索直到遇到更高的点（或边界），取区间最小值作为基底；
/// 显著度 = 峰高 - 两侧基底中较高者。
pub fn prominence(y: &[f64], peak: usize) -> f64 {
    let height = y[peak];

    let mut left_min = height;
    for &v in y[..peak].iter().rev() {
        if v > height {
            break;
        }
        left_min = left_min.min(v);
    }

    let mut right_min = height;
    for &v in &y[peak + 1..] {
        if v > height {
            break;
        }
        right_min = right_min.min(v);
    }

    height - left_min.max(right_min)
}

/// 在 `distance` 个采样点内只保留最高的峰
fn enforce_distance(y: &[f64], peaks: &[usize], distance: usize) -> Vec<usize> {
    let mut ranked = peaks.to_vec();
    ranked.sort_by(|&a, &b| y[b].partial_cmp(&y[a]).unwrap_or(Ordering::Equal));

    let mut kept: Vec<usize> = Vec::with_capacity(ranked.len());
    for candidate in ranked {
        if kept.iter().all(|&k| k.abs_diff(candidate) >= distance) {
            kept.push(candidate);
        }
    }
    kept.sort_unstable();
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_maxima_simple() {
        let y = vec![0.0, 1.0, 0.5, 3.0, 0.2, 2.0, 0.1];
        let peaks = LocalMaxima::default().detect(&y);
        assert_eq!(peaks, vec![1, 3, 5]);
    }

    #[test]
    fn test_plateau_midpoint() {
        let y = vec![0.0, 2.0, 2.0, 2.0, 0.0];
        assert_eq!(LocalMaxima::default().detect(&y), vec![2]);
    }

    #[test]
    fn test_edges_are_not_peaks() {
        let y = vec![5.0, 1.0, 0.0, 1.0, 5.0];
        assert!(LocalMaxima::default().detect(&y).is_empty());
    }

    #[test]
    fn test_min_height() {
        let y = vec![0.0, 1.0, 0.5, 3.0, 0.2, 2.0, 0.1];
        let detector = LocalMaxima::new(PeakSearchOptions {
            min_height: Some(1.5),
            ..Default::default()
        });
        assert_eq!(detector.detect(&y), vec![3, 5]);
    }

    #[test]
    fn test_prominence_bases() {
        let y = vec![0.0, 4.0, 3.0, 5.0, 1.0];
        // 峰 1 的右侧遇到更高的 5.0，基底为 max(0.0, 3.0)
        assert!((prominence(&y, 1) - 1.0).abs() < 1e-12);
        assert!((prominence(&y, 3) - 4.0).abs() < 1e-12);

        let detector = LocalMaxima::new(PeakSearchOptions {
            min_prominence: Some(2.0),
            ..Default::default()
        });
        assert_eq!(detector.detect(&y), vec![3]);
    }

    #[test]
    fn test_min_distance_keeps_tallest() {
        let y = vec![0.0, 3.0, 0.0, 5.0, 0.0, 0.0, 0.0, 4.0, 0.0];
        let detector = LocalMaxima::new(PeakSearchOptions {
            min_distance: Some(3),
            ..Default::default()
        });
        assert_eq!(detector.detect(&y), vec![3, 7]);
    }

    #[test]
    fn test_relative_threshold_only_shrinks() {
        let y = vec![0.0, 1.0, 0.0, 10.0, 0.0, 6.0, 0.0];
        let candidates = LocalMaxima::default().detect(&y);
        assert_eq!(candidates, vec![1, 3, 5]);

        for threshold in [0.0, 0.05, 0.5, 0.9, 1.0, 2.0] {
            let kept = RelativeThreshold.filter(threshold, &candidates, &y);
            assert!(kept.len() <= candidates.len());
            assert!(kept.iter().all(|i| candidates.contains(i)));
        }
        assert_eq!(RelativeThreshold.filter(0.5, &candidates, &y), vec![3, 5]);
    }

    #[test]
    fn test_filter_ignores_out_of_range_indices() {
        let y = vec![0.0, 5.0, 0.0];
        assert!(RelativeThreshold.filter(0.0, &[7], &y).is_empty());
    }
}
