//! # 背景估计
//!
//! 定义背景估计接口，并提供 Sonneveld–Visser 平滑背景算法。
//!
//! ## 算法概述
//! 1. 强度做幂次压缩 y → sign(y)·|y|^(1/exponent)，降低峰的权重
//! 2. 按 `compress` 个点求平均，降采样
//! 3. 迭代：任一内点若高于左右相距 `width` 的两点均值，则降到该均值
//! 4. 按采样下标线性插值回原始点数，并逆变换
//!
//! 算法只依赖采样顺序，不读取横轴数值。
//!
//! ## 参考
//! - Sonneveld & Visser, J. Appl. Cryst. 8 (1975) 1-7
//!
//! ## 依赖关系
//! - 被 `xrd/pattern.rs` 的 `fit_background` 调用
//! - 被 `commands/` 构造默认估计器

/// 背景估计接口
///
/// 输入为当前活动区间内的横轴与强度，返回等长的背景曲线。
pub trait BackgroundEstimator {
    fn estimate(&self, x: &[f64], y: &[f64]) -> Vec<f64>;
}

/// Sonneveld–Visser 背景估计器
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SonneveldVisser {
    /// 降采样因子
    pub compress: usize,
    /// 比较点间距（降采样后的点数）
    pub width: usize,
    /// 迭代次数
    pub iterations: usize,
    /// 强度压缩幂次
    pub exponent: f64,
}

impl Default for SonneveldVisser {
    fn default() -> Self {
        Self {
            compress: 2,
            width: 4,
            iterations: 100,
            exponent: 2.0,
        }
    }
}

impl SonneveldVisser {
    fn forward(&self, y: f64) -> f64 {
        y.signum() * y.abs().powf(1.0 / self.exponent)
    }

    fn inverse(&self, y: f64) -> f64 {
        y.signum() * y.abs().powf(self.exponent)
    }
}

impl BackgroundEstimator for SonneveldVisser {
    fn estimate(&self, x: &[f64], y: &[f64]) -> Vec<f64> {
        let n = x.len().min(y.len());
        if n < 3 {
            return y[..n].to_vec();
        }

        let transformed: Vec<f64> = y[..n].iter().map(|&v| self.forward(v)).collect();

        // 按采样下标降采样，横轴可能为全零（缺少波长）
        let index: Vec<f64> = (0..n).map(|i| i as f64).collect();
        let step = self.compress.max(1);
        let (cx, mut cy): (Vec<f64>, Vec<f64>) = index
            .chunks(step)
            .zip(transformed.chunks(step))
            .map(|(xs, ys)| (mean(xs), mean(ys)))
            .unzip();

        // 迭代平滑
        let width = self.width.max(1);
        if cy.len() > 2 * width {
            let mut next = cy.clone();
            for _ in 0..self.iterations {
                let mut changed = false;
                for i in width..cy.len() - width {
                    let avg = 0.5 * (cy[i - width] + cy[i + width]);
                    if cy[i] > avg {
                        next[i] = avg;
                        changed = true;
                    } else {
                        next[i] = cy[i];
                    }
                }
                std::mem::swap(&mut cy, &mut next);
                if !changed {
                    break;
                }
            }
        }

        index
            .iter()
            .map(|&i| self.inverse(interpolate(&cx, &cy, i)))
            .collect()
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// 分段线性插值，横轴单调（升序或降序），超出范围取端点值
fn interpolate(xs: &[f64], ys: &[f64], x: f64) -> f64 {
    match xs.len() {
        0 => return 0.0,
        1 => return ys[0],
        _ => {}
    }

    let ascending = xs[xs.len() - 1] >= xs[0];
    let before = |a: f64, b: f64| if ascending { a <= b } else { a >= b };

    if before(x, xs[0]) {
        return ys[0];
    }
    if before(xs[xs.len() - 1], x) {
        return ys[ys.len() - 1];
    }

    // 第一个不在 x 之前的节点
    let hi = xs.partition_point(|&xi| before(xi, x) && xi != x);
    if hi == 0 {
        return ys[0];
    }
    let lo = hi - 1;
    let span = xs[hi] - xs[lo];
    if span == 0.0 {
        return ys[hi];
    }
    let t = (x - xs[lo]) / span;
    ys[lo] + t * (ys[hi] - ys[lo])
}
