//! # 横轴换算
//!
//! 在 q、2θ、d 三种横轴之间换算。
//!
//! ## 公式
//! - d = 2π / q
//! - q = 4π sin(θ) / λ
//! - d = λ / (2 sin θ)
//!
//! 需要波长的换算在没有波长时返回全零数组（降级结果而非错误）。
//! 除零的结果逐项定义：q = 0 或 d = 0 或 2θ = 0 时得到 +∞，
//! 无法到达的散射角 (|qλ/4π| > 1) 得到 NaN。
//!
//! ## 依赖关系
//! - 被 `xrd/pattern.rs` 调用
//! - 使用 `models/axis.rs` 的 XAxis

use crate::models::XAxis;

use std::f64::consts::PI;

/// hc，单位 keV·Å
const HC_KEV_ANGSTROM: f64 = 12.398_419_843_320_026;

/// 三种横轴表示
#[derive(Debug, Clone, PartialEq)]
pub struct Axes {
    /// 动量转移 q（1/Å）
    pub q: Vec<f64>,
    /// 散射角 2θ（度）
    pub two_theta: Vec<f64>,
    /// 晶面间距 d（Å）
    pub d: Vec<f64>,
}

/// 只接受有限正波长，其余视为缺失
fn usable_wavelength(wavelength: Option<f64>) -> Option<f64> {
    wavelength.filter(|w| w.is_finite() && *w > 0.0)
}

/// 将给定横轴投影到 q、2θ、d 三种横轴
pub fn convert(x: &[f64], source: XAxis, wavelength: Option<f64>) -> Axes {
    let wavelength = usable_wavelength(wavelength);
    let zeros = || vec![0.0; x.len()];

    match source {
        XAxis::Q => Axes {
            q: x.to_vec(),
            two_theta: match wavelength {
                Some(wl) => x.iter().map(|&q| two_theta_from_q(q, wl)).collect(),
                None => zeros(),
            },
            d: x.iter().map(|&q| d_from_q(q)).collect(),
        },
        XAxis::TwoTheta => match wavelength {
            Some(wl) => Axes {
                q: x.iter().map(|&t| q_from_two_theta(t, wl)).collect(),
                two_theta: x.to_vec(),
                d: x.iter().map(|&t| d_from_two_theta(t, wl)).collect(),
            },
            None => Axes {
                q: zeros(),
                two_theta: x.to_vec(),
                d: zeros(),
            },
        },
        XAxis::D => Axes {
            q: x.iter().map(|&d| q_from_d(d)).collect(),
            two_theta: match wavelength {
                Some(wl) => x.iter().map(|&d| two_theta_from_d(d, wl)).collect(),
                None => zeros(),
            },
            d: x.to_vec(),
        },
    }
}

/// d = 2π/q
pub fn d_from_q(q: f64) -> f64 {
    if q == 0.0 {
        return f64::INFINITY;
    }
    2.0 * PI / q
}

/// q = 2π/d
pub fn q_from_d(d: f64) -> f64 {
    if d == 0.0 {
        return f64::INFINITY;
    }
    2.0 * PI / d
}

/// 2θ（度）= 2·asin(qλ/4π)
pub fn two_theta_from_q(q: f64, wavelength: f64) -> f64 {
    let sin_theta = q * wavelength / (4.0 * PI);
    if sin_theta.abs() > 1.0 {
        return f64::NAN;
    }
    2.0 * sin_theta.asin().to_degrees()
}

/// q = 4π·sin(θ)/λ
pub fn q_from_two_theta(two_theta: f64, wavelength: f64) -> f64 {
    let theta = (two_theta / 2.0).to_radians();
    4.0 * PI * theta.sin() / wavelength
}

/// d = λ / (2·sin θ)
pub fn d_from_two_theta(two_theta: f64, wavelength: f64) -> f64 {
    let sin_theta = (two_theta / 2.0).to_radians().sin();
    if sin_theta == 0.0 {
        return f64::INFINITY;
    }
    wavelength / (2.0 * sin_theta)
}

/// 2θ（度）= 2·asin(λ/2d)
pub fn two_theta_from_d(d: f64, wavelength: f64) -> f64 {
    two_theta_from_q(q_from_d(d), wavelength)
}

/// 入射能量（keV）
pub fn energy_from_wavelength(wavelength: f64) -> f64 {
    HC_KEV_ANGSTROM / wavelength
}

/// 入射波长（Å）
pub fn wavelength_from_energy(energy: f64) -> f64 {
    HC_KEV_ANGSTROM / energy
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-9;

    #[test]
    fn test_q_round_trip_through_d() {
        let q: Vec<f64> = (1..=50).map(|i| i as f64 * 0.1).collect();
        for wavelength in [0.3, 0.6888, 1.5406] {
            let axes = convert(&q, XAxis::Q, Some(wavelength));
            for (orig, d) in q.iter().zip(&axes.d) {
                assert!((q_from_d(*d) - orig).abs() < TOL);
            }
        }
    }

    #[test]
    fn test_two_theta_round_trip() {
        let tth = vec![10.0, 25.0, 44.5, 90.0, 120.0];
        let axes = convert(&tth, XAxis::TwoTheta, Some(1.5406));
        for (i, &t) in tth.iter().enumerate() {
            assert!((two_theta_from_q(axes.q[i], 1.5406) - t).abs() < 1e-8);
            assert!((two_theta_from_d(axes.d[i], 1.5406) - t).abs() < 1e-8);
            assert!((d_from_q(axes.q[i]) - axes.d[i]).abs() < 1e-8);
        }
    }

    #[test]
    fn test_d_axis_without_wavelength() {
        let d = vec![1.0, 2.0, 4.0];
        let axes = convert(&d, XAxis::D, None);
        assert!((axes.q[0] - 2.0 * PI).abs() < TOL);
        assert!((axes.q[2] - PI / 2.0).abs() < TOL);
        assert_eq!(axes.two_theta, vec![0.0; 3]);
    }

    #[test]
    fn test_two_theta_without_wavelength_is_zero_filled() {
        let tth = vec![10.0, 20.0, 30.0, 40.0];
        let axes = convert(&tth, XAxis::TwoTheta, None);
        assert_eq!(axes.q, vec![0.0; 4]);
        assert_eq!(axes.d, vec![0.0; 4]);
        assert_eq!(axes.two_theta, tth);
    }

    #[test]
    fn test_non_positive_wavelength_treated_as_missing() {
        let q = vec![1.0, 2.0];
        let axes = convert(&q, XAxis::Q, Some(-1.0));
        assert_eq!(axes.two_theta, vec![0.0; 2]);
    }

    #[test]
    fn test_output_lengths_match_input() {
        let x = vec![0.5, 1.0, 1.5, 2.0, 2.5, 3.0, 3.5];
        for axis in XAxis::ALL {
            for wl in [None, Some(1.0)] {
                let axes = convert(&x, axis, wl);
                assert_eq!(axes.q.len(), x.len());
                assert_eq!(axes.two_theta.len(), x.len());
                assert_eq!(axes.d.len(), x.len());
            }
        }
    }

    #[test]
    fn test_division_by_zero_is_explicit() {
        assert_eq!(d_from_q(0.0), f64::INFINITY);
        assert_eq!(q_from_d(0.0), f64::INFINITY);
        assert_eq!(d_from_two_theta(0.0, 1.0), f64::INFINITY);
        assert!(two_theta_from_q(20.0, 1.0).is_nan());
    }

    #[test]
    fn test_energy_wavelength() {
        // Cu Kα1
        let e = energy_from_wavelength(1.5406);
        assert!((e - 8.0478).abs() < 1e-3);
        assert!((wavelength_from_energy(e) - 1.5406).abs() < TOL);
    }
}
