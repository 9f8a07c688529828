//! # pyFAI .xy 格式解析器
//!
//! 解析 pyFAI 积分输出的一维衍射数据文件。
//!
//! ## .xy 格式说明
//! ```text
//! # == pyFAI calibration ==
//! # SplineFile: None
//! # PixelSize: 1.000e-04, 1.000e-04 m
//! # PONI: 2.286e-01, 2.547e-01 m
//! # Distance Sample to Detector: 0.49212785 m
//! # Rotations: 0.010000 -0.008570 0.000000 rad
//! #
//! # Wavelength: 6.88801071778e-11
//! # Polarization factor: None
//! # Normalization factor: 1.0
//! # --> CeO2.xy
//! #       q_A^-1          I
//!   0.51234     1234.5
//!   ...
//! ```
//!
//! 数据块可以是两列，也可以是两行。
//!
//! ## 依赖关系
//! - 被 `parsers/mod.rs` 使用
//! - 构造 `xrd/pattern.rs` 的 Pattern1D
//! - 使用 `regex` 提取头部数值

use crate::error::{Result, XrdError};
use crate::models::{Calibration, XAxis};
use crate::xrd::Pattern1D;

use log::debug;
use regex::Regex;
use std::f64::consts::PI;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

/// 头部数值（含科学计数法）
static NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[-+]?(?:\d+\.?\d*|\.\d+)(?:[eE][-+]?\d+)?").expect("valid number regex")
});

/// 头部信息
#[derive(Debug, Clone, Default)]
pub struct XyHeader {
    /// 波长（Å）
    pub wavelength: Option<f64>,
    /// 横轴标记原文（如 `q_A^-1`）
    pub axis_marker: Option<String>,
    pub calibration: Calibration,
}

/// 解析 .xy 文件
///
/// `fallback_axis` 在文件没有横轴标记时使用。
pub fn parse_xy_file(path: &Path, fallback_axis: Option<XAxis>) -> Result<Pattern1D> {
    let content = fs::read_to_string(path).map_err(|e| XrdError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    let mut pattern = parse_xy_content(&content, fallback_axis).map_err(|e| match e {
        XrdError::ParseError { format, reason, .. } => XrdError::ParseError {
            format,
            path: path.display().to_string(),
            reason,
        },
        other => XrdError::ParseError {
            format: "xy".to_string(),
            path: path.display().to_string(),
            reason: other.to_string(),
        },
    })?;

    if let Some(name) = path.file_name().and_then(|s| s.to_str()) {
        pattern = pattern.with_label(name);
    }
    pattern.source = Some(path.to_path_buf());
    debug!(
        "loaded {} samples from {} (native axis {})",
        pattern.len(),
        path.display(),
        pattern.native_axis()
    );

    Ok(pattern)
}

/// 从字符串内容解析 .xy 格式
pub fn parse_xy_content(content: &str, fallback_axis: Option<XAxis>) -> Result<Pattern1D> {
    let mut header_lines = Vec::new();
    let mut rows: Vec<Vec<f64>> = Vec::new();

    for (lineno, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(rest) = line.strip_prefix('#') {
            header_lines.push(rest.trim());
            continue;
        }

        let values = line
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|s| !s.is_empty())
            .map(|s| s.parse::<f64>())
            .collect::<std::result::Result<Vec<f64>, _>>()
            .map_err(|_| parse_error(format!("line {}: non-numeric data '{}'", lineno + 1, line)))?;
        rows.push(values);
    }

    let header = parse_header(&header_lines)?;
    let (x, intensity) = split_columns(rows)?;

    let (axis, x) = match header.axis_marker.as_deref() {
        Some(marker) => {
            let axis: XAxis = marker.parse()?;
            (axis, to_standard_units(marker, x))
        }
        None => match fallback_axis {
            Some(axis) => (axis, x),
            None => return Err(parse_error("no x-axis marker (q_ or 2th_) in header")),
        },
    };

    let mut pattern = Pattern1D::from_axis(x, axis, intensity, header.wavelength)
        .map_err(|e| parse_error(e.to_string()))?;
    pattern.calibration = header.calibration;

    Ok(pattern)
}

/// 解析头部行（已去掉前导 `#`）
pub fn parse_header(lines: &[&str]) -> Result<XyHeader> {
    let mut header = XyHeader::default();
    let cal = &mut header.calibration;

    for line in lines {
        let line = line.replace(',', " ");

        let first = line.split_whitespace().next().unwrap_or("");
        if first.starts_with("q_") || first.starts_with("2th_") || first.starts_with("d_") {
            header.axis_marker = Some(first.to_string());
            continue;
        }

        let (key, value) = match line.split_once(':') {
            Some(kv) => kv,
            None => continue,
        };
        let numbers = extract_numbers(value);

        if key.contains("SplineFile") {
            let name = value.trim();
            if !name.is_empty() && name != "None" {
                cal.spline_file = Some(name.to_string());
            }
        } else if key.contains("PixelSize") {
            cal.pixel_size = pair(&numbers);
        } else if key.contains("PONI") {
            cal.poni = pair(&numbers);
        } else if key.contains("Detector") && numbers.len() == 1 {
            cal.distance = Some(numbers[0]);
        } else if key.contains("Rotations") {
            if numbers.len() >= 3 {
                cal.rotation = Some([numbers[0], numbers[1], numbers[2]]);
            }
        } else if key.contains("Wavelength") {
            let wl = numbers
                .first()
                .copied()
                .ok_or_else(|| parse_error(format!("unreadable wavelength '{}'", value.trim())))?;
            // pyFAI 以米为单位写出
            header.wavelength = Some(if wl < 1e-3 { wl * 1e10 } else { wl });
        } else if key.contains("Polarization") {
            cal.polarization = numbers.first().copied();
        } else if key.contains("Normalization") {
            cal.normalization = numbers.first().copied();
        }
    }

    Ok(header)
}

fn extract_numbers(text: &str) -> Vec<f64> {
    NUMBER
        .find_iter(text)
        .filter_map(|m| m.as_str().parse().ok())
        .collect()
}

fn pair(numbers: &[f64]) -> Option<[f64; 2]> {
    match numbers {
        [a, b, ..] => Some([*a, *b]),
        _ => None,
    }
}

/// 统一到 1/Å 与度
fn to_standard_units(marker: &str, x: Vec<f64>) -> Vec<f64> {
    let marker = marker.to_lowercase();
    if marker.starts_with("q_nm") {
        x.into_iter().map(|v| v / 10.0).collect()
    } else if marker.starts_with("2th_rad") {
        x.into_iter().map(|v| v * 180.0 / PI).collect()
    } else {
        x
    }
}

/// 拆分数据块为 (x, y)：两列，或恰好两行
fn split_columns(rows: Vec<Vec<f64>>) -> Result<(Vec<f64>, Vec<f64>)> {
    if rows.is_empty() {
        return Err(parse_error("no data block"));
    }

    if rows.iter().all(|r| r.len() == 2) && rows.len() != 2 {
        return Ok(rows.into_iter().map(|r| (r[0], r[1])).unzip());
    }

    if rows.len() == 2 && rows[0].len() == rows[1].len() {
        let mut rows = rows.into_iter();
        if let (Some(x), Some(y)) = (rows.next(), rows.next()) {
            return Ok((x, y));
        }
    }

    Err(parse_error(
        "data block must hold two columns or two rows of equal length",
    ))
}

fn parse_error(reason: impl Into<String>) -> XrdError {
    XrdError::ParseError {
        format: "xy".to_string(),
        path: "<memory>".to_string(),
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CEO2: &str = r#"# == pyFAI calibration ==
# SplineFile: None
# PixelSize: 1.000e-04, 1.000e-04 m
# PONI: 2.286e-01, 2.547e-01 m
# Distance Sample to Detector: 0.49212785 m
# Rotations: 0.010000 -0.008570 0.000000 rad
#
# Wavelength: 6.88801071778e-11
# Polarization factor: None
# Normalization factor: 1.0
# --> CeO2.xy
#       q_A^-1          I
  1.0     10.0
  2.0     50.0
  3.0     20.0
  4.0     15.0
"#;

    #[test]
    fn test_parse_pyfai_header() {
        let pattern = parse_xy_content(CEO2, None).unwrap();
        assert_eq!(pattern.len(), 4);
        assert_eq!(pattern.native_axis(), XAxis::Q);
        assert!((pattern.wavelength().unwrap() - 0.688801071778).abs() < 1e-9);

        let cal = &pattern.calibration;
        assert_eq!(cal.pixel_size, Some([1.0e-4, 1.0e-4]));
        assert_eq!(cal.poni, Some([0.2286, 0.2547]));
        assert_eq!(cal.distance, Some(0.49212785));
        assert_eq!(cal.rotation, Some([0.01, -0.00857, 0.0]));
        assert_eq!(cal.spline_file, None);
        assert_eq!(cal.polarization, None);
        assert_eq!(cal.normalization, Some(1.0));

        assert_eq!(pattern.intensity(), &[10.0, 50.0, 20.0, 15.0]);
        assert!(pattern.two_theta().iter().all(|&t| t > 0.0));
    }

    #[test]
    fn test_two_theta_degrees_without_wavelength() {
        let content = "#  2th_deg  I\n10.0 1.0\n20.0 2.0\n30.0 3.0\n";
        let pattern = parse_xy_content(content, None).unwrap();
        assert_eq!(pattern.native_axis(), XAxis::TwoTheta);
        assert_eq!(pattern.wavelength(), None);
        assert_eq!(pattern.q(), &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_unit_conversion_from_marker() {
        let content = "# q_nm^-1 I\n10.0 1.0\n20.0 2.0\n30.0 3.0\n";
        let pattern = parse_xy_content(content, None).unwrap();
        assert_eq!(pattern.q(), &[1.0, 2.0, 3.0]);

        let content = "# 2th_rad I\n0.5 1.0\n1.0 2.0\n1.5 3.0\n";
        let pattern = parse_xy_content(content, None).unwrap();
        assert!((pattern.two_theta()[1] - 180.0 / PI).abs() < 1e-12);
    }

    #[test]
    fn test_two_row_layout() {
        let content = "# q_A^-1\n1.0, 2.0, 3.0, 4.0\n5.0, 6.0, 7.0, 8.0\n";
        let pattern = parse_xy_content(content, None).unwrap();
        assert_eq!(pattern.q(), &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(pattern.intensity(), &[5.0, 6.0, 7.0, 8.0]);
    }

    #[test]
    fn test_fallback_axis() {
        let content = "1.0 2.0\n2.0 3.0\n3.0 1.0\n";
        assert!(parse_xy_content(content, None).is_err());
        let pattern = parse_xy_content(content, Some(XAxis::D)).unwrap();
        assert_eq!(pattern.native_axis(), XAxis::D);
    }

    #[test]
    fn test_malformed_body() {
        let content = "# q_A^-1 I\n1.0 2.0\nabc 3.0\n";
        let err = parse_xy_content(content, None).unwrap_err();
        assert!(err.to_string().contains("line 3"));

        let content = "# q_A^-1 I\n1.0 2.0 3.0\n1.0 2.0\n4.0 5.0\n";
        assert!(parse_xy_content(content, None).is_err());

        let content = "# q_A^-1 I\n";
        assert!(parse_xy_content(content, None).is_err());
    }

    #[test]
    fn test_missing_file_names_path() {
        let path = Path::new("/nonexistent/definitely_missing.xy");
        let err = parse_xy_file(path, None).unwrap_err();
        assert!(err.to_string().contains("definitely_missing.xy"));
    }

    #[test]
    fn test_parse_file_sets_label_and_path() {
        let path = std::env::temp_dir().join("xrd1d_parse_label_test.xy");
        fs::write(&path, CEO2).unwrap();
        let pattern = parse_xy_file(&path, None).unwrap();
        assert_eq!(pattern.label.as_deref(), Some("xrd1d_parse_label_test.xy"));
        assert_eq!(pattern.source.as_deref(), Some(path.as_path()));
        fs::remove_file(&path).ok();
    }
}
