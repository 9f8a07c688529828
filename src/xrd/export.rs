//! # XRD 数据导出
//!
//! 导出图谱或寻峰结果到 CSV 和 XY 格式。
//!
//! ## 支持格式
//! - CSV: 五列 q, 2θ, d, intensity, background（切片或峰表）
//! - XY: pyFAI 兼容的两列格式，可被 `parsers/xy.rs` 重新读取
//!
//! ## 依赖关系
//! - 被 `commands/convert.rs`, `commands/peaks.rs` 调用
//! - 使用 `xrd/pattern.rs` 的 PatternTable
//! - 使用 `csv` + `serde` 写入 CSV 文件

use crate::error::{Result, XrdError};
use crate::models::{Calibration, XAxis};
use crate::xrd::PatternTable;

use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// CSV 行
#[derive(Debug, Serialize)]
struct TableRow {
    q: f64,
    #[serde(rename = "2theta")]
    two_theta: f64,
    d: f64,
    intensity: f64,
    background: f64,
}

/// XY 文件头部所需信息
#[derive(Debug, Clone, Copy)]
pub struct XyMetadata<'a> {
    pub label: &'a str,
    pub wavelength: Option<f64>,
    pub calibration: &'a Calibration,
}

/// 导出五列表格为 CSV 格式
pub fn to_csv(table: &PatternTable, output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    for [q, two_theta, d, intensity, background] in table.rows() {
        wtr.serialize(TableRow {
            q,
            two_theta,
            d,
            intensity,
            background,
        })?;
    }

    // 空表也写出表头
    if table.is_empty() {
        let header: Vec<&str> = XAxis::ALL
            .iter()
            .map(|axis| axis.column_name())
            .chain(["intensity", "background"])
            .collect();
        wtr.write_record(&header)?;
    }

    wtr.flush().map_err(|e| XrdError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

/// 导出指定横轴与强度为 XY 格式
pub fn to_xy(
    table: &PatternTable,
    axis: XAxis,
    meta: XyMetadata<'_>,
    output_path: &Path,
) -> Result<()> {
    let write_err = |e: std::io::Error| XrdError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    };

    let file = File::create(output_path).map_err(write_err)?;
    let mut out = BufWriter::new(file);

    write_xy_header(&mut out, axis, meta).map_err(write_err)?;
    for (x, y) in table.axis(axis).iter().zip(&table.intensity) {
        writeln!(out, "{:>14.7e}  {:>14.7e}", x, y).map_err(write_err)?;
    }
    out.flush().map_err(write_err)?;

    Ok(())
}

fn write_xy_header<W: Write>(out: &mut W, axis: XAxis, meta: XyMetadata<'_>) -> std::io::Result<()> {
    let cal = meta.calibration;

    writeln!(out, "# == xrd1d export ==")?;
    writeln!(
        out,
        "# SplineFile: {}",
        cal.spline_file.as_deref().unwrap_or("None")
    )?;
    if let Some([a, b]) = cal.pixel_size {
        writeln!(out, "# PixelSize: {:.3e}, {:.3e} m", a, b)?;
    }
    if let Some([a, b]) = cal.poni {
        writeln!(out, "# PONI: {:.3e}, {:.3e} m", a, b)?;
    }
    if let Some(distance) = cal.distance {
        writeln!(out, "# Distance Sample to Detector: {} m", distance)?;
    }
    if let Some([r1, r2, r3]) = cal.rotation {
        writeln!(out, "# Rotations: {:.6} {:.6} {:.6} rad", r1, r2, r3)?;
    }
    writeln!(out, "#")?;
    if let Some(wl) = meta.wavelength {
        // 与 pyFAI 一致，以米为单位
        writeln!(out, "# Wavelength: {:e}", wl * 1e-10)?;
    }
    match cal.polarization {
        Some(p) => writeln!(out, "# Polarization factor: {}", p)?,
        None => writeln!(out, "# Polarization factor: None")?,
    }
    if let Some(n) = cal.normalization {
        writeln!(out, "# Normalization factor: {}", n)?;
    }
    writeln!(out, "# --> {}", meta.label)?;
    writeln!(out, "#{:>14}  {:>14}", axis.xy_marker(), "I")?;
    Ok(())
}
