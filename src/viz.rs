//! Bar-chart rendering of the aggregate tables to SVG or PNG.
//!
//! The backend is chosen by file extension. Chart text uses plotters'
//! pure-Rust `ab_glyph` path, which knows no OS fonts by itself; the
//! first readable font from a list of standard system locations is
//! registered once. When none exists, charts are still written, just
//! without caption and tick labels.

use crate::stats::{BucketStat, CountEntry, MeanEntry};
use anyhow::{Result, anyhow};
use num_format::{Locale, ToFormattedString};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;
use std::path::Path;
use std::sync::OnceLock;

/// Rating axes are fixed to the 1-5 scale (drawn from 0 for bar height).
const RATING_AXIS_MAX: f64 = 5.0;

static FONT_OK: OnceLock<bool> = OnceLock::new();

/// Register a system font for the `ab_glyph` text path, once. Returns
/// whether any text can be drawn.
fn fonts_available() -> bool {
    *FONT_OK.get_or_init(|| {
        const CANDIDATES: &[&str] = &[
            "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/TTF/DejaVuSans.ttf",
            "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
            "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
            "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
            "/System/Library/Fonts/Supplemental/Arial.ttf",
        ];
        for path in CANDIDATES {
            if let Ok(bytes) = std::fs::read(path) {
                let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
                if plotters::style::register_font(
                    "sans-serif",
                    plotters::style::FontStyle::Normal,
                    bytes,
                )
                .is_ok()
                {
                    return true;
                }
            }
        }
        log::warn!("no usable system font found; charts are drawn without text");
        false
    })
}

/// How the y axis is scaled and labeled.
enum Axis {
    /// Counts: scale to the data, thousands separators on tick labels.
    Count,
    /// Ratings: fixed 0-5 axis, one-decimal tick labels.
    Rating,
}

/// Bar chart of a ranked count table.
pub fn plot_counts<P: AsRef<Path>>(
    entries: &[CountEntry],
    title: &str,
    out_path: P,
    width: u32,
    height: u32,
) -> Result<()> {
    let bars: Vec<(String, f64)> = entries
        .iter()
        .map(|e| (e.label.clone(), e.count as f64))
        .collect();
    plot_bars(&bars, title, Axis::Count, out_path, width, height)
}

/// Bar chart of a ranked mean table (fixed 0-5 axis).
pub fn plot_means<P: AsRef<Path>>(
    entries: &[MeanEntry],
    title: &str,
    out_path: P,
    width: u32,
    height: u32,
) -> Result<()> {
    let bars: Vec<(String, f64)> = entries.iter().map(|e| (e.label.clone(), e.mean)).collect();
    plot_bars(&bars, title, Axis::Rating, out_path, width, height)
}

/// Bar chart of mean distraction per screen-time bucket, kept in the
/// fixed bucket order (fixed 0-5 axis).
pub fn plot_bucket_means<P: AsRef<Path>>(
    stats: &[BucketStat],
    title: &str,
    out_path: P,
    width: u32,
    height: u32,
) -> Result<()> {
    let bars: Vec<(String, f64)> = stats
        .iter()
        .map(|s| (s.bucket.clone(), s.mean_distraction))
        .collect();
    plot_bars(&bars, title, Axis::Rating, out_path, width, height)
}

fn plot_bars<P: AsRef<Path>>(
    bars: &[(String, f64)],
    title: &str,
    axis: Axis,
    out_path: P,
    width: u32,
    height: u32,
) -> Result<()> {
    if bars.is_empty() {
        return Err(anyhow!("no data to plot"));
    }
    let out_path = out_path.as_ref();
    let path_string = out_path.to_string_lossy().into_owned();

    if out_path.extension().and_then(|s| s.to_str()) == Some("svg") {
        let root = SVGBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw_bars(root, bars, title, axis)?;
    } else {
        let root = BitMapBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw_bars(root, bars, title, axis)?;
    }
    Ok(())
}

/// Helper that draws to any Plotters backend.
fn draw_bars<DB>(
    root: DrawingArea<DB, Shift>,
    bars: &[(String, f64)],
    title: &str,
    axis: Axis,
) -> Result<()>
where
    DB: DrawingBackend,
{
    root.fill(&WHITE).map_err(|e| anyhow!("{:?}", e))?;
    let with_text = fonts_available();

    let y_max = match axis {
        Axis::Rating => RATING_AXIS_MAX,
        Axis::Count => {
            let max = bars.iter().map(|(_, v)| *v).fold(0.0f64, f64::max);
            (max * 1.15).max(1.0)
        }
    };

    let mut builder = ChartBuilder::on(&root);
    builder.margin(20);
    if with_text {
        builder
            .caption(title, ("sans-serif", 24))
            .set_label_area_size(LabelAreaPosition::Left, 60)
            .set_label_area_size(LabelAreaPosition::Bottom, 48);
    }
    let mut chart = builder
        .build_cartesian_2d(0f64..bars.len() as f64, 0f64..y_max)
        .map_err(|e| anyhow!("{:?}", e))?;

    if with_text {
        let x_label_fmt = |x: &f64| {
            let idx = x.floor() as usize;
            bars.get(idx).map(|(l, _)| l.clone()).unwrap_or_default()
        };
        let y_label_fmt = |v: &f64| match axis {
            Axis::Count => ((*v).round() as i64).to_formatted_string(&Locale::en),
            Axis::Rating => format!("{v:.1}"),
        };
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(bars.len().min(12))
            .y_labels(8)
            .x_label_formatter(&x_label_fmt)
            .y_label_formatter(&y_label_fmt)
            .label_style(("sans-serif", 13))
            .draw()
            .map_err(|e| anyhow!("{:?}", e))?;
    }

    for (idx, (_, value)) in bars.iter().enumerate() {
        let color = Palette99::pick(idx).to_rgba();
        let x0 = idx as f64 + 0.15;
        let x1 = idx as f64 + 0.85;
        chart
            .draw_series(std::iter::once(Rectangle::new(
                [(x0, 0.0), (x1, *value)],
                color.filled(),
            )))
            .map_err(|e| anyhow!("{:?}", e))?;
    }

    root.present().map_err(|e| anyhow!("{:?}", e))?;
    Ok(())
}
