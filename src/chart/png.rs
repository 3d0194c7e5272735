//! Rasterize charts to PNG images

use crate::chart::{coolwarm, Chart, Heatmap, Histogram, LineChart};
use crate::core::error::Result;
use image::{Rgb, RgbImage};
use std::path::Path;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const AXIS: Rgb<u8> = Rgb([40, 40, 40]);
const SERIES: Rgb<u8> = Rgb([31, 119, 180]);
const MARGIN: u32 = 32;

/// Draw a chart into an in-memory image
pub fn rasterize(chart: &Chart, width: u32, height: u32) -> RgbImage {
    let mut img = RgbImage::from_pixel(width, height, BACKGROUND);
    match chart {
        Chart::Line(line) => draw_line(&mut img, line),
        Chart::Histogram(hist) => draw_histogram(&mut img, hist),
        Chart::Heatmap(heatmap) => draw_heatmap(&mut img, heatmap),
    }
    img
}

/// Draw a chart and write it to `path` as PNG
pub fn export(chart: &Chart, path: &Path, width: u32, height: u32) -> Result<()> {
    rasterize(chart, width, height).save(path)?;
    tracing::info!(path = %path.display(), kind = chart.kind(), "exported chart");
    Ok(())
}

/// Plot area inside the margins: (left, top, right, bottom)
fn plot_area(img: &RgbImage) -> (u32, u32, u32, u32) {
    let (w, h) = img.dimensions();
    (MARGIN, MARGIN / 2, w - MARGIN / 2, h - MARGIN)
}

fn draw_axes(img: &mut RgbImage) {
    let (left, top, right, bottom) = plot_area(img);
    draw_segment(img, (left as i64, bottom as i64), (right as i64, bottom as i64), AXIS);
    draw_segment(img, (left as i64, top as i64), (left as i64, bottom as i64), AXIS);
}

fn draw_line(img: &mut RgbImage, line: &LineChart) {
    draw_axes(img);
    let (left, top, right, bottom) = plot_area(img);
    let points: Vec<(f64, f64)> = line
        .points
        .iter()
        .copied()
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .collect();
    let (x_min, x_max) = bounds(points.iter().map(|p| p.0));
    let (y_min, y_max) = bounds(points.iter().map(|p| p.1));

    let (max_x, max_y) = (img.width() as i64 - 1, img.height() as i64 - 1);
    let to_px = |(x, y): (f64, f64)| -> (i64, i64) {
        let px = left as f64 + (x - x_min) / (x_max - x_min) * (right - left) as f64;
        let py = bottom as f64 - (y - y_min) / (y_max - y_min) * (bottom - top) as f64;
        (
            (px.round() as i64).clamp(0, max_x),
            (py.round() as i64).clamp(0, max_y),
        )
    };

    for pair in points.windows(2) {
        draw_segment(img, to_px(pair[0]), to_px(pair[1]), SERIES);
    }
    if let [only] = points.as_slice() {
        let (x, y) = to_px(*only);
        put(img, x, y, SERIES);
    }
}

fn draw_histogram(img: &mut RgbImage, hist: &Histogram) {
    draw_axes(img);
    let (left, top, right, bottom) = plot_area(img);
    let peak = hist.counts.iter().copied().max().unwrap_or(0).max(1);
    let bins = hist.counts.len().max(1) as u32;
    let bar_width = ((right - left) / bins).max(1);

    for (i, &count) in hist.counts.iter().enumerate() {
        let height = (count as f64 / peak as f64 * (bottom - top) as f64).round() as u32;
        let x0 = left + 1 + i as u32 * bar_width;
        // one-pixel gap between bars
        for x in x0..(x0 + bar_width.saturating_sub(1)).min(right) {
            for y in (bottom - height)..bottom {
                img.put_pixel(x, y, SERIES);
            }
        }
    }
}

fn draw_heatmap(img: &mut RgbImage, heatmap: &Heatmap) {
    let (left, top, right, bottom) = plot_area(img);
    let n = heatmap.matrix.labels.len().max(1) as u32;
    let cell_w = ((right - left) / n).max(1);
    let cell_h = ((bottom - top) / n).max(1);

    for (i, row) in heatmap.matrix.values.iter().enumerate() {
        for (j, &value) in row.iter().enumerate() {
            let (r, g, b) = coolwarm(value);
            let x0 = left + j as u32 * cell_w;
            let y0 = top + i as u32 * cell_h;
            for x in x0..(x0 + cell_w).min(img.width()) {
                for y in y0..(y0 + cell_h).min(img.height()) {
                    img.put_pixel(x, y, Rgb([r, g, b]));
                }
            }
        }
    }
}

/// Min and max of the finite values, widened when they coincide
fn bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (lo, hi) = values.filter(|v| v.is_finite()).fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !lo.is_finite() || !hi.is_finite() {
        (0.0, 1.0)
    } else if lo == hi {
        (lo - 0.5, hi + 0.5)
    } else {
        (lo, hi)
    }
}

fn put(img: &mut RgbImage, x: i64, y: i64, color: Rgb<u8>) {
    if x >= 0 && y >= 0 && (x as u32) < img.width() && (y as u32) < img.height() {
        img.put_pixel(x as u32, y as u32, color);
    }
}

/// Bresenham line between two pixel positions
fn draw_segment(img: &mut RgbImage, from: (i64, i64), to: (i64, i64), color: Rgb<u8>) {
    let (mut x, mut y) = from;
    let dx = (to.0 - x).abs();
    let dy = -(to.1 - y).abs();
    let sx = if x < to.0 { 1 } else { -1 };
    let sy = if y < to.1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        put(img, x, y, color);
        if (x, y) == to {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::test_support::people;

    #[test]
    fn test_rasterize_dimensions() {
        let hist = Histogram::from_column(&people(), "age", 20).unwrap();
        let img = rasterize(&Chart::Histogram(hist), 320, 200);
        assert_eq!(img.dimensions(), (320, 200));
    }

    #[test]
    fn test_line_draws_series_pixels() {
        let line = LineChart::from_columns(&people(), "age", "score").unwrap();
        let img = rasterize(&Chart::Line(line), 200, 150);
        assert!(img.pixels().any(|p| *p == SERIES));
    }

    #[test]
    fn test_line_with_infinite_value_skips_it() {
        let line = LineChart {
            x_label: "x".into(),
            y_label: "y".into(),
            points: vec![(1.0, 2.0), (2.0, f64::INFINITY), (3.0, 4.0), (f64::NEG_INFINITY, 1.0)],
            categories: None,
        };
        let img = rasterize(&Chart::Line(line), 640, 480);
        assert_eq!(img.dimensions(), (640, 480));
        assert!(img.pixels().any(|p| *p == SERIES));
    }

    #[test]
    fn test_bounds_ignore_non_finite() {
        assert_eq!(bounds([1.0, f64::INFINITY, 3.0, f64::NAN].into_iter()), (1.0, 3.0));
        assert_eq!(bounds([f64::INFINITY].into_iter()), (0.0, 1.0));
    }

    #[test]
    fn test_heatmap_diagonal_is_warm() {
        let heatmap = Heatmap::correlation(&people(), 2).unwrap();
        let img = rasterize(&Chart::Heatmap(heatmap), 200, 200);
        let (left, top, _, _) = plot_area(&img);
        let (r, g, b) = coolwarm(1.0);
        assert_eq!(*img.get_pixel(left + 1, top + 1), Rgb([r, g, b]));
    }

    #[test]
    fn test_export_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hist.png");
        let hist = Histogram::from_column(&people(), "score", 5).unwrap();
        export(&Chart::Histogram(hist), &path, 128, 96).unwrap();
        assert!(path.exists());
    }
}
