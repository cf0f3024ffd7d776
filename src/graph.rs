use anyhow::{Context, Result};
use image::ImageEncoder;
use plotters::coord::ranged1d::{IntoSegmentedCoord, SegmentValue};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::f64::consts::PI;

use crate::palette::{Hsl, Rgba};
use crate::scale;
use crate::series::{Series, SeriesData};
use crate::value::CellValue;

const CAPTION_FONT: (&str, u32) = ("sans-serif", 20);
const LABEL_FONT: (&str, u32) = ("sans-serif", 14);

/// Draw `series` into a PNG image of the given size.
pub fn render_png(series: &Series, width: u32, height: u32) -> Result<Vec<u8>> {
    let len = rgb_buffer_len(width, height)
        .with_context(|| format!("Image size {}x{} is too large", width, height))?;
    let mut buffer = vec![0u8; len];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        draw_series(&root, series)?;
        root.present().context("Failed to present drawing")?;
    }

    let mut png_bytes = Vec::new();
    image::codecs::png::PngEncoder::new(&mut png_bytes)
        .write_image(&buffer, width, height, image::ColorType::Rgb8)
        .context("Failed to encode PNG")?;
    Ok(png_bytes)
}

/// Bytes needed for an RGB bitmap, or `None` if the size overflows.
fn rgb_buffer_len(width: u32, height: u32) -> Option<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|pixels| pixels.checked_mul(3))
}

/// Draw `series` into an SVG document of the given size.
pub fn render_svg(series: &Series, width: u32, height: u32) -> Result<Vec<u8>> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (width, height)).into_drawing_area();
        draw_series(&root, series)?;
        root.present().context("Failed to present drawing")?;
    }
    Ok(svg.into_bytes())
}

/// Draw a series onto a fresh drawing area.
pub fn draw_series<DB>(root: &DrawingArea<DB, Shift>, series: &Series) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE).context("Failed to fill background")?;

    match &series.data {
        SeriesData::Categorical { labels, values } => {
            let labels: Vec<String> = labels.iter().map(CellValue::to_string).collect();
            let values: Vec<Option<f64>> = values.iter().map(CellValue::as_f64).collect();
            if series.kind == crate::chart::ChartKind::Line {
                draw_line(root, series, &labels, &values)
            } else {
                draw_bars(root, series, &labels, &values)
            }
        }
        SeriesData::Histogram { labels, counts, .. } => {
            let values: Vec<Option<f64>> = counts.iter().map(|&c| Some(c as f64)).collect();
            draw_bars(root, series, labels, &values)
        }
        SeriesData::Scatter { .. } => draw_scatter(root, series),
        SeriesData::Pie {
            labels,
            values,
            colors,
        } => draw_pie(root, series, labels, values, colors),
    }
}

fn series_color(series: &Series) -> RGBAColor {
    series
        .color
        .unwrap_or(Rgba::new(54, 162, 235, 1.0))
        .to_plotters()
}

/// Bars on a categorical axis; missing values leave a gap.
fn draw_bars<DB>(
    root: &DrawingArea<DB, Shift>,
    series: &Series,
    labels: &[String],
    values: &[Option<f64>],
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let n = labels.len();
    let mut chart = ChartBuilder::on(root)
        .margin(10)
        .caption(&series.title, CAPTION_FONT)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d((0..n).into_segmented(), scale::value_range(series))
        .context("Failed to build chart")?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(n.min(20))
        .x_label_formatter(&|x| segment_label(labels, x))
        .x_desc(series.x_title.as_deref().unwrap_or(""))
        .y_desc(series.y_title.as_deref().unwrap_or(""))
        .draw()
        .context("Failed to draw mesh")?;

    let color = series_color(series);
    chart
        .draw_series(values.iter().enumerate().filter_map(|(i, v)| {
            v.map(|y| {
                let mut bar = Rectangle::new(
                    [(SegmentValue::Exact(i), 0.0), (SegmentValue::Exact(i + 1), y)],
                    color.filled(),
                );
                bar.set_margin(0, 0, 4, 4);
                bar
            })
        }))
        .context("Failed to draw bars")?
        .label(series.dataset_label.as_str())
        .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));

    draw_legend(&mut chart)
}

/// Connected points on a categorical axis; missing values break the line.
fn draw_line<DB>(
    root: &DrawingArea<DB, Shift>,
    series: &Series,
    labels: &[String],
    values: &[Option<f64>],
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let n = labels.len();
    let mut chart = ChartBuilder::on(root)
        .margin(10)
        .caption(&series.title, CAPTION_FONT)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d((0..n).into_segmented(), scale::value_range(series))
        .context("Failed to build chart")?;

    chart
        .configure_mesh()
        .x_labels(n.min(20))
        .x_label_formatter(&|x| segment_label(labels, x))
        .x_desc(series.x_title.as_deref().unwrap_or(""))
        .y_desc(series.y_title.as_deref().unwrap_or(""))
        .draw()
        .context("Failed to draw mesh")?;

    let color = series_color(series);
    for run in contiguous_runs(values) {
        chart
            .draw_series(LineSeries::new(
                run.iter().map(|&(i, y)| (SegmentValue::CenterOf(i), y)),
                color.stroke_width(2),
            ))
            .context("Failed to draw line series")?;
    }

    chart
        .draw_series(values.iter().enumerate().filter_map(|(i, v)| {
            v.map(|y| Circle::new((SegmentValue::CenterOf(i), y), 3, color.filled()))
        }))
        .context("Failed to draw points")?
        .label(series.dataset_label.as_str())
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));

    draw_legend(&mut chart)
}

fn draw_scatter<DB>(root: &DrawingArea<DB, Shift>, series: &Series) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let SeriesData::Scatter { points } = &series.data else {
        anyhow::bail!("Scatter chart needs point data");
    };
    let numeric: Vec<(f64, f64)> = points
        .iter()
        .filter_map(|p| Some((p.x.as_f64()?, p.y.as_f64()?)))
        .collect();
    if numeric.is_empty() {
        anyhow::bail!("Scatter chart needs numeric x and y values");
    }

    let mut chart = ChartBuilder::on(root)
        .margin(10)
        .caption(&series.title, CAPTION_FONT)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(scale::scatter_x_range(series), scale::value_range(series))
        .context("Failed to build chart")?;

    chart
        .configure_mesh()
        .x_desc(series.x_title.as_deref().unwrap_or(""))
        .y_desc(series.y_title.as_deref().unwrap_or(""))
        .draw()
        .context("Failed to draw mesh")?;

    let color = series_color(series);
    chart
        .draw_series(numeric.iter().map(|&(x, y)| Circle::new((x, y), 5, color.filled())))
        .context("Failed to draw point series")?
        .label(series.dataset_label.as_str())
        .legend(move |(x, y)| Circle::new((x + 5, y), 4, color.filled()));

    draw_legend(&mut chart)
}

fn draw_pie<DB>(
    root: &DrawingArea<DB, Shift>,
    series: &Series,
    labels: &[CellValue],
    values: &[CellValue],
    colors: &[Hsl],
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let sizes: Vec<f64> = values
        .iter()
        .map(|v| v.as_f64().filter(|n| *n > 0.0).unwrap_or(0.0))
        .collect();
    let total: f64 = sizes.iter().sum();
    if total <= 0.0 {
        anyhow::bail!("Pie chart needs at least one positive value");
    }

    let titled = root
        .titled(&series.title, CAPTION_FONT)
        .context("Failed to draw title")?;
    let (width, _) = titled.dim_in_pixel();
    let legend_width = (width / 4).max(120).min(width / 2);
    let (plot_area, legend_area) = titled.split_horizontally((width - legend_width) as i32);

    let (pw, ph) = plot_area.dim_in_pixel();
    let center = (pw as i32 / 2, ph as i32 / 2);
    let radius = (pw.min(ph) as f64 / 2.0 - 10.0).max(10.0);

    // Slices run clockwise from twelve o'clock.
    let mut angle = -PI / 2.0;
    for (size, hsl) in sizes.iter().zip(colors) {
        if *size <= 0.0 {
            continue;
        }
        let sweep = size / total * 2.0 * PI;
        let wedge = wedge_points(center, radius, angle, angle + sweep);
        let fill = hsl.to_plotters();
        plot_area
            .draw(&Polygon::new(wedge.clone(), fill.filled()))
            .context("Failed to draw pie slice")?;
        plot_area
            .draw(&PathElement::new(
                wedge.into_iter().chain(std::iter::once(center)).collect::<Vec<_>>(),
                WHITE.stroke_width(1),
            ))
            .context("Failed to draw slice border")?;
        angle += sweep;
    }

    let (_, lh) = legend_area.dim_in_pixel();
    let row_height = 20;
    let top = ((lh as i32) - row_height * labels.len() as i32).max(0) / 2;
    for (i, (label, hsl)) in labels.iter().zip(colors).enumerate() {
        let y = top + i as i32 * row_height;
        legend_area
            .draw(&Rectangle::new([(5, y + 3), (19, y + 15)], hsl.to_plotters().filled()))
            .context("Failed to draw legend")?;
        legend_area
            .draw(&Text::new(label.to_string(), (25, y + 2), LABEL_FONT.into_font()))
            .context("Failed to draw legend")?;
    }
    Ok(())
}

/// Outline of a pie wedge in pixel coordinates, starting and ending at the centre.
fn wedge_points(center: (i32, i32), radius: f64, start: f64, end: f64) -> Vec<(i32, i32)> {
    let steps = (((end - start) / (2.0 * PI)) * 180.0).ceil().max(2.0) as usize;
    let mut points = Vec::with_capacity(steps + 2);
    points.push(center);
    for k in 0..=steps {
        let theta = start + (end - start) * k as f64 / steps as f64;
        points.push((
            center.0 + (radius * theta.cos()).round() as i32,
            center.1 + (radius * theta.sin()).round() as i32,
        ));
    }
    points
}

/// Split a value column into runs of consecutive present values.
fn contiguous_runs(values: &[Option<f64>]) -> Vec<Vec<(usize, f64)>> {
    let mut runs = Vec::new();
    let mut current = Vec::new();
    for (i, v) in values.iter().enumerate() {
        match v {
            Some(y) => current.push((i, *y)),
            None if !current.is_empty() => runs.push(std::mem::take(&mut current)),
            None => {}
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

fn segment_label(labels: &[String], value: &SegmentValue<usize>) -> String {
    match value {
        SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => {
            labels.get(*i).cloned().unwrap_or_default()
        }
        SegmentValue::Last => String::new(),
    }
}

fn draw_legend<'a, DB, X, Y>(chart: &mut ChartContext<'a, DB, Cartesian2d<X, Y>>) -> Result<()>
where
    DB: DrawingBackend + 'a,
    DB::ErrorType: 'static,
    X: Ranged,
    Y: Ranged,
{
    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .position(SeriesLabelPosition::UpperRight)
        .draw()
        .context("Failed to draw legend")
}
