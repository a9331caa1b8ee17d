// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use std::path::Path;

use nontao_analysis::{knn::SpatialField, raster::Grid};
use nontao_core::time::TimeOfDay;
use plotters::prelude::*;
use tracing::{debug, instrument};

use crate::{
    colormap::ColorMap,
    err::RenderError,
    style::{AXIS_FONT, FIGURE_SIZE, TITLE_FONT, X_LABEL, Y_LABEL, axis_ranges},
};

const COLOR_BAR_WIDTH: u32 = 110;
const COLOR_BAR_STEPS: usize = 100;

pub fn wait_time_title(at: TimeOfDay) -> String {
    format!("Mean wait time (s) at {}", at)
}

pub fn free_probability_title(at: TimeOfDay) -> String {
    format!("Free probability at {}", at)
}

/// Flat-shaded mesh cells: the cell spanning `[xs[i], xs[i+1]] x
/// [ys[j], ys[j+1]]` takes `values[j][i]`, so the last row and column only
/// contribute their corners.
pub fn mesh_cells(grid: &Grid) -> impl Iterator<Item = ((f64, f64), (f64, f64), f64)> + '_ {
    let xs = grid.xs();
    let ys = grid.ys();
    ys.windows(2).enumerate().flat_map(move |(j, y)| {
        xs.windows(2).enumerate().map(move |(i, x)| {
            let v = grid.value_at(j, i).unwrap_or(f64::NAN);
            ((x[0], y[0]), (x[1], y[1]), v)
        })
    })
}

/// Scale shared by the mesh, the observation markers and the colour bar.
fn scale(field: &SpatialField) -> Result<(f64, f64), RenderError> {
    field.value_range().ok_or(RenderError::NoPoints)
}

/// Heatmap of `grid` with the observations of `field` drawn on top and a
/// colour bar on the right.
#[instrument(level = "info", skip_all, fields(title = title, path = %path.as_ref().display()))]
pub fn render_field(
    field: &SpatialField,
    grid: &Grid,
    colormap: &ColorMap,
    title: &str,
    path: impl AsRef<Path>,
) -> Result<(), RenderError> {
    let (lo, hi) = scale(field)?;
    let (x_range, y_range) = axis_ranges(&grid.extent());

    let root = BitMapBackend::new(path.as_ref(), FIGURE_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let (plot_area, bar_area) = root.split_horizontally((FIGURE_SIZE.0 - COLOR_BAR_WIDTH) as i32);

    let mut chart = ChartBuilder::on(&plot_area)
        .caption(title, TITLE_FONT)
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(70)
        .build_cartesian_2d(x_range, y_range)?;
    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc(X_LABEL)
        .y_desc(Y_LABEL)
        .label_style(AXIS_FONT)
        .draw()?;

    chart.draw_series(mesh_cells(grid).map(|(a, b, v)| {
        Rectangle::new([a, b], colormap.color_at(v, lo, hi).mix(0.5).filled())
    }))?;

    let markers: Vec<((f64, f64), f64)> = field
        .points()
        .iter()
        .zip(field.values())
        .map(|(p, &v)| ((p.x(), p.y()), v))
        .collect();
    chart.draw_series(
        markers
            .iter()
            .map(|&(p, v)| Circle::new(p, 10, colormap.color_at(v, lo, hi).mix(0.8).filled())),
    )?;
    chart.draw_series(
        markers
            .iter()
            .map(|&(p, _)| Circle::new(p, 10, BLACK.stroke_width(1))),
    )?;

    draw_color_bar(&bar_area, colormap, lo, hi)?;
    root.present()?;

    debug!(points = field.len(), cells = grid.resolution().pow(2), "Field rendered");
    Ok(())
}

fn draw_color_bar<DB>(
    area: &DrawingArea<DB, plotters::coord::Shift>,
    colormap: &ColorMap,
    lo: f64,
    hi: f64,
) -> Result<(), RenderError>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let span = if hi > lo { hi - lo } else { 1.0 };
    let top = lo + span;

    let mut bar = ChartBuilder::on(area)
        .margin_top(50)
        .margin_bottom(60)
        .margin_right(10)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..1.0, lo..top)?;
    bar.configure_mesh()
        .disable_mesh()
        .disable_x_axis()
        .y_labels(6)
        .label_style(AXIS_FONT)
        .draw()?;

    let step = span / COLOR_BAR_STEPS as f64;
    bar.draw_series((0..COLOR_BAR_STEPS).map(|i| {
        let y0 = lo + step * i as f64;
        let y1 = y0 + step;
        let mid = (y0 + y1) / 2.0;
        Rectangle::new([(0.0, y0), (1.0, y1)], colormap.color_at(mid, lo, hi).filled())
    }))?;
    Ok(())
}
