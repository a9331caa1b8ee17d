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

use nontao_core::geo::{Extent, GeoPoint};
use nontao_model::{id::ZoneId, machine::Roster};
use plotters::prelude::*;
use tracing::{debug, instrument};

use crate::{
    colormap::{BLUE, GREEN, ORANGE, PURPLE, RED, ZONE_PALETTE},
    err::RenderError,
    style::{AXIS_FONT, FIGURE_SIZE, TITLE_FONT, X_LABEL, Y_LABEL, axis_ranges},
};

/// Share of the data span added on every side of the display plot.
const DISPLAY_PADDING: f64 = 0.1;

/// Fixed colours of the known zones.
const ZONE_COLORS: [(&str, RGBColor); 5] = [
    ("1A", RED),
    ("1B", BLUE),
    ("2A", GREEN),
    ("2B", ORANGE),
    ("2C", PURPLE),
];

/// Colour per zone, in order of first appearance in the roster. Known zones
/// keep their fixed colour; other zones cycle through the palette.
pub fn zone_colors(roster: &Roster) -> Vec<(ZoneId, RGBColor)> {
    let mut fallback = ZONE_PALETTE.iter().cycle();
    roster
        .zones()
        .into_iter()
        .map(|zone| {
            let fixed = ZONE_COLORS
                .iter()
                .find(|(name, _)| *name == zone.as_str())
                .map(|&(_, color)| color);
            let color = match fixed {
                Some(color) => color,
                None => *fallback.next().unwrap_or(&BLACK),
            };
            (zone.clone(), color)
        })
        .collect()
}

/// Plot bounds: the bounding box of `points` padded by 10 % per side.
pub fn display_extent<'a>(points: impl IntoIterator<Item = &'a GeoPoint>) -> Option<Extent> {
    Extent::of(points).map(|e| e.padded(DISPLAY_PADDING))
}

/// Scatter of the machines, coloured by zone.
#[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
pub fn render_display(roster: &Roster, path: impl AsRef<Path>) -> Result<(), RenderError> {
    let locations: Vec<GeoPoint> = roster.iter().map(|m| m.location()).collect();
    let extent = display_extent(&locations).ok_or(RenderError::NoPoints)?;
    let (x_range, y_range) = axis_ranges(&extent);

    let root = BitMapBackend::new(path.as_ref(), FIGURE_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Machines per zone", TITLE_FONT)
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

    for (zone, color) in zone_colors(roster) {
        let members: Vec<(f64, f64)> = roster
            .iter()
            .filter(|m| m.zone() == &zone)
            .map(|m| (m.longitude(), m.latitude()))
            .collect();
        chart
            .draw_series(
                members
                    .iter()
                    .map(|&p| Circle::new(p, 10, color.mix(0.7).filled())),
            )?
            .label(zone.to_string())
            .legend(move |(x, y)| Circle::new((x, y), 5, color.filled()));
        chart.draw_series(
            members
                .iter()
                .map(|&p| Circle::new(p, 10, BLACK.stroke_width(2))),
        )?;
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;
    root.present()?;

    debug!(machines = roster.len(), "Display rendered");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nontao_model::machine::Machine;
    use tempfile::TempDir;

    fn machine(zone: &str, id: &str, x: f64, y: f64) -> Machine {
        Machine::new(zone.into(), id.into(), GeoPoint::new(x, y))
    }

    fn colors_of(roster: &Roster) -> Vec<(String, RGBColor)> {
        zone_colors(roster)
            .into_iter()
            .map(|(z, c)| (z.to_string(), c))
            .collect()
    }

    #[test]
    fn known_zones_keep_their_colour_in_any_order() {
        let roster = Roster::new(vec![
            machine("2B", "a", 0.0, 0.0),
            machine("1A", "b", 1.0, 0.0),
            machine("2B", "c", 0.0, 1.0),
            machine("2C", "d", 0.0, 1.0),
            machine("1B", "e", 0.0, 1.0),
            machine("2A", "f", 0.0, 1.0),
        ])
        .unwrap();
        assert_eq!(
            colors_of(&roster),
            vec![
                ("2B".to_string(), ORANGE),
                ("1A".to_string(), RED),
                ("2C".to_string(), PURPLE),
                ("1B".to_string(), BLUE),
                ("2A".to_string(), GREEN),
            ]
        );
    }

    #[test]
    fn unknown_zones_cycle_the_palette() {
        let roster = Roster::new(vec![
            machine("3A", "a", 0.0, 0.0),
            machine("1B", "b", 1.0, 0.0),
            machine("3B", "c", 0.0, 1.0),
            machine("3C", "d", 0.0, 1.0),
            machine("3D", "e", 0.0, 1.0),
            machine("3E", "f", 0.0, 1.0),
            machine("3F", "g", 0.0, 1.0),
        ])
        .unwrap();
        assert_eq!(
            colors_of(&roster),
            vec![
                ("3A".to_string(), RED),
                ("1B".to_string(), BLUE),
                ("3B".to_string(), BLUE),
                ("3C".to_string(), GREEN),
                ("3D".to_string(), ORANGE),
                ("3E".to_string(), PURPLE),
                ("3F".to_string(), RED),
            ]
        );
    }

    #[test]
    fn display_pads_ten_percent() {
        let pts = [GeoPoint::new(0.0, 10.0), GeoPoint::new(10.0, 30.0)];
        let e = display_extent(&pts).unwrap();
        assert_eq!((e.min_x, e.max_x), (-1.0, 11.0));
        assert_eq!((e.min_y, e.max_y), (8.0, 32.0));
        assert!(display_extent(std::iter::empty::<&GeoPoint>()).is_none());
    }

    #[test]
    fn empty_roster_is_refused_before_drawing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("display.png");
        assert_eq!(
            render_display(&Roster::default(), &path),
            Err(RenderError::NoPoints)
        );
        assert!(!path.exists());
    }

    #[test]
    fn display_is_written_as_a_png() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("display.png");
        let roster = Roster::new(vec![
            machine("1A", "n1", 5.0, 51.0),
            machine("1A", "n2", 5.1, 51.1),
            machine("2B", "n3", 5.3, 51.2),
        ])
        .unwrap();
        render_display(&roster, &path).unwrap();
        let written = std::fs::metadata(&path).unwrap();
        assert!(written.is_file());
        assert!(written.len() > 0);
    }
}
