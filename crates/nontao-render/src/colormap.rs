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

use plotters::style::RGBColor;

pub const DARK_GREEN: RGBColor = RGBColor(0, 100, 0);
pub const GREEN: RGBColor = RGBColor(0, 128, 0);
pub const ORANGE: RGBColor = RGBColor(255, 165, 0);
pub const RED: RGBColor = RGBColor(255, 0, 0);
pub const DARK_RED: RGBColor = RGBColor(139, 0, 0);
pub const BLUE: RGBColor = RGBColor(0, 0, 255);
pub const PURPLE: RGBColor = RGBColor(128, 0, 128);

/// Fallback colours for zones without a fixed colour, cycled.
pub const ZONE_PALETTE: [RGBColor; 5] = [RED, BLUE, GREEN, ORANGE, PURPLE];

const BLUES: [RGBColor; 9] = [
    RGBColor(0xf7, 0xfb, 0xff),
    RGBColor(0xde, 0xeb, 0xf7),
    RGBColor(0xc6, 0xdb, 0xef),
    RGBColor(0x9e, 0xca, 0xe1),
    RGBColor(0x6b, 0xae, 0xd6),
    RGBColor(0x42, 0x92, 0xc6),
    RGBColor(0x21, 0x71, 0xb5),
    RGBColor(0x08, 0x51, 0x9c),
    RGBColor(0x08, 0x30, 0x6b),
];

/// Maps a scalar in `[min, max]` to a colour.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorMap {
    /// Equal-width bins, one colour per bin.
    Listed(Vec<RGBColor>),
    /// Linear interpolation between equally spaced stops.
    Gradient(Vec<RGBColor>),
}

impl ColorMap {
    /// Dark green through dark red, in five bins.
    pub fn wait_time() -> Self {
        ColorMap::Listed(vec![DARK_GREEN, GREEN, ORANGE, RED, DARK_RED])
    }

    /// White to dark blue.
    pub fn blues() -> Self {
        ColorMap::Gradient(BLUES.to_vec())
    }

    fn colors(&self) -> &[RGBColor] {
        match self {
            ColorMap::Listed(c) | ColorMap::Gradient(c) => c,
        }
    }

    /// Colour of `value` on a scale from `min` to `max`.
    ///
    /// Values outside the scale are clamped; a degenerate scale or a NaN
    /// value maps to the low end.
    pub fn color_at(&self, value: f64, min: f64, max: f64) -> RGBColor {
        let colors = self.colors();
        let Some(&first) = colors.first() else {
            return RGBColor(0, 0, 0);
        };
        let t = if max > min && !value.is_nan() {
            ((value - min) / (max - min)).clamp(0.0, 1.0)
        } else {
            0.0
        };

        match self {
            ColorMap::Listed(_) => {
                let bin = ((t * colors.len() as f64) as usize).min(colors.len() - 1);
                colors[bin]
            }
            ColorMap::Gradient(_) => {
                if colors.len() == 1 {
                    return first;
                }
                let pos = t * (colors.len() - 1) as f64;
                let lo = (pos.floor() as usize).min(colors.len() - 2);
                let frac = pos - lo as f64;
                lerp(colors[lo], colors[lo + 1], frac)
            }
        }
    }
}

fn lerp(a: RGBColor, b: RGBColor, t: f64) -> RGBColor {
    let mix = |x: u8, y: u8| (f64::from(x) + (f64::from(y) - f64::from(x)) * t).round() as u8;
    RGBColor(mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listed_map_uses_equal_bins() {
        let map = ColorMap::wait_time();
        assert_eq!(map.color_at(0.0, 0.0, 100.0), DARK_GREEN);
        assert_eq!(map.color_at(19.9, 0.0, 100.0), DARK_GREEN);
        assert_eq!(map.color_at(20.0, 0.0, 100.0), GREEN);
        assert_eq!(map.color_at(50.0, 0.0, 100.0), ORANGE);
        assert_eq!(map.color_at(100.0, 0.0, 100.0), DARK_RED);
        assert_eq!(map.color_at(500.0, 0.0, 100.0), DARK_RED);
        assert_eq!(map.color_at(-5.0, 0.0, 100.0), DARK_GREEN);
    }

    #[test]
    fn gradient_hits_its_stops_and_blends_between() {
        let map = ColorMap::blues();
        assert_eq!(map.color_at(0.0, 0.0, 1.0), BLUES[0]);
        assert_eq!(map.color_at(1.0, 0.0, 1.0), BLUES[8]);
        assert_eq!(map.color_at(0.5, 0.0, 1.0), BLUES[4]);
        let between = ColorMap::Gradient(vec![RGBColor(0, 0, 0), RGBColor(200, 100, 50)]);
        assert_eq!(between.color_at(0.5, 0.0, 1.0), RGBColor(100, 50, 25));
    }

    #[test]
    fn degenerate_scales_map_to_the_low_end() {
        let map = ColorMap::blues();
        assert_eq!(map.color_at(3.0, 3.0, 3.0), BLUES[0]);
        assert_eq!(map.color_at(f64::NAN, 0.0, 1.0), BLUES[0]);
        assert_eq!(ColorMap::Listed(vec![]).color_at(0.5, 0.0, 1.0), RGBColor(0, 0, 0));
    }
}
