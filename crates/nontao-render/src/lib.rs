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

//! # Nontao Render (`nontao-render`)
//!
//! PNG output: the machine display coloured by zone and the interpolated
//! field heatmaps with their observation points and colour bar.

pub mod colormap;
pub mod display;
pub mod err;
pub mod field;
mod style;

pub mod prelude {
    pub use crate::colormap::{ColorMap, ZONE_PALETTE};
    pub use crate::display::{display_extent, render_display, zone_colors};
    pub use crate::err::RenderError;
    pub use crate::field::{free_probability_title, mesh_cells, render_field, wait_time_title};
}

/// Default plot file names, relative to the plot directory.
pub mod files {
    pub const DISPLAY: &str = "nontao_display.png";
    pub const WAIT_TIME: &str = "nontao_wait_time.png";
    pub const FREE_PROBABILITY: &str = "nontao_free_prob.png";
}
