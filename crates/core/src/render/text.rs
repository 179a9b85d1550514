//! Headless character-cell surface
//!
//! Each grid point becomes two characters: a shade for its contour band and
//! an arrow for its unit direction. Rows run from +y (top) to -y (bottom).

use super::{arrow_glyph, FieldFrame, RenderSurface};
use crate::core_types::{Axis, ChargeId};
use std::convert::Infallible;

const SHADES: [char; 6] = [' ', '·', '░', '▒', '▓', '█'];

/// Renders frames into lines of text
#[derive(Debug, Default)]
pub struct TextSurface {
    lines: Vec<String>,
    frames_presented: usize,
    last_frame: Option<FieldFrame>,
}

impl TextSurface {
    /// An empty surface with no frames presented
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines produced by the most recent `present`
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The most recent rendering joined with newlines
    #[must_use]
    pub fn render_string(&self) -> String {
        self.lines.join("\n")
    }

    /// Number of frames drawn so far
    #[must_use]
    pub fn frames_presented(&self) -> usize {
        self.frames_presented
    }

    /// The frame behind `lines`
    #[must_use]
    pub fn last_frame(&self) -> Option<&FieldFrame> {
        self.last_frame.as_ref()
    }

    fn shade(fraction: f32) -> char {
        let i = (fraction * (SHADES.len() - 1) as f32).round() as usize;
        SHADES[i.min(SHADES.len() - 1)]
    }
}

impl RenderSurface for TextSurface {
    type Error = Infallible;

    fn present(&mut self, frame: &FieldFrame) -> Result<(), Infallible> {
        let grid = frame.grid();
        let (width, height) = (grid.width(), grid.height());
        let marker_cells = frame.markers().map(|m| (frame.marker_cell(&m), m.symbol()));

        self.lines.clear();
        self.lines.push("Electric field of a dipole".to_string());

        for row in (0..height).rev() {
            let y = grid.ys().get(0, row);
            let mut line = format!("{y:5.1} │ ");
            for col in 0..width {
                let marker = marker_cells.iter().find(|(cell, _)| *cell == (col, row));
                if let Some((_, symbol)) = marker {
                    line.push(' ');
                    line.push(*symbol);
                    continue;
                }
                line.push(Self::shade(frame.contour_fraction(col, row)));
                line.push(arrow_glyph(frame.directions().at(col, row)));
            }
            self.lines.push(line);
        }

        let (lo_corner, hi_corner) = grid.bounds();
        let (x_min, x_max) = (lo_corner.x, hi_corner.x);
        self.lines.push(format!("      └{}", "─".repeat(width * 2 + 1)));
        self.lines.push(format!(
            "        x: {x_min:.1} .. {x_max:.1}    shade: {}",
            SHADES.iter().collect::<String>()
        ));

        let (lo, hi) = frame.magnitude_range();
        self.lines.push(format!("|E| range: {lo:.3e} .. {hi:.3e}"));

        let labels = frame.labels();
        for id in ChargeId::ALL {
            let charge = frame.marker(id);
            self.lines.push(format!(
                "q{} ({}) at ({}, {})",
                id.subscript(),
                charge.symbol(),
                labels.coordinate(id, Axis::X),
                labels.coordinate(id, Axis::Y),
            ));
        }
        self.lines.push(labels.separation.clone());
        self.lines.extend(labels.charges.lines().map(str::to_string));
        self.lines.push(labels.constant.clone());

        self.frames_presented += 1;
        self.last_frame = Some(frame.clone());
        Ok(())
    }
}
