use geo::Coord;
use itertools::Itertools;
use tracing::instrument;

use crate::geometry::{fit_line, LineParams, Vertex};
use crate::WordBox;

/// A straight line sampled at `x = 0` and `x = page width`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CenterLine {
    pub start: Vertex,
    pub end: Vertex,
}

impl CenterLine {
    /// Extends the line through `left` and `right` across a page `width` wide.
    /// Endpoint y values are truncated toward zero.
    pub fn across(left: Vertex, right: Vertex, width: u32) -> Self {
        let params = fit_line(left, right);
        let width = i32::try_from(width).unwrap_or(i32::MAX);
        Self {
            start: Coord {
                x: 0,
                y: params.y_at(0.0) as i32,
            },
            end: Coord {
                x: width,
                y: params.y_at(width as f64) as i32,
            },
        }
    }

    pub fn params(&self) -> LineParams {
        fit_line(self.start, self.end)
    }

    /// y at `x = 0`.
    pub fn y_intercept(&self) -> i32 {
        self.start.y
    }
}

/// One candidate line per word, through the midpoints of its left and right
/// edges, with exact duplicates removed.
#[instrument(level = "debug", skip(words), fields(words = words.len()))]
pub fn center_lines(words: &[WordBox], width: u32) -> Vec<CenterLine> {
    let candidates = words
        .iter()
        .map(|word| {
            CenterLine::across(
                word.quad.left_midpoint(),
                word.quad.right_midpoint(),
                width,
            )
        })
        .collect::<Vec<_>>();
    let unique = dedup_lines(candidates);
    log::debug!(
        "{} words produced {} distinct center lines",
        words.len(),
        unique.len()
    );
    unique
}

/// Drops exact duplicates, keeping the first occurrence of each line.
pub fn dedup_lines(lines: impl IntoIterator<Item = CenterLine>) -> Vec<CenterLine> {
    lines.into_iter().unique().collect()
}
