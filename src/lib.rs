mod assembler;
pub mod center_lines;
mod error;
pub mod geometry;
pub mod inspection;
pub mod line_filter;
mod page;
mod result;
pub mod vision;

pub use assembler::{assemble_lines, WordPool};
pub use center_lines::CenterLine;
pub use error::{LineError, Result};
pub use inspection::InspectionPoint;
pub use page::*;
pub use result::*;

use serde::Deserialize;
use tracing::instrument;

/// Tuning knobs of the line reconstruction.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ReaderOptions {
    /// Largest accepted difference between a line's slope and the page skew.
    pub slope_filter: f64,
    /// Rows whose y-intercepts are at most this many pixels apart are merged.
    pub y_filter: i32,
    /// Samples taken along each line; more samples catch narrower words.
    pub points_per_line: usize,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            slope_filter: 0.01,
            y_filter: 10,
            points_per_line: 100,
        }
    }
}

impl ReaderOptions {
    pub fn validate(&self) -> Result<()> {
        if !self.slope_filter.is_finite() || self.slope_filter < 0.0 {
            return Err(LineError::InvalidOptions(format!(
                "slope_filter must be a non-negative number, got {}",
                self.slope_filter
            )));
        }
        if self.y_filter < 0 {
            return Err(LineError::InvalidOptions(format!(
                "y_filter must not be negative, got {}",
                self.y_filter
            )));
        }
        if self.points_per_line == 0 {
            return Err(LineError::InvalidOptions(
                "points_per_line must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

pub struct LineReaderBuilder {
    options: ReaderOptions,
}

impl LineReaderBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn options(mut self, options: ReaderOptions) -> Self {
        self.options = options;
        self
    }

    pub fn slope_filter(mut self, slope_filter: f64) -> Self {
        self.options.slope_filter = slope_filter;
        self
    }

    pub fn y_filter(mut self, y_filter: i32) -> Self {
        self.options.y_filter = y_filter;
        self
    }

    pub fn points_per_line(mut self, points_per_line: usize) -> Self {
        self.options.points_per_line = points_per_line;
        self
    }

    #[instrument(skip(self))]
    pub fn build(self) -> Result<LineReader> {
        self.options.validate()?;
        Ok(LineReader {
            options: self.options,
        })
    }
}

impl Default for LineReaderBuilder {
    fn default() -> Self {
        Self {
            options: ReaderOptions::default(),
        }
    }
}

/// Rebuilds the reading order of an OCR'd page as text lines.
#[derive(Debug, Clone)]
pub struct LineReader {
    options: ReaderOptions,
}

impl LineReader {
    /// Text of each reconstructed line, top to bottom.
    pub fn read_page(&self, page: &Page) -> Result<Vec<String>> {
        Ok(self.trace_page(page)?.lines)
    }

    /// Runs the pipeline and keeps every intermediate stage.
    ///
    /// Every filtered line yields a string, so a page with words but no
    /// blocks reads as one empty string per row. Fails only when the
    /// candidate slopes have no dominant value.
    #[instrument(skip(self, page), fields(words = page.words.len(), blocks = page.blocks.len()))]
    pub fn trace_page(&self, page: &Page) -> Result<PageTrace> {
        let width = page.size.width;
        let candidates = center_lines::center_lines(&page.words, width);
        let filtered = line_filter::filter_center_lines(&candidates, &self.options)?;
        let inspection_points = inspection::inspection_points(
            &filtered,
            &page.blocks,
            width,
            self.options.points_per_line,
        );

        let mut pool = WordPool::new(&page.words);
        let lines = assemble_lines(&inspection_points, &mut pool);
        let unmatched_words = pool.untaken().collect::<Vec<_>>();
        log::debug!(
            "Read {} lines, {} of {} words unmatched",
            lines.len(),
            unmatched_words.len(),
            page.words.len()
        );

        Ok(PageTrace {
            candidates,
            filtered,
            inspection_points,
            lines,
            unmatched_words,
        })
    }
}
