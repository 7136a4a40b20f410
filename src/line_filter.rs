//! Reduces candidate center lines to one line per text row.
//!
//! Slopes are compared after rounding to three decimals. Internally they are
//! kept as integer thousandths so the modal count is exact.

use std::collections::HashMap;

use tracing::instrument;

use crate::{CenterLine, LineError, ReaderOptions, Result};

fn slope_key(line: &CenterLine) -> i64 {
    (line.params().slope.abs() * 1000.0).round() as i64
}

/// The most frequent absolute rounded slope, i.e. the page skew.
///
/// Fails with [`LineError::NoDominantSkew`] when several slopes share the top
/// count, and when `lines` is empty.
pub fn modal_slope(lines: &[CenterLine]) -> Result<f64> {
    modal_key(lines).map(|key| key as f64 / 1000.0)
}

fn modal_key(lines: &[CenterLine]) -> Result<i64> {
    let mut counts = HashMap::<i64, usize>::new();
    for line in lines {
        *counts.entry(slope_key(line)).or_default() += 1;
    }
    let count = counts.values().copied().max().unwrap_or(0);
    let mut tied = counts
        .into_iter()
        .filter(|(_, n)| *n == count)
        .map(|(key, _)| key)
        .collect::<Vec<_>>();
    if tied.len() == 1 {
        return Ok(tied[0]);
    }
    tied.sort_unstable();
    Err(LineError::NoDominantSkew {
        tied: tied.into_iter().map(|key| key as f64 / 1000.0).collect(),
        count,
    })
}

/// Keeps lines whose absolute rounded slope is within `slope_filter` of the
/// modal slope. Order is preserved.
#[instrument(level = "debug", skip(lines), fields(lines = lines.len()))]
pub fn filter_by_slope(lines: &[CenterLine], slope_filter: f64) -> Result<Vec<CenterLine>> {
    if lines.is_empty() {
        return Ok(Vec::new());
    }
    let mode = modal_key(lines)?;
    let kept = lines
        .iter()
        .filter(|line| (slope_key(line) - mode).abs() as f64 / 1000.0 <= slope_filter)
        .copied()
        .collect::<Vec<_>>();
    log::debug!(
        "Modal slope {}, kept {} of {} lines",
        mode as f64 / 1000.0,
        kept.len(),
        lines.len()
    );
    Ok(kept)
}

/// Sorts lines by y-intercept and collapses runs whose neighbours are at most
/// `y_filter` pixels apart. Within a run, the member bordering the next gap
/// survives. The last line is always kept.
#[instrument(level = "debug", skip(lines), fields(lines = lines.len()))]
pub fn merge_close_lines(mut lines: Vec<CenterLine>, y_filter: i32) -> Vec<CenterLine> {
    lines.sort_by_key(|line| (line.start.y, line.end.y));
    let mut merged = lines
        .windows(2)
        .filter(|pair| intercept_gap(&pair[0], &pair[1]) > i64::from(y_filter))
        .map(|pair| pair[0])
        .collect::<Vec<_>>();
    merged.extend(lines.last().copied());
    log::debug!("{} lines after merging close rows", merged.len());
    merged
}

fn intercept_gap(a: &CenterLine, b: &CenterLine) -> i64 {
    (i64::from(a.y_intercept()) - i64::from(b.y_intercept())).abs()
}

/// Slope filter followed by proximity merge, ordered top to bottom.
pub fn filter_center_lines(
    lines: &[CenterLine],
    options: &ReaderOptions,
) -> Result<Vec<CenterLine>> {
    let good_slope = filter_by_slope(lines, options.slope_filter)?;
    Ok(merge_close_lines(good_slope, options.y_filter))
}
