use crate::{CenterLine, InspectionPoint};

/// Every intermediate stage of one page run, for inspection and drawing.
#[derive(Debug, Clone, Default)]
pub struct PageTrace {
    /// Distinct candidate lines, one or more per word.
    pub candidates: Vec<CenterLine>,
    /// One line per text row, top to bottom.
    pub filtered: Vec<CenterLine>,
    /// Samples per filtered line, left to right.
    pub inspection_points: Vec<Vec<InspectionPoint>>,
    /// Text per filtered line.
    pub lines: Vec<String>,
    /// Indices of words that no inspection point matched.
    pub unmatched_words: Vec<usize>,
}
