use geo::Coord;
use tracing::instrument;

use crate::{InspectionPoint, WordBox};

/// The page's words, each of which can be taken at most once.
///
/// Taken words are marked rather than removed so indices stay stable while
/// the pool is scanned.
#[derive(Debug)]
pub struct WordPool<'a> {
    words: &'a [WordBox],
    taken: Vec<bool>,
    remaining: usize,
}

impl<'a> WordPool<'a> {
    pub fn new(words: &'a [WordBox]) -> Self {
        Self {
            words,
            taken: vec![false; words.len()],
            remaining: words.len(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.remaining
    }

    /// Takes the first untaken word, in page order, whose box contains `point`.
    pub fn take_containing(&mut self, point: InspectionPoint) -> Option<&'a WordBox> {
        let point = Coord {
            x: point.x as f64,
            y: point.y as f64,
        };
        let index = self
            .words
            .iter()
            .zip(&self.taken)
            .position(|(word, taken)| !taken && word.contains(point))?;
        self.taken[index] = true;
        self.remaining -= 1;
        Some(&self.words[index])
    }

    /// Indices of words not taken so far.
    pub fn untaken(&self) -> impl Iterator<Item = usize> + '_ {
        self.taken
            .iter()
            .enumerate()
            .filter(|(_, taken)| !**taken)
            .map(|(index, _)| index)
    }
}

/// Builds one string per line by probing the pool with that line's points.
///
/// Lines are processed in order and consume words from a single pool, so a
/// word matched by an earlier line is unavailable to later ones. Each matched
/// word is followed by one space.
#[instrument(level = "debug", skip_all, fields(lines = points.len(), words = pool.remaining()))]
pub fn assemble_lines(points: &[Vec<InspectionPoint>], pool: &mut WordPool<'_>) -> Vec<String> {
    points
        .iter()
        .map(|line| {
            let mut text = String::new();
            for point in line {
                if let Some(word) = pool.take_containing(*point) {
                    text.push_str(&word.text);
                    text.push(' ');
                }
            }
            log::trace!("Assembled line {text:?}");
            text
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Quad;
    use geo::coord;
    use pretty_assertions::assert_eq;

    fn word(text: &str, x0: i32, y0: i32, x1: i32, y1: i32) -> WordBox {
        WordBox::new(
            text,
            Quad([
                coord! { x: x0, y: y0 },
                coord! { x: x1, y: y0 },
                coord! { x: x1, y: y1 },
                coord! { x: x0, y: y1 },
            ]),
        )
    }

    #[test]
    fn each_word_is_taken_once() {
        let words = [word("alpha", 0, 0, 50, 20), word("beta", 60, 0, 120, 20)];
        let mut pool = WordPool::new(&words);
        let points = vec![vec![
            coord! { x: 10, y: 10 },
            coord! { x: 20, y: 10 },
            coord! { x: 70, y: 10 },
        ]];
        let lines = assemble_lines(&points, &mut pool);
        assert_eq!(lines, vec!["alpha beta ".to_string()]);
        assert_eq!(pool.remaining(), 0);
    }

    #[test]
    fn earlier_lines_consume_words_first() {
        let words = [word("tall", 0, 0, 40, 100)];
        let mut pool = WordPool::new(&words);
        let points = vec![vec![coord! { x: 10, y: 20 }], vec![coord! { x: 10, y: 80 }]];
        let lines = assemble_lines(&points, &mut pool);
        assert_eq!(lines, vec!["tall ".to_string(), String::new()]);
    }

    #[test]
    fn last_word_in_pool_can_be_matched() {
        let words = [word("first", 0, 0, 10, 10), word("last", 20, 0, 30, 10)];
        let mut pool = WordPool::new(&words);
        let taken = pool.take_containing(coord! { x: 25, y: 5 });
        assert_eq!(taken.map(|w| w.text.as_str()), Some("last"));
        assert_eq!(pool.untaken().collect::<Vec<_>>(), vec![0]);
    }

    #[test]
    fn pool_only_shrinks() {
        let words = [word("a", 0, 0, 10, 10), word("b", 5, 0, 15, 10)];
        let mut pool = WordPool::new(&words);
        let mut previous = pool.remaining();
        for x in [7, 7, 8, 12, 30] {
            pool.take_containing(coord! { x: x, y: 5 });
            assert!(pool.remaining() <= previous);
            previous = pool.remaining();
        }
        assert_eq!(previous, 0);
    }

    #[test]
    fn line_without_points_is_an_empty_string() {
        let words = [word("unseen", 0, 0, 10, 10)];
        let mut pool = WordPool::new(&words);
        assert_eq!(assemble_lines(&[Vec::new()], &mut pool), vec![String::new()]);
        assert_eq!(pool.remaining(), 1);
    }
}
