use geo::Coord;
use tracing::instrument;

use crate::{Block, CenterLine};

/// A sample on a filtered line that falls inside some block.
pub type InspectionPoint = Coord<i32>;

/// Walks every line left to right in steps of `width / points_per_line` and
/// records the samples lying inside a block, once per containing block.
///
/// The block test uses the exact sample; the recorded point is truncated.
#[instrument(level = "debug", skip(lines, blocks), fields(lines = lines.len(), blocks = blocks.len()))]
pub fn inspection_points(
    lines: &[CenterLine],
    blocks: &[Block],
    width: u32,
    points_per_line: usize,
) -> Vec<Vec<InspectionPoint>> {
    let final_x = width as f64;
    let step = final_x / points_per_line as f64;
    lines
        .iter()
        .map(|line| {
            let params = line.params();
            let mut points = Vec::new();
            let mut x = 0.0;
            while x < final_x {
                let sample = Coord {
                    x,
                    y: params.y_at(x),
                };
                for block in blocks.iter().filter(|block| block.contains(sample)) {
                    log::trace!("Sample {sample:?} inside block {:?}", block.quad);
                    points.push(Coord {
                        x: sample.x as i32,
                        y: sample.y as i32,
                    });
                }
                x += step;
            }
            points
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Quad;
    use geo::coord;
    use pretty_assertions::assert_eq;

    fn rect(x0: i32, y0: i32, x1: i32, y1: i32) -> Block {
        Block::new(Quad([
            coord! { x: x0, y: y0 },
            coord! { x: x1, y: y0 },
            coord! { x: x1, y: y1 },
            coord! { x: x0, y: y1 },
        ]))
    }

    fn flat(y: i32) -> CenterLine {
        CenterLine {
            start: coord! { x: 0, y: y },
            end: coord! { x: 100, y: y },
        }
    }

    #[test]
    fn samples_are_kept_only_inside_blocks() {
        let points = inspection_points(&[flat(10)], &[rect(25, 0, 55, 20)], 100, 10);
        assert_eq!(
            points,
            vec![vec![
                coord! { x: 30, y: 10 },
                coord! { x: 40, y: 10 },
                coord! { x: 50, y: 10 },
            ]]
        );
    }

    #[test]
    fn overlapping_blocks_record_a_sample_twice() {
        let blocks = [rect(0, 0, 100, 20), rect(35, 0, 45, 20)];
        let points = inspection_points(&[flat(10)], &blocks, 100, 10);
        let at_40 = points[0].iter().filter(|p| p.x == 40).count();
        assert_eq!(at_40, 2);
    }

    #[test]
    fn line_outside_every_block_has_no_points() {
        let points = inspection_points(&[flat(10), flat(80)], &[rect(0, 0, 100, 20)], 100, 10);
        assert_eq!(points.len(), 2);
        assert!(!points[0].is_empty());
        assert!(points[1].is_empty());
    }

    #[test]
    fn sloped_line_samples_follow_the_line() {
        let line = CenterLine {
            start: coord! { x: 0, y: 0 },
            end: coord! { x: 100, y: 50 },
        };
        let points = inspection_points(&[line], &[rect(-1, -1, 101, 101)], 100, 4);
        assert_eq!(
            points[0],
            vec![
                coord! { x: 0, y: 0 },
                coord! { x: 25, y: 12 },
                coord! { x: 50, y: 25 },
                coord! { x: 75, y: 37 },
            ]
        );
    }
}
