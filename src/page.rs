use geo::{Coord, Polygon};

use crate::geometry::{point_in_polygon, Quad, Vertex};
use crate::Result;

/// One recognized word and its quadrilateral.
#[derive(Debug, Clone)]
pub struct WordBox {
    pub text: String,
    pub quad: Quad,
    /// Mean of the last three vertices.
    pub center: Coord<f64>,
    polygon: Polygon<f64>,
}

impl WordBox {
    pub fn new(text: impl Into<String>, quad: Quad) -> Self {
        let tail = &quad.vertices()[1..];
        let len = tail.len() as f64;
        let center = Coord {
            x: tail.iter().map(|v| v.x as f64).sum::<f64>() / len,
            y: tail.iter().map(|v| v.y as f64).sum::<f64>() / len,
        };
        Self {
            text: text.into(),
            polygon: quad.to_polygon(),
            quad,
            center,
        }
    }

    pub fn from_vertices(text: impl Into<String>, vertices: &[Vertex]) -> Result<Self> {
        let text = text.into();
        let quad = Quad::from_vertices(vertices, &format!("word {text:?}"))?;
        Ok(Self::new(text, quad))
    }

    pub fn contains(&self, point: Coord<f64>) -> bool {
        point_in_polygon(point, &self.polygon)
    }
}

/// A paragraph-like region detected on the page.
#[derive(Debug, Clone)]
pub struct Block {
    pub quad: Quad,
    polygon: Polygon<f64>,
}

impl Block {
    pub fn new(quad: Quad) -> Self {
        Self {
            polygon: quad.to_polygon(),
            quad,
        }
    }

    pub fn contains(&self, point: Coord<f64>) -> bool {
        point_in_polygon(point, &self.polygon)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSize {
    pub width: u32,
    pub height: u32,
}

/// Everything the pipeline needs about one page.
#[derive(Debug, Clone)]
pub struct Page {
    pub size: PageSize,
    pub blocks: Vec<Block>,
    pub words: Vec<WordBox>,
}

impl Page {
    pub fn new(size: PageSize, blocks: Vec<Block>, words: Vec<WordBox>) -> Self {
        Self {
            size,
            blocks,
            words,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::coord;

    #[test]
    fn center_skips_first_vertex() {
        let word = WordBox::new(
            "skew",
            Quad([
                coord! { x: -30, y: -30 },
                coord! { x: 30, y: 0 },
                coord! { x: 30, y: 30 },
                coord! { x: 0, y: 30 },
            ]),
        );
        assert_eq!(word.center, coord! { x: 20.0, y: 20.0 });
    }

    #[test]
    fn word_box_rejects_triangles() {
        let vertices = [
            coord! { x: 0, y: 0 },
            coord! { x: 5, y: 0 },
            coord! { x: 5, y: 5 },
        ];
        assert!(WordBox::from_vertices("tri", &vertices).is_err());
    }
}
