use geo::{point, Contains, Coord, LineString, Polygon};

use crate::{LineError, Result};

/// Integer pixel coordinate as reported by the OCR service.
pub type Vertex = Coord<i32>;

/// Parameters of `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineParams {
    pub slope: f64,
    pub intercept: f64,
}

impl LineParams {
    pub fn y_at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Fits the line through two points.
///
/// Two points sharing an x coordinate get a slope of `0` and the first
/// point's y as intercept. Vertical lines are not represented.
pub fn fit_line(p1: Vertex, p2: Vertex) -> LineParams {
    let dx = i64::from(p2.x) - i64::from(p1.x);
    let slope = if dx == 0 {
        0.0
    } else {
        (i64::from(p2.y) - i64::from(p1.y)) as f64 / dx as f64
    };
    LineParams {
        slope,
        intercept: p1.y as f64 - slope * p1.x as f64,
    }
}

/// Strict containment: points on the polygon boundary are outside.
///
/// A text row whose center line runs exactly along a block edge therefore
/// gets no inspection points and reads as an empty line.
pub fn point_in_polygon(point: Coord<f64>, polygon: &Polygon<f64>) -> bool {
    polygon.contains(&point!(x: point.x, y: point.y))
}

pub(crate) fn to_geo_poly(vertices: &[Vertex]) -> Polygon<f64> {
    let points = vertices
        .iter()
        .map(|vertex| Coord {
            x: vertex.x as f64,
            y: vertex.y as f64,
        })
        .collect::<Vec<_>>();
    Polygon::new(LineString::new(points), vec![])
}

/// Four vertices ordered clockwise from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Quad(pub [Vertex; 4]);

impl Quad {
    /// Builds a quad from a vertex list, `what` naming the source in errors.
    pub fn from_vertices(vertices: &[Vertex], what: &str) -> Result<Self> {
        <[Vertex; 4]>::try_from(vertices)
            .map(Self)
            .map_err(|_| LineError::MalformedPolygon {
                what: what.to_string(),
                found: vertices.len(),
            })
    }

    pub fn vertices(&self) -> &[Vertex; 4] {
        &self.0
    }

    /// Midpoint of the left edge (top-left and bottom-left corners).
    pub fn left_midpoint(&self) -> Vertex {
        midpoint(self.0[0], self.0[3])
    }

    /// Midpoint of the right edge (top-right and bottom-right corners).
    pub fn right_midpoint(&self) -> Vertex {
        midpoint(self.0[1], self.0[2])
    }

    pub fn to_polygon(&self) -> Polygon<f64> {
        to_geo_poly(&self.0)
    }
}

fn midpoint(a: Vertex, b: Vertex) -> Vertex {
    // the mean of two i32 values always fits back into i32
    let mean = |a: i32, b: i32| ((i64::from(a) + i64::from(b)) / 2) as i32;
    Coord {
        x: mean(a.x, b.x),
        y: mean(a.y, b.y),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::coord;

    #[test]
    fn fit_line_passes_through_both_points() {
        let cases = [
            (coord! { x: 0, y: 0 }, coord! { x: 10, y: 5 }),
            (coord! { x: -4, y: 7 }, coord! { x: 12, y: -9 }),
            (coord! { x: 3, y: 100 }, coord! { x: 900, y: 103 }),
        ];
        for (p1, p2) in cases {
            let params = fit_line(p1, p2);
            assert!((params.y_at(p1.x as f64) - p1.y as f64).abs() < 1e-9);
            assert!((params.y_at(p2.x as f64) - p2.y as f64).abs() < 1e-9);
        }
    }

    #[test]
    fn extreme_coordinates_do_not_overflow() {
        let low = coord! { x: i32::MIN, y: i32::MIN };
        let high = coord! { x: i32::MAX, y: i32::MAX };
        let params = fit_line(low, high);
        assert_eq!(params.slope, 1.0);
        assert_eq!(params.intercept, 0.0);

        let quad = Quad([high, high, low, low]);
        assert_eq!(quad.left_midpoint(), coord! { x: 0, y: 0 });
        assert_eq!(quad.right_midpoint(), coord! { x: 0, y: 0 });
    }

    #[test]
    fn shared_x_gives_flat_line_through_first_point() {
        let params = fit_line(coord! { x: 7, y: 42 }, coord! { x: 7, y: 90 });
        assert_eq!(params.slope, 0.0);
        assert_eq!(params.intercept, 42.0);
    }

    #[test]
    fn boundary_points_are_not_contained() {
        let square = to_geo_poly(&[
            coord! { x: 0, y: 0 },
            coord! { x: 10, y: 0 },
            coord! { x: 10, y: 10 },
            coord! { x: 0, y: 10 },
        ]);
        assert!(point_in_polygon(coord! { x: 5.0, y: 5.0 }, &square));
        assert!(!point_in_polygon(coord! { x: 0.0, y: 5.0 }, &square));
        assert!(!point_in_polygon(coord! { x: 11.0, y: 5.0 }, &square));
    }

    #[test]
    fn quad_edge_midpoints_truncate_toward_zero() {
        let quad = Quad([
            coord! { x: 1, y: 0 },
            coord! { x: 20, y: 1 },
            coord! { x: 20, y: 10 },
            coord! { x: 2, y: 9 },
        ]);
        assert_eq!(quad.left_midpoint(), coord! { x: 1, y: 4 });
        assert_eq!(quad.right_midpoint(), coord! { x: 20, y: 5 });
    }

    #[test]
    fn quad_requires_four_vertices() {
        let err = Quad::from_vertices(&[coord! { x: 0, y: 0 }; 3], "block 2").unwrap_err();
        assert!(matches!(
            err,
            LineError::MalformedPolygon { found: 3, ref what } if what == "block 2"
        ));
    }
}
