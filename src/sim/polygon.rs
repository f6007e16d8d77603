//! Regular polygon geometry for the intersection simulation.
//!
//! Vertices sit on the unit circle in counter-clockwise order. For even `n`
//! the first vertex points straight down; for odd `n` the polygon rests on a
//! horizontal bottom edge.

use std::f64::consts::PI;

use geo::line_intersection::{LineIntersection, line_intersection};
use geo::{Contains, Coord, Line, LineString, Polygon};

use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct RegularPolygon {
    vertices: Vec<Coord<f64>>,
    shape: Polygon<f64>,
}

impl RegularPolygon {
    pub fn new(sides: usize) -> Result<Self, AppError> {
        if sides < 3 {
            return Err(AppError::new(2, format!("A polygon needs at least 3 sides, got {sides}.")));
        }

        let step = 2.0 * PI / sides as f64;
        let offset = if sides % 2 == 0 { -PI / 2.0 } else { -PI / 2.0 - step / 2.0 };
        let vertices: Vec<Coord<f64>> = (0..sides)
            .map(|i| {
                let angle = i as f64 * step + offset;
                Coord {
                    x: angle.cos(),
                    y: angle.sin(),
                }
            })
            .collect();

        // `Polygon::new` closes the exterior ring.
        let shape = Polygon::new(LineString::from(vertices.clone()), vec![]);
        Ok(Self { vertices, shape })
    }

    pub fn sides(&self) -> usize {
        self.vertices.len()
    }

    pub fn vertices(&self) -> &[Coord<f64>] {
        &self.vertices
    }

    /// Edge `i`, from vertex `i` to vertex `i + 1` (wrapping).
    pub fn edge(&self, i: usize) -> Line<f64> {
        let n = self.vertices.len();
        Line::new(self.vertices[i % n], self.vertices[(i + 1) % n])
    }

    /// The point at fraction `t ∈ [0, 1]` along edge `i`.
    pub fn point_on_edge(&self, i: usize, t: f64) -> Coord<f64> {
        let edge = self.edge(i);
        edge.start + edge.delta() * t
    }

    /// Interior test; points on the boundary are outside.
    pub fn contains(&self, p: &Coord<f64>) -> bool {
        self.shape.contains(p)
    }

    /// The single crossing point of two chords, if it lies inside the polygon.
    ///
    /// Collinear overlaps and crossings on the boundary yield `None`.
    pub fn interior_crossing(&self, a: Line<f64>, b: Line<f64>) -> Option<Coord<f64>> {
        match line_intersection(a, b) {
            Some(LineIntersection::SinglePoint { intersection, .. }) if self.contains(&intersection) => {
                Some(intersection)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(x: f64, y: f64) -> Coord<f64> {
        Coord { x, y }
    }

    #[test]
    fn vertices_lie_on_unit_circle() {
        for n in [3, 4, 7, 50] {
            let poly = RegularPolygon::new(n).unwrap();
            assert_eq!(poly.sides(), n);
            for v in poly.vertices() {
                assert!((v.x.hypot(v.y) - 1.0).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn rotation_depends_on_parity() {
        let square = RegularPolygon::new(4).unwrap();
        let v0 = square.vertices()[0];
        assert!(v0.x.abs() < 1e-12 && (v0.y + 1.0).abs() < 1e-12);

        let triangle = RegularPolygon::new(3).unwrap();
        let bottom = triangle.edge(0);
        assert!((bottom.start.y - bottom.end.y).abs() < 1e-12, "odd n has a horizontal bottom edge");
    }

    #[test]
    fn too_few_sides_is_rejected() {
        assert!(RegularPolygon::new(2).is_err());
    }

    #[test]
    fn point_on_edge_interpolates() {
        let poly = RegularPolygon::new(4).unwrap();
        let edge = poly.edge(1);
        let mid = poly.point_on_edge(1, 0.5);
        let expected = (edge.start + edge.end) / 2.0;
        assert!((mid.x - expected.x).abs() < 1e-12 && (mid.y - expected.y).abs() < 1e-12);
        assert_eq!(poly.point_on_edge(1, 0.0), edge.start);
    }

    #[test]
    fn containment_excludes_boundary() {
        let poly = RegularPolygon::new(6).unwrap();
        assert!(poly.contains(&coord(0.0, 0.0)));
        assert!(!poly.contains(&poly.vertices()[2]));
        assert!(!poly.contains(&poly.edge(4).end));
        assert!(!poly.contains(&coord(2.0, 0.0)));
    }

    #[test]
    fn crossing_diagonals_meet_at_center() {
        let square = RegularPolygon::new(4).unwrap();
        let [v0, v1, v2, v3] = [0, 1, 2, 3].map(|i| square.vertices()[i]);
        let hit = square.interior_crossing(Line::new(v0, v2), Line::new(v1, v3));
        let p = hit.expect("diagonals cross inside");
        assert!(p.x.abs() < 1e-12 && p.y.abs() < 1e-12);
    }

    #[test]
    fn disjoint_and_parallel_chords_do_not_cross() {
        let square = RegularPolygon::new(4).unwrap();
        let a = Line::new(coord(-0.5, -0.1), coord(0.5, -0.1));
        let parallel = Line::new(coord(-0.5, 0.1), coord(0.5, 0.1));
        assert_eq!(square.interior_crossing(a, parallel), None);

        let apart = Line::new(coord(0.6, -0.2), coord(0.6, 0.2));
        assert_eq!(square.interior_crossing(a, apart), None);
    }

    #[test]
    fn collinear_overlap_does_not_count() {
        let square = RegularPolygon::new(4).unwrap();
        let a = Line::new(coord(-0.5, 0.0), coord(0.2, 0.0));
        let b = Line::new(coord(-0.2, 0.0), coord(0.5, 0.0));
        assert_eq!(square.interior_crossing(a, b), None);
    }

    #[test]
    fn crossing_outside_the_polygon_does_not_count() {
        let square = RegularPolygon::new(4).unwrap();
        let a = Line::new(coord(0.0, 2.0), coord(4.0, 2.0));
        let b = Line::new(coord(2.0, 0.0), coord(2.0, 4.0));
        assert_eq!(square.interior_crossing(a, b), None);
    }
}
