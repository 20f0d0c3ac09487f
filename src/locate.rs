// Copyright 2025 Lars Brubaker
// License: MIT
//
// Point-location oracle used when a chord closes a new face.
//
// The editor detaches the freshly closed cycle into its own two-face mesh,
// asks the locator to build whatever search structure it likes over it, and
// then queries vertices of the old face against that structure.

use crate::geom::{ring_contains, Point};
use crate::mesh::Mesh;

/// Face of a detached mesh lying outside the polygon.
pub const OUTSIDE_REGION: u32 = 0;
/// Face of a detached mesh enclosed by the polygon.
pub const INSIDE_REGION: u32 = 1;

pub trait PointLocator {
    type Structure;

    /// Preprocess a mesh produced by `Mesh::detach_face`.
    fn build(&self, detached: &Mesh) -> Self::Structure;

    /// Region index of the detached mesh containing `point`:
    /// `INSIDE_REGION` or `OUTSIDE_REGION`.
    fn locate(&self, structure: &Self::Structure, point: Point) -> u32;
}

impl<L: PointLocator + ?Sized> PointLocator for &L {
    type Structure = L::Structure;

    fn build(&self, detached: &Mesh) -> Self::Structure {
        (**self).build(detached)
    }

    fn locate(&self, structure: &Self::Structure, point: Point) -> u32 {
        (**self).locate(structure, point)
    }
}

/// Even-odd ray crossing against the polygon ring. Linear per query.
#[derive(Clone, Copy, Debug, Default)]
pub struct CrossingLocator;

impl PointLocator for CrossingLocator {
    type Structure = Vec<Point>;

    fn build(&self, detached: &Mesh) -> Vec<Point> {
        detached
            .face_vertices(INSIDE_REGION)
            .map(|vs| vs.into_iter().map(|v| detached.coordinate(v)).collect())
            .unwrap_or_default()
    }

    fn locate(&self, ring: &Vec<Point>, point: Point) -> u32 {
        if ring_contains(ring, point) {
            INSIDE_REGION
        } else {
            OUTSIDE_REGION
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detached_square(size: f32) -> Mesh {
        let mut mesh = Mesh::new();
        let a = mesh.add_isolated_vertex(Point::new(0.0, 0.0));
        let b = mesh.add_isolated_vertex(Point::new(size, 0.0));
        let c = mesh.add_isolated_vertex(Point::new(size, size));
        let outer = mesh.add_outer_face();
        let inner = mesh.add_triangle_face(a, b, c, outer).unwrap();
        let ca = mesh
            .face_edges(inner)
            .unwrap()
            .into_iter()
            .find(|&e| mesh.origin(e) == c)
            .unwrap();
        mesh.add_vertex_splitting_edge(Point::new(0.0, size), ca).unwrap();
        mesh.detach_face(inner).unwrap()
    }

    #[test]
    fn crossing_locator_classifies_points() {
        let piece = detached_square(4.0);
        let ring = CrossingLocator.build(&piece);
        assert_eq!(ring.len(), 4);
        assert_eq!(CrossingLocator.locate(&ring, Point::new(1.0, 3.0)), INSIDE_REGION);
        assert_eq!(CrossingLocator.locate(&ring, Point::new(5.0, 1.0)), OUTSIDE_REGION);
        assert_eq!(CrossingLocator.locate(&ring, Point::new(2.0, -1.0)), OUTSIDE_REGION);
    }

    #[test]
    fn locator_by_reference() {
        let piece = detached_square(2.0);
        let locator: &dyn PointLocator<Structure = Vec<Point>> = &CrossingLocator;
        let ring = locator.build(&piece);
        assert_eq!(locator.locate(&ring, Point::new(1.0, 1.5)), INSIDE_REGION);
    }
}
