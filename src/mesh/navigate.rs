// Copyright 2025 Lars Brubaker
// License: MIT
//
// Read-only topology queries over the mesh store.

use super::{EdgeIdx, FaceIdx, Mesh, VertIdx, INVALID};
use crate::error::{MeshError, Result};
use crate::geom::{angle_between_vectors, leftmost_index, signed_area, Point, Real, EPSILON};

impl Mesh {
    // ──────────────── Navigation helpers (unchecked, panic when out of range) ─

    #[inline]
    pub fn origin(&self, e: EdgeIdx) -> VertIdx {
        self.edges[e].origin_vertex
    }

    #[inline]
    pub fn twin(&self, e: EdgeIdx) -> EdgeIdx {
        self.edges[e].twin_edge
    }

    #[inline]
    pub fn next(&self, e: EdgeIdx) -> EdgeIdx {
        self.edges[e].next_edge
    }

    #[inline]
    pub fn prev(&self, e: EdgeIdx) -> EdgeIdx {
        self.edges[e].previous_edge
    }

    /// Face on the left of e.
    #[inline]
    pub fn face_of(&self, e: EdgeIdx) -> FaceIdx {
        self.edges[e].incident_face
    }

    /// Destination vertex of e (= origin of its twin).
    #[inline]
    pub fn destination(&self, e: EdgeIdx) -> VertIdx {
        self.edges[self.edges[e].twin_edge].origin_vertex
    }

    #[inline]
    pub fn coordinate(&self, v: VertIdx) -> Point {
        self.vertices[v].coordinate
    }

    #[inline]
    pub(crate) fn edge_vector(&self, e: EdgeIdx) -> Point {
        let next = self.edges[e].next_edge;
        self.coordinate(self.origin(next)) - self.coordinate(self.origin(e))
    }

    /// Signed angle from the direction of `e` to the direction of its
    /// predecessor. Negative at a convex corner of a counter-clockwise cycle.
    #[inline]
    pub(crate) fn turn_angle(&self, e: EdgeIdx) -> Real {
        angle_between_vectors(self.edge_vector(e), self.edge_vector(self.prev(e)))
    }

    // ──────────────────────────── Public queries ──────────────────────────────

    /// Direction of travel along `e`: destination minus origin.
    pub fn vector_along_edge(&self, e: EdgeIdx) -> Result<Point> {
        self.require_edge(e)?;
        Ok(self.edge_vector(e))
    }

    /// Every `(neighbor, outgoing half-edge)` pair around `v`, in rotational
    /// order starting at `v.incident_edge`. Empty for an isolated vertex.
    pub fn adjacent_vertices_and_edges(&self, v: VertIdx) -> Result<Vec<(VertIdx, EdgeIdx)>> {
        self.require_vertex(v)?;
        let begin = self.vertices[v].incident_edge;
        if begin == INVALID {
            return Ok(Vec::new());
        }
        self.require_edge(begin)?;
        if self.origin(begin) != v {
            return Err(MeshError::precondition(format!(
                "incident half-edge {begin} of vertex {v} starts at vertex {}",
                self.origin(begin)
            )));
        }

        let mut adjacents = Vec::new();
        let mut current = begin;
        loop {
            let twin = self.twin(current);
            adjacents.push((self.origin(twin), current));
            current = self.next(twin);
            if current == begin {
                break;
            }
            if adjacents.len() > self.edges.len() || !self.edges.is_live(current) {
                return Err(MeshError::Corrupt(format!(
                    "rotation around vertex {v} does not close"
                )));
            }
        }
        Ok(adjacents)
    }

    pub fn adjacent_vertices(&self, v: VertIdx) -> Result<Vec<VertIdx>> {
        Ok(self
            .adjacent_vertices_and_edges(v)?
            .into_iter()
            .map(|(n, _)| n)
            .collect())
    }

    /// True iff `b` is a direct neighbor of `a`.
    pub fn is_points_connected(&self, a: VertIdx, b: VertIdx) -> Result<bool> {
        self.require_vertex(b)?;
        Ok(self.adjacent_vertices(a)?.contains(&b))
    }

    /// True iff walking `next_edge` from `a` reaches `b` before coming back.
    pub fn is_edges_connected(&self, a: EdgeIdx, b: EdgeIdx) -> Result<bool> {
        self.require_edge(b)?;
        Ok(self.cycle_edges(a)?.contains(&b))
    }

    /// The next-cycle that contains `e`, starting at `e`.
    pub fn cycle_edges(&self, e: EdgeIdx) -> Result<Vec<EdgeIdx>> {
        self.require_edge(e)?;
        let mut cycle = Vec::new();
        let mut current = e;
        loop {
            cycle.push(current);
            current = self.next(current);
            if current == e {
                break;
            }
            if cycle.len() > self.edges.len() || !self.edges.is_live(current) {
                return Err(MeshError::Corrupt(format!(
                    "face cycle through half-edge {e} does not close"
                )));
            }
        }
        Ok(cycle)
    }

    /// Boundary cycle reachable from `face.edge`. Empty for a face without
    /// a boundary.
    pub fn face_edges(&self, f: FaceIdx) -> Result<Vec<EdgeIdx>> {
        self.require_face(f)?;
        match self.faces[f].edge {
            INVALID => Ok(Vec::new()),
            e => self.cycle_edges(e),
        }
    }

    pub fn face_vertices(&self, f: FaceIdx) -> Result<Vec<VertIdx>> {
        Ok(self
            .face_edges(f)?
            .into_iter()
            .map(|e| self.origin(e))
            .collect())
    }

    /// Count half-edges in a face's boundary cycle.
    pub fn count_face_edges(&self, f: FaceIdx) -> Result<usize> {
        Ok(self.face_edges(f)?.len())
    }

    /// Shoelace area of the cycle through `e`; positive when it winds
    /// counter-clockwise (a bounded face).
    pub fn cycle_signed_area(&self, e: EdgeIdx) -> Result<Real> {
        let ring: Vec<Point> = self
            .cycle_edges(e)?
            .into_iter()
            .map(|e| self.coordinate(self.origin(e)))
            .collect();
        Ok(signed_area(&ring))
    }

    /// The unbounded face. Found at the leftmost-then-lowest vertex that has
    /// edges: the outgoing half-edge making a positive turn there bounds the
    /// outside.
    pub fn outside_face(&self) -> Result<FaceIdx> {
        let candidates: Vec<VertIdx> = self
            .vertices
            .iter_live()
            .filter(|(_, v)| v.incident_edge != INVALID)
            .map(|(i, _)| i)
            .collect();
        let left = leftmost_index(candidates.iter().map(|&v| self.coordinate(v)))
            .map(|i| candidates[i])
            .ok_or_else(|| MeshError::precondition("mesh has no edges to locate the outside face"))?;

        let mut outside = INVALID;
        for (_, e) in self.adjacent_vertices_and_edges(left)? {
            if self.turn_angle(e) > EPSILON {
                outside = self.face_of(e);
            }
        }

        if outside == INVALID {
            return Err(MeshError::precondition(format!(
                "no convex outer turn at leftmost vertex {left}"
            )));
        }
        Ok(outside)
    }

    /// Best-effort guess at the primary bounded face: the face beside the
    /// most recently added half-edge that is not the outside face.
    ///
    /// A decoded mesh has no insertion history, so the highest-index live
    /// half-edge stands in for the most recent one.
    pub fn main_face(&self) -> Result<FaceIdx> {
        let outside = self.outside_face()?;
        let recent = if self.edges.is_live(self.last_added_edge) {
            self.last_added_edge
        } else {
            self.edges
                .iter_live()
                .map(|(e, _)| e)
                .last()
                .ok_or_else(|| MeshError::precondition("mesh has no half-edges"))?
        };
        Ok(if self.face_of(recent) == outside {
            self.face_of(self.twin(recent))
        } else {
            self.face_of(recent)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Triangle A(0,0) B(2,0) C(1,2) inside a fresh outer face.
    fn triangle() -> (Mesh, [VertIdx; 3], FaceIdx, FaceIdx) {
        let mut mesh = Mesh::new();
        let a = mesh.add_isolated_vertex(Point::new(0.0, 0.0));
        let b = mesh.add_isolated_vertex(Point::new(2.0, 0.0));
        let c = mesh.add_isolated_vertex(Point::new(1.0, 2.0));
        let outer = mesh.add_outer_face();
        let inner = mesh.add_triangle_face(a, b, c, outer).unwrap();
        (mesh, [a, b, c], outer, inner)
    }

    #[test]
    fn vector_along_edge_points_to_destination() {
        let (mesh, [a, b, _], _, _) = triangle();
        let e = mesh.vertices()[a].incident_edge;
        assert_eq!(mesh.destination(e), b);
        assert_eq!(mesh.vector_along_edge(e).unwrap(), Point::new(2.0, 0.0));
    }

    #[test]
    fn adjacency_is_symmetric() {
        let (mesh, verts, _, _) = triangle();
        for &v in &verts {
            for (n, e) in mesh.adjacent_vertices_and_edges(v).unwrap() {
                let back = mesh.adjacent_vertices_and_edges(n).unwrap();
                assert!(back.contains(&(v, mesh.twin(e))));
            }
        }
    }

    #[test]
    fn isolated_vertex_has_no_neighbors() {
        let mut mesh = Mesh::new();
        let v = mesh.add_isolated_vertex(Point::new(1.0, 1.0));
        assert!(mesh.adjacent_vertices(v).unwrap().is_empty());
    }

    #[test]
    fn adjacency_rejects_foreign_incident_edge() {
        let (mut mesh, [a, b, _], _, _) = triangle();
        mesh.vertices[a].incident_edge = mesh.vertices[b].incident_edge;
        assert!(matches!(
            mesh.adjacent_vertices_and_edges(a),
            Err(MeshError::Precondition(_))
        ));
    }

    #[test]
    fn points_and_edges_connectivity() {
        let (mut mesh, [a, b, c], _, inner) = triangle();
        let d = mesh.add_isolated_vertex(Point::new(5.0, 5.0));
        assert!(mesh.is_points_connected(a, b).unwrap());
        assert!(mesh.is_points_connected(c, a).unwrap());
        assert!(!mesh.is_points_connected(a, d).unwrap());

        let inner_edge = mesh.faces()[inner].edge;
        let last = mesh.prev(inner_edge);
        assert!(mesh.is_edges_connected(inner_edge, last).unwrap());
        assert!(!mesh.is_edges_connected(inner_edge, mesh.twin(inner_edge)).unwrap());
    }

    #[test]
    fn outside_and_main_face() {
        let (mesh, _, outer, inner) = triangle();
        assert_eq!(mesh.outside_face().unwrap(), outer);
        assert_eq!(mesh.main_face().unwrap(), inner);
        assert!(mesh.cycle_signed_area(mesh.faces()[inner].edge).unwrap() > 0.0);
        assert!(mesh.cycle_signed_area(mesh.faces()[outer].edge).unwrap() < 0.0);
    }

    #[test]
    fn outside_face_of_empty_mesh_fails() {
        let mut mesh = Mesh::new();
        assert!(mesh.outside_face().is_err());
        mesh.add_isolated_vertex(Point::new(0.0, 0.0));
        assert!(matches!(mesh.outside_face(), Err(MeshError::Precondition(_))));
    }

    #[test]
    fn face_cycle_queries() {
        let (mesh, [a, b, c], outer, inner) = triangle();
        assert_eq!(mesh.count_face_edges(inner).unwrap(), 3);
        assert_eq!(mesh.count_face_edges(outer).unwrap(), 3);
        let mut verts = mesh.face_vertices(inner).unwrap();
        verts.sort_unstable();
        assert_eq!(verts, vec![a, b, c]);
    }
}
