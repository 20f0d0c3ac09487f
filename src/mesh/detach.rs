// Copyright 2025 Lars Brubaker
// License: MIT
//
// Extraction of one face as a standalone two-face mesh.

use super::{EdgeIdx, FaceIdx, HalfEdge, Mesh};
use crate::error::{MeshError, Result};
use crate::locate::{INSIDE_REGION, OUTSIDE_REGION};

impl Mesh {
    /// Copy the boundary cycle of `f` into a fresh mesh holding just that
    /// polygon.
    ///
    /// With `n` boundary half-edges the result has vertices `0..n` in cycle
    /// order, forward half-edges `0..n` bounding face `INSIDE_REGION`, their
    /// twins `n..2n` bounding face `OUTSIDE_REGION`, and vertex `i` leaving
    /// along half-edge `i`.
    pub fn detach_face(&self, f: FaceIdx) -> Result<Mesh> {
        let cycle = self.face_edges(f)?;
        if cycle.len() < 2 {
            return Err(MeshError::precondition(format!(
                "face {f} has no boundary to detach"
            )));
        }
        Ok(self.detach_cycle(&cycle))
    }

    pub(crate) fn detach_cycle(&self, cycle: &[EdgeIdx]) -> Mesh {
        let n = cycle.len() as u32;
        let mut detached = Mesh::new();

        let exterior = detached.claim_face();
        let interior = detached.claim_face();
        debug_assert_eq!((exterior, interior), (OUTSIDE_REGION, INSIDE_REGION));

        for (i, &e) in (0..n).zip(cycle) {
            let v = detached.claim_vertex();
            detached.vertices[v].coordinate = self.coordinate(self.origin(e));
            detached.vertices[v].incident_edge = i;
        }
        for _ in 0..2 * n {
            detached.claim_edge();
        }

        for i in 0..n {
            let succ = (i + 1) % n;
            let pred = (i + n - 1) % n;
            detached.edges[i] = HalfEdge {
                origin_vertex: i,
                twin_edge: i + n,
                incident_face: interior,
                next_edge: succ,
                previous_edge: pred,
                is_exist: true,
            };
            detached.edges[i + n] = HalfEdge {
                origin_vertex: succ,
                twin_edge: i,
                incident_face: exterior,
                next_edge: pred + n,
                previous_edge: succ + n,
                is_exist: true,
            };
        }

        detached.faces[exterior].edge = n;
        detached.faces[interior].edge = 0;
        detached
    }
}
