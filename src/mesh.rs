// Copyright 2025 Lars Brubaker
// License: MIT
//
// Half-edge mesh store (doubly-connected edge list) for a planar subdivision.
//
// Design:
//   - INVALID: u32::MAX marks "no such reference".
//   - Vertices, faces and half-edges live in three `Arena`s and refer to each
//     other by plain u32 indices. A slot only becomes live through `claim_*`.
//   - Every half-edge bounds the face on its left; `next_edge`/`previous_edge`
//     walk that face's boundary cycle.
//   - Unlike a quad-edge layout, twins are not paired by index parity: the
//     `twin_edge` field is authoritative.
//
// Read-only topology queries live in `mesh/navigate.rs`, mutating edits in
// `mesh/edit.rs` and face extraction in `mesh/detach.rs`.

mod detach;
mod edit;
mod navigate;

use crate::arena::{Arena, Slot};
use crate::error::{MeshError, Result};
use crate::geom::Point;

pub const INVALID: u32 = u32::MAX;

/// Index into the vertex arena
pub type VertIdx = u32;
/// Index into the face arena
pub type FaceIdx = u32;
/// Index into the half-edge arena
pub type EdgeIdx = u32;

#[derive(Clone, Debug, PartialEq)]
pub struct Vertex {
    pub coordinate: Point,
    /// One half-edge leaving this vertex, or INVALID when isolated.
    pub incident_edge: EdgeIdx,
    pub is_exist: bool,
}

impl Default for Vertex {
    fn default() -> Self {
        Self {
            coordinate: Point::default(),
            incident_edge: INVALID,
            is_exist: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Face {
    /// One half-edge on this face's boundary, or INVALID for a face with no
    /// boundary yet (an empty outer face).
    pub edge: EdgeIdx,
    pub is_exist: bool,
}

impl Default for Face {
    fn default() -> Self {
        Self {
            edge: INVALID,
            is_exist: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct HalfEdge {
    pub origin_vertex: VertIdx,
    /// The antiparallel half-edge of the same segment.
    pub twin_edge: EdgeIdx,
    /// Face on the left of this half-edge.
    pub incident_face: FaceIdx,
    /// Next half-edge around `incident_face`.
    pub next_edge: EdgeIdx,
    /// Previous half-edge around `incident_face`.
    pub previous_edge: EdgeIdx,
    pub is_exist: bool,
}

impl Default for HalfEdge {
    fn default() -> Self {
        Self {
            origin_vertex: INVALID,
            twin_edge: INVALID,
            incident_face: INVALID,
            next_edge: INVALID,
            previous_edge: INVALID,
            is_exist: true,
        }
    }
}

macro_rules! impl_slot {
    ($($ty:ty),*) => {
        $(impl Slot for $ty {
            #[inline]
            fn is_live(&self) -> bool {
                self.is_exist
            }
            #[inline]
            fn set_live(&mut self, live: bool) {
                self.is_exist = live;
            }
        })*
    };
}

impl_slot!(Vertex, Face, HalfEdge);

/// The half-edge mesh.
#[derive(Clone, Debug)]
pub struct Mesh {
    pub(crate) vertices: Arena<Vertex>,
    pub(crate) faces: Arena<Face>,
    pub(crate) edges: Arena<HalfEdge>,
    /// Most recently claimed half-edge. Not persisted.
    pub(crate) last_added_edge: EdgeIdx,
}

/// Two meshes are equal when every slot and free-list entry matches.
/// Insertion history is not compared.
impl PartialEq for Mesh {
    fn eq(&self, other: &Self) -> bool {
        self.vertices == other.vertices && self.faces == other.faces && self.edges == other.edges
    }
}

impl Mesh {
    /// Create a new empty mesh.
    pub fn new() -> Self {
        Mesh {
            vertices: Arena::new(),
            faces: Arena::new(),
            edges: Arena::new(),
            last_added_edge: INVALID,
        }
    }

    pub(crate) fn from_arenas(
        vertices: Arena<Vertex>,
        faces: Arena<Face>,
        edges: Arena<HalfEdge>,
    ) -> Self {
        Mesh {
            vertices,
            faces,
            edges,
            last_added_edge: INVALID,
        }
    }

    // ──────────────────────────── Arena access ────────────────────────────────

    pub fn vertices(&self) -> &Arena<Vertex> {
        &self.vertices
    }

    pub fn faces(&self) -> &Arena<Face> {
        &self.faces
    }

    pub fn edges(&self) -> &Arena<HalfEdge> {
        &self.edges
    }

    /// Number of live vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.live_count()
    }

    /// Number of live faces.
    pub fn face_count(&self) -> usize {
        self.faces.live_count()
    }

    /// Number of live half-edges.
    pub fn edge_count(&self) -> usize {
        self.edges.live_count()
    }

    pub fn is_empty(&self) -> bool {
        self.vertex_count() == 0
    }

    /// Vertex slots, live or released.
    pub fn vertex_slots(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_slots(&self) -> usize {
        self.faces.len()
    }

    pub fn edge_slots(&self) -> usize {
        self.edges.len()
    }

    // ──────────────────────── Claim / release primitives ─────────────────────
    //
    // None of these check anything. Editing operations are responsible for
    // repairing every reference to a released slot.

    pub fn claim_vertex(&mut self) -> VertIdx {
        self.vertices.claim()
    }

    pub fn claim_face(&mut self) -> FaceIdx {
        self.faces.claim()
    }

    pub fn claim_edge(&mut self) -> EdgeIdx {
        let e = self.edges.claim();
        self.last_added_edge = e;
        e
    }

    pub fn release_vertex(&mut self, v: VertIdx) {
        self.vertices.release(v);
    }

    pub fn release_face(&mut self, f: FaceIdx) {
        self.faces.release(f);
    }

    pub fn release_edge(&mut self, e: EdgeIdx) {
        self.edges.release(e);
    }

    // ──────────────────────────── Precondition checks ─────────────────────────

    pub(crate) fn require_vertex(&self, v: VertIdx) -> Result<()> {
        if self.vertices.is_live(v) {
            Ok(())
        } else {
            Err(MeshError::precondition(format!("vertex {v} is not live")))
        }
    }

    pub(crate) fn require_face(&self, f: FaceIdx) -> Result<()> {
        if self.faces.is_live(f) {
            Ok(())
        } else {
            Err(MeshError::precondition(format!("face {f} is not live")))
        }
    }

    pub(crate) fn require_edge(&self, e: EdgeIdx) -> Result<()> {
        if self.edges.is_live(e) {
            Ok(())
        } else {
            Err(MeshError::precondition(format!("half-edge {e} is not live")))
        }
    }

    // ──────────────────────────── Invariant checking ──────────────────────────

    /// Check every structural invariant and report the first violation.
    pub fn validate(&self) -> Result<()> {
        let bad = |msg: String| Err(MeshError::InvariantViolated(msg));

        for (e, he) in self.edges.iter_live() {
            let twin = he.twin_edge;
            if !self.edges.is_live(twin) || twin == e {
                return bad(format!("half-edge {e} has no live twin ({twin})"));
            }
            if self.edges[twin].twin_edge != e {
                return bad(format!("twin of twin of half-edge {e} is not {e}"));
            }
            let (next, prev) = (he.next_edge, he.previous_edge);
            if !self.edges.is_live(next) || !self.edges.is_live(prev) {
                return bad(format!("half-edge {e} links to a dead neighbour"));
            }
            if self.edges[next].previous_edge != e || self.edges[prev].next_edge != e {
                return bad(format!("next/previous of half-edge {e} are not inverse"));
            }
            if !self.vertices.is_live(he.origin_vertex) {
                return bad(format!("half-edge {e} starts at dead vertex {}", he.origin_vertex));
            }
            if self.edges[next].origin_vertex != self.edges[twin].origin_vertex {
                return bad(format!("half-edge {e} does not end where its successor starts"));
            }
            if !self.faces.is_live(he.incident_face) {
                return bad(format!("half-edge {e} bounds dead face {}", he.incident_face));
            }
            if self.edges[next].incident_face != he.incident_face {
                return bad(format!("face changes along the cycle after half-edge {e}"));
            }
        }

        for (v, vertex) in self.vertices.iter_live() {
            let e = vertex.incident_edge;
            if e == INVALID {
                continue;
            }
            if !self.edges.is_live(e) {
                return bad(format!("vertex {v} points at dead half-edge {e}"));
            }
            if self.edges[e].origin_vertex != v {
                return bad(format!("incident half-edge {e} of vertex {v} starts elsewhere"));
            }
        }

        for (f, face) in self.faces.iter_live() {
            let e = face.edge;
            if e == INVALID {
                continue;
            }
            if !self.edges.is_live(e) {
                return bad(format!("face {f} points at dead half-edge {e}"));
            }
            if self.edges[e].incident_face != f {
                return bad(format!("boundary half-edge {e} of face {f} bounds another face"));
            }
        }

        let violated = MeshError::InvariantViolated;
        check_free_list("vertex", &self.vertices, violated)?;
        check_free_list("face", &self.faces, violated)?;
        check_free_list("half-edge", &self.edges, violated)?;

        Ok(())
    }

    /// Panic on any invariant violation when invariant checking is compiled in.
    #[inline]
    pub(crate) fn debug_assert_invariants(&self, op: &str) {
        #[cfg(any(debug_assertions, feature = "check-invariants"))]
        if let Err(e) = self.validate() {
            panic!("[invariants] after {op}: {e}");
        }
        #[cfg(not(any(debug_assertions, feature = "check-invariants")))]
        let _ = op;
    }
}

/// Released slots must be exactly the free-listed ones, each listed once.
/// Failures are reported through `fail`.
pub(crate) fn check_free_list<T: Slot>(
    kind: &str,
    arena: &Arena<T>,
    fail: fn(String) -> MeshError,
) -> Result<()> {
    let mut listed = vec![false; arena.len()];
    for &idx in arena.free_slots() {
        let Some(item) = arena.get(idx) else {
            return Err(fail(format!("free {kind} index {idx} is out of range")));
        };
        if item.is_live() {
            return Err(fail(format!("free {kind} index {idx} names a live slot")));
        }
        if listed[idx as usize] {
            return Err(fail(format!("free {kind} index {idx} is listed twice")));
        }
        listed[idx as usize] = true;
    }
    if let Some(idx) = arena
        .items()
        .iter()
        .enumerate()
        .position(|(i, item)| !item.is_live() && !listed[i])
    {
        return Err(fail(format!("released {kind} {idx} is missing from the free list")));
    }
    Ok(())
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}
