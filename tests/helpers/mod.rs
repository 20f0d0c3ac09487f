// Copyright 2025 Lars Brubaker
// Shared test utilities for dcel-rust tests.

#![allow(dead_code)]

use dcel_rust::{EdgeIdx, FaceIdx, Mesh, Point, VertIdx, INVALID};

/// Build a convex polygon from counter-clockwise points: a triangle on the
/// first three, then one split of the closing half-edge per extra point.
/// Returns the vertices in order, the outer face and the polygon's face.
pub fn polygon(mesh: &mut Mesh, points: &[(f32, f32)]) -> (Vec<VertIdx>, FaceIdx, FaceIdx) {
    assert!(points.len() >= 3, "a polygon needs at least three points");
    let mut verts: Vec<VertIdx> = points[..3]
        .iter()
        .map(|&(x, y)| mesh.add_isolated_vertex(Point::new(x, y)))
        .collect();
    let outer = mesh.add_outer_face();
    let inner = mesh
        .add_triangle_face(verts[0], verts[1], verts[2], outer)
        .expect("triangle");

    for &(x, y) in &points[3..] {
        let last = *verts.last().expect("non-empty");
        let closing = edge_from_to(mesh, last, verts[0]);
        let v = mesh
            .add_vertex_splitting_edge(Point::new(x, y), closing)
            .expect("split closing edge");
        verts.push(v);
    }
    (verts, outer, inner)
}

/// Outgoing half-edge from `a` whose destination is `b`.
pub fn edge_from_to(mesh: &Mesh, a: VertIdx, b: VertIdx) -> EdgeIdx {
    mesh.adjacent_vertices_and_edges(a)
        .expect("adjacency")
        .into_iter()
        .find(|&(n, _)| n == b)
        .map(|(_, e)| e)
        .unwrap_or_else(|| panic!("no half-edge from {a} to {b}"))
}

/// Outgoing half-edge from `v` that bounds face `f`.
pub fn edge_on_face(mesh: &Mesh, v: VertIdx, f: FaceIdx) -> EdgeIdx {
    mesh.adjacent_vertices_and_edges(v)
        .expect("adjacency")
        .into_iter()
        .map(|(_, e)| e)
        .find(|&e| mesh.face_of(e) == f)
        .unwrap_or_else(|| panic!("vertex {v} has no half-edge on face {f}"))
}

/// Origins along the cycle through `e`.
pub fn cycle_origins(mesh: &Mesh, e: EdgeIdx) -> Vec<VertIdx> {
    mesh.cycle_edges(e)
        .expect("cycle")
        .into_iter()
        .map(|e| mesh.origin(e))
        .collect()
}

/// Live half-edge indices, ascending.
pub fn live_edges(mesh: &Mesh) -> Vec<EdgeIdx> {
    mesh.edges().iter_live().map(|(e, _)| e).collect()
}

pub fn live_vertices(mesh: &Mesh) -> Vec<VertIdx> {
    mesh.vertices().iter_live().map(|(v, _)| v).collect()
}

/// Live vertices without any incident half-edge.
pub fn isolated_vertices(mesh: &Mesh) -> Vec<VertIdx> {
    mesh.vertices()
        .iter_live()
        .filter(|(_, v)| v.incident_edge == INVALID)
        .map(|(v, _)| v)
        .collect()
}

pub fn assert_valid(mesh: &Mesh) {
    if let Err(e) = mesh.validate() {
        panic!("mesh failed validation: {e}\n{mesh}");
    }
}
