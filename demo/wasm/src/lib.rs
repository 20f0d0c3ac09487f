// Copyright 2025 Lars Brubaker
// WASM bindings for dcel-rust

use dcel_rust::{codec, CrossingLocator, Mesh, MeshError, Point};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn main_js() {
    console_error_panic_hook::set_once();
}

fn js_err(e: MeshError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// An editable mesh driven from the page. Indices cross the boundary as u32;
/// a missing reference comes back as 4294967295.
#[wasm_bindgen]
pub struct MeshJs {
    inner: Mesh,
}

impl Default for MeshJs {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl MeshJs {
    #[wasm_bindgen(constructor)]
    pub fn new() -> MeshJs {
        MeshJs { inner: Mesh::new() }
    }

    /// Replace the mesh with one decoded from its text form.
    pub fn load(&mut self, text: &str) -> Result<(), JsValue> {
        self.inner = codec::decode(text).map_err(js_err)?;
        Ok(())
    }

    pub fn save(&self) -> String {
        codec::encode(&self.inner)
    }

    pub fn add_vertex(&mut self, x: f32, y: f32) -> u32 {
        self.inner.add_isolated_vertex(Point::new(x, y))
    }

    pub fn add_outer_face(&mut self) -> u32 {
        self.inner.add_outer_face()
    }

    pub fn add_triangle(&mut self, a: u32, b: u32, c: u32, outer: u32) -> Result<u32, JsValue> {
        self.inner.add_triangle_face(a, b, c, outer).map_err(js_err)
    }

    pub fn split_edge(&mut self, edge: u32, x: f32, y: f32) -> Result<u32, JsValue> {
        self.inner
            .add_vertex_splitting_edge(Point::new(x, y), edge)
            .map_err(js_err)
    }

    pub fn add_pendant_vertex(&mut self, edge: u32, x: f32, y: f32) -> Result<u32, JsValue> {
        self.inner
            .add_vertex_before_edge_origin(Point::new(x, y), edge)
            .map_err(js_err)
    }

    /// Add a chord between the origins of two half-edges. Returns the
    /// half-edge leaving the first origin.
    pub fn connect_edges(&mut self, from: u32, to: u32) -> Result<u32, JsValue> {
        self.inner
            .add_edge_between_two_edges(from, to, &CrossingLocator)
            .map(|(forward, _)| forward)
            .map_err(js_err)
    }

    pub fn connect_points(&mut self, a: u32, b: u32) -> Result<u32, JsValue> {
        self.inner
            .add_edge_between_two_points(a, b)
            .map(|(forward, _)| forward)
            .map_err(js_err)
    }

    pub fn remove_pendant_vertex(&mut self, v: u32) -> Result<(), JsValue> {
        self.inner.remove_pendant_vertex(v).map_err(js_err)
    }

    pub fn outside_face(&self) -> Result<u32, JsValue> {
        self.inner.outside_face().map_err(js_err)
    }

    pub fn main_face(&self) -> Result<u32, JsValue> {
        self.inner.main_face().map_err(js_err)
    }

    pub fn vertex_count(&self) -> u32 {
        self.inner.vertex_count() as u32
    }

    /// Flat [index, x, y, ...] for every live vertex.
    pub fn vertex_positions(&self) -> Vec<f32> {
        self.inner
            .vertices()
            .iter_live()
            .flat_map(|(i, v)| [i as f32, v.coordinate.x, v.coordinate.y])
            .collect()
    }

    /// Flat [x0, y0, x1, y1, ...] with one segment per twin pair.
    pub fn edge_segments(&self) -> Vec<f32> {
        let mut out = Vec::new();
        for (e, he) in self.inner.edges().iter_live() {
            if he.twin_edge < e {
                continue;
            }
            let a = self.inner.coordinate(he.origin_vertex);
            let b = self.inner.coordinate(self.inner.destination(e));
            out.extend_from_slice(&[a.x, a.y, b.x, b.y]);
        }
        out
    }

    /// Flat [x0, y0, x1, y1, ...] ring of a face's boundary, for highlighting.
    pub fn face_polygon(&self, face: u32) -> Result<Vec<f32>, JsValue> {
        let verts = self.inner.face_vertices(face).map_err(js_err)?;
        Ok(verts
            .into_iter()
            .map(|v| self.inner.coordinate(v))
            .flat_map(|p| [p.x, p.y])
            .collect())
    }
}
