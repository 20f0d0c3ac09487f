// dcel-rust: editable planar subdivision as a doubly-connected edge list
// Copyright 2025 Lars Brubaker
// License: MIT

pub mod arena;
pub mod codec;
pub mod error;
pub mod geom;
pub mod locate;
pub mod mesh;

pub use codec::{decode, encode, load_from_file, save_to_file};
pub use error::{MeshError, Result};
pub use geom::{Point, Real, EPSILON};
pub use locate::{CrossingLocator, PointLocator, INSIDE_REGION, OUTSIDE_REGION};
pub use mesh::{EdgeIdx, Face, FaceIdx, HalfEdge, Mesh, VertIdx, Vertex, INVALID};
