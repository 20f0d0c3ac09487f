// Copyright 2025 Lars Brubaker
// License: MIT
//
// Whitespace-delimited text format for a whole mesh, free lists included.
//
//   { <vertex_count>
//   [ x y , incident_edge , is_exist ] ...
//   <face_count>
//   [ edge , is_exist ] ...
//   <edge_count>
//   [ origin , twin , face , next , previous , is_exist ] ...
//   <free_vertex_count>
//   [ index ] ...
//   <free_face_count>
//   [ index ] ...
//   <free_edge_count>
//   [ index ] ...
//   }
//
// Booleans are written as 0/1 and INVALID as 4294967295. On read the tokens
// `{ } [ ] ,` are skipped wherever they appear.

use std::fmt;
use std::fs;
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;
use std::str::FromStr;

use log::info;

use crate::arena::{Arena, Slot};
use crate::error::{MeshError, Result};
use crate::geom::{Point, Real};
use crate::mesh::{check_free_list, Face, HalfEdge, Mesh, Vertex, INVALID};

/// Encode `mesh` into its text form.
pub fn encode(mesh: &Mesh) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_text(mesh, &mut out);
    out
}

fn write_text(mesh: &Mesh, out: &mut impl fmt::Write) -> fmt::Result {
    let vertices = mesh.vertices().items();
    writeln!(out, "{{ {}", vertices.len())?;
    for v in vertices {
        write!(
            out,
            "[ {} , {} , {} ] ",
            v.coordinate,
            v.incident_edge,
            u8::from(v.is_exist)
        )?;
    }
    writeln!(out)?;

    let faces = mesh.faces().items();
    writeln!(out, "{}", faces.len())?;
    for f in faces {
        write!(out, "[ {} , {} ] ", f.edge, u8::from(f.is_exist))?;
    }
    writeln!(out)?;

    let edges = mesh.edges().items();
    writeln!(out, "{}", edges.len())?;
    for e in edges {
        write!(
            out,
            "[ {} , {} , {} , {} , {} , {} ] ",
            e.origin_vertex,
            e.twin_edge,
            e.incident_face,
            e.next_edge,
            e.previous_edge,
            u8::from(e.is_exist)
        )?;
    }
    writeln!(out)?;

    for free in [
        mesh.vertices().free_slots(),
        mesh.faces().free_slots(),
        mesh.edges().free_slots(),
    ] {
        writeln!(out, "{}", free.len())?;
        for idx in free {
            write!(out, "[ {idx} ] ")?;
        }
        writeln!(out)?;
    }
    writeln!(out, "}}")
}

pub fn write_mesh<W: Write>(mesh: &Mesh, mut writer: W) -> Result<()> {
    writer.write_all(encode(mesh).as_bytes())?;
    writer.flush()?;
    Ok(())
}

pub fn read_mesh<R: Read>(mut reader: R) -> Result<Mesh> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    decode(&text)
}

pub fn save_to_file(path: impl AsRef<Path>, mesh: &Mesh) -> Result<()> {
    let path = path.as_ref();
    let file = fs::File::create(path)?;
    write_mesh(mesh, BufWriter::new(file))?;
    info!(
        "saved mesh ({} vertices, {} faces, {} half-edges) to {}",
        mesh.vertex_count(),
        mesh.face_count(),
        mesh.edge_count(),
        path.display()
    );
    Ok(())
}

pub fn load_from_file(path: impl AsRef<Path>) -> Result<Mesh> {
    let path = path.as_ref();
    let file = fs::File::open(path)?;
    let mesh = read_mesh(io::BufReader::new(file))?;
    info!(
        "loaded mesh ({} vertices, {} faces, {} half-edges) from {}",
        mesh.vertex_count(),
        mesh.face_count(),
        mesh.edge_count(),
        path.display()
    );
    Ok(mesh)
}

// ─────────────────────────────────── Decoding ────────────────────────────────

fn is_separator(token: &str) -> bool {
    matches!(token, "{" | "}" | "[" | "]" | ",")
}

struct Tokens<'a> {
    inner: std::iter::Enumerate<std::str::SplitWhitespace<'a>>,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        Tokens {
            inner: text.split_whitespace().enumerate(),
        }
    }

    fn next_token(&mut self, what: &'static str) -> Result<(usize, &'a str)> {
        self.inner
            .find(|(_, t)| !is_separator(t))
            .ok_or(MeshError::UnexpectedEof(what))
    }

    fn parse<T: FromStr>(&mut self, what: &'static str) -> Result<T> {
        let (position, token) = self.next_token(what)?;
        token.parse().map_err(|_| MeshError::Parse {
            position,
            token: token.to_string(),
        })
    }

    fn count(&mut self, what: &'static str) -> Result<usize> {
        self.parse(what)
    }

    fn real(&mut self, what: &'static str) -> Result<Real> {
        self.parse(what)
    }

    /// An index, or the 32- or 64-bit unsigned maximum for INVALID.
    fn index(&mut self, what: &'static str) -> Result<u32> {
        let (position, token) = self.next_token(what)?;
        match token.parse::<u64>() {
            Ok(u64::MAX) => Ok(INVALID),
            Ok(n) => u32::try_from(n).map_err(|_| MeshError::Parse {
                position,
                token: token.to_string(),
            }),
            Err(_) => Err(MeshError::Parse {
                position,
                token: token.to_string(),
            }),
        }
    }

    fn flag(&mut self, what: &'static str) -> Result<bool> {
        let (position, token) = self.next_token(what)?;
        match token {
            "0" => Ok(false),
            "1" => Ok(true),
            _ => Err(MeshError::Parse {
                position,
                token: token.to_string(),
            }),
        }
    }

    fn finish(mut self) -> Result<()> {
        match self.inner.find(|(_, t)| !is_separator(t)) {
            None => Ok(()),
            Some((position, token)) => Err(MeshError::Parse {
                position,
                token: token.to_string(),
            }),
        }
    }
}

/// Counts come from untrusted text; cap the up-front allocation.
fn capacity(count: usize) -> usize {
    count.min(1 << 16)
}

/// Decode a mesh from its text form. References are range-checked and free
/// lists must name released slots; the topology itself is not validated.
pub fn decode(text: &str) -> Result<Mesh> {
    let mut tokens = Tokens::new(text);

    let n = tokens.count("vertex count")?;
    let mut vertices = Vec::with_capacity(capacity(n));
    for _ in 0..n {
        let x = tokens.real("vertex x")?;
        let y = tokens.real("vertex y")?;
        vertices.push(Vertex {
            coordinate: Point::new(x, y),
            incident_edge: tokens.index("vertex incident edge")?,
            is_exist: tokens.flag("vertex flag")?,
        });
    }

    let n = tokens.count("face count")?;
    let mut faces = Vec::with_capacity(capacity(n));
    for _ in 0..n {
        faces.push(Face {
            edge: tokens.index("face edge")?,
            is_exist: tokens.flag("face flag")?,
        });
    }

    let n = tokens.count("half-edge count")?;
    let mut edges = Vec::with_capacity(capacity(n));
    for _ in 0..n {
        edges.push(HalfEdge {
            origin_vertex: tokens.index("half-edge origin")?,
            twin_edge: tokens.index("half-edge twin")?,
            incident_face: tokens.index("half-edge face")?,
            next_edge: tokens.index("half-edge next")?,
            previous_edge: tokens.index("half-edge previous")?,
            is_exist: tokens.flag("half-edge flag")?,
        });
    }

    let free_vertices = read_free_list(&mut tokens, "free vertex")?;
    let free_faces = read_free_list(&mut tokens, "free face")?;
    let free_edges = read_free_list(&mut tokens, "free half-edge")?;
    tokens.finish()?;

    let (nv, nf, ne) = (vertices.len(), faces.len(), edges.len());
    let in_range = |idx: u32, len: usize| idx == INVALID || (idx as usize) < len;

    for (i, v) in vertices.iter().enumerate() {
        if !in_range(v.incident_edge, ne) {
            return Err(corrupt(format!("vertex {i} refers to half-edge {}", v.incident_edge)));
        }
    }
    for (i, f) in faces.iter().enumerate() {
        if !in_range(f.edge, ne) {
            return Err(corrupt(format!("face {i} refers to half-edge {}", f.edge)));
        }
    }
    for (i, e) in edges.iter().enumerate() {
        let refs_ok = in_range(e.origin_vertex, nv)
            && in_range(e.incident_face, nf)
            && [e.twin_edge, e.next_edge, e.previous_edge]
                .iter()
                .all(|&r| in_range(r, ne));
        if !refs_ok {
            return Err(corrupt(format!("half-edge {i} has an out-of-range reference")));
        }
    }

    let vertices = build_arena("vertex", vertices, free_vertices)?;
    let faces = build_arena("face", faces, free_faces)?;
    let edges = build_arena("half-edge", edges, free_edges)?;
    Ok(Mesh::from_arenas(vertices, faces, edges))
}

fn read_free_list(tokens: &mut Tokens<'_>, what: &'static str) -> Result<Vec<u32>> {
    let n = tokens.count(what)?;
    let mut list = Vec::with_capacity(capacity(n));
    for _ in 0..n {
        list.push(tokens.index(what)?);
    }
    Ok(list)
}

fn build_arena<T: Slot>(kind: &str, items: Vec<T>, free_list: Vec<u32>) -> Result<Arena<T>> {
    let arena = Arena::from_parts(items, free_list);
    check_free_list(kind, &arena, MeshError::Corrupt)?;
    Ok(arena)
}

fn corrupt(msg: String) -> MeshError {
    MeshError::Corrupt(msg)
}

impl fmt::Display for Mesh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_text(self, f)
    }
}

impl FromStr for Mesh {
    type Err = MeshError;

    fn from_str(s: &str) -> Result<Self> {
        decode(s)
    }
}
