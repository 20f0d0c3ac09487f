// Copyright 2025 Lars Brubaker
// License: MIT
//
// Mutating operations on the mesh store.
//
// Every operation checks all of its preconditions before touching the arenas,
// so an `Err` return leaves the mesh exactly as it was. On success the mesh
// satisfies every invariant checked by `Mesh::validate`.

use std::collections::HashSet;

use log::{debug, trace, warn};

use super::{EdgeIdx, FaceIdx, HalfEdge, Mesh, VertIdx, INVALID};
use crate::error::{MeshError, Result};
use crate::geom::{leftmost_index, signed_area, Point, EPSILON};
use crate::locate::{PointLocator, INSIDE_REGION};

impl Mesh {
    fn require_isolated(&self, v: VertIdx) -> Result<()> {
        self.require_vertex(v)?;
        match self.vertices[v].incident_edge {
            INVALID => Ok(()),
            e => Err(MeshError::precondition(format!(
                "vertex {v} is not isolated (incident half-edge {e})"
            ))),
        }
    }

    /// Claim an empty face with no boundary, to enclose the first polygon.
    pub fn add_outer_face(&mut self) -> FaceIdx {
        let f = self.claim_face();
        debug!("add_outer_face: face {f}");
        f
    }

    /// A vertex with no incident half-edge.
    pub fn add_isolated_vertex(&mut self, coordinate: Point) -> VertIdx {
        let v = self.claim_vertex();
        self.vertices[v].coordinate = coordinate;
        debug!("add_isolated_vertex: vertex {v} at ({coordinate})");
        v
    }

    /// Insert a new vertex in the middle of the segment of `e`.
    ///
    /// `e` keeps its origin and now ends at the new vertex; the new half-edge
    /// leaving the new vertex continues to the old destination. The same is
    /// done for `twin(e)`, and the two halves are re-twinned crosswise.
    pub fn add_vertex_splitting_edge(&mut self, coordinate: Point, e: EdgeIdx) -> Result<VertIdx> {
        self.require_edge(e)?;
        let twin = self.twin(e);
        self.require_edge(twin)?;

        let next = self.next(e);
        let next_after_twin = self.next(twin);
        let face = self.face_of(e);
        let twin_face = self.face_of(twin);

        let v = self.claim_vertex();
        let new_to_next = self.claim_edge();
        let new_to_current = self.claim_edge();

        self.vertices[v].coordinate = coordinate;
        self.vertices[v].incident_edge = new_to_next;

        self.edges[new_to_next] = HalfEdge {
            origin_vertex: v,
            twin_edge: twin,
            incident_face: face,
            next_edge: next,
            previous_edge: e,
            is_exist: true,
        };
        self.edges[new_to_current] = HalfEdge {
            origin_vertex: v,
            twin_edge: e,
            incident_face: twin_face,
            next_edge: next_after_twin,
            previous_edge: twin,
            is_exist: true,
        };

        // Order matters when `next == twin` (the segment hangs off the cycle).
        self.edges[e].next_edge = new_to_next;
        self.edges[e].twin_edge = new_to_current;
        self.edges[next].previous_edge = new_to_next;
        self.edges[twin].next_edge = new_to_current;
        self.edges[twin].twin_edge = new_to_next;
        self.edges[next_after_twin].previous_edge = new_to_current;

        debug!(
            "add_vertex_splitting_edge: vertex {v} splits {e}/{twin}, new half-edges {new_to_next}/{new_to_current}"
        );
        self.debug_assert_invariants("add_vertex_splitting_edge");
        Ok(v)
    }

    /// Hang a new pendant vertex off `origin(e)`, inserting the new segment's
    /// two half-edges just before `e` in its face cycle.
    pub fn add_vertex_before_edge_origin(&mut self, coordinate: Point, e: EdgeIdx) -> Result<VertIdx> {
        self.require_edge(e)?;

        let prev = self.prev(e);
        let current_vertex = self.origin(e);
        let face = self.face_of(e);

        let v = self.claim_vertex();
        let to_new = self.claim_edge();
        let from_new = self.claim_edge();

        self.vertices[v].coordinate = coordinate;
        self.vertices[v].incident_edge = from_new;

        self.edges[to_new] = HalfEdge {
            origin_vertex: current_vertex,
            twin_edge: from_new,
            incident_face: face,
            next_edge: from_new,
            previous_edge: prev,
            is_exist: true,
        };
        self.edges[from_new] = HalfEdge {
            origin_vertex: v,
            twin_edge: to_new,
            incident_face: face,
            next_edge: e,
            previous_edge: to_new,
            is_exist: true,
        };

        self.edges[e].previous_edge = from_new;
        self.edges[prev].next_edge = to_new;

        debug!("add_vertex_before_edge_origin: vertex {v} hangs off vertex {current_vertex} via {to_new}/{from_new}");
        self.debug_assert_invariants("add_vertex_before_edge_origin");
        Ok(v)
    }

    /// Add a chord from `origin(e1)` to `origin(e2)`.
    ///
    /// When both half-edges lie on one face cycle the chord splits that face:
    /// a new face is claimed for whichever of the two resulting cycles is the
    /// inside one, and every boundary cycle of the old face that now lies
    /// geometrically inside the new face is moved over to it. `locator` answers
    /// those containment queries against the detached inside cycle.
    ///
    /// When the half-edges lie on two different cycles of the same face the
    /// chord joins them into one cycle and no face is created.
    ///
    /// Returns the chord's half-edges `(origin(e1) -> origin(e2), reverse)`.
    pub fn add_edge_between_two_edges<L>(
        &mut self,
        e1: EdgeIdx,
        e2: EdgeIdx,
        locator: &L,
    ) -> Result<(EdgeIdx, EdgeIdx)>
    where
        L: PointLocator + ?Sized,
    {
        self.require_edge(e1)?;
        self.require_edge(e2)?;
        let begin_vertex = self.origin(e1);
        let end_vertex = self.origin(e2);
        if begin_vertex == end_vertex {
            return Err(MeshError::precondition(format!(
                "half-edges {e1} and {e2} both start at vertex {begin_vertex}"
            )));
        }

        let cycle = self.cycle_edges(e1)?;
        let split_at = cycle.iter().position(|&e| e == e2);
        let current_face = self.face_of(e1);
        if split_at.is_none() && self.face_of(e2) != current_face {
            return Err(MeshError::precondition(format!(
                "half-edges {e1} and {e2} bound different faces ({current_face} and {})",
                self.face_of(e2)
            )));
        }

        let prev_to_begin = self.prev(e1);
        let prev_to_end = self.prev(e2);

        let begin_to_end = self.claim_edge();
        let end_to_begin = self.claim_edge();

        self.edges[begin_to_end] = HalfEdge {
            origin_vertex: begin_vertex,
            twin_edge: end_to_begin,
            incident_face: current_face,
            next_edge: e2,
            previous_edge: prev_to_begin,
            is_exist: true,
        };
        self.edges[end_to_begin] = HalfEdge {
            origin_vertex: end_vertex,
            twin_edge: begin_to_end,
            incident_face: current_face,
            next_edge: e1,
            previous_edge: prev_to_end,
            is_exist: true,
        };

        self.edges[e1].previous_edge = end_to_begin;
        self.edges[prev_to_begin].next_edge = begin_to_end;
        self.edges[e2].previous_edge = begin_to_end;
        self.edges[prev_to_end].next_edge = end_to_begin;

        let Some(k) = split_at else {
            self.faces[current_face].edge = end_to_begin;
            debug!(
                "add_edge_between_two_edges: chord {begin_to_end}/{end_to_begin} joins two cycles of face {current_face}"
            );
            self.debug_assert_invariants("add_edge_between_two_edges");
            return Ok((begin_to_end, end_to_begin));
        };

        // forward: begin_to_end, e2, ..., prev_to_begin
        // backward: end_to_begin, e1, ..., prev_to_end
        let mut forward = Vec::with_capacity(cycle.len() - k + 1);
        forward.push(begin_to_end);
        forward.extend_from_slice(&cycle[k..]);
        let mut backward = Vec::with_capacity(k + 1);
        backward.push(end_to_begin);
        backward.extend_from_slice(&cycle[..k]);

        let (inside_cycle, outside_cycle) = if self.cycle_winds_inside(&forward) {
            (forward, backward)
        } else {
            (backward, forward)
        };

        let new_face = self.claim_face();
        for &e in &inside_cycle {
            self.edges[e].incident_face = new_face;
        }
        self.faces[new_face].edge = inside_cycle[0];
        self.faces[current_face].edge = outside_cycle[0];

        debug!(
            "add_edge_between_two_edges: chord {begin_to_end}/{end_to_begin} splits face {current_face}, new inside face {new_face}"
        );

        self.reclassify_enclosed_cycles(new_face, current_face, &inside_cycle, &outside_cycle, locator)?;

        self.debug_assert_invariants("add_edge_between_two_edges");
        Ok((begin_to_end, end_to_begin))
    }

    /// Decide whether a freshly closed cycle bounds the inside of the split.
    ///
    /// Counter-clockwise cycles are inside. When the enclosed area vanishes
    /// the leftmost-vertex test takes over: a spur hanging back on itself is
    /// outside, otherwise a negative turn there means counter-clockwise.
    fn cycle_winds_inside(&self, cycle: &[EdgeIdx]) -> bool {
        let ring: Vec<Point> = cycle
            .iter()
            .map(|&e| self.coordinate(self.origin(e)))
            .collect();
        let area = signed_area(&ring);
        if area > EPSILON {
            return true;
        }
        if area < -EPSILON {
            return false;
        }

        warn!("degenerate cycle (area {area}), falling back to the leftmost turn test");
        let Some(i) = leftmost_index(ring.iter().copied()) else {
            return false;
        };
        let left = cycle[i];
        if self.twin(left) == self.prev(left) {
            return false;
        }
        self.turn_angle(left) < -EPSILON
    }

    /// Move every boundary cycle still recorded on `outside_face` whose
    /// vertices lie inside the detached `inside_cycle` over to `inside_face`.
    fn reclassify_enclosed_cycles<L>(
        &mut self,
        inside_face: FaceIdx,
        outside_face: FaceIdx,
        inside_cycle: &[EdgeIdx],
        outside_cycle: &[EdgeIdx],
        locator: &L,
    ) -> Result<()>
    where
        L: PointLocator + ?Sized,
    {
        let on_inside: HashSet<VertIdx> = inside_cycle.iter().map(|&e| self.origin(e)).collect();
        let on_outside: HashSet<EdgeIdx> = outside_cycle.iter().copied().collect();

        let detached = self.detach_cycle(inside_cycle);
        let structure = locator.build(&detached);

        let enclosed: Vec<EdgeIdx> = self
            .edges
            .iter_live()
            .filter(|(e, he)| {
                he.incident_face == outside_face
                    && !on_outside.contains(e)
                    && !on_inside.contains(&he.origin_vertex)
            })
            .map(|(e, _)| e)
            .filter(|&e| {
                let p = self.coordinate(self.origin(e));
                locator.locate(&structure, p) == INSIDE_REGION
            })
            .collect();

        for e in enclosed {
            if self.edges[e].incident_face != outside_face {
                continue;
            }
            for c in self.cycle_edges(e)? {
                trace!("half-edge {c}: face {outside_face} -> {inside_face}");
                self.edges[c].incident_face = inside_face;
            }
        }
        Ok(())
    }

    /// Connect two isolated vertices with a free-floating segment that lies
    /// in the outside face. On a mesh without edges the first empty face (or
    /// a newly claimed one) becomes the outside face.
    pub fn add_edge_between_two_points(
        &mut self,
        begin_vertex: VertIdx,
        end_vertex: VertIdx,
    ) -> Result<(EdgeIdx, EdgeIdx)> {
        self.require_isolated(begin_vertex)?;
        self.require_isolated(end_vertex)?;
        if begin_vertex == end_vertex {
            return Err(MeshError::precondition(format!(
                "cannot connect vertex {begin_vertex} to itself"
            )));
        }

        let existing = if self.edge_count() > 0 {
            Some(self.outside_face()?)
        } else {
            self.faces
                .iter_live()
                .find(|(_, f)| f.edge == INVALID)
                .map(|(f, _)| f)
        };
        let face = existing.unwrap_or_else(|| self.claim_face());

        let begin_to_end = self.claim_edge();
        let end_to_begin = self.claim_edge();

        self.edges[begin_to_end] = HalfEdge {
            origin_vertex: begin_vertex,
            twin_edge: end_to_begin,
            incident_face: face,
            next_edge: end_to_begin,
            previous_edge: end_to_begin,
            is_exist: true,
        };
        self.edges[end_to_begin] = HalfEdge {
            origin_vertex: end_vertex,
            twin_edge: begin_to_end,
            incident_face: face,
            next_edge: begin_to_end,
            previous_edge: begin_to_end,
            is_exist: true,
        };

        self.vertices[begin_vertex].incident_edge = begin_to_end;
        self.vertices[end_vertex].incident_edge = end_to_begin;
        if self.faces[face].edge == INVALID {
            self.faces[face].edge = begin_to_end;
        }

        debug!(
            "add_edge_between_two_points: segment {begin_to_end}/{end_to_begin} between vertices {begin_vertex} and {end_vertex} in face {face}"
        );
        self.debug_assert_invariants("add_edge_between_two_points");
        Ok((begin_to_end, end_to_begin))
    }

    /// Build a filled triangle on three isolated vertices. The inward
    /// half-edges bound a new face, the outward ones bound `outer_face`.
    /// Vertices are taken in counter-clockwise order whatever order they are
    /// passed in.
    pub fn add_triangle_face(
        &mut self,
        first: VertIdx,
        second: VertIdx,
        third: VertIdx,
        outer_face: FaceIdx,
    ) -> Result<FaceIdx> {
        self.require_isolated(first)?;
        self.require_isolated(second)?;
        self.require_isolated(third)?;
        self.require_face(outer_face)?;
        if first == second || second == third || first == third {
            return Err(MeshError::precondition("triangle vertices must be distinct"));
        }
        let area = signed_area(&[
            self.coordinate(first),
            self.coordinate(second),
            self.coordinate(third),
        ]);
        if area.abs() <= EPSILON {
            return Err(MeshError::precondition(format!(
                "triangle {first}, {second}, {third} is degenerate"
            )));
        }
        let (second, third) = if area < 0.0 { (third, second) } else { (second, third) };

        let new_face = self.claim_face();

        let first_to_second = self.claim_edge();
        let second_to_first = self.claim_edge();
        let third_to_second = self.claim_edge();
        let second_to_third = self.claim_edge();
        let third_to_first = self.claim_edge();
        let first_to_third = self.claim_edge();

        self.faces[new_face].edge = first_to_second;
        if self.faces[outer_face].edge == INVALID {
            self.faces[outer_face].edge = second_to_first;
        }

        self.vertices[first].incident_edge = first_to_second;
        self.vertices[second].incident_edge = second_to_third;
        self.vertices[third].incident_edge = third_to_first;

        let mut link = |e: EdgeIdx, origin, twin, face, next, prev| {
            self.edges[e] = HalfEdge {
                origin_vertex: origin,
                twin_edge: twin,
                incident_face: face,
                next_edge: next,
                previous_edge: prev,
                is_exist: true,
            };
        };

        // inward cycle: first -> second -> third -> first
        link(first_to_second, first, second_to_first, new_face, second_to_third, third_to_first);
        link(second_to_third, second, third_to_second, new_face, third_to_first, first_to_second);
        link(third_to_first, third, first_to_third, new_face, first_to_second, second_to_third);

        // outward cycle: second -> first -> third -> second
        link(second_to_first, second, first_to_second, outer_face, first_to_third, third_to_second);
        link(first_to_third, first, third_to_first, outer_face, third_to_second, second_to_first);
        link(third_to_second, third, second_to_third, outer_face, second_to_first, first_to_third);

        debug!("add_triangle_face: face {new_face} on vertices {first}, {second}, {third} inside face {outer_face}");
        self.debug_assert_invariants("add_triangle_face");
        Ok(new_face)
    }

    /// Remove a vertex of degree one together with its segment.
    pub fn remove_pendant_vertex(&mut self, v: VertIdx) -> Result<()> {
        let adjacents = self.adjacent_vertices_and_edges(v)?;
        let &[(neighbor, from_vertex)] = adjacents.as_slice() else {
            return Err(MeshError::precondition(format!(
                "vertex {v} has {} incident segments, expected exactly one",
                adjacents.len()
            )));
        };
        let to_vertex = self.twin(from_vertex);
        let face = self.face_of(from_vertex);

        let previous_to_to_vertex = self.prev(to_vertex);
        let next_after_from_vertex = self.next(from_vertex);

        self.release_vertex(v);
        self.release_edge(from_vertex);
        self.release_edge(to_vertex);

        let dropped = [from_vertex, to_vertex];
        if next_after_from_vertex == to_vertex {
            // The segment was a cycle on its own; the neighbor is now isolated.
            self.vertices[neighbor].incident_edge = INVALID;
            if dropped.contains(&self.faces[face].edge) {
                // another cycle of the same face may survive
                self.faces[face].edge = self
                    .edges
                    .iter_live()
                    .find(|(_, he)| he.incident_face == face)
                    .map_or(INVALID, |(e, _)| e);
            }
        } else {
            self.edges[previous_to_to_vertex].next_edge = next_after_from_vertex;
            self.edges[next_after_from_vertex].previous_edge = previous_to_to_vertex;
            if self.vertices[neighbor].incident_edge == to_vertex {
                self.vertices[neighbor].incident_edge = next_after_from_vertex;
            }
            if dropped.contains(&self.faces[face].edge) {
                self.faces[face].edge = previous_to_to_vertex;
            }
        }

        debug!("remove_pendant_vertex: vertex {v} and half-edges {from_vertex}/{to_vertex} released");
        self.debug_assert_invariants("remove_pendant_vertex");
        Ok(())
    }

    pub fn remove_isolated_vertex(&mut self, v: VertIdx) -> Result<()> {
        self.require_isolated(v)?;
        self.release_vertex(v);
        debug!("remove_isolated_vertex: vertex {v} released");
        self.debug_assert_invariants("remove_isolated_vertex");
        Ok(())
    }

    /// Delete the segment of `e`, merging `face_of(e)` into
    /// `face_of(twin(e))`. The absorbed face is released. Segments with the
    /// same face on both sides are rejected since removing them would not
    /// merge anything.
    pub fn remove_edge(&mut self, e: EdgeIdx) -> Result<FaceIdx> {
        self.require_edge(e)?;
        let t = self.twin(e);
        self.require_edge(t)?;
        let absorbed = self.face_of(e);
        let survivor = self.face_of(t);
        if absorbed == survivor {
            return Err(MeshError::precondition(format!(
                "half-edge {e} has face {absorbed} on both sides"
            )));
        }

        let (pe, ne) = (self.prev(e), self.next(e));
        let (pt, nt) = (self.prev(t), self.next(t));
        let (org, dst) = (self.origin(e), self.origin(t));

        self.edges[pe].next_edge = nt;
        self.edges[nt].previous_edge = pe;
        self.edges[pt].next_edge = ne;
        self.edges[ne].previous_edge = pt;

        if self.vertices[org].incident_edge == e {
            self.vertices[org].incident_edge = nt;
        }
        if self.vertices[dst].incident_edge == t {
            self.vertices[dst].incident_edge = ne;
        }

        self.release_edge(e);
        self.release_edge(t);
        self.release_face(absorbed);

        let moved: Vec<EdgeIdx> = self
            .edges
            .iter_live()
            .filter(|(_, he)| he.incident_face == absorbed)
            .map(|(i, _)| i)
            .collect();
        for i in moved {
            self.edges[i].incident_face = survivor;
        }
        if self.faces[survivor].edge == t {
            self.faces[survivor].edge = ne;
        }

        debug!("remove_edge: half-edges {e}/{t} released, face {absorbed} merged into {survivor}");
        self.debug_assert_invariants("remove_edge");
        Ok(survivor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locate::CrossingLocator;

    fn fresh_triangle(mesh: &mut Mesh, pts: [(f32, f32); 3]) -> ([VertIdx; 3], FaceIdx, FaceIdx) {
        let vs = pts.map(|(x, y)| mesh.add_isolated_vertex(Point::new(x, y)));
        let outer = mesh.add_outer_face();
        let inner = mesh.add_triangle_face(vs[0], vs[1], vs[2], outer).unwrap();
        (vs, outer, inner)
    }

    fn edge_from_to(mesh: &Mesh, a: VertIdx, b: VertIdx) -> EdgeIdx {
        mesh.adjacent_vertices_and_edges(a)
            .unwrap()
            .into_iter()
            .find(|&(n, _)| n == b)
            .map(|(_, e)| e)
            .unwrap()
    }

    #[test]
    fn triangle_counts() {
        let mut mesh = Mesh::new();
        fresh_triangle(&mut mesh, [(0.0, 0.0), (2.0, 0.0), (1.0, 2.0)]);
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.face_count(), 2);
        assert_eq!(mesh.edge_count(), 6);
        mesh.validate().unwrap();
    }

    #[test]
    fn clockwise_triangle_is_reordered() {
        let mut mesh = Mesh::new();
        let ([a, b, c], outer, inner) = fresh_triangle(&mut mesh, [(0.0, 0.0), (1.0, 2.0), (2.0, 0.0)]);
        assert!(mesh.cycle_signed_area(mesh.faces()[inner].edge).unwrap() > 0.0);
        assert_eq!(mesh.outside_face().unwrap(), outer);
        assert_eq!(mesh.face_of(edge_from_to(&mesh, a, c)), inner);
        assert_eq!(mesh.face_of(edge_from_to(&mesh, a, b)), outer);
    }

    #[test]
    fn degenerate_triangle_is_rejected_untouched() {
        let mut mesh = Mesh::new();
        let vs = [(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)].map(|(x, y)| mesh.add_isolated_vertex(Point::new(x, y)));
        let outer = mesh.add_outer_face();
        let before = mesh.clone();
        assert!(mesh.add_triangle_face(vs[0], vs[1], vs[2], outer).is_err());
        assert_eq!(mesh, before);
    }

    #[test]
    fn split_edge_keeps_cycles_closed() {
        let mut mesh = Mesh::new();
        let ([a, b, c], _, inner) = fresh_triangle(&mut mesh, [(0.0, 0.0), (2.0, 0.0), (1.0, 2.0)]);
        let ab = edge_from_to(&mesh, a, b);
        let ba = mesh.twin(ab);
        let m = mesh.add_vertex_splitting_edge(Point::new(1.0, 0.0), ab).unwrap();

        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.edge_count(), 8);
        assert_eq!(mesh.destination(ab), m);
        assert_eq!(mesh.destination(ba), m);

        let order: Vec<VertIdx> = mesh.cycle_edges(ab).unwrap().iter().map(|&e| mesh.origin(e)).collect();
        assert_eq!(order, vec![a, m, b, c]);
        assert_eq!(mesh.count_face_edges(inner).unwrap(), 4);

        let m_out = mesh.vertices()[m].incident_edge;
        assert_eq!(mesh.twin(m_out), ba);
        assert_eq!(mesh.twin(mesh.twin(ab)), ab);
    }

    #[test]
    fn split_dead_edge_is_rejected() {
        let mut mesh = Mesh::new();
        assert!(matches!(
            mesh.add_vertex_splitting_edge(Point::new(0.0, 0.0), 7),
            Err(MeshError::Precondition(_))
        ));
    }

    #[test]
    fn pendant_insert_and_remove() {
        let mut mesh = Mesh::new();
        let ([a, b, _], outer, _) = fresh_triangle(&mut mesh, [(0.0, 0.0), (2.0, 0.0), (1.0, 2.0)]);
        let ba = edge_from_to(&mesh, b, a);
        let p = mesh.add_vertex_before_edge_origin(Point::new(3.0, -1.0), ba).unwrap();
        assert_eq!(mesh.count_face_edges(outer).unwrap(), 5);
        assert_eq!(mesh.adjacent_vertices(p).unwrap(), vec![b]);
        assert_eq!(mesh.face_of(mesh.vertices()[p].incident_edge), outer);

        mesh.remove_pendant_vertex(p).unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.edge_count(), 6);
        assert_eq!(mesh.count_face_edges(outer).unwrap(), 3);
        let q = mesh.add_isolated_vertex(Point::new(5.0, 5.0));
        assert_eq!(q, p);
    }

    #[test]
    fn remove_non_pendant_is_rejected() {
        let mut mesh = Mesh::new();
        let ([a, _, _], _, _) = fresh_triangle(&mut mesh, [(0.0, 0.0), (2.0, 0.0), (1.0, 2.0)]);
        let before = mesh.clone();
        assert!(mesh.remove_pendant_vertex(a).is_err());
        assert_eq!(mesh, before);
    }

    #[test]
    fn lone_segment_then_removal_isolates_neighbor() {
        let mut mesh = Mesh::new();
        let a = mesh.add_isolated_vertex(Point::new(0.0, 0.0));
        let b = mesh.add_isolated_vertex(Point::new(1.0, 0.0));
        let (ab, ba) = mesh.add_edge_between_two_points(a, b).unwrap();
        assert_eq!(mesh.face_count(), 1);
        assert_eq!(mesh.next(ab), ba);
        assert_eq!(mesh.outside_face().unwrap(), mesh.face_of(ab));

        mesh.remove_pendant_vertex(b).unwrap();
        assert_eq!(mesh.vertices()[a].incident_edge, INVALID);
        assert_eq!(mesh.edge_count(), 0);
        mesh.remove_isolated_vertex(a).unwrap();
        assert!(mesh.is_empty());
    }

    #[test]
    fn connecting_non_isolated_points_is_rejected() {
        let mut mesh = Mesh::new();
        let ([a, b, _], _, _) = fresh_triangle(&mut mesh, [(0.0, 0.0), (2.0, 0.0), (1.0, 2.0)]);
        assert!(mesh.add_edge_between_two_points(a, b).is_err());
    }

    #[test]
    fn chord_splits_square() {
        let mut mesh = Mesh::new();
        let ([a, b, c], _, inner) = fresh_triangle(&mut mesh, [(0.0, 0.0), (2.0, 0.0), (2.0, 2.0)]);
        let ca = edge_from_to(&mesh, c, a);
        let d = mesh.add_vertex_splitting_edge(Point::new(0.0, 2.0), ca).unwrap();
        assert_eq!(mesh.count_face_edges(inner).unwrap(), 4);

        let ab = edge_from_to(&mesh, a, b);
        let cd = edge_from_to(&mesh, c, d);
        assert_eq!(mesh.face_of(cd), inner);
        let (ac, ca2) = mesh.add_edge_between_two_edges(ab, cd, &CrossingLocator).unwrap();

        assert_eq!(mesh.face_count(), 3);
        assert_eq!(mesh.cycle_edges(ac).unwrap().len(), 3);
        assert_eq!(mesh.cycle_edges(ca2).unwrap().len(), 3);
        assert_ne!(mesh.face_of(ac), mesh.face_of(ca2));
        assert!(mesh.cycle_signed_area(ac).unwrap() > 0.0);
        assert!(mesh.cycle_signed_area(ca2).unwrap() > 0.0);
        assert!(mesh.is_points_connected(a, c).unwrap());

        // merging back restores a single quad face
        let survivor = mesh.remove_edge(ac).unwrap();
        assert_eq!(mesh.face_count(), 2);
        assert_eq!(mesh.count_face_edges(survivor).unwrap(), 4);
        assert!(!mesh.is_points_connected(a, c).unwrap());
    }

    /// Answers the same region for every query.
    struct Fixed(u32);

    impl PointLocator for Fixed {
        type Structure = ();
        fn build(&self, _: &Mesh) {}
        fn locate(&self, _: &(), _: Point) -> u32 {
            self.0
        }
    }

    /// Square face 0..4 with a triangular hole near its lower-left corner.
    /// Returns the mesh, the chord endpoints and one outward hole half-edge.
    fn square_with_hole() -> (Mesh, EdgeIdx, EdgeIdx, EdgeIdx) {
        let mut mesh = Mesh::new();
        let ([a, b, c], _, square) = fresh_triangle(&mut mesh, [(0.0, 0.0), (4.0, 0.0), (4.0, 4.0)]);
        let ca = edge_from_to(&mesh, c, a);
        let d = mesh.add_vertex_splitting_edge(Point::new(0.0, 4.0), ca).unwrap();
        let hole = [(0.5, 0.5), (1.5, 0.5), (1.0, 1.5)].map(|(x, y)| mesh.add_isolated_vertex(Point::new(x, y)));
        mesh.add_triangle_face(hole[0], hole[1], hole[2], square).unwrap();
        let outward = edge_from_to(&mesh, hole[0], hole[2]);
        assert_eq!(mesh.face_of(outward), square);
        let (e1, e2) = (edge_from_to(&mesh, b, c), edge_from_to(&mesh, d, a));
        (mesh, e1, e2, outward)
    }

    #[test]
    fn reclassification_follows_the_locator() {
        let (mut mesh, e1, e2, outward) = square_with_hole();
        let (_, back) = mesh.add_edge_between_two_edges(e1, e2, &Fixed(INSIDE_REGION)).unwrap();
        assert_ne!(mesh.face_of(outward), mesh.face_of(back));

        let (mut mesh, e1, e2, outward) = square_with_hole();
        let (_, back) = mesh
            .add_edge_between_two_edges(e1, e2, &Fixed(crate::locate::OUTSIDE_REGION))
            .unwrap();
        assert_eq!(mesh.face_of(outward), mesh.face_of(back));
    }

    #[test]
    fn bridge_edge_cannot_be_merged() {
        let mut mesh = Mesh::new();
        let a = mesh.add_isolated_vertex(Point::new(0.0, 0.0));
        let b = mesh.add_isolated_vertex(Point::new(1.0, 0.0));
        let (ab, _) = mesh.add_edge_between_two_points(a, b).unwrap();
        assert!(matches!(mesh.remove_edge(ab), Err(MeshError::Precondition(_))));
    }
}
