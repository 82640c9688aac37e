//! Half-edge mesh data structure.
//!
//! This module provides a half-edge (doubly-connected edge list) representation
//! of a simple polygon and the planar subdivision produced by cutting it with
//! diagonals.
//!
//! # Structure
//!
//! - Each edge is split into two **half-edges** pointing in opposite directions
//! - Each half-edge knows its **twin**, **next** and **prev** half-edges around
//!   its face, its **origin vertex**, and its **face**
//! - Each vertex stores its outgoing boundary half-edge and its notch flag
//! - Each face stores one half-edge on its boundary
//!
//! # Orientation
//!
//! The boundary is stored clockwise. Interior half-edges follow the input
//! order and belong to faces; their twins form the exterior cycle, which has
//! an invalid face ID.
//!
//! # Lifecycle
//!
//! A mesh is built with [`HalfEdgeMesh::add_vertex`] calls followed by one
//! [`HalfEdgeMesh::close_boundary`]. After that the only structural edits are
//! [`HalfEdgeMesh::insert_diagonal`] and [`HalfEdgeMesh::remove_diagonal`].
//! Removed half-edge pairs and faces are retired to free lists and their slots
//! are reused by later insertions.

use log::{debug, trace};
use nalgebra::Point2;

use super::index::{FaceId, HalfEdgeId, MeshIndex, VertexId};
use super::registry::DiagonalRegistry;
use crate::error::{MeshError, Result};
use crate::geometry::{is_convex_ring, is_notch};

/// A vertex of the polygon boundary.
#[derive(Debug, Clone)]
pub struct Vertex<I: MeshIndex = u32> {
    /// The 2D position of this vertex.
    pub position: Point2<f64>,

    /// The interior boundary half-edge leaving this vertex.
    /// Invalid until the edge to the following vertex exists.
    pub halfedge: HalfEdgeId<I>,

    /// True if the vertex is reflex on the closed input boundary.
    pub notch: bool,
}

impl<I: MeshIndex> Vertex<I> {
    /// Create a new vertex at the given position.
    pub fn new(position: Point2<f64>) -> Self {
        Self {
            position,
            halfedge: HalfEdgeId::invalid(),
            notch: false,
        }
    }
}

/// A half-edge in the mesh.
#[derive(Debug, Clone, Copy)]
pub struct HalfEdge<I: MeshIndex = u32> {
    /// The vertex this half-edge originates from. Invalid once retired.
    pub origin: VertexId<I>,

    /// The opposite half-edge.
    pub twin: HalfEdgeId<I>,

    /// The next half-edge around the face.
    pub next: HalfEdgeId<I>,

    /// The previous half-edge around the face.
    pub prev: HalfEdgeId<I>,

    /// The face this half-edge bounds. Invalid on the exterior cycle.
    pub face: FaceId<I>,
}

impl<I: MeshIndex> HalfEdge<I> {
    /// Create a new unlinked half-edge.
    pub fn new() -> Self {
        Self {
            origin: VertexId::invalid(),
            twin: HalfEdgeId::invalid(),
            next: HalfEdgeId::invalid(),
            prev: HalfEdgeId::invalid(),
            face: FaceId::invalid(),
        }
    }

    /// Returns true if this half-edge lies on the exterior cycle.
    #[inline]
    pub fn is_exterior(&self) -> bool {
        !self.face.is_valid()
    }
}

impl<I: MeshIndex> Default for HalfEdge<I> {
    fn default() -> Self {
        Self::new()
    }
}

/// A face of the subdivision.
#[derive(Debug, Clone, Copy)]
pub struct Face<I: MeshIndex = u32> {
    /// One half-edge on the boundary of this face. Invalid once retired.
    pub halfedge: HalfEdgeId<I>,
}

impl<I: MeshIndex> Face<I> {
    /// Create a new face with the given half-edge.
    pub fn new(halfedge: HalfEdgeId<I>) -> Self {
        Self { halfedge }
    }
}

/// A half-edge mesh over a simple polygon and its diagonals.
#[derive(Debug, Clone)]
pub struct HalfEdgeMesh<I: MeshIndex = u32> {
    /// All vertices, in boundary order.
    pub(crate) vertices: Vec<Vertex<I>>,

    /// Half-edge arena. Pairs occupy consecutive slots.
    pub(crate) halfedges: Vec<HalfEdge<I>>,

    /// Face arena.
    pub(crate) faces: Vec<Face<I>>,

    /// Interior half-edge of each boundary edge, in boundary order.
    boundary: Vec<HalfEdgeId<I>>,

    /// Adjacency and diagonal bookkeeping.
    registry: DiagonalRegistry<I>,

    free_halfedges: Vec<HalfEdgeId<I>>,
    free_faces: Vec<FaceId<I>>,
    closed: bool,
}

impl<I: MeshIndex> Default for HalfEdgeMesh<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: MeshIndex> HalfEdgeMesh<I> {
    /// Create a new empty mesh.
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            halfedges: Vec::new(),
            faces: Vec::new(),
            boundary: Vec::new(),
            registry: DiagonalRegistry::new(),
            free_halfedges: Vec::new(),
            free_faces: Vec::new(),
            closed: false,
        }
    }

    /// Create a mesh with room for a polygon of `num_vertices` vertices.
    pub fn with_capacity(num_vertices: usize) -> Self {
        // n boundary pairs plus at most n - 3 diagonal pairs
        let num_halfedges = 4 * num_vertices;
        Self {
            vertices: Vec::with_capacity(num_vertices),
            halfedges: Vec::with_capacity(num_halfedges),
            faces: Vec::with_capacity(num_vertices),
            ..Self::new()
        }
    }

    // ==================== Accessors ====================

    /// Get the number of vertices.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of live half-edges.
    pub fn num_halfedges(&self) -> usize {
        self.halfedges.len() - 2 * self.free_halfedges.len()
    }

    /// Get the number of live faces.
    pub fn num_faces(&self) -> usize {
        self.faces.len() - self.free_faces.len()
    }

    /// Get the number of boundary edges.
    #[inline]
    pub fn num_boundary_edges(&self) -> usize {
        self.boundary.len()
    }

    /// Get the number of diagonals currently in the mesh.
    pub fn num_diagonals(&self) -> usize {
        self.registry.num_diagonals()
    }

    /// Returns true once [`close_boundary`](Self::close_boundary) has succeeded.
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Get a vertex by ID.
    #[inline]
    pub fn vertex(&self, id: VertexId<I>) -> &Vertex<I> {
        &self.vertices[id.index()]
    }

    #[inline]
    fn vertex_mut(&mut self, id: VertexId<I>) -> &mut Vertex<I> {
        &mut self.vertices[id.index()]
    }

    /// Get a half-edge by ID.
    #[inline]
    pub fn halfedge(&self, id: HalfEdgeId<I>) -> &HalfEdge<I> {
        &self.halfedges[id.index()]
    }

    #[inline]
    fn halfedge_mut(&mut self, id: HalfEdgeId<I>) -> &mut HalfEdge<I> {
        &mut self.halfedges[id.index()]
    }

    /// Get a face by ID.
    #[inline]
    pub fn face(&self, id: FaceId<I>) -> &Face<I> {
        &self.faces[id.index()]
    }

    /// Get the position of a vertex.
    #[inline]
    pub fn position(&self, v: VertexId<I>) -> &Point2<f64> {
        &self.vertex(v).position
    }

    /// Returns true if the vertex is a notch of the closed input boundary.
    #[inline]
    pub fn is_notch(&self, v: VertexId<I>) -> bool {
        self.vertex(v).notch
    }

    /// Iterate over the notches of the input boundary.
    pub fn notches(&self) -> impl Iterator<Item = VertexId<I>> + '_ {
        self.vertex_ids().filter(|&v| self.is_notch(v))
    }

    /// Returns true if the two vertices are joined by an edge or a diagonal.
    #[inline]
    pub fn adjacent(&self, v1: VertexId<I>, v2: VertexId<I>) -> bool {
        self.registry.adjacent(v1, v2)
    }

    /// The adjacency and diagonal bookkeeping.
    #[inline]
    pub fn registry(&self) -> &DiagonalRegistry<I> {
        &self.registry
    }

    // ==================== Topology Queries ====================

    /// Get the twin (opposite) half-edge.
    #[inline]
    pub fn twin(&self, he: HalfEdgeId<I>) -> HalfEdgeId<I> {
        self.halfedge(he).twin
    }

    /// Get the next half-edge around the face.
    #[inline]
    pub fn next(&self, he: HalfEdgeId<I>) -> HalfEdgeId<I> {
        self.halfedge(he).next
    }

    /// Get the previous half-edge around the face.
    #[inline]
    pub fn prev(&self, he: HalfEdgeId<I>) -> HalfEdgeId<I> {
        self.halfedge(he).prev
    }

    /// Get the origin vertex of a half-edge.
    #[inline]
    pub fn origin(&self, he: HalfEdgeId<I>) -> VertexId<I> {
        self.halfedge(he).origin
    }

    /// Get the destination vertex of a half-edge.
    #[inline]
    pub fn dest(&self, he: HalfEdgeId<I>) -> VertexId<I> {
        self.origin(self.twin(he))
    }

    /// Get the face of a half-edge.
    #[inline]
    pub fn face_of(&self, he: HalfEdgeId<I>) -> FaceId<I> {
        self.halfedge(he).face
    }

    // ==================== Iteration ====================

    /// Iterate over all vertex IDs, in boundary order.
    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId<I>> + '_ {
        (0..self.vertices.len()).map(VertexId::new)
    }

    /// Iterate over all vertices with their IDs.
    pub fn vertices(&self) -> impl Iterator<Item = (VertexId<I>, &Vertex<I>)> + '_ {
        self.vertices
            .iter()
            .enumerate()
            .map(|(i, v)| (VertexId::new(i), v))
    }

    /// Iterate over live half-edge IDs.
    pub fn halfedge_ids(&self) -> impl Iterator<Item = HalfEdgeId<I>> + '_ {
        self.halfedges
            .iter()
            .enumerate()
            .filter(|(_, he)| he.origin.is_valid())
            .map(|(i, _)| HalfEdgeId::new(i))
    }

    /// Iterate over live face IDs.
    pub fn face_ids(&self) -> impl Iterator<Item = FaceId<I>> + '_ {
        self.faces
            .iter()
            .enumerate()
            .filter(|(_, f)| f.halfedge.is_valid())
            .map(|(i, _)| FaceId::new(i))
    }

    /// Interior half-edges of the boundary edges, in boundary order.
    ///
    /// The last entry is the closing edge once the boundary is closed.
    pub fn boundary_halfedges(&self) -> &[HalfEdgeId<I>] {
        &self.boundary
    }

    /// Retained diagonals, in the order they were inserted.
    pub fn diagonals(&self) -> impl Iterator<Item = HalfEdgeId<I>> + '_ {
        self.registry.diagonals()
    }

    /// Iterate over half-edges around a face.
    pub fn face_halfedges(&self, f: FaceId<I>) -> FaceHalfEdgeIter<'_, I> {
        FaceHalfEdgeIter::new(self, self.face(f).halfedge)
    }

    /// Iterate over vertices of a face.
    pub fn face_vertices(&self, f: FaceId<I>) -> impl Iterator<Item = VertexId<I>> + '_ {
        self.face_halfedges(f).map(|he| self.origin(he))
    }

    /// Positions of the vertices of a face, in cycle order.
    pub fn face_positions(&self, f: FaceId<I>) -> Vec<Point2<f64>> {
        self.face_vertices(f).map(|v| *self.position(v)).collect()
    }

    /// Returns true if every turn around the face is non-reflex.
    pub fn is_convex_face(&self, f: FaceId<I>) -> bool {
        is_convex_ring(&self.face_positions(f))
    }

    // ==================== Construction ====================

    /// Append a boundary vertex.
    ///
    /// From the second vertex on, a boundary half-edge pair joining the
    /// previous vertex to the new one is threaded onto the running chain.
    pub fn add_vertex(&mut self, position: Point2<f64>) -> Result<VertexId<I>> {
        if self.closed {
            return Err(MeshError::InvalidState(
                "cannot add a vertex to a closed boundary".to_string(),
            ));
        }

        let id = VertexId::new(self.vertices.len());
        self.vertices.push(Vertex::new(position));
        if id.index() > 0 {
            self.add_boundary_edge(VertexId::new(id.index() - 1), id);
        }
        Ok(id)
    }

    /// Join the last vertex back to the first and create the initial face.
    ///
    /// Classifies every vertex as notch or not from the closed ring. Fails
    /// with [`MeshError::InvalidPolygon`] if there are fewer than three
    /// vertices or two consecutive vertices coincide.
    pub fn close_boundary(&mut self) -> Result<FaceId<I>> {
        if self.closed {
            return Err(MeshError::InvalidState(
                "boundary is already closed".to_string(),
            ));
        }

        let n = self.vertices.len();
        if self.boundary.len() < 2 {
            return Err(MeshError::invalid_polygon(format!(
                "a closed boundary needs at least 3 vertices, got {}",
                n
            )));
        }
        for i in 0..n {
            let j = (i + 1) % n;
            if self.vertices[i].position == self.vertices[j].position {
                return Err(MeshError::invalid_polygon(format!(
                    "vertices {} and {} coincide, giving a zero-length edge",
                    i, j
                )));
            }
        }

        self.add_boundary_edge(VertexId::new(n - 1), VertexId::new(0));
        self.classify_notches();
        let face = self.add_face(self.boundary[0]);
        self.closed = true;

        debug!(
            "closed boundary with {} vertices, {} notches",
            n,
            self.notches().count()
        );
        Ok(face)
    }

    /// Create a boundary half-edge pair from `from` to `to` and link it after
    /// the current last boundary edge. The closing edge also links to the first.
    fn add_boundary_edge(&mut self, from: VertexId<I>, to: VertexId<I>) {
        let (he, twin) = self.alloc_pair(from, to);

        if let Some(&last) = self.boundary.last() {
            let last_twin = self.twin(last);
            self.halfedge_mut(last).next = he;
            self.halfedge_mut(he).prev = last;
            self.halfedge_mut(last_twin).prev = twin;
            self.halfedge_mut(twin).next = last_twin;
        }

        if to.index() == 0 {
            let first = self.boundary[0];
            let first_twin = self.twin(first);
            self.halfedge_mut(he).next = first;
            self.halfedge_mut(first).prev = he;
            self.halfedge_mut(twin).prev = first_twin;
            self.halfedge_mut(first_twin).next = twin;
        }

        self.boundary.push(he);
        self.vertex_mut(from).halfedge = he;
        self.registry.link_boundary(from, to);
    }

    fn classify_notches(&mut self) {
        let n = self.vertices.len();
        for i in 0..n {
            let notch = is_notch(
                &self.vertices[i].position,
                &self.vertices[(i + 1) % n].position,
                &self.vertices[(i + 2) % n].position,
            );
            self.vertices[(i + 1) % n].notch = notch;
        }
    }

    // ==================== Diagonals ====================

    /// Cut a face with a diagonal joining the endpoints of `piece`.
    ///
    /// `piece` is an ordered sub-ring of vertices, as produced by the split
    /// phase; only its first and last vertices matter. The face whose cycle
    /// contains both is split in two. Returns the new half-edge (running from
    /// the last vertex to the first), or `None` if the endpoints were already
    /// adjacent, in which case nothing changes.
    pub fn insert_diagonal(&mut self, piece: &[VertexId<I>]) -> Result<Option<HalfEdgeId<I>>> {
        let (first, last) = match piece {
            [first, .., last] if first != last => (*first, *last),
            _ => {
                return Err(MeshError::InvalidState(format!(
                    "a diagonal needs two distinct endpoints, got {:?}",
                    piece
                )))
            }
        };
        self.connect(first, last)
    }

    /// Insert a diagonal between `first` and `last`.
    ///
    /// See [`insert_diagonal`](Self::insert_diagonal).
    pub fn connect(
        &mut self,
        first: VertexId<I>,
        last: VertexId<I>,
    ) -> Result<Option<HalfEdgeId<I>>> {
        self.ensure_closed()?;
        if self.registry.adjacent(first, last) {
            trace!("{:?} and {:?} already adjacent, skipping", first, last);
            return Ok(None);
        }

        let (face, first_out, last_out) =
            self.locate_face(first, last)
                .ok_or(MeshError::InconsistentMesh {
                    first: first.index(),
                    last: last.index(),
                })?;

        let (he, twin) = self.alloc_pair(last, first);
        let last_prev = self.prev(last_out);
        let first_prev = self.prev(first_out);

        {
            let e = self.halfedge_mut(he);
            e.next = first_out;
            e.prev = last_prev;
        }
        {
            let e = self.halfedge_mut(twin);
            e.next = last_out;
            e.prev = first_prev;
        }
        self.halfedge_mut(last_prev).next = he;
        self.halfedge_mut(first_prev).next = twin;
        self.halfedge_mut(last_out).prev = twin;
        self.halfedge_mut(first_out).prev = he;

        self.registry.push_diagonal(he, last, first);
        self.retire_face(face);
        self.add_face(he);
        self.add_face(twin);

        trace!("inserted diagonal {:?} -> {:?} as {:?}", last, first, he);
        Ok(Some(he))
    }

    /// Find the first live face whose cycle passes through both vertices.
    ///
    /// Returns the face and the half-edges of that cycle leaving `a` and `b`.
    fn locate_face(
        &self,
        a: VertexId<I>,
        b: VertexId<I>,
    ) -> Option<(FaceId<I>, HalfEdgeId<I>, HalfEdgeId<I>)> {
        self.face_ids().find_map(|f| {
            let mut a_out = None;
            let mut b_out = None;
            for he in self.face_halfedges(f) {
                let v = self.origin(he);
                if v == a {
                    a_out = Some(he);
                } else if v == b {
                    b_out = Some(he);
                }
            }
            Some((f, a_out?, b_out?))
        })
    }

    /// Remove a diagonal, merging its two faces into one.
    ///
    /// The diagonal and its twin are spliced out of their cycles, the
    /// adjacency of the endpoints is forgotten and the diagonal is marked as
    /// dropped. Returns the merged face, rooted at the diagonal's successor.
    pub fn remove_diagonal(&mut self, diagonal: HalfEdgeId<I>) -> Result<FaceId<I>> {
        self.ensure_closed()?;
        if !self.registry.is_diagonal(diagonal) {
            return Err(MeshError::InvalidState(format!(
                "{:?} is not a diagonal of the mesh",
                diagonal
            )));
        }

        let twin = self.twin(diagonal);
        let f1 = self.face_of(diagonal);
        let f2 = self.face_of(twin);
        if !f1.is_valid() || !f2.is_valid() || f1 == f2 {
            return Err(MeshError::InvalidState(format!(
                "{:?} does not separate two faces",
                diagonal
            )));
        }

        let d_prev = self.prev(diagonal);
        let d_next = self.next(diagonal);
        let t_prev = self.prev(twin);
        let t_next = self.next(twin);

        self.halfedge_mut(d_prev).next = t_next;
        self.halfedge_mut(t_next).prev = d_prev;
        self.halfedge_mut(d_next).prev = t_prev;
        self.halfedge_mut(t_prev).next = d_next;

        let vs = self.origin(diagonal);
        let vt = self.origin(twin);
        self.registry.drop_diagonal(diagonal, vs, vt);

        self.retire_face(f1);
        self.retire_face(f2);
        self.retire_pair(diagonal);
        Ok(self.add_face(d_next))
    }

    // ==================== Arena management ====================

    fn alloc_pair(&mut self, from: VertexId<I>, to: VertexId<I>) -> (HalfEdgeId<I>, HalfEdgeId<I>) {
        let he = match self.free_halfedges.pop() {
            Some(he) => he,
            None => {
                let he = HalfEdgeId::new(self.halfedges.len());
                self.halfedges.push(HalfEdge::new());
                self.halfedges.push(HalfEdge::new());
                he
            }
        };
        let twin = HalfEdgeId::new(he.index() + 1);

        *self.halfedge_mut(he) = HalfEdge {
            origin: from,
            twin,
            ..HalfEdge::new()
        };
        *self.halfedge_mut(twin) = HalfEdge {
            origin: to,
            twin: he,
            ..HalfEdge::new()
        };
        (he, twin)
    }

    fn retire_pair(&mut self, he: HalfEdgeId<I>) {
        let twin = self.twin(he);
        let first = if he.index() < twin.index() { he } else { twin };
        *self.halfedge_mut(he) = HalfEdge::new();
        *self.halfedge_mut(twin) = HalfEdge::new();
        self.free_halfedges.push(first);
    }

    /// Create a face rooted at `he` and label every half-edge of its cycle.
    fn add_face(&mut self, he: HalfEdgeId<I>) -> FaceId<I> {
        let face = match self.free_faces.pop() {
            Some(f) => {
                self.faces[f.index()] = Face::new(he);
                f
            }
            None => {
                self.faces.push(Face::new(he));
                FaceId::new(self.faces.len() - 1)
            }
        };

        let mut cur = he;
        loop {
            self.halfedge_mut(cur).face = face;
            cur = self.next(cur);
            if cur == he {
                break;
            }
        }
        face
    }

    fn retire_face(&mut self, f: FaceId<I>) {
        self.faces[f.index()].halfedge = HalfEdgeId::invalid();
        self.free_faces.push(f);
    }

    pub(crate) fn ensure_closed(&self) -> Result<()> {
        if self.closed {
            Ok(())
        } else {
            Err(MeshError::NotClosed)
        }
    }

    // ==================== Validation ====================

    /// Check if the mesh is valid (all connectivity is consistent).
    pub fn is_valid(&self) -> bool {
        for he in self.halfedge_ids() {
            let e = self.halfedge(he);
            if !e.twin.is_valid() || self.twin(e.twin) != he {
                return false;
            }
            if e.next.is_valid() && self.prev(e.next) != he {
                return false;
            }
            if e.prev.is_valid() && self.next(e.prev) != he {
                return false;
            }
        }

        if !self.closed {
            return true;
        }

        let live_halfedges = self.num_halfedges();
        for f in self.face_ids() {
            let mut steps = 0;
            for he in self.face_halfedges(f) {
                if self.face_of(he) != f {
                    return false;
                }
                steps += 1;
                if steps > live_halfedges {
                    return false;
                }
            }
            if steps < 3 {
                return false;
            }
        }

        self.num_faces() == 1 + self.num_diagonals()
    }
}

/// Iterator over half-edges around a face.
pub struct FaceHalfEdgeIter<'a, I: MeshIndex = u32> {
    mesh: &'a HalfEdgeMesh<I>,
    start: HalfEdgeId<I>,
    current: HalfEdgeId<I>,
    done: bool,
}

impl<'a, I: MeshIndex> FaceHalfEdgeIter<'a, I> {
    fn new(mesh: &'a HalfEdgeMesh<I>, start: HalfEdgeId<I>) -> Self {
        Self {
            mesh,
            start,
            current: start,
            done: !start.is_valid(),
        }
    }
}

impl<'a, I: MeshIndex> Iterator for FaceHalfEdgeIter<'a, I> {
    type Item = HalfEdgeId<I>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let result = self.current;
        self.current = self.mesh.next(self.current);

        if self.current == self.start || !self.current.is_valid() {
            self.done = true;
        }

        Some(result)
    }
}
