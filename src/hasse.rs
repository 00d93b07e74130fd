//! Implementation of the Hasse diagram data structure: a directed acyclic
//! graph over groups of species, ordered by character-set inclusion, whose
//! edges are covering relations labeled with signed characters.
//!
//! Vertices and edges live in arenas and are addressed by stable `usize`
//! indices; deleted slots are tombstoned. Explicit in- and out-edge lists per
//! vertex fix the enumeration order of the diagram.

use std::fmt;
use fxhash::FxHashMap;
use crate::rbgraph::RBGraph;
use crate::cust_error::GraphError;

/// State of a character along an edge.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum State {
    /// The paired character is lost.
    Lose,
    /// The paired character is gained.
    Gain,
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lose => write!(f, "-"),
            Self::Gain => write!(f, "+"),
        }
    }
}

/// A character name paired with a state: c+ is gained, c- is lost.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SignedCharacter {
    pub character: String,
    pub state: State,
}

impl SignedCharacter {
    pub fn gain(character: &str) -> Self {
        SignedCharacter { character: character.to_owned(), state: State::Gain }
    }
}

impl fmt::Display for SignedCharacter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.character, self.state)
    }
}

/// A diagram vertex: the group of species sharing one character set.
///
/// `species` keeps insertion (merge) order; `characters` is held sorted and
/// doubles as the canonical key of the vertex.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct HasseVertex {
    pub species: Vec<String>,
    pub characters: Vec<String>,
}

/// A covering relation `source -> target` with its signed-character labels.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct HasseEdge {
    pub source: usize,
    pub target: usize,
    pub signed_characters: Vec<SignedCharacter>,
}

/// The Hasse diagram of the species poset of a maximal reducible graph,
/// together with provenance references to the red-black graph `g` it stems
/// from and the maximal reducible graph `gm` it was built against.
#[derive(Debug)]
pub struct HasseDiagram<'a> {
    vertices: Vec<Option<HasseVertex>>,
    edges: Vec<Option<HasseEdge>>,
    /// Outgoing edge indices per vertex, in insertion order.
    succ: Vec<Vec<usize>>,
    /// Incoming edge indices per vertex, in insertion order.
    pred: Vec<Vec<usize>>,
    /// Canonical-key index: sorted character set -> vertex.
    by_characters: FxHashMap<Vec<String>, usize>,
    g: &'a RBGraph,
    gm: &'a RBGraph,
    num_v: usize,
}

// Static functions
impl<'a> HasseDiagram<'a> {

    /// Creates an empty diagram over the red-black graph `g` and its maximal
    /// reducible graph `gm`.
    pub fn new(g: &'a RBGraph, gm: &'a RBGraph) -> Self {
        HasseDiagram {
            vertices: Vec::new(),
            edges: Vec::new(),
            succ: Vec::new(),
            pred: Vec::new(),
            by_characters: FxHashMap::default(),
            g,
            gm,
            num_v: 0,
        }
    }

    /// Returns the original red-black graph of `self`.
    pub fn orig_g(&self) -> &'a RBGraph {
        self.g
    }

    /// Returns the original maximal reducible graph of `self`.
    pub fn orig_gm(&self) -> &'a RBGraph {
        self.gm
    }

    /// Returns the number of vertices of `self`.
    pub fn num_vertices(&self) -> usize {
        self.num_v
    }

    /// Returns the number of edges of `self`.
    pub fn num_edges(&self) -> usize {
        self.edges.iter().filter(|edge| edge.is_some()).count()
    }

    /// Returns an `Iterator` over all vertices that have not been deleted, in
    /// insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = usize> + '_ {
        self.vertices
            .iter()
            .enumerate()
            .filter_map(|(i, vertex)| if vertex.is_some() { Some(i) } else { None })
    }

    /// Returns an `Iterator` over all edges that have not been deleted, in
    /// insertion order.
    pub fn edges(&self) -> impl Iterator<Item = usize> + '_ {
        self.edges
            .iter()
            .enumerate()
            .filter_map(|(i, edge)| if edge.is_some() { Some(i) } else { None })
    }

    /// Returns the vertex stored at index `v`, or `None` if it was deleted.
    pub fn vertex(&self, v: usize) -> Option<&HasseVertex> {
        self.vertices.get(v).and_then(|vertex| vertex.as_ref())
    }

    /// Returns the edge stored at index `e`, or `None` if it was deleted.
    pub fn edge(&self, e: usize) -> Option<&HasseEdge> {
        self.edges.get(e).and_then(|edge| edge.as_ref())
    }

    /// Returns the vertex holding exactly the sorted character set `key`.
    pub fn vertex_by_characters(&self, key: &[String]) -> Option<usize> {
        self.by_characters.get(key).copied()
    }

    /// Returns an `Iterator` over the outgoing edge indices of `v`.
    pub fn out_edges(&self, v: usize) -> impl Iterator<Item = usize> + '_ {
        self.succ[v].iter().copied()
    }

    /// Returns an `Iterator` over the incoming edge indices of `v`.
    pub fn in_edges(&self, v: usize) -> impl Iterator<Item = usize> + '_ {
        self.pred[v].iter().copied()
    }

    /// Returns the out-degree of `v`, or `None` if `v` was deleted.
    pub fn out_degree(&self, v: usize) -> Option<usize> {
        self.vertices[v].as_ref().map(|_| self.succ[v].len())
    }

    /// Returns the in-degree of `v`, or `None` if `v` was deleted.
    pub fn in_degree(&self, v: usize) -> Option<usize> {
        self.vertices[v].as_ref().map(|_| self.pred[v].len())
    }

    /// Returns the edge `u -> v`, if it exists.
    pub fn edge_between(&self, u: usize, v: usize) -> Option<usize> {
        self.succ.get(u)?.iter().copied().find(|e| {
            self.edges[*e].as_ref().expect("adjacency lists hold live edges").target == v
        })
    }

    /// Returns the first vertex in enumeration order without incoming edges,
    /// or `None` on an empty diagram.
    ///
    /// A poset can have several minimal elements; this returns the first one
    /// encountered, not a canonical minimum.
    pub fn find_source(&self) -> Option<usize> {
        self.vertices().find(|v| self.pred[*v].is_empty())
    }

}

// Dynamic functions
impl<'a> HasseDiagram<'a> {

    /// Adds a vertex grouping `species` with the character set `characters`
    /// and returns its index. The character set is sorted into canonical
    /// order.
    ///
    /// Returns a `GraphError` if a vertex with the same character set already
    /// exists; character sets are unique in a diagram.
    pub fn add_vertex(
        &mut self,
        species: Vec<String>,
        mut characters: Vec<String>,
    ) -> Result<usize, GraphError> {
        characters.sort_unstable();
        if self.by_characters.contains_key(&characters) {
            return Err(GraphError::DuplicateCharacterSet(characters.join(" ")))
        }
        let v = self.vertices.len();
        self.by_characters.insert(characters.clone(), v);
        self.vertices.push(Some(HasseVertex { species, characters }));
        self.succ.push(Vec::new());
        self.pred.push(Vec::new());
        self.num_v += 1;
        Ok(v)
    }

    /// Appends `name` to the species group of `v`.
    /// Returns `false` if `v` was deleted.
    pub fn push_species(&mut self, v: usize, name: &str) -> bool {
        if let Some(ref mut vertex) = self.vertices[v] {
            vertex.species.push(name.to_owned());
            return true
        }
        false
    }

    /// Adds the edge `u -> v` labeled with `signed_characters`.
    /// If the edge already exists no duplicate is added: the label is
    /// replaced and the returned flag is `false`.
    ///
    /// Returns the edge index and whether a new edge was created, or a
    /// `GraphError` if an endpoint is invalid or `u == v`.
    pub fn add_edge(
        &mut self,
        u: usize,
        v: usize,
        signed_characters: Vec<SignedCharacter>,
    ) -> Result<(usize, bool), GraphError> {
        if u >= self.vertices.len() || self.vertices[u].is_none() {
            return Err(GraphError::InvalidVertex(u))
        }
        if v >= self.vertices.len() || self.vertices[v].is_none() {
            return Err(GraphError::InvalidVertex(v))
        }
        if u == v {
            return Err(GraphError::SelfEdge(u))
        }
        if let Some(e) = self.edge_between(u, v) {
            self.edges[e].as_mut().expect("`e` is live").signed_characters = signed_characters;
            return Ok((e, false))
        }
        let e = self.edges.len();
        self.edges.push(Some(HasseEdge { source: u, target: v, signed_characters }));
        self.succ[u].push(e);
        self.pred[v].push(e);
        Ok((e, true))
    }

    /// Tries to delete the edge `e`, unlinking it from both endpoints.
    /// Returns the removed edge, or `None` if nothing was deleted.
    pub fn remove_edge(&mut self, e: usize) -> Option<HasseEdge> {
        let edge = self.edges.get_mut(e)?.take()?;
        self.succ[edge.source].retain(|out| *out != e);
        self.pred[edge.target].retain(|inc| *inc != e);
        Some(edge)
    }

    /// Tries to delete the vertex `v` together with all its incident edges,
    /// leaving every other covering relation intact.
    /// Returns the removed vertex, or `None` if nothing was deleted.
    pub fn remove_vertex(&mut self, v: usize) -> Option<HasseVertex> {
        let vertex = self.vertices.get_mut(v)?.take()?;
        for e in std::mem::take(&mut self.succ[v]) {
            let edge = self.edges[e].take().expect("adjacency lists hold live edges");
            self.pred[edge.target].retain(|inc| *inc != e);
        }
        for e in std::mem::take(&mut self.pred[v]) {
            let edge = self.edges[e].take().expect("adjacency lists hold live edges");
            self.succ[edge.source].retain(|out| *out != e);
        }
        self.by_characters.remove(&vertex.characters);
        self.num_v -= 1;
        Some(vertex)
    }

}

fn write_vertex(f: &mut fmt::Formatter<'_>, vertex: &HasseVertex) -> fmt::Result {
    write!(f, "[ ")?;
    for name in &vertex.species {
        write!(f, "{} ", name)?;
    }
    write!(f, "( ")?;
    for name in &vertex.characters {
        write!(f, "{} ", name)?;
    }
    write!(f, ") ]")
}

impl fmt::Display for HasseDiagram<'_> {
    /// Renders one line per vertex in enumeration order:
    /// `[ s1 s2 ( c1 c2 ) ]: -c3+,c4+-> [ s3 ( c1 c2 c3 c4 ) ];`
    /// repeated per outgoing edge. Diagnostic output, not a stable format.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let vertices: Vec<usize> = self.vertices().collect();
        for (i, v) in vertices.iter().enumerate() {
            write_vertex(f, self.vertex(*v).expect("`v` is live"))?;
            write!(f, ":")?;
            for e in &self.succ[*v] {
                let edge = self.edges[*e].as_ref().expect("adjacency lists hold live edges");
                write!(f, " -")?;
                for (j, sc) in edge.signed_characters.iter().enumerate() {
                    if j > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", sc)?;
                }
                write!(f, "-> ")?;
                write_vertex(f, self.vertex(edge.target).expect("target is live"))?;
                write!(f, ";")?;
            }
            if i + 1 < vertices.len() {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
