//! Implementation of the red-black incidence structure: a bipartite graph of
//! species and character vertices whose edges carry a color denoting an
//! active (red) or inactive (black) relation.
//!
//! The Hasse diagram core only reads this structure; reduction steps that
//! mutate it live outside this library.

use fxhash::{FxHashMap, FxHashSet};
use crate::cust_error::GraphError;

/// The two vertex kinds of a red-black graph.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum VertexKind {
    Species,
    Character,
}

/// Edge color. A red edge denotes an active relation between a species and a
/// character, a black edge an inactive one.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum EdgeColor {
    Black,
    Red,
}

#[derive(Debug, Eq, PartialEq, Clone)]
struct RBVertex {
    name: String,
    kind: VertexKind,
}

/// A bipartite species/character graph with colored edges.
///
/// Vertices are addressed by stable `usize` indices in insertion order.
#[derive(Debug, Eq, PartialEq, Clone, Default)]
pub struct RBGraph {
    vertices: Vec<RBVertex>,
    adj: Vec<FxHashMap<usize, EdgeColor>>,
    names: FxHashMap<String, usize>,
}

// Construction
impl RBGraph {

    pub fn new() -> Self {
        RBGraph::default()
    }

    fn add_rb_vertex(&mut self, name: &str, kind: VertexKind) -> Result<usize, GraphError> {
        if self.names.contains_key(name) {
            return Err(GraphError::DuplicateName(name.to_owned()))
        }
        let v = self.vertices.len();
        self.vertices.push(RBVertex { name: name.to_owned(), kind });
        self.adj.push(FxHashMap::default());
        self.names.insert(name.to_owned(), v);
        Ok(v)
    }

    /// Adds a species vertex named `name`.
    /// Returns the index of the new vertex, or a `GraphError` if the name is
    /// already taken.
    pub fn add_species(&mut self, name: &str) -> Result<usize, GraphError> {
        self.add_rb_vertex(name, VertexKind::Species)
    }

    /// Adds a character vertex named `name`.
    /// Returns the index of the new vertex, or a `GraphError` if the name is
    /// already taken.
    pub fn add_character(&mut self, name: &str) -> Result<usize, GraphError> {
        self.add_rb_vertex(name, VertexKind::Character)
    }

    /// Adds an edge of the given color between `species` and `character`.
    /// Re-adding an existing edge only updates its color.
    ///
    /// Returns a `GraphError` if either index is out of range or the
    /// endpoints are not a species/character pair.
    pub fn add_edge(
        &mut self,
        species: usize,
        character: usize,
        color: EdgeColor,
    ) -> Result<(), GraphError> {
        if species >= self.vertices.len() {
            return Err(GraphError::InvalidVertex(species))
        }
        if character >= self.vertices.len() {
            return Err(GraphError::InvalidVertex(character))
        }
        if !self.is_species(species) || !self.is_character(character) {
            return Err(GraphError::KindMismatch(species, character))
        }
        self.adj[species].insert(character, color);
        self.adj[character].insert(species, color);
        Ok(())
    }

    /// Adds a black (inactive) edge between `species` and `character`.
    pub fn add_black_edge(&mut self, species: usize, character: usize) -> Result<(), GraphError> {
        self.add_edge(species, character, EdgeColor::Black)
    }

}

// Queries
impl RBGraph {

    /// Returns the number of vertices of `self`, species and characters.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of species vertices of `self`.
    pub fn num_species(&self) -> usize {
        self.species().count()
    }

    /// Returns the number of character vertices of `self`.
    pub fn num_characters(&self) -> usize {
        self.characters().count()
    }

    /// Returns an `Iterator` over all species vertices in insertion order.
    pub fn species(&self) -> impl Iterator<Item = usize> + '_ {
        self.vertices
            .iter()
            .enumerate()
            .filter_map(|(i, vertex)| {
                if vertex.kind == VertexKind::Species {
                    Some(i)
                } else {
                    None
                }
            })
    }

    /// Returns an `Iterator` over all character vertices in insertion order.
    pub fn characters(&self) -> impl Iterator<Item = usize> + '_ {
        self.vertices
            .iter()
            .enumerate()
            .filter_map(|(i, vertex)| {
                if vertex.kind == VertexKind::Character {
                    Some(i)
                } else {
                    None
                }
            })
    }

    /// Returns the name of `vertex`.
    pub fn name(&self, vertex: usize) -> &str {
        &self.vertices[vertex].name
    }

    /// Returns the index of the vertex named `name`, if any.
    pub fn lookup(&self, name: &str) -> Option<usize> {
        self.names.get(name).copied()
    }

    /// Checks if `vertex` is a species vertex.
    pub fn is_species(&self, vertex: usize) -> bool {
        self.vertices[vertex].kind == VertexKind::Species
    }

    /// Checks if `vertex` is a character vertex.
    pub fn is_character(&self, vertex: usize) -> bool {
        self.vertices[vertex].kind == VertexKind::Character
    }

    /// Returns an `Iterator` over the neighbors of `vertex` with the color of
    /// the connecting edge. No order is guaranteed.
    pub fn adjacent(&self, vertex: usize) -> impl Iterator<Item = (usize, EdgeColor)> + '_ {
        self.adj[vertex].iter().map(|(neigh, color)| (*neigh, *color))
    }

    /// Returns the degree of `vertex`.
    pub fn degree(&self, vertex: usize) -> usize {
        self.adj[vertex].len()
    }

    /// Returns the set of character names adjacent to the species `vertex`,
    /// regardless of edge color. An isolated species yields the empty set.
    pub fn character_names(&self, vertex: usize) -> FxHashSet<String> {
        self.adj[vertex]
            .keys()
            .map(|neigh| self.vertices[*neigh].name.clone())
            .collect()
    }

    /// Checks if the character `vertex` is universal, that is, connected to
    /// every species of `self` by a black edge.
    pub fn is_universal(&self, vertex: usize) -> bool {
        if !self.is_character(vertex) {
            return false
        }
        let inactive = self.adj[vertex]
            .values()
            .filter(|color| **color == EdgeColor::Black)
            .count();
        inactive == self.num_species()
    }

    /// Checks if the species `vertex` is active, that is, incident to at
    /// least one red edge.
    pub fn is_active(&self, vertex: usize) -> bool {
        self.adj[vertex].values().any(|color| *color == EdgeColor::Red)
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds the fixture graph: species s3, s4, s5, characters c1 to c8,
    /// with all c4 incidences red.
    fn fixture() -> RBGraph {
        let mut g = RBGraph::new();
        let s3 = g.add_species("s3").unwrap();
        let s4 = g.add_species("s4").unwrap();
        let s5 = g.add_species("s5").unwrap();
        let cs: Vec<usize> = (1..=8)
            .map(|i| g.add_character(&format!("c{}", i)).unwrap())
            .collect();
        g.add_black_edge(s3, cs[1]).unwrap();
        g.add_black_edge(s3, cs[2]).unwrap();
        g.add_edge(s3, cs[3], EdgeColor::Red).unwrap();
        g.add_black_edge(s4, cs[0]).unwrap();
        g.add_black_edge(s4, cs[1]).unwrap();
        g.add_edge(s4, cs[3], EdgeColor::Red).unwrap();
        g.add_black_edge(s5, cs[0]).unwrap();
        g.add_black_edge(s5, cs[1]).unwrap();
        g.add_black_edge(s5, cs[2]).unwrap();
        g.add_edge(s5, cs[3], EdgeColor::Red).unwrap();
        g.add_black_edge(s5, cs[4]).unwrap();
        g.add_black_edge(s5, cs[6]).unwrap();
        g
    }

    #[test]
    fn universal_test() {
        let g = fixture();
        assert!(!g.is_universal(g.lookup("s3").unwrap()));
        assert!(!g.is_universal(g.lookup("c5").unwrap()));
        assert!(!g.is_universal(g.lookup("c4").unwrap()));
        assert!(g.is_universal(g.lookup("c2").unwrap()));
    }

    #[test]
    fn counts_test() {
        let g = fixture();
        assert_eq!(g.num_vertices(), 11);
        assert_eq!(g.num_species(), 3);
        assert_eq!(g.num_characters(), 8);
        assert_eq!(g.degree(g.lookup("s5").unwrap()), 6);
        assert_eq!(g.degree(g.lookup("c8").unwrap()), 0);
        let red = g
            .adjacent(g.lookup("s5").unwrap())
            .filter(|(_, color)| *color == EdgeColor::Red)
            .count();
        assert_eq!(red, 1);
    }

    #[test]
    fn character_names_ignores_color_test() {
        let g = fixture();
        let set = g.character_names(g.lookup("s3").unwrap());
        let expected: FxHashSet<String> =
            ["c2", "c3", "c4"].iter().map(|c| c.to_string()).collect();
        assert_eq!(set, expected);
    }

    #[test]
    fn active_test() {
        let g = fixture();
        assert!(g.is_active(g.lookup("s3").unwrap()));
        let mut g2 = RBGraph::new();
        let s = g2.add_species("s1").unwrap();
        let c = g2.add_character("c1").unwrap();
        g2.add_black_edge(s, c).unwrap();
        assert!(!g2.is_active(s));
    }

    #[test]
    fn construction_errors_test() {
        let mut g = RBGraph::new();
        let s = g.add_species("s1").unwrap();
        let c = g.add_character("c1").unwrap();
        assert!(g.add_species("s1").is_err());
        assert!(g.add_character("s1").is_err());
        assert!(g.add_edge(c, s, EdgeColor::Black).is_err());
        assert!(g.add_edge(s, s, EdgeColor::Black).is_err());
        assert!(g.add_edge(s, 7, EdgeColor::Black).is_err());
    }

}
