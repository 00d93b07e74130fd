//! This module contains all custom errors used in this library.

use std::fmt;
use std::error::Error;

#[derive(Debug)]
pub enum GraphError {
    /// A vertex with the given name already exists in the graph.
    DuplicateName(String),
    /// The given vertex index is out of range or was deleted.
    InvalidVertex(usize),
    /// An incidence edge was requested between two vertices that are not a
    /// species/character pair.
    KindMismatch(usize, usize),
    /// A diagram vertex with the given character set already exists.
    DuplicateCharacterSet(String),
    /// A diagram edge was requested from a vertex to itself.
    SelfEdge(usize),
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateName(name) => write!(f, "Graph: Vertex `{}` already exists.", name),
            Self::InvalidVertex(v) => write!(f, "Graph: Vertex `{}` does not exist.", v),
            Self::KindMismatch(u, v) => {
                write!(f, "Graph: `{}` and `{}` are not a species/character pair.", u, v)
            }
            Self::DuplicateCharacterSet(set) => {
                write!(f, "Diagram: A vertex with character set {{ {} }} already exists.", set)
            }
            Self::SelfEdge(v) => write!(f, "Diagram: Self edge on vertex `{}`.", v),
        }
    }
}

impl Error for GraphError {}
