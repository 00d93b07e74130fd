//! Construction of the Hasse diagram of the species poset of a red-black
//! graph.
//!
//! The pipeline: extract the character set of every species, order the
//! species by ascending set cardinality, insert them one by one into the
//! diagram (merging species with identical sets, adding gain-labeled edges
//! from every vertex whose set is properly included), then remove the edges
//! implied by transitivity.

use fxhash::FxHashSet;
use log::{debug, trace};
use crate::rbgraph::RBGraph;
use crate::hasse::{HasseDiagram, SignedCharacter};

/// Returns, for every species of `gm` in enumeration order, the species
/// vertex and its set of adjacent character names. Edge color does not
/// restrict the set; a species without characters yields the empty set.
pub fn character_sets(gm: &RBGraph) -> Vec<(usize, FxHashSet<String>)> {
    gm.species().map(|s| (s, gm.character_names(s))).collect()
}

/// Builds the Hasse diagram for the poset of the species of `gm`, ordered by
/// character-set inclusion: species s1 precedes s2 iff C(s1) is a subset of
/// C(s2), and edges are the covering relations of that order, labeled with
/// the gained characters. `g` is the red-black graph `gm` stems from and is
/// carried as provenance only.
///
/// Total over well-formed graphs: a graph without species yields the empty
/// diagram.
pub fn hasse_diagram<'a>(g: &'a RBGraph, gm: &'a RBGraph) -> HasseDiagram<'a> {
    let mut sets = character_sets(gm);
    // Ascending cardinality, stable on ties. Every vertex whose set could be
    // included in the current species' set is then already in the diagram,
    // so edges always point forward and the diagram stays acyclic.
    sets.sort_by_key(|(_, set)| set.len());

    let mut hasse = HasseDiagram::new(g, gm);
    for (species, set) in sets {
        let name = gm.name(species).to_owned();
        let mut characters: Vec<String> = set.iter().cloned().collect();
        characters.sort_unstable();
        debug!("C({}) = {{ {} }}", name, characters.join(" "));

        if let Some(u) = hasse.vertex_by_characters(&characters) {
            // identical character set: the species joins the existing vertex
            debug!("Hasse.mod {}", name);
            hasse.push_species(u, &name);
            continue;
        }

        // Covering candidates: every vertex whose character set is properly
        // included in `set`, labeled with the gained difference set.
        let mut new_edges: Vec<(usize, Vec<SignedCharacter>)> = Vec::new();
        let existing: Vec<usize> = hasse.vertices().collect();
        for u in existing {
            let vertex_u = hasse.vertex(u).expect("`u` is live");
            if vertex_u.characters.iter().all(|c| set.contains(c)) {
                let label: Vec<SignedCharacter> = characters
                    .iter()
                    .filter(|c| !vertex_u.characters.contains(*c))
                    .map(|c| SignedCharacter::gain(c))
                    .collect();
                new_edges.push((u, label));
            }
        }

        debug!("Hasse.addV {}", name);
        let v = hasse
            .add_vertex(vec![name], characters)
            .expect("the merge lookup ruled out an equal character set");
        for (u, label) in new_edges {
            hasse.add_edge(u, v, label).expect("`u` and `v` are live and distinct");
        }
    }

    trace!("before transitive reduction:\n{}", hasse);
    transitive_reduction(&mut hasse);
    hasse
}

/// Removes the edges of `hasse` implied by a two-hop path: for every vertex
/// `u` with at least one predecessor `p` and one successor `s`, a direct
/// edge `p -> s` is deleted, its relation being represented by `p -> u -> s`.
///
/// This is a single sweep over depth-2 shortcuts; edges implied only by
/// longer alternate paths are not considered. The pass is idempotent.
pub fn transitive_reduction(hasse: &mut HasseDiagram) {
    let vertices: Vec<usize> = hasse.vertices().collect();
    for u in vertices {
        if hasse.in_degree(u).unwrap_or(0) == 0 || hasse.out_degree(u).unwrap_or(0) == 0 {
            continue
        }
        let sources: Vec<usize> = hasse
            .in_edges(u)
            .map(|e| hasse.edge(e).expect("`e` is live").source)
            .collect();
        let targets: Vec<usize> = hasse
            .out_edges(u)
            .map(|e| hasse.edge(e).expect("`e` is live").target)
            .collect();
        for p in sources {
            for s in &targets {
                if let Some(e) = hasse.edge_between(p, *s) {
                    trace!("Hasse.remE {} -> {}", p, s);
                    hasse.remove_edge(e);
                }
            }
        }
    }
}

/// Removes from `hasse` every vertex grouping at least one active species of
/// `gm`. A species is active if it has red edges incident to it; its vertex
/// leaves the diagram when it becomes active again during a reduction step.
pub fn reduce_diagram(hasse: &mut HasseDiagram, gm: &RBGraph) {
    let vertices: Vec<usize> = hasse.vertices().collect();
    for v in vertices {
        let active = hasse
            .vertex(v)
            .expect("`v` is live")
            .species
            .iter()
            .any(|name| gm.lookup(name).map_or(false, |s| gm.is_active(s)));
        if active {
            debug!("Hasse.remV {}", v);
            hasse.remove_vertex(v);
        }
    }
}
