//! Ring perception: simple-cycle enumeration by size.
//!
//! Resonance treatment only ever asks two questions of the ring system:
//! does the molecule have rings at all (cyclomatic number), and what are
//! its six-membered cycles (the sextet candidates). Cycles are enumerated
//! by a bounded DFS anchored at each cycle's lowest-index atom and
//! returned in a normalized orientation, deduplicated.

use petgraph::algo::connected_components;
use petgraph::graph::NodeIndex;

use crate::molecule::Molecule;

/// Number of independent cycles: edges + components − vertices.
pub fn cyclomatic_number(mol: &Molecule) -> usize {
    let v = mol.atom_count();
    let e = mol.bond_count();
    let c = connected_components(mol.graph());
    (e + c).saturating_sub(v)
}

/// All distinct simple cycles with exactly `size` atoms.
pub fn cycles_of_size(mol: &Molecule, size: usize) -> Vec<Vec<NodeIndex>> {
    let mut found: Vec<Vec<NodeIndex>> = Vec::new();
    if size < 3 || cyclomatic_number(mol) == 0 {
        return found;
    }
    for start in mol.atoms() {
        let mut path = vec![start];
        extend_cycle(mol, start, size, &mut path, &mut found);
    }
    found.sort();
    found.dedup();
    found
}

fn extend_cycle(
    mol: &Molecule,
    start: NodeIndex,
    size: usize,
    path: &mut Vec<NodeIndex>,
    found: &mut Vec<Vec<NodeIndex>>,
) {
    let current = *path.last().expect("path never empty");
    if path.len() == size {
        if mol.bond_between(current, start).is_some() {
            found.push(normalize_ring(path));
        }
        return;
    }
    for nb in mol.neighbors(current) {
        // Anchoring at the minimum index makes each cycle discoverable
        // from exactly one start atom (in two directions, which
        // normalization collapses).
        if nb.index() <= start.index() || path.contains(&nb) {
            continue;
        }
        path.push(nb);
        extend_cycle(mol, start, size, path, found);
        path.pop();
    }
}

/// Rotate a ring so its minimum-index atom comes first, then orient it so
/// the second atom is the smaller of the two neighbors of the first.
pub(crate) fn normalize_ring(ring: &[NodeIndex]) -> Vec<NodeIndex> {
    if ring.is_empty() {
        return vec![];
    }
    let min_pos = ring
        .iter()
        .enumerate()
        .min_by_key(|&(_, idx)| idx)
        .map(|(i, _)| i)
        .expect("non-empty ring");

    let len = ring.len();
    let mut normalized = Vec::with_capacity(len);
    for i in 0..len {
        normalized.push(ring[(min_pos + i) % len]);
    }
    if len > 2 && normalized[1] > normalized[len - 1] {
        normalized[1..].reverse();
    }
    normalized
}
