//! Kekulization resolves benzene-order bonds into a concrete alternating
//! single/double assignment.
//!
//! Every atom that needs exactly one double bond to close its electron
//! count must receive one; this is a maximum-matching problem over the
//! delocalized bond subgraph, solved with augmenting paths. Atom and bond
//! indices are preserved, so the result stays comparable index-wise with
//! its source structure.

use std::collections::VecDeque;
use std::fmt;

use petgraph::graph::{EdgeIndex, NodeIndex};

use crate::bond::BondOrder;
use crate::molecule::Molecule;

/// Error returned when no valid Kekulé structure exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KekulizeError {
    /// These atoms need a double bond but could not be matched.
    Unkekulizable(Vec<NodeIndex>),
}

impl fmt::Display for KekulizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unkekulizable(atoms) => {
                write!(f, "cannot kekulize delocalized system: unmatched atoms [")?;
                for (i, idx) in atoms.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", idx.index())?;
                }
                write!(f, "]")
            }
        }
    }
}

impl std::error::Error for KekulizeError {}

/// Produce a copy of the molecule with every benzene-order bond replaced
/// by a concrete single or double bond. Which of the equivalent Kekulé
/// assignments comes out is not specified.
pub fn kekulize(mol: &Molecule) -> Result<Molecule, KekulizeError> {
    let aromatic_edges: Vec<EdgeIndex> = mol
        .bonds()
        .filter(|&e| mol.bond(e).order.is_benzene())
        .collect();
    if aromatic_edges.is_empty() {
        return Ok(mol.clone());
    }

    let n = mol.atom_count();
    let mut aromatic_adj: Vec<Vec<(NodeIndex, EdgeIndex)>> = vec![vec![]; n];
    for &e in &aromatic_edges {
        if let Some((a, b)) = mol.bond_endpoints(e) {
            aromatic_adj[a.index()].push((b, e));
            aromatic_adj[b.index()].push((a, e));
        }
    }

    let needs_double = atoms_needing_double(mol, &aromatic_adj);

    let mut matched_edge: Vec<Option<EdgeIndex>> = vec![None; n];
    let candidates: Vec<NodeIndex> = mol
        .atoms()
        .filter(|&v| needs_double[v.index()])
        .collect();
    for &start in &candidates {
        if matched_edge[start.index()].is_some() {
            continue;
        }
        augment(mol, &aromatic_adj, &needs_double, &mut matched_edge, start);
    }

    let unmatched: Vec<NodeIndex> = candidates
        .iter()
        .copied()
        .filter(|&v| matched_edge[v.index()].is_none())
        .collect();
    if !unmatched.is_empty() {
        return Err(KekulizeError::Unkekulizable(unmatched));
    }

    let matched_edges: std::collections::HashSet<EdgeIndex> =
        matched_edge.iter().filter_map(|e| *e).collect();

    let mut result = mol.clone();
    for &e in &aromatic_edges {
        result.bond_mut(e).order = if matched_edges.contains(&e) {
            BondOrder::Double
        } else {
            BondOrder::Single
        };
    }
    Ok(result)
}

/// An atom needs a double bond when treating all its benzene bonds as
/// single leaves its electron count exactly one short.
fn atoms_needing_double(mol: &Molecule, aromatic_adj: &[Vec<(NodeIndex, EdgeIndex)>]) -> Vec<bool> {
    let n = mol.atom_count();
    let mut needs = vec![false; n];
    for node in mol.atoms() {
        if aromatic_adj[node.index()].is_empty() {
            continue;
        }
        let atom = mol.atom(node);
        let mut assumed: i16 = atom.hydrogen_count as i16;
        for e in mol.bonds_of(node) {
            assumed += match mol.bond(e).order {
                BondOrder::Single | BondOrder::Benzene => 1,
                BondOrder::Double => 2,
                BondOrder::Triple => 3,
            };
        }
        let target = atom.element.valence_electrons() as i16
            - atom.formal_charge as i16
            - 2 * atom.lone_pairs as i16
            - atom.radical_electrons as i16;
        if target - assumed == 1 {
            needs[node.index()] = true;
        }
    }
    needs
}

fn augment(
    mol: &Molecule,
    aromatic_adj: &[Vec<(NodeIndex, EdgeIndex)>],
    needs_double: &[bool],
    matched_edge: &mut [Option<EdgeIndex>],
    start: NodeIndex,
) -> bool {
    let n = mol.atom_count();
    let mut prev: Vec<Option<(NodeIndex, EdgeIndex)>> = vec![None; n];
    let mut visited = vec![false; n];
    let mut queue = VecDeque::new();

    visited[start.index()] = true;
    queue.push_back(start);

    while let Some(u) = queue.pop_front() {
        for &(v, e) in &aromatic_adj[u.index()] {
            if !needs_double[v.index()] || visited[v.index()] {
                continue;
            }
            if Some(e) == matched_edge[u.index()] {
                continue;
            }
            visited[v.index()] = true;
            prev[v.index()] = Some((u, e));

            if matched_edge[v.index()].is_none() {
                flip_path(matched_edge, &prev, start, v);
                return true;
            }

            let matched_e = matched_edge[v.index()].expect("checked above");
            let (ea, eb) = mol.bond_endpoints(matched_e).expect("valid edge");
            let w = if ea == v { eb } else { ea };

            if !visited[w.index()] {
                visited[w.index()] = true;
                prev[w.index()] = Some((v, matched_e));
                queue.push_back(w);
            }
        }
    }
    false
}

fn flip_path(
    matched_edge: &mut [Option<EdgeIndex>],
    prev: &[Option<(NodeIndex, EdgeIndex)>],
    start: NodeIndex,
    end: NodeIndex,
) {
    let mut cur = end;
    let mut is_new_match = true;
    while cur != start {
        let (p, e) = prev[cur.index()].expect("path exists");
        if is_new_match {
            matched_edge[cur.index()] = Some(e);
            matched_edge[p.index()] = Some(e);
        }
        is_new_match = !is_new_match;
        cur = p;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atom::Atom;
    use crate::bond::Bond;
    use crate::element::Element;
    use crate::valence::update_atom_types;

    fn carbon(h: u8) -> Atom {
        let mut a = Atom::new(Element::C);
        a.hydrogen_count = h;
        a
    }

    fn delocalized_benzene() -> Molecule {
        let mut mol = Molecule::new();
        let idx: Vec<_> = (0..6).map(|_| mol.add_atom(carbon(1))).collect();
        for i in 0..6 {
            mol.add_bond(idx[i], idx[(i + 1) % 6], Bond::new(BondOrder::Benzene));
        }
        mol
    }

    fn count_doubles(mol: &Molecule) -> usize {
        mol.bonds().filter(|&e| mol.bond(e).order.is_double()).count()
    }

    #[test]
    fn benzene() {
        let mol = delocalized_benzene();
        let kek = kekulize(&mol).unwrap();
        assert_eq!(count_doubles(&kek), 3);
        assert!(kek.bonds().all(|e| !kek.bond(e).order.is_benzene()));
        assert!(update_atom_types(&kek).is_ok());
    }

    #[test]
    fn indices_preserved() {
        let mol = delocalized_benzene();
        let kek = kekulize(&mol).unwrap();
        assert_eq!(mol.atom_count(), kek.atom_count());
        assert_eq!(mol.bond_count(), kek.bond_count());
        for e in mol.bonds() {
            assert_eq!(mol.bond_endpoints(e), kek.bond_endpoints(e));
        }
    }

    #[test]
    fn non_aromatic_passthrough() {
        let mut mol = Molecule::new();
        let a = mol.add_atom(carbon(2));
        let b = mol.add_atom(carbon(2));
        mol.add_bond(a, b, Bond::new(BondOrder::Double));
        let kek = kekulize(&mol).unwrap();
        assert!(kek.is_identical(&mol));
    }

    #[test]
    fn delocalized_naphthalene() {
        let mut mol = Molecule::new();
        let idx: Vec<_> = (0..10)
            .map(|i| mol.add_atom(carbon(if i == 0 || i == 1 { 0 } else { 1 })))
            .collect();
        let edges = [
            (0, 1),
            (1, 2),
            (2, 3),
            (3, 4),
            (4, 5),
            (5, 0),
            (1, 6),
            (6, 7),
            (7, 8),
            (8, 9),
            (9, 0),
        ];
        for (a, b) in edges {
            mol.add_bond(idx[a], idx[b], Bond::new(BondOrder::Benzene));
        }
        let kek = kekulize(&mol).unwrap();
        assert_eq!(count_doubles(&kek), 5);
        assert!(update_atom_types(&kek).is_ok());
    }

    #[test]
    fn odd_system_fails() {
        // A five-ring of CH carbons has no perfect matching.
        let mut mol = Molecule::new();
        let idx: Vec<_> = (0..5).map(|_| mol.add_atom(carbon(1))).collect();
        for i in 0..5 {
            mol.add_bond(idx[i], idx[(i + 1) % 5], Bond::new(BondOrder::Benzene));
        }
        let result = kekulize(&mol);
        assert!(matches!(result, Err(KekulizeError::Unkekulizable(_))));
    }

    #[test]
    fn error_display() {
        let err = KekulizeError::Unkekulizable(vec![NodeIndex::new(0), NodeIndex::new(4)]);
        let msg = format!("{}", err);
        assert!(msg.contains('0'));
        assert!(msg.contains('4'));
    }
}
