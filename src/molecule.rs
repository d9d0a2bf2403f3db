use petgraph::algo::is_isomorphic_matching;
use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;

use crate::atom::Atom;
use crate::bond::Bond;
use crate::valence;

/// A molecular graph: atoms on nodes, bonds on edges.
///
/// Every enumerated resonance structure is an independently owned clone of
/// the input molecule; all structures of one enumeration share the same
/// node and edge numbering, which is what makes index-wise comparison
/// (`is_identical`) and index-based mutation of clones possible.
pub struct Molecule {
    graph: UnGraph<Atom, Bond>,
}

impl Molecule {
    pub fn new() -> Self {
        Self {
            graph: UnGraph::default(),
        }
    }

    pub fn graph(&self) -> &UnGraph<Atom, Bond> {
        &self.graph
    }

    pub fn add_atom(&mut self, atom: Atom) -> NodeIndex {
        self.graph.add_node(atom)
    }

    pub fn add_bond(&mut self, a: NodeIndex, b: NodeIndex, bond: Bond) -> EdgeIndex {
        self.graph.add_edge(a, b, bond)
    }

    pub fn atom(&self, idx: NodeIndex) -> &Atom {
        &self.graph[idx]
    }

    pub fn atom_mut(&mut self, idx: NodeIndex) -> &mut Atom {
        &mut self.graph[idx]
    }

    pub fn bond(&self, idx: EdgeIndex) -> &Bond {
        &self.graph[idx]
    }

    pub fn bond_mut(&mut self, idx: EdgeIndex) -> &mut Bond {
        &mut self.graph[idx]
    }

    pub fn atom_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn bond_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn atoms(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    pub fn bonds(&self) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.graph.edge_indices()
    }

    pub fn neighbors(&self, idx: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.neighbors(idx)
    }

    pub fn bonds_of(&self, idx: NodeIndex) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.graph.edges(idx).map(|e| e.id())
    }

    pub fn bond_between(&self, a: NodeIndex, b: NodeIndex) -> Option<EdgeIndex> {
        self.graph.find_edge(a, b)
    }

    pub fn bond_endpoints(&self, idx: EdgeIndex) -> Option<(NodeIndex, NodeIndex)> {
        self.graph.edge_endpoints(idx)
    }

    /// Sum of incident bond orders, counting each implicit hydrogen as a
    /// single bond. Fractional when benzene bonds are present.
    pub fn bond_order_sum(&self, idx: NodeIndex) -> f64 {
        let bonds: f64 = self
            .bonds_of(idx)
            .map(|e| self.bond(e).order.order_value())
            .sum();
        bonds + self.atom(idx).hydrogen_count as f64
    }

    pub fn radical_count(&self) -> u32 {
        self.atoms()
            .map(|idx| self.atom(idx).radical_electrons as u32)
            .sum()
    }

    pub fn is_radical(&self) -> bool {
        self.radical_count() > 0
    }

    pub fn has_nitrogen(&self) -> bool {
        self.atoms().any(|idx| self.atom(idx).is_nitrogen())
    }

    pub fn has_oxygen(&self) -> bool {
        self.atoms().any(|idx| self.atom(idx).is_oxygen())
    }

    pub fn has_lone_pairs(&self) -> bool {
        self.atoms().any(|idx| self.atom(idx).lone_pairs > 0)
    }

    /// Cyclomatic number > 0, i.e. at least one ring exists.
    pub fn is_cyclic(&self) -> bool {
        crate::rings::cyclomatic_number(self) > 0
    }

    /// A molecule is in its delocalized form when any bond carries the
    /// benzene order.
    pub fn is_aromatic(&self) -> bool {
        self.bonds().any(|e| self.bond(e).order.is_benzene())
    }

    /// True when every radical electron sits on an atom belonging to one of
    /// the given aromatic rings. Such a radical lies in the ring plane,
    /// orthogonal to the pi system, and does not delocalize into it.
    pub fn is_aryl_radical(&self, aromatic_rings: &[Vec<NodeIndex>]) -> bool {
        let total = self.radical_count();
        let on_ring: u32 = self
            .atoms()
            .filter(|idx| aromatic_rings.iter().any(|ring| ring.contains(idx)))
            .map(|idx| self.atom(idx).radical_electrons as u32)
            .sum();
        total == on_ring
    }

    /// Recompute the formal charge of one atom from its electron
    /// bookkeeping. Left untouched if the bond pattern has no integral
    /// electron count (revalidation will reject such a structure anyway).
    pub fn update_charge(&mut self, idx: NodeIndex) {
        if let Some(bond_electrons) = valence::effective_bond_electrons(self, idx) {
            let atom = self.atom(idx);
            let charge = atom.element.valence_electrons() as i16
                - 2 * atom.lone_pairs as i16
                - atom.radical_electrons as i16
                - bond_electrons;
            self.atom_mut(idx).formal_charge = charge as i8;
        }
    }

    /// Recompute the structural fingerprints used to short-circuit
    /// isomorphism checks. These depend only on connectivity, never on the
    /// electronic assignment, so one computation serves every resonance
    /// form of the molecule.
    pub fn update_connectivity_values(&mut self) {
        let indices: Vec<NodeIndex> = self.atoms().collect();
        for (label, &idx) in indices.iter().enumerate() {
            let degree = self.neighbors(idx).count() as u32 + self.atom(idx).hydrogen_count as u32;
            let atom = self.atom_mut(idx);
            atom.connectivity1 = degree;
            atom.sorting_label = label as i32;
        }
        for &idx in &indices {
            let sum: u32 = self.neighbors(idx).map(|n| self.atom(n).connectivity1).sum();
            self.atom_mut(idx).connectivity2 = sum;
        }
        for &idx in &indices {
            let sum: u32 = self.neighbors(idx).map(|n| self.atom(n).connectivity2).sum();
            self.atom_mut(idx).connectivity3 = sum;
        }
    }

    /// Graph isomorphism over elements and electronic assignments. Two
    /// resonance structures are isomorphic when some relabeling of atoms
    /// maps one exactly onto the other.
    pub fn is_isomorphic(&self, other: &Molecule) -> bool {
        if self.atom_count() != other.atom_count() || self.bond_count() != other.bond_count() {
            return false;
        }
        if !self.fingerprints_match(other) {
            return false;
        }
        is_isomorphic_matching(
            &self.graph,
            &other.graph,
            |a, b| a.equivalent(b),
            |a, b| a.order == b.order,
        )
    }

    /// Exact equality of the electronic assignment under the shared atom
    /// numbering: same radical, lone-pair, and charge placement, same bond
    /// orders on the same edges.
    pub fn is_identical(&self, other: &Molecule) -> bool {
        if self.atom_count() != other.atom_count() || self.bond_count() != other.bond_count() {
            return false;
        }
        for idx in self.atoms() {
            if !self.atom(idx).equivalent(other.atom(idx)) {
                return false;
            }
        }
        for idx in self.bonds() {
            if self.bond(idx).order != other.bond(idx).order {
                return false;
            }
            if self.bond_endpoints(idx) != other.bond_endpoints(idx) {
                return false;
            }
        }
        true
    }

    fn fingerprints_match(&self, other: &Molecule) -> bool {
        let mut a: Vec<(u32, u32, u32)> = self
            .atoms()
            .map(|idx| {
                let at = self.atom(idx);
                (at.connectivity1, at.connectivity2, at.connectivity3)
            })
            .collect();
        let mut b: Vec<(u32, u32, u32)> = other
            .atoms()
            .map(|idx| {
                let at = other.atom(idx);
                (at.connectivity1, at.connectivity2, at.connectivity3)
            })
            .collect();
        a.sort_unstable();
        b.sort_unstable();
        a == b
    }
}

impl Clone for Molecule {
    fn clone(&self) -> Self {
        Self {
            graph: self.graph.clone(),
        }
    }
}

impl Default for Molecule {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Molecule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Molecule")
            .field("atom_count", &self.atom_count())
            .field("bond_count", &self.bond_count())
            .field("radical_count", &self.radical_count())
            .finish()
    }
}
