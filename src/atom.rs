use crate::element::Element;

/// An atom in a molecular graph.
///
/// The mutable electronic state (radical electrons, lone pairs, formal
/// charge) is what resonance moves rearrange. Connectivity fingerprints
/// and the sorting label are structural: they depend only on the graph
/// shape, so they are identical across all resonance forms of a molecule
/// and travel with clones instead of being recomputed.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    pub element: Element,
    /// Implicit hydrogens. Not graph nodes; each counts as one single bond.
    pub hydrogen_count: u8,
    /// Unpaired electrons on this atom.
    pub radical_electrons: u8,
    /// Non-bonding electron pairs.
    pub lone_pairs: u8,
    /// Formal charge in elementary charge units.
    pub formal_charge: i8,
    /// Degree of the atom (recomputed by `update_connectivity_values`).
    pub connectivity1: u32,
    /// Sum of neighbor `connectivity1` values.
    pub connectivity2: u32,
    /// Sum of neighbor `connectivity2` values.
    pub connectivity3: u32,
    pub sorting_label: i32,
}

impl Atom {
    pub fn new(element: Element) -> Self {
        Self {
            element,
            hydrogen_count: 0,
            radical_electrons: 0,
            lone_pairs: 0,
            formal_charge: 0,
            connectivity1: 0,
            connectivity2: 0,
            connectivity3: 0,
            sorting_label: -1,
        }
    }

    pub fn is_hydrogen(&self) -> bool {
        self.element == Element::H
    }

    pub fn is_carbon(&self) -> bool {
        self.element == Element::C
    }

    pub fn is_nitrogen(&self) -> bool {
        self.element == Element::N
    }

    pub fn is_oxygen(&self) -> bool {
        self.element == Element::O
    }

    pub fn increment_radical(&mut self) {
        self.radical_electrons += 1;
    }

    pub fn decrement_radical(&mut self) {
        debug_assert!(self.radical_electrons > 0);
        self.radical_electrons -= 1;
    }

    pub fn increment_lone_pairs(&mut self) {
        self.lone_pairs += 1;
    }

    pub fn decrement_lone_pairs(&mut self) {
        debug_assert!(self.lone_pairs > 0);
        self.lone_pairs -= 1;
    }

    /// True when the two atoms are interchangeable under isomorphism:
    /// same element and same electronic assignment.
    pub fn equivalent(&self, other: &Atom) -> bool {
        self.element == other.element
            && self.hydrogen_count == other.hydrogen_count
            && self.radical_electrons == other.radical_electrons
            && self.lone_pairs == other.lone_pairs
            && self.formal_charge == other.formal_charge
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radical_shift_is_reversible() {
        let mut atom = Atom::new(Element::C);
        atom.radical_electrons = 1;
        let before = atom.clone();
        atom.decrement_radical();
        atom.increment_radical();
        assert_eq!(atom, before);
    }

    #[test]
    fn lone_pair_shift_is_reversible() {
        let mut atom = Atom::new(Element::O);
        atom.lone_pairs = 2;
        let before = atom.clone();
        atom.increment_lone_pairs();
        atom.decrement_lone_pairs();
        assert_eq!(atom, before);
    }

    #[test]
    fn equivalence_ignores_fingerprints() {
        let mut a = Atom::new(Element::N);
        let mut b = Atom::new(Element::N);
        a.connectivity1 = 3;
        b.sorting_label = 7;
        assert!(a.equivalent(&b));
        b.lone_pairs = 1;
        assert!(!a.equivalent(&b));
    }
}
