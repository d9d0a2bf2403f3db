//! Atom-type revalidation.
//!
//! After every committed mutation the electron bookkeeping of each atom
//! must close: bond electrons + 2·lone pairs + radicals + formal charge
//! must equal the element's outer-shell electron count. Benzene bonds are
//! legal only in the arrangements delocalized rings can produce, namely
//! two per atom (ring member) or three (fused-ring junction).

use petgraph::graph::NodeIndex;

use crate::bond::BondOrder;
use crate::element::Element;
use crate::molecule::Molecule;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AtomTypeError {
    /// The electron count around an atom does not close.
    ElectronCountMismatch {
        atom: NodeIndex,
        element: Element,
        counted: i16,
        expected: u8,
    },
    /// The atom carries a number of benzene bonds no atom type allows.
    InvalidBenzeneBondCount {
        atom: NodeIndex,
        element: Element,
        count: usize,
    },
}

impl std::fmt::Display for AtomTypeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ElectronCountMismatch {
                atom,
                element,
                counted,
                expected,
            } => write!(
                f,
                "atom {} ({}): {} valence electrons accounted for, element has {}",
                atom.index(),
                element.symbol(),
                counted,
                expected,
            ),
            Self::InvalidBenzeneBondCount {
                atom,
                element,
                count,
            } => write!(
                f,
                "atom {} ({}): {} benzene bonds (only 0, 2 or 3 are valid)",
                atom.index(),
                element.symbol(),
                count,
            ),
        }
    }
}

impl std::error::Error for AtomTypeError {}

/// Electron count an atom's bonds contribute to its valence shell,
/// including implicit hydrogens.
///
/// Two benzene bonds are equivalent to one single plus one double (3);
/// three benzene bonds, as on a fused-ring junction, contribute 4. Any
/// other benzene arrangement has no integral electron count and yields
/// `None`.
pub(crate) fn effective_bond_electrons(mol: &Molecule, idx: NodeIndex) -> Option<i16> {
    let mut plain: i16 = mol.atom(idx).hydrogen_count as i16;
    let mut benzene = 0usize;
    for e in mol.bonds_of(idx) {
        match mol.bond(e).order {
            BondOrder::Single => plain += 1,
            BondOrder::Double => plain += 2,
            BondOrder::Triple => plain += 3,
            BondOrder::Benzene => benzene += 1,
        }
    }
    let benzene_contribution = match benzene {
        0 => 0,
        2 => 3,
        3 => 4,
        _ => return None,
    };
    Some(plain + benzene_contribution)
}

/// Validate the electron bookkeeping of every atom.
///
/// This is the revalidation step run on every candidate structure. A
/// failure means the candidate is chemically impossible as written; what
/// to do with it is the caller's policy.
pub fn update_atom_types(mol: &Molecule) -> Result<(), AtomTypeError> {
    for idx in mol.atoms() {
        let atom = mol.atom(idx);
        let element = atom.element;
        let bond_electrons = match effective_bond_electrons(mol, idx) {
            Some(n) => n,
            None => {
                let count = mol
                    .bonds_of(idx)
                    .filter(|&e| mol.bond(e).order.is_benzene())
                    .count();
                return Err(AtomTypeError::InvalidBenzeneBondCount {
                    atom: idx,
                    element,
                    count,
                });
            }
        };
        let counted = bond_electrons
            + 2 * atom.lone_pairs as i16
            + atom.radical_electrons as i16
            + atom.formal_charge as i16;
        let expected = element.valence_electrons();
        if counted != expected as i16 {
            return Err(AtomTypeError::ElectronCountMismatch {
                atom: idx,
                element,
                counted,
                expected,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atom::Atom;
    use crate::bond::Bond;

    fn atom(element: Element, h: u8, lp: u8, rad: u8) -> Atom {
        let mut a = Atom::new(element);
        a.hydrogen_count = h;
        a.lone_pairs = lp;
        a.radical_electrons = rad;
        a
    }

    fn ring(orders: [BondOrder; 6]) -> Molecule {
        let mut mol = Molecule::new();
        let idx: Vec<_> = (0..6).map(|_| mol.add_atom(atom(Element::C, 1, 0, 0))).collect();
        for i in 0..6 {
            mol.add_bond(idx[i], idx[(i + 1) % 6], Bond::new(orders[i]));
        }
        mol
    }

    #[test]
    fn kekule_benzene_valid() {
        use BondOrder::{Double as D, Single as S};
        let mol = ring([S, D, S, D, S, D]);
        assert!(update_atom_types(&mol).is_ok());
    }

    #[test]
    fn delocalized_benzene_valid() {
        let mol = ring([BondOrder::Benzene; 6]);
        assert!(update_atom_types(&mol).is_ok());
    }

    #[test]
    fn single_benzene_bond_rejected() {
        let mut mol = Molecule::new();
        let a = mol.add_atom(atom(Element::C, 3, 0, 0));
        let b = mol.add_atom(atom(Element::C, 3, 0, 0));
        mol.add_bond(a, b, Bond::new(BondOrder::Benzene));
        assert!(matches!(
            update_atom_types(&mol),
            Err(AtomTypeError::InvalidBenzeneBondCount { count: 1, .. })
        ));
    }

    #[test]
    fn fused_junction_valid() {
        // A carbon with three benzene bonds and no hydrogens, as at a
        // naphthalene bridgehead.
        let mut mol = Molecule::new();
        let hub = mol.add_atom(atom(Element::C, 0, 0, 0));
        let spokes: Vec<_> = (0..3).map(|_| mol.add_atom(atom(Element::C, 0, 0, 0))).collect();
        for &s in &spokes {
            mol.add_bond(hub, s, Bond::new(BondOrder::Benzene));
        }
        // Only the hub closes; spokes are deliberately unfinished.
        assert_eq!(effective_bond_electrons(&mol, hub), Some(4));
    }

    #[test]
    fn exocyclic_double_on_aromatic_carbon_rejected() {
        use BondOrder::Benzene as Ar;
        let mut mol = ring([Ar, Ar, Ar, Ar, Ar, Ar]);
        // Pin an exocyclic =CH2 on atom 0 and drop its hydrogen.
        mol.atom_mut(NodeIndex::new(0)).hydrogen_count = 0;
        let exo = mol.add_atom(atom(Element::C, 2, 0, 0));
        mol.add_bond(NodeIndex::new(0), exo, Bond::new(BondOrder::Double));
        assert!(matches!(
            update_atom_types(&mol),
            Err(AtomTypeError::ElectronCountMismatch { counted: 5, .. })
        ));
    }

    #[test]
    fn radical_and_lone_pairs_count() {
        // Hydroxyl radical: O with one H, two lone pairs, one radical.
        let mut mol = Molecule::new();
        mol.add_atom(atom(Element::O, 1, 2, 1));
        assert!(update_atom_types(&mol).is_ok());

        // Same oxygen claiming no radical: electron count is short.
        let mut mol = Molecule::new();
        mol.add_atom(atom(Element::O, 1, 2, 0));
        assert!(update_atom_types(&mol).is_err());
    }

    #[test]
    fn charged_oxygen_valid() {
        // Oxide-like O(-): three lone pairs, one radical, charge -1.
        let mut mol = Molecule::new();
        let mut o = atom(Element::O, 0, 3, 1);
        o.formal_charge = -1;
        mol.add_atom(o);
        assert!(update_atom_types(&mol).is_ok());
    }

    #[test]
    fn error_display() {
        let err = AtomTypeError::ElectronCountMismatch {
            atom: NodeIndex::new(3),
            element: Element::C,
            counted: 5,
            expected: 4,
        };
        let msg = format!("{}", err);
        assert!(msg.contains("atom 3"));
        assert!(msg.contains('5'));
    }
}
