//! Delocalization path discovery.
//!
//! A path is a short atom/bond chain along which one electron shift is
//! structurally legal. Paths are produced fresh for every enumeration
//! round and never stored; the move appliers turn each one into at most
//! one candidate structure.

use petgraph::graph::{EdgeIndex, NodeIndex};

use crate::bond::BondOrder;
use crate::molecule::Molecule;

/// radical, bond12, atom2, bond23, double/triple terminus.
#[derive(Debug, Clone, Copy)]
pub struct AllylShiftPath {
    pub atom1: NodeIndex,
    pub atom2: NodeIndex,
    pub atom3: NodeIndex,
    pub bond12: EdgeIndex,
    pub bond23: EdgeIndex,
}

/// radical center, single bond, lone-pair donor.
#[derive(Debug, Clone, Copy)]
pub struct LonePairRadicalPath {
    pub atom1: NodeIndex,
    pub atom2: NodeIndex,
}

/// Which way a hypervalent-nitrogen shift runs. The path is oriented so
/// that one mutation rule (demote bond12, promote bond13, move a lone pair
/// from atom3 to atom2) serves both directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NitrogenShiftDirection {
    /// Two double bonds become single + triple.
    DoubleDoubleToSingleTriple,
    /// Triple + single become two double bonds.
    SingleTripleToDoubleDouble,
}

#[derive(Debug, Clone, Copy)]
pub struct NitrogenShiftPath {
    pub atom1: NodeIndex,
    pub atom2: NodeIndex,
    pub atom3: NodeIndex,
    pub bond12: EdgeIndex,
    pub bond13: EdgeIndex,
    pub direction: NitrogenShiftDirection,
}

/// All one-step allyl radical shifts starting at `atom1`.
///
/// bond12 must be able to gain an order (single or double), bond23 must be
/// able to lose one (double or triple).
pub fn find_allyl_delocalization_paths(mol: &Molecule, atom1: NodeIndex) -> Vec<AllylShiftPath> {
    let mut paths = Vec::new();
    if mol.atom(atom1).radical_electrons == 0 {
        return paths;
    }
    for atom2 in mol.neighbors(atom1) {
        let bond12 = match mol.bond_between(atom1, atom2) {
            Some(e) => e,
            None => continue,
        };
        let order12 = mol.bond(bond12).order;
        if !(order12.is_single() || order12.is_double()) {
            continue;
        }
        for atom3 in mol.neighbors(atom2) {
            if atom3 == atom1 {
                continue;
            }
            let bond23 = match mol.bond_between(atom2, atom3) {
                Some(e) => e,
                None => continue,
            };
            let order23 = mol.bond(bond23).order;
            if order23.is_double() || order23 == BondOrder::Triple {
                paths.push(AllylShiftPath {
                    atom1,
                    atom2,
                    atom3,
                    bond12,
                    bond23,
                });
            }
        }
    }
    paths
}

/// All lone-pair/radical exchanges starting at radical center `atom1`.
///
/// Only nitrogen and oxygen act as radical centers or donors, with
/// lone-pair occupancies that leave room for the shift on both ends.
pub fn find_lone_pair_radical_paths(mol: &Molecule, atom1: NodeIndex) -> Vec<LonePairRadicalPath> {
    let mut paths = Vec::new();
    let a1 = mol.atom(atom1);
    if a1.radical_electrons == 0 {
        return paths;
    }
    let center_ok = (a1.is_nitrogen() && a1.lone_pairs <= 2)
        || (a1.is_oxygen() && (1..=2).contains(&a1.lone_pairs));
    if !center_ok {
        return paths;
    }
    for atom2 in mol.neighbors(atom1) {
        let bond12 = match mol.bond_between(atom1, atom2) {
            Some(e) => e,
            None => continue,
        };
        if !mol.bond(bond12).order.is_single() {
            continue;
        }
        let a2 = mol.atom(atom2);
        if a2.radical_electrons > 0 {
            continue;
        }
        let donor_ok = (a2.is_nitrogen() && (1..=3).contains(&a2.lone_pairs))
            || (a2.is_oxygen() && (2..=3).contains(&a2.lone_pairs));
        if donor_ok {
            paths.push(LonePairRadicalPath { atom1, atom2 });
        }
    }
    paths
}

/// All hypervalent-nitrogen shifts centered on `atom1`.
///
/// The center must be a tetravalent nitrogen with no lone pair (the N5
/// configuration); atom3, the end that loses a lone pair to a new bond
/// order, must hold one.
pub fn find_nitrogen_shift_paths(mol: &Molecule, atom1: NodeIndex) -> Vec<NitrogenShiftPath> {
    let mut paths = Vec::new();
    let center = mol.atom(atom1);
    if !center.is_nitrogen() || center.lone_pairs != 0 || mol.bond_order_sum(atom1) != 4.0 {
        return paths;
    }
    let neighbors: Vec<NodeIndex> = mol.neighbors(atom1).collect();
    for &atom2 in &neighbors {
        for &atom3 in &neighbors {
            if atom2 == atom3 {
                continue;
            }
            let bond12 = match mol.bond_between(atom1, atom2) {
                Some(e) => e,
                None => continue,
            };
            let bond13 = match mol.bond_between(atom1, atom3) {
                Some(e) => e,
                None => continue,
            };
            if mol.atom(atom3).lone_pairs == 0 {
                continue;
            }
            let order12 = mol.bond(bond12).order;
            let order13 = mol.bond(bond13).order;
            if order12.is_double() && order13.is_double() {
                paths.push(NitrogenShiftPath {
                    atom1,
                    atom2,
                    atom3,
                    bond12,
                    bond13,
                    direction: NitrogenShiftDirection::DoubleDoubleToSingleTriple,
                });
            } else if order12 == BondOrder::Triple && order13.is_single() {
                paths.push(NitrogenShiftPath {
                    atom1,
                    atom2,
                    atom3,
                    bond12,
                    bond13,
                    direction: NitrogenShiftDirection::SingleTripleToDoubleDouble,
                });
            }
        }
    }
    paths
}
