//! Benzenoid ring perception.
//!
//! A six-membered cycle counts as aromatic when every member atom is
//! sp2-capable and contributes exactly one pi electron, either through a
//! double bond (anywhere on the atom, matching how perception toolkits
//! treat fused systems) or through membership in an already-delocalized
//! ring of benzene-order bonds.
//!
//! The perception is deliberately permissive about exocyclic double bonds:
//! a ring can be claimed aromatic here and still fail atom-type
//! revalidation when its bonds are promoted to the benzene order. That
//! false-positive window is corrected downstream by the aromatic
//! reconciliation step, never in this module.

use petgraph::graph::{EdgeIndex, NodeIndex};

use crate::bond::BondOrder;
use crate::molecule::Molecule;
use crate::rings;

/// All aromatic six-membered rings, as parallel lists of ring atoms and
/// ring bonds (both ordered around the cycle).
pub fn aromatic_rings(mol: &Molecule) -> (Vec<Vec<NodeIndex>>, Vec<Vec<EdgeIndex>>) {
    let candidates = rings::cycles_of_size(mol, 6);
    let mut ring_atoms = Vec::new();
    let mut ring_bonds = Vec::new();
    for ring in candidates {
        if let Some(bonds) = aromatic_ring_bonds(mol, &ring) {
            ring_atoms.push(ring);
            ring_bonds.push(bonds);
        }
    }
    (ring_atoms, ring_bonds)
}

/// The ring's bond list if it is aromatic, `None` otherwise.
fn aromatic_ring_bonds(mol: &Molecule, ring: &[NodeIndex]) -> Option<Vec<EdgeIndex>> {
    let len = ring.len();
    let mut bonds = Vec::with_capacity(len);
    for i in 0..len {
        let e = mol.bond_between(ring[i], ring[(i + 1) % len])?;
        if mol.bond(e).order == BondOrder::Triple {
            return None;
        }
        bonds.push(e);
    }

    for (i, &atom_idx) in ring.iter().enumerate() {
        if !mol.atom(atom_idx).element.sp2_capable() {
            return None;
        }
        let prev = bonds[(i + len - 1) % len];
        let next = bonds[i];
        let prev_order = mol.bond(prev).order;
        let next_order = mol.bond(next).order;

        if prev_order.is_benzene() || next_order.is_benzene() {
            // Delocalized form: both ring bonds must carry it.
            if !(prev_order.is_benzene() && next_order.is_benzene()) {
                return None;
            }
            continue;
        }
        if !has_any_double_bond(mol, atom_idx) {
            return None;
        }
    }
    Some(bonds)
}

fn has_any_double_bond(mol: &Molecule, atom_idx: NodeIndex) -> bool {
    mol.bonds_of(atom_idx)
        .any(|e| mol.bond(e).order == BondOrder::Double)
}
