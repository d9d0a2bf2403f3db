//! Resonance structure enumeration for molecular graphs.
//!
//! Molecules are undirected graphs of atoms and bonds with explicit
//! electron bookkeeping (radical electrons, lone pairs, formal charge) and
//! implicit hydrogens. [`generate_resonance_structures`] enumerates every
//! resonance structure of a molecule: radical delocalization shifts,
//! lone-pair shifts, hypervalent-nitrogen shifts, aromatic/Kekulé
//! representation changes, and Clar sextet assignments for polycyclic
//! aromatics.

pub mod aromaticity;
pub mod atom;
pub mod bond;
pub mod clar;
pub mod element;
pub mod ilp;
pub mod kekulize;
pub mod molecule;
pub mod pathfinder;
pub mod resonance;
pub mod rings;
pub mod valence;

pub use atom::Atom;
pub use bond::{Bond, BondOrder};
pub use clar::{generate_clar_structures, ClarOptimizationError};
pub use element::Element;
pub use kekulize::{kekulize, KekulizeError};
pub use molecule::Molecule;
pub use resonance::{
    analyze_molecule, generate_aromatic_structures, generate_isomorphic_resonance_structures,
    generate_kekule_structure, generate_opposite_kekule_structure, generate_resonance_structures,
    EquivalenceMode, MoleculeFeatures, MoveFamily,
};
pub use valence::{update_atom_types, AtomTypeError};

#[cfg(test)]
mod tests;
