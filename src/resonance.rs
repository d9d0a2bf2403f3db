//! Resonance structure enumeration.
//!
//! The entry point is [`generate_resonance_structures`], which classifies
//! the molecule, reconciles its aromatic representative when applicable,
//! and then runs a worklist fixed point over the applicable move families
//! until no new non-equivalent structure is produced.
//!
//! Move families:
//! - allyl shift: radical moved across an adjacent double or triple bond
//! - lone-pair/radical shift: radical exchanged with a neighboring lone pair
//! - hypervalent-nitrogen shift: two double bonds traded for single + triple
//! - aromatic form, Kekulé form, opposite Kekulé form: representation
//!   changes between delocalized and concrete assignments
//! - Clar sextets: every maximum-sextet assignment (see [`crate::clar`])

use petgraph::graph::EdgeIndex;

use crate::aromaticity;
use crate::bond::BondOrder;
use crate::clar;
use crate::kekulize;
use crate::molecule::Molecule;
use crate::pathfinder;
use crate::rings;
use crate::valence;

/// Features of a molecule that decide which move families are worth
/// running. Computed once per enumeration.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoleculeFeatures {
    pub is_radical: bool,
    pub is_cyclic: bool,
    pub is_aromatic: bool,
    pub is_polycyclic_aromatic: bool,
    pub is_aryl_radical: bool,
    pub has_nitrogen: bool,
    pub has_oxygen: bool,
    pub has_lone_pairs: bool,
}

pub fn analyze_molecule(mol: &Molecule) -> MoleculeFeatures {
    let mut features = MoleculeFeatures {
        is_radical: mol.is_radical(),
        is_cyclic: mol.is_cyclic(),
        has_nitrogen: mol.has_nitrogen(),
        has_oxygen: mol.has_oxygen(),
        has_lone_pairs: mol.has_lone_pairs(),
        ..MoleculeFeatures::default()
    };
    if features.is_cyclic {
        let (aromatic_rings, _) = aromaticity::aromatic_rings(mol);
        features.is_aromatic = !aromatic_rings.is_empty();
        features.is_polycyclic_aromatic = aromatic_rings.len() > 1;
        if features.is_radical && features.is_aromatic {
            features.is_aryl_radical = mol.is_aryl_radical(&aromatic_rings);
        }
    }
    features
}

/// Which relation deduplicates the isomer set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EquivalenceMode {
    /// Structures equal up to atom relabeling collapse to one.
    Isomorphic,
    /// Only exact duplicates (same assignment on the same atoms) collapse;
    /// isomorphic-but-distinct placements are kept.
    Identical,
}

impl EquivalenceMode {
    pub fn equivalent(self, a: &Molecule, b: &Molecule) -> bool {
        match self {
            EquivalenceMode::Isomorphic => a.is_isomorphic(b),
            EquivalenceMode::Identical => a.is_identical(b),
        }
    }
}

/// One resonance move family. All families share the same operation shape:
/// a structure in, zero or more candidate structures out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveFamily {
    AllylShift,
    LonePairRadicalShift,
    NitrogenShift,
    AromaticForm,
    KekuleForm,
    OppositeKekule,
    ClarSextets,
}

impl MoveFamily {
    pub fn apply(self, mol: &Molecule) -> Vec<Molecule> {
        match self {
            MoveFamily::AllylShift => generate_allyl_shift_structures(mol),
            MoveFamily::LonePairRadicalShift => generate_lone_pair_radical_structures(mol),
            MoveFamily::NitrogenShift => generate_nitrogen_shift_structures(mol),
            MoveFamily::AromaticForm => generate_aromatic_structures(mol, None),
            MoveFamily::KekuleForm => generate_kekule_structure(mol),
            MoveFamily::OppositeKekule => generate_opposite_kekule_structure(mol),
            MoveFamily::ClarSextets => clar::generate_clar_structures(mol),
        }
    }
}

/// Select the move families relevant to a molecule. With no features given,
/// every family is active.
pub fn populate_move_families(features: Option<&MoleculeFeatures>) -> Vec<MoveFamily> {
    match features {
        None => vec![
            MoveFamily::AllylShift,
            MoveFamily::LonePairRadicalShift,
            MoveFamily::NitrogenShift,
            MoveFamily::AromaticForm,
            MoveFamily::KekuleForm,
            MoveFamily::OppositeKekule,
            MoveFamily::ClarSextets,
        ],
        Some(features) => {
            let mut families = Vec::new();
            // Aromatic radicals have already had their shifts considered
            // during reconciliation; aryl radicals cannot delocalize.
            if features.is_radical && !features.is_aromatic && !features.is_aryl_radical {
                families.push(MoveFamily::AllylShift);
            }
            if features.has_nitrogen {
                families.push(MoveFamily::NitrogenShift);
            }
            if features.has_lone_pairs {
                families.push(MoveFamily::LonePairRadicalShift);
            }
            families
        }
    }
}

/// Saturate the structure list under the given move families.
///
/// Classic worklist: each not-yet-processed structure has every family
/// applied to it; a candidate joins the list only if no existing member is
/// equivalent to it under `mode`. Terminates because the space of distinct
/// electron assignments over a fixed connectivity is finite; structures
/// are never removed here.
pub fn saturate(mol_list: &mut Vec<Molecule>, families: &[MoveFamily], mode: EquivalenceMode) {
    let mut index = 0;
    while index < mol_list.len() {
        let mut candidates = Vec::new();
        for family in families {
            candidates.extend(family.apply(&mol_list[index]));
        }
        for candidate in candidates {
            let known = mol_list.iter().any(|m| mode.equivalent(m, &candidate));
            if !known {
                mol_list.push(candidate);
            }
        }
        index += 1;
    }
}

/// Generate and return all resonance structures of a molecule.
///
/// The first element of the result is the input structure, unless the
/// aromatic reconciliation produced an equivalent delocalized form, in
/// which case that form replaces it in spirit (the input is dropped from
/// the comparison, never duplicated).
///
/// Aromatic species are split into four treatments:
/// - radical polycyclic: Kekulé forms, then allyl shifts, then Clar
///   structures, keeping only results that are still aromatic;
/// - radical monocyclic: Kekulé + allyl-shift variants are all kept (the
///   radical is likely to delocalize into the ring), but the undelocalized
///   Kekulé intermediates themselves are removed;
/// - stable polycyclic: Clar structures;
/// - stable monocyclic: the reconciled aromatic form is already complete.
pub fn generate_resonance_structures(
    mol: &Molecule,
    clar_structures: bool,
    mode: EquivalenceMode,
) -> Vec<Molecule> {
    let mut mol_list = vec![mol.clone()];
    let mut features = analyze_molecule(mol);

    // Reconcile the aromatic representative, which also screens out
    // aromaticity false positives.
    let mut new_mol_list = if features.is_aromatic
        || (features.is_cyclic && features.is_radical && !features.is_aryl_radical)
    {
        let reconciled = generate_aromatic_structures(mol, Some(&features));
        if reconciled.is_empty() {
            features.is_aromatic = false;
            features.is_polycyclic_aromatic = false;
        }
        reconciled
    } else {
        Vec::new()
    };

    if !new_mol_list.is_empty() {
        if features.is_radical && !features.is_aryl_radical {
            if features.is_polycyclic_aromatic {
                if clar_structures {
                    saturate(&mut new_mol_list, &[MoveFamily::KekuleForm], mode);
                    saturate(&mut new_mol_list, &[MoveFamily::AllylShift], mode);
                    saturate(&mut new_mol_list, &[MoveFamily::ClarSextets], mode);
                    // Non-aromatic byproducts of a polycyclic aromatic are
                    // assumed to be unimportant contributors.
                    new_mol_list.retain(|m| m.is_aromatic());
                }
            } else {
                let i = new_mol_list.len();
                saturate(&mut new_mol_list, &[MoveFamily::KekuleForm], mode);
                let j = new_mol_list.len();
                saturate(&mut new_mol_list, &[MoveFamily::AllylShift], mode);
                // The Kekulé intermediates without the radical delocalized
                // into the ring are not wanted themselves.
                new_mol_list.drain(i..j);
            }
        } else if features.is_polycyclic_aromatic && clar_structures {
            saturate(&mut new_mol_list, &[MoveFamily::ClarSextets], mode);
        }
        // Aryl radicals and stable mono-ring aromatics already hold their
        // aromatic form: nothing further.

        // The reconciled set is internally deduplicated, so at most one of
        // its members can match the original: find it, remove it, stop.
        if let Some(pos) = new_mol_list.iter().position(|m| mode.equivalent(mol, m)) {
            new_mol_list.remove(pos);
        }
        mol_list.extend(new_mol_list);
    }

    let families = populate_move_families(Some(&features));
    saturate(&mut mol_list, &families, mode);
    mol_list
}

/// All structures reachable by one allyl radical shift.
///
/// Candidates are built clone-first: the input graph is never mutated, and
/// the clone carries the connectivity fingerprints along. Revalidation
/// here is advisory; chemically strained candidates are still returned and
/// judged downstream.
pub fn generate_allyl_shift_structures(mol: &Molecule) -> Vec<Molecule> {
    let mut isomers = Vec::new();
    if !mol.is_radical() {
        return isomers;
    }
    for atom in mol.atoms() {
        for path in pathfinder::find_allyl_delocalization_paths(mol, atom) {
            let gained = match mol.bond(path.bond12).order.incremented() {
                Some(order) => order,
                None => continue,
            };
            let lost = match mol.bond(path.bond23).order.decremented() {
                Some(order) => order,
                None => continue,
            };
            let mut isomer = mol.clone();
            isomer.atom_mut(path.atom1).decrement_radical();
            isomer.atom_mut(path.atom3).increment_radical();
            isomer.bond_mut(path.bond12).order = gained;
            isomer.bond_mut(path.bond23).order = lost;
            let _ = valence::update_atom_types(&isomer);
            isomers.push(isomer);
        }
    }
    isomers
}

/// All structures reachable by one lone-pair/radical exchange.
pub fn generate_lone_pair_radical_structures(mol: &Molecule) -> Vec<Molecule> {
    let mut isomers = Vec::new();
    if !mol.is_radical() {
        return isomers;
    }
    for atom in mol.atoms() {
        for path in pathfinder::find_lone_pair_radical_paths(mol, atom) {
            let mut isomer = mol.clone();
            isomer.atom_mut(path.atom1).decrement_radical();
            isomer.atom_mut(path.atom1).increment_lone_pairs();
            isomer.update_charge(path.atom1);
            isomer.atom_mut(path.atom2).increment_radical();
            isomer.atom_mut(path.atom2).decrement_lone_pairs();
            isomer.update_charge(path.atom2);
            let _ = valence::update_atom_types(&isomer);
            isomers.push(isomer);
        }
    }
    isomers
}

/// All structures reachable by one hypervalent-nitrogen shift. The path
/// orientation makes one mutation rule serve both shift directions.
pub fn generate_nitrogen_shift_structures(mol: &Molecule) -> Vec<Molecule> {
    let mut isomers = Vec::new();
    for atom in mol.atoms() {
        for path in pathfinder::find_nitrogen_shift_paths(mol, atom) {
            let demoted = match mol.bond(path.bond12).order.decremented() {
                Some(order) => order,
                None => continue,
            };
            let promoted = match mol.bond(path.bond13).order.incremented() {
                Some(order) => order,
                None => continue,
            };
            let mut isomer = mol.clone();
            isomer.bond_mut(path.bond12).order = demoted;
            isomer.bond_mut(path.bond13).order = promoted;
            isomer.atom_mut(path.atom2).increment_lone_pairs();
            isomer.atom_mut(path.atom3).decrement_lone_pairs();
            isomer.update_charge(path.atom1);
            isomer.update_charge(path.atom2);
            isomer.update_charge(path.atom3);
            let _ = valence::update_atom_types(&isomer);
            isomers.push(isomer);
        }
    }
    isomers
}

/// A single Kekulé form of a delocalized molecule, as a list of length one.
/// Empty if the molecule carries no benzene bonds or cannot be kekulized.
pub fn generate_kekule_structure(mol: &Molecule) -> Vec<Molecule> {
    if !mol.is_aromatic() {
        return Vec::new();
    }
    match kekulize::kekulize(mol) {
        Ok(kekulized) => vec![kekulized],
        Err(_) => Vec::new(),
    }
}

/// The Kekulé structure with the opposite single/double arrangement, for
/// single-ring aromatics in concrete (non-delocalized) form.
///
/// Empty when the molecule is delocalized, has more or fewer than one
/// aromatic ring, has any ring bond that is neither single nor double, or
/// when the inverted form fails revalidation.
pub fn generate_opposite_kekule_structure(mol: &Molecule) -> Vec<Molecule> {
    if mol.is_aromatic() {
        return Vec::new();
    }
    let mut molecule = mol.clone();
    let (_, aromatic_bonds) = aromaticity::aromatic_rings(&molecule);
    if aromatic_bonds.len() != 1 {
        return Vec::new();
    }

    let mut num_single = 0;
    let mut num_double = 0;
    for &e in &aromatic_bonds[0] {
        match molecule.bond(e).order {
            BondOrder::Single => {
                num_single += 1;
                molecule.bond_mut(e).order = BondOrder::Double;
            }
            BondOrder::Double => {
                num_double += 1;
                molecule.bond_mut(e).order = BondOrder::Single;
            }
            _ => return Vec::new(),
        }
    }
    if num_single != 3 || num_double != 3 {
        return Vec::new();
    }
    if valence::update_atom_types(&molecule).is_err() {
        return Vec::new();
    }
    vec![molecule]
}

/// The canonical aromatic form(s) of a cyclic molecule.
///
/// For radicals the form with the most aromatic rings is selected (the
/// aromaticity classifier reports a false negative when the radical is
/// delocalized into a ring, so one-shift variants are searched first).
/// Claimed-aromatic rings that cannot actually hold benzene bonds are
/// retried ring by ring and ultimately left concrete; a molecule where no
/// ring succeeds was a false positive and yields nothing.
pub fn generate_aromatic_structures(
    mol: &Molecule,
    features: Option<&MoleculeFeatures>,
) -> Vec<Molecule> {
    let computed;
    let features = match features {
        Some(features) => features,
        None => {
            computed = analyze_molecule(mol);
            &computed
        }
    };
    if !features.is_cyclic {
        return Vec::new();
    }

    let molecule = mol.clone();
    let all_rings = rings::cycles_of_size(&molecule, 6);
    let (_, aromatic_bonds) = aromaticity::aromatic_rings(&molecule);

    // A radical with fewer aromatic rings than rings may be suppressing
    // aromaticity; search its one-shift variants for the best form.
    let candidates: Vec<(Molecule, Vec<Vec<EdgeIndex>>)> = if features.is_radical
        && !features.is_aryl_radical
        && aromatic_bonds.len() < all_rings.len()
    {
        let mut kekule_list = if molecule.is_aromatic() {
            generate_kekule_structure(&molecule)
        } else {
            vec![molecule]
        };
        saturate(
            &mut kekule_list,
            &[MoveFamily::AllylShift],
            EquivalenceMode::Isomorphic,
        );

        let mut max_num = 0;
        let mut best = Vec::new();
        for m in kekule_list {
            let (_, bonds) = aromaticity::aromatic_rings(&m);
            if bonds.len() > max_num {
                max_num = bonds.len();
                best.clear();
                best.push((m, bonds));
            } else if bonds.len() == max_num {
                best.push((m, bonds));
            }
        }
        best
    } else {
        vec![(molecule, aromatic_bonds)]
    };

    let mut new_mol_list: Vec<Molecule> = Vec::new();

    for (mut m, mut aromatic_bonds) in candidates {
        if aromatic_bonds.is_empty() {
            continue;
        }
        // Promote everything at once first; that succeeds for most inputs.
        let original_orders: Vec<Vec<BondOrder>> = aromatic_bonds
            .iter()
            .map(|ring| ring.iter().map(|&e| m.bond(e).order).collect())
            .collect();
        for ring in &aromatic_bonds {
            for &e in ring {
                m.bond_mut(e).order = BondOrder::Benzene;
            }
        }

        if valence::update_atom_types(&m).is_err() {
            // Some claimed-aromatic ring cannot hold benzene bonds. Reset
            // and promote ring by ring; a failing ring goes to the back of
            // the queue in case it depends on another ring going first.
            for (ring, orders) in aromatic_bonds.iter().zip(&original_orders) {
                for (&e, &order) in ring.iter().zip(orders) {
                    m.bond_mut(e).order = order;
                }
            }
            let mut i = 0;
            let mut counter = 0;
            while i < aromatic_bonds.len() && counter < 2 * aromatic_bonds.len() {
                counter += 1;
                let saved: Vec<BondOrder> = aromatic_bonds[i]
                    .iter()
                    .map(|&e| m.bond(e).order)
                    .collect();
                for &e in &aromatic_bonds[i] {
                    m.bond_mut(e).order = BondOrder::Benzene;
                }
                if valence::update_atom_types(&m).is_err() {
                    for (&e, &order) in aromatic_bonds[i].iter().zip(&saved) {
                        m.bond_mut(e).order = order;
                    }
                    let failed = aromatic_bonds.remove(i);
                    aromatic_bonds.push(failed);
                } else {
                    i += 1;
                }
            }
            if i == 0 {
                // No ring could be made aromatic: false positive.
                continue;
            }
        }

        if !new_mol_list.iter().any(|known| known.is_isomorphic(&m)) {
            new_mol_list.push(m);
        }
    }

    new_mol_list
}

/// Resonance structures that are isomorphic to the input molecule.
///
/// The full move-family set is exhausted; candidates that prove isomorphic
/// to an already-known structure are collected instead of extending the
/// search. The input is always the first element.
pub fn generate_isomorphic_resonance_structures(mol: &Molecule) -> Vec<Molecule> {
    let mut isomorphic_isomers = vec![mol.clone()];
    let mut isomers = vec![mol.clone()];
    let families = populate_move_families(None);

    let mut index = 0;
    while index < isomers.len() {
        let mut candidates = Vec::new();
        for family in &families {
            candidates.extend(family.apply(&isomers[index]));
        }
        for candidate in candidates {
            if isomers.iter().any(|known| known.is_isomorphic(&candidate)) {
                let duplicate = isomorphic_isomers
                    .iter()
                    .any(|known| known.is_identical(&candidate));
                if !duplicate {
                    isomorphic_isomers.push(candidate);
                }
            } else {
                isomers.push(candidate);
            }
        }
        index += 1;
    }

    isomorphic_isomers
}
