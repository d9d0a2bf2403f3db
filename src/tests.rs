use crate::*;

use petgraph::graph::NodeIndex;

fn carbon(h: u8, rad: u8) -> Atom {
    let mut a = Atom::new(Element::C);
    a.hydrogen_count = h;
    a.radical_electrons = rad;
    a
}

fn ring6(orders: [BondOrder; 6], h: [u8; 6]) -> Molecule {
    let mut mol = Molecule::new();
    let idx: Vec<_> = (0..6).map(|i| mol.add_atom(carbon(h[i], 0))).collect();
    for i in 0..6 {
        mol.add_bond(idx[i], idx[(i + 1) % 6], Bond::new(orders[i]));
    }
    mol.update_connectivity_values();
    mol
}

fn kekule_benzene() -> Molecule {
    use BondOrder::{Double as D, Single as S};
    ring6([D, S, D, S, D, S], [1; 6])
}

fn kekule_naphthalene() -> Molecule {
    use BondOrder::{Double as D, Single as S};
    let mut mol = Molecule::new();
    let idx: Vec<_> = (0..10)
        .map(|i| mol.add_atom(carbon(if i == 0 || i == 1 { 0 } else { 1 }, 0)))
        .collect();
    let edges = [
        (0, 1, S),
        (1, 2, D),
        (2, 3, S),
        (3, 4, D),
        (4, 5, S),
        (5, 0, D),
        (1, 6, S),
        (6, 7, D),
        (7, 8, S),
        (8, 9, D),
        (9, 0, S),
    ];
    for (a, b, o) in edges {
        mol.add_bond(idx[a], idx[b], Bond::new(o));
    }
    mol.update_connectivity_values();
    mol
}

#[test]
fn kekulize_then_promote_round_trip() {
    let mut delocalized = kekule_benzene();
    let edges: Vec<_> = delocalized.bonds().collect();
    for e in edges {
        delocalized.bond_mut(e).order = BondOrder::Benzene;
    }

    let concrete = kekulize(&delocalized).unwrap();
    assert!(update_atom_types(&concrete).is_ok());

    let promoted = generate_aromatic_structures(&concrete, None);
    assert_eq!(promoted.len(), 1);
    assert!(promoted[0].is_identical(&delocalized));
}

#[test]
fn every_generated_structure_satisfies_valence() {
    let inputs = [kekule_benzene(), kekule_naphthalene()];
    for mol in inputs {
        let structures = generate_resonance_structures(&mol, true, EquivalenceMode::Isomorphic);
        assert!(!structures.is_empty());
        for m in &structures {
            assert!(update_atom_types(m).is_ok());
        }
    }
}

#[test]
fn naphthalene_resonance_includes_clar_structures() {
    let mol = kekule_naphthalene();
    let structures = generate_resonance_structures(&mol, true, EquivalenceMode::Isomorphic);
    // The Kekulé input, the fully delocalized form, and the two one-sextet
    // Clar assignments (isomorphic to each other, so one survives).
    assert!(structures[0].is_identical(&mol));
    let clar_like = structures
        .iter()
        .filter(|m| {
            let benzene = m.bonds().filter(|&e| m.bond(e).order.is_benzene()).count();
            benzene == 6
        })
        .count();
    assert_eq!(clar_like, 1);
    let fully_delocalized = structures
        .iter()
        .filter(|m| m.bonds().all(|e| m.bond(e).order.is_benzene()))
        .count();
    assert_eq!(fully_delocalized, 1);
}

#[test]
fn naphthalene_without_clar_skips_sextet_structures() {
    let mol = kekule_naphthalene();
    let structures = generate_resonance_structures(&mol, false, EquivalenceMode::Isomorphic);
    assert!(structures
        .iter()
        .all(|m| !m.bonds().any(|e| m.bond(e).order.is_benzene())
            || m.bonds().all(|e| m.bond(e).order.is_benzene())));
}

#[test]
fn aminoxyl_radical_lone_pair_shift() {
    // CH3-N(H)-O• and CH3-N•(H)-O(-): the oxygen radical trades with the
    // nitrogen lone pair, charges updated on both ends.
    let mut mol = Molecule::new();
    let c = mol.add_atom(carbon(3, 0));
    let mut n = Atom::new(Element::N);
    n.hydrogen_count = 1;
    n.lone_pairs = 1;
    let ni = mol.add_atom(n);
    let mut o = Atom::new(Element::O);
    o.lone_pairs = 2;
    o.radical_electrons = 1;
    let oi = mol.add_atom(o);
    mol.add_bond(c, ni, Bond::new(BondOrder::Single));
    mol.add_bond(ni, oi, Bond::new(BondOrder::Single));
    mol.update_connectivity_values();
    assert!(update_atom_types(&mol).is_ok());

    let structures = generate_resonance_structures(&mol, true, EquivalenceMode::Isomorphic);
    assert!(structures.len() >= 2);
    let shifted = structures
        .iter()
        .find(|m| m.atom(ni).radical_electrons == 1)
        .expect("lone pair shift structure");
    assert_eq!(shifted.atom(oi).radical_electrons, 0);
    assert_eq!(shifted.atom(oi).lone_pairs, 3);
    assert_eq!(shifted.atom(oi).formal_charge, -1);
    assert_eq!(shifted.atom(ni).lone_pairs, 0);
    assert_eq!(shifted.atom(ni).formal_charge, 1);
}

#[test]
fn azide_nitrogen_shift_closure() {
    // HN=N(+)=N(-) has single+triple partners on both sides.
    let mut mol = Molecule::new();
    let mut n1 = Atom::new(Element::N);
    n1.hydrogen_count = 1;
    n1.lone_pairs = 1;
    let mut n2 = Atom::new(Element::N);
    n2.formal_charge = 1;
    let mut n3 = Atom::new(Element::N);
    n3.lone_pairs = 2;
    n3.formal_charge = -1;
    let i1 = mol.add_atom(n1);
    let i2 = mol.add_atom(n2);
    let i3 = mol.add_atom(n3);
    mol.add_bond(i1, i2, Bond::new(BondOrder::Double));
    mol.add_bond(i2, i3, Bond::new(BondOrder::Double));
    mol.update_connectivity_values();
    assert!(update_atom_types(&mol).is_ok());

    let structures = generate_resonance_structures(&mol, true, EquivalenceMode::Isomorphic);
    assert!(structures.len() >= 2);
    for m in &structures {
        assert!(update_atom_types(m).is_ok());
    }
    // Some structure carries a triple bond off the central nitrogen.
    assert!(structures.iter().any(|m| {
        m.bonds().any(|e| m.bond(e).order == BondOrder::Triple)
    }));
}

#[test]
fn cyclohexadienyl_radical_reconciles_to_benzene_like_forms() {
    // A radical ring one hydrogen short of benzene: the radical cannot
    // enter the pi system, so reconciliation finds nothing aromatic and
    // plain allyl shifts take over.
    use BondOrder::{Double as D, Single as S};
    let mut mol = ring6([S, D, S, D, S, S], [2, 1, 1, 1, 1, 1]);
    mol.atom_mut(NodeIndex::new(5)).radical_electrons = 1;
    mol.atom_mut(NodeIndex::new(5)).hydrogen_count = 1;
    mol.update_connectivity_values();
    assert!(update_atom_types(&mol).is_ok());

    let structures = generate_resonance_structures(&mol, true, EquivalenceMode::Isomorphic);
    assert!(!structures.is_empty());
    assert!(structures[0].is_identical(&mol));
    for m in &structures {
        assert_eq!(m.radical_count(), 1);
        assert!(update_atom_types(m).is_ok());
    }
}

#[test]
fn isomorphic_variants_of_benzene_kekule_forms() {
    let mol = kekule_benzene();
    let isomorphic = generate_isomorphic_resonance_structures(&mol);
    assert!(isomorphic.len() >= 2);
    assert!(isomorphic[0].is_identical(&mol));
    // The opposite Kekulé form maps onto the input under rotation but is
    // not the same placement.
    assert!(isomorphic[1..]
        .iter()
        .any(|m| m.is_isomorphic(&mol) && !m.is_identical(&mol)));
    // No exact duplicates are collected.
    for (i, a) in isomorphic.iter().enumerate() {
        for b in &isomorphic[i + 1..] {
            assert!(!a.is_identical(b));
        }
    }
}
