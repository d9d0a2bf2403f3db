//! Clar structure generation for polycyclic aromatic systems.
//!
//! A Clar structure assigns each aromatic ring either a full sextet
//! (drawn as a circle, here as six benzene-order bonds) or concrete
//! single/double bonds, maximizing the number of sextets. The maximization
//! is a binary program: one variable per ring (sextet or not), one per
//! bond touching a ring atom (double or not), and one equality row per
//! ring atom saying it takes part in exactly one sextet or double bond.
//!
//! All optima are enumerated by re-solving with a cutting plane that
//! excludes each found sextet assignment, recursing until the sextet count
//! drops below the first optimum. Results come back innermost-first: the
//! last solution found is the first element.

use std::fmt;

use petgraph::graph::{EdgeIndex, NodeIndex};

use crate::aromaticity;
use crate::bond::BondOrder;
use crate::ilp::{self, BinaryProgram, ConstraintSense, SolveStatus};
use crate::molecule::Molecule;
use crate::valence;

const INT_TOL: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq)]
pub enum ClarOptimizationError {
    /// The sextet program has no feasible assignment at all.
    Infeasible,
    /// A cutting-plane round lost sextets relative to the first optimum;
    /// enumeration stops here.
    Suboptimal { objective: f64, required: f64 },
    /// The solver returned a fractional value, which the materialization
    /// cannot interpret.
    NonIntegerSolution { index: usize },
}

impl fmt::Display for ClarOptimizationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Infeasible => write!(f, "clar optimization is infeasible"),
            Self::Suboptimal {
                objective,
                required,
            } => write!(
                f,
                "clar optimization gave {} sextets, fewer than the optimum {}",
                objective, required
            ),
            Self::NonIntegerSolution { index } => {
                write!(f, "clar optimization variable {} is not binary", index)
            }
        }
    }
}

impl std::error::Error for ClarOptimizationError {}

/// One optimal sextet assignment, together with the variable layout needed
/// to materialize it: ring variables first, then bond variables.
struct ClarSolution {
    molecule: Molecule,
    aromatic_rings: Vec<Vec<NodeIndex>>,
    bonds: Vec<EdgeIndex>,
    values: Vec<f64>,
}

/// Generate every Clar structure of the molecule.
///
/// Acyclic molecules and molecules whose sextet program cannot be set up
/// or solved yield an empty list; an assignment that fails atom-type
/// revalidation after materialization is silently dropped.
pub fn generate_clar_structures(mol: &Molecule) -> Vec<Molecule> {
    if !mol.is_cyclic() {
        return Vec::new();
    }
    let solutions = match clar_optimization(mol, &[], None) {
        Ok(solutions) => solutions,
        Err(_) => return Vec::new(),
    };

    let mut mol_list = Vec::new();
    for solution in solutions {
        let ClarSolution {
            mut molecule,
            aromatic_rings,
            bonds,
            values,
        } = solution;
        let (sextets, doubles) = values.split_at(aromatic_rings.len());

        // Concrete orders first, then overwrite sextet rings.
        for (&e, &x) in bonds.iter().zip(doubles) {
            molecule.bond_mut(e).order = if x > 0.5 {
                BondOrder::Double
            } else {
                BondOrder::Single
            };
        }
        for (ring, &y) in aromatic_rings.iter().zip(sextets) {
            if y > 0.5 {
                clar_transformation(&mut molecule, ring);
            }
        }
        if valence::update_atom_types(&molecule).is_ok() {
            mol_list.push(molecule);
        }
    }
    mol_list
}

/// Set every bond between two ring atoms to the benzene order.
fn clar_transformation(mol: &mut Molecule, ring: &[NodeIndex]) {
    for (i, &a) in ring.iter().enumerate() {
        for &b in &ring[i + 1..] {
            if let Some(e) = mol.bond_between(a, b) {
                mol.bond_mut(e).order = BondOrder::Benzene;
            }
        }
    }
}

/// Solve the sextet program and recurse over cutting planes to enumerate
/// every assignment with the optimal sextet count.
///
/// `constraints` carries the cuts accumulated so far as full-length
/// coefficient rows with a right-hand side; `max_num` pins the sextet
/// count established by the outermost solve.
fn clar_optimization(
    mol: &Molecule,
    constraints: &[(Vec<f64>, f64)],
    max_num: Option<f64>,
) -> Result<Vec<ClarSolution>, ClarOptimizationError> {
    let molecule = mol.clone();
    let (aromatic_rings, _) = aromaticity::aromatic_rings(&molecule);
    if aromatic_rings.is_empty() {
        return Ok(Vec::new());
    }

    // Every atom in any aromatic ring, in first-seen order.
    let mut atoms: Vec<NodeIndex> = Vec::new();
    for ring in &aromatic_rings {
        for &a in ring {
            if !atoms.contains(&a) {
                atoms.push(a);
            }
        }
    }

    // Every bond incident to a ring atom, hydrogen neighbors excluded.
    let mut bonds: Vec<EdgeIndex> = Vec::new();
    for &a in &atoms {
        for e in molecule.bonds_of(a) {
            if bonds.contains(&e) {
                continue;
            }
            let (u, v) = match molecule.bond_endpoints(e) {
                Some(pair) => pair,
                None => continue,
            };
            let other = if u == a { v } else { u };
            if molecule.atom(other).is_hydrogen() {
                continue;
            }
            bonds.push(e);
        }
    }

    let num_rings = aromatic_rings.len();
    let num_vars = num_rings + bonds.len();

    let mut objective = vec![0.0; num_vars];
    for c in objective.iter_mut().take(num_rings) {
        *c = 1.0;
    }
    let mut program = BinaryProgram::new(objective);

    // Each ring atom is in exactly one sextet or one double bond.
    for &a in &atoms {
        let mut row = vec![0.0; num_vars];
        for (i, ring) in aromatic_rings.iter().enumerate() {
            if ring.contains(&a) {
                row[i] = 1.0;
            }
        }
        for (j, &e) in bonds.iter().enumerate() {
            if let Some((u, v)) = molecule.bond_endpoints(e) {
                if u == a || v == a {
                    row[num_rings + j] = 1.0;
                }
            }
        }
        program.add_constraint(row, ConstraintSense::Equal, 1.0);
    }

    // Bonds leaving the ring system keep their current order.
    for (j, &e) in bonds.iter().enumerate() {
        let (u, v) = match molecule.bond_endpoints(e) {
            Some(pair) => pair,
            None => continue,
        };
        let exocyclic = !atoms.contains(&u) || !atoms.contains(&v);
        if exocyclic {
            let value = if molecule.bond(e).order.is_double() {
                1
            } else {
                0
            };
            program.pin_variable(num_rings + j, value);
        }
    }

    for (row, rhs) in constraints {
        program.add_constraint(row.clone(), ConstraintSense::LessOrEqual, *rhs);
    }

    let solution = ilp::solve(&program);
    if solution.status != SolveStatus::Optimal {
        return Err(ClarOptimizationError::Infeasible);
    }
    if solution.objective < INT_TOL {
        return Ok(Vec::new());
    }
    let required = max_num.unwrap_or(solution.objective);
    if solution.objective < required - INT_TOL {
        return Err(ClarOptimizationError::Suboptimal {
            objective: solution.objective,
            required,
        });
    }
    for (index, &v) in solution.values.iter().enumerate() {
        if (v - v.round()).abs() > INT_TOL {
            return Err(ClarOptimizationError::NonIntegerSolution { index });
        }
    }

    // Cut this sextet assignment out and look for the rest.
    let mut cut = vec![0.0; num_vars];
    let mut sextet_count = 0.0;
    for i in 0..num_rings {
        cut[i] = solution.values[i];
        sextet_count += solution.values[i];
    }
    let mut next_constraints = constraints.to_vec();
    next_constraints.push((cut, sextet_count - 1.0));

    let mut inner = clar_optimization(mol, &next_constraints, Some(required)).unwrap_or_default();
    inner.push(ClarSolution {
        molecule,
        aromatic_rings,
        bonds,
        values: solution.values,
    });
    Ok(inner)
}
