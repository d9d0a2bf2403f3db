//! Binary integer-linear-program solver.
//!
//! The Clar optimizer only sees this narrow contract: a maximization over
//! binary variables with equality/inequality rows and per-variable bound
//! pinning, answered with a status, an objective value, and a solution
//! vector. Behind the contract sits an exact depth-first branch-and-bound;
//! the models this crate builds (one row per ring atom, a handful of
//! cutting planes) stay small enough that no more machinery is warranted.

const EPS: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintSense {
    Equal,
    LessOrEqual,
}

#[derive(Debug, Clone)]
pub struct Constraint {
    pub coefficients: Vec<f64>,
    pub sense: ConstraintSense,
    pub rhs: f64,
}

/// A binary maximization problem. `bounds` pins variables: `(0, 0)` and
/// `(1, 1)` fix a value, `(0, 1)` leaves it free.
#[derive(Debug, Clone)]
pub struct BinaryProgram {
    pub objective: Vec<f64>,
    pub constraints: Vec<Constraint>,
    pub bounds: Vec<(u8, u8)>,
}

impl BinaryProgram {
    pub fn new(objective: Vec<f64>) -> Self {
        let n = objective.len();
        Self {
            objective,
            constraints: Vec::new(),
            bounds: vec![(0, 1); n],
        }
    }

    pub fn num_variables(&self) -> usize {
        self.objective.len()
    }

    pub fn add_constraint(&mut self, coefficients: Vec<f64>, sense: ConstraintSense, rhs: f64) {
        debug_assert_eq!(coefficients.len(), self.num_variables());
        self.constraints.push(Constraint {
            coefficients,
            sense,
            rhs,
        });
    }

    pub fn pin_variable(&mut self, index: usize, value: u8) {
        self.bounds[index] = (value, value);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    Optimal,
    Infeasible,
}

#[derive(Debug, Clone)]
pub struct Solution {
    pub status: SolveStatus,
    pub objective: f64,
    pub values: Vec<f64>,
}

/// Solve the program to proven optimality.
pub fn solve(program: &BinaryProgram) -> Solution {
    let mut search = Search {
        program,
        assignment: vec![0u8; program.num_variables()],
        best: None,
    };
    search.dfs(0, 0.0);
    match search.best {
        Some((objective, values)) => Solution {
            status: SolveStatus::Optimal,
            objective,
            values: values.into_iter().map(f64::from).collect(),
        },
        None => Solution {
            status: SolveStatus::Infeasible,
            objective: 0.0,
            values: Vec::new(),
        },
    }
}

struct Search<'a> {
    program: &'a BinaryProgram,
    assignment: Vec<u8>,
    best: Option<(f64, Vec<u8>)>,
}

impl Search<'_> {
    fn dfs(&mut self, index: usize, objective_so_far: f64) {
        let n = self.program.num_variables();
        if !self.feasible_prefix(index) {
            return;
        }
        if let Some((best_obj, _)) = &self.best {
            let potential: f64 = objective_so_far
                + (index..n)
                    .map(|i| {
                        let c = self.program.objective[i];
                        if c > 0.0 && self.program.bounds[i].1 == 1 {
                            c
                        } else {
                            0.0
                        }
                    })
                    .sum::<f64>();
            if potential <= *best_obj + EPS {
                return;
            }
        }
        if index == n {
            self.best = Some((objective_so_far, self.assignment.clone()));
            return;
        }
        let (lo, hi) = self.program.bounds[index];
        // Try the high value first: greedy for a maximization.
        let mut value = hi;
        loop {
            self.assignment[index] = value;
            self.dfs(
                index + 1,
                objective_so_far + self.program.objective[index] * value as f64,
            );
            if value == lo {
                break;
            }
            value -= 1;
        }
    }

    /// Can the constraints still be satisfied given the first `index`
    /// variables are fixed?
    fn feasible_prefix(&self, index: usize) -> bool {
        let n = self.program.num_variables();
        for constraint in &self.program.constraints {
            let mut fixed = 0.0;
            for i in 0..index {
                fixed += constraint.coefficients[i] * self.assignment[i] as f64;
            }
            let mut max_rest = 0.0;
            let mut min_rest = 0.0;
            for i in index..n {
                let c = constraint.coefficients[i];
                let (lo, hi) = self.program.bounds[i];
                if c >= 0.0 {
                    max_rest += c * hi as f64;
                    min_rest += c * lo as f64;
                } else {
                    max_rest += c * lo as f64;
                    min_rest += c * hi as f64;
                }
            }
            match constraint.sense {
                ConstraintSense::Equal => {
                    if fixed + max_rest < constraint.rhs - EPS
                        || fixed + min_rest > constraint.rhs + EPS
                    {
                        return false;
                    }
                }
                ConstraintSense::LessOrEqual => {
                    if fixed + min_rest > constraint.rhs + EPS {
                        return false;
                    }
                }
            }
        }
        true
    }
}
