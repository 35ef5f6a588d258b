use microlp::{ComparisonOp, OptimizationDirection, Problem};

use crate::backend::{SolverBackend, SolverResult};
use crate::model::{Direction, LpModel, VarDomain};

/// Backend built on the `microlp` simplex / branch-and-bound crate.
///
/// Handles both continuous and integer variables. `microlp` does not report
/// constraint duals, so `SolverResult::duals` is always `None` here; the
/// adapter fills them in for continuous models.
#[derive(Debug, Default)]
pub struct MicrolpBackend;

impl MicrolpBackend {
    pub fn new() -> Self {
        Self
    }
}

impl SolverBackend for MicrolpBackend {
    fn name(&self) -> &'static str {
        "microlp"
    }

    fn solve(&self, model: &LpModel) -> SolverResult {
        let direction = match model.direction {
            Direction::Maximize => OptimizationDirection::Maximize,
            Direction::Minimize => OptimizationDirection::Minimize,
        };

        let mut problem = Problem::new(direction);
        let vars: Vec<microlp::Variable> = model
            .variables
            .iter()
            .map(|v| match v.domain {
                VarDomain::Continuous => problem.add_var(v.objective, (v.min, f64::INFINITY)),
                VarDomain::Integer => {
                    problem.add_integer_var(v.objective, (v.min.ceil() as i32, i32::MAX))
                }
            })
            .collect();

        for row in &model.constraints {
            problem.add_constraint(
                row.coefficients
                    .iter()
                    .enumerate()
                    .map(|(j, &coeff)| (vars[j], coeff)),
                ComparisonOp::Le,
                row.upper,
            );
        }

        match problem.solve() {
            Ok(solution) => {
                let quantities: Vec<f64> = model
                    .variables
                    .iter()
                    .zip(&vars)
                    .map(|(def, &var)| match def.domain {
                        VarDomain::Continuous => solution[var],
                        // Branch-and-bound leaves precision noise on integers.
                        VarDomain::Integer => solution[var].round(),
                    })
                    .collect();
                SolverResult::optimal(quantities, solution.objective())
            }
            Err(microlp::Error::Infeasible) => SolverResult::infeasible(),
            Err(microlp::Error::Unbounded) => SolverResult::unbounded(),
            Err(other) => SolverResult::error(other.to_string()),
        }
    }
}
