//! Shadow-price recovery through the dual program.
//!
//! Backends that report primal values only (like `microlp`) leave capacity
//! duals unknown. For a continuous product-mix model the duals are the
//! optimum of the dual program, which is itself a plain LP, so we build that
//! transpose and hand it to the same backend. Strong duality makes the dual
//! optimum the exact per-unit value of each capacity.

use crate::backend::{SolveStatus, SolverBackend};
use crate::model::{ConstraintRow, Direction, LpModel, VarDomain, VariableDef};

/// Price each capacity row of a continuous model.
///
/// Returns `None` for integer models (duals have no valid interpretation
/// there) or when the dual solve fails numerically.
pub(crate) fn price_capacities(model: &LpModel, backend: &dyn SolverBackend) -> Option<Vec<f64>> {
    if model.has_integer_vars() {
        return None;
    }

    let dual = dual_model(model);
    let result = backend.solve(&dual);
    if result.status != SolveStatus::Optimal {
        log::warn!(
            "dual pricing failed: backend reported {:?} for the dual program",
            result.status
        );
        return None;
    }

    // Duals of a minimized primal carry the opposite sign: relaxing a
    // capacity can only lower the cost.
    let prices = match model.direction {
        Direction::Maximize => result.quantities,
        Direction::Minimize => result.quantities.iter().map(|y| -y).collect(),
    };
    Some(prices)
}

/// Transpose `max c'x : Ax <= b, x >= l` (or the minimize analogue) into
/// `min (b - Al)'y : A'y >= c, y >= 0`, expressed in the same <=-row
/// canonical form by negating the dual constraints.
fn dual_model(model: &LpModel) -> LpModel {
    let sign = match model.direction {
        Direction::Maximize => 1.0,
        Direction::Minimize => -1.0,
    };

    // Capacity left after the forced minimum production of every product.
    let adjusted_capacity: Vec<f64> = model
        .constraints
        .iter()
        .map(|row| {
            let committed: f64 = row
                .coefficients
                .iter()
                .zip(&model.variables)
                .map(|(a, v)| a * v.min)
                .sum();
            row.upper - committed
        })
        .collect();

    let variables = model
        .constraints
        .iter()
        .zip(&adjusted_capacity)
        .map(|(row, &capacity)| VariableDef {
            name: format!("price_{}", row.name),
            objective: capacity,
            min: 0.0,
            domain: VarDomain::Continuous,
        })
        .collect();

    let constraints = model
        .variables
        .iter()
        .enumerate()
        .map(|(j, v)| ConstraintRow {
            name: v.name.clone(),
            coefficients: model
                .constraints
                .iter()
                .map(|row| -row.coefficients[j])
                .collect(),
            upper: -sign * v.objective,
        })
        .collect();

    LpModel {
        direction: Direction::Minimize,
        variables,
        constraints,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::MicrolpBackend;

    fn wyndor() -> LpModel {
        LpModel {
            direction: Direction::Maximize,
            variables: vec![
                VariableDef {
                    name: "doors".to_string(),
                    objective: 300.0,
                    min: 0.0,
                    domain: VarDomain::Continuous,
                },
                VariableDef {
                    name: "windows".to_string(),
                    objective: 500.0,
                    min: 0.0,
                    domain: VarDomain::Continuous,
                },
            ],
            constraints: vec![
                ConstraintRow {
                    name: "plant_1".to_string(),
                    coefficients: vec![1.0, 0.0],
                    upper: 4.0,
                },
                ConstraintRow {
                    name: "plant_2".to_string(),
                    coefficients: vec![0.0, 2.0],
                    upper: 12.0,
                },
                ConstraintRow {
                    name: "plant_3".to_string(),
                    coefficients: vec![3.0, 2.0],
                    upper: 18.0,
                },
            ],
        }
    }

    #[test]
    fn wyndor_capacity_prices() {
        let prices = price_capacities(&wyndor(), &MicrolpBackend::new()).unwrap();
        assert_eq!(prices.len(), 3);
        assert!(prices[0].abs() < 1e-6, "plant 1 has slack, price {}", prices[0]);
        assert!((prices[1] - 150.0).abs() < 1e-6, "plant 2 price {}", prices[1]);
        assert!((prices[2] - 100.0).abs() < 1e-6, "plant 3 price {}", prices[2]);
    }

    #[test]
    fn dual_objective_matches_primal_at_optimum() {
        // Strong duality: b'y equals the primal optimum 3600.
        let dual = dual_model(&wyndor());
        let result = MicrolpBackend::new().solve(&dual);
        assert_eq!(result.status, SolveStatus::Optimal);
        assert!((result.objective_value.unwrap() - 3600.0).abs() < 1e-6);
    }

    #[test]
    fn minimize_direction_flips_price_sign() {
        // Minimize -3x with x <= 4: optimum x=4, and one more unit of
        // capacity lowers the cost by 3.
        let model = LpModel {
            direction: Direction::Minimize,
            variables: vec![VariableDef {
                name: "x".to_string(),
                objective: -3.0,
                min: 0.0,
                domain: VarDomain::Continuous,
            }],
            constraints: vec![ConstraintRow {
                name: "cap".to_string(),
                coefficients: vec![1.0],
                upper: 4.0,
            }],
        };

        let prices = price_capacities(&model, &MicrolpBackend::new()).unwrap();
        assert!((prices[0] - (-3.0)).abs() < 1e-6, "price {}", prices[0]);
    }

    #[test]
    fn integer_model_has_no_prices() {
        let mut model = wyndor();
        model.variables[0].domain = VarDomain::Integer;
        assert!(price_capacities(&model, &MicrolpBackend::new()).is_none());
    }

    #[test]
    fn lower_bounds_shift_committed_capacity() {
        // Forcing doors >= 1 leaves the dual prices intact at the same
        // optimal basis (the optimum already produces 2 doors).
        let mut model = wyndor();
        model.variables[0].min = 1.0;
        let prices = price_capacities(&model, &MicrolpBackend::new()).unwrap();
        assert!((prices[1] - 150.0).abs() < 1e-6);
        assert!((prices[2] - 100.0).abs() < 1e-6);
    }
}
