//! Translation from a validated problem into the canonical solver model.
//!
//! Positional by construction: variable `j` is product `j`, constraint row
//! `i` is resource `i`, so results map back to the problem without lookups.

use prodmix_solver::{ConstraintRow, LpModel, VariableDef};

use crate::problem::ProblemSpec;

/// Build the canonical LP for a validated problem. Deterministic: the same
/// spec always produces the same model.
pub fn build_model(spec: &ProblemSpec) -> LpModel {
    let variables = spec
        .products
        .iter()
        .map(|product| VariableDef {
            name: product.name.clone(),
            objective: product.coefficient,
            min: product.min_quantity,
            domain: product.domain,
        })
        .collect();

    let constraints = spec
        .resources
        .iter()
        .zip(spec.usage.rows())
        .map(|(resource, row)| ConstraintRow {
            name: resource.name.clone(),
            coefficients: row.clone(),
            upper: resource.capacity,
        })
        .collect();

    LpModel {
        direction: spec.direction,
        variables,
        constraints,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::{Product, Resource, UsageMatrix};
    use prodmix_solver::{Direction, VarDomain};

    fn spec() -> ProblemSpec {
        ProblemSpec::new(
            "test",
            Direction::Maximize,
            vec![
                Product {
                    name: "doors".to_string(),
                    coefficient: 300.0,
                    min_quantity: 1.0,
                    domain: VarDomain::Continuous,
                },
                Product {
                    name: "windows".to_string(),
                    coefficient: 500.0,
                    min_quantity: 0.0,
                    domain: VarDomain::Integer,
                },
            ],
            vec![
                Resource {
                    name: "plant_1".to_string(),
                    capacity: 4.0,
                },
                Resource {
                    name: "plant_3".to_string(),
                    capacity: 18.0,
                },
            ],
            UsageMatrix::new(vec![vec![1.0, 0.0], vec![3.0, 2.0]]),
        )
        .unwrap()
    }

    #[test]
    fn preserves_order_and_values() {
        let model = build_model(&spec());

        assert_eq!(model.direction, Direction::Maximize);
        assert_eq!(model.variables.len(), 2);
        assert_eq!(model.variables[0].name, "doors");
        assert_eq!(model.variables[0].objective, 300.0);
        assert_eq!(model.variables[0].min, 1.0);
        assert_eq!(model.variables[1].domain, VarDomain::Integer);

        assert_eq!(model.constraints.len(), 2);
        assert_eq!(model.constraints[1].name, "plant_3");
        assert_eq!(model.constraints[1].coefficients, vec![3.0, 2.0]);
        assert_eq!(model.constraints[1].upper, 18.0);
    }

    #[test]
    fn is_deterministic() {
        let s = spec();
        assert_eq!(build_model(&s), build_model(&s));
    }
}
