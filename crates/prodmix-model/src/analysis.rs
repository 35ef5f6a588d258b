//! Interpretation of a raw solver result back in the problem's own terms:
//! per-product quantities, per-resource consumption and slack, and a ranked
//! table of capacity shadow prices.

use prodmix_solver::{Direction, SolveStatus, SolverResult};

use crate::problem::ProblemSpec;

/// Tolerance below which a slack is treated as zero (and the resource as
/// binding). Absorbs simplex round-off.
pub const BINDING_EPSILON: f64 = 1e-6;

/// Planned production of one product.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ProductQuantity {
    pub product: String,
    pub quantity: f64,
    /// Objective coefficient of the product (profit or cost per unit).
    pub unit_value: f64,
    /// Objective contribution of this product (quantity times coefficient).
    pub total_value: f64,
}

/// Consumption of one resource under the optimal plan.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceUsage {
    pub resource: String,
    pub used: f64,
    pub available: f64,
    pub slack: f64,
    /// Percentage of capacity consumed; zero when the capacity is zero.
    pub utilization_pct: f64,
    pub is_binding: bool,
}

/// Marginal value of one more unit of a capacity.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub enum ShadowPrice {
    PerUnit(f64),
    /// Duals carry no meaning for integer problems or when pricing failed.
    NotApplicable,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ShadowPriceEntry {
    pub resource: String,
    pub price: ShadowPrice,
}

/// Everything a caller needs to present a solve outcome.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    pub problem: String,
    pub status: SolveStatus,
    /// Human-readable account of a non-optimal outcome.
    pub explanation: Option<String>,
    pub objective_value: Option<f64>,
    pub quantities: Vec<ProductQuantity>,
    pub resources: Vec<ResourceUsage>,
    /// Sorted by price, most valuable capacity first.
    pub shadow_prices: Vec<ShadowPriceEntry>,
}

/// Interpret a solver result against the problem it came from.
///
/// Resource consumption is recomputed from the usage matrix and the solved
/// quantities, never read back from solver internals, so the reported
/// numbers always satisfy `used <= available` up to `BINDING_EPSILON`.
pub fn interpret(spec: &ProblemSpec, result: &SolverResult) -> AnalysisResult {
    if result.status != SolveStatus::Optimal {
        return AnalysisResult {
            problem: spec.name.clone(),
            status: result.status,
            explanation: Some(explain(spec, result)),
            objective_value: None,
            quantities: Vec::new(),
            resources: Vec::new(),
            shadow_prices: Vec::new(),
        };
    }

    let quantities: Vec<ProductQuantity> = spec
        .products
        .iter()
        .zip(&result.quantities)
        .map(|(product, &quantity)| ProductQuantity {
            product: product.name.clone(),
            quantity,
            unit_value: product.coefficient,
            total_value: quantity * product.coefficient,
        })
        .collect();

    let used = spec.used_per_resource(&result.quantities);
    let resources: Vec<ResourceUsage> = spec
        .resources
        .iter()
        .zip(&used)
        .map(|(resource, &used)| {
            let raw_slack = resource.capacity - used;
            let slack = if raw_slack.abs() <= BINDING_EPSILON {
                0.0
            } else {
                raw_slack
            };
            let utilization_pct = if resource.capacity > 0.0 {
                used / resource.capacity * 100.0
            } else {
                0.0
            };
            ResourceUsage {
                resource: resource.name.clone(),
                used,
                available: resource.capacity,
                slack,
                utilization_pct,
                is_binding: slack <= BINDING_EPSILON,
            }
        })
        .collect();

    let shadow_prices = shadow_price_table(spec, result);

    log::debug!(
        "{}: objective {:?}, {} of {} resources binding",
        spec.name,
        result.objective_value,
        resources.iter().filter(|r| r.is_binding).count(),
        resources.len()
    );

    AnalysisResult {
        problem: spec.name.clone(),
        status: SolveStatus::Optimal,
        explanation: None,
        objective_value: result.objective_value,
        quantities,
        resources,
        shadow_prices,
    }
}

fn shadow_price_table(spec: &ProblemSpec, result: &SolverResult) -> Vec<ShadowPriceEntry> {
    let duals = match &result.duals {
        Some(duals) if !spec.has_integer_domain() => duals,
        _ => {
            return spec
                .resources
                .iter()
                .map(|r| ShadowPriceEntry {
                    resource: r.name.clone(),
                    price: ShadowPrice::NotApplicable,
                })
                .collect();
        }
    };

    let mut entries: Vec<ShadowPriceEntry> = spec
        .resources
        .iter()
        .zip(duals)
        .map(|(resource, &price)| ShadowPriceEntry {
            resource: resource.name.clone(),
            price: ShadowPrice::PerUnit(price),
        })
        .collect();

    // Most valuable capacity first; ties keep input order.
    entries.sort_by(|a, b| {
        let (ShadowPrice::PerUnit(pa), ShadowPrice::PerUnit(pb)) = (&a.price, &b.price) else {
            return std::cmp::Ordering::Equal;
        };
        pb.partial_cmp(pa).unwrap_or(std::cmp::Ordering::Equal)
    });
    entries
}

fn explain(spec: &ProblemSpec, result: &SolverResult) -> String {
    match result.status {
        SolveStatus::Infeasible => {
            "no combination of quantities satisfies all resource limits; \
             lower a minimum quantity or raise a capacity"
                .to_string()
        }
        SolveStatus::Unbounded => match spec.direction {
            Direction::Maximize => {
                "the objective can be increased without limit; \
                 some product is missing a resource constraint"
                    .to_string()
            }
            Direction::Minimize => {
                "the objective can be decreased without limit; \
                 some product is missing a resource constraint"
                    .to_string()
            }
        },
        SolveStatus::Error => result
            .diagnostic
            .clone()
            .unwrap_or_else(|| "the solver backend failed".to_string()),
        SolveStatus::Optimal => String::new(),
    }
}
