use std::collections::HashSet;
use std::fmt;

use prodmix_solver::{Direction, VarDomain};
use thiserror::Error;

/// A single rule violated by user input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("no products defined")]
    NoProducts,
    #[error("no resources defined")]
    NoResources,
    #[error("product {index}: name is empty")]
    EmptyProductName { index: usize },
    #[error("resource {index}: name is empty")]
    EmptyResourceName { index: usize },
    #[error("duplicate product name: {0}")]
    DuplicateProductName(String),
    #[error("duplicate resource name: {0}")]
    DuplicateResourceName(String),
    #[error("{field}: expected a number, got {value:?}")]
    NonNumeric { field: String, value: String },
    #[error("unknown objective direction {0:?} (expected \"maximize\" or \"minimize\")")]
    UnknownDirection(String),
    #[error("unknown variable domain {0:?} (expected \"continuous\" or \"integer\")")]
    UnknownDomain(String),
    #[error("resource {resource}: capacity {value} is negative")]
    NegativeCapacity { resource: String, value: f64 },
    #[error("usage of {resource} per unit of {product} is negative ({value})")]
    NegativeUsage {
        resource: String,
        product: String,
        value: f64,
    },
    #[error("product {product}: minimum quantity {value} is negative")]
    NegativeMinQuantity { product: String, value: f64 },
    #[error("usage grid has {actual} rows, expected one per resource ({expected})")]
    UsageRowCount { expected: usize, actual: usize },
    #[error("usage row for {resource} has {actual} entries, expected one per product ({expected})")]
    UsageEntryCount {
        resource: String,
        expected: usize,
        actual: usize,
    },
}

/// Every rule violated by one submission, so the caller can show the
/// complete list instead of fixing errors one at a time.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub fn new(errors: Vec<ValidationError>) -> Self {
        Self { errors }
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_vec(self) -> Vec<ValidationError> {
        self.errors
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", err)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// A product the user may produce.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub name: String,
    /// Profit (maximize) or cost (minimize) per unit.
    pub coefficient: f64,
    /// Production the plan must include regardless of profitability.
    pub min_quantity: f64,
    pub domain: VarDomain,
}

/// A limited resource consumed by production.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    pub name: String,
    pub capacity: f64,
}

/// Usage-per-unit coefficients, one row per resource, one entry per product.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct UsageMatrix {
    rows: Vec<Vec<f64>>,
}

impl UsageMatrix {
    pub fn new(rows: Vec<Vec<f64>>) -> Self {
        Self { rows }
    }

    /// Units of `resource` consumed per unit of `product`.
    pub fn value(&self, resource: usize, product: usize) -> f64 {
        self.rows[resource][product]
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }
}

/// A validated product-mix problem. Construction checks every invariant;
/// downstream code (builder, interpreter) relies on them without re-checking.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ProblemSpec {
    pub name: String,
    pub direction: Direction,
    pub products: Vec<Product>,
    pub resources: Vec<Resource>,
    pub usage: UsageMatrix,
}

impl ProblemSpec {
    /// Build a spec from typed parts, collecting every violated rule.
    pub fn new(
        name: impl Into<String>,
        direction: Direction,
        products: Vec<Product>,
        resources: Vec<Resource>,
        usage: UsageMatrix,
    ) -> Result<Self, ValidationErrors> {
        let mut errors = Vec::new();

        if products.is_empty() {
            errors.push(ValidationError::NoProducts);
        }
        if resources.is_empty() {
            errors.push(ValidationError::NoResources);
        }

        let mut seen = HashSet::new();
        for (i, product) in products.iter().enumerate() {
            if product.name.is_empty() {
                errors.push(ValidationError::EmptyProductName { index: i });
            } else if !seen.insert(product.name.as_str()) {
                errors.push(ValidationError::DuplicateProductName(product.name.clone()));
            }
            if product.min_quantity < 0.0 {
                errors.push(ValidationError::NegativeMinQuantity {
                    product: product.name.clone(),
                    value: product.min_quantity,
                });
            }
        }

        let mut seen = HashSet::new();
        for (i, resource) in resources.iter().enumerate() {
            if resource.name.is_empty() {
                errors.push(ValidationError::EmptyResourceName { index: i });
            } else if !seen.insert(resource.name.as_str()) {
                errors.push(ValidationError::DuplicateResourceName(resource.name.clone()));
            }
            if resource.capacity < 0.0 {
                errors.push(ValidationError::NegativeCapacity {
                    resource: resource.name.clone(),
                    value: resource.capacity,
                });
            }
        }

        if usage.rows.len() != resources.len() {
            errors.push(ValidationError::UsageRowCount {
                expected: resources.len(),
                actual: usage.rows.len(),
            });
        } else {
            for (i, row) in usage.rows.iter().enumerate() {
                if row.len() != products.len() {
                    errors.push(ValidationError::UsageEntryCount {
                        resource: resources[i].name.clone(),
                        expected: products.len(),
                        actual: row.len(),
                    });
                    continue;
                }
                for (j, &value) in row.iter().enumerate() {
                    if value < 0.0 {
                        errors.push(ValidationError::NegativeUsage {
                            resource: resources[i].name.clone(),
                            product: products[j].name.clone(),
                            value,
                        });
                    }
                }
            }
        }

        if !errors.is_empty() {
            return Err(ValidationErrors::new(errors));
        }

        Ok(Self {
            name: name.into(),
            direction,
            products,
            resources,
            usage,
        })
    }

    pub fn num_products(&self) -> usize {
        self.products.len()
    }

    pub fn num_resources(&self) -> usize {
        self.resources.len()
    }

    pub fn has_integer_domain(&self) -> bool {
        self.products.iter().any(|p| p.domain == VarDomain::Integer)
    }

    /// Resource consumption implied by a production plan, recomputed from
    /// the usage matrix rather than trusted from solver internals.
    pub fn used_per_resource(&self, quantities: &[f64]) -> Vec<f64> {
        self.usage
            .rows
            .iter()
            .map(|row| {
                row.iter()
                    .zip(quantities)
                    .map(|(usage, qty)| usage * qty)
                    .sum()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(name: &str, coefficient: f64) -> Product {
        Product {
            name: name.to_string(),
            coefficient,
            min_quantity: 0.0,
            domain: VarDomain::Continuous,
        }
    }

    fn resource(name: &str, capacity: f64) -> Resource {
        Resource {
            name: name.to_string(),
            capacity,
        }
    }

    #[test]
    fn accepts_well_formed_spec() {
        let spec = ProblemSpec::new(
            "test",
            Direction::Maximize,
            vec![product("a", 1.0), product("b", 2.0)],
            vec![resource("r", 10.0)],
            UsageMatrix::new(vec![vec![1.0, 3.0]]),
        )
        .unwrap();
        assert_eq!(spec.num_products(), 2);
        assert_eq!(spec.num_resources(), 1);
        assert_eq!(spec.usage.value(0, 1), 3.0);
    }

    #[test]
    fn collects_every_violation() {
        let err = ProblemSpec::new(
            "bad",
            Direction::Maximize,
            vec![product("", 1.0), product("a", 1.0), product("a", 2.0)],
            vec![resource("r", -5.0)],
            UsageMatrix::new(vec![vec![1.0, -2.0, 0.0]]),
        )
        .unwrap_err();

        let errors = err.errors();
        assert!(errors.contains(&ValidationError::EmptyProductName { index: 0 }));
        assert!(errors.contains(&ValidationError::DuplicateProductName("a".to_string())));
        assert!(errors.contains(&ValidationError::NegativeCapacity {
            resource: "r".to_string(),
            value: -5.0,
        }));
        assert!(errors.contains(&ValidationError::NegativeUsage {
            resource: "r".to_string(),
            product: "a".to_string(),
            value: -2.0,
        }));
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn rejects_dimension_mismatch() {
        let err = ProblemSpec::new(
            "bad",
            Direction::Maximize,
            vec![product("a", 1.0)],
            vec![resource("r", 1.0), resource("s", 1.0)],
            UsageMatrix::new(vec![vec![1.0]]),
        )
        .unwrap_err();
        assert_eq!(
            err.errors(),
            &[ValidationError::UsageRowCount {
                expected: 2,
                actual: 1,
            }]
        );
    }

    #[test]
    fn rejects_short_usage_row() {
        let err = ProblemSpec::new(
            "bad",
            Direction::Maximize,
            vec![product("a", 1.0), product("b", 1.0)],
            vec![resource("r", 1.0)],
            UsageMatrix::new(vec![vec![1.0]]),
        )
        .unwrap_err();
        assert_eq!(
            err.errors(),
            &[ValidationError::UsageEntryCount {
                resource: "r".to_string(),
                expected: 2,
                actual: 1,
            }]
        );
    }

    #[test]
    fn rejects_empty_problem() {
        let err = ProblemSpec::new(
            "empty",
            Direction::Minimize,
            Vec::new(),
            Vec::new(),
            UsageMatrix::new(Vec::new()),
        )
        .unwrap_err();
        assert!(err.errors().contains(&ValidationError::NoProducts));
        assert!(err.errors().contains(&ValidationError::NoResources));
    }

    #[test]
    fn recomputes_usage_from_quantities() {
        let spec = ProblemSpec::new(
            "test",
            Direction::Maximize,
            vec![product("a", 1.0), product("b", 2.0)],
            vec![resource("r", 10.0), resource("s", 20.0)],
            UsageMatrix::new(vec![vec![1.0, 0.0], vec![3.0, 2.0]]),
        )
        .unwrap();

        let used = spec.used_per_resource(&[2.0, 6.0]);
        assert_eq!(used, vec![2.0, 18.0]);
    }
}
