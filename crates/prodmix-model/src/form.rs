//! Raw problem input as submitted by a user, before any parsing.
//!
//! Every numeric field arrives as a string so that a bad entry can be
//! reported alongside every other problem in the submission instead of
//! failing at the first token.

use prodmix_solver::{Direction, VarDomain};

use crate::problem::{
    Product, ProblemSpec, Resource, UsageMatrix, ValidationError, ValidationErrors,
};

/// One product row of the input form.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ProductField {
    pub name: String,
    /// Per-unit profit or cost, unparsed.
    pub value: String,
    /// Optional forced minimum production, unparsed.
    #[cfg_attr(feature = "serde", serde(default))]
    pub min_quantity: Option<String>,
}

/// One resource row of the input form.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceField {
    pub name: String,
    pub capacity: String,
}

/// A complete unvalidated submission.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ProblemForm {
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    /// "maximize" or "minimize".
    pub direction: String,
    /// "continuous" or "integer", applied to every product.
    pub domain: String,
    pub products: Vec<ProductField>,
    pub resources: Vec<ResourceField>,
    /// Usage grid, one row per resource, one entry per product.
    pub usage: Vec<Vec<String>>,
}

impl ProblemForm {
    /// Parse and validate the whole submission, reporting every violated
    /// rule at once. Parse failures substitute a zero so the remaining
    /// checks still run over the rest of the input.
    pub fn validate(&self) -> Result<ProblemSpec, ValidationErrors> {
        let mut errors = Vec::new();

        let direction = match self.direction.trim().to_ascii_lowercase().as_str() {
            "maximize" | "max" => Direction::Maximize,
            "minimize" | "min" => Direction::Minimize,
            _ => {
                errors.push(ValidationError::UnknownDirection(self.direction.clone()));
                Direction::Maximize
            }
        };

        let domain = match self.domain.trim().to_ascii_lowercase().as_str() {
            "continuous" => VarDomain::Continuous,
            "integer" => VarDomain::Integer,
            _ => {
                errors.push(ValidationError::UnknownDomain(self.domain.clone()));
                VarDomain::Continuous
            }
        };

        let products: Vec<Product> = self
            .products
            .iter()
            .enumerate()
            .map(|(i, field)| {
                let coefficient =
                    parse_number(&field.value, format!("products[{i}].value"), &mut errors);
                let min_quantity = field.min_quantity.as_ref().map_or(0.0, |raw| {
                    parse_number(raw, format!("products[{i}].min_quantity"), &mut errors)
                });
                Product {
                    name: field.name.trim().to_string(),
                    coefficient,
                    min_quantity,
                    domain,
                }
            })
            .collect();

        let resources: Vec<Resource> = self
            .resources
            .iter()
            .enumerate()
            .map(|(i, field)| Resource {
                name: field.name.trim().to_string(),
                capacity: parse_number(
                    &field.capacity,
                    format!("resources[{i}].capacity"),
                    &mut errors,
                ),
            })
            .collect();

        let rows: Vec<Vec<f64>> = self
            .usage
            .iter()
            .enumerate()
            .map(|(i, row)| {
                row.iter()
                    .enumerate()
                    .map(|(j, raw)| parse_number(raw, format!("usage[{i}][{j}]"), &mut errors))
                    .collect()
            })
            .collect();

        match ProblemSpec::new(
            self.name.trim(),
            direction,
            products,
            resources,
            UsageMatrix::new(rows),
        ) {
            Ok(spec) if errors.is_empty() => Ok(spec),
            Ok(_) => Err(ValidationErrors::new(errors)),
            Err(more) => {
                errors.extend(more.into_vec());
                Err(ValidationErrors::new(errors))
            }
        }
    }
}

fn parse_number(raw: &str, field: String, errors: &mut Vec<ValidationError>) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => {
            errors.push(ValidationError::NonNumeric {
                field,
                value: raw.to_string(),
            });
            0.0
        }
    }
}
