use thiserror::Error;

/// Whether the objective function is maximized or minimized.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Maximize,
    Minimize,
}

/// Domain of a decision variable.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarDomain {
    /// Non-negative real quantity.
    Continuous,
    /// Non-negative whole-number quantity.
    Integer,
}

/// One decision variable of the canonical model.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDef {
    pub name: String,
    /// Objective coefficient (profit or cost per unit).
    pub objective: f64,
    /// Lower bound; zero for plain non-negativity.
    pub min: f64,
    pub domain: VarDomain,
}

/// One capacity row: sum(coefficients[j] * x[j]) <= upper.
///
/// The product-mix domain only has upper-bounded resource rows, so no
/// comparison operator is carried.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintRow {
    pub name: String,
    /// Aligned with the model's variable order.
    pub coefficients: Vec<f64>,
    pub upper: f64,
}

/// Canonical linear-program form consumed by solver backends.
///
/// Variable order and constraint order are significant: backends report
/// primal values and duals positionally against them.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct LpModel {
    pub direction: Direction,
    pub variables: Vec<VariableDef>,
    pub constraints: Vec<ConstraintRow>,
}

/// A structurally malformed model, caught before it reaches a backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("model has no variables")]
    NoVariables,
    #[error("constraint {name} has {actual} coefficients, expected {expected}")]
    CoefficientCount {
        name: String,
        expected: usize,
        actual: usize,
    },
}

impl LpModel {
    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    pub fn has_integer_vars(&self) -> bool {
        self.variables
            .iter()
            .any(|v| v.domain == VarDomain::Integer)
    }

    /// Check that every constraint row spans exactly the variable set.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.variables.is_empty() {
            return Err(ModelError::NoVariables);
        }
        for row in &self.constraints {
            if row.coefficients.len() != self.variables.len() {
                return Err(ModelError::CoefficientCount {
                    name: row.name.clone(),
                    expected: self.variables.len(),
                    actual: row.coefficients.len(),
                });
            }
        }
        Ok(())
    }
}
