//! Product-mix planning: validated problem specs, translation to a
//! canonical LP, and interpretation of solver results (slack, utilization,
//! binding resources, shadow prices).

pub mod analysis;
pub mod build;
pub mod form;
pub mod problem;
pub mod report;

pub use analysis::{
    interpret, AnalysisResult, ProductQuantity, ResourceUsage, ShadowPrice, ShadowPriceEntry,
    BINDING_EPSILON,
};
pub use build::build_model;
pub use form::{ProblemForm, ProductField, ResourceField};
pub use problem::{
    Product, ProblemSpec, Resource, UsageMatrix, ValidationError, ValidationErrors,
};
pub use report::{flatten, format_number, status_label, ReportRow};
