mod adapter;
mod backend;
mod backends;
mod dual;
mod model;

pub use adapter::Adapter;
pub use backend::{SolveStatus, SolverBackend, SolverResult};
pub use backends::MicrolpBackend;
pub use model::{ConstraintRow, Direction, LpModel, ModelError, VarDomain, VariableDef};
