use crate::backend::{SolveStatus, SolverBackend, SolverResult};
use crate::backends::MicrolpBackend;
use crate::dual;
use crate::model::LpModel;

/// Normalizing layer between a built model and an LP backend.
///
/// The adapter owns the replaceable backend, rejects malformed models before
/// they reach it, and fills in capacity duals for continuous models when the
/// backend does not report them. Every failure mode comes back as a typed
/// `SolveStatus`; nothing escapes as a panic or untyped error.
pub struct Adapter<B: SolverBackend = MicrolpBackend> {
    backend: B,
}

impl Adapter<MicrolpBackend> {
    pub fn new() -> Self {
        Self {
            backend: MicrolpBackend::new(),
        }
    }
}

impl Default for Adapter<MicrolpBackend> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: SolverBackend> Adapter<B> {
    pub fn with_backend(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    pub fn solve(&self, model: &LpModel) -> SolverResult {
        if let Err(err) = model.validate() {
            return SolverResult::error(err.to_string());
        }

        log::debug!(
            "solving {} variables / {} constraints with {}",
            model.num_variables(),
            model.num_constraints(),
            self.backend.name()
        );

        let mut result = self.backend.solve(model);
        log::debug!("backend reported {:?}", result.status);

        if result.status == SolveStatus::Optimal && result.duals.is_none() {
            result.duals = dual::price_capacities(model, &self.backend);
        }
        result
    }
}
