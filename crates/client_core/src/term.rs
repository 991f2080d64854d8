use shared::domain::{ApplicationConfig, Term, TermId};
use thiserror::Error;
use tracing::debug;

/// The requested term does not resolve against the configured terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("term is not available")]
pub struct TermUnavailable;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectedTerm {
    id: Option<TermId>,
    name: Option<String>,
    is_locked: bool,
}

impl SelectedTerm {
    pub fn id(&self) -> Option<&TermId> {
        self.id.as_ref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn is_locked(&self) -> bool {
        self.is_locked
    }

    pub fn set_locked(&mut self, is_locked: bool) {
        self.is_locked = is_locked;
    }

    /// Resolves `requested` (or the configured current term when it is absent
    /// or blank) and commits it as the selected term.
    pub fn select(
        &mut self,
        config: &ApplicationConfig,
        requested: Option<&TermId>,
    ) -> Result<Term, TermUnavailable> {
        let wanted = requested
            .filter(|id| !id.is_blank())
            .unwrap_or(&config.current_term_id);
        let term = config.find_term(wanted).ok_or(TermUnavailable)?.clone();

        self.id = Some(term.id.clone());
        self.name = Some(term.name.clone());
        debug!(term_id = %term.id, term_name = %term.name, "term selected");
        Ok(term)
    }
}
