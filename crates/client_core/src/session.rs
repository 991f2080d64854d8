//! Signed-in user and application configuration.

use serde_json::Value;
use shared::domain::{ApplicationConfig, CurrentUser, EvalType, FormRef, Term, TermId};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Wire names accepted by [`SessionState::patch_config`].
const CONFIG_KEYS: &[&str] = &[
    "apiBaseUrl",
    "availableTerms",
    "currentTermId",
    "currentTermName",
    "departmentForms",
    "evaluationTypes",
    "devAuthEnabled",
    "easterEggMonastery",
    "easterEggNannysRoom",
    "isVueAppDebugMode",
    "scheduleLochRefresh",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    Unauthenticated,
    AuthenticatedNonAdmin,
    AuthenticatedAdmin,
}

impl AuthState {
    pub fn of(user: &CurrentUser) -> Self {
        match (user.is_authenticated, user.is_admin) {
            (false, _) => Self::Unauthenticated,
            (true, false) => Self::AuthenticatedNonAdmin,
            (true, true) => Self::AuthenticatedAdmin,
        }
    }
}

/// Single-field patch of the loaded configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigUpdate {
    AvailableTerms(Vec<Term>),
    CurrentTerm { id: TermId, name: String },
    DepartmentForms(Vec<FormRef>),
    EvaluationTypes(Vec<EvalType>),
    DevAuthEnabled(bool),
}

#[derive(Debug, Error)]
pub enum ConfigPatchError {
    #[error("unknown config key '{0}'")]
    UnknownKey(String),
    #[error("invalid value for config key '{key}': {source}")]
    InvalidValue {
        key: String,
        source: serde_json::Error,
    },
}

#[derive(Debug, Default)]
pub struct SessionState {
    current_user: CurrentUser,
    config: ApplicationConfig,
}

impl SessionState {
    pub fn current_user(&self) -> &CurrentUser {
        &self.current_user
    }

    pub fn config(&self) -> &ApplicationConfig {
        &self.config
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user.is_authenticated
    }

    pub fn is_admin(&self) -> bool {
        self.current_user.is_admin
    }

    pub fn auth_state(&self) -> AuthState {
        AuthState::of(&self.current_user)
    }

    pub fn set_current_user(&mut self, user: CurrentUser) {
        info!(
            uid = %user.uid,
            authenticated = user.is_authenticated,
            admin = user.is_admin,
            "current user replaced"
        );
        self.current_user = user;
    }

    pub fn sign_out(&mut self) {
        info!(uid = %self.current_user.uid, "signing out");
        self.current_user = CurrentUser::default();
    }

    pub fn set_config(&mut self, config: ApplicationConfig) {
        if !config.available_terms.is_empty() && config.current_term().is_none() {
            warn!(
                current_term_id = %config.current_term_id,
                "configured current term is not among available terms"
            );
        }
        debug!(
            terms = config.available_terms.len(),
            current_term_id = %config.current_term_id,
            "config loaded"
        );
        self.config = config;
    }

    pub fn update_config(&mut self, update: ConfigUpdate) {
        match update {
            ConfigUpdate::AvailableTerms(terms) => self.config.available_terms = terms,
            ConfigUpdate::CurrentTerm { id, name } => {
                self.config.current_term_id = id;
                self.config.current_term_name = name;
            }
            ConfigUpdate::DepartmentForms(forms) => self.config.department_forms = forms,
            ConfigUpdate::EvaluationTypes(types) => self.config.evaluation_types = types,
            ConfigUpdate::DevAuthEnabled(enabled) => self.config.dev_auth_enabled = enabled,
        }
    }

    /// Patches one field by its wire name. Config is left untouched on error.
    pub fn patch_config(&mut self, key: &str, value: Value) -> Result<(), ConfigPatchError> {
        if !CONFIG_KEYS.contains(&key) {
            return Err(ConfigPatchError::UnknownKey(key.to_string()));
        }

        let invalid = |source: serde_json::Error| ConfigPatchError::InvalidValue {
            key: key.to_string(),
            source,
        };
        let mut raw = serde_json::to_value(&self.config).map_err(invalid)?;
        if let Value::Object(fields) = &mut raw {
            fields.insert(key.to_string(), value);
        }
        self.config = serde_json::from_value(raw).map_err(invalid)?;
        debug!(key, "config patched");
        Ok(())
    }

    pub fn set_department_forms(&mut self, forms: Vec<FormRef>) {
        self.update_config(ConfigUpdate::DepartmentForms(forms));
    }

    pub fn set_evaluation_types(&mut self, types: Vec<EvalType>) {
        self.update_config(ConfigUpdate::EvaluationTypes(types));
    }
}
