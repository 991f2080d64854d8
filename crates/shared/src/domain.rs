use serde::{Deserialize, Deserializer, Serialize};

/// Identifier of an academic term.
///
/// The API emits term ids either as strings (`"2228"`) or as bare numbers
/// (`2228`); both deserialize to the same canonical text form.
///
/// Equality is on that text, so `2228` and `"2228"` name the same term even
/// though a strict comparison of the raw JSON values would not. Only a blank
/// (or `null`) id means "no term": a numeric `0` is a real id, `"0"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TermId(pub String);

impl TermId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// A blank id stands in for "no term requested".
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TermId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TermId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<i64> for TermId {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

impl<'de> Deserialize<'de> for TermId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawTermId {
            Text(String),
            Number(i64),
            Null,
        }

        Ok(match RawTermId::deserialize(deserializer)? {
            RawTermId::Text(text) => Self(text),
            RawTermId::Number(number) => Self(number.to_string()),
            RawTermId::Null => Self::default(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    pub id: TermId,
    pub name: String,
}

impl Term {
    pub fn new(id: impl Into<TermId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DepartmentRef {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormRef {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EvalType {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

/// The signed-in user as reported by the profile endpoint.
///
/// `Default` is the anonymous user every session starts with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CurrentUser {
    pub uid: String,
    pub is_authenticated: bool,
    pub is_admin: bool,
    pub departments: Vec<DepartmentRef>,
    pub email_support: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ApplicationConfig {
    pub api_base_url: String,
    pub available_terms: Vec<Term>,
    pub current_term_id: TermId,
    pub current_term_name: String,
    pub department_forms: Vec<FormRef>,
    pub evaluation_types: Vec<EvalType>,
    pub dev_auth_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub easter_egg_monastery: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub easter_egg_nannys_room: Option<String>,
    #[serde(rename = "isVueAppDebugMode")]
    pub is_debug_mode: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule_loch_refresh: Option<serde_json::Value>,
}

impl ApplicationConfig {
    pub fn find_term(&self, id: &TermId) -> Option<&Term> {
        self.available_terms.iter().find(|term| &term.id == id)
    }

    pub fn current_term(&self) -> Option<&Term> {
        self.find_term(&self.current_term_id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Instructor {
    pub uid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sis_id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,
}
