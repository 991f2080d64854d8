use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstructorSearchRequest {
    pub snippet: String,
    pub exclude_uids: Vec<String>,
}
