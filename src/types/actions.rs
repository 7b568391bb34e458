//! Callable actions offered to the model

use serde::{Deserialize, Serialize};

/// An action the host runtime can execute on the model's behalf.
///
/// `json_schema` is the JSON Schema of the action parameters, kept as the
/// raw string the host supplies.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ActionInput {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub json_schema: String,
}

impl ActionInput {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        json_schema: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            json_schema: json_schema.into(),
        }
    }
}
