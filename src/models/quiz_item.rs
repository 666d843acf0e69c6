use std::collections::HashSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

// Responses are returned to callers as parsed JSON, not as this type. It
// only describes the expected shape for the prompt schema and the shape audit.

/// One multiple-choice question as the model is asked to produce it.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Validate, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuizItem {
    #[validate(length(min = 1))]
    pub question: String,
    #[validate(length(equal = 4))]
    pub options: Vec<String>,
    #[validate(range(min = 0, max = 3))]
    pub correct_index: i64,
}

impl QuizItem {
    /// Options that appear more than once, compared after trimming.
    pub fn duplicate_options(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        for option in &self.options {
            let key = option.trim();
            if !seen.insert(key) && !duplicates.contains(&key) {
                duplicates.push(key);
            }
        }
        duplicates
    }
}
