use std::sync::Arc;

use once_cell::sync::Lazy;
use serde_json::Value;
use validator::Validate;

use crate::{
    config::Config,
    constants::quiz_prompt::{
        CONTEXT_PLACEHOLDER, QUESTION_COUNT_PLACEHOLDER, QUIZ_GENERATION_PROMPT, SCHEMA_PLACEHOLDER,
    },
    errors::GenerationError,
    models::QuizItem,
    services::completion_client::CompletionClient,
};

const JSON_FENCE_OPEN: &str = "```json";
const FENCE: &str = "```";

static QUIZ_ITEM_SCHEMA: Lazy<String> = Lazy::new(|| {
    serde_json::to_string_pretty(&schemars::schema_for!(QuizItem)).unwrap_or_default()
});

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GenerationSettings {
    /// Maximum number of source characters embedded in the prompt.
    pub context_char_limit: usize,
    pub max_questions: usize,
}

impl GenerationSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            context_char_limit: config.context_char_limit,
            max_questions: config.max_questions,
        }
    }
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            context_char_limit: crate::config::DEFAULT_CONTEXT_CHAR_LIMIT,
            max_questions: crate::config::DEFAULT_MAX_QUESTIONS,
        }
    }
}

pub struct QuizService {
    completion: Arc<dyn CompletionClient>,
    settings: GenerationSettings,
}

impl QuizService {
    pub fn new(completion: Arc<dyn CompletionClient>, settings: GenerationSettings) -> Self {
        Self {
            completion,
            settings,
        }
    }

    pub fn settings(&self) -> GenerationSettings {
        self.settings
    }

    /// Runs the prompt → completion → clean → parse pipeline once.
    ///
    /// The parsed JSON is returned exactly as the model produced it. Shape
    /// problems are logged, never corrected or rejected.
    pub async fn generate_quiz(&self, text: &str) -> Result<Value, GenerationError> {
        let context = truncate_context(text, self.settings.context_char_limit);
        if context.len() < text.len() {
            log::info!(
                "Truncated document text to {} chars for the prompt",
                self.settings.context_char_limit
            );
        }

        let prompt = build_prompt(context, self.settings.max_questions);
        let raw = self.completion.complete(&prompt).await?;
        log::debug!("Completion returned {} chars", raw.chars().count());

        let quiz = parse_quiz(&clean_completion(&raw))?;

        let findings = audit_quiz_shape(&quiz, self.settings.max_questions);
        for finding in &findings {
            log::warn!("Generated quiz shape: {}", finding);
        }

        Ok(quiz)
    }
}

/// Longest prefix of `text` holding at most `limit` characters.
pub fn truncate_context(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

pub fn build_prompt(context: &str, max_questions: usize) -> String {
    QUIZ_GENERATION_PROMPT
        .replace(QUESTION_COUNT_PLACEHOLDER, &max_questions.to_string())
        .replace(SCHEMA_PLACEHOLDER, QUIZ_ITEM_SCHEMA.as_str())
        .replace(CONTEXT_PLACEHOLDER, context)
}

/// Trims the response and removes every `` ```json `` and `` ``` `` marker,
/// wherever it occurs. Purely textual.
pub fn clean_completion(raw: &str) -> String {
    raw.trim().replace(JSON_FENCE_OPEN, "").replace(FENCE, "")
}

pub fn parse_quiz(cleaned: &str) -> Result<Value, GenerationError> {
    serde_json::from_str(cleaned).map_err(|e| {
        log::error!("Model response is not valid JSON: {}", e);
        GenerationError::InvalidJson(e.to_string())
    })
}

/// Describes every way `quiz` deviates from an array of well-formed quiz
/// items. An empty result means the shape is as requested.
pub fn audit_quiz_shape(quiz: &Value, max_questions: usize) -> Vec<String> {
    let Some(items) = quiz.as_array() else {
        return vec![format!("expected a JSON array, got {}", json_kind(quiz))];
    };

    let mut findings = Vec::new();
    if items.is_empty() {
        findings.push("quiz contains no questions".to_string());
    }
    if items.len() > max_questions {
        findings.push(format!(
            "{} questions returned, at most {} requested",
            items.len(),
            max_questions
        ));
    }

    for (index, item) in items.iter().enumerate() {
        match serde_json::from_value::<QuizItem>(item.clone()) {
            Ok(parsed) => {
                if let Err(errors) = parsed.validate() {
                    findings.push(format!("item {}: {}", index, errors));
                }
                let duplicates = parsed.duplicate_options();
                if !duplicates.is_empty() {
                    findings.push(format!("item {}: duplicate options {:?}", index, duplicates));
                }
            }
            Err(e) => findings.push(format!("item {}: {}", index, e)),
        }
    }

    findings
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
