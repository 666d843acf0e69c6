/// Marker replaced with the requested question count.
pub const QUESTION_COUNT_PLACEHOLDER: &str = "{question_count}";
/// Marker replaced with the JSON schema of a single quiz item.
pub const SCHEMA_PLACEHOLDER: &str = "{item_schema}";
/// Marker replaced with the (truncated) document text. Substituted last so
/// document content is never scanned for the other markers.
pub const CONTEXT_PLACEHOLDER: &str = "{context}";

pub const QUIZ_GENERATION_PROMPT: &str = r#"Based on the following text, generate {question_count} multiple-choice questions. If the text is short, generate fewer questions.
Every question must have exactly 4 unique answer options.
Write the questions and options in the same language as the text.
Return the answer strictly as a JSON array.
Each object in the array must have exactly these fields: 'question' (string), 'options' (array of 4 strings) and 'correctIndex' (integer 0-3 identifying the correct option).
The response must NOT contain anything other than the bare JSON array.

Each array element must match this JSON schema:
{item_schema}

TEXT:
---
{context}
"#;
