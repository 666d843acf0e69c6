use std::env;
use secrecy::SecretString;

pub const DEFAULT_COMPLETION_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/openai";
pub const DEFAULT_COMPLETION_MODEL: &str = "gemini-2.5-pro";
pub const DEFAULT_CONTEXT_CHAR_LIMIT: usize = 20_000;
pub const DEFAULT_MAX_QUESTIONS: usize = 10;
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

#[derive(Clone, Debug)]
pub struct Config {
    pub api_key: Option<SecretString>,
    pub completion_api_base: String,
    pub completion_model: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub context_char_limit: usize,
    pub max_questions: usize,
    pub max_upload_bytes: usize,
    /// `None` allows any origin.
    pub cors_allowed_origin: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            api_key: non_empty_var("GEMINI_API_KEY").map(SecretString::from),
            completion_api_base: env::var("COMPLETION_API_BASE")
                .unwrap_or_else(|_| DEFAULT_COMPLETION_API_BASE.to_string()),
            completion_model: env::var("COMPLETION_MODEL")
                .unwrap_or_else(|_| DEFAULT_COMPLETION_MODEL.to_string()),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "127.0.0.1".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            context_char_limit: parsed_var("QUIZ_CONTEXT_CHAR_LIMIT")
                .unwrap_or(DEFAULT_CONTEXT_CHAR_LIMIT),
            max_questions: parsed_var("QUIZ_MAX_QUESTIONS").unwrap_or(DEFAULT_MAX_QUESTIONS),
            max_upload_bytes: parsed_var("MAX_UPLOAD_BYTES").unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
            cors_allowed_origin: non_empty_var("CORS_ALLOWED_ORIGIN"),
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Logs configuration problems that only show up once requests arrive.
    /// A missing credential does not stop the server from starting.
    pub fn warn_if_incomplete(&self) {
        if !self.has_api_key() {
            log::warn!("GEMINI_API_KEY is not set; quiz generation requests will fail with 500");
        }
        if self.context_char_limit == 0 {
            log::warn!("QUIZ_CONTEXT_CHAR_LIMIT is 0; prompts will carry no document text");
        }
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            api_key: Some(SecretString::from("test_api_key".to_string())),
            completion_api_base: "http://127.0.0.1:9/v1".to_string(),
            completion_model: "test-model".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 5000,
            context_char_limit: DEFAULT_CONTEXT_CHAR_LIMIT,
            max_questions: DEFAULT_MAX_QUESTIONS,
            max_upload_bytes: 1024 * 1024,
            cors_allowed_origin: None,
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parsed_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}
