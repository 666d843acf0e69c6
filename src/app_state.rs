use std::sync::Arc;

use crate::{
    config::Config,
    services::{
        completion_client::{CompletionClient, OpenAiCompletionClient},
        quiz_service::{GenerationSettings, QuizService},
    },
};

#[derive(Clone)]
pub struct AppState {
    pub quiz_service: Arc<QuizService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let completion = Arc::new(OpenAiCompletionClient::from_config(&config));
        Self::with_completion_client(config, completion)
    }

    /// Builds state around a caller-supplied completion client, e.g. a stub.
    pub fn with_completion_client(config: Config, completion: Arc<dyn CompletionClient>) -> Self {
        let quiz_service = Arc::new(QuizService::new(
            completion,
            GenerationSettings::from_config(&config),
        ));

        Self {
            quiz_service,
            config: Arc::new(config),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_cloneable() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_generation_settings_follow_config() {
        let mut config = Config::test_config();
        config.context_char_limit = 500;
        config.max_questions = 4;

        let state = AppState::new(config);
        let settings = state.quiz_service.settings();
        assert_eq!(settings.context_char_limit, 500);
        assert_eq!(settings.max_questions, 4);
    }
}
