use std::{env, path::PathBuf, time::Duration};

#[derive(Clone, Debug)]
pub struct Config {
    pub web_server_host: String,
    pub web_server_port: u16,
    pub questions_dir: PathBuf,
    pub generator_base_url: String,
    pub generator_model: String,
    pub generator_timeout_secs: u64,
    pub default_question_count: usize,
    pub session_ttl_minutes: Option<u64>,
    pub session_sweep_interval_secs: u64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "127.0.0.1".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            questions_dir: env::var("QUESTIONS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data").join("questions")),
            generator_base_url: env::var("GENERATOR_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:11434".to_string()),
            generator_model: env::var("GENERATOR_MODEL")
                .unwrap_or_else(|_| "gemma3n:e2b".to_string()),
            generator_timeout_secs: env::var("GENERATOR_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
            default_question_count: env::var("DEFAULT_QUESTION_COUNT")
                .ok()
                .and_then(|c| c.parse().ok())
                .filter(|c| *c > 0)
                .unwrap_or(5),
            session_ttl_minutes: env::var("SESSION_TTL_MINUTES")
                .ok()
                .and_then(|m| m.parse().ok())
                .filter(|m| *m > 0),
            session_sweep_interval_secs: env::var("SESSION_SWEEP_INTERVAL_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|s| *s > 0)
                .unwrap_or(300),
        }
    }

    pub fn generator_timeout(&self) -> Duration {
        Duration::from_secs(self.generator_timeout_secs)
    }

    /// `None` keeps sessions for the lifetime of the process.
    pub fn session_ttl(&self) -> Option<Duration> {
        self.session_ttl_minutes
            .map(|minutes| Duration::from_secs(minutes.saturating_mul(60)))
    }

    pub fn session_sweep_interval(&self) -> Duration {
        Duration::from_secs(self.session_sweep_interval_secs)
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 3000,
            questions_dir: env::temp_dir().join("quiz-simulator-test"),
            generator_base_url: "http://127.0.0.1:9".to_string(),
            generator_model: "test-model".to_string(),
            generator_timeout_secs: 1,
            default_question_count: 5,
            session_ttl_minutes: None,
            session_sweep_interval_secs: 60,
        }
    }
}
