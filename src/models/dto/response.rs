use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerResponse {
    pub is_correct: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn ok() -> Self {
        HealthResponse {
            status: "OK",
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub dependencies: ReadinessDependencies,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReadinessDependencies {
    pub generator: &'static str,
}

impl ReadinessResponse {
    /// The service stays ready without the generator since fallback questions cover it.
    pub fn with_generator(generator_available: bool) -> Self {
        ReadinessResponse {
            status: "ready",
            version: env!("CARGO_PKG_VERSION"),
            dependencies: ReadinessDependencies {
                generator: if generator_available { "ok" } else { "unavailable" },
            },
        }
    }
}
