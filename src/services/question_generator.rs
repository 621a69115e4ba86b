use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    config::Config,
    constants::quiz_prompt::build_question_prompt,
    errors::{AppError, AppResult},
    models::domain::GeneratedQuestion,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub topic: String,
    pub subtopic: Option<String>,
    pub grade_level: Option<String>,
    pub curriculum: Option<String>,
}

impl GenerationRequest {
    pub fn for_topic(topic: &str) -> Self {
        GenerationRequest {
            topic: topic.to_string(),
            subtopic: None,
            grade_level: None,
            curriculum: None,
        }
    }
}

/// Backend producing new question content. Implementations report every failure as an
/// error; recovering from it is the caller's job.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> AppResult<GeneratedQuestion>;
    async fn is_available(&self) -> bool;
}

#[derive(Debug, Serialize)]
struct OllamaGenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct OllamaGenerateResponse {
    response: String,
}

#[derive(Debug, Deserialize)]
struct OllamaTagsResponse {
    models: Vec<serde_json::Value>,
}

pub struct OllamaQuestionGenerator {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl OllamaQuestionGenerator {
    pub fn new(base_url: &str, model: &str, timeout: Duration) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::InternalError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        })
    }

    pub fn from_config(config: &Config) -> AppResult<Self> {
        Self::new(
            &config.generator_base_url,
            &config.generator_model,
            config.generator_timeout(),
        )
    }
}

#[async_trait]
impl QuestionGenerator for OllamaQuestionGenerator {
    async fn generate(&self, request: &GenerationRequest) -> AppResult<GeneratedQuestion> {
        let prompt = build_question_prompt(request);
        let body = OllamaGenerateRequest {
            model: &self.model,
            prompt: &prompt,
            stream: false,
        };

        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        let reply: OllamaGenerateResponse = response.json().await?;
        log::debug!("Generator reply for topic {}: {}", request.topic, reply.response);

        parse_generated_question(&reply.response)
    }

    async fn is_available(&self) -> bool {
        let response = match self
            .client
            .get(format!("{}/api/tags", self.base_url))
            .send()
            .await
        {
            Ok(response) if response.status().is_success() => response,
            Ok(response) => {
                log::debug!("Generator probe returned {}", response.status());
                return false;
            }
            Err(err) => {
                log::debug!("Generator probe failed: {}", err);
                return false;
            }
        };

        response.json::<OllamaTagsResponse>().await.is_ok()
    }
}

/// Removes a surrounding markdown code fence such as ```` ```json ... ``` ````.
pub fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let without_open = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    without_open
        .trim_end()
        .strip_suffix("```")
        .unwrap_or(without_open)
        .trim()
}

pub fn parse_generated_question(raw: &str) -> AppResult<GeneratedQuestion> {
    let question: GeneratedQuestion = serde_json::from_str(strip_code_fences(raw))
        .map_err(|e| AppError::GenerationError(format!("Malformed generator reply: {}", e)))?;

    question
        .validate()
        .map_err(|e| AppError::GenerationError(format!("Invalid generated question: {}", e)))?;

    Ok(question)
}
