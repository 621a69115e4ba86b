use std::sync::Arc;

use chrono::Utc;
use rand::Rng;

use crate::{
    constants::fallback_questions::{FallbackCategory, DEFAULT_CATEGORY, FALLBACK_BANK},
    models::domain::GeneratedQuestion,
    services::question_generator::{GenerationRequest, QuestionGenerator},
};

/// Produces questions from the generator, falling back to the built-in bank on any
/// failure. `generate` never fails.
pub struct QuestionSource {
    generator: Arc<dyn QuestionGenerator>,
}

impl QuestionSource {
    pub fn new(generator: Arc<dyn QuestionGenerator>) -> Self {
        Self { generator }
    }

    pub async fn generate(&self, request: &GenerationRequest) -> GeneratedQuestion {
        match self.generator.generate(request).await {
            Ok(mut question) => {
                if question.grade_level.is_none() {
                    question.grade_level = request.grade_level.clone();
                }
                if question.curriculum.is_none() {
                    question.curriculum = request.curriculum.clone();
                }
                question
            }
            Err(err) => {
                log::warn!(
                    "Question generation failed for topic '{}', using fallback: {}",
                    request.topic,
                    err
                );
                fallback_question(request)
            }
        }
    }

    /// Diagnostics only; quiz creation never waits on this.
    pub async fn is_available(&self) -> bool {
        self.generator.is_available().await
    }
}

pub fn fallback_question(request: &GenerationRequest) -> GeneratedQuestion {
    let topic = request.topic.to_lowercase();
    let jitter: f64 = rand::thread_rng().gen_range(0.0..1_000_000.0);
    let seed = Utc::now().timestamp_millis() as f64
        + topic.bytes().next().map(f64::from).unwrap_or(0.0)
        + jitter;

    let mut question = fallback_question_with_seed(&topic, seed);
    question.grade_level = request.grade_level.clone();
    question.curriculum = request.curriculum.clone();
    question
}

pub fn fallback_question_with_seed(topic: &str, seed: f64) -> GeneratedQuestion {
    let category = fallback_category(topic);
    let index = sine_index(seed, category.questions.len());
    let entry = &category.questions[index];

    log::info!(
        "Using {} fallback question {} for topic: {}",
        category.name,
        index + 1,
        topic
    );

    GeneratedQuestion {
        question: entry.question.to_string(),
        options: entry.options.iter().map(|o| o.to_string()).collect(),
        correct_answer: entry.correct_answer,
        explanation: Some(entry.explanation.to_string()),
        grade_level: None,
        curriculum: None,
    }
}

pub fn fallback_category(topic: &str) -> &'static FallbackCategory {
    let topic = topic.to_lowercase();
    FALLBACK_BANK
        .iter()
        .find(|category| topic.contains(category.name))
        .or_else(|| FALLBACK_BANK.iter().find(|c| c.name == DEFAULT_CATEGORY))
        .unwrap_or(&FALLBACK_BANK[0])
}

/// Maps a seed to `0..len` through the fractional part of `sin(seed) * 10000`.
pub fn sine_index(seed: f64, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let x = seed.sin() * 10_000.0;
    let fraction = x - x.floor();
    ((fraction * len as f64) as usize).min(len - 1)
}
