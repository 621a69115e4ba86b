use std::{
    collections::HashMap,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use tokio::{fs, sync::Mutex};

use crate::{
    errors::{AppError, AppResult},
    models::domain::{
        question_key::COMPONENT_SEPARATOR, Question, QuestionKey, TopicRecord,
    },
};

pub const LAYOUT_VERSION: u32 = 2;
const LAYOUT_MARKER: &str = ".layout_version";

#[async_trait]
pub trait QuestionRepository: Send + Sync {
    async fn fetch_questions(&self, key: &QuestionKey) -> AppResult<Vec<Question>>;
    /// Returns `true` when the question was appended, `false` when it was a duplicate
    /// or could not be written.
    async fn save_question(&self, key: &QuestionKey, question: Question) -> AppResult<bool>;
    async fn list_topics(&self) -> AppResult<Vec<TopicRecord>>;
    async fn migrate_legacy_layout(&self) -> AppResult<MigrationReport>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationReport {
    pub already_current: bool,
    pub migrated: usize,
    pub merged: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// One JSON array of questions per normalized key, e.g. `math__algebra__grade_5.json`.
///
/// Read failures are logged and treated as an empty collection; write failures are
/// logged and swallowed. Writes within one process are serialized.
pub struct FileQuestionRepository {
    root: PathBuf,
    write_lock: Mutex<()>,
}

impl FileQuestionRepository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub async fn ensure_storage_dir(&self) -> AppResult<()> {
        log::info!("Using question storage at {}", self.root.display());
        fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    fn path_for(&self, key: &QuestionKey) -> PathBuf {
        self.root.join(key.file_name())
    }

    async fn read_collection(path: &Path) -> AppResult<Option<Vec<Question>>> {
        let content = match fs::read_to_string(path).await {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let questions = serde_json::from_str(&content)?;
        Ok(Some(questions))
    }

    async fn write_collection(path: &Path, questions: &[Question]) -> AppResult<()> {
        let content = serde_json::to_string_pretty(questions)?;
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, content).await?;
        fs::rename(&tmp_path, path).await?;
        Ok(())
    }

    async fn json_files(&self) -> AppResult<Vec<(String, PathBuf)>> {
        let mut files = Vec::new();
        let mut entries = match fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(files),
            Err(err) => return Err(err.into()),
        };

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                if !stem.starts_with('.') {
                    files.push((stem.to_string(), path.clone()));
                }
            }
        }

        files.sort();
        Ok(files)
    }

    async fn layout_version(&self) -> u32 {
        match fs::read_to_string(self.root.join(LAYOUT_MARKER)).await {
            Ok(content) => content.trim().parse().unwrap_or(1),
            Err(_) => 1,
        }
    }

    async fn migrate_file(
        &self,
        stem: &str,
        path: &Path,
        report: &mut MigrationReport,
    ) -> AppResult<()> {
        let Some((topic, subtopic)) = parse_legacy_stem(stem) else {
            report.skipped += 1;
            return Ok(());
        };
        let key = QuestionKey::new(&topic, subtopic.as_deref(), None, None)?;
        let target = self.path_for(&key);
        if target == path {
            report.skipped += 1;
            return Ok(());
        }

        let _guard = self.write_lock.lock().await;

        let legacy = Self::read_collection(path).await?.unwrap_or_default();
        if legacy.is_empty() {
            report.skipped += 1;
            return Ok(());
        }

        match Self::read_collection(&target).await? {
            None => {
                fs::rename(path, &target).await?;
                log::info!("Migrated {} to {}", path.display(), target.display());
                report.migrated += 1;
            }
            Some(mut existing) => {
                let before = existing.len();
                for question in legacy {
                    if !existing.iter().any(|q| q.same_prompt(&question)) {
                        existing.push(question);
                    }
                }
                Self::write_collection(&target, &existing).await?;
                fs::remove_file(path).await?;
                log::info!(
                    "Merged {} into {} ({} new questions)",
                    path.display(),
                    target.display(),
                    existing.len() - before
                );
                report.merged += 1;
            }
        }

        Ok(())
    }
}

/// Legacy files used a single `_` between every word: the first word is the topic and
/// the remaining words form the subtopic. Stems already using `__` are current.
fn parse_legacy_stem(stem: &str) -> Option<(String, Option<String>)> {
    if stem.contains(COMPONENT_SEPARATOR) || !stem.contains('_') {
        return None;
    }

    let mut words = stem.split('_').filter(|w| !w.is_empty());
    let topic = words.next()?.to_string();
    let subtopic = words.collect::<Vec<_>>().join(" ");
    let subtopic = if subtopic.is_empty() { None } else { Some(subtopic) };

    Some((topic, subtopic))
}

/// Drops records that cannot be asked as a four-option question.
fn well_formed(path: &Path, mut questions: Vec<Question>) -> Vec<Question> {
    let before = questions.len();
    questions.retain(Question::is_well_formed);
    if questions.len() < before {
        log::warn!(
            "Ignoring {} malformed questions in {}",
            before - questions.len(),
            path.display()
        );
    }
    questions
}

fn topic_from_stem(stem: &str) -> (String, Option<String>) {
    let mut parts = stem.split(COMPONENT_SEPARATOR);
    let topic = parts.next().unwrap_or_default().replace('_', " ");
    let subtopic = parts.next().map(|s| s.replace('_', " "));
    (topic, subtopic)
}

#[async_trait]
impl QuestionRepository for FileQuestionRepository {
    async fn fetch_questions(&self, key: &QuestionKey) -> AppResult<Vec<Question>> {
        let path = self.path_for(key);
        match Self::read_collection(&path).await {
            Ok(questions) => Ok(well_formed(&path, questions.unwrap_or_default())),
            Err(err) => {
                log::warn!("Treating {} as empty: {}", path.display(), err);
                Ok(Vec::new())
            }
        }
    }

    async fn save_question(&self, key: &QuestionKey, question: Question) -> AppResult<bool> {
        let path = self.path_for(key);
        let _guard = self.write_lock.lock().await;

        let mut questions = match Self::read_collection(&path).await {
            Ok(questions) => questions.unwrap_or_default(),
            Err(err) => {
                // Rewriting an unreadable file would drop whatever it still holds.
                log::error!("Not saving to unreadable {}: {}", path.display(), err);
                return Ok(false);
            }
        };

        if questions.iter().any(|q| q.same_prompt(&question)) {
            log::debug!("Skipping duplicate question for key {}", key);
            return Ok(false);
        }

        questions.push(question);
        if let Err(err) = Self::write_collection(&path, &questions).await {
            log::error!("Failed to save question to {}: {}", path.display(), err);
            return Ok(false);
        }

        Ok(true)
    }

    async fn list_topics(&self) -> AppResult<Vec<TopicRecord>> {
        let files = match self.json_files().await {
            Ok(files) => files,
            Err(err) => {
                log::error!("Failed to list {}: {}", self.root.display(), err);
                return Ok(Vec::new());
            }
        };

        let mut counts: HashMap<(String, Option<String>), usize> = HashMap::new();
        for (stem, path) in files {
            let questions = match Self::read_collection(&path).await {
                Ok(questions) => questions.unwrap_or_default(),
                Err(err) => {
                    log::warn!("Skipping unreadable {}: {}", path.display(), err);
                    continue;
                }
            };
            *counts.entry(topic_from_stem(&stem)).or_default() +=
                questions.iter().filter(|q| q.is_well_formed()).count();
        }

        let mut topics: Vec<TopicRecord> = counts
            .into_iter()
            .map(|((topic, subtopic), question_count)| TopicRecord {
                topic,
                subtopic,
                question_count,
            })
            .collect();
        topics.sort_by(TopicRecord::listing_order);

        Ok(topics)
    }

    async fn migrate_legacy_layout(&self) -> AppResult<MigrationReport> {
        if self.layout_version().await >= LAYOUT_VERSION {
            return Ok(MigrationReport {
                already_current: true,
                ..Default::default()
            });
        }

        let mut report = MigrationReport::default();
        for (stem, path) in self.json_files().await? {
            if let Err(err) = self.migrate_file(&stem, &path, &mut report).await {
                log::error!("Failed to migrate {}: {}", path.display(), err);
                report.failed += 1;
            }
        }

        if report.failed == 0 {
            fs::write(self.root.join(LAYOUT_MARKER), LAYOUT_VERSION.to_string())
                .await
                .map_err(|e| AppError::StorageError(format!("Failed to write layout marker: {}", e)))?;
        }

        Ok(report)
    }
}
