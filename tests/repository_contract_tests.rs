use std::time::Duration;

use chrono::Utc;
use serde_json::json;

use quiz_simulator::{
    models::domain::{Question, QuestionKey, QuizSession, TopicRecord},
    repositories::{
        FileQuestionRepository, InMemorySessionRepository, MigrationReport, QuestionRepository,
        SessionRepository,
    },
};

fn question(id: &str, text: &str) -> Question {
    Question {
        id: id.to_string(),
        question: text.to_string(),
        options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
        correct_answer: 0,
        explanation: None,
        grade_level: None,
        curriculum: None,
    }
}

fn key(topic: &str, subtopic: Option<&str>) -> QuestionKey {
    QuestionKey::new(topic, subtopic, None, None).unwrap()
}

fn write_json(path: &std::path::Path, value: serde_json::Value) {
    std::fs::write(path, serde_json::to_string_pretty(&value).unwrap()).unwrap();
}

#[tokio::test]
async fn test_equivalent_keys_share_a_collection() {
    let dir = tempfile::tempdir().unwrap();
    let repo = FileQuestionRepository::new(dir.path());

    assert!(repo
        .save_question(&key("  World History ", Some("Cold-War")), question("1", "Who?"))
        .await
        .unwrap());

    let fetched = repo
        .fetch_questions(&key("world history", Some("cold war")))
        .await
        .unwrap();
    assert_eq!(fetched, vec![question("1", "Who?")]);
    assert!(dir.path().join("world_history__cold_war.json").exists());
}

#[tokio::test]
async fn test_duplicate_prompts_are_not_saved_twice() {
    let dir = tempfile::tempdir().unwrap();
    let repo = FileQuestionRepository::new(dir.path());
    let math = key("math", None);

    assert!(repo.save_question(&math, question("1", "What is 2+2?")).await.unwrap());
    assert!(!repo
        .save_question(&math, question("2", "  What is 2+2?  "))
        .await
        .unwrap());
    assert!(repo.save_question(&math, question("3", "What is 3+3?")).await.unwrap());

    let ids: Vec<_> = repo
        .fetch_questions(&math)
        .await
        .unwrap()
        .into_iter()
        .map(|q| q.id)
        .collect();
    assert_eq!(ids, vec!["1", "3"]);
}

#[tokio::test]
async fn test_missing_collection_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let repo = FileQuestionRepository::new(dir.path());

    assert!(repo
        .fetch_questions(&key("astronomy", None))
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_corrupt_collection_reads_empty_and_is_left_alone() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chemistry.json");
    std::fs::write(&path, "{ definitely not an array").unwrap();
    let repo = FileQuestionRepository::new(dir.path());
    let chemistry = key("chemistry", None);

    assert!(repo.fetch_questions(&chemistry).await.unwrap().is_empty());
    assert!(!repo
        .save_question(&chemistry, question("1", "Symbol for gold?"))
        .await
        .unwrap());
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "{ definitely not an array"
    );
}

#[tokio::test]
async fn test_list_topics_aggregates_and_sorts() {
    let dir = tempfile::tempdir().unwrap();
    let repo = FileQuestionRepository::new(dir.path());

    repo.save_question(&key("science", None), question("1", "s1"))
        .await
        .unwrap();
    repo.save_question(&key("math", Some("algebra")), question("2", "a1"))
        .await
        .unwrap();
    repo.save_question(
        &QuestionKey::new("math", Some("algebra"), Some("Grade 5"), None).unwrap(),
        question("3", "a2"),
    )
    .await
    .unwrap();
    repo.save_question(&key("math", None), question("4", "m1"))
        .await
        .unwrap();
    std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

    let topics = repo.list_topics().await.unwrap();

    assert_eq!(
        topics,
        vec![
            TopicRecord {
                topic: "math".to_string(),
                subtopic: None,
                question_count: 1,
            },
            TopicRecord {
                topic: "math".to_string(),
                subtopic: Some("algebra".to_string()),
                question_count: 2,
            },
            TopicRecord {
                topic: "science".to_string(),
                subtopic: None,
                question_count: 1,
            },
        ]
    );
}

#[tokio::test]
async fn test_migration_renames_and_merges_legacy_files() {
    let dir = tempfile::tempdir().unwrap();
    write_json(
        &dir.path().join("math_linear_equations.json"),
        json!([{ "id": "1", "question": "Solve x+1=2", "options": ["0", "1", "2", "3"], "correctAnswer": 1 }]),
    );
    write_json(
        &dir.path().join("history_cold_war.json"),
        json!([
            { "id": "2", "question": "When did it end?", "options": ["a", "b", "c", "d"], "correctAnswer": 2 },
            { "id": "3", "question": "Who built the wall?", "options": ["a", "b", "c", "d"], "correctAnswer": 0 }
        ]),
    );
    write_json(
        &dir.path().join("history__cold_war.json"),
        json!([{ "id": "9", "question": "When did it end?", "options": ["a", "b", "c", "d"], "correctAnswer": 2 }]),
    );
    let repo = FileQuestionRepository::new(dir.path());

    let report = repo.migrate_legacy_layout().await.unwrap();

    assert_eq!(report.migrated, 1);
    assert_eq!(report.merged, 1);
    assert_eq!(report.failed, 0);
    assert!(!dir.path().join("math_linear_equations.json").exists());
    assert!(!dir.path().join("history_cold_war.json").exists());

    let algebra = repo
        .fetch_questions(&key("math", Some("linear equations")))
        .await
        .unwrap();
    assert_eq!(algebra.len(), 1);

    let ids: Vec<_> = repo
        .fetch_questions(&key("history", Some("cold war")))
        .await
        .unwrap()
        .into_iter()
        .map(|q| q.id)
        .collect();
    assert_eq!(ids, vec!["9", "3"]);
}

#[tokio::test]
async fn test_migration_runs_once() {
    let dir = tempfile::tempdir().unwrap();
    let repo = FileQuestionRepository::new(dir.path());

    let first = repo.migrate_legacy_layout().await.unwrap();
    assert!(!first.already_current);

    write_json(
        &dir.path().join("physics_optics.json"),
        json!([{ "id": "1", "question": "Speed of light?", "options": ["a", "b", "c", "d"], "correctAnswer": 0 }]),
    );

    let second = repo.migrate_legacy_layout().await.unwrap();
    assert_eq!(
        second,
        MigrationReport {
            already_current: true,
            ..Default::default()
        }
    );
    assert!(dir.path().join("physics_optics.json").exists());
}

#[tokio::test]
async fn test_session_repository_contract() {
    let repo = InMemorySessionRepository::default();
    let session = QuizSession::new("math", None, None, None, vec![question("q1", "x")]);
    let id = session.id.clone();

    assert!(repo.get(&id).await.unwrap().is_none());

    repo.put(session.clone()).await.unwrap();
    assert_eq!(repo.get(&id).await.unwrap(), Some(session.clone()));

    let mut updated = session;
    updated.score = 1;
    repo.put(updated.clone()).await.unwrap();
    assert_eq!(repo.get(&id).await.unwrap().map(|s| s.score), Some(1));

    assert!(repo.delete(&id).await.unwrap());
    assert!(!repo.delete(&id).await.unwrap());
    assert_eq!(repo.purge_expired().await.unwrap(), 0);
}

#[tokio::test]
async fn test_expired_sessions_are_hidden_and_purged() {
    let repo = InMemorySessionRepository::new(Some(Duration::from_secs(60)));
    let mut stale = QuizSession::new("math", None, None, None, Vec::new());
    stale.created_at = Utc::now() - chrono::Duration::minutes(5);
    let fresh = QuizSession::new("math", None, None, None, Vec::new());

    repo.put(stale.clone()).await.unwrap();
    repo.put(fresh.clone()).await.unwrap();

    assert!(repo.get(&stale.id).await.unwrap().is_none());
    assert!(repo.get(&fresh.id).await.unwrap().is_some());
    assert_eq!(repo.purge_expired().await.unwrap(), 1);
    assert_eq!(repo.len().await, 1);
}

#[tokio::test]
async fn test_malformed_records_are_not_served() {
    let dir = tempfile::tempdir().unwrap();
    write_json(
        &dir.path().join("math.json"),
        json!([
            { "id": "bad1", "question": "Pick one", "options": ["a", "b", "c", "d", "e"], "correctAnswer": 0 },
            { "id": "bad2", "question": "Pick again", "options": ["a", "b", "c", "d"], "correctAnswer": 7 },
            { "id": "ok", "question": "What is 1+1?", "options": ["1", "2", "3", "4"], "correctAnswer": 1 }
        ]),
    );
    let repo = FileQuestionRepository::new(dir.path());

    let fetched = repo.fetch_questions(&key("math", None)).await.unwrap();
    let ids: Vec<_> = fetched.iter().map(|q| q.id.as_str()).collect();
    assert_eq!(ids, vec!["ok"]);

    let topics = repo.list_topics().await.unwrap();
    assert_eq!(topics[0].question_count, 1);
}

#[tokio::test]
async fn test_non_latin_topic_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let repo = FileQuestionRepository::new(dir.path());

    assert!(repo
        .save_question(&key("数学", None), question("1", "一加一等于几?"))
        .await
        .unwrap());

    assert_eq!(repo.fetch_questions(&key(" 数学 ", None)).await.unwrap().len(), 1);
    assert_eq!(repo.list_topics().await.unwrap()[0].topic, "数学");
}

#[tokio::test]
async fn test_saves_proceed_alongside_migration() {
    let dir = tempfile::tempdir().unwrap();
    for n in 0..20 {
        write_json(
            &dir.path().join(format!("legacy_topic{}.json", n)),
            json!([{ "id": "1", "question": "Old?", "options": ["a", "b", "c", "d"], "correctAnswer": 0 }]),
        );
    }
    let repo = FileQuestionRepository::new(dir.path());
    let art = key("art", None);

    let (report, saved) = tokio::join!(
        repo.migrate_legacy_layout(),
        repo.save_question(&art, question("1", "Who painted it?"))
    );

    assert_eq!(report.unwrap().migrated, 20);
    assert!(saved.unwrap());
    assert_eq!(repo.fetch_questions(&art).await.unwrap().len(), 1);
}
