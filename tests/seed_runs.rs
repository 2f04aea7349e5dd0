use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use question_seeder::error::{StoreError, StoreResult};
use question_seeder::models::{Answer, Level, Question, SourceAnswer, User};
use question_seeder::{App, Config, QuestionStore, RunMode, SqliteStore, StoreStats};
use tempfile::TempDir;
use tokio_test::{assert_err, assert_ok};

const INITIAL: &str = r#"[
    {"question": "2+2?", "level": 10, "answers": [
        {"answer": "4", "correct": true}, {"answer": "5", "correct": false}]},
    {"question": "Capital of France?", "level": 11, "answers": [
        {"answer": "Paris", "correct": true}, {"answer": "Lyon", "correct": false},
        {"answer": "Nice", "correct": false}]},
    {"question": "broken", "level": 12, "answers": [
        {"answer": "a", "correct": false}, {"answer": "b", "correct": false}]}
]"#;

struct Seeds {
    dir: TempDir,
}

impl Seeds {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        for sub in ["initial", "updates", "tests"] {
            std::fs::create_dir_all(dir.path().join(sub)).unwrap();
        }
        Self { dir }
    }

    fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(relative);
        std::fs::write(&path, content).unwrap();
        path
    }

    fn config(&self) -> Config {
        Config {
            seeds_dir: self.dir.path().to_path_buf(),
            ..Config::default()
        }
    }

    fn app(&self, store: Arc<dyn QuestionStore>) -> App {
        App::with_store(self.config(), store)
    }
}

async fn answers(store: &SqliteStore, text: &str) -> Vec<(String, bool)> {
    let q = store.find_question_by_text(text).await.unwrap().unwrap();
    store
        .answers_of(q.id)
        .await
        .unwrap()
        .into_iter()
        .map(|a| (a.text, a.correct))
        .collect()
}

#[tokio::test]
async fn initial_run_seeds_and_reports() {
    let seeds = Seeds::new();
    seeds.write("initial/questions.json", INITIAL);
    let store = Arc::new(SqliteStore::in_memory().unwrap());

    let report = assert_ok!(seeds.app(store.clone()).run(&RunMode::Initial { force: false }).await);

    assert_eq!(report.summary.added.len(), 2);
    assert_eq!(report.summary.invalid, 1);
    assert!(report.summary.bootstrap_user_created);
    assert!(report.text.contains("新增 2 道题目"));
    assert!(report.text.contains("Capital of France?"));
    assert!(report.text.contains("no correct answer"));

    let stats = store.stats().await.unwrap();
    assert_eq!(
        stats,
        StoreStats {
            questions: 2,
            answers: 5,
            users: 1
        }
    );
    let user = store.find_user_by_username("test_user").await.unwrap().unwrap();
    assert_eq!(user.score, 0);
    assert!(user.is_active);
}

#[tokio::test]
async fn rerunning_initial_changes_nothing() {
    let seeds = Seeds::new();
    seeds.write("initial/questions.json", INITIAL);
    let store = Arc::new(SqliteStore::in_memory().unwrap());
    let app = seeds.app(store.clone());

    app.run(&RunMode::Initial { force: false }).await.unwrap();
    let before = store.stats().await.unwrap();

    let report = app.run(&RunMode::Initial { force: false }).await.unwrap();

    assert!(!report.summary.has_changes());
    assert_eq!(report.summary.skipped, 2);
    assert!(!report.summary.bootstrap_user_created);
    assert!(report.text.contains("没有任何变更"));
    assert_eq!(store.stats().await.unwrap(), before);
}

#[tokio::test]
async fn forced_initial_corrects_drifted_questions() {
    let seeds = Seeds::new();
    seeds.write("initial/questions.json", INITIAL);
    let store = Arc::new(SqliteStore::in_memory().unwrap());
    let app = seeds.app(store.clone());
    app.run(&RunMode::Initial { force: false }).await.unwrap();

    seeds.write(
        "initial/questions.json",
        r#"[{"question": "2+2?", "level": 12, "answers": [
            {"answer": "4", "correct": true}, {"answer": "5", "correct": false}]}]"#,
    );

    let skipped = app.run(&RunMode::Initial { force: false }).await.unwrap();
    assert_eq!(skipped.summary.updated.len(), 0);

    let forced = app.run(&RunMode::Initial { force: true }).await.unwrap();
    assert_eq!(forced.summary.updated.len(), 1);
    let q = store.find_question_by_text("2+2?").await.unwrap().unwrap();
    assert_eq!(q.level, Level::Twelve);
}

#[tokio::test]
async fn updates_apply_in_lexicographic_order() {
    let seeds = Seeds::new();
    seeds.write("initial/questions.json", INITIAL);
    seeds.write(
        "updates/2024-02-01-fix.json",
        r#"[{"question": "2+2?", "level": 10, "answers": [
            {"answer": "4", "correct": true}, {"answer": "22", "correct": false}]}]"#,
    );
    seeds.write(
        "updates/2024-01-01-first.json",
        r#"[{"question": "2+2?", "level": 10, "answers": [
            {"answer": "4", "correct": true}, {"answer": "3", "correct": false}]}]"#,
    );
    let store = Arc::new(SqliteStore::in_memory().unwrap());

    let report = seeds
        .app(store.clone())
        .run(&RunMode::All { force: false })
        .await
        .unwrap();

    assert_eq!(report.summary.documents_processed, 3);
    assert_eq!(report.summary.updated.len(), 2);
    assert_eq!(
        answers(&store, "2+2?").await,
        vec![("4".to_string(), true), ("22".to_string(), false)]
    );
    assert!(report.text.contains("answer content or correctness changed"));
}

#[tokio::test]
async fn malformed_document_is_contained() {
    let seeds = Seeds::new();
    seeds.write("updates/2024-01-01-bad.json", "[{\"question\": ");
    seeds.write(
        "updates/2024-01-02-good.json",
        r#"[{"question": "New?", "level": 11, "answers": [
            {"answer": "yes", "correct": true}, {"answer": "no", "correct": false}]}]"#,
    );
    let store = Arc::new(SqliteStore::in_memory().unwrap());

    let report = seeds.app(store.clone()).run(&RunMode::Updates).await.unwrap();

    assert_eq!(report.summary.failed_documents.len(), 1);
    assert_eq!(report.summary.added.len(), 1);
    assert!(report.text.contains("2024-01-01-bad.json"));
    assert_eq!(store.stats().await.unwrap().questions, 1);
}

#[tokio::test]
async fn single_update_file_that_is_missing_still_commits() {
    let seeds = Seeds::new();
    let store = Arc::new(SqliteStore::in_memory().unwrap());
    let missing = seeds.dir.path().join("updates/nope.json");

    let report = seeds
        .app(store.clone())
        .run(&RunMode::UpdateFile(missing))
        .await
        .unwrap();

    assert_eq!(report.summary.failed_documents.len(), 1);
    assert!(report.summary.bootstrap_user_created);
    assert_eq!(store.stats().await.unwrap().users, 1);
}

#[tokio::test]
async fn test_data_never_overwrites() {
    let seeds = Seeds::new();
    seeds.write("initial/questions.json", INITIAL);
    seeds.write(
        "tests/sample.json",
        r#"[{"question": "2+2?", "level": 12, "answers": [
            {"answer": "four", "correct": true}, {"answer": "five", "correct": false}]}]"#,
    );
    let store = Arc::new(SqliteStore::in_memory().unwrap());
    let app = seeds.app(store.clone());
    app.run(&RunMode::Initial { force: false }).await.unwrap();

    let report = app.run(&RunMode::TestData).await.unwrap();

    assert_eq!(report.summary.skipped, 1);
    assert_eq!(
        answers(&store, "2+2?").await,
        vec![("4".to_string(), true), ("5".to_string(), false)]
    );
}

#[tokio::test]
async fn existing_bootstrap_user_is_left_alone() {
    let seeds = Seeds::new();
    let store = Arc::new(SqliteStore::in_memory().unwrap());
    store.begin().await.unwrap();
    let id = store.insert_user("test_user").await.unwrap();
    store.commit().await.unwrap();

    let report = seeds.app(store.clone()).run(&RunMode::Updates).await.unwrap();

    assert!(!report.summary.bootstrap_user_created);
    let user = store.find_user_by_username("test_user").await.unwrap().unwrap();
    assert_eq!(user.id, id);
    assert_eq!(store.stats().await.unwrap().users, 1);
}

#[tokio::test]
async fn report_file_is_written_when_configured() {
    let seeds = Seeds::new();
    seeds.write("initial/questions.json", INITIAL);
    let report_path = seeds.dir.path().join("report.txt");
    let config = Config {
        report_file: Some(report_path.clone()),
        ..seeds.config()
    };
    let store = Arc::new(SqliteStore::in_memory().unwrap());

    let report = App::with_store(config, store)
        .run(&RunMode::Initial { force: false })
        .await
        .unwrap();

    assert_eq!(std::fs::read_to_string(&report_path).unwrap(), report.text);
}

#[tokio::test]
async fn file_backed_database_persists_between_apps() {
    let seeds = Seeds::new();
    seeds.write("initial/questions.json", INITIAL);
    let db = seeds.dir.path().join("quiz.db");
    let config = Config {
        database_url: format!("sqlite://{}", db.display()),
        ..seeds.config()
    };

    App::initialize(config.clone())
        .unwrap()
        .run(&RunMode::Initial { force: false })
        .await
        .unwrap();
    let second = App::initialize(config)
        .unwrap()
        .run(&RunMode::Initial { force: false })
        .await
        .unwrap();

    assert_eq!(second.summary.skipped, 2);
    assert!(Path::new(&db).exists());
}

/// 故障注入点
#[derive(Clone, Copy)]
enum Fault {
    /// 第 N 次插入题目
    InsertQuestion(usize),
    /// 第 N 次删除选项
    DeleteAnswers(usize),
    /// 提交事务
    Commit,
}

/// 在指定位置返回存储错误的存储
struct FlakyStore {
    inner: Arc<SqliteStore>,
    fault: Fault,
    inserts: AtomicUsize,
    deletes: AtomicUsize,
}

impl FlakyStore {
    fn new(inner: Arc<SqliteStore>, fault: Fault) -> Arc<Self> {
        Arc::new(Self {
            inner,
            fault,
            inserts: AtomicUsize::new(0),
            deletes: AtomicUsize::new(0),
        })
    }
}

fn injected() -> StoreError {
    StoreError::Constraint("injected failure".to_string())
}

#[async_trait]
impl QuestionStore for FlakyStore {
    async fn find_question_by_text(&self, text: &str) -> StoreResult<Option<Question>> {
        self.inner.find_question_by_text(text).await
    }

    async fn answers_of(&self, question_id: i64) -> StoreResult<Vec<Answer>> {
        self.inner.answers_of(question_id).await
    }

    async fn insert_question(&self, text: &str, level: Level) -> StoreResult<i64> {
        let n = self.inserts.fetch_add(1, Ordering::SeqCst) + 1;
        if let Fault::InsertQuestion(at) = self.fault {
            if n == at {
                return Err(injected());
            }
        }
        self.inner.insert_question(text, level).await
    }

    async fn insert_answers(&self, question_id: i64, answers: &[SourceAnswer]) -> StoreResult<()> {
        self.inner.insert_answers(question_id, answers).await
    }

    async fn delete_answers_of(&self, question_id: i64) -> StoreResult<u64> {
        let n = self.deletes.fetch_add(1, Ordering::SeqCst) + 1;
        if let Fault::DeleteAnswers(at) = self.fault {
            if n == at {
                return Err(injected());
            }
        }
        self.inner.delete_answers_of(question_id).await
    }

    async fn update_question_level(&self, question_id: i64, level: Level) -> StoreResult<()> {
        self.inner.update_question_level(question_id, level).await
    }

    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        self.inner.find_user_by_username(username).await
    }

    async fn insert_user(&self, username: &str) -> StoreResult<i64> {
        self.inner.insert_user(username).await
    }

    async fn begin(&self) -> StoreResult<()> {
        self.inner.begin().await
    }

    async fn commit(&self) -> StoreResult<()> {
        if let Fault::Commit = self.fault {
            return Err(injected());
        }
        self.inner.commit().await
    }

    async fn rollback(&self) -> StoreResult<()> {
        self.inner.rollback().await
    }

    async fn stats(&self) -> StoreResult<StoreStats> {
        self.inner.stats().await
    }
}

#[tokio::test]
async fn storage_failure_rolls_back_the_whole_run() {
    let seeds = Seeds::new();
    seeds.write("initial/questions.json", INITIAL);
    let report_path = seeds.dir.path().join("report.txt");
    let inner = Arc::new(SqliteStore::in_memory().unwrap());
    let flaky = FlakyStore::new(inner.clone(), Fault::InsertQuestion(2));
    let config = Config {
        report_file: Some(report_path.clone()),
        ..seeds.config()
    };

    let err = assert_err!(
        App::with_store(config, flaky)
            .run(&RunMode::Initial { force: false })
            .await
    );

    assert!(err.is_store());
    assert_eq!(inner.stats().await.unwrap(), StoreStats::default());
    assert!(!report_path.exists());
}

#[tokio::test]
async fn failure_in_a_later_update_discards_every_earlier_document() {
    let seeds = Seeds::new();
    seeds.write("initial/questions.json", INITIAL);
    seeds.write(
        "updates/2024-01-01-first.json",
        r#"[{"question": "2+2?", "level": 10, "answers": [
            {"answer": "4", "correct": true}, {"answer": "3", "correct": false}]},
           {"question": "New in update?", "level": 12, "answers": [
            {"answer": "yes", "correct": true}, {"answer": "no", "correct": false}]}]"#,
    );
    seeds.write(
        "updates/2024-02-01-second.json",
        r#"[{"question": "Capital of France?", "level": 11, "answers": [
            {"answer": "Paris", "correct": true}, {"answer": "Lyon", "correct": false}]}]"#,
    );
    let inner = Arc::new(SqliteStore::in_memory().unwrap());
    let flaky = FlakyStore::new(inner.clone(), Fault::DeleteAnswers(2));

    let err = assert_err!(
        seeds
            .app(flaky)
            .run(&RunMode::All { force: false })
            .await
    );

    assert!(err.is_store());
    assert_eq!(inner.stats().await.unwrap(), StoreStats::default());
    assert!(inner.find_question_by_text("2+2?").await.unwrap().is_none());
}

#[tokio::test]
async fn failed_commit_is_rolled_back_and_the_store_stays_usable() {
    let seeds = Seeds::new();
    seeds.write("initial/questions.json", INITIAL);
    let inner = Arc::new(SqliteStore::in_memory().unwrap());
    let flaky = FlakyStore::new(inner.clone(), Fault::Commit);

    let err = assert_err!(
        seeds
            .app(flaky)
            .run(&RunMode::Initial { force: false })
            .await
    );

    assert!(err.is_store());
    assert_eq!(inner.stats().await.unwrap(), StoreStats::default());

    let report = assert_ok!(
        seeds
            .app(inner.clone())
            .run(&RunMode::Initial { force: false })
            .await
    );
    assert_eq!(report.summary.added.len(), 2);
    assert_eq!(inner.stats().await.unwrap().users, 1);
}

#[tokio::test]
async fn unreadable_update_set_is_recorded_and_the_run_commits() {
    let seeds = Seeds::new();
    std::fs::remove_dir(seeds.dir.path().join("updates")).unwrap();
    seeds.write("updates", "not a directory");
    let store = Arc::new(SqliteStore::in_memory().unwrap());

    let report = seeds.app(store.clone()).run(&RunMode::Updates).await.unwrap();

    assert_eq!(report.summary.failed_documents.len(), 1);
    assert!(report.text.contains("未能处理的文档"));
    assert_eq!(store.stats().await.unwrap().users, 1);
}
