use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, Connection, ErrorCode, OptionalExtension};

use crate::error::{StoreError, StoreResult};
use crate::models::{Answer, Level, Question, SourceAnswer, User};

use super::schema;
use super::store::{QuestionStore, StoreStats};

/// 基于 SQLite 的题库存储
#[derive(Debug)]
pub struct SqliteStore {
    conn: Mutex<Connection>,
    db_path: Option<PathBuf>,
}

impl SqliteStore {
    /// 打开（或创建）数据库文件
    pub fn open(path: &Path) -> StoreResult<Self> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Mutex::new(conn),
            db_path: Some(path.to_path_buf()),
        };
        store.initialize()?;
        Ok(store)
    }

    /// 内存数据库（测试用）
    pub fn in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Mutex::new(conn),
            db_path: None,
        };
        store.initialize()?;
        Ok(store)
    }

    /// 数据库文件路径，内存库为 None
    pub fn path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }

    fn initialize(&self) -> StoreResult<()> {
        let conn = self.conn()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.execute_batch(schema::SCHEMA_SQL)?;
        Ok(())
    }

    fn conn(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StoreError::LockPoisoned)
    }
}

/// 约束冲突单独归类，其余保持 SQLite 原始错误
fn classify(err: rusqlite::Error) -> StoreError {
    match &err {
        rusqlite::Error::SqliteFailure(e, msg) if e.code == ErrorCode::ConstraintViolation => {
            StoreError::Constraint(msg.clone().unwrap_or_else(|| e.to_string()))
        }
        _ => StoreError::Sqlite(err),
    }
}

fn level_from_row(question_id: i64, code: i64) -> StoreResult<Level> {
    Level::from_code(code).ok_or_else(|| {
        StoreError::Constraint(format!("question {question_id} has invalid level {code}"))
    })
}

#[async_trait]
impl QuestionStore for SqliteStore {
    async fn find_question_by_text(&self, text: &str) -> StoreResult<Option<Question>> {
        let conn = self.conn()?;
        let row = conn
            .query_row(
                "SELECT id, question, level, created_at FROM questions WHERE question = ?1",
                params![text],
                |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, i64>(2)?,
                        row.get::<_, String>(3)?,
                    ))
                },
            )
            .optional()?;

        match row {
            Some((id, text, level, created_at)) => Ok(Some(Question {
                id,
                text,
                level: level_from_row(id, level)?,
                created_at,
            })),
            None => Ok(None),
        }
    }

    async fn answers_of(&self, question_id: i64) -> StoreResult<Vec<Answer>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, question_id, answer, correct FROM answers
             WHERE question_id = ?1 ORDER BY id",
        )?;
        let rows = stmt.query_map(params![question_id], |row| {
            Ok(Answer {
                id: row.get(0)?,
                question_id: row.get(1)?,
                text: row.get(2)?,
                correct: row.get(3)?,
            })
        })?;

        let mut answers = Vec::new();
        for row in rows {
            answers.push(row?);
        }
        Ok(answers)
    }

    async fn insert_question(&self, text: &str, level: Level) -> StoreResult<i64> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO questions (question, level, created_at) VALUES (?1, ?2, ?3)",
            params![text, level.code(), Utc::now().to_rfc3339()],
        )
        .map_err(classify)?;
        Ok(conn.last_insert_rowid())
    }

    async fn insert_answers(&self, question_id: i64, answers: &[SourceAnswer]) -> StoreResult<()> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare_cached(
            "INSERT INTO answers (question_id, answer, correct) VALUES (?1, ?2, ?3)",
        )?;
        for answer in answers {
            stmt.execute(params![question_id, answer.answer, answer.correct])
                .map_err(classify)?;
        }
        Ok(())
    }

    async fn delete_answers_of(&self, question_id: i64) -> StoreResult<u64> {
        let conn = self.conn()?;
        let deleted = conn.execute(
            "DELETE FROM answers WHERE question_id = ?1",
            params![question_id],
        )?;
        Ok(deleted as u64)
    }

    async fn update_question_level(&self, question_id: i64, level: Level) -> StoreResult<()> {
        let conn = self.conn()?;
        conn.execute(
            "UPDATE questions SET level = ?1 WHERE id = ?2",
            params![level.code(), question_id],
        )
        .map_err(classify)?;
        Ok(())
    }

    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let conn = self.conn()?;
        let user = conn
            .query_row(
                "SELECT id, username, score, is_active, created_at FROM users WHERE username = ?1",
                params![username],
                |row| {
                    Ok(User {
                        id: row.get(0)?,
                        username: row.get(1)?,
                        score: row.get::<_, Option<i64>>(2)?.unwrap_or(0),
                        is_active: row.get::<_, Option<bool>>(3)?.unwrap_or(true),
                        created_at: row.get(4)?,
                    })
                },
            )
            .optional()?;
        Ok(user)
    }

    async fn insert_user(&self, username: &str) -> StoreResult<i64> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO users (username, score, is_active, created_at) VALUES (?1, 0, 1, ?2)",
            params![username, Utc::now().to_rfc3339()],
        )
        .map_err(classify)?;
        Ok(conn.last_insert_rowid())
    }

    async fn begin(&self) -> StoreResult<()> {
        let conn = self.conn()?;
        conn.execute_batch("BEGIN IMMEDIATE")?;
        Ok(())
    }

    async fn commit(&self) -> StoreResult<()> {
        let conn = self.conn()?;
        conn.execute_batch("COMMIT")?;
        Ok(())
    }

    async fn rollback(&self) -> StoreResult<()> {
        let conn = self.conn()?;
        conn.execute_batch("ROLLBACK")?;
        Ok(())
    }

    async fn stats(&self) -> StoreResult<StoreStats> {
        let conn = self.conn()?;
        let count = |table: &str| -> StoreResult<u64> {
            let n: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
                row.get(0)
            })?;
            Ok(n as u64)
        };

        Ok(StoreStats {
            questions: count("questions")?,
            answers: count("answers")?,
            users: count("users")?,
        })
    }
}
