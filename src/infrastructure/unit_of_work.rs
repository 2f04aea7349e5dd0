//! 运行级事务
//!
//! 一次运行里所有文档、所有题目的读写都经过同一个 `UnitOfWork`，
//! 运行结束时只提交一次；任何致命错误都让整个运行回滚。

use tracing::{debug, error, info, warn};

use crate::error::StoreResult;
use crate::models::{Answer, Level, Question, SourceAnswer, User};

use super::store::QuestionStore;

/// 一次运行的事务句柄
///
/// `commit` 与 `rollback` 都会消耗自身，保证一次运行只能以其中之一结束。
pub struct UnitOfWork<'s> {
    store: &'s dyn QuestionStore,
    pending_writes: usize,
}

impl<'s> UnitOfWork<'s> {
    /// 开启事务
    pub async fn begin(store: &'s dyn QuestionStore) -> StoreResult<Self> {
        store.begin().await?;
        debug!("事务已开启");
        Ok(Self {
            store,
            pending_writes: 0,
        })
    }

    /// 尚未提交的写操作数量
    pub fn pending_writes(&self) -> usize {
        self.pending_writes
    }

    pub async fn find_question_by_text(&self, text: &str) -> StoreResult<Option<Question>> {
        self.store.find_question_by_text(text).await
    }

    pub async fn answers_of(&self, question_id: i64) -> StoreResult<Vec<Answer>> {
        self.store.answers_of(question_id).await
    }

    pub async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        self.store.find_user_by_username(username).await
    }

    pub async fn insert_question(&mut self, text: &str, level: Level) -> StoreResult<i64> {
        let id = self.store.insert_question(text, level).await?;
        self.pending_writes += 1;
        Ok(id)
    }

    pub async fn insert_answers(
        &mut self,
        question_id: i64,
        answers: &[SourceAnswer],
    ) -> StoreResult<()> {
        self.store.insert_answers(question_id, answers).await?;
        self.pending_writes += answers.len();
        Ok(())
    }

    pub async fn delete_answers_of(&mut self, question_id: i64) -> StoreResult<u64> {
        let deleted = self.store.delete_answers_of(question_id).await?;
        self.pending_writes += deleted as usize;
        Ok(deleted)
    }

    pub async fn update_question_level(&mut self, question_id: i64, level: Level) -> StoreResult<()> {
        self.store.update_question_level(question_id, level).await?;
        self.pending_writes += 1;
        Ok(())
    }

    pub async fn insert_user(&mut self, username: &str) -> StoreResult<i64> {
        let id = self.store.insert_user(username).await?;
        self.pending_writes += 1;
        Ok(id)
    }

    /// 提交全部写操作
    ///
    /// 提交失败时同样回滚，连接不会停留在未结束的事务里。
    pub async fn commit(self) -> StoreResult<()> {
        if let Err(e) = self.store.commit().await {
            error!("❌ 事务提交失败，回滚 {} 次写操作: {}", self.pending_writes, e);
            if let Err(rollback_err) = self.store.rollback().await {
                error!("❌ 回滚失败: {}", rollback_err);
            }
            return Err(e);
        }
        info!("✓ 事务已提交 ({} 次写操作)", self.pending_writes);
        Ok(())
    }

    /// 丢弃全部写操作
    pub async fn rollback(self) -> StoreResult<()> {
        self.store.rollback().await?;
        warn!("↩️ 事务已回滚，丢弃 {} 次写操作", self.pending_writes);
        Ok(())
    }
}
