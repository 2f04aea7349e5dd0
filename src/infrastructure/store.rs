//! 存储能力接口 - 基础设施层
//!
//! 只暴露"按题干查找 / 插入 / 按外键批量删除 / 事务边界"这些能力，
//! 不认识文档，也不做任何比对判断。

use async_trait::async_trait;

use crate::error::StoreResult;
use crate::models::{Answer, Level, Question, SourceAnswer, User};

/// 各表行数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreStats {
    pub questions: u64,
    pub answers: u64,
    pub users: u64,
}

/// 题库存储
///
/// 所有写操作都应在 `begin` 与 `commit` / `rollback` 之间调用，
/// 通常通过 [`UnitOfWork`](super::UnitOfWork) 间接使用。
#[async_trait]
pub trait QuestionStore: Send + Sync {
    /// 按题干精确查找题目（区分大小写和空白）
    async fn find_question_by_text(&self, text: &str) -> StoreResult<Option<Question>>;

    /// 获取题目的全部选项，按插入顺序
    async fn answers_of(&self, question_id: i64) -> StoreResult<Vec<Answer>>;

    /// 插入题目，返回新 id
    async fn insert_question(&self, text: &str, level: Level) -> StoreResult<i64>;

    /// 按给定顺序插入选项
    async fn insert_answers(&self, question_id: i64, answers: &[SourceAnswer]) -> StoreResult<()>;

    /// 删除题目下的全部选项，返回删除行数
    async fn delete_answers_of(&self, question_id: i64) -> StoreResult<u64>;

    /// 修改题目等级
    async fn update_question_level(&self, question_id: i64, level: Level) -> StoreResult<()>;

    /// 按用户名查找用户
    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>>;

    /// 插入用户（积分 0，激活状态），返回新 id
    async fn insert_user(&self, username: &str) -> StoreResult<i64>;

    /// 开启事务
    async fn begin(&self) -> StoreResult<()>;

    /// 提交事务
    async fn commit(&self) -> StoreResult<()>;

    /// 回滚事务
    async fn rollback(&self) -> StoreResult<()>;

    /// 各表行数
    async fn stats(&self) -> StoreResult<StoreStats>;
}
