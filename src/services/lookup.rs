//! 查找服务 - 业务能力层
//!
//! 题干精确匹配是源文档与已入库题目之间唯一的对应关系。

use crate::error::StoreResult;
use crate::infrastructure::UnitOfWork;
use crate::models::{Answer, Question};

/// 按题干查找已存在的题目（区分大小写与空白）
pub async fn find_question_by_text(
    uow: &UnitOfWork<'_>,
    text: &str,
) -> StoreResult<Option<Question>> {
    uow.find_question_by_text(text).await
}

/// 获取题目当前的全部选项
pub async fn answers_of(uow: &UnitOfWork<'_>, question: &Question) -> StoreResult<Vec<Answer>> {
    uow.answers_of(question.id).await
}
