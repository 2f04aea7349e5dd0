//! 结构校验服务 - 业务能力层
//!
//! 只判断一道题的结构是否可以入库，不访问存储。

use crate::error::ValidationError;
use crate::models::SourceItem;

/// 校验一道题
///
/// 依次检查：题干非空、至少两个选项、恰好一个正确选项。
pub fn validate(item: &SourceItem) -> Result<(), ValidationError> {
    if item.question.is_empty() {
        return Err(ValidationError::MissingQuestion);
    }

    if item.answers.len() < 2 {
        return Err(ValidationError::InsufficientAnswers);
    }

    match item.correct_count() {
        0 => Err(ValidationError::NoCorrectAnswer),
        1 => Ok(()),
        n => Err(ValidationError::MultipleCorrectAnswers(n)),
    }
}
