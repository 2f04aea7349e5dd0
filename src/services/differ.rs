//! 比对服务 - 业务能力层
//!
//! 判断已入库的题目与源文档中的同一道题是否需要更新。
//! 选项比对与顺序无关。

use std::collections::HashSet;

use crate::models::{Answer, ChangeReason, Level, SourceAnswer};

/// 比对结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diff {
    pub reasons: Vec<ChangeReason>,
}

impl Diff {
    pub fn needs_update(&self) -> bool {
        !self.reasons.is_empty()
    }
}

/// 比对等级与选项集合
///
/// 每项检查独立进行：等级变化、选项数量变化；数量相同时再比较
/// `(文本, 是否正确)` 集合。
pub fn diff(
    existing_level: Level,
    existing_answers: &[Answer],
    candidate_level: Level,
    candidate_answers: &[SourceAnswer],
) -> Diff {
    let mut reasons = Vec::new();

    if existing_level != candidate_level {
        reasons.push(ChangeReason::LevelChanged {
            from: existing_level,
            to: candidate_level,
        });
    }

    if existing_answers.len() != candidate_answers.len() {
        reasons.push(ChangeReason::AnswerCountChanged {
            from: existing_answers.len(),
            to: candidate_answers.len(),
        });
    } else {
        let existing: HashSet<(&str, bool)> = existing_answers
            .iter()
            .map(|a| (a.text.as_str(), a.correct))
            .collect();
        let candidate: HashSet<(&str, bool)> = candidate_answers
            .iter()
            .map(|a| (a.answer.as_str(), a.correct))
            .collect();

        if existing != candidate {
            reasons.push(ChangeReason::AnswerContentChanged);
        }
    }

    Diff { reasons }
}
