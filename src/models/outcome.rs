use crate::error::ValidationError;

use super::{Level, RawLevel};

/// 判定需要更新的原因
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeReason {
    /// 等级变化
    LevelChanged { from: Level, to: Level },
    /// 选项数量变化
    AnswerCountChanged { from: usize, to: usize },
    /// 数量相同，但选项内容或正误变化
    AnswerContentChanged,
}

impl std::fmt::Display for ChangeReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChangeReason::LevelChanged { from, to } => {
                write!(f, "level changed from {} to {}", from, to)
            }
            ChangeReason::AnswerCountChanged { from, to } => {
                write!(f, "answer count changed from {} to {}", from, to)
            }
            ChangeReason::AnswerContentChanged => write!(f, "answer content or correctness changed"),
        }
    }
}

/// 新增题目的明细
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddedQuestion {
    pub text: String,
    pub level: Level,
    pub answer_count: usize,
    pub correct_answer: String,
}

/// 更新题目的明细
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatedQuestion {
    pub text: String,
    pub level: Level,
    pub reasons: Vec<ChangeReason>,
    pub answer_count: usize,
    pub correct_answer: String,
}

impl UpdatedQuestion {
    /// 逗号分隔的原因列表
    pub fn reasons_text(&self) -> String {
        self.reasons
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// 跳过原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// 题目已存在且本次不做比对
    AlreadyExists,
    /// 比对后无差异
    Identical,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::AlreadyExists => write!(f, "already exists"),
            SkipReason::Identical => write!(f, "identical"),
        }
    }
}

/// 单题处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Added(AddedQuestion),
    Updated(UpdatedQuestion),
    Skipped(SkipReason),
    Invalid(ValidationError),
}

/// 等级不合法，已降级为默认值
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelCoercion {
    pub question: String,
    pub raw: RawLevel,
}

impl std::fmt::Display for LevelCoercion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid level {} for question '{}', using default {}",
            self.raw,
            self.question,
            Level::default()
        )
    }
}

/// 单题处理的完整记录：结果 + 可能的等级降级
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciled {
    pub outcome: Outcome,
    pub coercion: Option<LevelCoercion>,
}
