//! 单题对账流程 - 流程层
//!
//! 核心职责：定义"一道题"的完整处理流程
//!
//! 流程顺序：
//! 1. 结构校验（不通过则记为无效，不访问存储）
//! 2. 等级规范化（非法等级降级为 10 并记录）
//! 3. 按题干查找
//! 4. 不存在 → 新增；存在且跳过已有 → 跳过；否则比对 → 无差异跳过 / 整体替换选项

use tracing::{debug, error, info, warn};

use crate::error::StoreResult;
use crate::infrastructure::UnitOfWork;
use crate::models::{
    AddedQuestion, Level, LevelCoercion, Outcome, Reconciled, SkipReason, SourceItem,
    UpdatedQuestion,
};
use crate::services::{differ, lookup, validator};
use crate::utils::logging::truncate_text;
use crate::workflow::item_ctx::ItemCtx;

/// 单题对账流程
///
/// - 编排 校验 → 查找 → 新增 / 比对更新 / 跳过
/// - 不持有任何资源，写操作全部经由调用方传入的 `UnitOfWork`
/// - 只返回存储层错误，题目级问题都体现在 `Outcome` 中
#[derive(Debug, Default)]
pub struct Reconciler;

impl Reconciler {
    pub fn new() -> Self {
        Self
    }

    pub async fn reconcile(
        &self,
        uow: &mut UnitOfWork<'_>,
        item: &SourceItem,
        skip_existing: bool,
        ctx: &ItemCtx,
    ) -> StoreResult<Reconciled> {
        let preview = truncate_text(&item.question, 80);

        if let Err(reason) = validator::validate(item) {
            error!("{} ❌ 题目 '{}' 无效: {}，跳过", ctx, preview, reason);
            return Ok(Reconciled {
                outcome: Outcome::Invalid(reason),
                coercion: None,
            });
        }

        let (level, coercion) = normalize_level(item);
        if let Some(note) = &coercion {
            warn!("{} ⚠️ {}", ctx, note);
        }

        let outcome = match lookup::find_question_by_text(uow, &item.question).await? {
            None => Outcome::Added(self.insert(uow, item, level, ctx).await?),
            Some(_) if skip_existing => {
                info!("{} 题目 '{}' 已存在，跳过", ctx, preview);
                Outcome::Skipped(SkipReason::AlreadyExists)
            }
            Some(existing) => {
                let existing_answers = lookup::answers_of(uow, &existing).await?;
                let diff = differ::diff(existing.level, &existing_answers, level, &item.answers);

                if !diff.needs_update() {
                    info!("{} 题目 '{}' 内容一致，无需更新", ctx, preview);
                    Outcome::Skipped(SkipReason::Identical)
                } else {
                    let updated = UpdatedQuestion {
                        text: item.question.clone(),
                        level,
                        reasons: diff.reasons,
                        answer_count: item.answers.len(),
                        correct_answer: correct_answer_of(item),
                    };
                    info!(
                        "{} 🔄 题目 '{}' 有变化 ({})，更新中...",
                        ctx,
                        preview,
                        updated.reasons_text()
                    );

                    let removed = uow.delete_answers_of(existing.id).await?;
                    uow.update_question_level(existing.id, level).await?;
                    uow.insert_answers(existing.id, &item.answers).await?;
                    debug!(
                        "{} 题目 #{} 替换选项: 删除 {}，插入 {}",
                        ctx,
                        existing.id,
                        removed,
                        item.answers.len()
                    );

                    Outcome::Updated(updated)
                }
            }
        };

        Ok(Reconciled { outcome, coercion })
    }

    async fn insert(
        &self,
        uow: &mut UnitOfWork<'_>,
        item: &SourceItem,
        level: Level,
        ctx: &ItemCtx,
    ) -> StoreResult<AddedQuestion> {
        let id = uow.insert_question(&item.question, level).await?;
        uow.insert_answers(id, &item.answers).await?;

        info!(
            "{} 📝 新增题目 #{} (Level {}): {}",
            ctx,
            id,
            level,
            truncate_text(&item.question, 80)
        );

        Ok(AddedQuestion {
            text: item.question.clone(),
            level,
            answer_count: item.answers.len(),
            correct_answer: correct_answer_of(item),
        })
    }
}

/// 缺省取 10；给出但不合法时降级为 10，并返回降级记录
fn normalize_level(item: &SourceItem) -> (Level, Option<LevelCoercion>) {
    match &item.level {
        None => (Level::default(), None),
        Some(raw) => match raw.level() {
            Some(level) => (level, None),
            None => (
                Level::default(),
                Some(LevelCoercion {
                    question: item.question.clone(),
                    raw: raw.clone(),
                }),
            ),
        },
    }
}

fn correct_answer_of(item: &SourceItem) -> String {
    item.correct_answer().unwrap_or_default().to_string()
}
