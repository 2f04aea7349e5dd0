//! 单个文档处理器 - 编排层
//!
//! ## 职责
//!
//! 1. **加载文档**：解析 JSON，失败时整份文档不产生任何变更
//! 2. **遍历题目**：逐题调用 `Reconciler`
//! 3. **结果归档**：新增 / 更新 / 跳过 / 无效
//!
//! 文档级错误在这里被吸收；存储层错误原样向上传递。

use std::path::Path;

use tracing::error;

use crate::error::{DocumentError, StoreResult};
use crate::infrastructure::UnitOfWork;
use crate::models::{load_document, DocumentSummary};
use crate::utils::logging::{log_document_complete, log_document_start};
use crate::workflow::{ItemCtx, Reconciler};

/// 单个文档的处理结果
#[derive(Debug)]
pub enum BatchOutcome {
    /// 文档已处理（其中的题目可能部分无效）
    Completed(DocumentSummary),
    /// 文档无法加载，没有任何贡献
    Failed(DocumentError),
}

/// 处理单个文档
///
/// # 参数
/// - `uow`: 本次运行的事务
/// - `reconciler`: 单题流程
/// - `path`: 文档路径
/// - `document_index`: 文档序号（用于日志）
/// - `skip_existing`: 已存在的题目是否直接跳过
pub async fn process_document(
    uow: &mut UnitOfWork<'_>,
    reconciler: &Reconciler,
    path: &Path,
    document_index: usize,
    skip_existing: bool,
) -> StoreResult<BatchOutcome> {
    let document = match load_document(path).await {
        Ok(document) => document,
        Err(e) => {
            error!("❌ [文档 {}] 无法处理 {}: {}", document_index, path.display(), e);
            return Ok(BatchOutcome::Failed(e));
        }
    };

    let name = document.file_name();
    log_document_start(document_index, &name, document.items.len());

    let mut summary = DocumentSummary::new(&document.path);

    for (index, item) in document.items.iter().enumerate() {
        let ctx = ItemCtx::new(name.as_str(), document_index, index + 1);
        let reconciled = reconciler.reconcile(uow, item, skip_existing, &ctx).await?;
        summary.record(&item.question, reconciled);
    }

    log_document_complete(document_index, &summary);

    Ok(BatchOutcome::Completed(summary))
}
