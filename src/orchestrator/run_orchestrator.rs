//! 运行编排器 - 编排层
//!
//! ## 职责
//!
//! 1. **应用初始化**：打开数据库、确保表结构
//! 2. **事务边界**：整个运行只有一个事务，要么全部提交，要么全部回滚
//! 3. **阶段调度**：按运行模式依次处理各阶段的文档（字典序）
//! 4. **初始用户**：在同一事务内确保初始用户存在
//! 5. **报告输出**：提交成功后渲染报告，打印并按配置写入文件
//!
//! ## 设计特点
//!
//! - **资源所有者**：唯一持有存储的模块
//! - **向下委托**：单个文档交给 `document_processor`

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::error::{AppResult, StoreResult};
use crate::infrastructure::{QuestionStore, SqliteStore, UnitOfWork};
use crate::models::{list_documents, RunSummary};
use crate::orchestrator::document_processor::{process_document, BatchOutcome};
use crate::orchestrator::run_mode::{DocumentSource, RunMode, Stage};
use crate::services::report_builder;
use crate::utils::logging::{log_startup, print_final_stats};
use crate::workflow::Reconciler;

/// 一次成功运行的结果
#[derive(Debug)]
pub struct RunReport {
    pub summary: RunSummary,
    /// 渲染后的报告文本
    pub text: String,
}

/// 应用主结构
pub struct App {
    config: Config,
    store: Arc<dyn QuestionStore>,
    reconciler: Reconciler,
}

impl App {
    /// 初始化应用：打开配置中的 SQLite 数据库
    pub fn initialize(config: Config) -> AppResult<Self> {
        let path = config.database_path();
        let store = SqliteStore::open(&path)?;
        debug!("数据库已就绪: {}", path.display());

        Ok(Self::with_store(config, Arc::new(store)))
    }

    /// 使用已有的存储
    pub fn with_store(config: Config, store: Arc<dyn QuestionStore>) -> Self {
        Self {
            config,
            store,
            reconciler: Reconciler::new(),
        }
    }

    /// 运行应用主逻辑
    ///
    /// 存储层错误会回滚整个运行并原样返回；此时不输出报告。
    pub async fn run(&self, mode: &RunMode) -> AppResult<RunReport> {
        let label = mode.label();
        log_startup(&label, &self.config.database_url);

        let before = self.store.stats().await?;
        info!(
            "📚 当前题库: {} 道题目, {} 个选项, {} 个用户",
            before.questions, before.answers, before.users
        );

        let mut uow = UnitOfWork::begin(self.store.as_ref()).await?;

        let summary = match self.execute(&mut uow, mode).await {
            Ok(summary) => summary,
            Err(e) => {
                error!("❌ 存储错误，回滚本次运行的全部变更: {}", e);
                if let Err(rollback_err) = uow.rollback().await {
                    error!("❌ 回滚失败: {}", rollback_err);
                }
                return Err(e.into());
            }
        };

        uow.commit().await?;

        let text = report_builder::render(&label, &summary);
        self.emit_report(&text).await?;
        print_final_stats(&summary);

        Ok(RunReport { summary, text })
    }

    /// 在事务内执行全部阶段
    async fn execute(&self, uow: &mut UnitOfWork<'_>, mode: &RunMode) -> StoreResult<RunSummary> {
        let mut summary = RunSummary::default();
        let mut document_index = 0;

        for stage in mode.stages() {
            let documents = self.resolve_documents(&stage, &mut summary).await;
            info!(
                "\n📁 阶段 {}: {} 个文档 (跳过已有: {})",
                stage.label,
                documents.len(),
                stage.skip_existing
            );

            for path in documents {
                document_index += 1;
                match process_document(
                    uow,
                    &self.reconciler,
                    &path,
                    document_index,
                    stage.skip_existing,
                )
                .await?
                {
                    BatchOutcome::Completed(document) => summary.absorb(document),
                    BatchOutcome::Failed(e) => summary.record_failed_document(&path, &e),
                }
            }
        }

        summary.bootstrap_user_created = self.ensure_bootstrap_user(uow).await?;

        Ok(summary)
    }

    /// 解析阶段对应的文档列表
    async fn resolve_documents(&self, stage: &Stage, summary: &mut RunSummary) -> Vec<PathBuf> {
        match &stage.source {
            DocumentSource::File(path) => vec![path.clone()],
            DocumentSource::Set(set) => {
                let dir = set.dir(&self.config);
                match list_documents(&dir).await {
                    Ok(paths) => paths,
                    Err(e) => {
                        warn!("⚠️ 无法列出目录 {}: {}", dir.display(), e);
                        summary.record_failed_document(&dir, &e);
                        Vec::new()
                    }
                }
            }
        }
    }

    /// 确保初始用户存在；已存在时不做任何修改
    async fn ensure_bootstrap_user(&self, uow: &mut UnitOfWork<'_>) -> StoreResult<bool> {
        let username = self.config.bootstrap_username.as_str();
        if uow.find_user_by_username(username).await?.is_some() {
            debug!("初始用户 '{}' 已存在", username);
            return Ok(false);
        }

        let id = uow.insert_user(username).await?;
        info!("👤 已创建初始用户 '{}' (#{})", username, id);
        Ok(true)
    }

    /// 打印报告，并按配置写入报告文件
    async fn emit_report(&self, text: &str) -> AppResult<()> {
        println!("{}", text);

        if let Some(path) = &self.config.report_file {
            tokio::fs::write(path, text).await?;
            info!("📄 报告已写入: {}", path.display());
        }
        Ok(())
    }
}
