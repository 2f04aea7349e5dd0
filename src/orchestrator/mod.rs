//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责批量处理和流程调度，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `run_mode` - 运行模式
//! - 把命令行选择的模式展开为若干阶段
//! - 每个阶段自带文档来源和"是否跳过已有题目"
//!
//! ### `run_orchestrator` - 运行编排器
//! - 管理应用生命周期（打开存储、运行、输出报告）
//! - 持有唯一的事务，存储错误时整体回滚
//! - 确保初始用户存在
//!
//! ### `document_processor` - 单个文档处理器
//! - 加载单个文档，加载失败只影响该文档
//! - 遍历文档中的题目，调用 `Reconciler`
//! - 输出单个文档的统计信息
//!
//! ## 层次关系
//!
//! ```text
//! run_orchestrator (处理 Vec<Stage>)
//!     ↓
//! document_processor (处理 Vec<SourceItem>)
//!     ↓
//! workflow::Reconciler (处理单个题目)
//!     ↓
//! services (能力层：validator / lookup / differ)
//!     ↓
//! infrastructure (基础设施：UnitOfWork / SqliteStore)
//! ```

pub mod document_processor;
pub mod run_mode;
pub mod run_orchestrator;

// 重新导出主要类型
pub use document_processor::{process_document, BatchOutcome};
pub use run_mode::{DocumentSet, DocumentSource, RunMode, Stage};
pub use run_orchestrator::{App, RunReport};
