//! # Question Seeder
//!
//! 把 JSON 种子文件导入并对账到题库数据库的命令行工具
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有存储，只暴露能力
//! - `SqliteStore` - SQLite 实现的 `QuestionStore`
//! - `UnitOfWork` - 一次运行的唯一事务，所有写操作都经由它
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单个题目
//! - `validator` - 结构校验
//! - `lookup` / `differ` - 按题干查找、比对差异
//! - `report_builder` / `TemplateWriter` - 报告渲染、更新文件模板
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一道题"的完整处理流程
//! - `ItemCtx` - 上下文封装（文档 + 题目序号）
//! - `Reconciler` - 流程编排（校验 → 查找 → 新增 / 更新 / 跳过）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/run_orchestrator` - 运行编排器，管理事务和阶段
//! - `orchestrator/document_processor` - 单个文档处理器，遍历题目列表
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::{QuestionStore, SqliteStore, StoreStats, UnitOfWork};
pub use models::{RunSummary, SourceItem};
pub use orchestrator::{App, RunMode, RunReport};
pub use workflow::{ItemCtx, Reconciler};
