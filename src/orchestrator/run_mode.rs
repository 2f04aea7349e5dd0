//! 运行模式
//!
//! 每种模式自带"已存在的题目是否跳过"的取值，不再由同一个
//! `force` 开关在不同分支里各自解释。

use std::path::PathBuf;

use crate::config::Config;

/// 种子文件集合
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentSet {
    /// 初始题库
    Initial,
    /// 按日期命名的更新文件
    Updates,
    /// 测试数据
    Tests,
}

impl DocumentSet {
    pub fn dir(self, config: &Config) -> PathBuf {
        match self {
            DocumentSet::Initial => config.initial_dir(),
            DocumentSet::Updates => config.updates_dir(),
            DocumentSet::Tests => config.tests_dir(),
        }
    }
}

/// 文档来源
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    /// 目录下全部 JSON 文件（字典序）
    Set(DocumentSet),
    /// 单个指定文件
    File(PathBuf),
}

/// 运行中的一个阶段
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stage {
    pub label: &'static str,
    pub source: DocumentSource,
    pub skip_existing: bool,
}

/// 一次运行的模式
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunMode {
    /// 先初始题库（遵循 force），再全部更新文件
    All { force: bool },
    /// 初始题库；force 时比对并修正已有题目
    Initial { force: bool },
    /// 全部更新文件，总是比对
    Updates,
    /// 单个更新文件，总是比对
    UpdateFile(PathBuf),
    /// 任意单个文件；force 时比对
    File { path: PathBuf, force: bool },
    /// 测试数据，永不覆盖
    TestData,
}

impl RunMode {
    pub fn label(&self) -> String {
        match self {
            RunMode::All { force } => with_force("all", *force),
            RunMode::Initial { force } => with_force("initial", *force),
            RunMode::Updates => "updates".to_string(),
            RunMode::UpdateFile(path) => format!("update-file {}", path.display()),
            RunMode::File { path, force } => {
                with_force(&format!("file {}", path.display()), *force)
            }
            RunMode::TestData => "test-data".to_string(),
        }
    }

    /// 按顺序展开为阶段
    pub fn stages(&self) -> Vec<Stage> {
        let initial = |force: bool| Stage {
            label: "initial",
            source: DocumentSource::Set(DocumentSet::Initial),
            skip_existing: !force,
        };
        let updates = Stage {
            label: "updates",
            source: DocumentSource::Set(DocumentSet::Updates),
            skip_existing: false,
        };

        match self {
            RunMode::All { force } => vec![initial(*force), updates],
            RunMode::Initial { force } => vec![initial(*force)],
            RunMode::Updates => vec![updates],
            RunMode::UpdateFile(path) => vec![Stage {
                label: "update-file",
                source: DocumentSource::File(path.clone()),
                skip_existing: false,
            }],
            RunMode::File { path, force } => vec![Stage {
                label: "file",
                source: DocumentSource::File(path.clone()),
                skip_existing: !force,
            }],
            RunMode::TestData => vec![Stage {
                label: "test-data",
                source: DocumentSource::Set(DocumentSet::Tests),
                skip_existing: true,
            }],
        }
    }
}

fn with_force(label: &str, force: bool) -> String {
    if force {
        format!("{} --force", label)
    } else {
        label.to_string()
    }
}
