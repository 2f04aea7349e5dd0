//! 更新模板写入服务 - 业务能力层
//!
//! 只负责"在 updates 目录生成一个带日期的更新文件"能力，不访问数据库。

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use regex::Regex;
use tokio::fs;
use tracing::{debug, info};

use crate::error::{AppResult, ConfigError};
use crate::models::{Level, SourceAnswer, SourceItem};

/// 更新模板写入服务
pub struct TemplateWriter {
    updates_dir: PathBuf,
}

impl TemplateWriter {
    pub fn new(updates_dir: impl Into<PathBuf>) -> Self {
        Self {
            updates_dir: updates_dir.into(),
        }
    }

    /// 以今天的本地日期创建更新文件
    pub async fn create(&self, name: &str) -> AppResult<PathBuf> {
        self.create_for_date(name, chrono::Local::now().date_naive())
            .await
    }

    /// 以指定日期创建 `<YYYY-MM-DD>-<name>.json`
    ///
    /// 已存在的文件不会被覆盖。
    pub async fn create_for_date(&self, name: &str, date: NaiveDate) -> AppResult<PathBuf> {
        let slug = slugify(name).ok_or_else(|| ConfigError::InvalidTemplateName(name.to_string()))?;
        let filename = format!("{}-{}.json", date.format("%Y-%m-%d"), slug);
        let filepath = self.updates_dir.join(filename);

        debug!("生成更新文件: {}", filepath.display());

        if fs::try_exists(&filepath).await? {
            return Err(ConfigError::TemplateExists(filepath).into());
        }

        fs::create_dir_all(&self.updates_dir).await?;
        fs::write(&filepath, sample_document()?).await?;

        info!("✅ 已创建更新文件: {}", filepath.display());
        Ok(filepath)
    }

    pub fn updates_dir(&self) -> &Path {
        &self.updates_dir
    }
}

/// 把名称收敛为 `[A-Za-z0-9_-]`，其余连续字符合并为 `-`
fn slugify(name: &str) -> Option<String> {
    let re = Regex::new(r"[^A-Za-z0-9_-]+").ok()?;
    let slug = re.replace_all(name.trim(), "-");
    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        None
    } else {
        Some(slug.to_string())
    }
}

fn sample_document() -> serde_json::Result<String> {
    let sample = vec![SourceItem {
        question: "Sample question?".to_string(),
        level: Some(Level::default().into()),
        answers: vec![
            SourceAnswer::new("Correct answer", true),
            SourceAnswer::new("Wrong answer 1", false),
            SourceAnswer::new("Wrong answer 2", false),
            SourceAnswer::new("Wrong answer 3", false),
        ],
    }];
    let mut json = serde_json::to_string_pretty(&sample)?;
    json.push('\n');
    Ok(json)
}
