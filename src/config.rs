use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;

/// 程序配置
///
/// 加载顺序：内置默认值 → TOML 配置文件（可选）→ 环境变量。
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 数据库地址（SQLite 文件路径，可带 `sqlite://` 前缀）
    pub database_url: String,
    /// 种子文件根目录，下含 initial / updates / tests
    pub seeds_dir: PathBuf,
    /// 保证存在的初始用户
    pub bootstrap_username: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 报告额外写入的文件
    pub report_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "quiz.db".to_string(),
            seeds_dir: PathBuf::from("seeds"),
            bootstrap_username: "test_user".to_string(),
            verbose_logging: false,
            report_file: None,
        }
    }
}

impl Config {
    /// 加载配置文件（可选）并叠加环境变量
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let base = match config_file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        base.with_overrides(|key| std::env::var(key).ok())
    }

    /// 读取 TOML 配置文件，缺省字段取默认值
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::FileParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// 用键值来源覆盖配置
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(v) = lookup("DATABASE_URL") {
            self.database_url = v;
        }
        if let Some(v) = lookup("SEEDS_DIR") {
            self.seeds_dir = PathBuf::from(v);
        }
        if let Some(v) = lookup("BOOTSTRAP_USERNAME") {
            self.bootstrap_username = v;
        }
        if let Some(v) = lookup("VERBOSE_LOGGING") {
            self.verbose_logging = v.parse().map_err(|_| ConfigError::EnvVarParseFailed {
                var_name: "VERBOSE_LOGGING".to_string(),
                value: v.clone(),
                expected_type: "bool".to_string(),
            })?;
        }
        if let Some(v) = lookup("REPORT_FILE") {
            self.report_file = Some(PathBuf::from(v));
        }
        Ok(self)
    }

    /// 数据库文件路径（去掉 `sqlite://` / `sqlite:` 前缀）
    pub fn database_path(&self) -> PathBuf {
        let url = self.database_url.as_str();
        let path = url
            .strip_prefix("sqlite://")
            .or_else(|| url.strip_prefix("sqlite:"))
            .unwrap_or(url);
        PathBuf::from(path)
    }

    pub fn initial_dir(&self) -> PathBuf {
        self.seeds_dir.join("initial")
    }

    pub fn updates_dir(&self) -> PathBuf {
        self.seeds_dir.join("updates")
    }

    pub fn tests_dir(&self) -> PathBuf {
        self.seeds_dir.join("tests")
    }
}
