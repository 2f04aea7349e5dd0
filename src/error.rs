use std::path::PathBuf;

/// 应用程序错误类型
///
/// 只有会中止整个运行的错误才会走到这里；单题和单文档的问题
/// （`ValidationError` / `DocumentError`）在各自的作用域内被吸收，
/// 只留下一条处理记录。
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 存储层错误（致命，整个运行回滚）
    #[error("存储错误: {0}")]
    Store(#[from] StoreError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    Io(#[from] std::io::Error),
    /// JSON 序列化失败
    #[error("JSON序列化失败: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// 题目结构校验错误
///
/// 文本即记录到处理日志里的原因。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// 题干为空
    #[error("question text missing")]
    MissingQuestion,
    /// 选项少于两个
    #[error("insufficient answers")]
    InsufficientAnswers,
    /// 没有正确答案
    #[error("no correct answer")]
    NoCorrectAnswer,
    /// 正确答案多于一个
    #[error("{0} correct answers, expected 1")]
    MultipleCorrectAnswers(usize),
}

/// 文档（单个 JSON 文件）错误
///
/// 只影响出错的那一个文件，运行继续处理下一个。
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// 文件不存在
    #[error("文件不存在: {}", .path.display())]
    NotFound { path: PathBuf },
    /// 读取文件失败
    #[error("读取文件失败 ({}): {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// JSON 解析失败
    #[error("JSON解析失败 ({}): {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl DocumentError {
    /// 出错文档的路径
    pub fn path(&self) -> &std::path::Path {
        match self {
            DocumentError::NotFound { path }
            | DocumentError::Read { path, .. }
            | DocumentError::Parse { path, .. } => path,
        }
    }
}

/// 存储层错误
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// 底层 SQLite 操作失败
    #[error("SQLite错误: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// 连接锁已损坏
    #[error("数据库连接锁已损坏")]
    LockPoisoned,
    /// 违反了校验之外的约束
    #[error("约束冲突: {0}")]
    Constraint(String),
}

/// 配置错误
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
    /// 配置文件读取失败
    #[error("无法读取配置文件 {}: {source}", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// 配置文件解析失败
    #[error("无法解析配置文件 {}: {source}", .path.display())]
    FileParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    /// 模板名称不可用
    #[error("无效的更新文件名称: '{0}'")]
    InvalidTemplateName(String),
    /// 模板文件已存在
    #[error("更新文件已存在: {}", .0.display())]
    TemplateExists(PathBuf),
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 是否为存储层错误
    pub fn is_store(&self) -> bool {
        matches!(self, AppError::Store(_))
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

/// 存储层结果类型
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_messages_are_stable() {
        assert_eq!(
            ValidationError::MissingQuestion.to_string(),
            "question text missing"
        );
        assert_eq!(
            ValidationError::InsufficientAnswers.to_string(),
            "insufficient answers"
        );
        assert_eq!(
            ValidationError::NoCorrectAnswer.to_string(),
            "no correct answer"
        );
        assert_eq!(
            ValidationError::MultipleCorrectAnswers(3).to_string(),
            "3 correct answers, expected 1"
        );
    }

    #[test]
    fn store_errors_are_flagged() {
        let err = AppError::from(StoreError::LockPoisoned);
        assert!(err.is_store());

        let err = AppError::from(ConfigError::InvalidTemplateName("??".to_string()));
        assert!(!err.is_store());
    }

    #[test]
    fn document_error_exposes_path() {
        let err = DocumentError::NotFound {
            path: PathBuf::from("seeds/updates/missing.json"),
        };
        assert_eq!(err.path(), std::path::Path::new("seeds/updates/missing.json"));
    }
}
