use serde::{Deserialize, Serialize};

use super::Level;

/// 源文档中的一个选项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceAnswer {
    pub answer: String,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub correct: bool,
}

impl SourceAnswer {
    pub fn new(answer: impl Into<String>, correct: bool) -> Self {
        Self {
            answer: answer.into(),
            correct,
        }
    }
}

/// 源文档中的一道题（尚未入库）
///
/// `question` 和 `answers` 缺失或为 `null` 时取空值，让结构问题交给
/// 校验器报告，而不是让整个文档解析失败。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceItem {
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub question: String,
    #[serde(
        default,
        deserialize_with = "deserialize_level",
        skip_serializing_if = "Option::is_none"
    )]
    pub level: Option<RawLevel>,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub answers: Vec<SourceAnswer>,
}

impl SourceItem {
    /// 第一个标记为正确的选项文本
    pub fn correct_answer(&self) -> Option<&str> {
        self.answers
            .iter()
            .find(|a| a.correct)
            .map(|a| a.answer.as_str())
    }

    /// 正确选项的数量
    pub fn correct_count(&self) -> usize {
        self.answers.iter().filter(|a| a.correct).count()
    }
}

/// 源文档里原样的 `level` 字段
///
/// 只有 10/11/12 的整数会被采用，其余取值保留原文，便于记录降级原因。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RawLevel {
    Number(i64),
    Other(String),
}

impl RawLevel {
    /// 解析为有效等级
    pub fn level(&self) -> Option<Level> {
        match self {
            RawLevel::Number(code) => Level::from_code(*code),
            RawLevel::Other(_) => None,
        }
    }
}

impl From<Level> for RawLevel {
    fn from(level: Level) -> Self {
        RawLevel::Number(level.code())
    }
}

impl std::fmt::Display for RawLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RawLevel::Number(code) => write!(f, "{}", code),
            RawLevel::Other(raw) => write!(f, "{}", raw),
        }
    }
}

// `null` 与缺失同样取默认值
fn deserialize_null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// Helper function to deserialize level as any JSON scalar
fn deserialize_level<'de, D>(deserializer: D) -> Result<Option<RawLevel>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Visitor;
    use std::fmt;

    struct LevelVisitor;

    impl<'de> Visitor<'de> for LevelVisitor {
        type Value = Option<RawLevel>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("an integer level or any scalar value")
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(RawLevel::Number(value)))
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(match i64::try_from(value) {
                Ok(v) => RawLevel::Number(v),
                Err(_) => RawLevel::Other(value.to_string()),
            }))
        }

        fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(RawLevel::Other(value.to_string())))
        }

        fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(RawLevel::Other(value.to_string())))
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(RawLevel::Other(format!("\"{}\"", value))))
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(RawLevel::Other("null".to_string())))
        }
    }

    deserializer.deserialize_any(LevelVisitor)
}

/// 已入库的题目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub id: i64,
    pub text: String,
    pub level: Level,
    pub created_at: String,
}

/// 已入库的选项
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub id: i64,
    pub question_id: i64,
    pub text: String,
    pub correct: bool,
}

/// 已入库的用户
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub score: i64,
    pub is_active: bool,
    pub created_at: String,
}
