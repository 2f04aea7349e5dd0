/// 题目难度等级
///
/// 存储层约束只接受 10 / 11 / 12 三个取值。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Level {
    /// 10 年级
    #[default]
    Ten = 10,
    /// 11 年级
    Eleven = 11,
    /// 12 年级
    Twelve = 12,
}

impl Level {
    /// 获取等级代码
    pub fn code(self) -> i64 {
        self as i64
    }

    /// 从代码解析等级
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            10 => Some(Level::Ten),
            11 => Some(Level::Eleven),
            12 => Some(Level::Twelve),
            _ => None,
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
