//! 题目处理上下文
//!
//! 封装"我正在处理哪个文档的第几题"这一信息

use std::fmt::Display;

/// 题目处理上下文
#[derive(Debug, Clone)]
pub struct ItemCtx {
    /// 文档文件名
    pub document: String,

    /// 文档在本次运行中的序号（仅用于日志显示）
    pub document_index: usize,

    /// 题目在文档中的序号（从1开始）
    pub item_index: usize,
}

impl ItemCtx {
    pub fn new(document: impl Into<String>, document_index: usize, item_index: usize) -> Self {
        Self {
            document: document.into(),
            document_index,
            item_index,
        }
    }
}

impl Display for ItemCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[文档 {}#{} 题目#{}]",
            self.document_index, self.document, self.item_index
        )
    }
}
