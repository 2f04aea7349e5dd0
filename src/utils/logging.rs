/// 日志工具模块
///
/// 提供日志初始化、格式化和输出的辅助函数
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::models::{DocumentSummary, RunSummary};

/// 初始化日志
///
/// `RUST_LOG` 优先；否则按详细程度选择 info / debug / trace。
pub fn init(verbosity: u8) {
    let default_filter = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(label: &str, database: &str) {
    info!("{}", "=".repeat(60));
    info!("🌱 程序启动 - {}", label);
    info!("🗄️ 数据库: {}", database);
    info!("{}", "=".repeat(60));
}

/// 记录文档开始处理
pub fn log_document_start(document_index: usize, name: &str, item_count: usize) {
    info!("\n{}", "─".repeat(60));
    info!("📄 [文档 {}] {} - 共 {} 道题目", document_index, name, item_count);
}

/// 记录文档处理完成
pub fn log_document_complete(document_index: usize, summary: &DocumentSummary) {
    info!(
        "✓ [文档 {}] 完成: 新增 {}, 更新 {}, 跳过 {}, 无效 {}",
        document_index,
        summary.added.len(),
        summary.updated.len(),
        summary.skipped,
        summary.invalid
    );
}

/// 打印最终统计信息
pub fn print_final_stats(summary: &RunSummary) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("📝 新增: {}", summary.added.len());
    info!("🔄 更新: {}", summary.updated.len());
    info!("⏭️ 跳过: {}", summary.skipped);
    info!("❌ 无效: {}", summary.invalid);
    info!(
        "📄 文档: {} (失败 {})",
        summary.documents_processed,
        summary.failed_documents.len()
    );
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度（字符数）
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_by_characters_not_bytes() {
        assert_eq!(truncate_text("短文本", 10), "短文本");
        assert_eq!(truncate_text("一二三四五", 3), "一二三...");
        assert_eq!(truncate_text("abcdef", 6), "abcdef");
    }
}
