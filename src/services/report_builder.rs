//! 报告生成服务 - 业务能力层
//!
//! 把一次运行的汇总渲染成可读文本，纯格式化，不访问存储。

use crate::models::RunSummary;

/// 渲染导入报告
pub fn render(label: &str, summary: &RunSummary) -> String {
    let rule = "=".repeat(60);
    let mut lines = vec![
        rule.clone(),
        format!("✅ 导入报告 - {}", label),
        rule.clone(),
    ];

    if !summary.added.is_empty() {
        lines.push(format!("\n📝 新增 {} 道题目:", summary.added.len()));
        for (i, q) in summary.added.iter().enumerate() {
            lines.push(format!("  {}. Level {}: \"{}\"", i + 1, q.level, q.text));
            lines.push(format!("     正确答案: \"{}\"", q.correct_answer));
            lines.push(format!("     选项总数: {}", q.answer_count));
        }
    }

    if !summary.updated.is_empty() {
        lines.push(format!("\n🔄 更新 {} 道已有题目:", summary.updated.len()));
        for (i, q) in summary.updated.iter().enumerate() {
            lines.push(format!("  {}. Level {}: \"{}\"", i + 1, q.level, q.text));
            lines.push(format!("     原因: {}", q.reasons_text()));
            lines.push(format!("     正确答案: \"{}\"", q.correct_answer));
            lines.push(format!("     选项总数: {}", q.answer_count));
        }
    }

    if !summary.has_changes() {
        lines.push("\n📊 没有任何变更（所有题目均已存在且内容一致）".to_string());
    }

    lines.push(format!(
        "\n跳过: {} | 无效: {} | 文档: {} (失败 {})",
        summary.skipped,
        summary.invalid,
        summary.documents_processed,
        summary.failed_documents.len()
    ));

    if !summary.notes.is_empty() {
        lines.push("\n⚠️ 处理说明:".to_string());
        lines.extend(summary.notes.iter().map(|note| format!("  - {}", note)));
    }

    if !summary.failed_documents.is_empty() {
        lines.push("\n❌ 未能处理的文档:".to_string());
        lines.extend(
            summary
                .failed_documents
                .iter()
                .map(|failed| format!("  - {}", failed)),
        );
    }

    lines.push(format!("\n{}\n", rule));
    lines.join("\n")
}
