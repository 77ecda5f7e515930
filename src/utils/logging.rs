/// 日志工具模块
///
/// 提供日志初始化、格式化和输出的辅助函数
use std::fs::{self, OpenOptions};
use std::io::Write;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::orchestrator::BatchReport;

/// 初始化 tracing 订阅者
///
/// 优先使用 RUST_LOG，否则按 verbose 选择 debug / info
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// 初始化日志文件
///
/// # 参数
/// - `log_file_path`: 日志文件路径
pub fn init_log_file(log_file_path: &str) -> Result<()> {
    let log_header = format!(
        "{}\n题库生成日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)?;
    Ok(())
}

/// 把批次统计追加到日志文件
pub fn append_summary(log_file_path: &str, report: &BatchReport) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)?;

    for category in &report.categories {
        writeln!(
            file,
            "类别 {} | 规格 {} | 新增 {} | 跳过 {}{}",
            category.category,
            category.specs,
            category.added,
            category.skipped,
            if category.already_satisfied { " | 已达标" } else { "" }
        )?;
    }
    writeln!(
        file,
        "\n题库: {} → {} 道题 | 剩余缺口 {}",
        report.corpus_before,
        report.corpus_after,
        report.coverage.total_deficit()
    )?;

    Ok(())
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 题库生成模式");
    info!("📁 题库文件: {}", config.corpus_path.display());
    info!("📁 规格目录: {}", config.spec_folder.display());
    info!("🎯 每个兴趣目标题数: {}", config.coverage_target);
    match config.shuffle_seed {
        Some(seed) => info!("🎲 固定随机种子: {}", seed),
        None => info!("🎲 随机种子: 系统熵"),
    }
    info!("{}", "=".repeat(60));
}

/// 记录规格加载信息
pub fn log_groups_loaded(groups: usize, specs: usize) {
    info!("✓ 找到 {} 个类别, 共 {} 个题目规格", groups, specs);
}

/// 记录类别处理信息
pub fn log_category(category: &str, specs: usize, deficit: usize) {
    info!("📦 [{}] {} 个规格 | 当前缺口 {}", category, specs, deficit);
}

/// 打印最终统计信息
pub fn print_final_stats(report: &BatchReport, log_file_path: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 本批处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    for category in &report.categories {
        info!(
            "[{}] 新增 {} | 跳过 {}",
            category.category, category.added, category.skipped
        );
    }
    info!("✅ 新增: {}", report.added());
    info!("📚 题库总数: {} → {}", report.corpus_before, report.corpus_after);
    let remaining: Vec<_> = report.coverage.deficits().collect();
    if remaining.is_empty() {
        info!("🎉 所有兴趣均已达到 {} 道题", report.coverage.target());
    } else {
        info!("⚠️ 仍有 {} 个兴趣未达标:", remaining.len());
        for (tag, deficit) in remaining {
            info!("  - {}: 还差 {} 道", tag, deficit);
        }
    }
    info!("{}", "=".repeat(60));
    info!("\n日志已保存至: {}", log_file_path);
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
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
    fn truncate_counts_chars_not_bytes() {
        assert_eq!(truncate_text("Saúde", 10), "Saúde");
        assert_eq!(truncate_text("Saúde e Bem-Estar", 5), "Saúde...");
    }

    #[test]
    fn log_file_gets_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.txt");
        let path = path.to_string_lossy().to_string();

        init_log_file(&path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("题库生成日志"));
    }
}
