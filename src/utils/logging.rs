/// 日志工具模块
///
/// 提供日志初始化和输出的辅助函数
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// 初始化日志
///
/// 优先使用 `RUST_LOG`，否则按 `verbose` 选择 debug / info 级别。
/// 重复初始化时静默忽略。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 性格偏好测评");
    info!("🌐 服务地址: {}", config.api_base_url);
    info!("📊 题目数量: {}", config.question_count);
    info!("{}", "=".repeat(60));
}

/// 记录题库加载信息
///
/// # 参数
/// - `loaded`: 题库中的题目数
/// - `selected`: 本场测试抽取的题目数
pub fn log_questions_loaded(loaded: usize, selected: usize) {
    info!("✓ 题库共 {} 道题，本场测试 {} 道", loaded, selected);
}

/// 打印测试结束统计
///
/// # 参数
/// - `candidate`: 候选人业务编号
/// - `answered`: 已作答题数
/// - `total`: 题目总数
/// - `degraded`: 是否使用了兜底文案
pub fn print_final_stats(candidate: &str, answered: usize, total: usize, degraded: bool) {
    info!("\n{}", "=".repeat(60));
    info!("📊 测试完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("👤 候选人: {}", candidate);
    info!("✅ 作答: {}/{}", answered, total);
    if degraded {
        info!("⚠️ 未获取到详细分析，已显示兜底文案");
    }
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
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
