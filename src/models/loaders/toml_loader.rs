use crate::error::{AppError, AppResult, FileError};
use crate::models::question::{Question, QuestionBank};
use std::collections::HashSet;
use std::path::Path;
use tokio::fs;

/// 内置题库
const BUILTIN_BANK: &str = include_str!("../../../questions.toml");

/// 解析 TOML 文本为题目列表，并检查题库是否合法
pub fn parse_question_bank(content: &str, source: &str) -> AppResult<Vec<Question>> {
    let bank: QuestionBank = toml::from_str(content).map_err(|e| FileError::TomlParseFailed {
        path: source.to_string(),
        source: e,
    })?;

    validate_bank(&bank.questions, source)?;
    Ok(bank.questions)
}

/// 内置的 15 道题
pub fn builtin_questions() -> AppResult<Vec<Question>> {
    parse_question_bank(BUILTIN_BANK, "<builtin>")
}

/// 从 TOML 文件加载题库
///
/// 文件不存在时使用内置题库；文件存在但内容不合法时返回错误
pub async fn load_question_bank(path: &Path) -> AppResult<Vec<Question>> {
    if !path.exists() {
        tracing::warn!("题库文件不存在: {}，使用内置题库", path.display());
        return builtin_questions();
    }

    let content = fs::read_to_string(path)
        .await
        .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;

    let questions = parse_question_bank(&content, &path.display().to_string())?;
    tracing::info!(
        "成功加载题库 {}: {} 道题",
        path.file_name().unwrap_or_default().to_string_lossy(),
        questions.len()
    );

    Ok(questions)
}

fn validate_bank(questions: &[Question], source: &str) -> Result<(), FileError> {
    let invalid = |reason: String| FileError::InvalidBank {
        path: source.to_string(),
        reason,
    };

    if questions.is_empty() {
        return Err(invalid("题库为空".to_string()));
    }

    let mut seen = HashSet::new();
    for q in questions {
        if !seen.insert(q.id) {
            return Err(invalid(format!("题目 id {} 重复", q.id)));
        }
        if q.this_option.trim().is_empty() || q.that_option.trim().is_empty() {
            return Err(invalid(format!("题目 {} 缺少选项文本", q.id)));
        }
    }

    Ok(())
}
