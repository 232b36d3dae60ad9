use std::fmt;

use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 表单校验错误（可由用户修正）
    #[error("输入校验失败: {0}")]
    Validation(#[from] ValidationError),
    /// 提交时会话数据不完整
    #[error("会话数据不完整: {0}")]
    IncompleteSession(#[from] IncompleteSessionError),
    /// 远程服务错误
    #[error("远程服务错误: {0}")]
    Remote(#[from] RemoteServiceError),
    /// 会话状态机错误
    #[error("会话状态错误: {0}")]
    Session(#[from] SessionError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 注册表单字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CandidateField {
    Name,
    CandidateId,
    Email,
}

impl CandidateField {
    /// 字段在接口中的名称
    pub fn as_str(self) -> &'static str {
        match self {
            CandidateField::Name => "name",
            CandidateField::CandidateId => "candidate_id",
            CandidateField::Email => "email",
        }
    }
}

impl fmt::Display for CandidateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 单个字段的校验问题
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("Name is required")]
    NameRequired,
    #[error("Candidate ID is required")]
    IdRequired,
    #[error("Email is required")]
    EmailRequired,
    #[error("Please enter a valid email address")]
    EmailInvalid,
}

impl FieldError {
    /// 出错的字段
    pub fn field(self) -> CandidateField {
        match self {
            FieldError::NameRequired => CandidateField::Name,
            FieldError::IdRequired => CandidateField::CandidateId,
            FieldError::EmailRequired | FieldError::EmailInvalid => CandidateField::Email,
        }
    }
}

/// 注册表单校验错误，按字段收集，便于逐项提示
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    errors: Vec<FieldError>,
}

impl ValidationError {
    pub fn new(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// 查找某个字段的错误
    pub fn for_field(&self, field: CandidateField) -> Option<FieldError> {
        self.errors.iter().copied().find(|e| e.field() == field)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field(), e))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for ValidationError {}

/// 提交时会话数据不完整
///
/// 显示文本直接作为结果页的提示语
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IncompleteSessionError {
    /// 没有候选人存储 id
    #[error("Candidate ID is missing.")]
    MissingCandidate,
    /// 没有任何答案
    #[error("No answers found.")]
    NoAnswers,
    /// 推算出的开始时间超出可表示范围
    #[error("Test duration is out of range.")]
    DurationOutOfRange,
}

/// 远程服务错误（注册 / 提交 / 分析查询）
#[derive(Debug, Error)]
pub enum RemoteServiceError {
    /// 网络请求失败（连接失败、超时等）
    #[error("请求失败 ({endpoint}): {source}")]
    RequestFailed {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    /// 服务返回非成功状态码
    #[error("服务返回错误状态 ({endpoint}): status={status}, message={message:?}")]
    BadStatus {
        endpoint: String,
        status: u16,
        message: Option<String>,
    },
    /// 响应体结构不符合约定
    #[error("响应格式错误 ({endpoint}): {reason}")]
    MalformedResponse { endpoint: String, reason: String },
    /// GraphQL 返回 errors
    #[error("GraphQL 执行错误 ({endpoint}): {message}")]
    GraphQl { endpoint: String, message: String },
}

impl RemoteServiceError {
    /// 出错的接口地址
    pub fn endpoint(&self) -> &str {
        match self {
            RemoteServiceError::RequestFailed { endpoint, .. }
            | RemoteServiceError::BadStatus { endpoint, .. }
            | RemoteServiceError::MalformedResponse { endpoint, .. }
            | RemoteServiceError::GraphQl { endpoint, .. } => endpoint,
        }
    }
}

/// 会话状态机错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// 当前页面不允许该操作
    #[error("当前页面 {screen} 不允许操作: {action}")]
    InvalidTransition {
        screen: &'static str,
        action: &'static str,
    },
    /// 题目列表为空，无法开始测试
    #[error("题目列表为空，无法开始测试")]
    NoQuestions,
    /// 已经提交过
    #[error("测试已提交，不能重复提交")]
    AlreadySubmitted,
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    /// 题库内容不合法
    #[error("题库不合法 ({path}): {reason}")]
    InvalidBank { path: String, reason: String },
}

/// 配置错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建请求失败错误
    pub fn request_failed(endpoint: impl Into<String>, source: reqwest::Error) -> Self {
        AppError::Remote(RemoteServiceError::RequestFailed {
            endpoint: endpoint.into(),
            source,
        })
    }

    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建非法状态转换错误
    pub fn invalid_transition(screen: &'static str, action: &'static str) -> Self {
        AppError::Session(SessionError::InvalidTransition { screen, action })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_lookup_by_field() {
        let err = ValidationError::new(vec![FieldError::NameRequired, FieldError::EmailInvalid]);

        assert_eq!(err.for_field(CandidateField::Name), Some(FieldError::NameRequired));
        assert_eq!(err.for_field(CandidateField::Email), Some(FieldError::EmailInvalid));
        assert_eq!(err.for_field(CandidateField::CandidateId), None);
        assert_eq!(
            err.to_string(),
            "name: Name is required; email: Please enter a valid email address"
        );
    }

    #[test]
    fn test_incomplete_session_messages() {
        assert_eq!(
            IncompleteSessionError::MissingCandidate.to_string(),
            "Candidate ID is missing."
        );
        assert_eq!(IncompleteSessionError::NoAnswers.to_string(), "No answers found.");
    }

    #[test]
    fn test_app_error_wraps_categories() {
        let err: AppError = SessionError::AlreadySubmitted.into();
        assert!(matches!(err, AppError::Session(SessionError::AlreadySubmitted)));

        let err: AppError = ValidationError::new(vec![FieldError::IdRequired]).into();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
