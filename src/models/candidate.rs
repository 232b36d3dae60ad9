use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{FieldError, ValidationError};

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern is valid"))
}

/// 注册表单，即 `POST /register` 的请求体
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateForm {
    pub name: String,
    /// 业务编号（如 "C100"），不是存储 id
    pub candidate_id: String,
    pub email: String,
}

impl CandidateForm {
    pub fn new(
        name: impl Into<String>,
        candidate_id: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            candidate_id: candidate_id.into(),
            email: email.into(),
        }
    }

    /// 逐字段校验，收集全部问题
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = Vec::new();

        if self.name.trim().is_empty() {
            errors.push(FieldError::NameRequired);
        }
        if self.candidate_id.trim().is_empty() {
            errors.push(FieldError::IdRequired);
        }
        if self.email.trim().is_empty() {
            errors.push(FieldError::EmailRequired);
        } else if !email_regex().is_match(&self.email) {
            errors.push(FieldError::EmailInvalid);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(errors))
        }
    }

    /// 去掉首尾空白后的表单，用于实际提交
    pub fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            candidate_id: self.candidate_id.trim().to_string(),
            email: self.email.trim().to_string(),
        }
    }
}

/// 注册服务返回的候选人记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisteredCandidate {
    /// 存储 id，后续提交以此为键
    pub id: i64,
    pub name: String,
    /// 业务编号
    pub candidate_id: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl std::fmt::Display for RegisteredCandidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[候选人 {}#{}]", self.candidate_id, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_form() {
        let form = CandidateForm::new("Ana", "C100", "ana@x.com");
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_blank_fields_are_reported_per_field() {
        let form = CandidateForm::new("  ", "", "");
        let err = form.validate().unwrap_err();
        assert_eq!(
            err.errors(),
            &[
                FieldError::NameRequired,
                FieldError::IdRequired,
                FieldError::EmailRequired
            ]
        );
    }

    #[test]
    fn test_malformed_email() {
        for email in ["ana", "ana@x", "@x.com", "ana @x.com"] {
            let form = CandidateForm::new("Ana", "C100", email);
            let err = form.validate().unwrap_err();
            assert_eq!(err.errors(), &[FieldError::EmailInvalid], "email: {}", email);
        }
    }

    #[test]
    fn test_registered_candidate_keeps_both_ids() {
        let body = r#"{"id": 42, "name": "Ana", "candidate_id": "C100", "email": "ana@x.com", "created_at": "2024-01-01T00:00:00Z"}"#;
        let candidate: RegisteredCandidate = serde_json::from_str(body).unwrap();
        assert_eq!(candidate.id, 42);
        assert_eq!(candidate.candidate_id, "C100");
        assert_eq!(candidate.to_string(), "[候选人 C100#42]");

        // 缺少存储 id 的响应不可接受
        let missing_id = r#"{"name": "Ana", "candidate_id": "C100", "email": "ana@x.com"}"#;
        assert!(serde_json::from_str::<RegisteredCandidate>(missing_id).is_err());
    }
}
