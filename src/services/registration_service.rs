//! 注册服务 - 业务能力层
//!
//! 只负责"校验表单并注册候选人"能力，不关心页面流程

use std::sync::Arc;

use tracing::{error, info};

use crate::clients::AssessmentBackend;
use crate::error::AppResult;
use crate::models::{CandidateForm, RegisteredCandidate};

/// 注册服务
pub struct RegistrationService {
    backend: Arc<dyn AssessmentBackend>,
}

impl RegistrationService {
    pub fn new(backend: Arc<dyn AssessmentBackend>) -> Self {
        Self { backend }
    }

    /// 校验表单后调用注册接口
    ///
    /// # 返回
    /// - 校验失败：`AppError::Validation`，不发起请求
    /// - 远程失败：`AppError::Remote`，调用方应停留在注册页
    pub async fn register(&self, form: &CandidateForm) -> AppResult<RegisteredCandidate> {
        form.validate()?;

        let form = form.trimmed();
        info!("📝 正在注册候选人: {}", form.candidate_id);

        match self.backend.register(&form).await {
            Ok(candidate) => {
                info!("✓ 注册成功 {}", candidate);
                Ok(candidate)
            }
            Err(e) => {
                error!("❌ 注册失败 ({}): {}", form.candidate_id, e);
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::test_support::FakeBackend;
    use crate::error::{AppError, FieldError};

    #[tokio::test]
    async fn test_register_sends_trimmed_form() {
        let backend = Arc::new(FakeBackend::default());
        let service = RegistrationService::new(backend.clone());

        let candidate = service
            .register(&CandidateForm::new(" Ana ", "C100", "ana@x.com "))
            .await
            .unwrap();

        assert_eq!(candidate.id, 42);
        assert_eq!(candidate.candidate_id, "C100");
        assert_eq!(
            backend.registrations(),
            vec![CandidateForm::new("Ana", "C100", "ana@x.com")]
        );
    }

    #[tokio::test]
    async fn test_invalid_form_never_reaches_backend() {
        let backend = Arc::new(FakeBackend::default());
        let service = RegistrationService::new(backend.clone());

        let err = service
            .register(&CandidateForm::new("Ana", "C100", "not-an-email"))
            .await
            .unwrap_err();

        match err {
            AppError::Validation(v) => assert_eq!(v.errors(), &[FieldError::EmailInvalid]),
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(backend.registrations().is_empty());
    }

    #[tokio::test]
    async fn test_remote_failure_is_reported() {
        let service = RegistrationService::new(Arc::new(FakeBackend::failing_register()));
        let err = service
            .register(&CandidateForm::new("Ana", "C100", "ana@x.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Remote(_)));
    }
}
