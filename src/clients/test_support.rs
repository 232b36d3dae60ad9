//! 单元测试用的内存实现

use std::sync::Mutex;

use async_trait::async_trait;

use super::{AnalysisSource, AssessmentBackend};
use crate::error::RemoteServiceError;
use crate::models::{CandidateForm, RegisteredCandidate, SubmissionPayload, SubmitResponse};

fn server_error(endpoint: &str) -> RemoteServiceError {
    RemoteServiceError::BadStatus {
        endpoint: endpoint.to_string(),
        status: 500,
        message: Some("Server error".to_string()),
    }
}

/// 记录所有请求的假后端
pub struct FakeBackend {
    summary: String,
    fail_register: bool,
    fail_submit: bool,
    registrations: Mutex<Vec<CandidateForm>>,
    submissions: Mutex<Vec<SubmissionPayload>>,
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self {
            summary: "Balanced and pragmatic.".to_string(),
            fail_register: false,
            fail_submit: false,
            registrations: Mutex::new(Vec::new()),
            submissions: Mutex::new(Vec::new()),
        }
    }
}

impl FakeBackend {
    pub fn with_summary(summary: &str) -> Self {
        Self {
            summary: summary.to_string(),
            ..Self::default()
        }
    }

    pub fn failing_register() -> Self {
        Self {
            fail_register: true,
            ..Self::default()
        }
    }

    pub fn failing_submit() -> Self {
        Self {
            fail_submit: true,
            ..Self::default()
        }
    }

    pub fn registrations(&self) -> Vec<CandidateForm> {
        self.registrations.lock().unwrap().clone()
    }

    pub fn submissions(&self) -> Vec<SubmissionPayload> {
        self.submissions.lock().unwrap().clone()
    }
}

#[async_trait]
impl AssessmentBackend for FakeBackend {
    async fn register(
        &self,
        form: &CandidateForm,
    ) -> Result<RegisteredCandidate, RemoteServiceError> {
        self.registrations.lock().unwrap().push(form.clone());
        if self.fail_register {
            return Err(server_error("register"));
        }
        Ok(RegisteredCandidate {
            id: 42,
            name: form.name.clone(),
            candidate_id: form.candidate_id.clone(),
            email: form.email.clone(),
            created_at: None,
        })
    }

    async fn submit_responses(
        &self,
        payload: &SubmissionPayload,
    ) -> Result<SubmitResponse, RemoteServiceError> {
        self.submissions.lock().unwrap().push(payload.clone());
        if self.fail_submit {
            return Err(server_error("submit-responses"));
        }
        Ok(SubmitResponse {
            test_id: 1,
            summary: self.summary.clone(),
            summary_id: 1,
            message: None,
        })
    }
}

/// 假分析服务
pub struct FakeAnalysis {
    summary: Option<String>,
    fail: bool,
    queried: Mutex<Vec<i64>>,
}

impl FakeAnalysis {
    pub fn returning(summary: Option<&str>) -> Self {
        Self {
            summary: summary.map(str::to_string),
            fail: false,
            queried: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            summary: None,
            fail: true,
            queried: Mutex::new(Vec::new()),
        }
    }

    pub fn queried(&self) -> Vec<i64> {
        self.queried.lock().unwrap().clone()
    }
}

#[async_trait]
impl AnalysisSource for FakeAnalysis {
    async fn fetch_summary(&self, candidate_id: i64) -> Result<Option<String>, RemoteServiceError> {
        self.queried.lock().unwrap().push(candidate_id);
        if self.fail {
            return Err(server_error("graphql"));
        }
        Ok(self.summary.clone())
    }
}
