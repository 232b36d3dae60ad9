/// 测评后端客户端
///
/// 封装 `POST /register` 与 `POST /submit-responses` 两个接口
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use super::AssessmentBackend;
use crate::config::Config;
use crate::error::{AppError, AppResult, RemoteServiceError};
use crate::models::{CandidateForm, RegisteredCandidate, SubmissionPayload, SubmitResponse};

/// 测评后端客户端
#[derive(Clone)]
pub struct AssessmentClient {
    client: Client,
    base_url: String,
}

impl AssessmentClient {
    /// 创建新的后端客户端
    pub fn new(config: &Config) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| AppError::request_failed(&config.api_base_url, e))?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// 发送 JSON POST 请求并解析响应
    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, RemoteServiceError>
    where
        B: serde::Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let endpoint = self.endpoint(path);
        debug!("POST {}", endpoint);

        let response = self
            .client
            .post(&endpoint)
            .json(body)
            .send()
            .await
            .map_err(|e| RemoteServiceError::RequestFailed {
                endpoint: endpoint.clone(),
                source: e,
            })?;

        parse_response(&endpoint, response).await
    }
}

#[async_trait]
impl AssessmentBackend for AssessmentClient {
    async fn register(
        &self,
        form: &CandidateForm,
    ) -> Result<RegisteredCandidate, RemoteServiceError> {
        self.post_json("register", form).await
    }

    async fn submit_responses(
        &self,
        payload: &SubmissionPayload,
    ) -> Result<SubmitResponse, RemoteServiceError> {
        self.post_json("submit-responses", payload).await
    }
}

/// 检查状态码并把响应体解析为目标类型
async fn parse_response<T: DeserializeOwned>(
    endpoint: &str,
    response: Response,
) -> Result<T, RemoteServiceError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| RemoteServiceError::RequestFailed {
            endpoint: endpoint.to_string(),
            source: e,
        })?;

    debug!("{} 返回 {}: {}", endpoint, status, body);

    if !status.is_success() {
        return Err(RemoteServiceError::BadStatus {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
            message: extract_error_message(&body),
        });
    }

    decode_body(endpoint, &body)
}

/// 解析成功响应体，结构不符时拒绝
pub(crate) fn decode_body<T: DeserializeOwned>(
    endpoint: &str,
    body: &str,
) -> Result<T, RemoteServiceError> {
    serde_json::from_str(body).map_err(|e| RemoteServiceError::MalformedResponse {
        endpoint: endpoint.to_string(),
        reason: e.to_string(),
    })
}

/// 从失败响应体 `{ error }` 中提取错误描述
pub(crate) fn extract_error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("error")? {
        Value::String(s) => Some(s.clone()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}
