/// 分析查询客户端
///
/// 通过 GraphQL 查询 `get_test_analysis`，取回候选人的分析摘要
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use super::assessment_client::{decode_body, extract_error_message};
use super::AnalysisSource;
use crate::config::Config;
use crate::error::{AppError, AppResult, RemoteServiceError};

const GET_ANALYSIS_QUERY: &str = r#"
query GetAnalysis($candidate_id: Int!) {
  get_test_analysis(candidate_id: $candidate_id) {
    summary
  }
}
"#;

const ADMIN_SECRET_HEADER: &str = "x-hasura-admin-secret";

/// 分析查询客户端
#[derive(Clone)]
pub struct AnalysisClient {
    client: Client,
    endpoint: String,
    admin_secret: Option<String>,
}

impl AnalysisClient {
    /// 创建新的分析查询客户端
    pub fn new(config: &Config) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| AppError::request_failed(&config.graphql_endpoint, e))?;

        let admin_secret = Some(config.graphql_admin_secret.clone()).filter(|s| !s.is_empty());

        Ok(Self {
            client,
            endpoint: config.graphql_endpoint.clone(),
            admin_secret,
        })
    }
}

#[derive(Debug, Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
    variables: Value,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    #[serde(default)]
    data: Option<AnalysisData>,
    #[serde(default)]
    errors: Option<Vec<GraphQlErrorItem>>,
}

#[derive(Debug, Deserialize)]
struct AnalysisData {
    #[serde(default)]
    get_test_analysis: Option<AnalysisRow>,
}

#[derive(Debug, Deserialize)]
struct AnalysisRow {
    #[serde(default)]
    summary: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GraphQlErrorItem {
    message: String,
}

#[async_trait]
impl AnalysisSource for AnalysisClient {
    async fn fetch_summary(&self, candidate_id: i64) -> Result<Option<String>, RemoteServiceError> {
        debug!("查询分析结果，候选人 id: {}", candidate_id);

        let request = GraphQlRequest {
            query: GET_ANALYSIS_QUERY,
            variables: json!({ "candidate_id": candidate_id }),
        };

        let mut builder = self.client.post(&self.endpoint).json(&request);
        if let Some(secret) = &self.admin_secret {
            builder = builder.header(ADMIN_SECRET_HEADER, secret);
        }

        let request_failed = |e| RemoteServiceError::RequestFailed {
            endpoint: self.endpoint.clone(),
            source: e,
        };

        let response = builder.send().await.map_err(request_failed)?;
        let status = response.status();
        let body = response.text().await.map_err(request_failed)?;

        if !status.is_success() {
            return Err(RemoteServiceError::BadStatus {
                endpoint: self.endpoint.clone(),
                status: status.as_u16(),
                message: extract_error_message(&body),
            });
        }

        parse_analysis(&self.endpoint, &body)
    }
}

/// 解析 GraphQL 响应，`errors` 视为失败，缺失的摘要视为 `None`
fn parse_analysis(endpoint: &str, body: &str) -> Result<Option<String>, RemoteServiceError> {
    let response: GraphQlResponse = decode_body(endpoint, body)?;

    if let Some(errors) = response.errors.filter(|e| !e.is_empty()) {
        let message = errors
            .into_iter()
            .map(|e| e.message)
            .collect::<Vec<_>>()
            .join("; ");
        return Err(RemoteServiceError::GraphQl {
            endpoint: endpoint.to_string(),
            message,
        });
    }

    Ok(response
        .data
        .and_then(|d| d.get_test_analysis)
        .and_then(|row| row.summary)
        .filter(|s| !s.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENDPOINT: &str = "http://localhost:8080/v1/graphql";

    #[test]
    fn test_parse_analysis_summary() {
        let body = r#"{"data": {"get_test_analysis": {"summary": "Detail-oriented team player."}}}"#;
        assert_eq!(
            parse_analysis(ENDPOINT, body).unwrap(),
            Some("Detail-oriented team player.".to_string())
        );
    }

    #[test]
    fn test_parse_analysis_absent() {
        for body in [
            r#"{"data": {"get_test_analysis": null}}"#,
            r#"{"data": {"get_test_analysis": {"summary": "  "}}}"#,
            r#"{"data": null}"#,
            r#"{}"#,
        ] {
            assert_eq!(parse_analysis(ENDPOINT, body).unwrap(), None, "body: {}", body);
        }
    }

    #[test]
    fn test_parse_analysis_errors() {
        let body = r#"{"errors": [{"message": "field not found"}, {"message": "denied"}]}"#;
        let err = parse_analysis(ENDPOINT, body).unwrap_err();
        match err {
            RemoteServiceError::GraphQl { message, .. } => {
                assert_eq!(message, "field not found; denied")
            }
            other => panic!("unexpected error: {:?}", other),
        }

        let err = parse_analysis(ENDPOINT, "not json").unwrap_err();
        assert!(matches!(err, RemoteServiceError::MalformedResponse { .. }));
    }

    #[test]
    fn test_admin_secret_omitted_when_empty() {
        let client = AnalysisClient::new(&Config::default()).unwrap();
        assert!(client.admin_secret.is_none());

        let config = Config {
            graphql_admin_secret: "secret".to_string(),
            ..Config::default()
        };
        let client = AnalysisClient::new(&config).unwrap();
        assert_eq!(client.admin_secret.as_deref(), Some("secret"));
    }
}
