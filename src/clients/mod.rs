//! 外部服务客户端
//!
//! 负责所有与外部 HTTP 服务的交互：注册、提交评分、查询分析。
//! 上层只依赖这里的 trait，测试中可替换为内存实现。

pub mod analysis_client;
pub mod assessment_client;
#[cfg(test)]
pub(crate) mod test_support;

use async_trait::async_trait;

use crate::error::RemoteServiceError;
use crate::models::{CandidateForm, RegisteredCandidate, SubmissionPayload, SubmitResponse};

pub use analysis_client::AnalysisClient;
pub use assessment_client::AssessmentClient;

/// 注册与提交服务
#[async_trait]
pub trait AssessmentBackend: Send + Sync {
    /// 注册候选人，返回带存储 id 的记录
    async fn register(&self, form: &CandidateForm)
        -> Result<RegisteredCandidate, RemoteServiceError>;

    /// 提交作答并取得评分摘要
    async fn submit_responses(
        &self,
        payload: &SubmissionPayload,
    ) -> Result<SubmitResponse, RemoteServiceError>;
}

/// 分析查询服务
#[async_trait]
pub trait AnalysisSource: Send + Sync {
    /// 按候选人存储 id 查询分析摘要，没有记录时返回 `None`
    async fn fetch_summary(&self, candidate_id: i64) -> Result<Option<String>, RemoteServiceError>;
}
