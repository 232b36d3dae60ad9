//! 提交服务 - 业务能力层
//!
//! 负责组装提交数据、调用评分服务，并在失败时给出兜底文案。
//! 无论远程结果如何都返回一段可展示的文本。

use std::sync::Arc;

use chrono::Duration;
use tracing::{debug, error, info, warn};

use crate::clients::{AnalysisSource, AssessmentBackend};
use crate::error::{IncompleteSessionError, RemoteServiceError};
use crate::models::{ResponseRecord, SubmissionPayload};
use crate::services::answer_store::AnswerStore;
use crate::utils::Clock;

/// 提交或分析查询失败时展示的文案
pub const FALLBACK_SUMMARY: &str = "Test completed. Unable to fetch detailed analysis.";

/// 提交成功但没有任何分析摘要时展示的文案
pub const DEFAULT_COMPLETION: &str = "Test completed successfully.";

/// 提交结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionOutcome {
    /// 结果页展示的文本
    pub summary: String,
    /// 评分服务返回的测试 id
    pub test_id: Option<i64>,
    /// 是否使用了兜底文案
    pub degraded: bool,
}

impl SubmissionOutcome {
    fn degraded(summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            test_id: None,
            degraded: true,
        }
    }
}

/// 提交服务
pub struct SubmissionService {
    backend: Arc<dyn AssessmentBackend>,
    analysis: Option<Arc<dyn AnalysisSource>>,
    clock: Clock,
    per_question: Duration,
}

impl SubmissionService {
    /// # 参数
    /// - `seconds_per_question`: 每题预估用时，用于推算 `started_at`
    pub fn new(backend: Arc<dyn AssessmentBackend>, seconds_per_question: u32) -> Self {
        Self {
            backend,
            analysis: None,
            clock: Clock::default(),
            per_question: Duration::seconds(i64::from(seconds_per_question)),
        }
    }

    /// 提交结果没有摘要时再查询分析服务
    pub fn with_analysis(mut self, analysis: Arc<dyn AnalysisSource>) -> Self {
        self.analysis = Some(analysis);
        self
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// 组装提交数据
    ///
    /// `started_at` 不是实测的开始时间，而是 `now - 题目数 × 每题用时` 推算出的近似值。
    /// 推算结果超出可表示的时间范围时返回 `DurationOutOfRange`。
    ///
    /// # 参数
    /// - `candidate_id`: 候选人存储 id
    /// - `question_count`: 本场测试题目数
    /// - `answers`: 答案存储，按插入顺序输出
    pub fn assemble(
        &self,
        candidate_id: Option<i64>,
        question_count: usize,
        answers: &AnswerStore,
    ) -> Result<SubmissionPayload, IncompleteSessionError> {
        let candidate_id = candidate_id.ok_or(IncompleteSessionError::MissingCandidate)?;
        if answers.is_empty() {
            return Err(IncompleteSessionError::NoAnswers);
        }

        let ended_at = self.clock.now();
        let started_at = i32::try_from(question_count)
            .ok()
            .and_then(|n| self.per_question.checked_mul(n))
            .and_then(|span| ended_at.checked_sub_signed(span))
            .ok_or(IncompleteSessionError::DurationOutOfRange)?;

        Ok(SubmissionPayload {
            candidate_id,
            responses: answers.iter().map(ResponseRecord::from).collect(),
            started_at,
            ended_at,
        })
    }

    /// 组装、提交并取得结果页文本
    ///
    /// 不返回错误：会话不完整时返回对应提示，远程失败时返回 [`FALLBACK_SUMMARY`]
    pub async fn complete(
        &self,
        candidate_id: Option<i64>,
        question_count: usize,
        answers: &AnswerStore,
    ) -> SubmissionOutcome {
        info!("📦 开始提交测试结果...");

        let payload = match self.assemble(candidate_id, question_count, answers) {
            Ok(payload) => payload,
            Err(e) => {
                error!("❌ 无法提交: {}", e);
                return SubmissionOutcome::degraded(e.to_string());
            }
        };

        debug!(
            "提交数据: candidate_id={}, responses={}, started_at={}, ended_at={}",
            payload.candidate_id,
            payload.responses.len(),
            payload.started_at,
            payload.ended_at
        );

        match self.submit(&payload).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("🚨 提交或查询分析失败: {}", e);
                SubmissionOutcome::degraded(FALLBACK_SUMMARY)
            }
        }
    }

    async fn submit(
        &self,
        payload: &SubmissionPayload,
    ) -> Result<SubmissionOutcome, RemoteServiceError> {
        let response = self.backend.submit_responses(payload).await?;
        info!(
            "✓ 提交成功: test_id={}, summary_id={}",
            response.test_id, response.summary_id
        );

        if !response.summary.trim().is_empty() {
            return Ok(SubmissionOutcome {
                summary: response.summary,
                test_id: Some(response.test_id),
                degraded: false,
            });
        }

        let Some(analysis) = &self.analysis else {
            warn!("⚠️ 评分服务未返回摘要");
            return Ok(SubmissionOutcome {
                summary: DEFAULT_COMPLETION.to_string(),
                test_id: Some(response.test_id),
                degraded: false,
            });
        };

        info!("🔍 评分服务未返回摘要，查询分析服务...");
        let summary = analysis
            .fetch_summary(payload.candidate_id)
            .await?
            .unwrap_or_else(|| DEFAULT_COMPLETION.to_string());

        Ok(SubmissionOutcome {
            summary,
            test_id: Some(response.test_id),
            degraded: false,
        })
    }
}
