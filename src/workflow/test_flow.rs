//! 测试流程 - 流程层
//!
//! 核心职责：把用户操作翻译成会话状态转换，并在需要时调用外部服务
//!
//! 流程顺序：
//! 1. 注册 → 说明页
//! 2. 逐题作答（上一题 / 下一题）
//! 3. 最后一题作答 → 提交 → 结果页
//!
//! 外部调用期间会话处于加载中；调用结果无论成败都会让会话落到可展示的状态。

use tracing::{debug, info, warn};

use crate::error::AppResult;
use crate::models::{CandidateForm, SliderValue};
use crate::services::{RegistrationService, SubmissionOutcome, SubmissionService};
use crate::utils::logging;
use crate::workflow::session::{Advance, Screen, Session};

/// 测试流程
///
/// - 独占一个 `Session`
/// - 只依赖业务能力（services）
/// - 不关心输入输出方式
pub struct TestFlow {
    session: Session,
    registration: RegistrationService,
    submission: SubmissionService,
    outcome: Option<SubmissionOutcome>,
}

impl TestFlow {
    /// 创建新的测试流程
    pub fn new(
        session: Session,
        registration: RegistrationService,
        submission: SubmissionService,
    ) -> Self {
        Self {
            session,
            registration,
            submission,
            outcome: None,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// 最近一次提交的结果
    pub fn outcome(&self) -> Option<&SubmissionOutcome> {
        self.outcome.as_ref()
    }

    /// 注册候选人
    ///
    /// 失败时会话停留在注册页，错误交给调用方逐项提示
    pub async fn register(&mut self, form: &CandidateForm) -> AppResult<()> {
        if self.session.screen() != Screen::Registration {
            return Err(crate::error::AppError::invalid_transition(
                self.session.screen().as_str(),
                "register",
            ));
        }

        self.session.set_loading(true);
        let result = self.registration.register(form).await;
        self.session.set_loading(false);

        let candidate = result?;
        self.session.accept_registration(candidate)?;
        Ok(())
    }

    /// 开始测试
    pub fn start_test(&mut self) -> AppResult<()> {
        self.session.start_test()?;
        info!(
            "{} ▶️ 开始测试，共 {} 道题",
            self.ctx(),
            self.session.question_count()
        );
        Ok(())
    }

    /// 拖动滑块
    pub fn set_slider(&mut self, value: SliderValue) -> AppResult<()> {
        self.session.set_slider(value)?;
        Ok(())
    }

    /// 保存当前答案并进入下一题；最后一题时提交
    pub async fn next(&mut self) -> AppResult<Advance> {
        let advance = self.session.commit_next()?;

        match advance {
            Advance::Moved { index } => {
                debug!(
                    "{} 第 {}/{} 题",
                    self.ctx(),
                    index + 1,
                    self.session.question_count()
                );
            }
            Advance::Completed => self.submit().await?,
        }

        Ok(advance)
    }

    /// 回到上一题
    pub fn previous(&mut self) -> AppResult<usize> {
        let index = self.session.retreat()?;
        Ok(index)
    }

    /// 丢弃当前会话，回到注册页
    pub fn restart(&mut self) {
        if !self.session.is_completed() && !self.session.answers().is_empty() {
            warn!("{} ⚠️ 测试未完成即重新开始，已作答内容不会提交", self.ctx());
        }
        self.session = self.session.reset();
        self.outcome = None;
    }

    async fn submit(&mut self) -> AppResult<()> {
        for answer in self.session.answers().iter() {
            if let Some(q) = self
                .session
                .questions()
                .iter()
                .find(|q| q.id == answer.question_id)
            {
                debug!("{} {}", self.ctx(), q.describe(answer.value));
            }
        }

        let outcome = self
            .submission
            .complete(
                self.session.candidate_id(),
                self.session.question_count(),
                self.session.answers(),
            )
            .await;

        info!(
            "{} 📝 结果: {}",
            self.ctx(),
            logging::truncate_text(&outcome.summary, 80)
        );

        self.session.finish(outcome.summary.clone())?;
        logging::print_final_stats(
            self.session
                .candidate()
                .map(|c| c.candidate_id.as_str())
                .unwrap_or("-"),
            self.session.answers().len(),
            self.session.question_count(),
            outcome.degraded,
        );
        self.outcome = Some(outcome);

        Ok(())
    }

    /// 日志前缀
    fn ctx(&self) -> String {
        match self.session.candidate() {
            Some(c) => c.to_string(),
            None => "[候选人 -]".to_string(),
        }
    }
}
