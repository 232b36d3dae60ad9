//! 测试会话状态机
//!
//! 页面只能单向前进：
//!
//! ```text
//! Registration → Instructions → Testing → Results
//! ```
//!
//! 会话只被一个流程持有，所有修改都经由 `&mut self`，不需要加锁。

use crate::error::SessionError;
use crate::models::{Answer, Question, RegisteredCandidate, SliderValue};
use crate::services::AnswerStore;

use super::result_view::ResultView;

/// 当前页面
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Registration,
    Instructions,
    Testing,
    Results,
}

impl Screen {
    pub fn as_str(self) -> &'static str {
        match self {
            Screen::Registration => "registration",
            Screen::Instructions => "instructions",
            Screen::Testing => "test",
            Screen::Results => "results",
        }
    }
}

/// "下一题"的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// 移到了新的题目
    Moved { index: usize },
    /// 最后一题已作答，进入结果页，需要提交
    Completed,
}

/// 一个候选人从注册到结果的完整会话
#[derive(Debug, Clone)]
pub struct Session {
    screen: Screen,
    candidate: Option<RegisteredCandidate>,
    questions: Vec<Question>,
    current_index: usize,
    slider_value: SliderValue,
    answers: AnswerStore,
    completed: bool,
    loading: bool,
    analysis: Option<String>,
}

impl Session {
    /// 以固定的题目列表创建会话，停在注册页
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            screen: Screen::Registration,
            candidate: None,
            questions,
            current_index: 0,
            slider_value: SliderValue::Neutral,
            answers: AnswerStore::new(),
            completed: false,
            loading: false,
            analysis: None,
        }
    }

    fn expect_screen(&self, screen: Screen, action: &'static str) -> Result<(), SessionError> {
        if self.screen == screen {
            Ok(())
        } else {
            Err(SessionError::InvalidTransition {
                screen: self.screen.as_str(),
                action,
            })
        }
    }

    // ========== 状态转换 ==========

    /// 注册成功：Registration → Instructions
    pub fn accept_registration(
        &mut self,
        candidate: RegisteredCandidate,
    ) -> Result<(), SessionError> {
        self.expect_screen(Screen::Registration, "accept_registration")?;
        self.candidate = Some(candidate);
        self.screen = Screen::Instructions;
        Ok(())
    }

    /// 开始测试：Instructions → Testing
    pub fn start_test(&mut self) -> Result<(), SessionError> {
        self.expect_screen(Screen::Instructions, "start_test")?;
        if self.questions.is_empty() {
            return Err(SessionError::NoQuestions);
        }
        self.current_index = 0;
        self.slider_value = self.stored_value(0);
        self.screen = Screen::Testing;
        Ok(())
    }

    /// 拖动滑块
    pub fn set_slider(&mut self, value: SliderValue) -> Result<(), SessionError> {
        self.expect_screen(Screen::Testing, "set_slider")?;
        self.slider_value = value;
        Ok(())
    }

    /// 保存当前题的答案并前进
    ///
    /// 最后一题作答后进入结果页并置为加载中，只会发生一次；
    /// 之后再调用会返回 `AlreadySubmitted`。
    pub fn commit_next(&mut self) -> Result<Advance, SessionError> {
        if self.screen == Screen::Results {
            return Err(SessionError::AlreadySubmitted);
        }
        self.expect_screen(Screen::Testing, "next")?;

        let question = &self.questions[self.current_index];
        self.answers
            .upsert(Answer::for_question(question, self.slider_value));

        if self.current_index + 1 < self.questions.len() {
            self.current_index += 1;
            self.slider_value = self.stored_value(self.current_index);
            Ok(Advance::Moved {
                index: self.current_index,
            })
        } else {
            self.screen = Screen::Results;
            self.loading = true;
            Ok(Advance::Completed)
        }
    }

    /// 回到上一题，滑块恢复为已保存的答案（没有则为中立）
    ///
    /// 已在第一题时什么也不做
    pub fn retreat(&mut self) -> Result<usize, SessionError> {
        self.expect_screen(Screen::Testing, "previous")?;
        if self.current_index > 0 {
            self.current_index -= 1;
            self.slider_value = self.stored_value(self.current_index);
        }
        Ok(self.current_index)
    }

    /// 写入结果文本，结束加载并标记完成
    pub fn finish(&mut self, summary: impl Into<String>) -> Result<(), SessionError> {
        self.expect_screen(Screen::Results, "finish")?;
        self.analysis = Some(summary.into());
        self.loading = false;
        self.completed = true;
        Ok(())
    }

    /// 丢弃本次会话，用同一套题重新开始
    pub fn reset(&self) -> Self {
        Self::new(self.questions.clone())
    }

    /// 标记外部请求进行中
    pub(crate) fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    fn stored_value(&self, index: usize) -> SliderValue {
        self.questions
            .get(index)
            .map(|q| self.answers.value_for(q.id))
            .unwrap_or_default()
    }

    // ========== 查询 ==========

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn candidate(&self) -> Option<&RegisteredCandidate> {
        self.candidate.as_ref()
    }

    /// 候选人存储 id
    pub fn candidate_id(&self) -> Option<i64> {
        self.candidate.as_ref().map(|c| c.id)
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current_index)
    }

    pub fn is_last_question(&self) -> bool {
        self.current_index + 1 == self.questions.len()
    }

    /// 进度百分比：round((index + 1) / N × 100)
    pub fn progress_percent(&self) -> u8 {
        if self.questions.is_empty() {
            return 0;
        }
        let ratio = (self.current_index + 1) as f64 / self.questions.len() as f64;
        (ratio * 100.0).round() as u8
    }

    pub fn slider_value(&self) -> SliderValue {
        self.slider_value
    }

    pub fn answers(&self) -> &AnswerStore {
        &self.answers
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn analysis(&self) -> Option<&str> {
        self.analysis.as_deref()
    }

    /// 结果页视图，不在结果页时为 `None`
    pub fn result_view(&self) -> Option<ResultView> {
        if self.screen != Screen::Results {
            return None;
        }
        Some(ResultView::from_state(self.loading, self.analysis.as_deref()))
    }
}
