//! 终端应用 - 编排层
//!
//! ## 职责
//!
//! 1. **应用初始化**：加载题库、抽题、创建客户端和服务
//! 2. **页面循环**：按会话所在页面显示内容、读取输入
//! 3. **错误呈现**：校验错误逐项提示，远程错误提示重试
//!
//! 不包含业务判断，所有状态转换都委托给 `TestFlow`。

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncWrite};
use tracing::{error, info, warn};

use crate::clients::{AnalysisClient, AssessmentClient};
use crate::config::Config;
use crate::error::AppError;
use crate::models::{load_question_bank, CandidateForm, SliderValue};
use crate::orchestrator::console::{self, Console};
use crate::services::{select_ordered, RegistrationService, SubmissionService};
use crate::utils::logging;
use crate::workflow::{ResultView, Screen, Session, TestFlow};

const INSTRUCTIONS: [&str; 5] = [
    "Each question shows two statements: 'This' and 'That'.",
    "Pick a value from -2 (strongly This) to 2 (strongly That); 0 is neutral.",
    "There are no right or wrong answers, answer honestly.",
    "You can go back to a previous question and change your answer.",
    "Your responses are submitted after the last question.",
];

const REGISTRATION_RETRY: &str = "Something went wrong. Please try again.";

/// 页面处理结果
enum Step {
    Continue,
    /// 输入结束或用户放弃
    Quit,
}

/// 应用主结构
pub struct App {
    config: Config,
    flow: TestFlow,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        logging::log_startup(&config);

        let all_questions = load_question_bank(Path::new(&config.question_bank_path))
            .await
            .context("加载题库失败")?;
        let questions = select_ordered(&all_questions, config.question_count);
        logging::log_questions_loaded(all_questions.len(), questions.len());

        let backend = Arc::new(AssessmentClient::new(&config)?);
        let mut submission = SubmissionService::new(backend.clone(), config.seconds_per_question);
        if config.analysis_enabled {
            submission = submission.with_analysis(Arc::new(AnalysisClient::new(&config)?));
        }

        let flow = TestFlow::new(
            Session::new(questions),
            RegistrationService::new(backend),
            submission,
        );

        Ok(Self::new(config, flow))
    }

    /// 使用已组装好的流程创建应用
    pub fn new(config: Config, flow: TestFlow) -> Self {
        Self { config, flow }
    }

    pub fn flow(&self) -> &TestFlow {
        &self.flow
    }

    /// 在标准输入输出上运行
    pub async fn run(&mut self) -> Result<()> {
        let mut console = console::stdio();
        self.run_with(&mut console).await
    }

    /// 运行页面循环，直到显示结果或输入结束
    pub async fn run_with<R, W>(&mut self, console: &mut Console<R, W>) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        loop {
            let step = match self.flow.session().screen() {
                Screen::Registration => self.registration_screen(console).await?,
                Screen::Instructions => self.instructions_screen(console).await?,
                Screen::Testing => self.test_screen(console).await?,
                Screen::Results => {
                    self.results_screen(console).await?;
                    return Ok(());
                }
            };

            if let Step::Quit = step {
                warn!("⚠️ 测试未完成，已放弃，不会提交任何答案");
                return Ok(());
            }
        }
    }

    async fn registration_screen<R, W>(&mut self, console: &mut Console<R, W>) -> Result<Step>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        console.say("\n=== Registration ===").await?;

        let Some(name) = console.prompt("Name: ").await? else {
            return Ok(Step::Quit);
        };
        let Some(candidate_id) = console.prompt("Candidate ID: ").await? else {
            return Ok(Step::Quit);
        };
        let Some(email) = console.prompt("Email: ").await? else {
            return Ok(Step::Quit);
        };

        let form = CandidateForm::new(name, candidate_id, email);
        match self.flow.register(&form).await {
            Ok(()) => {}
            Err(AppError::Validation(v)) => {
                for e in v.errors() {
                    console.say(&format!("  - {}: {}", e.field(), e)).await?;
                }
            }
            Err(e) => {
                error!("❌ 注册未完成: {}", e);
                console.say(REGISTRATION_RETRY).await?;
            }
        }

        Ok(Step::Continue)
    }

    async fn instructions_screen<R, W>(&mut self, console: &mut Console<R, W>) -> Result<Step>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let name = self
            .flow
            .session()
            .candidate()
            .map(|c| c.name.clone())
            .unwrap_or_default();

        console.say("\n=== Personality Assessment ===").await?;
        console.say(&format!("Welcome, {}!", name)).await?;
        console.say("Instructions:").await?;
        for (i, point) in INSTRUCTIONS.iter().enumerate() {
            console.say(&format!("  {}. {}", i + 1, point)).await?;
        }

        if console.prompt("Press Enter to start the test...").await?.is_none() {
            return Ok(Step::Quit);
        }

        if let Err(e) = self.flow.start_test() {
            // 没有题目时无法继续
            error!("❌ 无法开始测试: {}", e);
            console.say("No questions are available.").await?;
            return Ok(Step::Quit);
        }
        Ok(Step::Continue)
    }

    async fn test_screen<R, W>(&mut self, console: &mut Console<R, W>) -> Result<Step>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let session = self.flow.session();
        let Some(question) = session.current_question().cloned() else {
            return Ok(Step::Quit);
        };
        let current = session.slider_value();
        let is_last = session.is_last_question();

        console
            .say(&format!(
                "\nQuestion {} of {} ({}%)  [{}]",
                session.current_index() + 1,
                session.question_count(),
                session.progress_percent(),
                question.category
            ))
            .await?;
        console.say(&format!("  This: {}", question.this_option)).await?;
        console.say(&format!("  That: {}", question.that_option)).await?;
        console.say(&format!("  {}", render_scale(current))).await?;

        let action = if is_last { "submit" } else { "next" };
        let label = format!(
            "Value -2..2 (Enter = keep {}, p = previous, q = quit) to {}: ",
            current.label(),
            action
        );
        let Some(input) = console.prompt(&label).await? else {
            return Ok(Step::Quit);
        };

        match input.trim() {
            "q" | "Q" => return Ok(Step::Quit),
            "p" | "P" => {
                if self.flow.session().current_index() == 0 {
                    console.say("Already at the first question.").await?;
                }
                self.flow.previous()?;
                return Ok(Step::Continue);
            }
            "" => {}
            raw => match raw.parse::<SliderValue>() {
                Ok(value) => self.flow.set_slider(value)?,
                Err(_) => {
                    console.say("Please enter a value between -2 and 2.").await?;
                    return Ok(Step::Continue);
                }
            },
        }

        if is_last {
            console.say("\n=== Test Results ===").await?;
            console.say(&ResultView::Pending.to_string()).await?;
        }
        self.flow.next().await?;
        Ok(Step::Continue)
    }

    async fn results_screen<R, W>(&mut self, console: &mut Console<R, W>) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let session = self.flow.session();
        if let Some(view) = session.result_view() {
            console.say(&view.to_string()).await?;
        }

        console.say("\nYour responses:").await?;
        for answer in session.answers().iter() {
            if let Some(q) = session.questions().iter().find(|q| q.id == answer.question_id) {
                console.say(&q.describe(answer.value)).await?;
            }
        }

        info!(
            "✓ 结果已展示 (服务: {})",
            self.config.api_base_url
        );
        Ok(())
    }
}

/// 刻度显示，当前值用方括号标出
fn render_scale(current: SliderValue) -> String {
    let marks: Vec<String> = SliderValue::ALL
        .iter()
        .map(|v| {
            if *v == current {
                format!("[{}]", v.as_i8())
            } else {
                format!(" {} ", v.as_i8())
            }
        })
        .collect();
    format!("This {} That", marks.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_scale_marks_current_value() {
        assert_eq!(
            render_scale(SliderValue::Neutral),
            "This  -2   -1  [0]  1   2  That"
        );
        assert_eq!(
            render_scale(SliderValue::StronglyThis),
            "This [-2]  -1   0   1   2  That"
        );
    }
}
