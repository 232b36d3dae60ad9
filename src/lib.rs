//! # Slider Assessment
//!
//! 一个基于滑块作答的性格偏好测评终端应用
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 基础设施层（Clients）
//! - `clients/` - 持有 HTTP 客户端，只暴露能力
//! - `AssessmentClient` - 评分服务（注册、提交答案）
//! - `AnalysisClient` - GraphQL 分析摘要查询
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"
//! - `RegistrationService` - 表单校验 + 注册
//! - `SubmissionService` - 组装提交内容 + 提交 + 兜底摘要
//! - `AnswerStore` - 按题号覆盖写入的答案存储
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一次测评"的完整状态机
//! - `Session` - 注册 → 说明 → 作答 → 结果
//! - `TestFlow` - 用户操作到状态转换的翻译（含外部调用）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/app` - 应用装配和页面循环
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::{AnalysisClient, AnalysisSource, AssessmentBackend, AssessmentClient};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{Answer, CandidateForm, Question, RegisteredCandidate, SliderValue};
pub use orchestrator::{App, Console};
pub use services::{RegistrationService, SubmissionOutcome, SubmissionService};
pub use workflow::{Advance, ResultView, Screen, Session, TestFlow};
