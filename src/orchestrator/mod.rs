//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责应用装配和页面调度，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `app` - 终端应用
//! - 管理应用生命周期（初始化、运行）
//! - 加载题库并抽题
//! - 创建评分服务客户端和分析客户端
//! - 按会话所在页面显示内容、读取输入
//!
//! ### `console` - 终端输入输出
//! - 对读写端做泛型，测试时用内存缓冲
//!
//! ## 层次关系
//!
//! ```text
//! app (页面循环)
//!     ↓
//! workflow::TestFlow (会话状态转换)
//!     ↓
//! services (能力层：注册 / 组装提交 / 答案存储)
//!     ↓
//! clients (基础设施：评分服务 / 分析服务)
//! ```
//!
//! ## 设计原则
//!
//! 1. **资源隔离**：只有编排层创建 HTTP 客户端
//! 2. **向下依赖**：编排层 → workflow → services → clients
//! 3. **无业务逻辑**：只做显示和输入解析，不做状态判断

pub mod app;
pub mod console;

// 重新导出主要类型
pub use app::App;
pub use console::Console;
