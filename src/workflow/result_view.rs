//! 结果页视图
//!
//! 纯投影：加载中显示等待提示，完成后原样显示摘要（保留换行）

use std::fmt::Display;

/// 加载中提示
pub const PENDING_TEXT: &str = "Analyzing your responses...";

/// 结果页视图
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultView {
    /// 等待评分服务返回
    Pending,
    /// 摘要文本
    Summary(String),
}

impl ResultView {
    /// 由加载标记和分析文本得到视图
    pub fn from_state(loading: bool, analysis: Option<&str>) -> Self {
        match (loading, analysis) {
            (false, Some(text)) => ResultView::Summary(text.to_string()),
            _ => ResultView::Pending,
        }
    }
}

impl Display for ResultView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResultView::Pending => f.write_str(PENDING_TEXT),
            ResultView::Summary(text) => f.write_str(text),
        }
    }
}
