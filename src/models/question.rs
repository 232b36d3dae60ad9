use serde::{Deserialize, Serialize};

use super::answer::SliderValue;

/// 一道二选一滑块题
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// 唯一 id，同时是出题顺序
    pub id: i64,
    /// 左侧选项（负值方向）
    pub this_option: String,
    /// 右侧选项（正值方向）
    pub that_option: String,
    /// 维度分类
    pub category: String,
}

impl Question {
    /// 某个取值所倾向的选项文本
    pub fn chosen_option(&self, value: SliderValue) -> String {
        match value.as_i8() {
            v if v < 0 => self.this_option.clone(),
            v if v > 0 => self.that_option.clone(),
            _ => format!(
                "Neutral between: '{}' and '{}'",
                self.this_option, self.that_option
            ),
        }
    }

    /// 单条作答描述，例如 `- [Values] Strongly That: I prioritize structure and process`
    pub fn describe(&self, value: SliderValue) -> String {
        format!(
            "- [{}] {}: {}",
            self.category,
            value.label(),
            self.chosen_option(value)
        )
    }
}

/// 题库文件结构
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuestionBank {
    #[serde(default)]
    pub questions: Vec<Question>,
}
