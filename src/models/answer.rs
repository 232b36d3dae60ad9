use serde::{Deserialize, Serialize};

use super::question::Question;

/// 滑块取值，-2..=2，0 为中立
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
#[repr(i8)]
pub enum SliderValue {
    StronglyThis = -2,
    This = -1,
    #[default]
    Neutral = 0,
    That = 1,
    StronglyThat = 2,
}

impl SliderValue {
    /// 全部取值，按刻度从左到右
    pub const ALL: [SliderValue; 5] = [
        SliderValue::StronglyThis,
        SliderValue::This,
        SliderValue::Neutral,
        SliderValue::That,
        SliderValue::StronglyThat,
    ];

    pub fn as_i8(self) -> i8 {
        self as i8
    }

    /// 刻度标签
    pub fn label(self) -> &'static str {
        match self {
            SliderValue::StronglyThis => "Strongly This",
            SliderValue::This => "This",
            SliderValue::Neutral => "Neutral",
            SliderValue::That => "That",
            SliderValue::StronglyThat => "Strongly That",
        }
    }
}

impl TryFrom<i64> for SliderValue {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            -2 => Ok(SliderValue::StronglyThis),
            -1 => Ok(SliderValue::This),
            0 => Ok(SliderValue::Neutral),
            1 => Ok(SliderValue::That),
            2 => Ok(SliderValue::StronglyThat),
            other => Err(format!("滑块取值 {} 超出范围 [-2, 2]", other)),
        }
    }
}

impl From<SliderValue> for i64 {
    fn from(value: SliderValue) -> Self {
        value.as_i8() as i64
    }
}

impl std::str::FromStr for SliderValue {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let n: i64 = s
            .trim()
            .parse()
            .map_err(|_| format!("无法解析滑块取值: {}", s))?;
        SliderValue::try_from(n)
    }
}

impl std::fmt::Display for SliderValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.label(), self.as_i8())
    }
}

/// 候选人对一道题的作答，整条替换，不做局部修改
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub question_id: i64,
    pub value: SliderValue,
    /// 作答时从题目复制的分类
    pub category: String,
}

impl Answer {
    /// 为题目生成作答记录
    pub fn for_question(question: &Question, value: SliderValue) -> Self {
        Self {
            question_id: question.id,
            value,
            category: question.category.clone(),
        }
    }
}
