use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};

use super::answer::{Answer, SliderValue};

/// 提交给评分服务的单题记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseRecord {
    pub question_id: i64,
    pub value: SliderValue,
    pub category: String,
}

impl From<&Answer> for ResponseRecord {
    fn from(answer: &Answer) -> Self {
        Self {
            question_id: answer.question_id,
            value: answer.value,
            category: answer.category.clone(),
        }
    }
}

/// `POST /submit-responses` 的请求体
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionPayload {
    /// 候选人存储 id（注册返回的数字 id）
    pub candidate_id: i64,
    pub responses: Vec<ResponseRecord>,
    #[serde(serialize_with = "serialize_iso_millis")]
    pub started_at: DateTime<Utc>,
    #[serde(serialize_with = "serialize_iso_millis")]
    pub ended_at: DateTime<Utc>,
}

/// 与浏览器 `toISOString()` 相同的格式：`2023-11-14T22:13:20.000Z`
fn serialize_iso_millis<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// `POST /submit-responses` 成功响应
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SubmitResponse {
    pub test_id: i64,
    pub summary: String,
    pub summary_id: i64,
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payload_wire_format() {
        let ended_at = DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap();
        let started_at = DateTime::<Utc>::from_timestamp(1_700_000_000 - 150, 0).unwrap();
        let payload = SubmissionPayload {
            candidate_id: 42,
            responses: vec![ResponseRecord {
                question_id: 1,
                value: SliderValue::This,
                category: "Cognitive Abilities".to_string(),
            }],
            started_at,
            ended_at,
        };

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            value,
            json!({
                "candidate_id": 42,
                "responses": [
                    {"question_id": 1, "value": -1, "category": "Cognitive Abilities"}
                ],
                "started_at": "2023-11-14T22:10:50.000Z",
                "ended_at": "2023-11-14T22:13:20.000Z"
            })
        );
    }

    #[test]
    fn test_submit_response_requires_summary_fields() {
        let ok: SubmitResponse = serde_json::from_value(json!({
            "message": "Responses and summary submitted successfully",
            "test_id": 7,
            "summary": "Calm and analytical.",
            "summary_id": 3
        }))
        .unwrap();
        assert_eq!(ok.test_id, 7);
        assert_eq!(ok.summary, "Calm and analytical.");

        let missing = serde_json::from_value::<SubmitResponse>(json!({"test_id": 7}));
        assert!(missing.is_err());
    }
}
