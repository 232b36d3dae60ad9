//! 答案存储 - 业务能力层
//!
//! 每道题最多一条答案，重复作答时原位替换

use crate::models::{Answer, SliderValue};

/// 答案存储，按插入顺序保存
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerStore {
    answers: Vec<Answer>,
}

impl AnswerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 写入答案：同一题已存在时原位替换，否则追加
    pub fn upsert(&mut self, answer: Answer) {
        match self
            .answers
            .iter_mut()
            .find(|a| a.question_id == answer.question_id)
        {
            Some(existing) => *existing = answer,
            None => self.answers.push(answer),
        }
    }

    /// 查找某题的答案
    pub fn lookup(&self, question_id: i64) -> Option<&Answer> {
        self.answers.iter().find(|a| a.question_id == question_id)
    }

    /// 某题当前的取值，未作答时为中立
    pub fn value_for(&self, question_id: i64) -> SliderValue {
        self.lookup(question_id)
            .map(|a| a.value)
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Answer> {
        self.answers.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer(question_id: i64, value: SliderValue) -> Answer {
        Answer {
            question_id,
            value,
            category: format!("cat {}", question_id),
        }
    }

    #[test]
    fn test_upsert_replaces_in_place() {
        let mut store = AnswerStore::new();
        store.upsert(answer(3, SliderValue::This));
        store.upsert(answer(1, SliderValue::That));
        store.upsert(answer(3, SliderValue::StronglyThat));

        assert_eq!(store.len(), 2);
        let order: Vec<i64> = store.iter().map(|a| a.question_id).collect();
        assert_eq!(order, vec![3, 1]);
        assert_eq!(store.lookup(3).unwrap().value, SliderValue::StronglyThat);
    }

    #[test]
    fn test_size_bounded_by_distinct_ids_and_lookup_is_latest() {
        let mut store = AnswerStore::new();
        let ids = [1, 2, 1, 3, 2, 2, 1, 3, 3, 1];
        for (round, id) in ids.iter().enumerate() {
            let value = SliderValue::ALL[round % SliderValue::ALL.len()];
            store.upsert(answer(*id, value));
            assert!(store.len() <= 3);
            assert_eq!(store.lookup(*id).unwrap().value, value);
        }
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_value_for_defaults_to_neutral() {
        let mut store = AnswerStore::new();
        assert!(store.is_empty());
        assert_eq!(store.value_for(7), SliderValue::Neutral);
        assert!(store.lookup(7).is_none());

        store.upsert(answer(7, SliderValue::StronglyThis));
        assert_eq!(store.value_for(7), SliderValue::StronglyThis);
    }
}
