//! 题库抽题 - 业务能力层
//!
//! 按 id 升序取前 N 道，保证不同候选人的测试可比较

use crate::models::Question;

/// 按 id 升序（稳定排序）取前 `count` 道题
///
/// 题库不足 `count` 时返回全部题目，不报错
pub fn select_ordered(all_questions: &[Question], count: usize) -> Vec<Question> {
    let mut sorted = all_questions.to_vec();
    sorted.sort_by_key(|q| q.id);
    sorted.truncate(count);
    sorted
}
