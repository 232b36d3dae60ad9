//! 时钟抽象
//!
//! 提交时间戳依赖"当前时间"，测试中用固定时钟保证结果可复现

use chrono::{DateTime, Utc};

/// 时钟
#[derive(Debug, Clone, Copy, Default)]
pub enum Clock {
    /// 系统时间
    #[default]
    System,
    /// 固定时间
    Fixed(DateTime<Utc>),
}

impl Clock {
    /// 固定在指定时间的时钟
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self::Fixed(at)
    }

    /// 当前时间
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Fixed(t) => *t,
        }
    }
}

/// 测试用的固定时间戳 (2023-11-14T22:13:20Z)
pub const FIXED_TEST_TIMESTAMP: i64 = 1_700_000_000;

/// 测试用的固定时钟
pub fn fixed_clock() -> Clock {
    Clock::fixed(DateTime::<Utc>::from_timestamp(FIXED_TEST_TIMESTAMP, 0).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_is_stable() {
        let clock = fixed_clock();
        let first = clock.now();
        assert_eq!(first, clock.now());
        assert_eq!(first.timestamp(), FIXED_TEST_TIMESTAMP);
        assert!(Clock::System.now() > first);
    }
}
