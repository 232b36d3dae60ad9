use std::str::FromStr;

use crate::error::ConfigError;

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 注册 / 提交服务地址
    pub api_base_url: String,
    /// 分析查询（GraphQL）地址
    pub graphql_endpoint: String,
    /// GraphQL 管理密钥，为空时不发送该请求头
    pub graphql_admin_secret: String,
    /// 提交结果没有摘要时是否再查询分析服务
    pub analysis_enabled: bool,
    /// 题库文件
    pub question_bank_path: String,
    /// 每场测试的题目数量
    pub question_count: usize,
    /// 每题预估用时（秒），用于推算 started_at；负数在解析时即被拒绝
    pub seconds_per_question: u32,
    /// HTTP 请求超时（秒）
    pub request_timeout_secs: u64,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:5000".to_string(),
            graphql_endpoint: "http://localhost:8080/v1/graphql".to_string(),
            graphql_admin_secret: String::new(),
            analysis_enabled: true,
            question_bank_path: "questions.toml".to_string(),
            question_count: 15,
            seconds_per_question: 10,
            request_timeout_secs: 30,
            verbose_logging: false,
        }
    }
}

impl Config {
    /// 从环境变量读取配置，未设置的项使用默认值
    pub fn from_env() -> Result<Self, ConfigError> {
        let default = Self::default();
        Ok(Self {
            api_base_url: std::env::var("API_BASE_URL").unwrap_or(default.api_base_url),
            graphql_endpoint: std::env::var("GRAPHQL_ENDPOINT").unwrap_or(default.graphql_endpoint),
            graphql_admin_secret: std::env::var("GRAPHQL_ADMIN_SECRET")
                .unwrap_or(default.graphql_admin_secret),
            analysis_enabled: env_or("ANALYSIS_ENABLED", default.analysis_enabled)?,
            question_bank_path: std::env::var("QUESTION_BANK_PATH")
                .unwrap_or(default.question_bank_path),
            question_count: env_or("QUESTION_COUNT", default.question_count)?,
            seconds_per_question: env_or("SECONDS_PER_QUESTION", default.seconds_per_question)?,
            request_timeout_secs: env_or("REQUEST_TIMEOUT_SECS", default.request_timeout_secs)?,
            verbose_logging: env_or("VERBOSE_LOGGING", default.verbose_logging)?,
        })
    }
}

fn env_or<T: FromStr>(var_name: &str, default: T) -> Result<T, ConfigError> {
    match std::env::var(var_name) {
        Ok(value) => parse_var(var_name, &value),
        Err(_) => Ok(default),
    }
}

/// 解析单个环境变量的值
fn parse_var<T: FromStr>(var_name: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::EnvVarParseFailed {
            var_name: var_name.to_string(),
            value: value.to_string(),
            expected_type: std::any::type_name::<T>().to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_backend_layout() {
        let config = Config::default();
        assert_eq!(config.api_base_url, "http://localhost:5000");
        assert_eq!(config.question_count, 15);
        assert_eq!(config.seconds_per_question, 10);
        assert!(config.graphql_admin_secret.is_empty());
    }

    #[test]
    fn test_parse_var() {
        assert_eq!(parse_var::<usize>("QUESTION_COUNT", " 20 ").unwrap(), 20);
        assert!(parse_var::<bool>("VERBOSE_LOGGING", "true").unwrap());

        let err = parse_var::<usize>("QUESTION_COUNT", "many").unwrap_err();
        assert_eq!(
            err,
            ConfigError::EnvVarParseFailed {
                var_name: "QUESTION_COUNT".to_string(),
                value: "many".to_string(),
                expected_type: "usize".to_string(),
            }
        );
    }

    #[test]
    fn test_seconds_per_question_rejects_negative_and_oversized() {
        assert_eq!(
            parse_var::<u32>("SECONDS_PER_QUESTION", "12").unwrap(),
            12
        );

        for raw in ["-10", "9223372036854775807"] {
            let err = parse_var::<u32>("SECONDS_PER_QUESTION", raw).unwrap_err();
            assert_eq!(
                err,
                ConfigError::EnvVarParseFailed {
                    var_name: "SECONDS_PER_QUESTION".to_string(),
                    value: raw.to_string(),
                    expected_type: "u32".to_string(),
                }
            );
        }
    }
}
