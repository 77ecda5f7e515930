use std::path::PathBuf;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::infrastructure::MergePolicy;
use crate::services::{DistractorPolicy, DEFAULT_COVERAGE_TARGET};

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 题库 JSON 文件路径
    pub corpus_path: PathBuf,
    /// 题目规格 TOML 文件存放目录
    pub spec_folder: PathBuf,
    /// 每个兴趣标签的最低题目数
    pub coverage_target: usize,
    /// 打乱选项用的随机种子，未设置时每次运行取新种子
    pub shuffle_seed: Option<u64>,
    /// 合并时的判重策略
    pub merge_policy: MergePolicy,
    /// 干扰项多于 3 个时的处理策略
    pub distractor_policy: DistractorPolicy,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 运行日志文件
    pub output_log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            corpus_path: PathBuf::from("Scam/src/data/questions.json"),
            spec_folder: PathBuf::from("authored_specs"),
            coverage_target: DEFAULT_COVERAGE_TARGET,
            shuffle_seed: None,
            merge_policy: MergePolicy::default(),
            distractor_policy: DistractorPolicy::default(),
            verbose_logging: false,
            output_log_file: "output.txt".to_string(),
        }
    }
}

impl Config {
    /// 从环境变量读取配置，未设置的项使用默认值
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// 从任意键值来源读取配置
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let default = Self::default();
        Ok(Self {
            corpus_path: lookup("CORPUS_PATH").map(PathBuf::from).unwrap_or(default.corpus_path),
            spec_folder: lookup("SPEC_FOLDER").map(PathBuf::from).unwrap_or(default.spec_folder),
            coverage_target: parse_var(&lookup, "COVERAGE_TARGET", "usize")?.unwrap_or(default.coverage_target),
            shuffle_seed: parse_var(&lookup, "SHUFFLE_SEED", "u64")?.or(default.shuffle_seed),
            merge_policy: parse_var(&lookup, "MERGE_POLICY", "MergePolicy")?.unwrap_or(default.merge_policy),
            distractor_policy: parse_var(&lookup, "DISTRACTOR_POLICY", "DistractorPolicy")?
                .unwrap_or(default.distractor_policy),
            verbose_logging: parse_var(&lookup, "VERBOSE_LOGGING", "bool")?.unwrap_or(default.verbose_logging),
            output_log_file: lookup("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
        })
    }
}

/// 解析一个可选的环境变量，值存在但无法解析时报错
fn parse_var<F, T>(lookup: &F, var_name: &str, expected_type: &str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(var_name) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::parse_failed(var_name, value, expected_type)),
    }
}
