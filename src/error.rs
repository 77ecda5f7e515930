use std::path::PathBuf;

use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 题目生成时的校验错误
    #[error("校验错误: {0}")]
    Validation(#[from] ValidationError),
    /// 题库文件格式错误
    #[error("题库格式错误: {0}")]
    CorpusFormat(#[from] CorpusFormatError),
    /// 题库写入错误
    #[error("持久化错误: {0}")]
    Persistence(#[from] PersistenceError),
    /// 题目规格文件加载错误
    #[error("规格加载错误: {0}")]
    SpecLoad(#[from] SpecLoadError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 题目规格校验错误
///
/// 在 QuestionFactory 构建题目时产生，整个批次随之中止
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// 干扰项数量不足（或在严格模式下过多）
    #[error("题目 \"{question}\" 需要 3 个干扰项，实际提供 {found} 个")]
    DistractorCount { question: String, found: usize },
    /// 选项文本重复，正确答案会变得含糊
    #[error("题目 \"{question}\" 的选项文本重复: \"{text}\"")]
    DuplicateOption { question: String, text: String },
    /// 必填文本为空
    #[error("题目 \"{question}\" 的字段 {field} 不能为空")]
    EmptyField {
        question: String,
        field: &'static str,
    },
    /// 没有任何兴趣标签
    #[error("题目 \"{question}\" 至少需要一个兴趣标签")]
    NoInterests { question: String },
}

/// 题库文件不符合 Question 结构
#[derive(Debug, Error)]
pub enum CorpusFormatError {
    /// 读取文件失败
    #[error("读取题库失败 ({path}): {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// JSON 无法解析为题目数组
    #[error("题库 JSON 解析失败: {source}")]
    Malformed {
        #[source]
        source: serde_json::Error,
    },
    /// 某条记录结构不合法
    #[error("第 {index} 条题目不合法: {reason}")]
    InvalidRecord { index: usize, reason: String },
}

/// 原子写入失败，原题库文件保持不变
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// 序列化失败
    #[error("题库序列化失败: {source}")]
    Serialize {
        #[source]
        source: serde_json::Error,
    },
    /// 临时文件写入失败
    #[error("写入临时文件失败 ({path}): {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// 替换目标文件失败
    #[error("替换题库文件失败 ({path}): {source}")]
    ReplaceFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// 题目规格（TOML）加载错误
#[derive(Debug, Error)]
pub enum SpecLoadError {
    /// 目录不存在
    #[error("目录不存在: {path}")]
    DirectoryNotFound { path: PathBuf },
    /// 读取失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// 配置错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
}

// ========== 便捷构造函数 ==========

impl CorpusFormatError {
    /// 创建记录不合法错误
    pub fn invalid_record(index: usize, reason: impl Into<String>) -> Self {
        CorpusFormatError::InvalidRecord {
            index,
            reason: reason.into(),
        }
    }
}

impl ConfigError {
    /// 创建环境变量解析失败错误
    pub fn parse_failed(
        var_name: impl Into<String>,
        value: impl Into<String>,
        expected_type: impl Into<String>,
    ) -> Self {
        ConfigError::EnvVarParseFailed {
            var_name: var_name.into(),
            value: value.into(),
            expected_type: expected_type.into(),
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
