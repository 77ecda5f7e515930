//! 题库存储 - 基础设施层
//!
//! 持有题库文件这一稀缺资源，只暴露 load / persist 能力；
//! merge 是纯函数，不做任何 I/O

use std::cell::RefCell;
use std::collections::HashSet;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::error::{ConfigError, CorpusFormatError, PersistenceError};
use crate::models::question::{Corpus, Question};

/// 题库存储能力
pub trait CorpusStore {
    /// 读取当前题库
    fn load(&self) -> Result<Corpus, CorpusFormatError>;

    /// 整体写回题库：要么完整写入，要么保持原状
    fn persist(&self, corpus: &[Question]) -> Result<(), PersistenceError>;
}

/// 合并时的判重策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergePolicy {
    /// 直接追加，不判重
    #[default]
    AppendAll,
    /// 题干（归一化后）已存在的新题跳过
    SkipExistingPrompts,
}

impl FromStr for MergePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "append" | "append-all" | "append_all" => Ok(MergePolicy::AppendAll),
            "skip-existing" | "skip_existing" | "dedup" => Ok(MergePolicy::SkipExistingPrompts),
            _ => Err(ConfigError::parse_failed(
                "MERGE_POLICY",
                s,
                "append | skip-existing",
            )),
        }
    }
}

/// 合并结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    pub corpus: Corpus,
    /// 每道新题是否被追加，与传入的新题一一对应
    pub accepted: Vec<bool>,
}

impl MergeOutcome {
    pub fn added(&self) -> usize {
        self.accepted.iter().filter(|&&a| a).count()
    }

    pub fn skipped(&self) -> usize {
        self.accepted.len() - self.added()
    }
}

/// 把新题追加到现有题库之后
///
/// 现有题目顺序与内容不变；`AppendAll` 下结果长度恒为两者之和
pub fn merge(existing: &[Question], new_questions: &[Question], policy: MergePolicy) -> MergeOutcome {
    let mut corpus = Vec::with_capacity(existing.len() + new_questions.len());
    corpus.extend_from_slice(existing);

    let accepted = match policy {
        MergePolicy::AppendAll => {
            corpus.extend_from_slice(new_questions);
            vec![true; new_questions.len()]
        }
        MergePolicy::SkipExistingPrompts => {
            let mut seen: HashSet<String> = existing.iter().map(Question::prompt_key).collect();
            new_questions
                .iter()
                .map(|q| {
                    let fresh = seen.insert(q.prompt_key());
                    if fresh {
                        corpus.push(q.clone());
                    } else {
                        debug!("跳过重复题目: {}", q.question);
                    }
                    fresh
                })
                .collect()
        }
    };

    MergeOutcome { corpus, accepted }
}

/// 解析题库 JSON 并校验每条记录的结构
pub fn parse_corpus(bytes: &[u8]) -> Result<Corpus, CorpusFormatError> {
    let corpus: Corpus =
        serde_json::from_slice(bytes).map_err(|source| CorpusFormatError::Malformed { source })?;

    for (index, question) in corpus.iter().enumerate() {
        question
            .check_shape()
            .map_err(|reason| CorpusFormatError::invalid_record(index, reason))?;
    }

    Ok(corpus)
}

/// 序列化题库：UTF-8 原样输出，2 空格缩进，无末尾换行
pub fn render_corpus(corpus: &[Question]) -> Result<Vec<u8>, PersistenceError> {
    serde_json::to_vec_pretty(corpus).map_err(|source| PersistenceError::Serialize { source })
}

/// 基于 JSON 文件的题库存储
#[derive(Debug, Clone)]
pub struct FileCorpusStore {
    path: PathBuf,
}

impl FileCorpusStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_err(&self, source: io::Error) -> PersistenceError {
        PersistenceError::WriteFailed {
            path: self.path.clone(),
            source,
        }
    }
}

impl CorpusStore for FileCorpusStore {
    fn load(&self) -> Result<Corpus, CorpusFormatError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!("⚠️ 题库文件不存在，从空题库开始: {}", self.path.display());
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(CorpusFormatError::ReadFailed {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let corpus = parse_corpus(&bytes)?;
        debug!("从 {} 读取 {} 道题目", self.path.display(), corpus.len());
        Ok(corpus)
    }

    fn persist(&self, corpus: &[Question]) -> Result<(), PersistenceError> {
        // 先在内存中完整序列化，失败时不碰磁盘
        let payload = render_corpus(corpus)?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).map_err(|e| self.write_err(e))?;

        // 临时文件与目标同目录，保证 rename 是原子的；出错时 drop 会删除临时文件
        let mut tmp = NamedTempFile::new_in(&dir).map_err(|e| self.write_err(e))?;
        // 临时文件默认 0600，沿用原文件权限，避免替换后其他用户无法读取
        if let Ok(meta) = fs::metadata(&self.path) {
            tmp.as_file()
                .set_permissions(meta.permissions())
                .map_err(|e| self.write_err(e))?;
        }
        tmp.write_all(&payload).map_err(|e| self.write_err(e))?;
        tmp.as_file().sync_all().map_err(|e| self.write_err(e))?;

        tmp.persist(&self.path)
            .map_err(|e| PersistenceError::ReplaceFailed {
                path: self.path.clone(),
                source: e.error,
            })?;

        debug!("已写入 {} 道题目到 {}", corpus.len(), self.path.display());
        Ok(())
    }
}

/// 内存题库存储，用于测试注入
///
/// 以序列化后的字节保存，load 与文件存储走同一套解析校验
#[derive(Debug, Default)]
pub struct InMemoryCorpusStore {
    bytes: RefCell<Option<Vec<u8>>>,
    persist_count: RefCell<usize>,
}

impl InMemoryCorpusStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 以已有题库初始化
    pub fn with_corpus(corpus: &[Question]) -> Result<Self, PersistenceError> {
        let store = Self::new();
        store.bytes.replace(Some(render_corpus(corpus)?));
        Ok(store)
    }

    /// 以任意原始字节初始化（可用于构造损坏的题库）
    pub fn with_raw(bytes: impl Into<Vec<u8>>) -> Self {
        let store = Self::new();
        store.bytes.replace(Some(bytes.into()));
        store
    }

    /// 当前保存的原始字节
    pub fn raw(&self) -> Option<Vec<u8>> {
        self.bytes.borrow().clone()
    }

    /// persist 成功的次数
    pub fn persist_count(&self) -> usize {
        *self.persist_count.borrow()
    }
}

impl CorpusStore for InMemoryCorpusStore {
    fn load(&self) -> Result<Corpus, CorpusFormatError> {
        match self.bytes.borrow().as_deref() {
            Some(bytes) => parse_corpus(bytes),
            None => Ok(Vec::new()),
        }
    }

    fn persist(&self, corpus: &[Question]) -> Result<(), PersistenceError> {
        let payload = render_corpus(corpus)?;
        self.bytes.replace(Some(payload));
        *self.persist_count.borrow_mut() += 1;
        Ok(())
    }
}
