//! # Scam Quiz Corpus
//!
//! 为反诈骗答题应用生成并合并选择题题库
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有题库文件，只暴露 load / persist 能力
//! - `FileCorpusStore` - 原子写入的 JSON 题库
//! - `InMemoryCorpusStore` - 测试用的内存题库
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 只处理单个题目或只读统计
//! - `QuestionFactory` - 规格 → 打乱选项的 Question
//! - `CoverageTracker` - 每个兴趣标签的题数与缺口
//! - `OptionShuffler` - 可注入、可固定种子的选项打乱
//!
//! ### ③ 编排层（Orchestration）
//! - `orchestrator/generation_driver` - 一个批次：生成 → 合并 → 写回
//! - `orchestrator/batch_processor` - 应用入口，加载规格目录并汇总统计
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::{merge, CorpusStore, FileCorpusStore, InMemoryCorpusStore, MergePolicy};
pub use models::{AnswerOption, OptionLabel, Question, QuestionSpec, SpecGroup};
pub use orchestrator::{App, BatchReport, GenerationDriver};
pub use services::{CoverageReport, CoverageTracker, QuestionFactory, RandomShuffler};
