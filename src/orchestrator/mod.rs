//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `batch_processor` - 应用入口
//! - 管理应用生命周期（初始化、运行）
//! - 加载规格目录（Vec<SpecGroup>）
//! - 输出全局统计信息
//!
//! ### `generation_driver` - 批次生成器
//! - 遍历每个类别的规格，调用 QuestionFactory
//! - merge → persist，生成失败时绝不写入
//! - 统计每个类别的新增数量与题库大小
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<SpecGroup>)
//!     ↓
//! generation_driver (处理一批 QuestionSpec)
//!     ↓
//! services (能力层：factory / coverage / shuffler)
//!     ↓
//! infrastructure (基础设施：CorpusStore)
//! ```

pub mod batch_processor;
pub mod generation_driver;

pub use batch_processor::App;
pub use generation_driver::{BatchReport, CategoryReport, GenerationDriver};
