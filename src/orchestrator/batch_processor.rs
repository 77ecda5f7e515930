//! 应用入口 - 编排层
//!
//! ## 职责
//!
//! 1. **应用初始化**：写日志文件头、输出启动信息、创建题库存储
//! 2. **批量加载**：扫描规格目录，加载所有类别的题目规格
//! 3. **向下委托**：交给 GenerationDriver 完成生成、合并、写回
//! 4. **全局统计**：输出并记录本批的最终结果
//!
//! 单线程、同步、一次跑完：题库在开始时读一次，结束时写一次

use anyhow::Result;
use tracing::warn;

use crate::config::Config;
use crate::infrastructure::FileCorpusStore;
use crate::models::load_all_spec_groups;
use crate::orchestrator::generation_driver::{BatchReport, GenerationDriver};
use crate::services::{CoverageTracker, QuestionFactory, RandomShuffler};
use crate::utils::logging::{append_summary, init_log_file, log_groups_loaded, log_startup, print_final_stats};

/// 应用主结构
pub struct App {
    config: Config,
    store: FileCorpusStore,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Result<Self> {
        init_log_file(&config.output_log_file)?;

        log_startup(&config);

        let store = FileCorpusStore::new(config.corpus_path.clone());

        Ok(Self { config, store })
    }

    /// 运行一个批次
    pub fn run(&self) -> Result<BatchReport> {
        let groups = load_all_spec_groups(&self.config.spec_folder)?;
        let total_specs: usize = groups.iter().map(|g| g.questions.len()).sum();
        log_groups_loaded(groups.len(), total_specs);

        if groups.is_empty() {
            warn!("⚠️ 没有找到待处理的规格文件");
        }

        let driver = GenerationDriver::new(
            &self.store,
            QuestionFactory::new(self.config.distractor_policy),
            CoverageTracker::new(self.config.coverage_target),
        )
        .with_merge_policy(self.config.merge_policy);

        let mut shuffler = RandomShuffler::from_seed_option(self.config.shuffle_seed);
        let report = driver.run(&groups, &mut shuffler)?;

        print_final_stats(&report, &self.config.output_log_file);
        append_summary(&self.config.output_log_file, &report)?;

        Ok(report)
    }
}
