//! 批次生成器 - 编排层
//!
//! ## 职责
//!
//! 1. **读取题库**：通过 CorpusStore 加载现有题库
//! 2. **覆盖率统计**：生成前计算每个兴趣的缺口，标记已达标的类别
//! 3. **生成题目**：对每个规格调用 QuestionFactory
//! 4. **合并写回**：merge → persist，任何生成错误都在写入前中止
//! 5. **统计汇报**：每个类别新增多少题，题库最终大小
//!
//! 只统计不决策：某类别缺口已为零时只做标记，不会提前停止

use tracing::{debug, info, warn};

use crate::error::AppResult;
use crate::infrastructure::{merge, CorpusStore, MergePolicy};
use crate::models::question::Question;
use crate::models::spec::SpecGroup;
use crate::services::{CoverageReport, CoverageTracker, OptionShuffler, QuestionFactory};
use crate::utils::logging::{log_category, truncate_text};

/// 单个类别的处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryReport {
    pub category: String,
    /// 本类别的规格数
    pub specs: usize,
    /// 实际追加的题数
    pub added: usize,
    /// 因判重被跳过的题数
    pub skipped: usize,
    /// 生成前该类别标签的缺口已经为零
    pub already_satisfied: bool,
}

/// 一个批次的处理结果
#[derive(Debug, Clone)]
pub struct BatchReport {
    pub categories: Vec<CategoryReport>,
    pub corpus_before: usize,
    pub corpus_after: usize,
    /// 合并后的覆盖率
    pub coverage: CoverageReport,
    /// 是否写回了题库
    pub persisted: bool,
}

impl BatchReport {
    pub fn added(&self) -> usize {
        self.categories.iter().map(|c| c.added).sum()
    }

    pub fn skipped(&self) -> usize {
        self.categories.iter().map(|c| c.skipped).sum()
    }

    pub fn category(&self, name: &str) -> Option<&CategoryReport> {
        self.categories.iter().find(|c| c.category == name)
    }
}

/// 批次生成器
pub struct GenerationDriver<'a, S: CorpusStore> {
    store: &'a S,
    factory: QuestionFactory,
    tracker: CoverageTracker,
    merge_policy: MergePolicy,
}

impl<'a, S: CorpusStore> GenerationDriver<'a, S> {
    pub fn new(store: &'a S, factory: QuestionFactory, tracker: CoverageTracker) -> Self {
        Self {
            store,
            factory,
            tracker,
            merge_policy: MergePolicy::default(),
        }
    }

    pub fn with_merge_policy(mut self, policy: MergePolicy) -> Self {
        self.merge_policy = policy;
        self
    }

    /// 执行一个批次
    ///
    /// 所有题目都生成成功后才会写入；没有规格时不写入
    pub fn run(&self, groups: &[SpecGroup], shuffler: &mut dyn OptionShuffler) -> AppResult<BatchReport> {
        let existing = self.store.load()?;
        let corpus_before = existing.len();
        info!("📚 现有题库: {} 道题", corpus_before);

        let before = self.tracker.report(&existing);

        // 生成阶段：任何一个规格失败都直接返回，不会进入写入阶段
        let mut generated: Vec<Question> = Vec::new();
        let mut spans: Vec<(usize, usize)> = Vec::with_capacity(groups.len());
        for group in groups {
            log_category(&group.category, group.questions.len(), before.deficit(&group.category));
            if before.is_satisfied(&group.category) {
                warn!("⚠️ [{}] 已达到 {} 道题，仍会追加", group.category, before.target());
            }

            let start = generated.len();
            for spec in &group.questions {
                let question = self.factory.build(spec, shuffler)?;
                debug!(
                    "[{}] ✓ {} → {}",
                    group.category,
                    truncate_text(&question.question, 40),
                    question.correct
                );
                generated.push(question);
            }
            spans.push((start, generated.len()));
        }

        if generated.is_empty() {
            warn!("⚠️ 没有需要生成的题目，题库保持不变");
            return Ok(BatchReport {
                categories: build_category_reports(groups, &spans, &[], &before),
                corpus_before,
                corpus_after: corpus_before,
                coverage: before,
                persisted: false,
            });
        }

        let outcome = merge(&existing, &generated, self.merge_policy);
        if outcome.skipped() > 0 {
            info!("🔁 跳过 {} 道重复题目", outcome.skipped());
        }

        self.store.persist(&outcome.corpus)?;
        info!("💾 题库已写入: {} 道题", outcome.corpus.len());

        Ok(BatchReport {
            categories: build_category_reports(groups, &spans, &outcome.accepted, &before),
            corpus_before,
            corpus_after: outcome.corpus.len(),
            coverage: self.tracker.report(&outcome.corpus),
            persisted: true,
        })
    }
}

fn build_category_reports(
    groups: &[SpecGroup],
    spans: &[(usize, usize)],
    accepted: &[bool],
    before: &CoverageReport,
) -> Vec<CategoryReport> {
    groups
        .iter()
        .zip(spans)
        .map(|(group, &(start, end))| {
            let slice = accepted.get(start..end).unwrap_or(&[]);
            let added = slice.iter().filter(|&&a| a).count();
            CategoryReport {
                category: group.category.clone(),
                specs: group.questions.len(),
                added,
                skipped: slice.len() - added,
                already_satisfied: before.is_satisfied(&group.category),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AppError, ValidationError};
    use crate::infrastructure::InMemoryCorpusStore;
    use crate::models::spec::QuestionSpec;
    use crate::services::{FixedPermutation, RandomShuffler};

    fn spec(prompt: &str, interests: &[&str]) -> QuestionSpec {
        QuestionSpec::new(prompt, "Certo", &["E1", "E2", "E3"], "Dica", interests)
    }

    fn driver(store: &InMemoryCorpusStore) -> GenerationDriver<'_, InMemoryCorpusStore> {
        GenerationDriver::new(
            store,
            QuestionFactory::default(),
            CoverageTracker::with_known_tags(10, vec![]),
        )
    }

    #[test]
    fn batch_is_appended_and_reported_per_category() {
        let store = InMemoryCorpusStore::new();
        let groups = vec![
            SpecGroup::new("Psicologia", vec![spec("p1", &["Psicologia"]), spec("p2", &["Psicologia"])]),
            SpecGroup::new("Carros", vec![spec("c1", &["Carros", "Tecnologia"])]),
        ];

        let report = driver(&store)
            .run(&groups, &mut RandomShuffler::seeded(3))
            .unwrap();

        assert!(report.persisted);
        assert_eq!(report.corpus_before, 0);
        assert_eq!(report.corpus_after, 3);
        assert_eq!(report.category("Psicologia").unwrap().added, 2);
        assert_eq!(report.category("Carros").unwrap().added, 1);
        assert_eq!(report.coverage.deficit("Psicologia"), 8);
        assert_eq!(report.coverage.count("Tecnologia"), 1);

        let stored = store.load().unwrap();
        let prompts: Vec<_> = stored.iter().map(|q| q.question.as_str()).collect();
        assert_eq!(prompts, vec!["p1", "p2", "c1"]);
    }

    #[test]
    fn validation_error_aborts_before_persist() {
        let existing = driver_seed_corpus();
        let store = InMemoryCorpusStore::with_corpus(&existing).unwrap();
        let before = store.raw();

        let mut broken = spec("bad", &["Carros"]);
        broken.distractors.truncate(2);
        let groups = vec![SpecGroup::new("Carros", vec![spec("ok", &["Carros"]), broken])];

        let err = driver(&store)
            .run(&groups, &mut FixedPermutation::identity(4))
            .unwrap_err();

        assert!(matches!(
            err,
            AppError::Validation(ValidationError::DistractorCount { found: 2, .. })
        ));
        assert_eq!(store.persist_count(), 0);
        assert_eq!(store.raw(), before);
    }

    #[test]
    fn malformed_corpus_aborts_run() {
        let store = InMemoryCorpusStore::with_raw(r#"[{"question": "x"}]"#);
        let groups = vec![SpecGroup::new("Carros", vec![spec("ok", &["Carros"])])];

        let err = driver(&store)
            .run(&groups, &mut FixedPermutation::identity(4))
            .unwrap_err();

        assert!(matches!(err, AppError::CorpusFormat(_)));
        assert_eq!(store.persist_count(), 0);
    }

    #[test]
    fn rerun_duplicates_by_default_and_skips_with_policy() {
        let store = InMemoryCorpusStore::new();
        let groups = vec![SpecGroup::new("Carros", vec![spec("c1", &["Carros"])])];

        driver(&store).run(&groups, &mut RandomShuffler::seeded(1)).unwrap();
        let second = driver(&store).run(&groups, &mut RandomShuffler::seeded(1)).unwrap();
        assert_eq!(second.corpus_after, 2);

        let third = driver(&store)
            .with_merge_policy(MergePolicy::SkipExistingPrompts)
            .run(&groups, &mut RandomShuffler::seeded(1))
            .unwrap();
        assert_eq!(third.corpus_after, 2);
        assert_eq!(third.category("Carros").unwrap().skipped, 1);
        assert_eq!(third.added(), 0);
    }

    #[test]
    fn satisfied_category_is_flagged_not_stopped() {
        let existing: Vec<_> = (0..10).map(|i| question_for(i, "Carros")).collect();
        let store = InMemoryCorpusStore::with_corpus(&existing).unwrap();
        let groups = vec![SpecGroup::new("Carros", vec![spec("extra", &["Carros"])])];

        let report = driver(&store)
            .run(&groups, &mut FixedPermutation::identity(4))
            .unwrap();

        let carros = report.category("Carros").unwrap();
        assert!(carros.already_satisfied);
        assert_eq!(carros.added, 1);
        assert_eq!(report.corpus_after, 11);
    }

    #[test]
    fn empty_batch_does_not_persist() {
        let store = InMemoryCorpusStore::new();
        let report = driver(&store)
            .run(&[SpecGroup::new("Vazio", vec![])], &mut FixedPermutation::identity(4))
            .unwrap();

        assert!(!report.persisted);
        assert_eq!(report.categories[0].added, 0);
        assert_eq!(store.persist_count(), 0);
    }

    fn question_for(i: usize, tag: &str) -> Question {
        QuestionFactory::default()
            .build(&spec(&format!("q{}", i), &[tag]), &mut FixedPermutation::identity(4))
            .unwrap()
    }

    fn driver_seed_corpus() -> Vec<Question> {
        vec![question_for(0, "Carros"), question_for(1, "Moda")]
    }
}
