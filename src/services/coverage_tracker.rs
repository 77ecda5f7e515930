//! 兴趣覆盖率统计 - 业务能力层
//!
//! 只读：根据现有题库统计每个兴趣标签的题目数量与缺口

use std::collections::{BTreeMap, HashSet};

use crate::models::interest::catalogue_tags;
use crate::models::question::Question;

/// 每个兴趣标签的默认最低题目数
pub const DEFAULT_COVERAGE_TARGET: usize = 10;

/// 单个标签的覆盖情况
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagCoverage {
    pub count: usize,
    pub deficit: usize,
}

/// 覆盖率报告：标签 → 当前题目数
///
/// 临时计算，不持久化
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoverageReport {
    target: usize,
    tags: BTreeMap<String, TagCoverage>,
}

impl CoverageReport {
    pub fn target(&self) -> usize {
        self.target
    }

    /// 标签当前题目数，未出现过的标签为 0
    pub fn count(&self, tag: &str) -> usize {
        self.tags.get(tag).map_or(0, |c| c.count)
    }

    /// 标签缺口，未出现过的标签缺口等于目标值
    pub fn deficit(&self, tag: &str) -> usize {
        self.tags.get(tag).map_or(self.target, |c| c.deficit)
    }

    pub fn is_satisfied(&self, tag: &str) -> bool {
        self.deficit(tag) == 0
    }

    /// 按标签名排序遍历
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TagCoverage)> {
        self.tags.iter().map(|(tag, cov)| (tag.as_str(), cov))
    }

    /// 仍有缺口的标签
    pub fn deficits(&self) -> impl Iterator<Item = (&str, usize)> {
        self.iter()
            .filter(|(_, cov)| cov.deficit > 0)
            .map(|(tag, cov)| (tag, cov.deficit))
    }

    /// 所有标签缺口之和
    pub fn total_deficit(&self) -> usize {
        self.tags.values().map(|c| c.deficit).sum()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

/// 覆盖率统计器
#[derive(Debug, Clone)]
pub struct CoverageTracker {
    target: usize,
    known_tags: Vec<String>,
}

impl Default for CoverageTracker {
    fn default() -> Self {
        Self::new(DEFAULT_COVERAGE_TARGET)
    }
}

impl CoverageTracker {
    /// 以内置兴趣目录作为已知标签
    pub fn new(target: usize) -> Self {
        Self::with_known_tags(target, catalogue_tags())
    }

    /// 自定义已知标签
    pub fn with_known_tags(target: usize, known_tags: Vec<String>) -> Self {
        Self { target, known_tags }
    }

    pub fn target(&self) -> usize {
        self.target
    }

    /// 统计题库覆盖情况
    ///
    /// 一道题有 N 个标签就为 N 个计数器各加一。
    ///
    /// 兴趣标签按集合处理：同一题内重复出现的标签只计一次，
    /// 包括题库文件里已有的记录（新生成的题目在工厂中已去重）
    pub fn report(&self, corpus: &[Question]) -> CoverageReport {
        let mut counts: BTreeMap<String, usize> = self
            .known_tags
            .iter()
            .map(|tag| (tag.clone(), 0))
            .collect();

        for question in corpus {
            let mut seen: HashSet<&str> = HashSet::new();
            for tag in &question.interests {
                if seen.insert(tag.as_str()) {
                    *counts.entry(tag.clone()).or_insert(0) += 1;
                }
            }
        }

        let tags = counts
            .into_iter()
            .map(|(tag, count)| {
                let deficit = self.target.saturating_sub(count);
                (tag, TagCoverage { count, deficit })
            })
            .collect();

        CoverageReport {
            target: self.target,
            tags,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::question::{AnswerOption, OptionLabel};

    fn question(tags: &[&str]) -> Question {
        Question {
            question: "Q?".to_string(),
            options: OptionLabel::ALL
                .iter()
                .map(|label| AnswerOption {
                    label: *label,
                    text: label.to_string(),
                })
                .collect(),
            correct: OptionLabel::A,
            tip: String::new(),
            interests: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[test]
    fn three_tagged_questions_leave_deficit_of_seven() {
        let corpus = vec![question(&["Topic"]), question(&["Topic"]), question(&["Topic"])];
        let report = CoverageTracker::with_known_tags(10, vec![]).report(&corpus);

        assert_eq!(report.count("Topic"), 3);
        assert_eq!(report.deficit("Topic"), 7);
    }

    #[test]
    fn untouched_tag_has_full_deficit() {
        let report = CoverageTracker::new(10).report(&[]);
        assert_eq!(report.deficit("Whatever"), 10);
        // 目录中的兴趣即使没有题目也会出现在报告里
        assert_eq!(report.deficit("Psicologia"), 10);
        assert_eq!(report.len(), crate::models::INTEREST_CATALOGUE.len());
    }

    #[test]
    fn multi_tag_question_counts_once_per_tag() {
        let corpus = vec![question(&["A", "B", "A"]), question(&["B"])];
        let report = CoverageTracker::with_known_tags(2, vec![]).report(&corpus);

        assert_eq!(report.count("A"), 1);
        assert_eq!(report.count("B"), 2);
        assert!(report.is_satisfied("B"));
        assert_eq!(report.deficits().collect::<Vec<_>>(), vec![("A", 1)]);
        assert_eq!(report.total_deficit(), 1);
    }

    #[test]
    fn deficit_never_goes_negative() {
        let corpus: Vec<_> = (0..15).map(|_| question(&["Topic"])).collect();
        let report = CoverageTracker::with_known_tags(10, vec![]).report(&corpus);
        assert_eq!(report.count("Topic"), 15);
        assert_eq!(report.deficit("Topic"), 0);
    }

    #[test]
    fn report_does_not_touch_corpus() {
        let corpus = vec![question(&["Topic"])];
        let before = corpus.clone();
        let _ = CoverageTracker::default().report(&corpus);
        assert_eq!(corpus, before);
    }
}
