//! 题目工厂 - 业务能力层
//!
//! 把一份作者规格变成一道合法的 Question：
//! 校验 → 组装候选池 → 打乱 → 分配 A-D → 解析正确标签

use std::collections::HashSet;
use std::str::FromStr;

use tracing::debug;

use crate::error::{ConfigError, ValidationError};
use crate::models::question::{AnswerOption, OptionLabel, Question};
use crate::models::spec::QuestionSpec;
use crate::services::shuffler::OptionShuffler;

/// 每道题需要的干扰项数量
pub const REQUIRED_DISTRACTORS: usize = 3;

/// 干扰项多于 3 个时的处理策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DistractorPolicy {
    /// 取前 3 个，多余的丢弃
    #[default]
    FirstThree,
    /// 必须恰好 3 个
    ExactlyThree,
}

impl FromStr for DistractorPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "first-three" | "first_three" | "truncate" => Ok(DistractorPolicy::FirstThree),
            "exactly-three" | "exactly_three" | "strict" => Ok(DistractorPolicy::ExactlyThree),
            _ => Err(ConfigError::parse_failed(
                "DISTRACTOR_POLICY",
                s,
                "first-three | exactly-three",
            )),
        }
    }
}

/// 题目工厂
///
/// 无副作用：输出只取决于输入和注入的打乱器
#[derive(Debug, Clone, Copy, Default)]
pub struct QuestionFactory {
    policy: DistractorPolicy,
}

impl QuestionFactory {
    pub fn new(policy: DistractorPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> DistractorPolicy {
        self.policy
    }

    /// 由规格构建一道题目
    pub fn build(
        &self,
        spec: &QuestionSpec,
        shuffler: &mut dyn OptionShuffler,
    ) -> Result<Question, ValidationError> {
        let prompt = spec.question.as_str();

        if prompt.trim().is_empty() {
            return Err(empty_field(prompt, "question"));
        }
        if spec.correct.trim().is_empty() {
            return Err(empty_field(prompt, "correct"));
        }

        let interests = normalize_interests(&spec.interests);
        if interests.is_empty() {
            return Err(ValidationError::NoInterests {
                question: prompt.to_string(),
            });
        }

        let distractors = self.usable_distractors(spec)?;

        let mut pool: Vec<String> = Vec::with_capacity(OptionLabel::ALL.len());
        pool.push(spec.correct.clone());
        for text in distractors {
            if pool.iter().any(|existing| existing == text) {
                return Err(ValidationError::DuplicateOption {
                    question: prompt.to_string(),
                    text: text.clone(),
                });
            }
            pool.push(text.clone());
        }

        shuffler.shuffle(&mut pool);

        let options: Vec<AnswerOption> = OptionLabel::ALL
            .iter()
            .zip(pool)
            .map(|(label, text)| AnswerOption {
                label: *label,
                text,
            })
            .collect();

        // 候选池已去重，这里只会命中一次
        let correct = options
            .iter()
            .find(|opt| opt.text == spec.correct)
            .map(|opt| opt.label)
            .ok_or_else(|| ValidationError::DuplicateOption {
                question: prompt.to_string(),
                text: spec.correct.clone(),
            })?;

        debug!("生成题目: {} | 正确答案: {}", prompt, correct);

        Ok(Question {
            question: spec.question.clone(),
            options,
            correct,
            tip: spec.tip.clone(),
            interests,
        })
    }

    fn usable_distractors<'a>(&self, spec: &'a QuestionSpec) -> Result<&'a [String], ValidationError> {
        let found = spec.distractors.len();
        let too_few = found < REQUIRED_DISTRACTORS;
        let too_many = found > REQUIRED_DISTRACTORS && self.policy == DistractorPolicy::ExactlyThree;

        if too_few || too_many {
            return Err(ValidationError::DistractorCount {
                question: spec.question.clone(),
                found,
            });
        }

        if found > REQUIRED_DISTRACTORS {
            debug!(
                "题目 \"{}\" 提供了 {} 个干扰项，只使用前 {} 个",
                spec.question, found, REQUIRED_DISTRACTORS
            );
        }

        Ok(&spec.distractors[..REQUIRED_DISTRACTORS])
    }
}

fn empty_field(question: &str, field: &'static str) -> ValidationError {
    ValidationError::EmptyField {
        question: question.to_string(),
        field,
    }
}

/// 去掉空白标签，重复标签只保留第一次出现
fn normalize_interests(interests: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    interests
        .iter()
        .map(|tag| tag.trim())
        .filter(|tag| !tag.is_empty())
        .filter(|tag| seen.insert(tag.to_string()))
        .map(str::to_string)
        .collect()
}
