use serde::{Deserialize, Serialize};

/// 作者编写的题目规格（尚未打乱、尚未校验）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionSpec {
    pub question: String,
    pub correct: String,
    pub distractors: Vec<String>,
    pub tip: String,
    pub interests: Vec<String>,
}

impl QuestionSpec {
    pub fn new(
        question: impl Into<String>,
        correct: impl Into<String>,
        distractors: &[&str],
        tip: impl Into<String>,
        interests: &[&str],
    ) -> Self {
        Self {
            question: question.into(),
            correct: correct.into(),
            distractors: distractors.iter().map(|d| d.to_string()).collect(),
            tip: tip.into(),
            interests: interests.iter().map(|i| i.to_string()).collect(),
        }
    }
}

/// 按类别分组的一批题目规格，对应一个 TOML 文件
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecGroup {
    pub category: String,
    #[serde(default)]
    pub questions: Vec<QuestionSpec>,
    #[serde(skip_serializing, skip_deserializing)]
    pub file_path: Option<String>,
}

impl SpecGroup {
    pub fn new(category: impl Into<String>, questions: Vec<QuestionSpec>) -> Self {
        Self {
            category: category.into(),
            questions,
            file_path: None,
        }
    }

    pub fn with_file_path(mut self, file_path: String) -> Self {
        self.file_path = Some(file_path);
        self
    }
}
