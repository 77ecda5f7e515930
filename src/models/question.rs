use serde::{Deserialize, Serialize};
use std::fmt;

/// 选项标签，固定为 A/B/C/D
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OptionLabel {
    A,
    B,
    C,
    D,
}

impl OptionLabel {
    /// 按顺序排列的全部标签
    pub const ALL: [OptionLabel; 4] = [OptionLabel::A, OptionLabel::B, OptionLabel::C, OptionLabel::D];

    pub fn as_str(&self) -> &'static str {
        match self {
            OptionLabel::A => "A",
            OptionLabel::B => "B",
            OptionLabel::C => "C",
            OptionLabel::D => "D",
        }
    }
}

impl fmt::Display for OptionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 单个选项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub label: OptionLabel,
    pub text: String,
}

/// 题库中的一道题目
///
/// 字段顺序与题库 JSON 保持一致，序列化后可直接被答题应用读取
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub question: String,
    pub options: Vec<AnswerOption>,
    pub correct: OptionLabel,
    pub tip: String,
    pub interests: Vec<String>,
}

impl Question {
    /// 正确选项的文本
    pub fn correct_text(&self) -> Option<&str> {
        self.options
            .iter()
            .find(|opt| opt.label == self.correct)
            .map(|opt| opt.text.as_str())
    }

    /// 用于判重的题干键（去首尾空白并转小写）
    pub fn prompt_key(&self) -> String {
        prompt_key(&self.question)
    }

    /// 检查结构是否合法：4 个选项、标签 A-D 各一次、正确标签存在、至少一个兴趣标签
    pub fn check_shape(&self) -> Result<(), String> {
        if self.options.len() != OptionLabel::ALL.len() {
            return Err(format!("选项数量为 {}，应为 4", self.options.len()));
        }

        for label in OptionLabel::ALL {
            let count = self.options.iter().filter(|opt| opt.label == label).count();
            if count != 1 {
                return Err(format!("标签 {} 出现 {} 次，应恰好出现 1 次", label, count));
            }
        }

        if self.correct_text().is_none() {
            return Err(format!("正确答案标签 {} 不在选项中", self.correct));
        }

        if self.interests.is_empty() {
            return Err("兴趣标签列表为空".to_string());
        }

        Ok(())
    }
}

/// 题干归一化：去首尾空白并转小写
pub fn prompt_key(text: &str) -> String {
    text.trim().to_lowercase()
}

/// 题库：按插入顺序排列的题目序列
pub type Corpus = Vec<Question>;
