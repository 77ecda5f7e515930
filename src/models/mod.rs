pub mod interest;
pub mod loaders;
pub mod question;
pub mod spec;

pub use interest::INTEREST_CATALOGUE;
pub use loaders::{load_all_spec_groups, load_spec_group};
pub use question::{AnswerOption, Corpus, OptionLabel, Question};
pub use spec::{QuestionSpec, SpecGroup};
