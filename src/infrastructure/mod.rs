pub mod corpus_store;

pub use corpus_store::{
    merge, parse_corpus, render_corpus, CorpusStore, FileCorpusStore, InMemoryCorpusStore,
    MergeOutcome, MergePolicy,
};
