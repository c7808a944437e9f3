//! Corpus readers turning input files into batch items

mod reader;

pub use reader::{CorpusError, LangPair, read_topic_corpus, read_translation_corpus};
