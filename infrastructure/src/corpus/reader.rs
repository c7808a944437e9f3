//! Line-oriented corpus files
//!
//! Translation corpora hold one `source<TAB>reference` pair per line; topic
//! corpora hold one topic per line. Item ids are 0-based line indexes so
//! that resumed runs map lines to the same record files.

use debate_application::BatchItem;
use debate_domain::{TopicSeed, TranslationSeed};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug)]
pub enum CorpusError {
    #[error("Failed to read corpus {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid language pair '{0}' (expected <src>-<tgt>)")]
    InvalidLangPair(String),
}

/// Source and target language names, e.g. `Chinese-English`.
///
/// Names are used verbatim in prompts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LangPair {
    pub source: String,
    pub target: String,
}

impl FromStr for LangPair {
    type Err = CorpusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('-') {
            Some((source, target))
                if !source.trim().is_empty()
                    && !target.trim().is_empty()
                    && !target.contains('-') =>
            {
                Ok(Self {
                    source: source.trim().to_string(),
                    target: target.trim().to_string(),
                })
            }
            _ => Err(CorpusError::InvalidLangPair(s.to_string())),
        }
    }
}

fn read_lines(path: &Path) -> Result<Vec<String>, CorpusError> {
    let text = std::fs::read_to_string(path).map_err(|source| CorpusError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(text
        .lines()
        .map(|l| l.trim_end_matches('\r').to_string())
        .collect())
}

/// One translation debate per `source<TAB>reference` line.
///
/// Malformed lines are skipped with a warning; the ids of the remaining
/// lines are unaffected.
pub fn read_translation_corpus(
    path: &Path,
    lang_pair: &LangPair,
) -> Result<Vec<BatchItem>, CorpusError> {
    let mut items = Vec::new();
    for (index, line) in read_lines(path)?.iter().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let parts: Vec<&str> = line.split('\t').collect();
        let [source, reference] = parts.as_slice() else {
            warn!(
                "Line {} of {}: expected 2 tab-separated fields, found {}; skipping",
                index + 1,
                path.display(),
                parts.len()
            );
            continue;
        };
        match TranslationSeed::new(
            &lang_pair.source,
            &lang_pair.target,
            source.trim(),
            reference.trim(),
        ) {
            Ok(seed) => items.push(BatchItem::new(index.to_string(), seed)),
            Err(e) => warn!("Line {} of {}: {}; skipping", index + 1, path.display(), e),
        }
    }
    Ok(items)
}

/// One open-topic debate per non-empty line
pub fn read_topic_corpus(path: &Path) -> Result<Vec<BatchItem>, CorpusError> {
    Ok(read_lines(path)?
        .iter()
        .enumerate()
        .filter_map(|(index, line)| {
            TopicSeed::new(line.as_str())
                .ok()
                .map(|seed| BatchItem::new(index.to_string(), seed))
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use debate_domain::DebateMode;

    fn write(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_lang_pair_parse() {
        let pair: LangPair = "Chinese-English".parse().unwrap();
        assert_eq!(pair.source, "Chinese");
        assert_eq!(pair.target, "English");

        assert!("zh".parse::<LangPair>().is_err());
        assert!("zh-".parse::<LangPair>().is_err());
        assert!("a-b-c".parse::<LangPair>().is_err());
    }

    #[test]
    fn test_translation_corpus_skips_malformed_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "input.txt",
            "你好\tHello\r\nno tab here\n\n三\tthree\textra\n世界\tWorld\n",
        );
        let pair: LangPair = "Chinese-English".parse().unwrap();

        let items = read_translation_corpus(&path, &pair).unwrap();
        let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["0", "4"]);
        assert_eq!(items[0].seed.mode(), DebateMode::Translation);
        assert_eq!(items[0].seed.summary(), "你好");
        assert_eq!(items[1].seed.record_fields()["reference"], "World");
        assert_eq!(items[1].seed.record_fields()["tgt_lng"], "English");
    }

    #[test]
    fn test_topic_corpus() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "topics.txt", "Is water wet?\n\n  \nShould cats vote?\n");

        let items = read_topic_corpus(&path).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, "0");
        assert_eq!(items[1].id, "3");
        assert_eq!(items[1].seed.summary(), "Should cats vote?");
    }

    #[test]
    fn test_missing_corpus() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            read_topic_corpus(&dir.path().join("none.txt")),
            Err(CorpusError::Read { .. })
        ));
    }
}
