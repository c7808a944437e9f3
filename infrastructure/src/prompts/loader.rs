//! JSON prompt-set loader
//!
//! A prompt file is a single JSON object whose string values are the
//! templates named by [`REQUIRED_KEYS`](debate_domain::REQUIRED_KEYS),
//! plus the optional `base_prompt` and `judge_meta_prompt`. Other keys
//! (legacy seed fields such as `source` or `debate_topic`) are ignored.

use debate_domain::{DebatePrompts, DomainError};
use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum PromptLoadError {
    #[error("Failed to read prompt file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Prompt file {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Prompt file {0} must contain a JSON object")]
    NotAnObject(PathBuf),

    #[error("Prompt file {path}: {source}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: DomainError,
    },
}

/// Read and validate a prompt set
pub fn load_prompts(path: &Path) -> Result<DebatePrompts, PromptLoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| PromptLoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_prompts(&text, path)
}

fn parse_prompts(text: &str, path: &Path) -> Result<DebatePrompts, PromptLoadError> {
    let value: Value = serde_json::from_str(text).map_err(|source| PromptLoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    let Value::Object(object) = value else {
        return Err(PromptLoadError::NotAnObject(path.to_path_buf()));
    };

    let prompts =
        DebatePrompts::from_json_object(&object).map_err(|source| PromptLoadError::Invalid {
            path: path.to_path_buf(),
            source,
        })?;
    debug!(
        path = %path.display(),
        base_prompt = prompts.base_prompt.is_some(),
        judge_meta_prompt = prompts.judge_meta_prompt.is_some(),
        "Loaded prompt set"
    );
    Ok(prompts)
}
