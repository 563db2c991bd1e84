//! Synonym dictionary — canonical role/skill keywords and their trigger phrases.
//!
//! The dictionary is loaded once at startup from a JSON object of the form
//! `{"python": ["питон", "пайтон", "python"]}` and shared read-only behind an
//! `Arc` afterwards.
//!
//! # Tie-break
//!
//! When several trigger phrases occur in the same text, the longest phrase
//! (in characters) wins. Equally long phrases resolve to the canonical keyword
//! that sorts first. All phrases are pre-sorted in that order at load time so
//! [`SynonymDictionary::lookup`] returns the first phrase contained in the
//! text. The result does not depend on the order of keys in the source file.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum SynonymError {
    #[error("failed to read synonym dictionary {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("synonym dictionary is not a JSON object of string arrays")]
    Parse(#[from] serde_json::Error),
    #[error("synonym dictionary contains an empty canonical keyword")]
    EmptyCanonical,
    #[error("canonical keyword {canonical:?} has an empty trigger phrase")]
    EmptyPhrase { canonical: String },
}

/// A trigger phrase pointing at its canonical entry.
#[derive(Debug, Clone)]
struct Trigger {
    phrase: String,
    /// Phrase length in characters, cached for sorting.
    chars: usize,
    canonical: usize,
}

#[derive(Debug, Clone, Default)]
pub struct SynonymDictionary {
    canonicals: Vec<String>,
    triggers: Vec<Trigger>,
}

impl SynonymDictionary {
    /// Read and validate the dictionary file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SynonymError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| SynonymError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let dict = Self::from_json_str(&raw)?;
        tracing::info!(
            path = %path.display(),
            keywords = dict.len(),
            phrases = dict.triggers.len(),
            "synonym dictionary loaded"
        );
        Ok(dict)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, SynonymError> {
        let entries: BTreeMap<String, Vec<String>> = serde_json::from_str(raw)?;
        Self::from_entries(entries)
    }

    /// Build from `(canonical, phrases)` pairs. Keys and phrases are trimmed
    /// and lowercased; duplicate canonical keys merge their phrases.
    pub fn from_entries<I, K, P, S>(entries: I) -> Result<Self, SynonymError>
    where
        I: IntoIterator<Item = (K, P)>,
        K: AsRef<str>,
        P: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut merged: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (canonical, phrases) in entries {
            let canonical = canonical.as_ref().trim().to_lowercase();
            if canonical.is_empty() {
                return Err(SynonymError::EmptyCanonical);
            }
            let slot = merged.entry(canonical.clone()).or_default();
            for phrase in phrases {
                let phrase = phrase.as_ref().trim().to_lowercase();
                if phrase.is_empty() {
                    return Err(SynonymError::EmptyPhrase { canonical });
                }
                if !slot.contains(&phrase) {
                    slot.push(phrase);
                }
            }
        }

        let mut canonicals = Vec::with_capacity(merged.len());
        let mut triggers = Vec::new();
        for (idx, (canonical, phrases)) in merged.into_iter().enumerate() {
            canonicals.push(canonical);
            triggers.extend(phrases.into_iter().map(|phrase| Trigger {
                chars: phrase.chars().count(),
                phrase,
                canonical: idx,
            }));
        }
        // `canonicals` is sorted, so comparing indices compares keywords.
        triggers.sort_by(|a, b| {
            b.chars
                .cmp(&a.chars)
                .then(a.canonical.cmp(&b.canonical))
                .then_with(|| a.phrase.cmp(&b.phrase))
        });

        Ok(Self {
            canonicals,
            triggers,
        })
    }

    /// Canonical keyword of the winning trigger phrase contained in `text`.
    pub fn lookup(&self, text: &str) -> Option<&str> {
        let text = text.to_lowercase();
        self.triggers
            .iter()
            .find(|t| text.contains(t.phrase.as_str()))
            .map(|t| self.canonicals[t.canonical].as_str())
    }

    /// Number of canonical keywords.
    pub fn len(&self) -> usize {
        self.canonicals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.canonicals.is_empty()
    }

    /// Canonical keywords in sorted order.
    pub fn canonicals(&self) -> impl Iterator<Item = &str> {
        self.canonicals.iter().map(String::as_str)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
