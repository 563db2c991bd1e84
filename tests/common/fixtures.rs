//! Static dictionaries and corpora used across harnesses.

use super::builders::*;
use std::path::PathBuf;
use std::sync::Arc;
use vacancy_core::{Experience, Posting, QueryParser, SynonymDictionary};

/// A small dictionary covering the keywords the harnesses query for.
pub const SYNONYMS_JSON: &str = r#"{
    "python": ["питон", "пайтон", "python"],
    "java": ["java", "джава"],
    "javascript": ["javascript", "js"],
    "golang": ["golang", "гоу"],
    "аналитик": ["аналитик", "analyst"]
}"#;

pub fn dictionary() -> Arc<SynonymDictionary> {
    Arc::new(SynonymDictionary::from_json_str(SYNONYMS_JSON).unwrap())
}

pub fn parser() -> QueryParser {
    QueryParser::new(dictionary())
}

/// The dictionary shipped in `config/synonyms.json`.
pub fn shipped_dictionary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("config/synonyms.json")
}

/// Three non-Java postings in Минск plus `java` Java postings in Москва.
///
/// Identifiers: Минск 1..=3, Москва 100.. upwards.
pub fn minsk_corpus(java: i32) -> Vec<Posting> {
    let mut postings = vec![
        PostingBuilder::new(1, "Go Developer").city("Минск").skills("golang, grpc").minutes(1).build(),
        PostingBuilder::new(2, "Аналитик данных").city("Минск").skills("sql").minutes(2).build(),
        PostingBuilder::new(3, "Дизайнер").city("Минск").skills("figma").minutes(3).build(),
    ];
    postings.extend((0..java).map(|i| {
        PostingBuilder::new(100 + i, format!("Java Developer #{i}"))
            .city("Москва")
            .experience(Experience::ThreeToSixYears)
            .skills("java, spring")
            .minutes(100 + i64::from(i))
            .build()
    }));
    postings
}
