//! Query parser — turns raw query text into [`SearchFilters`].
//!
//! Extraction is a pure function of the text and three tables fixed at
//! construction: the known-city forms, the experience pattern classes, and the
//! injected [`SynonymDictionary`].

pub mod city;
pub mod experience;

use crate::synonyms::SynonymDictionary;
use crate::types::SearchFilters;
use std::sync::Arc;

pub use city::CityMatcher;
pub use experience::ExperienceClassifier;

#[derive(Debug, Clone)]
pub struct QueryParser {
    synonyms: Arc<SynonymDictionary>,
    cities: CityMatcher,
    experience: ExperienceClassifier,
}

impl QueryParser {
    pub fn new(synonyms: Arc<SynonymDictionary>) -> Self {
        Self {
            synonyms,
            cities: CityMatcher::new(),
            experience: ExperienceClassifier::new(),
        }
    }

    pub fn parse(&self, text: &str) -> SearchFilters {
        SearchFilters::new(
            self.cities.find(text).map(str::to_string),
            self.synonyms.lookup(text).map(str::to_string),
            self.experience.classify(text),
        )
    }

    pub fn synonyms(&self) -> &SynonymDictionary {
        &self.synonyms
    }
}
