//! Test builders — ergonomic constructors for `Posting` values and stores.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use chrono::{DateTime, Duration, TimeZone, Utc};
use std::sync::Arc;
use vacancy_core::{Experience, MemoryStore, Posting};

// ---------------------------------------------------------------------------
// PostingBuilder
// ---------------------------------------------------------------------------

/// Base timestamp every builder offsets from.
pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap()
}

/// Fluent builder for [`Posting`] fixtures.
///
/// # Example
///
/// ```rust
/// let posting = PostingBuilder::new(7, "Java Developer")
///     .city("Минск")
///     .experience(Experience::ThreeToSixYears)
///     .skills("java, spring")
///     .minutes(30)
///     .build();
/// ```
pub struct PostingBuilder {
    posting: Posting,
}

impl PostingBuilder {
    pub fn new(id: i32, name: impl Into<String>) -> Self {
        Self {
            posting: Posting {
                id,
                city: "Москва".to_string(),
                name: name.into(),
                required_experience: String::new(),
                description: String::new(),
                salary_from: 0,
                salary_to: 0,
                published_at: epoch(),
                status: "open".to_string(),
                skills: String::new(),
            },
        }
    }

    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.posting.city = city.into();
        self
    }

    pub fn experience(mut self, experience: Experience) -> Self {
        self.posting.required_experience = experience.label().to_string();
        self
    }

    pub fn skills(mut self, skills: impl Into<String>) -> Self {
        self.posting.skills = skills.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.posting.description = description.into();
        self
    }

    pub fn salary(mut self, from: i32, to: i32) -> Self {
        self.posting.salary_from = from;
        self.posting.salary_to = to;
        self
    }

    /// Publication time as minutes after [`epoch`].
    pub fn minutes(mut self, minutes: i64) -> Self {
        self.posting.published_at = epoch() + Duration::minutes(minutes);
        self
    }

    pub fn build(self) -> Posting {
        self.posting
    }
}

// ---------------------------------------------------------------------------
// Convenience constructors
// ---------------------------------------------------------------------------

/// A posting titled `name` in `city`, published `id` minutes after the epoch
/// so higher identifiers are newer.
pub fn posting_in(id: i32, city: &str, name: &str) -> Posting {
    PostingBuilder::new(id, name)
        .city(city)
        .minutes(i64::from(id))
        .build()
}

pub fn memory_store(postings: impl IntoIterator<Item = Posting>) -> Arc<MemoryStore> {
    Arc::new(MemoryStore::from_postings(postings))
}

pub fn ids(postings: &[Posting]) -> Vec<i32> {
    postings.iter().map(|p| p.id).collect()
}
