//! Core types for vacancy-core.
//!
//! This module defines the data structures shared across every layer: the
//! stored [`Posting`], the closed [`Experience`] bucket enumeration, and the
//! [`SearchFilters`] value the parser produces and the cascade consumes.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Posting
// ---------------------------------------------------------------------------

/// A single stored job listing.
///
/// Field names match the columns written by the ingestion pipeline; the core
/// treats postings as read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Posting {
    pub id: i32,
    pub city: String,
    pub name: String,
    /// Experience label as stored, see [`Experience::label`].
    pub required_experience: String,
    pub description: String,
    /// Zero means unset.
    pub salary_from: i32,
    /// Zero means unset.
    pub salary_to: i32,
    #[serde(with = "published_at")]
    pub published_at: DateTime<Utc>,
    pub status: String,
    pub skills: String,
}

impl Posting {
    /// The stored experience label mapped back onto the bucket enumeration.
    pub fn experience(&self) -> Option<Experience> {
        Experience::from_label(&self.required_experience)
    }
}

/// Millisecond timestamps in the `YYYY-MM-DD HH:MM:SS.mmm` form produced by
/// `toString(DateTime64(3))`. RFC 3339 input is accepted as well.
pub mod published_at {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(&ts.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        super::parse_timestamp(&raw).ok_or_else(|| {
            serde::de::Error::custom(format!("invalid publication timestamp: {raw:?}"))
        })
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .ok()
}

// ---------------------------------------------------------------------------
// Experience
// ---------------------------------------------------------------------------

/// Required-experience bucket. "Not specified" is `Option::<Experience>::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Experience {
    NoExperience,
    OneToThreeYears,
    ThreeToSixYears,
    MoreThanSixYears,
}

impl Experience {
    pub const ALL: [Experience; 4] = [
        Experience::NoExperience,
        Experience::OneToThreeYears,
        Experience::ThreeToSixYears,
        Experience::MoreThanSixYears,
    ];

    /// Label stored in the `required_experience` column.
    pub fn label(self) -> &'static str {
        match self {
            Experience::NoExperience => "Нет опыта",
            Experience::OneToThreeYears => "От года до трех лет",
            Experience::ThreeToSixYears => "От 3 до 6 лет",
            Experience::MoreThanSixYears => "Более 6 лет",
        }
    }

    /// Inverse of [`Experience::label`]. Also accepts the headhunter spelling
    /// of the one-to-three bucket.
    pub fn from_label(label: &str) -> Option<Experience> {
        let label = label.trim();
        if label == "От 1 года до 3 лет" {
            return Some(Experience::OneToThreeYears);
        }
        Self::ALL.into_iter().find(|e| e.label() == label)
    }
}

impl std::fmt::Display for Experience {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// SearchFilters
// ---------------------------------------------------------------------------

/// Structured filters extracted from one query. Every field is optional; the
/// empty value matches every posting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SearchFilters {
    city: Option<String>,
    keyword: Option<String>,
    experience: Option<Experience>,
}

impl SearchFilters {
    pub fn new(
        city: Option<String>,
        keyword: Option<String>,
        experience: Option<Experience>,
    ) -> Self {
        Self {
            city: non_blank(city),
            keyword: non_blank(keyword),
            experience,
        }
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = non_blank(Some(city.into()));
        self
    }

    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = non_blank(Some(keyword.into()));
        self
    }

    pub fn with_experience(mut self, experience: Experience) -> Self {
        self.experience = Some(experience);
        self
    }

    pub fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }

    pub fn keyword(&self) -> Option<&str> {
        self.keyword.as_deref()
    }

    pub fn experience(&self) -> Option<Experience> {
        self.experience
    }

    pub fn is_empty(&self) -> bool {
        self.city.is_none() && self.keyword.is_none() && self.experience.is_none()
    }

    pub fn without_city(&self) -> Self {
        Self {
            city: None,
            ..self.clone()
        }
    }

    pub fn without_experience(&self) -> Self {
        Self {
            experience: None,
            ..self.clone()
        }
    }

    pub fn keyword_only(&self) -> Self {
        Self {
            keyword: self.keyword.clone(),
            ..Self::default()
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
