//! Predicate builder — renders [`SearchFilters`] as a parameterised conjunction.
//!
//! The expression text only ever contains column names, operators and `?`
//! placeholders; every user-derived value travels in [`Predicate::args`], in
//! placeholder order. [`Predicate::matches`] evaluates the same conjunction
//! in-process so the in-memory store and SQL stores agree.

use crate::types::{Posting, SearchFilters};

/// Expression rendered when no filter is set.
pub const UNIVERSAL: &str = "1 = 1";

/// One conjunct of a [`Predicate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Clause {
    /// Exact equality on `city`.
    City,
    /// Case-insensitive substring on `name`, `skills` or `description`.
    Keyword,
    /// Exact equality on `required_experience`.
    Experience,
}

impl Clause {
    pub fn sql(self) -> &'static str {
        match self {
            Clause::City => "city = ?",
            Clause::Keyword => {
                "(lowerUTF8(name) LIKE ? OR lowerUTF8(skills) LIKE ? OR lowerUTF8(description) LIKE ?)"
            }
            Clause::Experience => "required_experience = ?",
        }
    }

    /// Number of placeholders in [`Clause::sql`].
    pub fn arity(self) -> usize {
        match self {
            Clause::Keyword => 3,
            Clause::City | Clause::Experience => 1,
        }
    }

    fn matches(self, posting: &Posting, args: &[String]) -> bool {
        match self {
            Clause::City => posting.city == args[0],
            Clause::Keyword => [&posting.name, &posting.skills, &posting.description]
                .iter()
                .zip(args)
                .any(|(column, pattern)| like(pattern, &column.to_lowercase())),
            Clause::Experience => posting.required_experience == args[0],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    clauses: Vec<Clause>,
    args: Vec<String>,
}

impl Predicate {
    /// The predicate that matches every posting.
    pub fn universal() -> Self {
        Self {
            clauses: Vec::new(),
            args: Vec::new(),
        }
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn is_universal(&self) -> bool {
        self.clauses.is_empty()
    }

    /// `?`-placeholder SQL for the conjunction.
    pub fn expression(&self) -> String {
        if self.clauses.is_empty() {
            return UNIVERSAL.to_string();
        }
        self.clauses
            .iter()
            .map(|c| c.sql())
            .collect::<Vec<_>>()
            .join(" AND ")
    }

    pub fn matches(&self, posting: &Posting) -> bool {
        let mut args = self.args.as_slice();
        self.clauses.iter().all(|clause| {
            let (own, rest) = args.split_at(clause.arity());
            args = rest;
            clause.matches(posting, own)
        })
    }

    fn push(&mut self, clause: Clause, arg: String) {
        self.clauses.push(clause);
        self.args.extend(std::iter::repeat(arg).take(clause.arity()));
    }
}

pub struct PredicateBuilder;

impl PredicateBuilder {
    pub fn build(filters: &SearchFilters) -> Predicate {
        let mut predicate = Predicate::universal();
        if let Some(city) = filters.city() {
            predicate.push(Clause::City, city.to_string());
        }
        if let Some(keyword) = filters.keyword() {
            predicate.push(Clause::Keyword, format!("%{}%", escape_like(&keyword.to_lowercase())));
        }
        if let Some(experience) = filters.experience() {
            predicate.push(Clause::Experience, experience.label().to_string());
        }
        predicate
    }
}

// ---------------------------------------------------------------------------
// LIKE helpers
// ---------------------------------------------------------------------------

/// Escape `LIKE` metacharacters so `value` matches literally.
pub fn escape_like(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Literal(char),
    AnyOne,
    AnyRun,
}

fn tokenize(pattern: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut chars = pattern.chars();
    while let Some(ch) = chars.next() {
        tokens.push(match ch {
            '%' => Token::AnyRun,
            '_' => Token::AnyOne,
            '\\' => Token::Literal(chars.next().unwrap_or('\\')),
            other => Token::Literal(other),
        });
    }
    tokens
}

/// SQL `LIKE` with `%`, `_` and backslash escapes, compared per character.
pub fn like(pattern: &str, text: &str) -> bool {
    let tokens = tokenize(pattern);
    let text: Vec<char> = text.chars().collect();
    // reachable[j]: the tokens consumed so far can match text[..j].
    let mut reachable = vec![false; text.len() + 1];
    reachable[0] = true;
    for token in tokens {
        let mut next = vec![false; text.len() + 1];
        match token {
            Token::AnyRun => {
                let mut seen = false;
                for j in 0..=text.len() {
                    seen |= reachable[j];
                    next[j] = seen;
                }
            }
            Token::AnyOne => {
                for j in 1..=text.len() {
                    next[j] = reachable[j - 1];
                }
            }
            Token::Literal(ch) => {
                for j in 1..=text.len() {
                    next[j] = reachable[j - 1] && text[j - 1] == ch;
                }
            }
        }
        reachable = next;
    }
    reachable[text.len()]
}
