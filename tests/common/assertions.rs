//! Domain-specific assertion macros for vacancy-search harnesses.
//!
//! These wrap `pretty_assertions` and print the offending postings so a
//! failed ordering or filter check shows what the store actually returned.

// ---------------------------------------------------------------------------
// Result-set assertions
// ---------------------------------------------------------------------------

/// Assert the exact identifiers (in order) of a result page.
///
/// ```rust
/// assert_ids!(outcome.postings, [104, 103, 102]);
/// ```
#[macro_export]
macro_rules! assert_ids {
    ($postings:expr, [$($id:expr),* $(,)?]) => {{
        let actual: Vec<i32> = $postings.iter().map(|p| p.id).collect();
        let expected: Vec<i32> = vec![$($id),*];
        pretty_assertions::assert_eq!(actual, expected, "result identifiers differ");
    }};
}

/// Assert every posting in a page is in `city`.
#[macro_export]
macro_rules! assert_all_in_city {
    ($postings:expr, $city:expr) => {{
        let city: &str = $city;
        for posting in $postings.iter() {
            if posting.city != city {
                panic!(
                    "assert_all_in_city! failed: posting {} is in {:?}, expected {:?}",
                    posting.id, posting.city, city
                );
            }
        }
    }};
}

/// Assert a page is ordered newest first, identifier descending on ties.
#[macro_export]
macro_rules! assert_recency_ordered {
    ($postings:expr) => {{
        for pair in $postings.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            let ordered = a.published_at > b.published_at
                || (a.published_at == b.published_at && a.id > b.id);
            if !ordered {
                panic!(
                    "assert_recency_ordered! failed: {} ({}) precedes {} ({})",
                    a.id, a.published_at, b.id, b.published_at
                );
            }
        }
    }};
}

// ---------------------------------------------------------------------------
// Cascade assertions
// ---------------------------------------------------------------------------

/// Assert the ladder steps a search executed, in order.
///
/// ```rust
/// assert_steps!(outcome, [Relaxation::AsParsed, Relaxation::DropCity]);
/// ```
#[macro_export]
macro_rules! assert_steps {
    ($outcome:expr, [$($step:expr),* $(,)?]) => {{
        let actual: Vec<vacancy_core::Relaxation> =
            $outcome.attempts.iter().map(|a| a.step).collect();
        let expected: Vec<vacancy_core::Relaxation> = vec![$($step),*];
        pretty_assertions::assert_eq!(actual, expected, "executed ladder steps differ");
    }};
}
