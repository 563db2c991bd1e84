//! SQL rendering for the ClickHouse HTTP interface.
//!
//! Predicates arrive with `?` placeholders. Each one is rewritten into a typed
//! server-side parameter `{pN:String}` whose value travels as the `param_pN`
//! URL parameter, so values are never spliced into statement text.

use vacancy_core::predicate::Predicate;
use vacancy_core::store::{StoreError, Window};

pub const COLUMNS: &str = "id, city, name, required_experience, description, salary_from, \
salary_to, toString(published_at) AS published_at, status, skills";

/// Statement text plus its `param_*` URL parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<(String, String)>,
}

/// Replace each `?` in `expression` with `{pN:String}`, pairing it with
/// `args[N]`.
pub fn bind_placeholders(expression: &str, args: &[String]) -> Result<Statement, StoreError> {
    let placeholders = expression.matches('?').count();
    if placeholders != args.len() {
        return Err(StoreError::Binding {
            placeholders,
            args: args.len(),
        });
    }

    let mut sql = String::with_capacity(expression.len() + placeholders * 12);
    let mut next = 0;
    for ch in expression.chars() {
        if ch == '?' {
            sql.push_str(&format!("{{p{next}:String}}"));
            next += 1;
        } else {
            sql.push(ch);
        }
    }

    let params = args
        .iter()
        .enumerate()
        .map(|(i, value)| (format!("param_p{i}"), value.clone()))
        .collect();
    Ok(Statement { sql, params })
}

pub fn select_postings(
    table: &str,
    predicate: &Predicate,
    window: Window,
) -> Result<Statement, StoreError> {
    let bound = bind_placeholders(&predicate.expression(), predicate.args())?;
    Ok(Statement {
        sql: format!(
            "SELECT {COLUMNS} FROM {table} WHERE {where_clause} \
             ORDER BY published_at DESC, id DESC LIMIT {limit} OFFSET {offset} \
             FORMAT JSONEachRow",
            where_clause = bound.sql,
            limit = window.limit,
            offset = window.offset,
        ),
        params: bound.params,
    })
}

pub fn create_table(table: &str) -> String {
    format!(
        "CREATE TABLE IF NOT EXISTS {table} (
    id Int32,
    city String,
    name String,
    required_experience String,
    description String,
    salary_from Int32,
    salary_to Int32,
    published_at DateTime64(3, 'UTC'),
    status String,
    skills String
) ENGINE = ReplacingMergeTree()
ORDER BY id"
    )
}

/// Accept `table` or `database.table` made of ASCII identifier characters.
pub fn is_identifier(name: &str) -> bool {
    let part_ok = |part: &str| {
        let mut chars = part.chars();
        matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
    };
    let parts: Vec<&str> = name.split('.').collect();
    parts.len() <= 2 && parts.iter().all(|p| part_ok(p))
}
