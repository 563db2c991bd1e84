//! `JSONEachRow` decoding. One posting per line; a line that fails to decode
//! is skipped so the rest of the page survives.

use vacancy_core::types::Posting;

pub fn decode_rows(body: &[u8]) -> Vec<Posting> {
    let mut postings = Vec::new();
    for (line_no, line) in body.split(|b| *b == b'\n').enumerate() {
        if line.iter().all(u8::is_ascii_whitespace) {
            continue;
        }
        match serde_json::from_slice::<Posting>(line) {
            Ok(posting) => postings.push(posting),
            Err(err) => {
                tracing::warn!(line = line_no + 1, error = %err, "skipping undecodable row");
            }
        }
    }
    postings
}
