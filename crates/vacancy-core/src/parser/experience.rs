//! Experience classification.
//!
//! Four pattern classes are tried in a fixed order and the first class with a
//! match decides the bucket. Text matching no class yields `None`, so the
//! classifier is total.
//!
//! Numeric mentions follow Russian agreement: "1 год", "2 года", "3 года" sit
//! in the one-to-three class, while "3 лет" only appears after "от"/"более"
//! and belongs to the three-to-six class. Six years and above is the top
//! class.

use crate::types::Experience;
use regex::Regex;

const PATTERNS: &[(Experience, &[&str])] = &[
    (
        Experience::NoExperience,
        &[
            r"\bбез\s*опыта\b",
            r"\bнет\s+опыта\b",
            r"\bстаж[её]р\w*",
            r"\bстажировк\w*",
            r"\bначинающ\w*",
            r"\binterns?\b",
            r"\binternship\b",
            r"\btrainee\b",
            r"\bentry[\s-]*level\b",
            r"\bno\s+experience\b",
            r"\b0\s*(?:лет|years?)\b",
        ],
    ),
    (
        Experience::OneToThreeYears,
        &[
            r"\bджун\w*",
            r"\bjunior\b",
            r"\bмидл\w*",
            r"\bmiddle\b",
            r"\b1\s*[-–]\s*3\b",
            r"\bот\s*1\s*(?:года\s*)?до\s*3\b",
            r"\b1\s*(?:год|года|year)\b",
            r"\b[23]\s*(?:года|years)\b",
            r"\b(?:от|более|больше)\s*[12]\s*(?:год|года|лет|years?)\b",
            r"\b[12]\s*\+",
        ],
    ),
    (
        Experience::ThreeToSixYears,
        &[
            r"\bсеньор\w*",
            r"\bсиньор\w*",
            r"\bsenior\b",
            r"\b3\s*[-–]\s*6\b",
            r"\bот\s*3\s*(?:лет\s*)?до\s*6\b",
            r"\b(?:от|более|больше)\s*3\s*(?:лет|years)\b",
            r"\b4\s*(?:года|years)\b",
            r"\b5\s*(?:лет|years)\b",
            r"\b[3-5]\s*\+",
        ],
    ),
    (
        Experience::MoreThanSixYears,
        &[
            r"\b(?:более|больше|от)\s*6\b",
            r"\b6\s*\+",
            r"\b6\s*(?:лет|years)\b",
            r"\b(?:[7-9]|[1-9]\d)\s*(?:лет|года|years?)\b",
            r"\b(?:[7-9]|[1-9]\d)\s*\+",
            r"\bлид\b",
            r"\bтимлид\w*",
            r"\bтехлид\w*",
            r"\blead\b",
            r"\bteam\s*lead\b",
            r"\bteamlead\b",
            r"\bархитектор\w*",
            r"\barchitect\w*",
            r"\bprincipal\b",
        ],
    ),
];

#[derive(Debug, Clone)]
pub struct ExperienceClassifier {
    classes: Vec<(Experience, Regex)>,
}

impl ExperienceClassifier {
    pub fn new() -> Self {
        let classes = PATTERNS
            .iter()
            .map(|(bucket, patterns)| {
                let source = format!("(?i)(?:{})", patterns.join("|"));
                let regex = Regex::new(&source).expect("static experience pattern must compile");
                (*bucket, regex)
            })
            .collect();
        Self { classes }
    }

    pub fn classify(&self, text: &str) -> Option<Experience> {
        let text = text.to_lowercase();
        self.classes
            .iter()
            .find(|(_, regex)| regex.is_match(&text))
            .map(|(bucket, _)| *bucket)
    }
}

impl Default for ExperienceClassifier {
    fn default() -> Self {
        Self::new()
    }
}
