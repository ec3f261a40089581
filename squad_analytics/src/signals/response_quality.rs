use serde::{Deserialize, Serialize};

const USEFUL_INDICATORS: &[&str] = &["aqui", "exemplo", "dica", "sugestão", "recomendo"];

/// Accented characters expected in Portuguese text (matched case-sensitively)
const PORTUGUESE_CHARS: &str = "áéíóúâêîôûãõç";

/// Replies shorter than this many words are flagged as too short
const MIN_WORDS: usize = 3;
/// The useful-information check only applies above this many words
const USEFUL_INFO_MIN_WORDS: usize = 10;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum QualityIssue {
    EmptyResponse,
    TooShort,
    MayLackUsefulInfo,
    MayNotBePortuguese,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResponseQuality {
    pub score: f64,
    pub issues: Vec<QualityIssue>,
}

/// Score an agent reply starting from 1.0 and subtracting a penalty per issue
pub fn assess_response_quality(message: &str) -> ResponseQuality {
    if message.is_empty() {
        return ResponseQuality {
            score: 0.0,
            issues: vec![QualityIssue::EmptyResponse],
        };
    }

    let mut issues = Vec::new();
    let mut score = 1.0;
    let word_count = message.split_whitespace().count();

    if word_count < MIN_WORDS {
        issues.push(QualityIssue::TooShort);
        score -= 0.3;
    }

    let message_lower = message.to_lowercase();
    let has_useful_info = USEFUL_INDICATORS
        .iter()
        .any(|indicator| message_lower.contains(indicator));
    if !has_useful_info && word_count > USEFUL_INFO_MIN_WORDS {
        issues.push(QualityIssue::MayLackUsefulInfo);
        score -= 0.1;
    }

    if !message.chars().any(|c| PORTUGUESE_CHARS.contains(c)) {
        issues.push(QualityIssue::MayNotBePortuguese);
        score -= 0.1;
    }

    ResponseQuality {
        score: f64::max(score, 0.0),
        issues,
    }
}
