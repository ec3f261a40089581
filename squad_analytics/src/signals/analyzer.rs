//! Message Signals - sentiment, intent, complexity and entities for a single
//! inbound message.
//!
//! Every signal is computed from deterministic lexical rules over the raw
//! message text. Lexicons are Portuguese, matching the audience the agents serve.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use super::entities::{extract_entities, Entity};
use super::lexical::{count_matches, score_categories, LexicalCategory};

// ============================================================================
// Lexicons
// ============================================================================

const POSITIVE_PATTERNS: &[&str] = &[
    "obrigado",
    "perfeito",
    "excelente",
    "ótimo",
    "maravilhoso",
    "fantástico",
];

const NEGATIVE_PATTERNS: &[&str] = &[
    "ruim",
    "péssimo",
    "terrível",
    "horrível",
    "não gostei",
    "problema",
];

const NEUTRAL_PATTERNS: &[&str] = &["ok", "entendi", "certo", "beleza", "tudo bem"];

/// Declaration order is the tie-break order: the first category holding the
/// highest score wins.
static INTENT_CATEGORIES: [LexicalCategory<IntentLabel>; 6] = [
    LexicalCategory::new(
        IntentLabel::Question,
        &["como", "quando", "onde", "por que", "o que", "qual", "?"],
    ),
    LexicalCategory::new(
        IntentLabel::Request,
        &["preciso", "quero", "gostaria", "pode", "poderia"],
    ),
    LexicalCategory::new(
        IntentLabel::Complaint,
        &["reclamação", "problema", "erro", "não funciona", "bug"],
    ),
    LexicalCategory::new(
        IntentLabel::Compliment,
        &["parabéns", "muito bom", "excelente", "ótimo trabalho"],
    ),
    LexicalCategory::new(
        IntentLabel::Greeting,
        &["oi", "olá", "bom dia", "boa tarde", "boa noite"],
    ),
    LexicalCategory::new(
        IntentLabel::Goodbye,
        &["tchau", "até logo", "obrigado", "valeu"],
    ),
];

/// Runs of sentence terminators collapse into a single boundary
static SENTENCE_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+").expect("valid sentence boundary pattern"));

/// Words longer than this many characters count as complex
const COMPLEX_WORD_MIN_CHARS: usize = 8;

/// Number of sentiment lexicons loaded, reported by health checks
pub const PATTERNS_LOADED: usize = 3;

// ============================================================================
// Signal Types
// ============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SentimentResult {
    pub label: SentimentLabel,
    /// Share of lexicon hits held by the winning label (0.0-1.0)
    pub score: f64,
    pub confidence: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum IntentLabel {
    Question,
    Request,
    Complaint,
    Compliment,
    Greeting,
    Goodbye,
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IntentResult {
    pub label: IntentLabel,
    pub confidence: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ComplexityLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComplexityResult {
    pub level: ComplexityLevel,
    pub avg_words_per_sentence: f64,
    /// Fraction of words longer than 8 characters
    pub complexity_ratio: f64,
    pub complex_words_count: usize,
}

/// Combined signals for a single inbound message
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MessageAnalysis {
    pub sentiment: SentimentResult,
    pub intent: IntentResult,
    pub complexity: ComplexityResult,
    pub entities: Vec<Entity>,
    pub word_count: usize,
    pub character_count: usize,
}

// ============================================================================
// Message Analyzer
// ============================================================================

/// Trait for analyzing the signals of one message
pub trait MessageAnalyzer {
    fn analyze_message(&self, message: &str) -> MessageAnalysis;
}

/// Lexicon-based implementation of [`MessageAnalyzer`]
#[derive(Debug, Clone, Default)]
pub struct LexicalMessageAnalyzer;

impl LexicalMessageAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze_sentiment(&self, message: &str) -> SentimentResult {
        let message_lower = message.to_lowercase();

        let positive = count_matches(&message_lower, POSITIVE_PATTERNS);
        let negative = count_matches(&message_lower, NEGATIVE_PATTERNS);
        let neutral = count_matches(&message_lower, NEUTRAL_PATTERNS);
        let total = positive + negative + neutral;

        if total == 0 {
            return SentimentResult {
                label: SentimentLabel::Neutral,
                score: 0.5,
                confidence: 0.3,
            };
        }

        if positive > negative {
            SentimentResult {
                label: SentimentLabel::Positive,
                score: positive as f64 / total as f64,
                confidence: 0.7,
            }
        } else if negative > positive {
            SentimentResult {
                label: SentimentLabel::Negative,
                score: negative as f64 / total as f64,
                confidence: 0.7,
            }
        } else {
            SentimentResult {
                label: SentimentLabel::Neutral,
                score: 0.5,
                confidence: 0.5,
            }
        }
    }

    pub fn analyze_intent(&self, message: &str) -> IntentResult {
        let message_lower = message.to_lowercase();
        let scores = score_categories(&message_lower, &INTENT_CATEGORIES);

        // Strictly-greater comparison keeps the first declared category on ties
        let best = scores
            .iter()
            .fold(None::<(IntentLabel, usize)>, |best, &(label, score)| match best {
                Some((_, best_score)) if best_score >= score => best,
                _ => Some((label, score)),
            });

        match best {
            Some((label, score)) if score > 0 => {
                let word_count = message.split_whitespace().count().max(1);
                IntentResult {
                    label,
                    confidence: (score as f64 / word_count as f64).min(1.0),
                }
            }
            _ => IntentResult {
                label: IntentLabel::Unknown,
                confidence: 0.1,
            },
        }
    }

    pub fn analyze_complexity(&self, message: &str) -> ComplexityResult {
        let words: Vec<&str> = message.split_whitespace().collect();
        // A trailing terminator leaves an empty last piece, which still counts
        let sentence_count = SENTENCE_BOUNDARY.split(message).count().max(1);

        let avg_words_per_sentence = words.len() as f64 / sentence_count as f64;

        let complex_words_count = words
            .iter()
            .filter(|w| w.chars().count() > COMPLEX_WORD_MIN_CHARS)
            .count();
        let complexity_ratio = if words.is_empty() {
            0.0
        } else {
            complex_words_count as f64 / words.len() as f64
        };

        let level = if complexity_ratio > 0.3 || avg_words_per_sentence > 15.0 {
            ComplexityLevel::High
        } else if complexity_ratio > 0.1 || avg_words_per_sentence > 8.0 {
            ComplexityLevel::Medium
        } else {
            ComplexityLevel::Low
        };

        ComplexityResult {
            level,
            avg_words_per_sentence,
            complexity_ratio,
            complex_words_count,
        }
    }
}

impl MessageAnalyzer for LexicalMessageAnalyzer {
    fn analyze_message(&self, message: &str) -> MessageAnalysis {
        MessageAnalysis {
            sentiment: self.analyze_sentiment(message),
            intent: self.analyze_intent(message),
            complexity: self.analyze_complexity(message),
            entities: extract_entities(message),
            word_count: message.split_whitespace().count(),
            character_count: message.chars().count(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
