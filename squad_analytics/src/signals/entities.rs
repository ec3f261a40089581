use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static NUMBER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("valid number pattern"));

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}\b").expect("valid email pattern")
});

/// Brazilian format: (11) 98765-4321, (11)3456-7890, (21) 987654321
static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(\d{2}\)\s?\d{4,5}-?\d{4}").expect("valid phone pattern"));

static MONEY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"R\$\s?\d+[.,]?\d*").expect("valid money pattern"));

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Number,
    Email,
    Phone,
    Money,
}

impl EntityType {
    pub fn confidence(&self) -> f64 {
        match self {
            EntityType::Number | EntityType::Phone => 0.8,
            EntityType::Email | EntityType::Money => 0.9,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Entity {
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    pub value: String,
    pub confidence: f64,
}

/// Run every extractor in fixed order (numbers, emails, phones, money) and
/// concatenate the matches. Overlapping matches across extractors are kept.
pub fn extract_entities(message: &str) -> Vec<Entity> {
    let extractors: [(EntityType, &Regex); 4] = [
        (EntityType::Number, &*NUMBER_PATTERN),
        (EntityType::Email, &*EMAIL_PATTERN),
        (EntityType::Phone, &*PHONE_PATTERN),
        (EntityType::Money, &*MONEY_PATTERN),
    ];

    extractors
        .iter()
        .flat_map(|(entity_type, pattern)| {
            pattern.find_iter(message).map(move |m| Entity {
                entity_type: *entity_type,
                value: m.as_str().to_string(),
                confidence: entity_type.confidence(),
            })
        })
        .collect()
}
