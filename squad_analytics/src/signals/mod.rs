pub mod analyzer;
pub mod entities;
pub mod lexical;
pub mod response_quality;

pub use analyzer::{
    ComplexityLevel, ComplexityResult, IntentLabel, IntentResult, LexicalMessageAnalyzer,
    MessageAnalysis, MessageAnalyzer, SentimentLabel, SentimentResult,
};
pub use entities::{extract_entities, Entity, EntityType};
pub use response_quality::{assess_response_quality, QualityIssue, ResponseQuality};
