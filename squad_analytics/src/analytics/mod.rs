pub mod aggregator;
pub mod conversation_analyzer;
pub mod insights;
pub mod metrics;
pub mod record;


pub use aggregator::{Aggregator, AnalyticsSummary, ConversationAnalytics};
pub use conversation_analyzer::{AnalysisOutcome, AnalyzerHealth, ConversationAnalyzer};
pub use record::{AnalysisRecord, ResponseAnalysis};
