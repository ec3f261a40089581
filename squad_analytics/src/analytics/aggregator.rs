//! Aggregated analytics computed by a full scan over stored analysis records.
//!
//! Nothing is maintained incrementally: every call re-derives distributions
//! and averages from the records it is given. The period label is echoed back
//! but does not filter records.

use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};

use super::record::AnalysisRecord;
use crate::signals::{IntentLabel, SentimentLabel};

pub const NO_CONVERSATIONS_MESSAGE: &str = "Nenhuma conversa analisada no período";

#[derive(Debug, Clone, Serialize, PartialEq, Default)]
pub struct AgentDistribution {
    pub leo: usize,
    pub max: usize,
    pub lia: usize,
    pub unknown: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq, Default)]
pub struct SentimentDistribution {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
}

pub type IntentDistribution = BTreeMap<IntentLabel, usize>;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AverageMetrics {
    pub avg_response_time_seconds: f64,
    pub avg_user_satisfaction: f64,
    pub avg_success_rate: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AnalyticsSummary {
    pub period: String,
    pub total_conversations: usize,
    pub agent_distribution: AgentDistribution,
    pub sentiment_distribution: SentimentDistribution,
    pub intent_distribution: IntentDistribution,
    pub average_metrics: AverageMetrics,
    pub top_insights: Vec<String>,
    pub recommendations: Vec<String>,
}

/// Aggregate analytics result handed back to callers
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum ConversationAnalytics {
    Summary(AnalyticsSummary),
    Empty {
        period: String,
        total_conversations: usize,
        message: String,
    },
    Failed {
        period: String,
        error: String,
    },
}

impl ConversationAnalytics {
    pub fn total_conversations(&self) -> usize {
        match self {
            ConversationAnalytics::Summary(summary) => summary.total_conversations,
            ConversationAnalytics::Empty {
                total_conversations,
                ..
            } => *total_conversations,
            ConversationAnalytics::Failed { .. } => 0,
        }
    }
}

/// Two decimals, exact halves to even
fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Counts over leo/max/lia/unknown; any other agent name is dropped
pub fn agent_distribution(records: &[AnalysisRecord]) -> AgentDistribution {
    let mut distribution = AgentDistribution::default();
    for record in records {
        match record.agent_used.as_str() {
            "leo" => distribution.leo += 1,
            "max" => distribution.max += 1,
            "lia" => distribution.lia += 1,
            "unknown" => distribution.unknown += 1,
            _ => {}
        }
    }
    distribution
}

pub fn sentiment_distribution(records: &[AnalysisRecord]) -> SentimentDistribution {
    let mut distribution = SentimentDistribution::default();
    for record in records {
        match record.message_analysis.sentiment.label {
            SentimentLabel::Positive => distribution.positive += 1,
            SentimentLabel::Negative => distribution.negative += 1,
            SentimentLabel::Neutral => distribution.neutral += 1,
        }
    }
    distribution
}

pub fn intent_distribution(records: &[AnalysisRecord]) -> IntentDistribution {
    let mut distribution = IntentDistribution::new();
    for record in records {
        *distribution
            .entry(record.message_analysis.intent.label)
            .or_insert(0) += 1;
    }
    distribution
}

/// Arithmetic means rounded to two decimals; `None` when there are no records
pub fn average_metrics(records: &[AnalysisRecord]) -> Option<AverageMetrics> {
    if records.is_empty() {
        return None;
    }

    let total = records.len() as f64;
    let mut response_time = 0.0;
    let mut satisfaction = 0.0;
    let mut success_rate = 0.0;

    for record in records {
        let metrics = &record.conversation_metrics;
        response_time += metrics.response_time_seconds;
        satisfaction += metrics.user_satisfaction;
        success_rate += metrics.success_rate;
    }

    Some(AverageMetrics {
        avg_response_time_seconds: round2(response_time / total),
        avg_user_satisfaction: round2(satisfaction / total),
        avg_success_rate: round2(success_rate / total),
    })
}

/// Most frequent insights; equal counts keep first-encountered order
pub fn top_insights(records: &[AnalysisRecord], limit: usize) -> Vec<String> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(&str, usize)> = Vec::new();

    for insight in records.iter().flat_map(|r| r.insights.iter()) {
        match positions.get(insight.as_str()) {
            Some(&idx) => counts[idx].1 += 1,
            None => {
                positions.insert(insight.as_str(), counts.len());
                counts.push((insight.as_str(), 1));
            }
        }
    }

    // stable sort keeps first-encountered order among ties
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .take(limit)
        .map(|(insight, _)| insight.to_string())
        .collect()
}

/// Deduplicated union of every recommendation, in first-seen order
pub fn aggregate_recommendations(records: &[AnalysisRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    records
        .iter()
        .flat_map(|r| r.recommendations.iter())
        .filter(|recommendation| seen.insert(recommendation.as_str()))
        .cloned()
        .collect()
}

/// Builds [`ConversationAnalytics`] from a snapshot of stored records
#[derive(Debug, Clone)]
pub struct Aggregator {
    top_insights_limit: usize,
}

impl Aggregator {
    pub fn new(top_insights_limit: usize) -> Self {
        Self { top_insights_limit }
    }

    pub fn summarize(&self, period: &str, records: &[AnalysisRecord]) -> ConversationAnalytics {
        let Some(average_metrics) = average_metrics(records) else {
            return ConversationAnalytics::Empty {
                period: period.to_string(),
                total_conversations: 0,
                message: NO_CONVERSATIONS_MESSAGE.to_string(),
            };
        };

        ConversationAnalytics::Summary(AnalyticsSummary {
            period: period.to_string(),
            total_conversations: records.len(),
            agent_distribution: agent_distribution(records),
            sentiment_distribution: sentiment_distribution(records),
            intent_distribution: intent_distribution(records),
            average_metrics,
            top_insights: top_insights(records, self.top_insights_limit),
            recommendations: aggregate_recommendations(records),
        })
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new(common::consts::DEFAULT_TOP_INSIGHTS_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::metrics::calculate_metrics;
    use crate::analytics::record::ResponseAnalysis;
    use crate::conversation::AgentResponse;
    use crate::signals::{assess_response_quality, LexicalMessageAnalyzer, MessageAnalyzer};
    use pretty_assertions::assert_eq;

    fn record(
        id: &str,
        agent: &str,
        message: &str,
        success: bool,
        insights: &[&str],
        recommendations: &[&str],
    ) -> AnalysisRecord {
        let message_analysis = LexicalMessageAnalyzer::new().analyze_message(message);
        let response = AgentResponse {
            message: "Aqui está.".to_string(),
            agent_name: agent.to_string(),
            success,
            timestamp: None,
        };
        AnalysisRecord {
            conversation_id: id.to_string(),
            timestamp: "2026-01-01T00:00:00Z".to_string(),
            agent_used: agent.to_string(),
            conversation_metrics: calculate_metrics(&message_analysis, &response, 2.5),
            response_analysis: ResponseAnalysis::new(
                &response,
                assess_response_quality(&response.message),
                "2026-01-01T00:00:00Z",
            ),
            message_analysis,
            insights: insights.iter().map(|s| s.to_string()).collect(),
            recommendations: recommendations.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_empty_records_report_no_conversations() {
        let analytics = Aggregator::default().summarize("7d", &[]);
        assert_eq!(
            analytics,
            ConversationAnalytics::Empty {
                period: "7d".to_string(),
                total_conversations: 0,
                message: NO_CONVERSATIONS_MESSAGE.to_string(),
            }
        );
        assert!(average_metrics(&[]).is_none());
    }

    #[test]
    fn test_agent_distribution_drops_unlisted_agents() {
        let records = vec![
            record("1", "leo", "oi", true, &[], &[]),
            record("2", "leo", "oi", true, &[], &[]),
            record("3", "lia", "oi", true, &[], &[]),
            record("4", "unknown", "oi", true, &[], &[]),
            record("5", "system", "oi", true, &[], &[]),
        ];
        assert_eq!(
            agent_distribution(&records),
            AgentDistribution {
                leo: 2,
                max: 0,
                lia: 1,
                unknown: 1,
            }
        );
    }

    #[test]
    fn test_sentiment_and_intent_distribution() {
        let records = vec![
            record("1", "leo", "Obrigado, excelente trabalho!", true, &[], &[]),
            record("2", "max", "Péssimo atendimento, muito ruim", true, &[], &[]),
            record("3", "lia", "Como posso melhorar minhas vendas?", true, &[], &[]),
        ];
        assert_eq!(
            sentiment_distribution(&records),
            SentimentDistribution {
                positive: 1,
                negative: 1,
                neutral: 1,
            }
        );

        let intents = intent_distribution(&records);
        assert_eq!(intents.get(&IntentLabel::Question), Some(&1));
        assert_eq!(intents.values().sum::<usize>(), 3);
    }

    #[test]
    fn test_average_metrics_rounded() {
        let records = vec![
            record("1", "leo", "Obrigado", true, &[], &[]),
            record("2", "leo", "Vendas", false, &[], &[]),
            record("3", "leo", "Vendas", false, &[], &[]),
        ];
        let averages = average_metrics(&records).unwrap();
        assert_eq!(averages.avg_response_time_seconds, 2.5);
        // (5.0 + 2.5 + 2.5) / 3
        assert_eq!(averages.avg_user_satisfaction, 3.33);
        assert_eq!(averages.avg_success_rate, 0.33);
    }

    #[test]
    fn test_average_halves_round_to_even() {
        let mut records = vec![record("1", "leo", "Vendas", true, &[], &[])];
        for i in 2..=8 {
            records.push(record(&i.to_string(), "leo", "Vendas", false, &[], &[]));
        }
        // 1/8 = 0.125
        assert_eq!(average_metrics(&records).unwrap().avg_success_rate, 0.12);

        for record in records.iter_mut().skip(1).take(4) {
            record.conversation_metrics.success_rate = 1.0;
        }
        // 5/8 = 0.625
        assert_eq!(average_metrics(&records).unwrap().avg_success_rate, 0.62);
    }

    #[test]
    fn test_top_insights_frequency_with_stable_ties() {
        let records = vec![
            record("1", "leo", "oi", true, &["a", "b"], &[]),
            record("2", "leo", "oi", true, &["c", "b"], &[]),
            record("3", "leo", "oi", true, &["d", "e", "f", "g"], &[]),
        ];
        assert_eq!(top_insights(&records, 5), vec!["b", "a", "c", "d", "e"]);
    }

    #[test]
    fn test_recommendations_deduplicated() {
        let records = vec![
            record("1", "leo", "oi", true, &[], &["x", "y"]),
            record("2", "leo", "oi", true, &[], &["y", "z"]),
        ];
        assert_eq!(aggregate_recommendations(&records), vec!["x", "y", "z"]);
    }

    #[test]
    fn test_summarize_is_idempotent() {
        let records = vec![
            record("1", "leo", "Obrigado!", true, &["a"], &["x"]),
            record("2", "max", "Qual o preço?", false, &["b"], &[]),
        ];
        let aggregator = Aggregator::new(5);
        let first = aggregator.summarize("30d", &records);
        let second = aggregator.summarize("30d", &records);
        assert_eq!(first, second);
        assert_eq!(first.total_conversations(), 2);
    }

    #[test]
    fn test_summary_serializes_flat() {
        let records = vec![record("1", "leo", "Qual o preço?", true, &[], &[])];
        let json = serde_json::to_value(Aggregator::default().summarize("7d", &records)).unwrap();
        assert_eq!(json["period"], "7d");
        assert_eq!(json["total_conversations"], 1);
        assert_eq!(json["intent_distribution"]["question"], 1);
        assert_eq!(json["agent_distribution"]["leo"], 1);
    }
}
