//! Rule lists turning conversation signals into human-readable insights and
//! recommendations. Rules run in a fixed order and each emits at most one line.

use common::consts::UNKNOWN_AGENT;

use crate::signals::{ComplexityLevel, IntentLabel, MessageAnalysis, ResponseQuality, SentimentLabel};

pub const INSIGHT_HIGH_COMPLEXITY: &str =
    "Mensagem de alta complexidade detectada - pode precisar de follow-up";
pub const INSIGHT_NEGATIVE_SENTIMENT: &str =
    "Sentimento negativo detectado - monitorar satisfação do usuário";
pub const INSIGHT_POSITIVE_SENTIMENT: &str = "Sentimento positivo detectado - usuário satisfeito";
pub const INSIGHT_QUESTION: &str = "Pergunta direta detectada - resposta precisa ser informativa";
pub const INSIGHT_COMPLAINT: &str = "Reclamação detectada - priorizar resolução";

pub const RECOMMEND_IMPROVE_QUALITY: &str =
    "Melhorar qualidade das respostas - resposta atual pode não ser satisfatória";
pub const RECOMMEND_FOLLOW_UP: &str =
    "Implementar follow-up para usuários com sentimento negativo";
pub const RECOMMEND_DETAILED_ANSWERS: &str =
    "Considerar respostas mais detalhadas para mensagens complexas";

/// Response quality below this score triggers a recommendation
const MIN_ACCEPTABLE_QUALITY: f64 = 0.7;

pub fn agent_selected_insight(agent_name: &str) -> String {
    format!("Agente {} foi selecionado para esta conversa", agent_name)
}

pub fn generate_insights(agent_name: &str, message_analysis: &MessageAnalysis) -> Vec<String> {
    let mut insights = Vec::new();

    if agent_name != UNKNOWN_AGENT {
        insights.push(agent_selected_insight(agent_name));
    }

    if message_analysis.complexity.level == ComplexityLevel::High {
        insights.push(INSIGHT_HIGH_COMPLEXITY.to_string());
    }

    match message_analysis.sentiment.label {
        SentimentLabel::Negative => insights.push(INSIGHT_NEGATIVE_SENTIMENT.to_string()),
        SentimentLabel::Positive => insights.push(INSIGHT_POSITIVE_SENTIMENT.to_string()),
        SentimentLabel::Neutral => {}
    }

    match message_analysis.intent.label {
        IntentLabel::Question => insights.push(INSIGHT_QUESTION.to_string()),
        IntentLabel::Complaint => insights.push(INSIGHT_COMPLAINT.to_string()),
        _ => {}
    }

    insights
}

pub fn generate_recommendations(
    message_analysis: &MessageAnalysis,
    response_quality: &ResponseQuality,
) -> Vec<String> {
    let mut recommendations = Vec::new();

    if response_quality.score < MIN_ACCEPTABLE_QUALITY {
        recommendations.push(RECOMMEND_IMPROVE_QUALITY.to_string());
    }

    if message_analysis.sentiment.label == SentimentLabel::Negative {
        recommendations.push(RECOMMEND_FOLLOW_UP.to_string());
    }

    if message_analysis.complexity.level == ComplexityLevel::High {
        recommendations.push(RECOMMEND_DETAILED_ANSWERS.to_string());
    }

    recommendations
}
