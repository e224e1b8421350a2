//! Splitting service replies into display text and structured payloads

use lazy_static::lazy_static;
use lumina_core::ChartSuggestion;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{AssistError, AssistResult};

lazy_static! {
    static ref CHART_BLOCK: Regex = Regex::new(r"```json\s*(\{[\s\S]*?\})\s*```").unwrap();
}

/// A chat answer ready for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatReply {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<ChartSuggestion>,
}

impl ChatReply {
    /// A plain reply with no chart
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            suggestion: None,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartEnvelope {
    chart_config: Option<ChartSuggestion>,
}

fn chart_payload(json: &str) -> Option<ChartSuggestion> {
    match serde_json::from_str::<ChartEnvelope>(json) {
        Ok(envelope) => envelope.chart_config,
        Err(e) => {
            tracing::warn!("Failed to parse chart payload: {}", e);
            None
        }
    }
}

/// Separate an embedded chart suggestion from the text around it
///
/// A fenced `json` block holding `{"chartConfig": ...}` is cut out of the
/// text. Without a fence, a raw `{...}` span at the end of the text is tried
/// and the text truncated before it. Anything unparseable leaves the text
/// as it was.
pub fn split_reply(text: &str) -> ChatReply {
    if let Some(caps) = CHART_BLOCK.captures(text) {
        let (Some(block), Some(json)) = (caps.get(0), caps.get(1)) else {
            return ChatReply::text(text);
        };
        return match chart_payload(json.as_str()) {
            Some(suggestion) => {
                let mut display = String::with_capacity(text.len());
                display.push_str(&text[..block.start()]);
                display.push_str(&text[block.end()..]);
                ChatReply {
                    text: display.trim().to_string(),
                    suggestion: Some(suggestion),
                }
            }
            None => ChatReply::text(text),
        };
    }

    match (text.find('{'), text.rfind('}')) {
        (Some(first), Some(last)) if last > first => {
            let raw = &text[first..=last];
            match serde_json::from_str::<ChartEnvelope>(raw)
                .ok()
                .and_then(|e| e.chart_config)
            {
                Some(suggestion) => ChatReply {
                    text: text[..first].trim().to_string(),
                    suggestion: Some(suggestion),
                },
                None => ChatReply::text(text),
            }
        }
        _ => ChatReply::text(text),
    }
}

/// Structured analysis of a dataset sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub summary: String,
    #[serde(default)]
    pub trends: Vec<String>,
    #[serde(default)]
    pub anomalies: Vec<String>,
    pub recommendation: String,
}

impl Insight {
    /// Shown when analysis could not be obtained
    pub fn unavailable() -> Self {
        Self {
            summary: "Analysis unavailable.".to_string(),
            trends: Vec::new(),
            anomalies: Vec::new(),
            recommendation: "Check API configuration.".to_string(),
        }
    }
}

/// Parse an insight reply, tolerating a surrounding code fence
pub fn parse_insight(text: &str) -> AssistResult<Insight> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(AssistError::EmptyResponse);
    }
    let body = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|s| s.strip_suffix("```"))
        .unwrap_or(trimmed);
    Ok(serde_json::from_str(body.trim())?)
}
