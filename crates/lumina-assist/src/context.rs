//! Conversation context and prompt rendering
//!
//! The service only ever sees a bounded slice of a dataset: its name and
//! columns, the first few rows, the charts already on the dashboard and
//! the most recent conversation turns.

use lumina_core::{AssistConfig, ChartConfig, Dataset};
use lumina_io::Record;
use serde::{Deserialize, Serialize};

/// Who said a chat turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
}

impl ChatRole {
    fn label(&self) -> &'static str {
        match self {
            ChatRole::User => "User",
            ChatRole::Model => "Model",
        }
    }
}

/// One turn of the conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
}

impl ChatTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn model(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Model,
            content: content.into(),
        }
    }
}

/// Everything the service is told about the dataset for one chat request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatContext {
    pub dataset_name: String,
    pub columns: Vec<String>,
    pub sample_rows: Vec<Record>,
    /// Existing charts as `"title (type)"`
    pub charts: Vec<String>,
    pub message: String,
    pub history: Vec<ChatTurn>,
}

impl ChatContext {
    /// Bound the dataset, charts and history to what `config` allows
    pub fn build(
        dataset: &Dataset,
        charts: &[ChartConfig],
        message: &str,
        history: &[ChatTurn],
        config: &AssistConfig,
    ) -> Self {
        let skip = history.len().saturating_sub(config.history_turns);
        Self {
            dataset_name: dataset.name.clone(),
            columns: dataset.columns.clone(),
            sample_rows: dataset.head(config.chat_sample_rows).to_vec(),
            charts: charts.iter().map(ChartConfig::describe).collect(),
            message: message.to_string(),
            history: history[skip..].to_vec(),
        }
    }

    /// Render the full chat prompt
    pub fn render(&self) -> Result<String, serde_json::Error> {
        let sample = serde_json::to_string(&self.sample_rows)?;
        let previous_turns = self
            .history
            .iter()
            .map(|turn| format!("{}: {}", turn.role.label(), turn.content))
            .collect::<Vec<_>>()
            .join("\n");

        Ok(format!(
            r##"You are Lumina, an expert data analyst assistant.
Dataset Context:
- Name: {name}
- Columns: {columns}
- Existing Charts: {charts}
- Sample Data: {sample}

Your Goal: Answer user questions about the data, suggest insights, and help visualize data.

IMPORTANT: If the user asks to visualize data or creates a chart, you MUST include a JSON block at the END of your response with the specific schema below.

Chart JSON Schema:
```json
{{
  "chartConfig": {{
    "type": "Line" | "Bar" | "Area" | "Scatter" | "Pie",
    "xAxisKey": "column_name",
    "yAxisKey": "column_name",
    "title": "Chart Title",
    "color": "#hexcode"
  }}
}}
```

If no chart is needed, do not include the JSON block.
Keep responses concise and professional. Markdown is supported.

Conversation History:
{previous_turns}

User: {message}
Model:"##,
            name = self.dataset_name,
            columns = self.columns.join(", "),
            charts = self.charts.join(", "),
            sample = sample,
            previous_turns = previous_turns,
            message = self.message,
        ))
    }
}

/// Render the insight-analysis prompt over the first `sample_rows` rows
pub fn insight_prompt(dataset: &Dataset, sample_rows: usize) -> Result<String, serde_json::Error> {
    let sample = serde_json::to_string(dataset.head(sample_rows))?;
    Ok(format!(
        r#"Act as a senior data analyst. Dataset: "{name}".
Columns: {columns}.
Sample Data (JSON): {sample}

Provide a JSON object with:
1. "summary": Brief description.
2. "trends": Array of 3 trends.
3. "anomalies": Array of potential outliers.
4. "recommendation": Best chart type suggestion.

Return raw JSON only."#,
        name = dataset.name,
        columns = dataset.columns.join(", "),
        sample = sample,
    ))
}
