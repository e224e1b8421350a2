//! Chart descriptors
//!
//! Charts are owned by the dashboard; the core only proposes defaults on
//! ingestion and turns assistant suggestions into complete descriptors.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::dataset::Dataset;

/// Color for charts added by hand
pub const MANUAL_CHART_COLOR: &str = "#8b5cf6";
/// Color for an accepted assistant suggestion that names none
pub const SUGGESTED_CHART_COLOR: &str = "#ec4899";
/// Title for an accepted assistant suggestion that names none
pub const SUGGESTED_CHART_TITLE: &str = "AI Generated Chart";

/// Kind of chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChartType {
    Line,
    Bar,
    Area,
    Scatter,
    Pie,
}

impl ChartType {
    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            ChartType::Line => "Line",
            ChartType::Bar => "Bar",
            ChartType::Area => "Area",
            ChartType::Scatter => "Scatter",
            ChartType::Pie => "Pie",
        }
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A chart on the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartConfig {
    pub id: String,
    #[serde(rename = "type")]
    pub chart_type: ChartType,
    pub x_axis_key: String,
    pub y_axis_key: String,
    pub color: String,
    pub title: String,
}

impl ChartConfig {
    /// Create a chart with the manual color and a "y vs x" title
    pub fn new(chart_type: ChartType, x: impl Into<String>, y: impl Into<String>) -> Self {
        let (x, y) = (x.into(), y.into());
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            chart_type,
            title: format!("{} vs {}", y, x),
            x_axis_key: x,
            y_axis_key: y,
            color: MANUAL_CHART_COLOR.to_string(),
        }
    }

    /// Set the title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the color
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Short description used in assistant context, e.g. `"y vs x (Line)"`
    pub fn describe(&self) -> String {
        format!("{} ({})", self.title, self.chart_type)
    }
}

/// A chart proposed by the assistant: the shape of [`ChartConfig`] without
/// an id, every field optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSuggestion {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub chart_type: Option<ChartType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_axis_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_axis_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl ChartSuggestion {
    /// Turn the suggestion into a chart with a fresh id
    ///
    /// Returns `None` unless type and both axes are present. Missing title
    /// and color take the suggestion defaults.
    pub fn into_config(self) -> Option<ChartConfig> {
        let chart_type = self.chart_type?;
        let x = self.x_axis_key.filter(|s| !s.is_empty())?;
        let y = self.y_axis_key.filter(|s| !s.is_empty())?;
        Some(ChartConfig {
            id: uuid::Uuid::new_v4().to_string(),
            chart_type,
            x_axis_key: x,
            y_axis_key: y,
            color: self
                .color
                .unwrap_or_else(|| SUGGESTED_CHART_COLOR.to_string()),
            title: self
                .title
                .unwrap_or_else(|| SUGGESTED_CHART_TITLE.to_string()),
        })
    }
}

/// Chart proposed right after ingestion
///
/// Two or more numeric columns give a line chart of the second against the
/// first; a single numeric column with a categorical column gives a bar
/// chart by category; anything else gives no chart.
pub fn default_chart(dataset: &Dataset) -> Option<ChartConfig> {
    let numeric = &dataset.numeric_columns;
    let categorical = &dataset.categorical_columns;

    if numeric.len() >= 2 {
        Some(ChartConfig::new(ChartType::Line, &numeric[0], &numeric[1]).with_color("#3b82f6"))
    } else if numeric.len() == 1 && !categorical.is_empty() {
        let title = format!("{} by {}", numeric[0], categorical[0]);
        Some(
            ChartConfig::new(ChartType::Bar, &categorical[0], &numeric[0])
                .with_color("#10b981")
                .with_title(title),
        )
    } else {
        None
    }
}
