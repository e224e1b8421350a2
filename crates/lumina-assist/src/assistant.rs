//! The assistant: context in, reply out, never an error

use std::future::Future;

use lumina_core::{AssistConfig, ChartConfig, Dataset};

use crate::context::{insight_prompt, ChatContext, ChatTurn};
use crate::error::{AssistError, AssistResult};
use crate::reply::{parse_insight, split_reply, ChatReply, Insight};

/// Reply shown when the service cannot be reached
pub const CONNECTION_FALLBACK: &str =
    "I'm having trouble connecting to the analysis engine right now.";

/// Reply shown when the service answers with nothing
pub const EMPTY_FALLBACK: &str = "I couldn't process that request.";

/// A text-completion backend
pub trait ReasoningService: Send + Sync {
    /// Complete `prompt`, returning the raw response text
    fn complete(&self, prompt: String) -> impl Future<Output = AssistResult<String>> + Send;
}

/// Chat and insight analysis over a dataset
///
/// Calls are bounded by the configured timeout and every failure is turned
/// into a fallback reply, so statistics elsewhere never wait on or break
/// because of the service.
#[derive(Debug, Clone)]
pub struct Assistant<S> {
    service: S,
    config: AssistConfig,
}

impl<S: ReasoningService> Assistant<S> {
    pub fn new(service: S, config: AssistConfig) -> Self {
        Self { service, config }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn config(&self) -> &AssistConfig {
        &self.config
    }

    async fn call(&self, prompt: String) -> AssistResult<String> {
        let timeout = self.config.timeout();
        match tokio::time::timeout(timeout, self.service.complete(prompt)).await {
            Ok(result) => result,
            Err(_) => Err(AssistError::Timeout {
                seconds: timeout.as_secs(),
            }),
        }
    }

    /// Answer a chat message about `dataset`
    pub async fn chat(
        &self,
        dataset: &Dataset,
        charts: &[ChartConfig],
        message: &str,
        history: &[ChatTurn],
    ) -> ChatReply {
        match self.try_chat(dataset, charts, message, history).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!("Chat request failed: {}, using fallback reply", e);
                ChatReply::text(CONNECTION_FALLBACK)
            }
        }
    }

    /// Like [`Self::chat`] but surfacing the service error
    pub async fn try_chat(
        &self,
        dataset: &Dataset,
        charts: &[ChartConfig],
        message: &str,
        history: &[ChatTurn],
    ) -> AssistResult<ChatReply> {
        let context = ChatContext::build(dataset, charts, message, history, &self.config);
        let prompt = context.render()?;
        let text = self.call(prompt).await?;
        if text.trim().is_empty() {
            return Ok(ChatReply::text(EMPTY_FALLBACK));
        }
        Ok(split_reply(&text))
    }

    /// Summarize trends and anomalies in the first rows of `dataset`
    pub async fn analyze(&self, dataset: &Dataset) -> Insight {
        match self.try_analyze(dataset).await {
            Ok(insight) => insight,
            Err(e) => {
                tracing::warn!("Insight analysis failed: {}, using fallback", e);
                Insight::unavailable()
            }
        }
    }

    /// Like [`Self::analyze`] but surfacing the service error
    pub async fn try_analyze(&self, dataset: &Dataset) -> AssistResult<Insight> {
        let prompt = insight_prompt(dataset, self.config.insight_sample_rows)?;
        let text = self.call(prompt).await?;
        parse_insight(&text)
    }
}

/// A service that is always unavailable
///
/// Stands in when no backend is configured; every call yields the
/// fallback replies.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unconfigured;

impl ReasoningService for Unconfigured {
    async fn complete(&self, _prompt: String) -> AssistResult<String> {
        Err(AssistError::NotConfigured {
            message: "no reasoning service configured".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumina_io::{record, ParsedGrid};
    use std::sync::Mutex;
    use std::time::Duration;

    struct Scripted {
        reply: AssistResult<String>,
        prompts: Mutex<Vec<String>>,
    }

    impl Scripted {
        fn ok(reply: &str) -> Self {
            Self {
                reply: Ok(reply.to_string()),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    impl ReasoningService for Scripted {
        async fn complete(&self, prompt: String) -> AssistResult<String> {
            self.prompts.lock().unwrap().push(prompt);
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(e) => Err(AssistError::Unknown {
                    message: e.to_string(),
                }),
            }
        }
    }

    struct Slow;

    impl ReasoningService for Slow {
        async fn complete(&self, _prompt: String) -> AssistResult<String> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok("too late".to_string())
        }
    }

    fn dataset() -> Dataset {
        let rows = (0..40)
            .map(|i| record([("day", i as f64), ("sales", 10.0 * i as f64)]))
            .collect();
        Dataset::from_grid(
            "sales",
            ParsedGrid::new(vec!["day".into(), "sales".into()], rows),
        )
    }

    #[tokio::test]
    async fn test_chat_with_suggestion() {
        let service = Scripted::ok(
            "Sales climb steadily.\n```json\n{\"chartConfig\": {\"type\": \"Line\", \"xAxisKey\": \"day\", \"yAxisKey\": \"sales\"}}\n```",
        );
        let assistant = Assistant::new(service, AssistConfig::default());
        let reply = assistant.chat(&dataset(), &[], "plot sales", &[]).await;

        assert_eq!(reply.text, "Sales climb steadily.");
        let chart = reply.suggestion.unwrap().into_config().unwrap();
        assert_eq!(chart.title, "AI Generated Chart");

        let prompts = assistant.service().prompts.lock().unwrap();
        assert!(prompts[0].contains("User: plot sales"));
    }

    #[tokio::test]
    async fn test_chat_failure_falls_back() {
        let assistant = Assistant::new(Unconfigured, AssistConfig::default());
        let reply = assistant.chat(&dataset(), &[], "hello", &[]).await;
        assert_eq!(reply, ChatReply::text(CONNECTION_FALLBACK));
    }

    #[tokio::test]
    async fn test_empty_reply() {
        let assistant = Assistant::new(Scripted::ok("  "), AssistConfig::default());
        let reply = assistant.chat(&dataset(), &[], "hello", &[]).await;
        assert_eq!(reply.text, EMPTY_FALLBACK);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_falls_back() {
        let assistant = Assistant::new(Slow, AssistConfig::default());
        let err = assistant.try_chat(&dataset(), &[], "hello", &[]).await.unwrap_err();
        assert!(matches!(err, AssistError::Timeout { seconds: 30 }));
        let insight = assistant.analyze(&dataset()).await;
        assert_eq!(insight, Insight::unavailable());
    }

    #[tokio::test]
    async fn test_analyze() {
        let service = Scripted::ok(
            r#"{"summary":"Linear growth","trends":["up","steady","no dips"],"anomalies":[],"recommendation":"Line chart"}"#,
        );
        let assistant = Assistant::new(service, AssistConfig::default());
        let insight = assistant.analyze(&dataset()).await;
        assert_eq!(insight.summary, "Linear growth");
        assert_eq!(insight.trends.len(), 3);

        let prompts = assistant.service().prompts.lock().unwrap();
        assert!(prompts[0].contains(r#"{"day":29.0,"sales":290.0}"#));
        assert!(!prompts[0].contains(r#""day":30.0"#));
    }

    #[tokio::test]
    async fn test_malformed_insight_falls_back() {
        let assistant = Assistant::new(Scripted::ok("I think it goes up"), AssistConfig::default());
        assert_eq!(assistant.analyze(&dataset()).await, Insight::unavailable());
    }
}
