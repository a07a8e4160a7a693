//! Deterministic generator used when no credential is configured.

use async_trait::async_trait;
use leadgen_shared::Result;

use crate::{GenerationRequest, TaskType, TextGenerator};

/// Returns fixed, company-templated replies in the same shape the remote
/// model is asked for, so callers parse them like any other reply.
#[derive(Debug, Clone, Copy, Default)]
pub struct StubGenerator;

#[async_trait]
impl TextGenerator for StubGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<String> {
        let reply = match request.task {
            TaskType::SummarizeWebsite => (1..=3)
                .map(|i| format!("• Example key point {i} about the business"))
                .collect::<Vec<_>>()
                .join("\n"),
            TaskType::ComposeOutreach => {
                let name = &request.company_name;
                serde_json::json!({
                    "subject": format!("Introduction to our solutions for {name}"),
                    "body": format!("Hello Team {name},\n\nWe wanted to introduce our solutions..."),
                })
                .to_string()
            }
        };
        Ok(reply)
    }

    fn name(&self) -> &str {
        "stub"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(task: TaskType) -> GenerationRequest {
        GenerationRequest {
            task,
            company_name: "Acme".into(),
            prompt: "ignored".into(),
            temperature: 0.4,
        }
    }

    #[tokio::test]
    async fn summary_stub_has_three_bullets() {
        let reply = StubGenerator
            .generate(&request(TaskType::SummarizeWebsite))
            .await
            .unwrap();
        assert_eq!(reply.lines().count(), 3);
        assert!(reply.starts_with("• Example key point 1"));
    }

    #[tokio::test]
    async fn outreach_stub_is_json_naming_the_company() {
        let reply = StubGenerator
            .generate(&request(TaskType::ComposeOutreach))
            .await
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&reply).unwrap();
        assert_eq!(value["subject"], "Introduction to our solutions for Acme");
        assert!(value["body"].as_str().unwrap().starts_with("Hello Team Acme,"));
    }

    #[tokio::test]
    async fn stub_is_deterministic() {
        let a = StubGenerator
            .generate(&request(TaskType::ComposeOutreach))
            .await
            .unwrap();
        let b = StubGenerator
            .generate(&request(TaskType::ComposeOutreach))
            .await
            .unwrap();
        assert_eq!(a, b);
    }
}
