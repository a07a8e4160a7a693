//! Outreach composer.
//!
//! Asks the text generator for a subject line and body as a JSON object.
//! Malformed replies are never an error: the raw text becomes the body and a
//! subject is synthesized from the company name.

use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, instrument, warn};

use leadgen_generator::{GenerationRequest, TaskType, TextGenerator};
use leadgen_shared::{OutreachMessage, Result, SenderConfig};

/// Sampling temperature for outreach drafts.
const OUTREACH_TEMPERATURE: f32 = 0.4;

/// Expected reply shape. Absent keys decode as empty.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OutreachReply {
    subject: Option<String>,
    body: Option<String>,
}

/// Drafts one outreach email per company.
pub struct OutreachComposer {
    generator: Arc<dyn TextGenerator>,
    sender: SenderConfig,
}

impl OutreachComposer {
    pub fn new(generator: Arc<dyn TextGenerator>, sender: SenderConfig) -> Self {
        Self { generator, sender }
    }

    /// Draft an email to `company_name`. Only generator transport/service failures are errors.
    #[instrument(skip_all, fields(company = %company_name))]
    pub async fn compose(&self, company_name: &str, description: &str) -> Result<OutreachMessage> {
        let request = GenerationRequest {
            task: TaskType::ComposeOutreach,
            company_name: company_name.to_string(),
            prompt: build_prompt(&self.sender, company_name, description),
            temperature: OUTREACH_TEMPERATURE,
        };

        debug!(generator = self.generator.name(), "requesting outreach draft");
        let reply = self.generator.generate(&request).await?;

        Ok(parse_reply(company_name, &reply))
    }
}

fn build_prompt(sender: &SenderConfig, company_name: &str, description: &str) -> String {
    let description = if description.trim().is_empty() {
        "(no description available)"
    } else {
        description
    };

    format!(
        "You are {name}, {role} of {company}, a {offering} provider.\n\
         You are reaching out to a new business client to offer {offering} tailored to their needs.\n\
         \n\
         Company Name: {company_name}\n\
         Company Description: {description}\n\
         \n\
         Write a concise, professional B2B outreach email addressed to the company \
         (we don't have a person's name).\n\
         Make it clear who you are and highlight how your {offering} can benefit their business \
         given the context.\n\
         Sign the email as {name}, {role}, {company} ({email}).\n\
         Return only a JSON object with exactly two keys:\n\
         - subject: a short, catchy subject line\n\
         - body: the email body in a professional tone\n\
         \n\
         Example output:\n\
         {{\"subject\": \"...\", \"body\": \"...\"}}",
        name = sender.name,
        role = sender.role,
        company = sender.company,
        email = sender.email,
        offering = sender.offering,
    )
}

/// Turn a raw reply into a message, falling back to the raw text as body.
fn parse_reply(company_name: &str, raw: &str) -> OutreachMessage {
    let raw = raw.trim();

    match serde_json::from_str::<OutreachReply>(strip_code_fence(raw)) {
        Ok(reply) => OutreachMessage {
            subject: reply.subject.unwrap_or_default().trim().to_string(),
            body: reply.body.unwrap_or_default().trim().to_string(),
        },
        Err(e) => {
            warn!(error = %e, "could not parse outreach reply as JSON, using raw text");
            OutreachMessage {
                subject: format!("Introducing our solutions for {company_name}"),
                body: raw.to_string(),
            }
        }
    }
}

/// Remove a surrounding Markdown code fence (```` ```json ... ``` ````), if any.
fn strip_code_fence(text: &str) -> &str {
    let Some(inner) = text
        .strip_prefix("```")
        .and_then(|rest| rest.strip_suffix("```"))
    else {
        return text;
    };

    let inner = inner.trim();
    if inner.starts_with('{') {
        return inner;
    }

    // Drop the language tag, on its own line or glued to the object.
    match inner.split_once('\n') {
        Some((_tag, rest)) => rest.trim(),
        None => inner
            .trim_start_matches(|c: char| c.is_ascii_alphanumeric())
            .trim(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use leadgen_generator::StubGenerator;
    use leadgen_shared::LeadGenError;

    struct CannedGenerator(&'static str);

    #[async_trait]
    impl TextGenerator for CannedGenerator {
        async fn generate(&self, _request: &GenerationRequest) -> Result<String> {
            Ok(self.0.to_string())
        }

        fn name(&self) -> &str {
            "canned"
        }
    }

    struct FailingGenerator;

    #[async_trait]
    impl TextGenerator for FailingGenerator {
        async fn generate(&self, _request: &GenerationRequest) -> Result<String> {
            Err(LeadGenError::service("openai", 500, "boom"))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    fn composer(generator: impl TextGenerator + 'static) -> OutreachComposer {
        OutreachComposer::new(Arc::new(generator), SenderConfig::default())
    }

    #[tokio::test]
    async fn stub_output_is_deterministic() {
        let composer = composer(StubGenerator);
        let first = composer.compose("Acme", "").await.unwrap();
        let second = composer.compose("Acme", "").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first.subject, "Introduction to our solutions for Acme");
        assert_eq!(
            first.body,
            "Hello Team Acme,\n\nWe wanted to introduce our solutions..."
        );
    }

    #[tokio::test]
    async fn structured_reply_is_trimmed() {
        let composer = composer(CannedGenerator(
            r#"{"subject": "  Faster laptops for Acme ", "body": "\nHi Acme team,\n\nLet's talk.\n"}"#,
        ));
        let message = composer.compose("Acme", "Makes widgets").await.unwrap();
        assert_eq!(message.subject, "Faster laptops for Acme");
        assert_eq!(message.body, "Hi Acme team,\n\nLet's talk.");
    }

    #[tokio::test]
    async fn malformed_reply_falls_back_to_raw_body() {
        let raw = "Subject: Hi\n\nDear Acme, we sell servers.";
        let composer = composer(CannedGenerator(raw));
        let message = composer.compose("Acme", "Makes widgets").await.unwrap();

        assert_eq!(message.body, raw);
        assert!(message.subject.contains("Acme"));
    }

    #[tokio::test]
    async fn non_object_json_falls_back_too() {
        let composer = composer(CannedGenerator(r#"["subject", "body"]"#));
        let message = composer.compose("Acme", "").await.unwrap();
        assert_eq!(message.body, r#"["subject", "body"]"#);
        assert_eq!(message.subject, "Introducing our solutions for Acme");
    }

    #[tokio::test]
    async fn missing_keys_decode_as_empty() {
        let composer = composer(CannedGenerator(r#"{"subject": "Only a subject"}"#));
        let message = composer.compose("Acme", "").await.unwrap();
        assert_eq!(message.subject, "Only a subject");
        assert_eq!(message.body, "");
    }

    #[tokio::test]
    async fn fenced_json_is_accepted() {
        let composer = composer(CannedGenerator(
            "```json\n{\"subject\": \"Hi\", \"body\": \"Hello Acme\"}\n```",
        ));
        let message = composer.compose("Acme", "").await.unwrap();
        assert_eq!(message.subject, "Hi");
        assert_eq!(message.body, "Hello Acme");
    }

    #[tokio::test]
    async fn single_line_fence_with_tag_is_accepted() {
        let composer = composer(CannedGenerator(r#"```json{"subject":"Hi","body":"Yo"}```"#));
        let message = composer.compose("Acme", "").await.unwrap();
        assert_eq!(message.subject, "Hi");
        assert_eq!(message.body, "Yo");
    }

    #[tokio::test]
    async fn generator_failure_propagates() {
        let err = composer(FailingGenerator)
            .compose("Acme", "")
            .await
            .unwrap_err();
        assert!(matches!(err, LeadGenError::Service { .. }));
    }

    #[test]
    fn prompt_carries_sender_and_company() {
        let sender = SenderConfig {
            name: "Dana".into(),
            company: "Acme Hardware".into(),
            ..Default::default()
        };
        let prompt = build_prompt(&sender, "Beta Corp", "Runs 40 retail stores");
        assert!(prompt.contains("You are Dana, Founder & CEO of Acme Hardware"));
        assert!(prompt.contains("Company Name: Beta Corp"));
        assert!(prompt.contains("Company Description: Runs 40 retail stores"));
        assert!(prompt.contains(r#"{"subject": "...", "body": "..."}"#));
    }

    #[test]
    fn strip_code_fence_variants() {
        assert_eq!(strip_code_fence("{\"a\":1}"), "{\"a\":1}");
        assert_eq!(strip_code_fence("```{\"a\":1}```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("```json{\"a\":1}```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("``` json {\"a\":1} ```"), "{\"a\":1}");
    }
}
