//! Website summarizer.
//!
//! Fetches a company's site, extracts a bounded slice of visible text plus
//! contact identifiers and news snippets, then asks the configured
//! [`TextGenerator`] to condense it into a few bullet points.
//!
//! Fetch failures are reported as [`SummaryOutcome::Unreachable`]; generator
//! failures are returned as errors for the caller to absorb.

mod extract;
mod fetch;

use std::sync::Arc;

use leadgen_generator::{GenerationRequest, TaskType, TextGenerator};
use leadgen_shared::{LeadGenError, Result, ScrapeConfig};
use tracing::{info, instrument, warn};

pub use extract::{ExtractLimits, ExtractedContent, extract};

use fetch::{PageFetcher, normalize_url};

/// Sampling temperature for summaries.
const SUMMARY_TEMPERATURE: f32 = 0.3;

/// Upper bound on page text sent to the generator, in characters.
const MAX_PROMPT_TEXT_CHARS: usize = 12_000;

/// Ordered bullet points describing a company. Empty is a valid summary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub key_points: Vec<String>,
}

impl Summary {
    pub fn is_empty(&self) -> bool {
        self.key_points.is_empty()
    }
}

/// Result of summarizing one website.
#[derive(Debug)]
pub enum SummaryOutcome {
    /// The page was fetched and summarized.
    Summarized {
        extracted: ExtractedContent,
        summary: Summary,
    },
    /// The page could not be fetched; nothing was extracted.
    Unreachable { error: LeadGenError },
}

/// Fetch → extract → summarize, one site at a time.
pub struct WebsiteSummarizer {
    fetcher: PageFetcher,
    generator: Arc<dyn TextGenerator>,
    limits: ExtractLimits,
}

impl WebsiteSummarizer {
    pub fn new(config: &ScrapeConfig, generator: Arc<dyn TextGenerator>) -> Result<Self> {
        Ok(Self {
            fetcher: PageFetcher::new(config)?,
            generator,
            limits: ExtractLimits {
                max_paragraphs: config.max_paragraphs,
                max_news: config.max_news_snippets,
            },
        })
    }

    /// Summarize the site at `url` for `company_name`.
    #[instrument(skip_all, fields(url = %url, company = %company_name))]
    pub async fn summarize(&self, url: &str, company_name: &str) -> Result<SummaryOutcome> {
        let html = match normalize_url(url) {
            Ok(parsed) => self.fetcher.fetch(&parsed).await,
            Err(e) => Err(e),
        };

        let html = match html {
            Ok(html) => html,
            Err(error) => {
                warn!(%url, %error, "failed to fetch website");
                return Ok(SummaryOutcome::Unreachable { error });
            }
        };

        let extracted = extract(&html, self.limits);
        info!(
            emails = extracted.emails.len(),
            phones = extracted.phones.len(),
            news = extracted.news.len(),
            "extracted website content"
        );

        let request = GenerationRequest {
            task: TaskType::SummarizeWebsite,
            company_name: company_name.to_string(),
            prompt: build_prompt(company_name, &extracted),
            temperature: SUMMARY_TEMPERATURE,
        };
        let reply = self.generator.generate(&request).await?;

        let summary = Summary {
            key_points: parse_bullets(&reply),
        };

        Ok(SummaryOutcome::Summarized { extracted, summary })
    }
}

/// Build the summarization prompt from extracted content.
fn build_prompt(company_name: &str, extracted: &ExtractedContent) -> String {
    let mut prompt = format!(
        "Given the following extracted information from {company_name}'s website:\n\n{}\n\n",
        truncate_chars(&extracted.text_blob, MAX_PROMPT_TEXT_CHARS)
    );

    if extracted.has_contacts() {
        let emails: Vec<&str> = extracted.emails.iter().map(String::as_str).collect();
        let phones: Vec<&str> = extracted.phones.iter().map(String::as_str).collect();
        prompt.push_str(&format!(
            "Contact info found: emails=[{}], phones=[{}].\n",
            emails.join(", "),
            phones.join(", ")
        ));
    }

    if !extracted.news.is_empty() {
        prompt.push_str(&format!(
            "Recent updates/news: {}.\n",
            extracted.news.join(" | ")
        ));
    }

    prompt.push_str(
        "\nWrite 2-3 concise bullet points summarizing what the company does and any notable \
         recent updates.\nInclude the contact information at the end if available.\n\
         Output only the bullet points.",
    );
    prompt
}

/// Split a reply into bullet points, stripping `•`/`-` markers and blank lines.
fn parse_bullets(reply: &str) -> Vec<String> {
    reply
        .lines()
        .map(|line| line.trim_matches(|c: char| c == '•' || c == '-' || c.is_whitespace()))
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// Truncate to at most `max_chars` characters, on a char boundary.
fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
