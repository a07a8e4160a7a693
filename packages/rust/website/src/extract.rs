//! Text and contact extraction from fetched markup.
//!
//! Extraction never fails: a page with nothing useful yields empty fields.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

/// What one page yielded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedContent {
    /// `<meta name="description">` content, empty when absent.
    pub meta_description: String,
    /// Meta description followed by the first paragraphs, newline separated.
    pub text_blob: String,
    /// Email-like strings found anywhere in the raw markup.
    pub emails: BTreeSet<String>,
    /// Phone-like strings found anywhere in the raw markup.
    pub phones: BTreeSet<String>,
    /// Text of the first sections that mention news or updates.
    pub news: Vec<String>,
}

impl ExtractedContent {
    pub fn has_contacts(&self) -> bool {
        !self.emails.is_empty() || !self.phones.is_empty()
    }
}

/// Limits applied while extracting.
#[derive(Debug, Clone, Copy)]
pub struct ExtractLimits {
    pub max_paragraphs: usize,
    pub max_news: usize,
}

impl Default for ExtractLimits {
    fn default() -> Self {
        Self {
            max_paragraphs: 20,
            max_news: 3,
        }
    }
}

static META_DESCRIPTION: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"meta[name="description"]"#).expect("valid selector"));
static PARAGRAPH: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p").expect("valid selector"));
static CONTAINER: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("section, div").expect("valid selector"));

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("valid regex")
});
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\+?\d[\d\-\s]{6,}\d").expect("valid regex"));
static NEWS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)news|update").expect("valid regex"));
static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Extract description text, contacts, and news snippets from raw HTML.
pub fn extract(html: &str, limits: ExtractLimits) -> ExtractedContent {
    let doc = Html::parse_document(html);

    let meta_description = doc
        .select(&META_DESCRIPTION)
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(|c| c.trim().to_string())
        .unwrap_or_default();

    let paragraphs: Vec<String> = doc
        .select(&PARAGRAPH)
        .take(limits.max_paragraphs)
        .map(element_text)
        .collect();

    let text_blob = format!("{meta_description}\n{}", paragraphs.join("\n"));

    // Contacts come from the raw markup, so mailto: links and attributes count too.
    let emails = EMAIL_RE
        .find_iter(html)
        .map(|m| m.as_str().to_string())
        .collect();
    let phones = PHONE_RE
        .find_iter(html)
        .map(|m| collapse_whitespace(m.as_str()))
        .collect();

    let news = doc
        .select(&CONTAINER)
        .filter(|el| own_text_matches(el, &NEWS_RE))
        .take(limits.max_news)
        .map(element_text)
        .collect();

    ExtractedContent {
        meta_description,
        text_blob,
        emails,
        phones,
        news,
    }
}

/// All descendant text, each node trimmed, concatenated without separators.
fn element_text(el: ElementRef<'_>) -> String {
    el.text().map(str::trim).collect()
}

/// Whether any text node directly under `el` matches `re`.
fn own_text_matches(el: &ElementRef<'_>, re: &Regex) -> bool {
    el.children()
        .filter_map(|child| child.value().as_text())
        .any(|text| re.is_match(text))
}

fn collapse_whitespace(s: &str) -> String {
    WHITESPACE_RE.replace_all(s.trim(), " ").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<!doctype html>
<html><head>
  <meta name="description" content="Acme builds analytics for retailers.">
  <title>Acme</title>
</head><body>
  <p>We help   stores understand  shoppers.</p>
  <p>Founded in <b>2012</b>.</p>
  <div>Latest news from the team<p>We raised a Series B.</p></div>
  <section>Product updates</section>
  <footer>
    Mail sales@acme.example or <a href="mailto:sales@acme.example">sales@acme.example</a>.
    Call +1 555-010-0199 today.
  </footer>
</body></html>"#;

    #[test]
    fn reads_meta_description_and_paragraphs() {
        let content = extract(PAGE, ExtractLimits::default());
        assert_eq!(content.meta_description, "Acme builds analytics for retailers.");
        assert!(content.text_blob.starts_with("Acme builds analytics for retailers.\n"));
        assert!(content.text_blob.contains("We help   stores understand  shoppers."));
        assert!(content.text_blob.contains("Founded in2012."));
    }

    #[test]
    fn missing_meta_description_is_empty() {
        let content = extract("<html><body><p>Hi</p></body></html>", ExtractLimits::default());
        assert_eq!(content.meta_description, "");
        assert_eq!(content.text_blob, "\nHi");
    }

    #[test]
    fn repeated_emails_are_deduplicated() {
        let content = extract(PAGE, ExtractLimits::default());
        assert_eq!(content.emails.len(), 1);
        assert!(content.emails.contains("sales@acme.example"));
    }

    #[test]
    fn finds_phone_like_strings() {
        let content = extract(PAGE, ExtractLimits::default());
        assert!(content.phones.contains("+1 555-010-0199"));
        assert!(content.has_contacts());
    }

    #[test]
    fn paragraphs_are_bounded() {
        let body: String = (0..30).map(|i| format!("<p>para{i}</p>")).collect();
        let html = format!("<html><body>{body}</body></html>");
        let limits = ExtractLimits::default();
        let content = extract(&html, limits);
        assert!(content.text_blob.contains("para19"));
        assert!(!content.text_blob.contains("para20"));
    }

    #[test]
    fn news_sections_match_own_text_and_are_capped() {
        let content = extract(PAGE, ExtractLimits::default());
        assert_eq!(
            content.news,
            vec![
                "Latest news from the teamWe raised a Series B.".to_string(),
                "Product updates".to_string(),
            ]
        );

        let many: String = (0..5).map(|i| format!("<div>News item {i}</div>")).collect();
        let content = extract(&format!("<body>{many}</body>"), ExtractLimits::default());
        assert_eq!(content.news.len(), 3);
        assert_eq!(content.news[0], "News item 0");
    }

    #[test]
    fn empty_page_yields_empty_content() {
        let content = extract("", ExtractLimits::default());
        assert_eq!(content.meta_description, "");
        assert!(content.emails.is_empty());
        assert!(content.phones.is_empty());
        assert!(content.news.is_empty());
    }
}
