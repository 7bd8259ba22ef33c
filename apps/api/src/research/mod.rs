//! Company Researcher — assembles a short company brief for cover letter
//! personalization.
//!
//! Never fails past its own boundary: every failure degrades to the next
//! source (search → scraping → disclaimer) and callers always get a string.

pub mod handlers;
pub mod search;

use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use thiserror::Error;
use tracing::warn;

use search::SearchClient;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// The scraping fallback uses a fixed request timeout and a politeness delay
/// between consecutive requests to the same engine.
const SCRAPE_TIMEOUT: Duration = Duration::from_secs(10);
const POLITENESS_DELAY: Duration = Duration::from_secs(1);

/// Overview snippets are clipped to this many characters in the brief.
const OVERVIEW_CLIP: usize = 300;
const CULTURE_CLIP: usize = 200;
const MAX_NEWS_HEADLINES: usize = 3;

static URL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"https?://[^\s<>'"\)]+"#).unwrap());
static META_DESCRIPTION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<meta[^>]+name=["']description["'][^>]+content=["']([^"']+)["']"#).unwrap()
});
static TITLE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<title[^>]*>([^<]+)</title>").unwrap());

/// Internal failure domain, absorbed before it can reach a caller.
#[derive(Debug, Error)]
pub enum ResearchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Search capability, resolved once at startup.
pub enum SearchProvider {
    Available(SearchClient),
    Unavailable,
}

/// The three informational facets of a brief, each independently optional.
#[derive(Debug, Default)]
struct CompanyFacets {
    overview: String,
    news: Vec<String>,
    culture: String,
}

impl CompanyFacets {
    fn is_empty(&self) -> bool {
        self.overview.is_empty() && self.news.is_empty() && self.culture.is_empty()
    }
}

pub struct CompanyResearcher {
    provider: SearchProvider,
    http: Client,
}

impl CompanyResearcher {
    pub fn new(serpapi_key: Option<String>) -> Self {
        let provider = match serpapi_key {
            Some(key) if !key.is_empty() => SearchProvider::Available(SearchClient::new(key)),
            _ => SearchProvider::Unavailable,
        };
        Self {
            provider,
            http: Client::builder()
                .timeout(SCRAPE_TIMEOUT)
                .user_agent(USER_AGENT)
                .build()
                .expect("Failed to build HTTP client"),
        }
    }

    pub fn search_available(&self) -> bool {
        matches!(self.provider, SearchProvider::Available(_))
    }

    /// Researches `company_name` and returns a formatted brief, or a
    /// disclaimer when nothing could be gathered. Never raises.
    pub async fn research(&self, company_name: &str) -> String {
        let facets = match &self.provider {
            SearchProvider::Available(client) => {
                let facets = self.research_with_search(client, company_name).await;
                if facets.is_empty() {
                    self.research_with_scraping(company_name).await
                } else {
                    facets
                }
            }
            SearchProvider::Unavailable => self.research_with_scraping(company_name).await,
        };

        if facets.is_empty() {
            disclaimer(company_name)
        } else {
            format_brief(company_name, &facets)
        }
    }

    /// Up to three independent queries; each failure is absorbed and leaves
    /// its facet empty.
    async fn research_with_search(
        &self,
        client: &SearchClient,
        company_name: &str,
    ) -> CompanyFacets {
        let mut facets = CompanyFacets::default();

        match client.search(&format!("{company_name} company about"), 5).await {
            Ok(results) => {
                facets.overview = results
                    .iter()
                    .take(3)
                    .filter_map(|r| r.snippet.as_deref())
                    .collect::<Vec<_>>()
                    .join(" ");
            }
            Err(e) => warn!("company overview search failed: {e}"),
        }

        match client
            .search_news(&format!("{company_name} recent news"), 3)
            .await
        {
            Ok(results) => {
                facets.news = results
                    .iter()
                    .take(MAX_NEWS_HEADLINES)
                    .filter_map(|r| r.title.clone())
                    .collect();
            }
            Err(e) => warn!("company news search failed: {e}"),
        }

        match client
            .search(&format!("{company_name} company culture careers values"), 3)
            .await
        {
            Ok(results) => {
                facets.culture = results
                    .iter()
                    .filter_map(|r| r.snippet.as_deref())
                    .filter(|s| {
                        let lowered = s.to_lowercase();
                        lowered.contains("culture") || lowered.contains("values")
                    })
                    .take(2)
                    .collect::<Vec<_>>()
                    .join(" ");
            }
            Err(e) => warn!("company culture search failed: {e}"),
        }

        facets
    }

    async fn research_with_scraping(&self, company_name: &str) -> CompanyFacets {
        match self.scrape_company_site(company_name).await {
            Ok(facets) => facets,
            Err(e) => {
                warn!("scraping fallback failed for {company_name}: {e}");
                CompanyFacets::default()
            }
        }
    }

    /// Best-effort: locate the company site through an engine results page,
    /// then pull a description snippet from the site itself.
    async fn scrape_company_site(&self, company_name: &str) -> Result<CompanyFacets, ResearchError> {
        let query = company_name.replace(' ', "+");
        let results_page = self
            .http
            .get(format!("https://www.google.com/search?q={query}+official+website"))
            .send()
            .await?
            .text()
            .await?;

        let mut facets = CompanyFacets::default();
        if let Some(site) = find_company_link(&results_page, company_name) {
            tokio::time::sleep(POLITENESS_DELAY).await;
            let page = self.http.get(&site).send().await?.text().await?;
            facets.overview = page_snippet(&page);
        }
        Ok(facets)
    }
}

/// Picks the first non-engine link whose host mentions the company name.
fn find_company_link(results_page: &str, company_name: &str) -> Option<String> {
    let needle = company_name.to_lowercase().replace(' ', "");
    if needle.is_empty() {
        return None;
    }
    URL_RE
        .find_iter(results_page)
        .map(|m| m.as_str())
        .filter(|url| {
            let lowered = url.to_lowercase();
            !lowered.contains("google.com") && !lowered.contains("gstatic.com")
        })
        .find(|url| url.to_lowercase().contains(&needle))
        .map(str::to_string)
}

/// Meta description if present, else the page title, else nothing.
fn page_snippet(page: &str) -> String {
    META_DESCRIPTION_RE
        .captures(page)
        .or_else(|| TITLE_RE.captures(page))
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

fn disclaimer(company_name: &str) -> String {
    format!(
        "Limited company information available for {company_name}. \
        Consider researching the company manually for better personalization."
    )
}

/// Formats gathered facets into the brief consumed by the composer.
fn format_brief(company_name: &str, facets: &CompanyFacets) -> String {
    let mut brief = format!("Company Research: {company_name}\n\n");

    if !facets.overview.is_empty() {
        brief.push_str(&format!(
            "About the Company:\n{}...\n\n",
            clip(&facets.overview, OVERVIEW_CLIP)
        ));
    }

    if !facets.news.is_empty() {
        brief.push_str("Recent News/Updates:\n");
        for headline in facets.news.iter().take(MAX_NEWS_HEADLINES) {
            brief.push_str(&format!("\u{2022} {headline}\n"));
        }
        brief.push('\n');
    }

    if !facets.culture.is_empty() {
        brief.push_str(&format!(
            "Company Culture/Values:\n{}...\n\n",
            clip(&facets.culture, CULTURE_CLIP)
        ));
    }

    brief.push_str(
        "[Use this information to show genuine interest and knowledge about the company in your cover letter]",
    );
    brief
}

/// Char-safe prefix clip.
fn clip(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disclaimer_mentions_the_company() {
        let text = disclaimer("Acme Corp");
        assert!(!text.is_empty());
        assert!(text.contains("Acme Corp"));
    }

    #[test]
    fn test_brief_formats_all_three_facets() {
        let facets = CompanyFacets {
            overview: "Acme makes everything.".to_string(),
            news: vec!["Acme ships v2".to_string(), "Acme raises".to_string()],
            culture: "Acme values curiosity.".to_string(),
        };
        let brief = format_brief("Acme", &facets);
        assert!(brief.starts_with("Company Research: Acme"));
        assert!(brief.contains("About the Company:\nAcme makes everything."));
        assert!(brief.contains("\u{2022} Acme ships v2"));
        assert!(brief.contains("\u{2022} Acme raises"));
        assert!(brief.contains("Company Culture/Values:\nAcme values curiosity."));
    }

    #[test]
    fn test_brief_omits_empty_facets() {
        let facets = CompanyFacets {
            overview: String::new(),
            news: vec!["Acme ships v2".to_string()],
            culture: String::new(),
        };
        let brief = format_brief("Acme", &facets);
        assert!(!brief.contains("About the Company"));
        assert!(!brief.contains("Company Culture/Values"));
        assert!(brief.contains("Recent News/Updates"));
    }

    #[test]
    fn test_empty_facets_detection() {
        assert!(CompanyFacets::default().is_empty());
        let facets = CompanyFacets {
            overview: "x".to_string(),
            ..Default::default()
        };
        assert!(!facets.is_empty());
    }

    #[test]
    fn test_find_company_link_prefers_matching_host() {
        let page = r#"<a href="https://www.google.com/imgres?x">x</a>
            <a href="https://maps.gstatic.com/x">x</a>
            <a href="https://www.acmecorp.com/about">Acme Corp</a>"#;
        let link = find_company_link(page, "Acme Corp");
        assert_eq!(link.as_deref(), Some("https://www.acmecorp.com/about"));
    }

    #[test]
    fn test_find_company_link_returns_none_without_a_match() {
        let page = r#"<a href="https://www.example.com/">elsewhere</a>"#;
        assert!(find_company_link(page, "Acme Corp").is_none());
    }

    #[test]
    fn test_page_snippet_prefers_meta_description() {
        let page = r#"<html><head><title>Acme</title>
            <meta name="description" content="Acme makes everything."></head></html>"#;
        assert_eq!(page_snippet(page), "Acme makes everything.");
    }

    #[test]
    fn test_page_snippet_falls_back_to_title() {
        let page = "<html><head><title>Acme Corp — Home</title></head></html>";
        assert_eq!(page_snippet(page), "Acme Corp — Home");
    }

    #[test]
    fn test_clip_is_char_safe() {
        assert_eq!(clip("héllo", 2), "hé");
        assert_eq!(clip("short", 100), "short");
    }

    /// Without a credential and without reachable sources, research degrades
    /// to the disclaimer instead of raising.
    #[tokio::test]
    async fn test_research_without_credential_returns_a_string_mentioning_company() {
        let researcher = CompanyResearcher::new(None);
        assert!(!researcher.search_available());
        let brief = researcher.research("Nonexistent Example Widgets LLC 929292").await;
        assert!(!brief.is_empty());
        assert!(brief.contains("Nonexistent Example Widgets LLC 929292"));
    }
}
