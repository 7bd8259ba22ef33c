//! Search capability client (SerpApi). Constructed only when a credential was
//! present at startup — downstream code branches on resolved availability,
//! never on the raw credential.

use reqwest::Client;
use serde::Deserialize;

use super::ResearchError;

const SERPAPI_URL: &str = "https://serpapi.com/search.json";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    organic_results: Vec<OrganicResult>,
    #[serde(default)]
    news_results: Vec<NewsResult>,
}

/// One organic web search result. All parts are optional on the wire.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrganicResult {
    pub title: Option<String>,
    pub link: Option<String>,
    pub snippet: Option<String>,
}

/// One news search result.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewsResult {
    pub title: Option<String>,
    pub link: Option<String>,
}

pub struct SearchClient {
    http: Client,
    api_key: String,
}

impl SearchClient {
    pub fn new(api_key: String) -> Self {
        Self {
            http: Client::new(),
            api_key,
        }
    }

    /// General web search, `limit` results.
    pub async fn search(&self, query: &str, limit: u8) -> Result<Vec<OrganicResult>, ResearchError> {
        let response = self.request(query, limit, None).await?;
        Ok(response.organic_results)
    }

    /// News-filtered search, `limit` results.
    pub async fn search_news(&self, query: &str, limit: u8) -> Result<Vec<NewsResult>, ResearchError> {
        let response = self.request(query, limit, Some("nws")).await?;
        Ok(response.news_results)
    }

    async fn request(
        &self,
        query: &str,
        limit: u8,
        result_type: Option<&str>,
    ) -> Result<SearchResponse, ResearchError> {
        let mut params = vec![
            ("q", query.to_string()),
            ("api_key", self.api_key.clone()),
            ("num", limit.to_string()),
        ];
        if let Some(tbm) = result_type {
            params.push(("tbm", tbm.to_string()));
        }

        let response = self
            .http
            .get(SERPAPI_URL)
            .query(&params)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json::<SearchResponse>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_tolerates_missing_result_lists() {
        let parsed: SearchResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.organic_results.is_empty());
        assert!(parsed.news_results.is_empty());
    }

    #[test]
    fn test_organic_results_parse_partial_items() {
        let json = r#"{
            "organic_results": [
                {"title": "Acme Corp", "snippet": "Acme makes everything."},
                {"link": "https://acme.example"}
            ]
        }"#;
        let parsed: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.organic_results.len(), 2);
        assert_eq!(
            parsed.organic_results[0].snippet.as_deref(),
            Some("Acme makes everything.")
        );
        assert!(parsed.organic_results[1].title.is_none());
    }

    #[test]
    fn test_news_results_parse_titles() {
        let json = r#"{"news_results": [{"title": "Acme ships v2"}]}"#;
        let parsed: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.news_results[0].title.as_deref(), Some("Acme ships v2"));
    }
}
