use anyhow::{Context, Result};

use crate::mail::{MailConfig, DEFAULT_SMTP_PORT, DEFAULT_SMTP_SERVER};
use crate::tracking::{TrackerConfig, DEFAULT_TABLE_NAME};

/// Application configuration loaded from environment variables.
///
/// Only the generation credential is required. Mail and tracking are optional
/// capability groups: each resolves into a component config at startup only
/// when its required variables are present, and the matching endpoints report
/// failure otherwise.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub serpapi_key: Option<String>,
    pub email_address: Option<String>,
    pub email_password: Option<String>,
    pub smtp_server: String,
    pub smtp_port: u16,
    pub airtable_api_key: Option<String>,
    pub airtable_base_id: Option<String>,
    pub airtable_table: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            serpapi_key: optional_env("SERPAPI_KEY"),
            email_address: optional_env("EMAIL_ADDRESS"),
            email_password: optional_env("EMAIL_PASSWORD"),
            smtp_server: std::env::var("SMTP_SERVER")
                .unwrap_or_else(|_| DEFAULT_SMTP_SERVER.to_string()),
            smtp_port: std::env::var("SMTP_PORT")
                .unwrap_or_else(|_| DEFAULT_SMTP_PORT.to_string())
                .parse::<u16>()
                .context("SMTP_PORT must be a valid port number")?,
            airtable_api_key: optional_env("AIRTABLE_API_KEY"),
            airtable_base_id: optional_env("AIRTABLE_BASE_ID"),
            airtable_table: std::env::var("AIRTABLE_TABLE")
                .unwrap_or_else(|_| DEFAULT_TABLE_NAME.to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Mail capability, available only with both address and credential.
    pub fn mail_config(&self) -> Option<MailConfig> {
        match (&self.email_address, &self.email_password) {
            (Some(address), Some(password)) => Some(MailConfig {
                address: address.clone(),
                password: password.clone(),
                smtp_server: self.smtp_server.clone(),
                smtp_port: self.smtp_port,
            }),
            _ => None,
        }
    }

    /// Tracking capability, available only with both credential and base id.
    pub fn tracker_config(&self) -> Option<TrackerConfig> {
        match (&self.airtable_api_key, &self.airtable_base_id) {
            (Some(api_key), Some(base_id)) => Some(TrackerConfig {
                api_key: api_key.clone(),
                base_id: base_id.clone(),
                table_name: self.airtable_table.clone(),
            }),
            _ => None,
        }
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Missing and empty are both treated as absent.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_config() -> Config {
        Config {
            anthropic_api_key: "sk-test".to_string(),
            serpapi_key: None,
            email_address: None,
            email_password: None,
            smtp_server: DEFAULT_SMTP_SERVER.to_string(),
            smtp_port: DEFAULT_SMTP_PORT,
            airtable_api_key: None,
            airtable_base_id: None,
            airtable_table: DEFAULT_TABLE_NAME.to_string(),
            port: 8080,
            rust_log: "info".to_string(),
        }
    }

    #[test]
    fn test_mail_config_requires_address_and_password() {
        let mut config = make_config();
        assert!(config.mail_config().is_none());

        config.email_address = Some("jane@example.com".to_string());
        assert!(config.mail_config().is_none());

        config.email_password = Some("app-password".to_string());
        let mail = config.mail_config().unwrap();
        assert_eq!(mail.smtp_server, "smtp.gmail.com");
        assert_eq!(mail.smtp_port, 587);
    }

    #[test]
    fn test_tracker_config_requires_key_and_base() {
        let mut config = make_config();
        assert!(config.tracker_config().is_none());

        config.airtable_api_key = Some("key".to_string());
        config.airtable_base_id = Some("appBASE".to_string());
        let tracker = config.tracker_config().unwrap();
        assert_eq!(tracker.table_name, "Job Applications");
    }
}
