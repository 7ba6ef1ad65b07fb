use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use board_client::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_PAGE_SIZE, HtmlPolicy};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub base_url: String,
    pub page_size: u32,
    pub request_timeout_secs: u64,
    pub sanitize_html: bool,
    pub log_level: String,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let base_url = lookup("BOARD_API_BASE_URL")
            .map(|raw| raw.trim().to_string())
            .filter(|raw| !raw.is_empty())
            .map(normalize_server)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let page_size = parse_positive(&lookup, "BOARD_PAGE_SIZE", u64::from(DEFAULT_PAGE_SIZE))?;
        let page_size = u32::try_from(page_size).context("BOARD_PAGE_SIZE is too large")?;
        let request_timeout_secs = parse_positive(&lookup, "BOARD_HTTP_TIMEOUT_SECS", 15)?;
        let sanitize_html = match lookup("BOARD_SANITIZE_HTML") {
            Some(raw) => parse_flag(&raw)
                .ok_or_else(|| anyhow!("BOARD_SANITIZE_HTML must be true or false"))?,
            None => false,
        };
        let log_level = lookup("LOG_LEVEL")
            .or_else(|| lookup("RUST_LOG"))
            .unwrap_or_else(|| "warn".to_string());

        Ok(Self {
            base_url,
            page_size,
            request_timeout_secs,
            sanitize_html,
            log_level,
        })
    }

    /// Применяет флаги командной строки поверх окружения.
    pub fn with_overrides(mut self, server: Option<String>, page_size: Option<u32>) -> Self {
        if let Some(server) = server {
            self.base_url = normalize_server(server);
        }
        if let Some(page_size) = page_size.filter(|size| *size > 0) {
            self.page_size = page_size;
        }
        self
    }

    pub fn client_config(&self) -> ClientConfig {
        let html_policy = if self.sanitize_html {
            HtmlPolicy::Sanitized
        } else {
            HtmlPolicy::Trusted
        };

        ClientConfig {
            base_url: self.base_url.clone(),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            page_size: self.page_size,
            html_policy,
            ..ClientConfig::default()
        }
    }
}

pub fn normalize_server(server: String) -> String {
    if server.starts_with("http://") || server.starts_with("https://") {
        return server;
    }

    format!("http://{server}")
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_positive(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: u64,
) -> Result<u64> {
    let value = lookup(key)
        .unwrap_or_else(|| default.to_string())
        .trim()
        .parse::<u64>()
        .with_context(|| format!("Failed to parse {key}, expecting positive integer"))?;

    if value == 0 {
        return Err(anyhow!("{key} must be > 0"));
    }
    Ok(value)
}
