use std::{fmt, str::FromStr};

use url::Url;

/// Transient state of one pagination run.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchSession {
    pub term: String,
    pub target_count: usize,
    pub page_index: u32,
}

impl SearchSession {
    pub fn new(term: &str, target_count: usize) -> Self {
        SearchSession {
            term: term.to_string(),
            target_count,
            page_index: 1,
        }
    }

    pub fn current_url(&self, base_url: &str) -> anyhow::Result<Url> {
        build_search_url(base_url, &self.term, self.page_index)
    }
}

/// `k` carries the form-encoded term (spaces become `+`), `page` the 1-based index.
pub fn build_search_url(base_url: &str, term: &str, page: u32) -> anyhow::Result<Url> {
    let url = Url::parse_with_params(base_url, &[("k", term), ("page", &page.to_string())])?;
    Ok(url)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Csv,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            _ => Err("Please choose a valid format (csv/json).".to_string()),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}
