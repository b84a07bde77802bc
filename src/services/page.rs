use std::time::Duration;

use anyhow::Context;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::configuration::BrowserSettings;

/// A rendered search results page that can be pointed at a new url and
/// queried for listing cards.
#[allow(async_fn_in_trait)]
pub trait SearchPage {
    type Card<'a>: ListingCard
    where
        Self: 'a;

    async fn open(&mut self, url: &Url) -> anyhow::Result<()>;

    async fn cards(&self, selector: &str) -> anyhow::Result<Vec<Self::Card<'_>>>;
}

/// Field reads inside one listing card. A missing element is `None`, never an
/// error.
#[allow(async_fn_in_trait)]
pub trait ListingCard {
    async fn text_of(&self, selector: &str) -> Option<String>;

    async fn attr_of(&self, selector: &str, attribute: &str) -> Option<String>;
}

impl ListingCard for ElementRef<'_> {
    async fn text_of(&self, selector: &str) -> Option<String> {
        let selector = Selector::parse(selector).ok()?;
        let element = self.select(&selector).next()?;
        let text: String = element.text().collect();

        Some(text.split_whitespace().collect::<Vec<&str>>().join(" "))
    }

    async fn attr_of(&self, selector: &str, attribute: &str) -> Option<String> {
        let selector = Selector::parse(selector).ok()?;
        self.select(&selector)
            .next()?
            .value()
            .attr(attribute)
            .map(|value| value.to_string())
    }
}

pub fn select_all<'a>(document: &'a Html, selector: &str) -> anyhow::Result<Vec<ElementRef<'a>>> {
    let selector = Selector::parse(selector)
        .map_err(|e| anyhow::anyhow!("Invalid selector {}: {:?}", selector, e))?;

    Ok(document.select(&selector).collect())
}

/// Fetches pages over plain HTTP and parses them without running scripts.
pub struct HttpPage {
    client: Client,
    document: Html,
}

impl HttpPage {
    pub fn new(settings: &BrowserSettings) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(settings.user_agent.clone())
            .cookie_store(true)
            .read_timeout(Duration::from_secs(30))
            .build()
            .context("Failed to build http client")?;

        Ok(HttpPage {
            client,
            document: Html::new_document(),
        })
    }
}

impl SearchPage for HttpPage {
    type Card<'a> = ElementRef<'a>;

    async fn open(&mut self, url: &Url) -> anyhow::Result<()> {
        let body = self
            .client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("Failed to fetch {}", url))?
            .error_for_status()?
            .text()
            .await?;

        self.document = Html::parse_document(&body);
        Ok(())
    }

    async fn cards(&self, selector: &str) -> anyhow::Result<Vec<ElementRef<'_>>> {
        select_all(&self.document, selector)
    }
}
