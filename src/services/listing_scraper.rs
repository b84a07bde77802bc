use crate::{
    configuration::{BrowserSettings, Engine, ScraperSettings, Settings},
    domain::{ListingRecord, SearchSession},
};

use super::{collect, search, Droid, HttpPage, SearchPage};

enum ScrapeJob {
    FirstPage(String),
    Collect(SearchSession),
}

impl ScrapeJob {
    async fn run<P: SearchPage>(
        self,
        page: &mut P,
        settings: &ScraperSettings,
    ) -> anyhow::Result<Vec<ListingRecord>> {
        match self {
            ScrapeJob::FirstPage(term) => search(page, &term, settings).await,
            ScrapeJob::Collect(session) => collect(page, session, settings).await,
        }
    }
}

/// Entry point for both front ends. Every call opens its own page session and
/// closes it before returning, whether the job succeeded or not.
#[derive(Clone, Debug)]
pub struct ListingScraper {
    browser: BrowserSettings,
    scraper: ScraperSettings,
}

impl ListingScraper {
    pub fn new(browser: BrowserSettings, scraper: ScraperSettings) -> Self {
        ListingScraper { browser, scraper }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.browser.clone(), settings.scraper.clone())
    }

    pub fn default_limit(&self) -> usize {
        self.scraper.default_limit
    }

    pub async fn search(&self, term: &str) -> anyhow::Result<Vec<ListingRecord>> {
        self.run(ScrapeJob::FirstPage(term.to_string())).await
    }

    pub async fn collect(
        &self,
        term: &str,
        target_count: usize,
    ) -> anyhow::Result<Vec<ListingRecord>> {
        self.run(ScrapeJob::Collect(SearchSession::new(term, target_count)))
            .await
    }

    async fn run(&self, job: ScrapeJob) -> anyhow::Result<Vec<ListingRecord>> {
        match self.browser.engine {
            Engine::Webdriver => {
                let mut droid = Droid::launch(&self.browser).await?;
                let result = job.run(&mut droid, &self.scraper).await;
                droid.quit().await;
                result
            }
            Engine::Http => {
                let mut page = HttpPage::new(&self.browser)?;
                job.run(&mut page, &self.scraper).await
            }
        }
    }
}
