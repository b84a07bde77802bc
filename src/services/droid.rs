use anyhow::Context;
use thirtyfour::{prelude::*, ChromiumLikeCapabilities};
use url::Url;

use crate::configuration::BrowserSettings;

use super::{ListingCard, SearchPage};

/// A Chrome session driven over WebDriver. Dropping it still ends the
/// session; `quit` does so in order and logs a failure to close.
pub struct Droid {
    pub driver: WebDriver,
}

impl Droid {
    pub async fn launch(settings: &BrowserSettings) -> anyhow::Result<Self> {
        let mut caps = DesiredCapabilities::chrome();
        if settings.headless {
            caps.set_headless()?;
        }
        caps.add_arg("--disable-gpu")?;
        caps.add_arg("--log-level=3")?;
        caps.add_arg(&format!("--window-size={}", settings.window_size))?;
        caps.add_arg("--start-maximized")?;
        caps.add_arg(&format!("--user-agent={}", settings.user_agent))?;

        let driver = WebDriver::new(settings.webdriver_url.as_str(), caps)
            .await
            .with_context(|| {
                format!(
                    "Failed to start a browser session on {}",
                    settings.webdriver_url
                )
            })?;
        log::info!("Driver initiated on {}", settings.webdriver_url);

        Ok(Droid { driver })
    }

    pub async fn quit(self) {
        match self.driver.quit().await {
            Ok(_) => log::info!("Driver quit"),
            Err(e) => log::error!("Failed to quit browser session: {:?}", e),
        }
    }
}

impl SearchPage for Droid {
    type Card<'a> = WebElement;

    async fn open(&mut self, url: &Url) -> anyhow::Result<()> {
        self.driver
            .goto(url.as_str())
            .await
            .with_context(|| format!("Failed to visit {}", url))?;
        Ok(())
    }

    async fn cards(&self, selector: &str) -> anyhow::Result<Vec<WebElement>> {
        Ok(self.driver.find_all(By::Css(selector)).await?)
    }
}

impl ListingCard for WebElement {
    async fn text_of(&self, selector: &str) -> Option<String> {
        self.find(By::Css(selector)).await.ok()?.text().await.ok()
    }

    async fn attr_of(&self, selector: &str, attribute: &str) -> Option<String> {
        self.find(By::Css(selector))
            .await
            .ok()?
            .attr(attribute)
            .await
            .ok()?
    }
}
