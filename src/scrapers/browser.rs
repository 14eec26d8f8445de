use crate::scrapers::helpers::pause;
use crate::scrapers::traits::PageNavigator;
use crate::scrapers::types::{PageAdvance, Settle};
use anyhow::{Context, Result};
use headless_chrome::{Browser, LaunchOptions, Tab};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Headless Chrome session with a single tab shared by every source
pub struct ChromeNavigator {
    browser: Browser,
    tab: Arc<Tab>,
}

impl ChromeNavigator {
    /// Launch Chrome and open the shared tab
    pub fn launch(navigation_timeout: Duration) -> Result<Self> {
        info!("Launching headless Chrome...");

        let options = LaunchOptions::default_builder()
            .headless(true)
            .idle_browser_timeout(navigation_timeout * 2)
            .build()
            .context("Failed to build launch options")?;

        let browser = Browser::new(options).context("Failed to launch Chrome browser")?;
        let tab = browser.new_tab().context("Failed to open browser tab")?;
        tab.set_default_timeout(navigation_timeout);

        Ok(Self { browser, tab })
    }

    /// Close the tab before the browser process is dropped
    pub fn shutdown(self) {
        debug!("Closing browser session");
        if let Err(e) = self.tab.close(false) {
            warn!("Failed to close browser tab: {:#}", e);
        }
        drop(self.browser);
    }
}

impl PageNavigator for ChromeNavigator {
    fn open(&self, url: &str) -> Result<()> {
        debug!("Opening {}", url);
        self.tab
            .navigate_to(url)
            .with_context(|| format!("Failed to navigate to {}", url))?;
        self.tab
            .wait_until_navigated()
            .with_context(|| format!("Timed out loading {}", url))?;
        Ok(())
    }

    fn content(&self) -> Result<String> {
        self.tab.get_content().context("Failed to read page HTML")
    }

    fn advance(&self, advance: &PageAdvance) -> Result<()> {
        let control = self
            .tab
            .wait_for_element(&advance.selector)
            .with_context(|| format!("Next-page control {} not found", advance.selector))?;
        control
            .click()
            .with_context(|| format!("Failed to click {}", advance.selector))?;

        match advance.settle {
            Settle::Navigation => {
                self.tab.wait_until_navigated().context("Timed out waiting for next page")?;
            }
            Settle::NavigationThenDelay(delay) => {
                self.tab.wait_until_navigated().context("Timed out waiting for next page")?;
                pause(delay);
            }
            Settle::Delay(delay) => pause(delay),
        }
        Ok(())
    }
}
