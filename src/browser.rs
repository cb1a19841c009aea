//! HTTP-backed browser session over a [`Harness`].

use std::time::Duration;

use serde::Serialize;
use tokio::time::{Instant, sleep};

use crate::runtime::Harness;
use crate::wiring::Wiring;
use crate::{Error, Result};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageResponse {
    pub url: String,
    pub status: u16,
}

impl PageResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Loads pages over HTTP, installs [`Wiring`] on each and follows the
/// navigations user actions trigger.
pub struct Browser {
    client: reqwest::Client,
    wiring: Wiring,
    page: Option<Harness>,
}

impl Browser {
    pub fn new(wiring: Wiring) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self::with_client(client, wiring))
    }

    pub fn with_client(client: reqwest::Client, wiring: Wiring) -> Self {
        Self {
            client,
            wiring,
            page: None,
        }
    }

    /// Fetches `url` and makes its body the current document, whatever the
    /// status.
    pub async fn goto(&mut self, url: &str) -> Result<PageResponse> {
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        let body = response.text().await?;
        tracing::debug!(url = %final_url, status, bytes = body.len(), "page loaded");

        self.page = Some(Harness::load(&final_url, &body, &self.wiring)?);
        Ok(PageResponse {
            url: final_url,
            status,
        })
    }

    pub fn page(&self) -> Result<&Harness> {
        self.page
            .as_ref()
            .ok_or_else(|| Error::Navigation("no page loaded".into()))
    }

    pub fn page_mut(&mut self) -> Result<&mut Harness> {
        self.page
            .as_mut()
            .ok_or_else(|| Error::Navigation("no page loaded".into()))
    }

    pub fn url(&self) -> Option<String> {
        self.page.as_ref().map(Harness::url)
    }

    pub fn text_content(&self, selector: &str) -> Result<String> {
        self.page()?.text_content(selector)
    }

    pub fn count(&self, selector: &str) -> Result<usize> {
        self.page()?.count(selector)
    }

    pub async fn click(&mut self, selector: &str) -> Result<()> {
        self.page_mut()?.click(selector)?;
        self.follow_pending_navigation().await
    }

    pub async fn fill(&mut self, selector: &str, text: &str) -> Result<()> {
        self.page_mut()?.type_text(selector, text)?;
        self.follow_pending_navigation().await
    }

    pub async fn select_option(&mut self, selector: &str, value: &str) -> Result<()> {
        self.page_mut()?.select_option(selector, value)?;
        self.follow_pending_navigation().await
    }

    pub async fn submit(&mut self, selector: &str) -> Result<()> {
        self.page_mut()?.submit(selector)?;
        self.follow_pending_navigation().await
    }

    /// Waits for `predicate` to hold on the current page. Returns whether it
    /// held.
    ///
    /// Handlers run to completion inside each action, so a loaded page only
    /// changes when a pending navigation is followed. While one is pending it
    /// is followed every `poll_interval` until `timeout`; without one the
    /// answer is final and returns at once.
    pub async fn wait_until<F>(
        &mut self,
        timeout: Duration,
        poll_interval: Duration,
        mut predicate: F,
    ) -> Result<bool>
    where
        F: FnMut(&Harness) -> bool,
    {
        let deadline = Instant::now() + timeout;
        loop {
            let page = self.page()?;
            if predicate(page) {
                return Ok(true);
            }
            if !page.has_pending_navigation() || Instant::now() >= deadline {
                return Ok(false);
            }
            sleep(poll_interval).await;
            self.follow_pending_navigation().await?;
        }
    }

    async fn follow_pending_navigation(&mut self) -> Result<()> {
        let pending = self.page_mut()?.take_pending_navigation();
        if let Some(url) = pending {
            tracing::debug!(%url, "following navigation");
            self.goto(url.as_str()).await?;
        }
        Ok(())
    }
}
