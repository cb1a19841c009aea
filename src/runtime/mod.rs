//! One page session: a parsed document plus the listeners wired onto it.
//!
//! A [`Harness`] never swaps its own document. Navigations are recorded and
//! left pending for the [`Browser`](crate::Browser) to follow.

use super::*;
use crate::core_impl::{is_submit_control, is_text_entry_control, parse_html};
use crate::wiring::Wiring;
use url::Url;

mod assertions;
mod events;
mod navigation;
mod trace;
mod user_actions;

pub use events::EventState;
use events::ListenerStore;
pub use navigation::{LocationNavigation, LocationNavigationKind};
use trace::TraceState;

const BLANK_URL: &str = "about:blank";

pub struct Harness {
    pub(crate) dom: Dom,
    listeners: ListenerStore,
    document_url: Url,
    navigations: Vec<LocationNavigation>,
    pending_navigation: Option<Url>,
    scrolled_to: Option<NodeId>,
    trace_state: TraceState,
}

impl Harness {
    pub fn from_html(html: &str) -> Result<Self> {
        Self::from_html_with_url(BLANK_URL, html)
    }

    pub fn from_html_with_url(url: &str, html: &str) -> Result<Self> {
        let document_url = Url::parse(url)?;
        let dom = parse_html(html)?;
        Ok(Self {
            dom,
            listeners: ListenerStore::default(),
            document_url,
            navigations: Vec::new(),
            pending_navigation: None,
            scrolled_to: None,
            trace_state: TraceState::default(),
        })
    }

    /// Parses `html` as the document at `url` and installs the page wiring.
    pub fn load(url: &str, html: &str, wiring: &Wiring) -> Result<Self> {
        let mut harness = Self::from_html_with_url(url, html)?;
        wiring.install(&mut harness)?;
        harness.trace_line(format!("[load] {url}"));
        Ok(harness)
    }
}
