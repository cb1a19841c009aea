//! End-to-end verification of every page contract.
//!
//! Scenarios assert what the site is supposed to do, never what the current
//! wiring happens to produce. With exactly one [`Defect`] seeded, exactly the
//! scenario that targets it fails.

use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

use serde::Serialize;
use url::Url;

use crate::browser::Browser;
use crate::config::SuiteConfig;
use crate::defects::{Defect, DefectSet};
use crate::runtime::Harness;
use crate::wiring::Wiring;
use crate::{Error, Result};

mod scenarios;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Scenario {
    ExploreNavigation,
    CounterIncrement,
    NewsletterSubmit,
    CaseInsensitiveSearch,
    TypeFilter,
    DamageSum,
    StatsCalculation,
    ContactSubmit,
    CounterReset,
    SearchNoMatch,
    TypeFilterAll,
    FaqToggle,
    PagesLoad,
    NavigationLinks,
    PokedexGrid,
}

impl Scenario {
    pub const ALL: [Scenario; 15] = [
        Scenario::ExploreNavigation,
        Scenario::CounterIncrement,
        Scenario::NewsletterSubmit,
        Scenario::CaseInsensitiveSearch,
        Scenario::TypeFilter,
        Scenario::DamageSum,
        Scenario::StatsCalculation,
        Scenario::ContactSubmit,
        Scenario::CounterReset,
        Scenario::SearchNoMatch,
        Scenario::TypeFilterAll,
        Scenario::FaqToggle,
        Scenario::PagesLoad,
        Scenario::NavigationLinks,
        Scenario::PokedexGrid,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Scenario::ExploreNavigation => "explore-navigation",
            Scenario::CounterIncrement => "counter-increment",
            Scenario::NewsletterSubmit => "newsletter-submit",
            Scenario::CaseInsensitiveSearch => "case-insensitive-search",
            Scenario::TypeFilter => "type-filter",
            Scenario::DamageSum => "damage-sum",
            Scenario::StatsCalculation => "stats-calculation",
            Scenario::ContactSubmit => "contact-submit",
            Scenario::CounterReset => "counter-reset",
            Scenario::SearchNoMatch => "search-no-match",
            Scenario::TypeFilterAll => "type-filter-all",
            Scenario::FaqToggle => "faq-toggle",
            Scenario::PagesLoad => "pages-load",
            Scenario::NavigationLinks => "navigation-links",
            Scenario::PokedexGrid => "pokedex-grid",
        }
    }

    /// The defect this scenario isolates, if any.
    pub fn target_defect(self) -> Option<Defect> {
        match self {
            Scenario::ExploreNavigation => Some(Defect::ExplorePath),
            Scenario::CounterIncrement => Some(Defect::IncrementSelector),
            Scenario::NewsletterSubmit => Some(Defect::NewsletterFormId),
            Scenario::CaseInsensitiveSearch => Some(Defect::CaseSensitiveSearch),
            Scenario::TypeFilter => Some(Defect::TypeFilterId),
            Scenario::DamageSum => Some(Defect::DamageConcatenation),
            Scenario::StatsCalculation => Some(Defect::StatsButtonId),
            Scenario::ContactSubmit => Some(Defect::ContactFormId),
            Scenario::CounterReset
            | Scenario::SearchNoMatch
            | Scenario::TypeFilterAll
            | Scenario::FaqToggle
            | Scenario::PagesLoad
            | Scenario::NavigationLinks
            | Scenario::PokedexGrid => None,
        }
    }

    /// The scenario that fails when `defect` is seeded.
    pub fn targeting(defect: Defect) -> Scenario {
        match defect {
            Defect::ExplorePath => Scenario::ExploreNavigation,
            Defect::IncrementSelector => Scenario::CounterIncrement,
            Defect::NewsletterFormId => Scenario::NewsletterSubmit,
            Defect::CaseSensitiveSearch => Scenario::CaseInsensitiveSearch,
            Defect::TypeFilterId => Scenario::TypeFilter,
            Defect::DamageConcatenation => Scenario::DamageSum,
            Defect::StatsButtonId => Scenario::StatsCalculation,
            Defect::ContactFormId => Scenario::ContactSubmit,
        }
    }

    async fn run(self, session: &mut Session) -> Result<()> {
        match self {
            Scenario::ExploreNavigation => scenarios::explore_navigation(session).await,
            Scenario::CounterIncrement => scenarios::counter_increment(session).await,
            Scenario::NewsletterSubmit => scenarios::newsletter_submit(session).await,
            Scenario::CaseInsensitiveSearch => scenarios::case_insensitive_search(session).await,
            Scenario::TypeFilter => scenarios::type_filter(session).await,
            Scenario::DamageSum => scenarios::damage_sum(session).await,
            Scenario::StatsCalculation => scenarios::stats_calculation(session).await,
            Scenario::ContactSubmit => scenarios::contact_submit(session).await,
            Scenario::CounterReset => scenarios::counter_reset(session).await,
            Scenario::SearchNoMatch => scenarios::search_no_match(session).await,
            Scenario::TypeFilterAll => scenarios::type_filter_all(session).await,
            Scenario::FaqToggle => scenarios::faq_toggle(session).await,
            Scenario::PagesLoad => scenarios::pages_load(session).await,
            Scenario::NavigationLinks => scenarios::navigation_links(session).await,
            Scenario::PokedexGrid => scenarios::pokedex_grid(session).await,
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scenario {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim();
        Scenario::ALL
            .into_iter()
            .find(|scenario| scenario.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| Error::Config(format!("unknown scenario: {name}")))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioOutcome {
    pub name: &'static str,
    pub target_defect: Option<Defect>,
    pub passed: bool,
    pub failure: Option<String>,
    pub elapsed: Duration,
}

#[derive(Debug, Clone, Serialize)]
pub struct SuiteReport {
    pub base_url: String,
    pub defects: DefectSet,
    pub outcomes: Vec<ScenarioOutcome>,
}

impl SuiteReport {
    pub fn failed(&self) -> Vec<&ScenarioOutcome> {
        self.outcomes.iter().filter(|outcome| !outcome.passed).collect()
    }

    pub fn all_passed(&self) -> bool {
        self.outcomes.iter().all(|outcome| outcome.passed)
    }

    pub fn failed_names(&self) -> Vec<&'static str> {
        self.failed().into_iter().map(|outcome| outcome.name).collect()
    }
}

impl fmt::Display for SuiteReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for outcome in &self.outcomes {
            let status = if outcome.passed { "ok" } else { "FAILED" };
            write!(
                f,
                "{:<26} {:<6} {:>6}ms",
                outcome.name,
                status,
                outcome.elapsed.as_millis()
            )?;
            if let Some(failure) = &outcome.failure {
                write!(f, "  {failure}")?;
            }
            writeln!(f)?;
        }
        let failed = self.failed().len();
        write!(
            f,
            "{} passed, {} failed (defects: {})",
            self.outcomes.len() - failed,
            failed,
            self.defects
        )
    }
}

/// Runs `scenarios` in order against `config.base_url`, each in a fresh
/// browser session.
pub async fn run_suite(
    config: &SuiteConfig,
    wiring: &Wiring,
    scenarios: &[Scenario],
) -> Result<SuiteReport> {
    let base_url = config
        .base_url
        .as_deref()
        .ok_or_else(|| Error::Config("suite needs a base url".into()))?;
    let base = site_base(base_url)?;
    tracing::info!(base = %base, defects = %wiring.defects(), scenarios = scenarios.len(), "running verification suite");

    let mut outcomes = Vec::with_capacity(scenarios.len());
    for &scenario in scenarios {
        let started = Instant::now();
        let result = match Session::new(config, wiring, base.clone()) {
            Ok(mut session) => scenario.run(&mut session).await,
            Err(err) => Err(err),
        };
        let elapsed = started.elapsed();
        let failure = result.err().map(|err| err.to_string());
        match &failure {
            None => tracing::info!(scenario = scenario.name(), ?elapsed, "passed"),
            Some(failure) => {
                tracing::warn!(scenario = scenario.name(), ?elapsed, failure = %failure, "failed")
            }
        }
        outcomes.push(ScenarioOutcome {
            name: scenario.name(),
            target_defect: scenario.target_defect(),
            passed: failure.is_none(),
            failure,
            elapsed,
        });
    }

    Ok(SuiteReport {
        base_url: base.to_string(),
        defects: wiring.defects(),
        outcomes,
    })
}

/// The site root as a directory URL, so relative page paths join under it.
fn site_base(base_url: &str) -> Result<Url> {
    let mut base =
        Url::parse(base_url).map_err(|err| Error::Config(format!("base url {base_url}: {err}")))?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.set_query(None);
    base.set_fragment(None);
    Ok(base)
}

/// One scenario's browser plus what it needs to judge the pages.
struct Session {
    browser: Browser,
    base: Url,
    settle_timeout: Duration,
    poll_interval: Duration,
    catalogue: Vec<String>,
}

impl Session {
    fn new(config: &SuiteConfig, wiring: &Wiring, base: Url) -> Result<Self> {
        Ok(Self {
            browser: Browser::new(wiring.clone())?,
            base,
            settle_timeout: config.settle_timeout,
            poll_interval: config.poll_interval,
            catalogue: wiring
                .pokedex()
                .entries()
                .iter()
                .map(|pokemon| pokemon.name.clone())
                .collect(),
        })
    }

    /// Loads a page by its site-relative path and requires a success status.
    async fn open(&mut self, path: &str) -> Result<()> {
        let url = self.base.join(path)?;
        let response = self.browser.goto(url.as_str()).await?;
        if !response.is_success() {
            return Err(Error::Http(format!(
                "GET {} returned {}",
                response.url, response.status
            )));
        }
        Ok(())
    }

    fn page(&self) -> Result<&Harness> {
        self.browser.page()
    }

    /// Waits for `predicate` to hold. The assertion that follows reports the
    /// mismatch when it never does.
    async fn settle<F>(&mut self, predicate: F) -> Result<()>
    where
        F: FnMut(&Harness) -> bool,
    {
        let held = self
            .browser
            .wait_until(self.settle_timeout, self.poll_interval, predicate)
            .await?;
        if !held {
            tracing::debug!(timeout = ?self.settle_timeout, "page did not settle");
        }
        Ok(())
    }
}
