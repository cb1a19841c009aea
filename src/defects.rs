//! The eight seeded defects the site originally shipped with.
//!
//! Each one is a small mismatch between page markup and wiring. The wiring
//! consults a [`DefectSet`] so the suite can prove that it catches every
//! defect on its own.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Defect {
    ExplorePath,
    IncrementSelector,
    NewsletterFormId,
    CaseSensitiveSearch,
    TypeFilterId,
    DamageConcatenation,
    StatsButtonId,
    ContactFormId,
}

impl Defect {
    pub const ALL: [Defect; 8] = [
        Defect::ExplorePath,
        Defect::IncrementSelector,
        Defect::NewsletterFormId,
        Defect::CaseSensitiveSearch,
        Defect::TypeFilterId,
        Defect::DamageConcatenation,
        Defect::StatsButtonId,
        Defect::ContactFormId,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Defect::ExplorePath => "explore-path",
            Defect::IncrementSelector => "increment-selector",
            Defect::NewsletterFormId => "newsletter-form-id",
            Defect::CaseSensitiveSearch => "case-sensitive-search",
            Defect::TypeFilterId => "type-filter-id",
            Defect::DamageConcatenation => "damage-concatenation",
            Defect::StatsButtonId => "stats-button-id",
            Defect::ContactFormId => "contact-form-id",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Defect::ExplorePath => "explore button navigates to pokedex.html",
            Defect::IncrementSelector => "counter wiring looks up .increment-button",
            Defect::NewsletterFormId => "newsletter wiring looks up #subscribe-form",
            Defect::CaseSensitiveSearch => "search compares names without case folding",
            Defect::TypeFilterId => "type filter wiring looks up #pokemon-filter",
            Defect::DamageConcatenation => "damage total joins the inputs as strings",
            Defect::StatsButtonId => "stats wiring looks up #calc-stats",
            Defect::ContactFormId => "contact wiring looks up #contact-form-submit",
        }
    }

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl fmt::Display for Defect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Defect {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|defect| defect.as_str() == name)
            .ok_or_else(|| Error::Config(format!("unknown defect: {name}")))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DefectSet(u8);

impl DefectSet {
    pub const fn none() -> Self {
        Self(0)
    }

    pub const fn all() -> Self {
        Self(u8::MAX)
    }

    pub fn only(defect: Defect) -> Self {
        Self::none().with(defect)
    }

    #[must_use]
    pub fn with(self, defect: Defect) -> Self {
        Self(self.0 | defect.bit())
    }

    pub fn contains(self, defect: Defect) -> bool {
        self.0 & defect.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Defect> {
        Defect::ALL
            .into_iter()
            .filter(move |defect| self.contains(*defect))
    }
}

impl FromIterator<Defect> for DefectSet {
    fn from_iter<I: IntoIterator<Item = Defect>>(iter: I) -> Self {
        iter.into_iter().fold(Self::none(), Self::with)
    }
}

impl FromStr for DefectSet {
    type Err = Error;

    /// Comma-separated defect names, `all`, or `none`.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "" | "none" => Ok(Self::none()),
            "all" => Ok(Self::all()),
            list => list
                .split(',')
                .filter(|part| !part.trim().is_empty())
                .map(Defect::from_str)
                .collect(),
        }
    }
}

impl fmt::Display for DefectSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("none");
        }
        let names = self.iter().map(Defect::as_str).collect::<Vec<_>>();
        f.write_str(&names.join(","))
    }
}

impl Serialize for DefectSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}
