//! Pokemon index demo site, a deterministic DOM harness that drives it, and
//! the end-to-end verification suite that checks every page contract.
//!
//! Page behaviour is wired as Rust handlers ([`Wiring`]) over a small arena
//! DOM. The [`Browser`] loads pages over HTTP from the embedded [`Site`] and
//! the [`suite`] asserts on the resulting documents.

use std::collections::{HashMap, VecDeque};
use std::error::Error as StdError;
use std::fmt;
use std::rc::Rc;

mod core_dom_utils;
mod core_impl;
mod render;
mod selector;

pub mod browser;
pub mod calc;
pub mod config;
pub mod defects;
pub mod numeric;
pub mod pokedex;
pub mod runtime;
pub mod server;
pub mod site;
pub mod suite;
pub mod wiring;

pub use browser::{Browser, PageResponse};
pub use config::{ServeConfig, SuiteConfig};
pub use defects::{Defect, DefectSet};
pub use pokedex::{Pokedex, Pokemon, PokemonType, TypeFilter};
pub use runtime::{EventState, Harness, LocationNavigation, LocationNavigationKind};
pub use site::{Asset, Site};
pub use suite::{Scenario, ScenarioOutcome, SuiteReport, run_suite};
pub use wiring::Wiring;

use core_dom_utils::*;
use selector::*;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    HtmlParse(String),
    Dom(String),
    SelectorNotFound(String),
    UnsupportedSelector(String),
    TypeMismatch {
        selector: String,
        expected: String,
        actual: String,
    },
    AssertionFailed {
        selector: String,
        expected: String,
        actual: String,
        dom_snippet: String,
    },
    Navigation(String),
    Http(String),
    Io(String),
    Timeout(String),
    Config(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HtmlParse(msg) => write!(f, "html parse error: {msg}"),
            Self::Dom(msg) => write!(f, "dom error: {msg}"),
            Self::SelectorNotFound(selector) => write!(f, "selector not found: {selector}"),
            Self::UnsupportedSelector(selector) => write!(f, "unsupported selector: {selector}"),
            Self::TypeMismatch {
                selector,
                expected,
                actual,
            } => write!(
                f,
                "type mismatch for {selector}: expected {expected}, actual {actual}"
            ),
            Self::AssertionFailed {
                selector,
                expected,
                actual,
                dom_snippet,
            } => write!(
                f,
                "assertion failed for {selector}: expected {expected}, actual {actual}, snippet {dom_snippet}"
            ),
            Self::Navigation(msg) => write!(f, "navigation error: {msg}"),
            Self::Http(msg) => write!(f, "http error: {msg}"),
            Self::Io(msg) => write!(f, "io error: {msg}"),
            Self::Timeout(msg) => write!(f, "timed out: {msg}"),
            Self::Config(msg) => write!(f, "config error: {msg}"),
        }
    }
}

impl StdError for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else {
            Self::Http(err.to_string())
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::Navigation(err.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
enum NodeType {
    Document,
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    node_type: NodeType,
}

#[derive(Debug, Clone)]
struct Element {
    tag_name: String,
    attrs: HashMap<String, String>,
    value: String,
    disabled: bool,
    readonly: bool,
    required: bool,
}

#[derive(Debug, Clone)]
struct Dom {
    nodes: Vec<Node>,
    root: NodeId,
    id_index: HashMap<String, Vec<NodeId>>,
}

#[cfg(test)]
mod tests;
