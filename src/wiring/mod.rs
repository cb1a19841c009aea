//! Page behaviour, installed onto every loaded document.
//!
//! All pages share one wiring, so each module looks up its own elements and
//! skips itself when any of them is missing.

use std::sync::Arc;

use crate::defects::{Defect, DefectSet};
use crate::pokedex::Pokedex;
use crate::runtime::Harness;
use crate::{NodeId, Result};

mod anchors;
mod calculator_page;
mod contact_page;
mod index_page;
mod pokedex_page;

const CONFIRMATION_COLOR: &str = "#28a745";

#[derive(Debug, Clone)]
pub struct Wiring {
    pokedex: Arc<Pokedex>,
    defects: DefectSet,
}

impl Default for Wiring {
    fn default() -> Self {
        Self::new(Arc::new(Pokedex::builtin()))
    }
}

impl Wiring {
    pub fn new(pokedex: Arc<Pokedex>) -> Self {
        Self {
            pokedex,
            defects: DefectSet::none(),
        }
    }

    /// Wiring with `defects` reintroduced.
    pub fn seeded(defects: DefectSet) -> Self {
        Self::default().with_defects(defects)
    }

    #[must_use]
    pub fn with_defects(mut self, defects: DefectSet) -> Self {
        self.defects = defects;
        self
    }

    pub fn defects(&self) -> DefectSet {
        self.defects
    }

    pub fn pokedex(&self) -> &Pokedex {
        &self.pokedex
    }

    pub(crate) fn install(&self, harness: &mut Harness) -> Result<()> {
        index_page::install(harness, self)?;
        pokedex_page::install(harness, self)?;
        calculator_page::install(harness, self)?;
        contact_page::install(harness, self)?;
        anchors::install(harness)?;
        Ok(())
    }

    fn seeded_with(&self, defect: Defect) -> bool {
        self.defects.contains(defect)
    }

    /// Picks the lookup the page code uses: the correct one, or the one the
    /// defect swaps in.
    fn lookup(&self, defect: Defect, correct: &'static str, seeded: &'static str) -> &'static str {
        if self.seeded_with(defect) { seeded } else { correct }
    }
}

fn element_by_id(harness: &Harness, id: &str) -> Option<NodeId> {
    harness.dom.by_id(id)
}

fn element_value(harness: &Harness, id: &str) -> Result<String> {
    match element_by_id(harness, id) {
        Some(node) => harness.dom.value(node),
        None => Ok(String::new()),
    }
}
