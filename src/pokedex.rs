//! The fixed Pokemon data set and the pure search/filter logic over it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use crate::Error;

const ARTWORK_BASE: &str =
    "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/other/official-artwork";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PokemonType {
    Grass,
    Fire,
    Water,
    Electric,
    Psychic,
}

impl PokemonType {
    pub const ALL: [PokemonType; 5] = [
        PokemonType::Fire,
        PokemonType::Water,
        PokemonType::Grass,
        PokemonType::Electric,
        PokemonType::Psychic,
    ];

    pub fn key(self) -> &'static str {
        match self {
            PokemonType::Grass => "grass",
            PokemonType::Fire => "fire",
            PokemonType::Water => "water",
            PokemonType::Electric => "electric",
            PokemonType::Psychic => "psychic",
        }
    }
}

impl fmt::Display for PokemonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for PokemonType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.key() == s)
            .ok_or_else(|| Error::Config(format!("unknown pokemon type: {s}")))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pokemon {
    pub id: u32,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: PokemonType,
    pub img: String,
}

impl Pokemon {
    pub fn new(id: u32, name: &str, kind: PokemonType) -> Self {
        Self {
            id,
            name: name.to_string(),
            kind,
            img: format!("{ARTWORK_BASE}/{id}.png"),
        }
    }
}

/// Value of the type filter select: the `all` sentinel or a type key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeFilter {
    All,
    Key(String),
}

impl TypeFilter {
    pub fn from_value(value: &str) -> Self {
        if value == "all" {
            Self::All
        } else {
            Self::Key(value.to_string())
        }
    }
}

/// Read-only, ordered collection of entries. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pokedex {
    entries: Vec<Pokemon>,
}

impl Default for Pokedex {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Pokedex {
    pub fn new(entries: Vec<Pokemon>) -> Self {
        Self { entries }
    }

    pub fn builtin() -> Self {
        use PokemonType::*;
        Self::new(vec![
            Pokemon::new(1, "Bulbasaur", Grass),
            Pokemon::new(4, "Charmander", Fire),
            Pokemon::new(7, "Squirtle", Water),
            Pokemon::new(25, "Pikachu", Electric),
            Pokemon::new(39, "Jigglypuff", Psychic),
            Pokemon::new(94, "Gengar", Psychic),
            Pokemon::new(133, "Eevee", Fire),
            Pokemon::new(143, "Snorlax", Fire),
            Pokemon::new(150, "Mewtwo", Psychic),
            Pokemon::new(6, "Charizard", Fire),
            Pokemon::new(9, "Blastoise", Water),
            Pokemon::new(3, "Venusaur", Grass),
        ])
    }

    pub fn entries(&self) -> &[Pokemon] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Case-insensitive substring match on names. Both sides are NFC
    /// normalized before lowercasing so composed and decomposed accents
    /// compare equal. An empty query matches nothing.
    pub fn search(&self, query: &str) -> Vec<&Pokemon> {
        if query.is_empty() {
            return Vec::new();
        }
        let needle = fold_case(query);
        self.entries
            .iter()
            .filter(|entry| fold_case(&entry.name).contains(&needle))
            .collect()
    }

    /// Exact-case substring match.
    pub fn search_case_sensitive(&self, query: &str) -> Vec<&Pokemon> {
        if query.is_empty() {
            return Vec::new();
        }
        self.entries
            .iter()
            .filter(|entry| entry.name.contains(query))
            .collect()
    }

    pub fn filter(&self, filter: &TypeFilter) -> Vec<&Pokemon> {
        match filter {
            TypeFilter::All => self.entries.iter().collect(),
            TypeFilter::Key(key) => self
                .entries
                .iter()
                .filter(|entry| entry.kind.key() == key)
                .collect(),
        }
    }
}

fn fold_case(value: &str) -> String {
    value.nfc().collect::<String>().to_lowercase()
}
