// 📚 Catalog Store - constant pokemon table, validated once at startup
//
// The table is fixed at compile time. `Catalog::load` checks it, resolves the
// label-based evolution links into ids and afterwards exposes read accessors only.

use crate::error::CatalogError;
use crate::palette::Palette;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use tracing::{info, warn};

// ============================================================================
// ENTITY
// ============================================================================

/// Position of a pokemon in its evolution line.
///
/// `from` and `to` are display labels, not ids. `to` may list several
/// successors separated by `/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Evolution {
    pub from: Option<&'static str>,
    pub to: Option<&'static str>,
    /// Level at which this pokemon evolves into its successor
    pub level: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pokemon {
    pub id: u32,
    pub name: &'static str,
    pub categories: &'static [&'static str],
    /// Artwork URL, never fetched or validated here
    pub image: &'static str,
    pub evolution: Option<Evolution>,
}

impl Pokemon {
    /// Zero-padded display number, e.g. `#025`
    pub fn display_number(&self) -> String {
        format!("#{:03}", self.id)
    }

    pub fn has_category(&self, label: &str) -> bool {
        self.categories.iter().any(|c| *c == label)
    }

    pub fn evolution_level(&self) -> Option<u32> {
        self.evolution.and_then(|e| e.level)
    }
}

// ============================================================================
// CONSTANT DATA
// ============================================================================

const POKEMON: &[Pokemon] = &[
    Pokemon {
        id: 1,
        name: "Бульбазавр",
        categories: &["Трава", "Яд"],
        image: "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/other/official-artwork/1.png",
        evolution: Some(Evolution { from: None, to: Some("Ивизавр"), level: Some(16) }),
    },
    Pokemon {
        id: 2,
        name: "Ивизавр",
        categories: &["Трава", "Яд"],
        image: "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/other/official-artwork/2.png",
        evolution: Some(Evolution { from: Some("Бульбазавр"), to: Some("Венузавр"), level: Some(32) }),
    },
    Pokemon {
        id: 3,
        name: "Венузавр",
        categories: &["Трава", "Яд"],
        image: "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/other/official-artwork/3.png",
        evolution: Some(Evolution { from: Some("Ивизавр"), to: None, level: None }),
    },
    Pokemon {
        id: 4,
        name: "Чармандер",
        categories: &["Огонь"],
        image: "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/other/official-artwork/4.png",
        evolution: Some(Evolution { from: None, to: Some("Чармелеон"), level: Some(16) }),
    },
    Pokemon {
        id: 5,
        name: "Чармелеон",
        categories: &["Огонь"],
        image: "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/other/official-artwork/5.png",
        evolution: Some(Evolution { from: Some("Чармандер"), to: Some("Чаризард"), level: Some(36) }),
    },
    Pokemon {
        id: 6,
        name: "Чаризард",
        categories: &["Огонь", "Полет"],
        image: "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/other/official-artwork/6.png",
        evolution: Some(Evolution { from: Some("Чармелеон"), to: None, level: None }),
    },
    Pokemon {
        id: 7,
        name: "Сквиртл",
        categories: &["Вода"],
        image: "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/other/official-artwork/7.png",
        evolution: Some(Evolution { from: None, to: Some("Вартортл"), level: Some(16) }),
    },
    Pokemon {
        id: 8,
        name: "Вартортл",
        categories: &["Вода"],
        image: "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/other/official-artwork/8.png",
        evolution: Some(Evolution { from: Some("Сквиртл"), to: Some("Бластойз"), level: Some(36) }),
    },
    Pokemon {
        id: 9,
        name: "Бластойз",
        categories: &["Вода"],
        image: "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/other/official-artwork/9.png",
        evolution: Some(Evolution { from: Some("Вартортл"), to: None, level: None }),
    },
    Pokemon {
        id: 25,
        name: "Пикачу",
        categories: &["Электро"],
        image: "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/other/official-artwork/25.png",
        evolution: Some(Evolution { from: Some("Пичу"), to: Some("Райчу"), level: None }),
    },
    Pokemon {
        id: 133,
        name: "Иви",
        categories: &["Нормал"],
        image: "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/other/official-artwork/133.png",
        evolution: Some(Evolution { from: None, to: Some("Вапореон/Джолтеон/Флареон"), level: None }),
    },
    Pokemon {
        id: 150,
        name: "Мьюту",
        categories: &["Психо"],
        image: "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/other/official-artwork/150.png",
        evolution: None,
    },
];

const EVOLUTION_CHAINS: &[&[u32]] = &[&[1, 2, 3], &[4, 5, 6], &[7, 8, 9]];

// ============================================================================
// LOAD OPTIONS & LINK REPORT
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Fail on evolution labels that name no catalog entry
    pub strict_links: bool,
    /// Fail on categories without a color mapping
    pub strict_colors: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkDirection {
    From,
    To,
}

/// An evolution label part that could not be resolved to a catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DanglingLink {
    pub id: u32,
    pub direction: LinkDirection,
    pub label: &'static str,
}

#[derive(Debug, Clone, Default)]
struct ResolvedLinks {
    predecessor: Option<usize>,
    successors: Vec<usize>,
}

// ============================================================================
// CATALOG
// ============================================================================

#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<Pokemon>,
    by_id: HashMap<u32, usize>,
    palette: Palette,
    chains: Vec<Vec<usize>>,
    links: Vec<ResolvedLinks>,
    dangling: Vec<DanglingLink>,
}

impl Catalog {
    /// Load and validate the built-in table
    pub fn load(options: LoadOptions) -> Result<Self, CatalogError> {
        Self::build(POKEMON, EVOLUTION_CHAINS, Palette::builtin(), options)
    }

    pub(crate) fn build(
        records: &[Pokemon],
        chain_ids: &[&[u32]],
        palette: Palette,
        options: LoadOptions,
    ) -> Result<Self, CatalogError> {
        let mut by_id = HashMap::with_capacity(records.len());
        let mut by_name: HashMap<String, usize> = HashMap::with_capacity(records.len());

        for (idx, pokemon) in records.iter().enumerate() {
            if by_id.insert(pokemon.id, idx).is_some() {
                return Err(CatalogError::DuplicateId(pokemon.id));
            }
            if pokemon.categories.is_empty() {
                return Err(CatalogError::EmptyCategories {
                    id: pokemon.id,
                    name: pokemon.name.to_string(),
                });
            }
            by_name.entry(pokemon.name.to_lowercase()).or_insert(idx);
        }

        // Every category needs a color, or an explicit fallback
        let mut seen = HashSet::new();
        for label in records.iter().flat_map(|p| p.categories.iter()) {
            if seen.insert(*label) && !palette.contains(label) {
                if options.strict_colors {
                    return Err(CatalogError::UnmappedCategory {
                        label: label.to_string(),
                    });
                }
                warn!(category = *label, "category has no color mapping, using neutral");
            }
        }

        let mut chains = Vec::with_capacity(chain_ids.len());
        for (chain, ids) in chain_ids.iter().enumerate() {
            if ids.is_empty() {
                return Err(CatalogError::EmptyChain { chain });
            }
            let members = ids
                .iter()
                .map(|id| {
                    by_id
                        .get(id)
                        .copied()
                        .ok_or(CatalogError::UnknownChainMember { chain, id: *id })
                })
                .collect::<Result<Vec<_>, _>>()?;
            chains.push(members);
        }

        let mut links = vec![ResolvedLinks::default(); records.len()];
        let mut dangling = Vec::new();

        for (idx, pokemon) in records.iter().enumerate() {
            let Some(evolution) = pokemon.evolution else {
                continue;
            };

            if let Some(from) = evolution.from {
                // A pokemon has at most one predecessor; composite labels keep the first hit
                for part in link_parts(from) {
                    match by_name.get(&part.to_lowercase()) {
                        Some(&target) => {
                            links[idx].predecessor.get_or_insert(target);
                        }
                        None => dangling.push(DanglingLink {
                            id: pokemon.id,
                            direction: LinkDirection::From,
                            label: part,
                        }),
                    }
                }
            }

            if let Some(to) = evolution.to {
                for part in link_parts(to) {
                    match by_name.get(&part.to_lowercase()) {
                        Some(&target) => links[idx].successors.push(target),
                        None => dangling.push(DanglingLink {
                            id: pokemon.id,
                            direction: LinkDirection::To,
                            label: part,
                        }),
                    }
                }
            }
        }

        if let Some(first) = dangling.first() {
            if options.strict_links {
                return Err(CatalogError::DanglingEvolution {
                    id: first.id,
                    label: first.label.to_string(),
                });
            }
            for link in &dangling {
                warn!(
                    id = link.id,
                    label = link.label,
                    "evolution link does not name a catalog entry"
                );
            }
        }

        info!(
            pokemon = records.len(),
            chains = chains.len(),
            dangling_links = dangling.len(),
            "catalog loaded"
        );

        Ok(Catalog {
            entries: records.to_vec(),
            by_id,
            palette,
            chains,
            links,
            dangling,
        })
    }

    // ========================================================================
    // READ ACCESSORS
    // ========================================================================

    /// All entries in catalog order
    pub fn all(&self) -> &[Pokemon] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&Pokemon> {
        self.by_id.get(&id).map(|&idx| &self.entries[idx])
    }

    /// Case-insensitive exact name match
    pub fn find_by_name(&self, name: &str) -> Option<&Pokemon> {
        let needle = name.trim().to_lowercase();
        self.entries.iter().find(|p| p.name.to_lowercase() == needle)
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Chain groupings resolved to entries, in declaration order
    pub fn chain_groups(&self) -> impl Iterator<Item = Vec<&Pokemon>> + '_ {
        self.chains
            .iter()
            .map(move |chain| chain.iter().map(|&idx| &self.entries[idx]).collect())
    }

    pub fn predecessor(&self, id: u32) -> Option<&Pokemon> {
        let idx = *self.by_id.get(&id)?;
        self.links[idx].predecessor.map(|p| &self.entries[p])
    }

    pub fn successors(&self, id: u32) -> Vec<&Pokemon> {
        match self.by_id.get(&id) {
            Some(&idx) => self.links[idx]
                .successors
                .iter()
                .map(|&s| &self.entries[s])
                .collect(),
            None => Vec::new(),
        }
    }

    /// Evolution labels that did not resolve during load
    pub fn link_report(&self) -> &[DanglingLink] {
        &self.dangling
    }
}

fn link_parts(label: &'static str) -> impl Iterator<Item = &'static str> {
    label.split('/').map(str::trim).filter(|part| !part.is_empty())
}
