// 🧬 Chain Assembler - evolution groupings resolved into display links
//
// Chain member ids are checked when the catalog loads, so assembly itself
// cannot fail.

use crate::catalog::{Catalog, Pokemon};
use serde::Serialize;

/// One card in an evolution chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChainLink<'a> {
    pub pokemon: &'a Pokemon,
    /// Level annotation shown under the card
    pub level: Option<u32>,
    /// Draw an arrow to the next card
    pub connector: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvolutionChain<'a> {
    pub links: Vec<ChainLink<'a>>,
}

impl<'a> EvolutionChain<'a> {
    fn from_members(members: Vec<&'a Pokemon>) -> Self {
        let last = members.len().saturating_sub(1);
        let links = members
            .into_iter()
            .enumerate()
            .map(|(i, pokemon)| ChainLink {
                pokemon,
                level: pokemon.evolution_level(),
                connector: i < last,
            })
            .collect();

        EvolutionChain { links }
    }

    pub fn names(&self) -> Vec<&'a str> {
        self.links.iter().map(|link| link.pokemon.name).collect()
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

/// Resolve every chain grouping, preserving grouping and member order
pub fn assemble(catalog: &Catalog) -> Vec<EvolutionChain<'_>> {
    catalog
        .chain_groups()
        .map(EvolutionChain::from_members)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::LoadOptions;

    #[test]
    fn test_first_chain_resolves_in_order_with_levels() {
        let catalog = Catalog::load(LoadOptions::default()).unwrap();
        let chains = assemble(&catalog);

        let first = &chains[0];
        assert_eq!(first.names(), vec!["Бульбазавр", "Ивизавр", "Венузавр"]);

        let levels: Vec<Option<u32>> = first.links.iter().map(|l| l.level).collect();
        assert_eq!(levels, vec![Some(16), Some(32), None]);
    }

    #[test]
    fn test_connectors_on_all_but_last() {
        let catalog = Catalog::load(LoadOptions::default()).unwrap();

        for chain in assemble(&catalog) {
            let connectors: Vec<bool> = chain.links.iter().map(|l| l.connector).collect();
            assert_eq!(connectors, vec![true, true, false]);
        }
    }

    #[test]
    fn test_all_groupings_assembled() {
        let catalog = Catalog::load(LoadOptions::default()).unwrap();
        let chains = assemble(&catalog);

        assert_eq!(chains.len(), 3);
        assert_eq!(chains[1].names(), vec!["Чармандер", "Чармелеон", "Чаризард"]);
        assert_eq!(chains[2].links[1].level, Some(36));
    }

    #[test]
    fn test_single_member_chain_has_no_connector() {
        let chain = EvolutionChain::from_members(vec![]);
        assert!(chain.is_empty());

        let catalog = Catalog::load(LoadOptions::default()).unwrap();
        let mewtwo = catalog.get(150).unwrap();
        let chain = EvolutionChain::from_members(vec![mewtwo]);

        assert_eq!(chain.len(), 1);
        assert!(!chain.links[0].connector);
        assert_eq!(chain.links[0].level, None);
    }
}
