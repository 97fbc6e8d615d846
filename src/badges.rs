// 🏷️ Category Badges - the "all" badge plus one badge per distinct category

use crate::catalog::Catalog;
use crate::palette::ColorToken;
use serde::Serialize;
use std::collections::HashSet;

pub const ALL_LABEL: &str = "Все";

/// Distinct category labels in order of first appearance
pub fn category_labels(catalog: &Catalog) -> Vec<&'static str> {
    let mut seen = HashSet::new();
    catalog
        .all()
        .iter()
        .flat_map(|p| p.categories.iter().copied())
        .filter(|label| seen.insert(*label))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Badge {
    /// `None` is the "all" badge
    pub category: Option<&'static str>,
    pub color: ColorToken,
    pub selected: bool,
}

impl Badge {
    pub fn label(&self) -> &'static str {
        self.category.unwrap_or(ALL_LABEL)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BadgeBar {
    pub badges: Vec<Badge>,
}

impl BadgeBar {
    pub fn new(catalog: &Catalog, selected: Option<&str>) -> Self {
        let palette = catalog.palette();

        let mut badges = vec![Badge {
            category: None,
            color: ColorToken::Neutral,
            selected: selected.is_none(),
        }];
        badges.extend(category_labels(catalog).into_iter().map(|label| Badge {
            category: Some(label),
            color: palette.color_for(label),
            selected: selected == Some(label),
        }));

        BadgeBar { badges }
    }

    pub fn len(&self) -> usize {
        self.badges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.badges.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Badge> {
        self.badges.get(index)
    }

    pub fn selected_index(&self) -> usize {
        self.badges.iter().position(|b| b.selected).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::LoadOptions;

    #[test]
    fn test_labels_in_first_appearance_order() {
        let catalog = Catalog::load(LoadOptions::default()).unwrap();

        assert_eq!(
            category_labels(&catalog),
            vec!["Трава", "Яд", "Огонь", "Полет", "Вода", "Электро", "Нормал", "Психо"]
        );
    }

    #[test]
    fn test_labels_are_distinct_and_complete() {
        let catalog = Catalog::load(LoadOptions::default()).unwrap();
        let labels = category_labels(&catalog);

        let unique: HashSet<_> = labels.iter().collect();
        assert_eq!(unique.len(), labels.len());

        for pokemon in catalog.all() {
            for category in pokemon.categories {
                assert!(labels.contains(category));
            }
        }
    }

    #[test]
    fn test_all_badge_first_and_selected_by_default() {
        let catalog = Catalog::load(LoadOptions::default()).unwrap();
        let bar = BadgeBar::new(&catalog, None);

        assert_eq!(bar.len(), 9);
        assert_eq!(bar.badges[0].label(), ALL_LABEL);
        assert!(bar.badges[0].selected);
        assert_eq!(bar.selected_index(), 0);
    }

    #[test]
    fn test_selected_category_badge() {
        let catalog = Catalog::load(LoadOptions::default()).unwrap();
        let bar = BadgeBar::new(&catalog, Some("Огонь"));

        let index = bar.selected_index();
        let badge = bar.get(index).unwrap();
        assert_eq!(badge.label(), "Огонь");
        assert_eq!(badge.color, ColorToken::Red);
        assert!(!bar.badges[0].selected);
        assert_eq!(bar.badges.iter().filter(|b| b.selected).count(), 1);
    }
}
