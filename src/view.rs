// 🔎 View Controller - transient browsing state and the derived filtered view
//
// `filtered` is recomputed synchronously whenever the search text or the
// selected category changes; reads never recompute.

use crate::catalog::{Catalog, Pokemon};
use serde::{Deserialize, Serialize};
use tracing::debug;

// ============================================================================
// TABS
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Pokedex,
    Evolutions,
    Search,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Pokedex, Tab::Evolutions, Tab::Search];

    pub fn next(&self) -> Self {
        match self {
            Tab::Pokedex => Tab::Evolutions,
            Tab::Evolutions => Tab::Search,
            Tab::Search => Tab::Pokedex,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            Tab::Pokedex => Tab::Search,
            Tab::Evolutions => Tab::Pokedex,
            Tab::Search => Tab::Evolutions,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Pokedex => "Покедекс",
            Tab::Evolutions => "Эволюции",
            Tab::Search => "Поиск",
        }
    }
}

// ============================================================================
// MATCHING
// ============================================================================

/// True iff lower-cased `haystack` contains lower-cased `needle`.
/// An empty needle matches everything.
pub fn case_insensitive_contains(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// The filter rule shared by every front end
pub fn matches(pokemon: &Pokemon, search: &str, category: Option<&str>) -> bool {
    case_insensitive_contains(pokemon.name, search)
        && category.map_or(true, |label| pokemon.has_category(label))
}

// ============================================================================
// VIEW CONTROLLER
// ============================================================================

#[derive(Debug, Clone)]
pub struct ViewController<'a> {
    catalog: &'a Catalog,
    search: String,
    selected_category: Option<String>,
    active_tab: Tab,
    filtered: Vec<&'a Pokemon>,
}

impl<'a> ViewController<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self::with_tab(catalog, Tab::default())
    }

    pub fn with_tab(catalog: &'a Catalog, active_tab: Tab) -> Self {
        ViewController {
            catalog,
            search: String::new(),
            selected_category: None,
            active_tab,
            filtered: catalog.all().iter().collect(),
        }
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn selected_category(&self) -> Option<&str> {
        self.selected_category.as_deref()
    }

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    /// Current filtered view, in catalog order
    pub fn filtered(&self) -> &[&'a Pokemon] {
        &self.filtered
    }

    pub fn is_empty_result(&self) -> bool {
        self.filtered.is_empty()
    }

    // ========================================================================
    // SEARCH
    // ========================================================================

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.recompute();
    }

    pub fn push_search_char(&mut self, c: char) {
        self.search.push(c);
        self.recompute();
    }

    pub fn pop_search_char(&mut self) {
        if self.search.pop().is_some() {
            self.recompute();
        }
    }

    pub fn clear_search(&mut self) {
        self.set_search(String::new());
    }

    // ========================================================================
    // CATEGORY FILTER
    // ========================================================================

    /// `None` selects "all". Selecting the current label again changes nothing.
    pub fn select_category(&mut self, category: Option<&str>) {
        self.selected_category = category.map(str::to_string);
        self.recompute();
    }

    pub fn clear_category(&mut self) {
        self.select_category(None);
    }

    // ========================================================================
    // TABS
    // ========================================================================

    pub fn set_tab(&mut self, tab: Tab) {
        self.active_tab = tab;
    }

    pub fn next_tab(&mut self) {
        self.active_tab = self.active_tab.next();
    }

    pub fn previous_tab(&mut self) {
        self.active_tab = self.active_tab.previous();
    }

    fn recompute(&mut self) {
        let search = self.search.as_str();
        let category = self.selected_category.as_deref();

        self.filtered = self
            .catalog
            .all()
            .iter()
            .filter(|p| matches(p, search, category))
            .collect();

        debug!(
            search,
            category,
            results = self.filtered.len(),
            "filtered view recomputed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::LoadOptions;

    fn catalog() -> Catalog {
        Catalog::load(LoadOptions::default()).unwrap()
    }

    fn names<'a>(view: &ViewController<'a>) -> Vec<&'a str> {
        view.filtered().iter().map(|p| p.name).collect()
    }

    #[test]
    fn test_case_insensitive_contains() {
        assert!(case_insensitive_contains("Пикачу", "пика"));
        assert!(case_insensitive_contains("Пикачу", "ПИКА"));
        assert!(case_insensitive_contains("Пикачу", ""));
        assert!(!case_insensitive_contains("Пикачу", "zzz"));
    }

    #[test]
    fn test_initial_state_shows_full_catalog() {
        let catalog = catalog();
        let view = ViewController::new(&catalog);

        assert_eq!(view.search(), "");
        assert_eq!(view.selected_category(), None);
        assert_eq!(view.active_tab(), Tab::Pokedex);
        assert_eq!(view.filtered().len(), catalog.len());
    }

    #[test]
    fn test_search_finds_single_match() {
        let catalog = catalog();
        let mut view = ViewController::new(&catalog);

        view.set_search("пика");
        assert_eq!(names(&view), vec!["Пикачу"]);
    }

    #[test]
    fn test_category_filter_is_membership_in_catalog_order() {
        let catalog = catalog();
        let mut view = ViewController::new(&catalog);

        view.select_category(Some("Вода"));
        assert_eq!(names(&view), vec!["Сквиртл", "Вартортл", "Бластойз"]);

        // Чаризард matches through its second category
        view.select_category(Some("Полет"));
        assert_eq!(names(&view), vec!["Чаризард"]);
    }

    #[test]
    fn test_no_match_yields_empty_result() {
        let catalog = catalog();
        let mut view = ViewController::new(&catalog);

        view.set_search("zzz");
        assert!(view.is_empty_result());
    }

    #[test]
    fn test_clearing_category_restores_full_catalog() {
        let catalog = catalog();
        let mut view = ViewController::new(&catalog);

        view.select_category(Some("Огонь"));
        assert_eq!(view.filtered().len(), 3);

        view.select_category(None);
        assert_eq!(view.filtered().len(), catalog.len());
    }

    #[test]
    fn test_search_and_category_combine() {
        let catalog = catalog();
        let mut view = ViewController::new(&catalog);

        view.set_search("чар");
        view.select_category(Some("Полет"));
        assert_eq!(names(&view), vec!["Чаризард"]);

        view.select_category(Some("Вода"));
        assert!(view.is_empty_result());
    }

    #[test]
    fn test_reselecting_category_is_idempotent() {
        let catalog = catalog();
        let mut view = ViewController::new(&catalog);

        view.select_category(Some("Трава"));
        let first = names(&view);
        view.select_category(Some("Трава"));

        assert_eq!(names(&view), first);
        assert_eq!(view.selected_category(), Some("Трава"));
    }

    #[test]
    fn test_filtered_view_is_subset_satisfying_both_predicates() {
        let catalog = catalog();
        let mut view = ViewController::new(&catalog);

        for search in ["", "а", "зав", "ИВ", "zzz"] {
            for category in [None, Some("Яд"), Some("Огонь"), Some("Психо")] {
                view.set_search(search);
                view.select_category(category);

                for pokemon in view.filtered() {
                    assert!(catalog.get(pokemon.id).is_some());
                    assert!(matches(pokemon, search, category));
                }
                let expected = catalog
                    .all()
                    .iter()
                    .filter(|p| matches(p, search, category))
                    .count();
                assert_eq!(view.filtered().len(), expected);
            }
        }
    }

    #[test]
    fn test_typing_and_backspace_recompute() {
        let catalog = catalog();
        let mut view = ViewController::new(&catalog);

        for c in "мью".chars() {
            view.push_search_char(c);
        }
        assert_eq!(names(&view), vec!["Мьюту"]);

        view.pop_search_char();
        view.pop_search_char();
        assert_eq!(view.search(), "м");
        assert_eq!(names(&view), vec!["Чармандер", "Чармелеон", "Мьюту"]);

        view.clear_search();
        assert_eq!(view.filtered().len(), catalog.len());
    }

    #[test]
    fn test_tab_cycle() {
        let catalog = catalog();
        let mut view = ViewController::with_tab(&catalog, Tab::Search);

        view.next_tab();
        assert_eq!(view.active_tab(), Tab::Pokedex);
        view.previous_tab();
        view.previous_tab();
        assert_eq!(view.active_tab(), Tab::Evolutions);
        assert_eq!(Tab::Evolutions.title(), "Эволюции");
    }
}
