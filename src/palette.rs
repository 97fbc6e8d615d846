// 🎨 Category Palette - fixed mapping from category label to display color
//
// Unmapped labels fall back to `ColorToken::Neutral` unless the catalog is
// loaded with `strict_colors`, in which case the load fails instead.

use serde::Serialize;

// ============================================================================
// COLOR TOKEN
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorToken {
    Green,
    Purple,
    Red,
    Blue,
    Yellow,
    Sky,
    Gray,
    Pink,
    /// Fallback for labels without an entry
    Neutral,
}

impl ColorToken {
    /// Utility class used by web front ends
    pub fn css_class(&self) -> &'static str {
        match self {
            ColorToken::Green => "bg-green-500",
            ColorToken::Purple => "bg-purple-500",
            ColorToken::Red => "bg-red-500",
            ColorToken::Blue => "bg-blue-500",
            ColorToken::Yellow => "bg-yellow-500",
            ColorToken::Sky => "bg-sky-400",
            ColorToken::Gray => "bg-gray-400",
            ColorToken::Pink => "bg-pink-500",
            ColorToken::Neutral => "bg-muted",
        }
    }
}

// ============================================================================
// PALETTE
// ============================================================================

const CATEGORY_COLORS: &[(&str, ColorToken)] = &[
    ("Трава", ColorToken::Green),
    ("Яд", ColorToken::Purple),
    ("Огонь", ColorToken::Red),
    ("Вода", ColorToken::Blue),
    ("Электро", ColorToken::Yellow),
    ("Полет", ColorToken::Sky),
    ("Нормал", ColorToken::Gray),
    ("Психо", ColorToken::Pink),
];

#[derive(Debug, Clone)]
pub struct Palette {
    entries: &'static [(&'static str, ColorToken)],
}

impl Palette {
    pub fn builtin() -> Self {
        Palette {
            entries: CATEGORY_COLORS,
        }
    }

    /// Exact lookup, `None` when the label has no entry
    pub fn lookup(&self, label: &str) -> Option<ColorToken> {
        self.entries
            .iter()
            .find(|(name, _)| *name == label)
            .map(|(_, color)| *color)
    }

    pub fn color_for(&self, label: &str) -> ColorToken {
        self.lookup(label).unwrap_or(ColorToken::Neutral)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.lookup(label).is_some()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::builtin()
    }
}
