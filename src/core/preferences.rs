//! Preference redaction for free-text food lists.
//!
//! Matching is plain substring matching on the lowercased text, so a
//! blacklisted word inside a longer word ("salt" in "low-salt") is redacted
//! too. Passes run in `BLACKLISTS` order, each over the previous output.

use crate::core::PreferenceSet;
use regex::{Regex, RegexBuilder};
use std::sync::LazyLock;

pub const REMOVED_PHRASE: &str = "(removed due to preference)";

/// Placeholder used between passes so later words cannot match inside it.
const SENTINEL: &str = "\u{1}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferenceCategory {
    Vegetarian,
    LowSugar,
    LowSodium,
}

impl PreferenceCategory {
    pub fn is_active(self, prefs: &PreferenceSet) -> bool {
        match self {
            PreferenceCategory::Vegetarian => prefs.vegetarian,
            PreferenceCategory::LowSugar => prefs.low_sugar,
            PreferenceCategory::LowSodium => prefs.low_sodium,
        }
    }
}

pub const VEGETARIAN_WORDS: &[&str] = &[
    "chicken", "fish", "meat", "egg", "eggs", "salmon", "tuna", "beef", "pork", "shellfish",
];
pub const LOW_SUGAR_WORDS: &[&str] = &["sugar", "sugary", "sweets", "honey", "jaggery", "syrup"];
pub const LOW_SODIUM_WORDS: &[&str] = &["salt", "salty", "pickles", "processed", "chips"];

pub const BLACKLISTS: &[(PreferenceCategory, &[&str])] = &[
    (PreferenceCategory::Vegetarian, VEGETARIAN_WORDS),
    (PreferenceCategory::LowSugar, LOW_SUGAR_WORDS),
    (PreferenceCategory::LowSodium, LOW_SODIUM_WORDS),
];

/// One case-insensitive pattern per blacklist word, in table order.
static PATTERNS: LazyLock<Vec<(PreferenceCategory, Vec<Regex>)>> = LazyLock::new(|| {
    BLACKLISTS
        .iter()
        .map(|(category, words)| {
            let patterns = words
                .iter()
                .filter_map(|word| {
                    RegexBuilder::new(&regex::escape(word))
                        .case_insensitive(true)
                        .build()
                        .ok()
                })
                .collect();
            (*category, patterns)
        })
        .collect()
});

fn active_patterns(prefs: &PreferenceSet) -> impl Iterator<Item = &'static Regex> + '_ {
    PATTERNS
        .iter()
        .filter(move |(category, _)| category.is_active(prefs))
        .flat_map(|(_, patterns)| patterns.iter())
}

/// Lowercases `text` and redacts every blacklisted word of each active preference.
pub fn apply_preferences(text: &str, prefs: &PreferenceSet) -> String {
    let mut output = text.to_lowercase();
    if !prefs.any() {
        return output;
    }

    for pattern in active_patterns(prefs) {
        output = pattern.replace_all(&output, SENTINEL).into_owned();
    }

    output.replace(SENTINEL, REMOVED_PHRASE)
}

pub fn apply_preferences_flags(text: &str, veg: bool, low_sugar: bool, low_sodium: bool) -> String {
    apply_preferences(text, &PreferenceSet::new(veg, low_sugar, low_sodium))
}

/// True when `text` contains any word blacklisted by an active preference.
pub fn conflicts(text: &str, prefs: &PreferenceSet) -> bool {
    active_patterns(prefs).any(|p| p.is_match(text))
}
