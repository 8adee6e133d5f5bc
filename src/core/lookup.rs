use crate::core::matcher::{self, DEFAULT_LIMIT};
use crate::core::preferences::apply_preferences;
use crate::core::{ConfigProvider, Dataset, DiseaseRecord, FilteredRecord, LookupOutcome, PreferenceSet};
use crate::utils::error::{GuideError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupOptions {
    pub use_fuzzy: bool,
    pub limit: usize,
    pub preferences: PreferenceSet,
}

impl Default for LookupOptions {
    fn default() -> Self {
        Self {
            use_fuzzy: false,
            limit: DEFAULT_LIMIT,
            preferences: PreferenceSet::default(),
        }
    }
}

impl LookupOptions {
    pub fn from_provider<C: ConfigProvider>(config: &C) -> Self {
        Self {
            use_fuzzy: config.use_fuzzy(),
            limit: config.limit(),
            preferences: config.preferences(),
        }
    }
}

/// Runs one query against an injected dataset: match, then redact.
pub struct LookupEngine<'a> {
    dataset: &'a Dataset,
    options: LookupOptions,
}

impl<'a> LookupEngine<'a> {
    pub fn new(dataset: &'a Dataset, options: LookupOptions) -> Self {
        Self { dataset, options }
    }

    fn filter_record(&self, record: &DiseaseRecord, score: Option<f64>) -> FilteredRecord {
        let prefs = &self.options.preferences;
        FilteredRecord {
            name: record.name.clone(),
            foods_to_eat: apply_preferences(&record.eat_text(), prefs),
            foods_to_avoid: apply_preferences(&record.avoid_text(), prefs),
            note: record.note.clone(),
            score,
        }
    }

    pub fn search(&self, query: &str) -> LookupOutcome {
        if query.trim().is_empty() {
            tracing::debug!("Empty query, nothing to look up");
            return LookupOutcome::EmptyQuery;
        }

        let matches = matcher::find_scored(
            query,
            self.dataset,
            self.options.use_fuzzy,
            self.options.limit,
        );

        tracing::info!(
            "🔍 '{}' ({} mode) matched {} record(s)",
            query.trim(),
            if self.options.use_fuzzy { "fuzzy" } else { "exact" },
            matches.len()
        );

        if matches.is_empty() {
            return LookupOutcome::NoMatch;
        }

        LookupOutcome::Found(
            matches
                .into_iter()
                .map(|(record, score)| self.filter_record(record, score))
                .collect(),
        )
    }

    /// Direct selection path: exact name, no scoring.
    pub fn select(&self, name: &str) -> Result<FilteredRecord> {
        matcher::select(name, self.dataset)
            .map(|record| self.filter_record(record, None))
            .ok_or_else(|| GuideError::NoSuchDisease {
                name: name.trim().to_string(),
            })
    }
}
