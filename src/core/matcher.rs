//! Disease-name search: substring, fuzzy (token-sort similarity) and direct selection.

use crate::core::{Dataset, DiseaseRecord};

/// Fuzzy results must score strictly above this.
pub const FUZZY_THRESHOLD: f64 = 50.0;

pub const DEFAULT_LIMIT: usize = 5;

/// Lowercase, turn every non-alphanumeric character into a space, then sort the tokens.
fn sorted_tokens(text: &str) -> Vec<char> {
    let cleaned: String = text
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .to_lowercase();

    let mut tokens: Vec<&str> = cleaned.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ").chars().collect()
}

fn lcs_len(a: &[char], b: &[char]) -> usize {
    // 單列 DP
    let mut row = vec![0usize; b.len() + 1];
    for &ca in a {
        let mut diag = 0;
        for (j, &cb) in b.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if ca == cb {
                diag + 1
            } else {
                above.max(row[j])
            };
            diag = above;
        }
    }
    row[b.len()]
}

/// Word-order-insensitive similarity in `0.0..=100.0`.
///
/// Both sides are normalised and their tokens sorted before comparing, so
/// "disease heart" and "Heart Disease" score 100. The score is the Indel
/// similarity `200 * LCS / (len_a + len_b)`.
pub fn token_sort_ratio(a: &str, b: &str) -> f64 {
    let a = sorted_tokens(a);
    let b = sorted_tokens(b);
    let total = a.len() + b.len();
    if total == 0 {
        return 0.0;
    }
    200.0 * lcs_len(&a, &b) as f64 / total as f64
}

/// Scored search. Exact mode reports no score.
pub fn find_scored<'a>(
    query: &str,
    dataset: &'a Dataset,
    use_fuzzy: bool,
    limit: usize,
) -> Vec<(&'a DiseaseRecord, Option<f64>)> {
    let query = query.trim();
    if query.is_empty() {
        return Vec::new();
    }

    if !use_fuzzy {
        let needle = query.to_lowercase();
        return dataset
            .records()
            .iter()
            .filter(|r| r.name.to_lowercase().contains(&needle))
            .map(|r| (r, None))
            .collect();
    }

    let mut scored: Vec<(&DiseaseRecord, f64)> = dataset
        .records()
        .iter()
        .map(|r| (r, token_sort_ratio(query, &r.name)))
        .filter(|(_, score)| *score > FUZZY_THRESHOLD)
        .collect();

    // 穩定排序：同分時保留資料集順序
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored.truncate(limit);

    tracing::debug!("Fuzzy query '{}' kept {} candidates", query, scored.len());
    scored.into_iter().map(|(r, s)| (r, Some(s))).collect()
}

pub fn find<'a>(
    query: &str,
    dataset: &'a Dataset,
    use_fuzzy: bool,
    limit: usize,
) -> Vec<&'a DiseaseRecord> {
    find_scored(query, dataset, use_fuzzy, limit)
        .into_iter()
        .map(|(r, _)| r)
        .collect()
}

/// Direct selection by name from the enumerated list. No scoring.
pub fn select<'a>(name: &str, dataset: &'a Dataset) -> Option<&'a DiseaseRecord> {
    let name = name.trim().to_lowercase();
    dataset
        .records()
        .iter()
        .find(|r| r.name.to_lowercase() == name)
}
