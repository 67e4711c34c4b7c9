//! Column name matching
//!
//! Source tables rarely use the exact column names a configuration expects.
//! [`ColumnMatcher`] ranks the available columns against a wanted name using
//! exact matches, a table of common geological aliases, and fuzzy scoring.

use indexmap::IndexMap;
use std::cmp::Ordering;
use std::collections::HashSet;

use crate::models::FieldSchema;

/// Default minimum score for a match
pub const DEFAULT_THRESHOLD: f64 = 0.6;

/// Score given to an exact alias hit
const ALIAS_EXACT_SCORE: f64 = 0.95;

/// Minimum score for a fuzzy alias hit
const ALIAS_FUZZY_MIN: f64 = 0.7;

/// Common names for well-known fields, keyed by the upper-case field name
const FIELD_ALIASES: &[(&str, &[&str])] = &[
    (
        "UNITNAME",
        &[
            "unit_name",
            "unit",
            "unitname",
            "formation",
            "lithology",
            "rock_type",
            "geology",
            "strat_name",
            "code",
            "unitcode",
        ],
    ),
    ("DIP", &["dip", "dip_angle", "dip_value", "inclination", "plunge"]),
    (
        "DIPDIR",
        &[
            "dip_dir",
            "dip_direction",
            "dipdir",
            "dipdirection",
            "azimuth",
            "dip_azimuth",
            "strike_dir",
        ],
    ),
    ("STRIKE", &["strike", "strike_angle", "strike_direction", "trend"]),
    ("MIN_AGE", &["min_age", "minage", "age_min", "younger", "min_age_ma", "age_low"]),
    ("MAX_AGE", &["max_age", "maxage", "age_max", "older", "max_age_ma", "age_high"]),
    ("GROUP", &["group", "group_name", "groupname", "series", "supergroup"]),
    ("X", &["x", "easting", "longitude", "lon", "long", "x_coord"]),
    ("Y", &["y", "northing", "latitude", "lat", "y_coord"]),
    ("Z", &["z", "elevation", "altitude", "height", "elev", "z_coord"]),
    ("ID", &["id", "objectid", "fid", "gid", "uid", "feature_id", "object_id"]),
];

/// A matched column and its confidence in `[0, 1]`
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnMatch {
    pub column: String,
    pub score: f64,
}

/// Finds the best matching column for a wanted field name
#[derive(Debug, Clone)]
pub struct ColumnMatcher {
    /// Normalised name to original name
    columns: IndexMap<String, String>,
    case_sensitive: bool,
}

impl ColumnMatcher {
    pub fn new<I, S>(available_columns: I, case_sensitive: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut columns = IndexMap::new();
        for column in available_columns {
            let column = column.into();
            if column.is_empty() {
                continue;
            }
            let normalised = if case_sensitive { column.clone() } else { column.to_lowercase() };
            columns.insert(normalised, column);
        }

        Self { columns, case_sensitive }
    }

    /// Original column names, first-seen order
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.columns.values().map(String::as_str)
    }

    /// Best column for `target` scoring at least `threshold`
    pub fn find_match(&self, target: &str, threshold: f64) -> Option<ColumnMatch> {
        if self.columns.is_empty() {
            return None;
        }

        // Exact match
        if let Some(column) = self.columns.get(&self.normalise(target)) {
            return Some(ColumnMatch { column: column.clone(), score: 1.0 });
        }

        // Known aliases
        if let Some(found) = self.match_via_aliases(target) {
            if found.score >= threshold {
                return Some(found);
            }
        }

        self.fuzzy_match(target, threshold)
    }

    /// Best column name per target, `None` where nothing scores high enough
    pub fn find_matches<S: AsRef<str>>(
        &self,
        targets: &[S],
        threshold: f64,
    ) -> IndexMap<String, Option<String>> {
        targets
            .iter()
            .map(|target| {
                let target = target.as_ref();
                (target.to_string(), self.find_match(target, threshold).map(|m| m.column))
            })
            .collect()
    }

    /// Best column name and score per target, `(None, 0.0)` where unmatched
    pub fn find_best_matches<S: AsRef<str>>(
        &self,
        targets: &[S],
        threshold: f64,
    ) -> IndexMap<String, (Option<String>, f64)> {
        targets
            .iter()
            .map(|target| {
                let target = target.as_ref();
                let result = match self.find_match(target, threshold) {
                    Some(found) => (Some(found.column), found.score),
                    None => (None, 0.0),
                };
                (target.to_string(), result)
            })
            .collect()
    }

    /// Up to `top_n` columns ranked by similarity to `target`
    pub fn suggestions(&self, target: &str, top_n: usize) -> Vec<(String, f64)> {
        let search_target = self.normalise(target);

        let mut scores: Vec<(String, f64)> = self
            .columns
            .iter()
            .map(|(normalised, original)| {
                (original.clone(), similarity(&search_target, normalised))
            })
            .collect();

        // Stable, so equal scores keep column order
        scores.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        scores.truncate(top_n);
        scores
    }

    fn normalise(&self, name: &str) -> String {
        if self.case_sensitive {
            name.to_string()
        } else {
            name.to_lowercase()
        }
    }

    fn match_via_aliases(&self, target: &str) -> Option<ColumnMatch> {
        let upper = target.to_uppercase();
        let (_, aliases) = FIELD_ALIASES.iter().find(|(field, _)| *field == upper)?;

        for alias in aliases.iter() {
            if let Some(column) = self.columns.get(&self.normalise(alias)) {
                return Some(ColumnMatch { column: column.clone(), score: ALIAS_EXACT_SCORE });
            }
        }

        let mut best: Option<ColumnMatch> = None;
        for alias in aliases.iter() {
            for (normalised, original) in &self.columns {
                let score = similarity(alias, normalised);
                if score > best.as_ref().map_or(0.0, |b| b.score) {
                    best = Some(ColumnMatch { column: original.clone(), score });
                }
            }
        }

        best.filter(|found| found.score >= ALIAS_FUZZY_MIN)
    }

    fn fuzzy_match(&self, target: &str, threshold: f64) -> Option<ColumnMatch> {
        let search_target = self.normalise(target);

        let mut best: Option<ColumnMatch> = None;
        for (normalised, original) in &self.columns {
            let score = similarity(&search_target, normalised);
            if score > best.as_ref().map_or(0.0, |b| b.score) {
                best = Some(ColumnMatch { column: original.clone(), score });
            }
        }

        best.filter(|found| found.score >= threshold)
    }
}

/// Match a single target against a list of columns
pub fn find_column_match<S: AsRef<str>>(
    available_columns: &[S],
    target: &str,
    threshold: f64,
    case_sensitive: bool,
) -> Option<String> {
    let matcher =
        ColumnMatcher::new(available_columns.iter().map(|c| c.as_ref().to_string()), case_sensitive);
    matcher.find_match(target, threshold).map(|found| found.column)
}

/// Match several targets against a list of columns
pub fn find_column_matches<S: AsRef<str>, T: AsRef<str>>(
    available_columns: &[S],
    targets: &[T],
    threshold: f64,
    case_sensitive: bool,
) -> IndexMap<String, Option<String>> {
    let matcher =
        ColumnMatcher::new(available_columns.iter().map(|c| c.as_ref().to_string()), case_sensitive);
    matcher.find_matches(targets, threshold)
}

/// Suggest a source column for every `*_column` field of a schema.
///
/// The stored value (the column name the configuration currently expects)
/// is the search target. Fields with an empty or non-text value are skipped.
pub fn suggest_schema_columns(
    schema: &FieldSchema,
    matcher: &ColumnMatcher,
    threshold: f64,
) -> IndexMap<String, Option<ColumnMatch>> {
    schema
        .iter()
        .filter(|(key, _)| key.ends_with("_column"))
        .filter_map(|(key, value)| {
            let wanted = value.as_text().filter(|text| !text.is_empty())?;
            Some((key.clone(), matcher.find_match(wanted, threshold)))
        })
        .collect()
}

/// Similarity of two names in `[0, 1]`.
///
/// Takes the best of a gestalt sequence ratio, a substring score and a
/// word-overlap score. A single-word `a` found among `b`'s words scores at
/// least 0.75, so `geology` ranks `hamersley_geology` highly.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = a.to_lowercase();
    let b = b.to_lowercase();

    if a == b {
        return 1.0;
    }

    let sequence_score = sequence_ratio(&a, &b);

    let substring_score = if a.contains(b.as_str()) || b.contains(a.as_str()) {
        let (len_a, len_b) = (a.chars().count(), b.chars().count());
        0.8 * len_a.min(len_b) as f64 / len_a.max(len_b) as f64
    } else {
        0.0
    };

    let words_a = words(&a);
    let words_b = words(&b);
    let word_score = if words_a.is_empty() || words_b.is_empty() {
        0.0
    } else {
        let shared = words_a.intersection(&words_b).count();
        let total = words_a.union(&words_b).count();
        let jaccard = shared as f64 / total as f64;
        if words_a.len() == 1 && words_a.is_subset(&words_b) {
            jaccard.max(0.75)
        } else {
            jaccard
        }
    };

    sequence_score.max(substring_score).max(word_score)
}

fn words(name: &str) -> HashSet<&str> {
    name.split(|c: char| c == '_' || c == '-' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .collect()
}

/// Ratcliff/Obershelp ratio: `2 * matched / total`
pub fn sequence_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * matched_chars(&a, &b) as f64 / total as f64
}

/// Characters covered by recursively taking the longest common block
fn matched_chars(a: &[char], b: &[char]) -> usize {
    let mut matched = 0;
    let mut pending = vec![(0, a.len(), 0, b.len())];

    while let Some((a_lo, a_hi, b_lo, b_hi)) = pending.pop() {
        let (i, j, size) = longest_block(a, b, a_lo, a_hi, b_lo, b_hi);
        if size == 0 {
            continue;
        }
        matched += size;
        if a_lo < i && b_lo < j {
            pending.push((a_lo, i, b_lo, j));
        }
        if i + size < a_hi && j + size < b_hi {
            pending.push((i + size, a_hi, j + size, b_hi));
        }
    }

    matched
}

/// Longest common block within the given ranges, earliest in `a` on ties
fn longest_block(
    a: &[char],
    b: &[char],
    a_lo: usize,
    a_hi: usize,
    b_lo: usize,
    b_hi: usize,
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_size) = (a_lo, b_lo, 0);
    // run[j] = length of the common run ending at a[i - 1], b[j - 1]
    let mut previous = vec![0usize; b.len() + 1];

    for i in a_lo..a_hi {
        let mut current = vec![0usize; b.len() + 1];
        for j in b_lo..b_hi {
            if a[i] == b[j] {
                let size = previous[j] + 1;
                current[j + 1] = size;
                if size > best_size {
                    best_i = i + 1 - size;
                    best_j = j + 1 - size;
                    best_size = size;
                }
            }
        }
        previous = current;
    }

    (best_i, best_j, best_size)
}
