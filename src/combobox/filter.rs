//! Option filtering, grouping and the synthetic create entry.
//!
//! [`filter_options`] turns the host's option list and the live query into the
//! ordered list of entries the dropdown shows. The pipeline is:
//!
//! 1. **Minimum length**: a query shorter than `min_chars` lists nothing
//! 2. **Predicate**: drop selected values (multiple mode) and non-matching options
//! 3. **Cap**: keep the first `max_options` survivors in original order
//! 4. **Grouping**: ungrouped entries first, then groups in first-seen order
//! 5. **Create**: append a create entry when the trimmed query names no label
//!
//! Entries are addressed by a single index in render order (ungrouped, each
//! group, create entry), which is the index space of the highlight cursor.

use super::config::ComboboxConfig;
use crate::domain::{ComboOption, PickerError, Selection};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Host-supplied match predicate.
pub type MatchFn = dyn Fn(&ComboOption, &str) -> bool + Send + Sync;

/// Predicate deciding whether an option matches the query.
///
/// Named matchers come from a closed set and are resolved once, when the
/// configuration is built; hosts needing other semantics supply a closure.
#[derive(Clone, Default)]
pub enum Matcher {
    /// Case-insensitive substring match against label or description.
    #[default]
    Substring,
    /// Skim-style fuzzy match against label or description.
    Fuzzy,
    /// Host override.
    Custom(Arc<MatchFn>),
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Substring => f.write_str("Substring"),
            Self::Fuzzy => f.write_str("Fuzzy"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl FromStr for Matcher {
    type Err = PickerError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.trim().to_ascii_lowercase().as_str() {
            "substring" | "contains" => Ok(Self::Substring),
            "fuzzy" => Ok(Self::Fuzzy),
            other => Err(PickerError::Config(format!("unknown matcher: {other}"))),
        }
    }
}

impl Matcher {
    /// Wraps a closure as a custom matcher.
    pub fn custom<F>(predicate: F) -> Self
    where
        F: Fn(&ComboOption, &str) -> bool + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(predicate))
    }

    /// Binds the matcher to `query` for a pass over many options.
    ///
    /// The lowercased needle and the fuzzy matcher are built once here
    /// instead of once per option.
    #[must_use]
    pub fn bind<'a>(&'a self, query: &'a str) -> BoundMatcher<'a> {
        BoundMatcher {
            matcher: self,
            query,
            needle: query.to_lowercase(),
            skim: matches!(self, Self::Fuzzy).then(|| SkimMatcherV2::default().ignore_case()),
        }
    }

    /// Returns whether `option` matches `query`. An empty query matches everything
    /// for the named matchers.
    #[must_use]
    pub fn matches(&self, option: &ComboOption, query: &str) -> bool {
        self.bind(query).matches(option)
    }

    /// Computes `(start, end)` character ranges of `text` matched by `query`.
    ///
    /// Custom matchers report no ranges since their semantics are opaque.
    #[must_use]
    pub fn highlight_ranges(&self, text: &str, query: &str) -> Vec<(usize, usize)> {
        self.bind(query).highlight_ranges(text)
    }
}

/// A [`Matcher`] bound to one query.
pub struct BoundMatcher<'a> {
    matcher: &'a Matcher,
    query: &'a str,
    needle: String,
    skim: Option<SkimMatcherV2>,
}

impl fmt::Debug for BoundMatcher<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundMatcher")
            .field("matcher", self.matcher)
            .field("query", &self.query)
            .finish_non_exhaustive()
    }
}

impl BoundMatcher<'_> {
    /// Returns whether `option` matches the bound query.
    #[must_use]
    pub fn matches(&self, option: &ComboOption) -> bool {
        if let Matcher::Custom(predicate) = self.matcher {
            return predicate(option, self.query);
        }
        if self.query.is_empty() {
            return true;
        }

        let hit = |text: &str| match &self.skim {
            Some(skim) => skim.fuzzy_match(text, self.query).is_some(),
            None => text.to_lowercase().contains(&self.needle),
        };
        hit(option.label.as_str()) || option.description.as_deref().is_some_and(hit)
    }

    /// Computes `(start, end)` character ranges of `text` matched by the bound query.
    #[must_use]
    pub fn highlight_ranges(&self, text: &str) -> Vec<(usize, usize)> {
        if self.query.is_empty() {
            return vec![];
        }

        match (self.matcher, &self.skim) {
            (Matcher::Custom(_), _) => vec![],
            (_, Some(skim)) => skim
                .fuzzy_indices(text, self.query)
                .map_or_else(Vec::new, |(_score, indices)| coalesce(&indices)),
            (_, None) => substring_range(text, self.query).into_iter().collect(),
        }
    }
}

/// Finds the first case-insensitive occurrence of `query` in `text`, in chars.
fn substring_range(text: &str, query: &str) -> Option<(usize, usize)> {
    let haystack: Vec<char> = text.chars().collect();
    let needle: Vec<char> = query.chars().collect();

    if needle.len() > haystack.len() {
        return None;
    }

    let same = |a: char, b: char| a.to_lowercase().eq(b.to_lowercase());

    (0..=haystack.len() - needle.len())
        .find(|&start| {
            needle
                .iter()
                .enumerate()
                .all(|(offset, &c)| same(haystack[start + offset], c))
        })
        .map(|start| (start, start + needle.len()))
}

/// Collapses sorted char indices into contiguous `(start, end)` runs.
fn coalesce(indices: &[usize]) -> Vec<(usize, usize)> {
    let mut ranges: Vec<(usize, usize)> = Vec::new();

    for &idx in indices {
        match ranges.last_mut() {
            Some((_, end)) if *end == idx => *end = idx + 1,
            _ => ranges.push((idx, idx + 1)),
        }
    }

    ranges
}

/// A named run of options sharing the same `group`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionGroup {
    pub name: String,
    pub options: Vec<ComboOption>,
}

/// One addressable dropdown entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibleEntry<'a> {
    Option(&'a ComboOption),
    /// Synthetic entry offering to create the carried (trimmed) query.
    Create(&'a str),
}

/// Ordered, grouped, size-limited result of a filter pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibleResults {
    /// Options without a group, listed first.
    pub ungrouped: Vec<ComboOption>,
    /// Grouped options in first-seen group order.
    pub groups: Vec<OptionGroup>,
    /// Trimmed query offered for creation, if any.
    pub create: Option<String>,
    /// Characters still needed before options are listed; zero once reached.
    pub missing_chars: usize,
}

impl VisibleResults {
    /// Number of real options listed (create entry excluded).
    #[must_use]
    pub fn option_count(&self) -> usize {
        self.ungrouped.len() + self.groups.iter().map(|g| g.options.len()).sum::<usize>()
    }

    /// Number of addressable entries, create entry included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.option_count() + usize::from(self.create.is_some())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Real options in render order.
    pub fn options(&self) -> impl Iterator<Item = &ComboOption> {
        self.ungrouped
            .iter()
            .chain(self.groups.iter().flat_map(|g| g.options.iter()))
    }

    /// All entries in render order.
    pub fn entries(&self) -> impl Iterator<Item = VisibleEntry<'_>> {
        self.options()
            .map(VisibleEntry::Option)
            .chain(self.create.as_deref().map(VisibleEntry::Create))
    }

    /// Entry at `index` in render order.
    #[must_use]
    pub fn entry(&self, index: usize) -> Option<VisibleEntry<'_>> {
        self.entries().nth(index)
    }
}

/// Runs the filter pipeline over `options`.
///
/// # Example
///
/// ```
/// use artisan_combobox::combobox::{filter_options, ComboboxConfig};
/// use artisan_combobox::domain::{ComboOption, Selection};
///
/// let options = vec![
///     ComboOption::new("apple", "Apple"),
///     ComboOption::new("banana", "Banana"),
/// ];
/// let results = filter_options(&options, "ap", &Selection::Single(None), &ComboboxConfig::default());
/// assert_eq!(results.option_count(), 1);
/// ```
#[must_use]
pub fn filter_options(
    options: &[ComboOption],
    query: &str,
    selection: &Selection,
    config: &ComboboxConfig,
) -> VisibleResults {
    let _span = tracing::debug_span!(
        "filter_options",
        total_options = options.len(),
        query_len = query.chars().count(),
        mode = ?config.mode
    )
    .entered();

    let query_len = query.chars().count();
    if query_len < config.min_chars {
        return VisibleResults {
            missing_chars: config.min_chars - query_len,
            ..VisibleResults::default()
        };
    }

    if config.max_options == 0 {
        tracing::trace!("max_options is zero, listing nothing");
        return VisibleResults::default();
    }

    let matcher = config.matcher.bind(query);
    let survivors = options
        .iter()
        .filter(|option| !(config.is_multiple() && selection.contains(&option.value)))
        .filter(|option| matcher.matches(option))
        .take(config.max_options);

    let mut results = VisibleResults::default();
    for option in survivors {
        match &option.group {
            None => results.ungrouped.push(option.clone()),
            Some(name) => {
                if let Some(group) = results.groups.iter_mut().find(|g| &g.name == name) {
                    group.options.push(option.clone());
                } else {
                    results.groups.push(OptionGroup {
                        name: name.clone(),
                        options: vec![option.clone()],
                    });
                }
            }
        }
    }

    if config.creatable {
        let trimmed = query.trim();
        let lowered = trimmed.to_lowercase();
        let exists = options.iter().any(|o| o.label.to_lowercase() == lowered);
        if !trimmed.is_empty() && !exists {
            results.create = Some(trimmed.to_string());
        }
    }

    tracing::debug!(
        visible = results.option_count(),
        groups = results.groups.len(),
        creatable = results.create.is_some(),
        "filter applied"
    );

    results
}
