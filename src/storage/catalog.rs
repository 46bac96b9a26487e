//! Named option catalogues persisted in a [`KeyValueStore`].
//!
//! A catalogue is a list of [`OptionRecord`]s plus the last saved selection,
//! stored under `catalog/<name>/options` and `catalog/<name>/selection`. The
//! combobox engine never touches these; the worker reads and writes them on the
//! host's behalf.
//!
//! # Examples
//!
//! ```
//! use artisan_combobox::storage::{catalog, MemoryStore};
//!
//! let mut store = MemoryStore::new();
//! let (created, options) = catalog::create_option(&mut store, "tags", "Hand Thrown")?;
//! assert_eq!(created.value.as_str(), "hand-thrown");
//! assert!(options.iter().any(|o| o.label == "Hand Thrown"));
//! # Ok::<(), artisan_combobox::PickerError>(())
//! ```

use crate::domain::error::{PickerError, Result};
use crate::domain::{ComboOption, OptionValue};
use crate::storage::backend::{KeyValueStore, KeyValueStoreExt};
use crate::storage::models::{OptionRecord, SelectionRecord};

/// Categories an empty catalogue starts with: `(value, label, group)`.
const DEFAULT_CATEGORIES: &[(&str, &str, &str)] = &[
    ("ceramics", "Ceramics", "Home & Living"),
    ("woodwork", "Woodwork", "Home & Living"),
    ("textiles", "Textiles", "Home & Living"),
    ("candles", "Candles", "Home & Living"),
    ("glassware", "Glassware", "Home & Living"),
    ("jewelry", "Jewelry", "Accessories"),
    ("leather-goods", "Leather goods", "Accessories"),
    ("knitwear", "Knitwear", "Accessories"),
    ("prints", "Prints", "Art"),
    ("paintings", "Paintings", "Art"),
    ("paper-goods", "Paper goods", "Art"),
];

fn options_key(catalog: &str) -> String {
    format!("catalog/{catalog}/options")
}

fn selection_key(catalog: &str) -> String {
    format!("catalog/{catalog}/selection")
}

fn default_records() -> Vec<OptionRecord> {
    DEFAULT_CATEGORIES
        .iter()
        .map(|(value, label, group)| OptionRecord::new(*value, *label).with_group(*group))
        .collect()
}

fn load_records<S: KeyValueStore + ?Sized>(store: &mut S, catalog: &str) -> Result<Vec<OptionRecord>> {
    if let Some(records) = store.get_json::<Vec<OptionRecord>>(&options_key(catalog))? {
        if !records.is_empty() {
            return Ok(records);
        }
    }

    tracing::info!(catalog = %catalog, "seeding empty catalogue with default categories");
    let records = default_records();
    store.set_json(&options_key(catalog), &records)?;
    Ok(records)
}

/// Loads the options of `catalog`, seeding it with default categories if empty.
///
/// # Errors
///
/// Returns an error if the store cannot be read or the seed cannot be written.
pub fn load_options<S: KeyValueStore + ?Sized>(store: &mut S, catalog: &str) -> Result<Vec<ComboOption>> {
    let _span = tracing::debug_span!("catalog_load_options", catalog = %catalog).entered();

    let options: Vec<ComboOption> = load_records(store, catalog)?.into_iter().map(ComboOption::from).collect();
    tracing::debug!(count = options.len(), "catalogue loaded");
    Ok(options)
}

/// Adds an option labelled `label` to `catalog`.
///
/// The value is a slug of the trimmed label, suffixed with a counter if the slug
/// is already taken. If an option with the same label (case-insensitive) exists
/// it is returned unchanged and nothing is written.
///
/// Returns the created (or existing) option and the full option list.
///
/// # Errors
///
/// Returns [`PickerError::Storage`] for a blank label, or the store's error.
pub fn create_option<S: KeyValueStore + ?Sized>(
    store: &mut S,
    catalog: &str,
    label: &str,
) -> Result<(ComboOption, Vec<ComboOption>)> {
    let _span = tracing::debug_span!("catalog_create_option", catalog = %catalog, label = %label).entered();

    let label = label.trim();
    if label.is_empty() {
        return Err(PickerError::Storage("cannot create an option with a blank label".to_string()));
    }

    let mut records = load_records(store, catalog)?;
    let lowered = label.to_lowercase();

    let existing = records.iter().find(|r| r.label.to_lowercase() == lowered).cloned();

    let option = if let Some(existing) = existing {
        tracing::debug!(value = %existing.value, "label already present, reusing option");
        ComboOption::from(existing)
    } else {
        let value = unique_value(&records, &slugify(label));
        let record = OptionRecord::new(value, label);
        let option = ComboOption::from(record.clone());
        records.push(record);
        store.set_json(&options_key(catalog), &records)?;
        tracing::info!(value = %option.value, "option created");
        option
    };

    let options = records.into_iter().map(ComboOption::from).collect();
    Ok((option, options))
}

/// Loads the saved selection of `catalog`; empty if none was saved.
///
/// # Errors
///
/// Returns an error if the store cannot be read or holds a malformed record.
pub fn load_selection<S: KeyValueStore + ?Sized>(store: &S, catalog: &str) -> Result<Vec<OptionValue>> {
    Ok(store
        .get_json::<SelectionRecord>(&selection_key(catalog))?
        .map(|record| record.values)
        .unwrap_or_default())
}

/// Saves `values` as the selection of `catalog`.
///
/// # Errors
///
/// Returns an error if the store cannot be written.
pub fn save_selection<S: KeyValueStore + ?Sized>(store: &mut S, catalog: &str, values: &[OptionValue]) -> Result<()> {
    let _span = tracing::debug_span!("catalog_save_selection", catalog = %catalog, count = values.len()).entered();

    store.set_json(&selection_key(catalog), &SelectionRecord::new(values.to_vec()))
}

/// Lower-cases `label` and joins its alphanumeric runs with `-`.
fn slugify(label: &str) -> String {
    let mut slug = String::with_capacity(label.len());
    for c in label.chars().flat_map(char::to_lowercase) {
        if c.is_alphanumeric() {
            slug.push(c);
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }

    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        "option".to_string()
    } else {
        slug.to_string()
    }
}

fn unique_value(records: &[OptionRecord], base: &str) -> String {
    let taken = |candidate: &str| records.iter().any(|r| r.value.as_str() == candidate);

    if !taken(base) {
        return base.to_string();
    }
    (2..)
        .map(|n| format!("{base}-{n}"))
        .find(|candidate| !taken(candidate))
        .unwrap_or_else(|| base.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{JsonFileStore, MemoryStore};
    use tempfile::tempdir;

    #[test]
    fn empty_catalogue_is_seeded() {
        let mut store = MemoryStore::new();
        let options = load_options(&mut store, "categories").unwrap();

        assert_eq!(options.len(), DEFAULT_CATEGORIES.len());
        assert!(options.iter().all(|o| o.group.is_some()));
        assert_eq!(store.keys().unwrap(), vec!["catalog/categories/options".to_string()]);
    }

    #[test]
    fn create_reuses_case_insensitive_label() {
        let mut store = MemoryStore::new();
        let (first, options) = create_option(&mut store, "categories", "ceramics").unwrap();

        assert_eq!(first.value.as_str(), "ceramics");
        assert_eq!(options.len(), DEFAULT_CATEGORIES.len());
    }

    #[test]
    fn create_slugs_and_disambiguates_values() {
        let mut store = MemoryStore::new();
        let (a, _) = create_option(&mut store, "tags", "  Wood & Resin ").unwrap();
        let (b, options) = create_option(&mut store, "tags", "Wood Resin").unwrap();

        assert_eq!(a.label, "Wood & Resin");
        assert_eq!(a.value.as_str(), "wood-resin");
        assert_eq!(b.value.as_str(), "wood-resin-2");
        assert_eq!(options.last().map(|o| o.label.as_str()), Some("Wood Resin"));
    }

    #[test]
    fn blank_label_is_rejected() {
        let mut store = MemoryStore::new();
        assert!(create_option(&mut store, "tags", "   ").is_err());
    }

    #[test]
    fn selection_round_trips_through_file_store() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.json");
        let values = vec![OptionValue::from("prints"), OptionValue::from("ceramics")];

        {
            let mut store = JsonFileStore::new(path.clone()).unwrap();
            assert!(load_selection(&store, "categories").unwrap().is_empty());
            save_selection(&mut store, "categories", &values).unwrap();
        }

        let store = JsonFileStore::new(path).unwrap();
        assert_eq!(load_selection(&store, "categories").unwrap(), values);
    }

    #[test]
    fn slugify_handles_symbols_and_unicode() {
        assert_eq!(slugify("Crème Brûlée!"), "crème-brûlée");
        assert_eq!(slugify("--"), "option");
        assert_eq!(slugify("A  B"), "a-b");
    }
}
