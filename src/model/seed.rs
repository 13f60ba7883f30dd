//! Built-in sample dictionaries shown on first launch

use super::dictionary::Row;
use super::store::{DictionaryStore, StoreError};

/// Populate `store` with the sample dictionaries
pub fn load_sample_dictionaries(store: &mut DictionaryStore) -> Result<(), StoreError> {
    store.insert(
        "Colors",
        "Color names used in product listings",
        vec![
            Row::new("Stonegrey", "Dark Grey"),
            Row::new("Midnight Black", "Black"),
            Row::new("Mystic Silver", "Silver"),
        ],
    )?;
    store.insert(
        "Animals (EN → ES)",
        "Common animal names",
        vec![
            Row::new("cat", "gato"),
            Row::new("dog", "perro"),
            Row::new("bird", "pájaro"),
        ],
    )?;
    Ok(())
}
