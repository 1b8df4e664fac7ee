//! Item catalog loading from catalog.toml
//!
//! This module provides functionality to load the item catalog from a TOML
//! configuration file. A deployment overrides base timings, costs, and yield
//! ranges by shipping its own catalog.toml next to the binary; items defined
//! there fully replace the bundled defaults.

use crate::catalog::{Catalog, ItemDef};
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Configuration structure representing the entire catalog.toml file
#[derive(Debug, Deserialize)]
pub struct CatalogFile {
    /// List of item definitions
    pub items: Vec<ItemDef>,
}

/// Loads the item catalog from a TOML file
///
/// # Arguments
/// * `path` - Path to the catalog.toml file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing or an item definition is inconsistent
///   (inverted yield range, zero cycles, duplicate ids)
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Catalog> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read catalog file: {e}"),
    })?;

    let file: CatalogFile = toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse catalog.toml: {e}"),
    })?;

    Catalog::from_defs(file.items)
}

/// Loads the catalog from the default location (./catalog.toml), falling
/// back to the bundled item set when the file does not exist.
pub fn load_default_catalog() -> Result<Catalog> {
    if Path::new("catalog.toml").exists() {
        load_catalog("catalog.toml")
    } else {
        Ok(Catalog::builtin())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::catalog::ItemKind;

    #[test]
    fn test_parse_catalog_file() {
        let toml_str = r#"
            [[items]]
            id = "wheat"
            name = "Wheat"
            kind = "crop"
            required_level = 1
            grow_time_secs = 600
            harvest_window_secs = 1200
            base_amount = 4
            base_volume = 6
            cycles = 1
            price = 10
            xp = 2

            [[items]]
            id = "flour"
            name = "Flour"
            kind = "product"
            required_level = 5
            grow_time_secs = 900
            harvest_window_secs = 0
            base_amount = 1
            base_volume = 1
            cycles = 1
            price = 0
            xp = 8
            materials = [{ item_id = "wheat", amount = 3 }]
        "#;

        let file: CatalogFile = toml::from_str(toml_str).unwrap();
        let catalog = Catalog::from_defs(file.items).unwrap();
        assert_eq!(catalog.len(), 2);

        let wheat = catalog.lookup("wheat").unwrap();
        assert_eq!(wheat.kind, ItemKind::Crop);
        assert_eq!(wheat.grow_time_secs, 600);
        assert!(wheat.materials.is_empty());

        let flour = catalog.lookup("flour").unwrap();
        assert_eq!(flour.kind, ItemKind::Product);
        assert_eq!(flour.materials.len(), 1);
        assert_eq!(flour.materials[0].item_id, "wheat");
        assert_eq!(flour.materials[0].amount, 3);
    }

    #[test]
    fn test_parse_rejects_inconsistent_item() {
        let toml_str = r#"
            [[items]]
            id = "bad"
            name = "Bad"
            kind = "crop"
            required_level = 1
            grow_time_secs = 600
            harvest_window_secs = 1200
            base_amount = 9
            base_volume = 3
            cycles = 1
            price = 10
            xp = 2
        "#;

        let file: CatalogFile = toml::from_str(toml_str).unwrap();
        assert!(matches!(
            Catalog::from_defs(file.items).unwrap_err(),
            Error::Config { message: _ }
        ));
    }
}
