//! TOML configuration for tax tables.
//!
//! ## Format
//!
//! Amounts and rates are quoted strings so they parse as exact decimals.
//! Omit `max` on the last income bracket to make it open-ended.
//!
//! ```toml
//! [business]
//! tier_one_ceiling = "600000"
//! tier_one_rate = "0.17"
//! excess_rate = "0.24"
//!
//! [sst]
//! rate = "0.06"
//! threshold = "500000"
//!
//! [[income]]
//! min = "0"
//! max = "5000"
//! rate = "0"
//!
//! [[income]]
//! min = "5000"
//! rate = "0.01"
//! ```

use std::fs;
use std::path::Path;

use finance_core::TaxTables;
use thiserror::Error;
use tracing::info;

/// Errors that can occur when loading tax tables from TOML.
#[derive(Debug, Error)]
pub enum TablesConfigError {
    #[error("cannot read tax tables '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid tax tables TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("cannot serialize tax tables: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Parses and validates tax tables from TOML text.
pub fn parse_tables(text: &str) -> Result<TaxTables, TablesConfigError> {
    // Each table validates while deserializing.
    Ok(toml::from_str(text)?)
}

/// Reads and validates tax tables from a TOML file.
pub fn load_tables(path: &Path) -> Result<TaxTables, TablesConfigError> {
    let text = fs::read_to_string(path).map_err(|source| TablesConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let tables = parse_tables(&text)?;
    info!(
        path = %path.display(),
        brackets = tables.income.brackets().len(),
        "loaded tax tables"
    );
    Ok(tables)
}

/// Renders tables in the same TOML layout [`parse_tables`] reads.
pub fn tables_to_toml(tables: &TaxTables) -> Result<String, TablesConfigError> {
    Ok(toml::to_string_pretty(tables)?)
}
