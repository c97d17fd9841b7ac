//! Loading the price book and package catalog from external JSON resources.

use std::path::Path;

use thiserror::Error;
use tracing::info;

use crate::domain::{PackageTier, ServicePackage};

use super::PriceBook;

#[derive(Debug, Error)]
pub enum PriceBookError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
    #[error("invalid price book: {0}")]
    Invalid(String),
}

impl PriceBook {
    /// Parse and validate a price book from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, PriceBookError> {
        let book: PriceBook =
            serde_json::from_str(json).map_err(|source| PriceBookError::Parse {
                path: "<inline>".to_string(),
                source,
            })?;
        book.validate()?;
        Ok(book)
    }
}

/// Load and validate a price book from a JSON file.
pub fn load_pricebook_from_file(path: &str) -> Result<PriceBook, PriceBookError> {
    let content = std::fs::read_to_string(Path::new(path)).map_err(|source| PriceBookError::Io {
        path: path.to_string(),
        source,
    })?;
    let book: PriceBook =
        serde_json::from_str(&content).map_err(|source| PriceBookError::Parse {
            path: path.to_string(),
            source,
        })?;
    book.validate()?;
    info!("price book loaded from {} ({} pest rates)", path, book.pest_rates.len());
    Ok(book)
}

/// Load and validate a package catalog from a JSON file.
pub fn load_catalog_from_file(path: &str) -> Result<Vec<ServicePackage>, PriceBookError> {
    let content = std::fs::read_to_string(Path::new(path)).map_err(|source| PriceBookError::Io {
        path: path.to_string(),
        source,
    })?;
    let packages: Vec<ServicePackage> =
        serde_json::from_str(&content).map_err(|source| PriceBookError::Parse {
            path: path.to_string(),
            source,
        })?;
    validate_catalog(&packages)?;
    info!("package catalog loaded from {} ({} packages)", path, packages.len());
    Ok(packages)
}

/// Sanity checks on a package catalog.
pub fn validate_catalog(packages: &[ServicePackage]) -> Result<(), PriceBookError> {
    if packages.is_empty() {
        return Err(PriceBookError::Invalid(
            "package catalog must not be empty".to_string(),
        ));
    }
    for tier in [PackageTier::Basic, PackageTier::Standard, PackageTier::Premium] {
        if packages.iter().filter(|p| p.tier == tier).count() > 1 {
            return Err(PriceBookError::Invalid(format!(
                "package catalog has more than one {} package",
                tier
            )));
        }
    }
    for package in packages {
        if package.covered_pests.is_empty() {
            return Err(PriceBookError::Invalid(format!(
                "package {} covers no pests",
                package.name
            )));
        }
        if let Some(savings) = package.savings {
            if savings.is_negative() {
                return Err(PriceBookError::Invalid(format!(
                    "package {} has negative savings",
                    package.name
                )));
            }
        }
    }
    Ok(())
}
