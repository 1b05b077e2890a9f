//! Crop model registry.
//!
//! The registry is built once at startup from the embedded catalog and an
//! optional YAML file, validated, then shared read-only (usually behind an
//! `Arc`). Nothing mutates a `CropModel` after load.

pub mod validation;

use crate::config::CatalogConfig;
use crate::error::{CropCalError, Result};
use crate::models::{CropInfo, CropModel};
use serde::Deserialize;
use std::path::Path;
pub use validation::{validate_crop, CatalogIssue};

const BUILTIN_CATALOG: &str = include_str!("../../data/crops.yaml");

#[derive(Debug, Deserialize)]
struct CatalogFile {
    crops: Vec<CropModel>,
}

#[derive(Debug, Clone, Default)]
pub struct CropRegistry {
    crops: Vec<CropModel>,
}

impl CropRegistry {
    /// The catalog compiled into the binary.
    pub fn builtin() -> Result<Self> {
        Self::from_yaml_str(BUILTIN_CATALOG)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let file: CatalogFile = serde_yaml::from_str(content)?;
        Ok(Self::from_models(file.crops))
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CropCalError::Catalog(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_yaml_str(&content)
    }

    /// Build the registry the configuration asks for.
    pub fn from_config(config: &CatalogConfig) -> Result<Self> {
        let mut registry = if config.exclude_builtin {
            Self::default()
        } else {
            Self::builtin()?
        };

        if let Some(ref path) = config.path {
            registry = registry.merge(Self::from_path(path)?);
        }

        if registry.is_empty() {
            return Err(CropCalError::Catalog("catalog contains no usable crops".into()));
        }

        tracing::info!(crops = registry.len(), "crop catalog loaded");
        Ok(registry)
    }

    /// Validate and index crop records.
    ///
    /// Integrity problems are logged. Records without stages are dropped, as are
    /// season windows with impossible months. A later record replaces an earlier
    /// one with the same name.
    pub fn from_models(models: Vec<CropModel>) -> Self {
        let mut registry = Self::default();
        for crop in models {
            if let Some(crop) = sanitize(crop) {
                registry.insert(crop);
            }
        }
        registry
    }

    /// Crops in `other` replace crops with the same name.
    pub fn merge(mut self, other: CropRegistry) -> Self {
        for crop in other.crops {
            self.insert(crop);
        }
        self
    }

    fn insert(&mut self, crop: CropModel) {
        match self
            .crops
            .iter_mut()
            .find(|c| c.name.eq_ignore_ascii_case(&crop.name))
        {
            Some(existing) => {
                tracing::warn!(crop = %crop.name, "duplicate crop record replaces earlier entry");
                *existing = crop;
            }
            None => self.crops.push(crop),
        }
    }

    /// Look up a crop by name or alias, ignoring case.
    pub fn get(&self, identifier: &str) -> Result<&CropModel> {
        self.crops
            .iter()
            .find(|c| c.matches(identifier))
            .ok_or_else(|| CropCalError::UnknownCrop(identifier.to_string()))
    }

    pub fn list(&self) -> Vec<CropInfo> {
        self.crops.iter().map(CropModel::info).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CropModel> {
        self.crops.iter()
    }

    pub fn len(&self) -> usize {
        self.crops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.crops.is_empty()
    }
}

fn sanitize(mut crop: CropModel) -> Option<CropModel> {
    let issues = validate_crop(&crop);
    for issue in &issues {
        tracing::warn!(crop = %crop.name, "catalog integrity: {}", issue);
    }

    if issues.iter().any(CatalogIssue::is_fatal) {
        tracing::warn!(crop = %crop.name, "crop record excluded from catalog");
        return None;
    }

    crop.seasons.northern.retain(|w| w.has_valid_months());
    crop.seasons.southern.retain(|w| w.has_valid_months());
    Some(crop)
}
