// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-tenant spawner configuration.
//!
//! Stored in the metadata service under `config.{tenant}.{instance}.jhub`
//! and maintained by operators, so numeric and boolean fields are accepted
//! in either their native or string form.

use crate::lenient;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Image choice that selects the tenant's HPC image.
pub const HPC_IMAGE_CHOICE: &str = "HPC";

/// Errors selecting an image from a tenant config
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("tenant config offers no images")]
    NoImages,
    #[error("no image selected and the tenant offers {0} images")]
    NoImageSelected(usize),
    #[error("image {0:?} is not offered by this tenant")]
    ImageNotOffered(String),
    #[error("HPC image requested but HPC is not available for this tenant")]
    HpcUnavailable,
    #[error("HPC is available but no hpc_image is configured")]
    HpcImageMissing,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TenantConfig {
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default, deserialize_with = "lenient::option_num")]
    pub uid: Option<u32>,
    #[serde(default, deserialize_with = "lenient::option_num")]
    pub gid: Option<u32>,
    #[serde(default)]
    pub volume_mounts: Vec<String>,
    #[serde(default)]
    pub host_projects_root_dir: Option<String>,
    #[serde(default)]
    pub container_projects_root_dir: Option<String>,
    #[serde(default)]
    pub mem_limit: Option<String>,
    #[serde(default, deserialize_with = "lenient::option_num")]
    pub cpu_limit: Option<f64>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub hpc_available: bool,
    #[serde(default)]
    pub hpc_image: Option<String>,
    /// Keys this crate does not interpret (form options, branding, ...)
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl TenantConfig {
    pub fn from_json(value: &serde_json::Value) -> Result<Self, serde_json::Error> {
        Self::deserialize(value)
    }

    /// Resolve the image to launch for a user's choice.
    pub fn select_image(&self, requested: Option<&str>) -> Result<String, ConfigError> {
        if self.images.is_empty() && !self.hpc_available {
            return Err(ConfigError::NoImages);
        }
        if let [only] = self.images.as_slice() {
            if !self.hpc_available {
                return Ok(only.clone());
            }
        }

        match requested.map(str::trim).filter(|r| !r.is_empty()) {
            Some(HPC_IMAGE_CHOICE) => {
                if !self.hpc_available {
                    return Err(ConfigError::HpcUnavailable);
                }
                self.hpc_image
                    .clone()
                    .filter(|i| !i.is_empty())
                    .ok_or(ConfigError::HpcImageMissing)
            }
            Some(image) if self.images.iter().any(|i| i == image) => Ok(image.to_string()),
            Some(image) => Err(ConfigError::ImageNotOffered(image.to_string())),
            None => Err(ConfigError::NoImageSelected(self.choice_count())),
        }
    }

    /// Number of entries a selection form would show.
    pub fn choice_count(&self) -> usize {
        self.images.len() + usize::from(self.hpc_available)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
