//! Sous-commandes du CLI

pub mod generate;
pub mod inspect;
pub mod template;
pub mod validate;

use anyhow::{Context, Result};
use seqgen_core::RunConfig;
use std::path::Path;

/// Charge une configuration JSON depuis le disque
pub fn load_config(path: &Path) -> Result<RunConfig> {
    RunConfig::from_path(path)
        .with_context(|| format!("Impossible de charger la configuration {}", path.display()))
}
