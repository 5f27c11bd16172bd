//! Commande de validation

use super::load_config;
use anyhow::Result;
use console::style;
use seqgen_core::validate;
use std::path::PathBuf;

/// Renvoie `false` si la configuration contient au moins une erreur
pub fn run(config_path: PathBuf) -> Result<bool> {
    println!("🔍 Validation de: {}", config_path.display());

    let config = load_config(&config_path)?;
    let errors = validate(&config);

    if errors.is_empty() {
        let total: usize = config.sequences.iter().map(|b| b.generate).sum();
        println!(
            "{} Configuration valide: {} lot(s), {} séquence(s)",
            style("✅").green(),
            config.sequences.len(),
            total
        );
        return Ok(true);
    }

    println!("{} {} erreur(s):", style("❌").red(), errors.len());
    for error in &errors {
        println!("   - {}", error);
    }
    Ok(false)
}
