//! Commande de modèle de configuration

use anyhow::{Context, Result};
use seqgen_core::{output::write_text, RunConfig};
use std::path::PathBuf;

pub fn run(output: Option<PathBuf>) -> Result<()> {
    let json = template_json()?;
    match output {
        Some(path) => {
            write_text(&path, &json)?;
            println!("📝 Modèle écrit dans {}", path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}

fn template_json() -> Result<String> {
    serde_json::to_string_pretty(&RunConfig::template()).context("Sérialisation du modèle impossible")
}

#[cfg(test)]
mod tests {
    use super::*;
    use seqgen_core::validate;

    #[test]
    fn test_template_is_valid_and_parses_back() {
        let json = template_json().unwrap();
        let config = RunConfig::from_json(&json).unwrap();
        assert!(validate(&config).is_empty());
        assert_eq!(config.id_padding, 4);
        assert_eq!(config.seq_wrap, 70);
        assert_eq!(config.sequences[0].min_len, 500);
        assert_eq!(config.sequences[0].max_len, 1000);
    }
}
