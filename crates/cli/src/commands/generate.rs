//! Commande de génération

use super::load_config;
use crate::display::summary::batch_table;
use crate::{create_spinner, OnlyOutput};
use anyhow::{Context, Result};
use console::style;
use seqgen_core::{
    generate, to_config_json, to_fasta, to_report, to_report_json, write_outputs, OutputTargets, RunConfig, Seed,
};
use std::io::Write;
use std::path::PathBuf;

/// Options de sortie de `seqgen generate`
#[derive(Debug, Default)]
pub struct GenerateOptions {
    pub fasta: Option<PathBuf>,
    pub report: Option<PathBuf>,
    pub config_out: Option<PathBuf>,
    pub seed: Option<u64>,
    pub wrap: Option<usize>,
    pub only: Option<OnlyOutput>,
}

pub fn run(config_path: PathBuf, options: GenerateOptions) -> Result<()> {
    eprintln!("🧬 Génération depuis: {}", config_path.display());

    // 1. Charger la configuration et appliquer les surcharges
    let mut config = load_config(&config_path)?;
    apply_overrides(&mut config, &options);

    // 2. Générer
    let spinner = create_spinner("Génération en cours...");
    let result = generate(&config);
    let result = match result {
        Ok(result) => {
            spinner.finish_with_message(format!("{} séquences générées", result.sequences.len()));
            result
        }
        Err(e) => {
            spinner.abandon_with_message("Génération interrompue");
            return Err(e).context("La génération a échoué");
        }
    };

    // 3. Écrire les fichiers demandés
    let targets = OutputTargets {
        fasta: options.fasta.clone(),
        report: options.report.clone(),
        config: options.config_out.clone(),
    };
    write_outputs(&result, &config, &targets).context("Écriture des sorties impossible")?;

    // 4. stdout: une seule sortie, jamais mélangée au résumé
    let stdout_text = match options.only {
        Some(OnlyOutput::Report) => Some(to_report(&result)),
        Some(OnlyOutput::ReportJson) => Some(to_report_json(&result.report)?),
        Some(OnlyOutput::Config) => Some(to_config_json(&config, result.seed())?),
        None if options.fasta.is_none() => Some(to_fasta(&result.sequences, config.seq_wrap)),
        None => None,
    };
    if let Some(text) = stdout_text {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(text.as_bytes()).context("Écriture sur stdout impossible")?;
        stdout.flush()?;
    }

    // 5. Résumé
    eprintln!();
    eprintln!("{}", batch_table(&result.report.batches));
    let origin = if result.report.self_seeded { " (auto)" } else { "" };
    eprintln!(
        "   Seed: {}{}  Bases: {}  SHA-256: {}",
        style(result.seed()).cyan(),
        origin,
        result.report.total_bases,
        &result.report.digest[..16]
    );
    eprintln!("\n✅ Génération terminée!");

    Ok(())
}

/// Les options de ligne de commande priment sur le fichier
fn apply_overrides(config: &mut RunConfig, options: &GenerateOptions) {
    if let Some(seed) = options.seed {
        tracing::debug!(seed, "seed remplacé par la ligne de commande");
        config.seed = Some(Seed::Number(seed));
    }
    if let Some(wrap) = options.wrap {
        config.seq_wrap = wrap;
    }
}
