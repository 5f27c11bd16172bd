//! Commande d'inspection d'un fichier FASTA

use crate::display::summary::record_table;
use crate::InspectFormat;
use anyhow::{Context, Result};
use seqgen_core::{parse_fasta, Composition, Nucleotide};
use serde::Serialize;
use std::path::PathBuf;

/// Longueur et composition d'un enregistrement
#[derive(Debug, Serialize)]
pub struct RecordStats {
    pub id: String,
    pub length: usize,
    pub composition: Composition,
    pub gc_ratio: f64,
}

pub fn run(input: PathBuf, format: InspectFormat) -> Result<()> {
    let text = std::fs::read_to_string(&input)
        .with_context(|| format!("Lecture impossible: {}", input.display()))?;
    let stats = record_stats(&text).with_context(|| format!("FASTA invalide: {}", input.display()))?;

    match format {
        InspectFormat::Table => {
            println!("📊 {}: {} séquence(s)", input.display(), stats.len());
            println!("{}", record_table(&stats));
        }
        InspectFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
    }
    Ok(())
}

fn record_stats(text: &str) -> Result<Vec<RecordStats>> {
    let records = parse_fasta(text)?;
    Ok(records
        .into_iter()
        .map(|(id, sequence)| {
            let composition = Composition::of_str(&sequence);
            RecordStats {
                id,
                length: sequence.chars().count(),
                gc_ratio: composition.gc_ratio(),
                composition,
            }
        })
        .collect())
}

/// Nombre de symboles hors A/C/G/T dans un enregistrement
pub fn non_canonical(stats: &RecordStats) -> usize {
    let counted: usize = Nucleotide::ALL.iter().map(|&n| stats.composition.count(n)).sum();
    stats.length - counted
}
