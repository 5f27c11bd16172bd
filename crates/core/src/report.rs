//! Statistiques réalisées d'un run

use crate::config::BatchSpec;
use crate::sequence::{Composition, GeneratedSequence};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Bilan d'un RepeatSpec sur un lot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepeatStats {
    pub pattern: String,
    pub likelihood: f64,
    /// Nombre de séquences où le motif a été appliqué
    pub applied: usize,
    /// Copies insérées au total
    pub total_copies: usize,
}

/// Bilan d'un InsertSpec sur un lot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsertStats {
    pub motif: String,
    pub mutation_rate: f64,
    pub applied: usize,
    pub fragments: usize,
    pub mutations: usize,
    pub mean_gap: f64,
    pub clamped_cuts: usize,
}

/// Statistiques réalisées d'un lot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchStats {
    pub base_id: String,
    pub generated: usize,
    pub base_length_min: usize,
    pub base_length_max: usize,
    pub length_min: usize,
    pub length_max: usize,
    pub length_mean: f64,
    /// Écart type d'échantillon (0 pour une seule séquence)
    pub length_sd: f64,
    pub composition: Composition,
    pub repeats: Vec<RepeatStats>,
    pub inserts: Vec<InsertStats>,
    /// Les identifiants dépassent la largeur `id_padding`
    pub padding_overflow: bool,
}

impl BatchStats {
    /// Agrège les séquences produites pour un lot
    pub fn collect(batch: &BatchSpec, sequences: &[GeneratedSequence], padding_overflow: bool) -> Self {
        let lengths: Vec<usize> = sequences.iter().map(GeneratedSequence::len).collect();
        let (length_mean, length_sd) = mean_sd(&lengths);

        let mut composition = Composition::default();
        for seq in sequences {
            composition.merge(&seq.composition());
        }

        let repeats = batch
            .repeats
            .iter()
            .enumerate()
            .map(|(index, spec)| {
                let events = sequences
                    .iter()
                    .flat_map(|s| s.repeats.iter())
                    .filter(|e| e.spec_index == index);
                let (applied, total_copies) =
                    events.fold((0, 0), |(n, copies), e| (n + 1, copies + e.copies));
                RepeatStats {
                    pattern: spec.pattern.to_ascii_uppercase(),
                    likelihood: spec.likelihood,
                    applied,
                    total_copies,
                }
            })
            .collect();

        let inserts = batch
            .inserts
            .iter()
            .enumerate()
            .map(|(index, spec)| {
                let events: Vec<_> = sequences
                    .iter()
                    .flat_map(|s| s.inserts.iter())
                    .filter(|e| e.spec_index == index)
                    .collect();
                let gaps: Vec<usize> = events.iter().flat_map(|e| e.gaps.iter().copied()).collect();
                InsertStats {
                    motif: spec.sequence.to_ascii_uppercase(),
                    mutation_rate: spec.mutation_rate,
                    applied: events.len(),
                    fragments: events.iter().map(|e| e.fragments.len()).sum(),
                    mutations: events.iter().map(|e| e.mutations()).sum(),
                    mean_gap: mean_sd(&gaps).0,
                    clamped_cuts: events.iter().map(|e| e.clamped_cuts).sum(),
                }
            })
            .collect();

        Self {
            base_id: batch.base_id.clone(),
            generated: sequences.len(),
            base_length_min: sequences.iter().map(|s| s.base_length).min().unwrap_or(0),
            base_length_max: sequences.iter().map(|s| s.base_length).max().unwrap_or(0),
            length_min: lengths.iter().copied().min().unwrap_or(0),
            length_max: lengths.iter().copied().max().unwrap_or(0),
            length_mean,
            length_sd,
            composition,
            repeats,
            inserts,
            padding_overflow,
        }
    }

    pub fn total_bases(&self) -> usize {
        self.composition.total()
    }
}

/// Rapport global d'un run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    /// Seed réalisé, à réutiliser pour reproduire le run
    pub seed: u64,
    /// Seed tiré depuis l'entropie système
    pub self_seeded: bool,
    pub total_sequences: usize,
    pub total_bases: usize,
    pub composition: Composition,
    /// SHA-256 des paires identifiant/séquence, dans l'ordre de sortie
    pub digest: String,
    pub batches: Vec<BatchStats>,
}

impl RunReport {
    pub fn new(
        seed: u64,
        self_seeded: bool,
        batches: Vec<BatchStats>,
        sequences: &[GeneratedSequence],
    ) -> Self {
        let mut composition = Composition::default();
        for batch in &batches {
            composition.merge(&batch.composition);
        }
        Self {
            seed,
            self_seeded,
            total_sequences: sequences.len(),
            total_bases: sequences.iter().map(GeneratedSequence::len).sum(),
            composition,
            digest: sequences_digest(sequences),
            batches,
        }
    }
}

/// Empreinte SHA-256 des séquences, indépendante du retour à la ligne FASTA
pub fn sequences_digest(sequences: &[GeneratedSequence]) -> String {
    let mut hasher = Sha256::new();
    for seq in sequences {
        hasher.update(seq.id.as_bytes());
        hasher.update(b"\n");
        hasher.update(seq.sequence.as_bytes());
        hasher.update(b"\n");
    }
    format!("{:x}", hasher.finalize())
}

/// Moyenne et écart type d'échantillon
fn mean_sd(values: &[usize]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let n = values.len() as f64;
    let mean = values.iter().map(|&v| v as f64).sum::<f64>() / n;
    if values.len() < 2 {
        return (mean, 0.0);
    }
    let variance = values
        .iter()
        .map(|&v| (v as f64 - mean).powi(2))
        .sum::<f64>()
        / (n - 1.0);
    (mean, variance.sqrt())
}
