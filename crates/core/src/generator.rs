//! Orchestration d'un run: lots, séquences, identifiants
//!
//! Ordre de consommation de la source aléatoire, fixe et séquentiel: lot par
//! lot dans l'ordre de configuration, séquence par séquence, puis pour chaque
//! séquence constructeur de base, répétitions, insertions.

use crate::builder::BaseSequenceBuilder;
use crate::config::{BatchSpec, RunConfig};
use crate::error::{ConfigError, Result, SeqError};
use crate::inserts::InsertionEngine;
use crate::random::RandomSource;
use crate::repeats::RepeatEngine;
use crate::report::{BatchStats, RunReport};
use crate::sequence::{bases_to_string, GeneratedSequence};
use serde::{Deserialize, Serialize};

/// Résultat d'un run: séquences dans l'ordre lot puis index, et rapport
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    pub sequences: Vec<GeneratedSequence>,
    pub report: RunReport,
}

impl RunResult {
    /// Seed réalisé du run
    pub fn seed(&self) -> u64 {
        self.report.seed
    }
}

/// Générateur d'un lot, moteurs compilés une fois pour toutes ses séquences
#[derive(Debug, Clone)]
pub struct BatchGenerator<'a> {
    batch: &'a BatchSpec,
    builder: BaseSequenceBuilder,
    repeats: RepeatEngine,
    inserts: InsertionEngine,
}

impl<'a> BatchGenerator<'a> {
    pub fn new(batch: &'a BatchSpec) -> Result<Self> {
        let compile = |e: ConfigError| SeqError::Config(vec![e]);
        Ok(Self {
            batch,
            builder: BaseSequenceBuilder::new(batch).map_err(compile)?,
            repeats: RepeatEngine::new(&batch.repeats, &batch.base_id).map_err(compile)?,
            inserts: InsertionEngine::new(&batch.inserts, &batch.base_id).map_err(compile)?,
        })
    }

    /// Produit une séquence: base, puis répétitions, puis insertions
    pub fn next_sequence(&self, id: String, rng: &mut RandomSource) -> Result<GeneratedSequence> {
        let raw = self.builder.build(rng);
        let base_length = raw.len();
        let (with_repeats, repeats) = self.repeats.apply(raw, rng);
        let (bases, inserts) = self.inserts.apply(with_repeats, rng)?;
        Ok(GeneratedSequence {
            id,
            sequence: bases_to_string(&bases),
            base_length,
            repeats,
            inserts,
        })
    }

    /// Produit les `generate` séquences du lot et leurs statistiques
    pub fn run(&self, id_padding: usize, rng: &mut RandomSource) -> Result<(Vec<GeneratedSequence>, BatchStats)> {
        let padding_overflow = digits(self.batch.generate) > id_padding;
        if padding_overflow {
            tracing::warn!(
                base_id = %self.batch.base_id,
                generate = self.batch.generate,
                id_padding,
                "identifiants plus larges que id_padding"
            );
        }

        let sequences = (1..=self.batch.generate)
            .map(|index| {
                let id = sequence_id(&self.batch.base_id, index, id_padding);
                self.next_sequence(id, rng)
            })
            .collect::<Result<Vec<_>>>()?;

        let stats = BatchStats::collect(self.batch, &sequences, padding_overflow);
        tracing::debug!(
            base_id = %self.batch.base_id,
            sequences = stats.generated,
            bases = stats.total_bases(),
            "lot généré"
        );
        Ok((sequences, stats))
    }
}

/// Valide puis exécute un run avec sa propre source aléatoire
pub fn generate(config: &RunConfig) -> Result<RunResult> {
    ensure_valid(config)?;
    let mut rng = RandomSource::new(config.seed_value());
    run_validated(config, &mut rng)
}

/// Exécute un run sur une source fournie par l'appelant.
///
/// La configuration est revalidée: aucun tirage n'est consommé sur une
/// configuration invalide.
pub fn generate_with(config: &RunConfig, rng: &mut RandomSource) -> Result<RunResult> {
    ensure_valid(config)?;
    run_validated(config, rng)
}

fn ensure_valid(config: &RunConfig) -> Result<()> {
    let errors = config.validate();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(SeqError::Config(errors))
    }
}

fn run_validated(config: &RunConfig, rng: &mut RandomSource) -> Result<RunResult> {
    tracing::info!(
        seed = rng.seed(),
        self_seeded = rng.is_self_seeded(),
        batches = config.sequences.len(),
        "début de la génération"
    );

    let generators = config
        .sequences
        .iter()
        .map(BatchGenerator::new)
        .collect::<Result<Vec<_>>>()?;

    let mut sequences = Vec::new();
    let mut batches = Vec::with_capacity(generators.len());
    for generator in &generators {
        let (batch_sequences, stats) = generator.run(config.id_padding, rng)?;
        sequences.extend(batch_sequences);
        batches.push(stats);
    }

    let report = RunReport::new(rng.seed(), rng.is_self_seeded(), batches, &sequences);
    tracing::info!(
        sequences = report.total_sequences,
        bases = report.total_bases,
        "génération terminée"
    );
    Ok(RunResult { sequences, report })
}

/// `base_id` suivi de l'index (à partir de 1) complété à `padding` chiffres.
///
/// Un index plus large que `padding` n'est jamais tronqué.
pub fn sequence_id(base_id: &str, index: usize, padding: usize) -> String {
    format!("{}{:0width$}", base_id, index, width = padding)
}

fn digits(mut n: usize) -> usize {
    let mut count = 1;
    while n >= 10 {
        n /= 10;
        count += 1;
    }
    count
}
