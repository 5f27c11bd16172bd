//! seqgen Core Library
//!
//! Moteur de génération déterministe de séquences ADN synthétiques:
//! composition contrôlée, répétitions en tandem et motifs insérés avec
//! mutation et espacement configurables.

pub mod builder;
pub mod config;
pub mod error;
pub mod generator;
pub mod inserts;
pub mod logging;
pub mod output;
pub mod random;
pub mod repeats;
pub mod report;
pub mod sampler;
pub mod sequence;

// Réexportations principales
pub use builder::BaseSequenceBuilder;
pub use config::{BatchSpec, InsertSpec, Proportion, RepeatSpec, RunConfig, Seed};
pub use error::{ConfigError, Result, SeqError};
pub use generator::{generate, generate_with, sequence_id, BatchGenerator, RunResult};
pub use inserts::InsertionEngine;
pub use logging::init_logging;
pub use output::{parse_fasta, to_config_json, to_fasta, to_report, to_report_json, write_outputs, OutputTargets};
pub use random::RandomSource;
pub use repeats::RepeatEngine;
pub use report::{BatchStats, InsertStats, RepeatStats, RunReport};
pub use sampler::ProportionSampler;
pub use sequence::{Composition, FragmentPlacement, GeneratedSequence, InsertEvent, Nucleotide, RepeatEvent};

/// Vérifie une configuration sans consommer de tirage
pub fn validate(config: &RunConfig) -> Vec<ConfigError> {
    config.validate()
}
