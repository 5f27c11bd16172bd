//! Types d'erreurs pour le moteur de génération

use std::path::PathBuf;
use thiserror::Error;

/// Erreur de validation d'une configuration de run.
///
/// Chaque variante nomme le lot fautif (`base_id`) et, pour les répétitions
/// et insertions, l'index de l'entrée dans le lot.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("id_padding doit être strictement positif")]
    InvalidIdPadding,

    #[error("seq_wrap doit être strictement positif")]
    InvalidSeqWrap,

    #[error("Aucun lot de séquences dans la configuration")]
    NoBatches,

    #[error("Lot #{index}: base_id vide")]
    EmptyBaseId { index: usize },

    #[error("Lot #{index}: base_id {base_id:?} contient un espace ou un caractère de contrôle")]
    InvalidBaseId { index: usize, base_id: String },

    #[error("base_id dupliqué: {0}")]
    DuplicateBaseId(String),

    #[error("Lot {base_id}: generate doit être strictement positif")]
    ZeroGenerate { base_id: String },

    #[error("Lot {base_id}: min_len doit être strictement positif")]
    ZeroLength { base_id: String },

    #[error("Lot {base_id}: min_len {min} > max_len {max}")]
    LengthRange { base_id: String, min: usize, max: usize },

    #[error("Lot {base_id}: proportion de {symbol} invalide ({value})")]
    InvalidProportion { base_id: String, symbol: char, value: f64 },

    #[error("Lot {base_id}: toutes les proportions sont nulles")]
    ZeroProportions { base_id: String },

    #[error("Lot {base_id}, répétition #{index}: likelihood {value} hors de [0, 1]")]
    Likelihood { base_id: String, index: usize, value: f64 },

    #[error("Lot {base_id}, répétition #{index}: motif de répétition vide")]
    EmptyPattern { base_id: String, index: usize },

    #[error("Lot {base_id}, répétition #{index}: base invalide '{base}' dans le motif")]
    InvalidPatternBase { base_id: String, index: usize, base: char },

    #[error("Lot {base_id}, répétition #{index}: pattern_min_reps {min} / pattern_max_reps {max} invalides")]
    RepsRange { base_id: String, index: usize, min: usize, max: usize },

    #[error("Lot {base_id}, insertion #{index}: séquence d'insertion vide")]
    EmptyMotif { base_id: String, index: usize },

    #[error("Lot {base_id}, insertion #{index}: base invalide '{base}' dans la séquence")]
    InvalidMotifBase { base_id: String, index: usize, base: char },

    #[error("Lot {base_id}, insertion #{index}: total doit être strictement positif")]
    ZeroTotal { base_id: String, index: usize },

    #[error("Lot {base_id}, insertion #{index}: motif de {len} bases trop court pour {total} fragments")]
    MotifTooShort { base_id: String, index: usize, len: usize, total: usize },

    #[error("Lot {base_id}, insertion #{index}: min_split {min} > max_split {max}")]
    SplitRange { base_id: String, index: usize, min: usize, max: usize },

    #[error("Lot {base_id}, insertion #{index}: paramètres d'espacement invalides (ave_gap {ave}, sd_gap {sd})")]
    Gap { base_id: String, index: usize, ave: f64, sd: f64 },

    #[error("Lot {base_id}, insertion #{index}: mutation_rate {value} hors de [0, 1]")]
    MutationRate { base_id: String, index: usize, value: f64 },
}

/// Erreur principale du moteur
#[derive(Error, Debug)]
pub enum SeqError {
    #[error("Configuration invalide ({} erreur(s)): {}", .0.len(), join_errors(.0))]
    Config(Vec<ConfigError>),

    #[error("JSON de configuration invalide: {0}")]
    Parse(serde_json::Error),

    #[error("FASTA invalide: {0}")]
    InvalidFasta(String),

    #[error("Erreur de génération: {0}")]
    Generation(String),

    #[error("Erreur IO sur {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Erreur de sérialisation: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SeqError {
    /// Construit une erreur IO rattachée à un chemin
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SeqError::Io {
            path: path.into(),
            source,
        }
    }
}

fn join_errors(errors: &[ConfigError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

pub type Result<T> = std::result::Result<T, SeqError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_lists_all() {
        let err = SeqError::Config(vec![
            ConfigError::DuplicateBaseId("DUP".to_string()),
            ConfigError::NoBatches,
        ]);
        let msg = err.to_string();
        assert!(msg.contains("2 erreur(s)"));
        assert!(msg.contains("DUP"));
    }

    #[test]
    fn test_io_error_names_path() {
        let err = SeqError::io(
            "/tmp/out.fasta",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "refusé"),
        );
        assert!(err.to_string().contains("/tmp/out.fasta"));
    }
}
