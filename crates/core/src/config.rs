//! Configuration d'un run de génération
//!
//! Le schéma JSON reprend exactement les noms de champs du format d'entrée:
//! `id_padding`, `seq_wrap`, `seed`, `sequences[]` avec pour chaque lot
//! `base_id`, `generate`, `min_len`, `max_len`, `proportion`, `repeats[]` et
//! `inserts[]`. Les champs inconnus sont ignorés.

use crate::error::{ConfigError, Result, SeqError};
use crate::sequence::Nucleotide;
use serde::{Deserialize, Deserializer, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::path::Path;

/// Seed tel qu'écrit dans la configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Seed {
    Number(u64),
    /// Entier négatif, réinterprété bit à bit en 64 bits non signés
    Signed(i64),
    /// Seed textuel; numérique il est parsé, sinon dérivé par SHA-256
    Text(String),
}

impl Seed {
    /// Valeur 64 bits effectivement utilisée pour seeder la source aléatoire
    pub fn value(&self) -> u64 {
        match self {
            Seed::Number(n) => *n,
            Seed::Signed(n) => *n as u64,
            Seed::Text(text) => match parse_integer(text.trim()) {
                Some(n) => n,
                None => {
                    let hash = Sha256::digest(text.as_bytes());
                    let mut bytes = [0u8; 8];
                    bytes.copy_from_slice(&hash[..8]);
                    u64::from_be_bytes(bytes)
                }
            },
        }
    }
}

fn parse_integer(text: &str) -> Option<u64> {
    text.parse::<u64>()
        .ok()
        .or_else(|| text.parse::<i64>().ok().map(|n| n as u64))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SeedRepr {
    Number(u64),
    Signed(i64),
    Flag(bool),
    Text(String),
}

/// `null`, `false`, `""` et l'absence du champ signifient « pas de seed »
fn deserialize_seed<'de, D>(deserializer: D) -> std::result::Result<Option<Seed>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<SeedRepr>::deserialize(deserializer)? {
        None | Some(SeedRepr::Flag(false)) => Ok(None),
        Some(SeedRepr::Flag(true)) => Err(serde::de::Error::custom(
            "seed: true n'est pas un seed valide (entier, chaîne, false ou null attendu)",
        )),
        Some(SeedRepr::Number(n)) => Ok(Some(Seed::Number(n))),
        Some(SeedRepr::Signed(n)) => Ok(Some(Seed::Signed(n))),
        Some(SeedRepr::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(SeedRepr::Text(text)) => Ok(Some(Seed::Text(text))),
    }
}

/// Poids relatifs des quatre nucléotides, normalisés à l'usage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proportion {
    #[serde(rename = "A")]
    pub a: f64,
    #[serde(rename = "T")]
    pub t: f64,
    #[serde(rename = "C")]
    pub c: f64,
    #[serde(rename = "G")]
    pub g: f64,
}

impl Default for Proportion {
    fn default() -> Self {
        Self {
            a: 0.25,
            t: 0.25,
            c: 0.25,
            g: 0.25,
        }
    }
}

impl Proportion {
    pub fn new(a: f64, t: f64, c: f64, g: f64) -> Self {
        Self { a, t, c, g }
    }

    /// Poids brut d'un nucléotide
    pub fn weight(&self, n: Nucleotide) -> f64 {
        match n {
            Nucleotide::A => self.a,
            Nucleotide::C => self.c,
            Nucleotide::G => self.g,
            Nucleotide::T => self.t,
        }
    }

    /// Poids dans l'ordre canonique `Nucleotide::ALL`
    pub fn weights(&self) -> [f64; 4] {
        Nucleotide::ALL.map(|n| self.weight(n))
    }

    fn check(&self, base_id: &str, errors: &mut Vec<ConfigError>) {
        let mut valid = true;
        for n in Nucleotide::REPORT_ORDER {
            let value = self.weight(n);
            if !value.is_finite() || value < 0.0 {
                errors.push(ConfigError::InvalidProportion {
                    base_id: base_id.to_string(),
                    symbol: n.as_char(),
                    value,
                });
                valid = false;
            }
        }
        if valid && self.weights().iter().all(|&w| w == 0.0) {
            errors.push(ConfigError::ZeroProportions {
                base_id: base_id.to_string(),
            });
        }
    }
}

/// Motif de répétition en tandem
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepeatSpec {
    /// Probabilité par séquence d'appliquer ce motif
    pub likelihood: f64,
    pub pattern: String,
    pub pattern_min_reps: usize,
    pub pattern_max_reps: usize,
}

impl RepeatSpec {
    fn check(&self, base_id: &str, index: usize, errors: &mut Vec<ConfigError>) {
        if !(0.0..=1.0).contains(&self.likelihood) {
            errors.push(ConfigError::Likelihood {
                base_id: base_id.to_string(),
                index,
                value: self.likelihood,
            });
        }
        if self.pattern.is_empty() {
            errors.push(ConfigError::EmptyPattern {
                base_id: base_id.to_string(),
                index,
            });
        } else if let Some(base) = first_invalid_base(&self.pattern) {
            errors.push(ConfigError::InvalidPatternBase {
                base_id: base_id.to_string(),
                index,
                base,
            });
        }
        if self.pattern_min_reps == 0 || self.pattern_min_reps > self.pattern_max_reps {
            errors.push(ConfigError::RepsRange {
                base_id: base_id.to_string(),
                index,
                min: self.pattern_min_reps,
                max: self.pattern_max_reps,
            });
        }
    }
}

/// Motif inséré par fragments mutés et espacés
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsertSpec {
    pub sequence: String,
    /// Nombre de fragments de premier niveau
    pub total: usize,
    /// Bornes du nombre de coupes supplémentaires par fragment
    pub min_split: usize,
    pub max_split: usize,
    pub ave_gap: f64,
    pub sd_gap: f64,
    pub mutation_rate: f64,
}

impl InsertSpec {
    fn check(&self, base_id: &str, index: usize, errors: &mut Vec<ConfigError>) {
        if self.sequence.is_empty() {
            errors.push(ConfigError::EmptyMotif {
                base_id: base_id.to_string(),
                index,
            });
        } else if let Some(base) = first_invalid_base(&self.sequence) {
            errors.push(ConfigError::InvalidMotifBase {
                base_id: base_id.to_string(),
                index,
                base,
            });
        }
        if self.total == 0 {
            errors.push(ConfigError::ZeroTotal {
                base_id: base_id.to_string(),
                index,
            });
        } else if !self.sequence.is_empty() && self.sequence.chars().count() < self.total {
            errors.push(ConfigError::MotifTooShort {
                base_id: base_id.to_string(),
                index,
                len: self.sequence.chars().count(),
                total: self.total,
            });
        }
        if self.min_split > self.max_split {
            errors.push(ConfigError::SplitRange {
                base_id: base_id.to_string(),
                index,
                min: self.min_split,
                max: self.max_split,
            });
        }
        let gap_ok = |v: f64| v.is_finite() && v >= 0.0;
        if !gap_ok(self.ave_gap) || !gap_ok(self.sd_gap) {
            errors.push(ConfigError::Gap {
                base_id: base_id.to_string(),
                index,
                ave: self.ave_gap,
                sd: self.sd_gap,
            });
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            errors.push(ConfigError::MutationRate {
                base_id: base_id.to_string(),
                index,
                value: self.mutation_rate,
            });
        }
    }
}

/// Paramètres d'un lot de séquences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSpec {
    pub base_id: String,
    pub generate: usize,
    pub min_len: usize,
    pub max_len: usize,
    #[serde(default)]
    pub proportion: Proportion,
    #[serde(default)]
    pub repeats: Vec<RepeatSpec>,
    #[serde(default)]
    pub inserts: Vec<InsertSpec>,
}

impl BatchSpec {
    /// Lot minimal: proportions uniformes, sans répétitions ni insertions
    pub fn new(base_id: impl Into<String>, generate: usize, min_len: usize, max_len: usize) -> Self {
        Self {
            base_id: base_id.into(),
            generate,
            min_len,
            max_len,
            proportion: Proportion::default(),
            repeats: Vec::new(),
            inserts: Vec::new(),
        }
    }

    fn check(&self, index: usize, errors: &mut Vec<ConfigError>) {
        if self.base_id.is_empty() {
            errors.push(ConfigError::EmptyBaseId { index });
        } else if !is_valid_base_id(&self.base_id) {
            errors.push(ConfigError::InvalidBaseId {
                index,
                base_id: self.base_id.clone(),
            });
        }
        let id = self.base_id.as_str();
        if self.generate == 0 {
            errors.push(ConfigError::ZeroGenerate {
                base_id: id.to_string(),
            });
        }
        if self.min_len == 0 {
            errors.push(ConfigError::ZeroLength {
                base_id: id.to_string(),
            });
        }
        if self.min_len > self.max_len {
            errors.push(ConfigError::LengthRange {
                base_id: id.to_string(),
                min: self.min_len,
                max: self.max_len,
            });
        }
        self.proportion.check(id, errors);
        for (i, repeat) in self.repeats.iter().enumerate() {
            repeat.check(id, i, errors);
        }
        for (i, insert) in self.inserts.iter().enumerate() {
            insert.check(id, i, errors);
        }
    }
}

/// Configuration complète d'un run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Largeur du complément à zéros des identifiants
    pub id_padding: usize,
    /// Largeur de ligne FASTA
    pub seq_wrap: usize,
    #[serde(
        default,
        deserialize_with = "deserialize_seed",
        skip_serializing_if = "Option::is_none"
    )]
    pub seed: Option<Seed>,
    /// Lots, dans l'ordre de génération et de sortie
    pub sequences: Vec<BatchSpec>,
}

impl RunConfig {
    /// Parse une configuration JSON
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(SeqError::Parse)
    }

    /// Charge une configuration depuis un fichier JSON
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| SeqError::io(path, e))?;
        Self::from_json(&content)
    }

    /// Seed numérique demandé, s'il y en a un
    pub fn seed_value(&self) -> Option<u64> {
        self.seed.as_ref().map(Seed::value)
    }

    /// Copie de la configuration portant le seed réalisé.
    ///
    /// Un seed déjà présent est conservé sous sa forme d'origine.
    pub fn with_realized_seed(&self, realized: u64) -> Self {
        let mut config = self.clone();
        if config.seed.is_none() {
            config.seed = Some(Seed::Number(realized));
        }
        config
    }

    /// Vérifie la configuration et renvoie toutes les erreurs trouvées
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.id_padding == 0 {
            errors.push(ConfigError::InvalidIdPadding);
        }
        if self.seq_wrap == 0 {
            errors.push(ConfigError::InvalidSeqWrap);
        }
        if self.sequences.is_empty() {
            errors.push(ConfigError::NoBatches);
        }

        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        for (i, batch) in self.sequences.iter().enumerate() {
            batch.check(i, &mut errors);
            if !batch.base_id.is_empty()
                && !seen.insert(batch.base_id.as_str())
                && reported.insert(batch.base_id.as_str())
            {
                errors.push(ConfigError::DuplicateBaseId(batch.base_id.clone()));
            }
        }
        errors
    }

    /// Configuration de départ reprenant les valeurs par défaut de l'interface
    pub fn template() -> Self {
        let mut batch = BatchSpec::new("seq", 10, 500, 1000);
        batch.repeats.push(RepeatSpec {
            likelihood: 0.5,
            pattern: "GT".to_string(),
            pattern_min_reps: 5,
            pattern_max_reps: 15,
        });
        batch.inserts.push(InsertSpec {
            sequence: "ATGCGTACGTTAGC".to_string(),
            total: 2,
            min_split: 0,
            max_split: 1,
            ave_gap: 10.0,
            sd_gap: 3.0,
            mutation_rate: 0.01,
        });
        Self {
            id_padding: 4,
            seq_wrap: 70,
            seed: None,
            sequences: vec![batch],
        }
    }
}

/// Un identifiant FASTA tient sur une ligne, sans blanc
pub fn is_valid_base_id(id: &str) -> bool {
    !id.chars().any(|c| c.is_whitespace() || c.is_control())
}

fn first_invalid_base(s: &str) -> Option<char> {
    s.chars().find(|&c| Nucleotide::from_char(c).is_none())
}
