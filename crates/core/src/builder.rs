//! Construction de la séquence brute d'un lot

use crate::config::BatchSpec;
use crate::error::ConfigError;
use crate::random::RandomSource;
use crate::sampler::ProportionSampler;
use crate::sequence::Nucleotide;

/// Produit les séquences brutes d'un lot: longueur uniforme dans
/// `[min_len, max_len]` puis tirages pondérés successifs.
#[derive(Debug, Clone)]
pub struct BaseSequenceBuilder {
    min_len: usize,
    max_len: usize,
    sampler: ProportionSampler,
}

impl BaseSequenceBuilder {
    pub fn new(batch: &BatchSpec) -> Result<Self, ConfigError> {
        Ok(Self {
            min_len: batch.min_len,
            max_len: batch.max_len,
            sampler: ProportionSampler::new(&batch.proportion, &batch.base_id)?,
        })
    }

    /// Tire une longueur puis autant de nucléotides, dans l'ordre des tirages
    pub fn build(&self, rng: &mut RandomSource) -> Vec<Nucleotide> {
        let length = rng.draw_index(self.min_len, self.max_len);
        (0..length)
            .map(|_| self.sampler.next_nucleotide(rng))
            .collect()
    }
}
