//! Tirage pondéré des nucléotides

use crate::config::Proportion;
use crate::error::ConfigError;
use crate::random::RandomSource;
use crate::sequence::Nucleotide;

/// Table cumulative normalisée des quatre nucléotides
#[derive(Debug, Clone, PartialEq)]
pub struct ProportionSampler {
    cumulative: [f64; 4],
}

impl ProportionSampler {
    /// Normalise les poids; échoue si un poids est négatif ou si tous sont nuls
    pub fn new(proportion: &Proportion, base_id: &str) -> Result<Self, ConfigError> {
        let weights = proportion.weights();
        for (n, &w) in Nucleotide::ALL.iter().zip(weights.iter()) {
            if !w.is_finite() || w < 0.0 {
                return Err(ConfigError::InvalidProportion {
                    base_id: base_id.to_string(),
                    symbol: n.as_char(),
                    value: w,
                });
            }
        }
        let total: f64 = weights.iter().sum();
        if total <= 0.0 {
            return Err(ConfigError::ZeroProportions {
                base_id: base_id.to_string(),
            });
        }

        let mut cumulative = [0.0; 4];
        let mut acc = 0.0;
        for (slot, w) in cumulative.iter_mut().zip(weights.iter()) {
            acc += w / total;
            *slot = acc;
        }
        // Dernière borne non nulle forcée à 1 pour absorber l'arrondi
        if let Some(last) = weights.iter().rposition(|&w| w > 0.0) {
            for slot in cumulative.iter_mut().skip(last) {
                *slot = 1.0;
            }
        }
        Ok(Self { cumulative })
    }

    /// Probabilité normalisée d'un nucléotide
    #[cfg(test)]
    fn probability(&self, n: Nucleotide) -> f64 {
        let i = n.index();
        let prev = if i == 0 { 0.0 } else { self.cumulative[i - 1] };
        self.cumulative[i] - prev
    }

    /// Un tirage pondéré
    pub fn next_nucleotide(&self, rng: &mut RandomSource) -> Nucleotide {
        let index = rng.draw_choice(&self.cumulative).unwrap_or(0);
        Nucleotide::ALL[index]
    }
}
