//! Insertion de répétitions en tandem

use crate::config::RepeatSpec;
use crate::error::ConfigError;
use crate::random::RandomSource;
use crate::sequence::{parse_bases, Nucleotide, RepeatEvent};

/// Motif de répétition prêt à l'emploi
#[derive(Debug, Clone)]
struct CompiledRepeat {
    likelihood: f64,
    pattern: Vec<Nucleotide>,
    pattern_text: String,
    min_reps: usize,
    max_reps: usize,
}

/// Applique les RepeatSpec d'un lot, dans l'ordre de configuration
#[derive(Debug, Clone, Default)]
pub struct RepeatEngine {
    repeats: Vec<CompiledRepeat>,
}

impl RepeatEngine {
    pub fn new(specs: &[RepeatSpec], base_id: &str) -> Result<Self, ConfigError> {
        let repeats = specs
            .iter()
            .enumerate()
            .map(|(index, spec)| {
                let pattern = parse_bases(&spec.pattern).map_err(|base| {
                    ConfigError::InvalidPatternBase {
                        base_id: base_id.to_string(),
                        index,
                        base,
                    }
                })?;
                Ok(CompiledRepeat {
                    likelihood: spec.likelihood,
                    pattern_text: spec.pattern.to_ascii_uppercase(),
                    pattern,
                    min_reps: spec.pattern_min_reps,
                    max_reps: spec.pattern_max_reps,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;
        Ok(Self { repeats })
    }

    /// Applique chaque motif indépendamment; chaque étape repart de la
    /// séquence produite par la précédente.
    pub fn apply(
        &self,
        sequence: Vec<Nucleotide>,
        rng: &mut RandomSource,
    ) -> (Vec<Nucleotide>, Vec<RepeatEvent>) {
        let mut events = Vec::new();
        let mut current = sequence;
        for (spec_index, repeat) in self.repeats.iter().enumerate() {
            if rng.draw_float() >= repeat.likelihood {
                continue;
            }
            let copies = rng.draw_index(repeat.min_reps, repeat.max_reps);
            let offset = rng.draw_index(0, current.len());
            current = splice_tandem(&current, offset, &repeat.pattern, copies);
            tracing::trace!(
                pattern = %repeat.pattern_text,
                copies,
                offset,
                "répétition insérée"
            );
            events.push(RepeatEvent {
                spec_index,
                pattern: repeat.pattern_text.clone(),
                copies,
                offset,
            });
        }
        (current, events)
    }
}

/// Nouvelle séquence avec `copies` copies contiguës de `pattern` à `offset`
fn splice_tandem(
    host: &[Nucleotide],
    offset: usize,
    pattern: &[Nucleotide],
    copies: usize,
) -> Vec<Nucleotide> {
    let mut out = Vec::with_capacity(host.len() + pattern.len() * copies);
    out.extend_from_slice(&host[..offset]);
    for _ in 0..copies {
        out.extend_from_slice(pattern);
    }
    out.extend_from_slice(&host[offset..]);
    out
}
