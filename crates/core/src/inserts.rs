//! Insertion de motifs fragmentés, mutés et espacés
//!
//! Politique de découpage, pour chaque application d'un InsertSpec:
//!
//! 1. le motif est coupé en `total` fragments de premier niveau en tirant
//!    `total - 1` frontières distinctes parmi les positions intérieures;
//! 2. chaque fragment de premier niveau reçoit `n` coupes supplémentaires,
//!    `n` tiré uniformément dans `[min_split, max_split]` puis borné par
//!    `longueur - 1` (le dépassement est compté dans `clamped_cuts`);
//! 3. les sous-fragments obtenus, dans l'ordre du motif, sont mutés puis
//!    placés.
//!
//! Ordre de consommation des tirages: frontières de premier niveau, puis pour
//! chaque fragment son nombre de coupes et ses coupes, puis les mutations
//! fragment par fragment, puis la position du premier fragment, puis les
//! espacements.

use crate::config::InsertSpec;
use crate::error::{ConfigError, Result, SeqError};
use crate::random::RandomSource;
use crate::sequence::{bases_to_string, parse_bases, FragmentPlacement, InsertEvent, Nucleotide};
use std::ops::Range;

#[derive(Debug, Clone)]
struct CompiledInsert {
    motif: Vec<Nucleotide>,
    total: usize,
    min_split: usize,
    max_split: usize,
    ave_gap: f64,
    sd_gap: f64,
    mutation_rate: f64,
}

/// Applique les InsertSpec d'un lot, dans l'ordre de configuration
#[derive(Debug, Clone, Default)]
pub struct InsertionEngine {
    inserts: Vec<CompiledInsert>,
}

impl InsertionEngine {
    pub fn new(specs: &[InsertSpec], base_id: &str) -> std::result::Result<Self, ConfigError> {
        let inserts = specs
            .iter()
            .enumerate()
            .map(|(index, spec)| {
                let motif = parse_bases(&spec.sequence).map_err(|base| {
                    ConfigError::InvalidMotifBase {
                        base_id: base_id.to_string(),
                        index,
                        base,
                    }
                })?;
                Ok(CompiledInsert {
                    motif,
                    total: spec.total,
                    min_split: spec.min_split,
                    max_split: spec.max_split,
                    ave_gap: spec.ave_gap,
                    sd_gap: spec.sd_gap,
                    mutation_rate: spec.mutation_rate,
                })
            })
            .collect::<std::result::Result<Vec<_>, ConfigError>>()?;
        Ok(Self { inserts })
    }

    /// Applique chaque InsertSpec sur l'état produit par le précédent
    pub fn apply(
        &self,
        sequence: Vec<Nucleotide>,
        rng: &mut RandomSource,
    ) -> Result<(Vec<Nucleotide>, Vec<InsertEvent>)> {
        let mut events = Vec::with_capacity(self.inserts.len());
        let mut current = sequence;
        for (spec_index, insert) in self.inserts.iter().enumerate() {
            let (next, event) = insert_motif(current, insert, spec_index, rng)?;
            tracing::trace!(
                spec_index,
                fragments = event.fragments.len(),
                mutations = event.mutations(),
                "motif inséré"
            );
            current = next;
            events.push(event);
        }
        Ok((current, events))
    }
}

fn insert_motif(
    host: Vec<Nucleotide>,
    insert: &CompiledInsert,
    spec_index: usize,
    rng: &mut RandomSource,
) -> Result<(Vec<Nucleotide>, InsertEvent)> {
    let (pieces, clamped_cuts) = split_motif(insert, rng)?;

    let mutated: Vec<(Vec<Nucleotide>, usize)> = pieces
        .iter()
        .map(|range| mutate(&insert.motif[range.clone()], insert.mutation_rate, rng))
        .collect();

    let mut current = host;
    let mut fragments = Vec::with_capacity(pieces.len());
    let mut gaps = Vec::with_capacity(pieces.len().saturating_sub(1));
    let mut offset = rng.draw_index(0, current.len());

    for (i, (range, (bases, mutations))) in pieces.iter().zip(mutated).enumerate() {
        if i > 0 {
            let gap = draw_gap(insert.ave_gap, insert.sd_gap, rng);
            gaps.push(gap);
            offset = offset.saturating_add(gap).min(current.len());
        }
        current = splice(&current, offset, &bases);
        fragments.push(FragmentPlacement {
            offset,
            original: bases_to_string(&insert.motif[range.clone()]),
            inserted: bases_to_string(&bases),
            mutations,
        });
        offset += bases.len();
    }

    Ok((
        current,
        InsertEvent {
            spec_index,
            fragments,
            gaps,
            clamped_cuts,
        },
    ))
}

/// Découpage en deux niveaux; renvoie les intervalles du motif et le nombre de coupes écrêtées
fn split_motif(insert: &CompiledInsert, rng: &mut RandomSource) -> Result<(Vec<Range<usize>>, usize)> {
    let len = insert.motif.len();
    if insert.total == 0 || insert.total > len {
        return Err(SeqError::Generation(format!(
            "impossible de couper un motif de {} bases en {} fragments",
            len, insert.total
        )));
    }

    let top_level = ranges_from_cuts(0..len, &draw_cuts(len, insert.total - 1, rng));

    let mut clamped = 0;
    let mut pieces = Vec::new();
    for range in top_level {
        let wanted = rng.draw_index(insert.min_split, insert.max_split);
        let allowed = range.len() - 1;
        if wanted > allowed {
            tracing::warn!(
                wanted,
                allowed,
                "fragment trop court, nombre de coupes écrêté"
            );
            clamped += wanted - allowed;
        }
        let cuts = draw_cuts(range.len(), wanted.min(allowed), rng);
        pieces.extend(ranges_from_cuts(range, &cuts));
    }

    if pieces.iter().any(|r| r.is_empty()) {
        return Err(SeqError::Generation(
            "le découpage du motif a produit un fragment vide".to_string(),
        ));
    }
    Ok((pieces, clamped))
}

/// `count` frontières intérieures distinctes dans `1..len`, triées
/// (Fisher–Yates partiel sur les candidats)
fn draw_cuts(len: usize, count: usize, rng: &mut RandomSource) -> Vec<usize> {
    let mut candidates: Vec<usize> = (1..len).collect();
    let count = count.min(candidates.len());
    for i in 0..count {
        let j = rng.draw_index(i, candidates.len() - 1);
        candidates.swap(i, j);
    }
    let mut cuts = candidates[..count].to_vec();
    cuts.sort_unstable();
    cuts
}

/// Intervalles consécutifs de `range` délimités par des coupes relatives
fn ranges_from_cuts(range: Range<usize>, cuts: &[usize]) -> Vec<Range<usize>> {
    let mut out = Vec::with_capacity(cuts.len() + 1);
    let mut start = range.start;
    for &cut in cuts {
        out.push(start..range.start + cut);
        start = range.start + cut;
    }
    out.push(start..range.end);
    out
}

/// Substitution base par base vers un nucléotide différent tiré uniformément
fn mutate(fragment: &[Nucleotide], rate: f64, rng: &mut RandomSource) -> (Vec<Nucleotide>, usize) {
    let mut mutations = 0;
    let bases = fragment
        .iter()
        .map(|&base| {
            if rng.draw_float() < rate {
                mutations += 1;
                base.others()[rng.draw_index(0, 2)]
            } else {
                base
            }
        })
        .collect();
    (bases, mutations)
}

/// Espacement N(ave, sd) arrondi au supérieur, ramené à 0 s'il est négatif
fn draw_gap(ave: f64, sd: f64, rng: &mut RandomSource) -> usize {
    let gap = rng.draw_normal(ave, sd).ceil();
    if gap <= 0.0 {
        0
    } else {
        gap as usize
    }
}

fn splice(host: &[Nucleotide], offset: usize, insert: &[Nucleotide]) -> Vec<Nucleotide> {
    let mut out = Vec::with_capacity(host.len() + insert.len());
    out.extend_from_slice(&host[..offset]);
    out.extend_from_slice(insert);
    out.extend_from_slice(&host[offset..]);
    out
}
