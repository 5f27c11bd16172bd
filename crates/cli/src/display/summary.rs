//! Tableaux de synthèse

use crate::commands::inspect::{non_canonical, RecordStats};
use seqgen_core::{BatchStats, Composition, Nucleotide};
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct BatchRow {
    #[tabled(rename = "Lot")]
    base_id: String,
    #[tabled(rename = "N")]
    generated: usize,
    #[tabled(rename = "Longueur")]
    length: String,
    #[tabled(rename = "Moyenne")]
    mean: String,
    #[tabled(rename = "A/T/C/G %")]
    composition: String,
    #[tabled(rename = "Répétitions")]
    repeats: usize,
    #[tabled(rename = "Insertions")]
    inserts: usize,
    #[tabled(rename = "Mutations")]
    mutations: usize,
}

#[derive(Tabled)]
struct RecordRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Length")]
    length: usize,
    #[tabled(rename = "A/T/C/G %")]
    composition: String,
    #[tabled(rename = "GC%")]
    gc_percent: String,
    #[tabled(rename = "Autres")]
    other: usize,
}

/// Résumé d'un run, une ligne par lot
pub fn batch_table(batches: &[BatchStats]) -> String {
    let rows: Vec<BatchRow> = batches
        .iter()
        .map(|b| BatchRow {
            base_id: b.base_id.clone(),
            generated: b.generated,
            length: format!("{}-{}", b.length_min, b.length_max),
            mean: format!("{:.1}", b.length_mean),
            composition: percentages(&b.composition),
            repeats: b.repeats.iter().map(|r| r.applied).sum(),
            inserts: b.inserts.iter().map(|i| i.applied).sum(),
            mutations: b.inserts.iter().map(|i| i.mutations).sum(),
        })
        .collect();
    Table::new(rows).to_string()
}

/// Une ligne par enregistrement FASTA
pub fn record_table(stats: &[RecordStats]) -> String {
    let rows: Vec<RecordRow> = stats
        .iter()
        .map(|s| RecordRow {
            id: s.id.clone(),
            length: s.length,
            composition: percentages(&s.composition),
            gc_percent: format!("{:.1}%", s.gc_ratio * 100.0),
            other: non_canonical(s),
        })
        .collect();
    Table::new(rows).to_string()
}

fn percentages(composition: &Composition) -> String {
    Nucleotide::REPORT_ORDER
        .iter()
        .map(|&n| format!("{:.1}", composition.fraction(n) * 100.0))
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentages_follow_report_order() {
        let comp = Composition::of_str("AATG");
        assert_eq!(percentages(&comp), "50.0/25.0/0.0/25.0");
    }

    #[test]
    fn test_record_table_lists_ids() {
        let stats = vec![RecordStats {
            id: "X001".to_string(),
            length: 4,
            composition: Composition::of_str("ACGT"),
            gc_ratio: 0.5,
        }];
        let table = record_table(&stats);
        assert!(table.contains("X001"));
        assert!(table.contains("50.0%"));
    }
}
