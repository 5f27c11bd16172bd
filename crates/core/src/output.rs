//! Mise en forme des sorties: FASTA, rapport texte, écho de configuration

use crate::config::RunConfig;
use crate::error::{Result, SeqError};
use crate::generator::RunResult;
use crate::report::{BatchStats, RunReport};
use crate::sequence::{Composition, GeneratedSequence, Nucleotide};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// FASTA: `>id` puis la séquence coupée à `wrap` caractères (0 = une seule ligne)
pub fn to_fasta(sequences: &[GeneratedSequence], wrap: usize) -> String {
    let mut out = String::with_capacity(sequences.iter().map(|s| s.len() + s.id.len() + 2).sum());
    for seq in sequences {
        out.push('>');
        out.push_str(&seq.id);
        out.push('\n');
        for line in wrap_lines(&seq.sequence, wrap) {
            out.push_str(line);
            out.push('\n');
        }
    }
    out
}

/// Découpe un texte en lignes de `width` caractères
pub fn wrap_lines(text: &str, width: usize) -> Vec<&str> {
    if text.is_empty() {
        return Vec::new();
    }
    if width == 0 {
        return vec![text];
    }
    let mut lines = Vec::with_capacity(text.len() / width + 1);
    let mut start = 0;
    for (count, (pos, _)) in text.char_indices().enumerate() {
        if count > 0 && count % width == 0 {
            lines.push(&text[start..pos]);
            start = pos;
        }
    }
    lines.push(&text[start..]);
    lines
}

/// Relit un FASTA en paires (identifiant, séquence déroulée)
pub fn parse_fasta(text: &str) -> Result<Vec<(String, String)>> {
    let mut records: Vec<(String, String)> = Vec::new();
    for (line_no, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(header) = line.strip_prefix('>') {
            records.push((header.trim().to_string(), String::new()));
        } else {
            match records.last_mut() {
                Some((_, seq)) => seq.push_str(line),
                None => {
                    return Err(SeqError::InvalidFasta(format!(
                        "ligne {}: séquence sans en-tête '>'",
                        line_no + 1
                    )))
                }
            }
        }
    }
    Ok(records)
}

/// Rapport lisible: seed, totaux du run puis détail par lot
pub fn to_report(result: &RunResult) -> String {
    let report = &result.report;
    let mut lines = Vec::new();

    lines.push("SEED".to_string());
    let origin = if report.self_seeded {
        "tiré depuis l'entropie système"
    } else {
        "fourni par la configuration"
    };
    lines.push(indent(&format!("{}\t({})", report.seed, origin)));

    lines.push("RUN".to_string());
    lines.push(indent(&format!("n\tbases\t{}\tsha256", composition_header())));
    lines.push(indent(&format!(
        "{}\t{}\t{}\t{}",
        report.total_sequences,
        report.total_bases,
        composition_row(&report.composition),
        report.digest
    )));

    for batch in &report.batches {
        push_batch(&mut lines, batch);
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn push_batch(lines: &mut Vec<String>, batch: &BatchStats) {
    lines.push("BATCH".to_string());
    lines.push(indent(&format!(
        "n\tid\t{}\tmin_len\tmax_len\tave_len\tsd_len",
        composition_header()
    )));
    lines.push(indent(&format!(
        "{}\t{}\t{}\t{}\t{}\t{:.2}\t{:.2}",
        batch.generated,
        batch.base_id,
        composition_row(&batch.composition),
        batch.length_min,
        batch.length_max,
        batch.length_mean,
        batch.length_sd
    )));
    lines.push(indent(&format!(
        "longueur de base\t{}-{}",
        batch.base_length_min, batch.base_length_max
    )));
    if batch.padding_overflow {
        lines.push(indent("attention\tidentifiants plus larges que id_padding"));
    }

    lines.push("INSERTS".to_string());
    lines.push(indent("n\tlen\tfrag\tmut\trate\tave_gap\tclamped\tsequence"));
    for ins in &batch.inserts {
        lines.push(indent(&format!(
            "{}\t{}\t{}\t{}\t{}\t{:.2}\t{}\t{}",
            ins.applied,
            ins.motif.len(),
            ins.fragments,
            ins.mutations,
            ins.mutation_rate,
            ins.mean_gap,
            ins.clamped_cuts,
            ins.motif
        )));
    }

    lines.push("REPEATS".to_string());
    lines.push(indent("n\tcopies\tlen\tlikelihood\tsequence"));
    for rep in &batch.repeats {
        lines.push(indent(&format!(
            "{}\t{}\t{}\t{}\t{}",
            rep.applied,
            rep.total_copies,
            rep.pattern.len(),
            rep.likelihood,
            rep.pattern
        )));
    }
}

fn indent(text: &str) -> String {
    format!("\t{}", text)
}

fn composition_header() -> String {
    Nucleotide::REPORT_ORDER
        .iter()
        .map(|n| n.as_char().to_string())
        .collect::<Vec<_>>()
        .join("\t")
}

fn composition_row(comp: &Composition) -> String {
    Nucleotide::REPORT_ORDER
        .iter()
        .map(|&n| format!("{:.2}", comp.fraction(n)))
        .collect::<Vec<_>>()
        .join("\t")
}

/// Écho JSON de la configuration, seed réalisé inclus
pub fn to_config_json(config: &RunConfig, realized_seed: u64) -> Result<String> {
    Ok(serde_json::to_string_pretty(&config.with_realized_seed(realized_seed))?)
}

/// Rapport au format JSON
pub fn to_report_json(report: &RunReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Chemins de sortie demandés; chaque sortie est optionnelle
#[derive(Debug, Clone, Default)]
pub struct OutputTargets {
    pub fasta: Option<PathBuf>,
    pub report: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

impl OutputTargets {
    pub fn is_empty(&self) -> bool {
        self.fasta.is_none() && self.report.is_none() && self.config.is_none()
    }
}

/// Écrit les sorties demandées, une fois la génération terminée.
///
/// Pas de nouvelle tentative ni d'annulation: la première erreur est
/// renvoyée avec son chemin, les fichiers déjà écrits restent en place.
pub fn write_outputs(result: &RunResult, config: &RunConfig, targets: &OutputTargets) -> Result<()> {
    if let Some(path) = &targets.fasta {
        write_text(path, &to_fasta(&result.sequences, config.seq_wrap))?;
    }
    if let Some(path) = &targets.report {
        write_text(path, &to_report(result))?;
    }
    if let Some(path) = &targets.config {
        write_text(path, &to_config_json(config, result.seed())?)?;
    }
    Ok(())
}

/// Écrit un fichier texte; le fichier est fermé en sortie de fonction
pub fn write_text(path: &Path, content: &str) -> Result<()> {
    let file = File::create(path).map_err(|e| SeqError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(content.as_bytes())
        .map_err(|e| SeqError::io(path, e))?;
    writer.flush().map_err(|e| SeqError::io(path, e))?;
    tracing::info!(path = %path.display(), bytes = content.len(), "fichier écrit");
    Ok(())
}
