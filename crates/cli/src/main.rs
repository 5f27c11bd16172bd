//! CLI pour la génération de séquences ADN synthétiques

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;
mod display;

use commands::{generate, inspect, template, validate};

#[derive(Parser)]
#[command(name = "seqgen")]
#[command(about = "Génération déterministe de séquences ADN synthétiques", long_about = None)]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Niveau de verbosité
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Génère les séquences décrites par une configuration JSON
    Generate {
        /// Fichier de configuration
        #[arg(short, long)]
        config: PathBuf,

        /// Fichier FASTA de sortie (stdout si absent)
        #[arg(short, long)]
        fasta: Option<PathBuf>,

        /// Fichier de rapport
        #[arg(short, long)]
        report: Option<PathBuf>,

        /// Copie de la configuration avec la graine effective
        #[arg(long)]
        config_out: Option<PathBuf>,

        /// Remplace la graine de la configuration
        #[arg(short, long)]
        seed: Option<u64>,

        /// Remplace la largeur de ligne FASTA
        #[arg(short, long, value_parser = parse_wrap)]
        wrap: Option<usize>,

        /// N'affiche que le rapport (texte ou JSON) ou la configuration sur stdout
        #[arg(long, value_enum)]
        only: Option<OnlyOutput>,
    },

    /// Vérifie une configuration sans générer
    Validate {
        /// Fichier de configuration
        #[arg(short, long)]
        config: PathBuf,
    },

    /// Produit une configuration de départ
    Template {
        /// Fichier de sortie (stdout si absent)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Affiche longueur et composition d'un fichier FASTA
    Inspect {
        /// Fichier FASTA
        #[arg(short, long)]
        input: PathBuf,

        /// Format d'affichage
        #[arg(short, long, value_enum, default_value = "table")]
        format: InspectFormat,
    },
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OnlyOutput {
    Report,
    ReportJson,
    Config,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum InspectFormat {
    Table,
    Json,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    seqgen_core::init_logging(cli.verbose);

    match cli.command {
        Commands::Generate {
            config,
            fasta,
            report,
            config_out,
            seed,
            wrap,
            only,
        } => {
            let options = generate::GenerateOptions {
                fasta,
                report,
                config_out,
                seed,
                wrap,
                only,
            };
            generate::run(config, options)?;
        }
        Commands::Validate { config } => {
            if !validate::run(config)? {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Template { output } => {
            template::run(output)?;
        }
        Commands::Inspect { input, format } => {
            inspect::run(input, format)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Largeur de ligne FASTA: entier strictement positif
fn parse_wrap(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("la largeur doit être au moins 1".to_string()),
        Ok(width) => Ok(width),
        Err(e) => Err(e.to_string()),
    }
}

/// Crée une barre de progression spinner sur stderr
pub fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}") {
        pb.set_style(style);
    }
    pb.set_message(msg.to_string());
    pb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_zero_rejected_by_parser() {
        let parsed = Cli::try_parse_from(["seqgen", "generate", "-c", "run.json", "--wrap", "0"]);
        assert!(parsed.is_err());
        assert!(parse_wrap("abc").is_err());

        let parsed = Cli::try_parse_from(["seqgen", "generate", "-c", "run.json", "--wrap", "60"]);
        match parsed.map(|cli| cli.command) {
            Ok(Commands::Generate { wrap, .. }) => assert_eq!(wrap, Some(60)),
            _ => panic!("commande generate attendue"),
        }
    }
}
