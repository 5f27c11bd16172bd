//! Tests d'intégration pour seqgen Core

use seqgen_core::{
    generate, parse_fasta, to_config_json, to_fasta, to_report, validate, write_outputs,
    ConfigError, OutputTargets, RunConfig, SeqError,
};
use std::time::Instant;

const EXAMPLE: &str = r#"{
    "id_padding": 3,
    "seq_wrap": 10,
    "seed": 1,
    "sequences": [{
        "base_id": "X",
        "generate": 2,
        "min_len": 5,
        "max_len": 5,
        "proportion": {"A": 1, "T": 0, "C": 0, "G": 0},
        "repeats": [],
        "inserts": []
    }]
}"#;

const FULL: &str = r#"{
    "id_padding": 4,
    "seq_wrap": 60,
    "seed": 20240611,
    "sequences": [
        {
            "base_id": "chrA_",
            "generate": 25,
            "min_len": 200,
            "max_len": 400,
            "proportion": {"A": 0.3, "T": 0.3, "C": 0.2, "G": 0.2},
            "repeats": [
                {"likelihood": 0.6, "pattern": "CAG", "pattern_min_reps": 4, "pattern_max_reps": 12},
                {"likelihood": 1.0, "pattern": "GT", "pattern_min_reps": 3, "pattern_max_reps": 3}
            ],
            "inserts": [
                {"sequence": "ATGGCGTTAGCCATTAGGCA", "total": 3, "min_split": 0, "max_split": 2,
                 "ave_gap": 15, "sd_gap": 5, "mutation_rate": 0.05}
            ]
        },
        {
            "base_id": "chrB_",
            "generate": 10,
            "min_len": 50,
            "max_len": 60,
            "repeats": [],
            "inserts": []
        }
    ]
}"#;

#[test]
fn test_single_symbol_scenario() {
    let config = RunConfig::from_json(EXAMPLE).unwrap();
    let result = generate(&config).unwrap();

    assert_eq!(result.sequences.len(), 2);
    assert_eq!(result.sequences[0].id, "X001");
    assert_eq!(result.sequences[1].id, "X002");
    assert!(result.sequences.iter().all(|s| s.sequence == "AAAAA"));
    assert_eq!(to_fasta(&result.sequences, config.seq_wrap), ">X001\nAAAAA\n>X002\nAAAAA\n");
}

#[test]
fn test_same_seed_same_fasta() {
    let config = RunConfig::from_json(FULL).unwrap();
    let a = generate(&config).unwrap();
    let b = generate(&config).unwrap();

    assert_eq!(to_fasta(&a.sequences, 60), to_fasta(&b.sequences, 60));
    assert_eq!(a.report.digest, b.report.digest);
    assert_eq!(to_report(&a), to_report(&b));
}

#[test]
fn test_different_seeds_differ() {
    let mut config = RunConfig::from_json(FULL).unwrap();
    let a = generate(&config).unwrap();
    config.seed = Some(seqgen_core::Seed::Number(7));
    let b = generate(&config).unwrap();
    assert_ne!(a.report.digest, b.report.digest);
}

#[test]
fn test_full_run_invariants() {
    let config = RunConfig::from_json(FULL).unwrap();
    let start = Instant::now();
    let result = generate(&config).unwrap();
    println!("35 séquences générées en {:?}", start.elapsed());

    assert_eq!(result.sequences.len(), 35);
    assert_eq!(result.sequences[0].id, "chrA_0001");
    assert_eq!(result.sequences[25].id, "chrB_0001");

    for seq in &result.sequences {
        assert!(seq.sequence.chars().all(|c| matches!(c, 'A' | 'C' | 'G' | 'T')));
    }
    for seq in &result.sequences[..25] {
        assert!((200..=400).contains(&seq.base_length));
        assert!(seq.repeats.iter().any(|e| e.pattern == "GT" && e.copies == 3));
        assert_eq!(seq.inserts.len(), 1);
    }
    for seq in &result.sequences[25..] {
        assert!((50..=60).contains(&seq.len()));
    }

    let report = &result.report;
    assert_eq!(report.total_sequences, 35);
    assert_eq!(report.total_bases, result.sequences.iter().map(|s| s.len()).sum::<usize>());
    assert_eq!(report.composition.total(), report.total_bases);
    assert_eq!(report.batches[0].repeats[1].applied, 25);
    assert_eq!(report.batches[0].repeats[1].total_copies, 75);
    assert_eq!(report.batches[0].inserts[0].applied, 25);
}

#[test]
fn test_duplicate_base_id_blocks_generation() {
    let json = r#"{
        "id_padding": 2, "seq_wrap": 60, "seed": 3,
        "sequences": [
            {"base_id": "DUP", "generate": 1, "min_len": 4, "max_len": 8},
            {"base_id": "DUP", "generate": 1, "min_len": 4, "max_len": 8}
        ]
    }"#;
    let config = RunConfig::from_json(json).unwrap();
    let errors = validate(&config);
    assert_eq!(errors, vec![ConfigError::DuplicateBaseId("DUP".to_string())]);
    assert!(errors[0].to_string().contains("DUP"));

    match generate(&config) {
        Err(SeqError::Config(errs)) => assert_eq!(errs, errors),
        other => panic!("erreur de configuration attendue, obtenu {:?}", other),
    }
}

#[test]
fn test_config_echo_reproduces_unseeded_run() {
    let mut config = RunConfig::from_json(FULL).unwrap();
    config.seed = None;
    let first = generate(&config).unwrap();
    assert!(first.report.self_seeded);

    let echo = to_config_json(&config, first.seed()).unwrap();
    let replay_config = RunConfig::from_json(&echo).unwrap();
    assert_eq!(replay_config.seed_value(), Some(first.seed()));

    let replay = generate(&replay_config).unwrap();
    assert_eq!(to_fasta(&first.sequences, 60), to_fasta(&replay.sequences, 60));
}

#[test]
fn test_write_outputs_to_files() {
    let config = RunConfig::from_json(FULL).unwrap();
    let result = generate(&config).unwrap();

    let dir = std::env::temp_dir().join(format!("seqgen-it-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let targets = OutputTargets {
        fasta: Some(dir.join("generated.fasta")),
        report: Some(dir.join("report.txt")),
        config: Some(dir.join("config.json")),
    };
    write_outputs(&result, &config, &targets).unwrap();

    let fasta = std::fs::read_to_string(dir.join("generated.fasta")).unwrap();
    let records = parse_fasta(&fasta).unwrap();
    assert_eq!(records.len(), 35);
    assert!(fasta.lines().filter(|l| !l.starts_with('>')).all(|l| l.len() <= 60));

    let report = std::fs::read_to_string(dir.join("report.txt")).unwrap();
    assert!(report.starts_with("SEED\n\t20240611"));
    assert!(report.contains("chrB_"));

    let echo = std::fs::read_to_string(dir.join("config.json")).unwrap();
    assert_eq!(RunConfig::from_json(&echo).unwrap(), config);

    std::fs::remove_dir_all(&dir).unwrap();
}
