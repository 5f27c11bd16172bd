//! Propriétés du moteur vérifiées sur des configurations tirées au hasard

use proptest::prelude::*;
use seqgen_core::{
    generate, parse_fasta, to_fasta, validate, BatchSpec, ConfigError, InsertSpec, Proportion,
    RepeatSpec, RunConfig, Seed,
};

fn motif() -> impl Strategy<Value = String> {
    proptest::collection::vec(prop_oneof![Just('A'), Just('C'), Just('G'), Just('T')], 2..30)
        .prop_map(|chars| chars.into_iter().collect())
}

fn proportion() -> impl Strategy<Value = Proportion> {
    (0.0..5.0f64, 0.0..5.0f64, 0.0..5.0f64, 0.1..5.0f64)
        .prop_map(|(a, t, c, g)| Proportion::new(a, t, c, g))
}

fn batch(id: usize) -> impl Strategy<Value = BatchSpec> {
    (1usize..5, 1usize..60, 0usize..60, proportion(), motif(), 0.0..=1.0f64)
        .prop_flat_map(move |(generate, min_len, extra, proportion, pattern, likelihood)| {
            (motif(), 0.0..=1.0f64).prop_map(move |(insert, mutation_rate)| {
                let total = 1 + insert.len() / 4;
                let mut b = BatchSpec::new(format!("B{}_", id), generate, min_len, min_len + extra);
                b.proportion = proportion.clone();
                b.repeats.push(RepeatSpec {
                    likelihood,
                    pattern: pattern.clone(),
                    pattern_min_reps: 1,
                    pattern_max_reps: 4,
                });
                b.inserts.push(InsertSpec {
                    sequence: insert,
                    total,
                    min_split: 0,
                    max_split: 2,
                    ave_gap: 5.0,
                    sd_gap: 3.0,
                    mutation_rate,
                });
                b
            })
        })
}

fn run_config() -> impl Strategy<Value = RunConfig> {
    (any::<u64>(), 1usize..6, 0usize..80, batch(0), batch(1)).prop_map(
        |(seed, id_padding, seq_wrap, a, b)| RunConfig {
            id_padding,
            seq_wrap: seq_wrap + 1,
            seed: Some(Seed::Number(seed)),
            sequences: vec![a, b],
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn identical_input_identical_fasta(config in run_config()) {
        let a = generate(&config).unwrap();
        let b = generate(&config).unwrap();
        prop_assert_eq!(to_fasta(&a.sequences, config.seq_wrap), to_fasta(&b.sequences, config.seq_wrap));
    }

    #[test]
    fn only_canonical_bases_and_bounded_base_length(config in run_config()) {
        let result = generate(&config).unwrap();
        let mut offset = 0;
        for batch in &config.sequences {
            for seq in &result.sequences[offset..offset + batch.generate] {
                prop_assert!(seq.sequence.chars().all(|c| matches!(c, 'A' | 'C' | 'G' | 'T')));
                prop_assert!(seq.base_length >= batch.min_len && seq.base_length <= batch.max_len);
                prop_assert!(seq.id.starts_with(&batch.base_id));
            }
            offset += batch.generate;
        }
        prop_assert_eq!(offset, result.sequences.len());
    }

    #[test]
    fn fasta_roundtrip_independent_of_wrap(config in run_config(), wrap in 0usize..100) {
        let result = generate(&config).unwrap();
        let parsed = parse_fasta(&to_fasta(&result.sequences, wrap)).unwrap();
        let expected: Vec<(String, String)> = result
            .sequences
            .iter()
            .map(|s| (s.id.clone(), s.sequence.clone()))
            .collect();
        prop_assert_eq!(parsed, expected);
    }

    #[test]
    fn unmutated_fragments_rebuild_motif(mut config in run_config()) {
        for batch in &mut config.sequences {
            for insert in &mut batch.inserts {
                insert.mutation_rate = 0.0;
            }
        }
        let result = generate(&config).unwrap();
        for seq in &result.sequences {
            for event in &seq.inserts {
                let rebuilt: String = event.fragments.iter().map(|f| f.inserted.as_str()).collect();
                let batch = config.sequences.iter().find(|b| seq.id.starts_with(&b.base_id)).unwrap();
                prop_assert_eq!(&rebuilt, &batch.inserts[event.spec_index].sequence);
            }
        }
    }

    #[test]
    fn fully_mutated_fragments_differ_everywhere(mut config in run_config()) {
        for batch in &mut config.sequences {
            for insert in &mut batch.inserts {
                insert.mutation_rate = 1.0;
            }
        }
        let result = generate(&config).unwrap();
        for seq in &result.sequences {
            for fragment in seq.inserts.iter().flat_map(|e| e.fragments.iter()) {
                for (o, i) in fragment.original.chars().zip(fragment.inserted.chars()) {
                    prop_assert_ne!(o, i);
                }
            }
        }
    }

    #[test]
    fn accepted_base_ids_survive_fasta_roundtrip(
        base_id in "[ -~\t\n\r\u{0}-\u{1f}é]{1,8}",
        wrap in 0usize..20,
    ) {
        let config = RunConfig {
            id_padding: 2,
            seq_wrap: 60,
            seed: Some(Seed::Number(1)),
            sequences: vec![BatchSpec::new(base_id.clone(), 2, 3, 6)],
        };
        let errors = validate(&config);
        if base_id.chars().any(|c| c.is_whitespace() || c.is_control()) {
            prop_assert_eq!(errors, vec![ConfigError::InvalidBaseId { index: 0, base_id }]);
        } else {
            prop_assert!(errors.is_empty());
            let result = generate(&config).unwrap();
            let parsed = parse_fasta(&to_fasta(&result.sequences, wrap)).unwrap();
            let expected: Vec<(String, String)> = result
                .sequences
                .iter()
                .map(|s| (s.id.clone(), s.sequence.clone()))
                .collect();
            prop_assert_eq!(parsed, expected);
        }
    }

    #[test]
    fn certain_repeat_always_present(seed in any::<u64>(), min_len in 1usize..50) {
        let mut batch = BatchSpec::new("R", 3, min_len, min_len + 10);
        batch.repeats.push(RepeatSpec {
            likelihood: 1.0,
            pattern: "GT".to_string(),
            pattern_min_reps: 3,
            pattern_max_reps: 3,
        });
        let config = RunConfig {
            id_padding: 2,
            seq_wrap: 60,
            seed: Some(Seed::Number(seed)),
            sequences: vec![batch],
        };
        let result = generate(&config).unwrap();
        for seq in &result.sequences {
            prop_assert!(seq.sequence.contains("GTGTGT"));
        }
    }
}
