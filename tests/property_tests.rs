//! Property-based tests for scoring and resolution invariants
//!
//! - Complexity stays within 0..=100 and never drops as usage grows
//! - Rankings are always sorted best first
//! - Name resolution is idempotent
//! - Every detection carries a valid confidence and line number

use proptest::prelude::*;
use protomap::{Aggregator, Catalog, Category, ComplexityModel, Detection, Ranker, Scanner};
use std::path::{Path, PathBuf};

fn protocol_key() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "websocket",
        "socket.io",
        "http_rest",
        "http_polling",
        "grpc",
        "graphql",
        "sse",
        "mqtt",
    ])
}

fn category() -> impl Strategy<Value = Category> {
    prop::sample::select(Category::ALL.to_vec())
}

fn detections(protocol: &str, confidences: &[f64]) -> Vec<Detection> {
    confidences
        .iter()
        .enumerate()
        .map(|(i, &confidence)| Detection {
            protocol: protocol.to_string(),
            file_path: PathBuf::from(format!("src/f{}.py", i % 7)),
            line_number: i + 1,
            pattern_matched: "p".to_string(),
            confidence,
            context: String::new(),
        })
        .collect()
}

proptest! {
    #[test]
    fn prop_complexity_is_bounded(
        key in protocol_key(),
        confidences in prop::collection::vec(0.0f64..=1.0, 0..40),
        files in 0usize..200,
        matches in 0usize..5000,
    ) {
        let catalog = Catalog::builtin();
        let model = ComplexityModel::new(&catalog);
        let score = model.complexity_score(key, &detections(key, &confidences), files, matches);
        prop_assert!((0.0..=100.0).contains(&score));
    }

    #[test]
    fn prop_unknown_protocol_is_fifty(
        key in "[a-z]{12,20}",
        files in 0usize..50,
        matches in 0usize..500,
    ) {
        let catalog = Catalog::builtin();
        prop_assume!(!catalog.contains(&key));
        let model = ComplexityModel::new(&catalog);
        prop_assert_eq!(model.complexity_score(&key, &[], files, matches), 50.0);
    }

    #[test]
    fn prop_complexity_monotonic_in_usage(
        key in protocol_key(),
        confidences in prop::collection::vec(0.0f64..=1.0, 0..20),
        files in 0usize..100,
        extra_files in 0usize..100,
        matches in 0usize..2000,
        extra_matches in 0usize..2000,
    ) {
        let catalog = Catalog::builtin();
        let model = ComplexityModel::new(&catalog);
        let ds = detections(key, &confidences);
        let base = model.complexity_score(key, &ds, files, matches);
        prop_assert!(model.complexity_score(key, &ds, files + extra_files, matches) >= base);
        prop_assert!(model.complexity_score(key, &ds, files, matches + extra_matches) >= base);
    }

    #[test]
    fn prop_rankings_are_sorted(
        usage in prop::collection::vec((protocol_key(), 1usize..80), 0..6),
        requirement in category(),
    ) {
        let catalog = Catalog::builtin();
        let all: Vec<Detection> = usage
            .iter()
            .flat_map(|(key, count)| detections(key, &vec![0.8; *count]))
            .collect();
        let summaries = Aggregator::new().unwrap().summarize(all);
        let records = Ranker::new(&catalog).rank(&summaries, requirement);

        prop_assert_eq!(records.len(), catalog.len());
        prop_assert!(records.windows(2).all(|w| w[0].score >= w[1].score));
        prop_assert!(records.iter().all(|r| (0.0..=100.0).contains(&r.score)));
        prop_assert!(records.iter().all(|r| !r.rationale.is_empty()));
    }

    #[test]
    fn prop_resolve_name_is_idempotent(text in "[a-zA-Z ._-]{0,16}") {
        let catalog = Catalog::builtin();
        if let Some(key) = catalog.resolve_name(&text) {
            prop_assert_eq!(catalog.resolve_name(key), Some(key));
        }
    }

    #[test]
    fn prop_detections_are_well_formed(
        lines in prop::collection::vec(
            prop::sample::select(vec![
                "import websocket",
                "fetch('/api')",
                "sio.emit('x')",
                "mqtt.Client()",
                "new EventSource('/s')",
                "plain text",
                "",
            ]),
            0..30,
        )
    ) {
        let scanner = Scanner::new(&Catalog::builtin()).unwrap();
        let source = lines.join("\n");
        let line_count = source.split('\n').count();
        for d in scanner.scan_source(Path::new("f.js"), &source) {
            prop_assert!((0.0..=1.0).contains(&d.confidence));
            prop_assert!(d.line_number >= 1 && d.line_number <= line_count);
            prop_assert!(d.context.contains(source.split('\n').nth(d.line_number - 1).unwrap()));
        }
    }
}

#[test]
fn canonical_keys_resolve_to_themselves() {
    let catalog = Catalog::builtin();
    for desc in catalog.iter() {
        assert_eq!(catalog.resolve_name(desc.key), Some(desc.key));
    }
}
