// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Translation walkthrough.
//!
//! Demonstrates:
//! 1. Translating a query DSL document
//! 2. Translating a field predicate against a declared schema
//! 3. How rejected inputs are reported
//! 4. Displaying the metrics recorded along the way
//!
//! # Run
//!
//! ```bash
//! RUST_LOG=lucene_translate=debug cargo run --example translate
//! ```

use lucene_translate::predicate::{Expr, FieldSchema, PredicateTranslator};
use lucene_translate::{DslParser, LuceneEmitter};
use metrics_util::debugging::{DebugValue, DebuggingRecorder, Snapshotter};
use tracing_subscriber::EnvFilter;

const SAMPLE_QUERY: &str = r#"{
  "query": {
    "bool": {
      "must": [{ "term": { "species": "dog" } }],
      "filter": [{ "range": { "age": { "gte": 1, "lt": 8 } } }],
      "must_not": [{ "term": { "is_adopted": true } }],
      "should": [
        { "match": { "name": "buddy" } },
        { "fuzzy": { "breed": { "value": "labrador", "fuzziness": 1 } } }
      ]
    }
  }
}"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Install metrics recorder (captures everything the translators record)
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();
    recorder.install().expect("failed to install metrics recorder");

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();

    println!("\n╔═══════════════════════════════════════════════════════════════╗");
    println!("║           lucene-translate: Translation Walkthrough           ║");
    println!("╚═══════════════════════════════════════════════════════════════╝\n");

    // ─────────────────────────────────────────────────────────────────────────
    // 1. Query DSL
    // ─────────────────────────────────────────────────────────────────────────
    println!("📝 Query DSL...");
    let parser = DslParser::new();
    let node = parser.parse(SAMPLE_QUERY)?;
    println!("   ├─ Root clause: {}", node.kind());
    println!("   └─ Lucene:      {}", LuceneEmitter::emit(&node));

    // ─────────────────────────────────────────────────────────────────────────
    // 2. Predicate
    // ─────────────────────────────────────────────────────────────────────────
    println!("\n🔎 Predicate...");
    let schema = FieldSchema::new()
        .keyword("species")
        .text("name")
        .numeric("age")
        .boolean("is_adopted");
    let translator = PredicateTranslator::new(&schema);

    let predicate = Expr::field("species")
        .eq("cat")
        .and(Expr::field("age").le(3))
        .and(Expr::field("name").starts_with("Mr. "))
        .and(Expr::field("is_adopted").ne(true));
    println!("   └─ Lucene:      {}", translator.translate(&predicate)?);

    // ─────────────────────────────────────────────────────────────────────────
    // 3. Rejections
    // ─────────────────────────────────────────────────────────────────────────
    println!("\n🚫 Rejected inputs...");
    let rejected = [
        "",
        r#"{"term": {"species": "dog"}"#,
        r#"{"geo_shape": {"location": {}}}"#,
    ];
    for input in rejected {
        match parser.parse(input) {
            Ok(node) => println!("   ├─ unexpectedly accepted: {:?}", node),
            Err(e) => println!("   ├─ [{}] {}", e.reason(), e),
        }
    }
    if let Err(e) = translator.translate(&Expr::field("age").gt("old")) {
        println!("   └─ [{}] {}", e.reason(), e);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // 4. Metrics
    // ─────────────────────────────────────────────────────────────────────────
    println!("\n📊 Metrics...");
    dump_metrics(&snapshotter);

    println!();
    Ok(())
}

fn dump_metrics(snapshotter: &Snapshotter) {
    let snapshot = snapshotter.snapshot();

    let mut counters: Vec<_> = vec![];
    let mut histograms: Vec<_> = vec![];

    for (composite_key, _, _, value) in snapshot.into_vec() {
        let (_, key) = composite_key.into_parts();
        let name = key.name().to_string();
        let labels: Vec<_> = key.labels().map(|l| format!("{}={}", l.key(), l.value())).collect();
        let label_str = if labels.is_empty() { String::new() } else { format!("{{{}}}", labels.join(",")) };

        match value {
            DebugValue::Counter(v) => counters.push((name, label_str, v)),
            DebugValue::Gauge(_) => {}
            DebugValue::Histogram(samples) => {
                let count = samples.len();
                let sum: f64 = samples.iter().map(|v| v.into_inner()).sum();
                histograms.push((name, label_str, count, sum));
            }
        }
    }

    counters.sort();
    histograms.sort_by(|a, b| (&a.0, &a.1).cmp(&(&b.0, &b.1)));

    if !counters.is_empty() {
        println!("   ┌─ Counters (cumulative)");
        for (name, labels, value) in &counters {
            println!("   │  └─ {}{} = {}", name, labels, value);
        }
    }

    if !histograms.is_empty() {
        println!("   └─ Histograms (distributions)");
        for (name, labels, count, sum) in &histograms {
            println!("      └─ {}{} count={} sum={:.6}", name, labels, count, sum);
        }
    }

    if counters.is_empty() && histograms.is_empty() {
        println!("   └─ (no metrics recorded)");
    }
}
