//! Resolution properties checked through a full round.

use matchergen::config::GeneratorConfig;
use matchergen::diagnostics::DiagnosticCollector;
use matchergen::dispatch::{GenerationDispatcher, Round, RoundOutcome};
use matchergen::model::{SymbolCatalog, TypeKind};
use rstest::rstest;

use crate::helpers::model_helpers::*;
use crate::helpers::renderer_helpers::*;

/// `com.x { A, B { Nested { Deeper } }, interface Api, enum Color }`,
/// `com.x.sub { C }`, anchor `com.cfg.Config`.
fn layered_model() -> (ModelBuilder, matchergen::model::ElementId) {
    let mut builder = ModelBuilder::new();
    let x = builder.namespace("com.x");
    builder.class(x, "A");
    let b = builder.class(x, "B");
    let nested = builder.class(b, "Nested");
    builder.type_of(nested, "Deeper", TypeKind::Record);
    builder.type_of(x, "Api", TypeKind::Interface);
    builder.type_of(x, "Color", TypeKind::Enum);
    let sub = builder.namespace("com.x.sub");
    builder.class(sub, "C");
    let cfg = builder.namespace("com.cfg");
    let anchor = builder.class(cfg, "Config");
    (builder, anchor)
}

fn round_with(config: GeneratorConfig, references: &[&str]) -> (RoundOutcome, Vec<String>) {
    let (mut builder, anchor) = layered_model();
    builder.configure(anchor, references);
    let mut dispatcher = GenerationDispatcher::new(config, RecordingRenderer::default()).unwrap();
    let mut collector = DiagnosticCollector::new();
    let outcome = dispatcher
        .process_round(&Round::from_model(&builder.model), &builder.model, &mut collector)
        .unwrap();
    let mut targets: Vec<String> = dispatcher
        .renderer()
        .targets()
        .into_iter()
        .map(String::from)
        .collect();
    targets.sort();
    (outcome, targets)
}

#[rstest]
#[case(&["com.x.A"], &["com.x.A"])]
#[case(&["com.x.B.Nested"], &["com.x.B"])]
#[case(&["com.x.B.Nested.Deeper"], &["com.x.B"])]
#[case(&["com.x.B.Nested", "com.x.B"], &["com.x.B"])]
#[case(&["com.x.A", "com.x.A"], &["com.x.A"])]
#[case(&["com.x.sub"], &["com.x.sub.C"])]
#[case(&["com.x"], &["com.x.A", "com.x.Api", "com.x.B", "com.x.Color"])]
#[case(&["com.x", "com.x.sub"], &["com.x.A", "com.x.Api", "com.x.B", "com.x.Color", "com.x.sub.C"])]
#[case(&["com"], &[])]
fn test_rendered_targets(#[case] references: &[&str], #[case] expected: &[&str]) {
    let (_, targets) = round_with(GeneratorConfig::default(), references);
    assert_eq!(targets, expected);
}

#[test]
fn test_namespace_is_not_recursive() {
    let (_, targets) = round_with(GeneratorConfig::default(), &["com.x"]);
    assert!(!targets.iter().any(|t| t.starts_with("com.x.sub")));
}

#[test]
fn test_excluded_kinds_only_filter_namespace_expansion() {
    let config = GeneratorConfig::default()
        .excluding(TypeKind::Interface)
        .excluding(TypeKind::Enum);
    let (outcome, targets) = round_with(config, &["com.x", "com.x.Color"]);

    assert_eq!(targets, vec!["com.x.A", "com.x.B", "com.x.Color"]);
    assert!(outcome.unresolved.is_empty());
}

#[test]
fn test_resolution_never_yields_nested_types() {
    let (mut builder, anchor) = layered_model();
    builder.configure(
        anchor,
        &["com.x.B.Nested.Deeper", "com.x.B.Nested", "com.x", "com.x.sub"],
    );
    let mut dispatcher =
        GenerationDispatcher::new(GeneratorConfig::default(), RecordingRenderer::default())
            .unwrap();
    let outcome = dispatcher
        .process_round(
            &Round::from_model(&builder.model),
            &builder.model,
            &mut DiagnosticCollector::new(),
        )
        .unwrap();

    for ty in &outcome.generated {
        let element = builder.model.element(*ty).unwrap();
        let enclosing = element.enclosing.and_then(|e| builder.model.element(e));
        assert!(
            enclosing.is_some_and(|e| !e.is_type()),
            "'{}' is nested",
            element.qualified_name
        );
    }
    let mut unique = outcome.generated.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), outcome.generated.len());
}
