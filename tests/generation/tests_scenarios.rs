//! Scenario tests: one configuration marker, one round, observe the renderer
//! and the diagnostics.

use chrono::NaiveDate;
use matchergen::config::{DEFAULT_GENERATOR_IDENTITY, GeneratorConfig};
use matchergen::diagnostics::{DiagnosticCollector, Severity, codes};
use matchergen::dispatch::{GenerationDispatcher, Round};
use matchergen::error::GenerationError;
use matchergen::model::{MarkerId, SymbolModel};
use matchergen::render::TimeProvider;

use crate::helpers::diagnostic_helpers::*;
use crate::helpers::model_helpers::*;
use crate::helpers::renderer_helpers::*;

fn dispatcher() -> GenerationDispatcher<RecordingRenderer> {
    let at = NaiveDate::from_ymd_opt(2021, 6, 18)
        .and_then(|d| d.and_hms_opt(9, 0, 0))
        .expect("valid timestamp");
    GenerationDispatcher::with_time_provider(
        GeneratorConfig::default(),
        RecordingRenderer::default(),
        TimeProvider::fixed(at),
    )
    .expect("default config is valid")
}

/// Run one round over the whole model.
fn run(model: &SymbolModel) -> (bool, RecordingRenderer, DiagnosticCollector) {
    let mut dispatcher = dispatcher();
    let mut collector = DiagnosticCollector::new();
    let participated = dispatcher
        .process(&Round::from_model(model), model, &mut collector)
        .expect("round should succeed");
    (participated, dispatcher.into_renderer(), collector)
}

// =============================================================================
// SINGLE TYPE
// =============================================================================

#[test]
fn test_existing_type_is_rendered_once() {
    let (mut builder, anchor) = standard_model();
    let marker = builder.configure(anchor, &["com.x.Foo"]);

    let (participated, renderer, collector) = run(&builder.model);

    assert!(participated);
    assert_eq!(renderer.targets(), vec!["com.x.Foo"]);
    let call = &renderer.calls[0];
    assert_eq!(call.identity, DEFAULT_GENERATOR_IDENTITY);
    assert_eq!(call.anchors, vec![anchor]);
    assert_eq!(call.marker, marker);
    assert_eq!(call.generated_at.to_string(), "2021-06-18 09:00:00");
    assert!(without_pass_notes(&collector).is_empty());
}

#[test]
fn test_nested_reference_renders_outer_type() {
    let (mut builder, anchor) = standard_model();
    builder.configure(anchor, &["com.x.Outer.Inner"]);

    let (_, renderer, _) = run(&builder.model);

    assert_eq!(renderer.targets(), vec!["com.x.Outer"]);
}

// =============================================================================
// NAMESPACES
// =============================================================================

#[test]
fn test_namespace_renders_each_type_once() {
    let mut builder = ModelBuilder::new();
    let x = builder.namespace("com.x");
    builder.class(x, "A");
    builder.class(x, "B");
    let cfg = builder.namespace("com.cfg");
    let anchor = builder.class(cfg, "Config");
    builder.configure(anchor, &["com.x", "com.x.A", "com.x"]);

    let (participated, renderer, _) = run(&builder.model);

    assert!(participated);
    let mut targets = renderer.targets();
    targets.sort_unstable();
    assert_eq!(targets, vec!["com.x.A", "com.x.B"]);
}

#[test]
fn test_namespace_skips_already_generated_members() {
    let (mut builder, anchor) = standard_model();
    builder.configure(anchor, &["com.x"]);

    let (_, renderer, collector) = run(&builder.model);

    let mut targets = renderer.targets();
    targets.sort_unstable();
    assert_eq!(targets, vec!["com.x.Foo", "com.x.Outer"]);
    assert_eq!(without_pass_notes(&collector).len(), 1);
}

// =============================================================================
// ALREADY GENERATED
// =============================================================================

#[test]
fn test_self_generated_type_is_skipped_with_note() {
    let (mut builder, anchor) = standard_model();
    builder.configure(anchor, &["com.x.Already"]);
    let already = builder.id("com.x.Already");

    let (participated, renderer, collector) = run(&builder.model);

    assert!(participated);
    assert!(renderer.calls.is_empty());
    let notes = collector.with_code(codes::ALREADY_GENERATED);
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].severity, Severity::Note);
    assert_eq!(notes[0].element, Some(already));
    assert_eq!(without_pass_notes(&collector).len(), 1);
}

#[test]
fn test_type_generated_by_other_tool_is_rendered() {
    let (mut builder, anchor) = standard_model();
    let foo = builder.id("com.x.Foo");
    builder.generated_by(foo, &["org.immutables.processor.ProxyProcessor"]);
    builder.configure(anchor, &["com.x.Foo"]);

    let (_, renderer, collector) = run(&builder.model);

    assert_eq!(renderer.targets(), vec!["com.x.Foo"]);
    assert!(collector.with_code(codes::ALREADY_GENERATED).is_empty());
}

// =============================================================================
// UNRESOLVED REFERENCES
// =============================================================================

#[test]
fn test_missing_type_warns_and_still_participates() {
    let (mut builder, anchor) = standard_model();
    let marker = builder.configure(anchor, &["com.x.Missing"]);

    let (participated, renderer, collector) = run(&builder.model);

    assert!(participated);
    assert!(renderer.calls.is_empty());
    let warning = single_with_severity(&collector, Severity::MandatoryWarning);
    assert!(warning.message.contains("com.x.Missing"));
    assert_eq!(warning.element, Some(anchor));
    assert_eq!(warning.marker, Some(marker));
    assert_eq!(warning.field.as_deref(), Some("value"));
}

#[test]
fn test_missing_reference_does_not_block_siblings() {
    let (mut builder, anchor) = standard_model();
    builder.configure(anchor, &["not.a.real.Type", "com.x.Foo"]);

    let (_, renderer, collector) = run(&builder.model);

    assert_eq!(renderer.targets(), vec!["com.x.Foo"]);
    assert_eq!(collector.with_severity(Severity::MandatoryWarning).len(), 1);
}

#[test]
fn test_empty_namespace_is_not_reported_missing() {
    let (mut builder, anchor) = standard_model();
    builder.namespace("com.empty");
    builder.configure(anchor, &["com.empty"]);

    let mut dispatcher = dispatcher();
    let mut collector = DiagnosticCollector::new();
    let outcome = dispatcher
        .process_round(&Round::from_model(&builder.model), &builder.model, &mut collector)
        .expect("round should succeed");

    assert!(outcome.participated);
    assert!(outcome.generated.is_empty());
    assert!(outcome.unresolved.is_empty());
    assert!(without_pass_notes(&collector).is_empty());
}

#[test]
fn test_warning_carries_anchor_span() {
    let (mut builder, anchor) = standard_model();
    builder
        .model
        .set_span(anchor, matchergen::base::Span::from_coords(4, 0, 4, 40))
        .unwrap();
    builder.configure(anchor, &["com.x.Missing"]);

    let (_, _, collector) = run(&builder.model);

    let warning = single_with_severity(&collector, Severity::MandatoryWarning);
    assert_eq!(warning.span.map(|s| s.to_string()).as_deref(), Some("5:1-5:41"));
}

// =============================================================================
// MULTIPLE ANCHORS
// =============================================================================

#[test]
fn test_each_anchor_is_processed() {
    let (mut builder, anchor) = standard_model();
    let cfg = builder.namespace("com.cfg2");
    let second = builder.class(cfg, "MoreConfig");
    builder.configure(anchor, &["com.x.Foo"]);
    builder.configure(second, &["com.x.Outer"]);

    let (_, renderer, _) = run(&builder.model);

    assert_eq!(renderer.targets(), vec!["com.x.Foo", "com.x.Outer"]);
    assert_eq!(renderer.calls[1].anchors, vec![second]);
}

#[test]
fn test_renderer_failure_stops_round() {
    let (mut builder, anchor) = standard_model();
    builder.configure(anchor, &["com.x.Foo", "com.x.Outer"]);

    let mut dispatcher = GenerationDispatcher::new(
        GeneratorConfig::default(),
        RecordingRenderer::failing_on("com.x.Foo"),
    )
    .unwrap();
    let mut collector = DiagnosticCollector::new();
    let round = Round::from_model(&builder.model);
    let result = dispatcher.process(&round, &builder.model, &mut collector);

    match result {
        Err(GenerationError::Render { target, .. }) => assert_eq!(target, "com.x.Foo"),
        other => panic!("Expected render failure, got {:?}", other),
    }
    assert!(dispatcher.renderer().calls.is_empty());
}

// =============================================================================
// MULTIPLE MARKERS ON ONE ANCHOR
// =============================================================================

fn calls_by_marker(renderer: &RecordingRenderer) -> Vec<(&str, MarkerId)> {
    renderer
        .calls
        .iter()
        .map(|c| (c.target.as_str(), c.marker))
        .collect()
}

#[test]
fn test_every_configuration_marker_is_processed() {
    let (mut builder, anchor) = standard_model();
    let first = builder.configure(anchor, &["com.x.Foo"]);
    let second = builder.configure(anchor, &["com.x.Outer.Inner", "com.x..Broken", ""]);

    let (participated, renderer, collector) = run(&builder.model);

    assert!(participated);
    assert_eq!(
        calls_by_marker(&renderer),
        vec![("com.x.Foo", first), ("com.x.Outer", second)]
    );
    let warnings = collector.with_severity(Severity::MandatoryWarning);
    assert_eq!(warnings.len(), 2);
    assert!(warnings.iter().all(|w| w.marker == Some(second)));
}

#[test]
fn test_type_named_by_two_markers_is_rendered_once() {
    let (mut builder, anchor) = standard_model();
    let first = builder.configure(anchor, &["com.x.Foo"]);
    let second = builder.configure(anchor, &["com.x.Outer", "com.x.Foo"]);

    let (_, renderer, _) = run(&builder.model);

    assert_eq!(
        calls_by_marker(&renderer),
        vec![("com.x.Foo", first), ("com.x.Outer", second)]
    );
}

#[test]
fn test_self_generated_type_named_by_two_markers_is_noted_once() {
    let (mut builder, anchor) = standard_model();
    builder.configure(anchor, &["com.x.Already"]);
    builder.configure(anchor, &["com.x"]);

    let (_, renderer, collector) = run(&builder.model);

    assert_eq!(renderer.targets(), vec!["com.x.Foo", "com.x.Outer"]);
    assert_eq!(collector.with_code(codes::ALREADY_GENERATED).len(), 1);
}
