#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

use metro_diagnostic::ErrorCode;
use metro_ir::{LinePosition, Span, TargetLanguage};
use pretty_assertions::assert_eq;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::prelude::*;

use super::{codes, compile_cs, messages};
use crate::{compile, CancellationToken, CompileOptions};

#[test]
fn test_three_bad_statements_then_a_good_one() {
    let (registry, output) = compile_cs(
        r#"
unit = <Length>;
scale Foo Bar;
Meter "m" = <Length>;
unit Meter "m" = <Length>;
"#,
    );
    assert_eq!(
        codes(&output),
        [ErrorCode::E1004, ErrorCode::E1001, ErrorCode::E1001]
    );
    assert_eq!(
        messages(&output),
        [
            "found \"=\" while expected unit name.",
            "Foo: found \";\" while expected equal sign \"=\".",
            "found \"Meter\" while expected \"unit\" or \"scale\" keyword.",
        ]
    );
    assert_eq!(output.definitions.len(), 1);
    assert_eq!(registry.unit_count(), 1);
    assert!(registry.find_unit("Meter").is_some());
    assert!(!output.is_success());
}

#[test]
fn test_missing_semicolon_stops_at_next_keyword() {
    let (registry, output) = compile_cs(
        "unit Meter \"m\" = <Length>\nunit Second \"s\" = <Time>;\n",
    );
    assert_eq!(
        messages(&output),
        ["Meter: found \"unit\", while a definition terminated with semicolon (\";\") was expected."]
    );
    assert!(registry.find_unit("Meter").is_none());
    assert!(registry.find_unit("Second").is_some());
}

#[test]
fn test_lexer_error_is_reported_once() {
    let (registry, output) = compile_cs(
        "unit Meter \"m = <Length>;\nunit Second \"s\" = <Time>;\n",
    );
    assert_eq!(codes(&output), [ErrorCode::E0001]);
    assert!(output.errors[0].message.starts_with("'\"m = <Length>;': "));
    assert!(registry.find_unit("Meter").is_none());
    assert!(registry.find_unit("Second").is_some());

    let (registry, output) = compile_cs("# unit Meter \"m\" = <Length>;");
    assert_eq!(messages(&output), ["'#': unrecognized token."]);
    assert!(registry.find_unit("Meter").is_some());
}

#[test]
fn test_error_locations() {
    let (_, output) = compile_cs("unit Foot \"ft\" = 0.3048 * Metre;");
    let err = &output.errors[0];
    assert_eq!(err.span, Span::new(26, 31));
    assert_eq!(err.position.start, LinePosition::new(1, 27));
    assert_eq!(err.position.end, LinePosition::new(1, 32));
    assert_eq!(err.to_diagnostic().primary_span(), Some(Span::new(26, 31)));
}

#[test]
fn test_comments_and_empty_input() {
    let (registry, output) = compile_cs("");
    assert!(output.is_success());
    assert!(output.definitions.is_empty());
    assert_eq!(registry.unit_count(), 0);

    let (registry, output) = compile_cs(
        "// lengths\nunit Meter /* base */ \"m\" = <Length>; // SI\n",
    );
    assert!(output.is_success());
    assert_eq!(registry.unit_count(), 1);
}

#[test]
fn test_cancelled_before_first_statement() {
    let cancel = CancellationToken::new();
    cancel.clone().cancel();
    let compilation = compile(
        "unit Meter \"m\" = <Length>;",
        &CompileOptions::new(TargetLanguage::CSharp),
        &cancel,
    );
    assert!(compilation.output.cancelled);
    assert!(compilation.output.errors.is_empty());
    assert!(!compilation.output.is_success());
    assert_eq!(compilation.registry.unit_count(), 0);
}

/// Cancels `token` once the parser has accepted `limit` definitions.
struct CancelAfterAccepted {
    limit: usize,
    accepted: AtomicUsize,
    token: CancellationToken,
}

struct AcceptedMessage(bool);

impl Visit for AcceptedMessage {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" && format!("{value:?}") == "definition accepted" {
            self.0 = true;
        }
    }
}

impl<S: Subscriber> Layer<S> for CancelAfterAccepted {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = AcceptedMessage(false);
        event.record(&mut visitor);
        if visitor.0 && self.accepted.fetch_add(1, Ordering::SeqCst) + 1 == self.limit {
            self.token.cancel();
        }
    }
}

#[test]
fn test_cancelled_mid_parse_keeps_accepted_units() {
    let cancel = CancellationToken::new();
    let subscriber = tracing_subscriber::registry().with(CancelAfterAccepted {
        limit: 2,
        accepted: AtomicUsize::new(0),
        token: cancel.clone(),
    });
    let compilation = tracing::subscriber::with_default(subscriber, || {
        compile(
            r#"
unit Meter "m" = <Length>;
unit Second "s" = <Time>;
unit Kilogram "kg" = <Mass>;
unit Kelvin "K" = <Temperature>;
"#,
            &CompileOptions::new(TargetLanguage::CSharp),
            &cancel,
        )
    });

    let output = &compilation.output;
    assert!(output.cancelled);
    assert!(output.errors.is_empty());
    assert!(!output.is_success());
    assert_eq!(output.definitions.len(), 2);
    let registry = &compilation.registry;
    assert_eq!(registry.unit_count(), 2);
    assert!(registry.find_unit("Meter").is_some());
    assert!(registry.find_unit("Second").is_some());
    assert!(registry.find_unit("Kilogram").is_none());
    assert!(registry.find_unit("Kelvin").is_none());
}
