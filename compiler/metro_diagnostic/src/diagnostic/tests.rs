use super::*;

#[test]
fn test_diagnostic_builder() {
    let diag = Diagnostic::error(ErrorCode::E2002)
        .with_message("Foot: undefined unit \"Metre\".")
        .with_label(Span::new(20, 25), "here")
        .with_suggestion("did you mean `Meter`?");

    assert_eq!(diag.code, ErrorCode::E2002);
    assert_eq!(diag.labels.len(), 1);
    assert!(diag.notes.is_empty());
    assert_eq!(diag.suggestions, ["did you mean `Meter`?"]);
    assert_eq!(diag.primary_span(), Some(Span::new(20, 25)));
}

#[test]
fn test_no_label_no_span() {
    let bare = Diagnostic::error(ErrorCode::E1001);
    assert_eq!(bare.primary_span(), None);
}

#[test]
fn test_display() {
    let diag = Diagnostic::error(ErrorCode::E3001)
        .with_message("Area: overflow exception while encoding Meter * Meter")
        .with_label(Span::new(11, 12), "here")
        .with_note("L * L: dimension product out of range [-128,127]")
        .with_suggestion("split the definition");

    assert_eq!(
        diag.to_string(),
        "error [E3001]: Area: overflow exception while encoding Meter * Meter\n  --> 11..12: here\n  = note: L * L: dimension product out of range [-128,127]\n  = help: split the definition"
    );
}
