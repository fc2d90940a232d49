//! The `explain` command: describe a compiler error code.

use metro_diagnostic::ErrorCode;

/// Print what `code_str` means. Unknown codes exit with 1.
pub fn explain_error(code_str: &str) -> i32 {
    let Ok(code) = code_str.parse::<ErrorCode>() else {
        eprintln!("Unknown error code: {code_str}");
        eprintln!();
        eprintln!("Codes have the format EXXXX where X is a digit.");
        eprintln!("Examples: E0001, E1001, E2002, E3001");
        return 1;
    };

    println!("{code} ({} error): {}", code.phase(), code.description());
    0
}
