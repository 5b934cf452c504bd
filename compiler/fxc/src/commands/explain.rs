//! The `explain` command: describe an error code.

use fx_diagnostic::ErrorCode;

pub fn explain_error(code: &str) -> i32 {
    let Some(code) = ErrorCode::parse(code.trim()) else {
        eprintln!("Unknown error code: {code}");
        eprintln!();
        eprintln!("Codes have the format EXXXX (errors) or WXXXX (warnings).");
        eprintln!("Examples: E2001, E3107, W3001");
        return 1;
    };
    println!("{code}: {}", code.description());
    0
}
