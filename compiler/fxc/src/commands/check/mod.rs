//! The `check` command: validate a pattern and print its result type.

use fx_diagnostic::{Diagnostic, DiagnosticQueue, Span};
use fx_library::{Arg, CheckedCall, FunctionRegistry};
use fx_regex::ResultShape;
use fx_types::DType;

pub const USAGE: &str = "Usage: fxc check <pattern> [--options=<letters>] [--shape=bool|record|table]";

/// Parsed `check` arguments.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct CheckArgs {
    pub pattern: String,
    /// The option letters, as they would be written in a formula.
    pub options: Option<String>,
    pub shape: ResultShape,
}

/// The outcome of checking one pattern.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct CheckReport {
    pub checked: CheckedCall,
    pub diagnostics: Vec<Diagnostic>,
}

impl CheckReport {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

/// Parse the arguments following `check`.
pub fn parse_check_args(args: &[String]) -> Result<CheckArgs, String> {
    let mut pattern = None;
    let mut options = None;
    let mut shape = ResultShape::Record;

    for arg in args {
        if let Some(letters) = arg.strip_prefix("--options=") {
            options = Some(letters.to_string());
        } else if let Some(name) = arg.strip_prefix("--shape=") {
            shape = match name {
                "bool" | "boolean" => ResultShape::Boolean,
                "record" => ResultShape::Record,
                "table" => ResultShape::Table,
                other => return Err(format!("unknown shape '{other}' (expected bool, record or table)")),
            };
        } else if pattern.is_none() {
            pattern = Some(arg.clone());
        } else {
            return Err(format!("unexpected argument '{arg}'"));
        }
    }

    let pattern = pattern.ok_or_else(|| "missing pattern".to_string())?;
    Ok(CheckArgs {
        pattern,
        options,
        shape,
    })
}

/// Check the pattern as the pattern argument of the function for `shape`.
///
/// Spans are byte ranges of `pattern`, with the options argument placed
/// just after it.
#[tracing::instrument(level = "debug", skip_all, fields(shape = ?args.shape))]
pub fn check_pattern(args: &CheckArgs) -> CheckReport {
    let name = match args.shape {
        ResultShape::Boolean => "IsMatch",
        ResultShape::Record => "Match",
        ResultShape::Table => "MatchAll",
    };
    let end = args.pattern.len();
    let pattern_span = Span::try_from_range(0..end).unwrap_or(Span::DUMMY);

    let mut call_args = vec![
        Arg::expr(DType::Text, Span::DUMMY),
        Arg::text(args.pattern.as_str(), pattern_span),
    ];
    if let Some(letters) = &args.options {
        let span = Span::try_from_range(end..end + letters.len()).unwrap_or(Span::DUMMY);
        call_args.push(Arg::text(letters.as_str(), span));
    }

    let mut queue = DiagnosticQueue::new();
    let checked = FunctionRegistry::new().check_call(name, &call_args, pattern_span, &mut queue);
    CheckReport {
        checked,
        diagnostics: queue.flush(),
    }
}

pub fn run_check(args: &[String]) -> i32 {
    let args = match parse_check_args(args) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("error: {message}");
            eprintln!("{USAGE}");
            return 1;
        }
    };

    let report = check_pattern(&args);
    for diagnostic in &report.diagnostics {
        eprintln!("{diagnostic}");
    }
    if report.has_errors() {
        return 1;
    }

    println!("type: {}", report.checked.return_type);
    if let Some(normalized) = &report.checked.normalized {
        println!("pattern: {}", normalized.pattern);
        if !normalized.options.is_empty() {
            println!("options: {:?}", normalized.options);
        }
    }
    0
}
