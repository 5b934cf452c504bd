//! Pattern checker CLI.

use fxc::commands::{explain_error, run_check};

fn main() {
    fxc::init_tracing();

    let args: Vec<String> = std::env::args().collect();
    let Some(command) = args.get(1) else {
        print_usage();
        return;
    };

    let code = match command.as_str() {
        "check" => run_check(&args[2..]),
        "explain" | "--explain" => {
            let Some(code) = args.get(2) else {
                eprintln!("Usage: fxc explain <ERROR_CODE>");
                eprintln!("Example: fxc explain E3107");
                std::process::exit(1);
            };
            explain_error(code)
        }
        "help" | "--help" | "-h" => {
            print_usage();
            0
        }
        "version" | "--version" | "-V" => {
            println!("fxc {}", env!("CARGO_PKG_VERSION"));
            0
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            1
        }
    };
    std::process::exit(code);
}

fn print_usage() {
    println!("Formula pattern checker");
    println!();
    println!("Usage: fxc <command> [options]");
    println!();
    println!("Commands:");
    println!("  check <pattern>      Validate a pattern and print its result type");
    println!("  explain <code>       Explain an error code (e.g., E3107)");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Check options:");
    println!("  --options=<letters>  Match options: i, m, s, x, N, ^, $, c (default: c)");
    println!("  --shape=<shape>      bool (IsMatch), record (Match) or table (MatchAll); default record");
    println!();
    println!("Set RUST_LOG (e.g. RUST_LOG=fx_regex=trace) to trace the checker.");
}
