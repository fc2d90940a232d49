//! Metro compiler CLI.

use metroc::{commands, init_tracing, Config};

fn main() {
    init_tracing();

    let config = match Config::from_args(std::env::args().skip(1)) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err}");
            eprintln!();
            print_usage();
            std::process::exit(2);
        }
    };

    std::process::exit(commands::run(&config));
}

fn print_usage() {
    eprintln!("Usage: metroc <command> [options] <inputs>");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  check <file>...     Compile definition files and report errors");
    eprintln!("  parse <file>        Show the units and scales defined by a file");
    eprintln!("  lex <file>          Show the token stream of a file");
    eprintln!("  explain <code>      Describe an error code (e.g. E2002)");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --target=<lang>         Target language: cs (default), cpp");
    eprintln!("  --seed=<catalog>        Start from the units and scales of a catalog");
    eprintln!("  --emit-catalog=<path>   Write a catalog after a successful check");
    eprintln!("  --color=<mode>          auto (default), always, never");
    eprintln!();
    eprintln!("Set RUST_LOG (e.g. RUST_LOG=metro_parse=debug) for compiler tracing.");
}
