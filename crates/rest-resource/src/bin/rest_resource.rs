//! `rest-resource` — apply one marshaling operation to a JSON document.
//!
//! Usage:
//!   rest-resource <parse|parse-collection|to-params|to-embedded-params> <config.toml> <Type>
//!
//! The document is read from stdin; the result is written to stdout.
//! Set `RUST_LOG=rest_resource=debug` to see parser fallbacks on stderr.

use rest_resource::cli::{load_registry, run, setup_tracing, Command};
use std::io::{self, Read, Write};

fn main() {
    setup_tracing();

    let args: Vec<String> = std::env::args().collect();
    if args.len() != 4 {
        eprintln!("Usage: rest-resource <parse|parse-collection|to-params|to-embedded-params> <config.toml> <Type>");
        std::process::exit(1);
    }

    let command: Command = match args[1].parse() {
        Ok(command) => command,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    let registry = match std::fs::read_to_string(&args[2])
        .map_err(|e| format!("{}: {e}", args[2]))
        .and_then(|text| load_registry(&text).map_err(|e| e.to_string()))
    {
        Ok(registry) => registry,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    let mut buf = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut buf) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    match run(&registry, command, &args[3], buf.trim()) {
        Ok(result) => {
            let mut stdout = io::stdout();
            if stdout
                .write_all(result.as_bytes())
                .and_then(|_| stdout.write_all(b"\n"))
                .is_err()
            {
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
