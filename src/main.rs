// Quill: lex and parse source files, reporting diagnostics

use std::fs;
use std::io::IsTerminal;
use std::path::Path;

use quill::diagnostics::terminal::TerminalReporter;
use quill::parser::{lex, parse, SourceUnit};

/// Command-line options
#[derive(Debug, Default)]
struct Options {
    dump_tokens: bool,
    print_ast: bool,
    no_color: bool,
    files: Vec<String>,
}

impl Options {
    fn from_args(args: &[String]) -> Result<Self, String> {
        let mut options = Options::default();
        for arg in args {
            match arg.as_str() {
                "--tokens" => options.dump_tokens = true,
                "--ast" => options.print_ast = true,
                "--no-color" => options.no_color = true,
                flag if flag.starts_with("--") => return Err(format!("Unknown option '{}'", flag)),
                file => options.files.push(file.to_string()),
            }
        }
        if options.files.is_empty() {
            return Err("No input file provided".to_string());
        }
        Ok(options)
    }
}

fn usage(program_name: &str) {
    eprintln!();
    eprintln!("Usage: {} [--tokens] [--ast] [--no-color] <file>...", program_name);
    eprintln!();
    eprintln!("  --tokens     Print every token with its source range");
    eprintln!("  --ast        Print the text description of each declaration");
    eprintln!("  --no-color   Disable colored diagnostics");
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Vec<String> = std::env::args().collect();
    let program_name = args.first().map(|s| s.as_str()).unwrap_or("quill");

    let options = match Options::from_args(args.get(1..).unwrap_or_default()) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("Error: {}", message);
            usage(program_name);
            std::process::exit(1);
        }
    };

    if let Some(missing) = options.files.iter().find(|file| !Path::new(file).exists()) {
        eprintln!("Error: File '{}' not found", missing);
        usage(program_name);
        std::process::exit(1);
    }

    let colored = !options.no_color && std::io::stderr().is_terminal();
    let mut failed = false;

    // One full lex + parse + report cycle per file
    for file in &options.files {
        let source = fs::read_to_string(file)?;
        let unit = SourceUnit::new(file.as_str(), source);

        eprintln!("Parsing {}...", file);
        let context = lex(&unit);

        if options.dump_tokens {
            for token in &context {
                println!("{} {:?}", token.range, token.kind);
            }
        }

        let mut outcome = parse(&context);

        let mut reporter = TerminalReporter::stderr(colored);
        outcome.diagnostics.report(&mut reporter)?;
        for failure in &outcome.failures {
            eprintln!("Parser error: {}", failure);
        }

        if options.print_ast {
            for statement in &outcome.root.statements {
                println!("{}", statement);
            }
        }

        if outcome.is_success() {
            eprintln!(
                "Parsed successfully. Found {} top-level declarations ({} diagnostics).",
                outcome.root.statements.len(),
                reporter.errors() + reporter.warnings()
            );
        } else {
            eprintln!(
                "Parsing {} failed: {} declarations could not be parsed.",
                file,
                outcome.failures.len()
            );
            failed = true;
        }
    }

    if failed {
        std::process::exit(1);
    }

    Ok(())
}
