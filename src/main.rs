use std::fs;

use clap::Parser;
use ember::interpreter::lexer::Lexer;

/// ember is a small expression language with a tree-walking evaluator and
/// a pseudo-IR backend.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells ember to look at a file instead of a script.
    #[arg(short, long)]
    file: bool,

    /// Prints the token stream with byte offsets instead of evaluating.
    #[arg(long)]
    tokens: bool,

    /// Prints the parsed program instead of evaluating.
    #[arg(long)]
    ast: bool,

    /// Prints the lowered pseudo-IR instead of evaluating.
    #[arg(long)]
    ir: bool,

    contents: String,
}

fn main() {
    let args = Args::parse();

    let script = if args.file {
        fs::read_to_string(&args.contents).unwrap_or_else(|_| {
            eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                      &args.contents);
            std::process::exit(1);
        })
    } else {
        args.contents
    };

    if args.tokens {
        let mut lexer = Lexer::new(script.as_str());
        lexer.lexing_observed(|token, start, end| {
            println!("{:>4} {:?} '{}' @ {start}..{end}", token.line, token.kind, token.literal);
        });
        return;
    }

    if args.ast {
        match ember::parse(&script) {
            Ok(program) => println!("{program}"),
            Err(e) => eprintln!("{e}"),
        }
        return;
    }

    if args.ir {
        match ember::lower(&script) {
            Ok(lowered) => println!("{lowered}"),
            Err(e) => eprintln!("{e}"),
        }
        return;
    }

    match ember::run(&script) {
        Ok(evaluation) => {
            for line in &evaluation.output {
                println!("{line}");
            }
            println!("{}", evaluation.result);
        },
        Err(e) => eprintln!("{e}"),
    }
}
