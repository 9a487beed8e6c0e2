use clap::Parser;
use decimal_calc::context::Context;
use decimal_calc::keys::parse_script;
use decimal_calc::Calculator;
use serde::Serialize;
use std::cell::RefCell;
use std::io::BufRead;
use std::rc::Rc;
use tracing::Level;

/// Replay calculator keystrokes and print what the display shows.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Keystroke script, e.g. "12+3*4=" or "2+2[Enter]". Reads lines from stdin if absent.
    script: Option<String>,
    /// JSON file with evaluation options (precision, display_width, exponent_digits)
    #[arg(long)]
    config: Option<String>,
    /// Print every display update
    #[arg(long)]
    trace: bool,
    /// Print the final session state as JSON
    #[arg(long)]
    json: bool,
    /// Debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Serialize)]
struct Snapshot<'a> {
    display: &'a str,
    tokens: Vec<String>,
    current: &'a str,
}

fn main() {
    // Parse CLI arguments.
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .init();

    // Load options.
    let ctx = match args.config.as_ref() {
        Some(path) => {
            let loaded = std::fs::read_to_string(path)
                .map_err(|e| e.to_string())
                .and_then(|s| Context::from_json(&s).map_err(|e| e.to_string()));
            match loaded {
                Ok(ctx) => ctx,
                Err(e) => {
                    eprintln!("Invalid config {path}: {e}");
                    std::process::exit(1);
                }
            }
        }
        None => Context::default(),
    };

    // Renders are collected and printed by the loop below when --trace is set.
    let renders = Rc::new(RefCell::new(Vec::<String>::new()));
    let mut calc = Calculator::new(ctx);
    if args.trace {
        let sink = Rc::clone(&renders);
        calc = calc.with_renderer(move |display: &str| {
            sink.borrow_mut().push(display.to_string());
        });
    }

    match args.script.as_ref() {
        Some(script) => {
            run_line(&mut calc, script, &renders);
            if !args.trace {
                println!("{}", calc.display());
            }
        }
        None => {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let line = match line {
                    Ok(l) => l,
                    Err(e) => {
                        eprintln!("Failed to read stdin: {e}");
                        std::process::exit(1);
                    }
                };
                run_line(&mut calc, &line, &renders);
                if !args.trace {
                    println!("{}", calc.display());
                }
            }
        }
    }

    // Output final state.
    if args.json {
        let snapshot = Snapshot {
            display: calc.display(),
            tokens: calc.input().tokens().iter().map(|t| t.to_string()).collect(),
            current: calc.input().current(),
        };
        match serde_json::to_string_pretty(&snapshot) {
            Ok(s) => println!("{s}"),
            Err(e) => eprintln!("Failed to serialize state: {e}"),
        }
    }
}

fn run_line(calc: &mut Calculator, script: &str, renders: &RefCell<Vec<String>>) {
    let keys = match parse_script(script) {
        Ok(keys) => keys,
        Err(e) => {
            eprintln!("Invalid script: {e}");
            std::process::exit(1);
        }
    };
    for key in keys {
        // Failures already show "Error" on the display; the session carries on.
        let _ = calc.press(key);
    }
    for display in renders.borrow_mut().drain(..) {
        println!("{display}");
    }
}
