use clap::Parser;
use std::path::PathBuf;

/// Turns infix math into a binary tree, prints it as RPN and runs it on a stack.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Only run the built-in parser checks
    #[arg(long, conflicts_with = "no_selftest")]
    selftest: bool,

    /// Skip the built-in parser checks before starting
    #[arg(long)]
    no_selftest: bool,

    /// Print the RPN rendering next to each result
    #[arg(short, long)]
    rpn: bool,

    /// Where to keep line history (defaults to ~/.rpntree_history)
    #[arg(long)]
    history: Option<PathBuf>,

    /// Expression to evaluate once instead of starting the prompt
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    expr: Vec<String>,
}

mod repl {
    use rpntree::{execute, selftest};

    // true when every check passed
    pub fn run_selftest() -> bool {
        let bar = "=".repeat(70);
        println!("{}", bar);
        println!("{:=^70}", " UNIT TESTS ");
        println!("{}", bar);
        let reports = selftest::run_all();
        for report in &reports {
            println!("{}", report);
        }
        println!("{}", bar);
        reports.iter().all(|r| r.passed())
    }

    pub fn evalexpr(input: &str, show_rpn: bool) {
        match execute(input) {
            Err(e) => println!("{}", e),
            Ok((rpn, executor)) => {
                if show_rpn {
                    println!("{}", rpn);
                }
                for diag in executor.diagnostics() {
                    println!("{}", diag);
                }
                if let Ok(result) = executor.result() {
                    println!("= {}", result);
                }
            }
        }
    }
}

fn main() -> Result<(), String> {
    let args = Args::parse();

    if args.selftest {
        if !repl::run_selftest() {
            return Err("Some parser checks failed".to_string());
        }
        return Ok(());
    }

    if !args.expr.is_empty() {
        repl::evalexpr(&args.expr.join(" "), args.rpn);
        return Ok(());
    }

    if !args.no_selftest {
        repl::run_selftest();
    }

    use rustyline::error::ReadlineError;
    let histpath = args
        .history
        .or_else(|| dirs::home_dir().map(|h| h.join(".rpntree_history")));
    let mut rl = rustyline::DefaultEditor::new().map_err(|e| e.to_string())?;
    if let Some(path) = &histpath {
        if rl.load_history(path).is_err() {
            println!("No history yet");
        }
    }
    loop {
        println!();
        match rl.readline("Enter Expression: ") {
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(format!("Readline err: {:?}", e)),
            Ok(line) if line.trim().is_empty() => break,
            Ok(line) => {
                let _ = rl.add_history_entry(&line);
                repl::evalexpr(&line, args.rpn);
            }
        }
    }
    if let Some(path) = &histpath {
        rl.save_history(path).map_err(|e| e.to_string())?;
    }
    Ok(())
}
