use std::{fs, io, path::Path, process::ExitCode};

use clap::Parser;
use log::{debug, error};
use minilang::{Config, DEFAULT_MAX_CALL_DEPTH, Interpreter, logger, repl, stdlib};

/// minilang is a small scripting language with integers, strings, arrays and
/// closures. Without any contents it starts an interactive session.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells minilang to treat the contents as the path of a `.st` script
    /// instead of as a script.
    #[arg(short, long)]
    file: bool,

    /// Pipe mode prints the value of the script's last statement, unless it
    /// is null.
    #[arg(short, long)]
    pipe_mode: bool,

    /// Maximum depth of nested function calls.
    #[arg(long, default_value_t = DEFAULT_MAX_CALL_DEPTH)]
    max_depth: usize,

    /// Log level: off, error, warn, info, debug or trace.
    #[arg(long, default_value = "warn")]
    log_level: String,

    contents: Option<String>,
}

fn read_script(path: &str) -> Result<String, String> {
    if Path::new(path).extension().is_none_or(|ext| ext != "st") {
        return Err("Invalid file type. Please provide a '.st' file.".to_string());
    }

    fs::read_to_string(path).map_err(|e| {
                                format!("Failed to read the input file '{path}'. Perhaps this file does not exist? ({e})")
                            })
}

fn execute(args: Args) -> ExitCode {
    let config = Config::default().with_max_call_depth(args.max_depth);
    let registry = stdlib::registry();
    let mut interpreter = Interpreter::new(&registry, config, Box::new(io::stdout()));

    let Some(contents) = args.contents else {
        println!("Welcome to minilang! Type 'exit' or press Ctrl+D to quit.");
        let stdin = io::stdin().lock();
        let mut stdout = io::stdout();
        return match repl::run(&mut interpreter, stdin, &mut stdout) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                error!("terminal I/O failed: {e}");
                ExitCode::FAILURE
            },
        };
    };

    let script = if args.file {
        match read_script(&contents) {
            Ok(script) => script,
            Err(message) => {
                eprintln!("{message}");
                return ExitCode::FAILURE;
            },
        }
    } else {
        contents
    };

    match interpreter.run(&script) {
        Ok(value) => {
            if args.pipe_mode && !value.is_null() {
                println!("{value}");
            }
            ExitCode::SUCCESS
        },
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        },
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = match logger::parse_level(&args.log_level) {
        Ok(level) => level,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::FAILURE;
        },
    };
    if let Err(e) = logger::init(level) {
        eprintln!("Failed to install the logger: {e}");
    }

    debug!("running with a call depth limit of {}", args.max_depth);
    execute(args)
}
