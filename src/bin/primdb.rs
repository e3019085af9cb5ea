//! primdb shell - reads commands line by line and runs them against the store

use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};

use clap::Parser;
use primdb::{
    config::{DEFAULT_DATA_DIR, DEFAULT_SCHEMA_FILE},
    sql::{engine::Session, plan::planner::Planner},
    storage::file::FileStorage,
    Config, Database,
};
use rustyline::{error::ReadlineError, DefaultEditor};
use tracing_subscriber::EnvFilter;

/// Line-oriented shell for a minimal tabular store
#[derive(Parser, Debug)]
#[command(name = "primdb", version, about, long_about = None)]
struct Cli {
    /// Directory holding one <table>.json record file per table
    #[arg(long = "data-dir", default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    /// Schema file path
    #[arg(long = "schema-file", default_value = DEFAULT_SCHEMA_FILE)]
    schema_file: PathBuf,

    /// Keep the records of up to N tables in an LRU cache (0 disables it)
    #[arg(long = "cache", default_value_t = 0)]
    cache: usize,

    /// Log how long each command takes
    #[arg(long = "timing")]
    timing: bool,

    /// Log level filter, overridden by RUST_LOG
    #[arg(long = "log-level", default_value = "warn")]
    log_level: String,

    /// Skip confirmation prompts for drop_table and delete
    #[arg(short = 'y', long = "yes")]
    yes: bool,

    /// Execute one command and exit
    #[arg(short = 'c', long = "command")]
    command: Option<String>,
}

impl Cli {
    fn config(&self) -> Config {
        Config::default()
            .with_data_dir(&self.data_dir)
            .with_schema_file(&self.schema_file)
            .with_cache(self.cache)
            .with_timing(self.timing)
    }
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = init_logging(&cli) {
        eprintln!("Error: invalid log filter: {}", e);
        std::process::exit(2);
    }

    let config = cli.config();
    let db = Database::open(&config);
    let mut shell = Shell {
        session: db.session().with_timing(config.timing),
        assume_yes: cli.yes,
    };

    let result = match &cli.command {
        Some(line) => {
            shell.run_line(line);
            Ok(())
        }
        None => shell.repl(),
    };
    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(cli: &Cli) -> Result<(), tracing_subscriber::filter::ParseError> {
    let mut filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&cli.log_level)?,
    };
    if cli.timing {
        filter = filter.add_directive("primdb::sql::engine=info".parse()?);
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
    Ok(())
}

struct Shell<'a> {
    session: Session<'a, FileStorage>,
    assume_yes: bool,
}

/// What the loop does after a line
enum Flow {
    Continue,
    Exit,
}

impl Shell<'_> {
    fn repl(&mut self) -> rustyline::Result<()> {
        let mut rl = DefaultEditor::new()?;
        println!("primdb {}", env!("CARGO_PKG_VERSION"));
        print_help();

        loop {
            match rl.readline("primdb> ") {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    let _ = rl.add_history_entry(line);
                    if let Flow::Exit = self.run_line(line) {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("Use exit to quit");
                }
                Err(ReadlineError::Eof) => break,
                Err(err) => return Err(err),
            }
        }
        Ok(())
    }

    /// Runs one line; every error is reported and the shell keeps going
    fn run_line(&mut self, line: &str) -> Flow {
        match line.trim().to_lowercase().as_str() {
            "exit" | "quit" => return Flow::Exit,
            "help" => {
                print_help();
                return Flow::Continue;
            }
            _ => {}
        }

        let command = match Planner::new().build(line) {
            Ok(command) => command,
            Err(e) => {
                eprintln!("Error: {}", e);
                return Flow::Continue;
            }
        };

        if command.is_destructive() && !self.assume_yes && !confirm(command.name()) {
            println!("Operation cancelled.");
            return Flow::Continue;
        }

        match self.session.execute_command(command) {
            Ok(result) => println!("{}", result),
            Err(e) => eprintln!("Error: {}", e),
        }
        Flow::Continue
    }
}

/// Asks for a y/n answer on stdin; anything but `y` declines
fn confirm(action: &str) -> bool {
    print!("Are you sure you want to run \"{}\"? [y/n]: ", action);
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    match io::stdin().lock().read_line(&mut answer) {
        Ok(_) => answer.trim().eq_ignore_ascii_case("y"),
        Err(_) => false,
    }
}

fn print_help() {
    println!(
        r#"
Data:
  insert into <table> values (<value1>, <value2>, ...)   add a record
  select from <table> [where <column> <op> <value>]     read records
  update <table> set <column> = <value> [where <column> <op> <value>]
  delete from <table> where <column> <op> <value>       remove records
  info <table>                                          columns and record count

Tables:
  create_table <table> <column:type> ...                types: int, str, bool
  list_tables
  drop_table <table>

Operators: = != > < >= <=    Quote strings: 'text' or "text"

General:
  help
  exit
"#
    );
}
