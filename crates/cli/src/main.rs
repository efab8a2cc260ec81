use anyhow::Context;
use clap::{Parser, Subcommand};
use clinic_core::commands::{
    usage_summary, AddCommand, ClearCommand, DeleteCommand, EditCommand, FilterCommand,
    FindCommand, FindMedicineCommand, ListCommand,
};
use clinic_core::constants::{DATA_FILE_ENV, DEFAULT_LOG_DIRECTIVE};
use clinic_core::{resolve_data_file, CommandResult, CoreConfig, LogicManager, SystemClock};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "clinic")]
#[command(about = "Clinic patient records manager")]
struct Cli {
    /// Path of the JSON data file (overrides CLINIC_DATA_FILE)
    #[arg(long, global = true)]
    data_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive shell (the default)
    Shell,
    /// Run a single command line, e.g. `clinic exec log 1`
    Exec {
        /// The command line to run
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        line: Vec<String>,
    },
}

/// Commands after which the visible patient list is worth reprinting.
fn shows_patient_list(line: &str) -> bool {
    let word = line.split_whitespace().next().unwrap_or_default();
    [
        AddCommand::COMMAND_WORD,
        EditCommand::COMMAND_WORD,
        DeleteCommand::COMMAND_WORD,
        ClearCommand::COMMAND_WORD,
        ListCommand::COMMAND_WORD,
        FindCommand::COMMAND_WORD,
        FilterCommand::COMMAND_WORD,
        FindMedicineCommand::COMMAND_WORD,
    ]
    .contains(&word)
}

fn print_patients(logic: &LogicManager, out: &mut impl Write) -> io::Result<()> {
    for (position, record) in logic.filtered_view().iter().enumerate() {
        writeln!(out, "{}. {}", position + 1, record)?;
    }
    Ok(())
}

fn print_result(result: &CommandResult, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{}", result.feedback)?;
    if result.show_help {
        writeln!(out, "\n{}", usage_summary())?;
    }
    Ok(())
}

/// Runs one line and prints the outcome. Returns `true` when the session should end.
fn run_line(logic: &mut LogicManager, line: &str, out: &mut impl Write) -> anyhow::Result<bool> {
    match logic.execute(line) {
        Ok(result) => {
            print_result(&result, out)?;
            if shows_patient_list(line) {
                print_patients(logic, out)?;
            }
            Ok(result.exit)
        }
        Err(e) => {
            writeln!(out, "{e}")?;
            Ok(false)
        }
    }
}

fn run_shell(logic: &mut LogicManager) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    print_patients(logic, &mut stdout)?;
    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }
        if run_line(logic, &line, &mut stdout)? {
            break;
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(DEFAULT_LOG_DIRECTIVE.parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    let data_file = resolve_data_file(cli.data_file, std::env::var(DATA_FILE_ENV).ok())?;
    let cfg = CoreConfig::new(data_file)?;
    tracing::info!("using data file {}", cfg.data_file().display());

    let mut logic = LogicManager::new(&cfg, Box::new(SystemClock))
        .with_context(|| format!("failed to open {}", cfg.data_file().display()))?;

    match cli.command {
        Some(Commands::Exec { line }) => {
            let line = line.join(" ");
            match logic.execute(&line) {
                Ok(result) => {
                    let mut stdout = io::stdout();
                    print_result(&result, &mut stdout)?;
                    if shows_patient_list(&line) {
                        print_patients(&logic, &mut stdout)?;
                    }
                }
                Err(e) => anyhow::bail!(e),
            }
        }
        Some(Commands::Shell) | None => run_shell(&mut logic)?,
    }

    Ok(())
}
