use std::path::{Path, PathBuf};

use clap::Parser;
use env_logger::Env;
use log::info;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::command::Command;
use crate::config::Config;
use crate::controller::{BatchOutcome, Session};

mod command;
mod config;
mod controller;
mod dashboard;
mod expense;
mod ledger;
mod live_edit;
mod normalizer;
mod persist;
mod summary;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
#[clap(propagate_version = true)]
struct Cli {
    /// Expense data file path
    #[clap(default_value = "gastos.csv")]
    file: String,

    /// Optional toml config file (column mapping, amount policy, salary)
    config: Option<String>,
}

static COMMAND_HISTORY_FILE: &str = ".gastos_history";

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli: Cli = Cli::parse();

    let config = Config::load_from_file(cli.config.as_deref());
    let mut session = Session::open(PathBuf::from(&cli.file), config);
    info!("Tracking expenses in {:?} ({} on record)", session.file_path(), session.ledger.len());

    let mut rl = DefaultEditor::new().expect("Unable to initialize line editor");
    if rl.load_history(COMMAND_HISTORY_FILE).is_err() {
        println!("No previous history.");
    }

    dashboard::render(&session);
    print_help();

    loop {
        let readline = rl.readline("gastos> ");
        match readline {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line);

                match command::parse(line) {
                    Ok(Command::Quit) => break,
                    Ok(command) => run_command(&mut session, command),
                    Err(e) => println!("{}", e),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            }
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }
    let _ = rl.save_history(COMMAND_HISTORY_FILE);
}

fn run_command(session: &mut Session, command: Command) {
    match command {
        Command::Show => dashboard::render(session),

        Command::Add { date, category, amount } => {
            match session.add_expense(&date, &category, &amount) {
                Ok(expense) => {
                    println!("Added {} / {} / R$ {:.2}", expense.date, expense.category, expense.amount);
                    dashboard::render(session);
                }
                Err(e) => println!("{}", e),
            }
        }

        Command::Import(file_path) => match session.import_file(Path::new(&file_path)) {
            Ok(outcome) => {
                report_batch(&outcome);
                dashboard::render(session);
            }
            Err(e) => println!("{}", e),
        },

        Command::Edit => match live_edit::edit_ledger(session) {
            Ok(outcome) => {
                report_batch(&outcome);
                dashboard::render(session);
            }
            Err(e) => println!("{:#}", e),
        },

        Command::Salary(amount) => match session.set_salary(&amount) {
            Ok(salary) => {
                println!("Salary updated to R$ {:.2}", salary);
                dashboard::render(session);
            }
            Err(e) => println!("{}", e),
        },

        Command::Help => print_help(),

        // Quit is handled in the main loop
        Command::Quit => {}
    }
}

fn report_batch(outcome: &BatchOutcome) {
    match outcome {
        BatchOutcome::Unchanged => println!("No changes detected."),
        BatchOutcome::Replaced { accepted, dropped } => {
            println!("{} rows accepted, {} rows dropped.", accepted, dropped);
        }
    }
}

fn print_help() {
    println!(
        "Commands:\n\
         \x20 show                          render the dashboard\n\
         \x20 add <date> <category> <amount>  record an expense (quote categories with spaces)\n\
         \x20 import <file>                 replace the ledger with a spreadsheet file\n\
         \x20 edit                          edit the ledger grid in $EDITOR\n\
         \x20 salary <amount>               set the monthly salary (session only)\n\
         \x20 quit"
    );
}
