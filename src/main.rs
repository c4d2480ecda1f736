use std::fs;
use std::path::Path;
use std::process;

use clap::Parser;
use env_logger::Env;
use log::{error, info};

use crate::filter::Rules;

mod aggregate;
mod chart;
mod filter;
mod ledger;
mod report;

/// Simplifies the return signature when a function can fail and we don't care about the specific error type
pub(crate) type ResultError<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
#[clap(propagate_version = true)]
struct Cli {
    /// Ledger file path
    file: String,

    /// Category filter rules
    filter_rules_file: Option<String>,
}

static IMAGES_DIR: &str = "images";

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli: Cli = Cli::parse();

    if let Err(err) = run(&cli) {
        error!("{err}");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> ResultError<()> {
    let transactions = ledger::read_transactions(Path::new(cli.file.as_str()))?;

    let rules = match &cli.filter_rules_file {
        Some(f) => Rules::load_from_file(f.as_str())?,
        None => Rules::empty(),
    };
    let transactions = rules.apply(transactions);

    let months = aggregate::month_index(&transactions);
    let matrix = aggregate::build_matrix(&transactions, &months);

    report::print_totals(&matrix);

    fs::create_dir_all(IMAGES_DIR)?;

    for category in matrix.categories() {
        let single = matrix.only(category);
        let path = Path::new(IMAGES_DIR).join(format!("{}.jpg", category.to_lowercase()));
        chart::render(&single, &months, &path, chart::PALETTE)?;
    }

    let all_path = Path::new(IMAGES_DIR).join("all.jpg");
    chart::render(&matrix, &months, &all_path, chart::PALETTE)?;

    info!("Wrote {} chart(s) to {}/", matrix.len() + 1, IMAGES_DIR);
    Ok(())
}
