use std::path::PathBuf;

use clap::{ArgAction, Parser};
use log::LevelFilter;
use simple_logger::SimpleLogger;

use csv_tree_sort::interrupt;
use csv_tree_sort::order::Order;
use csv_tree_sort::sort::Sort;
use csv_tree_sort::source::{Input, Output};

/// Sort CSV records by a single field
#[derive(Parser, Debug)]
#[command(name = "csv-tree-sort", version, about, disable_help_flag = true)]
struct Cli {
    /// Input CSV file, standard input when neither a file nor a directory is given
    #[arg(short = 'i', long = "input")]
    input: Option<PathBuf>,

    /// Input directory, searched recursively for files ending with the suffix
    #[arg(short = 'd', long = "dir")]
    dir: Option<PathBuf>,

    /// Output CSV file, standard output by default
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Sort records by Nth field, starting at 1
    #[arg(short = 'f', long = "field", default_value_t = 1)]
    field: usize,

    /// Sort records in reverse order
    #[arg(short = 'r', long = "reverse")]
    reverse: bool,

    /// Keep the first line of every source out of the sort and write the first one as a header
    #[arg(short = 'h', long = "skip-header")]
    skip_header: bool,

    /// Field separator
    #[arg(short = 's', long = "separator", default_value_t = ',')]
    separator: char,

    /// File name suffix of the files read from the input directory
    #[arg(long = "suffix", default_value = ".csv")]
    suffix: String,

    /// Maximum number of files read at the same time, 0 for the number of CPU cores
    #[arg(short = 'j', long = "tasks", default_value_t = 0)]
    tasks: usize,

    /// Log progress to stderr
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,

    /// Print help
    #[arg(long = "help", action = ArgAction::Help)]
    help: Option<bool>,
}

fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();
    let level = if cli.verbose { LevelFilter::Info } else { LevelFilter::Warn };
    SimpleLogger::new().with_level(level).env().init()?;

    let input = Input::select(cli.input, cli.dir)?;
    let mut csv_sort = Sort::new(input, Output::select(cli.output));
    csv_sort.with_field(cli.field);
    csv_sort.with_order(Order::from_reverse(cli.reverse));
    csv_sort.with_skip_header(cli.skip_header);
    csv_sort.with_field_separator(cli.separator);
    csv_sort.with_suffix(&cli.suffix);
    csv_sort.with_tasks(cli.tasks);

    let completion = csv_sort.sort_until(interrupt::ctrl_c()?)?;
    if completion.interrupted() {
        // readers may still be blocked on input, do not wait for them
        std::process::exit(0);
    }
    Ok(())
}
