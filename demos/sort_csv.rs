use std::path::{Path, PathBuf};
use anyhow::Error;
use csv_tree_sort::order::Order;
use csv_tree_sort::sort::Sort;
use csv_tree_sort::source::{Input, Output};

fn sort_file_ascending(input_path: &Path, output_path: &Path) -> Result<(), Error> {
    // ascending order by the first field is the default
    let csv_sort = Sort::new(Input::File(input_path.to_path_buf()), Output::File(output_path.to_path_buf()));
    csv_sort.sort()?;
    Ok(())
}

fn sort_file_descending(input_path: &Path, output_path: &Path) -> Result<(), Error> {
    let mut csv_sort = Sort::new(Input::File(input_path.to_path_buf()), Output::File(output_path.to_path_buf()));
    csv_sort.with_field(2);
    csv_sort.with_order(Order::Desc);
    csv_sort.with_skip_header(true);
    csv_sort.sort()?;
    Ok(())
}

fn sort_directory(input_path: &Path, output_path: &Path) -> Result<(), Error> {
    let mut csv_sort = Sort::new(Input::Directory(input_path.to_path_buf()), Output::File(output_path.to_path_buf()));
    csv_sort.with_tasks(2);
    let completion = csv_sort.sort()?;
    println!("sorted {} records from {}", completion.records(), input_path.display());
    Ok(())
}

// cargo run -r --example sort_csv
pub fn main() -> Result<(), Error> {
    sort_file_ascending(&PathBuf::from("./tests/fixtures/letters.csv"), &PathBuf::from("./target/letters-asc.csv"))?;
    sort_file_descending(&PathBuf::from("./tests/fixtures/header.csv"), &PathBuf::from("./target/header-desc.csv"))?;
    sort_directory(&PathBuf::from("./tests/fixtures/tree"), &PathBuf::from("./target/tree.csv"))?;
    Ok(())
}
