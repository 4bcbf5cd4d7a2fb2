use std::fs;
use std::io::Write;
use std::path::PathBuf;

use csv_tree_sort::order::Order;
use csv_tree_sort::sort::Sort;
use csv_tree_sort::source::{Input, Output};

mod common;

#[test]
fn test_directory_sort() -> Result<(), anyhow::Error> {
    common::setup();
    let output_path = common::temp_file_name("./target/results/");
    let mut csv_sort = Sort::new(
        Input::Directory(PathBuf::from("./tests/fixtures/tree")),
        Output::File(output_path.clone()),
    );
    csv_sort.with_tasks(2);
    let completion = csv_sort.sort()?;
    assert_eq!(completion.records(), 6);

    let lines = common::read_lines(output_path.clone())?;
    assert_eq!(lines, vec!["apple,3", "banana,1", "cherry,9", "fig,2", "kiwi,7", "mango,5"]);
    fs::remove_file(output_path)?;
    Ok(())
}

#[test]
fn test_directory_suffix() -> Result<(), anyhow::Error> {
    common::setup();
    let output_path = common::temp_file_name("./target/results/");
    let mut csv_sort = Sort::new(
        Input::Directory(PathBuf::from("./tests/fixtures/tree")),
        Output::File(output_path.clone()),
    );
    csv_sort.with_suffix(".txt");
    csv_sort.sort()?;

    let lines = common::read_lines(output_path.clone())?;
    assert_eq!(lines, vec!["zucchini,0"]);
    fs::remove_file(output_path)?;
    Ok(())
}

#[test]
fn test_many_files_no_loss() -> Result<(), anyhow::Error> {
    common::setup();
    let dir = tempfile::tempdir()?;
    let mut expected = 0;
    for i in 0..24 {
        let nested = dir.path().join(format!("group-{}", i % 5));
        fs::create_dir_all(&nested)?;
        let mut file = fs::File::create(nested.join(format!("part-{i}.csv")))?;
        let lines = i * 37;
        for j in 0..lines {
            writeln!(file, "{},{:04},{}", i, (j * 31) % 1_000, j)?;
        }
        expected += lines;
    }

    let output_path = common::temp_file_name("./target/results/");
    let mut csv_sort = Sort::new(Input::Directory(dir.path().to_path_buf()), Output::File(output_path.clone()));
    csv_sort.with_field(2);
    csv_sort.with_order(Order::Desc);
    csv_sort.with_tasks(3);
    let completion = csv_sort.sort()?;
    assert_eq!(completion.records(), expected);

    let keys: Vec<String> = common::read_lines(output_path.clone())?
        .into_iter()
        .map(|line| line.split(',').nth(1).unwrap().to_string())
        .collect();
    assert_eq!(keys.len(), expected);
    assert!(keys.windows(2).all(|pair| pair[0] >= pair[1]));
    fs::remove_file(output_path)?;
    Ok(())
}

#[test]
fn test_missing_directory_fails() {
    common::setup();
    let output_path = common::temp_file_name("./target/results/");
    let csv_sort = Sort::new(
        Input::Directory(PathBuf::from("./tests/fixtures/no-such-dir")),
        Output::File(output_path.clone()),
    );
    assert!(csv_sort.sort().is_err());
    let _ = fs::remove_file(output_path);
}
