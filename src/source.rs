use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context};
use walkdir::WalkDir;

/// Where the records of a run come from. Exactly one input is active per run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Input {
    /// A single file
    File(PathBuf),
    /// Standard input
    Stdin,
    /// Every file under a directory, recursively, whose name ends with the configured suffix
    Directory(PathBuf),
}

impl Input {
    /// Resolve CLI style options to an [Input].
    ///
    /// Giving both a file and a directory is a configuration error, giving neither selects
    /// standard input.
    ///
    /// # Examples
    /// ```
    /// use std::path::PathBuf;
    /// use csv_tree_sort::source::Input;
    ///
    /// assert_eq!(Input::select(None, None).unwrap(), Input::Stdin);
    /// assert!(Input::select(Some(PathBuf::from("a.csv")), Some(PathBuf::from("data"))).is_err());
    /// ```
    pub fn select(file: Option<PathBuf>, directory: Option<PathBuf>) -> Result<Input, anyhow::Error> {
        match (file, directory) {
            (Some(file), Some(directory)) => Err(
                anyhow!(
                    "Can't use an input file and an input directory at once, file: {}, directory: {}",
                    file.display(),
                    directory.display(),
                )
            ),
            (Some(file), None) => Ok(Input::File(file)),
            (None, Some(directory)) => Ok(Input::Directory(directory)),
            (None, None) => Ok(Input::Stdin),
        }
    }
}

/// Where the sorted records go
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Output {
    File(PathBuf),
    Stdout,
}

impl Output {
    pub fn select(file: Option<PathBuf>) -> Output {
        match file {
            Some(path) => Output::File(path),
            None => Output::Stdout,
        }
    }

    pub(crate) fn open(&self) -> Result<Box<dyn Write + Send>, anyhow::Error> {
        match self {
            Output::File(path) => {
                let file = File::create(path)
                    .with_context(|| format!("path: {}", path.display()))?;
                Ok(Box::new(file))
            }
            Output::Stdout => Ok(Box::new(std::io::stdout())),
        }
    }
}

/// A single stream of lines read by one reader task
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Source {
    File(PathBuf),
    Stdin,
}

impl Source {
    pub(crate) fn open(&self) -> Result<Box<dyn BufRead>, anyhow::Error> {
        match self {
            Source::File(path) => {
                let file = File::open(path)
                    .with_context(|| format!("path: {}", path.display()))?;
                Ok(Box::new(BufReader::new(file)))
            }
            Source::Stdin => Ok(Box::new(std::io::stdin().lock())),
        }
    }
}

impl Display for Source {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::File(path) => write!(f, "{}", path.display()),
            Source::Stdin => write!(f, "<stdin>"),
        }
    }
}

/// Walk `directory` recursively in file name order and hand every regular file whose name ends
/// with `suffix` to `found`. Stops at the first walk error or the first error returned by
/// `found`. Returns the number of files found.
pub(crate) fn discover<F>(directory: &Path, suffix: &str, mut found: F) -> Result<usize, anyhow::Error>
    where F: FnMut(Source) -> Result<(), anyhow::Error>
{
    let mut count = 0;
    for entry in WalkDir::new(directory).sort_by_file_name() {
        let entry = entry.with_context(|| format!("walk directory: {}", directory.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.file_name().to_string_lossy().ends_with(suffix) {
            found(Source::File(entry.into_path()))?;
            count += 1;
        }
    }
    Ok(count)
}
