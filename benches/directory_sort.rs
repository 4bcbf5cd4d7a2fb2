use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::fs;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{anyhow, Context, Error};
use benchmark_rs::benchmarks::Benchmarks;
use benchmark_rs::stopwatch::StopWatch;
use data_encoding::HEXLOWER;
use simple_logger::SimpleLogger;

use csv_tree_sort::sort::Sort;
use csv_tree_sort::source::{Input, Output};

use tikv_jemallocator::Jemalloc;
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

#[derive(Clone)]
pub struct BenchmarkConfig {
    directories: BTreeMap<usize, PathBuf>,
    bench_results_dir: PathBuf,
    tasks: usize,
    description: String,
}

impl BenchmarkConfig {
    pub fn new(directories: BTreeMap<usize, PathBuf>, bench_results_dir: PathBuf, tasks: usize, description: &str) -> BenchmarkConfig {
        BenchmarkConfig {
            directories,
            bench_results_dir,
            tasks,
            description: description.to_string(),
        }
    }

    pub fn get_input_dir(&self, key: usize) -> PathBuf {
        self.directories.get(&key).unwrap().clone()
    }

    pub fn bench_results_dir(&self) -> &PathBuf {
        &self.bench_results_dir
    }

    pub fn tasks(&self) -> usize {
        self.tasks
    }
}

impl Display for BenchmarkConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "tasks: {}, description: {}",
                 self.tasks,
                 self.description,
        )
    }
}

fn temp_file_name(dir: &PathBuf) -> PathBuf {
    let mut result = PathBuf::from(dir);
    let name = HEXLOWER.encode(&rand::random::<[u8; 16]>());
    result.push(name);
    result
}

fn setup(bench_input_dir: &PathBuf, bench_results_dir: &PathBuf) -> Result<(), anyhow::Error> {
    if bench_results_dir.exists() {
        fs::remove_dir_all(bench_results_dir.clone()).with_context(|| anyhow!("{}", bench_results_dir.to_string_lossy()))?;
    }

    if !bench_input_dir.exists() {
        fs::create_dir_all(bench_input_dir.clone())?;
    }

    fs::create_dir_all(bench_results_dir.clone())
        .with_context(|| anyhow!("{}", bench_results_dir.to_string_lossy()))?;
    Ok(())
}

/// Create directories holding `files` files of `lines` random records each, for 1..=count files
fn create_input_dirs(count: usize, factor: usize, lines: usize, base_path: PathBuf) -> Result<BTreeMap<usize, PathBuf>, anyhow::Error> {
    let mut directories: BTreeMap<usize, PathBuf> = BTreeMap::new();
    for i in 1..=count {
        let files = i * factor;
        let number_of_lines = files * lines;
        let dir = base_path.join(PathBuf::from(number_of_lines.to_string()));
        if !dir.exists() {
            fs::create_dir_all(&dir)?;
            for j in 0..files {
                let path = dir.join(format!("part-{j}.csv"));
                let mut writer = BufWriter::new(
                    File::create(&path)
                        .with_context(|| anyhow!("path: {}", path.to_string_lossy()))?);
                for _k in 0..lines {
                    let key = HEXLOWER.encode(&rand::random::<[u8; 8]>());
                    writeln!(writer, "{},{},{}", key, j, rand::random::<u32>())?;
                }
            }
        }
        directories.insert(number_of_lines, dir);
    }
    Ok(directories)
}

fn sort(stop_watch: &mut StopWatch, config: BenchmarkConfig, work: usize) -> Result<(), anyhow::Error> {
    stop_watch.pause();
    let input_dir = config.get_input_dir(work);
    let output_path = temp_file_name(config.bench_results_dir());
    log::info!("Start sorting {}", input_dir.to_string_lossy());
    stop_watch.resume();
    let mut csv_sort = Sort::new(Input::Directory(input_dir.clone()), Output::File(output_path.clone()));
    csv_sort.with_tasks(config.tasks());
    csv_sort.sort()?;
    stop_watch.pause();
    log::info!("Finish sorting {}", input_dir.to_string_lossy());
    fs::remove_file(output_path.clone())
        .with_context(|| anyhow!("{}", output_path.to_string_lossy()))?;
    Ok(())
}

#[test]
fn directory_sort_bench() -> Result<(), Error> {
    SimpleLogger::new().init().unwrap();
    log::info!("Started directory_sort_bench.");

    let bench_input_dir = PathBuf::from("./target/benchmarks/input");
    let bench_results_dir = PathBuf::from("./target/benchmarks/results");
    setup(&bench_input_dir, &bench_results_dir)?;

    let directories = create_input_dirs(10, 8, 2_000, bench_input_dir.clone())?;

    let mut benchmarks = Benchmarks::new("csv-tree-sort");
    for tasks in [1, 2, 4, 8] {
        benchmarks.add(
            format!("directory-{}-tasks", tasks).as_str(),
            sort,
            BenchmarkConfig::new(
                directories.clone(),
                bench_results_dir.clone(),
                tasks,
                "random keys",
            ),
            directories.keys().cloned().collect(),
            3,
            0,
        )?;
    }

    benchmarks.run()?;
    benchmarks.save_to_csv(PathBuf::from("./target/benchmarks/"), true, true)?;
    benchmarks.save_to_json(PathBuf::from("./target/benchmarks/"))?;

    log::info!("Finished directory_sort_bench.");
    Ok(())
}
