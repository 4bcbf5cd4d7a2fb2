use anyhow::anyhow;
use crossbeam_channel::{never, Receiver};

use crate::config::Config;
use crate::order::Order;
use crate::pipeline::IngestionPipeline;
use crate::source::{Input, Output};
use crate::writer::RecordWriter;

/// Sort delimited records by a single field
///
/// # Examples
/// ```
/// use std::path::PathBuf;
/// use csv_tree_sort::order::Order;
/// use csv_tree_sort::sort::Sort;
/// use csv_tree_sort::source::{Input, Output};
///
/// fn sort_directory(input: PathBuf, output: PathBuf) -> Result<(), anyhow::Error> {
///     let mut csv_sort = Sort::new(Input::Directory(input), Output::File(output));
///     // sort by the second field, 1 based
///     csv_sort.with_field(2);
///     csv_sort.with_order(Order::Desc);
///     // read at most 4 files at the same time
///     csv_sort.with_tasks(4);
///     csv_sort.sort()?;
///     Ok(())
/// }
/// ```
pub struct Sort {
    input: Input,
    output: Output,
    field: usize,
    order: Order,
    skip_header: bool,
    field_separator: char,
    suffix: String,
    tasks: usize,
}

impl Sort {
    /// Create a default Sort definition.
    ///
    /// * records are sorted by the first field
    /// * default Order is Asc
    /// * the field separator is ','
    /// * every line is a record, there is no header
    /// * directories are searched for files ending with ".csv"
    /// * the number of concurrent readers is the number of CPU cores
    pub fn new(input: Input, output: Output) -> Sort {
        Sort {
            input,
            output,
            field: 1,
            order: Order::Asc,
            skip_header: false,
            field_separator: ',',
            suffix: ".csv".to_string(),
            tasks: 0,
        }
    }

    /// Set the 1 based index of the field to sort by. The default is 1
    pub fn with_field(&mut self, field: usize) {
        self.field = field;
    }

    /// Set [Order]
    pub fn with_order(&mut self, order: Order) {
        self.order = order;
    }

    /// Treat the first line of every source as a header. Headers are kept out of the sort and the
    /// first header received is written before the sorted records.
    pub fn with_skip_header(&mut self, skip_header: bool) {
        self.skip_header = skip_header;
    }

    /// Set the field separator. The default is ','
    pub fn with_field_separator(&mut self, field_separator: char) {
        self.field_separator = field_separator;
    }

    /// Set the file name suffix used to select files from an input directory
    pub fn with_suffix(&mut self, suffix: &str) {
        self.suffix = suffix.to_string();
    }

    /// Set the number of concurrent readers. The default is zero which will result in using all
    /// system cores
    pub fn with_tasks(&mut self, tasks: usize) {
        self.tasks = tasks;
    }

    /// Read every source to the end, then write all records in order
    pub fn sort(&self) -> Result<Completion, anyhow::Error> {
        self.sort_until(never())
    }

    /// Like [Sort::sort], but a message on `interrupt` stops reading and writes the records
    /// ordered so far. Dropping the sender without sending is not an interrupt.
    pub fn sort_until(&self, interrupt: Receiver<()>) -> Result<Completion, anyhow::Error> {
        let config = self.create_config()?;
        let order = config.order();
        let mut writer = RecordWriter::new(config.output().open()?, config.field_separator());

        let ordered = IngestionPipeline::new(config).run(interrupt)?;
        if let Some(header) = ordered.header() {
            writer.write_record(header)?;
        }
        let records = writer.write_all(ordered.tree().traverse(order))?;
        log::info!("Wrote {} records, interrupted: {}", records, ordered.interrupted());
        Ok(Completion::new(records, ordered.interrupted()))
    }

    fn create_config(&self) -> Result<Config, anyhow::Error> {
        if self.field == 0 {
            return Err(anyhow!("Field index starts at 1"));
        }

        let mut tasks = self.tasks;
        if self.tasks == 0 {
            tasks = num_cpus::get();
        }

        let config = Config::new(
            self.input.clone(),
            self.output.clone(),
            self.field - 1,
            self.order,
            self.skip_header,
            self.field_separator,
            self.suffix.clone(),
            tasks,
        );
        Ok(config)
    }
}

/// Result of a finished [Sort]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Completion {
    records: usize,
    interrupted: bool,
}

impl Completion {
    fn new(records: usize, interrupted: bool) -> Completion {
        Completion {
            records,
            interrupted,
        }
    }

    /// Get the number of records written, not counting the header
    pub fn records(&self) -> usize {
        self.records
    }

    /// True when the output is a partial flush triggered by an interrupt
    pub fn interrupted(&self) -> bool {
        self.interrupted
    }
}
