use std::io::BufRead;
use std::thread;

use anyhow::{anyhow, Context};
use command_executor::command::Command;
use crossbeam_channel::Sender;

use crate::pipeline::{Ingest, Message};
use crate::record::Record;
use crate::source::Source;

/// Reads one [Source] line by line and sends a [Record] per line to the merge channel.
///
/// Reading stops at the first empty line or at the end of input. Errors are not returned to the
/// thread pool but forwarded to the tree builder, which aborts the run.
pub(crate) struct ReadCommand {
    source: Source,
    records: Sender<Ingest>,
    field_separator: char,
    skip_header: bool,
}

impl ReadCommand {
    pub(crate) fn new(source: Source, records: Sender<Ingest>, field_separator: char, skip_header: bool) -> ReadCommand {
        ReadCommand {
            source,
            records,
            field_separator,
            skip_header,
        }
    }

    fn read_records(&self) -> Result<usize, anyhow::Error> {
        let reader = self.source.open()?;
        let mut n = 0;
        for line in reader.lines() {
            let line = line
                .with_context(|| format!("source: {}, line: {}", self.source, n + 1))?;
            let line = line.strip_suffix('\r').unwrap_or(&line);
            if line.is_empty() {
                break;
            }

            let record = Record::parse(line, self.field_separator);
            let message = if n == 0 && self.skip_header {
                Message::Header(record)
            } else {
                Message::Record(record)
            };
            self.records.send(Ok(message))
                .map_err(|_| anyhow!("Record stream closed, source: {}", self.source))?;
            n += 1;
        }
        Ok(n)
    }
}

impl Command for ReadCommand {
    fn execute(&self) -> Result<(), anyhow::Error> {
        log::info!("Start reading {}, thread: {}", self.source, thread::current().name().unwrap_or("unnamed"));
        match self.read_records() {
            Ok(n) => {
                log::info!("Finish reading {}, lines: {}", self.source, n);
            }
            Err(e) => {
                log::debug!("Failed reading {}: {}", self.source, e);
                // fails only when the tree builder is already gone
                let _ = self.records.send(Err(e));
            }
        }
        Ok(())
    }
}
