use std::io::{BufWriter, Write};

use anyhow::Context;

use crate::record::Record;

/// Buffered writer of delimited records.
///
/// A field is quoted when it contains the separator, a double quote, CR or LF, or when it starts
/// with whitespace. Quotes inside a quoted field are doubled. Every record ends with `\n`.
///
/// # Examples
/// ```
/// use csv_tree_sort::record::Record;
/// use csv_tree_sort::writer::RecordWriter;
///
/// let mut writer = RecordWriter::new(Vec::new(), ',');
/// writer.write_record(&Record::from(vec!["a,b", "say \"hi\"", "c"]))?;
/// let bytes = writer.finish()?;
/// assert_eq!(String::from_utf8(bytes)?, "\"a,b\",\"say \"\"hi\"\"\",c\n");
/// # Ok::<(), anyhow::Error>(())
/// ```
pub struct RecordWriter<W: Write> {
    writer: BufWriter<W>,
    field_separator: char,
    written: usize,
}

impl<W: Write> RecordWriter<W> {
    pub fn new(inner: W, field_separator: char) -> RecordWriter<W> {
        RecordWriter {
            writer: BufWriter::new(inner),
            field_separator,
            written: 0,
        }
    }

    /// Get the number of records written so far
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn write_record(&mut self, record: &Record) -> Result<(), anyhow::Error> {
        let mut buffer = [0u8; 4];
        let separator = self.field_separator.encode_utf8(&mut buffer).as_bytes();
        for (i, field) in record.fields().iter().enumerate() {
            if i > 0 {
                self.writer.write_all(separator)?;
            }
            if needs_quotes(field, self.field_separator) {
                self.writer.write_all(b"\"")?;
                self.writer.write_all(field.replace('"', "\"\"").as_bytes())?;
                self.writer.write_all(b"\"")?;
            } else {
                self.writer.write_all(field.as_bytes())?;
            }
        }
        self.writer.write_all(b"\n")
            .with_context(|| format!("write record {}", self.written + 1))?;
        self.written += 1;
        Ok(())
    }

    /// Write every record of `records` and flush
    pub fn write_all<'a, I>(&mut self, records: I) -> Result<usize, anyhow::Error>
        where I: IntoIterator<Item = &'a Record>
    {
        let before = self.written;
        for record in records {
            self.write_record(record)?;
        }
        self.flush()?;
        Ok(self.written - before)
    }

    pub fn flush(&mut self) -> Result<(), anyhow::Error> {
        self.writer.flush().with_context(|| "flush records")?;
        Ok(())
    }

    /// Flush and return the underlying writer
    pub fn finish(self) -> Result<W, anyhow::Error> {
        self.writer.into_inner()
            .map_err(|e| anyhow::Error::new(e.into_error()).context("flush records"))
    }
}

fn needs_quotes(field: &str, field_separator: char) -> bool {
    if field.is_empty() {
        return false;
    }
    // a bare end-of-data marker
    if field == "\\." {
        return true;
    }
    field.starts_with(char::is_whitespace)
        || field.contains(|c: char| c == field_separator || c == '"' || c == '\r' || c == '\n')
}
