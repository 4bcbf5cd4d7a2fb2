/// A single row of delimited text: an ordered sequence of field values.
///
/// Records are compared only through the field selected by the tree they are inserted into, see
/// [crate::tree::OrderedTree].
///
/// # Examples
/// ```
/// use csv_tree_sort::record::Record;
/// let record = Record::parse("b,2", ',');
/// assert_eq!(record.arity(), 2);
/// assert_eq!(record.field(1), Some("2"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    fields: Vec<String>,
}

impl Record {
    /// Create a new [Record] from its field values
    pub fn new(fields: Vec<String>) -> Record {
        Record {
            fields,
        }
    }

    /// Split a line on `field_separator`.
    ///
    /// There is no quoting support, a separator inside a field is always a field boundary. An
    /// empty line produces a record with a single empty field.
    pub fn parse(line: &str, field_separator: char) -> Record {
        Record {
            fields: line.split(field_separator).map(|field| field.to_string()).collect(),
        }
    }

    /// Get the field values
    pub fn fields(&self) -> &Vec<String> {
        &self.fields
    }

    /// Get the number of fields
    pub fn arity(&self) -> usize {
        self.fields.len()
    }

    /// Get the field at the zero based `index`
    pub fn field(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(|field| field.as_str())
    }
}

impl From<Vec<String>> for Record {
    fn from(fields: Vec<String>) -> Self {
        Record::new(fields)
    }
}

impl From<Vec<&str>> for Record {
    fn from(fields: Vec<&str>) -> Self {
        Record::new(fields.into_iter().map(|field| field.to_string()).collect())
    }
}
