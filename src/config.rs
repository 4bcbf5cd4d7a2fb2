use crate::order::Order;
use crate::source::{Input, Output};

#[derive(Clone, Debug)]
pub(crate) struct Config {
    input: Input,
    output: Output,
    sort_index: usize,
    order: Order,
    skip_header: bool,
    field_separator: char,
    suffix: String,
    tasks: usize,
    queue_size: usize,
}

impl Config {
    pub(crate) fn new(
        input: Input,
        output: Output,
        sort_index: usize,
        order: Order,
        skip_header: bool,
        field_separator: char,
        suffix: String,
        tasks: usize,
    ) -> Config {
        let queue_size = 4096;
        Config {
            input,
            output,
            sort_index,
            order,
            skip_header,
            field_separator,
            suffix,
            tasks,
            queue_size,
        }
    }

    pub(crate) fn input(&self) -> &Input {
        &self.input
    }

    pub(crate) fn output(&self) -> &Output {
        &self.output
    }

    /// Zero based
    pub(crate) fn sort_index(&self) -> usize {
        self.sort_index
    }

    pub(crate) fn order(&self) -> Order {
        self.order
    }

    pub(crate) fn skip_header(&self) -> bool {
        self.skip_header
    }

    pub(crate) fn field_separator(&self) -> char {
        self.field_separator
    }

    pub(crate) fn suffix(&self) -> &String {
        &self.suffix
    }

    pub(crate) fn tasks(&self) -> usize {
        self.tasks
    }

    pub(crate) fn queue_size(&self) -> usize {
        self.queue_size
    }
}
