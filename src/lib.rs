//! This crate sorts CSV-like records by a single field, reading a file, standard input or every
//! matching file under a directory.
//!
//! Records are inserted into an unbalanced binary search tree keyed by the selected field as they
//! arrive. Every source is read by its own reader task; all readers feed a single tree builder
//! over a rendezvous channel, so the tree has exactly one writer and readers are throttled to the
//! speed of insertion. When reading is done the tree is traversed in ascending or descending order
//! and written out as delimited text.
//!
//! A run can be interrupted: the tree builder stops between two insertions and whatever has been
//! ordered so far is written, see [sort::Sort::sort_until] and [interrupt::ctrl_c].
//!
//! Keys are compared as raw strings. Records with equal keys come out in arrival order when
//! sorting ascending and in reverse arrival order when sorting descending, arrival order across
//! sources is not defined.
//!
//! # Examples
//! ```
//! use std::path::PathBuf;
//! use csv_tree_sort::order::Order;
//! use csv_tree_sort::sort::Sort;
//! use csv_tree_sort::source::{Input, Output};
//!
//! fn sort_records(input: PathBuf, output: PathBuf) -> Result<(), anyhow::Error> {
//!     let mut csv_sort = Sort::new(Input::File(input), Output::File(output));
//!     csv_sort.with_field(2);
//!     csv_sort.with_order(Order::Desc);
//!     let completion = csv_sort.sort()?;
//!     log::info!("sorted {} records", completion.records());
//!     Ok(())
//! }
//! ```
//!

pub(crate) mod config;
pub(crate) mod pipeline;
pub(crate) mod read_command;

pub mod interrupt;
pub mod order;
pub mod record;
pub mod sort;
pub mod source;
pub mod tree;
pub mod writer;
