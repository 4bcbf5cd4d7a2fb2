use std::thread;
use std::thread::JoinHandle;

use anyhow::anyhow;
use command_executor::shutdown_mode::ShutdownMode;
use command_executor::thread_pool_builder::ThreadPoolBuilder;
use crossbeam_channel::{bounded, never, select, Receiver, Sender};

use crate::config::Config;
use crate::read_command::ReadCommand;
use crate::record::Record;
use crate::source::{discover, Input, Source};
use crate::tree::OrderedTree;

/// What a reader sends to the tree builder
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Message {
    /// The first line of a source when headers are skipped
    Header(Record),
    Record(Record),
}

/// A message or the error that aborts the run
pub(crate) type Ingest = Result<Message, anyhow::Error>;

/// The tree handed back by the tree builder
pub(crate) struct Ordered {
    tree: OrderedTree,
    header: Option<Record>,
    interrupted: bool,
}

impl Ordered {
    pub(crate) fn tree(&self) -> &OrderedTree {
        &self.tree
    }

    pub(crate) fn header(&self) -> Option<&Record> {
        self.header.as_ref()
    }

    pub(crate) fn interrupted(&self) -> bool {
        self.interrupted
    }
}

/// Feeds records from every source of a run into a single [OrderedTree].
///
/// Three kinds of tasks take part:
/// * the dispatcher resolves the input into sources and submits one [ReadCommand] per source to
///   the reading pool, then waits for the pool to finish
/// * the readers send records over a rendezvous channel, so a reader stalls until the tree
///   builder takes its record
/// * the tree builder is the only task that touches the tree. It inserts records in arrival
///   order until every sender is gone, or stops early on interrupt
///
/// [IngestionPipeline::run] returns when the tree builder returns. On a normal finish it also
/// joins the dispatcher, which has joined every reader. On interrupt the dispatcher and readers
/// are left behind, their sends fail once the tree builder is gone.
pub(crate) struct IngestionPipeline {
    config: Config,
}

impl IngestionPipeline {
    pub(crate) fn new(config: Config) -> IngestionPipeline {
        IngestionPipeline {
            config,
        }
    }

    pub(crate) fn run(self, interrupt: Receiver<()>) -> Result<Ordered, anyhow::Error> {
        log::info!("Start ingestion, input: {:?}", self.config.input());
        let (sender, receiver) = bounded::<Ingest>(0);
        let tree = OrderedTree::new(self.config.sort_index());

        let builder = thread::Builder::new()
            .name("tree-builder".to_string())
            .spawn(move || build_tree(tree, receiver, interrupt))?;

        let config = self.config;
        let dispatcher = thread::Builder::new()
            .name("dispatcher".to_string())
            .spawn(move || {
                if let Err(e) = dispatch(&config, &sender) {
                    // fails only when the tree builder is already gone
                    let _ = sender.send(Err(e));
                }
            })?;

        let ordered = join(builder, "tree-builder")??;
        if ordered.interrupted() {
            log::info!("Ingestion interrupted, records: {}", ordered.tree().len());
            return Ok(ordered);
        }
        join(dispatcher, "dispatcher")?;
        log::info!("Finish ingestion, records: {}", ordered.tree().len());
        Ok(ordered)
    }
}

fn join<T>(handle: JoinHandle<T>, name: &str) -> Result<T, anyhow::Error> {
    handle.join().map_err(|_| anyhow!("Thread {} panicked", name))
}

fn dispatch(config: &Config, sender: &Sender<Ingest>) -> Result<usize, anyhow::Error> {
    let mut thread_pool_builder = ThreadPoolBuilder::new();
    let mut reading_pool = thread_pool_builder
        .with_name("reading".to_string())
        .with_tasks(config.tasks())
        .with_queue_size(config.queue_size())
        .with_shutdown_mode(ShutdownMode::CompletePending)
        .build()?;

    let submit = |source: Source| -> Result<(), anyhow::Error> {
        log::info!("Dispatch {}", source);
        let read_command = Box::new(
            ReadCommand::new(source, sender.clone(), config.field_separator(), config.skip_header())
        );
        reading_pool.submit(read_command);
        Ok(())
    };

    let dispatched = match config.input() {
        Input::File(path) => submit(Source::File(path.clone())).map(|_| 1),
        Input::Stdin => submit(Source::Stdin).map(|_| 1),
        Input::Directory(directory) => discover(directory, config.suffix(), submit),
    };
    let dispatched = match dispatched {
        Ok(dispatched) => dispatched,
        Err(e) => {
            // abort the tree builder before waiting for the readers already submitted
            let _ = sender.send(Err(e));
            0
        }
    };

    log::info!("Shutting down reading pool");
    reading_pool.shutdown();
    reading_pool.join()?;
    log::info!("Finished reading {} sources", dispatched);
    Ok(dispatched)
}

fn build_tree(mut tree: OrderedTree, records: Receiver<Ingest>, interrupt: Receiver<()>) -> Result<Ordered, anyhow::Error> {
    let mut header = None;
    let closed = never();
    let mut interrupt_open = true;
    'receive: loop {
        let signals = if interrupt_open { &interrupt } else { &closed };
        select! {
            recv(signals) -> signal => {
                match signal {
                    Ok(()) => {
                        log::info!("Interrupt received, records: {}", tree.len());
                        return Ok(Ordered { tree, header, interrupted: true });
                    }
                    Err(_) => {
                        interrupt_open = false;
                    }
                }
            }
            recv(records) -> message => {
                match message {
                    Ok(Ok(Message::Record(record))) => {
                        tree.insert(record)?;
                    }
                    Ok(Ok(Message::Header(record))) => {
                        if header.is_none() {
                            header = Some(record);
                        }
                    }
                    Ok(Err(e)) => {
                        return Err(e);
                    }
                    Err(_) => {
                        break 'receive;
                    }
                }
            }
        }
    }
    Ok(Ordered { tree, header, interrupted: false })
}
