use anyhow::anyhow;

use crate::order::Order;
use crate::record::Record;

struct Node {
    record: Record,
    left: Option<Box<Node>>,
    right: Option<Box<Node>>,
}

impl Node {
    fn new(record: Record) -> Node {
        Node {
            record,
            left: None,
            right: None,
        }
    }

    fn near(&self, order: Order) -> Option<&Node> {
        match order {
            Order::Asc => self.left.as_deref(),
            Order::Desc => self.right.as_deref(),
        }
    }

    fn far(&self, order: Order) -> Option<&Node> {
        match order {
            Order::Asc => self.right.as_deref(),
            Order::Desc => self.left.as_deref(),
        }
    }
}

/// Unbalanced binary search tree of [Record]s keyed by a single field.
///
/// The first inserted record fixes the schema: every later record must have the same number of
/// fields. Keys are compared as raw strings, byte by byte. A record whose key is strictly less
/// than a node's key goes to the left subtree, anything else, including equal keys, goes to the
/// right. Ties therefore come out in insertion order when traversing in [Order::Asc] and in
/// reverse insertion order in [Order::Desc].
///
/// Insertion, traversal and drop are iterative, so a tree degenerated into a list by sorted
/// input does not exhaust the stack.
///
/// # Examples
/// ```
/// use csv_tree_sort::order::Order;
/// use csv_tree_sort::record::Record;
/// use csv_tree_sort::tree::OrderedTree;
///
/// let mut tree = OrderedTree::new(0);
/// tree.insert(Record::parse("b,2", ','))?;
/// tree.insert(Record::parse("a,1", ','))?;
/// tree.insert(Record::parse("c,3", ','))?;
/// let keys: Vec<&str> = tree.traverse(Order::Desc).filter_map(|r| r.field(0)).collect();
/// assert_eq!(keys, vec!["c", "b", "a"]);
/// # Ok::<(), anyhow::Error>(())
/// ```
pub struct OrderedTree {
    sort_index: usize,
    arity: Option<usize>,
    root: Option<Box<Node>>,
    len: usize,
}

impl OrderedTree {
    /// Create an empty tree ordered by the field at the zero based `sort_index`
    pub fn new(sort_index: usize) -> OrderedTree {
        OrderedTree {
            sort_index,
            arity: None,
            root: None,
            len: 0,
        }
    }

    /// Get the zero based index of the key field
    pub fn sort_index(&self) -> usize {
        self.sort_index
    }

    /// Get the number of fields established by the first record, None while the tree is empty
    pub fn arity(&self) -> Option<usize> {
        self.arity
    }

    /// Get the number of records in the tree
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insert a record as a new leaf.
    ///
    /// Fails when the record has no field at the sort index or when its number of fields differs
    /// from the schema. Such input can not be ordered consistently and callers are expected to
    /// abort rather than skip the record.
    pub fn insert(&mut self, record: Record) -> Result<(), anyhow::Error> {
        if self.sort_index >= record.arity() {
            return Err(
                anyhow!(
                    "Requested comparison for field {} but there are only {} fields, record: {:?}",
                    self.sort_index + 1,
                    record.arity(),
                    record.fields(),
                )
            );
        }
        match self.arity {
            None => {
                self.arity = Some(record.arity());
            }
            Some(arity) if arity != record.arity() => {
                return Err(
                    anyhow!(
                        "Invalid record length: {}, expected: {}, record: {:?}",
                        record.arity(),
                        arity,
                        record.fields(),
                    )
                );
            }
            Some(_) => {}
        }

        let sort_index = self.sort_index;
        let mut slot = &mut self.root;
        while let Some(node) = slot {
            slot = if record.fields()[sort_index] < node.record.fields()[sort_index] {
                &mut node.left
            } else {
                &mut node.right
            };
        }
        *slot = Some(Box::new(Node::new(record)));
        self.len += 1;
        Ok(())
    }

    /// Walk the tree in `order`. The walk is lazy and may be repeated any number of times.
    pub fn traverse(&self, order: Order) -> Traversal<'_> {
        Traversal::new(self.root.as_deref(), order)
    }
}

impl Drop for OrderedTree {
    fn drop(&mut self) {
        let mut pending: Vec<Box<Node>> = self.root.take().into_iter().collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());
        }
    }
}

/// In-order iterator over the records of an [OrderedTree]
pub struct Traversal<'a> {
    stack: Vec<&'a Node>,
    order: Order,
}

impl<'a> Traversal<'a> {
    fn new(root: Option<&'a Node>, order: Order) -> Traversal<'a> {
        let mut traversal = Traversal {
            stack: Vec::new(),
            order,
        };
        traversal.descend(root);
        traversal
    }

    fn descend(&mut self, mut node: Option<&'a Node>) {
        while let Some(current) = node {
            self.stack.push(current);
            node = current.near(self.order);
        }
    }
}

impl<'a> Iterator for Traversal<'a> {
    type Item = &'a Record;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.descend(node.far(self.order));
        Some(&node.record)
    }
}
