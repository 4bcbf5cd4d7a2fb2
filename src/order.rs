/// Traversal order of the sorted output
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Order {
    /// Ascending, the default
    #[default]
    Asc,
    /// Descending
    Desc,
}

impl Order {
    /// Map the CLI style `reverse` flag to an [Order]
    pub fn from_reverse(reverse: bool) -> Order {
        if reverse {
            Order::Desc
        } else {
            Order::Asc
        }
    }
}
