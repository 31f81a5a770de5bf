pub mod aliases;
pub mod line_items;
pub mod normalize;

pub use aliases::AliasTable;
pub use line_items::{Ledger, LineItem, LineItemSet};
pub use normalize::{normalize_statements, RawRow, RawStatementFile, RawTable};
