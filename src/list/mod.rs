pub mod filter;
pub mod paginate;
pub mod state;

pub use filter::{FilterSet, MatchMode, Predicate};
pub use paginate::{DEFAULT_PAGE_SIZE, PageInfo, Paginator, ServerPage};
pub use state::{ListState, ListView, SortFn};
