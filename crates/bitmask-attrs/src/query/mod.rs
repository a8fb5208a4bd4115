mod filter;
mod predicate;

pub use filter::Filter;
pub use predicate::{mask_for, no, predicate, with, with_any, without, Predicate, Rule};
pub(crate) use predicate::single;
