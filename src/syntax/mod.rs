//! Syntax queries over the CST.
//!
//! Pattern predicates used by every rule: attribute lookup, argument lookup
//! by position or name, and name-valued expressions. Queries are tolerant of
//! the many surface forms C# allows for the same construct and return `None`
//! for missing or malformed syntax.

mod attributes;
mod queries;

pub use attributes::{
    find_attributes, is_attribute, try_get_argument, try_get_argument_string_value,
    try_get_argument_type, try_get_attribute, try_get_string_value,
};
pub use queries::{
    ancestor, contains_range, member_declarations, node_at_range, try_first, try_single,
    try_single_statement,
};
