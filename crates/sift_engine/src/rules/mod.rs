//! Built-in lint rules

mod sift001_prefer_contains;
mod sift002_prefer_nullish_coalescing;
mod sift003_no_this_outside_method;
mod sift004_unsafe_assignment;

pub use sift001_prefer_contains::PreferContains;
pub use sift002_prefer_nullish_coalescing::{
    IgnorePrimitives, NullishOptions, PreferNullishCoalescing,
};
pub use sift003_no_this_outside_method::NoThisOutsideMethod;
pub use sift004_unsafe_assignment::UnsafeAssignment;

use crate::rule::Rule;

/// Get all built-in rules
pub fn all_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(PreferContains),
        Box::new(PreferNullishCoalescing),
        Box::new(NoThisOutsideMethod),
        Box::new(UnsafeAssignment),
    ]
}
