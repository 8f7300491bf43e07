//! Sift Semantic - the type-query contract rules analyze against
//!
//! The engine itself never understands types; rules consult a [`TypeOracle`]
//! to decide whether a construct is a defect. Any real type system sits
//! behind that trait. This crate ships the contract plus two in-tree
//! implementations: [`NoTypeInfo`] (always silent) and [`Database`] (a
//! table-driven oracle filled in by embedders and test harnesses).

mod db;
mod flags;
mod oracle;

pub use db::Database;
pub use flags::TypeFlags;
pub use oracle::{NoTypeInfo, Signature, TypeId, TypeOracle};
