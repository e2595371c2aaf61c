//! Shared utilities: dependency-keyed memoization, trailing-edge
//! debouncing and structure content hashing.

pub mod debounce;
/// Content hash of a structure's atom records.
pub mod hash;
pub mod memo;
