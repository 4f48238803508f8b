//! Fast hash collection aliases.

pub use rustc_hash::{FxHashMap, FxHashSet};
