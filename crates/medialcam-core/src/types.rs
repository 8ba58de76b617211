//! Callback type aliases
//!
//! Thread-safe callback signatures used to report progress out of the
//! pipeline. They are `Send + Sync` because shapes may be processed on
//! worker threads.

/// A progress callback receiving (current, total) values.
pub type ProgressCallback = Box<dyn Fn(u64, u64) + Send + Sync>;
