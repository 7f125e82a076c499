//! `lp-pipeline` — the preprocessing run.
//!
//! # Three-phase pipeline
//!
//! ```text
//! scan      — list scene directories, discovering the split size
//! ① load    — per batch: parse + collect scenes on the worker pool,
//!             then insert the finished batch into the store
//! ② connect — per batch: compute left/right connectivity on the pool,
//!             then merge the finished batch into the store
//! ③ archive — serialize the store once, atomically
//! ```
//!
//! Scenes share no mutable state, so each batch fans out on Rayon and
//! joins before any store mutation: a scene's record is always written
//! whole, never partially.  The first failing scene aborts the run with
//! its id attached — preprocessing is all-or-nothing.

pub mod error;
pub mod observer;
pub mod run;

#[cfg(test)]
mod tests;

pub use error::{PipelineError, PipelineResult};
pub use observer::{NoopObserver, PipelineObserver};
pub use run::run_split;
