#![warn(missing_docs)]
//! Core interfaces of MuSHR reinforcement learning environments.
//!
//! This crate has no knowledge of the physics engine. It defines the [`Env`]
//! trait implemented by concrete environments, the [`Step`] object emitted at
//! every interaction step, [`record::Record`] for diagnostics, [`BoxSpace`]
//! for declaring observation and action spaces, and the [`TimeLimit`] wrapper
//! that ends episodes after a fixed number of steps.
pub mod error;
pub mod record;

mod base;
pub use base::{Act, Env, Info, Obs, Policy, Step};

mod evaluator;
pub use evaluator::{DefaultEvaluator, Evaluator};

mod space;
pub use space::BoxSpace;

mod wrapper;
pub use wrapper::{TimeLimit, TimeLimitConfig};
