//! Key-value records for diagnostics and logging.
//!
//! A [`Record`] maps names to [`RecordValue`]s. Environments use it in two
//! places: as the diagnostic mapping produced together with a reward, and as
//! the logging record returned from [`Env::step`](crate::Env::step).
//!
//! ```rust
//! use mushr_core::record::{Record, RecordValue};
//!
//! let mut record = Record::from_scalar("reward", -1.0);
//! record.insert("obs", RecordValue::Array1(vec![1.0, 2.0, 3.0]));
//! assert_eq!(record.get_scalar("reward").unwrap(), -1.0);
//! ```
mod base;

pub use base::{Record, RecordValue};
