//! Rule-based question answering over agricultural production and rainfall
//! tables.
//!
//! The pipeline: raw CSV rows are canonicalized into typed records
//! ([`canon`]), aggregated temporally and spatially on demand
//! ([`aggregate`]), and a fixed question template is matched ([`parse`]) and
//! answered with static dataset citations ([`engine`]). Loading and fetching
//! ([`loader`], [`fetch`]) are thin collaborators around the core.

pub mod aggregate;
pub mod canon;
pub mod engine;
pub mod error;
pub mod fetch;
pub mod loader;
pub mod output;
pub mod parse;
pub mod types;
pub mod util;

pub use error::{QaError, QaResult};
