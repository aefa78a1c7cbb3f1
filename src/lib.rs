//! Monthly dengue cases joined with monthly rainfall, per Brazilian state.
//!
//! Both datasets are keyed by `STATE-YEAR-MONTH`, summed per key and inner
//! joined; the result is written as `Estado;Ano;Mes;Chuva;Dengue` lines.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod format;
pub mod join;
pub mod key;
pub mod process;
pub mod record;
pub mod summary;

pub use config::{Cli, PipelineConfig};
pub use error::{JoinError, Result};
pub use key::CompositeKey;
pub use process::{join_datasets, run, transform_lines};
pub use summary::RunSummary;
