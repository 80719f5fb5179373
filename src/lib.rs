//! # villages-sql: census hierarchy to SQL seed data
//!
//! Reads a JSON extract of administrative divisions (districts, tehsils and
//! villages) and writes a PostgreSQL script that seeds the `districts`,
//! `tehsils` and `villages` tables. Foreign keys are resolved with lookup
//! subqueries on natural keys and every insert is `ON CONFLICT ... DO NOTHING`,
//! so the script can be replayed safely.
//!
//! ## Example
//!
//! ```no_run
//! use villages_sql::{generate_seed_sql, load_document, SeedOptions};
//!
//! let document = load_document("punjab_villages.json")?;
//! let (sql, stats) = generate_seed_sql(&document, &SeedOptions::default());
//! println!("{} villages", stats.villages);
//! # Ok::<(), villages_sql::SeedError>(())
//! ```

// Core modules
pub mod error;
pub mod model;
pub mod sql;
pub mod emitter;

// Settings and file handling
pub mod config;
pub mod fs_utils;
pub mod pipeline;

// Re-export key types
pub use error::SeedError;
pub use model::{Document, District, Tehsil, Village, load_document};
pub use emitter::{SeedOptions, SeedStats, generate_seed_sql, write_seed_sql};
pub use config::{CliOverrides, ConfigFile, Settings};
pub use pipeline::run;
