//! NTGS Core - Configuration templates, session state, and conversion hand-off
//!
//! This crate contains the configuration model used to map survey table columns
//! onto the NTGS schema before geological modelling.

pub mod coercion;
pub mod config;
pub mod conversion;
pub mod error;
pub mod matching;
pub mod models;
pub mod registry;
pub mod session;
pub mod state;

pub use error::{NtgsError, Result};
pub use models::{ConfigSnapshot, DataType, FieldSchema, FieldValue};
pub use registry::TemplateRegistry;
pub use state::ConfigurationState;
