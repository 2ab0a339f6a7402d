//! # calckit_core - Declarative Calculator Engine
//!
//! `calckit_core` describes calculators as data and evaluates them. A
//! calculator declares typed input fields (with defaults, units, choices and
//! visibility conditions) and named output computations; a consumer turns the
//! user's raw entries into a coerced snapshot and re-runs every output on
//! each change.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: evaluation is a pure function of the snapshot
//! - **Total**: bad input becomes a sentinel value, never a panic or an error
//! - **Declarative**: conditions and formula inputs are inspectable data
//! - **Validated once**: structural defects fail the registry build
//!
//! ## Quick Start
//!
//! ```rust
//! use std::collections::HashMap;
//! use calckit_core::{RawValue, Registry};
//!
//! let registry = Registry::builtin().unwrap();
//! let converter = registry.get("meters-to-feet").unwrap();
//!
//! let mut raw = HashMap::new();
//! raw.insert("meters".to_string(), RawValue::from("1.75"));
//!
//! let results = converter.evaluate_raw(&raw);
//! assert_eq!(results[0].display(), "5.7415 ft");
//! assert_eq!(results[1].display(), "5' 9\"");
//! ```
//!
//! ## Modules
//!
//! - [`value`] / [`coercion`] - raw and typed values, never-failing coercion
//! - [`field`] - input field schema
//! - [`condition`] - declarative visibility conditions
//! - [`snapshot`] - coerced input values with typed accessors
//! - [`output`] - named output formulas and evaluation results
//! - [`definition`] - calculator definitions
//! - [`validation`] - load-time structural checks
//! - [`registry`] - immutable calculator registry
//! - [`config`] - registry build policy
//! - [`cache`] - consumer-side memo of pure results
//! - [`catalog`] - the built-in calculators
//! - [`errors`] - structured error types

pub mod cache;
pub mod catalog;
pub mod category;
pub mod coercion;
pub mod condition;
pub mod config;
pub mod definition;
pub mod errors;
pub mod field;
pub mod output;
pub mod precision;
pub mod registry;
pub mod rng;
pub mod snapshot;
pub mod validation;
pub mod value;

// Re-export commonly used types at crate root for convenience
pub use cache::EvaluationCache;
pub use category::Category;
pub use condition::{visible, Condition};
pub use config::{DuplicatePolicy, RegistryConfig};
pub use definition::CalculatorDefinition;
pub use errors::{CatalogError, CatalogResult};
pub use field::{FieldKind, InputField};
pub use output::{Evaluation, OutputField, OutputValue, Volatility};
pub use registry::Registry;
pub use snapshot::Snapshot;
pub use value::{RawValue, Value};
