//! Codelink - an in-memory URL shortener
//!
//! Maps long targets to short fixed-length codes and resolves them back.
//!
//! # Architecture
//! - `storage`: concurrent code → target store (`CodeStore` + backends)
//! - `generator`: collision-avoiding code generation with entropy escalation
//! - `services`: target validation on top of the generator
//! - `api`: HTTP handlers and middleware
//! - `config`: configuration loading
//! - `runtime`: server lifecycle
//! - `system`: logging setup
//!
//! ```
//! use std::sync::Arc;
//! use codelink::generator::CodeGenerator;
//! use codelink::storage::MemoryStore;
//!
//! let generator = CodeGenerator::new(Arc::new(MemoryStore::new()));
//! let code = generator.generate("https://example.com/a").unwrap();
//! assert_eq!(code.len(), 6);
//! assert_eq!(generator.resolve(&code).unwrap(), "https://example.com/a");
//! ```

pub mod api;
pub mod config;
pub mod errors;
pub mod generator;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
