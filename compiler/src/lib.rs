//! blueprint-compiler
//!
//! This crate implements:
//!  1) Structural queries over a registry (`Analyzer`: kind lookup and
//!     shape matching with `TypePattern`),
//!  2) A registry verifier for strict generation (redeclared items, unresolved references),
//!  3) The `Generator` text accumulator,
//!  4) The `Language` trait and its TypeScript, Go and Rust backends,
//!  5) Error types (`BlueprintError`).

pub mod error;
pub mod types;
pub mod utils;
pub mod case;
pub mod analyzer;
pub mod generator;
pub mod verifier;
pub mod compiler;
pub mod traits;
pub mod gen_typescript;
pub mod gen_go;
pub mod gen_rust;

pub use analyzer::Analyzer;
pub use compiler::{generate, generate_strict, language_by_name, languages, LANGUAGE_NAMES};
pub use error::BlueprintError;
pub use gen_go::{GoOptions, Golang};
pub use gen_rust::Rust;
pub use gen_typescript::TypeScript;
pub use generator::Generator;
pub use traits::Language;
pub use types::{MemberKind, TypeInstance, TypePattern};
pub use verifier::verify_blueprint;
