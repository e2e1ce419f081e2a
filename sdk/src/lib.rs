//! blueprint
//!
//! Describe data shapes once, then generate TypeScript, Go and Rust code with
//! constructors, fluent setters, enum conversions and JSON-shaped
//! (de)serialization for them.
//!
//! - The registry and type model (re-exported from `blueprint-schema`)
//! - Code generation (re-exported from `blueprint-compiler`)
//! - [`GenerateExt`] for calling the backends straight from a [`Blueprint`]
//! - Bundled [`fixtures`]

pub mod fixtures;

pub use blueprint_compiler::{
    generate, generate_strict, language_by_name, languages, verify_blueprint, Analyzer, BlueprintError,
    GoOptions, Golang, Language, Rust, TypeScript, LANGUAGE_NAMES,
};
pub use blueprint_schema::{
    Blueprint, EnumBody, Field, Item, ItemKind, NumberWidth, StructBody, TypeDef, Variant,
};

/// Dumps a registry as pretty-printed JSON.
pub fn to_json(blueprint: &Blueprint) -> Result<String, BlueprintError> {
    Ok(serde_json::to_string_pretty(blueprint)?)
}

/// One method per backend, with that backend's default options.
pub trait GenerateExt {
    fn generate_typescript(&self) -> Result<String, BlueprintError>;
    fn generate_go(&self) -> Result<String, BlueprintError>;
    fn generate_rust(&self) -> Result<String, BlueprintError>;
}

impl GenerateExt for Blueprint {
    fn generate_typescript(&self) -> Result<String, BlueprintError> {
        generate(self, &TypeScript)
    }

    fn generate_go(&self) -> Result<String, BlueprintError> {
        generate(self, &Golang::default())
    }

    fn generate_rust(&self) -> Result<String, BlueprintError> {
        generate(self, &Rust)
    }
}

pub mod error {
    pub use blueprint_compiler::error::BlueprintError;
}

pub mod schema {
    pub use blueprint_schema::*;
}
