use blueprint_schema::{Blueprint, Item};
use tracing::debug;

use crate::{
    analyzer::Analyzer,
    error::BlueprintError,
    gen_go::Golang,
    gen_rust::Rust,
    gen_typescript::TypeScript,
    generator::Generator,
    traits::Language,
    verifier::verify_blueprint,
};

/// Names accepted by [`language_by_name`], in the order they are listed.
pub const LANGUAGE_NAMES: [&str; 3] = ["typescript", "go", "rust"];

/// Generates the complete source for `blueprint` in `language`.
///
/// Returns `Err(BlueprintError::UnresolvedReference { .. })` as soon as an
/// emitted reference names a missing item; no partial output is returned.
pub fn generate(blueprint: &Blueprint, language: &dyn Language) -> Result<String, BlueprintError> {
    debug!(language = language.name(), items = blueprint.len(), "generating");

    let analyzer = Analyzer::new(blueprint);
    let mut generator = Generator::new(language.indent());

    language.generate_header(&mut generator, &analyzer)?;

    for (name, item) in blueprint.items() {
        generator.separate();

        debug!(item = name.as_str(), kind = %item.kind(), "emitting item");
        match item {
            Item::Struct(body) => language.generate_struct(&mut generator, &analyzer, name, body)?,
            Item::Enum(body)   => language.generate_enum(&mut generator, &analyzer, name, body)?,
        }
    }

    Ok(generator.finish())
}

/// [`generate`], preceded by [`verify_blueprint`].
pub fn generate_strict(blueprint: &Blueprint, language: &dyn Language) -> Result<String, BlueprintError> {
    verify_blueprint(blueprint)?;
    generate(blueprint, language)
}

/// Looks up a backend with its default options. Accepts the names in
/// [`LANGUAGE_NAMES`] plus the aliases `ts`, `golang` and `rs`.
pub fn language_by_name(name: &str) -> Result<Box<dyn Language>, BlueprintError> {
    match name.to_ascii_lowercase().as_str() {
        "typescript" | "ts" => Ok(Box::new(TypeScript)),
        "go" | "golang"     => Ok(Box::new(Golang::default())),
        "rust" | "rs"       => Ok(Box::new(Rust)),
        _ => Err(BlueprintError::UnknownLanguage(name.to_string())),
    }
}

/// Every backend with its default options.
pub fn languages() -> Vec<Box<dyn Language>> {
    vec![Box::new(TypeScript), Box::new(Golang::default()), Box::new(Rust)]
}
