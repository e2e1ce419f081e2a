use blueprint_schema::{EnumBody, StructBody};

use crate::{analyzer::Analyzer, error::BlueprintError, generator::Generator};

/// A target language.
///
/// The driver calls [`Language::generate_header`] once, then
/// [`Language::generate_struct`] or [`Language::generate_enum`] for every
/// registry item in declaration order. Each backend picks its own naming and
/// nullability conventions, but all of them must emit the same operations:
/// constructors, fluent setters, enum conversions, serialization to a generic
/// value tree and validating deserialization from it.
pub trait Language {
    /// Short name used on the command line, e.g. `"go"`.
    fn name(&self) -> &'static str;

    /// File extension of generated files, without the dot.
    fn extension(&self) -> &'static str;

    /// Text written once per indentation level.
    fn indent(&self) -> &'static str {
        "\t"
    }

    /// Shared helpers. Only helpers for type kinds the registry uses are emitted.
    fn generate_header(&self, _generator: &mut Generator, _analyzer: &Analyzer<'_>) -> Result<(), BlueprintError> {
        Ok(())
    }

    fn generate_struct(
        &self,
        generator: &mut Generator,
        analyzer: &Analyzer<'_>,
        name: &str,
        body: &StructBody,
    ) -> Result<(), BlueprintError>;

    fn generate_enum(
        &self,
        generator: &mut Generator,
        analyzer: &Analyzer<'_>,
        name: &str,
        body: &EnumBody,
    ) -> Result<(), BlueprintError>;
}
