use blueprint_schema::{Blueprint, Item};

use crate::{analyzer::Analyzer, error::BlueprintError};

/// Strict check of a finished registry, run before generation when duplicate
/// names and dangling references should be rejected up front.
///
/// Returns `Err(BlueprintError::DuplicateItem(_))` for the first name declared
/// twice, then `Err(BlueprintError::UnresolvedReference { .. })` for the first
/// reference to a missing item, scanning items in declaration order.
pub fn verify_blueprint(blueprint: &Blueprint) -> Result<(), BlueprintError> {
    // 1) Duplicate names
    if let Some(name) = blueprint.redeclared().first() {
        return Err(BlueprintError::DuplicateItem(name.clone()));
    }

    // 2) Every reference resolves
    let analyzer = Analyzer::new(blueprint);
    for (name, item) in blueprint.items() {
        match item {
            Item::Struct(body) => {
                for field in body.fields.values() {
                    analyzer.check_refs(&field.type_, name)?;
                }
            }
            Item::Enum(body) => {
                for payload in body.variants.values().filter_map(|v| v.payload.as_ref()) {
                    analyzer.check_refs(payload, name)?;
                }
            }
        }
    }

    Ok(())
}
