use blueprint_schema::{Blueprint, EnumBody, Item, ItemKind, NumberWidth, TypeDef};
use tracing::trace;

use crate::{
    error::BlueprintError,
    types::{MemberKind, TypeInstance, TypePattern},
};

/// Read-only structural queries over a registry.
///
/// Holding the analyzer borrows the [`Blueprint`], so the registry cannot
/// change while code is being generated from it.
#[derive(Debug, Clone, Copy)]
pub struct Analyzer<'a> {
    blueprint: &'a Blueprint,
}

impl<'a> Analyzer<'a> {
    pub fn new(blueprint: &'a Blueprint) -> Self {
        Analyzer { blueprint }
    }

    pub fn blueprint(&self) -> &'a Blueprint {
        self.blueprint
    }

    pub fn kind_of(&self, name: &str) -> Option<ItemKind> {
        self.blueprint.get(name).map(Item::kind)
    }

    pub fn resolve(&self, name: &str) -> Option<&'a Item> {
        self.blueprint.get(name)
    }

    /// Like [`Analyzer::kind_of`], but a missing item is an error blamed on `owner`.
    pub fn expect_kind(&self, name: &str, owner: &str) -> Result<ItemKind, BlueprintError> {
        self.kind_of(name).ok_or_else(|| BlueprintError::UnresolvedReference {
            name:  name.to_string(),
            owner: owner.to_string(),
        })
    }

    /// Every struct field and enum payload whose declared type has the shape of
    /// `pattern`, in registry order.
    pub fn find_matches(&self, pattern: &TypePattern) -> Vec<TypeInstance> {
        let mut instances = Vec::new();

        for (item_name, item) in self.blueprint.items() {
            match item {
                Item::Struct(body) => {
                    for (field_name, field) in &body.fields {
                        if pattern.matches(&field.type_) {
                            instances.push(TypeInstance {
                                owner:  item_name.clone(),
                                member: field_name.clone(),
                                kind:   MemberKind::Field,
                            });
                        }
                    }
                }
                Item::Enum(body) => {
                    for (variant_name, variant) in &body.variants {
                        let Some(payload) = &variant.payload else { continue };
                        if pattern.matches(payload) {
                            instances.push(TypeInstance {
                                owner:  item_name.clone(),
                                member: variant_name.clone(),
                                kind:   MemberKind::Variant,
                            });
                        }
                    }
                }
            }
        }

        trace!(?pattern, matches = instances.len(), "find_matches");
        instances
    }

    /// Whether anything in the registry has the shape of `pattern`, either
    /// as a declared type or as the element type of a declared list.
    pub fn uses(&self, pattern: &TypePattern) -> bool {
        self.blueprint.items().any(|(_, item)| match item {
            Item::Struct(body) => body.fields.values().any(|field| pattern.occurs_in(&field.type_)),
            Item::Enum(body)   => body
                .variants
                .values()
                .filter_map(|variant| variant.payload.as_ref())
                .any(|payload| pattern.occurs_in(payload)),
        })
    }

    /// Whether any integer width is used.
    pub fn uses_integers(&self) -> bool {
        NumberWidth::ALL
            .iter()
            .filter(|width| !width.is_float())
            .any(|width| self.uses(&TypePattern::Number(Some(*width))))
    }

    /// Whether `f32` or `f64` is used.
    pub fn uses_floats(&self) -> bool {
        self.uses(&TypePattern::Number(Some(NumberWidth::F32)))
            || self.uses(&TypePattern::Number(Some(NumberWidth::F64)))
    }

    /// The enum variants that carry `struct_name` as their payload, one per
    /// enum. When an enum lists the struct under several variants the first
    /// declared one is kept.
    pub fn enum_memberships(&self, struct_name: &str) -> Vec<TypeInstance> {
        let mut memberships: Vec<TypeInstance> = Vec::new();

        for instance in self.find_matches(&TypePattern::reference(struct_name)) {
            if instance.kind != MemberKind::Variant {
                continue;
            }
            if memberships.iter().any(|seen| seen.owner == instance.owner) {
                continue;
            }
            memberships.push(instance);
        }

        memberships
    }

    /// Whether `name` is an enum with a payload variant. Such enums expose a
    /// conversion interface that other values can implement.
    pub fn is_convertible_enum(&self, name: &str) -> bool {
        matches!(self.resolve(name), Some(Item::Enum(body)) if body.is_tagged())
    }

    pub fn enum_body(&self, name: &str) -> Option<&'a EnumBody> {
        match self.resolve(name) {
            Some(Item::Enum(body)) => Some(body),
            _ => None,
        }
    }

    /// Checks that every reference inside `ty` resolves, blaming `owner` otherwise.
    pub fn check_refs(&self, ty: &TypeDef, owner: &str) -> Result<(), BlueprintError> {
        let mut missing = None;
        ty.for_each_ref(&mut |name| {
            if missing.is_none() && self.kind_of(name).is_none() {
                missing = Some(name.to_string());
            }
        });

        match missing {
            Some(name) => Err(BlueprintError::UnresolvedReference {
                name,
                owner: owner.to_string(),
            }),
            None => Ok(()),
        }
    }
}
