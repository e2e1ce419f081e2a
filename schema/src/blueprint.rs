use indexmap::IndexMap;
use serde::Serialize;

use crate::types::{EnumBody, Item, NumberWidth, StructBody, TypeDef};

/// The item registry. Items are kept in declaration order, which is also the
/// order they are emitted in.
///
/// Declaring a name twice replaces the earlier body but keeps its position.
/// Such names are remembered in [`Blueprint::redeclared`] so a strict caller can
/// reject them before generating code.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Blueprint {
    items:      IndexMap<String, Item>,
    #[serde(skip)]
    redeclared: Vec<String>,
}

impl Blueprint {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn string(&self) -> TypeDef {
        TypeDef::String
    }

    pub fn number(&self, width: NumberWidth) -> TypeDef {
        TypeDef::Number { width }
    }

    /// A number of the default width (`i32`).
    pub fn default_number(&self) -> TypeDef {
        self.number(NumberWidth::default())
    }

    pub fn boolean(&self) -> TypeDef {
        TypeDef::Boolean
    }

    pub fn list(&self, of: TypeDef) -> TypeDef {
        TypeDef::list(of)
    }

    /// Registers a struct and returns a reference to it.
    pub fn struct_(&mut self, name: &str, body: StructBody) -> TypeDef {
        self.insert(name, Item::Struct(body))
    }

    /// Registers an enum and returns a reference to it.
    pub fn enum_(&mut self, name: &str, body: EnumBody) -> TypeDef {
        self.insert(name, Item::Enum(body))
    }

    fn insert(&mut self, name: &str, item: Item) -> TypeDef {
        if self.items.insert(name.to_string(), item).is_some() {
            self.redeclared.push(name.to_string());
        }
        TypeDef::reference(name)
    }

    pub fn get(&self, name: &str) -> Option<&Item> {
        self.items.get(name)
    }

    pub fn items(&self) -> impl Iterator<Item = (&String, &Item)> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Names that were declared more than once, in the order the repeats happened.
    pub fn redeclared(&self) -> &[String] {
        &self.redeclared
    }
}
