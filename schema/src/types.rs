use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// Width of a numeric field. Every backend maps each width onto its closest
/// native type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberWidth {
    U8,
    U16,
    U32,
    U64,
    I8,
    I16,
    #[default]
    I32,
    I64,
    F32,
    F64,
}

impl NumberWidth {
    pub const ALL: [NumberWidth; 10] = [
        NumberWidth::U8,
        NumberWidth::U16,
        NumberWidth::U32,
        NumberWidth::U64,
        NumberWidth::I8,
        NumberWidth::I16,
        NumberWidth::I32,
        NumberWidth::I64,
        NumberWidth::F32,
        NumberWidth::F64,
    ];

    pub fn is_float(self) -> bool {
        matches!(self, NumberWidth::F32 | NumberWidth::F64)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NumberWidth::U8  => "u8",
            NumberWidth::U16 => "u16",
            NumberWidth::U32 => "u32",
            NumberWidth::U64 => "u64",
            NumberWidth::I8  => "i8",
            NumberWidth::I16 => "i16",
            NumberWidth::I32 => "i32",
            NumberWidth::I64 => "i64",
            NumberWidth::F32 => "f32",
            NumberWidth::F64 => "f64",
        }
    }
}

impl fmt::Display for NumberWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The type of a struct field or an enum payload.
///
/// `Ref` is late bound: the name is only looked up when code is generated, so
/// an item may reference another one that is declared after it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TypeDef {
    String,
    Number { width: NumberWidth },
    Boolean,
    List { of: Box<TypeDef> },
    Ref { name: String },
}

impl TypeDef {
    pub fn list(of: TypeDef) -> Self {
        TypeDef::List { of: Box::new(of) }
    }

    pub fn reference(name: impl Into<String>) -> Self {
        TypeDef::Ref { name: name.into() }
    }

    /// Name of the referenced item, if this is a reference.
    pub fn ref_name(&self) -> Option<&str> {
        match self {
            TypeDef::Ref { name } => Some(name),
            _ => None,
        }
    }

    /// Calls `visit` with every reference name reachable from this type,
    /// looking through lists.
    pub fn for_each_ref<'a>(&'a self, visit: &mut dyn FnMut(&'a str)) {
        match self {
            TypeDef::Ref { name } => visit(name),
            TypeDef::List { of } => of.for_each_ref(visit),
            TypeDef::String | TypeDef::Number { .. } | TypeDef::Boolean => {}
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    pub description: String,
    #[serde(rename = "type")]
    pub type_:       TypeDef,
    pub required:    bool,
}

impl Field {
    /// An optional field. Chain [`Field::required`] to make it mandatory.
    pub fn new(description: impl Into<String>, type_: TypeDef) -> Self {
        Field {
            description: description.into(),
            type_,
            required: false,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Variant {
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload:     Option<TypeDef>,
}

impl Variant {
    pub fn unit(description: impl Into<String>) -> Self {
        Variant {
            description: description.into(),
            payload:     None,
        }
    }

    pub fn with_payload(description: impl Into<String>, payload: TypeDef) -> Self {
        Variant {
            description: description.into(),
            payload:     Some(payload),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct StructBody {
    pub description: String,
    pub fields:      IndexMap<String, Field>,
}

impl StructBody {
    pub fn new(description: impl Into<String>) -> Self {
        StructBody {
            description: description.into(),
            fields:      IndexMap::new(),
        }
    }

    pub fn field(mut self, name: impl Into<String>, field: Field) -> Self {
        self.fields.insert(name.into(), field);
        self
    }

    /// Required fields, in declaration order.
    pub fn required_fields(&self) -> impl Iterator<Item = (&String, &Field)> {
        self.fields.iter().filter(|(_, field)| field.required)
    }

    /// Optional fields, in declaration order.
    pub fn optional_fields(&self) -> impl Iterator<Item = (&String, &Field)> {
        self.fields.iter().filter(|(_, field)| !field.required)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct EnumBody {
    pub description: String,
    pub variants:    IndexMap<String, Variant>,
}

impl EnumBody {
    pub fn new(description: impl Into<String>) -> Self {
        EnumBody {
            description: description.into(),
            variants:    IndexMap::new(),
        }
    }

    pub fn variant(mut self, name: impl Into<String>, variant: Variant) -> Self {
        self.variants.insert(name.into(), variant);
        self
    }

    /// An enum is tagged when at least one variant carries a payload.
    pub fn is_tagged(&self) -> bool {
        self.variants.values().any(|variant| variant.payload.is_some())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Struct,
    Enum,
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemKind::Struct => f.write_str("struct"),
            ItemKind::Enum   => f.write_str("enum"),
        }
    }
}

/// A named entry of the registry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Item {
    Struct(StructBody),
    Enum(EnumBody),
}

impl Item {
    pub fn kind(&self) -> ItemKind {
        match self {
            Item::Struct(_) => ItemKind::Struct,
            Item::Enum(_)   => ItemKind::Enum,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Item::Struct(body) => &body.description,
            Item::Enum(body)   => &body.description,
        }
    }
}
