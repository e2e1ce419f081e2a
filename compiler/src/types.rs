use blueprint_schema::{NumberWidth, TypeDef};

/// A shape to look for with [`Analyzer::find_matches`](crate::analyzer::Analyzer::find_matches).
///
/// Mirrors [`TypeDef`] with two loosenings: a number may leave its width open,
/// and `Unknown` matches any type at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypePattern {
    String,
    Number(Option<NumberWidth>),
    Boolean,
    List(Box<TypePattern>),
    Ref(String),
    Unknown,
}

impl TypePattern {
    /// Any number, whatever its width.
    pub fn any_number() -> Self {
        TypePattern::Number(None)
    }

    /// Any list, whatever its element type.
    pub fn any_list() -> Self {
        TypePattern::List(Box::new(TypePattern::Unknown))
    }

    pub fn reference(name: impl Into<String>) -> Self {
        TypePattern::Ref(name.into())
    }

    /// Whether a declared type has this shape.
    pub fn matches(&self, ty: &TypeDef) -> bool {
        match (ty, self) {
            (_, TypePattern::Unknown)                         => true,
            (TypeDef::Boolean, TypePattern::Boolean)          => true,
            (TypeDef::String, TypePattern::String)            => true,
            (TypeDef::Number { width }, TypePattern::Number(pattern)) => {
                pattern.map_or(true, |pattern| pattern == *width)
            }
            (TypeDef::List { of }, TypePattern::List(pattern)) => pattern.matches(of),
            (TypeDef::Ref { name }, TypePattern::Ref(pattern))  => name == pattern,
            _ => false,
        }
    }

    /// Whether `ty`, or any element type nested in it, has this shape.
    pub fn occurs_in(&self, ty: &TypeDef) -> bool {
        self.matches(ty) || matches!(ty, TypeDef::List { of } if self.occurs_in(of))
    }
}

impl From<&TypeDef> for TypePattern {
    fn from(ty: &TypeDef) -> Self {
        match ty {
            TypeDef::String            => TypePattern::String,
            TypeDef::Number { width }  => TypePattern::Number(Some(*width)),
            TypeDef::Boolean           => TypePattern::Boolean,
            TypeDef::List { of }       => TypePattern::List(Box::new(TypePattern::from(of.as_ref()))),
            TypeDef::Ref { name }      => TypePattern::Ref(name.clone()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    Field,
    Variant,
}

/// One place in the registry whose declared type matched a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeInstance {
    /// The struct or enum that declares the member.
    pub owner:  String,
    /// The field or variant name.
    pub member: String,
    pub kind:   MemberKind,
}
