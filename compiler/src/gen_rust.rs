use blueprint_schema::{EnumBody, Field, NumberWidth, StructBody, TypeDef};

use crate::{
    analyzer::Analyzer,
    case::{pascal_case, snake_case},
    error::BlueprintError,
    generator::Generator,
    traits::Language,
    types::TypePattern,
    utils::{doc_lines, quote},
};

/// Rust structs and enums over `serde_json::Value`.
///
/// The generated file expects `serde_json` as a dependency and can be pulled
/// into a module with `include!`. Optional fields are `Option<T>`; enum
/// variants are real enum variants.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rust;

fn escape_rust_keyword(s: &str) -> String {
    let keywords = [
        "as", "async", "await", "break", "const", "continue", "crate", "dyn",
        "else", "enum", "extern", "false", "fn", "for", "if", "impl", "in",
        "let", "loop", "match", "mod", "move", "mut", "pub", "ref", "return",
        "self", "Self", "static", "struct", "super", "trait", "true", "type",
        "unsafe", "use", "where", "while", "abstract", "become", "box", "do",
        "final", "macro", "override", "priv", "try", "typeof", "unsized",
        "virtual", "yield",
    ];
    if keywords.contains(&s) {
        format!("{}_", s)
    } else {
        s.to_string()
    }
}

/// A type or variant identifier, e.g. `SomeStruct`.
fn type_ident(name: &str) -> String {
    escape_rust_keyword(&pascal_case(name))
}

fn field_name(key: &str) -> String {
    escape_rust_keyword(&snake_case(key))
}

fn number_type(width: NumberWidth) -> &'static str {
    match width {
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

/// Name of the conversion trait of an enum, e.g. `IntoSomeEnum`.
fn into_trait(enum_name: &str) -> String {
    format!("Into{}", pascal_case(enum_name))
}

/// Method of the conversion trait, e.g. `into_some_enum`.
fn into_method(enum_name: &str) -> String {
    format!("into_{}", snake_case(enum_name))
}

fn generate_doc_comment(generator: &mut Generator, description: &str) {
    for line in doc_lines(description) {
        if line.is_empty() {
            generator.push_line("///");
        } else {
            generator.push_line(format!("/// {}", line));
        }
    }
}

fn build_type(analyzer: &Analyzer<'_>, ty: &TypeDef, owner: &str) -> Result<String, BlueprintError> {
    Ok(match ty {
        TypeDef::String           => "String".to_string(),
        TypeDef::Boolean          => "bool".to_string(),
        TypeDef::Number { width } => number_type(*width).to_string(),
        TypeDef::List { of }      => format!("Vec<{}>", build_type(analyzer, of, owner)?),
        TypeDef::Ref { name }     => {
            analyzer.expect_kind(name, owner)?;
            type_ident(name)
        }
    })
}

/// Expression producing a `Value` from `place`. When `by_ref` is set `place`
/// is a `&T`, otherwise it names a `T` that must not be moved out of.
fn build_serializer(ty: &TypeDef, place: &str, by_ref: bool) -> String {
    let copied = if by_ref { format!("*{}", place) } else { place.to_string() };
    match ty {
        TypeDef::String        => format!("Value::String({}.clone())", place),
        TypeDef::Number { .. } => format!("Value::from({})", copied),
        TypeDef::Boolean       => format!("Value::Bool({})", copied),
        TypeDef::Ref { .. }    => format!("{}.serialize()", place),
        TypeDef::List { of }   => format!(
            "Value::Array({}.iter().map(|item| {}).collect())",
            place,
            build_serializer(of, "item", true)
        ),
    }
}

/// Expression of type `Result<T, String>` reading `value` (a `&Value`).
fn build_deserializer(analyzer: &Analyzer<'_>, ty: &TypeDef, value: &str, path: &str, owner: &str) -> Result<String, BlueprintError> {
    Ok(match ty {
        TypeDef::String  => format!("deserialize_string({}, {})", value, path),
        TypeDef::Boolean => format!("deserialize_bool({}, {})", value, path),
        TypeDef::Number { width: NumberWidth::F64 } => format!("deserialize_float({}, {})", value, path),
        TypeDef::Number { width: NumberWidth::F32 } => {
            format!("deserialize_float({}, {}).map(|n| n as f32)", value, path)
        }
        TypeDef::Number { width } => {
            format!("deserialize_integer::<{}>({}, {})", number_type(*width), value, path)
        }
        TypeDef::Ref { name } => {
            analyzer.expect_kind(name, owner)?;
            format!("{}::deserialize({}, {})", type_ident(name), value, path)
        }
        TypeDef::List { of } => format!(
            "deserialize_list({}, {}, |item, item_path| {})",
            value,
            path,
            build_deserializer(analyzer, of, "item", "item_path", owner)?
        ),
    })
}

/// Doubles braces so `text` reads literally inside a `format!` string.
fn escape_braces(text: &str) -> String {
    text.replace('{', "{{").replace('}', "}}")
}

fn child_path(key: &str) -> String {
    format!("&format!({}, path)", quote(&format!("{{}}/{}", escape_braces(key))))
}

fn base_error_message(generator: &mut Generator, name: &str) {
    let template = format!("failed to deserialize into '{}' at '{{}}'", escape_braces(name));
    generator.push_line(format!("let base_error_message = format!({}, path);", quote(&template)));
}

fn not_an_object(generator: &mut Generator, binds_obj: bool) -> Result<(), BlueprintError> {
    if binds_obj {
        generator.push_in_with("let Some(obj) = value.as_object() else {", "};", |g| {
            g.push_line("return Err(format!(\"{}: value is not an object\", base_error_message));");
            Ok(())
        })
    } else {
        generator.push_in("if !value.is_object()", |g| {
            g.push_line("return Err(format!(\"{}: value is not an object\", base_error_message));");
            Ok(())
        })
    }
}

impl Language for Rust {
    fn name(&self) -> &'static str {
        "rust"
    }

    fn extension(&self) -> &'static str {
        "rs"
    }

    fn indent(&self) -> &'static str {
        "    "
    }

    fn generate_header(&self, generator: &mut Generator, analyzer: &Analyzer<'_>) -> Result<(), BlueprintError> {
        if analyzer.blueprint().is_empty() {
            return Ok(());
        }
        generator.push_line("use serde_json::{Map, Value};");

        if analyzer.uses(&TypePattern::String) {
            generator.push_blank();
            generator.push_in("fn deserialize_string(value: &Value, path: &str) -> Result<String, String>", |g| {
                g.push_in("match value.as_str()", |g| {
                    g.push_line("Some(s) => Ok(s.to_string()),");
                    g.push_line("None => Err(format!(\"failed to deserialize into 'string' at '{}': value is not a string\", path)),");
                    Ok(())
                })
            })?;
        }

        if analyzer.uses_integers() {
            generator.push_blank();
            generator.push_in("fn deserialize_integer<T: TryFrom<i128>>(value: &Value, path: &str) -> Result<T, String>", |g| {
                g.push_in_with(
                    "let Some(number) = value.as_i64().map(i128::from).or_else(|| value.as_u64().map(i128::from)) else {",
                    "};",
                    |g| {
                        g.push_line("return Err(format!(\"failed to deserialize into 'number' at '{}': value is not an integer\", path));");
                        Ok(())
                    },
                )?;
                g.push_line("T::try_from(number).map_err(|_| format!(\"failed to deserialize into 'number' at '{}': number out of range\", path))");
                Ok(())
            })?;
        }

        if analyzer.uses_floats() {
            generator.push_blank();
            generator.push_in("fn deserialize_float(value: &Value, path: &str) -> Result<f64, String>", |g| {
                g.push_line("value");
                g.indented(|g| {
                    g.push_line(".as_f64()");
                    g.push_line(".ok_or_else(|| format!(\"failed to deserialize into 'number' at '{}': value is not a number\", path))");
                    Ok(())
                })
            })?;
        }

        if analyzer.uses(&TypePattern::Boolean) {
            generator.push_blank();
            generator.push_in("fn deserialize_bool(value: &Value, path: &str) -> Result<bool, String>", |g| {
                g.push_in("match value.as_bool()", |g| {
                    g.push_line("Some(b) => Ok(b),");
                    g.push_line("None => Err(format!(\"failed to deserialize into 'boolean' at '{}': value is not a boolean\", path)),");
                    Ok(())
                })
            })?;
        }

        if analyzer.uses(&TypePattern::any_list()) {
            generator.push_blank();
            generator.push_line("fn deserialize_list<T, F>(value: &Value, path: &str, deserialize_item: F) -> Result<Vec<T>, String>");
            generator.push_line("where");
            generator.indented(|g| {
                g.push_line("F: Fn(&Value, &str) -> Result<T, String>,");
                Ok(())
            })?;
            generator.push_in("", |g| {
                g.push_in_with("let Some(items) = value.as_array() else {", "};", |g| {
                    g.push_line("return Err(format!(\"failed to deserialize into 'list' at '{}': value is not an array\", path));");
                    Ok(())
                })?;
                g.push_line("items");
                g.indented(|g| {
                    g.push_line(".iter()");
                    g.push_line(".enumerate()");
                    g.push_line(".map(|(index, item)| deserialize_item(item, &format!(\"{}[{}]\", path, index)))");
                    g.push_line(".collect()");
                    Ok(())
                })
            })?;
        }

        Ok(())
    }

    fn generate_struct(
        &self,
        generator: &mut Generator,
        analyzer: &Analyzer<'_>,
        name: &str,
        body: &StructBody,
    ) -> Result<(), BlueprintError> {
        let struct_name = type_ident(name);
        let required: Vec<(&String, &Field)> = body.required_fields().collect();
        let has_optional = body.optional_fields().next().is_some();

        // Declaration
        generate_doc_comment(generator, &body.description);
        if required.is_empty() {
            generator.push_line("#[derive(Debug, Clone, Default, PartialEq)]");
        } else {
            generator.push_line("#[derive(Debug, Clone, PartialEq)]");
        }
        generator.push_in(&format!("pub struct {}", struct_name), |g| {
            for (key, field) in &body.fields {
                let ty = build_type(analyzer, &field.type_, name)?;
                let ty = if field.required { ty } else { format!("Option<{}>", ty) };
                generate_doc_comment(g, &field.description);
                g.push_line(format!("pub {}: {},", field_name(key), ty));
            }
            Ok(())
        })?;
        generator.push_blank();

        generator.push_in(&format!("impl {}", struct_name), |g| {
            // Constructor
            let mut params = Vec::new();
            for (key, field) in &required {
                params.push(format!("{}: {}", field_name(key), build_type(analyzer, &field.type_, name)?));
            }
            g.push_line(format!("/// Creates a [`{}`] from its required fields.", struct_name));
            g.push_in(&format!("pub fn new({}) -> Self", params.join(", ")), |g| {
                if required.is_empty() {
                    g.push_line("Self::default()");
                    return Ok(());
                }
                g.push_in("Self", |g| {
                    for (key, field) in &body.fields {
                        if field.required {
                            g.push_line(format!("{},", field_name(key)));
                        } else {
                            g.push_line(format!("{}: None,", field_name(key)));
                        }
                    }
                    Ok(())
                })
            })?;

            // Fluent setters
            for (key, field) in &body.fields {
                let rust_field = field_name(key);
                let enum_ref = field
                    .type_
                    .ref_name()
                    .filter(|target| analyzer.is_convertible_enum(target));

                let (param_type, assigned) = match enum_ref {
                    Some(target) => (
                        format!("impl {}", into_trait(target)),
                        format!("{}::from({})", type_ident(target), rust_field),
                    ),
                    None => (build_type(analyzer, &field.type_, name)?, rust_field.clone()),
                };
                let assigned = if field.required { assigned } else { format!("Some({})", assigned) };

                g.push_blank();
                generate_doc_comment(g, &field.description);
                g.push_in(
                    &format!("pub fn with_{}(mut self, {}: {}) -> Self", snake_case(key), rust_field, param_type),
                    |g| {
                        g.push_line(format!("self.{} = {};", rust_field, assigned));
                        g.push_line("self");
                        Ok(())
                    },
                )?;
            }

            // Serialization
            g.push_blank();
            g.push_line("/// Converts into a JSON object keyed by the declared field names.");
            g.push_in("pub fn serialize(&self) -> Value", |g| {
                if body.fields.is_empty() {
                    g.push_line("Value::Object(Map::new())");
                    return Ok(());
                }
                g.push_line("let mut map = Map::new();");
                for (key, field) in &body.fields {
                    let rust_field = field_name(key);
                    if field.required {
                        g.push_line(format!(
                            "map.insert({}.to_string(), {});",
                            quote(key),
                            build_serializer(&field.type_, &format!("self.{}", rust_field), false)
                        ));
                    } else {
                        g.push_in(&format!("if let Some(value) = &self.{}", rust_field), |g| {
                            g.push_line(format!(
                                "map.insert({}.to_string(), {});",
                                quote(key),
                                build_serializer(&field.type_, "value", true)
                            ));
                            Ok(())
                        })?;
                    }
                }
                g.push_line("Value::Object(map)");
                Ok(())
            })?;

            // Deserialization
            g.push_blank();
            g.push_line("/// Reads a JSON object, reporting the first problem found with its path.");
            g.push_in("pub fn deserialize(value: &Value, path: &str) -> Result<Self, String>", |g| {
                base_error_message(g, name);
                not_an_object(g, !body.fields.is_empty())?;
                g.push_blank();

                let mut args = Vec::new();
                for (key, field) in &required {
                    let binding = format!("field_{}", snake_case(key));
                    g.push_in_with(&format!("let Some({}) = obj.get({}) else {{", binding, quote(key)), "};", |g| {
                        g.push_line(format!(
                            "return Err(format!(\"{{}}: value does not contain required field '{{}}'\", base_error_message, {}));",
                            quote(key)
                        ));
                        Ok(())
                    })?;
                    args.push(format!(
                        "{}?",
                        build_deserializer(analyzer, &field.type_, &binding, &child_path(key), name)?
                    ));
                }

                let binding = if has_optional { "let mut result" } else { "let result" };
                if args.is_empty() {
                    g.push_line(format!("{} = Self::new();", binding));
                } else {
                    g.push_in_with(&format!("{} = Self::new(", binding), ");", |g| {
                        for arg in &args {
                            g.push_line(format!("{},", arg));
                        }
                        Ok(())
                    })?;
                }

                for (key, field) in body.optional_fields() {
                    let deserializer = build_deserializer(analyzer, &field.type_, "value", &child_path(key), name)?;
                    g.push_in(&format!("if let Some(value) = obj.get({})", quote(key)), |g| {
                        g.push_line(format!("result.{} = Some({}?);", field_name(key), deserializer));
                        Ok(())
                    })?;
                }
                g.push_line("Ok(result)");
                Ok(())
            })
        })?;

        // Conversions into the enums that carry this struct
        for membership in analyzer.enum_memberships(name) {
            generator.push_blank();
            generator.push_in(&format!("impl {} for {}", into_trait(&membership.owner), struct_name), |g| {
                g.push_in(
                    &format!("fn {}(self) -> {}", into_method(&membership.owner), type_ident(&membership.owner)),
                    |g| {
                        g.push_line(format!(
                            "{}::{}(self)",
                            type_ident(&membership.owner),
                            type_ident(&membership.member)
                        ));
                        Ok(())
                    },
                )
            })?;
        }

        Ok(())
    }

    fn generate_enum(
        &self,
        generator: &mut Generator,
        analyzer: &Analyzer<'_>,
        name: &str,
        body: &EnumBody,
    ) -> Result<(), BlueprintError> {
        let enum_name = type_ident(name);

        // Conversion trait
        if body.is_tagged() {
            generator.push_line(format!("/// Implemented by values that convert into a [`{}`].", enum_name));
            generator.push_in(&format!("pub trait {}", into_trait(name)), |g| {
                g.push_line(format!("fn {}(self) -> {};", into_method(name), enum_name));
                Ok(())
            })?;
            generator.push_blank();
        }

        // Declaration
        generate_doc_comment(generator, &body.description);
        generator.push_line("#[derive(Debug, Clone, PartialEq)]");
        generator.push_in(&format!("pub enum {}", enum_name), |g| {
            for (key, variant) in &body.variants {
                generate_doc_comment(g, &variant.description);
                match &variant.payload {
                    Some(payload) => g.push_line(format!(
                        "{}({}),",
                        type_ident(key),
                        build_type(analyzer, payload, name)?
                    )),
                    None => g.push_line(format!("{},", type_ident(key))),
                }
            }
            Ok(())
        })?;
        generator.push_blank();

        if body.is_tagged() {
            generator.push_in(&format!("impl {} for {}", into_trait(name), enum_name), |g| {
                g.push_in(&format!("fn {}(self) -> {}", into_method(name), enum_name), |g| {
                    g.push_line("self");
                    Ok(())
                })
            })?;
            generator.push_blank();
        }

        generator.push_in(&format!("impl {}", enum_name), |g| {
            let mut first = true;
            let mut separate = |g: &mut Generator| {
                if !first {
                    g.push_blank();
                }
                first = false;
            };

            if body.is_tagged() {
                separate(g);
                g.push_line(format!("/// Accepts a [`{}`] or anything that converts into one.", enum_name));
                g.push_line("#[allow(clippy::should_implement_trait)]");
                g.push_in(&format!("pub fn from<T: {}>(thing: T) -> Self", into_trait(name)), |g| {
                    g.push_line(format!("thing.{}()", into_method(name)));
                    Ok(())
                })?;
            }

            // Constructors
            for (key, variant) in &body.variants {
                separate(g);
                generate_doc_comment(g, &variant.description);
                let constructor = escape_rust_keyword(&snake_case(key));
                match &variant.payload {
                    Some(payload) => {
                        let payload_type = build_type(analyzer, payload, name)?;
                        g.push_in(&format!("pub fn {}(value: {}) -> Self", constructor, payload_type), |g| {
                            g.push_line(format!("Self::{}(value)", type_ident(key)));
                            Ok(())
                        })?;
                    }
                    None => {
                        g.push_in(&format!("pub fn {}() -> Self", constructor), |g| {
                            g.push_line(format!("Self::{}", type_ident(key)));
                            Ok(())
                        })?;
                    }
                }
            }

            // Serialization
            separate(g);
            g.push_line("/// Converts into a JSON object with the variant name as its only key.");
            g.push_in("pub fn serialize(&self) -> Value", |g| {
                if body.variants.is_empty() {
                    g.push_line("match *self {}");
                    return Ok(());
                }
                g.push_line("let mut map = Map::new();");
                g.push_in("match self", |g| {
                    for (key, variant) in &body.variants {
                        let (pattern, serialized) = match &variant.payload {
                            Some(payload) => (
                                format!("Self::{}(value)", type_ident(key)),
                                build_serializer(payload, "value", true),
                            ),
                            None => (format!("Self::{}", type_ident(key)), "Value::Object(Map::new())".to_string()),
                        };
                        g.push_in(&format!("{} =>", pattern), |g| {
                            g.push_line(format!("map.insert({}.to_string(), {});", quote(key), serialized));
                            Ok(())
                        })?;
                    }
                    Ok(())
                })?;
                g.push_line("Value::Object(map)");
                Ok(())
            })?;

            // Deserialization: the first variant key present wins.
            separate(g);
            g.push_line("/// Reads a JSON object holding one of the variant names.");
            g.push_in("pub fn deserialize(value: &Value, path: &str) -> Result<Self, String>", |g| {
                base_error_message(g, name);
                not_an_object(g, !body.variants.is_empty())?;
                g.push_blank();

                for (key, variant) in &body.variants {
                    match &variant.payload {
                        Some(payload) => {
                            let deserializer = build_deserializer(analyzer, payload, "value", &child_path(key), name)?;
                            g.push_in(&format!("if let Some(value) = obj.get({})", quote(key)), |g| {
                                g.push_line(format!("return Ok(Self::{}({}?));", type_ident(key), deserializer));
                                Ok(())
                            })?;
                        }
                        None => {
                            g.push_in(&format!("if obj.contains_key({})", quote(key)), |g| {
                                g.push_line(format!("return Ok(Self::{});", type_ident(key)));
                                Ok(())
                            })?;
                        }
                    }
                }
                g.push_line("Err(format!(\"{}: value does not contain any recognized variants\", base_error_message))");
                Ok(())
            })
        })?;

        Ok(())
    }
}
