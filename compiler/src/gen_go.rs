use blueprint_schema::{EnumBody, Field, NumberWidth, StructBody, TypeDef};

use crate::{
    analyzer::Analyzer,
    case::{camel_case, pascal_case},
    error::BlueprintError,
    generator::Generator,
    traits::Language,
    types::TypePattern,
    utils::{doc_lines, quote},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoOptions {
    /// Name in the `package` clause.
    pub package: String,
}

impl Default for GoOptions {
    fn default() -> Self {
        GoOptions {
            package: "main".to_string(),
        }
    }
}

/// Go structs with builder methods.
///
/// References to other items are always pointers; other optional fields are
/// pointers to their value. Enums are structs with one pointer field per
/// variant, unit variants point at `struct{}`.
#[derive(Debug, Clone, Default)]
pub struct Golang {
    pub options: GoOptions,
}

impl Golang {
    pub fn with_options(options: GoOptions) -> Self {
        Golang { options }
    }
}

fn escape_go_keyword(s: &str) -> String {
    let keywords = [
        "break", "case", "chan", "const", "continue", "default", "defer",
        "else", "fallthrough", "for", "func", "go", "goto", "if", "import",
        "interface", "map", "package", "range", "return", "select", "struct",
        "switch", "type", "var",
    ];
    if keywords.contains(&s) {
        format!("{}_", s)
    } else {
        s.to_string()
    }
}

/// Every method receiver is named `s`, so a parameter cannot be.
fn param_name(key: &str) -> String {
    match escape_go_keyword(&camel_case(key)) {
        name if name == "s" => "s_".to_string(),
        name => name,
    }
}

fn number_type(width: NumberWidth) -> &'static str {
    match width {
        NumberWidth::U8  => "uint8",
        NumberWidth::U16 => "uint16",
        NumberWidth::U32 => "uint32",
        NumberWidth::U64 => "uint64",
        NumberWidth::I8  => "int8",
        NumberWidth::I16 => "int16",
        NumberWidth::I32 => "int32",
        NumberWidth::I64 => "int64",
        NumberWidth::F32 => "float32",
        NumberWidth::F64 => "float64",
    }
}

fn generate_doc_comment(generator: &mut Generator, description: &str) {
    for line in doc_lines(description) {
        generator.push_line(format!("// {}", line));
    }
}

fn build_type(analyzer: &Analyzer<'_>, ty: &TypeDef, owner: &str) -> Result<String, BlueprintError> {
    Ok(match ty {
        TypeDef::String           => "string".to_string(),
        TypeDef::Boolean          => "bool".to_string(),
        TypeDef::Number { width } => number_type(*width).to_string(),
        TypeDef::List { of }      => format!("[]{}", build_type(analyzer, of, owner)?),
        TypeDef::Ref { name }     => {
            analyzer.expect_kind(name, owner)?;
            format!("*{}", pascal_case(name))
        }
    })
}

/// Declared type of a field or variant slot: references are pointers already,
/// every other optional value becomes one.
fn slot_type(analyzer: &Analyzer<'_>, ty: &TypeDef, required: bool, owner: &str) -> Result<String, BlueprintError> {
    let base = build_type(analyzer, ty, owner)?;
    if required || ty.ref_name().is_some() {
        Ok(base)
    } else {
        Ok(format!("*{}", base))
    }
}

/// A function value of type `func(any, string) (T, error)` decoding `ty`.
fn build_decoder(analyzer: &Analyzer<'_>, ty: &TypeDef, owner: &str) -> Result<String, BlueprintError> {
    Ok(match ty {
        TypeDef::String           => "deserializeString".to_string(),
        TypeDef::Boolean          => "deserializeBool".to_string(),
        TypeDef::Number { width } => format!("deserializeNumber[{}]", number_type(*width)),
        TypeDef::Ref { name }     => {
            analyzer.expect_kind(name, owner)?;
            format!("{}Deserialize", pascal_case(name))
        }
        TypeDef::List { of } => format!(
            "func(item any, itemPath string) ({}, error) {{ return deserializeList(item, itemPath, {}) }}",
            build_type(analyzer, ty, owner)?,
            build_decoder(analyzer, of, owner)?
        ),
    })
}

fn build_deserializer(analyzer: &Analyzer<'_>, ty: &TypeDef, value: &str, path: &str, owner: &str) -> Result<String, BlueprintError> {
    match ty {
        TypeDef::List { of } => Ok(format!(
            "deserializeList({}, {}, {})",
            value,
            path,
            build_decoder(analyzer, of, owner)?
        )),
        _ => Ok(format!("{}({}, {})", build_decoder(analyzer, ty, owner)?, value, path)),
    }
}

/// Expression turning `value` (of the Go type of `ty`) into a generic value.
fn build_serializer(analyzer: &Analyzer<'_>, ty: &TypeDef, value: &str, owner: &str) -> Result<String, BlueprintError> {
    Ok(match ty {
        TypeDef::Ref { .. }  => format!("{}.Serialize()", value),
        TypeDef::List { of } => format!(
            "serializeList({}, func(item {}) any {{ return {} }})",
            value,
            build_type(analyzer, of, owner)?,
            build_serializer(analyzer, of, "item", owner)?
        ),
        _ => value.to_string(),
    })
}

/// `path + "/key"`.
fn child_path(key: &str) -> String {
    format!("path+{}", quote(&format!("/{}", key)))
}

/// Opening lines shared by every `…Deserialize` function. Binds `obj` unless
/// the item has no members to read.
fn generate_deserialize_prelude(generator: &mut Generator, name: &str, binds_obj: bool) -> Result<(), BlueprintError> {
    generator.push_in("if path == \"\"", |g| {
        g.push_line("path = \"#\"");
        Ok(())
    })?;
    let template = format!("failed to deserialize into '{}' at '%s'", name.replace('%', "%%"));
    generator.push_line(format!("baseErrorMessage := fmt.Sprintf({}, path)", quote(&template)));
    let check = if binds_obj {
        generator.push_line("obj, ok := value.(map[string]any)");
        "if !ok"
    } else {
        "if _, ok := value.(map[string]any); !ok"
    };
    generator.push_in(check, |g| {
        g.push_line("return nil, fmt.Errorf(\"%s: value is not an object\", baseErrorMessage)");
        Ok(())
    })?;
    generator.push_blank();
    Ok(())
}

fn generate_err_check(generator: &mut Generator) -> Result<(), BlueprintError> {
    generator.push_in("if err != nil", |g| {
        g.push_line("return nil, err");
        Ok(())
    })
}

impl Language for Golang {
    fn name(&self) -> &'static str {
        "go"
    }

    fn extension(&self) -> &'static str {
        "go"
    }

    fn generate_header(&self, generator: &mut Generator, analyzer: &Analyzer<'_>) -> Result<(), BlueprintError> {
        generator.push_line(format!("package {}", self.options.package));
        generator.push_blank();

        // Every deserializer formats its error messages.
        if analyzer.blueprint().is_empty() {
            return Ok(());
        }
        if analyzer.uses_integers() {
            generator.push_in_with("import (", ")", |g| {
                g.push_line("\"fmt\"");
                g.push_line("\"math\"");
                Ok(())
            })?;
        } else {
            generator.push_line("import \"fmt\"");
        }
        generator.push_blank();

        if analyzer.uses(&TypePattern::String) {
            generator.push_in("func deserializeString(value any, path string) (string, error)", |g| {
                g.push_line("str, ok := value.(string)");
                g.push_in("if !ok", |g| {
                    g.push_line("return \"\", fmt.Errorf(\"failed to deserialize into 'string' at '%s': value is not a string\", path)");
                    Ok(())
                })?;
                g.push_line("return str, nil");
                Ok(())
            })?;
            generator.push_blank();
        }

        if analyzer.uses(&TypePattern::any_number()) {
            generator.push_in("type number interface", |g| {
                g.push_line("~int8 | ~int16 | ~int32 | ~int64 | ~uint8 | ~uint16 | ~uint32 | ~uint64 | ~float32 | ~float64");
                Ok(())
            })?;
            generator.push_blank();
            generator.push_in("func deserializeNumber[T number](value any, path string) (T, error)", |g| {
                g.push_line("switch num := value.(type) {");
                g.push_line("case T:");
                g.indented(|g| {
                    g.push_line("return num, nil");
                    Ok(())
                })?;
                g.push_line("case float64:");
                g.indented(|g| {
                    g.push_line("converted := T(num)");
                    if !analyzer.uses_integers() {
                        g.push_line("return converted, nil");
                        return Ok(());
                    }
                    // Only integer widths truncate a half.
                    g.push_line("half := 0.5");
                    g.push_in("if T(half) != 0", |g| {
                        g.push_line("return converted, nil");
                        Ok(())
                    })?;
                    g.push_in("if num != math.Trunc(num)", |g| {
                        g.push_line("return 0, fmt.Errorf(\"failed to deserialize into 'number' at '%s': value is not an integer\", path)");
                        Ok(())
                    })?;
                    g.push_in("if float64(converted) != num", |g| {
                        g.push_line("return 0, fmt.Errorf(\"failed to deserialize into 'number' at '%s': number out of range\", path)");
                        Ok(())
                    })?;
                    g.push_line("return converted, nil");
                    Ok(())
                })?;
                g.push_line("}");
                g.push_line("return 0, fmt.Errorf(\"failed to deserialize into 'number' at '%s': value is not a number\", path)");
                Ok(())
            })?;
            generator.push_blank();
        }

        if analyzer.uses(&TypePattern::Boolean) {
            generator.push_in("func deserializeBool(value any, path string) (bool, error)", |g| {
                g.push_line("b, ok := value.(bool)");
                g.push_in("if !ok", |g| {
                    g.push_line("return false, fmt.Errorf(\"failed to deserialize into 'boolean' at '%s': value is not a boolean\", path)");
                    Ok(())
                })?;
                g.push_line("return b, nil");
                Ok(())
            })?;
            generator.push_blank();
        }

        if analyzer.uses(&TypePattern::any_list()) {
            generator.push_in(
                "func deserializeList[T any](value any, path string, deserializeItem func(any, string) (T, error)) ([]T, error)",
                |g| {
                    g.push_line("arr, ok := value.([]any)");
                    g.push_in("if !ok", |g| {
                        g.push_line("return nil, fmt.Errorf(\"failed to deserialize into 'list' at '%s': value is not an array\", path)");
                        Ok(())
                    })?;
                    g.push_blank();
                    g.push_line("result := make([]T, len(arr))");
                    g.push_in("for i, item := range arr", |g| {
                        g.push_line("deserialized, err := deserializeItem(item, fmt.Sprintf(\"%s[%d]\", path, i))");
                        generate_err_check(g)?;
                        g.push_line("result[i] = deserialized");
                        Ok(())
                    })?;
                    g.push_line("return result, nil");
                    Ok(())
                },
            )?;
            generator.push_blank();

            generator.push_in("func serializeList[T any](items []T, serializeItem func(T) any) []any", |g| {
                g.push_line("result := make([]any, len(items))");
                g.push_in("for i, item := range items", |g| {
                    g.push_line("result[i] = serializeItem(item)");
                    Ok(())
                })?;
                g.push_line("return result");
                Ok(())
            })?;
            generator.push_blank();
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
        let struct_name = pascal_case(name);
        let required: Vec<(&String, &Field)> = body.required_fields().collect();

        // Declaration
        generate_doc_comment(generator, &body.description);
        generator.push_in(&format!("type {} struct", struct_name), |g| {
            for (field_name, field) in &body.fields {
                let omitempty = if field.required { "" } else { ",omitempty" };
                generate_doc_comment(g, &field.description);
                g.push_line(format!(
                    "{} {} `json:\"{}{}\"`",
                    pascal_case(field_name),
                    slot_type(analyzer, &field.type_, field.required, name)?,
                    field_name,
                    omitempty
                ));
            }
            Ok(())
        })?;
        generator.push_blank();

        // Constructor
        let mut params = Vec::new();
        for (field_name, field) in &required {
            params.push(format!("{} {}", param_name(field_name), build_type(analyzer, &field.type_, name)?));
        }
        generator.push_line(format!("// New{} creates a {} from its required fields.", struct_name, struct_name));
        generator.push_in(&format!("func New{}({}) *{}", struct_name, params.join(", "), struct_name), |g| {
            if required.is_empty() {
                g.push_line(format!("return &{}{{}}", struct_name));
                return Ok(());
            }
            g.push_in_with(&format!("return &{}{{", struct_name), "}", |g| {
                for (field_name, _) in &required {
                    g.push_line(format!("{}: {},", pascal_case(field_name), param_name(field_name)));
                }
                Ok(())
            })
        })?;
        generator.push_blank();

        // Fluent setters
        for (field_name, field) in &body.fields {
            let go_field = pascal_case(field_name);
            let param = param_name(field_name);
            let method = format!("With{}", go_field);
            let enum_ref = field
                .type_
                .ref_name()
                .filter(|target| analyzer.is_convertible_enum(target));

            let (param_type, assigned) = match enum_ref {
                Some(target) => {
                    let enum_name = pascal_case(target);
                    (format!("Into{}", enum_name), format!("{}From({})", enum_name, param))
                }
                None => {
                    let assigned = if field.required || field.type_.ref_name().is_some() {
                        param.clone()
                    } else {
                        format!("&{}", param)
                    };
                    (build_type(analyzer, &field.type_, name)?, assigned)
                }
            };

            generate_doc_comment(generator, &field.description);
            generator.push_in(
                &format!("func (s *{}) {}({} {}) *{}", struct_name, method, param, param_type, struct_name),
                |g| {
                    g.push_line(format!("s.{} = {}", go_field, assigned));
                    g.push_line("return s");
                    Ok(())
                },
            )?;
            generator.push_blank();
        }

        // Conversions into the enums that carry this struct
        for membership in analyzer.enum_memberships(name) {
            let enum_name = pascal_case(&membership.owner);
            generator.push_line(format!("// Into{} wraps the {} in {}.{}.", enum_name, struct_name, enum_name, pascal_case(&membership.member)));
            generator.push_in(&format!("func (s *{}) Into{}() *{}", struct_name, enum_name, enum_name), |g| {
                g.push_line(format!("return {}{}(s)", enum_name, pascal_case(&membership.member)));
                Ok(())
            })?;
            generator.push_blank();
        }

        // Serialization
        generator.push_line(format!("// Serialize converts the {} into a generic map.", struct_name));
        generator.push_in(&format!("func (s *{}) Serialize() map[string]any", struct_name), |g| {
            g.push_in("if s == nil", |g| {
                g.push_line("return nil");
                Ok(())
            })?;
            g.push_line("result := make(map[string]any)");
            for (field_name, field) in &body.fields {
                let go_field = format!("s.{}", pascal_case(field_name));
                let key = quote(field_name);
                if field.required {
                    g.push_line(format!(
                        "result[{}] = {}",
                        key,
                        build_serializer(analyzer, &field.type_, &go_field, name)?
                    ));
                } else {
                    let value = if field.type_.ref_name().is_some() { go_field.clone() } else { format!("*{}", go_field) };
                    let serialized = build_serializer(analyzer, &field.type_, &value, name)?;
                    g.push_in(&format!("if {} != nil", go_field), |g| {
                        g.push_line(format!("result[{}] = {}", key, serialized));
                        Ok(())
                    })?;
                }
            }
            g.push_line("return result");
            Ok(())
        })?;
        generator.push_blank();

        // Deserialization
        generator.push_line(format!("// {}Deserialize reads a {} from a generic value.", struct_name, struct_name));
        generator.push_in(
            &format!("func {}Deserialize(value any, path string) (*{}, error)", struct_name, struct_name),
            |g| {
                generate_deserialize_prelude(g, name, !body.fields.is_empty())?;

                for (field_name, _) in &required {
                    g.push_in(&format!("if _, exists := obj[{}]; !exists", quote(field_name)), |g| {
                        g.push_line(format!(
                            "return nil, fmt.Errorf(\"%s: value does not contain required field '%s'\", baseErrorMessage, {})",
                            quote(field_name)
                        ));
                        Ok(())
                    })?;
                }

                let mut args = Vec::new();
                for (field_name, field) in &required {
                    let var = format!("{}Deserialized", camel_case(field_name));
                    g.push_line(format!(
                        "{}, err := {}",
                        var,
                        build_deserializer(
                            analyzer,
                            &field.type_,
                            &format!("obj[{}]", quote(field_name)),
                            &child_path(field_name),
                            name
                        )?
                    ));
                    generate_err_check(g)?;
                    args.push(var);
                }
                g.push_line(format!("result := New{}({})", struct_name, args.join(", ")));

                for (field_name, field) in body.optional_fields() {
                    let go_field = pascal_case(field_name);
                    let deserializer = build_deserializer(analyzer, &field.type_, "val", &child_path(field_name), name)?;
                    let assigned = if field.type_.ref_name().is_some() { "deserialized" } else { "&deserialized" };
                    g.push_in(&format!("if val, exists := obj[{}]; exists", quote(field_name)), |g| {
                        g.push_line(format!("deserialized, err := {}", deserializer));
                        generate_err_check(g)?;
                        g.push_line(format!("result.{} = {}", go_field, assigned));
                        Ok(())
                    })?;
                }
                g.push_blank();
                g.push_line("return result, nil");
                Ok(())
            },
        )?;

        Ok(())
    }

    fn generate_enum(
        &self,
        generator: &mut Generator,
        analyzer: &Analyzer<'_>,
        name: &str,
        body: &EnumBody,
    ) -> Result<(), BlueprintError> {
        let enum_name = pascal_case(name);

        // Conversion interface
        if body.is_tagged() {
            generator.push_line(format!("// Into{} is implemented by values that convert into a {}.", enum_name, enum_name));
            generator.push_in(&format!("type Into{} interface", enum_name), |g| {
                g.push_line(format!("Into{}() *{}", enum_name, enum_name));
                Ok(())
            })?;
            generator.push_blank();
        }

        // Declaration
        generate_doc_comment(generator, &body.description);
        generator.push_in(&format!("type {} struct", enum_name), |g| {
            for (variant_name, variant) in &body.variants {
                let slot = match &variant.payload {
                    Some(payload) => slot_type(analyzer, payload, false, name)?,
                    None          => "*struct{}".to_string(),
                };
                generate_doc_comment(g, &variant.description);
                g.push_line(format!("{} {} `json:\"{},omitempty\"`", pascal_case(variant_name), slot, variant_name));
            }
            Ok(())
        })?;
        generator.push_blank();

        if body.is_tagged() {
            generator.push_line(format!("// Into{} returns the {} itself.", enum_name, enum_name));
            generator.push_in(&format!("func (e *{}) Into{}() *{}", enum_name, enum_name, enum_name), |g| {
                g.push_line("return e");
                Ok(())
            })?;
            generator.push_blank();

            generator.push_line(format!("// {}From accepts a {} or anything that converts into one.", enum_name, enum_name));
            generator.push_in(&format!("func {}From(thing Into{}) *{}", enum_name, enum_name, enum_name), |g| {
                g.push_line(format!("return thing.Into{}()", enum_name));
                Ok(())
            })?;
            generator.push_blank();
        }

        // Constructors
        for (variant_name, variant) in &body.variants {
            let go_variant = pascal_case(variant_name);
            generate_doc_comment(generator, &variant.description);
            match &variant.payload {
                Some(payload) => {
                    let payload_type = build_type(analyzer, payload, name)?;
                    let slot = if payload.ref_name().is_some() { "value" } else { "&value" };
                    generator.push_in(
                        &format!("func {}{}(value {}) *{}", enum_name, go_variant, payload_type, enum_name),
                        |g| {
                            g.push_line(format!("return &{}{{{}: {}}}", enum_name, go_variant, slot));
                            Ok(())
                        },
                    )?;
                }
                None => {
                    generator.push_in(&format!("func {}{}() *{}", enum_name, go_variant, enum_name), |g| {
                        g.push_line(format!("return &{}{{{}: &struct{{}}{{}}}}", enum_name, go_variant));
                        Ok(())
                    })?;
                }
            }
            generator.push_blank();
        }

        // Serialization: the first set variant wins.
        generator.push_line(format!("// Serialize converts the {} into a single-key map.", enum_name));
        generator.push_in(&format!("func (e *{}) Serialize() map[string]any", enum_name), |g| {
            g.push_in("if e == nil", |g| {
                g.push_line("return nil");
                Ok(())
            })?;
            if !body.variants.is_empty() {
                g.push_line("switch {");
                for (variant_name, variant) in &body.variants {
                    let go_field = format!("e.{}", pascal_case(variant_name));
                    let serialized = match &variant.payload {
                        Some(payload) if payload.ref_name().is_some() => format!("{}.Serialize()", go_field),
                        Some(payload) => build_serializer(analyzer, payload, &format!("*{}", go_field), name)?,
                        None          => "map[string]any{}".to_string(),
                    };
                    g.push_line(format!("case {} != nil:", go_field));
                    g.indented(|g| {
                        g.push_line(format!("return map[string]any{{{}: {}}}", quote(variant_name), serialized));
                        Ok(())
                    })?;
                }
                g.push_line("}");
            }
            g.push_line("return map[string]any{}");
            Ok(())
        })?;
        generator.push_blank();

        // Deserialization: the first variant key present wins.
        generator.push_line(format!("// {}Deserialize reads a {} from a generic value.", enum_name, enum_name));
        generator.push_in(
            &format!("func {}Deserialize(value any, path string) (*{}, error)", enum_name, enum_name),
            |g| {
                generate_deserialize_prelude(g, name, !body.variants.is_empty())?;

                for (variant_name, variant) in &body.variants {
                    let constructor = format!("{}{}", enum_name, pascal_case(variant_name));
                    match &variant.payload {
                        Some(payload) => {
                            let deserializer = build_deserializer(analyzer, payload, "val", &child_path(variant_name), name)?;
                            g.push_in(&format!("if val, exists := obj[{}]; exists", quote(variant_name)), |g| {
                                g.push_line(format!("deserialized, err := {}", deserializer));
                                generate_err_check(g)?;
                                g.push_line(format!("return {}(deserialized), nil", constructor));
                                Ok(())
                            })?;
                        }
                        None => {
                            g.push_in(&format!("if _, exists := obj[{}]; exists", quote(variant_name)), |g| {
                                g.push_line(format!("return {}(), nil", constructor));
                                Ok(())
                            })?;
                        }
                    }
                }
                g.push_blank();
                g.push_line("return nil, fmt.Errorf(\"%s: value does not contain any recognized variants\", baseErrorMessage)");
                Ok(())
            },
        )?;

        Ok(())
    }
}
