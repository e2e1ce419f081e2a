use blueprint_schema::{EnumBody, NumberWidth, StructBody, TypeDef};

use crate::{
    analyzer::Analyzer,
    case::{camel_case, pascal_case},
    error::BlueprintError,
    generator::Generator,
    traits::Language,
    types::TypePattern,
    utils::{doc_lines, is_identifier, quote},
};

/// TypeScript classes.
///
/// Optional members are declared `name?: T`. Enums are classes with one
/// optional member per variant; unit variants hold `{}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeScript;

/// Words that cannot name a parameter.
fn escape_ts_keyword(s: &str) -> String {
    let keywords = [
        "break", "case", "catch", "class", "const", "continue", "debugger",
        "default", "delete", "do", "else", "enum", "export", "extends",
        "false", "finally", "for", "function", "if", "implements", "import",
        "in", "instanceof", "interface", "let", "new", "null", "package",
        "private", "protected", "public", "return", "static", "super",
        "switch", "this", "throw", "true", "try", "typeof", "var", "void",
        "while", "with", "yield",
    ];
    if keywords.contains(&s) {
        format!("{}_", s)
    } else {
        s.to_string()
    }
}

/// `object.key`, or `object["key"]` when the key is not an identifier.
fn member(object: &str, key: &str) -> String {
    if is_identifier(key) {
        format!("{}.{}", object, key)
    } else {
        format!("{}[{}]", object, quote(key))
    }
}

fn param_name(key: &str) -> String {
    escape_ts_keyword(&camel_case(key))
}

fn generate_doc_comment(generator: &mut Generator, description: &str) {
    let lines = doc_lines(description);
    match lines.as_slice() {
        []     => {}
        [line] => generator.push_line(format!("/** {} */", line)),
        _ => {
            generator.push_line("/**");
            for line in &lines {
                generator.push_line(format!(" * {}", line).trim_end());
            }
            generator.push_line(" */");
        }
    }
}

fn build_type(analyzer: &Analyzer<'_>, ty: &TypeDef, owner: &str) -> Result<String, BlueprintError> {
    Ok(match ty {
        TypeDef::String        => "string".to_string(),
        TypeDef::Number { .. } => "number".to_string(),
        TypeDef::Boolean       => "boolean".to_string(),
        TypeDef::List { of }   => format!("{}[]", build_type(analyzer, of, owner)?),
        TypeDef::Ref { name }  => {
            analyzer.expect_kind(name, owner)?;
            pascal_case(name)
        }
    })
}

/// Whether serializing `ty` needs more than passing the value through.
fn has_refs(ty: &TypeDef) -> bool {
    let mut found = false;
    ty.for_each_ref(&mut |_| found = true);
    found
}

fn build_serializer(ty: &TypeDef, value: &str) -> String {
    match ty {
        TypeDef::Ref { .. }             => format!("{}.serialize()", value),
        TypeDef::List { of } if has_refs(of) => {
            format!("{}.map(item => {})", value, build_serializer(of, "item"))
        }
        _ => value.to_string(),
    }
}

fn build_deserializer(analyzer: &Analyzer<'_>, ty: &TypeDef, value: &str, path: &str, owner: &str) -> Result<String, BlueprintError> {
    Ok(match ty {
        TypeDef::String        => format!("deserializeString({}, {})", value, path),
        TypeDef::Number { width } => match integer_bounds(*width) {
            Some((min, max)) => format!("deserializeInteger({}, {}, {}, {})", value, path, min, max),
            None             => format!("deserializeNumber({}, {})", value, path),
        },
        TypeDef::Boolean       => format!("deserializeBool({}, {})", value, path),
        TypeDef::Ref { name }  => {
            analyzer.expect_kind(name, owner)?;
            format!("{}.deserialize({}, {})", pascal_case(name), value, path)
        }
        TypeDef::List { of } => {
            let item = build_deserializer(analyzer, of, "item", "itemPath", owner)?;
            format!("deserializeList({}, {}, (item, itemPath) => {})", value, path, item)
        }
    })
}

/// The range a JavaScript number must fall in to fit `width`, or `None`
/// for the float widths.
fn integer_bounds(width: NumberWidth) -> Option<(&'static str, &'static str)> {
    match width {
        NumberWidth::U8  => Some(("0", "255")),
        NumberWidth::U16 => Some(("0", "65535")),
        NumberWidth::U32 => Some(("0", "4294967295")),
        NumberWidth::U64 => Some(("0", "Number.MAX_SAFE_INTEGER")),
        NumberWidth::I8  => Some(("-128", "127")),
        NumberWidth::I16 => Some(("-32768", "32767")),
        NumberWidth::I32 => Some(("-2147483648", "2147483647")),
        NumberWidth::I64 => Some(("Number.MIN_SAFE_INTEGER", "Number.MAX_SAFE_INTEGER")),
        NumberWidth::F32 | NumberWidth::F64 => None,
    }
}

/// Escapes text for the inside of a template literal.
fn escape_template(text: &str) -> String {
    text.replace('\\', "\\\\").replace('`', "\\`").replace("${", "\\${")
}

/// Template literal for the path of a member below `path`.
fn child_path(key: &str) -> String {
    format!("`${{path}}/{}`", escape_template(key))
}

fn generate_base_error(generator: &mut Generator, name: &str) {
    generator.push_line(format!(
        "const baseErrorMessage = `failed to deserialize into '{}' at '${{path}}'`",
        escape_template(name)
    ));
    generator.push_line(
        "if (!value || typeof value !== 'object' || Array.isArray(value)) throw new Error(`${baseErrorMessage}: value is not an object`)",
    );
    generator.push_blank();
}

impl Language for TypeScript {
    fn name(&self) -> &'static str {
        "typescript"
    }

    fn extension(&self) -> &'static str {
        "ts"
    }

    fn generate_header(&self, generator: &mut Generator, analyzer: &Analyzer<'_>) -> Result<(), BlueprintError> {
        let scalars = [
            (analyzer.uses(&TypePattern::String), "deserializeString", "string", "string", "a string"),
            (analyzer.uses_floats(), "deserializeNumber", "number", "number", "a number"),
            (analyzer.uses(&TypePattern::Boolean), "deserializeBool", "boolean", "boolean", "a boolean"),
        ];

        for (used, function, ts_type, label, article) in scalars {
            if !used {
                continue;
            }
            generator.push_in(&format!("function {}(value: unknown, path: string): {}", function, ts_type), |g| {
                g.push_line(format!(
                    "if (typeof value !== '{}') throw new Error(`failed to deserialize into '{}' at '${{path}}': value is not {}`)",
                    ts_type, label, article
                ));
                g.push_blank();
                g.push_line("return value");
                Ok(())
            })?;
            generator.push_blank();
        }

        if analyzer.uses_integers() {
            generator.push_in(
                "function deserializeInteger(value: unknown, path: string, min: number, max: number): number",
                |g| {
                    g.push_line("if (typeof value !== 'number') throw new Error(`failed to deserialize into 'number' at '${path}': value is not a number`)");
                    g.push_line("if (!Number.isInteger(value)) throw new Error(`failed to deserialize into 'number' at '${path}': value is not an integer`)");
                    g.push_line("if (value < min || value > max) throw new Error(`failed to deserialize into 'number' at '${path}': number out of range`)");
                    g.push_blank();
                    g.push_line("return value");
                    Ok(())
                },
            )?;
            generator.push_blank();
        }

        if analyzer.uses(&TypePattern::any_list()) {
            generator.push_in(
                "function deserializeList<T>(value: unknown, path: string, deserializeItem: (item: unknown, itemPath: string) => T): T[]",
                |g| {
                    g.push_line("if (!Array.isArray(value)) throw new Error(`failed to deserialize into 'list' at '${path}': value is not an array`)");
                    g.push_blank();
                    g.push_line("return value.map((item, index) => deserializeItem(item, `${path}[${index}]`))");
                    Ok(())
                },
            )?;
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
        let class_name = pascal_case(name);
        let memberships = analyzer.enum_memberships(name);

        let mut params = Vec::new();
        for (field_name, field) in body.required_fields() {
            params.push(format!("{}: {}", param_name(field_name), build_type(analyzer, &field.type_, name)?));
        }
        let params = params.join(", ");

        let implements: Vec<String> = memberships
            .iter()
            .map(|m| format!("Into{}", pascal_case(&m.owner)))
            .collect();
        let implements_clause = if implements.is_empty() {
            String::new()
        } else {
            format!(" implements {}", implements.join(", "))
        };

        generate_doc_comment(generator, &body.description);
        generator.push_in(&format!("export class {}{}", class_name, implements_clause), |g| {
            // Members
            for (field_name, field) in &body.fields {
                let optional = if field.required { "" } else { "?" };
                generate_doc_comment(g, &field.description);
                g.push_line(format!(
                    "{}{}: {}",
                    camel_case(field_name),
                    optional,
                    build_type(analyzer, &field.type_, name)?
                ));
            }
            g.push_blank();

            // Construction
            if !params.is_empty() {
                g.push_in(&format!("constructor({})", params), |g| {
                    for (field_name, _) in body.required_fields() {
                        g.push_line(format!("this.{} = {}", camel_case(field_name), param_name(field_name)));
                    }
                    Ok(())
                })?;
                g.push_blank();
            }

            let args: Vec<String> = body.required_fields().map(|(field_name, _)| param_name(field_name)).collect();
            generate_doc_comment(g, &body.description);
            g.push_in(&format!("static new({})", params), |g| {
                g.push_line(format!("return new this({})", args.join(", ")));
                Ok(())
            })?;
            g.push_blank();

            // Fluent setters
            for (field_name, field) in &body.fields {
                let member_name = camel_case(field_name);
                let param = param_name(field_name);
                let enum_ref = field
                    .type_
                    .ref_name()
                    .filter(|target| analyzer.is_convertible_enum(target));

                let (param_type, assigned) = match enum_ref {
                    Some(target) => {
                        let enum_name = pascal_case(target);
                        (format!("Into{} | {}", enum_name, enum_name), format!("{}.from({})", enum_name, param))
                    }
                    None => (build_type(analyzer, &field.type_, name)?, param.clone()),
                };

                generate_doc_comment(g, &field.description);
                g.push_in(&format!("with{}({}: {})", pascal_case(field_name), param, param_type), |g| {
                    g.push_line(format!("this.{} = {}", member_name, assigned));
                    g.push_blank();
                    g.push_line("return this");
                    Ok(())
                })?;
                g.push_blank();
            }

            // Conversions into the enums that carry this struct
            for membership in &memberships {
                let enum_name = pascal_case(&membership.owner);
                g.push_in(&format!("into{}(): {}", enum_name, enum_name), |g| {
                    g.push_line(format!("return {}.{}(this)", enum_name, camel_case(&membership.member)));
                    Ok(())
                })?;
                g.push_blank();
            }

            // Serialization
            g.push_in("serialize(): Record<string, unknown>", |g| {
                g.push_line("const serialized: Record<string, unknown> = {}");
                g.push_blank();
                for (field_name, field) in &body.fields {
                    let this_member = format!("this.{}", camel_case(field_name));
                    let assignment = format!(
                        "{} = {}",
                        member("serialized", field_name),
                        build_serializer(&field.type_, &this_member)
                    );
                    if field.required {
                        g.push_line(assignment);
                    } else {
                        g.push_line(format!("if ({} !== undefined) {}", this_member, assignment));
                    }
                }
                g.push_blank();
                g.push_line("return serialized");
                Ok(())
            })?;
            g.push_blank();

            // Deserialization
            g.push_in("static deserialize(value: unknown, path: string = '#')", |g| {
                generate_base_error(g, name);

                for (field_name, _) in body.required_fields() {
                    g.push_line(format!(
                        "if (!({} in value)) throw new Error(`${{baseErrorMessage}}: value does not contain required field '{}'`)",
                        quote(field_name),
                        escape_template(field_name)
                    ));
                }

                let mut required_args = Vec::new();
                for (field_name, field) in body.required_fields() {
                    required_args.push(build_deserializer(
                        analyzer,
                        &field.type_,
                        &member("value", field_name),
                        &child_path(field_name),
                        name,
                    )?);
                }
                g.push_line(format!("const self = new this({})", required_args.join(", ")));

                for (field_name, field) in body.optional_fields() {
                    let deserializer = build_deserializer(
                        analyzer,
                        &field.type_,
                        &member("value", field_name),
                        &child_path(field_name),
                        name,
                    )?;
                    g.push_line(format!(
                        "if ({} in value) self.{} = {}",
                        quote(field_name),
                        camel_case(field_name),
                        deserializer
                    ));
                }
                g.push_blank();
                g.push_line("return self");
                Ok(())
            })
        })
    }

    fn generate_enum(
        &self,
        generator: &mut Generator,
        analyzer: &Analyzer<'_>,
        name: &str,
        body: &EnumBody,
    ) -> Result<(), BlueprintError> {
        let enum_name = pascal_case(name);
        let tagged = body.is_tagged();

        if tagged {
            generator.push_in(&format!("export interface Into{}", enum_name), |g| {
                g.push_line(format!("into{}(): {}", enum_name, enum_name));
                Ok(())
            })?;
            generator.push_blank();
        }

        generate_doc_comment(generator, &body.description);
        generator.push_in(&format!("export class {}", enum_name), |g| {
            for (variant_name, variant) in &body.variants {
                let member_type = match &variant.payload {
                    Some(payload) => build_type(analyzer, payload, name)?,
                    None          => "{}".to_string(),
                };
                generate_doc_comment(g, &variant.description);
                g.push_line(format!("{}?: {}", camel_case(variant_name), member_type));
            }
            g.push_blank();

            if tagged {
                g.push_in(&format!("static from(thing: Into{} | {})", enum_name, enum_name), |g| {
                    g.push_line(format!("if (thing instanceof {}) return thing", enum_name));
                    g.push_blank();
                    g.push_line(format!("return thing.into{}()", enum_name));
                    Ok(())
                })?;
                g.push_blank();
            }

            for (variant_name, variant) in &body.variants {
                let member_name = camel_case(variant_name);
                generate_doc_comment(g, &variant.description);
                let (signature, value) = match &variant.payload {
                    Some(payload) => (
                        format!("static {}(value: {}): {}", member_name, build_type(analyzer, payload, name)?, enum_name),
                        "value",
                    ),
                    None => (format!("static {}(): {}", member_name, enum_name), "{}"),
                };
                g.push_in(&signature, |g| {
                    g.push_line(format!("const e = new {}()", enum_name));
                    g.push_line(format!("e.{} = {}", member_name, value));
                    g.push_blank();
                    g.push_line("return e");
                    Ok(())
                })?;
                g.push_blank();
            }

            // Only the first variant that is set is written.
            g.push_in("serialize(): Record<string, unknown>", |g| {
                for (variant_name, variant) in &body.variants {
                    let this_member = format!("this.{}", camel_case(variant_name));
                    let serialized = match &variant.payload {
                        Some(payload) => build_serializer(payload, &this_member),
                        None          => "{}".to_string(),
                    };
                    g.push_line(format!(
                        "if ({} !== undefined) return {{ {}: {} }}",
                        this_member,
                        quote(variant_name),
                        serialized
                    ));
                }
                if !body.variants.is_empty() {
                    g.push_blank();
                }
                g.push_line("return {}");
                Ok(())
            })?;
            g.push_blank();

            // The first variant key present in the input wins.
            g.push_in("static deserialize(value: unknown, path: string = '#')", |g| {
                generate_base_error(g, name);

                for (variant_name, variant) in &body.variants {
                    let constructed = match &variant.payload {
                        Some(payload) => {
                            let deserializer = build_deserializer(
                                analyzer,
                                payload,
                                &member("value", variant_name),
                                &child_path(variant_name),
                                name,
                            )?;
                            format!("{}.{}({})", enum_name, camel_case(variant_name), deserializer)
                        }
                        None => format!("{}.{}()", enum_name, camel_case(variant_name)),
                    };
                    g.push_line(format!("if ({} in value) return {}", quote(variant_name), constructed));
                }
                if !body.variants.is_empty() {
                    g.push_blank();
                }
                g.push_line("throw new Error(`${baseErrorMessage}: value does not contain any recognized variants`)");
                Ok(())
            })
        })
    }
}
