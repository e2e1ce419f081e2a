//! Registries bundled with the crate. They double as documentation of the
//! builder API and as inputs for the CLI and the backend conformance tests.

use blueprint_compiler::BlueprintError;
use blueprint_schema::{Blueprint, EnumBody, Field, NumberWidth, StructBody, TypeDef, Variant};

/// Fixture names accepted by [`by_name`].
pub const NAMES: [&str; 3] = ["basic", "something", "catalog"];

pub fn names() -> &'static [&'static str] {
    &NAMES
}

pub fn by_name(name: &str) -> Result<Blueprint, BlueprintError> {
    match name {
        "basic"     => Ok(basic()),
        "something" => Ok(something()),
        "catalog"   => Ok(catalog()),
        _ => Err(BlueprintError::UnknownFixture(name.to_string())),
    }
}

/// A message with a required id and an optional unit-only intent.
pub fn basic() -> Blueprint {
    let mut b = Blueprint::new();

    let intent = b.enum_(
        "message_intent",
        EnumBody::new("Message intents are the primary way to categorize messages.")
            .variant("create", Variant::unit("Create a new entity"))
            .variant("delete", Variant::unit("Delete an entity")),
    );

    b.struct_(
        "message",
        StructBody::new("A message that can be sent between processes")
            .field("id", Field::new("The id of the message that can be sent", b.string()).required())
            .field(
                "intent",
                Field::new("The intention of the message. Should be present unless it is a ping.", intent),
            ),
    );

    b
}

/// A struct carried by an enum variant, so the struct converts into the enum.
pub fn something() -> Blueprint {
    let mut b = Blueprint::new();

    let some_struct = b.struct_(
        "some_struct",
        StructBody::new("This is the struct")
            .field("foo", Field::new("This is foo", b.string()).required())
            .field("bar", Field::new("This is the title", b.default_number())),
    );

    let some_enum = b.enum_(
        "some_enum",
        EnumBody::new("This is the enum")
            .variant("option1", Variant::with_payload("This is option 1", some_struct))
            .variant("option2", Variant::unit("This is option 2")),
    );

    b.struct_(
        "main_struct",
        StructBody::new("This is the main struct")
            .field("title", Field::new("This is the title", b.string()))
            .field("something", Field::new("This is the title", some_enum)),
    );

    b
}

/// Every type kind at once: all number widths in use, nested lists, a scalar
/// enum payload, a field named after a keyword and a reference declared
/// after its first use.
pub fn catalog() -> Blueprint {
    let mut b = Blueprint::new();

    let dimensions = b.struct_(
        "dimensions",
        StructBody::new("Physical size of a product, in centimeters")
            .field("width", Field::new("", b.number(NumberWidth::F32)).required())
            .field("height", Field::new("", b.number(NumberWidth::F32)).required()),
    );

    let availability = b.enum_(
        "availability",
        EnumBody::new("Whether a product can be ordered right now")
            .variant("in_stock", Variant::with_payload("Units on hand", b.number(NumberWidth::U32)))
            .variant("backordered", Variant::unit("Ships once restocked"))
            .variant("discontinued", Variant::unit("")),
    );

    let product = b.struct_(
        "product",
        StructBody::new("A sellable item.\n\nPrices are in the store currency.")
            .field("sku", Field::new("Stock keeping unit", b.string()).required())
            .field("title", Field::new("", b.string()).required())
            .field("price", Field::new("", b.number(NumberWidth::F64)).required())
            .field("type", Field::new("Free-form product category", b.string()))
            .field("tags", Field::new("", b.list(b.string())))
            .field("is_featured", Field::new("Shown on the front page", b.boolean()))
            .field("stock_count", Field::new("", b.number(NumberWidth::I64)))
            .field("ratings", Field::new("Star ratings grouped by review round", b.list(b.list(b.number(NumberWidth::U8)))))
            .field("dimensions", Field::new("", dimensions))
            .field("availability", Field::new("", availability)),
    );

    b.enum_(
        "catalog_entry",
        EnumBody::new("One row of the catalog")
            .variant("product", Variant::with_payload("A single product", product.clone()))
            .variant("bundle", Variant::with_payload("Several products sold together", TypeDef::reference("bundle"))),
    );

    b.struct_(
        "bundle",
        StructBody::new("Products sold as one")
            .field("name", Field::new("", b.string()).required())
            .field("products", Field::new("", b.list(product)).required())
            .field("discount", Field::new("Percentage off the summed price", b.number(NumberWidth::U8))),
    );

    b
}
