use serde_json::{Map, Value};

fn deserialize_string(value: &Value, path: &str) -> Result<String, String> {
    match value.as_str() {
        Some(s) => Ok(s.to_string()),
        None => Err(format!("failed to deserialize into 'string' at '{}': value is not a string", path)),
    }
}

fn deserialize_integer<T: TryFrom<i128>>(value: &Value, path: &str) -> Result<T, String> {
    let Some(number) = value.as_i64().map(i128::from).or_else(|| value.as_u64().map(i128::from)) else {
        return Err(format!("failed to deserialize into 'number' at '{}': value is not an integer", path));
    };
    T::try_from(number).map_err(|_| format!("failed to deserialize into 'number' at '{}': number out of range", path))
}

fn deserialize_float(value: &Value, path: &str) -> Result<f64, String> {
    value
        .as_f64()
        .ok_or_else(|| format!("failed to deserialize into 'number' at '{}': value is not a number", path))
}

fn deserialize_bool(value: &Value, path: &str) -> Result<bool, String> {
    match value.as_bool() {
        Some(b) => Ok(b),
        None => Err(format!("failed to deserialize into 'boolean' at '{}': value is not a boolean", path)),
    }
}

fn deserialize_list<T, F>(value: &Value, path: &str, deserialize_item: F) -> Result<Vec<T>, String>
where
    F: Fn(&Value, &str) -> Result<T, String>,
{
    let Some(items) = value.as_array() else {
        return Err(format!("failed to deserialize into 'list' at '{}': value is not an array", path));
    };
    items
        .iter()
        .enumerate()
        .map(|(index, item)| deserialize_item(item, &format!("{}[{}]", path, index)))
        .collect()
}

/// Physical size of a product, in centimeters
#[derive(Debug, Clone, PartialEq)]
pub struct Dimensions {
    pub width: f32,
    pub height: f32,
}

impl Dimensions {
    /// Creates a [`Dimensions`] from its required fields.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
        }
    }

    pub fn with_width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    pub fn with_height(mut self, height: f32) -> Self {
        self.height = height;
        self
    }

    /// Converts into a JSON object keyed by the declared field names.
    pub fn serialize(&self) -> Value {
        let mut map = Map::new();
        map.insert("width".to_string(), Value::from(self.width));
        map.insert("height".to_string(), Value::from(self.height));
        Value::Object(map)
    }

    /// Reads a JSON object, reporting the first problem found with its path.
    pub fn deserialize(value: &Value, path: &str) -> Result<Self, String> {
        let base_error_message = format!("failed to deserialize into 'dimensions' at '{}'", path);
        let Some(obj) = value.as_object() else {
            return Err(format!("{}: value is not an object", base_error_message));
        };

        let Some(field_width) = obj.get("width") else {
            return Err(format!("{}: value does not contain required field '{}'", base_error_message, "width"));
        };
        let Some(field_height) = obj.get("height") else {
            return Err(format!("{}: value does not contain required field '{}'", base_error_message, "height"));
        };
        let result = Self::new(
            deserialize_float(field_width, &format!("{}/width", path)).map(|n| n as f32)?,
            deserialize_float(field_height, &format!("{}/height", path)).map(|n| n as f32)?,
        );
        Ok(result)
    }
}

/// Implemented by values that convert into a [`Availability`].
pub trait IntoAvailability {
    fn into_availability(self) -> Availability;
}

/// Whether a product can be ordered right now
#[derive(Debug, Clone, PartialEq)]
pub enum Availability {
    /// Units on hand
    InStock(u32),
    /// Ships once restocked
    Backordered,
    Discontinued,
}

impl IntoAvailability for Availability {
    fn into_availability(self) -> Availability {
        self
    }
}

impl Availability {
    /// Accepts a [`Availability`] or anything that converts into one.
    #[allow(clippy::should_implement_trait)]
    pub fn from<T: IntoAvailability>(thing: T) -> Self {
        thing.into_availability()
    }

    /// Units on hand
    pub fn in_stock(value: u32) -> Self {
        Self::InStock(value)
    }

    /// Ships once restocked
    pub fn backordered() -> Self {
        Self::Backordered
    }

    pub fn discontinued() -> Self {
        Self::Discontinued
    }

    /// Converts into a JSON object with the variant name as its only key.
    pub fn serialize(&self) -> Value {
        let mut map = Map::new();
        match self {
            Self::InStock(value) => {
                map.insert("in_stock".to_string(), Value::from(*value));
            }
            Self::Backordered => {
                map.insert("backordered".to_string(), Value::Object(Map::new()));
            }
            Self::Discontinued => {
                map.insert("discontinued".to_string(), Value::Object(Map::new()));
            }
        }
        Value::Object(map)
    }

    /// Reads a JSON object holding one of the variant names.
    pub fn deserialize(value: &Value, path: &str) -> Result<Self, String> {
        let base_error_message = format!("failed to deserialize into 'availability' at '{}'", path);
        let Some(obj) = value.as_object() else {
            return Err(format!("{}: value is not an object", base_error_message));
        };

        if let Some(value) = obj.get("in_stock") {
            return Ok(Self::InStock(deserialize_integer::<u32>(value, &format!("{}/in_stock", path))?));
        }
        if obj.contains_key("backordered") {
            return Ok(Self::Backordered);
        }
        if obj.contains_key("discontinued") {
            return Ok(Self::Discontinued);
        }
        Err(format!("{}: value does not contain any recognized variants", base_error_message))
    }
}

/// A sellable item.
///
/// Prices are in the store currency.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Stock keeping unit
    pub sku: String,
    pub title: String,
    pub price: f64,
    /// Free-form product category
    pub type_: Option<String>,
    pub tags: Option<Vec<String>>,
    /// Shown on the front page
    pub is_featured: Option<bool>,
    pub stock_count: Option<i64>,
    /// Star ratings grouped by review round
    pub ratings: Option<Vec<Vec<u8>>>,
    pub dimensions: Option<Dimensions>,
    pub availability: Option<Availability>,
}

impl Product {
    /// Creates a [`Product`] from its required fields.
    pub fn new(sku: String, title: String, price: f64) -> Self {
        Self {
            sku,
            title,
            price,
            type_: None,
            tags: None,
            is_featured: None,
            stock_count: None,
            ratings: None,
            dimensions: None,
            availability: None,
        }
    }

    /// Stock keeping unit
    pub fn with_sku(mut self, sku: String) -> Self {
        self.sku = sku;
        self
    }

    pub fn with_title(mut self, title: String) -> Self {
        self.title = title;
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = price;
        self
    }

    /// Free-form product category
    pub fn with_type(mut self, type_: String) -> Self {
        self.type_ = Some(type_);
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = Some(tags);
        self
    }

    /// Shown on the front page
    pub fn with_is_featured(mut self, is_featured: bool) -> Self {
        self.is_featured = Some(is_featured);
        self
    }

    pub fn with_stock_count(mut self, stock_count: i64) -> Self {
        self.stock_count = Some(stock_count);
        self
    }

    /// Star ratings grouped by review round
    pub fn with_ratings(mut self, ratings: Vec<Vec<u8>>) -> Self {
        self.ratings = Some(ratings);
        self
    }

    pub fn with_dimensions(mut self, dimensions: Dimensions) -> Self {
        self.dimensions = Some(dimensions);
        self
    }

    pub fn with_availability(mut self, availability: impl IntoAvailability) -> Self {
        self.availability = Some(Availability::from(availability));
        self
    }

    /// Converts into a JSON object keyed by the declared field names.
    pub fn serialize(&self) -> Value {
        let mut map = Map::new();
        map.insert("sku".to_string(), Value::String(self.sku.clone()));
        map.insert("title".to_string(), Value::String(self.title.clone()));
        map.insert("price".to_string(), Value::from(self.price));
        if let Some(value) = &self.type_ {
            map.insert("type".to_string(), Value::String(value.clone()));
        }
        if let Some(value) = &self.tags {
            map.insert("tags".to_string(), Value::Array(value.iter().map(|item| Value::String(item.clone())).collect()));
        }
        if let Some(value) = &self.is_featured {
            map.insert("is_featured".to_string(), Value::Bool(*value));
        }
        if let Some(value) = &self.stock_count {
            map.insert("stock_count".to_string(), Value::from(*value));
        }
        if let Some(value) = &self.ratings {
            map.insert("ratings".to_string(), Value::Array(value.iter().map(|item| Value::Array(item.iter().map(|item| Value::from(*item)).collect())).collect()));
        }
        if let Some(value) = &self.dimensions {
            map.insert("dimensions".to_string(), value.serialize());
        }
        if let Some(value) = &self.availability {
            map.insert("availability".to_string(), value.serialize());
        }
        Value::Object(map)
    }

    /// Reads a JSON object, reporting the first problem found with its path.
    pub fn deserialize(value: &Value, path: &str) -> Result<Self, String> {
        let base_error_message = format!("failed to deserialize into 'product' at '{}'", path);
        let Some(obj) = value.as_object() else {
            return Err(format!("{}: value is not an object", base_error_message));
        };

        let Some(field_sku) = obj.get("sku") else {
            return Err(format!("{}: value does not contain required field '{}'", base_error_message, "sku"));
        };
        let Some(field_title) = obj.get("title") else {
            return Err(format!("{}: value does not contain required field '{}'", base_error_message, "title"));
        };
        let Some(field_price) = obj.get("price") else {
            return Err(format!("{}: value does not contain required field '{}'", base_error_message, "price"));
        };
        let mut result = Self::new(
            deserialize_string(field_sku, &format!("{}/sku", path))?,
            deserialize_string(field_title, &format!("{}/title", path))?,
            deserialize_float(field_price, &format!("{}/price", path))?,
        );
        if let Some(value) = obj.get("type") {
            result.type_ = Some(deserialize_string(value, &format!("{}/type", path))?);
        }
        if let Some(value) = obj.get("tags") {
            result.tags = Some(deserialize_list(value, &format!("{}/tags", path), |item, item_path| deserialize_string(item, item_path))?);
        }
        if let Some(value) = obj.get("is_featured") {
            result.is_featured = Some(deserialize_bool(value, &format!("{}/is_featured", path))?);
        }
        if let Some(value) = obj.get("stock_count") {
            result.stock_count = Some(deserialize_integer::<i64>(value, &format!("{}/stock_count", path))?);
        }
        if let Some(value) = obj.get("ratings") {
            result.ratings = Some(deserialize_list(value, &format!("{}/ratings", path), |item, item_path| deserialize_list(item, item_path, |item, item_path| deserialize_integer::<u8>(item, item_path)))?);
        }
        if let Some(value) = obj.get("dimensions") {
            result.dimensions = Some(Dimensions::deserialize(value, &format!("{}/dimensions", path))?);
        }
        if let Some(value) = obj.get("availability") {
            result.availability = Some(Availability::deserialize(value, &format!("{}/availability", path))?);
        }
        Ok(result)
    }
}

impl IntoCatalogEntry for Product {
    fn into_catalog_entry(self) -> CatalogEntry {
        CatalogEntry::Product(self)
    }
}

/// Implemented by values that convert into a [`CatalogEntry`].
pub trait IntoCatalogEntry {
    fn into_catalog_entry(self) -> CatalogEntry;
}

/// One row of the catalog
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogEntry {
    /// A single product
    Product(Product),
    /// Several products sold together
    Bundle(Bundle),
}

impl IntoCatalogEntry for CatalogEntry {
    fn into_catalog_entry(self) -> CatalogEntry {
        self
    }
}

impl CatalogEntry {
    /// Accepts a [`CatalogEntry`] or anything that converts into one.
    #[allow(clippy::should_implement_trait)]
    pub fn from<T: IntoCatalogEntry>(thing: T) -> Self {
        thing.into_catalog_entry()
    }

    /// A single product
    pub fn product(value: Product) -> Self {
        Self::Product(value)
    }

    /// Several products sold together
    pub fn bundle(value: Bundle) -> Self {
        Self::Bundle(value)
    }

    /// Converts into a JSON object with the variant name as its only key.
    pub fn serialize(&self) -> Value {
        let mut map = Map::new();
        match self {
            Self::Product(value) => {
                map.insert("product".to_string(), value.serialize());
            }
            Self::Bundle(value) => {
                map.insert("bundle".to_string(), value.serialize());
            }
        }
        Value::Object(map)
    }

    /// Reads a JSON object holding one of the variant names.
    pub fn deserialize(value: &Value, path: &str) -> Result<Self, String> {
        let base_error_message = format!("failed to deserialize into 'catalog_entry' at '{}'", path);
        let Some(obj) = value.as_object() else {
            return Err(format!("{}: value is not an object", base_error_message));
        };

        if let Some(value) = obj.get("product") {
            return Ok(Self::Product(Product::deserialize(value, &format!("{}/product", path))?));
        }
        if let Some(value) = obj.get("bundle") {
            return Ok(Self::Bundle(Bundle::deserialize(value, &format!("{}/bundle", path))?));
        }
        Err(format!("{}: value does not contain any recognized variants", base_error_message))
    }
}

/// Products sold as one
#[derive(Debug, Clone, PartialEq)]
pub struct Bundle {
    pub name: String,
    pub products: Vec<Product>,
    /// Percentage off the summed price
    pub discount: Option<u8>,
}

impl Bundle {
    /// Creates a [`Bundle`] from its required fields.
    pub fn new(name: String, products: Vec<Product>) -> Self {
        Self {
            name,
            products,
            discount: None,
        }
    }

    pub fn with_name(mut self, name: String) -> Self {
        self.name = name;
        self
    }

    pub fn with_products(mut self, products: Vec<Product>) -> Self {
        self.products = products;
        self
    }

    /// Percentage off the summed price
    pub fn with_discount(mut self, discount: u8) -> Self {
        self.discount = Some(discount);
        self
    }

    /// Converts into a JSON object keyed by the declared field names.
    pub fn serialize(&self) -> Value {
        let mut map = Map::new();
        map.insert("name".to_string(), Value::String(self.name.clone()));
        map.insert("products".to_string(), Value::Array(self.products.iter().map(|item| item.serialize()).collect()));
        if let Some(value) = &self.discount {
            map.insert("discount".to_string(), Value::from(*value));
        }
        Value::Object(map)
    }

    /// Reads a JSON object, reporting the first problem found with its path.
    pub fn deserialize(value: &Value, path: &str) -> Result<Self, String> {
        let base_error_message = format!("failed to deserialize into 'bundle' at '{}'", path);
        let Some(obj) = value.as_object() else {
            return Err(format!("{}: value is not an object", base_error_message));
        };

        let Some(field_name) = obj.get("name") else {
            return Err(format!("{}: value does not contain required field '{}'", base_error_message, "name"));
        };
        let Some(field_products) = obj.get("products") else {
            return Err(format!("{}: value does not contain required field '{}'", base_error_message, "products"));
        };
        let mut result = Self::new(
            deserialize_string(field_name, &format!("{}/name", path))?,
            deserialize_list(field_products, &format!("{}/products", path), |item, item_path| Product::deserialize(item, item_path))?,
        );
        if let Some(value) = obj.get("discount") {
            result.discount = Some(deserialize_integer::<u8>(value, &format!("{}/discount", path))?);
        }
        Ok(result)
    }
}

impl IntoCatalogEntry for Bundle {
    fn into_catalog_entry(self) -> CatalogEntry {
        CatalogEntry::Bundle(self)
    }
}
