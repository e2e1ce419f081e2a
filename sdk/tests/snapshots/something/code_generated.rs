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

/// This is the struct
#[derive(Debug, Clone, PartialEq)]
pub struct SomeStruct {
    /// This is foo
    pub foo: String,
    /// This is the title
    pub bar: Option<i32>,
}

impl SomeStruct {
    /// Creates a [`SomeStruct`] from its required fields.
    pub fn new(foo: String) -> Self {
        Self {
            foo,
            bar: None,
        }
    }

    /// This is foo
    pub fn with_foo(mut self, foo: String) -> Self {
        self.foo = foo;
        self
    }

    /// This is the title
    pub fn with_bar(mut self, bar: i32) -> Self {
        self.bar = Some(bar);
        self
    }

    /// Converts into a JSON object keyed by the declared field names.
    pub fn serialize(&self) -> Value {
        let mut map = Map::new();
        map.insert("foo".to_string(), Value::String(self.foo.clone()));
        if let Some(value) = &self.bar {
            map.insert("bar".to_string(), Value::from(*value));
        }
        Value::Object(map)
    }

    /// Reads a JSON object, reporting the first problem found with its path.
    pub fn deserialize(value: &Value, path: &str) -> Result<Self, String> {
        let base_error_message = format!("failed to deserialize into 'some_struct' at '{}'", path);
        let Some(obj) = value.as_object() else {
            return Err(format!("{}: value is not an object", base_error_message));
        };

        let Some(field_foo) = obj.get("foo") else {
            return Err(format!("{}: value does not contain required field '{}'", base_error_message, "foo"));
        };
        let mut result = Self::new(
            deserialize_string(field_foo, &format!("{}/foo", path))?,
        );
        if let Some(value) = obj.get("bar") {
            result.bar = Some(deserialize_integer::<i32>(value, &format!("{}/bar", path))?);
        }
        Ok(result)
    }
}

impl IntoSomeEnum for SomeStruct {
    fn into_some_enum(self) -> SomeEnum {
        SomeEnum::Option1(self)
    }
}

/// Implemented by values that convert into a [`SomeEnum`].
pub trait IntoSomeEnum {
    fn into_some_enum(self) -> SomeEnum;
}

/// This is the enum
#[derive(Debug, Clone, PartialEq)]
pub enum SomeEnum {
    /// This is option 1
    Option1(SomeStruct),
    /// This is option 2
    Option2,
}

impl IntoSomeEnum for SomeEnum {
    fn into_some_enum(self) -> SomeEnum {
        self
    }
}

impl SomeEnum {
    /// Accepts a [`SomeEnum`] or anything that converts into one.
    #[allow(clippy::should_implement_trait)]
    pub fn from<T: IntoSomeEnum>(thing: T) -> Self {
        thing.into_some_enum()
    }

    /// This is option 1
    pub fn option1(value: SomeStruct) -> Self {
        Self::Option1(value)
    }

    /// This is option 2
    pub fn option2() -> Self {
        Self::Option2
    }

    /// Converts into a JSON object with the variant name as its only key.
    pub fn serialize(&self) -> Value {
        let mut map = Map::new();
        match self {
            Self::Option1(value) => {
                map.insert("option1".to_string(), value.serialize());
            }
            Self::Option2 => {
                map.insert("option2".to_string(), Value::Object(Map::new()));
            }
        }
        Value::Object(map)
    }

    /// Reads a JSON object holding one of the variant names.
    pub fn deserialize(value: &Value, path: &str) -> Result<Self, String> {
        let base_error_message = format!("failed to deserialize into 'some_enum' at '{}'", path);
        let Some(obj) = value.as_object() else {
            return Err(format!("{}: value is not an object", base_error_message));
        };

        if let Some(value) = obj.get("option1") {
            return Ok(Self::Option1(SomeStruct::deserialize(value, &format!("{}/option1", path))?));
        }
        if obj.contains_key("option2") {
            return Ok(Self::Option2);
        }
        Err(format!("{}: value does not contain any recognized variants", base_error_message))
    }
}

/// This is the main struct
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MainStruct {
    /// This is the title
    pub title: Option<String>,
    /// This is the title
    pub something: Option<SomeEnum>,
}

impl MainStruct {
    /// Creates a [`MainStruct`] from its required fields.
    pub fn new() -> Self {
        Self::default()
    }

    /// This is the title
    pub fn with_title(mut self, title: String) -> Self {
        self.title = Some(title);
        self
    }

    /// This is the title
    pub fn with_something(mut self, something: impl IntoSomeEnum) -> Self {
        self.something = Some(SomeEnum::from(something));
        self
    }

    /// Converts into a JSON object keyed by the declared field names.
    pub fn serialize(&self) -> Value {
        let mut map = Map::new();
        if let Some(value) = &self.title {
            map.insert("title".to_string(), Value::String(value.clone()));
        }
        if let Some(value) = &self.something {
            map.insert("something".to_string(), value.serialize());
        }
        Value::Object(map)
    }

    /// Reads a JSON object, reporting the first problem found with its path.
    pub fn deserialize(value: &Value, path: &str) -> Result<Self, String> {
        let base_error_message = format!("failed to deserialize into 'main_struct' at '{}'", path);
        let Some(obj) = value.as_object() else {
            return Err(format!("{}: value is not an object", base_error_message));
        };

        let mut result = Self::new();
        if let Some(value) = obj.get("title") {
            result.title = Some(deserialize_string(value, &format!("{}/title", path))?);
        }
        if let Some(value) = obj.get("something") {
            result.something = Some(SomeEnum::deserialize(value, &format!("{}/something", path))?);
        }
        Ok(result)
    }
}
