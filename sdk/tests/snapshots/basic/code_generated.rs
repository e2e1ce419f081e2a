use serde_json::{Map, Value};

fn deserialize_string(value: &Value, path: &str) -> Result<String, String> {
    match value.as_str() {
        Some(s) => Ok(s.to_string()),
        None => Err(format!("failed to deserialize into 'string' at '{}': value is not a string", path)),
    }
}

/// Message intents are the primary way to categorize messages.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageIntent {
    /// Create a new entity
    Create,
    /// Delete an entity
    Delete,
}

impl MessageIntent {
    /// Create a new entity
    pub fn create() -> Self {
        Self::Create
    }

    /// Delete an entity
    pub fn delete() -> Self {
        Self::Delete
    }

    /// Converts into a JSON object with the variant name as its only key.
    pub fn serialize(&self) -> Value {
        let mut map = Map::new();
        match self {
            Self::Create => {
                map.insert("create".to_string(), Value::Object(Map::new()));
            }
            Self::Delete => {
                map.insert("delete".to_string(), Value::Object(Map::new()));
            }
        }
        Value::Object(map)
    }

    /// Reads a JSON object holding one of the variant names.
    pub fn deserialize(value: &Value, path: &str) -> Result<Self, String> {
        let base_error_message = format!("failed to deserialize into 'message_intent' at '{}'", path);
        let Some(obj) = value.as_object() else {
            return Err(format!("{}: value is not an object", base_error_message));
        };

        if obj.contains_key("create") {
            return Ok(Self::Create);
        }
        if obj.contains_key("delete") {
            return Ok(Self::Delete);
        }
        Err(format!("{}: value does not contain any recognized variants", base_error_message))
    }
}

/// A message that can be sent between processes
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    /// The id of the message that can be sent
    pub id: String,
    /// The intention of the message. Should be present unless it is a ping.
    pub intent: Option<MessageIntent>,
}

impl Message {
    /// Creates a [`Message`] from its required fields.
    pub fn new(id: String) -> Self {
        Self {
            id,
            intent: None,
        }
    }

    /// The id of the message that can be sent
    pub fn with_id(mut self, id: String) -> Self {
        self.id = id;
        self
    }

    /// The intention of the message. Should be present unless it is a ping.
    pub fn with_intent(mut self, intent: MessageIntent) -> Self {
        self.intent = Some(intent);
        self
    }

    /// Converts into a JSON object keyed by the declared field names.
    pub fn serialize(&self) -> Value {
        let mut map = Map::new();
        map.insert("id".to_string(), Value::String(self.id.clone()));
        if let Some(value) = &self.intent {
            map.insert("intent".to_string(), value.serialize());
        }
        Value::Object(map)
    }

    /// Reads a JSON object, reporting the first problem found with its path.
    pub fn deserialize(value: &Value, path: &str) -> Result<Self, String> {
        let base_error_message = format!("failed to deserialize into 'message' at '{}'", path);
        let Some(obj) = value.as_object() else {
            return Err(format!("{}: value is not an object", base_error_message));
        };

        let Some(field_id) = obj.get("id") else {
            return Err(format!("{}: value does not contain required field '{}'", base_error_message, "id"));
        };
        let mut result = Self::new(
            deserialize_string(field_id, &format!("{}/id", path))?,
        );
        if let Some(value) = obj.get("intent") {
            result.intent = Some(MessageIntent::deserialize(value, &format!("{}/intent", path))?);
        }
        Ok(result)
    }
}
