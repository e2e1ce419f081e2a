//! The Blueprint type model.
//!
//! ```
//! use blueprint_schema::*;
//!
//! let mut b = Blueprint::new();
//! let id = b.string();
//! let message = b.struct_("message", StructBody::new("A message")
//!     .field("id", Field::new("The id", id).required()));
//!
//! assert_eq!(message, TypeDef::reference("message"));
//! assert_eq!(b.get("message").map(Item::kind), Some(ItemKind::Struct));
//! ```

pub mod blueprint;
pub mod types;

pub use blueprint::*;
pub use types::*;
