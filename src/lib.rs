//! # schemap - Socket Compatibility and Schema Mapping Engine
//!
//! **schemap** decides which node sockets of a system graph may be wired
//! together and builds the field-level mapping between an output schema and
//! an input schema. It is the engine behind a node editor's mapping dialog:
//! the UI feeds it pointer picks and drops, and it answers with
//! compatibility verdicts, validation state and, finally, a flat mapping
//! specification to persist alongside the graph node.
//!
//! ## Core Workflow
//!
//! 1.  **Load Your Sockets**: Fetch the JSON-schema-like structure of both sockets and wrap each in a `SocketSchema` (or implement `IntoSocketSchema` for your registry's payload).
//! 2.  **Open a Session**: `MappingSession::open` compiles both schemas into `PropertyDescriptor` trees and restores a previously saved mapping, if any.
//! 3.  **Connect**: Drive `pick` / `move_pointer` / `drop_on` from UI events (guarded by `can_connect`), or wire everything at once with `connect_all`. Literal values are set with `set_static_value`, `set_default_value` and `add_custom_property`.
//! 4.  **Save**: `create_mapping` validates every required input and serializes the session into a `MappingSpecification`. It fails as a whole when anything is unsatisfied.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use schemap::prelude::*;
//! use serde_json::json;
//!
//! fn main() -> Result<()> {
//!     let output = SocketSchema::new("person", json!({
//!         "type": "object",
//!         "properties": {
//!             "name": { "type": "string" },
//!             "age": { "type": "integer" }
//!         },
//!         "required": ["age"]
//!     }));
//!     let input = SocketSchema::new("profile", json!({
//!         "type": "object",
//!         "properties": {
//!             "fullName": { "type": "string" },
//!             "years": { "type": "integer" }
//!         },
//!         "required": ["fullName"]
//!     }));
//!
//!     let mut session = MappingSession::builder().build();
//!     session.open(input, output, None);
//!
//!     // Drag from the output side and drop on the input side.
//!     session.pick(IoSide::Output, "name")?;
//!     if session.can_connect(IoSide::Input, "fullName")? {
//!         session.drop_on(IoSide::Input, "fullName")?;
//!     }
//!     session.pick(IoSide::Output, "age")?;
//!     session.drop_on(IoSide::Input, "years")?;
//!
//!     match session.create_mapping() {
//!         Ok(spec) => println!("{}", spec.to_json()?),
//!         Err(MappingError::InvalidMapping { issues }) => {
//!             for issue in issues {
//!                 eprintln!("{}", issue);
//!             }
//!         }
//!         Err(e) => return Err(e.into()),
//!     }
//!     Ok(())
//! }
//! ```

pub mod compatibility;
pub mod compiler;
pub mod connection;
pub mod display;
pub mod error;
pub mod mapping;
pub mod prelude;
pub mod property;
pub mod schema;
pub mod session;
pub mod validation;
