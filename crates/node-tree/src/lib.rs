//! Node tree model and wrangling operators
//!
//! [`NodeTree`] is an in-memory [`GraphStore`]; hosts with their own scene
//! graph implement the trait instead. The operators in [`ops`] snapshot the
//! store, run a layout engine from `nodewrangler-layout` and write the
//! result back.

mod error;
mod node;
mod prefs;
mod store;
mod working_set;

pub mod ops;

pub use error::TreeError;
pub use node::{Category, Link, Node, NodeId, NodeType, ParseNodeTypeError};
pub use prefs::{Preferences, PreferencesProvider};
pub use store::{resolve_absolute, GraphStore, NodeTree};
pub use working_set::WorkingSet;

pub use ops::{align_selected, arrange, delete_unused, ArrangeReport};

// Re-export the geometry and engine settings used in the public API
pub use nodewrangler_layout::{Axis, ColumnStrategy, FrameHandling, Point, Vec2};
