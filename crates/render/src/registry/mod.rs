//! Component registry: the names MDX content may use as tags.

/// Layout primitives and the default registry.
pub mod defaults;
/// Registry and prop types.
pub mod types;

pub use defaults::default_registry;
pub use types::{ComponentFn, ComponentRegistry, PropValue, Props, prop_text};
