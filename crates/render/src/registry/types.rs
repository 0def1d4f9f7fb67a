//! Registry type definitions: component props and the name-to-component map.

use serde::Serialize;
use std::collections::BTreeMap;

/// A component prop value - either a literal string or an MDX expression.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PropValue {
    /// A literal string value (from key="value").
    Literal {
        /// The attribute text.
        value: String,
    },
    /// An expression (from key={expression}), kept as source text.
    Expression {
        /// The expression source.
        value: String,
    },
}

impl PropValue {
    /// Creates a literal string prop value.
    pub fn literal(value: impl Into<String>) -> Self {
        PropValue::Literal {
            value: value.into(),
        }
    }

    /// Creates an expression prop value.
    pub fn expression(value: impl Into<String>) -> Self {
        PropValue::Expression {
            value: value.into(),
        }
    }

    /// Returns the raw value regardless of type.
    pub fn value(&self) -> &str {
        match self {
            PropValue::Literal { value } | PropValue::Expression { value } => value,
        }
    }

    /// Returns true if this is an expression.
    pub fn is_expression(&self) -> bool {
        matches!(self, PropValue::Expression { .. })
    }

    /// Text a component should display for this prop.
    ///
    /// Expressions holding a JSON string, number or boolean literal (`{"Jeremy"}`,
    /// `{3}`, `{true}`) are decoded; any other expression is returned as written.
    pub fn as_text(&self) -> String {
        match self {
            PropValue::Literal { value } => value.clone(),
            PropValue::Expression { value } => {
                match serde_json::from_str::<serde_json::Value>(value.trim()) {
                    Ok(serde_json::Value::String(s)) => s,
                    Ok(v @ (serde_json::Value::Number(_) | serde_json::Value::Bool(_))) => {
                        v.to_string()
                    }
                    _ => value.trim().to_string(),
                }
            }
        }
    }
}

/// Props passed to a component, ordered by name.
pub type Props = BTreeMap<String, PropValue>;

/// Reads a prop as display text, returning an empty string when absent.
pub fn prop_text(props: &Props, name: &str) -> String {
    props.get(name).map(PropValue::as_text).unwrap_or_default()
}

/// A component: rendered props and children HTML in, HTML out.
pub type ComponentFn = fn(&Props, &str) -> String;

/// Name to component mapping injected into MDX rendering.
///
/// Lookups are exact and case-sensitive.
#[derive(Clone, Default)]
pub struct ComponentRegistry {
    components: BTreeMap<String, ComponentFn>,
}

impl ComponentRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a component, builder style.
    pub fn with(mut self, name: impl Into<String>, component: ComponentFn) -> Self {
        self.insert(name, component);
        self
    }

    /// Adds (or replaces) a component.
    pub fn insert(&mut self, name: impl Into<String>, component: ComponentFn) {
        self.components.insert(name.into(), component);
    }

    /// Looks up a component by exact name.
    pub fn get(&self, name: &str) -> Option<ComponentFn> {
        self.components.get(name).copied()
    }

    /// Returns true if a component with this exact name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.components.contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.components.keys().map(String::as_str)
    }

    /// Number of registered components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Returns a registry with `scoped` layered over `self`; scoped entries win on name clashes.
    pub fn merged(&self, scoped: &ComponentRegistry) -> ComponentRegistry {
        let mut merged = self.clone();
        for (name, component) in &scoped.components {
            merged.components.insert(name.clone(), *component);
        }
        merged
    }

    /// Renders a registered component, or `None` when the name is unknown.
    pub fn render(&self, name: &str, props: &Props, children: &str) -> Option<String> {
        self.get(name).map(|component| component(props, children))
    }
}

impl std::fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}
