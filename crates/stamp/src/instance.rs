use crate::error::MethodError;
use crate::method::{Method, MethodTable};
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;

/// An object produced by a [`Stamp`](crate::Stamp).
///
/// Each instance owns its own properties and shares the method table of the stamp that created it.
/// Serializing an instance yields its properties as a JSON object.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Instance {
    props: Map<String, Value>,
    #[serde(skip)]
    methods: Arc<MethodTable>,
}

impl Instance {
    pub(crate) fn new(props: Map<String, Value>, methods: Arc<MethodTable>) -> Self {
        Self { props, methods }
    }

    /// Calls the method registered under `name` with this instance as receiver.
    pub fn call(&mut self, name: &str, args: &[Value]) -> Result<Value, MethodError> {
        let method = self.methods.get(name).cloned().ok_or_else(|| MethodError::not_found(name))?;
        method.call(self, args)
    }

    pub fn method(&self, name: &str) -> Option<&Method> {
        self.methods.get(name)
    }

    pub fn has_method(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    /// Method names in lexical order.
    pub fn method_names(&self) -> Vec<&str> {
        let mut names = self.methods.keys().map(String::as_str).collect::<Vec<_>>();
        names.sort_unstable();
        names
    }

    pub fn prop(&self, name: &str) -> Option<&Value> {
        self.props.get(name)
    }

    /// Reads an integer property, failing with [`MethodError::InvalidProperty`] otherwise.
    pub fn int_prop(&self, name: &str) -> Result<i64, MethodError> {
        match self.props.get(name) {
            Some(value) => value.as_i64().ok_or_else(|| MethodError::invalid_property(name, format!("expected integer, found {value}"))),
            None => Err(MethodError::invalid_property(name, "missing")),
        }
    }

    /// Sets a property, returning the previous value if any.
    pub fn set_prop<K: Into<String>, V: Into<Value>>(&mut self, name: K, value: V) -> Option<Value> {
        self.props.insert(name.into(), value.into())
    }

    pub fn props(&self) -> &Map<String, Value> {
        &self.props
    }
}
