use crate::composer::Composer;
use crate::method::{Method, MethodTable};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// The declarative definition behind a [`Stamp`](crate::Stamp).
///
/// Merging descriptors follows object-assign semantics: entries of the merged-in descriptor win,
/// composers are appended in order and the same composer is never registered twice.
#[derive(Clone, Default)]
pub struct Descriptor {
    name: Option<String>,
    props: Map<String, Value>,
    methods: MethodTable,
    composers: Vec<Arc<dyn Composer>>,
}

impl Descriptor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn props(&self) -> &Map<String, Value> {
        &self.props
    }

    pub fn methods(&self) -> &MethodTable {
        &self.methods
    }

    pub fn composers(&self) -> &[Arc<dyn Composer>] {
        &self.composers
    }

    /// Method names in lexical order.
    pub fn method_names(&self) -> Vec<&str> {
        let mut names = self.methods.keys().map(String::as_str).collect::<Vec<_>>();
        names.sort_unstable();
        names
    }

    pub(crate) fn methods_mut(&mut self) -> &mut MethodTable {
        &mut self.methods
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = Some(name);
    }

    pub(crate) fn insert_prop(&mut self, name: String, value: Value) {
        self.props.insert(name, value);
    }

    pub(crate) fn insert_method(&mut self, name: String, method: Method) {
        self.methods.insert(name, method);
    }

    pub(crate) fn push_composer(&mut self, composer: Arc<dyn Composer>) {
        if !self.composers.iter().any(|registered| Arc::ptr_eq(registered, &composer)) {
            self.composers.push(composer);
        }
    }

    pub(crate) fn merge(&mut self, other: &Descriptor) {
        if let Some(name) = &other.name {
            self.name = Some(name.clone());
        }

        for (name, value) in &other.props {
            self.props.insert(name.clone(), value.clone());
        }

        for (name, method) in &other.methods {
            self.methods.insert(name.clone(), method.clone());
        }

        for composer in &other.composers {
            self.push_composer(Arc::clone(composer));
        }
    }
}

impl fmt::Debug for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Descriptor")
            .field("name", &self.name)
            .field("props", &self.props)
            .field("methods", &self.method_names())
            .field("composers", &self.composers.len())
            .finish()
    }
}
