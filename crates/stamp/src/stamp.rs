use crate::composer::{ComposeContext, Composer};
use crate::descriptor::Descriptor;
use crate::error::MethodError;
use crate::instance::Instance;
use crate::method::Method;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::trace;

/// A composable factory of [`Instance`]s.
///
/// A stamp is immutable: every composing operation returns a new stamp, so a base stamp can be
/// extended in several directions without interference. Cloning is cheap.
#[derive(Debug, Clone, Default)]
pub struct Stamp {
    descriptor: Arc<Descriptor>,
}

impl Stamp {
    /// Creates a new stamp builder
    pub fn builder() -> StampBuilder {
        StampBuilder::new()
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Merges the descriptors of `stamps` left to right and runs every composer of the result once,
    /// in registration order.
    pub fn compose<'s, I>(stamps: I) -> Stamp
    where
        I: IntoIterator<Item = &'s Stamp>,
    {
        let mut descriptor = Descriptor::new();
        for stamp in stamps {
            descriptor.merge(&stamp.descriptor);
        }
        Self::finalize(descriptor)
    }

    #[must_use]
    pub fn compose_with(&self, other: &Stamp) -> Stamp {
        Self::compose([self, other])
    }

    /// Returns a new stamp with `composer` registered after the existing ones.
    ///
    /// This is a build event: the composer, along with all previously registered ones, runs
    /// against the method table of the returned stamp.
    #[must_use]
    pub fn with_composer<C: Composer + 'static>(&self, composer: C) -> Stamp {
        let mut descriptor = Descriptor::new();
        descriptor.push_composer(Arc::new(composer));
        self.compose_with(&Stamp { descriptor: Arc::new(descriptor) })
    }

    pub fn name(&self) -> Option<&str> {
        self.descriptor.name()
    }

    pub fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    /// Creates an instance holding a copy of the default props.
    pub fn create(&self) -> Instance {
        Instance::new(self.descriptor.props().clone(), Arc::new(self.descriptor.methods().clone()))
    }

    /// Creates an instance whose default props are extended and overridden by `props`.
    pub fn create_with(&self, props: Map<String, Value>) -> Instance {
        let mut instance = self.create();
        for (name, value) in props {
            instance.set_prop(name, value);
        }
        instance
    }

    fn finalize(mut descriptor: Descriptor) -> Stamp {
        let composers = descriptor.composers().to_vec();
        for (index, composer) in composers.iter().enumerate() {
            trace!(stamp = descriptor.name(), composer = index, "running composer");
            composer.compose(&mut ComposeContext::new(&mut descriptor));
        }
        Stamp { descriptor: Arc::new(descriptor) }
    }
}

/// Collects the pieces of a [`Stamp`]; [`build`](StampBuilder::build) is a single build event.
#[derive(Debug, Default)]
pub struct StampBuilder {
    descriptor: Descriptor,
}

impl StampBuilder {
    fn new() -> Self {
        Self { descriptor: Descriptor::new() }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.descriptor.set_name(name.into());
        self
    }

    pub fn prop(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.descriptor.insert_prop(name.into(), value.into());
        self
    }

    /// Registers a method named after its key.
    pub fn method<F>(self, name: impl Into<String>, arity: usize, func: F) -> Self
    where
        F: Fn(&mut Instance, &[Value]) -> Result<Value, MethodError> + Send + Sync + 'static,
    {
        let name = name.into();
        let method = Method::new(name.as_str(), arity, func);
        self.method_entry(name, method)
    }

    /// Registers an already constructed method under `name`, keeping the method's own display name.
    pub fn method_entry(mut self, name: impl Into<String>, method: Method) -> Self {
        self.descriptor.insert_method(name.into(), method);
        self
    }

    pub fn composer<C: Composer + 'static>(mut self, composer: C) -> Self {
        self.descriptor.push_composer(Arc::new(composer));
        self
    }

    pub fn build(self) -> Stamp {
        Stamp::finalize(self.descriptor)
    }
}
