use crate::error::MethodError;
use crate::instance::Instance;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

type MethodFn = dyn Fn(&mut Instance, &[Value]) -> Result<Value, MethodError> + Send + Sync;

/// The method table of a stamp, keyed by method name.
pub type MethodTable = HashMap<String, Method>;

/// A callable entry of a [`MethodTable`].
///
/// The receiver is passed explicitly: calling a method binds it to the given [`Instance`]
/// for that call only. Besides the callable a method carries some metadata:
///
/// - `name`: the display name, `None` for anonymous methods
/// - `arity`: the declared parameter count, used for introspection only
#[derive(Clone)]
pub struct Method {
    name: Option<Arc<str>>,
    arity: usize,
    func: Arc<MethodFn>,
}

impl Method {
    pub fn new<N, F>(name: N, arity: usize, func: F) -> Self
    where
        N: Into<Arc<str>>,
        F: Fn(&mut Instance, &[Value]) -> Result<Value, MethodError> + Send + Sync + 'static,
    {
        Self { name: Some(name.into()), arity, func: Arc::new(func) }
    }

    pub fn anonymous<F>(arity: usize, func: F) -> Self
    where
        F: Fn(&mut Instance, &[Value]) -> Result<Value, MethodError> + Send + Sync + 'static,
    {
        Self { name: None, arity, func: Arc::new(func) }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Invokes the method with `this` as receiver.
    #[inline]
    pub fn call(&self, this: &mut Instance, args: &[Value]) -> Result<Value, MethodError> {
        (self.func)(this, args)
    }
}

impl fmt::Debug for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Method").field("name", &self.name).field("arity", &self.arity).finish_non_exhaustive()
    }
}
