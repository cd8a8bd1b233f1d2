use crate::context::DecoratorContext;
use crate::name::synthesize_name;
use micro_stamp::{Descriptor, Method, MethodError};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

type DecoratorFn = dyn Fn(&mut DecoratorContext<'_>, &[Value]) -> Result<Value, MethodError> + Send + Sync;

/// A higher-order function wrapped around a [`Method`].
///
/// The decorator receives a [`DecoratorContext`] followed by the arguments of the call, and its
/// return value becomes the result of the decorated method. It decides whether, how often and with
/// which arguments the original method runs.
///
/// ```
/// use micro_decorate::MethodDecorator;
/// use micro_stamp::{int_argument, Instance, Method};
/// use serde_json::json;
///
/// let echo = Method::new("echo", 1, |_this, args| Ok(args[0].clone()));
/// let plus_two = MethodDecorator::named("plusTwo", |ctx, args| ctx.decoratee(&[json!(int_argument(args, 0)? + 2)]));
///
/// let decorated = plus_two.wrap(echo, None);
/// assert_eq!(decorated.name(), Some("plusTwo(echo)"));
/// assert_eq!(decorated.arity(), 1);
/// assert_eq!(decorated.call(&mut Instance::default(), &[json!(1)]), Ok(json!(3)));
/// ```
#[derive(Clone)]
pub struct MethodDecorator {
    name: Option<Arc<str>>,
    func: Arc<DecoratorFn>,
}

impl MethodDecorator {
    pub fn named<N, F>(name: N, func: F) -> Self
    where
        N: Into<Arc<str>>,
        F: Fn(&mut DecoratorContext<'_>, &[Value]) -> Result<Value, MethodError> + Send + Sync + 'static,
    {
        Self { name: Some(name.into()), func: Arc::new(func) }
    }

    pub fn anonymous<F>(func: F) -> Self
    where
        F: Fn(&mut DecoratorContext<'_>, &[Value]) -> Result<Value, MethodError> + Send + Sync + 'static,
    {
        Self { name: None, func: Arc::new(func) }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Wraps `decoratee`.
    ///
    /// The returned method is named `decorator(decoratee)` and declares the arity of `decoratee`.
    /// `stamp` is exposed to the decorator through [`DecoratorContext::stamp`].
    pub fn wrap(&self, decoratee: Method, stamp: Option<Arc<Descriptor>>) -> Method {
        let name = synthesize_name(self.name(), decoratee.name());
        let arity = decoratee.arity();
        let func = Arc::clone(&self.func);

        Method::new(name, arity, move |this, args| {
            let mut ctx = DecoratorContext::new(this, &decoratee, stamp.as_deref());
            func(&mut ctx, args)
        })
    }
}

impl fmt::Debug for MethodDecorator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodDecorator").field("name", &self.name).finish_non_exhaustive()
    }
}
