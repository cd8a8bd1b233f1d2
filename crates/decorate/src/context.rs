use micro_stamp::{Descriptor, Instance, Method, MethodError};
use serde_json::Value;

/// What a decorator sees when the decorated method is called.
///
/// The context borrows the receiving instance for the duration of the call. Calling
/// [`decoratee`](DecoratorContext::decoratee) runs the original method bound to that instance,
/// so any change the decorator made to the instance beforehand is visible to it.
#[derive(Debug)]
pub struct DecoratorContext<'a> {
    this: &'a mut Instance,
    decoratee: &'a Method,
    stamp: Option<&'a Descriptor>,
}

impl<'a> DecoratorContext<'a> {
    pub(crate) fn new(this: &'a mut Instance, decoratee: &'a Method, stamp: Option<&'a Descriptor>) -> Self {
        Self { this, decoratee, stamp }
    }

    /// Calls the decoratee on the current instance.
    pub fn decoratee(&mut self, args: &[Value]) -> Result<Value, MethodError> {
        self.decoratee.call(&mut *self.this, args)
    }

    pub fn decoratee_method(&self) -> &Method {
        self.decoratee
    }

    pub fn this(&self) -> &Instance {
        &*self.this
    }

    pub fn this_mut(&mut self) -> &mut Instance {
        &mut *self.this
    }

    /// The stamp definition the decoration was applied to, as it was right before wrapping.
    ///
    /// `None` when the decorator was applied directly to a method, outside of any stamp.
    pub fn stamp(&self) -> Option<&Descriptor> {
        self.stamp
    }
}
