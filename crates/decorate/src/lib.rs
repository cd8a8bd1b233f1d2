//! Declarative method decoration for [`micro_stamp`] factories
//!
//! [`DecorateMethods::decorate_method`] registers a [`DecorationStep`] on a stamp: a composition
//! hook that, whenever the stamp's method table is assembled, wraps the named method with a
//! [`MethodDecorator`]. Steps apply in registration order and each one exactly once, however
//! often the stamp is composed into other stamps afterwards.
//!
//! # Example
//!
//! ```
//! use micro_decorate::{DecorateMethods, DecoratorMap, MethodDecorator};
//! use micro_stamp::{int_value, Stamp};
//! use serde_json::json;
//!
//! fn plus(name: &str, n: i64) -> MethodDecorator {
//!     MethodDecorator::named(name, move |ctx, _args| Ok(json!(int_value(&ctx.decoratee(&[])?)? + n)))
//! }
//!
//! let stamp = Stamp::builder()
//!     .prop("a", 1)
//!     .method("getA", 0, |this, _args| Ok(json!(this.int_prop("a")?)))
//!     .build()
//!     .decorate_method("getA", plus("plusTwo", 2))
//!     .decorate_methods(Some(DecoratorMap::from([("getA", plus("plusThree", 3))])));
//!
//! let mut instance = stamp.create();
//! assert_eq!(instance.call("getA", &[]), Ok(json!(6)));
//! assert_eq!(instance.method("getA").and_then(|m| m.name()), Some("plusThree(plusTwo(getA))"));
//! ```

mod context;
mod decorate_methods;
mod decorator_map;
mod method_decorator;
mod step;

pub mod name;

pub use context::DecoratorContext;
pub use decorate_methods::DecorateMethods;
pub use decorator_map::DecoratorMap;
pub use method_decorator::MethodDecorator;
pub use step::DecorationStep;
