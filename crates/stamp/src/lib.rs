//! Composable object factories
//!
//! A [`Stamp`] is an immutable factory definition made of default properties, a method table and
//! a list of [`Composer`]s. Stamps compose: merging two stamps yields a new stamp whose composers
//! all run again over the merged definition before any [`Instance`] is produced.
//!
//! # Example
//!
//! ```
//! use micro_stamp::{MethodError, Stamp};
//! use serde_json::json;
//!
//! let counter = Stamp::builder()
//!     .name("Counter")
//!     .prop("count", 0)
//!     .method("increment", 0, |this, _args| {
//!         let next = this.int_prop("count")? + 1;
//!         this.set_prop("count", next);
//!         Ok::<_, MethodError>(json!(next))
//!     })
//!     .build();
//!
//! let mut instance = counter.create();
//! assert_eq!(instance.call("increment", &[]), Ok(json!(1)));
//! assert_eq!(instance.prop("count"), Some(&json!(1)));
//! ```

mod composer;
mod descriptor;
mod error;
mod instance;
mod method;
mod stamp;

pub use composer::composer_fn;
pub use composer::ComposeContext;
pub use composer::Composer;
pub use descriptor::Descriptor;
pub use error::argument;
pub use error::int_argument;
pub use error::int_value;
pub use error::MethodError;
pub use instance::Instance;
pub use method::Method;
pub use method::MethodTable;
pub use stamp::Stamp;
pub use stamp::StampBuilder;
