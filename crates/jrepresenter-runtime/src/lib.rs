//! Reference interpreter for generated units.
//!
//! Executes the functions of a [`GeneratedUnit`](jrepresenter_core::GeneratedUnit)
//! over JSON-like values, with the same observable behavior as the rendered
//! Java: key order, `_embedded` routing, null handling and casts.
//!
//! ```ignore
//! let mut runtime = Runtime::new();
//! runtime.load_all(compiler.compile_all()?);
//! let json = runtime
//!     .mapper("gen.com.foo.UserMapper")?
//!     .to_json(user, &RequestContext::default())?;
//! ```

mod cast;
pub mod context;
pub mod error;
mod interpreter;
pub mod runtime;
pub mod value;

pub use context::RequestContext;
pub use error::{Result, RuntimeError};
pub use runtime::{Mapper, Runtime};
pub use value::{Container, Model, Value};
