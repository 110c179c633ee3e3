//! Java back end for jrepresenter.
//!
//! Renders a [`GeneratedUnit`](jrepresenter_core::GeneratedUnit) to the
//! source of a Java mapper class. Nothing is written to disk; callers get
//! [`JavaFile`] values with a relative path and the source text.

pub mod backend;
pub mod error;

pub use backend::{JavaFile, render_all, render_unit};
pub use error::{RenderError, Result};
