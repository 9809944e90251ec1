//! Content model for generated documents.
//!
//! This module defines the plain data handed to the renderer: the ordered
//! pages of a document, the run formatting attached to rendered text, and the
//! metadata embedded in the package properties parts. None of these types
//! carry behavior beyond construction helpers.

mod metadata;
mod page;
mod style;

pub use metadata::*;
pub use page::*;
pub use style::*;
