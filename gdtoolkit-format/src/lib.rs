//! GDScript formatter
//!
//! [`GdFormat`] parses a file, rejects it if the parser reported anything, and
//! prints the tree back in canonical layout. Comments are not part of the
//! tree; they are collected from the token stream and merged back into the
//! printed lines by source line (see [`layout`]).
//!
//! ```text
//! let formatter = GdFormat::new(FormatOptions::default());
//! assert_eq!(formatter.format("func f( a,b ):\n  return a+b\n")?, "func f(a, b):\n\treturn a + b\n");
//! ```

pub mod error;
mod expressions;
pub mod format;
pub mod gdscript;
pub mod layout;
pub mod options;
mod serializer;

pub use error::FormatError;
pub use format::Format;
pub use gdscript::GdFormat;
pub use options::FormatOptions;
