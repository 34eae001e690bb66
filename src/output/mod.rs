//! Tree rendering and display
//!
//! - `config` - Render configuration types
//! - `tree` - `TreeRenderer`, producing annotated tree lines and text
//! - `console` - Colored printing of rendered lines

mod config;
mod console;
mod tree;

pub use config::{IndentStyle, RenderConfig};
pub use console::{print_lines, write_lines};
pub use tree::{ItemCount, READ_ERROR_MARKER, TreeLine, TreeRenderer};
