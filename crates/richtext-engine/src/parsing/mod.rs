//! # Parsing
//!
//! The markup-to-document compiler.
//!
//! Each tag event is dispatched through a [`ParseContext`]: the context
//! resolves the tag's handler, lets it write to the current
//! [`DocumentBuilder`](crate::DocumentBuilder), and hands back the context
//! for the tag's content. Closing a tag restores the context captured when
//! it opened.
//!
//! ## Modules
//!
//! - **`context`**: [`ParseContext`] scope chain, handler resolution and the
//!   open/close protocol
//! - **`compiler`**: [`Compiler`] open-tag stack, whitespace handling and
//!   output splitting
//! - **`style`**: [`Style`] queries and [`DefaultStyle`]

pub mod compiler;
pub mod context;
pub mod style;

pub use compiler::{Compiler, compile, compile_markup};
pub use context::{ContextValue, ParseContext};
pub use style::{DefaultStyle, Style};
