//! # mdpeg_ast
//!
//! Element tree definitions for mdpeg.
//!
//! The parser builds its output as an intrusive tree of [`Element`]s: every
//! element points to its first child and to its next sibling. Child lists
//! are built back to front with [`list::cons`] and put in source order with
//! one [`list::reverse`].
//!
//! ## Architecture
//!
//! - Uses `bumpalo` for Arena allocation
//! - All elements of one parse are allocated in a single arena
//! - Elements are linked through `Cell`s, so shared references can be
//!   re-keyed and relinked while the tree is assembled
//! - Memory is freed all at once when the arena is dropped
//!
//! ## Example
//!
//! ```rust
//! use mdpeg_ast::{list, AstArena, ElementKind};
//!
//! let arena = AstArena::new();
//!
//! let mut inlines = None;
//! for word in ["Hello", " ", "world"] {
//!     inlines = Some(list::cons(arena.string(word), inlines));
//! }
//! let para = arena.list(ElementKind::Para, inlines);
//!
//! assert_eq!(para.plain_text(), "Hello world");
//! ```

mod arena;
mod dump;
mod element;
mod kind;
pub mod list;
mod span;
pub mod visitor;

pub use arena::AstArena;
pub use dump::dump;
pub use element::{Contents, Element, Link, Siblings};
pub use kind::ElementKind;
pub use span::{Position, Span};

pub use visitor::{VisitResult, Visitor};
