//! burin-editor-core: Pure Rust rich-text editor state without host
//! dependencies.
//!
//! This crate provides:
//! - `Element`/`Node`/`Text` - the immutable, structurally shared content tree
//! - `Path` - structural addresses into the tree, with offset arithmetic
//! - `Selection`/`Range` - anchor/focus carets and their normalized spans
//! - `Value` + `reduce` - the single editor state and its pure transitions
//! - `NodeLookup`/`PathRegistry` - the node↔path boundary to the host
//! - `TypingGate` - the Idle/Typing window for deferred selection re-sync

pub mod actions;
pub mod execute;
pub mod host;
pub mod node;
pub mod path;
pub mod selection;
pub mod typing;
pub mod value;

pub use actions::{Action, Direction, InputType, action_for_input};
pub use execute::{Editor, reduce};
pub use host::{HostRange, HostSelection, NodeLookup, PathRegistry};
pub use node::{Element, ElementId, Node, Text};
pub use path::{Path, PathError};
pub use selection::{Range, Selection};
pub use smol_str::SmolStr;
pub use typing::{SettleToken, TypingGate, TypingState};
pub use value::Value;
