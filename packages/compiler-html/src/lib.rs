//! # Blockwork HTML Compiler
//!
//! Serializes a render tree to an HTML string. This is the public-renderer
//! surface: it consumes the same Layout Document + Theme Document + Registry
//! as the editor canvas (via `blockwork-render`) and must reproduce the
//! identical structure outside the editor.

mod compiler;


pub use compiler::{compile_document, compile_tree, CompileOptions};
