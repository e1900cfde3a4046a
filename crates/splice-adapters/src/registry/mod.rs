//! Registry editors.
//!
//! An editor turns a [`RegistryEdit`](splice_core::domain::RegistryEdit) into
//! text: it parses the registry source, finds the declaration the edit
//! targets, and inserts the element and import without reformatting anything
//! else.

mod splice;
mod typescript;

pub use typescript::TypeScriptRegistryEditor;
