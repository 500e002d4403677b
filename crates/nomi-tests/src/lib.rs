//! Cross-crate test suite for Nomi.
//!
//! Integration tests drive the engine through its public surface with the
//! in-memory collaborators from `nomi_engine::testing`. Shared builders live
//! in [`helpers`].

pub mod helpers;
