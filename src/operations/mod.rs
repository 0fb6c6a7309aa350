//! Operations module for bundles
//!
//! High-level operations that coordinate the configuration store with the
//! install session:
//! - Bundle editing: create, remove, add and remove apps and sources
//! - Bundle exchange: import and export of standalone bundle documents
//! - Bundle apply: precondition checks followed by a best-effort install

pub mod bundle;
