//! Rig Kit
//!
//! A Unix-style toolkit for planning PC builds as plain-text JSON
//! documents: a file-backed part catalog, a pure compatibility/scoring
//! engine, a persisted build session, and a document store for saved
//! builds.

pub mod cli;
pub mod core;
pub mod model;
