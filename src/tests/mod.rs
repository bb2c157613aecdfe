//! Internal test modules - whitebox tests with crate access
//!
//! Tests here drive several modules together and may reach crate-private
//! setters to build exact layouts without going through the tree model.
