//! Signature and argument-type resolution core for the squall SQL analyzer.
//!
//! This crate models the declared shape of function, procedure, and
//! table-valued-function calls: argument kinds (concrete and templated),
//! cardinalities, per-argument constraints, and whole-signature invariants.
//! Given occurrence counts bound by an external resolver, it expands a
//! signature into the flat list of concrete arguments present in one call.
//!
//! Function lookup, overload ranking, and expression evaluation live
//! elsewhere; this crate only validates and instantiates a single signature.

pub mod datatype;
pub mod functions;
pub mod proto;
pub mod scalar;
