//! Function signature modeling.
//!
//! A [`signature::FunctionSignature`] is the declared shape of one overload
//! of a function, procedure, or table-valued function: an ordered list of
//! [`argument::FunctionArgumentType`]s plus a result type. Signatures are
//! immutable value objects; binding a signature to a call site happens by
//! constructing argument types with occurrence counts and letting the
//! signature expand them into the concrete argument list.

pub mod argument;
pub mod options;
pub mod proto;
pub mod signature;
pub mod table;
