//! Wire-form messages and conversion traits for squall.
//!
//! Everything that crosses a serialization boundary (catalog distribution,
//! RPC) is defined in this crate. There should be a minimal amount of logic
//! here; domain types implement [`ProtoConv`] next to their own definitions.

pub mod generated;
pub mod packed;

use squall_error::Result;

/// Conversion of a domain type to/from its protobuf message.
pub trait ProtoConv: Sized {
    type ProtoType;

    fn to_proto(&self) -> Result<Self::ProtoType>;

    fn from_proto(proto: Self::ProtoType) -> Result<Self>;
}
