//! Length-prefixed packing of protobuf messages.
//!
//! Packs a sequence of messages into one byte buffer, each prefixed with its
//! encoded length. The sequence of message types is a runtime contract
//! between writer and reader; nothing in the buffer identifies them.

use prost::Message;
use squall_error::{Result, ResultExt, SquallError};

#[derive(Debug)]
pub struct PackedEncoder<'a> {
    buf: &'a mut Vec<u8>,
}

impl<'a> PackedEncoder<'a> {
    /// Create an encoder appending to `buf`.
    ///
    /// Messages are written starting at the current end of the buffer, so
    /// encoders may be instantiated repeatedly against the same buffer.
    pub fn new(buf: &'a mut Vec<u8>) -> Self {
        PackedEncoder { buf }
    }

    /// Append the next message to the buffer.
    pub fn encode_next<M: Message>(&mut self, msg: &M) -> Result<()> {
        let msg_len = msg.encoded_len();
        self.buf.reserve(8 + msg_len);
        self.buf.extend_from_slice(&(msg_len as u64).to_le_bytes());
        msg.encode(self.buf).context("failed to encode message")?;
        Ok(())
    }
}

#[derive(Debug)]
pub struct PackedDecoder<'a> {
    buf: &'a [u8],
    n: usize,
}

impl<'a> PackedDecoder<'a> {
    /// Create a decoder reading from the start of `buf`.
    pub fn new(buf: &'a [u8]) -> Self {
        PackedDecoder { buf, n: 0 }
    }

    /// Decode the next message from the buffer.
    pub fn decode_next<M: Message + Default>(&mut self) -> Result<M> {
        let len_buf = self
            .buf
            .get(self.n..self.n + 8)
            .ok_or_else(|| SquallError::new("buffer too small to contain message length"))?;
        let msg_len = u64::from_le_bytes(len_buf.try_into().expect("slice is 8 bytes")) as usize;
        self.n += 8;

        let msg_buf = self
            .buf
            .get(self.n..self.n + msg_len)
            .ok_or_else(|| SquallError::new("buffer too small to contain message"))?;
        let msg = M::decode(msg_buf).context("failed to decode message")?;
        self.n += msg_len;

        Ok(msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generated::schema::{DataType, EmptyMeta, TvfColumn, data_type};
    use crate::generated::signature::FunctionSignatureOptions;

    fn int64_type() -> DataType {
        DataType {
            value: Some(data_type::Value::TypeInt64(EmptyMeta {})),
        }
    }

    #[test]
    fn single_message() {
        let column = TvfColumn {
            name: "user_id".to_string(),
            datatype: Some(int64_type()),
        };

        let mut buf = Vec::new();
        let mut encoder = PackedEncoder::new(&mut buf);
        encoder.encode_next(&column).unwrap();

        let mut decoder = PackedDecoder::new(&buf);
        let got: TvfColumn = decoder.decode_next().unwrap();

        assert_eq!(column, got);
    }

    #[test]
    fn multiple_messages() {
        let column = TvfColumn {
            name: "ts".to_string(),
            datatype: Some(int64_type()),
        };
        let options = FunctionSignatureOptions {
            is_deprecated: true,
            additional_deprecation_warning: vec!["use v2 instead".to_string()],
            required_feature: Vec::new(),
            is_aliased_signature: false,
        };

        let mut buf = Vec::new();
        let mut encoder = PackedEncoder::new(&mut buf);
        encoder.encode_next(&column).unwrap();
        encoder.encode_next(&options).unwrap();

        let mut decoder = PackedDecoder::new(&buf);
        let got_column: TvfColumn = decoder.decode_next().unwrap();
        let got_options: FunctionSignatureOptions = decoder.decode_next().unwrap();

        assert_eq!(column, got_column);
        assert_eq!(options, got_options);
    }

    #[test]
    fn decode_past_end_errors() {
        let mut buf = Vec::new();
        let mut encoder = PackedEncoder::new(&mut buf);
        encoder.encode_next(&EmptyMeta {}).unwrap();

        let mut decoder = PackedDecoder::new(&buf);
        let _: EmptyMeta = decoder.decode_next().unwrap();
        let err = decoder.decode_next::<EmptyMeta>().unwrap_err();
        assert!(err.to_string().contains("buffer too small"));
    }
}
