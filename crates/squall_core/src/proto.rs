//! Wire conversions for types and values.

use squall_error::{OptionExt, Result};
use squall_proto::ProtoConv;
use squall_proto::generated::schema::{self, data_type, scalar_value};

use crate::datatype::{ArrayTypeMeta, DataType, DecimalTypeMeta, NamedTypeMeta, StructTypeMeta};
use crate::scalar::{ArrayValue, ScalarValue};

impl ProtoConv for DataType {
    type ProtoType = schema::DataType;

    fn to_proto(&self) -> Result<Self::ProtoType> {
        use data_type::Value;

        let value = match self {
            DataType::Boolean => Value::TypeBoolean(schema::EmptyMeta {}),
            DataType::Int32 => Value::TypeInt32(schema::EmptyMeta {}),
            DataType::Int64 => Value::TypeInt64(schema::EmptyMeta {}),
            DataType::UInt32 => Value::TypeUint32(schema::EmptyMeta {}),
            DataType::UInt64 => Value::TypeUint64(schema::EmptyMeta {}),
            DataType::Float32 => Value::TypeFloat32(schema::EmptyMeta {}),
            DataType::Float64 => Value::TypeFloat64(schema::EmptyMeta {}),
            DataType::Decimal64(meta) => Value::TypeDecimal64(schema::DecimalTypeMeta {
                precision: meta.precision.into(),
                scale: meta.scale.into(),
            }),
            DataType::Utf8 => Value::TypeUtf8(schema::EmptyMeta {}),
            DataType::Binary => Value::TypeBinary(schema::EmptyMeta {}),
            DataType::Date => Value::TypeDate(schema::EmptyMeta {}),
            DataType::Timestamp => Value::TypeTimestamp(schema::EmptyMeta {}),
            DataType::Interval => Value::TypeInterval(schema::EmptyMeta {}),
            DataType::Array(meta) => Value::TypeArray(Box::new(schema::ArrayTypeMeta {
                element: Some(Box::new(meta.element.to_proto()?)),
            })),
            DataType::Struct(meta) => Value::TypeStruct(schema::StructTypeMeta {
                fields: meta
                    .fields
                    .iter()
                    .map(|(name, typ)| {
                        Ok(schema::StructTypeField {
                            name: name.clone(),
                            datatype: Some(typ.to_proto()?),
                        })
                    })
                    .collect::<Result<Vec<_>>>()?,
            }),
            DataType::Proto(meta) => Value::TypeProto(schema::NamedTypeMeta {
                name: meta.name.clone(),
            }),
            DataType::Enum(meta) => Value::TypeEnum(schema::NamedTypeMeta {
                name: meta.name.clone(),
            }),
        };

        Ok(schema::DataType { value: Some(value) })
    }

    fn from_proto(proto: Self::ProtoType) -> Result<Self> {
        use data_type::Value;

        Ok(match proto.value.required("data type value")? {
            Value::TypeBoolean(_) => DataType::Boolean,
            Value::TypeInt32(_) => DataType::Int32,
            Value::TypeInt64(_) => DataType::Int64,
            Value::TypeUint32(_) => DataType::UInt32,
            Value::TypeUint64(_) => DataType::UInt64,
            Value::TypeFloat32(_) => DataType::Float32,
            Value::TypeFloat64(_) => DataType::Float64,
            Value::TypeDecimal64(meta) => DataType::Decimal64(DecimalTypeMeta {
                precision: meta.precision as u8,
                scale: meta.scale as i8,
            }),
            Value::TypeUtf8(_) => DataType::Utf8,
            Value::TypeBinary(_) => DataType::Binary,
            Value::TypeDate(_) => DataType::Date,
            Value::TypeTimestamp(_) => DataType::Timestamp,
            Value::TypeInterval(_) => DataType::Interval,
            Value::TypeArray(meta) => {
                let element = meta.element.required("array element type")?;
                DataType::Array(ArrayTypeMeta {
                    element: Box::new(DataType::from_proto(*element)?),
                })
            }
            Value::TypeStruct(meta) => DataType::Struct(StructTypeMeta {
                fields: meta
                    .fields
                    .into_iter()
                    .map(|field| {
                        let datatype = field.datatype.required("struct field type")?;
                        Ok((field.name, DataType::from_proto(datatype)?))
                    })
                    .collect::<Result<Vec<_>>>()?,
            }),
            Value::TypeProto(meta) => DataType::Proto(NamedTypeMeta { name: meta.name }),
            Value::TypeEnum(meta) => DataType::Enum(NamedTypeMeta { name: meta.name }),
        })
    }
}

impl ProtoConv for ScalarValue {
    type ProtoType = schema::ScalarValue;

    fn to_proto(&self) -> Result<Self::ProtoType> {
        use scalar_value::Value;

        let value = match self {
            ScalarValue::Null(t) => Value::ValueNull(t.to_proto()?),
            ScalarValue::Boolean(v) => Value::ValueBoolean(*v),
            ScalarValue::Int32(v) => Value::ValueInt32(*v),
            ScalarValue::Int64(v) => Value::ValueInt64(*v),
            ScalarValue::UInt32(v) => Value::ValueUint32(*v),
            ScalarValue::UInt64(v) => Value::ValueUint64(*v),
            ScalarValue::Float32(v) => Value::ValueFloat32(*v),
            ScalarValue::Float64(v) => Value::ValueFloat64(*v),
            ScalarValue::Utf8(v) => Value::ValueUtf8(v.clone()),
            ScalarValue::Binary(v) => Value::ValueBinary(v.clone()),
            ScalarValue::Date(v) => Value::ValueDate(*v),
            ScalarValue::Timestamp(v) => Value::ValueTimestamp(*v),
            ScalarValue::Array(arr) => Value::ValueArray(schema::ArrayValue {
                element_type: Some(arr.element_type().to_proto()?),
                values: arr
                    .values()
                    .iter()
                    .map(|v| v.to_proto())
                    .collect::<Result<Vec<_>>>()?,
            }),
        };

        Ok(schema::ScalarValue { value: Some(value) })
    }

    fn from_proto(proto: Self::ProtoType) -> Result<Self> {
        use scalar_value::Value;

        Ok(match proto.value.required("scalar value")? {
            Value::ValueNull(t) => ScalarValue::Null(DataType::from_proto(t)?),
            Value::ValueBoolean(v) => ScalarValue::Boolean(v),
            Value::ValueInt32(v) => ScalarValue::Int32(v),
            Value::ValueInt64(v) => ScalarValue::Int64(v),
            Value::ValueUint32(v) => ScalarValue::UInt32(v),
            Value::ValueUint64(v) => ScalarValue::UInt64(v),
            Value::ValueFloat32(v) => ScalarValue::Float32(v),
            Value::ValueFloat64(v) => ScalarValue::Float64(v),
            Value::ValueUtf8(v) => ScalarValue::Utf8(v),
            Value::ValueBinary(v) => ScalarValue::Binary(v),
            Value::ValueDate(v) => ScalarValue::Date(v),
            Value::ValueTimestamp(v) => ScalarValue::Timestamp(v),
            Value::ValueArray(arr) => {
                let element_type = DataType::from_proto(arr.element_type.required("array element type")?)?;
                let values = arr
                    .values
                    .into_iter()
                    .map(ScalarValue::from_proto)
                    .collect::<Result<Vec<_>>>()?;
                ScalarValue::Array(ArrayValue::try_new(element_type, values)?)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip_type(datatype: DataType) {
        let proto = datatype.to_proto().unwrap();
        let got = DataType::from_proto(proto).unwrap();
        assert_eq!(datatype, got);
    }

    fn roundtrip_value(value: ScalarValue) {
        let proto = value.to_proto().unwrap();
        let got = ScalarValue::from_proto(proto).unwrap();
        assert_eq!(value, got);
    }

    #[test]
    fn datatype_roundtrips() {
        roundtrip_type(DataType::Int64);
        roundtrip_type(DataType::Decimal64(crate::datatype::DecimalTypeMeta::new(18, 2)));
        roundtrip_type(DataType::array(DataType::array(DataType::Utf8)));
        roundtrip_type(DataType::struct_type(vec![
            ("a".to_string(), DataType::Int64),
            ("b".to_string(), DataType::array(DataType::Boolean)),
        ]));
        roundtrip_type(DataType::proto("my.pkg.Event"));
        roundtrip_type(DataType::enum_type("my.pkg.Color"));
    }

    #[test]
    fn scalar_roundtrips() {
        roundtrip_value(ScalarValue::Null(DataType::array(DataType::Int64)));
        roundtrip_value(ScalarValue::Boolean(false));
        roundtrip_value(ScalarValue::from("hello"));
        roundtrip_value(ScalarValue::Binary(vec![0, 1, 2]));
        roundtrip_value(ScalarValue::Timestamp(1_700_000_000_000_000));
        roundtrip_value(ScalarValue::Array(
            ArrayValue::try_new(DataType::Int64, vec![1i64.into(), 2i64.into()]).unwrap(),
        ));
    }

    #[test]
    fn missing_value_is_internal() {
        let err = DataType::from_proto(schema::DataType { value: None }).unwrap_err();
        assert!(err.is_internal());
    }
}
