use serde::ser::{self, Serialize};

use super::{Float, Integer, Value, Variant, VariantData};
use crate::runtime::Error;

/// Serialize implementation for values, so that captured values can be
/// passed back into anything accepting `Serialize`.
impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        use serde::ser::{
            SerializeMap as _, SerializeSeq as _, SerializeStruct as _,
            SerializeStructVariant as _, SerializeTupleStruct as _, SerializeTupleVariant as _,
        };

        match self {
            Value::Unit => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Char(c) => serializer.serialize_char(*c),
            Value::Integer(n) => match *n {
                Integer::I8(n) => serializer.serialize_i8(n),
                Integer::I16(n) => serializer.serialize_i16(n),
                Integer::I32(n) => serializer.serialize_i32(n),
                Integer::I64(n) => serializer.serialize_i64(n),
                Integer::I128(n) => serializer.serialize_i128(n),
                Integer::U8(n) => serializer.serialize_u8(n),
                Integer::U16(n) => serializer.serialize_u16(n),
                Integer::U32(n) => serializer.serialize_u32(n),
                Integer::U64(n) => serializer.serialize_u64(n),
                Integer::U128(n) => serializer.serialize_u128(n),
            },
            Value::Float(Float::F32(n)) => serializer.serialize_f32(*n),
            Value::Float(Float::F64(n)) => serializer.serialize_f64(*n),
            Value::String(string) => serializer.serialize_str(string),
            Value::Bytes(bytes) => serializer.serialize_bytes(bytes),
            Value::Option(None) => serializer.serialize_none(),
            Value::Option(Some(value)) => serializer.serialize_some(&**value),
            Value::Vec(values) => {
                let mut serializer = serializer.serialize_seq(Some(values.len()))?;

                for value in values {
                    serializer.serialize_element(value)?;
                }

                serializer.end()
            }
            Value::Map(entries) => {
                let mut serializer = serializer.serialize_map(Some(entries.len()))?;

                for (key, value) in entries {
                    serializer.serialize_entry(key, value)?;
                }

                serializer.end()
            }
            Value::UnitStruct(name) => serializer.serialize_unit_struct(*name),
            Value::Newtype(name, value) => serializer.serialize_newtype_struct(*name, &**value),
            Value::TupleStruct(name, values) => {
                let mut serializer = serializer.serialize_tuple_struct(*name, values.len())?;

                for value in values {
                    serializer.serialize_field(value)?;
                }

                serializer.end()
            }
            Value::Struct(name, fields) => {
                let mut serializer = serializer.serialize_struct(*name, fields.len())?;

                for (key, value) in fields {
                    serializer.serialize_field(*key, value)?;
                }

                serializer.end()
            }
            Value::Variant(variant) => {
                let Variant {
                    enum_name,
                    index,
                    name,
                    ref data,
                } = **variant;

                match data {
                    VariantData::Unit => serializer.serialize_unit_variant(enum_name, index, name),
                    VariantData::Newtype(value) => {
                        serializer.serialize_newtype_variant(enum_name, index, name, &**value)
                    }
                    VariantData::Tuple(values) => {
                        let mut serializer = serializer.serialize_tuple_variant(
                            enum_name,
                            index,
                            name,
                            values.len(),
                        )?;

                        for value in values {
                            serializer.serialize_field(value)?;
                        }

                        serializer.end()
                    }
                    VariantData::Struct(fields) => {
                        let mut serializer = serializer.serialize_struct_variant(
                            enum_name,
                            index,
                            name,
                            fields.len(),
                        )?;

                        for (key, value) in fields {
                            serializer.serialize_field(*key, value)?;
                        }

                        serializer.end()
                    }
                }
            }
        }
    }
}

/// A serializer which captures the shape of a value into a [`Value`].
///
/// Every nested value increases the depth by one, and serialization fails
/// once the depth exceeds the configured limit.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ValueSerializer {
    depth: usize,
    limit: usize,
}

impl ValueSerializer {
    pub(crate) fn new(limit: usize) -> Self {
        Self { depth: 0, limit }
    }

    /// Construct the serializer used for values nested inside of the current
    /// one.
    fn nested(self) -> Result<Self, Error> {
        let depth = self.depth + 1;

        if depth > self.limit {
            return Err(Error::DepthLimit { limit: self.limit });
        }

        Ok(Self {
            depth,
            limit: self.limit,
        })
    }

    fn capture<T>(self, value: &T) -> Result<Value, Error>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self.nested()?)
    }
}

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = Error;
    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeTupleStruct;
    type SerializeTupleVariant = SerializeTupleVariant;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeStruct;
    type SerializeStructVariant = SerializeStructVariant;

    #[inline]
    fn serialize_bool(self, v: bool) -> Result<Value, Error> {
        Ok(Value::Bool(v))
    }

    #[inline]
    fn serialize_i8(self, v: i8) -> Result<Value, Error> {
        Ok(Value::Integer(Integer::I8(v)))
    }

    #[inline]
    fn serialize_i16(self, v: i16) -> Result<Value, Error> {
        Ok(Value::Integer(Integer::I16(v)))
    }

    #[inline]
    fn serialize_i32(self, v: i32) -> Result<Value, Error> {
        Ok(Value::Integer(Integer::I32(v)))
    }

    #[inline]
    fn serialize_i64(self, v: i64) -> Result<Value, Error> {
        Ok(Value::Integer(Integer::I64(v)))
    }

    #[inline]
    fn serialize_i128(self, v: i128) -> Result<Value, Error> {
        Ok(Value::Integer(Integer::I128(v)))
    }

    #[inline]
    fn serialize_u8(self, v: u8) -> Result<Value, Error> {
        Ok(Value::Integer(Integer::U8(v)))
    }

    #[inline]
    fn serialize_u16(self, v: u16) -> Result<Value, Error> {
        Ok(Value::Integer(Integer::U16(v)))
    }

    #[inline]
    fn serialize_u32(self, v: u32) -> Result<Value, Error> {
        Ok(Value::Integer(Integer::U32(v)))
    }

    #[inline]
    fn serialize_u64(self, v: u64) -> Result<Value, Error> {
        Ok(Value::Integer(Integer::U64(v)))
    }

    #[inline]
    fn serialize_u128(self, v: u128) -> Result<Value, Error> {
        Ok(Value::Integer(Integer::U128(v)))
    }

    #[inline]
    fn serialize_f32(self, v: f32) -> Result<Value, Error> {
        Ok(Value::Float(Float::F32(v)))
    }

    #[inline]
    fn serialize_f64(self, v: f64) -> Result<Value, Error> {
        Ok(Value::Float(Float::F64(v)))
    }

    #[inline]
    fn serialize_char(self, v: char) -> Result<Value, Error> {
        Ok(Value::Char(v))
    }

    #[inline]
    fn serialize_str(self, v: &str) -> Result<Value, Error> {
        Ok(Value::String(v.to_owned()))
    }

    #[inline]
    fn serialize_bytes(self, v: &[u8]) -> Result<Value, Error> {
        Ok(Value::Bytes(v.to_vec()))
    }

    #[inline]
    fn serialize_none(self) -> Result<Value, Error> {
        Ok(Value::Option(None))
    }

    fn serialize_some<T>(self, value: &T) -> Result<Value, Error>
    where
        T: ?Sized + Serialize,
    {
        Ok(Value::Option(Some(Box::new(self.capture(value)?))))
    }

    #[inline]
    fn serialize_unit(self) -> Result<Value, Error> {
        Ok(Value::Unit)
    }

    #[inline]
    fn serialize_unit_struct(self, name: &'static str) -> Result<Value, Error> {
        Ok(Value::UnitStruct(name))
    }

    fn serialize_unit_variant(
        self,
        name: &'static str,
        variant_index: u32,
        variant: &'static str,
    ) -> Result<Value, Error> {
        Ok(Value::Variant(Box::new(Variant {
            enum_name: name,
            index: variant_index,
            name: variant,
            data: VariantData::Unit,
        })))
    }

    fn serialize_newtype_struct<T>(self, name: &'static str, value: &T) -> Result<Value, Error>
    where
        T: ?Sized + Serialize,
    {
        Ok(Value::Newtype(name, Box::new(self.capture(value)?)))
    }

    fn serialize_newtype_variant<T>(
        self,
        name: &'static str,
        variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value, Error>
    where
        T: ?Sized + Serialize,
    {
        let value = self.capture(value)?;

        Ok(Value::Variant(Box::new(Variant {
            enum_name: name,
            index: variant_index,
            name: variant,
            data: VariantData::Newtype(Box::new(value)),
        })))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec, Error> {
        Ok(SerializeVec {
            serializer: self.nested()?,
            values: Vec::with_capacity(len.unwrap_or_default()),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec, Error> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(
        self,
        name: &'static str,
        len: usize,
    ) -> Result<SerializeTupleStruct, Error> {
        Ok(SerializeTupleStruct {
            name,
            inner: self.serialize_seq(Some(len))?,
        })
    }

    fn serialize_tuple_variant(
        self,
        name: &'static str,
        variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeTupleVariant, Error> {
        Ok(SerializeTupleVariant {
            name,
            index: variant_index,
            variant,
            inner: self.serialize_seq(Some(len))?,
        })
    }

    fn serialize_map(self, len: Option<usize>) -> Result<SerializeMap, Error> {
        Ok(SerializeMap {
            serializer: self.nested()?,
            entries: Vec::with_capacity(len.unwrap_or_default()),
            key: None,
        })
    }

    fn serialize_struct(self, name: &'static str, len: usize) -> Result<SerializeStruct, Error> {
        Ok(SerializeStruct {
            name,
            serializer: self.nested()?,
            fields: Vec::with_capacity(len),
        })
    }

    fn serialize_struct_variant(
        self,
        name: &'static str,
        variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeStructVariant, Error> {
        Ok(SerializeStructVariant {
            index: variant_index,
            variant,
            inner: self.serialize_struct(name, len)?,
        })
    }
}

pub(crate) struct SerializeVec {
    serializer: ValueSerializer,
    values: Vec<Value>,
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<(), Error>
    where
        T: ?Sized + Serialize,
    {
        self.values.push(value.serialize(self.serializer)?);
        Ok(())
    }

    fn end(self) -> Result<Value, Error> {
        Ok(Value::Vec(self.values))
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<(), Error>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value, Error> {
        ser::SerializeSeq::end(self)
    }
}

pub(crate) struct SerializeTupleStruct {
    name: &'static str,
    inner: SerializeVec,
}

impl ser::SerializeTupleStruct for SerializeTupleStruct {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<(), Error>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(&mut self.inner, value)
    }

    fn end(self) -> Result<Value, Error> {
        Ok(Value::TupleStruct(self.name, self.inner.values))
    }
}

pub(crate) struct SerializeTupleVariant {
    name: &'static str,
    index: u32,
    variant: &'static str,
    inner: SerializeVec,
}

impl ser::SerializeTupleVariant for SerializeTupleVariant {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<(), Error>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(&mut self.inner, value)
    }

    fn end(self) -> Result<Value, Error> {
        Ok(Value::Variant(Box::new(Variant {
            enum_name: self.name,
            index: self.index,
            name: self.variant,
            data: VariantData::Tuple(self.inner.values),
        })))
    }
}

pub(crate) struct SerializeMap {
    serializer: ValueSerializer,
    entries: Vec<(Value, Value)>,
    key: Option<Value>,
}

impl ser::SerializeMap for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<(), Error>
    where
        T: ?Sized + Serialize,
    {
        self.key = Some(key.serialize(self.serializer)?);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<(), Error>
    where
        T: ?Sized + Serialize,
    {
        let Some(key) = self.key.take() else {
            return Err(Error::Custom(String::from(
                "map value serialized before its key",
            )));
        };

        let value = value.serialize(self.serializer)?;
        self.entries.push((key, value));
        Ok(())
    }

    fn end(self) -> Result<Value, Error> {
        Ok(Value::Map(self.entries))
    }
}

pub(crate) struct SerializeStruct {
    name: &'static str,
    serializer: ValueSerializer,
    fields: Vec<(&'static str, Value)>,
}

impl ser::SerializeStruct for SerializeStruct {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<(), Error>
    where
        T: ?Sized + Serialize,
    {
        let value = value.serialize(self.serializer)?;
        self.fields.push((key, value));
        Ok(())
    }

    fn end(self) -> Result<Value, Error> {
        Ok(Value::Struct(self.name, self.fields))
    }
}

pub(crate) struct SerializeStructVariant {
    index: u32,
    variant: &'static str,
    inner: SerializeStruct,
}

impl ser::SerializeStructVariant for SerializeStructVariant {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<(), Error>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeStruct::serialize_field(&mut self.inner, key, value)
    }

    fn end(self) -> Result<Value, Error> {
        Ok(Value::Variant(Box::new(Variant {
            enum_name: self.inner.name,
            index: self.index,
            name: self.variant,
            data: VariantData::Struct(self.inner.fields),
        })))
    }
}
