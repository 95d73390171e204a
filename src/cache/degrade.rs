//! Shallow redaction of values that cannot be fully serialized.
//!
//! [`degrade`] walks only the top level of a value. Every field (or element)
//! whose JSON form is an object or array, or whose serialization fails, is
//! replaced with [`COMPLEX_DATA_SENTINEL`]. Scalars are kept.
//!
//! `null` (a `None` or unit field) counts as a scalar and is kept as `null`,
//! not replaced with the sentinel.
//!
//! Enum variant wrappers are transparent: `{"Variant": {..}}` keeps the
//! wrapper and redacts one level below it.

use serde::ser::{self, Serialize};
use serde_json::{Error, Map, Value};

/// Marker written in place of nested data in a degraded value.
pub const COMPLEX_DATA_SENTINEL: &str = "[complex-data]";

/// Build the degraded form of `value`.
///
/// Fails only when the value's own `Serialize` impl reports an error before
/// producing any top-level shape.
pub fn degrade<T: Serialize + ?Sized>(value: &T) -> Result<Value, Error> {
    value.serialize(ShallowSerializer)
}

fn sentinel() -> Value {
    Value::String(COMPLEX_DATA_SENTINEL.to_string())
}

/// Keep scalars, redact everything else.
fn redact<T: Serialize + ?Sized>(value: &T) -> Value {
    match serde_json::to_value(value) {
        Ok(Value::Object(_)) | Ok(Value::Array(_)) | Err(_) => sentinel(),
        Ok(scalar) => scalar,
    }
}

/// Render a map key as a JSON object key. `None` drops the entry.
fn key_string<T: Serialize + ?Sized>(key: &T) -> Option<String> {
    match serde_json::to_value(key) {
        Ok(Value::String(s)) => Some(s),
        Ok(other) => Some(other.to_string()),
        Err(_) => None,
    }
}

fn wrap_variant(variant: &'static str, inner: Value) -> Value {
    let mut map = Map::new();
    map.insert(variant.to_string(), inner);
    Value::Object(map)
}

struct ShallowSerializer;

impl ser::Serializer for ShallowSerializer {
    type Ok = Value;
    type Error = Error;

    type SerializeSeq = ShallowSeq;
    type SerializeTuple = ShallowSeq;
    type SerializeTupleStruct = ShallowSeq;
    type SerializeTupleVariant = ShallowSeq;
    type SerializeMap = ShallowMap;
    type SerializeStruct = ShallowMap;
    type SerializeStructVariant = ShallowMap;

    fn serialize_bool(self, v: bool) -> Result<Value, Error> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value, Error> {
        Ok(Value::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<Value, Error> {
        Ok(Value::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<Value, Error> {
        Ok(Value::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Value, Error> {
        Ok(Value::from(v))
    }

    fn serialize_i128(self, v: i128) -> Result<Value, Error> {
        serde_json::to_value(v)
    }

    fn serialize_u8(self, v: u8) -> Result<Value, Error> {
        Ok(Value::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Value, Error> {
        Ok(Value::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<Value, Error> {
        Ok(Value::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<Value, Error> {
        Ok(Value::from(v))
    }

    fn serialize_u128(self, v: u128) -> Result<Value, Error> {
        serde_json::to_value(v)
    }

    fn serialize_f32(self, v: f32) -> Result<Value, Error> {
        serde_json::to_value(v)
    }

    fn serialize_f64(self, v: f64) -> Result<Value, Error> {
        serde_json::to_value(v)
    }

    fn serialize_char(self, v: char) -> Result<Value, Error> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Value, Error> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value, Error> {
        Ok(Value::Array(v.iter().map(|b| Value::from(*b)).collect()))
    }

    fn serialize_none(self) -> Result<Value, Error> {
        Ok(Value::Null)
    }

    fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Result<Value, Error> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value, Error> {
        Ok(Value::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value, Error> {
        Ok(Value::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value, Error> {
        Ok(Value::String(variant.to_string()))
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<Value, Error> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value, Error> {
        let inner = degrade(value).unwrap_or_else(|_| sentinel());
        Ok(wrap_variant(variant, inner))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<ShallowSeq, Error> {
        Ok(ShallowSeq::new(None, len))
    }

    fn serialize_tuple(self, len: usize) -> Result<ShallowSeq, Error> {
        Ok(ShallowSeq::new(None, Some(len)))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<ShallowSeq, Error> {
        Ok(ShallowSeq::new(None, Some(len)))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<ShallowSeq, Error> {
        Ok(ShallowSeq::new(Some(variant), Some(len)))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<ShallowMap, Error> {
        Ok(ShallowMap::new(None))
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<ShallowMap, Error> {
        Ok(ShallowMap::new(None))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<ShallowMap, Error> {
        Ok(ShallowMap::new(Some(variant)))
    }
}

struct ShallowSeq {
    variant: Option<&'static str>,
    items: Vec<Value>,
}

impl ShallowSeq {
    fn new(variant: Option<&'static str>, len: Option<usize>) -> Self {
        Self {
            variant,
            items: Vec::with_capacity(len.unwrap_or(0)),
        }
    }

    fn push<T: Serialize + ?Sized>(&mut self, value: &T) {
        self.items.push(redact(value));
    }

    fn finish(self) -> Value {
        let array = Value::Array(self.items);
        match self.variant {
            Some(variant) => wrap_variant(variant, array),
            None => array,
        }
    }
}

impl ser::SerializeSeq for ShallowSeq {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), Error> {
        self.push(value);
        Ok(())
    }

    fn end(self) -> Result<Value, Error> {
        Ok(self.finish())
    }
}

impl ser::SerializeTuple for ShallowSeq {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), Error> {
        self.push(value);
        Ok(())
    }

    fn end(self) -> Result<Value, Error> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleStruct for ShallowSeq {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), Error> {
        self.push(value);
        Ok(())
    }

    fn end(self) -> Result<Value, Error> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleVariant for ShallowSeq {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), Error> {
        self.push(value);
        Ok(())
    }

    fn end(self) -> Result<Value, Error> {
        Ok(self.finish())
    }
}

struct ShallowMap {
    variant: Option<&'static str>,
    map: Map<String, Value>,
    // Outer None: no key pending. Inner None: pending key is unrepresentable.
    next_key: Option<Option<String>>,
}

impl ShallowMap {
    fn new(variant: Option<&'static str>) -> Self {
        Self {
            variant,
            map: Map::new(),
            next_key: None,
        }
    }

    fn finish(self) -> Value {
        let object = Value::Object(self.map);
        match self.variant {
            Some(variant) => wrap_variant(variant, object),
            None => object,
        }
    }
}

impl ser::SerializeMap for ShallowMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_key<T: Serialize + ?Sized>(&mut self, key: &T) -> Result<(), Error> {
        self.next_key = Some(key_string(key));
        Ok(())
    }

    fn serialize_value<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), Error> {
        match self.next_key.take() {
            Some(Some(key)) => {
                self.map.insert(key, redact(value));
                Ok(())
            }
            Some(None) => Ok(()),
            None => Err(<Error as ser::Error>::custom("serialize_value called before serialize_key")),
        }
    }

    fn end(self) -> Result<Value, Error> {
        Ok(self.finish())
    }
}

impl ser::SerializeStruct for ShallowMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), Error> {
        self.map.insert(key.to_string(), redact(value));
        Ok(())
    }

    fn end(self) -> Result<Value, Error> {
        Ok(self.finish())
    }
}

impl ser::SerializeStructVariant for ShallowMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), Error> {
        self.map.insert(key.to_string(), redact(value));
        Ok(())
    }

    fn end(self) -> Result<Value, Error> {
        Ok(self.finish())
    }
}
