//! The serializable value vocabulary.

use std::collections::BTreeMap;

use gempack::Result;

use crate::serializer::Deserializer;
use crate::serializer::Serializer;

/// A value that can cross the wire.
///
/// One implementation drives both directions, so a type's encoding has a
/// single source of truth: loading what was just saved yields an equal
/// value, and the property composes through tuples.
///
/// The built-in vocabulary is fixed: `u32`, `String`, `Vec<u32>`,
/// `Vec<String>`, fixed-length arrays of non-`bool` fixed-width integers,
/// `BTreeMap` keyed by `u32` or `String`, tuples of supported types, and
/// `()` (which writes and reads nothing). Anything else must implement
/// this trait itself, routing each subfield through
/// [`Serializer::put`]/[`Deserializer::take`] in the same fixed order;
/// handing an unsupported type to the framework is a compile-time error.
pub trait Wire: Sized {
    fn save(&self, msg: &mut Serializer<'_>) -> Result<()>;
    fn load(msg: &mut Deserializer<'_>) -> Result<Self>;
}

impl Wire for u32 {
    fn save(&self, msg: &mut Serializer<'_>) -> Result<()> {
        msg.put_word(*self);
        Ok(())
    }

    fn load(msg: &mut Deserializer<'_>) -> Result<Self> {
        msg.take_word()
    }
}

impl Wire for String {
    fn save(&self, msg: &mut Serializer<'_>) -> Result<()> {
        msg.put_string(self);
        Ok(())
    }

    fn load(msg: &mut Deserializer<'_>) -> Result<Self> {
        msg.take_string()
    }
}

impl Wire for Vec<u32> {
    fn save(&self, msg: &mut Serializer<'_>) -> Result<()> {
        msg.put_word_array(self.clone());
        Ok(())
    }

    fn load(msg: &mut Deserializer<'_>) -> Result<Self> {
        msg.take_word_array()
    }
}

impl Wire for Vec<String> {
    fn save(&self, msg: &mut Serializer<'_>) -> Result<()> {
        msg.put_string_array(self.clone());
        Ok(())
    }

    fn load(msg: &mut Deserializer<'_>) -> Result<Self> {
        msg.take_string_array()
    }
}

/// Fixed-width little-endian integer storage, for fixed-length arrays
/// carried as raw byte buffers. `bool` is deliberately not in this set.
pub trait WireBytes: Copy + Default {
    const SIZE: usize;
    fn write_le(self, out: &mut Vec<u8>);
    fn read_le(src: &[u8]) -> Self;
}

macro_rules! impl_wire_bytes {
    ($($ty:ty)+) => {
        $(impl WireBytes for $ty {
            const SIZE: usize = std::mem::size_of::<$ty>();

            #[inline]
            fn write_le(self, out: &mut Vec<u8>) {
                out.extend_from_slice(&self.to_le_bytes());
            }

            #[inline]
            fn read_le(src: &[u8]) -> Self {
                let (bytes, _) = src.split_at(std::mem::size_of::<$ty>());
                Self::from_le_bytes(bytes.try_into().unwrap())
            }
        })+
    };
}

impl_wire_bytes!(u8 i8 u16 i16 u32 i32 u64 i64);

/// A fixed-length array travels as one raw byte buffer of exactly
/// `N * size_of::<T>()` bytes. The length is part of the static type, so
/// no size cell is written.
impl<T: WireBytes, const N: usize> Wire for [T; N] {
    fn save(&self, msg: &mut Serializer<'_>) -> Result<()> {
        let mut bytes = Vec::with_capacity(N * T::SIZE);
        for value in self {
            value.write_le(&mut bytes);
        }
        msg.put_binary(bytes);
        Ok(())
    }

    fn load(msg: &mut Deserializer<'_>) -> Result<Self> {
        let bytes = msg.take_binary(N * T::SIZE)?;
        let mut out = [T::default(); N];
        for (slot, chunk) in out.iter_mut().zip(bytes.chunks_exact(T::SIZE)) {
            *slot = T::read_le(chunk);
        }
        Ok(out)
    }
}

/// The first dispensed key stores the map keys as a word array; the values
/// follow positionally in the same order. The key array is what tells the
/// reader how many values to expect.
impl<V: Wire> Wire for BTreeMap<u32, V> {
    fn save(&self, msg: &mut Serializer<'_>) -> Result<()> {
        let keys_key = msg.dispense_key();

        let mut keys = Vec::with_capacity(self.len());
        for (key, value) in self {
            keys.push(*key);
            value.save(msg)?;
        }

        msg.put_word_array_at(keys_key, keys);
        Ok(())
    }

    fn load(msg: &mut Deserializer<'_>) -> Result<Self> {
        let keys = msg.take_word_array()?;

        let mut out = BTreeMap::new();
        for key in keys {
            out.insert(key, V::load(msg)?);
        }
        Ok(out)
    }
}

/// Same layout as the word-keyed map, with the keys in a string array.
impl<V: Wire> Wire for BTreeMap<String, V> {
    fn save(&self, msg: &mut Serializer<'_>) -> Result<()> {
        let keys_key = msg.dispense_key();

        let mut keys = Vec::with_capacity(self.len());
        for (key, value) in self {
            keys.push(key.clone());
            value.save(msg)?;
        }

        msg.put_string_array_at(keys_key, keys);
        Ok(())
    }

    fn load(msg: &mut Deserializer<'_>) -> Result<Self> {
        let keys = msg.take_string_array()?;

        let mut out = BTreeMap::new();
        for key in keys {
            let value = V::load(msg)?;
            out.insert(key, value);
        }
        Ok(out)
    }
}

/// A procedure that returns nothing writes no cells at all.
impl Wire for () {
    fn save(&self, _msg: &mut Serializer<'_>) -> Result<()> {
        Ok(())
    }

    fn load(_msg: &mut Deserializer<'_>) -> Result<Self> {
        Ok(())
    }
}

/// Tuples serialize element by element, left to right. This is how a
/// procedure's argument pack travels.
macro_rules! impl_wire_tuple {
    ($($name:ident)+) => {
        impl<$($name: Wire),+> Wire for ($($name,)+) {
            fn save(&self, msg: &mut Serializer<'_>) -> Result<()> {
                #[allow(non_snake_case)]
                let ($($name,)+) = self;
                $($name.save(msg)?;)+
                Ok(())
            }

            fn load(msg: &mut Deserializer<'_>) -> Result<Self> {
                Ok(($($name::load(msg)?,)+))
            }
        }
    };
}

impl_wire_tuple!(A);
impl_wire_tuple!(A B);
impl_wire_tuple!(A B C);
impl_wire_tuple!(A B C D);
impl_wire_tuple!(A B C D E);
impl_wire_tuple!(A B C D E F);
impl_wire_tuple!(A B C D E F G);
impl_wire_tuple!(A B C D E F G H);
