//! Positional serialization onto the keyed message substrate.
//!
//! Key names are monotonically increasing decimal integers dispensed by a
//! per-pass counter, so position rather than name drives wire order. A
//! writer and its reader must consume the exact same sequence of types;
//! both peers guarantee this by deriving the sequence from the same
//! [`Method`](crate::Method) declaration.

use gempack::Message;
use gempack::Result;

use crate::wire::Wire;

/// Writes values into a message under fresh `"0"`, `"1"`, ... keys.
pub struct Serializer<'m> {
    msg: &'m mut Message,
    next_key: u32,
}

impl<'m> Serializer<'m> {
    pub fn new(msg: &'m mut Message) -> Self {
        Self { msg, next_key: 0 }
    }

    /// Routes one value through the serializer. Custom [`Wire`]
    /// implementations use this to write their subfields in a fixed order.
    pub fn put<T: Wire>(&mut self, value: &T) -> Result<()> {
        value.save(self)
    }

    /// Returns the next free key.
    pub(crate) fn dispense_key(&mut self) -> String {
        let key = self.next_key;
        self.next_key += 1;
        key.to_string()
    }

    pub(crate) fn put_word(&mut self, value: u32) {
        let key = self.dispense_key();
        self.msg.set_word(key, value);
    }

    pub(crate) fn put_word_array(&mut self, values: Vec<u32>) {
        let key = self.dispense_key();
        self.msg.set_word_array(key, values);
    }

    pub(crate) fn put_word_array_at(&mut self, key: String, values: Vec<u32>) {
        self.msg.set_word_array(key, values);
    }

    pub(crate) fn put_string(&mut self, value: &str) {
        let key = self.dispense_key();
        self.msg.set_string(key, value);
    }

    pub(crate) fn put_string_array(&mut self, values: Vec<String>) {
        let key = self.dispense_key();
        self.msg.set_string_array(key, values);
    }

    pub(crate) fn put_string_array_at(&mut self, key: String, values: Vec<String>) {
        self.msg.set_string_array(key, values);
    }

    pub(crate) fn put_binary(&mut self, bytes: Vec<u8>) {
        let key = self.dispense_key();
        self.msg.set_binary(key, bytes);
    }
}

/// Reads values back from a message, consuming the same key sequence.
///
/// The source message is never modified; the reader only tracks its own
/// key counter.
pub struct Deserializer<'m> {
    msg: &'m Message,
    next_key: u32,
}

impl<'m> Deserializer<'m> {
    pub fn new(msg: &'m Message) -> Self {
        Self { msg, next_key: 0 }
    }

    /// Routes one value out of the deserializer. Custom [`Wire`]
    /// implementations use this to read their subfields in a fixed order.
    pub fn take<T: Wire>(&mut self) -> Result<T> {
        T::load(self)
    }

    /// Returns the next unread key.
    pub(crate) fn dispense_key(&mut self) -> String {
        let key = self.next_key;
        self.next_key += 1;
        key.to_string()
    }

    pub(crate) fn take_word(&mut self) -> Result<u32> {
        let key = self.dispense_key();
        self.msg.get_word(&key)
    }

    pub(crate) fn take_word_array(&mut self) -> Result<Vec<u32>> {
        let key = self.dispense_key();
        Ok(self.msg.get_word_array(&key)?.to_vec())
    }

    pub(crate) fn take_string(&mut self) -> Result<String> {
        let key = self.dispense_key();
        Ok(self.msg.get_string(&key)?.to_string())
    }

    pub(crate) fn take_string_array(&mut self) -> Result<Vec<String>> {
        let key = self.dispense_key();
        Ok(self.msg.get_string_array(&key)?.to_vec())
    }

    pub(crate) fn take_binary(&mut self, expected_len: usize) -> Result<&'m [u8]> {
        let key = self.dispense_key();
        self.msg.get_binary(&key, expected_len)
    }
}
