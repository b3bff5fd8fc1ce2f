//! The keyed message: a named bag of typed cells.

use std::collections::BTreeMap;

use crate::types::Error;
use crate::types::Result;

/// One typed cell inside a [`Message`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Word(u32),
    WordArray(Vec<u32>),
    Str(String),
    StrArray(Vec<String>),
    Binary(Vec<u8>),
}

impl Cell {
    /// Short kind name used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Cell::Word(_) => "word",
            Cell::WordArray(_) => "word_array",
            Cell::Str(_) => "string",
            Cell::StrArray(_) => "string_array",
            Cell::Binary(_) => "binary",
        }
    }
}

/// A named, keyed container of typed cells.
///
/// Keys are opaque strings; the layers above impose their own discipline
/// on them. Setters overwrite silently, getters fail with
/// [`Error::BadKey`] for absent keys and [`Error::WrongType`] when the
/// cell holds a different kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message {
    name: String,
    cells: BTreeMap<String, Cell>,
}

impl Message {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cells: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn key_exists(&self, key: &str) -> bool {
        self.cells.contains_key(key)
    }

    /// All keys currently present, in lexicographic order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.cells.keys().map(String::as_str)
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn set_word(&mut self, key: impl Into<String>, value: u32) {
        self.cells.insert(key.into(), Cell::Word(value));
    }

    pub fn set_word_array(&mut self, key: impl Into<String>, value: Vec<u32>) {
        self.cells.insert(key.into(), Cell::WordArray(value));
    }

    pub fn set_string(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.cells.insert(key.into(), Cell::Str(value.into()));
    }

    pub fn set_string_array(&mut self, key: impl Into<String>, value: Vec<String>) {
        self.cells.insert(key.into(), Cell::StrArray(value));
    }

    pub fn set_binary(&mut self, key: impl Into<String>, value: Vec<u8>) {
        self.cells.insert(key.into(), Cell::Binary(value));
    }

    fn cell(&self, key: &str) -> Result<&Cell> {
        self.cells
            .get(key)
            .ok_or_else(|| Error::BadKey(key.to_string()))
    }

    pub fn get_word(&self, key: &str) -> Result<u32> {
        match self.cell(key)? {
            Cell::Word(value) => Ok(*value),
            _ => Err(Error::WrongType(key.to_string())),
        }
    }

    pub fn get_word_array(&self, key: &str) -> Result<&[u32]> {
        match self.cell(key)? {
            Cell::WordArray(values) => Ok(values),
            _ => Err(Error::WrongType(key.to_string())),
        }
    }

    pub fn get_string(&self, key: &str) -> Result<&str> {
        match self.cell(key)? {
            Cell::Str(value) => Ok(value),
            _ => Err(Error::WrongType(key.to_string())),
        }
    }

    pub fn get_string_array(&self, key: &str) -> Result<&[String]> {
        match self.cell(key)? {
            Cell::StrArray(values) => Ok(values),
            _ => Err(Error::WrongType(key.to_string())),
        }
    }

    /// Reads a binary cell of exactly `expected_len` bytes.
    pub fn get_binary(&self, key: &str, expected_len: usize) -> Result<&[u8]> {
        match self.cell(key)? {
            Cell::Binary(bytes) => {
                if bytes.len() != expected_len {
                    return Err(Error::BufferTooSmall {
                        key: key.to_string(),
                        expected: expected_len,
                        actual: bytes.len(),
                    });
                }
                Ok(bytes)
            }
            _ => Err(Error::WrongType(key.to_string())),
        }
    }
}
