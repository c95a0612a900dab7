//! # Byte Cursor
//!
//! Bounds-checked reader over an immutable byte slice. Every read either
//! returns the requested bytes or a [`DecodeError::Truncated`]; the cursor
//! never indexes past the end of its buffer.

use bytemuck::Pod;

use crate::error::{DecodeError, DecodeResult};

/// Advancing view over a borrowed byte buffer.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    buffer: &'a [u8],
    position: usize,
    /// Absolute offset of `buffer[0]` in the original input, for error reports.
    base: usize,
}

impl<'a> ByteCursor<'a> {
    /// Creates a cursor at the start of `buffer`.
    #[must_use]
    pub const fn new(buffer: &'a [u8]) -> Self {
        Self { buffer, position: 0, base: 0 }
    }

    /// Absolute position in the original input.
    #[inline]
    #[must_use]
    pub const fn position(&self) -> usize {
        self.base + self.position
    }

    /// Returns the number of bytes remaining.
    #[inline]
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.position)
    }

    /// Returns true once every byte has been consumed.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Returns the next `count` bytes without advancing.
    ///
    /// # Errors
    ///
    /// Returns `Truncated` if fewer than `count` bytes remain.
    #[inline]
    pub fn peek(&self, count: usize) -> DecodeResult<&'a [u8]> {
        if count > self.remaining() {
            return Err(self.truncated(count));
        }
        Ok(&self.buffer[self.position..self.position + count])
    }

    /// Returns the next `count` bytes and advances past them.
    ///
    /// # Errors
    ///
    /// Returns `Truncated` if fewer than `count` bytes remain.
    #[inline]
    pub fn read(&mut self, count: usize) -> DecodeResult<&'a [u8]> {
        let bytes = self.peek(count)?;
        self.position += count;
        Ok(bytes)
    }

    /// Advances by `count` bytes. Zero or negative counts do nothing.
    ///
    /// # Errors
    ///
    /// Returns `Truncated` if `count` exceeds the remaining length.
    pub fn skip(&mut self, count: i64) -> DecodeResult<()> {
        let Ok(count) = usize::try_from(count) else {
            return Ok(());
        };
        if count > self.remaining() {
            return Err(self.truncated(count));
        }
        self.position += count;
        Ok(())
    }

    /// Splits off the next `count` bytes as an independent cursor and
    /// advances past them.
    ///
    /// # Errors
    ///
    /// Returns `Truncated` if fewer than `count` bytes remain.
    pub fn sub_cursor(&mut self, count: usize) -> DecodeResult<ByteCursor<'a>> {
        let base = self.position();
        let buffer = self.read(count)?;
        Ok(ByteCursor { buffer, position: 0, base })
    }

    /// Reads a `Pod` value from the next `size_of::<T>()` bytes.
    ///
    /// # Errors
    ///
    /// Returns `Truncated` if not enough bytes remain.
    #[inline]
    pub fn read_pod<T: Pod>(&mut self) -> DecodeResult<T> {
        let bytes = self.read(std::mem::size_of::<T>())?;
        Ok(bytemuck::pod_read_unaligned(bytes))
    }

    /// Reads a `Pod` value without advancing.
    ///
    /// # Errors
    ///
    /// Returns `Truncated` if not enough bytes remain.
    #[inline]
    pub fn peek_pod<T: Pod>(&self) -> DecodeResult<T> {
        let bytes = self.peek(std::mem::size_of::<T>())?;
        Ok(bytemuck::pod_read_unaligned(bytes))
    }

    /// Reads a u32 in little-endian format.
    ///
    /// # Errors
    ///
    /// Returns `Truncated` if fewer than 4 bytes remain.
    #[inline]
    pub fn read_u32(&mut self) -> DecodeResult<u32> {
        self.read_pod::<u32>().map(u32::from_le)
    }

    /// Reads an i32 in little-endian format.
    ///
    /// # Errors
    ///
    /// Returns `Truncated` if fewer than 4 bytes remain.
    #[inline]
    pub fn read_i32(&mut self) -> DecodeResult<i32> {
        self.read_pod::<i32>().map(i32::from_le)
    }

    /// Reads a length-prefixed string: i32 byte count, then raw bytes.
    ///
    /// Bytes are passed through without encoding validation; invalid UTF-8
    /// sequences become replacement characters.
    ///
    /// # Errors
    ///
    /// Returns `Truncated` if fewer bytes remain than declared. A negative
    /// length can never be satisfied and is reported the same way.
    pub fn read_string(&mut self) -> DecodeResult<String> {
        let declared = self.read_i32()?;
        let Ok(len) = usize::try_from(declared) else {
            return Err(self.truncated(usize::MAX));
        };
        let bytes = self.read(len)?;
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }

    fn truncated(&self, needed: usize) -> DecodeError {
        DecodeError::Truncated {
            offset: self.position(),
            needed,
            available: self.remaining(),
        }
    }
}
