//! Constant buffer sink
//!
//! Lights write themselves into a [`ConstantBuffer`] as blind byte ranges.
//! Allocation, binding and upload of the real GPU resource belong to the
//! backend implementing the trait. [`HostConstantBuffer`] is a host-side
//! staging block with a named-variable table; backends can copy its bytes into
//! a mapped uniform buffer.

use std::collections::HashMap;

/// Destination for light parameter blocks
pub trait ConstantBuffer {
    /// Byte offset of a named shader variable, `None` if the buffer has no such variable
    fn variable_offset(&self, name: &str) -> Option<usize>;

    /// Total size in bytes
    fn size(&self) -> usize;

    /// Copy `data` into the buffer starting at `offset` bytes
    ///
    /// The caller guarantees the range fits. Implementations decide how to
    /// treat a violation; the lights never observe it.
    fn set_blob(&mut self, data: &[u8], offset: usize);
}

/// Errors raised by [`HostConstantBuffer`]
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    /// Write would run past the end of the buffer
    #[error("write of {len} bytes at offset {offset} exceeds buffer size {size}")]
    OutOfBounds {
        /// Requested start offset
        offset: usize,
        /// Requested length
        len: usize,
        /// Buffer size in bytes
        size: usize,
    },

    /// Variable registered past the end of the buffer
    #[error("variable '{name}' at offset {offset} lies outside buffer size {size}")]
    VariableOutOfRange {
        /// Variable name
        name: String,
        /// Registered offset
        offset: usize,
        /// Buffer size in bytes
        size: usize,
    },
}

/// Host-side staging constant buffer
#[derive(Debug, Clone)]
pub struct HostConstantBuffer {
    bytes: Vec<u8>,
    variables: HashMap<String, usize>,
    dirty: bool,
}

impl HostConstantBuffer {
    /// Create a zero-filled buffer of `size` bytes
    pub fn new(size: usize) -> Self {
        Self {
            bytes: vec![0; size],
            variables: HashMap::new(),
            dirty: false,
        }
    }

    /// Register a named variable at a byte offset
    pub fn add_variable(&mut self, name: impl Into<String>, offset: usize) -> Result<(), BufferError> {
        let name = name.into();
        if offset >= self.bytes.len() {
            return Err(BufferError::VariableOutOfRange {
                name,
                offset,
                size: self.bytes.len(),
            });
        }
        self.variables.insert(name, offset);
        Ok(())
    }

    /// Builder form of [`Self::add_variable`]
    pub fn with_variable(mut self, name: impl Into<String>, offset: usize) -> Result<Self, BufferError> {
        self.add_variable(name, offset)?;
        Ok(self)
    }

    /// Whole buffer contents
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Read `len` bytes at `offset`, `None` if the range is out of bounds
    pub fn read_blob(&self, offset: usize, len: usize) -> Option<&[u8]> {
        let end = offset.checked_add(len)?;
        self.bytes.get(offset..end)
    }

    /// Copy `data` into the buffer, failing on out-of-bounds writes
    pub fn try_set_blob(&mut self, data: &[u8], offset: usize) -> Result<(), BufferError> {
        let out_of_bounds = BufferError::OutOfBounds {
            offset,
            len: data.len(),
            size: self.bytes.len(),
        };
        let end = offset.checked_add(data.len()).ok_or_else(|| out_of_bounds.clone())?;
        let target = self.bytes.get_mut(offset..end).ok_or(out_of_bounds)?;
        target.copy_from_slice(data);
        self.dirty = true;
        Ok(())
    }

    /// Whether the contents changed since the last [`Self::clear_dirty`]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark the contents as uploaded
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }
}

impl ConstantBuffer for HostConstantBuffer {
    fn variable_offset(&self, name: &str) -> Option<usize> {
        self.variables.get(name).copied()
    }

    fn size(&self) -> usize {
        self.bytes.len()
    }

    fn set_blob(&mut self, data: &[u8], offset: usize) {
        if let Err(e) = self.try_set_blob(data, offset) {
            log::error!("HostConstantBuffer: dropped write: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_variable_lookup() {
        let buffer = HostConstantBuffer::new(64).with_variable("gLight", 16).unwrap();
        assert_eq!(buffer.variable_offset("gLight"), Some(16));
        assert_eq!(buffer.variable_offset("gMissing"), None);
        assert_eq!(buffer.size(), 64);
    }

    #[test]
    fn test_variable_outside_buffer_rejected() {
        let result = HostConstantBuffer::new(32).with_variable("gLight", 32);
        assert!(matches!(result, Err(BufferError::VariableOutOfRange { offset: 32, .. })));
    }

    #[test]
    fn test_blob_write_and_read() {
        let mut buffer = HostConstantBuffer::new(16);
        assert!(!buffer.is_dirty());

        buffer.try_set_blob(&[1, 2, 3, 4], 4).unwrap();
        assert_eq!(buffer.read_blob(4, 4), Some(&[1u8, 2, 3, 4][..]));
        assert_eq!(buffer.read_blob(0, 4), Some(&[0u8; 4][..]));
        assert!(buffer.is_dirty());

        buffer.clear_dirty();
        assert!(!buffer.is_dirty());
    }

    #[test]
    fn test_out_of_bounds_write() {
        let mut buffer = HostConstantBuffer::new(8);
        let err = buffer.try_set_blob(&[0; 4], 6).unwrap_err();
        assert_eq!(err, BufferError::OutOfBounds { offset: 6, len: 4, size: 8 });
        assert!(buffer.try_set_blob(&[0; 1], usize::MAX).is_err());

        // Trait path drops the write instead of panicking
        buffer.set_blob(&[9; 4], 6);
        assert_eq!(buffer.as_bytes(), &[0u8; 8]);
        assert!(!buffer.is_dirty());
    }
}
