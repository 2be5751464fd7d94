//! Byte buffers handed across the primitive boundary
//!
//! A `Vec<u8>` may carry spare capacity past its length. `SignalBuffer` is
//! backed by a boxed slice, so the bytes it exposes are exactly the bytes
//! that were written, and they are wiped when the buffer is dropped.

use std::fmt;

use zeroize::Zeroize;

/// Exact-length byte buffer, zeroized on drop
pub struct SignalBuffer {
    data: Box<[u8]>,
}

impl SignalBuffer {
    /// Copy `len` bytes out of `data`.
    ///
    /// Returns `None` if `data` is shorter than `len`.
    pub fn from_parts(data: &[u8], len: usize) -> Option<Self> {
        data.get(..len).map(Self::from)
    }

    /// Number of bytes held
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Copy the contents into a caller-owned vector
    pub fn to_vec(&self) -> Vec<u8> {
        self.data.to_vec()
    }
}

impl From<&[u8]> for SignalBuffer {
    fn from(bytes: &[u8]) -> Self {
        Self {
            data: bytes.to_vec().into_boxed_slice(),
        }
    }
}

impl From<Vec<u8>> for SignalBuffer {
    fn from(mut bytes: Vec<u8>) -> Self {
        // copy into an exact-size allocation, then wipe the original
        let data = bytes.as_slice().to_vec().into_boxed_slice();
        bytes.zeroize();
        Self { data }
    }
}

impl AsRef<[u8]> for SignalBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl Drop for SignalBuffer {
    fn drop(&mut self) {
        let data: &mut [u8] = &mut self.data;
        data.zeroize();
    }
}

impl fmt::Debug for SignalBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignalBuffer")
            .field("len", &self.data.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_ignores_capacity() {
        let mut overallocated = Vec::with_capacity(128);
        overallocated.extend_from_slice(b"four");
        assert!(overallocated.capacity() >= 128);

        let buffer = SignalBuffer::from(overallocated);
        assert_eq!(buffer.len(), 4);
        assert_eq!(buffer.as_slice(), b"four");
    }

    #[test]
    fn test_from_parts() {
        let backing = [1u8, 2, 3, 4, 5, 6];
        let buffer = SignalBuffer::from_parts(&backing, 3).unwrap();
        assert_eq!(buffer.to_vec(), vec![1, 2, 3]);

        assert!(SignalBuffer::from_parts(&backing, 7).is_none());
        assert!(SignalBuffer::from_parts(&backing, 0).unwrap().is_empty());
    }

    #[test]
    fn test_debug_hides_contents() {
        let buffer = SignalBuffer::from(&b"secret"[..]);
        let rendered = format!("{:?}", buffer);
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("len: 6"));
    }
}
