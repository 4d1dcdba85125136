use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Image length is neither a multiple of 1 KiB nor 512 bytes past one.
    #[error("image size {length} is not congruent to 0 or 512 modulo 1024")]
    UnrecognizedSize { length: u64 },
    /// The resolved header does not fit inside the buffer.
    #[error("header at {offset:#x} needs {required} bytes, buffer has {actual}")]
    Truncated {
        offset: usize,
        required: usize,
        actual: usize,
    },
}
