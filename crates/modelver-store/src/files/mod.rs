//! File primitives: atomic writes and content digests

pub mod atomic;
pub mod digest;

pub use atomic::atomic_write;
pub use digest::sha256_hex;
