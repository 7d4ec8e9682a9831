//! # Cryptographic primitives

pub mod hashes;
