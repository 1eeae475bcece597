//! Register blocks that carry data into the compensation engine.
//!
//! Each block is described by a marker type implementing [`Reg`] (start address) and
//! [`Readable`] (length and decoding). Bytes usually come from a bus transaction or a
//! test fixture; this crate only decodes them.

pub mod calibration;
pub mod data;

use crate::error::{Bmp390Error, Bmp390Result};

pub trait Reg { const ADDR: u8; }

pub trait Readable: Reg {
    type Out;
    const N: usize = 1;

    /// Decodes exactly `Self::N` bytes. Callers go through [`read`], which checks the length.
    fn decode(b: &[u8]) -> Self::Out;
}

/// Decodes a register block, rejecting slices that are not exactly `R::N` bytes long.
pub fn read<R: Readable>(b: &[u8]) -> Bmp390Result<R::Out> {
    if b.len() != R::N {
        return Err(Bmp390Error::InvalidLength {
            register: R::ADDR,
            expected: R::N,
            actual: b.len(),
        });
    }

    Ok(R::decode(b))
}
