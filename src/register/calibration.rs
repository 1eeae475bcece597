//! ### NVM_PAR_T1 .. NVM_PAR_P11 - trimming coefficients (`0x31` - `0x45`, 21 bytes, read-only)
//!
//! The 14 factory trimming coefficients are stored as packed little-endian integers with
//! mixed widths and signedness. The layout is described once in [`NVM_FIELDS`] and every
//! field is extracted by the same routine, so the register map lives in a single table.
//!
//! Decoding can not fail once the block has the right length: every field is a plain
//! reinterpretation of its bytes.

use crate::register::{Readable, Reg};

/// Marker struct for the calibration coefficient block
pub struct Calibration;
impl Reg for Calibration { const ADDR: u8 = 0x31; }

/// Width and signedness of a packed NVM field.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FieldKind {
    U16,
    I16,
    I8,
}

impl FieldKind {
    /// Number of bytes the field occupies.
    pub const fn width(self) -> usize {
        match self {
            FieldKind::U16 | FieldKind::I16 => 2,
            FieldKind::I8 => 1,
        }
    }
}

/// One entry of the NVM register map.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct NvmField {
    pub name: &'static str,
    /// Offset from the start of the block (0x31)
    pub offset: usize,
    pub kind: FieldKind,
}

impl NvmField {
    const fn new(name: &'static str, offset: usize, kind: FieldKind) -> Self {
        Self { name, offset, kind }
    }

    /// Extracts the field from a calibration block, least significant byte first.
    pub fn extract(&self, b: &[u8]) -> i32 {
        let o = self.offset;
        match self.kind {
            FieldKind::U16 => u16::from_le_bytes([b[o], b[o + 1]]) as i32,
            FieldKind::I16 => i16::from_le_bytes([b[o], b[o + 1]]) as i32,
            FieldKind::I8 => i8::from_le_bytes([b[o]]) as i32,
        }
    }
}

pub(crate) const PAR_T1: usize = 0;
pub(crate) const PAR_T2: usize = 1;
pub(crate) const PAR_T3: usize = 2;
pub(crate) const PAR_P1: usize = 3;
pub(crate) const PAR_P2: usize = 4;
pub(crate) const PAR_P3: usize = 5;
pub(crate) const PAR_P4: usize = 6;
pub(crate) const PAR_P5: usize = 7;
pub(crate) const PAR_P6: usize = 8;
pub(crate) const PAR_P7: usize = 9;
pub(crate) const PAR_P8: usize = 10;
pub(crate) const PAR_P9: usize = 11;
pub(crate) const PAR_P10: usize = 12;
pub(crate) const PAR_P11: usize = 13;

/// Register map of the calibration block, as listed in the datasheet memory map.
pub const NVM_FIELDS: [NvmField; 14] = [
    NvmField::new("par_t1", 0, FieldKind::U16),
    NvmField::new("par_t2", 2, FieldKind::U16),
    NvmField::new("par_t3", 4, FieldKind::I8),
    NvmField::new("par_p1", 5, FieldKind::I16),
    NvmField::new("par_p2", 7, FieldKind::I16),
    NvmField::new("par_p3", 9, FieldKind::I8),
    NvmField::new("par_p4", 10, FieldKind::I8),
    NvmField::new("par_p5", 11, FieldKind::U16),
    NvmField::new("par_p6", 13, FieldKind::U16),
    NvmField::new("par_p7", 15, FieldKind::I8),
    NvmField::new("par_p8", 16, FieldKind::I8),
    NvmField::new("par_p9", 17, FieldKind::I16),
    NvmField::new("par_p10", 19, FieldKind::I8),
    NvmField::new("par_p11", 20, FieldKind::I8),
];

/// The raw, unquantized trimming coefficients.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CalibrationNvm {
    pub nvm_par_t1: u16,
    pub nvm_par_t2: u16,
    pub nvm_par_t3: i8,
    pub nvm_par_p1: i16,
    pub nvm_par_p2: i16,
    pub nvm_par_p3: i8,
    pub nvm_par_p4: i8,
    pub nvm_par_p5: u16,
    pub nvm_par_p6: u16,
    pub nvm_par_p7: i8,
    pub nvm_par_p8: i8,
    pub nvm_par_p9: i16,
    pub nvm_par_p10: i8,
    pub nvm_par_p11: i8,
}

impl CalibrationNvm {
    /// All fields widened to `i32`, in register order.
    pub fn fields(&self) -> [i32; 14] {
        [
            self.nvm_par_t1 as i32,
            self.nvm_par_t2 as i32,
            self.nvm_par_t3 as i32,
            self.nvm_par_p1 as i32,
            self.nvm_par_p2 as i32,
            self.nvm_par_p3 as i32,
            self.nvm_par_p4 as i32,
            self.nvm_par_p5 as i32,
            self.nvm_par_p6 as i32,
            self.nvm_par_p7 as i32,
            self.nvm_par_p8 as i32,
            self.nvm_par_p9 as i32,
            self.nvm_par_p10 as i32,
            self.nvm_par_p11 as i32,
        ]
    }
}

impl Readable for Calibration {
    type Out = CalibrationNvm;

    const N: usize = 21;

    fn decode(b: &[u8]) -> Self::Out {
        let raw = NVM_FIELDS.map(|field| field.extract(b));

        // Each value came out of a field of exactly this width and signedness.
        CalibrationNvm {
            nvm_par_t1: raw[PAR_T1] as u16,
            nvm_par_t2: raw[PAR_T2] as u16,
            nvm_par_t3: raw[PAR_T3] as i8,
            nvm_par_p1: raw[PAR_P1] as i16,
            nvm_par_p2: raw[PAR_P2] as i16,
            nvm_par_p3: raw[PAR_P3] as i8,
            nvm_par_p4: raw[PAR_P4] as i8,
            nvm_par_p5: raw[PAR_P5] as u16,
            nvm_par_p6: raw[PAR_P6] as u16,
            nvm_par_p7: raw[PAR_P7] as i8,
            nvm_par_p8: raw[PAR_P8] as i8,
            nvm_par_p9: raw[PAR_P9] as i16,
            nvm_par_p10: raw[PAR_P10] as i8,
            nvm_par_p11: raw[PAR_P11] as i8,
        }
    }
}
