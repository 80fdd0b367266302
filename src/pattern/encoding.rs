// Tue Jan 13 2026 - Alex

use crate::pattern::EncodingError;
use crate::utils::hex::to_hex;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The byte layouts a firmware author plausibly used to store a small integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EncodingFamily {
    OneByte,
    U16Le,
    U16Be,
    U16LeX10,
    U16LeX100,
}

impl EncodingFamily {
    /// Enumeration order used by the encoder and the scanner.
    pub const ALL: [EncodingFamily; 5] = [
        EncodingFamily::OneByte,
        EncodingFamily::U16Le,
        EncodingFamily::U16Be,
        EncodingFamily::U16LeX10,
        EncodingFamily::U16LeX100,
    ];

    /// Two-byte families in the order suggestion matching tries them.
    pub const WIDE: [EncodingFamily; 4] = [
        EncodingFamily::U16Le,
        EncodingFamily::U16Be,
        EncodingFamily::U16LeX10,
        EncodingFamily::U16LeX100,
    ];

    pub fn width(&self) -> usize {
        match self {
            EncodingFamily::OneByte => 1,
            _ => 2,
        }
    }

    pub fn scale(&self) -> u64 {
        match self {
            EncodingFamily::U16LeX10 => 10,
            EncodingFamily::U16LeX100 => 100,
            _ => 1,
        }
    }

    pub fn flag(&self) -> FamilySet {
        match self {
            EncodingFamily::OneByte => FamilySet::ONE_BYTE,
            EncodingFamily::U16Le => FamilySet::U16_LE,
            EncodingFamily::U16Be => FamilySet::U16_BE,
            EncodingFamily::U16LeX10 => FamilySet::U16_LE_X10,
            EncodingFamily::U16LeX100 => FamilySet::U16_LE_X100,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EncodingFamily::OneByte => "u8",
            EncodingFamily::U16Le => "u16le",
            EncodingFamily::U16Be => "u16be",
            EncodingFamily::U16LeX10 => "u16le*10",
            EncodingFamily::U16LeX100 => "u16le*100",
        }
    }
}

impl fmt::Display for EncodingFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

bitflags! {
    /// Subset of encoding families a scan considers.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct FamilySet: u8 {
        const ONE_BYTE = 1 << 0;
        const U16_LE = 1 << 1;
        const U16_BE = 1 << 2;
        const U16_LE_X10 = 1 << 3;
        const U16_LE_X100 = 1 << 4;
    }
}

impl FamilySet {
    /// Families in this set, in enumeration order.
    pub fn families(self) -> impl Iterator<Item = EncodingFamily> {
        EncodingFamily::ALL
            .into_iter()
            .filter(move |family| self.contains(family.flag()))
    }
}

impl Default for FamilySet {
    fn default() -> Self {
        FamilySet::all()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct EncodedRepresentation {
    pub family: EncodingFamily,
    pub bytes: Vec<u8>,
}

impl EncodedRepresentation {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn to_hex(&self) -> String {
        to_hex(&self.bytes)
    }
}

impl fmt::Display for EncodedRepresentation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.to_hex(), self.family)
    }
}

pub fn encode(value: u64, family: EncodingFamily) -> Result<EncodedRepresentation, EncodingError> {
    let out_of_range = || EncodingError::OutOfRange { value, family };
    let scaled = value.checked_mul(family.scale()).ok_or_else(out_of_range)?;

    let bytes = match family {
        EncodingFamily::OneByte => vec![u8::try_from(scaled).map_err(|_| out_of_range())?],
        EncodingFamily::U16Be => u16::try_from(scaled)
            .map_err(|_| out_of_range())?
            .to_be_bytes()
            .to_vec(),
        EncodingFamily::U16Le | EncodingFamily::U16LeX10 | EncodingFamily::U16LeX100 => {
            u16::try_from(scaled)
                .map_err(|_| out_of_range())?
                .to_le_bytes()
                .to_vec()
        }
    };

    Ok(EncodedRepresentation { family, bytes })
}

/// Every family that can hold `value`, in enumeration order. Families the value
/// does not fit are left out.
pub fn encodings_for(value: u64) -> Vec<EncodedRepresentation> {
    encodings_in(value, FamilySet::all())
}

pub fn encodings_in(value: u64, families: FamilySet) -> Vec<EncodedRepresentation> {
    families
        .families()
        .filter_map(|family| match encode(value, family) {
            Ok(rep) => Some(rep),
            Err(e) => {
                log::trace!("Skipping representation: {}", e);
                None
            }
        })
        .collect()
}

/// Inverse of [`encode`]. `None` when the width is wrong or the raw value is not
/// a multiple of the family scale.
pub fn decode(bytes: &[u8], family: EncodingFamily) -> Option<u64> {
    if bytes.len() != family.width() {
        return None;
    }

    let raw = match family {
        EncodingFamily::OneByte => bytes[0] as u64,
        EncodingFamily::U16Be => u16::from_be_bytes([bytes[0], bytes[1]]) as u64,
        _ => u16::from_le_bytes([bytes[0], bytes[1]]) as u64,
    };

    let scale = family.scale();
    if raw % scale != 0 {
        return None;
    }
    Some(raw / scale)
}
