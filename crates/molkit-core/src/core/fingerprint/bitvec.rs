use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BitVecError {
    #[error("hex string must have an even number of digits")]
    OddLength,

    #[error("invalid hex digit '{0}'")]
    InvalidDigit(char),
}

/// A fixed-length bit vector backed by 64-bit words.
///
/// Fingerprints are produced once and treated as immutable afterwards; all
/// comparison runs on word-level popcounts.
///
/// Hex convention (used by [`to_hex`](Self::to_hex), serde, and any
/// persisted form): byte `i` holds bits `8*i..8*i+8`, with bit `8*i + j`
/// stored at `1 << j`; the string lists bytes in increasing index order,
/// two lowercase digits each. So a vector with only bit 0 set starts
/// `"01"`, and one with only bit 9 set starts `"0002"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FixedBitVec {
    words: Vec<u64>,
    bit_count: usize,
}

impl FixedBitVec {
    /// Creates an all-zero vector of `bit_count` bits.
    pub fn zeros(bit_count: usize) -> Self {
        Self {
            words: vec![0; bit_count.div_ceil(64)],
            bit_count,
        }
    }

    pub fn bit_count(&self) -> usize {
        self.bit_count
    }

    /// Sets the bit at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range; the vector length is fixed.
    pub fn set(&mut self, index: usize) {
        assert!(index < self.bit_count, "bit index out of range");
        self.words[index / 64] |= 1 << (index % 64);
    }

    /// Reads the bit at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn get(&self, index: usize) -> bool {
        assert!(index < self.bit_count, "bit index out of range");
        (self.words[index / 64] >> (index % 64)) & 1 == 1
    }

    pub fn count_ones(&self) -> u32 {
        self.words.iter().map(|w| w.count_ones()).sum()
    }

    pub fn any(&self) -> bool {
        self.words.iter().any(|&w| w != 0)
    }

    /// Popcount of the bitwise AND of two equal-length vectors.
    ///
    /// # Panics
    ///
    /// Panics if the lengths differ; only equal-length vectors are
    /// comparable.
    pub fn intersection_count(&self, other: &Self) -> u32 {
        assert_eq!(self.bit_count, other.bit_count, "bit vector length mismatch");
        self.words
            .iter()
            .zip(&other.words)
            .map(|(a, b)| (a & b).count_ones())
            .sum()
    }

    /// Popcount of the bitwise OR of two equal-length vectors.
    ///
    /// # Panics
    ///
    /// Panics if the lengths differ.
    pub fn union_count(&self, other: &Self) -> u32 {
        assert_eq!(self.bit_count, other.bit_count, "bit vector length mismatch");
        self.words
            .iter()
            .zip(&other.words)
            .map(|(a, b)| (a | b).count_ones())
            .sum()
    }

    /// Encodes the vector as lowercase hex, low-index bytes first.
    pub fn to_hex(&self) -> String {
        let byte_count = self.bit_count.div_ceil(8);
        let mut out = String::with_capacity(byte_count * 2);
        for byte_index in 0..byte_count {
            let word = self.words[byte_index / 8];
            let byte = ((word >> ((byte_index % 8) * 8)) & 0xff) as u8;
            out.push_str(&format!("{byte:02x}"));
        }
        out
    }

    /// Decodes a hex string produced by [`to_hex`](Self::to_hex). The bit
    /// count is eight times the byte count of the string.
    pub fn from_hex(text: &str) -> Result<Self, BitVecError> {
        if text.len() % 2 != 0 {
            return Err(BitVecError::OddLength);
        }
        let mut vec = Self::zeros(text.len() / 2 * 8);
        for (byte_index, chunk) in text.as_bytes().chunks(2).enumerate() {
            let byte = hex_value(chunk[0])? << 4 | hex_value(chunk[1])?;
            vec.words[byte_index / 8] |= byte << ((byte_index % 8) * 8);
        }
        Ok(vec)
    }
}

fn hex_value(digit: u8) -> Result<u64, BitVecError> {
    (digit as char)
        .to_digit(16)
        .map(u64::from)
        .ok_or(BitVecError::InvalidDigit(digit as char))
}

impl Serialize for FixedBitVec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for FixedBitVec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::from_hex(&text).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeros_has_no_set_bits() {
        let vec = FixedBitVec::zeros(1024);
        assert_eq!(vec.bit_count(), 1024);
        assert_eq!(vec.count_ones(), 0);
        assert!(!vec.any());
    }

    #[test]
    fn set_and_get_round_trip() {
        let mut vec = FixedBitVec::zeros(128);
        assert!(!vec.get(42));
        vec.set(42);
        vec.set(127);
        assert!(vec.get(42));
        assert!(vec.get(127));
        assert!(!vec.get(43));
        assert_eq!(vec.count_ones(), 2);
    }

    #[test]
    #[should_panic(expected = "bit index out of range")]
    fn set_rejects_out_of_range_index() {
        FixedBitVec::zeros(64).set(64);
    }

    #[test]
    fn intersection_and_union_counts() {
        let mut a = FixedBitVec::zeros(256);
        let mut b = FixedBitVec::zeros(256);
        a.set(1);
        a.set(70);
        b.set(70);
        b.set(200);

        assert_eq!(a.intersection_count(&b), 1);
        assert_eq!(a.union_count(&b), 3);
    }

    #[test]
    #[should_panic(expected = "bit vector length mismatch")]
    fn comparison_requires_equal_lengths() {
        FixedBitVec::zeros(64).union_count(&FixedBitVec::zeros(128));
    }

    #[test]
    fn hex_encoding_follows_documented_convention() {
        let mut vec = FixedBitVec::zeros(16);
        vec.set(0);
        assert_eq!(vec.to_hex(), "0100");

        let mut vec = FixedBitVec::zeros(16);
        vec.set(9);
        assert_eq!(vec.to_hex(), "0002");
    }

    #[test]
    fn hex_round_trips() {
        let mut vec = FixedBitVec::zeros(1024);
        for index in [0, 7, 8, 63, 64, 511, 1023] {
            vec.set(index);
        }
        let decoded = FixedBitVec::from_hex(&vec.to_hex()).unwrap();
        assert_eq!(decoded, vec);
        assert_eq!(decoded.bit_count(), 1024);
    }

    #[test]
    fn from_hex_rejects_bad_input() {
        assert_eq!(FixedBitVec::from_hex("abc"), Err(BitVecError::OddLength));
        assert_eq!(
            FixedBitVec::from_hex("zz"),
            Err(BitVecError::InvalidDigit('z'))
        );
    }

    #[test]
    fn serde_round_trips_as_hex_string() {
        #[derive(serde::Serialize, serde::Deserialize)]
        struct Document {
            fingerprint: FixedBitVec,
        }

        let mut vec = FixedBitVec::zeros(64);
        vec.set(3);
        vec.set(40);

        let text = toml::to_string(&Document {
            fingerprint: vec.clone(),
        })
        .unwrap();
        assert!(text.contains(&vec.to_hex()));

        let parsed: Document = toml::from_str(&text).unwrap();
        assert_eq!(parsed.fingerprint, vec);
    }
}
