use crate::{types_impl::decoded_decimal::DecodedDecimal, HdbError, HdbResult};
use bigdecimal::{BigDecimal, Zero};
use byteorder::{ByteOrder, LittleEndian};
use num_bigint::{BigInt, BigUint, Sign};

// The "wire decimal" is the transport representation of HANA's DECIMAL type:
//
// MANTISSA     113-bit     Integer mantissa
//                          (byte 0; byte 14, lowest bit)
// EXPONENT      14-bit     Exponent, biased with 6176, leading to a range -6143 to +6144
//                          (byte 14, above lowest bit; byte 15, below highest bit)
// SIGN           1-bit     Sign: 0 is positive, 1 is negative
//                          (byte 15, highest bit)
//
// The represented number is (10^EXPONENT)*MANTISSA.
// It is expected that MANTISSA is not a multiple of 10.

/// Bias of the exponent field.
pub const EXPONENT_BIAS: i32 = 6176;

/// Number of bytes of a wire decimal.
pub const WIRE_DECIMAL_LENGTH: usize = 16;

const MIN_EXPONENT: i64 = -6143;
const MAX_EXPONENT: i64 = 6144;
const NULL_MARKER: u8 = 0b_0111_0000;

/// The 16 bytes of a DECIMAL value as a HANA client receives them for a column.
///
/// Decoding never modifies the bytes, so a `WireDecimal` can be decoded any number
/// of times and shared freely.
#[derive(Clone, Copy, Eq, PartialEq, Hash)]
pub struct WireDecimal([u8; WIRE_DECIMAL_LENGTH]);

impl WireDecimal {
    /// Wraps the given bytes.
    pub fn new(raw: [u8; WIRE_DECIMAL_LENGTH]) -> Self {
        Self(raw)
    }

    /// Copies the bytes from a slice, which must have exactly 16 bytes.
    pub fn from_slice(bytes: &[u8]) -> HdbResult<Self> {
        let raw: [u8; WIRE_DECIMAL_LENGTH] = bytes
            .try_into()
            .map_err(|_| HdbError::WireLength {
                length: bytes.len(),
            })?;
        Ok(Self(raw))
    }

    /// Reads exactly 16 bytes from the reader.
    pub fn parse(rdr: &mut dyn std::io::Read) -> HdbResult<Self> {
        let mut raw = [0_u8; WIRE_DECIMAL_LENGTH];
        rdr.read_exact(&mut raw[..])?;
        Ok(Self(raw))
    }

    /// Access to the raw bytes.
    pub fn as_bytes(&self) -> &[u8; WIRE_DECIMAL_LENGTH] {
        &self.0
    }

    /// Consumes the instance and returns the raw bytes.
    pub fn into_bytes(self) -> [u8; WIRE_DECIMAL_LENGTH] {
        self.0
    }

    /// Returns true if the bytes are HANA's NULL representation for DECIMAL.
    pub fn is_null(&self) -> bool {
        self.0[15] == NULL_MARKER && self.0[0..=14].iter().all(|b| *b == 0)
    }

    /// Splits the bytes into sign, magnitude and unbiased exponent.
    ///
    /// The NULL representation is not treated specially here,
    /// use [`decode_nullable`](Self::decode_nullable) if NULLs can occur.
    pub fn decode(&self) -> DecodedDecimal {
        let mut raw = self.0;

        let negative = (raw[15] & 0b_1000_0000_u8) != 0;
        // shifting left drops the sign bit, shifting right drops the mantissa bit
        let biased_exponent = (LittleEndian::read_u16(&raw[14..=15]) << 1) >> 2;
        let exponent = i32::from(biased_exponent) - EXPONENT_BIAS;

        // keep the mantissa bit only
        raw[14] &= 0b_0000_0001_u8;
        let msb = most_significant_byte(&raw);
        let magnitude = BigUint::from_bytes_le(&raw[0..=msb]);

        trace!(
            "decoded wire decimal {}: negative = {negative}, magnitude = {magnitude}, \
             exponent = {exponent}",
            self
        );
        DecodedDecimal::new(negative, magnitude, exponent)
    }

    /// Like [`decode`](Self::decode), but maps HANA's NULL representation to `None`.
    ///
    /// # Errors
    ///
    /// `HdbError::NullValue` if the value is NULL and the column is not nullable.
    pub fn decode_nullable(&self, nullable: bool) -> HdbResult<Option<DecodedDecimal>> {
        if self.is_null() {
            if nullable {
                Ok(None)
            } else {
                Err(HdbError::NullValue)
            }
        } else {
            Ok(Some(self.decode()))
        }
    }

    /// Creates the wire representation of a `BigDecimal`.
    ///
    /// Trailing zeros are removed from the mantissa, and mantissas that exceed
    /// 113 bits lose their least significant digits.
    ///
    /// # Errors
    ///
    /// `HdbError::Serialization` if the exponent is out of range.
    #[allow(clippy::cast_possible_truncation)]
    #[allow(clippy::cast_sign_loss)]
    pub fn from_big_decimal(bigdecimal: &BigDecimal) -> HdbResult<Self> {
        let ten = BigInt::from(10_u8);
        let (sign, mantissa, exponent) = {
            let (mut bigint, neg_exponent) = bigdecimal.as_bigint_and_exponent();
            let mut exponent = -neg_exponent;

            // HANA does not like mantissas that are multiples of 10
            while !bigint.is_zero() && (&bigint % &ten).is_zero() {
                bigint /= 10;
                exponent += 1;
            }

            // HANA accepts only mantissas up to 113 bits, so we round if necessary
            loop {
                let (_, mantissa) = bigint.to_bytes_le();
                let l = mantissa.len();
                if (l > 15) || ((l == 15) && (mantissa[14] & 0b1111_1110) != 0) {
                    bigint /= 10;
                    exponent += 1;
                } else {
                    break;
                }
            }

            if !(MIN_EXPONENT..=MAX_EXPONENT).contains(&exponent) {
                return Err(HdbError::Serialization(format!(
                    "exponent '{exponent}' out of range",
                )));
            }
            let (sign, mantissa) = bigint.to_bytes_le();
            (sign, mantissa, exponent)
        };

        let mut raw = [0_u8; WIRE_DECIMAL_LENGTH];
        mantissa.iter().enumerate().for_each(|(i, b)| raw[i] = *b);

        // bounds are checked above
        let biased_exponent: u16 = (exponent + i64::from(EXPONENT_BIAS)) as u16;
        let mantissa_bit = raw[14] & 0b_0000_0001_u8;
        LittleEndian::write_u16(&mut raw[14..=15], biased_exponent * 2);
        raw[14] |= mantissa_bit;

        if let Sign::Minus = sign {
            raw[15] |= 0b_1000_0000_u8;
        }
        Ok(Self(raw))
    }
}

// Index of the highest non-zero byte among the mantissa bytes 0..=14, or 0 if all are zero.
fn most_significant_byte(raw: &[u8; WIRE_DECIMAL_LENGTH]) -> usize {
    let mut msb = 14;
    while msb > 0 && raw[msb] == 0 {
        msb -= 1;
    }
    msb
}

impl From<[u8; WIRE_DECIMAL_LENGTH]> for WireDecimal {
    fn from(raw: [u8; WIRE_DECIMAL_LENGTH]) -> Self {
        Self(raw)
    }
}

impl TryFrom<&[u8]> for WireDecimal {
    type Error = HdbError;
    fn try_from(bytes: &[u8]) -> HdbResult<Self> {
        Self::from_slice(bytes)
    }
}

impl std::fmt::Display for WireDecimal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl std::fmt::Debug for WireDecimal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "WireDecimal({})", hex::encode(self.0))
    }
}
