//! Byte encoding of one feature vector for the vector store.
//!
//! Layout: `b"TMV"`, one version byte, then a CBOR map
//! `{ len, entries: [(index, value), ...] }` holding only the nonzero entries.

use crate::error::CodecError;
use crate::utils::math::vector::serde::ZeroSpVecData;
use crate::utils::math::vector::ZeroSpVec;

pub const MAGIC: &[u8; 3] = b"TMV";
pub const VERSION: u8 = 1;
const HEADER_LEN: usize = MAGIC.len() + 1;

/// Encode a vector. The output decodes back to a vector equal to `vec`.
pub fn encode(vec: &ZeroSpVec<f64>) -> Result<Vec<u8>, CodecError> {
    let mut buf = Vec::with_capacity(HEADER_LEN + 16 + vec.nnz() * 14);
    buf.extend_from_slice(MAGIC);
    buf.push(VERSION);
    serde_cbor::to_writer(&mut buf, vec).map_err(|e| CodecError::Malformed(e.to_string()))?;
    Ok(buf)
}

/// Decode bytes produced by [`encode`].
/// Any structural problem yields a `CodecError`, never a partial vector.
pub fn decode(bytes: &[u8]) -> Result<ZeroSpVec<f64>, CodecError> {
    if bytes.len() < MAGIC.len() {
        return Err(if MAGIC.starts_with(bytes) {
            CodecError::Truncated
        } else {
            CodecError::BadMagic
        });
    }
    if &bytes[..MAGIC.len()] != MAGIC {
        return Err(CodecError::BadMagic);
    }
    let version = *bytes.get(MAGIC.len()).ok_or(CodecError::Truncated)?;
    if version != VERSION {
        return Err(CodecError::UnsupportedVersion(version));
    }

    let data: ZeroSpVecData<f64> = serde_cbor::from_slice(&bytes[HEADER_LEN..]).map_err(|e| {
        if e.is_eof() {
            CodecError::Truncated
        } else {
            CodecError::Malformed(e.to_string())
        }
    })?;
    if let Some((index, _)) = data.entries.iter().find(|(_, v)| !v.is_finite()) {
        return Err(CodecError::NonFiniteValue(*index));
    }
    ZeroSpVec::try_from_entries(data.len, data.entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ZeroSpVec<f64> {
        ZeroSpVec::from_unsorted(6, vec![(4, 0.25), (1, 0.5), (5, 1.0 / 3.0)])
    }

    #[test]
    fn round_trip_is_exact() {
        let v = sample();
        let decoded = decode(&encode(&v).unwrap()).unwrap();
        assert_eq!(decoded, v);
        assert_eq!(decoded.len(), 6);
        for (a, b) in decoded.values().iter().zip(v.values()) {
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }

    #[test]
    fn all_zero_vector_keeps_dimension() {
        let v = ZeroSpVec::<f64>::with_len(9);
        let decoded = decode(&encode(&v).unwrap()).unwrap();
        assert_eq!(decoded.len(), 9);
        assert_eq!(decoded.nnz(), 0);
    }

    #[test]
    fn header_errors() {
        assert_eq!(decode(b""), Err(CodecError::Truncated));
        assert_eq!(decode(b"TM"), Err(CodecError::Truncated));
        assert_eq!(decode(b"TMV"), Err(CodecError::Truncated));
        assert_eq!(decode(b"XYZ\x01"), Err(CodecError::BadMagic));
        assert_eq!(decode(b"Q"), Err(CodecError::BadMagic));
        assert_eq!(decode(b"TMV\x09\xa0"), Err(CodecError::UnsupportedVersion(9)));
    }

    #[test]
    fn truncated_payload_is_rejected() {
        let bytes = encode(&sample()).unwrap();
        for cut in HEADER_LEN..bytes.len() {
            assert!(decode(&bytes[..cut]).is_err(), "cut at {cut} decoded");
        }
        assert_eq!(decode(&bytes[..HEADER_LEN]), Err(CodecError::Truncated));
    }

    #[test]
    fn trailing_garbage_is_rejected() {
        let mut bytes = encode(&sample()).unwrap();
        bytes.push(0x00);
        assert!(matches!(decode(&bytes), Err(CodecError::Malformed(_))));
    }

    fn raw(len: u64, entries: Vec<(u64, f64)>) -> Vec<u8> {
        #[derive(serde::Serialize)]
        struct Raw {
            len: u64,
            entries: Vec<(u64, f64)>,
        }
        let mut bytes = b"TMV\x01".to_vec();
        bytes.extend(serde_cbor::to_vec(&Raw { len, entries }).unwrap());
        bytes
    }

    #[test]
    fn structural_errors() {
        assert_eq!(
            decode(&raw(3, vec![(0, 1.0), (3, 1.0)])),
            Err(CodecError::IndexOutOfRange { index: 3, len: 3 })
        );
        assert_eq!(
            decode(&raw(3, vec![(2, 1.0), (1, 1.0)])),
            Err(CodecError::UnsortedIndices(1))
        );
        assert_eq!(
            decode(&raw(3, vec![(1, f64::NAN)])),
            Err(CodecError::NonFiniteValue(1))
        );
        assert_eq!(
            decode(&raw(3, vec![(1, f64::INFINITY)])),
            Err(CodecError::NonFiniteValue(1))
        );
    }
}
