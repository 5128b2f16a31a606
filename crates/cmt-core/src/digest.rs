use std::fmt;

use serde::{Deserialize, Serialize};

/// A 16-byte opaque content-hash identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Digest(#[serde(with = "hex_bytes")] [u8; 16]);

impl Digest {
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Digest(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

mod hex_bytes {
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8; 16], ser: S) -> Result<S::Ok, S::Error> {
        let hex: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
        ser.serialize_str(&hex)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<[u8; 16], D::Error> {
        let s = String::deserialize(de)?;
        if s.len() != 32 {
            return Err(D::Error::custom("digest hex string must be 32 characters"));
        }
        let mut out = [0u8; 16];
        for (i, chunk) in out.iter_mut().enumerate() {
            *chunk = u8::from_str_radix(&s[i * 2..i * 2 + 2], 16)
                .map_err(|e| D::Error::custom(e.to_string()))?;
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trip() {
        let digest = Digest::from_bytes([0xab; 16]);
        let json = serde_json::to_string(&digest).unwrap();
        assert_eq!(json, "\"abababababababababababababababab\"");
        let back: Digest = serde_json::from_str(&json).unwrap();
        assert_eq!(digest, back);
    }

    #[test]
    fn display_is_lowercase_hex() {
        let digest = Digest::from_bytes([0x0a, 0xff, 0x10, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(digest.to_string(), "0aff100000000000000000000000000");
        assert_eq!(digest.to_string().len(), 32);
    }
}
