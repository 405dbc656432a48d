use crate::bn254::{BN254Scalar, BN254G1, BN254G2};
use crate::prelude::*;
use base64::{engine::general_purpose::URL_SAFE, Engine};

/// Helper trait to serialize objects that implement from/to bytes
pub trait FromToBytes: Sized {
    /// Convert to the bytes used on the wire.
    fn to_serialized_bytes(&self) -> Vec<u8>;
    /// Reconstruct from the bytes used on the wire.
    fn from_serialized_bytes(bytes: &[u8]) -> Result<Self>;
}

/// Encode bytes as url-safe base64.
pub fn b64enc<T: ?Sized + AsRef<[u8]>>(input: &T) -> String {
    URL_SAFE.encode(input)
}

/// Decode url-safe base64.
pub fn b64dec<T: ?Sized + AsRef<[u8]>>(input: &T) -> Result<Vec<u8>> {
    URL_SAFE
        .decode(input)
        .map_err(|_| AlgebraError::DeserializationError)
}

/// Derive serde `Serialize`/`Deserialize` for a type implementing `FromToBytes`:
/// base64 strings for human-readable formats, raw bytes otherwise.
#[macro_export]
macro_rules! serialize_deserialize {
    ($t:ident) => {
        impl ::serde::Serialize for $t {
            fn serialize<S>(&self, serializer: S) -> ::core::result::Result<S::Ok, S::Error>
            where
                S: ::serde::Serializer,
            {
                let bytes = $crate::serialization::FromToBytes::to_serialized_bytes(self);
                if serializer.is_human_readable() {
                    serializer.serialize_str(&$crate::serialization::b64enc(&bytes))
                } else {
                    serializer.serialize_bytes(&bytes)
                }
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $t {
            fn deserialize<D>(deserializer: D) -> ::core::result::Result<Self, D::Error>
            where
                D: ::serde::Deserializer<'de>,
            {
                let bytes = if deserializer.is_human_readable() {
                    deserializer.deserialize_str($crate::serialization::obj_serde::BytesVisitor)?
                } else {
                    deserializer.deserialize_bytes($crate::serialization::obj_serde::BytesVisitor)?
                };
                <$t as $crate::serialization::FromToBytes>::from_serialized_bytes(bytes.as_slice())
                    .map_err(::serde::de::Error::custom)
            }
        }
    };
}

/// The serde visitor shared by `serialize_deserialize!`.
pub mod obj_serde {
    use crate::prelude::*;
    use serde::de::{SeqAccess, Visitor};

    /// Collects bytes from a byte string, a sequence or a base64 string.
    pub struct BytesVisitor;

    impl<'de> Visitor<'de> for BytesVisitor {
        type Value = Vec<u8>;

        fn expecting(&self, formatter: &mut Formatter<'_>) -> core::fmt::Result {
            formatter.write_str("a valid FromToBytes object")
        }

        fn visit_seq<V>(self, mut seq: V) -> core::result::Result<Vec<u8>, V::Error>
        where
            V: SeqAccess<'de>,
        {
            let mut vec: Vec<u8> = vec![];
            while let Some(x) = seq.next_element()? {
                vec.push(x);
            }
            Ok(vec)
        }

        fn visit_bytes<E>(self, v: &[u8]) -> core::result::Result<Vec<u8>, E> {
            Ok(v.to_vec())
        }

        fn visit_str<E>(self, v: &str) -> core::result::Result<Vec<u8>, E>
        where
            E: serde::de::Error,
        {
            b64dec(v).map_err(serde::de::Error::custom)
        }
    }
}

macro_rules! to_from_bytes_scalar {
    ($t:ident) => {
        impl FromToBytes for $t {
            fn to_serialized_bytes(&self) -> Vec<u8> {
                self.to_bytes()
            }
            fn from_serialized_bytes(bytes: &[u8]) -> Result<$t> {
                $t::from_bytes(bytes)
            }
        }
    };
}

to_from_bytes_scalar!(BN254Scalar);
serialize_deserialize!(BN254Scalar);

macro_rules! to_from_bytes_group {
    ($g:ident) => {
        impl FromToBytes for $g {
            fn to_serialized_bytes(&self) -> Vec<u8> {
                self.to_compressed_bytes()
            }
            fn from_serialized_bytes(bytes: &[u8]) -> Result<$g> {
                $g::from_compressed_bytes(bytes)
            }
        }
    };
}

to_from_bytes_group!(BN254G1);
to_from_bytes_group!(BN254G2);
serialize_deserialize!(BN254G1);
serialize_deserialize!(BN254G2);

#[cfg(test)]
mod test {
    use crate::bn254::{BN254Scalar, BN254G1, BN254G2};
    use crate::prelude::*;

    #[test]
    fn json_round_trip_uses_base64() {
        let mut prng = test_rng();
        let s = BN254Scalar::random(&mut prng);
        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(json, format!("\"{}\"", b64enc(&s.to_bytes())));
        let s_back: BN254Scalar = serde_json::from_str(&json).unwrap();
        assert_eq!(s, s_back);

        let p = BN254G1::random(&mut prng);
        let p_back: BN254G1 = serde_json::from_str(&serde_json::to_string(&p).unwrap()).unwrap();
        assert_eq!(p, p_back);

        let q = BN254G2::random(&mut prng);
        let q_back: BN254G2 = serde_json::from_str(&serde_json::to_string(&q).unwrap()).unwrap();
        assert_eq!(q, q_back);
    }

    #[test]
    fn rejects_garbage() {
        assert!(serde_json::from_str::<BN254G1>("\"not base64!\"").is_err());
        let junk = b64enc(&[0xffu8; 32]);
        assert!(serde_json::from_str::<BN254G1>(&format!("\"{}\"", junk)).is_err());
        assert!(serde_json::from_str::<BN254Scalar>(&format!("\"{}\"", junk)).is_err());
    }
}
