//! Field codecs for the node's JSON wire format

/// Byte fields as standard base64; `null` and `""` read as empty
pub(crate) mod base64_bytes {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded: Option<String> = Option::deserialize(deserializer)?;
        match encoded.as_deref() {
            None | Some("") => Ok(Vec::new()),
            Some(s) => STANDARD.decode(s).map_err(serde::de::Error::custom),
        }
    }
}

/// Amounts as decimal strings; numbers are accepted on input
pub(crate) mod decimal_u256 {
    use serde::{Deserialize, Deserializer, Serializer};
    use znn_primitives::U256;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Text(String),
        Number(u64),
    }

    pub fn serialize<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
        match Repr::deserialize(deserializer)? {
            Repr::Text(s) => U256::from_dec_str(&s).map_err(|e| {
                serde::de::Error::custom(format!("invalid decimal amount {:?}: {:?}", s, e))
            }),
            Repr::Number(n) => Ok(U256::from(n)),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};
    use znn_primitives::U256;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Sample {
        #[serde(with = "super::base64_bytes", default)]
        data: Vec<u8>,
        #[serde(with = "super::decimal_u256")]
        amount: U256,
    }

    #[test]
    fn test_base64_and_decimal() {
        let sample = Sample {
            data: vec![1, 2, 3],
            amount: U256::from(10).pow(U256::from(30)),
        };
        let json = serde_json::to_string(&sample).unwrap();
        assert_eq!(
            json,
            r#"{"data":"AQID","amount":"1000000000000000000000000000000"}"#
        );
        assert_eq!(serde_json::from_str::<Sample>(&json).unwrap(), sample);
    }

    #[test]
    fn test_empty_and_null_bytes() {
        let empty: Sample = serde_json::from_str(r#"{"data":"","amount":"0"}"#).unwrap();
        assert!(empty.data.is_empty());
        let null: Sample = serde_json::from_str(r#"{"data":null,"amount":"0"}"#).unwrap();
        assert!(null.data.is_empty());
    }

    #[test]
    fn test_numeric_amount_accepted() {
        let sample: Sample = serde_json::from_str(r#"{"data":"","amount":42}"#).unwrap();
        assert_eq!(sample.amount, U256::from(42));
    }

    #[test]
    fn test_invalid_amount() {
        assert!(serde_json::from_str::<Sample>(r#"{"data":"","amount":"12x"}"#).is_err());
        assert!(serde_json::from_str::<Sample>(r#"{"data":"!!","amount":"1"}"#).is_err());
    }
}
