use proptest::prelude::*;
use strpack_codec::{base64, hex, CodecError};

proptest! {
    #[test]
    fn hex_round_trips(data in proptest::collection::vec(any::<u8>(), 0..256)) {
        let text = hex::encode(&data);
        prop_assert_eq!(text.len(), data.len() * 2);
        prop_assert_eq!(hex::decode(&text).unwrap(), data.clone());
        prop_assert_eq!(hex::decode(&text.to_uppercase()).unwrap(), data);
    }

    #[test]
    fn base64_round_trips(data in proptest::collection::vec(any::<u8>(), 0..256)) {
        let text = base64::encode(&data);
        prop_assert_eq!(text.len(), base64::encoded_len(data.len()));
        prop_assert_eq!(base64::decoded_len(&text), data.len());
        prop_assert_eq!(base64::decode(&text).unwrap(), data);
    }

    #[test]
    fn hex_reports_first_bad_digit(prefix in "[0-9a-f]{0,16}", bad in "[g-z]") {
        let prefix = if prefix.len() % 2 == 1 { format!("{prefix}0") } else { prefix };
        let text = format!("{prefix}{bad}0");
        let err = hex::decode(&text).unwrap_err();
        prop_assert_eq!(err.position(), Some(prefix.len()));
        let is_invalid_byte = matches!(err, CodecError::InvalidByte { .. });
        prop_assert!(is_invalid_byte);
    }
}
