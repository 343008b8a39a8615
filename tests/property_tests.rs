mod common;

use num_bigint::BigUint;
use proptest::prelude::*;
use solinas_pairing_auth::crypto::codec::trim;
use solinas_pairing_auth::{
    DomainHash, ElementRef, Error, FieldCodec, PairingEngine, PairingParameters, SeededRng, TypeA,
};

use common::{engine, params};

proptest! {
    #[test]
    fn decode_inverts_encode_up_to_padding(message in prop::collection::vec(any::<u8>(), 0..=19)) {
        let codec = FieldCodec::for_order(&params().r);
        let value = codec.encode(&message).unwrap();
        let decoded = codec.decode(&value).unwrap();

        prop_assert_eq!(&decoded, &codec.pad(&message).unwrap());
        prop_assert_eq!(trim(&decoded, message.len()).unwrap(), message.as_slice());
        prop_assert!(value < params().r);
    }

    #[test]
    fn encoding_fails_exactly_past_capacity(bits in 8u64..2048) {
        let codec = FieldCodec::new(bits);
        let fits = (bits / 8) as usize;

        prop_assert!(codec.encode(&vec![0xab; fits]).is_ok());
        let too_long = codec.encode(&vec![0xab; fits + 1]);
        let is_too_long = matches!(too_long, Err(Error::MessageTooLong { .. }));
        prop_assert!(is_too_long);
    }

    #[test]
    fn scalar_encoding_survives_the_engine(message in prop::collection::vec(any::<u8>(), 0..=19)) {
        let engine = engine();
        let codec = FieldCodec::for_order(engine.order());
        let scalar = codec.encode_scalar(&engine, &message).unwrap();
        prop_assert_eq!(codec.decode_scalar(&engine, &scalar).unwrap(), codec.pad(&message).unwrap());
    }

    #[test]
    fn hash_integer_is_pure(value in any::<u128>()) {
        let n = BigUint::from(value);
        prop_assert_eq!(
            DomainHash::<TypeA>::hash_integer(&n),
            DomainHash::<TypeA>::hash_integer(&n)
        );
    }

    #[test]
    fn element_hashes_are_pure(seed in any::<u64>()) {
        let hash = DomainHash::new(engine());
        let engine = hash.engine().clone();
        let mut rng = SeededRng::from_seed(seed);
        let s = engine.random_scalar(&mut rng);
        let parts = [ElementRef::Scalar(&s)];

        prop_assert_eq!(hash.hash_to_scalar(&parts), hash.hash_to_scalar(&parts));
        prop_assert_eq!(hash.hash_to_g1(&parts), hash.hash_to_g1(&parts));
    }

    #[test]
    fn block_parser_never_panics(text in "\\PC{0,200}") {
        let _ = PairingParameters::from_block(&text);
    }

    #[test]
    fn block_lines_parse_in_any_order(shift in 0usize..8) {
        let block = params().to_block();
        let mut lines: Vec<&str> = block.lines().collect();
        lines.rotate_left(shift);
        let parsed = PairingParameters::from_block(&lines.join("\n")).unwrap();
        prop_assert_eq!(&parsed, params());
    }
}
