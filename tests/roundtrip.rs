use proptest::prelude::*;
use rand::Rng;
use tagpack::{Compress, Decoder, Encoder, Error};

const PHI: f64 = 1.618033988749895;

fn constants() -> [(&'static str, f64); 4] {
    [
        ("{ \"name\": \"pi\" }", std::f64::consts::PI),
        ("{ \"name\": \"phi\" }", PHI),
        ("{ \"name\": \"e\" }", std::f64::consts::E),
        ("{ \"name\": \"ln(2)\" }", std::f64::consts::LN_2),
    ]
}

fn constants_encoder() -> Encoder {
    let mut enc = Encoder::new();
    for (label, value) in constants() {
        enc.encode_str(label);
        enc.encode_f64(value);
    }
    enc
}

#[test]
fn constants_scenario() {
    let enc = constants_encoder();
    let plain = enc.data();
    assert_eq!(plain.len(), 153);

    let packed = enc.compress().unwrap();
    assert!(
        packed.len() < plain.len(),
        "compressed {} bytes into {}",
        plain.len(),
        packed.len()
    );

    let mut dec = Decoder::new(&packed);
    dec.decompress().unwrap();
    assert_eq!(dec.as_bytes(), &plain[..]);
    dec.validate().unwrap();
    for (label, value) in constants() {
        assert_eq!(dec.decode_string().unwrap(), label);
        assert_eq!(dec.decode_f64().unwrap(), value);
    }
    assert_eq!(dec.position(), enc.len());
}

#[test]
fn every_level_decompresses() {
    for level in 0..=tagpack::MAX_LEVEL {
        let mut enc = Encoder::with_compression(Compress::new(level).unwrap());
        enc.encode_str("{ \"name\": \"e\" }");
        enc.encode_f64(std::f64::consts::E);
        let packed = enc.compress().unwrap();

        let mut dec = Decoder::from_vec(packed);
        dec.decompress().unwrap();
        dec.validate().unwrap();
        assert_eq!(dec.decode_string().unwrap(), "{ \"name\": \"e\" }");
        assert_eq!(dec.decode_f64().unwrap(), std::f64::consts::E);
    }
}

#[test]
fn boundary_values() {
    let mut enc = Encoder::new();
    enc.encode_bool(true);
    enc.encode_bool(false);
    for v in [0, -1, isize::MIN, isize::MAX] {
        enc.encode_int(v);
    }
    for v in [0, -1, i64::MIN, i64::MAX] {
        enc.encode_i64(v);
    }
    for v in [0, -1, i32::MIN, i32::MAX] {
        enc.encode_i32(v);
    }
    for v in [0, -1, i16::MIN, i16::MAX] {
        enc.encode_i16(v);
    }
    for v in [0, -1, i8::MIN, i8::MAX] {
        enc.encode_i8(v);
    }
    for v in [0, 10, usize::MAX] {
        enc.encode_uint(v);
    }
    for v in [0, 10, u64::MAX] {
        enc.encode_u64(v);
    }
    for v in [0, 10, u32::MAX] {
        enc.encode_u32(v);
    }
    for v in [0, 10, u16::MAX] {
        enc.encode_u16(v);
    }
    for v in [0, 10, u8::MAX] {
        enc.encode_u8(v);
    }
    for v in [0.0, -std::f64::consts::PI, std::f64::consts::PI, f64::MIN, f64::MAX] {
        enc.encode_f64(v);
    }
    for v in [0.0, -std::f32::consts::PI, std::f32::consts::PI, f32::MIN, f32::MAX] {
        enc.encode_f32(v);
    }
    enc.encode_str("");
    enc.encode_str("Hello, World!");
    enc.encode_bytes(&[]);
    enc.encode_bytes(&[0x00, 0x01, 0x02, 0x03]);

    let data = enc.data();
    let mut dec = Decoder::new(&data);
    dec.validate().unwrap();
    assert!(dec.decode_bool().unwrap());
    assert!(!dec.decode_bool().unwrap());
    for v in [0, -1, isize::MIN, isize::MAX] {
        assert_eq!(dec.decode_int().unwrap(), v);
    }
    for v in [0, -1, i64::MIN, i64::MAX] {
        assert_eq!(dec.decode_i64().unwrap(), v);
    }
    for v in [0, -1, i32::MIN, i32::MAX] {
        assert_eq!(dec.decode_i32().unwrap(), v);
    }
    for v in [0, -1, i16::MIN, i16::MAX] {
        assert_eq!(dec.decode_i16().unwrap(), v);
    }
    for v in [0, -1, i8::MIN, i8::MAX] {
        assert_eq!(dec.decode_i8().unwrap(), v);
    }
    for v in [0, 10, usize::MAX] {
        assert_eq!(dec.decode_uint().unwrap(), v);
    }
    for v in [0, 10, u64::MAX] {
        assert_eq!(dec.decode_u64().unwrap(), v);
    }
    for v in [0, 10, u32::MAX] {
        assert_eq!(dec.decode_u32().unwrap(), v);
    }
    for v in [0, 10, u16::MAX] {
        assert_eq!(dec.decode_u16().unwrap(), v);
    }
    for v in [0, 10, u8::MAX] {
        assert_eq!(dec.decode_u8().unwrap(), v);
    }
    for v in [0.0, -std::f64::consts::PI, std::f64::consts::PI, f64::MIN, f64::MAX] {
        assert_eq!(dec.decode_f64().unwrap(), v);
    }
    for v in [0.0, -std::f32::consts::PI, std::f32::consts::PI, f32::MIN, f32::MAX] {
        assert_eq!(dec.decode_f32().unwrap(), v);
    }
    assert_eq!(dec.decode_string().unwrap(), "");
    assert_eq!(dec.decode_string().unwrap(), "Hello, World!");
    assert_eq!(dec.decode_bytes().unwrap(), Vec::<u8>::new());
    assert_eq!(dec.decode_bytes().unwrap(), vec![0x00, 0x01, 0x02, 0x03]);
    assert_eq!(dec.position(), enc.len());
}

#[test]
fn random_corruption_is_caught() {
    let mut rng = rand::thread_rng();
    let enc = constants_encoder();
    let plain = enc.data();
    for _ in 0..256 {
        let mut data = plain.clone();
        let index = rng.gen_range(0..enc.len());
        let bit = 1u8 << rng.gen_range(0..8);
        data[index] ^= bit;
        let dec = Decoder::new(&data);
        assert!(
            matches!(dec.validate(), Err(Error::ChecksumMismatch { .. })),
            "flip of bit {:#04x} in byte {} went unnoticed",
            bit,
            index
        );
    }
}

#[test]
fn stripped_trailer_fails() {
    let enc = constants_encoder();
    let data = enc.data();
    let dec = Decoder::new(&data[..enc.len()]);
    assert!(matches!(
        dec.validate(),
        Err(Error::ChecksumMismatch { .. }) | Err(Error::MalformedTrailer(_))
    ));
}

#[test]
fn truncated_envelope_fails() {
    let packed = constants_encoder().compress().unwrap();
    let mut dec = Decoder::new(&packed[..packed.len() - 3]);
    assert!(matches!(
        dec.decompress(),
        Err(Error::CompressionFailure(_))
    ));
}

proptest! {
    #[test]
    fn any_ints(a: i8, b: i16, c: i32, d: i64, e: isize) {
        let mut enc = Encoder::new();
        enc.encode_i8(a);
        enc.encode_i16(b);
        enc.encode_i32(c);
        enc.encode_i64(d);
        enc.encode_int(e);
        let data = enc.data();
        let mut dec = Decoder::new(&data);
        prop_assert!(dec.validate().is_ok());
        prop_assert_eq!(dec.decode_i8().unwrap(), a);
        prop_assert_eq!(dec.decode_i16().unwrap(), b);
        prop_assert_eq!(dec.decode_i32().unwrap(), c);
        prop_assert_eq!(dec.decode_i64().unwrap(), d);
        prop_assert_eq!(dec.decode_int().unwrap(), e);
    }

    #[test]
    fn any_uints(a: u8, b: u16, c: u32, d: u64, e: usize) {
        let mut enc = Encoder::new();
        enc.encode_u8(a);
        enc.encode_u16(b);
        enc.encode_u32(c);
        enc.encode_u64(d);
        enc.encode_uint(e);
        let data = enc.data();
        let mut dec = Decoder::new(&data);
        prop_assert!(dec.validate().is_ok());
        prop_assert_eq!(dec.decode_u8().unwrap(), a);
        prop_assert_eq!(dec.decode_u16().unwrap(), b);
        prop_assert_eq!(dec.decode_u32().unwrap(), c);
        prop_assert_eq!(dec.decode_u64().unwrap(), d);
        prop_assert_eq!(dec.decode_uint().unwrap(), e);
    }

    #[test]
    fn any_floats(a: f64, b: f32) {
        let mut enc = Encoder::new();
        enc.encode_f64(a);
        enc.encode_f32(b);
        let data = enc.data();
        let mut dec = Decoder::new(&data);
        // Compare bits so NaN payloads count too
        prop_assert_eq!(dec.decode_f64().unwrap().to_bits(), a.to_bits());
        prop_assert_eq!(dec.decode_f32().unwrap().to_bits(), b.to_bits());
    }

    #[test]
    fn any_blobs(s in ".*", b in proptest::collection::vec(any::<u8>(), 0..512)) {
        let mut enc = Encoder::new();
        enc.encode_str(&s);
        enc.encode_bytes(&b);
        let packed = enc.compress().unwrap();
        let mut dec = Decoder::new(&packed);
        dec.decompress().unwrap();
        prop_assert!(dec.validate().is_ok());
        prop_assert_eq!(dec.decode_string().unwrap(), s);
        prop_assert_eq!(dec.decode_bytes().unwrap(), b);
        prop_assert!(dec.is_empty() || dec.remaining() <= 6);
    }

    #[test]
    fn compressible_payloads(byte: u8, len in 0usize..8192, level in 0..=tagpack::MAX_LEVEL) {
        let mut enc = Encoder::with_compression(Compress::new(level).unwrap());
        enc.encode_bytes(&vec![byte; len]);
        enc.encode_str(&"ab".repeat(len / 2));
        let plain = enc.data();
        let packed = enc.compress().unwrap();

        let mut dec = Decoder::new(&packed);
        dec.decompress().unwrap();
        prop_assert_eq!(dec.as_bytes(), &plain[..]);
        prop_assert!(dec.validate().is_ok());
        prop_assert_eq!(dec.decode_bytes().unwrap(), vec![byte; len]);
        prop_assert_eq!(dec.decode_string().unwrap(), "ab".repeat(len / 2));

        let mut dec = Decoder::new(&packed);
        dec.decompress_limited(plain.len()).unwrap();
        prop_assert_eq!(dec.as_bytes(), &plain[..]);
    }

    #[test]
    fn arbitrary_input_never_panics(data in proptest::collection::vec(any::<u8>(), 0..64)) {
        let mut dec = Decoder::new(&data);
        let _ = dec.validate();
        while !dec.is_empty() {
            let before = dec.position();
            let progressed = dec.decode_bool().is_ok()
                || dec.decode_i64().is_ok()
                || dec.decode_u8().is_ok()
                || dec.decode_f32().is_ok()
                || dec.decode_bytes().is_ok();
            if !progressed && dec.position() == before {
                break;
            }
        }
        let mut dec = Decoder::new(&data);
        let _ = dec.decompress_limited(1 << 16);
    }
}
