#![no_main]
use libfuzzer_sys::fuzz_target;
use tagpack::Decoder;

fuzz_target!(|data: &[u8]| {
    let mut dec = Decoder::new(data);
    let _ = dec.validate();
    loop {
        let before = dec.position();
        let _ = dec.decode_bool().is_ok()
            || dec.decode_int().is_ok()
            || dec.decode_u16().is_ok()
            || dec.decode_f64().is_ok()
            || dec.decode_string().is_ok()
            || dec.decode_bytes().is_ok();
        if dec.position() == before {
            break;
        }
    }

    let mut dec = Decoder::new(data);
    if dec.decompress_limited(1 << 20).is_ok() {
        let _ = dec.validate();
    }
});
