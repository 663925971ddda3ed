extern crate tagpack;

use tagpack::*;

const PHI: f64 = 1.618033988749895;

fn main() -> Result<()> {
    let constants = [
        ("pi", std::f64::consts::PI),
        ("phi", PHI),
        ("e", std::f64::consts::E),
        ("ln(2)", std::f64::consts::LN_2),
    ];

    let mut enc = Encoder::new();
    for (name, value) in constants {
        enc.encode_str(&format!("{{ \"name\": \"{}\" }}", name));
        enc.encode_f64(value);
    }

    let plain = enc.data();
    println!("Bytes: {}", plain.len());

    let packed = enc.compress()?;
    println!("Compressed bytes: {}", packed.len());
    println!(
        "Change: {:.0}%",
        100.0 * (packed.len() as f64 - plain.len() as f64) / plain.len() as f64
    );

    let mut dec = Decoder::new(&packed);
    dec.decompress()?;
    dec.validate()?;

    for _ in 0..constants.len() {
        let label = dec.decode_string()?;
        let value = dec.decode_f64()?;
        println!("{} = {:.6}", label, value);
    }
    Ok(())
}
