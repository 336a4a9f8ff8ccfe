#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    // XPM 4x2, one char per pixel
    let xpm = b"/* XPM */\nstatic char *seed[] = {\n\"4 2 2 1\",\n\". c #000000\",\n\"# c #FFFFFF\",\n\"..##\",\n\"#..#\"\n};\n";
    fs::write(format!("{dir}/xpm_4x2.xpm"), xpm).unwrap();

    // XPM with transparency, symbolic names, and two chars per pixel
    let xpm2 = b"/* XPM */\nstatic char *seed[] = {\n\"2 2 3 2\",\n\"   c None\",\n\".. c red s alert\",\n\"#. g gray50 c #00FF00\",\n\"  ..\",\n\"#.  \"\n};\n";
    fs::write(format!("{dir}/xpm_2char.xpm"), xpm2).unwrap();

    // CALS 8x1 with a one-byte payload
    let mut cals = Vec::new();
    for text in ["srcdocid: NONE", "rorient: 180,090", "rpelcnt: 000008,000001", "rdensty: 0200"] {
        let mut record = text.as_bytes().to_vec();
        record.resize(128, b' ');
        cals.extend(record);
    }
    cals.resize(2048, b' ');
    cals.push(0xa5);
    fs::write(format!("{dir}/cals_8x1.cal"), cals).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/banner_only.bin"), b"/* XPM */").unwrap();
    fs::write(format!("{dir}/unterminated.bin"), b"/* XPM */\n\"1 1 1 1\",\n\"a c red").unwrap();
    fs::write(format!("{dir}/wide_symbols.bin"), b"/* XPM */\n\"1 1 1 9\"\n};").unwrap();

    println!("Generated seed corpus in {dir}/");
}
