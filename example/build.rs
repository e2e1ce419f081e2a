// Generates `$OUT_DIR/<fixture>.rs` for every bundled fixture.

use std::{env, error::Error, fs, path::PathBuf};

use blueprint::{fixtures, generate_strict, Rust};

fn main() -> Result<(), Box<dyn Error>> {
    println!("cargo:rerun-if-changed=build.rs");

    let out_dir = PathBuf::from(env::var("OUT_DIR")?);
    for fixture in fixtures::names() {
        let code = generate_strict(&fixtures::by_name(fixture)?, &Rust)?;
        fs::write(out_dir.join(format!("{fixture}.rs")), code)?;
    }

    Ok(())
}
