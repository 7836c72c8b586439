//! Used for generating build information for the filler.

use std::{env, error::Error, path::MAIN_SEPARATOR};
use vergen::{BuildBuilder, CargoBuilder, Emitter};

fn main() -> Result<(), Box<dyn Error>> {
    let mut emitter = Emitter::default();

    let build_builder = BuildBuilder::default().build_timestamp(true).build()?;

    // Add build timestamp information.
    emitter.add_instructions(&build_builder)?;

    let cargo_builder = CargoBuilder::default().features(true).target_triple(true).build()?;

    // Add cargo features and target information.
    emitter.add_instructions(&cargo_builder)?;

    emitter.emit_and_set()?;

    let out_dir = env::var("OUT_DIR")?;
    let profile = out_dir.rsplit(MAIN_SEPARATOR).nth(3).ok_or("unexpected OUT_DIR layout")?;
    println!("cargo:rustc-env=FILLER_BUILD_PROFILE={profile}");

    Ok(())
}
