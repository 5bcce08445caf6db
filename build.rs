use anyhow::*;
use fs_extra::copy_items;
use fs_extra::dir::CopyOptions;
use std::env;
use std::path::PathBuf;

fn main() -> Result<()> {
    // This tells Cargo to rerun this script if something in /assets/ changes.
    println!("cargo:rerun-if-changed=assets/*");

    let out_dir = env::var("OUT_DIR")?;
    let mut copy_options = CopyOptions::new();
    copy_options.overwrite = true;
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let assets_src = manifest_dir.join("assets");
    if assets_src.exists() {
        copy_items(&[assets_src], &out_dir, &copy_options)?;
    }
    // The viewer falls back to this copy when started outside the crate root.
    println!(
        "cargo:rustc-env=SHAPE_VIEWER_BUNDLED_ASSETS={}",
        PathBuf::from(out_dir).join("assets").display()
    );

    Ok(())
}
