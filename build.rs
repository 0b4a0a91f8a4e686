//! Build script that embeds the bundled layout files.

use std::env;
use std::fs;
use std::io;
use std::path::Path;

/// Writes a `phf` map from layout name (file stem) to an `include_str!` of the
/// layout file, for every `*.lay` file in `layout_dir`.
fn output_layouts<P: AsRef<Path>>(layout_dir: &Path, out_path: P) -> io::Result<()> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(layout_dir)? {
        let path = entry?.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some("lay") {
            continue;
        }
        let Some(name) = path.file_stem().and_then(|stem| stem.to_str()) else {
            continue;
        };
        println!("cargo:rerun-if-changed={}", path.display());
        entries.push((name.to_owned(), format!("include_str!({:?})", path.display().to_string())));
    }
    // read_dir order is unspecified; keep the generated file stable
    entries.sort();

    let mut layouts = phf_codegen::Map::<&str>::new();
    for (name, value) in &entries {
        layouts.entry(name.as_str(), value);
    }
    fs::write(out_path, layouts.build().to_string())
}

fn main() -> io::Result<()> {
    let out_dir = env::var_os("OUT_DIR").expect("cargo sets OUT_DIR for build scripts");
    let out_dir = Path::new(&out_dir);
    let manifest_dir =
        env::var_os("CARGO_MANIFEST_DIR").expect("cargo sets CARGO_MANIFEST_DIR for build scripts");
    let layout_dir = Path::new(&manifest_dir).join("layouts");

    println!("cargo:rerun-if-changed={}", layout_dir.display());
    output_layouts(&layout_dir, out_dir.join("LAYOUTS.rs"))
}
