use std::env;
use std::fs;
use std::io::Write;
use std::path::Path;

// Compiles every `locales/<code>/translation.json` into the binary as
// `BUNDLED_LOCALES: &[(&str, &str)]` (code, JSON text).
fn main() {
    println!("cargo:rerun-if-changed=locales/");

    let out_dir = env::var("OUT_DIR").unwrap();
    let dest_path = Path::new(&out_dir).join("bundled_locales.rs");
    let mut f = fs::File::create(&dest_path).unwrap();

    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let locale_dir = Path::new(&manifest_dir).join("locales");
    if !locale_dir.exists() {
        writeln!(f, "pub const BUNDLED_LOCALES: &[(&str, &str)] = &[];").unwrap();
        return;
    }

    let mut entries: Vec<_> = fs::read_dir(&locale_dir)
        .unwrap()
        .map(|res| res.unwrap().path())
        .filter(|path| path.is_dir() && path.join("translation.json").exists())
        .collect();

    entries.sort();

    writeln!(f, "pub const BUNDLED_LOCALES: &[(&str, &str)] = &[").unwrap();
    for dir in entries {
        let code = dir.file_name().unwrap().to_string_lossy().to_string();
        let file = dir.join("translation.json");
        println!("cargo:rerun-if-changed={}", file.display());
        writeln!(f, "    ({:?}, include_str!({:?})),", code, file.display().to_string()).unwrap();
    }
    writeln!(f, "];").unwrap();
}
