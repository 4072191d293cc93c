use std::env;

fn main() {
    println!("cargo:rerun-if-env-changed=CAND_VIEWER_VERSION");
    let version = env::var("CAND_VIEWER_VERSION")
        .unwrap_or_else(|_| env::var("CARGO_PKG_VERSION").unwrap());
    println!("cargo:rustc-env=CAND_VIEWER_VERSION={version}");
}
