use std::env;

fn main() {
    let version =
        env::var("HABITAT_VERSION").unwrap_or_else(|_| env::var("CARGO_PKG_VERSION").unwrap());
    println!("cargo:rerun-if-env-changed=HABITAT_VERSION");
    println!("cargo:rustc-env=HABITAT_VERSION={version}");
}
