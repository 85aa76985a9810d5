//! Build script for encoder firmware
//!
//! Handles:
//! - Linker scripts for the Cortex-M demo binary (cortex-m-rt, defmt)

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Host builds (std tests) link normally
    let target = std::env::var("TARGET").unwrap_or_default();
    if !target.starts_with("thumb") {
        return;
    }

    // memory.x comes from embassy-stm32's `memory-x` feature
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
}
