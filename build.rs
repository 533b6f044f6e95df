fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=src/linker.ld");

    let target_os = std::env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();
    let target_arch = std::env::var("CARGO_CFG_TARGET_ARCH").unwrap_or_default();
    if target_os == "none" && target_arch == "riscv64" {
        println!("cargo:rustc-link-arg-bin=nt_hal_demo=-T");
        println!("cargo:rustc-link-arg-bin=nt_hal_demo=src/linker.ld");
    }
}
