//! Binary entrypoint for the browser-hosted starter site.

#[cfg(all(target_arch = "wasm32", feature = "csr"))]
fn main() {
    web_starter::mount();
}

#[cfg(not(all(target_arch = "wasm32", feature = "csr")))]
fn main() {
    eprintln!(
        "This binary is intended for the browser/WASM workflow. Use `cargo dev` for local development or `cargo build-web` for a release bundle."
    );
}
