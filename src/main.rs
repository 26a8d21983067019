#![cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]

mod clipboard;
mod config;
mod logging;
mod navigation;
mod particles;
mod reveal;
mod scrolling;
mod toast;

#[cfg(target_arch = "wasm32")]
mod browser;
#[cfg(target_arch = "wasm32")]
mod frontend;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!("This project is frontend-only. Run `trunk serve` or `trunk build --release`.");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    frontend::run();
}
