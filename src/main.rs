#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
mod menu;
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
mod preference;
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
mod sections;
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
mod shell;

#[cfg(target_arch = "wasm32")]
mod content;
#[cfg(target_arch = "wasm32")]
mod frontend;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!("This site is frontend-only. Run `trunk serve` or `trunk build --release`.");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    frontend::run();
}
