#![forbid(unsafe_code)]

pub mod dom;
pub mod game;

/// One-time platform setup, called by the host before mounting the view.
pub fn init_platform() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}
