pub mod progress;
pub mod render;
pub mod tui;

use crossterm::style::{Color, Stylize};

/// Neon Purple (#bc13fe).
const NEON_PURPLE: Color = Color::Rgb {
    r: 0xbc,
    g: 0x13,
    b: 0xfe,
};

/// Prints the welcome line and applies the theme for all subsequent inquire prompts.
/// Call once at startup (e.g. in main after tracing init).
pub fn init_ui() {
    println!(
        "{} {}",
        "YT-SENTIMENT".bold().with(NEON_PURPLE),
        format!("v{} · YouTube comment sentiment analysis", env!("CARGO_PKG_VERSION")).dark_grey()
    );
    tui::apply_theme();
}
