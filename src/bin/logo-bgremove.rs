//! Logo Background Removal CLI Tool
//!
//! Command-line interface for making the light background of a logo
//! transparent, by whiteness threshold or corner-seeded flood fill.

#[cfg(feature = "cli")]
use logo_bgremove::cli;

#[cfg(feature = "cli")]
fn main() -> anyhow::Result<()> {
    cli::main()
}

#[cfg(not(feature = "cli"))]
fn main() {
    panic!("CLI feature not enabled. Please rebuild with --features cli");
}
