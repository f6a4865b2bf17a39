//! Client entrypoint for the CSR build.

// Bin target reuses lib deps, silence noisy lint.
#![allow(unused_crate_dependencies)]

use portfolio_fx::{boot, init_logging};

fn main() {
	init_logging();
	boot();
}
