//! # Function Harness
//!
//! Runs the pricing evaluator the way the hosting platform does: one JSON
//! input document on stdin, one JSON result document on stdout.
//!
//! ## Usage
//! ```bash
//! # Price a cart snapshot (the default target)
//! sentinel-host < cart_input.json
//!
//! # Run the delivery companion
//! sentinel-host delivery < delivery_input.json
//! ```
//!
//! Fatal preconditions (empty cart, no delivery groups) exit non-zero with
//! the error on stderr, matching the platform's failed-computation path.

use std::env;
use std::io::Read;

use anyhow::{bail, Context, Result};
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

use sentinel_core::{
    cart_delivery_options_discounts_generate_run, cart_lines_discounts_generate_run, CartInput,
    DeliveryInput, GenerateRunResult, Settings,
};

/// Which evaluator to run.
enum Target {
    CartLines,
    DeliveryOptions,
}

fn main() -> Result<()> {
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_writer(std::io::stderr)
        .init();

    let target = parse_target()?;

    let mut raw = String::new();
    std::io::stdin()
        .read_to_string(&mut raw)
        .context("failed to read input document from stdin")?;
    debug!(bytes = raw.len(), "read input document");

    let settings = Settings::default();
    let result: GenerateRunResult = match target {
        Target::CartLines => {
            let input: CartInput =
                serde_json::from_str(&raw).context("input is not a valid cart document")?;
            cart_lines_discounts_generate_run(&input, &settings)?
        }
        Target::DeliveryOptions => {
            let input: DeliveryInput =
                serde_json::from_str(&raw).context("input is not a valid delivery document")?;
            cart_delivery_options_discounts_generate_run(&input, &settings)?
        }
    };

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}

/// First positional argument selects the evaluator; default is cart lines.
fn parse_target() -> Result<Target> {
    let arg = env::args().nth(1);
    match arg.as_deref() {
        None | Some("cart") => Ok(Target::CartLines),
        Some("delivery") => Ok(Target::DeliveryOptions),
        Some(other) => bail!("unknown target {other:?}, expected \"cart\" or \"delivery\""),
    }
}
