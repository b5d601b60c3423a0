use std::io;

use anyhow::Context;
use tracing::info;

use stockroom_cli::{CommandLine, Menu, default_store};

fn main() -> anyhow::Result<()> {
    let args = CommandLine::parse_args();
    stockroom_observability::init(&args.log_config());

    let mut store = default_store().context("failed to seed the store inventory")?;
    info!(products = store.products().len(), "store seeded");

    let stdin = io::stdin();
    let stdout = io::stdout();
    Menu::new(stdin.lock(), stdout.lock())
        .run(&mut store)
        .context("terminal I/O failed")?;

    info!("session ended");
    Ok(())
}
