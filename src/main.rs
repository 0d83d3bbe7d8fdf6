mod error;
mod icon;
mod text;
mod utils;

use icon::{render, ICON_TARGETS};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    for (size, filename) in ICON_TARGETS {
        render(size, filename)?;
    }
    Ok(())
}
