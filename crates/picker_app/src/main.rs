mod effects;
mod ingest;
mod logging;
mod render;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use picker_agent::{ShopSettings, XrefSettings};
use picker_core::{update, AppState, Msg, SessionState};
use picker_logging::pick_info;

use crate::effects::EffectRunner;
use crate::logging::LogDestination;

const SHOP_HOST_SUFFIX: &str = "lego.com";
const PICKER_PATH_SUFFIX: &str = "pick-and-build/pick-a-brick";

/// Bulk-add a stud.io parts list to the shop's parts-picker cart.
#[derive(Debug, Parser)]
#[command(name = "brickpick")]
struct Cli {
    /// Path to the stud.io parts-list CSV export.
    parts_list: PathBuf,

    /// Address of the parts-picker page the session controls. Also the
    /// source of the locale tag (first path segment, e.g. `en-us`).
    #[arg(
        long,
        default_value = "https://www.lego.com/en-us/pick-and-build/pick-a-brick"
    )]
    page_url: String,

    /// GraphQL session auth cookie value for the shop.
    #[arg(long, env = "SHOP_AUTH_TOKEN")]
    auth_token: Option<String>,

    /// API key for the parts cross-reference service.
    #[arg(long, env = "REBRICKABLE_KEY", default_value = "")]
    rebrickable_key: String,

    /// Override the locale sent in the lookup request body.
    #[arg(long)]
    lookup_locale: Option<String>,

    /// Mirror logs to the terminal in addition to ./picker.log.
    #[arg(long)]
    log_terminal: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::initialize(if cli.log_terminal {
        LogDestination::Both
    } else {
        LogDestination::File
    });

    anyhow::ensure!(
        picker_core::is_parts_picker_page(&cli.page_url, SHOP_HOST_SUFFIX, PICKER_PATH_SUFFIX),
        "go to {SHOP_HOST_SUFFIX}/{PICKER_PATH_SUFFIX} to get started (got {})",
        cli.page_url
    );
    let locale = picker_core::locale_from_page_url(&cli.page_url)
        .context("could not derive a locale from the page address")?;
    pick_info!("using locale {locale}");

    let parts = ingest::parse_parts_list(&cli.parts_list, &locale)?;
    anyhow::ensure!(
        !parts.is_empty(),
        "no usable rows in {}",
        cli.parts_list.display()
    );
    println!(
        "Adding {} requested parts from {} to the cart...",
        parts.len(),
        cli.parts_list.display()
    );

    let mut shop = ShopSettings {
        auth_token: cli.auth_token,
        ..ShopSettings::default()
    };
    if let Some(lookup_locale) = cli.lookup_locale {
        shop.lookup_locale = lookup_locale;
    }
    let xref = XrefSettings {
        api_key: cli.rebrickable_key,
        ..XrefSettings::default()
    };
    let runner = EffectRunner::new(shop, xref, cli.page_url.clone())
        .context("starting the page agent")?;

    let (mut state, mut pending) = update(AppState::new(), Msg::PartsLoaded(parts));
    if state.consume_dirty() {
        render::render_progress(&state.view());
    }

    while state.session() != SessionState::Finished {
        runner.execute(std::mem::take(&mut pending));
        let msg = runner
            .next_msg()
            .context("the page agent stopped unexpectedly")?;
        let (next, effects) = update(state, msg);
        state = next;
        pending = effects;
        if state.consume_dirty() {
            render::render_progress(&state.view());
        }
    }

    println!();
    render::render_report(&state.view());
    println!("All done. The picker page has been reloaded.");
    Ok(())
}
