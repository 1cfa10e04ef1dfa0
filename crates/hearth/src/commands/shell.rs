//! `hearth shell`: line-oriented session over stdin.
//!
//! Each line is routed like `hearth detect`. The first entity a dispatch
//! targets is remembered for the user, so follow-ups such as "turn it
//! off" work. A background task re-reads the registry cache on the
//! configured interval and swaps the snapshot in place.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

use hearth_core::Dispatch;

use crate::cli::{GlobalOpts, ShellArgs};
use crate::engine::{Engine, refresh_registry};
use crate::error::CliError;
use crate::output;

use super::detect;

pub async fn handle(engine: Engine, args: &ShellArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let refresher = if args.no_refresh {
        None
    } else {
        spawn_refresh(&engine)
    };

    let color = output::should_color(global.color);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if matches!(line, "exit" | "quit") {
            break;
        }

        let snapshot = engine.registry.snapshot();
        let aliases = engine.aliases.current();
        let dispatch = {
            let ctx = engine.context(&snapshot, &aliases, &global.user);
            engine.router.dispatch(line, &ctx)
        };
        if let Some(entity_id) = dispatch.primary_entity_id() {
            engine.memory.remember(global.user.as_str(), entity_id);
        }

        let out = output::render_single(
            global.output,
            &dispatch,
            |d| detect::detail(d, color),
            Dispatch::reply,
        )?;
        output::print_output(&out, global.quiet);
    }

    if let Some(handle) = refresher {
        handle.abort();
    }
    Ok(())
}

fn spawn_refresh(engine: &Engine) -> Option<JoinHandle<()>> {
    let interval = engine.config.refresh_interval()?;
    let path = engine.config.registry_path.clone()?;
    let store = Arc::clone(&engine.registry);

    Some(tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The registry was loaded at startup; skip the immediate tick.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            match refresh_registry(&store, &path) {
                Ok(snapshot) => debug!(entities = snapshot.len(), "registry refreshed"),
                Err(err) => warn!(error = %err, "registry refresh failed, keeping previous snapshot"),
            }
        }
    }))
}
