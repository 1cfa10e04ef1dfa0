//! Everything a resolver command needs, loaded once per invocation.

use std::path::Path;
use std::sync::Arc;

use hearth_config::{Config, ConfigError};
use hearth_core::{
    AliasStore, AliasTable, CommandContext, CommandRouter, CoreError, RecentEntities,
    RegistrySnapshot, RegistryStore,
};

use crate::cli::GlobalOpts;
use crate::config;
use crate::error::CliError;

pub struct Engine {
    pub config: Config,
    pub registry: Arc<RegistryStore>,
    pub aliases: AliasStore,
    pub router: CommandRouter,
    pub memory: RecentEntities,
}

impl Engine {
    /// Load config, the registry cache and the alias document.
    pub fn load(global: &GlobalOpts) -> Result<Self, CliError> {
        let config = config::load(global)?;
        let registry_path = config
            .registry_path
            .clone()
            .ok_or_else(|| CliError::NoRegistry {
                config_path: config::config_file(global).display().to_string(),
            })?;

        let registry = Arc::new(config.registry_store());
        refresh_registry(&registry, &registry_path)?;

        let aliases = config.open_alias_store()?;
        let router = CommandRouter::standard().with_snippet_options(config.snippet_options());

        Ok(Self {
            config,
            registry,
            aliases,
            router,
            memory: RecentEntities::new(),
        })
    }

    /// Detector context over `snapshot` and `aliases` for `user`.
    pub fn context<'a>(
        &'a self,
        snapshot: &'a RegistrySnapshot,
        aliases: &'a AliasTable,
        user: &'a str,
    ) -> CommandContext<'a> {
        CommandContext::new(snapshot, aliases, &self.memory, user)
            .with_min_score(self.config.min_score)
    }
}

/// Re-read the registry cache at `path` and publish it into `store`.
pub fn refresh_registry(
    store: &RegistryStore,
    path: &Path,
) -> Result<Arc<RegistrySnapshot>, CliError> {
    let cache = hearth_config::load_registry_cache(path).map_err(|err| registry_error(path, err))?;
    Ok(store.apply_cache(cache))
}

fn registry_error(path: &Path, err: ConfigError) -> CliError {
    let path = path.display().to_string();
    match err {
        ConfigError::Io(source) => CliError::Registry {
            path,
            source: Box::new(source),
        },
        ConfigError::Core(CoreError::RegistryDecode { message }) => CliError::Registry {
            path,
            source: message.into(),
        },
        other => other.into(),
    }
}
