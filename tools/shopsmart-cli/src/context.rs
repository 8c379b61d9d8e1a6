//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context as _, Result};
use shopsmart_auth::{Session, SessionRecord, UserType};
use shopsmart_data::{Endpoints, RestBackend};
use shopsmart_storefront::{Notifier, Services};
use tracing::debug;

use crate::config::{CliConfig, CONFIG_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// File the config came from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (mut config, config_path) = match config_path {
            Some(path) => {
                let path = PathBuf::from(path);
                (CliConfig::load(&path)?, Some(path))
            }
            None => match Self::find_config(&cwd) {
                Some(path) => (CliConfig::load(&path)?, Some(path)),
                None => (CliConfig::default(), None),
            },
        };
        config.apply_env();

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Find config file in directory tree.
    pub fn find_config(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            for name in CONFIG_NAMES {
                let candidate = current.join(name);
                if candidate.is_file() {
                    return Some(candidate);
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Where config writes go: the loaded file, or a new one in the
    /// working directory.
    pub fn config_write_path(&self) -> PathBuf {
        self.config_path
            .clone()
            .unwrap_or_else(|| self.cwd.join(CONFIG_NAMES[0]))
    }

    /// Backend services over REST.
    pub fn services(&self) -> Result<Services> {
        let backend = RestBackend::new(self.config.api.clone())
            .context("Invalid backend configuration")?;
        Ok(Services::from_backend(Arc::new(backend)))
    }

    pub fn endpoints(&self) -> Result<Endpoints> {
        Endpoints::from_config(&self.config.api).context("Invalid backend configuration")
    }

    pub fn notifier(&self) -> Arc<dyn Notifier> {
        Arc::new(self.output.clone())
    }

    /// The saved session, checked against the required user type.
    ///
    /// Ctrl-C tears the session down, cancelling whatever it has in flight.
    pub fn session(&self, user_type: UserType) -> Result<Session> {
        let Some(record) = self.config.session.clone() else {
            bail!("Not signed in. Run `shopsmart login` or `shopsmart session customer <USER_ID>`");
        };
        let session = Session::from_record(record);
        session.require(user_type)?;

        let interrupt = session.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                debug!("interrupted, ending session");
                interrupt.teardown();
            }
        });
        Ok(session)
    }

    /// Persist (or clear) the session in the config file.
    pub fn save_session(&self, record: Option<SessionRecord>) -> Result<PathBuf> {
        let path = self.config_write_path();
        let mut config = if path.is_file() {
            CliConfig::load(&path)?
        } else {
            CliConfig::default()
        };
        config.session = record;
        config.save(&path)?;
        Ok(path)
    }
}
