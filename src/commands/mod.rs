mod action;
mod job;
mod ls;

pub use action::{cmd_process, cmd_send};
pub use job::cmd_job;
pub use ls::{ListOptions, cmd_list};

use crate::config::Config;
use crate::desk::AlertDesk;
use crate::error::Result;
use crate::remote::HttpGateway;

/// Engine wired to the configured backend
fn open_desk(config: &Config) -> Result<AlertDesk<HttpGateway>> {
    let gateway = HttpGateway::from_config(config)?;
    Ok(AlertDesk::with_config(gateway, config))
}
