use serde_json::json;

use crate::actions::{ActionKind, can_process};
use crate::commands::open_desk;
use crate::config::Config;
use crate::desk::AlertListViewModel;
use crate::display::format_notification;
use crate::error::{AlertDeskError, Result};
use crate::query::{FilterChange, FilterCriteria};
use crate::remote::HttpGateway;
use crate::types::{AlertType, Selection, TimeWindow, Version};

/// Reprocess measurements for one version, inline or as a background job
pub async fn cmd_process(
    config: &Config,
    version: Selection<Version>,
    window: Option<TimeWindow>,
    background: bool,
    output_json: bool,
) -> Result<()> {
    let window = window.unwrap_or(config.process_window);

    if background {
        let filters = FilterCriteria {
            version,
            ..FilterCriteria::default()
        };
        if !can_process(&filters) {
            return Err(AlertDeskError::ActionDisabled(ActionKind::Process));
        }

        let gateway = HttpGateway::from_config(config)?;
        let job = gateway.process_async(version.value(), window).await?;

        if output_json {
            let output = json!({
                "action": ActionKind::Process,
                "window": window,
                "job_id": job.job_id,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!("Scheduled processing of the last {window} as job {job}");
        }
        return Ok(());
    }

    let mut desk = open_desk(config)?;
    desk.state_mut().apply_filter(FilterChange::Version(version));
    desk.process_with_window(window).await?;

    print_outcome(ActionKind::Process, &desk.view_model(), output_json)
}

/// Dispatch pending alerts for one version and type
pub async fn cmd_send(
    config: &Config,
    version: Selection<Version>,
    alert_type: Selection<AlertType>,
    output_json: bool,
) -> Result<()> {
    let mut desk = open_desk(config)?;
    let state = desk.state_mut();
    state.apply_filter(FilterChange::Version(version));
    state.apply_filter(FilterChange::Type(alert_type));
    desk.send().await?;

    print_outcome(ActionKind::Send, &desk.view_model(), output_json)
}

fn print_outcome(
    action: ActionKind,
    vm: &AlertListViewModel,
    output_json: bool,
) -> Result<()> {
    if output_json {
        let output = json!({
            "action": action,
            "notification": vm.notification,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if let Some(notification) = &vm.notification {
        println!("{}", format_notification(notification));
    }
    Ok(())
}
