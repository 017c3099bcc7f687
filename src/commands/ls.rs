use owo_colors::OwoColorize;

use crate::commands::open_desk;
use crate::config::Config;
use crate::display::{
    format_filters, format_footer, format_notification, format_page_strip_colored,
    render_alert_table,
};
use crate::error::Result;
use crate::query::{FilterChange, SortColumn};
use crate::types::{AlertType, Selection, SendedFilter, Version};

/// Options for `alertdesk list`
#[derive(Debug, Clone, Copy)]
pub struct ListOptions {
    pub version: Selection<Version>,
    pub alert_type: Selection<AlertType>,
    pub sended: SendedFilter,
    pub sort: Option<SortColumn>,
    pub descending: bool,
    pub page: usize,
    pub json: bool,
}

/// Fetch alerts for the filters and print one page
pub async fn cmd_list(config: &Config, options: ListOptions) -> Result<()> {
    let mut desk = open_desk(config)?;

    let state = desk.state_mut();
    state.apply_filter(FilterChange::Version(options.version));
    state.apply_filter(FilterChange::Type(options.alert_type));
    state.apply_filter(FilterChange::Sended(options.sended));

    desk.refresh().await?;

    if let Some(column) = options.sort {
        desk.sort_by(column);
        if options.descending {
            desk.sort_by(column);
        }
    }
    desk.set_page(options.page);

    let vm = desk.view_model();

    if options.json {
        println!("{}", serde_json::to_string_pretty(&vm)?);
        return Ok(());
    }

    println!("{}", format_filters(&vm).dimmed());
    println!("{}", render_alert_table(&vm.rows, &vm.sort));
    if !vm.pages.is_empty() {
        println!("{}", format_page_strip_colored(&vm.pages, vm.current_page));
    }
    println!("{}", format_footer(&vm));
    if let Some(notification) = &vm.notification {
        println!("{}", format_notification(notification));
    }

    Ok(())
}
