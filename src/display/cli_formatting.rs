use owo_colors::OwoColorize;

use crate::desk::{AlertListViewModel, NotificationView};
use crate::notify::NotificationLevel;

/// Page strip as plain text, current page in brackets: `1 2 [3] 4 5`
pub fn format_page_strip(pages: &[usize], current_page: usize) -> String {
    pages
        .iter()
        .map(|&page| {
            if page == current_page {
                format!("[{page}]")
            } else {
                page.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Page strip with the current page highlighted
pub fn format_page_strip_colored(pages: &[usize], current_page: usize) -> String {
    pages
        .iter()
        .map(|&page| {
            if page == current_page {
                format!("[{page}]").cyan().bold().to_string()
            } else {
                page.to_string().dimmed().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn enabled_label(enabled: bool) -> &'static str {
    if enabled { "enabled" } else { "disabled" }
}

/// `Page 3 of 20 (200 alerts)  process: enabled  send: disabled`
pub fn format_footer(vm: &AlertListViewModel) -> String {
    let pages = vm.total_pages.max(1);
    let noun = if vm.total_items == 1 { "alert" } else { "alerts" };
    format!(
        "Page {} of {} ({} {})  process: {}  send: {}",
        vm.current_page,
        pages,
        vm.total_items,
        noun,
        enabled_label(vm.actions.can_process),
        enabled_label(vm.actions.can_send)
    )
}

pub fn format_filters(vm: &AlertListViewModel) -> String {
    format!(
        "version: {}  type: {}  sended: {}",
        vm.filters.version, vm.filters.alert_type, vm.filters.sended
    )
}

pub fn format_notification(notification: &NotificationView) -> String {
    match notification.level {
        NotificationLevel::Success => format!("✓ {}", notification.message).green().to_string(),
        NotificationLevel::Error => format!("✗ {}", notification.message).red().to_string(),
    }
}
