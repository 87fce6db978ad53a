use chrono::{DateTime, Local};
use roster_core::{Notification, NotificationChannel, Severity, SubscriptionId};

/// Prints every non-empty notification as a timestamped line on stdout.
pub fn attach(channel: &NotificationChannel) -> SubscriptionId {
    channel.subscribe(|value| {
        if let Some(notification) = value {
            println!("{}", format_toast(notification, Local::now()));
        }
    })
}

pub fn format_toast(notification: &Notification, at: DateTime<Local>) -> String {
    let marker = match notification.severity {
        Severity::Success => "ok ",
        Severity::Error => "ERR",
    };
    format!(
        "[{}] {} {}",
        at.format("%H:%M:%S"),
        marker,
        notification.message
    )
}
