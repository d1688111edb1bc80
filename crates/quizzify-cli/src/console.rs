//! Terminal implementations of the notifier and navigator ports.

use colored::Colorize;
use quizzify_core::navigation::{Navigator, Route};
use quizzify_core::notification::{Notification, NotificationLevel, Notifier};

pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Success => println!("{}", notification.message.green()),
            NotificationLevel::Error => eprintln!("{}", notification.message.red()),
        }
    }
}

/// There are no views to switch to; the route is shown as a hint.
pub struct ConsoleNavigator;

impl Navigator for ConsoleNavigator {
    fn push(&self, route: Route) {
        tracing::debug!(route = route.name(), "navigate");
        if route == Route::Login {
            println!("{}", "Next: quizzify login --login <login>".bright_black());
        } else {
            println!("{}", format!("Next: {}", route.path()).bright_black());
        }
    }
}
