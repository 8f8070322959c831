//! Desktop notifications via `notify-send`.
//!
//! Notifications are fire-and-forget: a missing or failing `notify-send`
//! is logged and otherwise ignored.

use grabshot_core::tools::NOTIFY_SEND;
use tracing::debug;

use crate::system::{Context, Invocation};

const APP_NAME: &str = "grabshot";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Urgency {
    Normal,
    Critical,
}

impl Urgency {
    fn as_str(&self) -> &'static str {
        match self {
            Urgency::Normal => "normal",
            Urgency::Critical => "critical",
        }
    }
}

pub fn send(ctx: &Context, urgency: Urgency, title: &str, body: &str) {
    let invocation = Invocation::new(NOTIFY_SEND)
        .args(["-a", APP_NAME, "-u", urgency.as_str()])
        .args([title, body]);

    match ctx.runner.run(&invocation) {
        Ok(out) if out.success => {}
        Ok(out) => debug!("notify-send {}", out.status_text()),
        Err(e) => debug!("notify-send unavailable: {}", e),
    }
}

pub fn info(ctx: &Context, title: &str, body: &str) {
    send(ctx, Urgency::Normal, title, body);
}

pub fn error(ctx: &Context, title: &str, body: &str) {
    send(ctx, Urgency::Critical, title, body);
}
