//! Slack incoming-webhook notification sink.

pub mod webhook;

pub use webhook::SlackWebhook;
