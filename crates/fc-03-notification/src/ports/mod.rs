//! Ports for the Notification Composer.

pub mod inbound;

pub use inbound::NotificationApi;
