pub mod poller;
pub mod walker;
