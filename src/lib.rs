//! Respira - respiratory health analysis client.
//!
//! Collects vital signs, submits them to a remote inference server and
//! renders the confidence-scored diagnostic report it returns.

pub mod app;
pub mod audio;
pub mod client;
pub mod config;
pub mod endpoint;
pub mod report;
pub mod shell;
pub mod vitals;
