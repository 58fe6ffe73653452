use thiserror::Error;

/// Rejected user input. Raised before any probe is launched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("invalid address `{input}`: expected a dotted IPv4 address such as 192.168.1.1")]
    InvalidAddress { input: String },
    #[error("invalid port `{token}`: expected a number between 1 and 65535")]
    InvalidPort { token: String },
    #[error("port list is empty")]
    EmptyPortList,
    #[error("timeout must be greater than zero")]
    InvalidTimeout,
}
