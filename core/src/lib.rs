//! The `portsweep` scan engine.
//!
//! One address at a time, [`dispatch::fan_out`] launches a [`probe`] task per
//! port, [`merge::merge`] funnels their outcomes into a single stream, and
//! [`scanner::Scanner`] drains that stream before moving to the next address.

pub mod dispatch;
pub mod merge;
pub mod probe;
pub mod scanner;
