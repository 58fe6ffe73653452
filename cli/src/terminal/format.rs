use std::net::{Ipv4Addr, SocketAddrV4};
use std::time::Duration;

pub fn connected_line(target: &SocketAddrV4) -> String {
    format!("{target}\tconnected")
}

pub fn elapsed_line(addr: Ipv4Addr, elapsed: Duration) -> String {
    format!("{addr} complete in {:.3}s", elapsed.as_secs_f64())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
