use std::fmt::Display;
use std::net::Ipv4Addr;
use std::time::Duration;

use crate::terminal::{colors, format};
use colored::*;
use portsweep_core::probe::ProbeOutcome;
use tracing::info;
use unicode_width::UnicodeWidthStr;

pub const TOTAL_WIDTH: usize = 64;
pub const PRINT_TARGET: &str = "portsweep::print";

const KEY_WIDTH: usize = 8;

pub fn print(msg: &str) {
    info!(target: PRINT_TARGET, raw_msg = msg);
}

pub fn banner(q_level: u8) {
    if q_level > 0 {
        return;
    }

    let text_content: String = format!("⟦ PORTSWEEP v{} ⟧ ", env!("CARGO_PKG_VERSION"));
    let text_width: usize = UnicodeWidthStr::width(text_content.as_str());
    let text: ColoredString = text_content.bright_green().bold();
    let sep: ColoredString = "═"
        .repeat(TOTAL_WIDTH.saturating_sub(text_width) / 2)
        .bright_black();

    print(&format!("{}{}{}", sep, text, sep));
}

pub fn header(msg: &str, q_level: u8) {
    if q_level > 0 {
        return;
    }

    let formatted: String = format!("⟦ {} ⟧", msg);
    let msg_len: usize = formatted.chars().count();

    let dash_count: usize = TOTAL_WIDTH.saturating_sub(msg_len);
    let left: usize = dash_count / 2;
    let right: usize = dash_count - left;

    let line: ColoredString = format!(
        "{}{}{}",
        "─".repeat(left),
        formatted.to_uppercase().bright_green(),
        "─".repeat(right)
    )
    .bright_black();

    print(&format!("{}", line));
}

pub fn fat_separator() {
    let sep: ColoredString = "═".repeat(TOTAL_WIDTH).bright_black();
    print(&format!("{}", sep));
}

pub fn aligned_line<V: Display>(key: &str, value: V) {
    let dots: String = ".".repeat((KEY_WIDTH + 1).saturating_sub(key.len()));
    let colon: String = format!(
        "{}{}",
        dots.color(colors::SEPARATOR),
        ":".color(colors::SEPARATOR)
    );
    let value: ColoredString = value.to_string().color(colors::TEXT_DEFAULT);
    let prefix: ColoredString = ">".color(colors::SEPARATOR);
    print(&format!("{} {}{} {}", prefix, key.color(colors::PRIMARY), colon, value));
}

/// Always printed, whatever the quiet level. Kept free of colour so the line
/// stays `ip:port<TAB>connected`.
pub fn connected(outcome: &ProbeOutcome) {
    print(&format::connected_line(&outcome.target));
}

pub fn address_complete(addr: Ipv4Addr, elapsed: Duration, q_level: u8) {
    if q_level > 0 {
        return;
    }
    print(&format::elapsed_line(addr, elapsed));
}

pub fn summary(open: usize, addresses: u64, total_time: Duration, q_level: u8) {
    if q_level > 1 {
        return;
    }

    let open: ColoredString = format!("{open} open").bold().green();
    let addresses: ColoredString = format!("{addresses} addresses").color(colors::ACCENT);
    let total_time: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();

    if q_level == 0 {
        fat_separator();
    }
    print(&format!("Scan complete: {open} across {addresses} in {total_time}"));
}
