use portsweep_common::{
    config::Config,
    network::{ports::PortList, range::Ipv4Range},
    success, warn,
};
use portsweep_core::scanner::{ScanEvent, Scanner};

use crate::terminal::print;

pub async fn scan(range: Ipv4Range, ports: PortList, cfg: &Config) -> anyhow::Result<()> {
    print::banner(cfg.quiet);
    print::header("starting scanner", cfg.quiet);
    print_targets(&range, &ports, cfg);

    if range.is_empty() {
        warn!(
            "Start address {} is above end address {}, nothing to scan",
            range.start_addr, range.end_addr
        );
    }

    let scanner = Scanner::tcp(range, ports, cfg);
    let summary = scanner
        .run(|event| match event {
            ScanEvent::Connected(outcome) => print::connected(&outcome),
            ScanEvent::AddressComplete { addr, elapsed, .. } => {
                print::address_complete(addr, elapsed, cfg.quiet)
            }
        })
        .await;

    print::summary(
        summary.open.len(),
        summary.addresses_scanned,
        summary.elapsed,
        cfg.quiet,
    );

    Ok(())
}

fn print_targets(range: &Ipv4Range, ports: &PortList, cfg: &Config) {
    if cfg.quiet > 0 {
        return;
    }

    let len: u64 = range.len();
    let unit: &str = if len == 1 { "IP address has been" } else { "IP addresses have been" };
    success!("{len} {unit} queued for scanning");

    print::aligned_line("Ip range", range);
    print::aligned_line("Ports", ports);
    print::aligned_line("Timeout", format!("{}s", cfg.timeout.as_secs()));
    match cfg.concurrency {
        Some(limit) => print::aligned_line("Limit", format!("{limit} probes per address")),
        None => print::aligned_line("Limit", "none"),
    }
}
