use std::net::{Ipv4Addr, SocketAddrV4};
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;

use portsweep_common::config::Config;
use portsweep_common::network::{ports::PortList, range::Ipv4Range};
use portsweep_core::scanner::{ScanEvent, Scanner};

use crate::utils::{closed_port, open_port, ClosedNetwork};

fn connected(events: &[ScanEvent]) -> Vec<SocketAddrV4> {
    events
        .iter()
        .filter_map(|event| match event {
            ScanEvent::Connected(outcome) => Some(outcome.target),
            _ => None,
        })
        .collect()
}

fn completed(events: &[ScanEvent]) -> Vec<Ipv4Addr> {
    events
        .iter()
        .filter_map(|event| match event {
            ScanEvent::AddressComplete { addr, .. } => Some(*addr),
            _ => None,
        })
        .collect()
}

/// A single loopback address with one listening and one closed port.
#[tokio::test]
async fn loopback_reports_only_the_open_port() {
    let (_listener, open) = open_port().await;
    let closed: u16 = closed_port().await;

    let cfg = Config {
        timeout: Duration::from_secs(2),
        ..Config::default()
    };
    let range = Ipv4Range::new(Ipv4Addr::LOCALHOST, Ipv4Addr::LOCALHOST);
    let scanner = Scanner::tcp(range, PortList::new(vec![open, closed]), &cfg);

    let mut events = Vec::new();
    let summary = scanner.run(|event| events.push(event)).await;

    assert_eq!(
        connected(&events),
        vec![SocketAddrV4::new(Ipv4Addr::LOCALHOST, open)]
    );
    assert_eq!(completed(&events), vec![Ipv4Addr::LOCALHOST]);
    assert_eq!(summary.addresses_scanned, 1);
    assert_eq!(summary.open.len(), 1);
}

/// Three addresses where nothing answers: one completion per address, in order.
#[tokio::test]
async fn closed_range_reports_each_address_in_ascending_order() {
    let network = Arc::new(ClosedNetwork::default());
    let range = Ipv4Range::new(Ipv4Addr::new(10, 0, 0, 1), Ipv4Addr::new(10, 0, 0, 3));
    let scanner = Scanner::with_prober(
        range,
        PortList::default(),
        &Config::default(),
        network.clone(),
    );

    let mut events = Vec::new();
    let summary = scanner.run(|event| events.push(event)).await;

    assert!(connected(&events).is_empty());
    assert_eq!(
        completed(&events),
        vec![
            Ipv4Addr::new(10, 0, 0, 1),
            Ipv4Addr::new(10, 0, 0, 2),
            Ipv4Addr::new(10, 0, 0, 3),
        ]
    );
    assert_eq!(summary.addresses_scanned, 3);

    let probed = network.probed.lock().unwrap().clone();
    assert!(probed.iter().all(|target| target.port() == 80));
    assert_eq!(probed.len(), 3);
}

/// Many ports on one address under a concurrency cap; every open port is
/// still reported exactly once.
#[tokio::test]
async fn capped_scan_finds_every_listener() {
    let mut listeners = Vec::new();
    let mut ports = Vec::new();
    for _ in 0..6 {
        let (listener, port) = open_port().await;
        listeners.push(listener);
        ports.push(port);
    }
    ports.push(closed_port().await);

    let cfg = Config {
        timeout: Duration::from_secs(2),
        concurrency: NonZeroUsize::new(2),
        quiet: 0,
    };
    let range = Ipv4Range::new(Ipv4Addr::LOCALHOST, Ipv4Addr::LOCALHOST);
    let scanner = Scanner::tcp(range, PortList::new(ports.clone()), &cfg);

    let summary = scanner.run(|_| {}).await;

    let mut found: Vec<u16> = summary.open.iter().map(SocketAddrV4::port).collect();
    found.sort_unstable();
    let mut expected: Vec<u16> = ports[..6].to_vec();
    expected.sort_unstable();
    assert_eq!(found, expected);
}

/// A range ending on the broadcast address terminates instead of wrapping.
#[tokio::test]
async fn range_ending_at_broadcast_terminates() {
    let network = Arc::new(ClosedNetwork::default());
    let range = Ipv4Range::new(Ipv4Addr::new(255, 255, 255, 254), Ipv4Addr::BROADCAST);
    let scanner = Scanner::with_prober(range, PortList::default(), &Config::default(), network);

    let mut events = Vec::new();
    let summary = tokio::time::timeout(
        Duration::from_secs(5),
        scanner.run(|event| events.push(event)),
    )
    .await
    .expect("scan wrapped past 255.255.255.255");

    assert_eq!(summary.addresses_scanned, 2);
    assert_eq!(
        completed(&events),
        vec![Ipv4Addr::new(255, 255, 255, 254), Ipv4Addr::BROADCAST]
    );
}
