// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::ExecuteError;
use tn_adapters::{FakeTransport, FakeWorkload, TransportCall, TransportError, WorkloadCall};
use tn_core::{Message, MessageKind, PoolConfig, Request};

fn config(peers: u32, operations: u32) -> ClusterConfig {
    ClusterConfig::default()
        .with_peers(peers)
        .with_operations(operations)
        .with_pools(vec![PoolConfig::new("house", 1)])
}

fn kinds(transport: &FakeTransport) -> Vec<MessageKind> {
    transport.sent().into_iter().map(|m| m.kind).collect()
}

#[tokio::test]
async fn lone_peer_runs_every_operation() {
    let transport = FakeTransport::new(PeerId(0), 1);
    let workload = FakeWorkload::new();
    let config = ClusterConfig::default().with_peers(1).with_operations(3);

    let report = Peer::new(transport.clone(), workload.clone(), &config)
        .unwrap()
        .run()
        .await
        .unwrap();

    // house then fence, three times
    assert_eq!(report.admissions, 6);
    assert_eq!(report.messages_received, 0);
    let admitted: Vec<String> = workload
        .admissions(PeerId(0))
        .iter()
        .map(|slot| slot.name.clone())
        .collect();
    assert_eq!(admitted, ["house", "fence", "house", "fence", "house", "fence"]);
    assert_eq!(
        workload
            .calls()
            .iter()
            .filter(|c| matches!(c, WorkloadCall::Rest { .. }))
            .count(),
        2
    );
    assert_eq!(kinds(&transport).last(), Some(&MessageKind::Terminate));
}

#[tokio::test]
async fn peer_waits_for_a_later_message_before_entering() {
    let transport = FakeTransport::new(PeerId(0), 2);
    // p1 requested at the same time; the tie goes to p0
    transport.push_inbound(Message::request(Request::new(2, PeerId(1)), PoolId(0)));

    let report = Peer::new(transport.clone(), FakeWorkload::new(), &config(2, 1))
        .unwrap()
        .run()
        .await
        .unwrap();

    assert_eq!(report.admissions, 1);
    assert_eq!(report.messages_received, 1);
    assert_eq!(
        kinds(&transport),
        [
            MessageKind::Request,
            MessageKind::Release,
            MessageKind::Terminate
        ]
    );
    assert!(transport
        .calls()
        .iter()
        .all(|c| matches!(c, TransportCall::Broadcast { .. })));
}

#[tokio::test]
async fn transport_failure_while_waiting_is_reported() {
    let transport = FakeTransport::new(PeerId(0), 2);

    let result = Peer::new(transport, FakeWorkload::new(), &config(2, 1))
        .unwrap()
        .run()
        .await;

    assert!(matches!(
        result,
        Err(RuntimeError::Execute(ExecuteError::Transport(
            TransportError::Closed
        )))
    ));
}

#[tokio::test]
async fn malformed_message_is_fatal() {
    let transport = FakeTransport::new(PeerId(0), 2);
    let mut stray = Message::release(4, PeerId(1), PoolId(0));
    stray.pool = None;
    transport.push_inbound(stray);

    let result = Peer::new(transport, FakeWorkload::new(), &config(2, 1))
        .unwrap()
        .run()
        .await;

    assert!(matches!(
        result,
        Err(RuntimeError::Protocol(ProtocolError::MissingPool(_)))
    ));
}

#[test]
fn rejects_transport_of_wrong_size() {
    let transport = FakeTransport::new(PeerId(0), 3);
    let result = Peer::new(transport, FakeWorkload::new(), &config(2, 1));
    assert!(matches!(
        result,
        Err(RuntimeError::SizeMismatch {
            transport: 3,
            configured: 2
        })
    ));
}

#[tokio::test]
async fn barrier_is_awaited_after_departure() {
    let barrier = Arc::new(Barrier::new(2));
    let transport = FakeTransport::new(PeerId(0), 1);
    let peer = Peer::new(transport, FakeWorkload::new(), &config(1, 1))
        .unwrap()
        .with_barrier(barrier.clone());

    let (report, _) = tokio::join!(peer.run(), barrier.wait());
    assert_eq!(report.unwrap().admissions, 1);
}
