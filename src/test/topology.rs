use std::collections::HashMap;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::error::ConfigError;
use crate::net::{NodeId, Position, Topology};
use crate::topo::random_overlay::{OverlayOpts, build_random_overlay};

fn opts(clients: usize, fanout: usize) -> OverlayOpts {
    OverlayOpts {
        clients,
        fanout,
        ..OverlayOpts::default()
    }
}

fn build(clients: usize, fanout: usize, seed: u64) -> Result<Topology, ConfigError> {
    let mut rng = StdRng::seed_from_u64(seed);
    build_random_overlay(&opts(clients, fanout), &mut rng)
}

#[test]
fn generated_links_have_bandwidth_within_bounds() {
    let topo = build(100, 10, 7).expect("valid overlay");
    assert_eq!(topo.len(), 101);
    assert!(!topo.links().is_empty());
    for l in topo.links() {
        assert!(
            (20.0..=100.0).contains(&l.bandwidth_kbps),
            "bandwidth out of range: {l:?}"
        );
        assert_eq!(l.bandwidth_kbps, topo.bandwidth(l.from, l.to));
    }
    let (lo, hi) = topo.bandwidth_range().expect("has links");
    assert!(lo >= 20.0 && hi <= 100.0 && lo <= hi);
}

#[test]
fn positions_stay_inside_the_plane() {
    let topo = build(50, 3, 11).expect("valid overlay");
    for p in topo.peers() {
        let Position { x, y } = p.pos();
        assert!((0.0..1000.0).contains(&x) && (0.0..1000.0).contains(&y));
        assert_eq!(x.fract(), 0.0);
        assert_eq!(y.fract(), 0.0);
    }
}

#[test]
fn same_seed_reproduces_identical_links() {
    let a = build(40, 5, 42).expect("valid overlay");
    let b = build(40, 5, 42).expect("valid overlay");
    assert_eq!(a.links(), b.links());
    let pa = a.peers().iter().map(|p| p.pos()).collect::<Vec<_>>();
    let pb = b.peers().iter().map(|p| p.pos()).collect::<Vec<_>>();
    assert_eq!(pa, pb);

    let c = build(40, 5, 43).expect("valid overlay");
    assert_ne!(a.links(), c.links());
}

#[test]
fn every_selection_creates_both_directions() {
    let topo = build(30, 4, 3).expect("valid overlay");
    // Each of the 31 nodes selects 4 neighbors, each selection adds 2 links.
    assert_eq!(topo.links().len(), 31 * 4 * 2);

    let mut count = HashMap::new();
    for l in topo.links() {
        assert_ne!(l.from, l.to);
        *count.entry((l.from, l.to)).or_insert(0_usize) += 1;
    }
    for (&(a, b), &n) in &count {
        assert_eq!(count.get(&(b, a)), Some(&n), "asymmetric pair {a:?}->{b:?}");
    }
    for p in topo.peers() {
        assert!(p.neighbors().len() >= 4);
        let outgoing = topo.links().iter().filter(|l| l.from == p.id()).count();
        assert_eq!(p.neighbors().len(), outgoing);
    }
}

#[test]
fn dedup_links_removes_parallel_links() {
    let mut topo = Topology::new(1000.0, 20.0, 100.0);
    let a = topo.add_node(Position::new(0.0, 0.0), 50);
    let b = topo.add_node(Position::new(300.0, 400.0), 50);
    topo.connect_pair(a, b);
    topo.connect_pair(b, a);
    assert_eq!(topo.links().len(), 4);
    assert_eq!(topo.peer(a).neighbors(), &[b, b]);

    topo.dedup_links();
    assert_eq!(topo.links().len(), 2);
    assert_eq!(topo.peer(a).neighbors(), &[b]);
    assert_eq!(topo.peer(b).neighbors(), &[a]);
}

#[test]
fn bandwidth_scales_with_distance_and_is_clamped() {
    let mut topo = Topology::new(1000.0, 20.0, 100.0);
    let s = topo.add_node(Position::new(0.0, 0.0), 50);
    let near = topo.add_node(Position::new(1.0, 0.0), 50);
    let mid = topo.add_node(Position::new(600.0, 800.0), 50);
    let far = topo.add_node(Position::new(1000.0, 1000.0), 50);

    let model = topo.model();
    assert_eq!((model.min_kbps, model.max_kbps), (20.0, 100.0));
    assert!((model.d_max - 1000.0 * std::f64::consts::SQRT_2).abs() < 1e-9);
    assert_eq!(topo.bandwidth(s, near), 20.0);
    let expected_mid = 100.0 / (1000.0 * std::f64::consts::SQRT_2) * 1000.0;
    assert!((topo.bandwidth(s, mid) - expected_mid).abs() < 1e-9);
    assert!((topo.bandwidth(s, far) - 100.0).abs() < 1e-9);
    assert_eq!(topo.bandwidth(s, far), topo.bandwidth(far, s));
    assert_eq!(topo.latency(s, near, 1.0).0, 50_000_000);
    assert_eq!(topo.latency(s, far, 1.0).0, 10_000_000);
}

#[test]
fn fanout_not_below_client_count_is_a_config_error() {
    assert_eq!(
        build(5, 5, 1).err(),
        Some(ConfigError::FanoutUnsatisfiable {
            fanout: 5,
            clients: 5
        })
    );
    assert!(matches!(
        build(1, 3, 1),
        Err(ConfigError::FanoutUnsatisfiable { .. })
    ));
    assert!(matches!(
        build(0, 1, 1),
        Err(ConfigError::FanoutUnsatisfiable { .. })
    ));
}

#[test]
fn server_only_overlay_has_no_links() {
    let topo = build(0, 0, 1).expect("server only");
    assert_eq!(topo.len(), 1);
    assert!(topo.links().is_empty());
    assert_eq!(topo.bandwidth_range(), None);
    assert_eq!(topo.clients().count(), 0);
    assert_eq!(topo.server(), NodeId::SERVER);
}
