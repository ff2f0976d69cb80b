use crate::config::SimConfig;
use crate::run;
use crate::viz::{VizNodeKind, VizReport, VizTopology};

#[test]
fn viz_topology_marks_server_and_clients() {
    let cfg = SimConfig {
        clients: 6,
        fanout: 2,
        ..SimConfig::default()
    };
    let out = run::run(&cfg).expect("valid config");
    let viz = VizTopology::from_topology(&out.topo);

    assert_eq!(viz.nodes.len(), 7);
    assert_eq!(viz.nodes[0].kind, VizNodeKind::Server);
    assert!(viz.nodes[1..].iter().all(|n| n.kind == VizNodeKind::Client));
    assert_eq!(viz.links.len(), out.topo.links().len());
    assert_eq!(viz.plane_side, 1000.0);
}

#[test]
fn report_json_carries_events_and_smoothness() {
    let cfg = SimConfig {
        clients: 4,
        fanout: 1,
        horizon_secs: 2.0,
        ..SimConfig::default()
    };
    let out = run::run(&cfg).expect("valid config");
    let json = serde_json::to_value(VizReport::new(&cfg, &out)).expect("serialize");

    assert_eq!(json["topology"]["nodes"][0]["kind"], "server");
    let events = json["events"].as_array().expect("events array");
    assert_eq!(events.len(), out.log.len());
    assert_eq!(events[0]["kind"], "generate");
    assert_eq!(events[0]["t_ns"], 0);
    assert!(events[0].get("target").is_none());
    assert_eq!(json["smoothness"]["clients"], 4);
    assert_eq!(json["stats"]["generated_blocks"], 60);

    let back: VizReport = serde_json::from_value(json).expect("deserialize");
    assert_eq!(back.events, out.log.events);
}
