//! 一次完整仿真
//!
//! 校验配置、生成拓扑、运行到仿真时长，然后评估流畅度。

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

use crate::config::SimConfig;
use crate::error::ConfigError;
use crate::metrics::{self, SmoothnessReport};
use crate::net::Topology;
use crate::sim::Simulator;
use crate::stream::{EventLog, StreamStats, StreamWorld};
use crate::topo::random_overlay::build_random_overlay;

/// 仿真结果
#[derive(Debug, Clone)]
pub struct SimOutcome {
    pub topo: Topology,
    pub log: EventLog,
    pub stats: StreamStats,
    pub report: SmoothnessReport,
    /// 运行结束时队列中未执行的事件数
    pub pending_events: usize,
}

/// 使用 `cfg.seed` 生成拓扑并运行
pub fn run(cfg: &SimConfig) -> Result<SimOutcome, ConfigError> {
    let mut rng = StdRng::seed_from_u64(cfg.seed);
    let topo = generate_topology(cfg, &mut rng)?;
    run_on(topo, cfg)
}

/// 只生成拓扑
pub fn generate_topology(cfg: &SimConfig, rng: &mut StdRng) -> Result<Topology, ConfigError> {
    cfg.validate()?;
    let mut topo = build_random_overlay(&cfg.overlay_opts(), rng)?;
    if cfg.simple_graph {
        topo.dedup_links();
    }
    Ok(topo)
}

/// 在给定拓扑上运行分发仿真并评估
#[tracing::instrument(skip(topo, cfg), fields(nodes = topo.len(), policy = ?cfg.forwarding))]
pub fn run_on(topo: Topology, cfg: &SimConfig) -> Result<SimOutcome, ConfigError> {
    cfg.validate()?;
    let mut sim = Simulator::default();
    let mut world = StreamWorld::new(topo, cfg);
    world.start(&mut sim);
    sim.run_until(cfg.horizon(), &mut world);
    world.log_summary(&sim);

    let report = metrics::evaluate(&world.topo, cfg.smooth_threshold);
    info!(
        clients = report.clients,
        smooth = report.smooth_clients,
        average_percent = report.average_percent,
        "流畅度评估完成"
    );
    Ok(SimOutcome {
        pending_events: sim.pending(),
        topo: world.topo,
        log: world.log,
        stats: world.stats,
        report,
    })
}
