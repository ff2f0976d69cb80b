//! 分发世界
//!
//! 单个仿真上下文：持有拓扑、节点缓存、块序号计数器、生成定时器与事件日志。
//! 所有事件处理函数通过 `&mut StreamWorld` 访问状态，不存在进程级全局量。

use std::any::Any;

use tracing::{debug, info, trace};

use super::event_log::{EventKind, EventLog, EventRecord};
use super::generate_blocks::GenerateBlocks;
use super::policy::ForwardingPolicy;
use super::request_block::RequestBlock;
use super::stats::StreamStats;
use super::transmit_block::TransmitBlock;
use crate::config::SimConfig;
use crate::net::{BlockId, NodeId, Topology};
use crate::sim::{PeriodicTimer, SimTime, Simulator, World};

/// 数据块分发的仿真世界
pub struct StreamWorld {
    pub topo: Topology,
    pub block_kb: f64,
    pub batch_size: u32,
    pub policy: ForwardingPolicy,
    pub timer: PeriodicTimer,
    pub log: EventLog,
    pub stats: StreamStats,
    next_block: BlockId,
    last_tick: SimTime,
}

impl StreamWorld {
    pub fn new(mut topo: Topology, cfg: &SimConfig) -> Self {
        if cfg.forwarding == ForwardingPolicy::PushThenRelay {
            topo.track_seen();
        }
        let timer = PeriodicTimer::new(SimTime::ZERO, cfg.generate_interval())
            .with_until(cfg.horizon());
        Self {
            topo,
            block_kb: cfg.block_size_kb,
            batch_size: cfg.batch_size,
            policy: cfg.forwarding,
            timer,
            log: EventLog::default(),
            stats: StreamStats::default(),
            next_block: BlockId::FIRST,
            last_tick: SimTime::ZERO,
        }
    }

    /// 已生成的最大块号；尚未生成时为 0
    pub fn last_generated(&self) -> BlockId {
        BlockId(self.next_block.0 - 1)
    }

    /// 调度第一次生成事件
    pub fn start(&self, sim: &mut Simulator) {
        match self.timer.first() {
            Some(at) => sim.schedule(at, GenerateBlocks),
            None => debug!("生成定时器在仿真时长内不会触发"),
        }
    }

    fn alloc_block(&mut self) -> BlockId {
        let id = self.next_block;
        self.next_block = id.next();
        assert!(self.next_block > id, "server block id must strictly increase");
        self.stats.generated_blocks += 1;
        id
    }

    fn record(
        &mut self,
        now: SimTime,
        kind: EventKind,
        source: NodeId,
        target: Option<NodeId>,
        block: Option<BlockId>,
    ) {
        self.log.push(EventRecord {
            t_ns: now.0,
            kind,
            source,
            target,
            block,
        });
    }

    /// 把一个块从 `from` 推送给 `to`，按链路带宽计算到达时间
    pub fn push_block(&mut self, from: NodeId, to: NodeId, block: BlockId, sim: &mut Simulator) {
        let latency = self.topo.latency(from, to, self.block_kb);
        let arrive = sim.now().saturating_add(latency);
        trace!(from = from.0, to = to.0, block = block.0, ?arrive, "调度块传输");
        self.stats.transmissions += 1;
        sim.schedule(arrive, TransmitBlock { from, to, block });
    }

    /// 服务器生成一批新块，推送给所有邻居，再安排下一次生成。
    #[tracing::instrument(skip(self, sim), fields(now = ?sim.now()))]
    pub(crate) fn on_generate(&mut self, sim: &mut Simulator) {
        let now = sim.now();
        let server = self.topo.server();
        self.record(now, EventKind::Generate, server, None, None);

        let neighbors = self.topo.peer(server).neighbors().to_vec();
        for _ in 0..self.batch_size {
            let block = self.alloc_block();
            self.topo.peer_mut(server).receive(block);
            for &n in &neighbors {
                self.push_block(server, n, block, sim);
            }
        }
        debug!(
            last_block = self.last_generated().0,
            fanout = neighbors.len(),
            "🧱 服务器生成一批数据块"
        );

        if let Some(next) = self.timer.fire(now) {
            sim.schedule(next, GenerateBlocks);
        }
    }

    /// 块到达 `to`：入缓存，并按转发策略决定后续动作。
    #[tracing::instrument(skip(self, sim), fields(from = from.0, to = to.0, block = block.0))]
    pub(crate) fn on_transmit(
        &mut self,
        from: NodeId,
        to: NodeId,
        block: BlockId,
        sim: &mut Simulator,
    ) {
        let now = sim.now();
        self.record(now, EventKind::Transmit, from, Some(to), Some(block));

        let receipt = self.topo.peer_mut(to).receive(block);
        if !receipt.advanced {
            self.stats.out_of_order += 1;
        }
        if receipt.evicted.is_some() {
            self.stats.evictions += 1;
        }
        debug!(
            next_expected = self.topo.peer(to).next_expected().0,
            advanced = receipt.advanced,
            "📨 节点收到数据块"
        );

        if to.is_server() {
            return;
        }
        match self.policy {
            ForwardingPolicy::PushOnly => {}
            ForwardingPolicy::PushThenRelay => {
                if !receipt.first_seen {
                    return;
                }
                let targets: Vec<NodeId> = self
                    .topo
                    .peer(to)
                    .neighbors()
                    .iter()
                    .copied()
                    .filter(|&n| n != from && !n.is_server())
                    .collect();
                for n in targets {
                    self.stats.relays += 1;
                    self.push_block(to, n, block, sim);
                }
            }
            ForwardingPolicy::PullOnMiss => {
                let expected = self.topo.peer(to).next_expected();
                if block <= expected {
                    return;
                }
                let holders: Vec<NodeId> = self
                    .topo
                    .peer(to)
                    .neighbors()
                    .iter()
                    .copied()
                    .filter(|&n| n != from)
                    .collect();
                for holder in holders {
                    self.stats.requests_sent += 1;
                    sim.schedule(
                        now,
                        RequestBlock {
                            requester: to,
                            holder,
                            block: expected,
                        },
                    );
                }
            }
        }
    }

    /// `requester` 向 `holder` 请求 `block`；`holder` 没有该块时静默丢弃。
    #[tracing::instrument(skip(self, sim), fields(requester = requester.0, holder = holder.0, block = block.0))]
    pub(crate) fn on_request(
        &mut self,
        requester: NodeId,
        holder: NodeId,
        block: BlockId,
        sim: &mut Simulator,
    ) {
        self.record(sim.now(), EventKind::Request, requester, Some(holder), Some(block));
        if self.topo.peer(holder).has_block(block) {
            self.stats.request_hits += 1;
            self.push_block(holder, requester, block, sim);
        } else {
            self.stats.request_misses += 1;
            trace!("请求的块不在缓存中，丢弃");
        }
    }

    /// 运行结束时的摘要日志
    pub fn log_summary(&self, sim: &Simulator) {
        info!(
            now = ?sim.now(),
            generated = self.stats.generated_blocks,
            transmissions = self.stats.transmissions,
            processed = self.log.len(),
            pending = sim.pending(),
            "分发结束"
        );
    }
}

impl World for StreamWorld {
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn on_tick(&mut self, sim: &mut Simulator) {
        debug_assert!(sim.now() >= self.last_tick, "virtual clock went backwards");
        self.last_tick = sim.now();
    }
}
