//! P2P 流媒体分发仿真
//!
//! 服务器周期性生成数据块并推送到随机叠加网络，仿真结束后输出每个客户端的流畅度。

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use p2p_stream_sim::config::SimConfig;
use p2p_stream_sim::run;
use p2p_stream_sim::stream::ForwardingPolicy;
use p2p_stream_sim::viz::VizReport;
use tracing::error;

#[derive(Debug, Parser)]
#[command(name = "stream_sim", about = "随机叠加网络上的数据块推送仿真")]
struct Args {
    /// JSON 配置文件；命令行参数覆盖其中的字段
    #[arg(long)]
    config: Option<PathBuf>,
    /// 客户端数量 N
    #[arg(long)]
    clients: Option<usize>,
    /// 每个节点的邻居数 t
    #[arg(long)]
    fanout: Option<usize>,
    #[arg(long)]
    seed: Option<u64>,
    /// 仿真时长（秒）
    #[arg(long)]
    horizon_secs: Option<f64>,
    #[arg(long)]
    cache_size: Option<usize>,
    #[arg(long)]
    batch_size: Option<u32>,
    /// 连续播放所需的数据块数 M
    #[arg(long)]
    smooth_threshold: Option<u64>,
    #[arg(long, value_enum)]
    forwarding: Option<ForwardingPolicy>,
    /// 去掉平行链路
    #[arg(long)]
    simple_graph: bool,
    /// 输出拓扑、事件与流畅度的 JSON 文件
    #[arg(long)]
    report_json: Option<PathBuf>,
}

fn build_config(args: &Args) -> Result<SimConfig, p2p_stream_sim::error::ConfigError> {
    let mut cfg = match &args.config {
        Some(path) => SimConfig::from_json_file(path)?,
        None => SimConfig::default(),
    };
    if let Some(v) = args.clients {
        cfg.clients = v;
    }
    if let Some(v) = args.fanout {
        cfg.fanout = v;
    }
    if let Some(v) = args.seed {
        cfg.seed = v;
    }
    if let Some(v) = args.horizon_secs {
        cfg.horizon_secs = v;
    }
    if let Some(v) = args.cache_size {
        cfg.cache_size = v;
    }
    if let Some(v) = args.batch_size {
        cfg.batch_size = v;
    }
    if let Some(v) = args.smooth_threshold {
        cfg.smooth_threshold = v;
    }
    if let Some(v) = args.forwarding {
        cfg.forwarding = v;
    }
    cfg.simple_graph |= args.simple_graph;
    Ok(cfg)
}

fn main() -> ExitCode {
    // 初始化 tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    let args = Args::parse();
    let cfg = match build_config(&args) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(%e, "配置无效");
            eprintln!("error: {e}");
            return ExitCode::from(2);
        }
    };
    let out = match run::run(&cfg) {
        Ok(out) => out,
        Err(e) => {
            error!(%e, "配置无效");
            eprintln!("error: {e}");
            return ExitCode::from(2);
        }
    };

    match out.topo.bandwidth_range() {
        Some((lo, hi)) => println!("bandwidth range: {lo:.2} KB/s to {hi:.2} KB/s"),
        None => println!("bandwidth range: no links"),
    }
    println!("cache size: {}", cfg.cache_size);
    println!("neighbors per node: {}", cfg.fanout);
    println!(
        "generated blocks: {}, processed events: {}",
        out.stats.generated_blocks,
        out.log.len()
    );
    for (id, s) in &out.report.per_client {
        println!("client {id} smoothness: {:.2}%", s * 100.0);
    }
    println!("average smoothness: {:.2}%", out.report.average_percent);

    if let Some(path) = &args.report_json {
        let report = VizReport::new(&cfg, &out);
        let json = match serde_json::to_string_pretty(&report) {
            Ok(json) => json,
            Err(e) => {
                eprintln!("error: serialize report: {e}");
                return ExitCode::FAILURE;
            }
        };
        if let Err(e) = fs::write(path, json) {
            eprintln!("error: write {}: {e}", path.display());
            return ExitCode::FAILURE;
        }
    }
    ExitCode::SUCCESS
}
