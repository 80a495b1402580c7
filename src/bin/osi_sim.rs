//! OSI 封装仿真
//!
//! 打印/导出逐层封装记录，或驱动状态机从开始走到完成。

use clap::Parser;
use osi_sim_rs::encap::Encapsulation;
use osi_sim_rs::net::{DEFAULT_HEX_LINE, format_hex_for_display};
use osi_sim_rs::sim::{
    ConnectionType, Medium, Phase, Protocol, Simulation, SimulationConfig, Speed,
};
use osi_sim_rs::viz::VizLogger;
use osi_sim_rs::{Result, build_encapsulation};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

/// 一次完整运行最多的导航次数：3 步握手 + 7 层发送 + 7 层接收 + 完成
const MAX_WALK_MOVES: usize = 3 + 7 + 7 + 1;

#[derive(Debug, Parser)]
#[command(name = "osi-sim", about = "OSI 七层封装仿真：逐层展示头部、载荷与导航")]
struct Args {
    /// SimulationConfig JSON 文件（缺省字段取默认值）
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    message: Option<String>,

    /// http / https / smtp / dns / ftp；其他名称按原始数据处理
    #[arg(long)]
    protocol: Option<String>,

    /// ethernet / wifi / fiber / coaxial / radio
    #[arg(long)]
    medium: Option<Medium>,

    /// slow / normal / fast
    #[arg(long)]
    speed: Option<Speed>,

    /// direct / handshake
    #[arg(long)]
    connection: Option<ConnectionType>,

    /// 源 IPv4 地址（非法时回退）
    #[arg(long)]
    source: Option<String>,

    /// 目的 IPv4 地址（非法时回退）
    #[arg(long)]
    dest: Option<String>,

    /// TCP 源端口种子（总会映射到 49152..=65535）
    #[arg(long)]
    source_port: Option<u16>,

    /// 把 7 条封装记录写成 JSON
    #[arg(long)]
    json: Option<PathBuf>,

    /// 走完一次运行，并把状态机事件写成 JSON
    #[arg(long)]
    viz_json: Option<PathBuf>,

    /// 用 next() 从开始走到完成，逐步打印位置
    #[arg(long)]
    walk: bool,
}

fn main() -> ExitCode {
    // 初始化 tracing（日志走 stderr，stdout 只留结果）
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
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let config = resolve_config(args)?;

    let encapsulation = build_encapsulation(&config);
    print_layers(&encapsulation);

    if let Some(path) = &args.json {
        let json = serde_json::to_string_pretty(&encapsulation)?;
        fs::write(path, json)?;
        eprintln!("wrote encapsulation to {}", path.display());
    }

    if args.walk || args.viz_json.is_some() {
        let mut sim = Simulation::new(config.clone());
        if args.viz_json.is_some() {
            sim.viz = Some(VizLogger::default());
        }
        walk(&mut sim, config);

        if let Some(path) = &args.viz_json {
            if let Some(v) = sim.viz.take() {
                fs::write(path, v.to_json_pretty()?)?;
                eprintln!("wrote viz events to {}", path.display());
            }
        }
    }
    Ok(())
}

/// JSON 文件打底，命令行参数逐项覆盖
fn resolve_config(args: &Args) -> Result<SimulationConfig> {
    let mut config = match &args.config {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };
    if let Some(message) = &args.message {
        config.message = message.clone();
    }
    if let Some(protocol) = &args.protocol {
        config.protocol = Protocol::from_name(protocol);
    }
    if let Some(medium) = args.medium {
        config.medium = medium;
    }
    if let Some(speed) = args.speed {
        config.speed = speed;
    }
    if let Some(connection) = args.connection {
        config.connection_type = connection;
    }
    if let Some(source) = &args.source {
        config.source_address = Some(source.clone());
    }
    if let Some(dest) = &args.dest {
        config.dest_address = Some(dest.clone());
    }
    if args.source_port.is_some() {
        config.source_port = args.source_port;
    }
    Ok(config)
}

fn print_layers(encapsulation: &Encapsulation) {
    for layer in encapsulation.iter() {
        println!(
            "layer={} name={} pdu={} in_bytes={} out_bytes={} added={}",
            layer.layer_number,
            layer.layer_name,
            layer.pdu_name.as_str(),
            layer.input.size_bytes,
            layer.output.size_bytes,
            layer.added_bytes()
        );
        for field in &layer.header_fields {
            match &field.hex {
                Some(hex) => println!("  {}: {} [{}]", field.name, field.value, hex),
                None => println!("  {}: {}", field.name, field.value),
            }
        }
        for line in format_hex_for_display(&layer.output.hex, DEFAULT_HEX_LINE).lines() {
            println!("    {line}");
        }
    }
}

fn walk(sim: &mut Simulation, config: SimulationConfig) {
    sim.start(config);
    print_position(sim);
    for _ in 0..MAX_WALK_MOVES {
        if sim.phase() == Phase::Complete {
            break;
        }
        sim.next();
        print_position(sim);
    }
}

fn print_position(sim: &Simulation) {
    let phase = sim.phase();
    match phase {
        Phase::Handshake => {
            let label = sim.handshake_segment().map(|s| s.label()).unwrap_or("—");
            println!(
                "walk phase={} handshake_step={} segment={}",
                phase.as_str(),
                sim.handshake_step(),
                label
            );
        }
        _ => match sim.current_layer() {
            Some(layer) => println!(
                "walk phase={} step={} layer={} name={}",
                phase.as_str(),
                sim.current_step(),
                layer.layer_number,
                layer.layer_name
            ),
            None => println!("walk phase={} step={}", phase.as_str(), sim.current_step()),
        },
    }
}
