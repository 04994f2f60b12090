//! TTS Panel - 试运行入口
//!
//! 加载配置与本地目录，解析命令行文本并输出渲染请求 JSON

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use ttspanel::application::{AddRowCommand, PlayRowCommand, RefreshRegistryCommand};
use ttspanel::config::{load_config_from_path, print_config, AppConfig};
use ttspanel::domain::render::RawRenderOptions;
use ttspanel::infrastructure::adapters::FakeRenderClient;
use ttspanel::infrastructure::memory::{InMemoryJobQueue, MemoryAudioSink};
use ttspanel::infrastructure::PanelServices;

#[derive(Parser, Debug)]
#[command(author, version, about = "Parse panel markup and print the render request")]
struct Cli {
    /// 配置文件路径（默认搜索 config.toml / config.local.toml）
    #[arg(long)]
    config: Option<PathBuf>,

    /// 回退音色（默认使用 voices.default）
    #[arg(long)]
    voice: Option<String>,

    /// 渲染预设
    #[arg(long)]
    preset: Option<String>,

    /// 使用 Fake 渲染客户端走完整播放流程
    #[arg(long)]
    play: bool,

    /// 要朗读的文本
    #[arg(required = true)]
    text: Vec<String>,
}

fn init_tracing(config: &AppConfig) {
    let log_filter = format!("{},ttspanel={}", config.log.level, config.log.level);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    // stdout 留给请求 JSON
    if config.log.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config_from_path(cli.config.as_deref())
        .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config);
    print_config(&config);

    let services = PanelServices::from_config(
        &config,
        Arc::new(FakeRenderClient::with_defaults()),
        MemoryAudioSink::new().arc(),
        InMemoryJobQueue::default().arc(),
    )
    .await;

    if let Some(preset) = &cli.preset {
        services
            .panel
            .set_raw_render_options(&RawRenderOptions {
                preset: preset.clone(),
                ..Default::default()
            })
            .await;
    }

    let refreshed = services
        .refresh_registry_handler
        .handle(RefreshRegistryCommand)
        .await;
    tracing::info!(
        known_voices = refreshed.known_voices,
        sound_effects = refreshed.sound_effects,
        selected_voice = ?refreshed.selected_voice,
        "Registry refreshed"
    );

    let text = cli.text.join(" ");
    let voice = match cli.voice {
        Some(voice) => Some(voice),
        None => services.panel.selected_voice().await,
    };

    let request = services.orchestrator.prepare(&text, voice.as_deref()).await;
    println!("{}", serde_json::to_string_pretty(&request)?);

    if cli.play {
        let added = services
            .add_row_handler
            .handle(AddRowCommand {
                text,
                voice,
                job_id: None,
                allow_autoplay: false,
            })
            .await?;
        if let Some(row_id) = added.row_id {
            let played = services
                .play_row_handler
                .handle(PlayRowCommand { row_id })
                .await?;
            tracing::info!(row_id = %played.row_id, status = %played.status, "Row played");
        }
    }

    Ok(())
}
