//! Papercast CLI: turn a PDF into a podcast from the command line.
//!
//! Set PAPERCAST_API_URL (or API_URL), or pass --api-url.

use anyhow::Context;
use bytes::Bytes;
use clap::{Parser, Subcommand};
use papercast_cli::{human_size, init_tracing};
use papercast_client::session::{ConvertSession, NoticeKind};
use papercast_client::ApiClient;
use papercast_core::{PodcastStyle, Speed, UploadCandidate};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "papercast", about = "Papercast gateway CLI")]
struct Cli {
    /// Gateway base URL; overrides PAPERCAST_API_URL
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a PDF into a podcast
    Convert {
        /// Path to the PDF file
        file: std::path::PathBuf,
        /// Podcast style: conversational, academic, simple, storytelling
        #[arg(long, default_value = "conversational")]
        style: String,
        /// Playback speed between 0.8 and 1.3
        #[arg(long, default_value = "1.0")]
        speed: String,
        /// Print the full transcript instead of a hint
        #[arg(long)]
        transcript: bool,
    },
    /// List available podcast styles
    Styles,
    /// List available voice presets
    Voices,
    /// Check whether the conversion service is reachable
    Status,
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

fn print_notices(session: &mut ConvertSession) {
    for notice in session.take_notices() {
        match notice.kind {
            NoticeKind::Error => eprintln!("error: {}", notice.message),
            NoticeKind::Success | NoticeKind::Info => println!("{}", notice.message),
        }
    }
}

async fn run_convert(
    client: &ApiClient,
    file: std::path::PathBuf,
    style: &str,
    speed: &str,
    show_transcript: bool,
) -> anyhow::Result<()> {
    let style: PodcastStyle = style.parse()?;
    let speed: Speed = speed.parse()?;

    let data = std::fs::read(&file)
        .with_context(|| format!("Failed to read file: {}", file.display()))?;
    let file_name = file
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("document.pdf")
        .to_string();

    // No declared media type here; the .pdf extension carries the check,
    // as it would for a picker without MIME metadata.
    let candidate = UploadCandidate::new(file_name, None, Bytes::from(data));

    let mut session = ConvertSession::new();
    session.set_style(style);
    session.set_speed(speed);
    session.on_file_accepted(|accepted| {
        println!(
            "Attached {} ({})",
            accepted.file_name,
            human_size(accepted.size())
        );
    });

    if !session.attach(candidate) {
        print_notices(&mut session);
        std::process::exit(1);
    }
    print_notices(&mut session);

    println!(
        "Converting with style {} at {}...",
        session.style(),
        session.speed().label()
    );

    session.generate(client).await;
    print_notices(&mut session);

    if show_transcript {
        session.toggle_transcript();
    }

    match session.player_view() {
        Some(view) => {
            println!();
            println!("Audio: {}", view.audio_url);
            match view.transcript {
                Some(t) if t.expanded => {
                    println!();
                    println!("Transcript:");
                    println!("{}", t.text);
                }
                Some(_) => {
                    println!("Transcript available; rerun with --transcript to print it.");
                }
                None => {}
            }
            Ok(())
        }
        None => {
            // The failure notice was already printed.
            std::process::exit(1);
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let client = match &cli.api_url {
        Some(url) => ApiClient::new(url.clone()),
        None => ApiClient::from_env(),
    }
    .context("Failed to create API client. Set PAPERCAST_API_URL (or API_URL) or pass --api-url")?;

    match cli.command {
        Commands::Convert {
            file,
            style,
            speed,
            transcript,
        } => {
            run_convert(&client, file, &style, &speed, transcript).await?;
        }
        Commands::Styles => {
            let response = client.styles().await?;
            print_json(&response)?;
        }
        Commands::Voices => {
            let response = client.voices().await?;
            print_json(&response)?;
        }
        Commands::Status => {
            let response = client.convert_status().await?;
            print_json(&response)?;
        }
    }

    Ok(())
}
