//! Command implementations

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::app::{AppContainer, DefaultAppContainer};
use crate::cli::args::{EditArgs, ExtractAudioArgs, MergeArgs, ProbeArgs, StorageCommand};
use crate::cli::Commands;
use crate::config_initialization::AppConfig;
use crate::domain::playback::PlaybackFrame;
use crate::domain::timeline::TimelineView;
use crate::utils::time::format_precise;

/// Dispatch a parsed command
pub async fn run(command: Commands, config: &AppConfig) -> Result<()> {
    let container =
        DefaultAppContainer::new(config).context("Failed to initialize application")?;

    match command {
        Commands::Edit(args) => edit(&container, args, config).await,
        Commands::Probe(args) => probe(&container, args).await,
        Commands::Merge(args) => merge(&container, args).await,
        Commands::ExtractAudio(args) => extract_audio(&container, args).await,
        Commands::Storage(command) => storage(&container, command).await,
    }
}

/// Execute the edit command
pub async fn edit(container: &dyn AppContainer, args: EditArgs, config: &AppConfig) -> Result<()> {
    info!("Running edit script {}", args.script.display());

    let mut session = container.new_session();
    container
        .editor_interactor()
        .run_script_file(&mut session, &args.script)
        .await
        .with_context(|| format!("Edit script {} failed", args.script.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(session.store())?);
    } else {
        print!("{}", TimelineView::render_text(session.store(), args.columns));
        print_frame(&session.frame());
    }

    if args.export {
        // --output is already folded into the configuration
        let outcome = container
            .export_interactor()
            .export(&mut session, &config.output_dir)
            .await?;
        println!(
            "Exported {} segment(s) to {}",
            outcome.plan.descriptors.len(),
            outcome.path.display()
        );
    }

    Ok(())
}

fn print_frame(frame: &PlaybackFrame<'_>) {
    match frame.video {
        Some(segment) => println!(
            "video: {} [{} - {}]{}",
            segment.id,
            format_precise(segment.start),
            format_precise(segment.end),
            if frame.primary_muted { " (muted)" } else { "" }
        ),
        None => println!("video: none"),
    }
    for audio in &frame.audio {
        println!(
            "audio: {} {} [{} - {}]",
            audio.track_id,
            audio.segment.id,
            format_precise(audio.segment.start),
            format_precise(audio.segment.end)
        );
    }
}

/// Execute the probe command
pub async fn probe(container: &dyn AppContainer, args: ProbeArgs) -> Result<()> {
    let seconds = container
        .media_interactor()
        .probe(&args.input)
        .await
        .with_context(|| format!("Failed to probe {}", args.input.display()))?;
    println!("{}", format_precise(seconds));
    Ok(())
}

/// Execute the merge command; a non-2xx reply is a failure
pub async fn merge(container: &dyn AppContainer, args: MergeArgs) -> Result<()> {
    let reply = container
        .media_interactor()
        .merge(&args.videos, args.segments)
        .await?;

    println!("{}", serde_json::to_string_pretty(&reply.body)?);
    if !reply.is_success() {
        anyhow::bail!("Merge failed with status {}", reply.status);
    }
    Ok(())
}

/// Execute the extract-audio command
pub async fn extract_audio(container: &dyn AppContainer, args: ExtractAudioArgs) -> Result<()> {
    let reply = container
        .media_interactor()
        .extract_audio(args.input.as_deref())
        .await?;
    println!("{}", serde_json::to_string_pretty(&reply)?);
    Ok(())
}

/// Execute a storage subcommand
pub async fn storage(container: &dyn AppContainer, command: StorageCommand) -> Result<()> {
    let media = container.media_interactor();
    match command {
        StorageCommand::Upload { input } => {
            let url = media
                .store(&input)
                .await
                .with_context(|| format!("Failed to store {}", input.display()))?;
            println!("{}", url);
        }
        StorageCommand::List { prefix } => {
            for url in media.list(&prefix).await? {
                println!("{}", url);
            }
        }
        StorageCommand::Delete { url } => {
            if !media.delete(&url).await {
                warn!("Nothing deleted for {}", url);
                anyhow::bail!("Failed to delete {}", url);
            }
            println!("deleted {}", url);
        }
    }
    Ok(())
}
