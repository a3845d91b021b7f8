//! Command handlers for CLI subcommands.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;
use tracing::warn;

use prism_client::{AnalysisApi, AnalysisCache, ApiClient};
use prism_models::{
    AnalysisSource, ContentId, DiscoveryOptions, DiscoveryRequest, LibraryItem,
    ManipulationOptions, ManipulationRequest, PromptOptions, PromptRequest, RhetoricalOptions,
    RhetoricalRequest, SummaryOptions, SummaryRequest, Transcript,
};
use prism_orchestrator::{
    validate_playlist_url, validate_text_submission, AnalysisController, AnalysisOperation,
    ControllerState, DiscoveryOperation, ManipulationOperation, PromptOperation,
    RhetoricalOperation, SummaryOperation,
};
use prism_session::{FileSessionStore, SessionContext};

use crate::cli::{AnalyzeCommand, Cli, Commands, InputArgs, OutputFormat};

/// Result type for command operations.
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Execute a CLI command.
pub async fn execute(cli: Cli) -> Result<()> {
    let store = Arc::new(FileSessionStore::default_location()?);
    let session = SessionContext::load(store)?;
    let client = ApiClient::new(&cli.api_url, session.clone())?;

    match cli.command {
        Commands::Login { username, password } => {
            client.login(&username, &password).await?;
            println!("Logged in as {}", username);
            Ok(())
        }
        Commands::Logout => {
            client.logout().await?;
            println!("Logged out");
            Ok(())
        }
        Commands::Me => {
            let profile = client.me().await?;
            match profile.email {
                Some(email) => println!("{} <{}>", profile.username, email),
                None => println!("{}", profile.username),
            }
            Ok(())
        }
        Commands::Library { format } => cmd_library(&client, format).await,
        Commands::Extract { target } => cmd_extract(&client, &target).await,
        Commands::Playlist { url, transcripts } => cmd_playlist(&client, &url, transcripts).await,
        Commands::Config { compact } => cmd_config(&session, compact),
        Commands::Analyze(command) => cmd_analyze(client, command, session.compact_output()).await,
    }
}

async fn cmd_library(client: &ApiClient, format: OutputFormat) -> Result<()> {
    let items = client.list_library().await?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&items)?),
        OutputFormat::Table => {
            println!("{:<16} {:<40} {:<10} {}", "CONTENT ID", "TITLE", "SOURCE", "ANALYSES");
            for item in &items {
                println!(
                    "{:<16} {:<40} {:<10} {}",
                    item.content_id,
                    truncate(&item.title, 38),
                    format!("{:?}", item.source_type).to_lowercase(),
                    analysis_flags(item),
                );
            }
            println!("{} item(s)", items.len());
        }
    }
    Ok(())
}

fn analysis_flags(item: &LibraryItem) -> String {
    prism_models::AnalysisKind::ALL
        .iter()
        .filter(|kind| item.has_analysis(**kind))
        .map(|kind| kind.as_str())
        .collect::<Vec<_>>()
        .join(",")
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let head: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", head)
    }
}

async fn cmd_extract(client: &ApiClient, target: &str) -> Result<()> {
    let extracted = if target.starts_with("http://") || target.starts_with("https://") {
        client.extract_url(target).await?
    } else {
        let bytes = std::fs::read(target)?;
        let file_name = std::path::Path::new(target)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("document");
        client.upload_document(file_name, bytes).await?
    };

    if let Some(title) = &extracted.title {
        println!("# {}", title);
    }
    println!("{}", extracted.text);
    Ok(())
}

async fn cmd_playlist(client: &ApiClient, url: &str, transcripts: bool) -> Result<()> {
    validate_playlist_url(url)?;

    let videos = client.playlist_videos(url).await?;
    for video in &videos {
        println!("{:<16} {}", video.video_id, video.title);
    }
    println!("{} video(s)", videos.len());

    if transcripts {
        let ids: Vec<ContentId> = videos.iter().map(|v| v.video_id.clone()).collect();
        let fetched = client.bulk_transcripts(&ids).await?;
        for entry in &fetched {
            match &entry.transcript {
                Some(t) => println!("{:<16} {} words", entry.video_id, t.word_count()),
                None => println!("{:<16} no transcript available", entry.video_id),
            }
        }
    }
    Ok(())
}

fn cmd_config(session: &SessionContext, compact: Option<bool>) -> Result<()> {
    if let Some(compact) = compact {
        session.set_compact_output(compact)?;
    }
    println!("compact_output = {}", session.compact_output());
    Ok(())
}

async fn cmd_analyze(client: ApiClient, command: AnalyzeCommand, compact: bool) -> Result<()> {
    let api: Arc<dyn AnalysisApi> = Arc::new(client.clone());
    let cache: Arc<dyn AnalysisCache> = Arc::new(client.clone());

    match command {
        AnalyzeCommand::Summary { input, length } => {
            let source = build_source(&input)?;
            let cached = match hydration_id(&input, &source) {
                Some(id) => fetch_or_miss(client.fetch_summary(&id).await),
                None => None,
            };
            let request = SummaryRequest::new(source).with_options(SummaryOptions {
                length: length.into(),
            });
            run_with_progress(SummaryOperation::controller(api, cache), request, cached, compact)
                .await
        }
        AnalyzeCommand::Rhetorical {
            input,
            verify_claims,
            analysis_types,
        } => {
            let source = build_source(&input)?;
            let cached = match hydration_id(&input, &source) {
                Some(id) => fetch_or_miss(client.fetch_rhetorical(&id).await),
                None => None,
            };
            let request = RhetoricalRequest::new(source).with_options(RhetoricalOptions {
                verify_claims,
                analysis_types,
            });
            run_with_progress(
                RhetoricalOperation::controller(api, cache),
                request,
                cached,
                compact,
            )
            .await
        }
        AnalyzeCommand::Manipulation { input, mode } => {
            let source = build_source(&input)?;
            let cached = match hydration_id(&input, &source) {
                Some(id) => fetch_or_miss(client.fetch_manipulation(&id).await),
                None => None,
            };
            let request = ManipulationRequest::new(source).with_options(ManipulationOptions {
                mode: mode.into(),
            });
            run_with_progress(
                ManipulationOperation::controller(api, cache),
                request,
                cached,
                compact,
            )
            .await
        }
        AnalyzeCommand::Discovery {
            input,
            focus_domains,
        } => {
            let source = build_source(&input)?;
            let cached = match hydration_id(&input, &source) {
                Some(id) => fetch_or_miss(client.fetch_discovery(&id).await),
                None => None,
            };
            let request =
                DiscoveryRequest::new(source).with_options(DiscoveryOptions { focus_domains });
            run_with_progress(
                DiscoveryOperation::controller(api, cache),
                request,
                cached,
                compact,
            )
            .await
        }
        AnalyzeCommand::Prompts { input, categories } => {
            let source = build_source(&input)?;
            let cached = match hydration_id(&input, &source) {
                Some(id) => fetch_or_miss(client.fetch_prompts(&id).await),
                None => None,
            };
            let request = PromptRequest::new(source).with_options(PromptOptions { categories });
            run_with_progress(PromptOperation::controller(api, cache), request, cached, compact)
                .await
        }
    }
}

/// Builds the analysis source from the input flags, applying the local
/// text-length check before anything touches the network.
fn build_source(input: &InputArgs) -> Result<AnalysisSource> {
    if let Some(id) = &input.content_id {
        return Ok(AnalysisSource::cached(ContentId::from_string(id)));
    }

    let text = if let Some(text) = &input.text {
        text.clone()
    } else if let Some(path) = &input.file {
        std::fs::read_to_string(path)?
    } else {
        return Err("no input: pass --content-id, --text, or --file".into());
    };

    validate_text_submission(&text)?;

    let transcript = Transcript::from_text(text);
    Ok(match &input.save_as {
        Some(id) => AnalysisSource::transcript_for(transcript, ContentId::from_string(id)),
        None => AnalysisSource::transcript(transcript),
    })
}

/// Content ID to try cache hydration with, unless `--no-cache` was given.
fn hydration_id(input: &InputArgs, source: &AnalysisSource) -> Option<ContentId> {
    if input.no_cache {
        return None;
    }
    source.content_id().cloned()
}

/// A cache fetch error is treated as a miss; the fresh run proceeds.
fn fetch_or_miss<T>(fetched: prism_client::Result<Option<T>>) -> Option<T> {
    match fetched {
        Ok(hit) => hit,
        Err(e) => {
            warn!(error = %e, "cache fetch failed, running fresh");
            None
        }
    }
}

/// Runs one analysis, printing synthesized progress to stderr and the final
/// result to stdout. A cached result short-circuits the run entirely.
async fn run_with_progress<Op>(
    controller: AnalysisController<Op>,
    request: Op::Request,
    cached: Option<Op::Output>,
    compact: bool,
) -> Result<()>
where
    Op: AnalysisOperation,
    Op::Output: Serialize,
{
    if let Some(output) = cached {
        controller.hydrate_from_cache(output);
        eprintln!("(cached result)");
        if let Some(result) = controller.state().result {
            print_result(&result, compact)?;
        }
        return Ok(());
    }

    let rx = controller.subscribe();
    tokio::join!(controller.run(request), print_progress(rx));

    let state = controller.state();
    if let Some(error) = state.error {
        return Err(error.into());
    }
    match state.result {
        Some(result) => print_result(&result, compact)?,
        None => return Err("analysis produced no result".into()),
    }
    Ok(())
}

/// Follows the watch channel, printing each new progress frame until the run
/// settles.
async fn print_progress<R: Clone>(mut rx: watch::Receiver<ControllerState<R>>) {
    let mut last: Option<(&'static str, u8)> = None;

    loop {
        {
            let state = rx.borrow_and_update();
            if let Some(progress) = &state.progress {
                let key = (progress.phase, progress.progress);
                if last != Some(key) {
                    eprintln!(
                        "[{:>3}%] {} - {}",
                        progress.progress, progress.phase_name, progress.message
                    );
                    last = Some(key);
                }
            }
            // Settled: the run always ends with a result or an error.
            if !state.loading && (state.result.is_some() || state.error.is_some()) {
                break;
            }
        }
        if rx.changed().await.is_err() {
            break;
        }
    }
}

fn print_result<T: Serialize>(result: &T, compact: bool) -> Result<()> {
    let rendered = if compact {
        serde_json::to_string(result)?
    } else {
        serde_json::to_string_pretty(result)?
    };
    println!("{}", rendered);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_orchestrator::ValidationError;

    fn text_input(text: &str) -> InputArgs {
        InputArgs {
            content_id: None,
            text: Some(text.to_string()),
            file: None,
            save_as: None,
            no_cache: false,
        }
    }

    #[test]
    fn test_build_source_rejects_short_text() {
        let err = build_source(&text_input("only a few words here")).unwrap_err();
        let validation = err.downcast_ref::<ValidationError>();
        assert!(matches!(
            validation,
            Some(ValidationError::TooShort { .. })
        ));
    }

    #[test]
    fn test_build_source_accepts_long_text_with_save_as() {
        let text = vec!["word"; 60].join(" ");
        let mut input = text_input(&text);
        input.save_as = Some("vid-new".to_string());

        let source = build_source(&input).unwrap();
        assert_eq!(source.content_id().unwrap().as_str(), "vid-new");
        assert!(source.transcript_text().is_some());
    }

    #[test]
    fn test_build_source_requires_some_input() {
        let input = InputArgs {
            content_id: None,
            text: None,
            file: None,
            save_as: None,
            no_cache: false,
        };
        assert!(build_source(&input).is_err());
    }

    #[test]
    fn test_hydration_id_honors_no_cache() {
        let source = AnalysisSource::cached(ContentId::from_string("vid-1"));

        let mut input = text_input("unused");
        input.no_cache = false;
        assert!(hydration_id(&input, &source).is_some());

        input.no_cache = true;
        assert!(hydration_id(&input, &source).is_none());
    }

    #[test]
    fn test_truncate_long_titles() {
        assert_eq!(truncate("short", 10), "short");
        let long = "a".repeat(50);
        let cut = truncate(&long, 10);
        assert!(cut.chars().count() <= 10);
        assert!(cut.ends_with('…'));
    }
}
