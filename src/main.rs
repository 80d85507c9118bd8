//! recipe-narrator - find recipes by ingredient and have their steps read aloud
//!
//! Drives the same actions a page would: load voices, search, pick a recipe,
//! narrate it. The status log is printed at the end.

use clap::Parser;
use recipe_narrator::narration::BoundAudio;
use recipe_narrator::notify::ConsoleNotifier;
use recipe_narrator::session::ResultEntry;
use recipe_narrator::{HttpBackend, Outcome, RecipeApp, Settings, UiAction};
use std::error::Error;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "recipe-narrator")]
#[command(version)]
#[command(about = "Search recipes by ingredient and narrate their steps", long_about = None)]
struct Cli {
    /// Comma separated ingredients, e.g. "egg, tomato"
    ingredients: Option<String>,

    /// Server origin (overrides configuration)
    #[arg(long)]
    base_url: Option<String>,

    /// Voice id to narrate with
    #[arg(short, long)]
    voice: Option<String>,

    /// 1-based position of the recipe to open and narrate
    #[arg(short, long)]
    pick: Option<usize>,

    /// Save the narration audio to this file
    #[arg(short, long)]
    download: Option<PathBuf>,

    /// Only list the available voices
    #[arg(long)]
    list_voices: bool,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("recipe_narrator=warn"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .try_init();
}

async fn save_audio(
    app: &RecipeApp,
    backend: &HttpBackend,
    bound: &BoundAudio,
    path: &Path,
) -> Result<(), Box<dyn Error>> {
    let bytes = match bound {
        BoundAudio::Local(url) => app
            .audio_store()
            .resolve(url)
            .map(|audio| audio.bytes.clone())
            .ok_or("local audio reference was released")?,
        BoundAudio::Remote(url) => backend
            .client()
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?
            .to_vec(),
    };
    tokio::fs::write(path, bytes).await?;
    println!("Saved audio to {}", path.display());
    Ok(())
}

async fn run(cli: Cli, app: &RecipeApp, backend: &HttpBackend) -> Result<(), Box<dyn Error>> {
    // A failed catalog load is already in the status log; narration falls
    // back to the default voice.
    let _ = app.dispatch(UiAction::LoadVoices).await;

    if cli.list_voices {
        for option in app.voice_options() {
            println!("{:<24} {}", option.value, option.label);
        }
        return Ok(());
    }

    let Some(ingredients) = cli.ingredients else {
        println!("Nothing to search for. Pass some ingredients.");
        return Ok(());
    };

    if let Some(voice) = &cli.voice {
        // An unusable voice must not stop the search; narration then uses
        // the configured default.
        if let Err(e) = app.dispatch(UiAction::SelectVoice(voice.clone())).await {
            warn!("{}, narrating with the default voice", e);
        }
    }

    app.dispatch(UiAction::Search(ingredients)).await?;
    for (i, entry) in app.result_entries().iter().enumerate() {
        match entry {
            ResultEntry::Recipe(r) => println!("{:>3}. {}", i + 1, r.title),
            ResultEntry::Placeholder(text) => println!("     {}", text),
        }
    }

    let Some(pick) = cli.pick else {
        return Ok(());
    };

    app.dispatch(UiAction::SelectRecipe(pick.saturating_sub(1)))
        .await?;
    let detail = app.detail_view();
    println!("\n{}", detail.title);
    for (i, step) in detail.steps.iter().enumerate() {
        println!("{:>3}. {}", i + 1, step);
    }

    if let Outcome::AudioReady(bound) = app.dispatch(UiAction::Narrate).await? {
        println!("\nAudio: {}", bound.url());
        if let Some(path) = &cli.download {
            save_audio(app, backend, &bound, path).await?;
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();
    let cli = Cli::parse();

    let mut settings = Settings::new()?;
    if let Some(url) = &cli.base_url {
        settings.base_url = url.clone();
    }

    let backend = Arc::new(HttpBackend::new(&settings)?);
    let app = RecipeApp::new(backend.clone(), Arc::new(ConsoleNotifier), settings);

    let result = run(cli, &app, &backend).await;

    println!("\nLog:{}", app.status_log().contents());
    result
}
