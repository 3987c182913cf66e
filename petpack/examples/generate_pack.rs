use std::path::{Path, PathBuf};
use std::sync::Arc;

use petpack::types::{Category, MarketSite};
use petpack::{export, Client, GeminiImageGenerator, Pipeline, Session};
use tracing_subscriber::EnvFilter;

fn example_files_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("PETPACK_OUTPUT_DIR") {
        return PathBuf::from(dir);
    }
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("examples")
        .join("files")
        .join("output")
}

fn env_or_default<T: std::str::FromStr + Default>(key: &str) -> T {
    std::env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or_default()
}

#[tokio::main]
async fn main() -> petpack::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("petpack=info")),
        )
        .init();

    let session = Arc::new(Session::new());
    for path in std::env::args().skip(1) {
        session.add_file(&path).await?;
    }
    if session.image_count() == 0 {
        println!("usage: generate_pack <photo> [<photo> ...]");
        println!("env: PETPACK_MARKET (US/EU/JP/UK/DE), PETPACK_CATEGORY, PETPACK_NOTES, PETPACK_OUTPUT_DIR");
        return Ok(());
    }
    session.set_market(env_or_default::<MarketSite>("PETPACK_MARKET"));
    session.set_category(env_or_default::<Category>("PETPACK_CATEGORY"));
    session.set_custom_instruction(std::env::var("PETPACK_NOTES").unwrap_or_default());

    let client = Client::from_env()?;
    let pipeline = Pipeline::new(GeminiImageGenerator::new(&client));

    let mut updates = session.subscribe();
    let reporter = tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let snapshot = *updates.borrow_and_update();
            println!(
                "progress {:>3}% ({}/{}), {} image(s)",
                snapshot.progress,
                snapshot.completed_count,
                snapshot.total_count,
                snapshot.result_count
            );
            if !snapshot.is_running && snapshot.total_count > 0 {
                break;
            }
        }
    });

    let Some(summary) = pipeline.run(&session).await else {
        return Ok(());
    };
    if let Err(err) = reporter.await {
        tracing::warn!(error = %err, "progress reporter stopped abnormally");
    }

    let output_dir = example_files_dir();
    let paths = export::save_all(&session.results(), &output_dir).await?;
    for path in &paths {
        println!("saved {}", path.display());
    }
    println!(
        "{} of {} images generated (set PETPACK_OUTPUT_DIR to change the output directory)",
        summary.succeeded, summary.attempted
    );
    Ok(())
}
