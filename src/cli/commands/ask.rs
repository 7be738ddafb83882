//! Ask command implementation.
//!
//! One-shot pipeline: transcribe the given audio file, build the index, and
//! answer a single question. Nothing is persisted between runs.

use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::Orchestrator;
use anyhow::Result;
use std::path::Path;

/// Run the ask command.
pub async fn run_ask(
    input: &str,
    question: &str,
    top_k: Option<usize>,
    settings: Settings,
) -> Result<()> {
    let audio_path = Path::new(input);
    if !audio_path.exists() {
        Output::error(&format!("Audio file not found: {}", input));
        anyhow::bail!("audio file not found: {}", input);
    }

    let orchestrator = Orchestrator::new(settings)?;

    let spinner = Output::spinner("Transcribing audio...");
    if let Err(e) = orchestrator.transcribe(audio_path).await {
        spinner.finish_and_clear();
        Output::error(&format!("Transcription failed: {}", e));
        return Err(e.into());
    }
    spinner.finish_and_clear();
    Output::success(&format!(
        "Indexed {} transcript chunks",
        orchestrator.chunk_count().await
    ));

    let spinner = Output::spinner("Generating answer...");
    match orchestrator.ask(question, top_k).await {
        Ok(answer) => {
            spinner.finish_and_clear();
            println!("\n{}\n", answer);
            Ok(())
        }
        Err(e) => {
            spinner.finish_and_clear();
            Output::error(&format!("Failed to generate answer: {}", e));
            Err(e.into())
        }
    }
}
