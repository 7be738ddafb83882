//! Transcribe command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::Orchestrator;
use anyhow::Result;
use std::path::Path;

/// Run the transcribe command.
pub async fn run_transcribe(input: &str, output: Option<String>, settings: Settings) -> Result<()> {
    let audio_path = Path::new(input);
    if !audio_path.exists() {
        Output::error(&format!("Audio file not found: {}", input));
        anyhow::bail!("audio file not found: {}", input);
    }

    let orchestrator = Orchestrator::new(settings)?;

    let spinner = Output::spinner("Transcribing audio...");
    let result = orchestrator.transcribe(audio_path).await;
    spinner.finish_and_clear();

    match result {
        Ok(transcript) => {
            match output {
                Some(path) => {
                    std::fs::write(&path, &transcript)?;
                    Output::success(&format!("Transcript written to {}", path));
                }
                None => {
                    println!("{}", transcript);
                }
            }
            Ok(())
        }
        Err(e) => {
            Output::error(&format!("Transcription failed: {}", e));
            Err(e.into())
        }
    }
}
