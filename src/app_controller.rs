use anyhow::{Context, Result};
use futures::stream::{self, StreamExt};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::app_config::{Config, TranscriptionEngineKind};
use crate::errors::EngineError;
use crate::file_utils::{FileManager, FileType};
use crate::language_utils;
use crate::providers::{TranscriptionEngine, TranscriptionRequest};
use crate::providers::whisper_api::WhisperApi;
use crate::srt::SrtFile;
use crate::subtitle_builder;

// @module: Application controller for subtitle generation

/// Outcome of processing one audio input
#[derive(Debug, PartialEq)]
enum RunOutcome {
    /// A subtitle file was written to the given path
    Generated(PathBuf),
    /// The output already existed and overwrite was not forced
    Skipped,
}

/// Main application controller for subtitle generation
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Transcription engine selected by the configuration
    engine: Box<dyn TranscriptionEngine>,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let engine = Self::build_engine(&config)?;
        Ok(Self { config, engine })
    }

    /// Create a controller with an explicit engine, bypassing engine construction
    ///
    /// Used by tests to drive the pipeline with a mock engine.
    pub fn with_engine(config: Config, engine: Box<dyn TranscriptionEngine>) -> Self {
        Self { config, engine }
    }

    /// Build the engine client the configuration selects
    fn build_engine(config: &Config) -> Result<Box<dyn TranscriptionEngine>> {
        let transcription = &config.transcription;
        let endpoint = transcription.get_endpoint();
        let timeout_secs = transcription.get_timeout_secs();

        let engine: Box<dyn TranscriptionEngine> = match transcription.engine {
            TranscriptionEngineKind::WhisperServer => {
                Box::new(WhisperApi::local(endpoint, timeout_secs)?)
            }
            TranscriptionEngineKind::WhisperApi => {
                Box::new(WhisperApi::hosted(endpoint, transcription.get_api_key(), timeout_secs)?)
            }
        };

        Ok(engine)
    }

    /// Build the per-call transcription request from the configuration
    fn build_request(&self) -> Result<TranscriptionRequest> {
        let mut request = TranscriptionRequest::new(self.config.transcription.get_model())
            .temperature(self.config.transcription.temperature);

        if !self.config.language.is_empty() {
            let language = language_utils::normalize_to_part1(&self.config.language)
                .context("Invalid language hint in configuration")?;
            request = request.language(language);
        }

        Ok(request)
    }

    /// Run the main workflow for a single audio file
    pub async fn run(&self, input_file: PathBuf, output_dir: PathBuf, force_overwrite: bool) -> Result<()> {
        let start_time = std::time::Instant::now();

        let multi_progress = MultiProgress::new();
        match self.process_file(&input_file, &output_dir, &multi_progress, force_overwrite).await? {
            RunOutcome::Generated(output_path) => {
                info!(
                    "Success: {} ({})",
                    output_path.display(),
                    Self::format_duration(start_time.elapsed())
                );
            }
            RunOutcome::Skipped => {
                warn!("Skipping file, subtitle already exists (use -f to force overwrite)");
            }
        }

        Ok(())
    }

    /// Run the workflow in folder mode, processing all audio files in a directory
    ///
    /// Files run concurrently, bounded by the engine's concurrent_requests
    /// setting. Per-file failures are logged and counted without aborting the
    /// remaining files.
    pub async fn run_folder(&self, input_dir: PathBuf, force_overwrite: bool) -> Result<()> {
        let start_time = std::time::Instant::now();

        if !input_dir.exists() {
            return Err(anyhow::anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        let audio_files = FileManager::find_audio_files(&input_dir)?;
        if audio_files.is_empty() {
            return Err(anyhow::anyhow!("No audio files found in directory: {:?}", input_dir));
        }

        let multi_progress = MultiProgress::new();
        let folder_pb = multi_progress.add(ProgressBar::new(audio_files.len() as u64));
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg} {eta}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        folder_pb.set_style(template_result.progress_chars("█▓▒░"));
        folder_pb.set_message("Processing files");

        let concurrency = self.config.transcription.concurrent_requests().max(1);

        let outcomes: Vec<(PathBuf, Result<RunOutcome>)> = stream::iter(audio_files)
            .map(|audio_file| {
                let folder_pb = folder_pb.clone();
                let multi_progress = &multi_progress;
                async move {
                    let output_dir = audio_file
                        .parent()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| PathBuf::from("."));

                    let result = self
                        .process_file(&audio_file, &output_dir, multi_progress, force_overwrite)
                        .await;
                    folder_pb.inc(1);
                    (audio_file, result)
                }
            })
            .buffer_unordered(concurrency)
            .collect()
            .await;

        folder_pb.finish_with_message("Folder processing complete");

        let mut success_count = 0;
        let mut skip_count = 0;
        let mut error_count = 0;

        for (audio_file, result) in outcomes {
            match result {
                Ok(RunOutcome::Generated(_)) => success_count += 1,
                Ok(RunOutcome::Skipped) => skip_count += 1,
                Err(e) => {
                    error!("Error processing file {}: {}", audio_file.display(), e);
                    error_count += 1;
                }
            }
        }

        info!(
            "Folder processing completed: {} processed, {} skipped, {} errors - Duration: {}",
            success_count,
            skip_count,
            error_count,
            Self::format_duration(start_time.elapsed())
        );

        if error_count > 0 {
            return Err(anyhow::anyhow!("{} file(s) failed to process", error_count));
        }

        Ok(())
    }

    /// Process one audio file: transcribe, build lines, write the SRT
    ///
    /// A failed run writes nothing; the subtitle file only appears after the
    /// whole pipeline succeeded.
    async fn process_file(
        &self,
        input_file: &Path,
        output_dir: &Path,
        multi_progress: &MultiProgress,
        force_overwrite: bool,
    ) -> Result<RunOutcome> {
        if !input_file.exists() {
            return Err(anyhow::anyhow!("Input file does not exist: {:?}", input_file));
        }

        let file_type = FileManager::detect_file_type(input_file)?;
        if file_type != FileType::Audio {
            return Err(anyhow::anyhow!(
                "Input file is not a supported audio file: {:?}",
                input_file
            ));
        }

        let output_path = FileManager::generate_output_path(input_file, output_dir, "srt");
        if output_path.exists() && !force_overwrite {
            return Ok(RunOutcome::Skipped);
        }

        let request = self.build_request()?;

        let spinner = multi_progress.add(ProgressBar::new_spinner());
        spinner.set_message(format!(
            "Transcribing {} ({} - {})",
            input_file.file_name().map(|f| f.to_string_lossy().to_string()).unwrap_or_default(),
            self.engine.name(),
            request.model
        ));
        spinner.enable_steady_tick(Duration::from_millis(120));

        let transcription_result = self.engine.transcribe(input_file, &request).await;
        spinner.finish_and_clear();

        let transcription = transcription_result
            .with_context(|| format!("Transcription failed for {:?}", input_file))?;

        if transcription.segments.is_empty() {
            return Err(EngineError::EmptyTranscription(
                input_file.to_string_lossy().to_string(),
            ))
            .context("Engine produced no speech segments");
        }

        debug!(
            "Transcribed {:?}: {} segments, {} words",
            input_file,
            transcription.segments.len(),
            transcription.word_count()
        );

        let words = subtitle_builder::extract_words(&transcription.segments)?;
        let lines = subtitle_builder::pack_lines(
            words,
            self.config.line.max_chars,
            self.config.line.lines_distance,
        )?;

        info!(
            "Packed {} words into {} subtitle lines",
            lines.iter().map(|l| l.words.len()).sum::<usize>(),
            lines.len()
        );

        let srt = SrtFile::from_lines(&lines)?;
        srt.write_to(&output_path)?;

        Ok(RunOutcome::Generated(output_path))
    }

    // Format duration in a human-readable format
    fn format_duration(duration: std::time::Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
