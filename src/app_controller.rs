use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};

use crate::app_config::{BurnStrategy, Config};
use crate::errors::PipelineError;
use crate::file_utils::{FileManager, FileType};
use crate::fonts::FontResolver;
use crate::language_utils::LanguageTable;
use crate::providers::{translate_track, TranscriptionProvider, TranslationProvider};
use crate::remux;
use crate::render::{self, CaptionStyle, LoadedFont};
use crate::segments::CaptionTrack;
use crate::subtitle;

// @module: Application controller for caption burn jobs

/// One rendering invocation: the source, its caption track, the artifacts to
/// produce and the font to draw with. Short-lived, owned by the caller that
/// constructed it.
#[derive(Debug)]
pub struct RenderJob {
    pub source: PathBuf,
    pub track: CaptionTrack,
    pub srt_path: PathBuf,
    pub output_path: PathBuf,
    pub font_path: PathBuf,
    pub font_name: &'static str,
}

/// Main application controller for caption burning.
///
/// Each job runs single-threaded and synchronous from the controller's point
/// of view; callers wanting parallelism run independent controllers on
/// independent jobs, nothing here is shared mutable state.
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Immutable language name/code table, shared by reference
    languages: LanguageTable,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        Ok(Self {
            config,
            languages: LanguageTable::new(),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the full workflow for one media file.
    ///
    /// Obtains segments from the recognizer, optionally translates them with
    /// per-segment sentinel recovery, merges, writes the SRT artifact, and
    /// burns the captions with the configured strategy. With `srt_only` the
    /// job stops after the SRT artifact.
    pub async fn run(
        &self,
        input_file: &Path,
        transcription: &dyn TranscriptionProvider,
        translation: Option<&dyn TranslationProvider>,
        output_dir: &Path,
        force_overwrite: bool,
        srt_only: bool,
    ) -> Result<()> {
        let start_time = std::time::Instant::now();

        if !input_file.exists() {
            return Err(PipelineError::Input(format!(
                "Input file does not exist: {:?}",
                input_file
            ))
            .into());
        }

        let file_type = FileManager::detect_file_type(input_file);
        if file_type == FileType::Unknown || file_type == FileType::Subtitle {
            return Err(PipelineError::Input(format!(
                "Input is not a media container: {:?}",
                input_file
            ))
            .into());
        }
        if file_type == FileType::Audio && !srt_only {
            return Err(PipelineError::Input(format!(
                "Cannot burn captions onto an audio container: {:?} (use --srt-only)",
                input_file
            ))
            .into());
        }

        FileManager::ensure_dir(output_dir)?;

        let extension = input_file
            .extension()
            .map(|e| e.to_string_lossy().to_string())
            .unwrap_or_else(|| "mkv".to_string());
        let output_path = FileManager::generate_output_path(
            input_file,
            output_dir,
            &self.config.target_language,
            &extension,
        );
        let srt_path = FileManager::generate_output_path(
            input_file,
            output_dir,
            &self.config.target_language,
            "srt",
        );

        if !srt_only && output_path.exists() && !force_overwrite {
            warn!(
                "Skipping file, output already exists (use -f to force overwrite): {:?}",
                output_path
            );
            return Ok(());
        }

        // Recognizer boundary: segments arrive validated and ordered or not at all
        let transcription_output = transcription
            .transcribe(input_file)
            .await
            .context("Speech recognition failed")?;
        let detected_name = self
            .languages
            .name_for_code(&transcription_output.language)
            .unwrap_or_else(|| transcription_output.language.clone());
        info!(
            "Recognized {} segments, detected language '{}' ({})",
            transcription_output.segments.len(),
            transcription_output.language,
            detected_name
        );

        let segments = match translation {
            Some(provider) => {
                translate_track(
                    &transcription_output.segments,
                    provider,
                    &self.config.target_language,
                )
                .await
            }
            None => transcription_output.segments,
        };

        let track = CaptionTrack::from_segments(segments)
            .map_err(|e| PipelineError::Input(e.to_string()))?;
        let merged = track.merged(self.config.render.max_gap_seconds);
        debug!("Caption track has {} captions after merging", merged.len());

        subtitle::write_to_srt(&merged, &srt_path)
            .context("Failed to write subtitle artifact")?;
        info!("Subtitle artifact: {:?}", srt_path);

        if srt_only {
            return Ok(());
        }

        if merged.is_empty() {
            // Nothing to burn: the output is the source, untouched
            warn!("Caption track is empty, copying source streams unchanged");
            remux::stream_copy(&self.config.tools.ffmpeg_path, input_file, &output_path).await?;
        } else {
            // Job font comes from the first caption only; a track that
            // switches scripts later keeps the job font
            let sample = merged.segments()[0].text.clone();
            let resolver = FontResolver::new(&self.config.render.fonts_dir);
            let font_path = resolver.resolve(&sample);
            let font_name = FontResolver::font_name(&sample);
            let job = RenderJob {
                source: input_file.to_path_buf(),
                track: merged,
                srt_path: srt_path.clone(),
                output_path: output_path.clone(),
                font_path,
                font_name,
            };

            self.execute(&job).await?;
        }

        info!(
            "Done in {:.1}s: {:?}",
            start_time.elapsed().as_secs_f64(),
            output_path
        );
        Ok(())
    }

    /// Execute the configured burn strategy for a prepared job
    async fn execute(&self, job: &RenderJob) -> Result<()> {
        match self.config.strategy {
            BurnStrategy::FilterBurn => {
                remux::burn_with_filter(
                    &self.config.tools.ffmpeg_path,
                    &job.source,
                    &job.srt_path,
                    &job.output_path,
                    job.font_name,
                    self.config.render.font_size_pt,
                    &self.config.render.fonts_dir,
                )
                .await?;
            }
            BurnStrategy::RenderRemux => {
                self.render_then_remux(job).await?;
            }
        }

        Ok(())
    }

    /// Frame-by-frame overlay into a silent intermediate, then a stream-copy
    /// mux with the original audio. The intermediate is deleted on success
    /// and retained on failure for diagnosis.
    async fn render_then_remux(&self, job: &RenderJob) -> Result<()> {
        let meta = render::probe_video(&self.config.tools.ffprobe_path, &job.source).await?;
        debug!(
            "Source video: {}x{} @ {} fps, {:?} frames",
            meta.width, meta.height, meta.frame_rate, meta.frame_count
        );

        let font = LoadedFont::load(&job.font_path)?;
        let style = CaptionStyle {
            font_size_pt: self.config.render.font_size_pt,
            line_wrap_width: self.config.render.line_wrap_width,
            padding_px: self.config.render.padding_px,
        };

        let silent_path = std::env::temp_dir().join(format!(
            "subburn_silent_{}_{}.mp4",
            std::process::id(),
            job.output_path
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_default()
        ));

        let result = async {
            render::render_silent(
                &self.config.tools.ffmpeg_path,
                &job.source,
                &meta,
                job.track.segments(),
                &font,
                &style,
                &silent_path,
            )
            .await?;

            remux::mux_streams(
                &self.config.tools.ffmpeg_path,
                &silent_path,
                &job.source,
                &job.output_path,
            )
            .await
        }
        .await;

        match result {
            Ok(()) => {
                FileManager::remove_if_exists(&silent_path);
                Ok(())
            }
            Err(e) => {
                // Intermediates are kept on failure: diagnosability over tidiness
                error!(
                    "Burn failed ({}), intermediate retained at {:?}",
                    e.kind(),
                    silent_path
                );
                Err(e.into())
            }
        }
    }

    /// Process every video file under a directory, looking for a sibling
    /// `<stem>.json` transcript next to each
    pub async fn run_folder(
        &self,
        input_dir: &Path,
        output_dir: Option<&Path>,
        force_overwrite: bool,
        srt_only: bool,
    ) -> Result<()> {
        use crate::providers::transcript_file::TranscriptFile;

        let files = FileManager::find_video_files(input_dir)?;
        if files.is_empty() {
            warn!("No video files found under {:?}", input_dir);
            return Ok(());
        }

        let progress = ProgressBar::new(files.len() as u64);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress.set_style(template_result.progress_chars("█▓▒░"));

        let mut processed = 0;
        for file in &files {
            progress.set_message(
                file.file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default(),
            );

            let transcript = TranscriptFile::sibling_of(file);
            if !transcript.path().exists() {
                warn!(
                    "No transcript next to {:?} (expected {:?}), skipping",
                    file,
                    transcript.path()
                );
                progress.inc(1);
                continue;
            }

            let per_file_output = output_dir
                .map(Path::to_path_buf)
                .or_else(|| file.parent().map(Path::to_path_buf))
                .unwrap_or_else(|| PathBuf::from("."));

            match self
                .run(file, &transcript, None, &per_file_output, force_overwrite, srt_only)
                .await
            {
                Ok(()) => processed += 1,
                Err(e) => error!("Error processing {:?}: {}", file, e),
            }

            progress.inc(1);
        }

        progress.finish_and_clear();
        info!("Finished processing {}/{} files", processed, files.len());
        Ok(())
    }
}
