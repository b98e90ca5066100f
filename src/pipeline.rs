use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::config::Config;
use crate::error::{Result, JamakError};
use crate::media::{MediaProcessorFactory, MediaProcessorTrait};
use crate::subtitle::{SrtWriter, SubtitleEntry};
use crate::transcribe::{ModelSize, TranscribeOptions, TranscriberFactory, TranscriberTrait};
use crate::transcription::Transcription;
use crate::translate::{Translator, TranslatorFactory};

const VIDEO_EXTENSIONS: [&str; 7] = ["mp4", "avi", "mov", "mkv", "wmv", "flv", "webm"];

/// One subtitle generation request
#[derive(Debug, Clone, PartialEq)]
pub struct Job {
    pub video_path: PathBuf,
    pub model: ModelSize,
    /// Directory for subtitle and temporary files; the video's directory when unset
    pub output_dir: Option<PathBuf>,
}

impl Job {
    pub fn new<P: AsRef<Path>>(video_path: P, model: ModelSize) -> Self {
        Self {
            video_path: video_path.as_ref().to_path_buf(),
            model,
            output_dir: None,
        }
    }

    pub fn with_output_dir<P: AsRef<Path>>(mut self, output_dir: P) -> Self {
        self.output_dir = Some(output_dir.as_ref().to_path_buf());
        self
    }

    /// Fail with `NotFound` unless the video exists
    pub fn validate(&self) -> Result<()> {
        if self.video_path.exists() {
            Ok(())
        } else {
            Err(JamakError::NotFound(self.video_path.display().to_string()))
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubtitleOutput {
    pub language: String,
    pub path: PathBuf,
    pub entries: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput {
    pub subtitles: Vec<SubtitleOutput>,
    /// Segments produced by the recognizer
    pub segments: usize,
    /// Segments skipped for carrying no text
    pub skipped: usize,
}

/// Temporary waveform removed when dropped
pub struct TempAudio {
    path: PathBuf,
}

impl TempAudio {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempAudio {
    fn drop(&mut self) {
        if !self.path.exists() {
            return;
        }
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!("Removed temporary audio {}", self.path.display()),
            Err(e) => warn!("Failed to remove temporary audio {}: {}", self.path.display(), e),
        }
    }
}

pub struct Pipeline {
    config: Config,
    media: Box<dyn MediaProcessorTrait>,
    transcriber: Box<dyn TranscriberTrait>,
    translator: Box<dyn Translator>,
}

impl Pipeline {
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let media = MediaProcessorFactory::create_processor(config.media.clone());
        let transcriber = TranscriberFactory::create_transcriber(config.transcriber.clone());
        let translator = TranslatorFactory::create_translator(&config.translate)?;

        Ok(Self::with_components(config, media, transcriber, translator))
    }

    pub fn with_components(
        config: Config,
        media: Box<dyn MediaProcessorTrait>,
        transcriber: Box<dyn TranscriberTrait>,
        translator: Box<dyn Translator>,
    ) -> Self {
        Self {
            config,
            media,
            transcriber,
            translator,
        }
    }

    /// Verify the external tools respond before starting long runs
    pub async fn check_dependencies(&self) -> Result<()> {
        self.media.check_availability().await?;
        self.translator.check_availability().await?;
        Ok(())
    }

    /// Generate one subtitle file per target language for the job's video
    pub async fn run(&self, job: &Job) -> Result<PipelineOutput> {
        let video_path = job.video_path.as_path();
        info!("Starting subtitle generation for: {}", video_path.display());

        job.validate()?;

        let (output_dir, stem) = self.resolve_output(job)?;
        fs::create_dir_all(&output_dir).await
            .map_err(|e| JamakError::Write(format!("{}: {}", output_dir.display(), e)))?;

        info!("Step 1/4: Extracting audio from video...");
        let temp_audio = TempAudio::new(
            output_dir.join(format!("{}{}", stem, self.config.pipeline.temp_audio_suffix)),
        );
        self.media.extract_audio(video_path, temp_audio.path()).await
            .map_err(|e| e.within(JamakError::Extraction))?;

        info!("Step 2/4: Loading Whisper model '{}'...", job.model);
        let model = self.transcriber.load_model(job.model).await
            .map_err(|e| e.within(JamakError::ModelLoad))?;

        info!("Transcribing audio (this may take a while)...");
        let options = TranscribeOptions {
            language: self.config.transcriber.source_language.clone(),
            word_timestamps: self.config.transcriber.word_timestamps,
        };
        let transcription = self.transcriber.transcribe(&model, temp_audio.path(), &options).await
            .map_err(|e| e.within(JamakError::Transcription))?;
        info!(
            "Transcription complete: {} segments ending at {:.1}s",
            transcription.segments.len(),
            transcription.duration().unwrap_or_default()
        );

        info!("Step 3/4: Translating and formatting subtitles...");
        let written = self.translate_and_write(&transcription, &output_dir, &stem).await;

        info!("Step 4/4: Cleaning up temporary files...");
        drop(temp_audio);

        let subtitles = written?;
        for subtitle in &subtitles {
            info!("{} subtitles saved to: {}", subtitle.language, subtitle.path.display());
        }

        Ok(PipelineOutput {
            subtitles,
            segments: transcription.segments.len(),
            skipped: transcription.segments.len() - transcription.spoken_segments(),
        })
    }

    /// Run the pipeline for every video under a directory, one at a time
    pub async fn run_directory<P: AsRef<Path>>(
        &self,
        input_dir: P,
        model: ModelSize,
        output_dir: Option<&Path>,
    ) -> Result<Vec<(PathBuf, Result<PipelineOutput>)>> {
        let input_dir = input_dir.as_ref();
        info!("Processing directory: {}", input_dir.display());

        check_input_dir(input_dir)?;

        let videos = find_videos(input_dir);
        info!("Found {} video files to process", videos.len());

        let mut results = Vec::with_capacity(videos.len());
        for video_path in videos {
            let mut job = Job::new(&video_path, model);
            if let Some(dir) = output_dir {
                // Mirror the input layout under the output directory
                let relative = video_path.parent()
                    .and_then(|parent| parent.strip_prefix(input_dir).ok())
                    .unwrap_or_else(|| Path::new(""));
                job = job.with_output_dir(dir.join(relative));
            }

            let result = self.run(&job).await;
            match &result {
                Ok(_) => info!("Successfully processed: {}", video_path.display()),
                Err(e) => warn!("Failed to process {} during {}: {}", video_path.display(), e.stage(), e),
            }
            results.push((video_path, result));
        }

        Ok(results)
    }

    /// Extract the audio track of a video to a caller-chosen waveform file
    pub async fn extract_audio<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        video_path: P,
        audio_path: Q,
    ) -> Result<()> {
        let video_path = video_path.as_ref();
        Job::new(video_path, ModelSize::default()).validate()?;

        self.media.extract_audio(video_path, audio_path.as_ref()).await
            .map_err(|e| e.within(JamakError::Extraction))
    }

    fn resolve_output(&self, job: &Job) -> Result<(PathBuf, String)> {
        let stem = job.video_path.file_stem()
            .ok_or_else(|| JamakError::Config("Invalid video filename".to_string()))?
            .to_string_lossy()
            .to_string();

        let output_dir = match &job.output_dir {
            Some(dir) => dir.clone(),
            None => job.video_path.parent()
                .map(Path::to_path_buf)
                .unwrap_or_default(),
        };

        Ok((output_dir, stem))
    }

    async fn translate_and_write(
        &self,
        transcription: &Transcription,
        output_dir: &Path,
        stem: &str,
    ) -> Result<Vec<SubtitleOutput>> {
        let source_language = &self.config.transcriber.source_language;

        let mut writers = Vec::with_capacity(self.config.translate.target_languages.len());
        for language in &self.config.translate.target_languages {
            let path = output_dir.join(format!("{}_{}.srt", stem, language));
            writers.push((language.as_str(), SrtWriter::create(path).await?));
        }

        let total = transcription.segments.len();
        let mut emitted = 0;

        for (position, segment) in transcription.segments.iter().enumerate() {
            let Some(text) = segment.spoken_text() else {
                debug!("Skipping blank segment {}/{}", position + 1, total);
                continue;
            };

            info!("┌─ Translating segment {}/{} ────────", position + 1, total);
            info!("│ Source: {}", text);

            let mut translations = Vec::with_capacity(writers.len());
            for (language, _) in &writers {
                let translated = self.translator.translate(text, source_language, language).await
                    .map_err(|e| e.within(JamakError::Translation))?;
                info!("│ {}: {}", language, translated);
                translations.push(normalize_text(&translated));
            }
            info!("└─────────────────────────────────────");

            emitted += 1;
            for ((_, writer), translated) in writers.iter_mut().zip(translations) {
                let entry = SubtitleEntry::new(emitted, segment.start, segment.end, translated);
                writer.write_entry(&entry).await?;
            }
        }

        let mut outputs = Vec::with_capacity(writers.len());
        for (language, writer) in writers {
            let (path, entries) = writer.finish().await?;
            outputs.push(SubtitleOutput {
                language: language.to_string(),
                path,
                entries,
            });
        }

        Ok(outputs)
    }
}

/// Drop blank lines so translated text cannot terminate an SRT block early
fn normalize_text(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Fail with `NotFound` unless `dir` is an existing directory
pub fn check_input_dir<P: AsRef<Path>>(dir: P) -> Result<()> {
    let dir = dir.as_ref();
    if dir.is_dir() {
        Ok(())
    } else {
        Err(JamakError::NotFound(format!("{} is not a directory", dir.display())))
    }
}

/// Video files under `dir`, sorted by path
pub fn find_videos<P: AsRef<Path>>(dir: P) -> Vec<PathBuf> {
    let mut videos: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            entry.path()
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| VIDEO_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        })
        .map(|entry| entry.path().to_path_buf())
        .collect();

    videos.sort();
    videos
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::MockMediaProcessorTrait;
    use crate::subtitle::parse_srt;
    use crate::transcribe::{LoadedModel, MockTranscriberTrait};
    use crate::transcription::Segment;
    use crate::translate::MockTranslator;

    fn media_writing_wav() -> MockMediaProcessorTrait {
        let mut media = MockMediaProcessorTrait::new();
        media.expect_extract_audio()
            .times(1)
            .returning(|_video, audio| {
                std::fs::write(audio, b"RIFF\0\0\0\0WAVE")?;
                Ok(())
            });
        media
    }

    fn transcriber_returning(segments: Vec<Segment>) -> MockTranscriberTrait {
        let mut transcriber = MockTranscriberTrait::new();
        transcriber.expect_load_model()
            .returning(|size| Ok(LoadedModel { size, location: size.name().to_string() }));
        transcriber.expect_transcribe()
            .withf(|_, _, options| options.language == "ko" && options.word_timestamps)
            .returning(move |_, _, _| Ok(Transcription::new(segments.clone(), "ko")));
        transcriber
    }

    fn dictionary_translator() -> MockTranslator {
        let mut translator = MockTranslator::new();
        translator.expect_translate()
            .returning(|text, source, target| {
                assert_eq!(source, "ko");
                let translated = match (text, target) {
                    ("안녕하세요", "en") => "Hello",
                    ("안녕하세요", "ru") => "Здравствуйте",
                    ("감사합니다", "en") => "Thank you",
                    ("감사합니다", "ru") => "Спасибо",
                    _ => return Ok(format!("[{}] {}", target, text)),
                };
                Ok(translated.to_string())
            });
        translator
    }

    fn pipeline(
        media: MockMediaProcessorTrait,
        transcriber: MockTranscriberTrait,
        translator: MockTranslator,
    ) -> Pipeline {
        Pipeline::with_components(
            Config::default(),
            Box::new(media),
            Box::new(transcriber),
            Box::new(translator),
        )
    }

    fn video_in(dir: &Path) -> PathBuf {
        let video = dir.join("clip.mp4");
        std::fs::write(&video, b"not really a video").unwrap();
        video
    }

    fn dir_entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        names
    }

    #[tokio::test]
    async fn test_two_segment_video() {
        let dir = tempfile::tempdir().unwrap();
        let video = video_in(dir.path());

        let pipeline = pipeline(
            media_writing_wav(),
            transcriber_returning(vec![
                Segment::new(0.0, 1.5, "안녕하세요"),
                Segment::new(5.0, 6.2, "감사합니다"),
            ]),
            dictionary_translator(),
        );

        let output = pipeline.run(&Job::new(&video, ModelSize::Base)).await.unwrap();

        assert_eq!(output.segments, 2);
        assert_eq!(output.skipped, 0);
        assert_eq!(output.subtitles.len(), 2);
        assert_eq!(output.subtitles[0].path, dir.path().join("clip_en.srt"));
        assert_eq!(output.subtitles[1].path, dir.path().join("clip_ru.srt"));

        let en = std::fs::read_to_string(dir.path().join("clip_en.srt")).unwrap();
        assert_eq!(
            en,
            "1\n00:00:00,000 --> 00:00:01,500\nHello\n\n\
             2\n00:00:05,000 --> 00:00:06,200\nThank you\n\n"
        );
        let ru = std::fs::read_to_string(dir.path().join("clip_ru.srt")).unwrap();
        assert_eq!(
            ru,
            "1\n00:00:00,000 --> 00:00:01,500\nЗдравствуйте\n\n\
             2\n00:00:05,000 --> 00:00:06,200\nСпасибо\n\n"
        );

        assert!(!dir.path().join("clip_temp_audio.wav").exists());
        assert_eq!(dir_entries(dir.path()), vec!["clip.mp4", "clip_en.srt", "clip_ru.srt"]);
    }

    #[tokio::test]
    async fn test_blank_segments_do_not_consume_indices() {
        let dir = tempfile::tempdir().unwrap();
        let video = video_in(dir.path());

        let segments = vec![
            Segment::new(0.0, 1.0, "하나"),
            Segment::new(1.0, 2.0, "   "),
            Segment::new(2.0, 3.0, "둘"),
            Segment::new(3.0, 4.0, ""),
            Segment::new(4.0, 5.0, "\n\t"),
            Segment::new(5.0, 6.0, " 셋 "),
        ];

        let mut translator = MockTranslator::new();
        translator.expect_translate()
            .times(6)
            .returning(|text, _, target| Ok(format!("{}-{}", target, text)));

        let pipeline = pipeline(media_writing_wav(), transcriber_returning(segments), translator);
        let output = pipeline.run(&Job::new(&video, ModelSize::Tiny)).await.unwrap();

        assert_eq!(output.skipped, 3);
        for subtitle in &output.subtitles {
            assert_eq!(subtitle.entries, 3);

            let content = std::fs::read_to_string(&subtitle.path).unwrap();
            let entries = parse_srt(&content);
            let indices: Vec<usize> = entries.iter().map(|e| e.index).collect();
            assert_eq!(indices, vec![1, 2, 3]);
            assert_eq!(entries[2].start, 5.0);
            assert_eq!(entries[2].text, format!("{}-셋", subtitle.language));
        }
    }

    #[tokio::test]
    async fn test_missing_video_creates_nothing() {
        let dir = tempfile::tempdir().unwrap();

        let mut media = MockMediaProcessorTrait::new();
        media.expect_extract_audio().times(0);
        let mut transcriber = MockTranscriberTrait::new();
        transcriber.expect_load_model().times(0);

        let pipeline = pipeline(media, transcriber, MockTranslator::new());
        let result = pipeline.run(&Job::new(dir.path().join("missing.mp4"), ModelSize::Base)).await;

        assert!(matches!(result, Err(JamakError::NotFound(_))));
        assert!(dir_entries(dir.path()).is_empty());
    }

    #[tokio::test]
    async fn test_extraction_failure_removes_partial_audio() {
        let dir = tempfile::tempdir().unwrap();
        let video = video_in(dir.path());

        let mut media = MockMediaProcessorTrait::new();
        media.expect_extract_audio()
            .returning(|_, audio| {
                std::fs::write(audio, b"RIFF")?;
                Err(JamakError::Extraction("Invalid data found when processing input".to_string()))
            });
        let mut transcriber = MockTranscriberTrait::new();
        transcriber.expect_load_model().times(0);

        let pipeline = pipeline(media, transcriber, MockTranslator::new());
        let result = pipeline.run(&Job::new(&video, ModelSize::Base)).await;

        assert!(matches!(result, Err(JamakError::Extraction(_))));
        assert_eq!(dir_entries(dir.path()), vec!["clip.mp4"]);
    }

    #[tokio::test]
    async fn test_model_load_failure_cleans_up() {
        let dir = tempfile::tempdir().unwrap();
        let video = video_in(dir.path());

        let mut transcriber = MockTranscriberTrait::new();
        transcriber.expect_load_model()
            .returning(|size| Err(JamakError::ModelLoad(format!("{} unavailable", size))));
        transcriber.expect_transcribe().times(0);

        let pipeline = pipeline(media_writing_wav(), transcriber, MockTranslator::new());
        let result = pipeline.run(&Job::new(&video, ModelSize::Large)).await;

        assert!(matches!(result, Err(JamakError::ModelLoad(_))));
        assert_eq!(dir_entries(dir.path()), vec!["clip.mp4"]);
    }

    #[tokio::test]
    async fn test_transcription_failure_cleans_up() {
        let dir = tempfile::tempdir().unwrap();
        let video = video_in(dir.path());

        let mut transcriber = MockTranscriberTrait::new();
        transcriber.expect_load_model()
            .returning(|size| Ok(LoadedModel { size, location: size.name().to_string() }));
        transcriber.expect_transcribe()
            .returning(|_, _, _| Err(JamakError::Json(serde_json::from_str::<u8>("x").unwrap_err())));

        let pipeline = pipeline(media_writing_wav(), transcriber, MockTranslator::new());
        let result = pipeline.run(&Job::new(&video, ModelSize::Base)).await;

        assert!(matches!(result, Err(JamakError::Transcription(_))));
        assert_eq!(dir_entries(dir.path()), vec!["clip.mp4"]);
    }

    #[tokio::test]
    async fn test_translation_failure_keeps_earlier_entries() {
        let dir = tempfile::tempdir().unwrap();
        let video = video_in(dir.path());

        let segments = vec![
            Segment::new(0.0, 1.0, "하나"),
            Segment::new(1.0, 2.0, " "),
            Segment::new(2.0, 3.0, "둘"),
            Segment::new(3.0, 4.0, "셋"),
            Segment::new(4.0, 5.0, "넷"),
        ];

        // Third spoken segment fails on its Russian translation
        let mut translator = MockTranslator::new();
        translator.expect_translate()
            .returning(|text, _, target| {
                if text == "셋" && target == "ru" {
                    Err(JamakError::Translation("503 Service Unavailable".to_string()))
                } else {
                    Ok(format!("{}-{}", target, text))
                }
            });

        let pipeline = pipeline(media_writing_wav(), transcriber_returning(segments), translator);
        let result = pipeline.run(&Job::new(&video, ModelSize::Base)).await;

        assert!(matches!(result, Err(JamakError::Translation(_))));
        assert!(!dir.path().join("clip_temp_audio.wav").exists());

        for language in ["en", "ru"] {
            let content = std::fs::read_to_string(dir.path().join(format!("clip_{}.srt", language))).unwrap();
            let entries = parse_srt(&content);
            assert_eq!(entries.len(), 2);
            assert_eq!(entries[1].index, 2);
            assert_eq!(entries[1].text, format!("{}-둘", language));
        }
    }

    #[tokio::test]
    async fn test_output_dir_override() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("subs");
        let video = video_in(dir.path());

        let mut media = MockMediaProcessorTrait::new();
        let expected_audio = out.join("clip_temp_audio.wav");
        media.expect_extract_audio()
            .withf(move |_, audio| audio == expected_audio.as_path())
            .returning(|_, audio| {
                std::fs::write(audio, b"RIFF")?;
                Ok(())
            });

        let pipeline = pipeline(
            media,
            transcriber_returning(vec![Segment::new(0.0, 1.5, "안녕하세요")]),
            dictionary_translator(),
        );
        let output = pipeline.run(&Job::new(&video, ModelSize::Base).with_output_dir(&out)).await.unwrap();

        assert_eq!(output.subtitles[0].path, out.join("clip_en.srt"));
        assert_eq!(dir_entries(&out), vec!["clip_en.srt", "clip_ru.srt"]);
    }

    #[tokio::test]
    async fn test_multiline_translation_stays_in_one_block() {
        let dir = tempfile::tempdir().unwrap();
        let video = video_in(dir.path());

        let mut translator = MockTranslator::new();
        translator.expect_translate()
            .returning(|_, _, _| Ok("Hello\n\nthere".to_string()));

        let pipeline = pipeline(
            media_writing_wav(),
            transcriber_returning(vec![
                Segment::new(0.0, 1.0, "안녕"),
                Segment::new(1.0, 2.0, "안녕"),
            ]),
            translator,
        );
        pipeline.run(&Job::new(&video, ModelSize::Base)).await.unwrap();

        let content = std::fs::read_to_string(dir.path().join("clip_en.srt")).unwrap();
        let entries = parse_srt(&content);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].text, "Hello\nthere");
    }

    #[tokio::test]
    async fn test_run_directory_continues_after_failure() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.mp4"), b"video").unwrap();
        std::fs::write(dir.path().join("b.mkv"), b"video").unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"text").unwrap();

        let mut media = MockMediaProcessorTrait::new();
        media.expect_extract_audio()
            .times(2)
            .returning(|video, audio| {
                if video.extension().is_some_and(|ext| ext == "mp4") {
                    return Err(JamakError::Extraction("no audio stream".to_string()));
                }
                std::fs::write(audio, b"RIFF")?;
                Ok(())
            });

        let pipeline = pipeline(
            media,
            transcriber_returning(vec![Segment::new(0.0, 1.5, "안녕하세요")]),
            dictionary_translator(),
        );
        let results = pipeline.run_directory(dir.path(), ModelSize::Base, None).await.unwrap();

        assert_eq!(results.len(), 2);
        assert!(matches!(results[0].1, Err(JamakError::Extraction(_))));
        assert!(results[1].1.is_ok());
        assert!(dir.path().join("b_en.srt").exists());
        assert!(!dir.path().join("a_en.srt").exists());
    }

    #[tokio::test]
    async fn test_run_directory_keeps_subfolders_under_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("videos");
        let out = dir.path().join("subs");
        for season in ["s1", "s2"] {
            std::fs::create_dir_all(input.join(season)).unwrap();
            std::fs::write(input.join(season).join("ep01.mp4"), b"video").unwrap();
        }

        let mut media = MockMediaProcessorTrait::new();
        media.expect_extract_audio()
            .times(2)
            .returning(|_, audio| {
                std::fs::write(audio, b"RIFF")?;
                Ok(())
            });

        let mut translator = MockTranslator::new();
        translator.expect_translate()
            .returning(|text, _, target| Ok(format!("{}-{}", target, text)));

        let pipeline = pipeline(
            media,
            transcriber_returning(vec![Segment::new(0.0, 1.0, "하나")]),
            translator,
        );
        let results = pipeline.run_directory(&input, ModelSize::Base, Some(out.as_path())).await.unwrap();

        assert!(results.iter().all(|(_, result)| result.is_ok()));
        assert_eq!(dir_entries(&out.join("s1")), vec!["ep01_en.srt", "ep01_ru.srt"]);
        assert_eq!(dir_entries(&out.join("s2")), vec!["ep01_en.srt", "ep01_ru.srt"]);
    }

    #[test]
    fn test_inputs_checked_before_any_work() {
        let dir = tempfile::tempdir().unwrap();
        let video = video_in(dir.path());

        assert!(Job::new(&video, ModelSize::Base).validate().is_ok());
        assert!(matches!(
            Job::new(dir.path().join("missing.mp4"), ModelSize::Base).validate(),
            Err(JamakError::NotFound(_))
        ));

        assert!(check_input_dir(dir.path()).is_ok());
        assert!(matches!(check_input_dir(&video), Err(JamakError::NotFound(_))));
        assert!(matches!(check_input_dir(dir.path().join("nope")), Err(JamakError::NotFound(_))));
    }

    #[test]
    fn test_find_videos_filters_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("season1")).unwrap();
        std::fs::write(dir.path().join("season1").join("ep01.MKV"), b"").unwrap();
        std::fs::write(dir.path().join("clip.mp4"), b"").unwrap();
        std::fs::write(dir.path().join("clip_en.srt"), b"").unwrap();

        let videos = find_videos(dir.path());
        assert_eq!(videos, vec![dir.path().join("clip.mp4"), dir.path().join("season1").join("ep01.MKV")]);
    }

    #[test]
    fn test_temp_audio_removed_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip_temp_audio.wav");
        std::fs::write(&path, b"RIFF").unwrap();

        {
            let guard = TempAudio::new(&path);
            assert!(guard.path().exists());
        }
        assert!(!path.exists());

        // Never created: dropping is a no-op
        drop(TempAudio::new(dir.path().join("never.wav")));
    }
}
