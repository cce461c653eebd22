use crate::error::PipelineError;
use crate::events::{EventSender, StageEvent};
use crate::stage::Stage;
use crate::types::{SummarizeInput, SummaryOutcome, TrackingStatus};
use chrono::Local;
use scholia_context::{
    extract_key_concepts, extract_thesis, ContextDetector, GenerationRequest, SummaryHistory,
};
use scholia_extract::DocumentExtractor;
use scholia_llm::{ChatClient, ChatOptions, ChatRequest};
use scholia_persist::{default_output_path, SummaryDocument, Tracker, TrackingEntry};
use scholia_types::{
    CourseContext, ExtractedDocument, FrontMatter, SummarizerConfig, SummaryRecord, SCHEMA_VERSION,
    UNKNOWN,
};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::Instrument;
use uuid::Uuid;

/// Runs the nine stages for one reading, strictly in order.
///
/// Retries belong to the chat client; a stage that fails here ends the run.
pub struct Summarizer {
    config: Arc<SummarizerConfig>,
    extractor: Arc<dyn DocumentExtractor>,
    client: Arc<dyn ChatClient>,
}

/// Emits stage events when a listener is attached
struct Progress {
    tx: Option<EventSender>,
    started: Option<(Stage, Instant)>,
}

impl Progress {
    fn start(&mut self, stage: Stage) {
        tracing::info!("{}", stage);
        self.started = Some((stage, Instant::now()));
        self.emit(StageEvent::Started { stage });
    }

    fn complete(&mut self) {
        if let Some((stage, at)) = self.started.take() {
            let duration_ms = at.elapsed().as_millis() as u64;
            tracing::debug!(stage = ?stage, duration_ms, "Stage completed");
            self.emit(StageEvent::Completed { stage, duration_ms });
        }
    }

    fn skip(&mut self, stage: Stage, reason: &str) {
        tracing::warn!("{} skipped: {}", stage, reason);
        self.emit(StageEvent::Skipped {
            stage,
            reason: reason.to_string(),
        });
    }

    fn emit(&self, event: StageEvent) {
        if let Some(tx) = &self.tx {
            // A dropped receiver only means nobody is watching
            let _ = tx.send(event);
        }
    }
}

impl Summarizer {
    pub fn new(
        config: Arc<SummarizerConfig>,
        extractor: Arc<dyn DocumentExtractor>,
        client: Arc<dyn ChatClient>,
    ) -> Self {
        Self {
            config,
            extractor,
            client,
        }
    }

    pub fn builder() -> crate::builder::SummarizerBuilder {
        crate::builder::SummarizerBuilder::new()
    }

    pub fn config(&self) -> &SummarizerConfig {
        &self.config
    }

    pub async fn run(&self, input: SummarizeInput) -> Result<SummaryOutcome, PipelineError> {
        self.run_with_events(input, None).await
    }

    /// Run the pipeline, reporting progress on `events` if given.
    pub async fn run_with_events(
        &self,
        input: SummarizeInput,
        events: Option<EventSender>,
    ) -> Result<SummaryOutcome, PipelineError> {
        let run_id = Uuid::new_v4().to_string();
        let span = tracing::info_span!("summarize", run_id = %run_id, file = %input.pdf_path.display());

        self.execute(run_id, input, Progress { tx: events, started: None })
            .instrument(span)
            .await
    }

    async fn execute(
        &self,
        run_id: String,
        input: SummarizeInput,
        mut progress: Progress,
    ) -> Result<SummaryOutcome, PipelineError> {
        let config = &self.config;

        progress.start(Stage::Extract);
        let document = self.extractor.extract(&input.pdf_path)?;
        let pdf_path = fs::canonicalize(&input.pdf_path).unwrap_or_else(|_| input.pdf_path.clone());
        progress.complete();

        progress.start(Stage::DetectContext);
        let context = ContextDetector::new(&pdf_path)
            .with_course(input.course_override.clone())
            .with_week(input.week_override.clone())
            .with_ceiling(input.search_root.clone())
            .detect();
        progress.complete();

        let output_path = input
            .output_path
            .clone()
            .unwrap_or_else(|| default_output_path(&pdf_path));

        let history_enabled = input.enable_history.unwrap_or(config.history.enabled);
        let history = SummaryHistory::new(&context.course_folder, config.history.max_previous_summaries)
            .excluding(&output_path);
        let summary_paths = if history_enabled {
            progress.start(Stage::FindHistory);
            let paths = history.find_previous_summaries()?;
            progress.complete();
            paths
        } else {
            progress.skip(Stage::FindHistory, "history disabled");
            Vec::new()
        };

        let previous = if summary_paths.is_empty() {
            if history_enabled {
                progress.skip(Stage::ExtractHistory, "no previous summaries found");
            } else {
                progress.skip(Stage::ExtractHistory, "history disabled");
            }
            Vec::new()
        } else {
            progress.start(Stage::ExtractHistory);
            let records = history.extract_context(&summary_paths);
            progress.complete();
            records
        };

        progress.start(Stage::BuildRequest);
        let request = GenerationRequest::build(&document.text, &context, &previous, config.extraction.max_chars);
        tracing::info!(
            estimated_tokens = request.estimated_tokens(),
            previous_summaries = request.previous_summaries,
            truncated = request.truncated,
            "Generation request ready"
        );
        progress.complete();

        progress.start(Stage::Generate);
        let mut options = ChatOptions::new();
        options.temperature = config.llm.temperature;
        options.max_tokens = config.llm.max_tokens;
        let chat = ChatRequest::new(config.llm.model.clone(), request.to_messages()).with_options(options);
        let generated = self.client.chat(chat).await?;
        progress.complete();

        progress.start(Stage::Format);
        let title = reading_title(&document, &pdf_path);
        let summary = SummaryDocument::new(front_matter(&document, &context, &title, previous.len()), &generated.content)?;
        progress.complete();

        progress.start(Stage::Persist);
        let summary_path = summary.write(&output_path)?;
        progress.complete();

        let tracking = if !config.tracking.auto_update {
            progress.skip(Stage::UpdateTracking, "auto-update disabled");
            TrackingStatus::Skipped("auto-update disabled".to_string())
        } else if let Some(code) = &context.course_code {
            progress.start(Stage::UpdateTracking);
            let entry = tracking_entry(&summary, &context, &summary_path);
            let tracker = Tracker::new(code.clone(), &context.course_folder, &config.tracking.global_document_path);
            let status = match tracker.update(&entry) {
                Ok(report) => TrackingStatus::Updated(report),
                Err(e) => {
                    tracing::warn!(error = %e, "Summary saved but tracking documents were not updated");
                    TrackingStatus::Failed(e)
                }
            };
            progress.complete();
            status
        } else {
            progress.skip(Stage::UpdateTracking, "no course code detected");
            TrackingStatus::Skipped("no course code detected".to_string())
        };

        tracing::info!(path = %summary_path.display(), "Summary complete");

        Ok(SummaryOutcome {
            run_id,
            summary_path,
            context,
            previous_summaries: previous,
            tracking,
        })
    }
}

fn reading_title(document: &ExtractedDocument, pdf_path: &Path) -> String {
    let title = document.metadata.title.trim();
    if !title.is_empty() {
        return title.to_string();
    }
    pdf_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| UNKNOWN.to_string())
}

fn front_matter(
    document: &ExtractedDocument,
    context: &CourseContext,
    title: &str,
    previous_summaries: usize,
) -> FrontMatter {
    FrontMatter {
        schema_version: SCHEMA_VERSION,
        week: context.week.clone().unwrap_or_else(|| UNKNOWN.to_string()),
        title: title.to_string(),
        author: document.metadata.author_or_unknown().to_string(),
        course: context.course_code.clone().unwrap_or_else(|| UNKNOWN.to_string()),
        date: Local::now().format("%Y-%m-%d").to_string(),
        previous_summaries,
    }
}

fn tracking_entry(summary: &SummaryDocument, context: &CourseContext, summary_path: &Path) -> TrackingEntry {
    let fm = &summary.front_matter;
    let mut key_concepts = extract_key_concepts(&summary.body);
    key_concepts.truncate(SummaryRecord::MAX_KEY_CONCEPTS);

    TrackingEntry {
        week: context.week.clone().unwrap_or_else(|| UNKNOWN.to_string()),
        title: fm.title.clone(),
        author: fm.author.clone(),
        thesis: extract_thesis(&summary.body),
        key_concepts,
        summary_path: fs::canonicalize(summary_path).unwrap_or_else(|_| summary_path.to_path_buf()),
        generated_on: Local::now().date_naive(),
    }
}
