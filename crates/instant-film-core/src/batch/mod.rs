//! Batch coordination: fan files out to the pipeline, collect what succeeds.
//!
//! A submission spawns one task per file and a supervisor that waits for all
//! of them. Successful results are appended to the shared [`Batch`] under a
//! mutex and announced to a [`BatchObserver`]; failures are logged and
//! dropped. The presentation layer drives everything else through explicit
//! commands: [`BatchCoordinator::remove`], [`BatchCoordinator::download_one`]
//! and [`BatchCoordinator::download_archive`].

mod store;

pub use store::Batch;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::task::{JoinHandle, JoinSet};

use crate::archive::ArchivePackager;
use crate::config::DEFAULT_ARCHIVE_NAME;
use crate::error::ArchiveError;
use crate::pipeline::FilmProcessor;
use crate::types::{count_label, Download, InputFile, ProcessedResult, ResultId};

/// Receives batch progress.
///
/// Callbacks run while the batch lock is held, so that a notification can
/// never belong to a batch that has already been replaced. Implementations
/// must not call back into the coordinator.
pub trait BatchObserver: Send + Sync {
    /// A file finished and was added to the current batch.
    fn on_result(&self, _result: &ProcessedResult) {}

    /// Every file of the current batch has settled.
    fn on_batch_complete(&self, _summary: &BatchSummary) {}
}

/// Observer that ignores everything.
pub struct NoopObserver;

impl BatchObserver for NoopObserver {}

/// Outcome of one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchSummary {
    pub generation: u64,
    pub submitted: usize,
    /// Results that made it into the batch
    pub succeeded: usize,
    pub failed: usize,
    /// Results discarded because a newer batch had started
    pub discarded: usize,
}

/// Shared monochrome switch, read by each file as it starts processing.
#[derive(Debug, Clone, Default)]
pub struct MonochromeToggle(Arc<AtomicBool>);

impl MonochromeToggle {
    pub fn new(monochrome: bool) -> Self {
        Self(Arc::new(AtomicBool::new(monochrome)))
    }

    pub fn set(&self, monochrome: bool) {
        self.0.store(monochrome, Ordering::Relaxed);
    }

    pub fn get(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Awaitable completion of one submission.
pub struct BatchHandle {
    generation: u64,
    submitted: usize,
    batch: Arc<Mutex<Batch>>,
    task: Option<JoinHandle<BatchSummary>>,
}

impl BatchHandle {
    /// Generation of the submission, or 0 if nothing was submitted.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Wait until every file of the submission has settled.
    pub async fn wait(self) -> BatchSummary {
        let Some(task) = self.task else {
            return BatchSummary::default();
        };
        match task.await {
            Ok(summary) => summary,
            Err(e) => {
                tracing::error!("Batch {} supervisor failed: {}", self.generation, e);
                settle_abandoned(&self.batch, self.generation, self.submitted)
            }
        }
    }
}

/// Close out a generation whose supervisor died, counting what it left behind.
///
/// Results already appended stay in the batch and count as succeeded; every
/// other file counts as failed. A superseded generation is left alone.
fn settle_abandoned(batch: &Mutex<Batch>, generation: u64, submitted: usize) -> BatchSummary {
    let mut guard = lock(batch);
    let succeeded = if guard.finish(generation) {
        guard.len()
    } else {
        0
    };
    BatchSummary {
        generation,
        submitted,
        succeeded,
        failed: submitted.saturating_sub(succeeded),
        discarded: 0,
    }
}

/// Owns the batch and runs submissions against it.
pub struct BatchCoordinator {
    processor: Arc<FilmProcessor>,
    batch: Arc<Mutex<Batch>>,
    toggle: MonochromeToggle,
    observer: Arc<dyn BatchObserver>,
}

impl BatchCoordinator {
    pub fn new(
        processor: FilmProcessor,
        toggle: MonochromeToggle,
        observer: Arc<dyn BatchObserver>,
    ) -> Self {
        Self {
            processor: Arc::new(processor),
            batch: Arc::new(Mutex::new(Batch::new())),
            toggle,
            observer,
        }
    }

    /// The toggle files read when they start processing.
    pub fn toggle(&self) -> &MonochromeToggle {
        &self.toggle
    }

    /// Start processing `files` as a new batch.
    ///
    /// The previous batch is cleared and any of its still-running files are
    /// ignored when they finish. Submitting no files changes nothing.
    /// Must be called from within a Tokio runtime.
    pub fn submit(&self, files: Vec<InputFile>) -> BatchHandle {
        if files.is_empty() {
            return BatchHandle {
                generation: 0,
                submitted: 0,
                batch: Arc::clone(&self.batch),
                task: None,
            };
        }

        let submitted = files.len();
        let generation = lock(&self.batch).begin();
        tracing::info!("Batch {}: {}", generation, count_label(submitted));

        let processor = Arc::clone(&self.processor);
        let batch = Arc::clone(&self.batch);
        let toggle = self.toggle.clone();
        let observer = Arc::clone(&self.observer);

        let task = tokio::spawn(async move {
            let mut tasks = JoinSet::new();
            for file in files {
                let processor = Arc::clone(&processor);
                let toggle = toggle.clone();
                tasks.spawn(async move {
                    let name = file.name.clone();
                    let monochrome = toggle.get();
                    (name, processor.process_file(file, monochrome).await)
                });
            }

            let mut summary = BatchSummary {
                generation,
                submitted,
                ..BatchSummary::default()
            };
            while let Some(joined) = tasks.join_next().await {
                match joined {
                    Ok((_, Ok(result))) => {
                        let mut guard = lock(&batch);
                        let file_name = result.file_name.clone();
                        if guard.append(generation, result) {
                            if let Some(added) = guard.entries().last() {
                                observer.on_result(added);
                            }
                            summary.succeeded += 1;
                        } else {
                            tracing::debug!(
                                "Discarding {} from superseded batch {}",
                                file_name,
                                generation
                            );
                            summary.discarded += 1;
                        }
                    }
                    Ok((name, Err(e))) => {
                        tracing::warn!("Skipping {}: {}", name, e);
                        summary.failed += 1;
                    }
                    Err(e) => {
                        tracing::error!("Processing task failed: {}", e);
                        summary.failed += 1;
                    }
                }
            }

            let mut guard = lock(&batch);
            if guard.finish(generation) {
                tracing::info!(
                    "Batch {} complete: {} succeeded, {} failed",
                    generation,
                    summary.succeeded,
                    summary.failed
                );
                observer.on_batch_complete(&summary);
            } else {
                tracing::debug!("Batch {} settled after being superseded", generation);
            }
            summary
        });

        BatchHandle {
            generation,
            submitted,
            batch: Arc::clone(&self.batch),
            task: Some(task),
        }
    }

    /// Remove a result. Returns false if it was not present.
    pub fn remove(&self, id: ResultId) -> bool {
        lock(&self.batch).remove(id).is_some()
    }

    /// Remove the first result with the given output filename.
    pub fn remove_by_name(&self, file_name: &str) -> bool {
        lock(&self.batch).remove_by_name(file_name).is_some()
    }

    /// Drop every result of the current batch.
    pub fn clear(&self) {
        lock(&self.batch).clear();
    }

    /// Snapshot of the current results in insertion order.
    pub fn entries(&self) -> Vec<ProcessedResult> {
        lock(&self.batch).entries().to_vec()
    }

    pub fn len(&self) -> usize {
        lock(&self.batch).len()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.batch).is_empty()
    }

    pub fn is_processing(&self) -> bool {
        lock(&self.batch).is_processing()
    }

    pub fn archive_ready(&self) -> bool {
        lock(&self.batch).archive_ready()
    }

    /// Bytes and filename of one result, if it is still in the batch.
    pub fn download_one(&self, id: ResultId) -> Option<Download> {
        lock(&self.batch).get(id).map(|result| Download {
            file_name: result.file_name.clone(),
            bytes: Arc::clone(&result.bytes),
        })
    }

    /// Package the whole batch.
    ///
    /// Returns `Ok(None)` while processing or when the batch is empty. The
    /// batch is left untouched either way, so a failed attempt can be retried.
    pub fn download_archive(&self) -> Result<Option<Download>, ArchiveError> {
        let entries = {
            let guard = lock(&self.batch);
            if !guard.archive_ready() {
                return Ok(None);
            }
            guard.entries().to_vec()
        };
        let bytes = ArchivePackager::pack(&entries)?;
        Ok(Some(Download {
            file_name: DEFAULT_ARCHIVE_NAME.to_string(),
            bytes: Arc::from(bytes),
        }))
    }
}

/// The batch holds no invariant a panicking writer could break halfway, so a
/// poisoned lock is still usable.
fn lock(batch: &Mutex<Batch>) -> MutexGuard<'_, Batch> {
    batch.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::pipeline::encode_png;
    use crate::types::{ProcessingRequest, RasterImage};
    use image::Rgba;
    use std::io::{Cursor, Read};

    #[derive(Default)]
    struct RecordingObserver {
        results: Mutex<Vec<String>>,
        completions: Mutex<Vec<BatchSummary>>,
    }

    impl BatchObserver for RecordingObserver {
        fn on_result(&self, result: &ProcessedResult) {
            self.results.lock().unwrap().push(result.file_name.clone());
        }

        fn on_batch_complete(&self, summary: &BatchSummary) {
            self.completions.lock().unwrap().push(*summary);
        }
    }

    fn png_file(name: &str, width: u32, height: u32) -> InputFile {
        let image = RasterImage::from_fn(width, height, |x, y| {
            Rgba([(x * 7 % 256) as u8, (y * 5 % 256) as u8, 60, 255])
        });
        InputFile::new(name, encode_png(&image, name).unwrap())
    }

    fn coordinator(observer: Arc<RecordingObserver>) -> BatchCoordinator {
        BatchCoordinator::new(
            FilmProcessor::new(&Config::default()),
            MonochromeToggle::default(),
            observer,
        )
    }

    #[tokio::test]
    async fn test_corrupt_file_is_dropped_from_batch() {
        let observer = Arc::new(RecordingObserver::default());
        let coordinator = coordinator(Arc::clone(&observer));

        let files = vec![
            png_file("one.png", 20, 10),
            InputFile::new("two.jpg", b"definitely not a jpeg".to_vec()),
            png_file("three.png", 12, 12),
        ];
        let summary = coordinator.submit(files).wait().await;

        assert_eq!(summary.submitted, 3);
        assert_eq!(summary.succeeded, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(coordinator.len(), 2);
        assert!(coordinator.archive_ready());
        assert!(!coordinator.is_processing());

        let mut notified = observer.results.lock().unwrap().clone();
        notified.sort();
        assert_eq!(
            notified,
            vec!["instant-film-one.png", "instant-film-three.png"]
        );
        let completions = observer.completions.lock().unwrap();
        assert_eq!(completions.len(), 1);
        assert_eq!(completions[0].succeeded, 2);
    }

    #[tokio::test]
    async fn test_empty_submission_is_noop() {
        let observer = Arc::new(RecordingObserver::default());
        let coordinator = coordinator(Arc::clone(&observer));

        let handle = coordinator.submit(Vec::new());
        assert_eq!(handle.generation(), 0);
        let summary = handle.wait().await;

        assert_eq!(summary, BatchSummary::default());
        assert!(observer.results.lock().unwrap().is_empty());
        assert!(observer.completions.lock().unwrap().is_empty());
        assert!(!coordinator.archive_ready());
        assert!(coordinator.download_archive().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_new_submission_discards_stale_results() {
        let observer = Arc::new(RecordingObserver::default());
        let coordinator = coordinator(Arc::clone(&observer));

        // On the current-thread test runtime neither batch runs before the
        // second submit, so every result of the first batch arrives stale.
        let first = coordinator.submit(vec![
            png_file("old-a.png", 16, 16),
            png_file("old-b.png", 16, 16),
        ]);
        let second = coordinator.submit(vec![png_file("new.png", 8, 8)]);

        let stale = first.wait().await;
        let fresh = second.wait().await;

        assert_eq!(stale.succeeded, 0);
        assert_eq!(stale.discarded, 2);
        assert_eq!(fresh.succeeded, 1);

        let names: Vec<_> = coordinator
            .entries()
            .into_iter()
            .map(|r| r.file_name)
            .collect();
        assert_eq!(names, vec!["instant-film-new.png"]);
        assert_eq!(*observer.results.lock().unwrap(), vec!["instant-film-new.png"]);
        assert_eq!(observer.completions.lock().unwrap().len(), 1);
        assert!(coordinator.archive_ready());
    }

    #[tokio::test]
    async fn test_remove_and_download() {
        let coordinator = coordinator(Arc::new(RecordingObserver::default()));
        coordinator
            .submit(vec![png_file("a.png", 6, 6), png_file("b.png", 6, 6)])
            .wait()
            .await;
        let entries = coordinator.entries();
        assert_eq!(entries.len(), 2);

        let first = &entries[0];
        let download = coordinator.download_one(first.id).unwrap();
        assert_eq!(download.file_name, first.file_name);
        assert_eq!(download.bytes, first.bytes);

        assert!(coordinator.remove(first.id));
        assert_eq!(coordinator.len(), 1);
        assert!(!coordinator.remove(first.id));
        assert!(!coordinator.remove_by_name("instant-film-missing.png"));
        assert_eq!(coordinator.len(), 1);
        assert!(coordinator.download_one(first.id).is_none());

        assert!(coordinator.remove_by_name(&entries[1].file_name));
        assert!(coordinator.is_empty());
        assert!(!coordinator.archive_ready());
    }

    #[tokio::test]
    async fn test_archive_contains_every_result() {
        let coordinator = coordinator(Arc::new(RecordingObserver::default()));
        coordinator
            .submit(vec![
                png_file("x.png", 9, 4),
                png_file("y.png", 4, 9),
                png_file("z.png", 5, 5),
            ])
            .wait()
            .await;

        let archive = coordinator.download_archive().unwrap().unwrap();
        assert_eq!(archive.file_name, "instant-film-photos.zip");

        let mut zip = zip::ZipArchive::new(Cursor::new(archive.bytes.to_vec())).unwrap();
        assert_eq!(zip.len(), 3);
        for result in coordinator.entries() {
            let mut entry = zip.by_name(&result.file_name).unwrap();
            let mut bytes = Vec::new();
            entry.read_to_end(&mut bytes).unwrap();
            assert_eq!(bytes.as_slice(), &*result.bytes);
        }
    }

    #[tokio::test]
    async fn test_monochrome_submission_yields_monochrome_results() {
        let coordinator = coordinator(Arc::new(RecordingObserver::default()));
        coordinator.toggle().set(true);
        coordinator
            .submit(vec![png_file("gray-a.png", 30, 30), png_file("gray-b.png", 12, 8)])
            .wait()
            .await;

        let entries = coordinator.entries();
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|r| r.monochrome));
    }

    #[tokio::test]
    async fn test_toggle_flip_between_submissions_changes_mode() {
        let coordinator = coordinator(Arc::new(RecordingObserver::default()));

        coordinator.toggle().set(true);
        coordinator
            .submit(vec![png_file("first.png", 10, 10)])
            .wait()
            .await;
        assert!(coordinator.entries()[0].monochrome);

        coordinator.toggle().set(false);
        coordinator
            .submit(vec![png_file("second.png", 10, 10)])
            .wait()
            .await;
        let entries = coordinator.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].file_name, "instant-film-second.png");
        assert!(!entries[0].monochrome);
    }

    #[tokio::test]
    async fn test_toggle_is_read_when_file_starts_not_at_submit() {
        let coordinator = coordinator(Arc::new(RecordingObserver::default()));

        // On the current-thread test runtime no file task runs before the
        // first await, so the flip after submit is what the files see.
        let handle = coordinator.submit(vec![png_file("late.png", 10, 10)]);
        coordinator.toggle().set(true);
        handle.wait().await;

        assert!(coordinator.entries()[0].monochrome);
    }

    #[test]
    fn test_settle_abandoned_counts_appended_results() {
        let batch = Mutex::new(Batch::new());
        let generation = {
            let mut guard = lock(&batch);
            let generation = guard.begin();
            let image = RasterImage::new(2, 2);
            for name in ["kept-a.png", "kept-b.png"] {
                let request = ProcessingRequest::new(name, image.clone(), false);
                let result = FilmProcessor::process(request).unwrap();
                guard.append(generation, result);
            }
            generation
        };

        let summary = settle_abandoned(&batch, generation, 5);

        assert_eq!(summary.succeeded, 2);
        assert_eq!(summary.failed, 3);
        assert!(!lock(&batch).is_processing());
        assert!(lock(&batch).archive_ready());
    }

    #[test]
    fn test_settle_abandoned_ignores_superseded_generation() {
        let batch = Mutex::new(Batch::new());
        let stale = lock(&batch).begin();
        lock(&batch).begin();

        let summary = settle_abandoned(&batch, stale, 4);

        assert_eq!(summary.succeeded, 0);
        assert_eq!(summary.failed, 4);
        assert!(lock(&batch).is_processing());
    }

    #[test]
    fn test_clear_empties_batch() {
        let coordinator = coordinator(Arc::new(RecordingObserver::default()));
        coordinator.clear();
        assert!(coordinator.is_empty());
        assert_eq!(coordinator.entries().len(), 0);
    }
}
