//! Progress reporting: a bar ticked per finished photo and a closing summary.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use instant_film_core::{BatchObserver, BatchSummary, ProcessedResult};

/// Ticks the progress bar as results land in the batch.
pub struct ProgressObserver {
    progress: ProgressBar,
}

impl ProgressObserver {
    pub fn new(total: u64) -> Self {
        Self {
            progress: create_progress_bar(total),
        }
    }
}

impl BatchObserver for ProgressObserver {
    fn on_result(&self, result: &ProcessedResult) {
        self.progress.inc(1);
        self.progress.set_message(result.file_name.clone());
    }

    fn on_batch_complete(&self, summary: &BatchSummary) {
        self.progress
            .finish_with_message(format!("{} styled", summary.succeeded));
    }
}

fn create_progress_bar(total: u64) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
            )
            .unwrap()
            .progress_chars("##-"),
    );
    pb.set_message("developing...");
    pb
}

/// Print a formatted summary table after the batch settles.
pub fn print_summary(summary: &BatchSummary, written: usize, elapsed: Duration) {
    let rate = if elapsed.as_secs_f64() > 0.0 {
        summary.succeeded as f64 / elapsed.as_secs_f64()
    } else {
        0.0
    };

    eprintln!();
    eprintln!("  ====================================");
    eprintln!("               Summary");
    eprintln!("  ====================================");
    eprintln!("    Styled:       {:>8}", summary.succeeded);
    if summary.failed > 0 {
        eprintln!("    Failed:       {:>8}", summary.failed);
    }
    eprintln!("    Written:      {:>8}", written);
    eprintln!("  ------------------------------------");
    eprintln!("    Total:        {:>8}", summary.submitted);
    eprintln!("    Duration:     {:>7.1}s", elapsed.as_secs_f64());
    eprintln!("    Rate:         {:>7.1} img/sec", rate);
    eprintln!("  ====================================");
}

#[cfg(test)]
mod tests {
    use super::*;
    use instant_film_core::ResultId;
    use std::sync::Arc;

    #[test]
    fn observer_ticks_once_per_result() {
        let observer = ProgressObserver::new(3);
        let result = ProcessedResult {
            id: ResultId(1),
            file_name: "instant-film-a.png".to_string(),
            bytes: Arc::from(vec![0u8]),
            width: 1,
            height: 1,
            monochrome: false,
        };
        observer.on_result(&result);
        observer.on_result(&result);
        assert_eq!(observer.progress.position(), 2);

        observer.on_batch_complete(&BatchSummary::default());
        assert!(observer.progress.is_finished());
    }
}
