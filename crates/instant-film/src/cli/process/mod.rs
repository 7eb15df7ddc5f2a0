//! The `instant-film process` command.

mod progress;
pub mod types;

pub use types::OutputFormat;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Args;
use instant_film_core::types::count_label;
use instant_film_core::{
    ArchivePackager, BatchCoordinator, Config, FileDiscovery, FilmProcessor, InputFile,
    MonochromeToggle, RecordWriter,
};

use progress::{print_summary, ProgressObserver};

/// Arguments for the `process` command.
#[derive(Args, Debug)]
pub struct ProcessArgs {
    /// Photos or directories to process
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Develop in black and white instead of color film
    #[arg(short, long)]
    pub monochrome: bool,

    /// Directory for styled photos (defaults to `output.dir` from config)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also bundle every styled photo into one ZIP archive
    #[arg(short, long)]
    pub archive: bool,

    /// Format of the result records printed to stdout
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: OutputFormat,
}

/// Manual Default impl for constructing ProcessArgs outside of clap.
///
/// Values match the clap `#[arg(default_value = ...)]` annotations above.
impl Default for ProcessArgs {
    fn default() -> Self {
        Self {
            paths: Vec::new(),
            monochrome: false,
            output: None,
            archive: false,
            format: OutputFormat::Json,
        }
    }
}

/// Execute the process command.
pub async fn execute(args: ProcessArgs, config: Config) -> anyhow::Result<()> {
    if let Some(missing) = args.paths.iter().find(|path| !path.exists()) {
        anyhow::bail!(
            "Input path does not exist: {:?}\n\n  Hint: Check the file path and try again.",
            missing
        );
    }

    let discovery = FileDiscovery::new(config.processing.clone());
    let discovered = discovery.discover_all(&args.paths);
    if discovered.is_empty() {
        tracing::warn!("No supported image files found in {:?}", args.paths);
        return Ok(());
    }
    tracing::info!(
        "{} ({:.1} MB)",
        count_label(discovered.len()),
        FileDiscovery::total_size(&discovered) as f64 / 1_000_000.0
    );

    let inputs: Vec<InputFile> = discovered
        .iter()
        .filter_map(|file| match file.read() {
            Ok(input) => Some(input),
            Err(e) => {
                tracing::warn!("Skipping {:?}: {}", file.path, e);
                None
            }
        })
        .collect();

    let output_dir = args.output.clone().unwrap_or_else(|| config.output_dir());
    std::fs::create_dir_all(&output_dir)?;

    let toggle = MonochromeToggle::new(args.monochrome || config.processing.monochrome);
    let coordinator = BatchCoordinator::new(
        FilmProcessor::new(&config),
        toggle,
        Arc::new(ProgressObserver::new(inputs.len() as u64)),
    );

    let start_time = std::time::Instant::now();
    let summary = coordinator.submit(inputs).wait().await;
    let elapsed = start_time.elapsed();

    let written = write_results(&coordinator, &output_dir)?;
    write_records(&coordinator, args.format)?;

    if args.archive {
        let archive_path = output_dir.join(&config.output.archive_name);
        if write_archive(&coordinator, &archive_path)? {
            tracing::info!("Archive written to {:?}", archive_path);
        } else {
            tracing::warn!("Nothing to archive: no photo was styled");
        }
    }

    print_summary(&summary, written, elapsed);
    Ok(())
}

/// Save each styled photo into `dir`, returning how many were written.
///
/// Repeated output names get the same ` (n)` suffix the archive uses.
fn write_results(coordinator: &BatchCoordinator, dir: &Path) -> anyhow::Result<usize> {
    let entries = coordinator.entries();
    let names = ArchivePackager::entry_names(&entries);

    let mut written = 0;
    for (entry, name) in entries.iter().zip(names) {
        let Some(download) = coordinator.download_one(entry.id) else {
            continue;
        };
        std::fs::write(dir.join(&name), &download.bytes)?;
        tracing::debug!("Saved {} as {}", download.file_name, name);
        written += 1;
    }
    Ok(written)
}

/// Print one record per styled photo to stdout.
fn write_records(coordinator: &BatchCoordinator, format: OutputFormat) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    let mut writer = RecordWriter::new(stdout.lock(), format.into());
    for entry in coordinator.entries() {
        writer.record(&entry)?;
    }
    writer.finish()?;
    Ok(())
}

/// Write the bundled archive to `path`. Returns false if there was nothing to bundle.
fn write_archive(coordinator: &BatchCoordinator, path: &Path) -> anyhow::Result<bool> {
    match coordinator.download_archive()? {
        Some(download) => {
            std::fs::write(path, &download.bytes)?;
            Ok(true)
        }
        None => Ok(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use instant_film_core::pipeline::encode_png;
    use instant_film_core::{NoopObserver, RasterImage};

    fn png(width: u32, height: u32) -> Vec<u8> {
        encode_png(&RasterImage::new(width, height), "fixture.png").unwrap()
    }

    async fn styled(files: Vec<InputFile>) -> BatchCoordinator {
        let coordinator = BatchCoordinator::new(
            FilmProcessor::new(&Config::default()),
            MonochromeToggle::new(false),
            Arc::new(NoopObserver),
        );
        coordinator.submit(files).wait().await;
        coordinator
    }

    #[test]
    fn process_args_default_format_is_json() {
        let args = ProcessArgs::default();
        assert!(matches!(args.format, OutputFormat::Json));
    }

    #[test]
    fn process_args_default_bool_flags_are_false() {
        let args = ProcessArgs::default();
        assert!(!args.monochrome);
        assert!(!args.archive);
        assert!(args.output.is_none());
        assert!(args.paths.is_empty());
    }

    #[tokio::test]
    async fn write_results_keeps_colliding_names() {
        let coordinator = styled(vec![
            InputFile::new("beach.jpg", png(6, 4)),
            InputFile::new("beach.png", png(4, 6)),
        ])
        .await;
        let dir = tempfile::tempdir().unwrap();

        let written = write_results(&coordinator, dir.path()).unwrap();

        assert_eq!(written, 2);
        assert!(dir.path().join("instant-film-beach.png").exists());
        assert!(dir.path().join("instant-film-beach (2).png").exists());
    }

    #[tokio::test]
    async fn write_archive_skips_empty_batch() {
        let coordinator = styled(vec![InputFile::new("notes.txt", b"not an image".to_vec())]).await;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photos.zip");

        assert!(!write_archive(&coordinator, &path).unwrap());
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn write_archive_writes_zip() {
        let coordinator = styled(vec![InputFile::new("a.png", png(3, 3))]).await;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photos.zip");

        assert!(write_archive(&coordinator, &path).unwrap());
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..4], b"PK\x03\x04");
    }
}
