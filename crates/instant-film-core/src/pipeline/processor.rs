//! Pipeline orchestration: validate, decode, resample, style, encode.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use rand::Rng;

use crate::config::Config;
use crate::effects::EffectStack;
use crate::error::{PipelineError, PipelineResult};
use crate::types::{output_file_name, InputFile, ProcessedResult, ProcessingRequest, ResultId};

use super::decode::{format_to_string, ImageDecoder};
use super::encode::encode_png;
use super::resample::Resampler;
use super::validate::Validator;

static NEXT_RESULT_ID: AtomicU64 = AtomicU64::new(1);

fn next_result_id() -> ResultId {
    ResultId(NEXT_RESULT_ID.fetch_add(1, Ordering::Relaxed))
}

/// Turns input files into styled, PNG-encoded results.
pub struct FilmProcessor {
    decoder: ImageDecoder,
    validator: Validator,
}

impl FilmProcessor {
    /// Create a new processor with the given configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            decoder: ImageDecoder::new(config.limits.clone()),
            validator: Validator::new(config.limits.clone()),
        }
    }

    /// Validate and decode a raw file, then style it off the async executor.
    ///
    /// Either a complete result is returned or nothing is.
    pub async fn process_file(
        &self,
        file: InputFile,
        monochrome: bool,
    ) -> PipelineResult<ProcessedResult> {
        let start = std::time::Instant::now();
        tracing::debug!("Processing: {}", file.name);

        self.validator.validate(&file)?;

        let decode_start = std::time::Instant::now();
        let InputFile { name, bytes } = file;
        let decoded = self.decoder.decode_from_bytes(bytes, &name).await?;
        tracing::trace!(
            "  Decode ({}): {:?}",
            format_to_string(decoded.format),
            decode_start.elapsed()
        );

        let request = ProcessingRequest::new(name.clone(), decoded.image, monochrome);
        let result = tokio::task::spawn_blocking(move || Self::process(request))
            .await
            .map_err(|e| PipelineError::Encode {
                name: name.clone(),
                message: format!("Task join error: {}", e),
            })??;

        tracing::debug!(
            "Processed {} -> {} in {:?} ({}x{})",
            name,
            result.file_name,
            start.elapsed(),
            result.width,
            result.height
        );
        Ok(result)
    }

    /// Style a decoded request using the thread-local random source.
    pub fn process(request: ProcessingRequest) -> PipelineResult<ProcessedResult> {
        Self::process_with_rng(request, &mut rand::thread_rng())
    }

    /// Style a decoded request with an explicit random source.
    pub fn process_with_rng<R: Rng + ?Sized>(
        request: ProcessingRequest,
        rng: &mut R,
    ) -> PipelineResult<ProcessedResult> {
        let (original_name, source, monochrome) = request.into_parts();
        let (width, height) = source.dimensions();

        let resample_start = std::time::Instant::now();
        let mut frame = Resampler::resize(&source, width, height)?;
        drop(source);
        tracing::trace!("  Resample: {:?}", resample_start.elapsed());

        let effects_start = std::time::Instant::now();
        EffectStack::monochrome(monochrome).apply(&mut frame, rng);
        tracing::trace!("  Effects: {:?}", effects_start.elapsed());

        let file_name = output_file_name(&original_name);
        let encode_start = std::time::Instant::now();
        let bytes = encode_png(&frame, &file_name)?;
        tracing::trace!("  Encode: {:?}", encode_start.elapsed());

        Ok(ProcessedResult {
            id: next_result_id(),
            file_name,
            bytes: Arc::from(bytes),
            width: frame.width(),
            height: frame.height(),
            monochrome,
        })
    }
}
