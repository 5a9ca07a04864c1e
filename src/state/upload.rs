/// Upload/inference workflow of the "Try the Model" view
///
/// Pure state machine; the application shell runs the async parts (file
/// reads, preview generation, the HTTP call) and feeds their outcomes back
/// here together with the token/generation they were started under.
///
/// Three counters keep late completions from clobbering newer state:
/// - `load` - file reads; only the latest requested file may be selected
/// - `selection` - previews; only the current selection's preview is kept
/// - `submission` - uploads; only the current submission's answer is kept
use super::data::{Denoised, Preview, SelectedImage};
use crate::api::ApiError;
use crate::media::loader::{self, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    ImageSelected,
    Submitting,
    Succeeded,
    Failed,
}

/// Everything a background upload needs
#[derive(Debug, Clone)]
pub struct SubmitTicket {
    pub generation: u64,
    pub image: SelectedImage,
}

#[derive(Debug)]
pub struct UploadWorkflow {
    max_file_size: u64,
    phase: Phase,
    selected: Option<SelectedImage>,
    preview: Option<Preview>,
    result: Option<Denoised>,
    error: Option<String>,
    loading: bool,
    /// A file is being dragged over the window
    drag_hover: bool,
    load: u64,
    selection: u64,
    submission: u64,
}

impl UploadWorkflow {
    pub fn new(max_file_size: u64) -> Self {
        Self {
            max_file_size,
            phase: Phase::Idle,
            selected: None,
            preview: None,
            result: None,
            error: None,
            loading: false,
            drag_hover: false,
            load: 0,
            selection: 0,
            submission: 0,
        }
    }

    pub fn max_file_size(&self) -> u64 {
        self.max_file_size
    }

    /// A file was picked or dropped and is about to be read
    pub fn begin_load(&mut self) -> u64 {
        self.load += 1;
        self.load
    }

    /// A file read finished.
    ///
    /// Returns the selection generation and image to build a preview for,
    /// or `None` when the file was superseded or rejected.
    pub fn file_loaded(
        &mut self,
        token: u64,
        loaded: Result<SelectedImage, ValidationError>,
    ) -> Option<(u64, SelectedImage)> {
        // A newer pick or drop started after this read
        if token != self.load {
            tracing::debug!(token, current = self.load, "Dropping superseded file");
            return None;
        }

        // Rejections keep the previous selection and its preview
        let image = match loaded.and_then(|image| {
            loader::validate(&image, self.max_file_size)?;
            Ok(image)
        }) {
            Ok(image) => image,
            Err(err) => {
                tracing::warn!("Rejected file: {}", err);
                self.error = Some(err.to_string());
                return None;
            }
        };

        let generation = self.select(image.clone());
        Some((generation, image))
    }

    /// Make `image` the current selection. Any in-flight submission is
    /// abandoned.
    pub fn select(&mut self, image: SelectedImage) -> u64 {
        if self.loading {
            tracing::info!("New image selected, abandoning in-flight submission");
            self.abandon_submission();
        }

        self.selection += 1;
        self.selected = Some(image);
        self.preview = None;
        self.error = None;
        self.phase = Phase::ImageSelected;
        self.selection
    }

    /// Preview generation finished. Returns false for stale previews.
    pub fn preview_ready(&mut self, generation: u64, preview: Result<Preview, String>) -> bool {
        // Preview of an image that is no longer selected
        if generation != self.selection {
            return false;
        }

        match preview {
            Ok(preview) => self.preview = Some(preview),
            Err(err) => {
                tracing::error!("Preview failed: {}", err);
                self.error = Some(format!("Could not preview image: {}", err));
            }
        }
        true
    }

    /// Start a submission. No-op (returns `None`) without a selected image
    /// or while another submission is running.
    pub fn begin_submit(&mut self) -> Option<SubmitTicket> {
        if self.loading {
            return None;
        }
        let image = self.selected.clone()?;

        self.submission += 1;
        self.loading = true;
        self.error = None;
        self.phase = Phase::Submitting;

        Some(SubmitTicket {
            generation: self.submission,
            image,
        })
    }

    /// A submission finished. Returns false for abandoned submissions.
    pub fn finish_submit(
        &mut self,
        generation: u64,
        outcome: Result<Denoised, ApiError>,
    ) -> bool {
        // Abandoned by a new selection or a reset
        if generation != self.submission || !self.loading {
            tracing::debug!(generation, current = self.submission, "Dropping stale result");
            return false;
        }
        // Loading ends here for every outcome
        self.loading = false;

        match outcome {
            Ok(denoised) => {
                self.result = Some(denoised);
                self.phase = Phase::Succeeded;
            }
            Err(err) => {
                // Previous result stays stored; the error hides it
                tracing::error!("Failed to denoise image: {}", err);
                self.error = Some(err.to_string());
                self.phase = Phase::Failed;
            }
        }
        true
    }

    /// View left: drop everything, ignore whatever is still running
    pub fn reset(&mut self) {
        self.abandon_submission();
        self.load += 1;
        self.selection += 1;
        self.phase = Phase::Idle;
        self.selected = None;
        self.preview = None;
        self.result = None;
        self.error = None;
        self.drag_hover = false;
    }

    fn abandon_submission(&mut self) {
        self.submission += 1;
        self.loading = false;
    }

    pub fn set_drag_hover(&mut self, hovering: bool) {
        self.drag_hover = hovering;
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_drag_hover(&self) -> bool {
        self.drag_hover
    }

    pub fn can_submit(&self) -> bool {
        self.selected.is_some() && !self.loading
    }

    pub fn selected(&self) -> Option<&SelectedImage> {
        self.selected.as_ref()
    }

    pub fn preview(&self) -> Option<&Preview> {
        self.preview.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The last stored result, whatever its status
    pub fn result(&self) -> Option<&Denoised> {
        self.result.as_ref()
    }

    /// The result to render: hidden while an error is showing or when the
    /// service did not report success
    pub fn visible_result(&self) -> Option<&Denoised> {
        if self.error.is_some() {
            return None;
        }
        self.result.as_ref().filter(|d| d.result.is_success())
    }
}
