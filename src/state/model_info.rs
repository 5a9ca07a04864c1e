use crate::api::{ApiError, ModelInfo};

/// Banner text shown when `/model-info` cannot be loaded
pub const LOAD_ERROR: &str = "Failed to load model information";

/// State of the model information view.
///
/// Each time the view is entered a new fetch is started under a fresh
/// epoch; answers from earlier epochs are dropped.
#[derive(Debug)]
pub struct ModelInfoState {
    info: Option<ModelInfo>,
    error: Option<String>,
    loading: bool,
    epoch: u64,
}

impl Default for ModelInfoState {
    fn default() -> Self {
        Self {
            info: None,
            error: None,
            loading: false,
            epoch: 0,
        }
    }
}

impl ModelInfoState {
    /// View entered: forget the previous record and start loading
    pub fn mount(&mut self) -> u64 {
        self.epoch += 1;
        self.info = None;
        self.error = None;
        self.loading = true;
        self.epoch
    }

    /// View left: any answer still on its way is ignored
    pub fn unmount(&mut self) {
        self.epoch += 1;
        self.loading = false;
    }

    /// Store the fetch outcome. Returns false for stale answers.
    pub fn apply(&mut self, epoch: u64, outcome: Result<ModelInfo, ApiError>) -> bool {
        if epoch != self.epoch || !self.loading {
            tracing::debug!(epoch, current = self.epoch, "Dropping stale model info");
            return false;
        }
        self.loading = false;

        match outcome {
            Ok(info) => {
                self.info = Some(info);
                self.error = None;
            }
            Err(err) => {
                tracing::error!("Failed to fetch model info: {}", err);
                self.info = Some(ModelInfo::fallback());
                self.error = Some(LOAD_ERROR.to_string());
            }
        }
        true
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn info(&self) -> Option<&ModelInfo> {
        self.info.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(name: &str) -> ModelInfo {
        ModelInfo {
            model_name: Some(name.into()),
            ..ModelInfo::default()
        }
    }

    #[test]
    fn test_success_stores_record() {
        let mut state = ModelInfoState::default();
        let epoch = state.mount();
        assert!(state.is_loading());

        assert!(state.apply(epoch, Ok(info("denoiser"))));
        assert!(!state.is_loading());
        assert_eq!(state.info().unwrap().name(), "denoiser");
        assert!(state.error().is_none());
    }

    #[test]
    fn test_failure_substitutes_fallback() {
        let mut state = ModelInfoState::default();
        let epoch = state.mount();

        state.apply(epoch, Err(ApiError::Status(503)));
        assert_eq!(state.error(), Some(LOAD_ERROR));
        assert_eq!(state.info(), Some(&ModelInfo::fallback()));
    }

    #[test]
    fn test_answer_from_previous_mount_is_ignored() {
        let mut state = ModelInfoState::default();
        let first = state.mount();
        state.unmount();
        let second = state.mount();

        assert!(!state.apply(first, Ok(info("old"))));
        assert!(state.is_loading());
        assert!(state.apply(second, Ok(info("new"))));
        assert_eq!(state.info().unwrap().name(), "new");
    }

    #[test]
    fn test_answer_after_unmount_is_ignored() {
        let mut state = ModelInfoState::default();
        let epoch = state.mount();
        state.unmount();
        assert!(!state.apply(epoch, Err(ApiError::Status(500))));
        assert!(state.error().is_none());
    }
}
