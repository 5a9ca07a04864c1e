/// State management module
///
/// This module handles all application state, including:
/// - Shared data structures (data.rs)
/// - Active screen selection (view.rs)
/// - Model metadata loading (model_info.rs)
/// - The upload/inference workflow (upload.rs)

pub mod data;
pub mod model_info;
pub mod upload;
pub mod view;
