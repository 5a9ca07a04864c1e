/// UI module
///
/// Pure view functions over application state:
/// - Splash screen (preloader.rs)
/// - Navigation sidebar and download button (navbar.rs)
/// - Model information view (model_info.rs)
/// - Upload and results view (try_model.rs)
/// - Shared widget styles (style.rs)

pub mod model_info;
pub mod navbar;
pub mod preloader;
pub mod style;
pub mod try_model;
