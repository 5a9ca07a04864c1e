use iced::widget::{container, row, scrollable};
use iced::{event, window, Element, Event, Length, Subscription, Task, Theme};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod config;
mod download;
mod media;
mod state;
mod ui;

use api::{ApiError, DenoiseClient, ModelInfo};
use config::Settings;
use download::{DownloadError, DownloadState};
use media::loader::{self, ValidationError};
use state::data::{Denoised, Preview, SelectedImage};
use state::model_info::ModelInfoState;
use state::upload::UploadWorkflow;
use state::view::{View, ViewController};

/// Main application state
struct DenoiseDemo {
    settings: Settings,
    /// Client for the inference service
    client: DenoiseClient,
    /// Splash screen still showing
    booting: bool,
    views: ViewController,
    model_info: ModelInfoState,
    upload: UploadWorkflow,
    download: DownloadState,
    /// Abort handle of the in-flight `/denoise` request
    submission: Option<iced::task::Handle>,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// Splash timer elapsed
    BootFinished,
    /// User clicked a navbar entry
    ViewSelected(View),
    /// `/model-info` answered (epoch, outcome)
    ModelInfoLoaded(u64, Result<ModelInfo, ApiError>),
    /// User clicked the upload area
    PickImage,
    /// File picker closed
    ImagePicked(Option<PathBuf>),
    /// A file is being dragged over the window
    FileHovered,
    /// The dragged file left the window
    FilesHoveredLeft,
    /// A file was dropped on the window
    FileDropped(PathBuf),
    /// File read finished (load token, outcome)
    ImageLoaded(u64, Result<SelectedImage, ValidationError>),
    /// Preview built (selection generation, outcome)
    PreviewReady(u64, Result<Preview, String>),
    /// User clicked "Denoise Image"
    Submit,
    /// `/denoise` answered (submission generation, outcome)
    DenoiseFinished(u64, Result<Denoised, ApiError>),
    /// User clicked "Download the Model"
    DownloadModel,
    /// Download flow completed
    DownloadFinished(Result<PathBuf, DownloadError>),
}

impl DenoiseDemo {
    /// Create the application and start the splash timer
    fn new(settings: Settings, client: DenoiseClient) -> (Self, Task<Message>) {
        let splash = settings.splash_duration();
        let upload = UploadWorkflow::new(settings.upload.get_max_file_size());

        tracing::info!(base_url = client.base_url(), "🫁 Denoising demo starting");

        (
            DenoiseDemo {
                settings,
                client,
                booting: true,
                views: ViewController::default(),
                model_info: ModelInfoState::default(),
                upload,
                download: DownloadState::default(),
                submission: None,
            },
            Task::perform(async move { tokio::time::sleep(splash).await }, |_| {
                Message::BootFinished
            }),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::BootFinished => {
                // Splash done: enter whichever view is current (Info at launch)
                self.booting = false;
                self.mount(self.views.current())
            }
            Message::ViewSelected(view) => match self.views.set(view) {
                Some(previous) => {
                    // Tear down the old view before the new one starts its own work
                    tracing::debug!(from = ?previous, to = ?view, "Switching view");
                    self.unmount(previous);
                    self.mount(view)
                }
                None => Task::none(),
            },
            Message::ModelInfoLoaded(epoch, outcome) => {
                // Answers from a previous visit of the view are dropped inside
                self.model_info.apply(epoch, outcome);
                Task::none()
            }
            Message::PickImage => Task::perform(pick_image(), Message::ImagePicked),
            Message::ImagePicked(Some(path)) => self.load(path),
            Message::ImagePicked(None) => Task::none(),
            Message::FileHovered => {
                if self.views.current() == View::TryModel {
                    self.upload.set_drag_hover(true);
                }
                Task::none()
            }
            Message::FilesHoveredLeft => {
                self.upload.set_drag_hover(false);
                Task::none()
            }
            Message::FileDropped(path) => {
                self.upload.set_drag_hover(false);
                // Drops only count while the upload area is on screen
                if self.views.current() != View::TryModel {
                    tracing::debug!(path = %path.display(), "Ignoring drop outside the upload view");
                    return Task::none();
                }
                self.load(path)
            }
            Message::ImageLoaded(token, loaded) => {
                // Accepting a new image abandons any running submission,
                // so its request has to be aborted as well
                let next = self.upload.file_loaded(token, loaded);
                self.sync_submission();
                match next {
                    Some((generation, image)) => Task::perform(
                        media::preview::generate_preview(image),
                        move |preview| Message::PreviewReady(generation, preview),
                    ),
                    None => Task::none(),
                }
            }
            Message::PreviewReady(generation, preview) => {
                self.upload.preview_ready(generation, preview);
                Task::none()
            }
            Message::Submit => {
                // No image, or a submission already running: nothing to do
                let Some(ticket) = self.upload.begin_submit() else {
                    return Task::none();
                };

                // Keep the abort handle so leaving the view can cancel the request
                let client = self.client.clone();
                let generation = ticket.generation;
                let (task, handle) = Task::perform(
                    async move { client.denoise(&ticket.image).await },
                    move |outcome| Message::DenoiseFinished(generation, outcome),
                )
                .abortable();
                self.submission = Some(handle);
                task
            }
            Message::DenoiseFinished(generation, outcome) => {
                // Stale generations are ignored; their handle was already aborted
                if self.upload.finish_submit(generation, outcome) {
                    self.submission = None;
                }
                Task::none()
            }
            Message::DownloadModel => {
                // Button is disabled while running, but messages can still queue up
                if !self.download.begin() {
                    return Task::none();
                }
                Task::perform(
                    download::download_model(
                        self.client.clone(),
                        self.settings.download.clone(),
                        download::default_destination(),
                    ),
                    Message::DownloadFinished,
                )
            }
            Message::DownloadFinished(outcome) => {
                self.download.finish(outcome);
                Task::none()
            }
        }
    }

    /// View entered
    fn mount(&mut self, view: View) -> Task<Message> {
        match view {
            View::Info => {
                let epoch = self.model_info.mount();
                let client = self.client.clone();
                Task::perform(async move { client.model_info().await }, move |outcome| {
                    Message::ModelInfoLoaded(epoch, outcome)
                })
            }
            View::TryModel => Task::none(),
        }
    }

    /// View left
    fn unmount(&mut self, view: View) {
        match view {
            View::Info => self.model_info.unmount(),
            View::TryModel => {
                self.upload.reset();
                self.sync_submission();
            }
        }
    }

    fn load(&mut self, path: PathBuf) -> Task<Message> {
        let token = self.upload.begin_load();
        Task::perform(loader::load_image(path, self.upload.max_file_size()), move |loaded| {
            Message::ImageLoaded(token, loaded)
        })
    }

    /// Abort the request once the workflow no longer waits for it
    fn sync_submission(&mut self) {
        // Still waiting for the current submission: keep the request alive
        if self.upload.is_loading() {
            return;
        }
        // The workflow gave up on it (new selection or view reset); the
        // generation bump already hides its answer, abort stops the upload
        if let Some(handle) = self.submission.take() {
            tracing::debug!("Aborting in-flight denoise request");
            handle.abort();
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<'_, Message> {
        if self.booting {
            return ui::preloader::view();
        }

        let main: Element<'_, Message> = match self.views.current() {
            View::Info => ui::model_info::view(&self.model_info),
            View::TryModel => ui::try_model::view(&self.upload),
        };

        row![
            ui::navbar::view(self.views.current(), &self.download),
            scrollable(container(main).padding(32).width(Length::Fill)).height(Length::Fill),
        ]
        .padding(16)
        .spacing(16)
        .into()
    }

    /// Window file drag and drop
    fn subscription(&self) -> Subscription<Message> {
        event::listen_with(|event, _status, _window| match event {
            Event::Window(window::Event::FileHovered(_)) => Some(Message::FileHovered),
            Event::Window(window::Event::FilesHoveredLeft) => Some(Message::FilesHoveredLeft),
            Event::Window(window::Event::FileDropped(path)) => Some(Message::FileDropped(path)),
            _ => None,
        })
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

/// Native file picker restricted to image extensions
async fn pick_image() -> Option<PathBuf> {
    rfd::AsyncFileDialog::new()
        .set_title("Select a chest CT or X-ray image")
        .add_filter("Images", loader::PICKER_EXTENSIONS)
        .pick_file()
        .await
        .map(|handle| handle.path().to_path_buf())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = config::get_configuration()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| settings.log_level.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let client = DenoiseClient::new(&settings.api)?;

    iced::application(
        "COVID-19 Lung Image Denoising",
        DenoiseDemo::update,
        DenoiseDemo::view,
    )
    .subscription(DenoiseDemo::subscription)
    .theme(DenoiseDemo::theme)
    .centered()
    .run_with(move || DenoiseDemo::new(settings, client))?;

    Ok(())
}
