use iced::widget::{column, container, text};
use iced::{Alignment, Element, Length};

use super::style;
use crate::Message;

/// Splash shown while the application boots
pub fn view() -> Element<'static, Message> {
    container(
        column![
            text("🫁").size(64),
            text("COVID-19 Lung Image Denoising").size(32),
            text("Loading AI model...").size(16).color(style::muted()),
        ]
        .spacing(14)
        .align_x(Alignment::Center),
    )
    .center_x(Length::Fill)
    .center_y(Length::Fill)
    .into()
}
