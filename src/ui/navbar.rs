use iced::widget::{button, column, container, text, vertical_space};
use iced::{Alignment, Element, Length};

use super::style;
use crate::download::DownloadState;
use crate::state::view::View;
use crate::Message;

/// Left-hand navigation: view switcher and model download
pub fn view(current: View, download: &DownloadState) -> Element<'_, Message> {
    let nav_entry = |target: View| {
        let active = current == target;
        button(text(target.label()).size(16))
            .on_press(Message::ViewSelected(target))
            .padding(14)
            .width(Length::Fill)
            .style(move |_theme, status| style::nav_button(active, style::is_hovered(status)))
    };

    let downloading = download.is_in_progress();
    let download_label = if downloading {
        "⏳ Downloading..."
    } else {
        "📥 Download the Model"
    };
    let download_button = button(text(download_label).size(15))
        .on_press_maybe((!downloading).then_some(Message::DownloadModel))
        .padding(14)
        .width(Length::Fill)
        .style(move |_theme, status| {
            style::primary_button(!downloading, style::is_hovered(status))
        });

    let mut content = column![
        text("Lung Denoiser").size(26),
        text("COVID-19 CT/X-ray enhancement")
            .size(13)
            .color(style::muted()),
        vertical_space().height(24),
        nav_entry(View::Info),
        nav_entry(View::TryModel),
        vertical_space(),
        download_button,
    ]
    .spacing(12)
    .align_x(Alignment::Start);

    if let Some(notice) = download.notice() {
        let line = match notice {
            Ok(message) => text(message.clone()).size(13),
            Err(message) => text(message.clone()).size(13).color(iced::Color::from_rgb(0.94, 0.27, 0.27)),
        };
        content = content.push(line);
    }

    container(content)
        .width(Length::Fixed(280.0))
        .height(Length::Fill)
        .padding(24)
        .style(style::card)
        .into()
}
