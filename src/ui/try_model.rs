use iced::widget::{button, column, container, mouse_area, row, text, Column, Image};
use iced::{Alignment, Element, Length};

use super::style;
use crate::state::data::{Denoised, DisplayImage};
use crate::state::upload::{Phase, UploadWorkflow};
use crate::Message;

const MIB: f64 = 1024.0 * 1024.0;

pub fn view(workflow: &UploadWorkflow) -> Element<'_, Message> {
    let mut content = column![
        text("Try the Denoising Model").size(36),
        text("Upload a chest CT or X-ray image to see the model remove its noise")
            .size(16)
            .color(style::muted()),
        drop_zone(workflow),
    ]
    .spacing(16);

    if let Some(preview) = workflow.preview() {
        content = content.push(
            container(
                Image::new(preview.image.handle.clone())
                    .width(Length::Fixed(320.0))
                    .height(Length::Fixed(320.0)),
            )
            .center_x(Length::Fill),
        );
    }

    let enabled = workflow.can_submit();
    let label = if workflow.phase() == Phase::Submitting {
        "⏳ Processing Image..."
    } else {
        "🚀 Denoise Image"
    };
    content = content.push(
        container(
            button(text(label).size(17))
                .on_press_maybe(enabled.then_some(Message::Submit))
                .padding([14, 36])
                .style(move |_theme, status| {
                    style::primary_button(enabled, style::is_hovered(status))
                }),
        )
        .center_x(Length::Fill),
    );

    if let Some(error) = workflow.error() {
        content = content.push(
            container(text(error).size(15))
                .padding(12)
                .width(Length::Fill)
                .style(style::error_banner),
        );
    }

    if let Some(denoised) = workflow.visible_result() {
        content = content.push(results(denoised));
    }

    content.into()
}

/// Upload hint, e.g. "Supports: JPG, PNG, JPEG (Max 10 MB)"
pub fn upload_hint(max_file_size: u64) -> String {
    format!(
        "Supports: JPG, PNG, JPEG (Max {} MB)",
        max_file_size / (1024 * 1024)
    )
}

pub fn describe_size(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / MIB)
}

fn drop_zone(workflow: &UploadWorkflow) -> Element<'_, Message> {
    let mut inner = column![
        text("📁").size(40),
        text("Click to select or drag and drop an image").size(17),
        text(upload_hint(workflow.max_file_size()))
            .size(13)
            .color(style::muted()),
    ]
    .spacing(8)
    .align_x(Alignment::Center);

    if let Some(selected) = workflow.selected() {
        let mut details = format!("{} ({})", selected.file_name, describe_size(selected.size()));
        if let Some((width, height)) = workflow.preview().and_then(|p| p.dimensions) {
            details.push_str(&format!(" {}×{}", width, height));
        }
        inner = inner.push(text(details).size(14));
    }

    let drag_hover = workflow.is_drag_hover();
    mouse_area(
        container(inner)
            .padding(32)
            .center_x(Length::Fill)
            .style(move |_theme| style::drop_zone(drag_hover)),
    )
    .on_press(Message::PickImage)
    .into()
}

fn labelled_image<'a>(label: &'a str, image: &'a DisplayImage) -> Element<'a, Message> {
    column![
        text(label).size(15),
        Image::new(image.handle.clone())
            .width(Length::Fill)
            .height(Length::Fixed(260.0)),
    ]
    .spacing(8)
    .align_x(Alignment::Center)
    .width(Length::Fill)
    .into()
}

fn metric<'a>(name: &'a str, value: String) -> Element<'a, Message> {
    container(
        column![
            text(value).size(24),
            text(name).size(13).color(style::muted())
        ]
        .align_x(Alignment::Center),
    )
    .padding(14)
    .center_x(Length::Fill)
    .style(style::card)
    .into()
}

/// Processing-info lines under the result images
pub fn processing_lines(denoised: &Denoised) -> Vec<String> {
    let info = &denoised.result.processing_info;
    let mut lines = vec![
        format!("Model: {}", info.model_type),
        format!("Input size: {:?}", info.input_size),
        format!("Processed size: {:?}", info.processed_size),
        format!("Noise added: {}", info.noise_added),
    ];
    if let Some(name) = &info.filename {
        lines.push(format!("File: {}", name));
    }
    lines
}

fn results(denoised: &Denoised) -> Element<'_, Message> {
    let metrics = &denoised.result.metrics;
    let processing = processing_lines(denoised)
        .into_iter()
        .fold(Column::new().spacing(4), |col, line| {
            col.push(text(line).size(14).color(style::muted()))
        });

    container(
        column![
            text("Results").size(24),
            row![
                labelled_image("Original", &denoised.original),
                labelled_image("Noisy", &denoised.noisy),
                labelled_image("Denoised", &denoised.denoised),
            ]
            .spacing(16),
            row![
                metric("PSNR (dB)", format!("{:.2}", metrics.psnr)),
                metric("SSIM", format!("{:.4}", metrics.ssim)),
                metric("IQI", format!("{:.4}", metrics.iqi)),
            ]
            .spacing(16),
            processing,
        ]
        .spacing(16),
    )
    .padding(20)
    .width(Length::Fill)
    .style(style::card)
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_hint_follows_limit() {
        assert_eq!(
            upload_hint(10 * 1024 * 1024),
            "Supports: JPG, PNG, JPEG (Max 10 MB)"
        );
        assert_eq!(upload_hint(5 * 1024 * 1024), "Supports: JPG, PNG, JPEG (Max 5 MB)");
    }

    #[test]
    fn test_describe_size() {
        assert_eq!(describe_size(1024 * 1024), "1.00 MB");
        assert_eq!(describe_size(512 * 1024), "0.50 MB");
    }
}
