use iced::widget::{column, container, row, text, Column};
use iced::{Element, Length};

use super::style;
use crate::api::types::format_shape;
use crate::api::ModelInfo;
use crate::state::model_info::ModelInfoState;
use crate::Message;

const KEY_FEATURES: &[&str] = &[
    "Dual-branch CNN architecture for enhanced performance",
    "Residual learning for better feature preservation",
    "Optimized for medical imaging applications",
    "Real-time processing capabilities",
    "High-quality image reconstruction",
];

pub fn view(state: &ModelInfoState) -> Element<'_, Message> {
    let mut content = column![
        text("COVID-19 Lung Image Denoising").size(36),
        text("Deep Learning-based Medical Image Enhancement for Better Diagnosis")
            .size(16)
            .color(style::muted()),
    ]
    .spacing(16);

    if let Some(error) = state.error() {
        content = content.push(
            container(text(error).size(15))
                .padding(12)
                .width(Length::Fill)
                .style(style::error_banner),
        );
    }

    match state.info() {
        Some(info) => {
            content = content
                .push(highlights(info))
                .push(about())
                .push(specifications(info));
        }
        None if state.is_loading() => {
            content = content.push(text("Loading model information...").size(16));
        }
        None => {}
    }

    content.into()
}

fn panel<'a>(title: &'a str, lines: Vec<String>) -> Element<'a, Message> {
    let body = lines
        .into_iter()
        .fold(Column::new().spacing(4), |col, line| {
            col.push(text(line).size(14).color(style::muted()))
        });

    container(column![text(title).size(18), body].spacing(8))
        .padding(18)
        .width(Length::Fill)
        .style(style::card)
        .into()
}

/// Architecture / performance / speed / accuracy cards
fn highlights(info: &ModelInfo) -> Element<'_, Message> {
    row![
        panel(
            "🧠 Architecture",
            vec![
                "Dual-branch CNN with residual learning".into(),
                format!("{} parameters", info.total_parameters()),
            ],
        ),
        panel(
            "📊 Performance",
            vec![
                "High PSNR & SSIM values".into(),
                "Excellent noise reduction capability".into(),
            ],
        ),
        panel(
            "⚡ Speed",
            vec!["Real-time processing".into(), "CPU & GPU compatible".into()],
        ),
        panel(
            "🎯 Accuracy",
            vec![
                "State-of-the-art denoising".into(),
                "Preserves critical details".into(),
            ],
        ),
    ]
    .spacing(16)
    .into()
}

fn about() -> Element<'static, Message> {
    let mut lines = vec![
        "Removes noise from chest CT and X-ray images so that fine lung structures stay visible. \
         Key features:"
            .to_string(),
    ];
    lines.extend(KEY_FEATURES.iter().map(|feature| format!("• {}", feature)));

    panel("About This Model", lines)
}

/// Technical specification lines, with literal fallbacks for absent fields
pub fn specification_lines(info: &ModelInfo) -> Vec<String> {
    let mut lines = vec![
        format!("Model Name: {}", info.name()),
        format!("Model Type: {}", info.kind()),
        format!("Input Shape: {}", format_shape(&info.input_shape())),
        format!("Output Shape: {}", format_shape(&info.output_shape())),
        format!("Parameters: {}", info.total_parameters()),
        format!("Layers: {}", info.layers()),
        format!("Providers: {}", info.providers().join(", ")),
    ];
    if let Some(version) = &info.onnx_version {
        lines.push(format!("ONNX Version: {}", version));
    }
    lines
}

fn specifications(info: &ModelInfo) -> Element<'_, Message> {
    panel("Technical Specifications", specification_lines(info))
}
