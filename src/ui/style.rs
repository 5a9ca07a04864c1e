/// Widget styles
///
/// Every style is a pure function of plain state (`active`, `hovered`,
/// `enabled`, `drag_hover`), so hover effects come from widget status and
/// workflow state rather than from mutating widgets on enter/leave.
use iced::widget::{button, container};
use iced::{Background, Border, Color, Shadow, Theme, Vector};

/// #667eea
pub const ACCENT: Color = Color {
    r: 0.400,
    g: 0.494,
    b: 0.918,
    a: 1.0,
};

/// #764ba2
pub const ACCENT_DEEP: Color = Color {
    r: 0.463,
    g: 0.294,
    b: 0.635,
    a: 1.0,
};

const GLASS: Color = Color {
    r: 1.0,
    g: 1.0,
    b: 1.0,
    a: 0.06,
};

const MUTED: Color = Color {
    r: 0.612,
    g: 0.639,
    b: 0.686,
    a: 1.0,
};

const DANGER: Color = Color {
    r: 0.937,
    g: 0.267,
    b: 0.267,
    a: 1.0,
};

pub fn is_hovered(status: button::Status) -> bool {
    matches!(status, button::Status::Hovered | button::Status::Pressed)
}

fn rounded(radius: f32, color: Color, width: f32) -> Border {
    Border {
        color,
        width,
        radius: radius.into(),
    }
}

fn glow(alpha: f32, blur_radius: f32, lift: f32) -> Shadow {
    Shadow {
        color: Color { a: alpha, ..ACCENT },
        offset: Vector::new(0.0, lift),
        blur_radius,
    }
}

/// Navbar view switcher
pub fn nav_button(active: bool, hovered: bool) -> button::Style {
    let background = match (active, hovered) {
        (true, _) => ACCENT,
        (false, true) => Color { a: 0.25, ..ACCENT },
        (false, false) => GLASS,
    };

    button::Style {
        background: Some(Background::Color(background)),
        text_color: Color::WHITE,
        border: rounded(12.0, Color { a: 0.3, ..ACCENT }, 1.0),
        shadow: if active || hovered {
            glow(0.35, 18.0, 4.0)
        } else {
            Shadow::default()
        },
    }
}

/// Main call-to-action ("Denoise Image", "Download the Model")
pub fn primary_button(enabled: bool, hovered: bool) -> button::Style {
    if !enabled {
        return button::Style {
            background: Some(Background::Color(Color { a: 0.3, ..MUTED })),
            text_color: Color { a: 0.7, ..Color::WHITE },
            border: rounded(12.0, Color::TRANSPARENT, 0.0),
            shadow: Shadow::default(),
        };
    }

    let (background, shadow) = if hovered {
        (ACCENT_DEEP, glow(0.4, 35.0, 12.0))
    } else {
        (ACCENT, glow(0.3, 25.0, 8.0))
    };

    button::Style {
        background: Some(Background::Color(background)),
        text_color: Color::WHITE,
        border: rounded(12.0, Color::TRANSPARENT, 0.0),
        shadow,
    }
}

/// Upload area; highlighted while a file is dragged over the window
pub fn drop_zone(drag_hover: bool) -> container::Style {
    let (border_alpha, background) = if drag_hover {
        (0.6, Color { a: 0.1, ..ACCENT })
    } else {
        (0.3, GLASS)
    };

    container::Style {
        background: Some(Background::Color(background)),
        border: rounded(12.0, Color { a: border_alpha, ..ACCENT }, 2.0),
        ..container::Style::default()
    }
}

pub fn card(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(GLASS)),
        border: rounded(16.0, Color { a: 0.18, ..Color::WHITE }, 1.0),
        shadow: Shadow {
            color: Color::from_rgba(0.12, 0.15, 0.53, 0.37),
            offset: Vector::new(0.0, 8.0),
            blur_radius: 32.0,
        },
        ..container::Style::default()
    }
}

pub fn error_banner(_theme: &Theme) -> container::Style {
    container::Style {
        text_color: Some(DANGER),
        background: Some(Background::Color(Color { a: 0.12, ..DANGER })),
        border: rounded(8.0, Color { a: 0.5, ..DANGER }, 1.0),
        ..container::Style::default()
    }
}

pub fn muted() -> Color {
    MUTED
}
