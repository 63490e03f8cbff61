/// Split image/text feature block
///
/// Badge, heading, body and a list of bullets on one side, a feature image
/// on the other. `mirror` puts the image first on wide windows; on mobile
/// the block collapses to one column with the image last.
use iced::widget::{button, column, container, image, row, text, Column, Row, Space};
use iced::{Alignment, Border, Color, ContentFit, Element, Length, Theme};

use super::images::RemoteImages;
use crate::viewport::{ButtonSize, Viewport};
use crate::Message;

#[derive(Debug, Clone)]
pub struct Bullet {
    pub text: String,
    /// Single glyph drawn inside the round icon
    pub icon: &'static str,
    pub color: Color,
    pub bg_color: Color,
    pub bullets: Vec<Bullet>,
}

impl Bullet {
    pub fn new(text: impl Into<String>, icon: &'static str, color: Color, bg_color: Color) -> Self {
        Self { text: text.into(), icon, color, bg_color, bullets: Vec::new() }
    }

    pub fn with_bullets(mut self, bullets: Vec<Bullet>) -> Self {
        self.bullets = bullets;
        self
    }
}

#[derive(Debug, Clone)]
pub struct CallToAction {
    pub label: String,
    pub on_press: Message,
}

#[derive(Debug, Clone)]
pub struct SplitWithImage {
    pub badge: String,
    pub title: String,
    pub body: String,
    pub bullets: Vec<Bullet>,
    pub color_scheme: Color,
    pub img_url: String,
    pub mirror: bool,
    pub element_name: String,
    pub cta: CallToAction,
    /// Repository URL for the secondary "git clone" button
    pub social_url: Option<String>,
}

impl SplitWithImage {
    pub fn view<'a>(&'a self, viewport: &Viewport, images: &'a RemoteImages) -> Element<'a, Message> {
        let mobile = viewport.is_mobile();
        let sizes = viewport.breakpoint().button_sizes();
        let button_size = if self.social_url.is_some() { sizes.double } else { sizes.single };

        let scheme = self.color_scheme;
        let badge = container(text(self.badge.to_uppercase()).size(14).color(Color::WHITE))
            .padding(8)
            .id(container::Id::new(format!("MoonBadge {}", self.element_name)))
            .style(move |_theme: &Theme| filled(scheme, 6.0));
        let badge_row = if self.mirror && !mobile {
            row![Space::with_width(Length::Fill), badge]
        } else {
            row![badge, Space::with_width(Length::Fill)]
        };

        let bullets = Column::with_children(self.bullets.iter().map(feature))
            .spacing(16);

        let mut buttons: Vec<Element<'a, Message>> = vec![styled_button(&self.cta.label, button_size)
            .on_press(self.cta.on_press.clone())
            .into()];
        if let Some(url) = &self.social_url {
            buttons.push(
                styled_button("git clone moonstream", button_size)
                    .on_press(Message::CopyToClipboard(url.clone()))
                    .into(),
            );
        }
        // Stack the buttons when there is no room for two side by side
        let buttons: Element<'a, Message> = if mobile {
            Column::with_children(buttons).spacing(12).into()
        } else {
            Row::with_children(buttons).spacing(12).into()
        };

        let copy = column![
            badge_row,
            text(&self.title).size(36),
            text(&self.body).size(18).color(Color::from_rgb8(0x31, 0x82, 0xce)),
            bullets,
            buttons,
        ]
        .spacing(16)
        .width(Length::FillPortion(1));

        let picture: Element<'a, Message> = match images.get(&self.img_url) {
            Some(handle) => image(handle.clone())
                .content_fit(ContentFit::Contain)
                .width(Length::FillPortion(1))
                .into(),
            None => Space::with_width(Length::FillPortion(1)).into(),
        };

        let content: Element<'a, Message> = if mobile {
            column![copy, picture].spacing(16).into()
        } else if self.mirror {
            row![picture, copy].spacing(40).align_y(Alignment::Center).into()
        } else {
            row![copy, picture].spacing(40).align_y(Alignment::Center).into()
        };

        container(content)
            .max_width(1280.0)
            .width(Length::Fill)
            .into()
    }
}

/// One bullet and, indented below it, its nested bullets
fn feature<'a>(bullet: &'a Bullet) -> Element<'a, Message> {
    let bg = bullet.bg_color;
    let icon = container(text(bullet.icon).size(16).color(bullet.color))
        .center_x(32)
        .center_y(32)
        .style(move |_theme: &Theme| filled(bg, 16.0));

    let head = row![icon, text(&bullet.text).size(16)]
        .spacing(8)
        .align_y(Alignment::Center);

    if bullet.bullets.is_empty() {
        return head.into();
    }

    let nested = Column::with_children(bullet.bullets.iter().map(feature))
        .spacing(8)
        .padding(iced::Padding { top: 16.0, left: 32.0, ..iced::Padding::ZERO });

    column![head, nested].into()
}

fn styled_button(label: &str, size: ButtonSize) -> button::Button<'_, Message> {
    button(text(label).size(size.text_size()))
        .padding(size.padding())
        .style(button::secondary)
}

fn filled(color: Color, radius: f32) -> container::Style {
    container::Style {
        background: Some(color.into()),
        border: Border { radius: radius.into(), ..Border::default() },
        ..container::Style::default()
    }
}
