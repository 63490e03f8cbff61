/// The "Product" page
///
/// Long-form copy over the progressively upgraded background, followed by
/// one feature block.
use iced::widget::{button, column, container, image, row, scrollable, stack, text, Column, Space};
use iced::{Alignment, Color, ContentFit, Element, Length, Padding, Theme};

use super::images::RemoteImages;
use super::split_with_image::{Bullet, CallToAction, SplitWithImage};
use crate::background::Background;
use crate::viewport::Viewport;
use crate::{Message, Route};

const REPOSITORY_URL: &str = "https://github.com/bugout-dev/moonstream";
const MILESTONES_URL: &str = "https://github.com/bugout-dev/moonstream/milestones";

/// Painted behind the copy until some background variant has loaded
const FALLBACK_BACKGROUND: Color = Color::from_rgb(0.10, 0.11, 0.23);

const PARAGRAPHS: [&str; 6] = [
    "We strive for financial inclusion. With cryptocurrencies becoming mainstream, now is the time \
     for anyone with a computer and access to the Internet to utilize this opportunity to make \
     passive income. We're here to make it easier.",
    "Right now our source of data is Ethereum blockchain. Our goal is to provide a live view of the \
     transactions taking place on every public blockchain - from the activity of specific accounts \
     or smart contracts to updates about general market movements.",
    "This information comes from the blockchains themselves, from their mempools/transaction pools, \
     and from centralized exchanges, social media, and the news. This forms a stream of information \
     tailored to your specific needs.",
    "We're giving you a macro view of the crypto market with direct access from Moonstream \
     dashboards to execute transactions. You can also set up programs which execute (on- or \
     off-chain) when your stream meets certain conditions.",
    "Moonstream is accessible through dashboard, API and webhooks.",
    "Moonstream's financial inclusion goes beyond providing access to data. All of our work is open \
     source as we do not believe that proprietary technologies are financially inclusive.",
];

#[derive(Debug, Clone)]
pub struct ProductPage {
    feature: SplitWithImage,
}

impl ProductPage {
    pub fn new(assets_url: &str) -> Self {
        let assets_url = assets_url.trim_end_matches('/');
        let orange = Color::from_rgb8(0xfd, 0x5d, 0x36);
        let tint = Color::from_rgb8(0xff, 0xe8, 0xe1);

        let feature = SplitWithImage {
            badge: "Moonstream".into(),
            title: "Subscribe to the blockchain".into(),
            body: "Watch addresses, contracts and transaction pools, and get the events you care \
                   about in one stream."
                .into(),
            bullets: vec![
                Bullet::new("Ethereum blockchain and transaction pool", "◆", orange, tint).with_bullets(vec![
                    Bullet::new("Labels on every address you follow", "✎", orange, tint),
                    Bullet::new("Alerts when your stream matches", "!", orange, tint),
                ]),
                Bullet::new("Algorand support", "▲", orange, tint),
                Bullet::new("Open source, end to end", "⌘", orange, tint),
            ],
            color_scheme: orange,
            img_url: format!("{}/crypto+traders.png", assets_url),
            mirror: false,
            element_name: "subscriptions".into(),
            cta: CallToAction {
                label: "Manage subscriptions".into(),
                on_press: Message::Navigate(Route::Subscriptions),
            },
            social_url: Some(REPOSITORY_URL.into()),
        };

        Self { feature }
    }

    /// Images the page needs besides its background
    pub fn image_urls(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.feature.img_url.as_str())
    }

    pub fn view<'a>(
        &'a self,
        background: Option<&'a Background>,
        viewport: &Viewport,
        images: &'a RemoteImages,
    ) -> Element<'a, Message> {
        let backdrop: Element<'a, Message> =
            match background.and_then(|bg| bg.resolver().background()) {
                Some(handle) => image(handle.clone())
                    .content_fit(ContentFit::Cover)
                    .width(Length::Fill)
                    .height(Length::Fill)
                    .into(),
                None => container(Space::new(Length::Fill, Length::Fill))
                    .style(|_theme: &Theme| container::Style {
                        background: Some(FALLBACK_BACKGROUND.into()),
                        ..container::Style::default()
                    })
                    .into(),
            };

        let margin = viewport.width * viewport.breakpoint().page_margin();

        let paragraphs = Column::with_children(
            PARAGRAPHS.iter().map(|p| text(*p).size(16).into()),
        )
        .spacing(12);

        let links = row![
            text("You can read").size(16),
            link("our code on GitHub", REPOSITORY_URL),
            text("and keep track of our progress using").size(16),
            link("the Moonstream milestones", MILESTONES_URL),
        ]
        .spacing(6)
        .align_y(Alignment::Center)
        .wrap();

        let copy = column![
            text("Why you'll love Moonstream").size(24),
            paragraphs,
            links,
        ]
        .spacing(16)
        .max_width(1700.0)
        .align_x(Alignment::Center);

        let content = column![copy, self.feature.view(viewport, images)]
            .spacing(48)
            .padding(Padding { top: 48.0, bottom: 96.0, left: margin, right: margin })
            .align_x(Alignment::Center)
            .width(Length::Fill);

        stack![backdrop, scrollable(content).height(Length::Fill)].into()
    }
}

/// Text-styled button that copies its URL; there is no browser to open
fn link<'a>(label: &'a str, url: &'a str) -> Element<'a, Message> {
    button(text(label).size(16).color(Color::from_rgb8(0xf5, 0x65, 0x46)))
        .padding(0)
        .style(button::text)
        .on_press(Message::CopyToClipboard(url.to_string()))
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_image_follows_assets_url() {
        let page = ProductPage::new("https://cdn.test/assets/");
        let urls: Vec<&str> = page.image_urls().collect();
        assert_eq!(urls, vec!["https://cdn.test/assets/crypto+traders.png"]);
    }

    #[test]
    fn test_cta_opens_subscriptions() {
        let page = ProductPage::new("https://cdn.test");
        assert!(matches!(page.feature.cta.on_press, Message::Navigate(Route::Subscriptions)));
        assert!(!page.feature.bullets[0].bullets.is_empty());
    }
}
