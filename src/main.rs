use clap::Parser;
use iced::widget::{button, column, container, image, row, text, Column, Row, Space};
use iced::{window, Alignment, Color, Element, Length, Size, Subscription, Task, Theme};

mod api;
mod background;
mod config;
mod constants;
mod error;
mod state;
mod ui;
mod viewport;

use api::{MoonstreamClient, ServerStatus};
use background::{Background, SelectionPolicy};
use config::Cli;
use constants::{
    FooterColumn, NavPath, ALL_NAV_PATHES, DEFAULT_METATAGS, USER_NAV_PATHES, WHITE_LOGO_W_TEXT_URL,
};
use error::ApiError;
use state::cache::{CacheEvent, Outcome, SubscriptionsCache};
use state::store::Store;
use ui::images::{ImageLoaded, RemoteImages};
use ui::product::ProductPage;
use ui::subscriptions::{Action, SubscriptionsTable, TableMessage};
use viewport::{Viewport, ViewportClass};

/// Pages the application can show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Product,
    Subscriptions,
}

impl Route {
    /// Map a navigation path to an in-app page, `None` for pages that only
    /// exist on the website
    pub fn from_path(path: &str) -> Option<Self> {
        match path {
            "/product" => Some(Route::Product),
            "/subscriptions" => Some(Route::Subscriptions),
            _ => None,
        }
    }
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    Navigate(Route),
    WindowResized(Size),
    /// A background variant finished (or failed) loading
    Background(background::Event),
    ImageLoaded(ImageLoaded),
    Table(TableMessage),
    Cache(CacheEvent),
    ServerStatus(Result<ServerStatus, ApiError>),
    CopyToClipboard(String),
}

/// Main application state
struct MoonstreamApp {
    route: Route,
    viewport: Viewport,
    policy: SelectionPolicy,
    assets_url: String,
    client: MoonstreamClient,
    /// Mounted only while the product page is shown
    background: Option<Background>,
    next_generation: u64,
    images: RemoteImages,
    product: ProductPage,
    cache: SubscriptionsCache,
    table: SubscriptionsTable,
    /// Local snapshot, `None` if it could not be opened
    store: Option<Store>,
}

impl MoonstreamApp {
    /// Create a new instance of the application
    fn new(cli: Cli) -> (Self, Task<Message>) {
        let mut client = MoonstreamClient::new(&cli.api_url, cli.access_token.clone(), cli.offline);
        if let Some(timeout) = cli.request_timeout() {
            match client.clone().with_timeout(timeout) {
                Ok(bounded) => client = bounded,
                Err(e) => log::warn!("⚠️  Ignoring --timeout: {}", e),
            }
        }
        log::info!("🌙 Moonstream API at {}{}", client.base_url(), if cli.offline { " (offline)" } else { "" });

        let store = match cli.cache_db_path() {
            Some(path) => Store::open(&path),
            None => Store::open_in_memory(),
        };
        let store = match store {
            Ok(store) => {
                match store.path() {
                    Some(path) => log::info!("📁 Subscriptions snapshot at {}", path.display()),
                    None => log::info!("📁 Subscriptions snapshot kept in memory"),
                }
                Some(store)
            }
            Err(e) => {
                log::warn!("⚠️  Subscriptions snapshot disabled: {}", e);
                None
            }
        };

        let mut cache = SubscriptionsCache::new(client.clone());
        if let Some(store) = &store {
            match store.load_snapshot() {
                Ok(Some((list, saved_at))) => {
                    log::debug!("Snapshot holds {} rows", store.subscription_count().unwrap_or_default());
                    cache.seed(list, saved_at)
                }
                Ok(None) => {}
                Err(e) => log::warn!("⚠️  Could not read subscriptions snapshot: {}", e),
            }
        }

        let mut app = MoonstreamApp {
            route: Route::Product,
            viewport: Viewport::default(),
            policy: cli.policy,
            assets_url: cli.assets_url.clone(),
            product: ProductPage::new(&cli.assets_url),
            client,
            background: None,
            next_generation: 0,
            images: RemoteImages::default(),
            cache,
            table: SubscriptionsTable::default(),
            store,
        };

        let urls: Vec<String> = app
            .product
            .image_urls()
            .map(str::to_string)
            .chain(ui::subscriptions::icon_urls().map(str::to_string))
            .chain(std::iter::once(WHITE_LOGO_W_TEXT_URL.to_string()))
            .collect();
        let images = app
            .images
            .request(urls.iter().map(String::as_str), app.client.http())
            .map(Message::ImageLoaded);

        let background = app.mount_background();

        let (subscriptions, server) = if app.client.is_offline() {
            (Task::none(), Task::none())
        } else {
            let client = app.client.clone();
            (
                app.cache.list().map(Message::Cache),
                Task::perform(async move { client.server_status().await }, Message::ServerStatus),
            )
        };

        let window_size = window::get_latest()
            .and_then(window::get_size)
            .map(Message::WindowResized);

        (app, Task::batch([window_size, background, images, subscriptions, server]))
    }

    /// Mount a fresh background; drops (and so aborts) any previous one
    fn mount_background(&mut self) -> Task<Message> {
        self.next_generation += 1;
        let (background, loads) = Background::mount(
            self.next_generation,
            self.policy,
            constants::product_background_variants(&self.assets_url),
            self.viewport.width,
            self.client.http(),
        );
        log::debug!("Mounted background generation {}", background.resolver().generation());
        self.background = Some(background);
        loads.map(Message::Background)
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Navigate(route) => {
                if route == self.route {
                    return Task::none();
                }
                log::debug!("Navigating to {:?}", route);
                self.route = route;
                match route {
                    Route::Product => self.mount_background(),
                    Route::Subscriptions => {
                        // Leaving the product page tears its background down
                        self.background = None;
                        if self.cache.data().is_none() && !self.client.is_offline() {
                            self.cache.list().map(Message::Cache)
                        } else {
                            Task::none()
                        }
                    }
                }
            }
            Message::WindowResized(size) => {
                self.viewport = Viewport { width: size.width };
                if let Some(background) = self.background.as_mut() {
                    let class = ViewportClass::classify(&background.resolver().breakpoints(), size.width);
                    log::debug!("Window {}x{}, widest tier {:?}", size.width, size.height, class.widest());
                    background.update(background::Event::Viewport(class));
                }
                Task::none()
            }
            Message::Background(event) => {
                background::deliver(self.background.as_mut(), event);
                Task::none()
            }
            Message::ImageLoaded(loaded) => {
                self.images.apply(loaded);
                Task::none()
            }
            Message::Table(message) => match self.table.update(message, &mut self.cache) {
                Action::None => Task::none(),
                Action::Cache(task) => task.map(Message::Cache),
                Action::Copy(contents) => iced::clipboard::write(contents),
            },
            Message::Cache(event) => {
                if self.cache.apply(event) == Outcome::Changed {
                    self.table.clamp_page(&self.cache);
                    self.save_snapshot();
                }
                Task::none()
            }
            Message::ServerStatus(Ok(status)) => {
                log::info!("✅ Moonstream API {} (version {})", status.status, status.version);
                if status.clock_skew_secs.abs() > 60.0 {
                    log::warn!("⚠️  Local clock is {:.0}s off the server", -status.clock_skew_secs);
                }
                Task::none()
            }
            Message::ServerStatus(Err(e)) => {
                log::warn!("⚠️  Moonstream API unreachable: {}", e);
                Task::none()
            }
            Message::CopyToClipboard(contents) => {
                log::debug!("📋 Copied {}", contents);
                iced::clipboard::write(contents)
            }
        }
    }

    fn save_snapshot(&mut self) {
        let (Some(store), Some(list)) = (self.store.as_mut(), self.cache.data()) else {
            return;
        };
        if let Err(e) = store.save_snapshot(list, chrono::Utc::now()) {
            log::warn!("⚠️  Failed to save subscriptions snapshot: {}", e);
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let page: Element<Message> = match self.route {
            Route::Product => self
                .product
                .view(self.background.as_ref(), &self.viewport, &self.images),
            Route::Subscriptions => self
                .table
                .view(&self.cache, &self.images)
                .map(Message::Table),
        };

        column![
            self.nav_bar(),
            container(page).width(Length::Fill).height(Length::Fill),
            self.footer(),
        ]
        .into()
    }

    fn nav_bar(&self) -> Element<Message> {
        let links = ALL_NAV_PATHES
            .iter()
            .chain(USER_NAV_PATHES.iter())
            .filter_map(|nav| Route::from_path(nav.path).map(|route| (nav, route)))
            .map(|(nav, route)| {
                let style = if route == self.route { button::primary } else { button::text };
                button(text(nav.title).size(16))
                    .style(style)
                    .on_press(Message::Navigate(route))
                    .into()
            });

        let logo: Element<Message> = match self.images.get(WHITE_LOGO_W_TEXT_URL) {
            Some(handle) => image(handle.clone()).height(32).into(),
            None => text("Moonstream").size(22).into(),
        };

        row![
            logo,
            Space::with_width(Length::Fill),
            Row::with_children(links).spacing(8),
        ]
        .padding([12, 24])
        .align_y(Alignment::Center)
        .into()
    }

    fn footer(&self) -> Element<Message> {
        let columns = FooterColumn::ALL.into_iter().map(|column| -> Element<Message> {
            let heading: Element<Message> = text(column.title()).size(14).into();
            let links = constants::footer_links(column).map(footer_link);
            Column::with_children(std::iter::once(heading).chain(links))
                .spacing(4)
                .width(Length::FillPortion(1))
                .into()
        });

        let blurb: Element<Message> = column![
            text(DEFAULT_METATAGS.description).size(12).color(Color::from_rgb(0.7, 0.7, 0.7)),
            text(DEFAULT_METATAGS.url).size(10).color(Color::from_rgb(0.5, 0.5, 0.5)),
        ]
        .width(Length::FillPortion(2))
        .into();

        container(
            Row::with_children(std::iter::once(blurb).chain(columns))
                .spacing(24)
                .padding([12, 24]),
        )
        .width(Length::Fill)
        .into()
    }

    fn title(&self) -> String {
        DEFAULT_METATAGS.title.to_string()
    }

    fn subscription(&self) -> Subscription<Message> {
        window::resize_events().map(|(_id, size)| Message::WindowResized(size))
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

/// Footer entry: in-app pages navigate, website pages copy their URL
fn footer_link(nav: &'static NavPath) -> Element<'static, Message> {
    let message = match Route::from_path(nav.path) {
        Some(route) => Message::Navigate(route),
        None => Message::CopyToClipboard(nav.url()),
    };
    button(text(nav.title).size(12))
        .style(button::text)
        .padding(0)
        .on_press(message)
        .into()
}

fn main() -> iced::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    log::debug!("Parsed arguments: {:?}", cli);

    iced::application(MoonstreamApp::title, MoonstreamApp::update, MoonstreamApp::view)
        .subscription(MoonstreamApp::subscription)
        .theme(MoonstreamApp::theme)
        .window_size(Size::new(1280.0, 800.0))
        .centered()
        .run_with(move || MoonstreamApp::new(cli))
}
