/// Site-wide constants: navigation, metadata and shared enumerations

/// Default Moonstream API server
pub const DEFAULT_API_URL: &str = "https://api.moonstream.to";

/// Public site, used to turn relative navigation paths into links
pub const SITE_URL: &str = "https://www.moonstream.to";

pub const AWS_ASSETS_PATH: &str = "https://s3.amazonaws.com/static.simiotics.com/moonstream/assets";
pub const WHITE_LOGO_W_TEXT_URL: &str =
    "https://s3.amazonaws.com/static.simiotics.com/moonstream/assets/moon-logo%2Btext-white.png";

/// Page size for paginated API listings
pub const PAGE_SIZE: usize = 20;

/// Bugout journal endpoints
#[allow(dead_code)]
pub mod bugout_endpoints {
    pub const USAGE: &str = "usage";
    pub const WEB: &str = "parasite";
}

/// Page metadata shown in the window title and the footer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetaTags {
    pub title: &'static str,
    pub description: &'static str,
    #[allow(dead_code)]
    pub keywords: &'static str,
    pub url: &'static str,
    #[allow(dead_code)]
    pub image: &'static str,
}

pub const DEFAULT_METATAGS: MetaTags = MetaTags {
    title: "Moonstream: Building blocks for your blockchain economy",
    description: "Moonstream DAO makes tools that help you build, manage, and secure your blockchain economy.",
    keywords: "analytics, blockchain analytics, protocol, protocols, blockchain, crypto, data, NFT gaming, smart contracts, web3, smart contract, ethereum, polygon, matic, transactions, defi, finance, decentralized, mempool, NFT, NFTs, DAO, DAOs, cryptocurrency, cryptocurrencies, bitcoin, blockchain economy, marketplace, blockchain security, loyalty program, Ethereum bridge, Ethereum bridges, NFT game, NFT games",
    url: "https://www.moonstream.to",
    image: "https://s3.amazonaws.com/static.simiotics.com/moonstream/assets/crypto+traders.png",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FooterColumn {
    News,
    Company,
    Product,
}

impl FooterColumn {
    pub const ALL: [FooterColumn; 3] = [FooterColumn::News, FooterColumn::Company, FooterColumn::Product];

    pub fn title(self) -> &'static str {
        match self {
            FooterColumn::News => "News",
            FooterColumn::Company => "Company",
            FooterColumn::Product => "Product",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavPath {
    pub title: &'static str,
    pub path: &'static str,
    pub footer_category: Option<FooterColumn>,
}

impl NavPath {
    /// Absolute URL for the path (external paths are returned unchanged)
    pub fn url(&self) -> String {
        if self.path.starts_with("http://") || self.path.starts_with("https://") {
            self.path.to_string()
        } else {
            format!("{}{}", SITE_URL, self.path)
        }
    }
}

pub const ALL_NAV_PATHES: [NavPath; 6] = [
    NavPath { title: "Product", path: "/product", footer_category: Some(FooterColumn::Product) },
    NavPath { title: "Team", path: "/team", footer_category: Some(FooterColumn::Company) },
    NavPath { title: "Docs", path: "/docs", footer_category: Some(FooterColumn::Product) },
    NavPath { title: "Whitepapers", path: "/whitepapers", footer_category: Some(FooterColumn::Product) },
    NavPath { title: "Blog", path: "https://blog.moonstream.to", footer_category: Some(FooterColumn::News) },
    NavPath { title: "Status", path: "/status", footer_category: Some(FooterColumn::Product) },
];

pub const USER_NAV_PATHES: [NavPath; 2] = [
    NavPath { title: "Learn how to use Moonstream", path: "/welcome", footer_category: None },
    NavPath { title: "Subscriptions", path: "/subscriptions", footer_category: None },
];

/// Navigation entries filed under `column`, in declaration order
pub fn footer_links(column: FooterColumn) -> impl Iterator<Item = &'static NavPath> {
    ALL_NAV_PATHES
        .iter()
        .filter(move |nav| nav.footer_category == Some(column))
}

/// Time ranges in seconds
#[allow(dead_code)]
pub mod time_range_seconds {
    pub const DAY: u64 = 86_400;
    pub const WEEK: u64 = DAY * 7;
    pub const MONTH: u64 = DAY * 28;
}

// Dashboard values, kept in step with the web client
#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartMetric {
    Generic,
    Functions,
    Events,
}

#[allow(dead_code)]
impl ChartMetric {
    /// Wire value expected by the dashboards API
    pub fn as_str(self) -> &'static str {
        match self {
            // Yes, "genetic": this is what the API stores
            ChartMetric::Generic => "genetic",
            ChartMetric::Functions => "function",
            ChartMetric::Events => "event",
        }
    }
}

/// Dashboard update actions, discriminants are the wire codes
#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum DashboardUpdateAction {
    RenameDashboard = 0,
    AppendMetric = 1,
    DropMetric = 2,
    AppendSubscription = 4,
    DropSubscription = 6,
    OverrideDashboard = 7,
    OverrideSubscription = 8,
    ResetToDefault = 9,
}

#[allow(dead_code)]
impl DashboardUpdateAction {
    const ALL: [DashboardUpdateAction; 8] = [
        DashboardUpdateAction::RenameDashboard,
        DashboardUpdateAction::AppendMetric,
        DashboardUpdateAction::DropMetric,
        DashboardUpdateAction::AppendSubscription,
        DashboardUpdateAction::DropSubscription,
        DashboardUpdateAction::OverrideDashboard,
        DashboardUpdateAction::OverrideSubscription,
        DashboardUpdateAction::ResetToDefault,
    ];

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.code() == code)
    }
}

#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum DashboardSettingScope {
    /// Whole array of methods, events or generics
    MetricsArray = 1,
    /// One metric, by name
    MetricName = 2,
    /// Whole subscription_setting object, keeping the subscription id
    MetricsAll = 3,
}

#[allow(dead_code)]
pub const GENERIC_METRICS: [&str; 5] = [
    "transactions_in",
    "transactions_out",
    "value_in",
    "value_out",
    "balance",
];

/// Product page background tiers as `(min_width, url)`, ascending
pub fn product_background_variants(assets_path: &str) -> Vec<(u32, String)> {
    let assets_path = assets_path.trim_end_matches('/');
    [(720, "720x405"), (1920, "1920x1080"), (2880, "2880x1620"), (3840, "3840x2160")]
        .into_iter()
        .map(|(width, size)| (width, format!("{}/product-background-{}.png", assets_path, size)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_footer_links_by_column() {
        let product: Vec<&str> = footer_links(FooterColumn::Product).map(|n| n.title).collect();
        assert_eq!(product, vec!["Product", "Docs", "Whitepapers", "Status"]);
        let news: Vec<&str> = footer_links(FooterColumn::News).map(|n| n.title).collect();
        assert_eq!(news, vec!["Blog"]);
    }

    #[test]
    fn test_nav_urls() {
        assert_eq!(ALL_NAV_PATHES[1].url(), "https://www.moonstream.to/team");
        assert_eq!(ALL_NAV_PATHES[4].url(), "https://blog.moonstream.to");
    }

    #[test]
    fn test_time_ranges() {
        assert_eq!(time_range_seconds::WEEK, 604_800);
        assert_eq!(time_range_seconds::MONTH, 2_419_200);
    }

    #[test]
    fn test_dashboard_action_codes() {
        assert_eq!(DashboardUpdateAction::DropSubscription.code(), 6);
        assert_eq!(DashboardUpdateAction::from_code(9), Some(DashboardUpdateAction::ResetToDefault));
        assert_eq!(DashboardUpdateAction::from_code(3), None);
        assert_eq!(DashboardSettingScope::MetricName as u8, 2);
    }

    #[test]
    fn test_background_variants() {
        let variants = product_background_variants("https://cdn.test/assets/");
        assert_eq!(variants.len(), 4);
        assert_eq!(variants[0], (720, "https://cdn.test/assets/product-background-720x405.png".to_string()));
        assert_eq!(variants[3].0, 3840);
        assert!(variants.windows(2).all(|w| w[0].0 < w[1].0));
    }
}
