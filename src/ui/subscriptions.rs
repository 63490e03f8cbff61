/// Subscriptions table
///
/// Token icon, inline-editable label, copyable address, creation date and
/// a delete action that asks for confirmation first.
use iced::widget::{button, column, container, image, row, scrollable, text, text_input, Column, Space};
use iced::{Alignment, Color, Element, Length, Task};
use std::collections::HashMap;
use std::ops::Range;

use super::images::RemoteImages;
use crate::constants::PAGE_SIZE;
use crate::state::cache::{QueryStatus, SubscriptionsCache};
use crate::state::data::{Subscription, SubscriptionKind};
use crate::state::edit::SubscriptionPatch;

#[derive(Debug, Clone)]
pub enum TableMessage {
    EditLabel { id: String, value: String },
    SubmitLabel(String),
    CancelEdit(String),
    RequestDelete(String),
    ConfirmDelete,
    CancelDelete,
    CopyAddress(String),
    Refresh,
    PreviousPage,
    NextPage,
}

/// View-local state; the data itself lives in the cache
#[derive(Debug, Default)]
pub struct SubscriptionsTable {
    /// Label drafts being typed, by subscription id
    drafts: HashMap<String, String>,
    /// Row waiting for delete confirmation
    confirm_delete: Option<String>,
    /// Zero-based page, clamped against the list length when rendered
    page: usize,
}

/// What the table wants the application to do next
pub enum Action {
    None,
    Cache(Task<crate::state::cache::CacheEvent>),
    Copy(String),
}

impl SubscriptionsTable {
    pub fn update(&mut self, message: TableMessage, cache: &mut SubscriptionsCache) -> Action {
        match message {
            TableMessage::EditLabel { id, value } => {
                self.drafts.insert(id, value);
                Action::None
            }
            TableMessage::SubmitLabel(id) => {
                let Some(draft) = self.drafts.remove(&id) else {
                    return Action::None;
                };
                let unchanged = cache
                    .data()
                    .and_then(|list| list.subscriptions.iter().find(|s| s.id == id))
                    .is_some_and(|s| s.label == draft);
                if unchanged {
                    return Action::None;
                }
                Action::Cache(cache.update(id, SubscriptionPatch::label(draft)))
            }
            TableMessage::CancelEdit(id) => {
                self.drafts.remove(&id);
                Action::None
            }
            TableMessage::RequestDelete(id) => {
                self.confirm_delete = Some(id);
                Action::None
            }
            TableMessage::ConfirmDelete => match self.confirm_delete.take() {
                Some(id) => Action::Cache(cache.delete(id)),
                None => Action::None,
            },
            TableMessage::CancelDelete => {
                self.confirm_delete = None;
                Action::None
            }
            TableMessage::CopyAddress(address) => Action::Copy(address),
            TableMessage::Refresh => Action::Cache(cache.list()),
            TableMessage::PreviousPage => {
                self.clamp_page(cache);
                self.page = self.page.saturating_sub(1);
                Action::None
            }
            TableMessage::NextPage => {
                self.clamp_page(cache);
                if (self.page + 1) * PAGE_SIZE < row_count(cache) {
                    self.page += 1;
                }
                Action::None
            }
        }
    }

    /// Pull the page back onto the list after it shrank
    pub fn clamp_page(&mut self, cache: &SubscriptionsCache) {
        self.page = self.page.min(last_page(row_count(cache)));
    }

    pub fn draft(&self, id: &str) -> Option<&str> {
        self.drafts.get(id).map(String::as_str)
    }

    pub fn view<'a>(&'a self, cache: &'a SubscriptionsCache, images: &'a RemoteImages) -> Element<'a, TableMessage> {
        let toolbar = row![
            text("Subscriptions").size(28),
            Space::with_width(Length::Fill),
            status_line(cache),
            button(text("Refresh").size(14)).on_press(TableMessage::Refresh).style(button::secondary),
        ]
        .spacing(12)
        .align_y(Alignment::Center);

        let body: Element<'a, TableMessage> = match cache.data() {
            Some(list) => {
                let header = row![
                    cell(text("Token").size(12), 1),
                    cell(text("Label").size(12), 4),
                    cell(text("Address").size(12), 4),
                    cell(text("Date Created").size(12), 2),
                    cell(text("Actions").size(12), 2),
                ]
                .spacing(8);

                let len = list.subscriptions.len();
                let range = page_range(len, self.page);
                let rows = Column::with_children(
                    list.subscriptions[range.clone()].iter().map(|s| self.row(s, cache, images)),
                )
                .spacing(4);

                column![header, scrollable(rows).height(Length::Fill), pager(range, len)]
                    .spacing(8)
                    .into()
            }
            None if cache.is_loading() => container(text("Loading subscriptions…").size(16))
                .padding(24)
                .into(),
            None => Space::new(Length::Fill, Length::Shrink).into(),
        };

        column![toolbar, body].spacing(16).padding(24).into()
    }

    fn row<'a>(
        &'a self,
        subscription: &'a Subscription,
        cache: &'a SubscriptionsCache,
        images: &'a RemoteImages,
    ) -> Element<'a, TableMessage> {
        let kind = subscription.kind().display();
        let icon: Element<'a, TableMessage> = match kind.icon_url.and_then(|url| images.get(url)) {
            Some(handle) => image(handle.clone()).height(32).into(),
            None => text(kind.label.chars().next().unwrap_or('?').to_string()).size(20).into(),
        };

        let id = subscription.id.clone();
        let label_value = self.draft(&subscription.id).unwrap_or(&subscription.label);
        let label = text_input("enter note here", label_value)
            .on_input(move |value| TableMessage::EditLabel { id: id.clone(), value })
            .on_submit(TableMessage::SubmitLabel(subscription.id.clone()))
            .size(14);

        let address = button(text(&subscription.address).size(14))
            .style(button::text)
            .padding(0)
            .on_press(TableMessage::CopyAddress(subscription.address.clone()));

        let pending = cache.is_pending(&subscription.id);
        let actions: Element<'a, TableMessage> = if pending {
            text("…").size(14).into()
        } else if self.confirm_delete.as_deref() == Some(subscription.id.as_str()) {
            row![
                text("Delete subscription? please confirm").size(12),
                button(text("Delete").size(12)).style(button::danger).on_press(TableMessage::ConfirmDelete),
                button(text("Cancel").size(12)).style(button::secondary).on_press(TableMessage::CancelDelete),
            ]
            .spacing(6)
            .align_y(Alignment::Center)
            .into()
        } else {
            let mut buttons = row![button(text("Delete").size(12))
                .style(button::text)
                .on_press(TableMessage::RequestDelete(subscription.id.clone()))]
            .spacing(6);
            if self.drafts.contains_key(&subscription.id) {
                buttons = buttons.push(
                    button(text("Undo").size(12))
                        .style(button::text)
                        .on_press(TableMessage::CancelEdit(subscription.id.clone())),
                );
            }
            buttons.into()
        };

        row![
            cell(icon, 1),
            cell(label, 4),
            cell(address, 4),
            cell(text(subscription.created_date()).size(14), 2),
            cell(actions, 2),
        ]
        .spacing(8)
        .align_y(Alignment::Center)
        .into()
    }
}

fn cell<'a>(content: impl Into<Element<'a, TableMessage>>, portion: u16) -> Element<'a, TableMessage> {
    container(content)
        .width(Length::FillPortion(portion))
        .padding([4, 0])
        .into()
}

fn row_count(cache: &SubscriptionsCache) -> usize {
    cache.data().map_or(0, |list| list.subscriptions.len())
}

fn last_page(len: usize) -> usize {
    len.saturating_sub(1) / PAGE_SIZE
}

/// Rows shown on `page`; a page past the end shows the last one
fn page_range(len: usize, page: usize) -> Range<usize> {
    let start = page.min(last_page(len)) * PAGE_SIZE;
    start.min(len)..(start + PAGE_SIZE).min(len)
}

fn pager<'a>(range: Range<usize>, len: usize) -> Element<'a, TableMessage> {
    let previous = button(text("Previous").size(12))
        .style(button::secondary)
        .on_press_maybe((range.start > 0).then_some(TableMessage::PreviousPage));
    let next = button(text("Next").size(12))
        .style(button::secondary)
        .on_press_maybe((range.end < len).then_some(TableMessage::NextPage));
    let shown = if len == 0 {
        "No subscriptions".to_string()
    } else {
        format!("{}-{} of {}", range.start + 1, range.end, len)
    };
    row![previous, text(shown).size(12), next]
        .spacing(12)
        .align_y(Alignment::Center)
        .into()
}

fn status_line<'a>(cache: &'a SubscriptionsCache) -> Element<'a, TableMessage> {
    let (message, color) = match cache.status() {
        QueryStatus::Idle => (String::new(), Color::WHITE),
        QueryStatus::Loading => ("Refreshing…".to_string(), Color::from_rgb(0.7, 0.7, 0.7)),
        QueryStatus::Ready => match cache.fetched_at() {
            Some(at) => (format!("Updated {}", at.format("%H:%M:%S")), Color::from_rgb(0.6, 0.8, 0.6)),
            None => (String::new(), Color::WHITE),
        },
        QueryStatus::Failed(reason) => (reason.clone(), Color::from_rgb(0.9, 0.4, 0.4)),
    };
    text(message).size(12).color(color).into()
}

/// Icons the table can show, fetched once on startup
pub fn icon_urls() -> impl Iterator<Item = &'static str> {
    SubscriptionKind::icon_urls()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MoonstreamClient;
    use crate::state::cache::CacheEvent;
    use crate::state::data::SubscriptionsList;
    use chrono::Utc;

    fn subscription(id: &str) -> Subscription {
        Subscription {
            id: id.into(),
            address: "0xabc".into(),
            color: "#fff".into(),
            label: "cold".into(),
            user_id: "u".into(),
            subscription_type_id: "ethereum_blockchain".into(),
            created_at: None,
        }
    }

    fn cache_with(count: usize) -> SubscriptionsCache {
        let mut cache = SubscriptionsCache::new(MoonstreamClient::new("https://api.test", None, true));
        let subscriptions = (1..=count).map(|i| subscription(&format!("s{}", i))).collect();
        cache.seed(SubscriptionsList { subscriptions }, Utc::now());
        cache
    }

    fn seeded_cache() -> SubscriptionsCache {
        cache_with(1)
    }

    #[test]
    fn test_submit_unchanged_label_is_a_no_op() {
        let mut cache = seeded_cache();
        let mut table = SubscriptionsTable::default();
        table.update(TableMessage::EditLabel { id: "s1".into(), value: "cold".into() }, &mut cache);
        let action = table.update(TableMessage::SubmitLabel("s1".into()), &mut cache);
        assert!(matches!(action, Action::None));
        assert!(!cache.is_pending("s1"));
        assert!(table.draft("s1").is_none());
    }

    #[test]
    fn test_submit_changed_label_goes_to_cache() {
        let mut cache = seeded_cache();
        let mut table = SubscriptionsTable::default();
        table.update(TableMessage::EditLabel { id: "s1".into(), value: "hot".into() }, &mut cache);
        assert_eq!(table.draft("s1"), Some("hot"));
        let action = table.update(TableMessage::SubmitLabel("s1".into()), &mut cache);
        assert!(matches!(action, Action::Cache(_)));
        assert!(cache.is_pending("s1"));
    }

    #[test]
    fn test_delete_needs_confirmation() {
        let mut cache = seeded_cache();
        let mut table = SubscriptionsTable::default();

        table.update(TableMessage::RequestDelete("s1".into()), &mut cache);
        assert!(!cache.is_pending("s1"));
        table.update(TableMessage::CancelDelete, &mut cache);
        assert!(matches!(table.update(TableMessage::ConfirmDelete, &mut cache), Action::None));

        table.update(TableMessage::RequestDelete("s1".into()), &mut cache);
        let action = table.update(TableMessage::ConfirmDelete, &mut cache);
        assert!(matches!(action, Action::Cache(_)));
        assert!(cache.is_pending("s1"));
    }

    #[test]
    fn test_copy_address() {
        let mut cache = seeded_cache();
        let mut table = SubscriptionsTable::default();
        let action = table.update(TableMessage::CopyAddress("0xabc".into()), &mut cache);
        assert!(matches!(action, Action::Copy(address) if address == "0xabc"));
    }

    #[test]
    fn test_page_range() {
        assert_eq!(page_range(0, 0), 0..0);
        assert_eq!(page_range(5, 0), 0..5);
        assert_eq!(page_range(45, 1), PAGE_SIZE..2 * PAGE_SIZE);
        assert_eq!(page_range(45, 2), 2 * PAGE_SIZE..45);
        // Past the end clamps to the last page
        assert_eq!(page_range(45, 9), 2 * PAGE_SIZE..45);
    }

    #[test]
    fn test_paging_stops_at_the_ends() {
        let mut cache = cache_with(PAGE_SIZE + 1);
        let mut table = SubscriptionsTable::default();

        table.update(TableMessage::PreviousPage, &mut cache);
        assert_eq!(table.page, 0);
        table.update(TableMessage::NextPage, &mut cache);
        assert_eq!(table.page, 1);
        table.update(TableMessage::NextPage, &mut cache);
        assert_eq!(table.page, 1);
        table.update(TableMessage::PreviousPage, &mut cache);
        assert_eq!(table.page, 0);
    }

    #[test]
    fn test_previous_moves_after_pressing_next_past_the_end() {
        let mut cache = cache_with(PAGE_SIZE + 1);
        let mut table = SubscriptionsTable::default();
        for _ in 0..5 {
            table.update(TableMessage::NextPage, &mut cache);
        }
        assert_eq!(table.page, 1);
        table.update(TableMessage::PreviousPage, &mut cache);
        assert_eq!(table.page, 0);
    }

    #[test]
    fn test_page_follows_list_after_deletes() {
        let mut cache = cache_with(45);
        let mut table = SubscriptionsTable::default();
        table.update(TableMessage::NextPage, &mut cache);
        table.update(TableMessage::NextPage, &mut cache);
        assert_eq!(table.page, 2);

        for i in 22..=45 {
            let id = format!("s{}", i);
            cache.apply(CacheEvent::Deleted { id, result: Ok(()) });
        }
        assert_eq!(row_count(&cache), 21);

        table.clamp_page(&cache);
        assert_eq!(table.page, 1);
        assert_eq!(page_range(21, table.page), PAGE_SIZE..21);

        table.update(TableMessage::PreviousPage, &mut cache);
        assert_eq!(table.page, 0);
    }

    #[test]
    fn test_previous_after_shrink_without_clamp() {
        // Same shrink, but the next thing the table sees is Previous
        let mut cache = cache_with(45);
        let mut table = SubscriptionsTable::default();
        table.update(TableMessage::NextPage, &mut cache);
        table.update(TableMessage::NextPage, &mut cache);
        cache.apply(CacheEvent::Listed(Ok(SubscriptionsList {
            subscriptions: (1..=21).map(|i| subscription(&format!("s{}", i))).collect(),
        })));
        table.update(TableMessage::PreviousPage, &mut cache);
        assert_eq!(table.page, 0);
    }
}
