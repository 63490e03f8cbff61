/// Progressive page background
///
/// This module handles:
/// - Choosing which resolution of the background to paint (resolver.rs)
/// - Downloading every resolution concurrently (loader.rs)
/// - Tying the downloads to the lifetime of the page that shows them

pub mod loader;
pub mod resolver;

use iced::task;
use iced::Task;

pub use resolver::{Event, Resolver, SelectionPolicy};

/// A mounted background: the resolver plus its in-flight downloads.
///
/// Dropping it aborts every download that has not completed yet.
pub struct Background {
    resolver: Resolver,
    loads: Vec<task::Handle>,
}

impl Background {
    /// Build the resolver and start one download per variant, all at once
    pub fn mount(
        generation: u64,
        policy: SelectionPolicy,
        pairs: Vec<(u32, String)>,
        viewport_width: f32,
        client: &reqwest::Client,
    ) -> (Self, Task<Event>) {
        let resolver = Resolver::new(generation, policy, pairs, viewport_width);

        let mut tasks = Vec::with_capacity(resolver.variants().len());
        let mut loads = Vec::with_capacity(resolver.variants().len());
        for variant in resolver.variants() {
            let min_width = variant.min_width;
            let (load, handle) = Task::perform(
                loader::fetch_image(client.clone(), variant.url.clone()),
                move |result| match result {
                    Ok(handle) => Event::Loaded { generation, min_width, handle },
                    Err(reason) => Event::Failed { generation, min_width, reason },
                },
            )
            .abortable();
            tasks.push(load);
            loads.push(handle.abort_on_drop());
        }

        log::info!(
            "🚀 Loading {} background variants (generation {}, {:?})",
            tasks.len(),
            generation,
            policy
        );

        (
            Background { resolver, loads },
            Task::batch(tasks),
        )
    }

    pub fn update(&mut self, event: Event) -> bool {
        self.resolver.update(event)
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }
}

impl std::fmt::Debug for Background {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Background")
            .field("resolver", &self.resolver)
            .field("pending_loads", &self.loads.len())
            .finish()
    }
}

/// Route an event to the mounted background, if any.
///
/// Completions that arrive after the page was torn down land here with
/// `None` and are dropped.
pub fn deliver(background: Option<&mut Background>, event: Event) -> bool {
    match background {
        Some(background) => background.update(event),
        None => {
            log::debug!("Background event after teardown dropped");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iced::widget::image::Handle;

    #[test]
    fn test_event_after_teardown_is_dropped() {
        let event = Event::Loaded {
            generation: 1,
            min_width: 1920,
            handle: Handle::from_bytes(vec![0u8]),
        };
        assert!(!deliver(None, event));
    }

    #[test]
    fn test_mount_starts_one_load_per_variant() {
        let client = reqwest::Client::new();
        let pairs = vec![
            (720, "http://127.0.0.1:9/720.png".to_string()),
            (1920, "http://127.0.0.1:9/1920.png".to_string()),
        ];
        let (mut background, _task) =
            Background::mount(3, SelectionPolicy::HighestLoaded, pairs, 1280.0, &client);
        assert_eq!(background.loads.len(), 2);
        assert_eq!(background.resolver().generation(), 3);

        let event = Event::Loaded {
            generation: 3,
            min_width: 1920,
            handle: Handle::from_bytes(vec![0u8]),
        };
        assert!(deliver(Some(&mut background), event));
        assert_eq!(background.resolver().selected_width(), Some(1920));
    }

    fn tiers() -> Vec<(u32, String)> {
        [720, 1920, 3840]
            .into_iter()
            .map(|w| (w, format!("http://127.0.0.1:9/{}.png", w)))
            .collect()
    }

    #[test]
    fn test_remount_drops_loads_of_the_previous_mount() {
        let client = reqwest::Client::new();

        // Product page
        let (first, _task) = Background::mount(1, SelectionPolicy::HighestLoaded, tiers(), 1280.0, &client);
        // Clones share the abort flag of the originals
        let watchers: Vec<task::Handle> = first.loads.clone();
        assert!(watchers.iter().all(|handle| !handle.is_aborted()));
        let mut mounted = Some(first);

        // Subscriptions page: the background goes away
        drop(mounted.take());
        assert!(watchers.iter().all(task::Handle::is_aborted));
        let late = Event::Loaded {
            generation: 1,
            min_width: 3840,
            handle: Handle::from_bytes(vec![0u8]),
        };
        assert!(!deliver(mounted.as_mut(), late.clone()));

        // Back to the product page with a fresh generation
        let (second, _task) = Background::mount(2, SelectionPolicy::HighestLoaded, tiers(), 1280.0, &client);
        mounted = Some(second);
        assert!(!deliver(mounted.as_mut(), late));

        let background = mounted.as_ref().unwrap();
        assert!(!background.resolver().variants().iter().any(|v| v.is_loaded()));
        assert_eq!(background.resolver().selected_width(), Some(720));
        assert!(background.resolver().background().is_none());
        assert!(background.loads.iter().all(|handle| !handle.is_aborted()));
    }
}
