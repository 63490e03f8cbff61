/// Remote images that are not part of the background (icons, feature art)
///
/// Each URL is fetched at most once per run; a failed fetch is remembered
/// so the view can fall back instead of retrying.
use iced::widget::image::Handle;
use iced::Task;
use std::collections::HashMap;

use crate::background::loader;
use crate::error::AssetLoadFailure;

#[derive(Debug, Clone)]
pub enum Slot {
    Loading,
    Ready(Handle),
    Failed,
}

#[derive(Debug, Clone)]
pub struct ImageLoaded {
    pub url: String,
    pub result: Result<Handle, AssetLoadFailure>,
}

#[derive(Debug, Default)]
pub struct RemoteImages {
    slots: HashMap<String, Slot>,
}

impl RemoteImages {
    /// Start fetching every URL not seen before
    pub fn request<'a>(
        &mut self,
        urls: impl IntoIterator<Item = &'a str>,
        client: &reqwest::Client,
    ) -> Task<ImageLoaded> {
        let mut tasks = Vec::new();
        for url in urls {
            if self.slots.contains_key(url) {
                continue;
            }
            self.slots.insert(url.to_string(), Slot::Loading);
            let owned = url.to_string();
            tasks.push(Task::perform(
                loader::fetch_image(client.clone(), owned.clone()),
                move |result| ImageLoaded { url: owned.clone(), result },
            ));
        }
        Task::batch(tasks)
    }

    pub fn apply(&mut self, loaded: ImageLoaded) {
        let slot = match loaded.result {
            Ok(handle) => Slot::Ready(handle),
            Err(reason) => {
                log::warn!("⚠️  Image {} unavailable: {}", loaded.url, reason);
                Slot::Failed
            }
        };
        self.slots.insert(loaded.url, slot);
    }

    pub fn get(&self, url: &str) -> Option<&Handle> {
        match self.slots.get(url) {
            Some(Slot::Ready(handle)) => Some(handle),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_url_requested_once() {
        let client = reqwest::Client::new();
        let mut images = RemoteImages::default();
        let _ = images.request(["http://127.0.0.1:9/a.png", "http://127.0.0.1:9/a.png"], &client);
        assert!(matches!(images.slots.get("http://127.0.0.1:9/a.png"), Some(Slot::Loading)));
        assert_eq!(images.slots.len(), 1);
    }

    #[test]
    fn test_apply_records_outcome() {
        let mut images = RemoteImages::default();
        images.apply(ImageLoaded { url: "ok".into(), result: Ok(Handle::from_bytes(vec![1u8])) });
        images.apply(ImageLoaded { url: "bad".into(), result: Err(AssetLoadFailure::Status(404)) });
        assert!(images.get("ok").is_some());
        assert!(images.get("bad").is_none());
        assert!(matches!(images.slots.get("bad"), Some(Slot::Failed)));
    }
}
