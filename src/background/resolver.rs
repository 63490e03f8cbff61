/// Responsive background resolver
///
/// Owns the variant table and the selected variant as one state object.
/// Everything that can change the selection (a load completing, a load
/// failing, the viewport crossing a breakpoint) goes through `update`.
use iced::widget::image::Handle;

use crate::error::AssetLoadFailure;
use crate::viewport::ViewportClass;

/// How the displayed variant is chosen among the loaded ones
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum SelectionPolicy {
    /// Largest loaded variant wins, whatever the window size
    #[default]
    HighestLoaded,
    /// Largest loaded variant whose breakpoint the window meets
    ViewportCapped,
}

/// One resolution of the background image
#[derive(Debug, Clone)]
pub struct Variant {
    /// Breakpoint min width in px, also the variant key
    pub min_width: u32,
    pub url: String,
    handle: Option<Handle>,
}

impl Variant {
    pub fn is_loaded(&self) -> bool {
        self.handle.is_some()
    }

    pub fn handle(&self) -> Option<&Handle> {
        self.handle.as_ref()
    }
}

/// Inputs to the resolver
#[derive(Debug, Clone)]
pub enum Event {
    Loaded {
        generation: u64,
        min_width: u32,
        handle: Handle,
    },
    Failed {
        generation: u64,
        min_width: u32,
        reason: AssetLoadFailure,
    },
    Viewport(ViewportClass),
}

#[derive(Debug)]
pub struct Resolver {
    /// Mount generation; events tagged with any other value are stale
    generation: u64,
    policy: SelectionPolicy,
    /// Ascending by `min_width`, keys unique
    variants: Vec<Variant>,
    viewport: ViewportClass,
    /// Index into `variants`, `None` only when there are no variants
    selected: Option<usize>,
}

impl Resolver {
    /// Build the table from `(min_width, url)` pairs.
    ///
    /// Pairs are sorted ascending; a repeated width keeps its first URL.
    pub fn new(
        generation: u64,
        policy: SelectionPolicy,
        pairs: Vec<(u32, String)>,
        viewport_width: f32,
    ) -> Self {
        let mut variants: Vec<Variant> = Vec::with_capacity(pairs.len());
        for (min_width, url) in pairs {
            if variants.iter().any(|v| v.min_width == min_width) {
                log::warn!("⚠️  Duplicate background tier {}px ignored", min_width);
                continue;
            }
            variants.push(Variant { min_width, url, handle: None });
        }
        variants.sort_by_key(|v| v.min_width);

        let widths: Vec<u32> = variants.iter().map(|v| v.min_width).collect();
        let viewport = ViewportClass::classify(&widths, viewport_width);

        let mut resolver = Resolver {
            generation,
            policy,
            variants,
            viewport,
            selected: None,
        };
        resolver.selected = resolver.select();
        resolver
    }

    /// Apply one event. Returns true when the selected variant changed.
    pub fn update(&mut self, event: Event) -> bool {
        match event {
            Event::Loaded { generation, min_width, handle } => {
                if generation != self.generation {
                    log::debug!("Dropping stale load of {}px (generation {})", min_width, generation);
                    return false;
                }
                let Some(variant) = self.variants.iter_mut().find(|v| v.min_width == min_width) else {
                    return false;
                };
                // Loaded flips false -> true once; repeats are ignored
                if variant.handle.is_some() {
                    return false;
                }
                variant.handle = Some(handle);
                log::debug!("🖼️  Background {}px loaded", min_width);
            }
            Event::Failed { generation, min_width, reason } => {
                if generation == self.generation {
                    log::warn!("⚠️  Background {}px unavailable: {}", min_width, reason);
                }
                // A failure never changes the table
                return false;
            }
            Event::Viewport(class) => {
                if class == self.viewport {
                    return false;
                }
                self.viewport = class;
            }
        }

        let next = self.select();
        if next != self.selected {
            if let Some(variant) = next.map(|i| &self.variants[i]) {
                log::info!("🔄 Background now {}px", variant.min_width);
            }
            self.selected = next;
            return true;
        }
        false
    }

    /// Recompute the selection from the current table and viewport
    fn select(&self) -> Option<usize> {
        if self.variants.is_empty() {
            return None;
        }

        let best = self
            .variants
            .iter()
            .enumerate()
            .rev()
            .find(|(index, variant)| {
                variant.is_loaded()
                    && match self.policy {
                        SelectionPolicy::HighestLoaded => true,
                        // The lowest tier is the fallback and always qualifies
                        SelectionPolicy::ViewportCapped => {
                            *index == 0 || self.viewport.meets(variant.min_width)
                        }
                    }
            })
            .map(|(index, _)| index);

        Some(best.unwrap_or(0))
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    /// Widths of all tiers, ascending
    pub fn breakpoints(&self) -> Vec<u32> {
        self.variants.iter().map(|v| v.min_width).collect()
    }

    pub fn selected(&self) -> Option<&Variant> {
        self.selected.map(|i| &self.variants[i])
    }

    pub fn selected_width(&self) -> Option<u32> {
        self.selected().map(|v| v.min_width)
    }

    /// Image to paint. `None` means paint the solid fallback colour:
    /// the selection is the lowest tier and even that has not loaded.
    pub fn background(&self) -> Option<&Handle> {
        self.selected().and_then(Variant::handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GEN: u64 = 7;

    fn pairs() -> Vec<(u32, String)> {
        [720, 1920, 2880, 3840]
            .into_iter()
            .map(|w| (w, format!("https://assets.test/product-background-{}.png", w)))
            .collect()
    }

    fn resolver(policy: SelectionPolicy, width: f32) -> Resolver {
        Resolver::new(GEN, policy, pairs(), width)
    }

    fn loaded(min_width: u32) -> Event {
        Event::Loaded {
            generation: GEN,
            min_width,
            handle: Handle::from_bytes(vec![min_width as u8]),
        }
    }

    fn failed(min_width: u32) -> Event {
        Event::Failed {
            generation: GEN,
            min_width,
            reason: AssetLoadFailure::Status(404),
        }
    }

    fn resized(r: &Resolver, width: f32) -> Event {
        Event::Viewport(ViewportClass::classify(&r.breakpoints(), width))
    }

    #[test]
    fn test_defaults_to_lowest_tier() {
        let r = resolver(SelectionPolicy::HighestLoaded, 1280.0);
        assert_eq!(r.selected_width(), Some(720));
        assert!(r.background().is_none());
    }

    #[test]
    fn test_upgrade_sequence() {
        let mut r = resolver(SelectionPolicy::HighestLoaded, 1280.0);

        assert!(r.update(loaded(1920)));
        assert_eq!(r.selected_width(), Some(1920));

        assert!(r.update(loaded(3840)));
        assert_eq!(r.selected_width(), Some(3840));

        // A repeated completion for 1920 must not pull the selection back
        assert!(!r.update(loaded(1920)));
        assert_eq!(r.selected_width(), Some(3840));

        // Neither does a lower tier loading late
        assert!(!r.update(loaded(720)));
        assert_eq!(r.selected_width(), Some(3840));
        assert!(r.background().is_some());
    }

    #[test]
    fn test_all_failures_keep_fallback() {
        let mut r = resolver(SelectionPolicy::HighestLoaded, 4000.0);
        for w in [720, 1920, 2880, 3840] {
            assert!(!r.update(failed(w)));
        }
        assert_eq!(r.selected_width(), Some(720));
        assert!(r.background().is_none());
    }

    #[test]
    fn test_selection_always_loaded_or_default() {
        // Every subset of tiers loading, in both policies
        let widths = [720, 1920, 2880, 3840];
        for policy in [SelectionPolicy::HighestLoaded, SelectionPolicy::ViewportCapped] {
            for mask in 0u8..16 {
                let mut r = resolver(policy, 2000.0);
                for (bit, w) in widths.iter().enumerate() {
                    if mask & (1 << bit) != 0 {
                        r.update(loaded(*w));
                    } else {
                        r.update(failed(*w));
                    }
                }
                let selected = r.selected().unwrap();
                assert!(
                    selected.is_loaded() || selected.min_width == 720,
                    "policy {:?} mask {:04b} picked unloaded {}",
                    policy,
                    mask,
                    selected.min_width
                );
            }
        }
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let mut r = resolver(SelectionPolicy::HighestLoaded, 1280.0);
        r.update(loaded(2880));
        let first = r.select();
        let second = r.select();
        assert_eq!(first, second);
        assert_eq!(r.selected, first);
    }

    #[test]
    fn test_order_of_completion_does_not_matter() {
        let orders = [[720, 1920, 2880, 3840], [3840, 2880, 1920, 720], [1920, 3840, 720, 2880]];
        for order in orders {
            let mut r = resolver(SelectionPolicy::HighestLoaded, 800.0);
            for w in order {
                r.update(loaded(w));
            }
            assert_eq!(r.selected_width(), Some(3840));
        }
    }

    #[test]
    fn test_stale_generation_is_ignored() {
        let mut r = resolver(SelectionPolicy::HighestLoaded, 1280.0);
        let stale = Event::Loaded {
            generation: GEN - 1,
            min_width: 3840,
            handle: Handle::from_bytes(vec![1]),
        };
        assert!(!r.update(stale));
        assert_eq!(r.selected_width(), Some(720));
        assert!(!r.variants().iter().any(Variant::is_loaded));
    }

    #[test]
    fn test_unknown_tier_is_ignored() {
        let mut r = resolver(SelectionPolicy::HighestLoaded, 1280.0);
        assert!(!r.update(loaded(1000)));
        assert_eq!(r.selected_width(), Some(720));
    }

    #[test]
    fn test_highest_loaded_ignores_viewport() {
        let mut r = resolver(SelectionPolicy::HighestLoaded, 400.0);
        r.update(loaded(3840));
        assert_eq!(r.selected_width(), Some(3840));
        let small = resized(&r, 300.0);
        assert!(!r.update(small));
        assert_eq!(r.selected_width(), Some(3840));
    }

    #[test]
    fn test_viewport_capped_policy() {
        let mut r = resolver(SelectionPolicy::ViewportCapped, 1000.0);
        r.update(loaded(1920));
        r.update(loaded(3840));
        // 1000px only qualifies for the 720 tier, which is the fallback
        assert_eq!(r.selected_width(), Some(720));

        let grow = resized(&r, 3840.0);
        assert!(r.update(grow));
        assert_eq!(r.selected_width(), Some(3840));

        // Shrinking below 3840 drops to the best loaded tier that still fits
        let shrink = resized(&r, 2000.0);
        assert!(r.update(shrink));
        assert_eq!(r.selected_width(), Some(1920));

        // Staying in the same band is not a change
        let same = resized(&r, 2100.0);
        assert!(!r.update(same));
    }

    #[test]
    fn test_pairs_are_sorted_and_deduplicated() {
        let pairs = vec![
            (3840, "big".to_string()),
            (720, "small".to_string()),
            (720, "other".to_string()),
        ];
        let r = Resolver::new(1, SelectionPolicy::HighestLoaded, pairs, 1280.0);
        assert_eq!(r.breakpoints(), vec![720, 3840]);
        assert_eq!(r.selected().unwrap().url, "small");
    }

    #[test]
    fn test_empty_table_selects_nothing() {
        let r = Resolver::new(1, SelectionPolicy::HighestLoaded, Vec::new(), 1280.0);
        assert!(r.selected().is_none());
        assert!(r.background().is_none());
    }
}
