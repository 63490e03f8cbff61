/// Viewport classification
///
/// Turns the raw window width reported by iced into the two kinds of
/// breakpoint information the pages need:
/// - `ViewportClass`: "at least N px wide" flags for the background tiers
/// - `Breakpoint`: the named layout breakpoints (base..2xl) that drive
///   button sizes, page margins and the mobile layout switch

/// Width below which the layout collapses to a single column
pub const MOBILE_MAX_WIDTH: f32 = 768.0;

/// Breakpoint membership flags for a fixed, ascending list of tier widths.
///
/// Recomputed on every resize; two classes compare equal when every flag
/// matches, so a resize inside one band does not count as a change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewportClass {
    flags: Vec<(u32, bool)>,
}

impl ViewportClass {
    /// Classify `width` against `breakpoints` (min widths in px)
    pub fn classify(breakpoints: &[u32], width: f32) -> Self {
        let flags = breakpoints
            .iter()
            .map(|&min_width| (min_width, width >= min_width as f32))
            .collect();
        Self { flags }
    }

    /// Whether the viewport is at least `min_width` px wide.
    ///
    /// Widths that are not one of the tracked breakpoints never qualify.
    pub fn meets(&self, min_width: u32) -> bool {
        self.flags
            .iter()
            .any(|&(width, qualifies)| width == min_width && qualifies)
    }

    /// Largest tracked breakpoint the viewport meets
    pub fn widest(&self) -> Option<u32> {
        self.flags
            .iter()
            .filter(|(_, qualifies)| *qualifies)
            .map(|(width, _)| *width)
            .max()
    }
}

/// Named layout breakpoints (480 / 768 / 992 / 1280 / 1536 px)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Breakpoint {
    Base,
    Sm,
    Md,
    Lg,
    Xl,
    Xxl,
}

impl Breakpoint {
    pub fn from_width(width: f32) -> Self {
        match width {
            w if w >= 1536.0 => Breakpoint::Xxl,
            w if w >= 1280.0 => Breakpoint::Xl,
            w if w >= 992.0 => Breakpoint::Lg,
            w if w >= 768.0 => Breakpoint::Md,
            w if w >= 480.0 => Breakpoint::Sm,
            _ => Breakpoint::Base,
        }
    }

    /// Button sizes for a lone button and for a pair of buttons side by side
    pub fn button_sizes(self) -> ButtonSizes {
        use ButtonSize::*;
        match self {
            Breakpoint::Base => ButtonSizes { single: Sm, double: Xs },
            Breakpoint::Sm | Breakpoint::Md => ButtonSizes { single: Md, double: Sm },
            Breakpoint::Lg | Breakpoint::Xl | Breakpoint::Xxl => {
                ButtonSizes { single: Lg, double: Lg }
            }
        }
    }

    /// Horizontal page margin as a fraction of the window width
    pub fn page_margin(self) -> f32 {
        match self {
            Breakpoint::Base => 0.01,
            Breakpoint::Sm => 0.02,
            Breakpoint::Md => 0.03,
            Breakpoint::Lg => 0.15,
            Breakpoint::Xl => 0.20,
            Breakpoint::Xxl => 0.25,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonSize {
    Xs,
    Sm,
    Md,
    Lg,
}

impl ButtonSize {
    pub fn text_size(self) -> f32 {
        match self {
            ButtonSize::Xs => 12.0,
            ButtonSize::Sm => 14.0,
            ButtonSize::Md => 16.0,
            ButtonSize::Lg => 18.0,
        }
    }

    pub fn padding(self) -> [f32; 2] {
        match self {
            ButtonSize::Xs => [2.0, 8.0],
            ButtonSize::Sm => [4.0, 12.0],
            ButtonSize::Md => [8.0, 16.0],
            ButtonSize::Lg => [10.0, 24.0],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonSizes {
    pub single: ButtonSize,
    pub double: ButtonSize,
}

/// Last observed window width plus everything derived from it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        // Assume a desktop window until iced reports the real size
        Self { width: 1280.0 }
    }
}

impl Viewport {
    pub fn breakpoint(&self) -> Breakpoint {
        Breakpoint::from_width(self.width)
    }

    pub fn is_mobile(&self) -> bool {
        self.width < MOBILE_MAX_WIDTH
    }
}
