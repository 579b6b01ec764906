#![forbid(unsafe_code)]

//! A whole page, headless.
//!
//! [`HeadlessPage`] wires every feature controller to the in-memory fakes and
//! a deterministic clock, the same way `folio-web` wires them to `web_sys`
//! elements and `setTimeout`. Scenario tests drive it with clicks, scrolls and
//! [`HeadlessPage::advance`] instead of a browser.

use core::time::Duration;
use std::collections::BTreeMap;

use crate::anchor::{AnchorOutcome, handle_anchor_click};
use crate::button::{PendingRestore, begin_loading};
use crate::clipboard::{Banner, ClipboardError, copy_to_clipboard};
use crate::config::{Features, FolioConfig};
use crate::debounce::Debouncer;
use crate::error::Result;
use crate::fake::{
    FakeBody, FakeButton, FakeCard, FakeClipboard, FakeField, FakeImage, FakeSection, FakeStyle,
    FakeToggle,
};
use crate::form::{SubmitOutcome, validate_submission};
use crate::lazy::{LazyImageTracker, LazyStep};
use crate::nav::NavMenu;
use crate::navbar::apply_navbar_style;
use crate::reveal::{IntersectionEntry, reveal_intersecting};
use crate::scheduler::{DeterministicClock, TimerQueue};
use crate::state::UiState;
use crate::storage::{MemoryStore, PreferenceStore, StorageError};
use crate::theme::DarkMode;

/// Which elements the rendered document contains.
#[derive(Debug, Clone, Default)]
pub struct PageFixture {
    nav: bool,
    nav_links: usize,
    sections: Vec<String>,
    navbar: bool,
    form: Option<Vec<String>>,
    cards: usize,
    images: Vec<String>,
    buttons: Vec<(String, bool)>,
    intersection_observer: bool,
}

impl PageFixture {
    /// An empty document in a browser with `IntersectionObserver`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            intersection_observer: true,
            ..Self::default()
        }
    }

    /// Add the nav toggle, the menu and `links` nav links.
    #[must_use]
    pub fn with_nav(mut self, links: usize) -> Self {
        self.nav = true;
        self.nav_links = links;
        self
    }

    #[must_use]
    pub fn with_section(mut self, id: &str) -> Self {
        self.sections.push(id.to_owned());
        self
    }

    #[must_use]
    pub fn with_navbar(mut self) -> Self {
        self.navbar = true;
        self
    }

    /// Add the contact form with one required field per value.
    #[must_use]
    pub fn with_form(mut self, values: &[&str]) -> Self {
        self.form = Some(values.iter().map(|v| (*v).to_owned()).collect());
        self
    }

    #[must_use]
    pub fn with_cards(mut self, count: usize) -> Self {
        self.cards = count;
        self
    }

    #[must_use]
    pub fn with_image(mut self, data_src: &str) -> Self {
        self.images.push(data_src.to_owned());
        self
    }

    /// Add a `.btn`; `submit` decides whether it gets the loading state.
    #[must_use]
    pub fn with_button(mut self, label: &str, submit: bool) -> Self {
        self.buttons.push((label.to_owned(), submit));
        self
    }

    /// Simulate a browser lacking `IntersectionObserver`.
    #[must_use]
    pub fn without_intersection_observer(mut self) -> Self {
        self.intersection_observer = false;
        self
    }
}

#[derive(Debug)]
enum PageTimer {
    RemoveBanner(u64),
    RestoreButton {
        index: usize,
        restore: PendingRestore,
    },
}

#[derive(Debug, Clone)]
struct PageButton {
    control: FakeButton,
    submit: bool,
}

/// A banner currently attached to the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShownBanner {
    pub id: u64,
    pub banner: Banner,
}

/// Headless page with every feature installed.
#[derive(Debug)]
pub struct HeadlessPage {
    fixture: PageFixture,
    config: FolioConfig,
    clock: DeterministicClock,
    timers: TimerQueue<PageTimer>,
    state: UiState,
    nav: Option<NavMenu<FakeToggle>>,
    sections: BTreeMap<String, FakeSection>,
    navbar: Option<FakeStyle>,
    form: Option<Vec<FakeField>>,
    cards: Vec<FakeCard>,
    buttons: Vec<PageButton>,
    images: Vec<FakeImage>,
    observed_images: Vec<bool>,
    lazy: Option<LazyImageTracker<usize>>,
    body: FakeBody,
    store: MemoryStore,
    dark_mode: DarkMode,
    clipboard: FakeClipboard,
    banners: Vec<ShownBanner>,
    next_banner: u64,
    alerts: Vec<String>,
    scroll_hook: Option<Debouncer<f64>>,
    settled_scrolls: Vec<f64>,
}

impl HeadlessPage {
    /// Build the page and run every enabled feature's initialization.
    pub fn load(fixture: PageFixture, config: FolioConfig) -> Result<Self> {
        Self::load_with_store(fixture, config, MemoryStore::new())
    }

    /// Like [`Self::load`], with existing origin storage.
    pub fn load_with_store(
        fixture: PageFixture,
        config: FolioConfig,
        store: MemoryStore,
    ) -> Result<Self> {
        config.validate()?;
        let enabled = |f: Features| config.is_enabled(f);

        let nav = if enabled(Features::NAV_TOGGLE) && fixture.nav {
            NavMenu::bind(Some(FakeToggle::default()), Some(FakeToggle::default()))
        } else {
            None
        };
        let lazy_ready = enabled(Features::LAZY_IMAGES) && fixture.intersection_observer;
        let images: Vec<FakeImage> = fixture
            .images
            .iter()
            .map(|src| FakeImage::deferred(src))
            .collect();
        let observed_images = vec![lazy_ready; images.len()];
        let scroll_hook = enabled(Features::SCROLL_DEBOUNCE)
            .then(|| Debouncer::new(config.scroll.debounce_wait()));

        let mut page = Self {
            nav,
            sections: fixture
                .sections
                .iter()
                .map(|id| (id.clone(), FakeSection::default()))
                .collect(),
            navbar: fixture.navbar.then(FakeStyle::default),
            form: fixture
                .form
                .as_ref()
                .map(|values| values.iter().map(|v| FakeField::new(v)).collect()),
            cards: vec![FakeCard::default(); fixture.cards],
            buttons: fixture
                .buttons
                .iter()
                .map(|(label, submit)| PageButton {
                    control: FakeButton::new(label),
                    submit: *submit,
                })
                .collect(),
            images,
            observed_images,
            lazy: lazy_ready.then(LazyImageTracker::new),
            body: FakeBody::default(),
            store,
            dark_mode: DarkMode::new(&config.theme),
            clipboard: FakeClipboard::default(),
            banners: Vec::new(),
            next_banner: 0,
            alerts: Vec::new(),
            scroll_hook,
            settled_scrolls: Vec::new(),
            clock: DeterministicClock::new(),
            timers: TimerQueue::new(),
            state: UiState::new(),
            fixture,
            config,
        };

        if page.config.is_enabled(Features::DARK_MODE) {
            let dark = page.dark_mode.restore(&mut page.body, &page.store);
            page.state.set_dark_mode(dark);
        }
        Ok(page)
    }

    /// Navigate to the same document again, keeping origin storage.
    pub fn reload(self) -> Result<Self> {
        Self::load_with_store(self.fixture, self.config, self.store)
    }

    /// Advance time and run every timer and debounced call that became due.
    pub fn advance(&mut self, dt: Duration) {
        self.clock.advance(dt);
        let now = self.clock.now();
        for timer in self.timers.drain_due(now) {
            match timer {
                PageTimer::RemoveBanner(id) => self.banners.retain(|b| b.id != id),
                PageTimer::RestoreButton { index, restore } => {
                    if let Some(button) = self.buttons.get_mut(index) {
                        restore.restore(&mut button.control);
                    }
                }
            }
        }
        if let Some(y) = self.scroll_hook.as_mut().and_then(|d| d.poll(now)) {
            self.settled_scrolls.push(y);
        }
    }

    /// Click the hamburger toggle. `None` when the feature is not installed.
    pub fn click_toggle(&mut self) -> Option<bool> {
        let open = self.nav.as_mut()?.on_toggle_click();
        self.state.set_menu_open(open);
        Some(open)
    }

    /// Click a nav link.
    pub fn click_nav_link(&mut self) {
        if self.fixture.nav_links == 0 {
            return;
        }
        if let Some(nav) = self.nav.as_mut() {
            nav.on_link_click();
            self.state.set_menu_open(false);
        }
    }

    /// Click an in-page anchor. `None` when the feature is disabled.
    pub fn click_anchor(&mut self, href: &str) -> Option<AnchorOutcome> {
        if !self.config.is_enabled(Features::SMOOTH_SCROLL) || !href.starts_with('#') {
            return None;
        }
        let sections = &mut self.sections;
        Some(handle_anchor_click(href, move |id| {
            let sections = sections;
            sections.get_mut(id)
        }))
    }

    /// Scroll the window to `y`.
    pub fn scroll_to(&mut self, y: f64) {
        if self.config.is_enabled(Features::NAVBAR_SCROLL) {
            if let Some(navbar) = self.navbar.as_mut() {
                let style = apply_navbar_style(navbar, y, &self.config.navbar);
                self.state.set_navbar_elevated(style.is_elevated());
            }
        }
        if let Some(hook) = self.scroll_hook.as_mut() {
            hook.trigger(self.clock.now(), y);
        }
    }

    /// Type into a required form field.
    pub fn set_field(&mut self, index: usize, value: &str) {
        if let Some(field) = self.form.as_mut().and_then(|f| f.get_mut(index)) {
            field.value = value.to_owned();
        }
    }

    /// Submit the contact form. `None` when there is no form to validate.
    pub fn submit_form(&mut self) -> Option<SubmitOutcome> {
        if !self.config.is_enabled(Features::FORM_VALIDATION) {
            return None;
        }
        let fields = self.form.as_mut()?;
        let outcome = validate_submission(fields.iter_mut(), &self.config.form);
        if let Some(alert) = &outcome.alert {
            self.alerts.push(alert.clone());
        }
        Some(outcome)
    }

    /// Report a card entering (`true`) or leaving the viewport.
    pub fn intersect_card(&mut self, index: usize, is_intersecting: bool) -> usize {
        if !self.config.is_enabled(Features::REVEAL) || !self.fixture.intersection_observer {
            return 0;
        }
        match self.cards.get_mut(index) {
            Some(card) => reveal_intersecting([IntersectionEntry::new(card, is_intersecting)]),
            None => 0,
        }
    }

    /// Report an image intersection. `None` when the image is not observed.
    pub fn intersect_image(&mut self, index: usize, is_intersecting: bool) -> Option<LazyStep> {
        if !*self.observed_images.get(index)? {
            return None;
        }
        let tracker = self.lazy.as_mut()?;
        let image = self.images.get_mut(index)?;
        let step = tracker.on_intersection(index, image, is_intersecting);
        if step.stop_observing() {
            self.observed_images[index] = false;
        }
        Some(step)
    }

    /// Deliver an image notification even if it was already unobserved, as a
    /// browser may for entries queued before `unobserve`.
    pub fn deliver_queued_image_entry(&mut self, index: usize) -> Option<LazyStep> {
        let tracker = self.lazy.as_mut()?;
        let image = self.images.get_mut(index)?;
        Some(tracker.on_intersection(index, image, true))
    }

    /// Make the next clipboard write fail with `error`.
    pub fn break_clipboard(&mut self, error: ClipboardError) {
        self.clipboard = FakeClipboard::failing(error);
    }

    /// The page's `copyToClipboard(text)`.
    pub async fn copy(&mut self, text: &str) -> std::result::Result<(), ClipboardError> {
        if !self.config.is_enabled(Features::CLIPBOARD) {
            return Err(ClipboardError::NotAvailable);
        }
        match copy_to_clipboard(&self.clipboard, text, &self.config.clipboard).await {
            Ok(banner) => {
                self.show_banner(banner);
                Ok(())
            }
            Err(err) => {
                crate::warn!(error = %err, "copy to clipboard failed");
                if let Some(banner) = Banner::failure(&self.config.clipboard) {
                    self.show_banner(banner);
                }
                Err(err)
            }
        }
    }

    fn show_banner(&mut self, banner: Banner) {
        let id = self.next_banner;
        self.next_banner += 1;
        self.timers.schedule(
            self.clock.now(),
            banner.lifetime,
            PageTimer::RemoveBanner(id),
        );
        self.banners.push(ShownBanner { id, banner });
    }

    /// Click a `.btn`. Returns whether it entered the loading state.
    pub fn click_button(&mut self, index: usize) -> bool {
        if !self.config.is_enabled(Features::BUTTON_LOADING) {
            return false;
        }
        let Some(button) = self.buttons.get_mut(index) else {
            return false;
        };
        if !button.submit {
            return false;
        }
        match begin_loading(&mut button.control, &self.config.button) {
            Some(restore) => {
                self.timers.schedule(
                    self.clock.now(),
                    self.config.button.restore_after(),
                    PageTimer::RestoreButton { index, restore },
                );
                true
            }
            None => false,
        }
    }

    /// The page's `toggleDarkMode()`.
    pub fn toggle_dark_mode(&mut self) -> std::result::Result<bool, StorageError> {
        let result = self.dark_mode.toggle(&mut self.body, &mut self.store);
        self.state.set_dark_mode(self.body.dark);
        result
    }

    #[must_use]
    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    #[must_use]
    pub const fn state(&self) -> &UiState {
        &self.state
    }

    #[must_use]
    pub fn nav(&self) -> Option<&NavMenu<FakeToggle>> {
        self.nav.as_ref()
    }

    #[must_use]
    pub fn section(&self, id: &str) -> Option<&FakeSection> {
        self.sections.get(id)
    }

    #[must_use]
    pub fn navbar(&self) -> Option<&FakeStyle> {
        self.navbar.as_ref()
    }

    #[must_use]
    pub fn field(&self, index: usize) -> Option<&FakeField> {
        self.form.as_ref()?.get(index)
    }

    #[must_use]
    pub fn card(&self, index: usize) -> Option<&FakeCard> {
        self.cards.get(index)
    }

    #[must_use]
    pub fn image(&self, index: usize) -> Option<&FakeImage> {
        self.images.get(index)
    }

    #[must_use]
    pub fn is_image_observed(&self, index: usize) -> bool {
        self.observed_images.get(index).copied().unwrap_or(false)
    }

    #[must_use]
    pub fn button(&self, index: usize) -> Option<&FakeButton> {
        self.buttons.get(index).map(|b| &b.control)
    }

    #[must_use]
    pub const fn body(&self) -> &FakeBody {
        &self.body
    }

    /// Raw stored text for `key`.
    #[must_use]
    pub fn stored(&self, key: &str) -> Option<String> {
        self.store.get_item(key).ok().flatten()
    }

    #[must_use]
    pub fn banners(&self) -> &[ShownBanner] {
        &self.banners
    }

    #[must_use]
    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    #[must_use]
    pub fn clipboard_contents(&self) -> Option<String> {
        self.clipboard.contents()
    }

    /// Scroll offsets the debounced hook has seen, one per quiet period.
    #[must_use]
    pub fn settled_scrolls(&self) -> &[f64] {
        &self.settled_scrolls
    }
}
