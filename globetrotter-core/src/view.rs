//! The favorites view: a paginated list of favorite countries with a detail overlay.
//!
//! All derived state lives here and is recomputed synchronously on each change
//! notification:
//!
//! ```text
//! countries / favorites changed -> visible list -> page validation
//! viewport resized              -> page size    -> page validation
//! page requested                ->                 page validation
//! ```
//!
//! The selection is independent of paging and only changes on user action.

use crate::country::Country;
use crate::error::GlobetrotterError;
use crate::favorites::FavoritesStore;
use crate::filter::favorite_countries;
use crate::page_size::items_per_page;
use crate::pagination::PageState;
use crate::selection::Selection;
use crate::viewport::{ResizeSubscription, Viewport};
use std::collections::HashSet;

pub const EMPTY_MESSAGE: &str = "No favorite countries yet.";

/// User interaction on a list item or the detail overlay
#[derive(Debug, Clone, PartialEq)]
pub enum ItemEvent {
    /// Click on the item body
    Open(String),
    /// Click on the favorite checkbox; never opens the detail view
    ToggleFavorite(String),
    CloseDetail,
}

#[derive(Debug)]
pub struct FavoritesView {
    all_countries: Vec<Country>,
    favorites: HashSet<String>,
    visible: Vec<Country>,
    page: PageState,
    selection: Selection<Country>,
    resize_subscription: Option<ResizeSubscription>,
}

impl FavoritesView {
    pub fn new(width: u32) -> Self {
        Self {
            all_countries: Vec::new(),
            favorites: HashSet::new(),
            visible: Vec::new(),
            page: PageState::new(0, items_per_page(width)),
            selection: Selection::new(),
            resize_subscription: None,
        }
    }

    /// Begin observing the viewport and size pages for its current width
    pub fn start(&mut self, viewport: &Viewport) {
        if self.resize_subscription.is_some() {
            log::debug!("Favorites view already started, replacing resize observer");
        }
        // Release any earlier handle before taking a new one
        self.stop();
        self.resize_subscription = Some(viewport.subscribe());
        self.resize(viewport.width());
    }

    /// Release the resize observer; pending widths are discarded
    pub fn stop(&mut self) {
        if let Some(mut subscription) = self.resize_subscription.take() {
            subscription.release();
        }
    }

    pub fn is_observing(&self) -> bool {
        self.resize_subscription.as_ref().is_some_and(ResizeSubscription::is_active)
    }

    /// Apply the latest width delivered by the viewport, if any; returns whether one arrived
    pub fn poll_viewport(&mut self) -> bool {
        let latest = self.resize_subscription.as_mut().and_then(ResizeSubscription::try_latest);
        match latest {
            Some(width) => {
                self.resize(width);
                true
            }
            None => false,
        }
    }

    /// Recompute the page size for `width`
    pub fn resize(&mut self, width: u32) {
        let size = items_per_page(width);
        if size != self.page.items_per_page() {
            log::debug!(
                "Width {} -> {} countries per page (was {})",
                width,
                size,
                self.page.items_per_page()
            );
        }
        self.page.set_items_per_page(size);
    }

    pub fn set_countries(&mut self, countries: Vec<Country>) {
        self.all_countries = countries;
        self.refresh_visible();
    }

    pub fn set_favorites(&mut self, favorites: HashSet<String>) {
        self.favorites = favorites;
        self.refresh_visible();
    }

    fn refresh_visible(&mut self) {
        self.visible = favorite_countries(&self.all_countries, &self.favorites);
        log::debug!(
            "{} of {} countries are favorites",
            self.visible.len(),
            self.all_countries.len()
        );
        self.page.set_total_items(self.visible.len());
    }

    /// Handle a click; favorite toggles go to `store` and the view re-derives from its new set
    pub fn handle(
        &mut self,
        event: ItemEvent,
        store: &mut dyn FavoritesStore,
    ) -> Result<(), GlobetrotterError> {
        match event {
            ItemEvent::Open(id) => self.open(&id),
            ItemEvent::ToggleFavorite(id) => {
                store.toggle(&id)?;
                self.set_favorites(store.ids());
            }
            ItemEvent::CloseDetail => self.clear_selection(),
        }
        Ok(())
    }

    /// Open the detail view for a country by code; unknown codes are ignored
    pub fn open(&mut self, id: &str) {
        match self.all_countries.iter().find(|c| c.id() == id) {
            Some(country) => self.selection.select(country.clone()),
            None => log::warn!("Ignoring selection of unknown country {}", id),
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn selected(&self) -> Option<&Country> {
        self.selection.current()
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.contains(id)
    }

    pub fn set_page(&mut self, page: usize) {
        self.page.set_current_page(page);
    }

    pub fn next_page(&mut self) -> bool {
        self.page.next_page()
    }

    pub fn prev_page(&mut self) -> bool {
        self.page.prev_page()
    }

    pub fn visible(&self) -> &[Country] {
        &self.visible
    }

    /// Countries on the current page
    pub fn current_items(&self) -> &[Country] {
        &self.visible[self.page.current_page_range()]
    }

    pub fn page(&self) -> &PageState {
        &self.page
    }

    pub fn current_page(&self) -> usize {
        self.page.current_page()
    }

    pub fn items_per_page(&self) -> usize {
        self.page.items_per_page()
    }

    pub fn display_total_pages(&self) -> usize {
        self.page.display_total_pages()
    }

    pub fn shows_pagination(&self) -> bool {
        self.page.shows_controls()
    }

    pub fn is_empty(&self) -> bool {
        self.current_items().is_empty()
    }

    /// "Page P of T" label for the pagination row
    pub fn page_label(&self) -> String {
        format!("Page {} of {}", self.current_page(), self.display_total_pages())
    }
}

impl Drop for FavoritesView {
    fn drop(&mut self) {
        self.stop();
    }
}
