use globetrotter_core::{
    Config, Country, CountrySource, EMPTY_MESSAGE, FavoritesStore, FavoritesView, FileFavorites,
    InMemoryFavorites, ItemEvent, Viewport,
};
use iced::widget::{
    button, center, checkbox, column, container, image, mouse_area, opaque, row, scrollable,
    stack, text,
};
use iced::{Color, Element, Length, Subscription, Task, keyboard};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

pub const DEFAULT_WINDOW_WIDTH: f32 = 1024.0;
pub const DEFAULT_WINDOW_HEIGHT: f32 = 768.0;

const CARD_WIDTH: f32 = 220.0;
const FLAG_WIDTH: f32 = 160.0;
const FLAG_HEIGHT: f32 = 96.0;
const DETAIL_FLAG_WIDTH: f32 = 200.0;
const DETAIL_WIDTH: f32 = 420.0;

#[derive(Debug, Clone)]
pub enum Message {
    CountriesLoaded(Result<Vec<Country>, String>),
    WindowResized(iced::Size),

    // List and detail interaction
    OpenCountry(String),
    ToggleFavorite(String),
    CloseDetail,

    // Page navigation
    PrevPage,
    NextPage,

    FlagLoaded(String, Result<Vec<u8>, String>),
}

pub struct AppState {
    view: FavoritesView,
    viewport: Viewport,
    favorites: Box<dyn FavoritesStore>,
    source: Option<Arc<CountrySource>>,
    flags: HashMap<String, image::Handle>,
    pending_flags: HashSet<String>,
    is_loading: bool,
    error_message: Option<String>,
}

impl AppState {
    pub fn new(config: Option<&Config>) -> Self {
        let viewport = Viewport::new(DEFAULT_WINDOW_WIDTH as u32);
        let mut view = FavoritesView::new(viewport.width());
        view.start(&viewport);

        let mut error_message = None;

        let favorites: Box<dyn FavoritesStore> = match config {
            Some(config) => match FileFavorites::open(&config.favorites_path) {
                Ok(store) => Box::new(store),
                Err(e) => {
                    log::error!("Failed to open favorites: {}", e);
                    error_message = Some(format!("Favorites will not be saved: {}", e));
                    Box::new(InMemoryFavorites::new())
                }
            },
            None => Box::new(InMemoryFavorites::new()),
        };
        view.set_favorites(favorites.ids());

        let source = match config.map(CountrySource::new) {
            Some(Ok(source)) => Some(Arc::new(source)),
            Some(Err(e)) => {
                log::error!("Failed to set up country source: {}", e);
                error_message = Some(format!("Countries unavailable: {}", e));
                None
            }
            None => None,
        };

        Self {
            view,
            viewport,
            favorites,
            source,
            flags: HashMap::new(),
            pending_flags: HashSet::new(),
            is_loading: false,
            error_message,
        }
    }

    /// Fetch flags for whatever is on screen and not loaded yet
    fn load_visible_flags(&mut self) -> Task<Message> {
        let Some(source) = self.source.clone() else {
            return Task::none();
        };

        let wanted: Vec<(String, String)> = self
            .view
            .current_items()
            .iter()
            .chain(self.view.selected())
            .filter(|c| !self.flags.contains_key(c.id()) && !self.pending_flags.contains(c.id()))
            .filter_map(|c| c.flag_url().map(|url| (c.id().to_string(), url.to_string())))
            .collect();

        let mut tasks = Vec::with_capacity(wanted.len());
        for (id, url) in wanted {
            // The selected country may also be on the current page
            if !self.pending_flags.insert(id.clone()) {
                continue;
            }
            let source = Arc::clone(&source);
            tasks.push(Task::perform(
                async move {
                    let result = source
                        .fetch_flag_bytes(&url)
                        .await
                        .map_err(|e| e.to_string());
                    (id, result)
                },
                |(id, result)| Message::FlagLoaded(id, result),
            ));
        }
        Task::batch(tasks)
    }

    fn dispatch(&mut self, event: ItemEvent) {
        if let Err(e) = self.view.handle(event, self.favorites.as_mut()) {
            log::error!("Failed to update favorites: {}", e);
            self.error_message = Some(format!("Failed to update favorites: {}", e));
        }
    }
}

pub fn initialize() -> (AppState, Task<Message>) {
    let config = match Config::load() {
        Ok(config) => Some(config),
        Err(e) => {
            log::error!("Failed to load configuration: {}", e);
            None
        }
    };

    let mut state = AppState::new(config.as_ref());

    // The window manager may not honor the requested size
    let initial_size = iced::window::get_latest()
        .and_then(iced::window::get_size)
        .map(Message::WindowResized);

    let load_countries = match state.source.clone() {
        Some(source) => {
            state.is_loading = true;
            Task::perform(
                async move { source.load_countries(false).await.map_err(|e| e.to_string()) },
                Message::CountriesLoaded,
            )
        }
        None => Task::none(),
    };
    (state, Task::batch([initial_size, load_countries]))
}

pub fn update(state: &mut AppState, message: Message) -> Task<Message> {
    match message {
        Message::CountriesLoaded(result) => {
            state.is_loading = false;
            match result {
                Ok(countries) => {
                    log::info!("Loaded {} countries", countries.len());
                    state.view.set_countries(countries);
                    return state.load_visible_flags();
                }
                Err(e) => {
                    log::error!("Failed to load countries: {}", e);
                    state.error_message = Some(format!("Failed to load countries: {}", e));
                }
            }
        }
        Message::WindowResized(size) => {
            state.viewport.set_width(size.width.max(0.0) as u32);
            if state.view.poll_viewport() {
                return state.load_visible_flags();
            }
        }
        Message::OpenCountry(id) => {
            state.dispatch(ItemEvent::Open(id));
            return state.load_visible_flags();
        }
        Message::ToggleFavorite(id) => {
            state.dispatch(ItemEvent::ToggleFavorite(id));
            return state.load_visible_flags();
        }
        Message::CloseDetail => {
            state.dispatch(ItemEvent::CloseDetail);
        }
        Message::PrevPage => {
            if state.view.prev_page() {
                return state.load_visible_flags();
            }
        }
        Message::NextPage => {
            if state.view.next_page() {
                return state.load_visible_flags();
            }
        }
        Message::FlagLoaded(id, result) => {
            state.pending_flags.remove(&id);
            match result {
                Ok(bytes) => {
                    state.flags.insert(id, image::Handle::from_bytes(bytes));
                }
                Err(e) => log::warn!("Failed to load flag for {}: {}", id, e),
            }
        }
    }
    Task::none()
}

pub fn subscription(_state: &AppState) -> Subscription<Message> {
    Subscription::batch([
        iced::window::resize_events().map(|(_id, size)| Message::WindowResized(size)),
        keyboard::on_key_press(|key, _modifiers| match key {
            keyboard::Key::Named(keyboard::key::Named::Escape) => Some(Message::CloseDetail),
            _ => None,
        }),
    ])
}

fn flag_widget<'a>(handle: Option<&image::Handle>, width: f32) -> Element<'a, Message> {
    match handle {
        Some(handle) => image(handle.clone()).width(Length::Fixed(width)).into(),
        None => container(text("Loading flag...").size(12))
            .width(Length::Fixed(width))
            .height(Length::Fixed(FLAG_HEIGHT))
            .center_x(Length::Fixed(width))
            .center_y(Length::Fixed(FLAG_HEIGHT))
            .into(),
    }
}

fn country_card<'a>(
    country: &'a Country,
    is_favorite: bool,
    flag: Option<&image::Handle>,
) -> Element<'a, Message> {
    let id = country.id().to_string();
    // The checkbox captures its own click so the card underneath never sees it
    let favorite_box =
        checkbox("", is_favorite).on_toggle(move |_| Message::ToggleFavorite(id.clone()));

    let info = column![
        text(country.display_name()).size(18),
        text(format!("Capital: {}", country.capital_display())).size(14),
        text(format!("Region: {}", country.region)).size(14),
        text(format!("Population: {}", country.population_display())).size(14),
    ]
    .spacing(4);

    let card = container(
        column![
            row![flag_widget(flag, FLAG_WIDTH), favorite_box].spacing(10),
            info,
        ]
        .spacing(8),
    )
    .padding(10)
    .width(Length::Fixed(CARD_WIDTH))
    .style(container::rounded_box);

    mouse_area(card)
        .on_press(Message::OpenCountry(country.id().to_string()))
        .into()
}

fn detail_view<'a>(
    country: &'a Country,
    is_favorite: bool,
    flag: Option<&image::Handle>,
) -> Element<'a, Message> {
    let id = country.id().to_string();
    let favorite_box =
        checkbox("Favorite", is_favorite).on_toggle(move |_| Message::ToggleFavorite(id.clone()));

    container(
        column![
            row![
                favorite_box,
                button("Close").on_press(Message::CloseDetail).padding(5),
            ]
            .spacing(20),
            row![
                flag_widget(flag, DETAIL_FLAG_WIDTH),
                text(country.display_name()).size(24),
            ]
            .spacing(15),
            text(format!("Capital: {}", country.capital_display())).size(16),
            text(format!("Region: {}", country.region)).size(16),
            text(format!("Subregion: {}", country.subregion_display())).size(16),
            text(format!("Population: {}", country.population_display())).size(16),
            text(format!("Phone code: {}", country.phone_code())).size(16),
        ]
        .spacing(10),
    )
    .padding(20)
    .width(Length::Fixed(DETAIL_WIDTH))
    .style(container::rounded_box)
    .into()
}

fn modal<'a>(
    base: impl Into<Element<'a, Message>>,
    content: impl Into<Element<'a, Message>>,
    on_blur: Message,
) -> Element<'a, Message> {
    stack![
        base.into(),
        opaque(
            mouse_area(center(opaque(content)).style(|_theme| container::Style {
                background: Some(
                    Color {
                        a: 0.8,
                        ..Color::BLACK
                    }
                    .into(),
                ),
                ..container::Style::default()
            }))
            .on_press(on_blur)
        )
    ]
    .into()
}

pub fn view(state: &AppState) -> Element<Message> {
    let favorites_view = &state.view;

    let status_section = if state.is_loading {
        column![text("Loading countries...").size(14)]
    } else if let Some(error) = &state.error_message {
        column![text("Error:").size(16), text(error).size(14)].spacing(5)
    } else {
        column![]
    };

    let list_section: Element<Message> = if favorites_view.is_empty() {
        text(EMPTY_MESSAGE).size(16).into()
    } else {
        let cards = favorites_view.current_items().iter().map(|country| {
            country_card(
                country,
                favorites_view.is_favorite(country.id()),
                state.flags.get(country.id()),
            )
        });
        let mut grid = column![
            scrollable(row(cards).spacing(15).wrap()).height(Length::Fill)
        ]
        .spacing(15);

        if favorites_view.shows_pagination() {
            grid = grid.push(
                row![
                    button("Previous")
                        .on_press_maybe(if favorites_view.page().can_go_prev() {
                            Some(Message::PrevPage)
                        } else {
                            None
                        })
                        .padding(5),
                    text(favorites_view.page_label()).size(14),
                    button("Next")
                        .on_press_maybe(if favorites_view.page().can_go_next() {
                            Some(Message::NextPage)
                        } else {
                            None
                        })
                        .padding(5),
                ]
                .spacing(10),
            );
        }
        grid.into()
    };

    let content = container(
        column![
            text("Favorite Countries").size(24),
            status_section,
            list_section,
        ]
        .spacing(15),
    )
    .padding(20)
    .width(Length::Fill)
    .height(Length::Fill);

    match favorites_view.selected() {
        Some(country) => modal(
            content,
            detail_view(
                country,
                favorites_view.is_favorite(country.id()),
                state.flags.get(country.id()),
            ),
            Message::CloseDetail,
        ),
        None => content.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use globetrotter_core::country::{CountryName, Flags, PhoneCode};

    fn country(code: &str) -> Country {
        Country {
            cca3: code.to_string(),
            name: CountryName {
                common: code.to_string(),
                official: None,
            },
            capital: Vec::new(),
            region: "Oceania".to_string(),
            subregion: None,
            population: None,
            idd: PhoneCode::default(),
            flags: Flags::default(),
        }
    }

    fn loaded_state(count: usize, favorites: &[&str]) -> AppState {
        let mut state = AppState::new(None);
        for id in favorites {
            let _ = update(&mut state, Message::ToggleFavorite(id.to_string()));
        }
        let countries = (0..count).map(|i| country(&format!("C{:02}", i))).collect();
        let _ = update(&mut state, Message::CountriesLoaded(Ok(countries)));
        state
    }

    #[test]
    fn test_toggle_does_not_open_detail() {
        let mut state = loaded_state(3, &["C00", "C01"]);
        let _ = update(&mut state, Message::ToggleFavorite("C01".to_string()));
        assert!(state.view.selected().is_none());
        assert_eq!(state.view.visible().len(), 1);

        let _ = update(&mut state, Message::OpenCountry("C00".to_string()));
        assert_eq!(state.view.selected().map(Country::id), Some("C00"));
        let _ = update(&mut state, Message::CloseDetail);
        assert!(state.view.selected().is_none());
    }

    #[test]
    fn test_window_resize_reaches_view() {
        let ids: Vec<String> = (0..30).map(|i| format!("C{:02}", i)).collect();
        let refs: Vec<&str> = ids.iter().map(String::as_str).collect();
        let mut state = loaded_state(30, &refs);
        assert_eq!(state.view.items_per_page(), 12);

        let _ = update(&mut state, Message::NextPage);
        let _ = update(&mut state, Message::NextPage);
        assert_eq!(state.view.current_page(), 3);

        let _ = update(&mut state, Message::WindowResized(iced::Size::new(1300.0, 800.0)));
        assert_eq!(state.view.items_per_page(), 15);
        assert_eq!(state.view.current_page(), 2);
    }

    #[test]
    fn test_reported_window_size_replaces_default() {
        let ids: Vec<String> = (0..20).map(|i| format!("C{:02}", i)).collect();
        let refs: Vec<&str> = ids.iter().map(String::as_str).collect();
        let mut state = loaded_state(20, &refs);
        assert_eq!(state.viewport.width(), DEFAULT_WINDOW_WIDTH as u32);
        assert_eq!(state.view.items_per_page(), 12);

        // Window opened narrower than requested
        let _ = update(&mut state, Message::WindowResized(iced::Size::new(700.0, 500.0)));
        assert_eq!(state.viewport.width(), 700);
        assert_eq!(state.view.items_per_page(), 10);
        assert_eq!(state.view.page_label(), "Page 1 of 2");
    }

    #[test]
    fn test_load_failure_is_reported() {
        let mut state = AppState::new(None);
        let _ = update(&mut state, Message::CountriesLoaded(Err("offline".to_string())));
        assert!(!state.is_loading);
        assert!(state.view.is_empty());
        assert!(state.error_message.as_deref().unwrap_or("").contains("offline"));
    }
}
