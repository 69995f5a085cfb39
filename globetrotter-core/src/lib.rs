pub mod config;
pub mod country;
pub mod error;
pub mod favorites;
pub mod filter;
pub mod page_size;
pub mod pagination;
pub mod selection;
pub mod source;
pub mod view;
pub mod viewport;

pub use config::Config;
pub use country::{Country, NOT_AVAILABLE, format_population};
pub use error::GlobetrotterError;
pub use favorites::{FavoritesStore, FileFavorites, InMemoryFavorites};
pub use filter::favorite_countries;
pub use page_size::items_per_page;
pub use pagination::{PageState, resolve_page, total_pages};
pub use selection::Selection;
pub use source::{CountrySource, load_countries_file};
pub use view::{EMPTY_MESSAGE, FavoritesView, ItemEvent};
pub use viewport::{ResizeSubscription, Viewport};
