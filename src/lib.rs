//! League Guider - Champion browser and AI profile manager
//!
//! Browse champion and item data from a local DataDragon snapshot with
//! search and paging, and keep AI provider connection profiles in one place.

pub mod backend;
pub mod browser;
pub mod champion;
pub mod config;
pub mod dashboard;
pub mod data;
pub mod item;
pub mod presenter;
pub mod profile;
pub mod request;

pub use backend::{ItemSource, ProfileStore};
pub use browser::Browser;
pub use champion::Champion;
pub use config::Config;
pub use data::{DataStatus, LocalDataSource};
pub use item::Item;
pub use presenter::{build_page_window, filter, paginate, ListPresenter, ListView, Listable, PageLink};
pub use profile::{AiProfile, JsonProfileStore, ProfileForm};
