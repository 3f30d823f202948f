//! Item browser
//!
//! Holds one loaded collection plus its list state. Views call [`Browser::view`]
//! on every frame or keystroke; nothing here touches the backend except
//! [`Browser::refresh`].

use std::num::NonZeroUsize;

use tracing::info;

use crate::backend::ItemSource;
use crate::presenter::{ListPresenter, ListView, Listable};
use crate::request::Loadable;

pub struct Browser<T> {
    items: Loadable<Vec<T>>,
    presenter: ListPresenter,
}

impl<T: Listable> Browser<T> {
    pub fn new(page_size: NonZeroUsize) -> Self {
        Self {
            items: Loadable::new(),
            presenter: ListPresenter::new(page_size),
        }
    }

    pub fn items(&self) -> &Loadable<Vec<T>> {
        &self.items
    }

    pub fn presenter(&self) -> &ListPresenter {
        &self.presenter
    }

    /// Whether a collection has been loaded at least once
    pub fn is_loaded(&self) -> bool {
        self.items.value().is_some()
    }

    /// Fetch synchronously from `source`
    pub fn refresh(&mut self, source: &dyn ItemSource<T>) {
        self.items.begin();
        self.apply(source.fetch_all());
    }

    /// Mark a fetch as started elsewhere (e.g. on a worker thread)
    pub fn begin_refresh(&mut self) {
        self.items.begin();
    }

    /// Settle a fetch. A failure leaves the current collection in place.
    pub fn apply(&mut self, result: anyhow::Result<Vec<T>>) {
        if let Ok(ref items) = result {
            info!("Loaded {} items", items.len());
        }
        self.items.finish(result);
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.presenter.set_query(query);
    }

    pub fn set_page_size(&mut self, page_size: NonZeroUsize) {
        self.presenter.set_page_size(page_size);
    }

    pub fn go_to_page(&mut self, page: usize) {
        self.presenter.go_to_page(page);
    }

    pub fn next_page(&mut self) {
        self.presenter.next_page();
    }

    pub fn prev_page(&mut self) {
        self.presenter.prev_page();
    }

    /// Render model for the current state
    pub fn view(&mut self) -> ListView<'_, T> {
        let items = self.items.value().map(Vec::as_slice).unwrap_or(&[]);
        self.presenter.present(items)
    }
}
