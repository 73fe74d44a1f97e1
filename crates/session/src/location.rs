//! Shareable page URL
//!
//! The session publishes its seed token in the `seed` query parameter so the
//! page can be reloaded or shared. Other query parameters are left untouched.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use reqwest::Url;

use memory_match_types::SEED_QUERY_PARAM;

use crate::config::ConfigError;

/// Read and rewrite the seed parameter of the current location.
pub trait SeedLocation {
    /// Raw (percent-decoded) value of the seed parameter.
    fn seed_param(&self) -> Option<String>;

    /// Replace the seed parameter in place.
    fn set_seed_param(&mut self, token: &str);

    fn clear_seed_param(&mut self);
}

/// In-process page URL. Clones share the same address.
#[derive(Debug, Clone)]
pub struct PageUrl {
    url: Rc<RefCell<Url>>,
    replacements: Rc<Cell<usize>>,
}

impl PageUrl {
    pub fn new(url: Url) -> Self {
        Self {
            url: Rc::new(RefCell::new(url)),
            replacements: Rc::new(Cell::new(0)),
        }
    }

    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        Url::parse(raw)
            .map(Self::new)
            .map_err(|e| ConfigError::InvalidPageUrl {
                value: raw.to_string(),
                reason: e.to_string(),
            })
    }

    pub fn href(&self) -> String {
        self.url.borrow().to_string()
    }

    /// Number of in-place rewrites so far.
    pub fn replace_count(&self) -> usize {
        self.replacements.get()
    }

    fn rewrite(&self, seed: Option<&str>) {
        let mut url = self.url.borrow_mut();
        let kept: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(key, _)| key != SEED_QUERY_PARAM)
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();

        url.set_query(None);
        if !kept.is_empty() || seed.is_some() {
            let mut query = url.query_pairs_mut();
            for (key, value) in &kept {
                query.append_pair(key, value);
            }
            if let Some(seed) = seed {
                query.append_pair(SEED_QUERY_PARAM, seed);
            }
        }
        self.replacements.set(self.replacements.get() + 1);
    }
}

impl SeedLocation for PageUrl {
    fn seed_param(&self) -> Option<String> {
        self.url
            .borrow()
            .query_pairs()
            .find(|(key, _)| key == SEED_QUERY_PARAM)
            .map(|(_, value)| value.into_owned())
    }

    fn set_seed_param(&mut self, token: &str) {
        self.rewrite(Some(token));
    }

    fn clear_seed_param(&mut self) {
        self.rewrite(None);
    }
}
