use std::{cell::RefCell, collections::HashMap, rc::Rc};

use super::Store;
use crate::error::{Result, TrackerError};

#[derive(Debug, Default)]
struct Inner {
    entries: HashMap<String, String>,
    failing: bool,
}

/// In-process store. Clones share contents, so a test can reopen a tracker
/// over the same data or take the store offline mid-run.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    inner: Rc<RefCell<Inner>>,
}

impl MemoryStore {
    pub fn set_failing(&self, failing: bool) {
        self.inner.borrow_mut().failing = failing;
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.inner.borrow().entries.get(key).cloned()
    }

    pub fn put_raw(&self, key: &str, value: &str) {
        self.inner
            .borrow_mut()
            .entries
            .insert(key.to_string(), value.to_string());
    }

    fn check(&self) -> Result<()> {
        if self.inner.borrow().failing {
            return Err(TrackerError::Storage("store offline".to_string()));
        }
        Ok(())
    }
}

impl Store for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        self.check()?;
        Ok(self.raw(key))
    }

    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        self.check()?;
        self.put_raw(key, value);
        Ok(())
    }

    fn save_all(&mut self, entries: &[(&str, String)]) -> Result<()> {
        self.check()?;
        let mut inner = self.inner.borrow_mut();
        for (key, value) in entries {
            inner.entries.insert(key.to_string(), value.clone());
        }
        Ok(())
    }
}
