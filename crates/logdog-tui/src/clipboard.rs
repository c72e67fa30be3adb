//! OS clipboard access

use logdog_core::prelude::*;

/// Clipboard abstraction so copy can be tested without a display
pub trait Clipboard: Send {
    fn set(&mut self, contents: &str) -> Result<()>;
}

/// System clipboard using arboard.
///
/// The handle is created on first use and kept, since some platforms drop
/// the contents when the owning handle goes away.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self { inner: None }
    }

    fn ensure(&mut self) -> Result<&mut arboard::Clipboard> {
        if self.inner.is_none() {
            let clipboard =
                arboard::Clipboard::new().map_err(|e| Error::clipboard(e.to_string()))?;
            self.inner = Some(clipboard);
        }
        self.inner
            .as_mut()
            .ok_or_else(|| Error::clipboard("clipboard unavailable"))
    }
}

impl Clipboard for SystemClipboard {
    fn set(&mut self, contents: &str) -> Result<()> {
        let clipboard = self.ensure()?;
        clipboard
            .set_text(contents.to_string())
            .map_err(|e| Error::clipboard(e.to_string()))
    }
}
