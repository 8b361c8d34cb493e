//! Platform window backend interface.
//!
//! The native toolkit is an external collaborator; this trait is its entire
//! surface as seen from the wrapper. Real GTK/Cocoa/Win32 backends live
//! behind it. The crate ships [`HeadlessBackend`], a windowless
//! implementation used as the default and throughout the test suite.

use raw_window_handle::RawWindowHandle;

use crate::config::WindowConfig;
use crate::core::error::CreationError;

/// Size constraint accompanying a resize request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SizeHint {
    /// Width and height set the current size.
    #[default]
    None,
    /// Width and height set the minimum bounds.
    Min,
    /// Width and height set the maximum bounds.
    Max,
    /// Width and height are fixed; the window cannot be resized.
    Fixed,
}

pub trait PlatformBackend {
    /// Creates the native window. An error leaves the wrapper permanently
    /// unset; every subsequent operation on it degrades to a no-op.
    fn initialize(&mut self, config: &WindowConfig) -> Result<(), CreationError>;

    fn set_title(&mut self, title: &str);

    fn set_size(&mut self, width: u32, height: u32, hint: SizeHint);

    fn navigate(&mut self, url: &str);

    fn set_html(&mut self, html: &str);

    /// Toolkit-specific opaque window handle, if a native window exists.
    fn window_handle(&self) -> Option<RawWindowHandle>;
}

/// Backend with no native window: records the last applied state and hands
/// out no window handle.
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    title: String,
    size: (u32, u32),
    hint: SizeHint,
    url: Option<String>,
    html: Option<String>,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    pub fn size_hint(&self) -> SizeHint {
        self.hint
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn html(&self) -> Option<&str> {
        self.html.as_deref()
    }
}

impl PlatformBackend for HeadlessBackend {
    fn initialize(&mut self, config: &WindowConfig) -> Result<(), CreationError> {
        self.title = config.title.clone();
        self.size = (config.width, config.height);
        Ok(())
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn set_size(&mut self, width: u32, height: u32, hint: SizeHint) {
        self.size = (width, height);
        self.hint = hint;
    }

    fn navigate(&mut self, url: &str) {
        self.url = Some(url.to_string());
        self.html = None;
    }

    fn set_html(&mut self, html: &str) {
        self.html = Some(html.to_string());
        self.url = None;
    }

    fn window_handle(&self) -> Option<RawWindowHandle> {
        None
    }
}
