//! Control surface renderer
//!
//! Two buttons drive the same session: a floating control appended to the
//! page body, and a navigation-bar control mounted only when the page has a
//! `.navbar-nav` container. Both show a play or pause affordance.

use crate::error::{Result, SessionError};
use std::rc::Rc;

/// Container of the floating control
pub const FLOATING_CONTAINER_CLASS: &str = "music-player";
pub const FLOATING_BUTTON_ID: &str = "musicBtn";
const FLOATING_BUTTON_CLASS: &str = "music-btn";
const FLOATING_TEXT_CLASS: &str = "music-text";

/// Navigation bar the nav control is appended to
pub const NAV_MOUNT_SELECTOR: &str = ".navbar-nav";
pub const NAV_ITEM_CLASS: &str = "nav-item music-nav-item";
pub const NAV_BUTTON_ID: &str = "musicToggle";
const NAV_BUTTON_CLASS: &str = "btn btn-pink btn-sm mt-1";
const NAV_TEXT_CLASS: &str = "nav-music-text";

/// Everything a previous render may have left behind
const STALE_SELECTORS: [&str; 4] = [".music-player", ".music-nav-item", "#musicToggle", "#musicBtn"];

/// Minimal DOM surface the renderer needs
///
/// Selectors are limited to a single `.class` or `#id`.
pub trait Page {
    type Node: Clone;

    /// All elements matching a selector, in document order
    fn query_all(&self, selector: &str) -> Vec<Self::Node>;

    /// First element matching a selector
    fn query(&self, selector: &str) -> Option<Self::Node> {
        self.query_all(selector).into_iter().next()
    }

    /// The document body
    fn body(&self) -> Option<Self::Node>;

    fn create_element(&mut self, tag: &str) -> Result<Self::Node>;

    fn set_attribute(&mut self, node: &Self::Node, name: &str, value: &str) -> Result<()>;

    fn set_inner_html(&mut self, node: &Self::Node, html: &str);

    fn append_child(&mut self, parent: &Self::Node, child: &Self::Node) -> Result<()>;

    /// Detach a node from the document
    ///
    /// Activation handlers registered on the node or its descendants are
    /// released with it.
    fn remove(&mut self, node: &Self::Node);

    /// Run `handler` whenever the node is clicked
    fn on_activate(&mut self, node: &Self::Node, handler: Rc<dyn Fn()>) -> Result<()>;
}

/// The two affordances a control can show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlLabel {
    Play,
    Pause,
}

impl ControlLabel {
    pub fn for_state(is_playing: bool) -> Self {
        if is_playing {
            Self::Pause
        } else {
            Self::Play
        }
    }

    pub fn icon_class(self) -> &'static str {
        match self {
            Self::Play => "fas fa-music",
            Self::Pause => "fas fa-pause",
        }
    }

    pub fn text(self) -> &'static str {
        match self {
            Self::Play => "Play Music",
            Self::Pause => "Pause",
        }
    }

    /// Inner markup for a button whose text span carries `text_class`
    pub fn markup(self, text_class: &str) -> String {
        format!(
            r#"<i class="{}"></i> <span class="{}">{}</span>"#,
            self.icon_class(),
            text_class,
            self.text()
        )
    }
}

/// Renders and syncs the floating and navigation controls
#[derive(Debug, Clone)]
pub struct ControlSurface<N> {
    floating: Option<N>,
    nav: Option<N>,
}

impl<N: Clone> Default for ControlSurface<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Clone> ControlSurface<N> {
    pub fn new() -> Self {
        Self {
            floating: None,
            nav: None,
        }
    }

    /// Mount both controls, replacing any earlier instances
    ///
    /// The floating control is always created; the nav control only when the
    /// page has a navigation container. Both call `on_toggle` on activation.
    pub fn render<P>(&mut self, page: &mut P, is_playing: bool, on_toggle: Rc<dyn Fn()>) -> Result<()>
    where
        P: Page<Node = N>,
    {
        for selector in STALE_SELECTORS {
            for node in page.query_all(selector) {
                page.remove(&node);
            }
        }
        self.floating = None;
        self.nav = None;

        let body = page
            .body()
            .ok_or_else(|| SessionError::Render("document has no body".to_string()))?;

        let container = page.create_element("div")?;
        page.set_attribute(&container, "class", FLOATING_CONTAINER_CLASS)?;
        let button = page.create_element("button")?;
        page.set_attribute(&button, "class", FLOATING_BUTTON_CLASS)?;
        page.set_attribute(&button, "id", FLOATING_BUTTON_ID)?;
        page.append_child(&container, &button)?;
        page.append_child(&body, &container)?;
        page.on_activate(&button, Rc::clone(&on_toggle))?;
        self.floating = Some(button);

        if let Some(navbar) = page.query(NAV_MOUNT_SELECTOR) {
            let item = page.create_element("li")?;
            page.set_attribute(&item, "class", NAV_ITEM_CLASS)?;
            let button = page.create_element("button")?;
            page.set_attribute(&button, "id", NAV_BUTTON_ID)?;
            page.set_attribute(&button, "class", NAV_BUTTON_CLASS)?;
            page.append_child(&item, &button)?;
            page.append_child(&navbar, &item)?;
            page.on_activate(&button, on_toggle)?;
            self.nav = Some(button);
        }

        self.sync_label(page, is_playing);
        Ok(())
    }

    /// Show the pause affordance while playing, the play affordance otherwise
    pub fn sync_label<P>(&self, page: &mut P, is_playing: bool)
    where
        P: Page<Node = N>,
    {
        let label = ControlLabel::for_state(is_playing);
        if let Some(button) = &self.floating {
            page.set_inner_html(button, &label.markup(FLOATING_TEXT_CLASS));
        }
        if let Some(button) = &self.nav {
            page.set_inner_html(button, &label.markup(NAV_TEXT_CLASS));
        }
    }

    pub fn floating(&self) -> Option<&N> {
        self.floating.as_ref()
    }

    pub fn nav(&self) -> Option<&N> {
        self.nav.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_markup() {
        assert_eq!(
            ControlLabel::Play.markup("music-text"),
            r#"<i class="fas fa-music"></i> <span class="music-text">Play Music</span>"#
        );
        assert_eq!(
            ControlLabel::Pause.markup("nav-music-text"),
            r#"<i class="fas fa-pause"></i> <span class="nav-music-text">Pause</span>"#
        );
    }

    #[test]
    fn label_follows_state() {
        assert_eq!(ControlLabel::for_state(true), ControlLabel::Pause);
        assert_eq!(ControlLabel::for_state(false), ControlLabel::Play);
    }
}
