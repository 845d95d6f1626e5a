use crate::config::BrowseSection;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewportClass {
    Mobile,
    Desktop,
}

impl ViewportClass {
    pub fn of(width: u32, mobile_breakpoint: u32) -> Self {
        if width < mobile_breakpoint {
            ViewportClass::Mobile
        } else {
            ViewportClass::Desktop
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(ViewportClass)>;

/// Viewport width source with explicit subscribers.
///
/// Every `resize` notifies every subscriber with the current class, even
/// when the class did not change.
pub struct ViewportWatcher {
    mobile_breakpoint: u32,
    width: Option<u32>,
    next_id: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
}

impl ViewportWatcher {
    pub fn new(mobile_breakpoint: u32) -> Self {
        Self {
            mobile_breakpoint,
            width: None,
            next_id: 0,
            listeners: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, listener: impl FnMut(ViewportClass) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false when the id was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(candidate, _)| *candidate != id);
        self.listeners.len() != before
    }

    pub fn resize(&mut self, width: u32) -> ViewportClass {
        self.width = Some(width);
        let class = ViewportClass::of(width, self.mobile_breakpoint);
        for (_, listener) in &mut self.listeners {
            listener(class);
        }
        class
    }

    /// Desktop until the first resize.
    pub fn class(&self) -> ViewportClass {
        self.width
            .map(|width| ViewportClass::of(width, self.mobile_breakpoint))
            .unwrap_or(ViewportClass::Desktop)
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }
}

/// "Show More" / "Show Less" window over a result list
#[derive(Debug, Clone)]
pub struct Pager {
    mobile_page_size: usize,
    desktop_page_size: usize,
    viewport: ViewportClass,
    limit: usize,
}

impl Pager {
    pub fn new(browse: &BrowseSection) -> Self {
        let mut pager = Self {
            mobile_page_size: browse.mobile_page_size.max(1),
            desktop_page_size: browse.desktop_page_size.max(1),
            viewport: ViewportClass::Desktop,
            limit: 0,
        };
        pager.reset();
        pager
    }

    pub fn page_size(&self) -> usize {
        match self.viewport {
            ViewportClass::Mobile => self.mobile_page_size,
            ViewportClass::Desktop => self.desktop_page_size,
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn viewport(&self) -> ViewportClass {
        self.viewport
    }

    /// A class change resets the window; returns whether it changed.
    pub fn set_viewport(&mut self, viewport: ViewportClass) -> bool {
        if self.viewport == viewport {
            return false;
        }
        self.viewport = viewport;
        self.reset();
        true
    }

    pub fn show_more(&mut self) {
        self.limit = self.limit.saturating_add(self.page_size());
    }

    /// Same as `presses` calls to [`Pager::show_more`] from a fresh window,
    /// ignoring presses that would reveal nothing more of `len` items.
    pub fn show_more_times(&mut self, presses: usize, len: usize) {
        let page = self.page_size();
        let useful = len.div_ceil(page).saturating_sub(1);
        self.limit = page.saturating_mul(presses.min(useful).saturating_add(1));
    }

    pub fn show_less(&mut self) {
        self.reset();
    }

    pub fn reset(&mut self) {
        self.limit = self.page_size();
    }

    pub fn visible<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[..self.limit.min(items.len())]
    }

    pub fn remaining(&self, len: usize) -> usize {
        len.saturating_sub(self.limit)
    }

    pub fn can_show_less(&self, len: usize) -> bool {
        let page = self.page_size();
        self.limit > page && len > page
    }
}
