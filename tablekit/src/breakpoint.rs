//! Responsive breakpoint detection.
//!
//! A [`Viewport`] is the resize event source: it holds the current width and
//! a set of listeners. A [`BreakpointDetector`] attaches to one viewport,
//! classifies every width it reports and tells its own subscribers when the
//! class changes. Dropping the detector detaches it.

use std::sync::{Arc, RwLock, Weak};

use log::{debug, warn};

use crate::theme::TableTheme;

/// Width assumed when no viewport is attached.
pub const DEFAULT_WIDTH: u32 = 1200;

/// Layout class of a viewport width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Breakpoint {
    Mobile,
    Tablet,
    Desktop,
}

impl Breakpoint {
    pub fn as_str(self) -> &'static str {
        match self {
            Breakpoint::Mobile => "mobile",
            Breakpoint::Tablet => "tablet",
            Breakpoint::Desktop => "desktop",
        }
    }
}

impl std::fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Width thresholds separating the breakpoints.
///
/// # Example
///
/// ```
/// use tablekit::breakpoint::{Breakpoint, Breakpoints};
///
/// let bp = Breakpoints::default();
/// assert_eq!(bp.classify(767), Breakpoint::Mobile);
/// assert_eq!(bp.classify(768), Breakpoint::Tablet);
/// assert_eq!(bp.classify(1024), Breakpoint::Desktop);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Breakpoints {
    /// Widths below this are mobile.
    pub mobile: u32,
    /// Widths below this (and at least `mobile`) are tablet.
    pub tablet: u32,
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self {
            mobile: 768,
            tablet: 1024,
        }
    }
}

impl Breakpoints {
    pub fn new(mobile: u32, tablet: u32) -> Self {
        Self { mobile, tablet }
    }

    /// Reads thresholds from theme tokens such as `"768px"`.
    ///
    /// Tokens that do not parse keep their default.
    pub fn from_theme(theme: &TableTheme) -> Self {
        let defaults = Self::default();
        Self {
            mobile: parse_px(&theme.breakpoints.mobile).unwrap_or(defaults.mobile),
            tablet: parse_px(&theme.breakpoints.tablet).unwrap_or(defaults.tablet),
        }
    }

    pub fn classify(&self, width: u32) -> Breakpoint {
        if width < self.mobile {
            Breakpoint::Mobile
        } else if width < self.tablet {
            Breakpoint::Tablet
        } else {
            Breakpoint::Desktop
        }
    }
}

fn parse_px(token: &str) -> Option<u32> {
    let trimmed = token.trim();
    let digits = trimmed.strip_suffix("px").unwrap_or(trimmed).trim();
    let parsed = digits.parse().ok();
    if parsed.is_none() {
        warn!("Ignoring unparseable breakpoint token {token:?}");
    }
    parsed
}

/// Handle returned when registering a listener or subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type ResizeListener = Arc<dyn Fn(u32) + Send + Sync>;
type BreakpointListener = Arc<dyn Fn(Breakpoint) + Send + Sync>;

struct ViewportInner {
    width: u32,
    next_id: u64,
    listeners: Vec<(ListenerId, ResizeListener)>,
}

/// Resize event source.
///
/// Cheap to clone; clones share the same width and listeners.
#[derive(Clone)]
pub struct Viewport {
    inner: Arc<RwLock<ViewportInner>>,
}

impl std::fmt::Debug for Viewport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Viewport")
            .field("width", &self.width())
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH)
    }
}

impl Viewport {
    pub fn new(width: u32) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ViewportInner {
                width,
                next_id: 0,
                listeners: Vec::new(),
            })),
        }
    }

    /// Current width.
    pub fn width(&self) -> u32 {
        self.inner
            .read()
            .map(|guard| guard.width)
            .unwrap_or_else(|poisoned| poisoned.into_inner().width)
    }

    /// Registers a resize listener.
    pub fn add_listener(&self, listener: impl Fn(u32) + Send + Sync + 'static) -> ListenerId {
        let mut guard = self
            .inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let id = ListenerId(guard.next_id);
        guard.next_id += 1;
        guard.listeners.push((id, Arc::new(listener)));
        id
    }

    /// Removes a resize listener. Returns false if it was not registered.
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        let mut guard = self
            .inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let before = guard.listeners.len();
        guard.listeners.retain(|(lid, _)| *lid != id);
        guard.listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.inner
            .read()
            .map(|guard| guard.listeners.len())
            .unwrap_or_else(|poisoned| poisoned.into_inner().listeners.len())
    }

    /// Sets the width and notifies every listener.
    pub fn resize(&self, width: u32) {
        let listeners: Vec<ResizeListener> = {
            let mut guard = self
                .inner
                .write()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            guard.width = width;
            guard.listeners.iter().map(|(_, l)| Arc::clone(l)).collect()
        };
        for listener in listeners {
            listener(width);
        }
    }
}

struct DetectorState {
    breakpoints: Breakpoints,
    width: u32,
    current: Breakpoint,
    next_id: u64,
    subscribers: Vec<(ListenerId, BreakpointListener)>,
}

impl DetectorState {
    /// Records a width; returns the subscribers to notify if the class changed.
    fn update(&mut self, width: u32) -> Option<(Breakpoint, Vec<BreakpointListener>)> {
        self.width = width;
        let next = self.breakpoints.classify(width);
        if next == self.current {
            return None;
        }
        debug!("Breakpoint {} -> {} at width {width}", self.current, next);
        self.current = next;
        Some((
            next,
            self.subscribers.iter().map(|(_, s)| Arc::clone(s)).collect(),
        ))
    }
}

/// Classifies viewport width into [`Breakpoint`]s.
///
/// # Example
///
/// ```
/// use tablekit::breakpoint::{Breakpoint, BreakpointDetector, Breakpoints, Viewport};
///
/// let viewport = Viewport::new(1300);
/// let detector = BreakpointDetector::attach(&viewport, Breakpoints::default());
/// assert_eq!(detector.current(), Breakpoint::Desktop);
///
/// viewport.resize(500);
/// assert!(detector.is_mobile());
///
/// drop(detector);
/// assert_eq!(viewport.listener_count(), 0);
/// ```
pub struct BreakpointDetector {
    state: Arc<RwLock<DetectorState>>,
    attachment: Option<(Viewport, ListenerId)>,
}

impl std::fmt::Debug for BreakpointDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BreakpointDetector")
            .field("width", &self.width())
            .field("current", &self.current())
            .field("attached", &self.attachment.is_some())
            .finish()
    }
}

impl Default for BreakpointDetector {
    fn default() -> Self {
        Self::detached(Breakpoints::default())
    }
}

impl BreakpointDetector {
    /// A detector fixed at [`DEFAULT_WIDTH`].
    pub fn detached(breakpoints: Breakpoints) -> Self {
        Self {
            state: Arc::new(RwLock::new(Self::initial_state(breakpoints, DEFAULT_WIDTH))),
            attachment: None,
        }
    }

    /// A detector following `viewport`.
    pub fn attach(viewport: &Viewport, breakpoints: Breakpoints) -> Self {
        let state = Arc::new(RwLock::new(Self::initial_state(breakpoints, viewport.width())));
        let weak: Weak<RwLock<DetectorState>> = Arc::downgrade(&state);

        let id = viewport.add_listener(move |width| {
            let Some(state) = weak.upgrade() else {
                return;
            };
            let notify = state
                .write()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .update(width);
            if let Some((breakpoint, subscribers)) = notify {
                for subscriber in subscribers {
                    subscriber(breakpoint);
                }
            }
        });

        Self {
            state,
            attachment: Some((viewport.clone(), id)),
        }
    }

    fn initial_state(breakpoints: Breakpoints, width: u32) -> DetectorState {
        DetectorState {
            breakpoints,
            width,
            current: breakpoints.classify(width),
            next_id: 0,
            subscribers: Vec::new(),
        }
    }

    /// Calls `f` with the new breakpoint whenever the class changes.
    pub fn subscribe(&self, f: impl Fn(Breakpoint) + Send + Sync + 'static) -> ListenerId {
        let mut guard = self
            .state
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let id = ListenerId(guard.next_id);
        guard.next_id += 1;
        guard.subscribers.push((id, Arc::new(f)));
        id
    }

    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut guard = self
            .state
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let before = guard.subscribers.len();
        guard.subscribers.retain(|(sid, _)| *sid != id);
        guard.subscribers.len() != before
    }

    fn read<R>(&self, f: impl FnOnce(&DetectorState) -> R) -> R {
        match self.state.read() {
            Ok(guard) => f(&guard),
            Err(poisoned) => f(&poisoned.into_inner()),
        }
    }

    pub fn current(&self) -> Breakpoint {
        self.read(|s| s.current)
    }

    pub fn width(&self) -> u32 {
        self.read(|s| s.width)
    }

    pub fn breakpoints(&self) -> Breakpoints {
        self.read(|s| s.breakpoints)
    }

    pub fn is_mobile(&self) -> bool {
        self.current() == Breakpoint::Mobile
    }

    pub fn is_tablet(&self) -> bool {
        self.current() == Breakpoint::Tablet
    }

    pub fn is_desktop(&self) -> bool {
        self.current() == Breakpoint::Desktop
    }
}

impl Drop for BreakpointDetector {
    fn drop(&mut self) {
        if let Some((viewport, id)) = self.attachment.take() {
            viewport.remove_listener(id);
        }
    }
}
