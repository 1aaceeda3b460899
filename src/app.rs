//! Application state: the widget state machine, the one-shot fetch and the
//! terminal app that displays a frozen snapshot.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local};
use serde::ser::{Serialize, SerializeStruct, Serializer};
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

use crate::config::WidgetConfig;
use crate::data::NormalizedStatus;
use crate::source::{FetchError, StatusFetcher};
use crate::ui::Theme;

/// How long to wait after starting the fetch before rendering.
pub const DEFAULT_RENDER_DELAY: Duration = Duration::from_secs(2);

/// What the dashboard can show.
///
/// `Unconfigured` is absorbing: no fetch is ever attempted from it. From
/// `Loading`, a fetch result moves to `Ready` or `Error`.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetState {
    Unconfigured,
    Loading,
    Error(String),
    Ready(NormalizedStatus),
}

impl WidgetState {
    /// The state a settled fetch leads to.
    pub fn from_result(result: Result<NormalizedStatus, FetchError>) -> Self {
        match result {
            Ok(status) => WidgetState::Ready(status),
            Err(err) => WidgetState::Error(err.to_string()),
        }
    }
}

/// Immutable view of the state handed to the renderer.
///
/// Serializes as `{"isLoading", "serverData", "errorMessage"}`.
#[derive(Debug, Clone)]
pub struct RenderSnapshot {
    state: WidgetState,
    server_name: Option<String>,
    captured_at: DateTime<Local>,
}

impl RenderSnapshot {
    pub fn new(state: WidgetState, server_name: Option<String>) -> Self {
        Self {
            state,
            server_name,
            captured_at: Local::now(),
        }
    }

    pub fn unconfigured() -> Self {
        Self::new(WidgetState::Unconfigured, None)
    }

    pub fn state(&self) -> &WidgetState {
        &self.state
    }

    /// True while the fetch had not settled at capture time.
    pub fn is_loading(&self) -> bool {
        matches!(self.state, WidgetState::Loading)
    }

    pub fn server_data(&self) -> Option<&NormalizedStatus> {
        match &self.state {
            WidgetState::Ready(status) => Some(status),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.state {
            WidgetState::Error(message) => Some(message),
            _ => None,
        }
    }

    /// The configured server name, if any.
    pub fn server_name(&self) -> Option<&str> {
        self.server_name.as_deref()
    }

    pub fn captured_at(&self) -> DateTime<Local> {
        self.captured_at
    }
}

impl Serialize for RenderSnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("RenderSnapshot", 3)?;
        s.serialize_field("isLoading", &self.is_loading())?;
        s.serialize_field("serverData", &self.server_data())?;
        s.serialize_field("errorMessage", &self.error_message())?;
        s.end()
    }
}

/// A fetch running on a background task, delivering exactly one result.
#[derive(Debug)]
pub struct PendingStatus {
    receiver: oneshot::Receiver<Result<NormalizedStatus, FetchError>>,
}

impl PendingStatus {
    /// Start fetching on a spawned task. Must be called inside a tokio runtime.
    pub fn spawn(fetcher: Arc<dyn StatusFetcher>, config: WidgetConfig) -> Self {
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            info!(server = %config.server_name, "starting data fetch");
            let result = fetcher.fetch(&config).await;
            match &result {
                Ok(status) => info!(server = %status.name, status = %status.status, "data loaded"),
                Err(err) => warn!(error = %err, "error loading data"),
            }
            if tx.send(result).is_err() {
                debug!("fetch settled after render; result discarded");
            }
        });

        Self { receiver: rx }
    }

    /// Take whatever is available right now without waiting.
    pub fn best_available(&mut self) -> WidgetState {
        match self.receiver.try_recv() {
            Ok(result) => WidgetState::from_result(result),
            Err(oneshot::error::TryRecvError::Empty) => WidgetState::Loading,
            Err(oneshot::error::TryRecvError::Closed) => {
                WidgetState::Error("Unknown error".to_string())
            }
        }
    }
}

/// Produce the snapshot to render.
///
/// Without configuration this returns `Unconfigured` at once and never calls
/// the fetcher. Otherwise the fetch is started, `delay` elapses, and the best
/// state available at that instant is captured; the fetch is not awaited.
pub async fn prepare_snapshot(
    config: Option<&WidgetConfig>,
    fetcher: Arc<dyn StatusFetcher>,
    delay: Duration,
) -> RenderSnapshot {
    let Some(config) = config else {
        info!("widget not configured");
        return RenderSnapshot::unconfigured();
    };

    let mut pending = PendingStatus::spawn(fetcher, config.clone());
    tokio::time::sleep(delay).await;

    let state = pending.best_available();
    debug!(?state, "captured state for render");
    RenderSnapshot::new(state, Some(config.server_name.clone()))
}

/// The two dashboard layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum View {
    /// Gauges for load, memory and disk.
    #[default]
    Gauge,
    /// Side-by-side panels with progress bars.
    Panel,
}

impl View {
    /// Switch to the other view.
    pub fn toggle(self) -> Self {
        match self {
            View::Gauge => View::Panel,
            View::Panel => View::Gauge,
        }
    }

    /// Returns the display label for this view.
    pub fn label(&self) -> &'static str {
        match self {
            View::Gauge => "Gauge",
            View::Panel => "Panel",
        }
    }
}

/// Terminal app state. The snapshot never changes once the app exists.
pub struct App {
    pub running: bool,
    pub view: View,
    pub show_help: bool,
    pub snapshot: RenderSnapshot,
    pub theme: Theme,
}

impl App {
    /// Create a new App for the given snapshot and view.
    pub fn new(snapshot: RenderSnapshot, view: View) -> Self {
        Self::with_theme(snapshot, view, Theme::auto_detect())
    }

    pub fn with_theme(snapshot: RenderSnapshot, view: View, theme: Theme) -> Self {
        Self {
            running: true,
            view,
            show_help: false,
            snapshot,
            theme,
        }
    }

    /// Switch between the gauge and panel layouts.
    pub fn toggle_view(&mut self) {
        self.view = self.view.toggle();
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }
}
