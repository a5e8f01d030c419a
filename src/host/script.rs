use crate::foundation::error::{FoldError, FoldResult};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Something the host page would observe and forward to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostEvent {
    /// The surface changed size.
    Resize {
        /// New logical width.
        width: f64,
        /// New logical height.
        height: f64,
        /// New device pixel ratio.
        #[serde(default = "one")]
        scale: f64,
    },
    /// Pointer moved over the surface.
    PointerMove {
        /// Surface-relative x.
        x: f64,
        /// Surface-relative y.
        y: f64,
    },
    /// Pointer left the surface.
    PointerLeave,
    /// Page visibility changed.
    Visibility {
        /// Whether the surface is visible.
        visible: bool,
    },
}

fn one() -> f64 {
    1.0
}

/// A [`HostEvent`] applied right before wall-clock frame `frame` is fulfilled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledEvent {
    /// Wall-clock frame index.
    pub frame: u64,
    /// The event.
    #[serde(flatten)]
    pub event: HostEvent,
}

/// Time-ordered list of host events.
///
/// JSON form is an array of objects such as
/// `{"frame": 30, "type": "pointer_move", "x": 120, "y": 80}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct HostScript {
    events: Vec<ScheduledEvent>,
}

impl HostScript {
    /// Build a script; events are stably sorted by frame.
    pub fn new(mut events: Vec<ScheduledEvent>) -> Self {
        events.sort_by_key(|e| e.frame);
        Self { events }
    }

    /// Parse a script from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> FoldResult<Self> {
        let events: Vec<ScheduledEvent> = serde_json::from_reader(r)
            .map_err(|e| FoldError::serde(format!("parse host script JSON: {e}")))?;
        Ok(Self::new(events))
    }

    /// Parse a script from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> FoldResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            FoldError::validation(format!("open host script '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Events in frame order.
    pub fn events(&self) -> &[ScheduledEvent] {
        &self.events
    }

    /// Return `true` when the script has no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/script.rs"]
mod tests;
