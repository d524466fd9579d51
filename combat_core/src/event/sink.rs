//! EventSink - Injected consumer of combat events

use super::{CombatEvent, CombatEventKind};
use crate::types::Side;

/// Receives every event the engine emits
///
/// Called synchronously from inside engine operations. The engine holds
/// `&mut self` for the whole call, so a sink cannot re-enter it; sinks that
/// want to react with engine calls collect first and apply afterwards.
pub trait EventSink {
    fn emit(&mut self, event: &CombatEvent);
}

impl<F> EventSink for F
where
    F: FnMut(&CombatEvent),
{
    fn emit(&mut self, event: &CombatEvent) {
        self(event)
    }
}

/// Sink that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: &CombatEvent) {}
}

/// Sink that records events in order
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<CombatEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[CombatEvent] {
        &self.events
    }

    /// Take all recorded events, leaving the log empty
    pub fn drain(&mut self) -> Vec<CombatEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events matching a predicate on their kind
    pub fn filter<P>(&self, predicate: P) -> Vec<CombatEvent>
    where
        P: Fn(&CombatEventKind) -> bool,
    {
        self.events.iter().filter(|e| predicate(&e.kind)).copied().collect()
    }

    /// Events about a given side
    pub fn for_side(&self, side: Side) -> Vec<CombatEvent> {
        self.events.iter().filter(|e| e.side == side).copied().collect()
    }

    /// Event names in order, handy for asserting sequences
    pub fn names(&self) -> Vec<&'static str> {
        self.events.iter().map(|e| e.name()).collect()
    }

    /// One JSON object per line, in emission order
    pub fn to_json_lines(&self) -> Result<String, serde_json::Error> {
        let mut out = String::new();
        for event in &self.events {
            out.push_str(&serde_json::to_string(event)?);
            out.push('\n');
        }
        Ok(out)
    }
}

impl EventSink for EventLog {
    fn emit(&mut self, event: &CombatEvent) {
        self.events.push(*event);
    }
}
