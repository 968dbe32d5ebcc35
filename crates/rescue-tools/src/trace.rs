use rescue_core::Cell;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TraceKind {
    Replan,
    Wall,
    Confirm,
    GoalCollected,
    CandidatesExhausted,
    Terminate,
}

impl TraceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TraceKind::Replan => "replan",
            TraceKind::Wall => "wall",
            TraceKind::Confirm => "confirm",
            TraceKind::GoalCollected => "goal_collected",
            TraceKind::CandidatesExhausted => "candidates_exhausted",
            TraceKind::Terminate => "terminate",
        }
    }
}

/// A small trace event recorded once per notable controller decision.
///
/// Plain data so it can be recorded during an episode and rendered later by tooling.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceEvent {
    pub step: u64,
    pub kind: TraceKind,
    pub a: Option<Cell>,
    pub b: Option<Cell>,
    pub goal: Option<usize>,
}

impl TraceEvent {
    pub fn new(step: u64, kind: TraceKind) -> Self {
        Self {
            step,
            kind,
            a: None,
            b: None,
            goal: None,
        }
    }

    pub fn with_a(mut self, a: Cell) -> Self {
        self.a = Some(a);
        self
    }

    pub fn with_b(mut self, b: Cell) -> Self {
        self.b = Some(b);
        self
    }

    pub fn with_goal(mut self, goal: usize) -> Self {
        self.goal = Some(goal);
        self
    }
}

pub trait TraceSink {
    fn emit(&mut self, event: TraceEvent);
}

#[derive(Debug, Default)]
pub struct NullTraceSink;

impl TraceSink for NullTraceSink {
    fn emit(&mut self, _event: TraceEvent) {}
}

#[derive(Debug, Default)]
pub struct VecTraceSink {
    pub events: Vec<TraceEvent>,
}

impl TraceSink for VecTraceSink {
    fn emit(&mut self, event: TraceEvent) {
        self.events.push(event);
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceLog {
    pub events: Vec<TraceEvent>,
}

impl TraceLog {
    pub fn push(&mut self, event: TraceEvent) {
        self.events.push(event);
    }

    pub fn count(&self, kind: TraceKind) -> usize {
        self.events.iter().filter(|e| e.kind == kind).count()
    }
}

/// Where a controller sends its events: an in-memory log, a user sink, both, or neither.
#[derive(Default)]
pub struct Tracer {
    log: Option<TraceLog>,
    sink: Option<Box<dyn TraceSink>>,
}

impl Tracer {
    pub fn with_log(mut self) -> Self {
        self.log = Some(TraceLog::default());
        self
    }

    pub fn with_sink(mut self, sink: Box<dyn TraceSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn log(&self) -> Option<&TraceLog> {
        self.log.as_ref()
    }

    pub fn emit(&mut self, event: TraceEvent) {
        if let Some(log) = self.log.as_mut() {
            log.push(event.clone());
        }
        if let Some(sink) = self.sink.as_mut() {
            sink.emit(event);
        }
    }
}

impl core::fmt::Debug for Tracer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer")
            .field("log", &self.log)
            .field("sink", &self.sink.as_ref().map(|_| "dyn TraceSink"))
            .finish()
    }
}
