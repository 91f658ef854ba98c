use std::collections::VecDeque;
use std::time::{Duration, Instant};

use jiff::Timestamp;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Dispatch progress. Phases only ever move forward.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    Idle,
    Requested,
    Dispatched,
    EnRoute,
    Arrived,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum PriorityLevel {
    Normal,
    High,
    Critical,
}

/// The three factors summed into the priority score.
#[derive(Clone, Copy, Debug)]
pub struct PriorityFactors {
    pub time_of_day: u32,
    pub location: u32,
    pub traffic: u32,
}

impl PriorityFactors {
    /// Night hours weigh heavier; the location and traffic factors stand in
    /// for signals the demo does not have and are sampled.
    pub fn sample(hour: i8) -> Self {
        let mut rng = rand::thread_rng();

        Self {
            time_of_day: time_of_day_factor(hour),
            location: if rng.gen_bool(0.5) { 2 } else { 1 },
            traffic: if rng.gen_bool(0.3) { 3 } else { 1 },
        }
    }

    pub fn score(&self) -> u32 {
        self.time_of_day + self.location + self.traffic
    }

    pub fn level(&self) -> PriorityLevel {
        match self.score() {
            s if s > 7 => PriorityLevel::Critical,
            s if s > 4 => PriorityLevel::High,
            _ => PriorityLevel::Normal,
        }
    }
}

fn time_of_day_factor(hour: i8) -> u32 {
    if hour < 6 || hour > 22 {
        3
    } else {
        1
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct StatusUpdate {
    pub title: String,
    pub detail: String,
    pub at: Timestamp,
}

struct ScheduledEvent {
    after: Duration,
    phase: Phase,
    title: &'static str,
    detail: &'static str,
}

const TIMELINE: [ScheduledEvent; 5] = [
    ScheduledEvent {
        after: Duration::from_secs(3),
        phase: Phase::Dispatched,
        title: "Ambulance Dispatched",
        detail: "Ambulance #ABC-123 assigned and en route",
    },
    ScheduledEvent {
        after: Duration::from_secs(4),
        phase: Phase::Dispatched,
        title: "Traffic Alert",
        detail: "Notification sent to traffic police to clear path",
    },
    ScheduledEvent {
        after: Duration::from_secs(6),
        phase: Phase::EnRoute,
        title: "En Route to Hospital",
        detail: "Patient is stable, estimated arrival in 10 minutes",
    },
    ScheduledEvent {
        after: Duration::from_secs(8),
        phase: Phase::EnRoute,
        title: "Hospital Notified",
        detail: "Destination hospital prepared for patient arrival",
    },
    ScheduledEvent {
        after: Duration::from_secs(10),
        phase: Phase::Arrived,
        title: "Ambulance Arrived",
        detail: "Ambulance is at the patient's location",
    },
];

/// Simulated dispatch pipeline: a phase machine advanced by an explicit
/// queue of scheduled events instead of timer callbacks. The queue is loaded
/// once per emergency; `advance` applies the next event whenever its driver
/// decides it is due.
pub struct Dispatcher {
    phase: Phase,
    priority: PriorityLevel,
    queue: VecDeque<ScheduledEvent>,
    updates: Vec<StatusUpdate>,
    started: Option<Instant>,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self {
            phase: Phase::Idle,
            priority: PriorityLevel::Normal,
            queue: VecDeque::new(),
            updates: Vec::new(),
            started: None,
        }
    }
}

impl Dispatcher {
    /// Starts an emergency. Returns false if one is already in progress.
    pub fn request(&mut self, factors: PriorityFactors) -> bool {
        if self.phase != Phase::Idle {
            return false;
        }

        self.phase = Phase::Requested;
        self.priority = factors.level();
        self.queue = TIMELINE.into();
        self.started = Some(Instant::now());
        self.push_update(
            "Emergency Started",
            "Location shared with control room and nearby traffic police",
        );

        true
    }

    /// Applies the next scheduled event, if any remain.
    pub fn advance(&mut self) -> Option<StatusUpdate> {
        let event = self.queue.pop_front()?;

        self.phase = self.phase.max(event.phase);
        self.push_update(event.title, event.detail);
        self.updates.last().cloned()
    }

    /// Time until the next queued event is due, measured from the emergency
    /// start. Zero when overdue, `None` when the queue is dry.
    pub fn next_delay(&self) -> Option<Duration> {
        let event = self.queue.front()?;
        let elapsed = self.started.map(|s| s.elapsed()).unwrap_or_default();

        Some(event.after.saturating_sub(elapsed))
    }

    /// SOS raises the priority to Critical regardless of phase.
    pub fn sos(&mut self) {
        self.priority = PriorityLevel::Critical;
        self.push_update(
            "SOS Alert Sent",
            "Priority alert sent to all nearby traffic police and control room",
        );
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn priority(&self) -> PriorityLevel {
        self.priority
    }

    pub fn updates(&self) -> &[StatusUpdate] {
        &self.updates
    }

    fn push_update(&mut self, title: &str, detail: &str) {
        self.updates.push(StatusUpdate {
            title: title.to_string(),
            detail: detail.to_string(),
            at: Timestamp::now(),
        });
    }
}
