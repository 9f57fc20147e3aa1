//! Learning signals and the in-process bus that fans them out.
//!
//! Delivery is synchronous and best-effort: no persistence, no replay for
//! late subscribers. Durable storage belongs to whoever subscribes.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use chrono::{DateTime, Utc};
use leadpilot_core::{OccalizerMode, PerformanceMetrics};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::scenarios::{Scenario, ScenarioOutcome};

/// One observed performance sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningSignal {
    pub id: Uuid,
    pub tenant_id: String,
    pub campaign_id: String,
    pub cpl: f64,
    pub conversion_rate: Option<f64>,
    pub landing_page_score: Option<u8>,
    pub mode: OccalizerMode,
    pub scenario: Option<Scenario>,
    pub recorded_at: DateTime<Utc>,
}

impl LearningSignal {
    /// Build a signal from the metrics a scenario was evaluated on.
    #[must_use]
    pub fn from_outcome(
        tenant_id: impl Into<String>,
        campaign_id: impl Into<String>,
        mode: OccalizerMode,
        metrics: &PerformanceMetrics,
        outcome: Option<&ScenarioOutcome>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            tenant_id: tenant_id.into(),
            campaign_id: campaign_id.into(),
            cpl: metrics.effective_cpl(),
            conversion_rate: metrics.conversion_rate,
            landing_page_score: metrics.landing_page_score,
            mode,
            scenario: outcome.map(|o| o.scenario),
            recorded_at: Utc::now(),
        }
    }
}

type Handler = Arc<dyn Fn(&LearningSignal) + Send + Sync>;

#[derive(Default)]
struct BusInner {
    next_id: AtomicU64,
    subscribers: Mutex<Vec<(u64, Handler)>>,
}

impl BusInner {
    fn subscribers(&self) -> MutexGuard<'_, Vec<(u64, Handler)>> {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Single-topic publish/subscribe bus for [`LearningSignal`]s.
///
/// Cloning yields another handle to the same subscriber list.
#[derive(Clone, Default)]
pub struct LearningSignalBus {
    inner: Arc<BusInner>,
}

impl std::fmt::Debug for LearningSignalBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LearningSignalBus")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

impl LearningSignalBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for every signal emitted from now on.
    ///
    /// The handler stays registered until [`Subscription::unsubscribe`] is
    /// called; dropping the subscription does not remove it.
    pub fn subscribe<F>(&self, handler: F) -> Subscription
    where
        F: Fn(&LearningSignal) + Send + Sync + 'static,
    {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.inner.subscribers().push((id, Arc::new(handler)));
        tracing::debug!(subscriber = id, "learning signal subscriber added");
        Subscription {
            id,
            bus: Arc::downgrade(&self.inner),
        }
    }

    /// Deliver `signal` to every current subscriber in registration order.
    ///
    /// Returns the number of handlers invoked. Handlers run after the
    /// subscriber lock is released, so they may subscribe or unsubscribe.
    pub fn emit(&self, signal: &LearningSignal) -> usize {
        let handlers: Vec<Handler> = self
            .inner
            .subscribers()
            .iter()
            .map(|(_, h)| Arc::clone(h))
            .collect();

        for handler in &handlers {
            handler(signal);
        }

        tracing::debug!(
            signal = %signal.id,
            campaign = %signal.campaign_id,
            delivered = handlers.len(),
            "learning signal emitted"
        );
        handlers.len()
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers().len()
    }
}

/// Disposer returned by [`LearningSignalBus::subscribe`].
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    bus: Weak<BusInner>,
}

impl Subscription {
    /// Stop delivery to this subscription's handler.
    ///
    /// Returns `false` if the handler was already gone or the bus dropped.
    pub fn unsubscribe(self) -> bool {
        let Some(bus) = self.bus.upgrade() else {
            return false;
        };
        let mut subscribers = bus.subscribers();
        let before = subscribers.len();
        subscribers.retain(|(id, _)| *id != self.id);
        let removed = subscribers.len() < before;
        if removed {
            tracing::debug!(subscriber = self.id, "learning signal subscriber removed");
        }
        removed
    }
}

/// Per-mode roll-up of recorded signals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeSummary {
    pub mode: OccalizerMode,
    pub samples: usize,
    pub mean_cpl: f64,
    pub scenarios: BTreeMap<Scenario, usize>,
}

/// In-memory subscriber that keeps every signal it sees until drained.
#[derive(Debug, Clone, Default)]
pub struct LearningLedger {
    signals: Arc<Mutex<Vec<LearningSignal>>>,
}

impl LearningLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe this ledger to `bus`.
    pub fn attach(&self, bus: &LearningSignalBus) -> Subscription {
        let ledger = self.clone();
        bus.subscribe(move |signal| ledger.record(signal.clone()))
    }

    pub fn record(&self, signal: LearningSignal) {
        self.lock().push(signal);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    #[must_use]
    pub fn signals(&self) -> Vec<LearningSignal> {
        self.lock().clone()
    }

    /// Remove and return every recorded signal, oldest first.
    ///
    /// Hosts that persist signals elsewhere call this after each flush so the
    /// ledger stays bounded. The ledger remains attached.
    pub fn drain(&self) -> Vec<LearningSignal> {
        std::mem::take(&mut *self.lock())
    }

    /// Summaries for every mode with at least one sample, ordered by mode.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn summary(&self) -> Vec<ModeSummary> {
        let signals = self.lock();
        let mut by_mode: BTreeMap<OccalizerMode, (usize, f64, BTreeMap<Scenario, usize>)> =
            BTreeMap::new();

        for s in signals.iter() {
            let entry = by_mode.entry(s.mode).or_default();
            entry.0 += 1;
            entry.1 += s.cpl;
            if let Some(scenario) = s.scenario {
                *entry.2.entry(scenario).or_default() += 1;
            }
        }

        by_mode
            .into_iter()
            .map(|(mode, (samples, total_cpl, scenarios))| ModeSummary {
                mode,
                samples,
                mean_cpl: total_cpl / samples as f64,
                scenarios,
            })
            .collect()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<LearningSignal>> {
        self.signals.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
