//! Query lifecycle: `Idle -> Loading -> {Success, Failed}`, restarted by every search.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{Local, TimeZone};
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::{
    fetch::fetch_weather_in,
    model::{Query, UnitSystem},
    provider::WeatherProvider,
    view::DisplayModel,
};

/// The single value a renderer shows. Loading, result and error never coexist.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum QueryState {
    #[default]
    Idle,
    Loading,
    Success(DisplayModel),
    Failed(String),
}

/// Owns the displayed state and replaces it atomically on each query cycle.
///
/// Every search takes a new token; a cycle that settles after a newer one has
/// started is discarded instead of overwriting the newer state.
#[derive(Debug)]
pub struct WeatherSession {
    provider: Box<dyn WeatherProvider>,
    state: watch::Sender<QueryState>,
    latest: AtomicU64,
}

impl WeatherSession {
    pub fn new(provider: Box<dyn WeatherProvider>) -> Self {
        let (state, _) = watch::channel(QueryState::Idle);
        Self {
            provider,
            state,
            latest: AtomicU64::new(0),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<QueryState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> QueryState {
        self.state.borrow().clone()
    }

    /// Run one query cycle, grouping forecast days in local time.
    pub async fn search(&self, location: &str, units: UnitSystem) -> QueryState {
        self.search_in(location, units, &Local).await
    }

    /// Run one query cycle and return its outcome. The outcome is published to
    /// subscribers only if no newer search started in the meantime.
    pub async fn search_in<Tz>(&self, location: &str, units: UnitSystem, tz: &Tz) -> QueryState
    where
        Tz: TimeZone + Sync,
    {
        let mut token = 0;
        self.state.send_modify(|state| {
            token = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
            *state = QueryState::Loading;
        });

        let result = match Query::new(location, units) {
            Ok(query) => fetch_weather_in(self.provider.as_ref(), &query, tz).await,
            Err(err) => Err(err),
        };

        let outcome = match result {
            Ok(report) => QueryState::Success(DisplayModel::project(&report, units)),
            Err(err) => {
                warn!(error = %err, location, "Query cycle failed");
                QueryState::Failed(err.to_string())
            }
        };

        let published = self.state.send_if_modified(|state| {
            if self.latest.load(Ordering::SeqCst) != token {
                return false;
            }
            *state = outcome.clone();
            true
        });

        if !published {
            debug!(token, "Discarding result of superseded query");
        }

        outcome
    }
}
