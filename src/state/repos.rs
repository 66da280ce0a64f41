// Repository list state with stale-while-revalidate caching.
// A single actor owns the cache slot and publishes state through a watch channel.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use futures::StreamExt;
use futures::future::BoxFuture;
use futures::stream::FuturesUnordered;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, error, info, warn};

use crate::cache::{CACHE_KEY, CacheSlot, EXPIRATION_WINDOW, SlotStore};
use crate::error::FetchError;
use crate::github::{RepoSource, Repository};

/// What consumers render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepoState {
    /// Repositories on screen, possibly empty.
    pub repos: Vec<Repository>,
    /// A non-forced load is in progress.
    pub loading: bool,
    /// Set only when a fetch failed and there was nothing to show instead.
    pub error: Option<String>,
    /// When the data on screen was fetched.
    pub fetched_at: Option<DateTime<Utc>>,
}

/// Coarse lifecycle derived from a [`RepoState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepoPhase {
    Idle,
    LoadingInitial,
    LoadingRevalidate,
    Ready,
    Failed,
}

impl RepoState {
    pub fn phase(&self) -> RepoPhase {
        match (self.loading, self.repos.is_empty()) {
            (true, true) => RepoPhase::LoadingInitial,
            (true, false) => RepoPhase::LoadingRevalidate,
            (false, _) if self.error.is_some() => RepoPhase::Failed,
            (false, _) if self.fetched_at.is_some() => RepoPhase::Ready,
            (false, _) => RepoPhase::Idle,
        }
    }
}

/// Settings for [`RepoCache::spawn`].
#[derive(Debug, Clone)]
pub struct CacheOptions {
    pub account: String,
    pub expiration_window: Duration,
}

impl CacheOptions {
    pub fn new(account: impl Into<String>) -> Self {
        Self {
            account: account.into(),
            expiration_window: EXPIRATION_WINDOW,
        }
    }
}

#[derive(Debug)]
enum Command {
    Load {
        force: bool,
        done: oneshot::Sender<()>,
    },
}

struct Settled {
    token: u64,
    outcome: Result<Vec<Repository>, FetchError>,
    done: oneshot::Sender<()>,
}

/// Consumer side of the repository cache.
#[derive(Debug, Clone)]
pub struct RepoCacheHandle {
    commands: mpsc::Sender<Command>,
    state: watch::Receiver<RepoState>,
}

impl RepoCacheHandle {
    /// Serve the cached list, fetching only if it is missing or stale.
    /// Resolves once this call's fetch (if any) has settled.
    pub async fn load(&self) {
        self.request(false).await;
    }

    /// Fetch regardless of freshness. Resolves once the fetch has settled,
    /// so callers can drive a refresh indicator off it.
    pub async fn refresh(&self) {
        self.request(true).await;
    }

    async fn request(&self, force: bool) {
        let (done, finished) = oneshot::channel();
        if self
            .commands
            .send(Command::Load { force, done })
            .await
            .is_err()
        {
            warn!("repository cache has shut down");
            return;
        }
        let _ = finished.await;
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> RepoState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<RepoState> {
        self.state.clone()
    }
}

/// The actor that owns the cache slot.
pub struct RepoCache<F, S> {
    source: Arc<F>,
    store: S,
    options: CacheOptions,
    commands: mpsc::Receiver<Command>,
    state: watch::Sender<RepoState>,
    in_flight: FuturesUnordered<BoxFuture<'static, Settled>>,
    /// Something non-empty has been published at least once.
    has_data: bool,
    next_token: u64,
    /// Token of the newest call whose fetched data was published.
    applied_token: u64,
}

impl<F: RepoSource, S: SlotStore> RepoCache<F, S> {
    /// Start the actor on the current tokio runtime.
    pub fn spawn(source: F, store: S, options: CacheOptions) -> RepoCacheHandle {
        let (command_tx, command_rx) = mpsc::channel(16);
        let (state_tx, state_rx) = watch::channel(RepoState::default());

        let actor = Self {
            source: Arc::new(source),
            store,
            options,
            commands: command_rx,
            state: state_tx,
            in_flight: FuturesUnordered::new(),
            has_data: false,
            next_token: 1,
            applied_token: 0,
        };
        tokio::spawn(actor.run());

        RepoCacheHandle {
            commands: command_tx,
            state: state_rx,
        }
    }

    async fn run(mut self) {
        loop {
            tokio::select! {
                command = self.commands.recv() => match command {
                    Some(Command::Load { force, done }) => self.begin(force, done),
                    None => break,
                },
                Some(settled) = self.in_flight.next(), if !self.in_flight.is_empty() => {
                    self.settle(settled);
                }
            }
        }

        while let Some(settled) = self.in_flight.next().await {
            self.settle(settled);
        }
        debug!("repository cache stopped");
    }

    /// Publish whatever the slot holds, then start a fetch if needed.
    fn begin(&mut self, force: bool, done: oneshot::Sender<()>) {
        let token = self.next_token;
        self.next_token += 1;

        if !force {
            self.state.send_modify(|s| s.loading = true);
        }

        let mut fresh = false;
        if let Some(slot) = self.read_slot() {
            fresh = slot.is_fresh(Utc::now(), self.options.expiration_window);
            self.has_data = !slot.repos.is_empty();
            let fetched_at = slot.fetched_at();
            self.state.send_modify(|s| {
                s.repos = slot.repos;
                s.fetched_at = fetched_at;
            });
        }

        if fresh && !force {
            debug!(token, "cached repositories are fresh");
            self.state.send_modify(|s| s.loading = false);
            let _ = done.send(());
            return;
        }

        debug!(token, force, "fetching repositories");
        let source = Arc::clone(&self.source);
        let account = self.options.account.clone();
        self.in_flight.push(Box::pin(async move {
            let outcome = source.fetch_repositories(&account).await;
            Settled {
                token,
                outcome,
                done,
            }
        }));
    }

    /// Fold a finished fetch into the published state.
    fn settle(&mut self, settled: Settled) {
        let Settled {
            token,
            outcome,
            done,
        } = settled;
        let superseded = token < self.applied_token;

        match outcome {
            Ok(_) if superseded => {
                debug!(token, applied = self.applied_token, "discarding superseded fetch");
                self.state.send_modify(|s| s.loading = false);
            }
            Ok(repos) => {
                let now = Utc::now();
                info!(count = repos.len(), "fetched repositories");
                self.applied_token = token;
                self.has_data = !repos.is_empty();
                self.write_slot(&CacheSlot::new(now, repos.clone()));
                self.state.send_modify(|s| {
                    s.repos = repos;
                    s.error = None;
                    s.fetched_at = Some(now);
                    s.loading = false;
                });
            }
            Err(err) if self.has_data || superseded => {
                warn!(error = %err, "refresh failed, keeping cached repositories");
                self.state.send_modify(|s| s.loading = false);
            }
            Err(err) => {
                error!(error = %err, "failed to fetch repositories");
                self.state.send_modify(|s| {
                    s.error = Some(err.to_string());
                    s.loading = false;
                });
            }
        }

        let _ = done.send(());
    }

    fn read_slot(&self) -> Option<CacheSlot> {
        let raw = match self.store.get(CACHE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(error = %e, "could not read repository cache");
                return None;
            }
        };

        match CacheSlot::decode(&raw) {
            Ok(slot) => Some(slot),
            Err(e) => {
                warn!(error = %e, "ignoring unreadable repository cache");
                None
            }
        }
    }

    fn write_slot(&self, slot: &CacheSlot) {
        let written = slot
            .encode()
            .and_then(|raw| self.store.set(CACHE_KEY, &raw));
        if let Err(e) = written {
            warn!(error = %e, "could not persist repository cache");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryStore;
    use crate::error::{FolioError, Result as FolioResult};
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Notify;

    fn repo(id: u64, name: &str) -> Repository {
        Repository {
            id,
            name: name.to_string(),
            description: Some(format!("{} description", name)),
            homepage: None,
            language: Some("Rust".to_string()),
            stargazers_count: id * 10,
            forks_count: id,
            html_url: format!("https://github.com/JFMGDB/{}", name),
        }
    }

    struct Step {
        gate: Option<Arc<Notify>>,
        outcome: std::result::Result<Vec<Repository>, FetchError>,
    }

    /// Replays scripted outcomes; a gated step waits until released.
    #[derive(Clone, Default)]
    struct ScriptedSource {
        steps: Arc<Mutex<VecDeque<Step>>>,
        calls: Arc<AtomicUsize>,
    }

    impl ScriptedSource {
        fn then(self, outcome: std::result::Result<Vec<Repository>, FetchError>) -> Self {
            self.steps.lock().unwrap().push_back(Step {
                gate: None,
                outcome,
            });
            self
        }

        fn then_gated(
            self,
            gate: &Arc<Notify>,
            outcome: std::result::Result<Vec<Repository>, FetchError>,
        ) -> Self {
            self.steps.lock().unwrap().push_back(Step {
                gate: Some(Arc::clone(gate)),
                outcome,
            });
            self
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl RepoSource for ScriptedSource {
        async fn fetch_repositories(
            &self,
            _account: &str,
        ) -> std::result::Result<Vec<Repository>, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let step = self
                .steps
                .lock()
                .unwrap()
                .pop_front()
                .expect("unscripted fetch");
            if let Some(gate) = step.gate {
                gate.notified().await;
            }
            step.outcome
        }
    }

    struct BrokenStore;

    impl SlotStore for BrokenStore {
        fn get(&self, _key: &str) -> FolioResult<Option<String>> {
            Err(FolioError::Other("disk on fire".to_string()))
        }

        fn set(&self, _key: &str, _value: &str) -> FolioResult<()> {
            Err(FolioError::Other("disk on fire".to_string()))
        }
    }

    fn seed(store: &MemoryStore, age: chrono::Duration, repos: Vec<Repository>) {
        let slot = CacheSlot::new(Utc::now() - age, repos);
        store.set(CACHE_KEY, &slot.encode().unwrap()).unwrap();
    }

    fn stored(store: &MemoryStore) -> Option<CacheSlot> {
        store
            .get(CACHE_KEY)
            .unwrap()
            .map(|raw| CacheSlot::decode(&raw).unwrap())
    }

    async fn wait_for_calls(source: &ScriptedSource, n: usize) {
        for _ in 0..500 {
            if source.calls() >= n {
                return;
            }
            tokio::time::sleep(Duration::from_millis(2)).await;
        }
        panic!("fetch was not invoked {} time(s)", n);
    }

    #[tokio::test]
    async fn test_fresh_cache_skips_fetch() {
        let store = MemoryStore::new();
        seed(&store, chrono::Duration::minutes(5), vec![repo(1, "alpha")]);
        let source = ScriptedSource::default();

        let cache = RepoCache::spawn(source.clone(), store, CacheOptions::new("JFMGDB"));
        cache.load().await;

        let state = cache.state();
        assert_eq!(state.repos, vec![repo(1, "alpha")]);
        assert!(!state.loading);
        assert!(state.error.is_none());
        assert_eq!(state.phase(), RepoPhase::Ready);
        assert_eq!(source.calls(), 0);
    }

    #[tokio::test]
    async fn test_stale_cache_published_before_fetch_settles() {
        let store = MemoryStore::new();
        seed(&store, chrono::Duration::hours(2), vec![repo(1, "alpha")]);
        let gate = Arc::new(Notify::new());
        let source = ScriptedSource::default().then_gated(&gate, Ok(vec![repo(2, "beta")]));

        let cache = RepoCache::spawn(source.clone(), store, CacheOptions::new("JFMGDB"));
        let loader = {
            let cache = cache.clone();
            tokio::spawn(async move { cache.load().await })
        };

        let mut updates = cache.subscribe();
        let shown = updates
            .wait_for(|s| !s.repos.is_empty())
            .await
            .unwrap()
            .clone();
        assert_eq!(shown.repos, vec![repo(1, "alpha")]);
        assert!(shown.loading);
        assert_eq!(shown.phase(), RepoPhase::LoadingRevalidate);

        wait_for_calls(&source, 1).await;
        assert_eq!(cache.state().repos, vec![repo(1, "alpha")]);

        gate.notify_one();
        loader.await.unwrap();

        assert_eq!(cache.state().repos, vec![repo(2, "beta")]);
        assert!(!cache.state().loading);
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn test_failure_suppressed_when_cache_has_data() {
        let store = MemoryStore::new();
        seed(&store, chrono::Duration::hours(3), vec![repo(1, "alpha")]);
        let source = ScriptedSource::default()
            .then(Err(FetchError::Network))
            .then(Err(FetchError::Http(500)));

        let cache = RepoCache::spawn(source.clone(), store.clone(), CacheOptions::new("JFMGDB"));
        cache.load().await;
        cache.refresh().await;

        let state = cache.state();
        assert_eq!(state.repos, vec![repo(1, "alpha")]);
        assert!(state.error.is_none());
        assert!(!state.loading);
        assert_eq!(source.calls(), 2);
        // The stale slot is left alone.
        assert_eq!(stored(&store).unwrap().repos, vec![repo(1, "alpha")]);
    }

    #[tokio::test]
    async fn test_failure_surfaced_without_data() {
        let source = ScriptedSource::default().then(Err(FetchError::NotFound("ghost".to_string())));

        let cache = RepoCache::spawn(source, MemoryStore::new(), CacheOptions::new("ghost"));
        cache.load().await;

        let state = cache.state();
        assert!(state.repos.is_empty());
        assert!(!state.loading);
        assert!(state.error.as_deref().unwrap().contains("\"ghost\" not found"));
        assert_eq!(state.phase(), RepoPhase::Failed);
    }

    #[tokio::test]
    async fn test_empty_cached_list_does_not_suppress_errors() {
        let store = MemoryStore::new();
        seed(&store, chrono::Duration::hours(2), vec![]);
        let source = ScriptedSource::default().then(Err(FetchError::Network));

        let cache = RepoCache::spawn(source, store, CacheOptions::new("JFMGDB"));
        cache.load().await;

        assert_eq!(cache.state().error, Some(FetchError::Network.to_string()));
    }

    #[tokio::test]
    async fn test_success_clears_previous_error() {
        let source = ScriptedSource::default()
            .then(Err(FetchError::Network))
            .then(Ok(vec![repo(1, "alpha")]));

        let cache = RepoCache::spawn(source, MemoryStore::new(), CacheOptions::new("JFMGDB"));
        cache.load().await;
        assert!(cache.state().error.is_some());

        cache.refresh().await;
        let state = cache.state();
        assert!(state.error.is_none());
        assert_eq!(state.repos, vec![repo(1, "alpha")]);
    }

    #[tokio::test]
    async fn test_refresh_bypasses_fresh_cache() {
        let store = MemoryStore::new();
        seed(&store, chrono::Duration::minutes(1), vec![repo(1, "alpha")]);
        let source = ScriptedSource::default().then(Ok(vec![repo(2, "beta")]));

        let cache = RepoCache::spawn(source.clone(), store.clone(), CacheOptions::new("JFMGDB"));
        cache.refresh().await;

        assert_eq!(source.calls(), 1);
        assert_eq!(cache.state().repos, vec![repo(2, "beta")]);
        assert_eq!(stored(&store).unwrap().repos, vec![repo(2, "beta")]);
    }

    #[tokio::test]
    async fn test_refresh_does_not_raise_loading() {
        let store = MemoryStore::new();
        seed(&store, chrono::Duration::minutes(1), vec![repo(1, "alpha")]);
        let gate = Arc::new(Notify::new());
        let source = ScriptedSource::default().then_gated(&gate, Ok(vec![repo(1, "alpha")]));

        let cache = RepoCache::spawn(source.clone(), store, CacheOptions::new("JFMGDB"));
        let refresher = {
            let cache = cache.clone();
            tokio::spawn(async move { cache.refresh().await })
        };

        wait_for_calls(&source, 1).await;
        assert!(!cache.state().loading);
        assert_eq!(cache.state().repos, vec![repo(1, "alpha")]);

        gate.notify_one();
        refresher.await.unwrap();
        assert!(!cache.state().loading);
    }

    #[tokio::test]
    async fn test_corrupt_slot_treated_as_missing() {
        let store = MemoryStore::new();
        store.set(CACHE_KEY, "{not valid json").unwrap();
        let source = ScriptedSource::default().then(Ok(vec![repo(1, "alpha")]));

        let cache = RepoCache::spawn(source.clone(), store.clone(), CacheOptions::new("JFMGDB"));
        cache.load().await;

        assert_eq!(source.calls(), 1);
        let state = cache.state();
        assert!(state.error.is_none());
        assert_eq!(state.repos, vec![repo(1, "alpha")]);
        assert_eq!(stored(&store).unwrap().repos, vec![repo(1, "alpha")]);
    }

    #[tokio::test]
    async fn test_store_failures_are_not_user_visible() {
        let source = ScriptedSource::default().then(Ok(vec![repo(1, "alpha")]));

        let cache = RepoCache::spawn(source.clone(), BrokenStore, CacheOptions::new("JFMGDB"));
        cache.load().await;

        let state = cache.state();
        assert_eq!(source.calls(), 1);
        assert!(state.error.is_none());
        assert_eq!(state.repos, vec![repo(1, "alpha")]);
    }

    #[tokio::test]
    async fn test_superseded_fetch_is_discarded() {
        let gate = Arc::new(Notify::new());
        let source = ScriptedSource::default()
            .then_gated(&gate, Ok(vec![repo(1, "old")]))
            .then(Ok(vec![repo(2, "new")]));
        let store = MemoryStore::new();

        let cache = RepoCache::spawn(source.clone(), store.clone(), CacheOptions::new("JFMGDB"));
        let first = {
            let cache = cache.clone();
            tokio::spawn(async move { cache.load().await })
        };
        wait_for_calls(&source, 1).await;

        cache.refresh().await;
        assert_eq!(cache.state().repos, vec![repo(2, "new")]);

        gate.notify_one();
        first.await.unwrap();

        assert_eq!(cache.state().repos, vec![repo(2, "new")]);
        assert!(!cache.state().loading);
        assert_eq!(stored(&store).unwrap().repos, vec![repo(2, "new")]);
    }

    #[test]
    fn test_phase_idle_before_any_load() {
        assert_eq!(RepoState::default().phase(), RepoPhase::Idle);
    }
}
