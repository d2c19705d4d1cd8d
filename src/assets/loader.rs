//! Background asset loading and settle tracking.

use std::panic::{self, AssertUnwindSafe};
use std::sync::{mpsc, Arc};
use std::thread::JoinHandle;

use rustc_hash::FxHashSet;

use super::{AssetLoadError, AssetProvider, AssetRequest, LoadedAsset};
use crate::scene::TileId;

/// Outcome of one load, success or failure.
#[derive(Debug)]
pub struct LoadCompletion {
    /// Tile the load was for.
    pub tile: TileId,
    /// The asset, or why it could not be produced.
    pub result: Result<LoadedAsset, AssetLoadError>,
}

/// Runs asset loads on named worker threads.
///
/// Each request gets its own thread; completions arrive over a channel in
/// whatever order the loads finish and are drained with [`Self::poll`]
/// from the frame loop. Every request yields exactly one completion, a
/// panicking provider included ([`AssetLoadError::WorkerLost`]). Dropping
/// the loader joins every worker.
pub struct AssetLoader {
    provider: Arc<dyn AssetProvider>,
    result_tx: mpsc::Sender<LoadCompletion>,
    result_rx: mpsc::Receiver<LoadCompletion>,
    workers: Vec<JoinHandle<()>>,
}

impl AssetLoader {
    /// Loader backed by `provider`.
    pub fn new(provider: Arc<dyn AssetProvider>) -> Self {
        let (result_tx, result_rx) = mpsc::channel();
        Self {
            provider,
            result_tx,
            result_rx,
            workers: Vec::new(),
        }
    }

    /// Start loading `request` in the background.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the worker thread cannot be spawned.
    pub fn submit(&mut self, request: AssetRequest) -> Result<(), std::io::Error> {
        let provider = Arc::clone(&self.provider);
        let tx = self.result_tx.clone();
        let handle = std::thread::Builder::new()
            .name(format!("asset-load-{}", request.tile.0))
            .spawn(move || {
                // A panicking provider still settles its tile, as a failure.
                let result = panic::catch_unwind(AssertUnwindSafe(|| provider.load(&request)))
                    .unwrap_or_else(|_| {
                        log::error!("asset worker for tile {} panicked", request.tile.0);
                        Err(AssetLoadError::WorkerLost)
                    });
                let _ = tx.send(LoadCompletion {
                    tile: request.tile,
                    result,
                });
            })?;
        self.workers.push(handle);
        Ok(())
    }

    /// Drain every completion that has arrived, without blocking.
    pub fn poll(&mut self) -> Vec<LoadCompletion> {
        let completions: Vec<_> = self.result_rx.try_iter().collect();
        if !completions.is_empty() {
            self.reap_finished();
        }
        completions
    }

    /// Block until the next completion arrives. Test and tooling helper.
    pub fn wait(&mut self) -> Option<LoadCompletion> {
        if self.workers.is_empty() {
            return self.result_rx.try_recv().ok();
        }
        let completion = self.result_rx.recv().ok();
        self.reap_finished();
        completion
    }

    /// Number of workers still running or not yet joined.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.workers.len()
    }

    fn reap_finished(&mut self) {
        let (done, running): (Vec<_>, Vec<_>) =
            self.workers.drain(..).partition(JoinHandle::is_finished);
        self.workers = running;
        for handle in done {
            if handle.join().is_err() {
                log::error!("asset worker panicked");
            }
        }
    }

    /// Join every worker.
    pub fn shutdown(&mut self) {
        for handle in self.workers.drain(..) {
            let _ = handle.join();
        }
    }
}

impl Drop for AssetLoader {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Counts outstanding loads so the engine knows when the last one settles.
#[derive(Debug, Clone, Default)]
pub struct LoadTracker {
    pending: FxHashSet<TileId>,
    failed: FxHashSet<TileId>,
    started: usize,
}

impl LoadTracker {
    /// Tracker with nothing outstanding.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that a load for `tile` has started.
    pub fn begin(&mut self, tile: TileId) {
        if self.pending.insert(tile) {
            self.started += 1;
        }
    }

    /// Record that the load for `tile` settled. Returns `true` if this was
    /// the last outstanding load.
    ///
    /// Settling a tile that was never begun (or already settled) changes
    /// nothing and returns `false`.
    pub fn settle(&mut self, tile: TileId, succeeded: bool) -> bool {
        if !self.pending.remove(&tile) {
            return false;
        }
        if !succeeded {
            let _ = self.failed.insert(tile);
        }
        self.pending.is_empty()
    }

    /// Loads still outstanding.
    #[must_use]
    pub fn outstanding(&self) -> usize {
        self.pending.len()
    }

    /// Loads that settled with a failure.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.failed.len()
    }

    /// Loads begun in total.
    #[must_use]
    pub fn started(&self) -> usize {
        self.started
    }

    /// Whether every begun load has settled.
    #[must_use]
    pub fn all_settled(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::PrimitiveProvider;

    struct FailOdd;

    impl AssetProvider for FailOdd {
        fn load(&self, request: &AssetRequest) -> Result<LoadedAsset, AssetLoadError> {
            if request.tile.0 % 2 == 1 {
                Err(AssetLoadError::Gltf("odd".into()))
            } else {
                PrimitiveProvider.load(request)
            }
        }
    }

    fn request(id: u32) -> AssetRequest {
        AssetRequest {
            tile: TileId(id),
            icon: None,
            size: 3.0,
        }
    }

    #[test]
    fn worker_results_arrive_for_every_request() {
        let mut loader = AssetLoader::new(Arc::new(FailOdd));
        for id in 0..4 {
            loader.submit(request(id)).unwrap();
        }
        let mut seen = Vec::new();
        while seen.len() < 4 {
            let completion = loader.wait().unwrap();
            seen.push((completion.tile.0, completion.result.is_ok()));
        }
        seen.sort_unstable();
        assert_eq!(seen, vec![(0, true), (1, false), (2, true), (3, false)]);
        loader.shutdown();
        assert_eq!(loader.in_flight(), 0);
    }

    struct PanicOn(u32);

    impl AssetProvider for PanicOn {
        fn load(&self, request: &AssetRequest) -> Result<LoadedAsset, AssetLoadError> {
            assert_ne!(request.tile.0, self.0, "malformed model");
            PrimitiveProvider.load(request)
        }
    }

    #[test]
    fn panicking_provider_still_completes() {
        let mut loader = AssetLoader::new(Arc::new(PanicOn(1)));
        for id in 0..3 {
            loader.submit(request(id)).unwrap();
        }
        let mut lost = Vec::new();
        for _ in 0..3 {
            let completion = loader.wait().unwrap();
            if matches!(completion.result, Err(AssetLoadError::WorkerLost)) {
                lost.push(completion.tile.0);
            }
        }
        assert_eq!(lost, vec![1]);
        loader.shutdown();
    }

    #[test]
    fn poll_never_blocks() {
        let mut loader = AssetLoader::new(Arc::new(PrimitiveProvider));
        assert!(loader.poll().is_empty());
        assert!(loader.wait().is_none());
    }

    #[test]
    fn tracker_reports_last_settle_once() {
        let mut tracker = LoadTracker::new();
        for id in 0..3 {
            tracker.begin(TileId(id));
        }
        assert_eq!(tracker.outstanding(), 3);
        assert!(!tracker.settle(TileId(2), true));
        assert!(!tracker.settle(TileId(0), false));
        assert!(!tracker.settle(TileId(0), true));
        assert!(tracker.settle(TileId(1), true));
        assert!(tracker.all_settled());
        assert_eq!(tracker.failed(), 1);
        assert_eq!(tracker.started(), 3);
        assert!(!tracker.settle(TileId(1), true));
    }
}
