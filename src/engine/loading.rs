//! Asset loading and tile joins for [`ShowcaseEngine`].

use std::sync::Arc;

use super::ShowcaseEngine;
use crate::assets::{
    AssetLoader, AssetProvider, AssetRequest, LoadCompletion, LoadedAsset,
};
use crate::error::VitrineError;
use crate::scene::TileId;

impl ShowcaseEngine {
    /// One load request per manifest entry, in manifest order.
    #[must_use]
    pub fn asset_requests(&self) -> Vec<AssetRequest> {
        self.manifest
            .projects
            .iter()
            .enumerate()
            .map(|(i, project)| AssetRequest {
                tile: TileId(i as u32),
                icon: project.icon.clone(),
                size: self.options.tile.size,
            })
            .collect()
    }

    /// Register every manifest entry as an outstanding load and return the
    /// requests. Hosts that load assets themselves (the browser front end)
    /// call this, then feed results to [`complete_load`](Self::complete_load).
    pub fn begin_loads(&mut self) -> Vec<AssetRequest> {
        let requests = self.asset_requests();
        for request in &requests {
            self.loads.begin(request.tile);
        }
        requests
    }

    /// Load every tile on background worker threads. Completions are
    /// applied by [`update`](Self::update) as they arrive.
    ///
    /// Returns the number of loads started.
    ///
    /// # Errors
    ///
    /// Returns [`VitrineError::ThreadSpawn`] if a worker cannot be spawned.
    /// Loads already started keep running.
    pub fn start_loading(
        &mut self,
        provider: Arc<dyn AssetProvider>,
    ) -> Result<usize, VitrineError> {
        let requests = self.begin_loads();
        let count = requests.len();
        let loader = self.loader.insert(AssetLoader::new(provider));
        for request in requests {
            let tile = request.tile;
            if let Err(e) = loader.submit(request) {
                // Settle what could not start so the tracker drains.
                for id in tile.0..count as u32 {
                    let _ = self.loads.settle(TileId(id), false);
                }
                return Err(VitrineError::ThreadSpawn(e));
            }
        }
        log::info!("loading {count} tile assets");
        Ok(count)
    }

    /// Load every tile synchronously on the calling thread.
    pub fn load_inline(&mut self, provider: &dyn AssetProvider) {
        for request in self.begin_loads() {
            let result = provider.load(&request);
            self.complete_load(LoadCompletion {
                tile: request.tile,
                result,
            });
        }
    }

    /// Apply any completions the background loader has delivered.
    pub fn poll_loads(&mut self) {
        let Some(loader) = &mut self.loader else {
            return;
        };
        for completion in loader.poll() {
            self.complete_load(completion);
        }
        if self.loads.all_settled() {
            if let Some(mut loader) = self.loader.take() {
                loader.shutdown();
            }
        }
    }

    /// Settle one load: join the tile on success, log and exclude it on
    /// failure. The grid is re-laid out when a tile joins and when the
    /// last outstanding load settles.
    pub fn complete_load(&mut self, completion: LoadCompletion) {
        let LoadCompletion { tile, result } = completion;
        let succeeded = match result {
            Ok(asset) => self.join_tile(tile, asset),
            Err(e) => {
                let title = self
                    .manifest
                    .projects
                    .get(tile.index())
                    .map_or("?", |p| p.title.as_str());
                log::warn!("tile {} ('{title}') excluded: {e}", tile.0);
                false
            }
        };

        if self.loads.settle(tile, succeeded) {
            self.relayout();
            log::info!(
                "all loads settled: {} tiles shown, {} failed",
                self.scene.len(),
                self.loads.failed()
            );
        }
    }

    fn join_tile(&mut self, tile: TileId, asset: LoadedAsset) -> bool {
        let Some(project) = self.manifest.projects.get(tile.index()) else {
            log::warn!("asset for unknown tile {} discarded", tile.0);
            return false;
        };
        let _ = self
            .scene
            .join(tile, project, asset, self.options.layout.label_offset);
        self.relayout();
        true
    }
}
