use std::fmt;
use std::future::Future;
use std::marker::PhantomData;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};
use std::thread;

use futures::channel::oneshot;

use crate::{
    BvhBuildConfig, Error, LineGeometry, Polygon, Result, TriangleGeometry,
};

/// Describes what a [`Surface`] builds out of its batches.
pub trait SurfaceKind: 'static {
    type Geometry: fmt::Debug + Send + Sync + 'static;

    /// Used to name worker threads and in logs.
    const NAME: &'static str;

    fn build(polygons: &[Polygon], config: &BvhBuildConfig) -> Self::Geometry;

    fn is_built(geometry: &Self::Geometry) -> bool;
}

/// Builds polygons' outlines into a line BVH.
#[derive(Debug)]
pub struct Lines;

impl SurfaceKind for Lines {
    type Geometry = LineGeometry;

    const NAME: &'static str = "lines";

    fn build(polygons: &[Polygon], config: &BvhBuildConfig) -> Self::Geometry {
        LineGeometry::build(polygons, config)
    }

    fn is_built(geometry: &Self::Geometry) -> bool {
        geometry.is_built()
    }
}

/// Builds polygons' triangle fans into a triangle BVH.
#[derive(Debug)]
pub struct Polygons;

impl SurfaceKind for Polygons {
    type Geometry = TriangleGeometry;

    const NAME: &'static str = "polygons";

    fn build(polygons: &[Polygon], config: &BvhBuildConfig) -> Self::Geometry {
        TriangleGeometry::from_polygons(polygons, config)
    }

    fn is_built(geometry: &Self::Geometry) -> bool {
        geometry.is_built()
    }
}

pub type SurfaceLines = Surface<Lines>;
pub type SurfacePolygons = Surface<Polygons>;

/// Owns a piece of geometry and rebuilds it off the calling thread.
///
/// Builds never modify the current geometry in place - a finished build
/// replaces it as a whole (see [`Self::poll_build()`]), so whatever
/// [`Self::current()`] handed out stays valid.
///
/// At most one build runs at a time; dropping the surface doesn't stop a
/// running build, but makes it throw away its result.
#[derive(Debug)]
pub struct Surface<K>
where
    K: SurfaceKind,
{
    config: BvhBuildConfig,
    current: Option<Arc<K::Geometry>>,
    pending: Option<oneshot::Receiver<Arc<K::Geometry>>>,
    building: Arc<AtomicBool>,
    cancelled: Arc<AtomicBool>,
    _kind: PhantomData<K>,
}

impl<K> Surface<K>
where
    K: SurfaceKind,
{
    pub fn new(config: BvhBuildConfig) -> Self {
        Self {
            config,
            current: None,
            pending: None,
            building: Default::default(),
            cancelled: Default::default(),
            _kind: PhantomData,
        }
    }

    pub fn config(&self) -> &BvhBuildConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: BvhBuildConfig) {
        self.config = config;
    }

    pub fn is_building(&self) -> bool {
        self.building.load(Ordering::Acquire)
    }

    /// Returns the most recently swapped-in geometry.
    pub fn current(&self) -> Option<Arc<K::Geometry>> {
        self.current.clone()
    }

    /// Drops the current geometry (and forgets about any pending build).
    pub fn clear(&mut self) {
        self.current = None;
        self.pending = None;
    }

    /// Starts building given batch on a worker thread.
    ///
    /// The returned ticket resolves once the build is done; the result gets
    /// swapped in only after [`Self::poll_build()`] or
    /// [`Self::wait_build()`], though.
    pub fn request_build(
        &mut self,
        polygons: Vec<Polygon>,
    ) -> Result<BuildTicket<K::Geometry>> {
        if self.pending.is_some() {
            if let Err(err) = self.poll_build() {
                log::warn!("Previous {} build failed: {}", K::NAME, err);
            }
        }

        if self.is_building() {
            log::warn!(
                "Rejecting {} build: another one is still in progress",
                K::NAME
            );

            return Err(Error::BuildInProgress);
        }

        if polygons.is_empty() {
            log::warn!("Empty {} batch; clearing current geometry", K::NAME);

            self.clear();

            return Err(Error::EmptyBatch);
        }

        let (owner_tx, owner_rx) = oneshot::channel();
        let (ticket_tx, ticket_rx) = oneshot::channel();
        let config = self.config.clone();
        let building = Arc::clone(&self.building);
        let cancelled = Arc::clone(&self.cancelled);

        self.building.store(true, Ordering::Release);

        let worker = thread::Builder::new()
            .name(format!("contour-{}", K::NAME))
            .spawn(move || {
                let mut building = BuildingGuard(Some(building));
                let geometry = Arc::new(K::build(&polygons, &config));

                // Cleared before the result goes out, so that whoever receives
                // it can request another build straight away
                building.release();

                if cancelled.load(Ordering::Acquire) {
                    log::debug!(
                        "{} surface is gone; discarding its build",
                        K::NAME
                    );

                    return;
                }

                _ = owner_tx.send(Arc::clone(&geometry));
                _ = ticket_tx.send(geometry);
            });

        if let Err(err) = worker {
            self.building.store(false, Ordering::Release);

            return Err(err.into());
        }

        self.pending = Some(owner_rx);

        Ok(BuildTicket { rx: ticket_rx })
    }

    /// Swaps in the pending build, if it's finished; returns whether it
    /// was.
    pub fn poll_build(&mut self) -> Result<bool> {
        let pending = self.pending.as_mut().ok_or(Error::NoPendingBuild)?;

        match pending.try_recv() {
            Ok(Some(geometry)) => {
                self.pending = None;
                self.swap(geometry);

                Ok(true)
            }

            Ok(None) => Ok(false),

            Err(oneshot::Canceled) => {
                self.pending = None;

                Err(Error::WorkerVanished)
            }
        }
    }

    /// Waits for the pending build and swaps it in.
    pub async fn wait_build(&mut self) -> Result<Option<Arc<K::Geometry>>> {
        let pending = self.pending.take().ok_or(Error::NoPendingBuild)?;
        let geometry = pending.await.map_err(|_| Error::WorkerVanished)?;

        self.swap(geometry);

        Ok(self.current())
    }

    fn swap(&mut self, geometry: Arc<K::Geometry>) {
        if K::is_built(&geometry) {
            log::debug!("Swapping in new {} geometry", K::NAME);

            self.current = Some(geometry);
        } else {
            log::warn!(
                "{} batch had nothing to build; clearing current geometry",
                K::NAME
            );

            self.current = None;
        }
    }
}

impl<K> Default for Surface<K>
where
    K: SurfaceKind,
{
    fn default() -> Self {
        Self::new(Default::default())
    }
}

impl<K> Drop for Surface<K>
where
    K: SurfaceKind,
{
    fn drop(&mut self) {
        self.cancelled.store(true, Ordering::Release);
    }
}

/// Resolves to the geometry once its build finishes.
///
/// Fails with [`Error::WorkerVanished`] when the worker couldn't deliver
/// the result (e.g. because the surface got dropped in the meantime).
#[derive(Debug)]
pub struct BuildTicket<G> {
    rx: oneshot::Receiver<Arc<G>>,
}

impl<G> Future for BuildTicket<G> {
    type Output = Result<Arc<G>>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx)
            .poll(cx)
            .map(|result| result.map_err(|_| Error::WorkerVanished))
    }
}

/// Clears the busy flag once the worker is done, panicking or not.
struct BuildingGuard(Option<Arc<AtomicBool>>);

impl BuildingGuard {
    fn release(&mut self) {
        if let Some(flag) = self.0.take() {
            flag.store(false, Ordering::Release);
        }
    }
}

impl Drop for BuildingGuard {
    fn drop(&mut self) {
        self.release();
    }
}
