//! Background layout worker.
//!
//! [`TagWall`] owns the inputs of a tag cloud (tags, configuration, optional
//! fill shape) and a dedicated worker thread that turns them into placements.
//!
//! # Scheduling rules
//!
//! - Every trigger (`set_tags`, `resize`, ...) updates the inputs and queues a
//!   relayout, returning immediately.
//! - At most one layout runs at a time. A trigger that arrives while a run is in
//!   progress does not interrupt it; it is picked up once the run has
//!   published, and triggers that pile up meanwhile are served by one run.
//! - A run snapshots the inputs when it starts, so it always works from the
//!   latest inputs available at that moment.
//! - Finished placements replace the previous ones as a whole: readers of
//!   [`TagWall::placements`] see either the old or the new list, never a mix.

use std::sync::mpsc;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use parking_lot::{Condvar, Mutex, RwLock};
use tracing::{debug, info};

use crate::colour::Colour;
use crate::config::{LayoutConfig, SelectionStrategy};
use crate::layout::compute_layout_in;
use crate::measure::TextMeasurer;
use crate::placement::Placement;
use crate::random::{RandomSource, XorShiftRng};
use crate::region::FreeRegion;
use crate::units::Px;
use crate::TagWallError;

/// Receives each published layout, on the worker thread
pub type LayoutCallback = Box<dyn Fn(Arc<[Placement]>) + Send + 'static>;

enum Command {
    Relayout,
    Shutdown,
}

#[derive(Clone)]
struct Inputs {
    tags: Vec<String>,
    config: LayoutConfig,
    shape: Option<FreeRegion>,
}

#[derive(Default)]
struct Status {
    /// Triggers issued so far
    requested: u64,
    /// Triggers covered by published runs
    served: u64,
    running: bool,
    /// Completed runs
    generation: u64,
    /// The worker has exited, normally or by panicking
    closed: bool,
}

struct Shared {
    inputs: Mutex<Inputs>,
    published: RwLock<Arc<[Placement]>>,
    status: Mutex<Status>,
    idle: Condvar,
}

/// Builds a [TagWall] with optional callback and random source
pub struct TagWallBuilder {
    measurer: Arc<dyn TextMeasurer>,
    config: LayoutConfig,
    tags: Vec<String>,
    rng: Option<Box<dyn RandomSource + Send>>,
    callback: Option<LayoutCallback>,
}

impl TagWallBuilder {
    /// Initial layout configuration
    pub fn config(mut self, config: LayoutConfig) -> Self {
        self.config = config;
        self
    }

    /// Initial tag list
    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Random source for all runs of this wall; defaults to a clock-seeded
    /// [XorShiftRng]
    pub fn rng<R: RandomSource + Send + 'static>(mut self, rng: R) -> Self {
        self.rng = Some(Box::new(rng));
        self
    }

    /// Called with every published layout
    pub fn on_layout<F>(mut self, callback: F) -> Self
    where
        F: Fn(Arc<[Placement]>) + Send + 'static,
    {
        self.callback = Some(Box::new(callback));
        self
    }

    /// Start the layout worker. No layout is computed until the first trigger.
    pub fn spawn(self) -> Result<TagWall, TagWallError> {
        let shared = Arc::new(Shared {
            inputs: Mutex::new(Inputs {
                tags: self.tags,
                config: self.config,
                shape: None,
            }),
            published: RwLock::new(Arc::from(Vec::new())),
            status: Mutex::new(Status::default()),
            idle: Condvar::new(),
        });

        let (sender, receiver) = mpsc::channel::<Command>();
        let worker = Worker {
            shared: Arc::clone(&shared),
            measurer: self.measurer,
            rng: self
                .rng
                .unwrap_or_else(|| Box::new(XorShiftRng::from_entropy())),
            callback: self.callback,
        };

        let handle = thread::Builder::new()
            .name("tag-wall-layout".into())
            .spawn(move || worker.run(receiver))?;

        Ok(TagWall {
            sender,
            handle: Some(handle),
            shared,
        })
    }
}

/// A tag cloud whose layout is computed on a background worker
pub struct TagWall {
    sender: mpsc::Sender<Command>,
    handle: Option<JoinHandle<()>>,
    shared: Arc<Shared>,
}

impl TagWall {
    pub fn builder<M: TextMeasurer + 'static>(measurer: M) -> TagWallBuilder {
        TagWallBuilder {
            measurer: Arc::new(measurer),
            config: LayoutConfig::default(),
            tags: Vec::new(),
            rng: None,
            callback: None,
        }
    }

    /// Start a worker with the given configuration and default settings
    pub fn spawn<M: TextMeasurer + 'static>(measurer: M, config: LayoutConfig) -> Result<TagWall, TagWallError> {
        TagWall::builder(measurer).config(config).spawn()
    }

    /// Replace the tag list and lay out again
    pub fn set_tags<I, S>(&self, tags: I) -> Result<(), TagWallError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tags: Vec<String> = tags.into_iter().map(Into::into).collect();
        self.update(|inputs| inputs.tags = tags)
    }

    /// Change the primary and secondary tag colours and lay out again
    pub fn set_colours<P: Into<Colour>, S: Into<Colour>>(&self, primary: P, secondary: S) -> Result<(), TagWallError> {
        let (primary, secondary) = (primary.into(), secondary.into());
        self.update(|inputs| {
            inputs.config.colours(primary, secondary);
        })
    }

    /// Change the text size range and lay out again. A `max` of [None] derives
    /// the maximum from the canvas and the tags.
    pub fn set_text_size_bounds(&self, min: Px, max: Option<Px>) -> Result<(), TagWallError> {
        self.update(|inputs| {
            inputs.config.min_text_size(min).max_text_size(max);
        })
    }

    pub fn set_strategy(&self, strategy: SelectionStrategy) -> Result<(), TagWallError> {
        self.update(|inputs| {
            inputs.config.strategy(strategy);
        })
    }

    /// The canvas changed size
    pub fn resize(&self, width: i32, height: i32) -> Result<(), TagWallError> {
        self.update(|inputs| {
            inputs.config.size(width, height);
        })
    }

    /// Only fill `shape` instead of the whole canvas
    pub fn set_shape(&self, shape: FreeRegion) -> Result<(), TagWallError> {
        self.update(|inputs| inputs.shape = Some(shape))
    }

    /// Fill the whole canvas again
    pub fn clear_shape(&self) -> Result<(), TagWallError> {
        self.update(|inputs| inputs.shape = None)
    }

    /// Lay out again with unchanged inputs, producing a fresh random arrangement
    pub fn relayout(&self) -> Result<(), TagWallError> {
        self.update(|_| {})
    }

    /// The most recently published placements
    pub fn placements(&self) -> Arc<[Placement]> {
        Arc::clone(&self.shared.published.read())
    }

    /// Number of layout runs published so far
    pub fn generation(&self) -> u64 {
        self.shared.status.lock().generation
    }

    /// Block until every trigger issued so far has been served by a published
    /// run
    pub fn wait_idle(&self) {
        let mut status = self.shared.status.lock();
        while status.running || status.served < status.requested {
            self.shared.idle.wait(&mut status);
        }
    }

    /// Stop the worker after the run in progress, if any, and wait for it
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn update<F: FnOnce(&mut Inputs)>(&self, change: F) -> Result<(), TagWallError> {
        change(&mut self.shared.inputs.lock());
        {
            let mut status = self.shared.status.lock();
            if status.closed {
                return Err(TagWallError::SchedulerClosed);
            }
            status.requested += 1;
        }

        if self.sender.send(Command::Relayout).is_err() {
            let mut status = self.shared.status.lock();
            status.requested -= 1;
            return Err(TagWallError::SchedulerClosed);
        }
        Ok(())
    }

    fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            debug!("stopping layout worker");
            let _ = self.sender.send(Command::Shutdown);
            let _ = handle.join();
        }
    }
}

impl Drop for TagWall {
    fn drop(&mut self) {
        self.stop();
    }
}

struct Worker {
    shared: Arc<Shared>,
    measurer: Arc<dyn TextMeasurer>,
    rng: Box<dyn RandomSource + Send>,
    callback: Option<LayoutCallback>,
}

/// Marks the worker closed and wakes every waiter when the worker exits,
/// including by unwinding out of a panicking measurer or callback
struct ReleaseWaiters(Arc<Shared>);

impl Drop for ReleaseWaiters {
    fn drop(&mut self) {
        let mut status = self.0.status.lock();
        status.closed = true;
        status.running = false;
        status.served = status.requested;
        self.0.idle.notify_all();
    }
}

impl Worker {
    fn run(mut self, receiver: mpsc::Receiver<Command>) {
        let _release = ReleaseWaiters(Arc::clone(&self.shared));
        while let Ok(command) = receiver.recv() {
            if let Command::Shutdown = command {
                break;
            }

            // every relayout queued so far is served by this single run
            let mut shutdown = false;
            while let Ok(queued) = receiver.try_recv() {
                if let Command::Shutdown = queued {
                    shutdown = true;
                    break;
                }
            }
            if shutdown {
                break;
            }

            self.layout();
        }
        debug!("layout worker stopped");
    }

    fn layout(&mut self) {
        let target = {
            let mut status = self.shared.status.lock();
            status.running = true;
            status.requested
        };
        let inputs = self.shared.inputs.lock().clone();

        let region = inputs
            .shape
            .unwrap_or_else(|| FreeRegion::new(inputs.config.width, inputs.config.height));
        let placements: Arc<[Placement]> = compute_layout_in(
            region,
            &inputs.tags,
            &inputs.config,
            self.measurer.as_ref(),
            self.rng.as_mut(),
        )
        .into();

        *self.shared.published.write() = Arc::clone(&placements);
        let generation = {
            let mut status = self.shared.status.lock();
            status.running = false;
            status.served = status.served.max(target);
            status.generation += 1;
            status.generation
        };
        self.shared.idle.notify_all();
        info!(generation, placements = placements.len(), "layout published");

        if let Some(callback) = &self.callback {
            callback(placements);
        }
    }
}
