//! Debounced preview rendering.
//!
//! Every change to the crop, zoom or rotation calls
//! [`RecomputeScheduler::schedule`] with a fresh [`RenderJob`]. A pending
//! timer is aborted and replaced, so a burst of changes renders once, after
//! the quiet period, with the last job.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use cropframe_core::{RenderError, RenderJob, Surface};
use tokio::task::JoinHandle;

/// The function that turns a job into pixels.
pub type RenderFn = Arc<dyn Fn(&RenderJob) -> Result<Surface, RenderError> + Send + Sync>;

/// A rendered preview and what it was rendered from.
#[derive(Debug, Clone)]
pub struct Preview {
    pub surface: Arc<Surface>,
    pub job: RenderJob,
    /// Image generation current when the job was scheduled.
    pub generation: u64,
}

#[derive(Default)]
struct Published {
    preview: Option<Preview>,
    render_count: u64,
}

/// Coalesces render requests into one render per quiet period.
///
/// Must be used from within a Tokio runtime. Dropping the scheduler cancels
/// any pending render.
pub struct RecomputeScheduler {
    delay: Duration,
    render_fn: RenderFn,
    generation: Arc<AtomicU64>,
    published: Arc<Mutex<Published>>,
    pending: Option<JoinHandle<()>>,
}

impl RecomputeScheduler {
    /// Create a scheduler that renders with [`RenderJob::render`].
    pub fn new(delay: Duration, generation: Arc<AtomicU64>) -> Self {
        Self::with_renderer(delay, generation, Arc::new(|job: &RenderJob| job.render()))
    }

    /// Create a scheduler with a custom render function.
    pub fn with_renderer(delay: Duration, generation: Arc<AtomicU64>, render_fn: RenderFn) -> Self {
        Self {
            delay,
            render_fn,
            generation,
            published: Arc::new(Mutex::new(Published::default())),
            pending: None,
        }
    }

    /// Replace any pending render with `job`, to run after the quiet period.
    pub fn schedule(&mut self, job: RenderJob) {
        self.abort_pending();

        let delay = self.delay;
        let render_fn = Arc::clone(&self.render_fn);
        let generation = Arc::clone(&self.generation);
        let published = Arc::clone(&self.published);
        let scheduled_for = generation.load(Ordering::SeqCst);

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            if generation.load(Ordering::SeqCst) != scheduled_for {
                log::debug!("dropping render for superseded image generation {scheduled_for}");
                return;
            }

            let unchanged = lock(&published)
                .preview
                .as_ref()
                .is_some_and(|p| p.generation == scheduled_for && p.job == job);
            if unchanged {
                log::debug!("render job unchanged, keeping current preview");
                return;
            }

            match render_fn(&job) {
                Ok(surface) => {
                    // An image load may have happened while rendering
                    if generation.load(Ordering::SeqCst) != scheduled_for {
                        return;
                    }
                    let mut published = lock(&published);
                    published.render_count += 1;
                    published.preview = Some(Preview {
                        surface: Arc::new(surface),
                        job,
                        generation: scheduled_for,
                    });
                }
                Err(e) => log::warn!("preview render failed: {e}"),
            }
        }));
    }

    /// Cancel a pending render, if any.
    pub fn cancel(&mut self) {
        if self.abort_pending() {
            log::debug!("cancelled pending preview render");
        }
    }

    /// Cancel pending work and forget the current preview.
    pub fn reset(&mut self) {
        self.cancel();
        lock(&self.published).preview = None;
    }

    /// True while a render is waiting for its quiet period to end.
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// The latest published preview.
    pub fn preview(&self) -> Option<Preview> {
        lock(&self.published).preview.clone()
    }

    /// Number of renders that produced a preview.
    pub fn render_count(&self) -> u64 {
        lock(&self.published).render_count
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    fn abort_pending(&mut self) -> bool {
        match self.pending.take() {
            Some(handle) if !handle.is_finished() => {
                handle.abort();
                true
            }
            _ => false,
        }
    }
}

impl Drop for RecomputeScheduler {
    fn drop(&mut self) {
        self.abort_pending();
    }
}

impl std::fmt::Debug for RecomputeScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecomputeScheduler")
            .field("delay", &self.delay)
            .field("pending", &self.is_pending())
            .finish_non_exhaustive()
    }
}

// A panic inside a render cannot leave `Published` half-written, so a
// poisoned lock is still safe to read.
fn lock(published: &Mutex<Published>) -> MutexGuard<'_, Published> {
    published.lock().unwrap_or_else(PoisonError::into_inner)
}
