
//! Run full-texture scans on a background thread pool.
//!
//! Conversion and analysis walk every pixel of every mip level, which
//! can stall a UI thread for large textures. The functions here offload
//! one such scan onto a [`rayon_core::ThreadPool`] and deliver the
//! result through a channel. Where no thread pool can be built, they
//! return `None` and the caller falls back to the synchronous path.
//!
//! Only available with the `rayon` cargo feature, which is enabled
//! by default.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, channel};

use crate::analyze::{MinMaxReport, analyze_with_progress};
use crate::display::FloatVisualization;
use crate::display::convert::{ConvertedChain, convert};
use crate::error::{Error, Result};
use crate::texture::Texture;


/// The pending result of one background scan.
///
/// Dropping the handle detaches the scan: it keeps running on the
/// pool, and its result is discarded when it arrives.
#[derive(Debug)]
pub struct TaskHandle<T> {
    receiver: Receiver<Result<T>>,
    cancelled: Arc<AtomicBool>,
}

impl<T> TaskHandle<T> {

    /// Ask the scan to stop at its next opportunity.
    /// A cancelled scan delivers [`Error::Aborted`] instead of a result.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Block until the scan delivers its result.
    pub fn wait(self) -> Result<T> {
        self.receiver.recv().unwrap_or(Err(Error::Aborted))
    }

    /// The result, where the scan already finished. `None` while
    /// it is still running, so a UI event loop can poll this
    /// without ever blocking.
    pub fn try_result(&self) -> Option<Result<T>> {
        self.receiver.try_recv().ok()
    }
}

/// Compute the min/max statistics of a texture on a background
/// thread. `None` where no thread pool can be built; compute
/// synchronously with [`crate::analyze::analyze`] instead then.
pub fn analyze_in_background(texture: &Texture) -> Option<TaskHandle<MinMaxReport>> {
    spawn_scan(texture, |texture, cancelled| {
        analyze_with_progress(texture, |_| !cancelled.load(Ordering::Relaxed))
    })
}

/// Convert a texture into its canonical display buffer on a
/// background thread. `None` where no thread pool can be built;
/// convert synchronously with [`crate::display::convert::convert`]
/// instead then.
pub fn convert_in_background(texture: &Texture, visualization: FloatVisualization) -> Option<TaskHandle<ConvertedChain>> {
    spawn_scan(texture, move |texture, cancelled| {
        if cancelled.load(Ordering::Relaxed) {
            return Err(Error::Aborted);
        }

        convert(texture, visualization)
    })
}

// one scan per pool: the pool is dropped right after spawning, and
// the job itself keeps the worker threads alive until it completes
fn spawn_scan<T: Send + 'static>(
    texture: &Texture,
    scan: impl FnOnce(&Texture, &AtomicBool) -> Result<T> + Send + 'static,
) -> Option<TaskHandle<T>>
{
    let pool = rayon_core::ThreadPoolBuilder::new()
        .num_threads(1)
        .thread_name(|index| format!("texture scan thread #{}", index))
        .build()
        .ok()?;

    let (sender, receiver) = channel();
    let cancelled = Arc::new(AtomicBool::new(false));

    let task_texture = texture.clone();
    let task_cancelled = cancelled.clone();

    pool.spawn(move || {
        // the handle may have been dropped by now,
        // then the result is simply discarded
        let _ = sender.send(scan(&task_texture, &task_cancelled));
    });

    Some(TaskHandle { receiver, cancelled })
}
