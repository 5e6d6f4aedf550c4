//! Background thumbnail generation.
//!
//! Each sample is decoded on the runtime's blocking pool. Workers only ever
//! send results over a crossbeam channel; the job's owner drains it with
//! [`ThumbnailJob::poll`] and is the single writer of the strip.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crossbeam::channel;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::core::time::{self, Time};
use crate::decode::decoder::FrameSource;
use crate::decode::geometry::FrameSize;
use crate::thumbnail::sampling::{samples, Sample};
use crate::thumbnail::strip::{ThumbnailFrame, ThumbnailStrip};

/// Message from a decode worker to the job owner
#[derive(Debug)]
pub enum ThumbnailEvent {
    Decoded(ThumbnailFrame),
    /// Already logged by the worker; the slot stays empty
    Failed { index: usize, at: Time },
}

/// Starts thumbnail jobs for one frame source
#[derive(Clone)]
pub struct ThumbnailGenerator {
    source: Arc<dyn FrameSource>,
    runtime: Handle,
}

impl ThumbnailGenerator {
    pub fn new(source: Arc<dyn FrameSource>, runtime: Handle) -> Self {
        Self { source, runtime }
    }

    /// Decode `count` evenly spaced frames of an asset lasting `duration`,
    /// each fill-cropped to `size`.
    pub fn start(&self, duration: Time, count: usize, size: FrameSize) -> ThumbnailJob {
        let (event_tx, event_rx) = channel::unbounded();
        let cancelled = Arc::new(AtomicBool::new(false));

        info!(count, ?size, duration = %time::format_time(duration), "generating thumbnails");

        let tasks = samples(duration, count)
            .into_iter()
            .map(|sample| {
                let source = Arc::clone(&self.source);
                let cancelled = Arc::clone(&cancelled);
                let event_tx = event_tx.clone();
                self.runtime.spawn_blocking(move || {
                    decode_sample(source.as_ref(), sample, size, &cancelled, &event_tx)
                })
            })
            .collect();

        ThumbnailJob {
            strip: ThumbnailStrip::new(count),
            events: event_rx,
            tasks,
            cancelled,
            settled: 0,
            size,
        }
    }
}

fn decode_sample(
    source: &dyn FrameSource,
    sample: Sample,
    size: FrameSize,
    cancelled: &AtomicBool,
    event_tx: &channel::Sender<ThumbnailEvent>,
) {
    if cancelled.load(Ordering::Acquire) {
        return;
    }

    let result = source.decode_frame(sample.at, size);

    // The owner stopped listening while we were decoding
    if cancelled.load(Ordering::Acquire) {
        return;
    }

    let event = match result {
        Ok(frame) => ThumbnailEvent::Decoded(ThumbnailFrame {
            index: sample.index,
            progress: sample.progress,
            frame,
        }),
        Err(e) => {
            warn!(
                index = sample.index,
                at = %time::format_time(sample.at),
                "thumbnail decode failed: {}", e
            );
            ThumbnailEvent::Failed {
                index: sample.index,
                at: sample.at,
            }
        }
    };

    // Receiver gone means the job was dropped
    let _ = event_tx.send(event);
}

/// A running strip generation, scoped to its owner.
/// Dropping the job cancels whatever has not finished.
pub struct ThumbnailJob {
    strip: ThumbnailStrip,
    events: channel::Receiver<ThumbnailEvent>,
    tasks: Vec<JoinHandle<()>>,
    cancelled: Arc<AtomicBool>,
    settled: usize,
    size: FrameSize,
}

impl ThumbnailJob {
    /// Apply every result that has arrived so far.
    /// Returns how many thumbnails were placed.
    pub fn poll(&mut self) -> usize {
        if self.is_cancelled() {
            return 0;
        }

        let mut placed = 0;
        for event in self.events.try_iter() {
            self.settled += 1;
            match event {
                ThumbnailEvent::Decoded(thumbnail) => {
                    let index = thumbnail.index;
                    if self.strip.place(thumbnail) {
                        placed += 1;
                    } else {
                        warn!(index, "thumbnail index outside strip");
                    }
                }
                ThumbnailEvent::Failed { index, at } => {
                    debug!(index, at, "leaving thumbnail slot empty");
                }
            }
        }

        if placed > 0 && self.is_finished() {
            debug!(decoded = self.strip.len(), slots = self.strip.slot_count(), "thumbnail strip complete");
        }
        placed
    }

    pub fn strip(&self) -> &ThumbnailStrip {
        &self.strip
    }

    /// Pixel size every thumbnail in this job is decoded at
    pub fn size(&self) -> FrameSize {
        self.size
    }

    /// Every sample has either been placed or reported as failed
    pub fn is_finished(&self) -> bool {
        self.settled >= self.strip.slot_count()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// Stop the job: queued decodes never start, running ones discard
    /// their result. Thumbnails already placed are kept.
    pub fn cancel(&mut self) {
        if self.cancelled.swap(true, Ordering::AcqRel) {
            return;
        }
        for task in self.tasks.drain(..) {
            task.abort();
        }
        if !self.is_finished() {
            debug!(settled = self.settled, slots = self.strip.slot_count(), "thumbnail job cancelled");
        }
    }
}

impl Drop for ThumbnailJob {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::fake::FakeSource;
    use std::time::{Duration, Instant};

    fn runtime() -> tokio::runtime::Runtime {
        tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .build()
            .unwrap()
    }

    fn wait_until_finished(job: &mut ThumbnailJob) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while !job.is_finished() {
            assert!(Instant::now() < deadline, "thumbnail job did not finish");
            job.poll();
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_generates_every_sample_in_order() {
        let rt = runtime();
        let source = Arc::new(FakeSource::new());
        let generator = ThumbnailGenerator::new(source.clone(), rt.handle().clone());

        let mut job = generator.start(time::from_seconds(100.0), 10, FrameSize::new(4, 3));
        wait_until_finished(&mut job);

        let strip = job.strip();
        assert_eq!(strip.len(), 10);
        let shades: Vec<u8> = strip.frames().map(|t| t.frame.data[0]).collect();
        assert_eq!(shades, vec![0, 10, 20, 30, 40, 50, 60, 70, 80, 90]);
        assert!(strip.frames().all(|t| t.frame.size() == FrameSize::new(4, 3)));
        assert_eq!(source.calls(), 10);
    }

    #[test]
    fn test_slow_early_sample_still_lands_first() {
        let rt = runtime();
        let source = FakeSource::new().delayed_at(0, Duration::from_millis(100));
        let generator = ThumbnailGenerator::new(Arc::new(source), rt.handle().clone());

        let mut job = generator.start(time::from_seconds(10.0), 5, FrameSize::new(2, 2));
        wait_until_finished(&mut job);

        let order: Vec<usize> = job.strip().frames().map(|t| t.index).collect();
        assert_eq!(order, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_failed_sample_leaves_gap() {
        let rt = runtime();
        let source = FakeSource::new().failing_at(time::from_seconds(30.0));
        let generator = ThumbnailGenerator::new(Arc::new(source), rt.handle().clone());

        let mut job = generator.start(time::from_seconds(100.0), 10, FrameSize::new(2, 2));
        wait_until_finished(&mut job);

        assert_eq!(job.strip().len(), 9);
        assert!(job.strip().get(3).is_none());
        assert!(job.strip().get(4).is_some());
    }

    #[test]
    fn test_cancelled_job_ignores_late_results() {
        let rt = runtime();
        let mut source = FakeSource::new();
        for i in 0..4 {
            source = source.delayed_at(time::from_seconds(i as f64), Duration::from_millis(50));
        }
        let generator = ThumbnailGenerator::new(Arc::new(source), rt.handle().clone());

        let mut job = generator.start(time::from_seconds(4.0), 4, FrameSize::new(2, 2));
        job.cancel();
        assert!(job.is_cancelled());

        std::thread::sleep(Duration::from_millis(150));
        assert_eq!(job.poll(), 0);
        assert!(job.strip().is_empty());
    }

    // One blocking thread, so later samples are still queued behind the first
    fn single_worker_runtime() -> tokio::runtime::Runtime {
        tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .max_blocking_threads(1)
            .build()
            .unwrap()
    }

    fn slow_first_sample() -> Arc<FakeSource> {
        Arc::new(FakeSource::new().delayed_at(0, Duration::from_millis(100)))
    }

    #[test]
    fn test_cancel_stops_queued_samples() {
        let rt = single_worker_runtime();
        let source = slow_first_sample();
        let generator = ThumbnailGenerator::new(source.clone(), rt.handle().clone());

        let mut job = generator.start(time::from_seconds(5.0), 5, FrameSize::new(2, 2));
        job.cancel();
        std::thread::sleep(Duration::from_millis(300));

        assert!(source.calls() < 5, "queued samples still decoded: {}", source.calls());
        assert!(!job
            .events
            .try_iter()
            .any(|event| matches!(event, ThumbnailEvent::Decoded(_))));
    }

    #[test]
    fn test_dropping_job_stops_queued_samples() {
        let rt = single_worker_runtime();
        let source = slow_first_sample();
        let generator = ThumbnailGenerator::new(source.clone(), rt.handle().clone());

        drop(generator.start(time::from_seconds(5.0), 5, FrameSize::new(2, 2)));
        std::thread::sleep(Duration::from_millis(300));

        assert!(source.calls() < 5, "queued samples still decoded: {}", source.calls());
    }
}
