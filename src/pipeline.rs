use std::time::{Duration, Instant};

use image::RgbaImage;
use tracing::debug;

use crate::matrix::MatrixProvider;
use crate::render::surface::RasterSurface;
use crate::render::{composite_logo, render, Layout};
use crate::style::{LogoData, StyleConfig};

// Render pipeline driver
//------------------------------------------------------------------------------

/// Quiet period after the last edit before a coalesced re-render fires.
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(120);

/// Monotonically increasing token identifying one render pass. Asynchronous
/// completions compare their captured token against the current one and
/// discard themselves when stale.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub struct Generation(u64);

impl Generation {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Coalesces bursts of style edits into a single pending render: each submit
/// replaces the pending configuration and resets the deadline, so only the
/// latest configuration is ever rendered. A debounce, not a queue.
#[derive(Debug)]
pub struct RenderScheduler {
    window: Duration,
    pending: Option<StyleConfig>,
    deadline: Option<Instant>,
}

impl RenderScheduler {
    pub fn new(window: Duration) -> Self {
        Self { window, pending: None, deadline: None }
    }

    pub fn submit(&mut self, config: StyleConfig, now: Instant) {
        self.pending = Some(config);
        self.deadline = Some(now + self.window);
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Takes the pending configuration once the quiet period has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<StyleConfig> {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                self.pending.take()
            }
            _ => None,
        }
    }
}

/// Asynchronous logo decode handed back to the host. The token pins the
/// render pass that requested it.
#[derive(Debug, Clone)]
pub struct LogoJob {
    token: Generation,
    data: LogoData,
}

impl LogoJob {
    pub fn token(&self) -> Generation {
        self.token
    }

    pub fn data(&self) -> &LogoData {
        &self.data
    }
}

/// Single-threaded render driver: owns the matrix cache, the debounce
/// scheduler, the generation counter and the latest composed bitmap.
pub struct Pipeline {
    provider: MatrixProvider,
    scheduler: RenderScheduler,
    config: StyleConfig,
    generation: u64,
    output: Option<RgbaImage>,
    pending_logo: Option<LogoJob>,
    logo_cache: Option<(Vec<u8>, RgbaImage)>,
}

impl Pipeline {
    pub fn new(config: StyleConfig) -> Self {
        Self {
            provider: MatrixProvider::new(),
            scheduler: RenderScheduler::new(DEBOUNCE_WINDOW),
            config,
            generation: 0,
            output: None,
            pending_logo: None,
            logo_cache: None,
        }
    }

    pub fn config(&self) -> &StyleConfig {
        &self.config
    }

    pub fn generation(&self) -> Generation {
        Generation(self.generation)
    }

    pub fn output(&self) -> Option<&RgbaImage> {
        self.output.as_ref()
    }

    pub fn provider(&self) -> &MatrixProvider {
        &self.provider
    }

    /// Schedules a coalesced re-render of the given configuration.
    pub fn edit(&mut self, config: StyleConfig, now: Instant) {
        self.scheduler.submit(config, now);
    }

    /// Fires the pending render once the debounce window has elapsed.
    /// Returns whether a pass ran.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.scheduler.poll(now) {
            Some(config) => {
                self.config = config;
                self.render_pass();
                true
            }
            None => false,
        }
    }

    /// Renders the current configuration immediately, bypassing the debounce.
    pub fn render_now(&mut self) {
        self.render_pass();
    }

    /// The decode job emitted by the last pass, if its logo was not cached.
    pub fn take_logo_job(&mut self) -> Option<LogoJob> {
        self.pending_logo.take()
    }

    /// Completion callback for an asynchronous logo decode. Paints only if
    /// the job's token still matches the current generation; a completion
    /// arriving after a newer pass started is silently discarded.
    pub fn complete_logo(&mut self, job: &LogoJob, decoded: RgbaImage) -> bool {
        if job.token.0 != self.generation {
            debug!(stale = job.token.0, current = self.generation, "discarding stale logo paint");
            return false;
        }
        if let Some(img) = self.output.take() {
            let width = self.provider.encode(&self.config.text, self.config.ec_level).width();
            let layout = Layout::compute(&self.config, width);
            let mut surface = RasterSurface::from_image(img);
            composite_logo(&mut surface, &layout, &self.config, &decoded);
            self.output = Some(surface.into_image());
        }
        self.logo_cache = Some((job.data.bytes.clone(), decoded));
        true
    }

    fn render_pass(&mut self) {
        self.generation += 1;
        let token = Generation(self.generation);
        let matrix = self.provider.encode(&self.config.text, self.config.ec_level);
        let width = matrix.width();
        let mut surface = render(matrix, &self.config);

        self.pending_logo = None;
        if let Some(logo) = &self.config.logo {
            match &self.logo_cache {
                Some((bytes, cached)) if *bytes == logo.bytes => {
                    let layout = Layout::compute(&self.config, width);
                    composite_logo(&mut surface, &layout, &self.config, cached);
                }
                _ => self.pending_logo = Some(LogoJob { token, data: logo.clone() }),
            }
        }
        self.output = Some(surface.into_image());
        debug!(generation = self.generation, "render pass complete");
    }
}

#[cfg(test)]
mod scheduler_tests {
    use super::*;

    fn t0() -> Instant {
        Instant::now()
    }

    #[test]
    fn test_burst_coalesces_to_latest() {
        let start = t0();
        let mut scheduler = RenderScheduler::new(Duration::from_millis(120));
        scheduler.submit(StyleConfig::default().with_label("a"), start);
        scheduler.submit(StyleConfig::default().with_label("b"), start + Duration::from_millis(50));
        scheduler.submit(StyleConfig::default().with_label("c"), start + Duration::from_millis(100));

        // First deadline has passed, but it was superseded by later edits.
        assert_eq!(scheduler.poll(start + Duration::from_millis(130)), None);
        let fired = scheduler.poll(start + Duration::from_millis(220)).unwrap();
        assert_eq!(fired.label, "c");
        // Nothing queued behind it.
        assert_eq!(scheduler.poll(start + Duration::from_millis(400)), None);
    }

    #[test]
    fn test_poll_before_deadline_is_quiet() {
        let start = t0();
        let mut scheduler = RenderScheduler::new(Duration::from_millis(120));
        scheduler.submit(StyleConfig::default(), start);
        assert_eq!(scheduler.poll(start + Duration::from_millis(119)), None);
        assert!(scheduler.is_pending());
        assert!(scheduler.poll(start + Duration::from_millis(120)).is_some());
    }
}
