use std::time::{Duration, Instant};

pub(crate) const TOOLTIP_TEXT: &str = "功能正在开发中";
pub(crate) const TOOLTIP_DURATION: Duration = Duration::from_secs(3);

/// Avatar hint with a one-shot hide deadline. Showing it again replaces the
/// pending deadline, so an older activation can never hide a newer one.
#[derive(Debug, Default)]
pub(crate) struct Tooltip {
    hide_at: Option<Instant>,
}

impl Tooltip {
    pub(crate) fn show(&mut self, now: Instant) {
        self.hide_at = Some(now + TOOLTIP_DURATION);
    }

    pub(crate) fn tick(&mut self, now: Instant) {
        if matches!(self.hide_at, Some(deadline) if now >= deadline) {
            self.hide_at = None;
        }
    }

    pub(crate) fn is_visible(&self) -> bool {
        self.hide_at.is_some()
    }

    pub(crate) fn time_left(&self, now: Instant) -> Option<Duration> {
        self.hide_at
            .map(|deadline| deadline.saturating_duration_since(now))
    }
}
