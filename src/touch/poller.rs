use super::types::TouchSample;
use crate::{
    config::TouchConfig,
    timing::{ErrorStreak, SampleThrottle},
};

pub trait TouchController {
    type Error;

    fn read_sample(&mut self) -> Result<TouchSample, Self::Error>;
}

#[derive(Debug, PartialEq, Eq)]
pub struct ReadFailure<E> {
    pub error: E,
    /// First failure of a streak; later ones stay quiet until a read succeeds.
    pub report: bool,
}

#[derive(Debug, PartialEq, Eq)]
pub enum PollOutcome<E> {
    /// Too soon after the previous read; nothing was sent on the bus.
    Throttled,
    Sample(TouchSample),
    ReadFailed { error: E, report: bool },
}

/// Owns the read cadence and error reporting for one controller.
pub struct TouchPoller {
    throttle: SampleThrottle,
    errors: ErrorStreak,
}

impl TouchPoller {
    pub const fn new(sample_interval_ms: u64) -> Self {
        Self {
            throttle: SampleThrottle::new(sample_interval_ms),
            errors: ErrorStreak::new(),
        }
    }

    pub fn from_config(config: &TouchConfig) -> Self {
        Self::new(config.sample_interval_ms)
    }

    pub fn poll<C>(&mut self, now_ms: u64, controller: &mut C) -> PollOutcome<C::Error>
    where
        C: TouchController,
    {
        if !self.throttle.admit(now_ms) {
            return PollOutcome::Throttled;
        }
        match controller.read_sample() {
            Ok(sample) => {
                self.errors.record_success();
                PollOutcome::Sample(sample)
            }
            Err(error) => PollOutcome::ReadFailed {
                error,
                report: self.errors.record_failure(),
            },
        }
    }

    /// Drains whatever the controller queued while a blocking double-tap
    /// handler ran. Call once after handling an output with
    /// `flush_requested` set.
    pub fn flush_pending_events<C>(&mut self, controller: &mut C) -> Result<(), ReadFailure<C::Error>>
    where
        C: TouchController,
    {
        match controller.read_sample() {
            Ok(_) => {
                self.errors.record_success();
                Ok(())
            }
            Err(error) => Err(ReadFailure {
                error,
                report: self.errors.record_failure(),
            }),
        }
    }

    pub fn failing(&self) -> bool {
        self.errors.failing()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::active_config;

    struct ScriptedController {
        script: std::vec::Vec<Result<TouchSample, &'static str>>,
        reads: usize,
    }

    impl ScriptedController {
        fn new(script: std::vec::Vec<Result<TouchSample, &'static str>>) -> Self {
            Self { script, reads: 0 }
        }
    }

    impl TouchController for ScriptedController {
        type Error = &'static str;

        fn read_sample(&mut self) -> Result<TouchSample, Self::Error> {
            let next = self
                .script
                .get(self.reads)
                .copied()
                .unwrap_or(Ok(TouchSample::released()));
            self.reads += 1;
            next
        }
    }

    #[test]
    fn reads_are_spaced_by_sample_interval() {
        let mut poller = TouchPoller::from_config(&active_config().touch);
        let mut controller = ScriptedController::new(std::vec![
            Ok(TouchSample::down(10, 10)),
            Ok(TouchSample::contact(12, 10)),
        ]);

        assert_eq!(
            poller.poll(0, &mut controller),
            PollOutcome::Sample(TouchSample::down(10, 10))
        );
        assert_eq!(poller.poll(5, &mut controller), PollOutcome::Throttled);
        assert_eq!(poller.poll(19, &mut controller), PollOutcome::Throttled);
        assert_eq!(
            poller.poll(20, &mut controller),
            PollOutcome::Sample(TouchSample::contact(12, 10))
        );
        assert_eq!(controller.reads, 2);
    }

    #[test]
    fn failures_are_reported_once_per_streak() {
        let mut poller = TouchPoller::new(20);
        let mut controller = ScriptedController::new(std::vec![
            Err("nack"),
            Err("nack"),
            Err("timeout"),
            Ok(TouchSample::released()),
            Err("nack"),
        ]);

        let reports: std::vec::Vec<_> = (0..5u64)
            .map(|step| poller.poll(step * 20, &mut controller))
            .collect();

        assert_eq!(
            reports,
            std::vec![
                PollOutcome::ReadFailed {
                    error: "nack",
                    report: true
                },
                PollOutcome::ReadFailed {
                    error: "nack",
                    report: false
                },
                PollOutcome::ReadFailed {
                    error: "timeout",
                    report: false
                },
                PollOutcome::Sample(TouchSample::released()),
                PollOutcome::ReadFailed {
                    error: "nack",
                    report: true
                },
            ]
        );
    }

    #[test]
    fn flush_reads_once_and_ignores_throttle() {
        let mut poller = TouchPoller::new(20);
        let mut controller = ScriptedController::new(std::vec![
            Ok(TouchSample::down(1, 1)),
            Ok(TouchSample::contact(1, 1)),
        ]);

        assert!(matches!(
            poller.poll(0, &mut controller),
            PollOutcome::Sample(_)
        ));
        assert_eq!(poller.flush_pending_events(&mut controller), Ok(()));
        assert_eq!(controller.reads, 2);
    }

    #[test]
    fn flush_failure_joins_the_error_streak() {
        let mut poller = TouchPoller::new(20);
        let mut controller = ScriptedController::new(std::vec![Err("nack"), Err("nack")]);

        assert_eq!(
            poller.poll(0, &mut controller),
            PollOutcome::ReadFailed {
                error: "nack",
                report: true
            }
        );
        assert_eq!(
            poller.flush_pending_events(&mut controller),
            Err(ReadFailure {
                error: "nack",
                report: false
            })
        );
        assert!(poller.failing());
    }
}
