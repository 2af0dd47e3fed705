// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The top-level inference cycle.
//!
//! One cycle walks a fixed state sequence:
//!
//! ```text
//! AwaitingChoice → (Loading | SkipLoading) → PreSignal → Inferring
//!               → PostSignal → Reporting
//! ```
//!
//! and the harness repeats cycles until power-cycled. Two rules shape the
//! sequence:
//!
//! - A failed or aborted load still proceeds to `PreSignal`. Bad input
//!   degrades the inference, but the instrumentation cadence — one
//!   pre pulse, one run, one post pulse per cycle — must hold.
//! - `PostSignal` runs even when the inference reported failure, so the
//!   post pulse always marks "inference attempt concluded".
//!
//! Model-initialisation failure at startup is the one unrecoverable
//! condition; the embedder routes it to [`halt_forever`] instead of ever
//! constructing a controller.

use crate::config::HarnessConfig;
use crate::loader::{InputLoadOrchestrator, InputSource, LoadSummary};
use crate::timing::TimingSignalController;
use crate::transfer::{SerialBulkReceiver, TracingProgress};
use probe_hal::{DelayTimer, GpioBank, InferenceEngine, SerialLink};

/// States of the inference cycle machine.
///
/// `Halted` is terminal and reachable only through [`halt_forever`];
/// every other state loops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleState {
    Idle,
    AwaitingChoice,
    Loading,
    SkipLoading,
    PreSignal,
    Inferring,
    PostSignal,
    Reporting,
    Halted,
}

/// What one cycle did, produced for reporting and consumed immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleReport {
    /// The operator's input-source choice this cycle.
    pub source: InputSource,
    /// Load outcome, present only when the operator chose the link.
    pub load: Option<LoadSummary>,
    /// Whether the engine reported a successful run.
    pub inference_ok: bool,
}

/// Owns every collaborator of the inference loop.
///
/// Constructed once at startup; all process-lifetime state (pin init
/// flags, the driver handles, the link) lives in its fields rather than
/// in file-scope statics.
#[derive(Debug)]
pub struct InferenceCycleController<E, L, G, D> {
    engine: E,
    link: L,
    timing: TimingSignalController<G>,
    delay: D,
    loader: InputLoadOrchestrator,
    settle_delay_ms: u32,
    state: CycleState,
}

impl<E, L, G, D> InferenceCycleController<E, L, G, D>
where
    E: InferenceEngine,
    L: SerialLink,
    G: GpioBank,
    D: DelayTimer,
{
    /// Assembles the controller and initialises the timing pins.
    ///
    /// A timing-pin failure is advisory: it is logged, signalling stays
    /// disabled, and the harness runs anyway — latency measurement is an
    /// aid, not a precondition.
    pub fn new(config: &HarnessConfig, engine: E, link: L, gpio: G, delay: D) -> Self {
        let mut timing = TimingSignalController::new(gpio, config.pre_pin, config.post_pin);
        if let Err(err) = timing.init() {
            tracing::warn!(%err, "timing pins unavailable, pulses disabled");
        }

        Self {
            engine,
            link,
            timing,
            delay,
            loader: InputLoadOrchestrator::new(SerialBulkReceiver::new(config.chunk_size)),
            settle_delay_ms: config.settle_delay_ms,
            state: CycleState::Idle,
        }
    }

    /// Current state, observable between cycles.
    pub fn state(&self) -> CycleState {
        self.state
    }

    /// Whether the timing pins came up.
    pub fn timing_enabled(&self) -> bool {
        self.timing.is_initialized()
    }

    /// Runs exactly one cycle and returns its report.
    pub fn run_cycle(&mut self) -> CycleReport {
        tracing::info!("inference probe ready");

        self.state = CycleState::AwaitingChoice;
        let source = self.loader.prompt_source(&mut self.link);

        let load = match source {
            InputSource::TransferLink => {
                self.state = CycleState::Loading;
                let summary = self.loader.load_all_inputs(
                    &mut self.engine,
                    &mut self.link,
                    &mut TracingProgress,
                );
                // Even an aborted load falls through to the pulse
                // sequence; see module docs.
                Some(summary)
            }
            InputSource::Defaults => {
                self.state = CycleState::SkipLoading;
                tracing::info!("using default input data populated by the engine");
                None
            }
        };

        self.state = CycleState::PreSignal;
        self.timing.pre_start();
        self.delay.sleep_ms(self.settle_delay_ms);
        self.timing.pre_end();

        self.state = CycleState::Inferring;
        tracing::info!("starting inference");
        let inference_ok = self.engine.run();

        self.state = CycleState::PostSignal;
        self.timing.post_start();
        self.delay.sleep_ms(self.settle_delay_ms);
        self.timing.post_end();

        self.state = CycleState::Reporting;
        if inference_ok {
            tracing::info!("inference completed successfully");
        } else {
            tracing::error!("inference failed");
        }

        self.state = CycleState::Idle;
        CycleReport {
            source,
            load,
            inference_ok,
        }
    }

    /// Runs cycles forever. Never returns under normal operation.
    pub fn run_forever(&mut self) -> ! {
        loop {
            let _ = self.run_cycle();
        }
    }
}

/// Parks the harness permanently after a fatal startup failure.
///
/// Mirrors a hardware fault that requires a physical reset: there is no
/// recovery path by design. Parking instead of spinning keeps the core
/// from burning cycles while it waits for that reset.
pub fn halt_forever() -> ! {
    tracing::error!("fatal initialisation failure, harness halted until reset");
    loop {
        std::thread::park();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use probe_sim::{EventLog, InstantDelay, RecordingGpio, ScriptedSerial, SimEvent, StubEngine};

    fn build(
        serial: ScriptedSerial,
        engine: StubEngine,
    ) -> (
        InferenceCycleController<StubEngine, ScriptedSerial, RecordingGpio, InstantDelay>,
        EventLog,
    ) {
        let gpio = RecordingGpio::new();
        let log = gpio.events();
        let engine = engine.with_event_log(log.clone());
        let controller = InferenceCycleController::new(
            &HarnessConfig::default(),
            engine,
            serial,
            gpio,
            InstantDelay::default(),
        );
        (controller, log)
    }

    fn edges_and_runs(log: &EventLog) -> Vec<SimEvent> {
        log.lock().unwrap().clone()
    }

    #[test]
    fn test_skip_loading_cycle() {
        let serial = ScriptedSerial::new().with_prompt_bytes(b"n");
        let (mut c, _log) = build(serial, StubEngine::with_input_sizes(&[16]));

        let report = c.run_cycle();
        assert_eq!(report.source, InputSource::Defaults);
        assert!(report.load.is_none());
        assert!(report.inference_ok);
        assert_eq!(c.state(), CycleState::Idle);
    }

    #[test]
    fn test_pulse_bracketing_order() {
        use probe_hal::{Level, PinId};

        let serial = ScriptedSerial::new().with_prompt_bytes(b"n");
        let (mut c, log) = build(serial, StubEngine::with_input_sizes(&[16]));
        log.lock().unwrap().clear(); // drop init-time low writes

        c.run_cycle();

        let pre = PinId::new(1, 4);
        let post = PinId::new(1, 5);
        assert_eq!(
            edges_and_runs(&log),
            vec![
                SimEvent::Edge(pre, Level::High),
                SimEvent::Edge(pre, Level::Low),
                SimEvent::InferenceRun,
                SimEvent::Edge(post, Level::High),
                SimEvent::Edge(post, Level::Low),
            ],
            "run must sit strictly between the pre and post pulses"
        );
    }

    #[test]
    fn test_post_pulse_emitted_on_inference_failure() {
        use probe_hal::{Level, PinId};

        let serial = ScriptedSerial::new().with_prompt_bytes(b"nn");
        let engine = StubEngine::with_input_sizes(&[16]).with_run_results(vec![false, true]);
        let (mut c, log) = build(serial, engine);
        log.lock().unwrap().clear();

        let report = c.run_cycle();
        assert!(!report.inference_ok);

        let post = PinId::new(1, 5);
        let events = edges_and_runs(&log);
        assert!(events.contains(&SimEvent::Edge(post, Level::High)));
        assert!(events.contains(&SimEvent::Edge(post, Level::Low)));

        // The loop is not poisoned: the next cycle succeeds.
        let report = c.run_cycle();
        assert!(report.inference_ok);
    }

    #[test]
    fn test_aborted_load_still_infers() {
        let serial = ScriptedSerial::new()
            .with_prompt_bytes(b"y")
            .with_bulk_data(vec![7u8; 8])
            .fail_after(8, probe_hal::SerialError::Break);
        let (mut c, log) = build(serial, StubEngine::with_input_sizes(&[32]));

        let report = c.run_cycle();
        let load = report.load.unwrap();
        assert!(!load.complete());
        assert_eq!(load.aborted.unwrap().kind, probe_hal::SerialError::Break);

        // Inference ran regardless.
        assert!(report.inference_ok);
        assert!(edges_and_runs(&log).contains(&SimEvent::InferenceRun));
    }

    #[test]
    fn test_halt_parks_instead_of_returning() {
        let handle = std::thread::spawn(|| halt_forever());
        std::thread::sleep(std::time::Duration::from_millis(50));
        // Parked, not returned: the thread must still be alive.
        assert!(!handle.is_finished());
    }

    #[test]
    fn test_settle_delay_applied_twice_per_cycle() {
        let serial = ScriptedSerial::new().with_prompt_bytes(b"n");
        let gpio = RecordingGpio::new();
        let delay = InstantDelay::default();
        let sleeps = delay.sleeps();
        let mut c = InferenceCycleController::new(
            &HarnessConfig::default(),
            StubEngine::with_input_sizes(&[4]),
            serial,
            gpio,
            delay,
        );

        c.run_cycle();
        assert_eq!(*sleeps.lock().unwrap(), vec![50, 50]);
    }
}
