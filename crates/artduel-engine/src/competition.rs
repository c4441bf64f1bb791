use std::sync::Mutex;
use std::time::Instant;

use artduel_client::{ChatRequest, ChatService, ServiceError};
use artduel_core::sanitize::{clean_art, guess_matches, normalize_guess};
use artduel_core::{Animal, RunState, Stage};
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::config::EngineConfig;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("a run is already in progress")]
    RunInProgress,

    #[error(transparent)]
    Service(#[from] ServiceError),
}

/// Final result of a successful run, for headless output.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub animal: Animal,
    pub art: String,
    pub guess: String,
    pub elapsed_secs: f64,
    pub matched: bool,
}

/// The generate-then-guess workflow controller.
///
/// Owns the only mutable `RunState`; front ends read cloned snapshots
/// and never mutate it. The two API calls are strictly sequential (the
/// guesser's input is the generator's output), with no retries and no
/// mid-run cancellation.
pub struct Competition<S: ChatService> {
    service: S,
    config: EngineConfig,
    state: Mutex<RunState>,
}

impl<S: ChatService> Competition<S> {
    pub fn new(service: S, config: EngineConfig) -> Self {
        Self {
            service,
            config,
            state: Mutex::new(RunState::new()),
        }
    }

    /// Read-only view of the current run for rendering.
    pub fn snapshot(&self) -> RunState {
        self.state.lock().unwrap().clone()
    }

    /// Run one full competition. Rejects overlapping runs at the
    /// workflow level: a second `start` while a run is in flight fails
    /// regardless of what the front end does with its controls.
    pub async fn start(&self) -> Result<RunSummary, EngineError> {
        let animal = Animal::pick(&mut rand::thread_rng());
        self.run_with_animal(animal).await
    }

    pub(crate) async fn run_with_animal(&self, animal: Animal) -> Result<RunSummary, EngineError> {
        {
            let mut state = self.state.lock().unwrap();
            if matches!(state.stage, Stage::Generating | Stage::Guessing) {
                return Err(EngineError::RunInProgress);
            }
            // Previous-run fields are stale now, clear them all.
            state.reset();
            state.stage = Stage::Generating;
            state.animal = Some(animal);
        }
        info!("run started, animal: {animal}");

        match self.run_phases(animal).await {
            Ok(summary) => Ok(summary),
            Err(e) => {
                // Any failure is terminal for this run: surface the
                // message, drop partial state, go back to Idle.
                let mut state = self.state.lock().unwrap();
                state.reset();
                state.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    async fn run_phases(&self, animal: Animal) -> Result<RunSummary, EngineError> {
        // Phase 1: generate the art.
        let art_req = ChatRequest::single_turn(
            &self.config.generator_model,
            artduel_prompts::art::prompt(animal),
            self.config.temperature,
            self.config.max_tokens,
        );
        let raw_art = self.service.complete(&art_req).await?;
        let art = clean_art(&raw_art);
        {
            let mut state = self.state.lock().unwrap();
            state.art = Some(art.clone());
            state.stage = Stage::Guessing;
        }
        info!("art generated ({} bytes), guessing", art.len());

        // Phase 2: guess from the art. The clock covers only this call.
        let guess_req = ChatRequest::single_turn(
            &self.config.guesser_model,
            artduel_prompts::guess::prompt(&art),
            self.config.temperature,
            self.config.max_tokens,
        );
        let started = Instant::now();
        let raw_guess = self.service.complete(&guess_req).await?;
        let elapsed_secs = round2(started.elapsed().as_secs_f64());

        let guess = normalize_guess(&raw_guess);
        let matched = guess_matches(animal.as_str(), &guess);
        {
            let mut state = self.state.lock().unwrap();
            state.guess = Some(guess.clone());
            state.elapsed_secs = Some(elapsed_secs);
            state.stage = Stage::Complete;
        }
        info!("guess: {guess} ({elapsed_secs:.2}s, matched: {matched})");

        Ok(RunSummary {
            animal,
            art,
            guess,
            elapsed_secs,
            matched,
        })
    }
}

/// Two-decimal seconds, matching the precision the UI displays.
fn round2(secs: f64) -> f64 {
    (secs * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use artduel_client::MockChat;
    use tokio::sync::Semaphore;

    use super::*;

    fn competition(mock: MockChat) -> Competition<MockChat> {
        Competition::new(mock, EngineConfig::default())
    }

    #[tokio::test]
    async fn full_run_reaches_complete() {
        let mock = MockChat::with_responses(vec![
            "<think>planning</think>```\n (\\__/)\n ( . .)\n (> <)\n```",
            "Rabbits!",
        ]);
        let comp = competition(mock);

        let summary = comp.run_with_animal(Animal::Rabbit).await.unwrap();
        assert_eq!(summary.art, "(\\__/)\n ( . .)\n (> <)");
        assert_eq!(summary.guess, "rabbits");
        assert!(summary.matched);
        assert!(summary.elapsed_secs >= 0.0);

        let state = comp.snapshot();
        assert_eq!(state.stage, Stage::Complete);
        assert_eq!(state.matched(), Some(true));
        assert!(state.error.is_none());
    }

    #[tokio::test]
    async fn wrong_guess_is_not_matched() {
        let mock = MockChat::with_responses(vec![" ( o.o )\n ( / \\ )", "cat"]);
        let comp = competition(mock);

        let summary = comp.run_with_animal(Animal::Owl).await.unwrap();
        assert_eq!(summary.guess, "cat");
        assert!(!summary.matched);
        assert_eq!(comp.snapshot().matched(), Some(false));
    }

    #[tokio::test]
    async fn both_phases_hit_the_service() {
        let mock = MockChat::with_responses(vec!["art", "owl"]);
        let comp = competition(mock);
        comp.run_with_animal(Animal::Owl).await.unwrap();

        let calls = comp.service.calls();
        assert_eq!(calls.len(), 2);
        assert!(calls[0].messages[0].content.contains("ASCII art of a owl"));
        assert!(calls[1].messages[0].content.contains("art"));
    }

    #[tokio::test]
    async fn generate_failure_resets_to_idle() {
        let mock = MockChat::new();
        mock.push_err(ServiceError::Api {
            status: 503,
            body: "rate limited".into(),
        });
        let comp = competition(mock);

        let err = comp.start().await.unwrap_err();
        assert!(matches!(err, EngineError::Service(_)));

        let state = comp.snapshot();
        assert_eq!(state.stage, Stage::Idle);
        assert!(state.art.is_none(), "partial state must be discarded");
        assert!(state.error.as_deref().unwrap().contains("rate limited"));
    }

    #[tokio::test]
    async fn guess_failure_discards_the_art() {
        let mock = MockChat::new();
        mock.push_ok("some art");
        mock.push_err(ServiceError::NoContent);
        let comp = competition(mock);

        comp.start().await.unwrap_err();

        let state = comp.snapshot();
        assert_eq!(state.stage, Stage::Idle);
        assert!(state.art.is_none());
        assert!(state.guess.is_none());
        assert_eq!(state.error.as_deref(), Some("no content returned"));
    }

    /// MockChat that waits for a permit before answering, so tests can
    /// observe the workflow mid-phase.
    struct GatedChat {
        inner: MockChat,
        gate: Semaphore,
    }

    #[async_trait]
    impl ChatService for GatedChat {
        async fn complete(&self, req: &ChatRequest) -> Result<String, ServiceError> {
            let permit = self.gate.acquire().await.unwrap();
            permit.forget();
            self.inner.complete(req).await
        }
    }

    async fn wait_for_stage<S: ChatService>(comp: &Competition<S>, stage: Stage) {
        for _ in 0..200 {
            if comp.snapshot().stage == stage {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("never reached stage {stage}");
    }

    #[tokio::test]
    async fn stages_advance_in_order() {
        let gated = GatedChat {
            inner: MockChat::with_responses(vec!["art", "owl"]),
            gate: Semaphore::new(0),
        };
        let comp = Arc::new(Competition::new(gated, EngineConfig::default()));

        let runner = comp.clone();
        let handle = tokio::spawn(async move { runner.run_with_animal(Animal::Owl).await });

        wait_for_stage(&comp, Stage::Generating).await;
        comp.service.gate.add_permits(1);
        wait_for_stage(&comp, Stage::Guessing).await;
        comp.service.gate.add_permits(1);
        wait_for_stage(&comp, Stage::Complete).await;

        let summary = handle.await.unwrap().unwrap();
        assert!(summary.matched);
    }

    #[tokio::test]
    async fn overlapping_start_is_rejected() {
        let gated = GatedChat {
            inner: MockChat::with_responses(vec!["art", "owl"]),
            gate: Semaphore::new(0),
        };
        let comp = Arc::new(Competition::new(gated, EngineConfig::default()));

        let runner = comp.clone();
        let handle = tokio::spawn(async move { runner.run_with_animal(Animal::Owl).await });
        wait_for_stage(&comp, Stage::Generating).await;

        let err = comp.start().await.unwrap_err();
        assert!(matches!(err, EngineError::RunInProgress));

        // Let the first run finish normally.
        comp.service.gate.add_permits(2);
        handle.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn completed_run_can_be_rerun() {
        let mock = MockChat::with_responses(vec!["art", "cat", "art2", "owl"]);
        let comp = competition(mock);

        comp.run_with_animal(Animal::Cat).await.unwrap();
        assert_eq!(comp.snapshot().stage, Stage::Complete);

        let second = comp.run_with_animal(Animal::Owl).await.unwrap();
        assert_eq!(second.guess, "owl");
        assert_eq!(comp.snapshot().animal, Some(Animal::Owl));
    }

    #[test]
    fn round2_rounds_to_two_decimals() {
        assert_eq!(round2(1.23456), 1.23);
        assert_eq!(round2(0.999), 1.0);
        assert_eq!(round2(0.0), 0.0);
    }
}
