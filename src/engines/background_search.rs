//! Runs an opponent engine off the interface thread.
//!
//! The engine is moved into a worker thread together with a snapshot of the
//! game and comes back over an `mpsc` channel with its answer, so it can be
//! reused for the next search. The caller polls with [`BackgroundSearch::try_take`]
//! once per frame, or blocks with [`BackgroundSearch::wait`].

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use tracing::{debug, warn};

use crate::engines::engine_trait::{Engine, EngineOutput, GoParams};
use crate::errors::EngineError;
use crate::game_state::game_state::GameState;

type SearchReply = (Box<dyn Engine>, Result<EngineOutput, EngineError>);

pub struct BackgroundSearch {
    engine: Option<Box<dyn Engine>>,
    params: GoParams,
    pending: Option<Receiver<SearchReply>>,
}

impl BackgroundSearch {
    pub fn new(engine: Box<dyn Engine>, params: GoParams) -> Self {
        Self {
            engine: Some(engine),
            params,
            pending: None,
        }
    }

    #[inline]
    pub fn is_searching(&self) -> bool {
        self.pending.is_some()
    }

    #[inline]
    pub fn params(&self) -> &GoParams {
        &self.params
    }

    /// Start searching a snapshot of `game_state`. Returns false when a
    /// search is already running or the engine was lost to a crashed worker.
    pub fn start(&mut self, game_state: &GameState) -> bool {
        if self.pending.is_some() {
            return false;
        }
        let Some(mut engine) = self.engine.take() else {
            warn!("no engine available for background search");
            return false;
        };

        let snapshot = game_state.clone();
        let params = self.params.clone();
        let (sender, receiver) = mpsc::channel();
        debug!(engine = engine.name(), side = ?snapshot.current_turn(), "background search started");

        thread::spawn(move || {
            let result = engine.choose_move(&snapshot, &params);
            // The receiver may be gone if the session was dropped mid-search.
            let _ = sender.send((engine, result));
        });

        self.pending = Some(receiver);
        true
    }

    /// Non-blocking poll. `None` while the search is still running or when
    /// nothing was started.
    pub fn try_take(&mut self) -> Option<Result<EngineOutput, EngineError>> {
        let receiver = self.pending.as_ref()?;
        match receiver.try_recv() {
            Ok(reply) => Some(self.finish(reply)),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.pending = None;
                warn!("background search thread terminated without a result");
                Some(Err(EngineError::SearchAborted))
            }
        }
    }

    /// Block until the running search answers.
    pub fn wait(&mut self) -> Result<EngineOutput, EngineError> {
        let receiver = self.pending.as_ref().ok_or(EngineError::SearchAborted)?;
        match receiver.recv() {
            Ok(reply) => self.finish(reply),
            Err(_) => {
                self.pending = None;
                Err(EngineError::SearchAborted)
            }
        }
    }

    fn finish(&mut self, (engine, result): SearchReply) -> Result<EngineOutput, EngineError> {
        self.pending = None;
        debug!(engine = engine.name(), ok = result.is_ok(), "background search finished");
        self.engine = Some(engine);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::BackgroundSearch;
    use crate::engines::engine_random::RandomEngine;
    use crate::engines::engine_trait::{Engine, EngineOutput, GoParams};
    use crate::errors::EngineError;
    use crate::game_state::game_state::GameState;

    struct PanickingEngine;

    impl Engine for PanickingEngine {
        fn name(&self) -> &str {
            "panics"
        }

        fn choose_move(
            &mut self,
            _game_state: &GameState,
            _params: &GoParams,
        ) -> Result<EngineOutput, EngineError> {
            panic!("search blew up");
        }
    }

    #[test]
    fn result_comes_back_and_engine_is_reusable() {
        let game = GameState::new_game();
        let mut search = BackgroundSearch::new(Box::new(RandomEngine::new()), GoParams::default());

        assert!(search.start(&game));
        assert!(search.is_searching());
        assert!(!search.start(&game), "only one search at a time");

        let out = search.wait().expect("random search should succeed");
        assert!(out.best_move.is_some());
        assert!(!search.is_searching());

        assert!(search.start(&game), "engine returned for reuse");
        let out = search.wait().expect("second search should succeed");
        assert!(out.best_move.is_some());
    }

    #[test]
    fn polling_without_a_search_yields_nothing() {
        let mut search = BackgroundSearch::new(Box::new(RandomEngine::new()), GoParams::default());
        assert!(search.try_take().is_none());
    }

    #[test]
    fn crashed_worker_reports_aborted_search() {
        let game = GameState::new_game();
        let mut search = BackgroundSearch::new(Box::new(PanickingEngine), GoParams::default());
        assert!(search.start(&game));
        assert!(matches!(search.wait(), Err(EngineError::SearchAborted)));
        assert!(!search.start(&game), "engine was lost with the worker");
    }
}
