//! Two-player play through a message relay.
//!
//! The relay pairs connections, tells each side its colour, and forwards
//! every message verbatim to the opponent. Messages are JSON objects tagged
//! by a `type` field. Transport is left to the caller: outgoing messages are
//! queued in an outbox and incoming text is fed to [`RemoteSession::receive_text`].

use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, info, warn};

use crate::errors::RelayError;
use crate::game_state::chess_types::{Color, PieceKind, Square};
use crate::game_state::game_state::{Activation, GameState};
use crate::session::chess_session::ChessSession;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RelayMessage {
    MatchFound {
        room_id: String,
        color: Color,
    },
    WaitingForOpponent,
    Move {
        from: Square,
        to: Square,
    },
    Promotion {
        #[serde(deserialize_with = "lenient_promotion")]
        kind: PieceKind,
    },
    OpponentLeft,
}

/// Unknown promotion names fall back to a queen instead of failing the message.
fn lenient_promotion<'de, D: Deserializer<'de>>(deserializer: D) -> Result<PieceKind, D::Error> {
    let name = String::deserialize(deserializer)?;
    Ok(PieceKind::from_promotion_name(&name))
}

impl RelayMessage {
    pub fn encode(&self) -> Result<String, RelayError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn decode(text: &str) -> Result<Self, RelayError> {
        Ok(serde_json::from_str(text)?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    Connecting,
    WaitingForOpponent,
    Playing,
    OpponentLeft,
}

#[derive(Debug, Clone)]
pub struct RemoteSession {
    game: GameState,
    local_color: Option<Color>,
    room_id: Option<String>,
    status: ConnectionStatus,
    outbox: Vec<RelayMessage>,
}

impl Default for RemoteSession {
    fn default() -> Self {
        Self::new()
    }
}

impl RemoteSession {
    pub fn new() -> Self {
        Self {
            game: GameState::new_game(),
            local_color: None,
            room_id: None,
            status: ConnectionStatus::Connecting,
            outbox: Vec::new(),
        }
    }

    #[inline]
    pub fn status(&self) -> ConnectionStatus {
        self.status
    }

    #[inline]
    pub fn room_id(&self) -> Option<&str> {
        self.room_id.as_deref()
    }

    /// Messages produced by local moves since the last drain.
    pub fn drain_outbox(&mut self) -> Vec<RelayMessage> {
        std::mem::take(&mut self.outbox)
    }

    pub fn receive_text(&mut self, text: &str) -> Result<(), RelayError> {
        let message = RelayMessage::decode(text)?;
        self.receive(message);
        Ok(())
    }

    pub fn receive(&mut self, message: RelayMessage) {
        debug!(?message, "relay message received");
        match message {
            RelayMessage::MatchFound { room_id, color } => {
                info!(%room_id, ?color, "match found");
                self.game = GameState::with_config(*self.game.config());
                self.local_color = Some(color);
                self.room_id = Some(room_id);
                self.status = ConnectionStatus::Playing;
            }
            RelayMessage::WaitingForOpponent => {
                self.status = ConnectionStatus::WaitingForOpponent;
            }
            RelayMessage::Move { from, to } => {
                if self.status != ConnectionStatus::Playing || self.is_local_turn() {
                    warn!(?from, ?to, "move from peer out of turn");
                    return;
                }
                let activation = self.game.play_move(from, to);
                if !activation.board_changed() {
                    warn!(?from, ?to, ?activation, "move from peer rejected");
                }
            }
            RelayMessage::Promotion { kind } => {
                let peer_pending = self
                    .game
                    .pending_promotion()
                    .is_some_and(|pending| Some(pending.color) != self.local_color);
                if !peer_pending || !self.game.resolve_promotion(kind) {
                    warn!(?kind, "promotion from peer without a pending pawn");
                }
            }
            RelayMessage::OpponentLeft => {
                info!("opponent left the match");
                self.status = ConnectionStatus::OpponentLeft;
            }
        }
    }
}

impl ChessSession for RemoteSession {
    fn game(&self) -> &GameState {
        &self.game
    }

    fn local_color(&self) -> Option<Color> {
        self.local_color
    }

    fn handle_square(&mut self, square: Square) -> Activation {
        if self.status != ConnectionStatus::Playing || !self.is_local_turn() {
            return Activation::Ignored;
        }

        let from = self.game.selected_square();
        let activation = self.game.activate(square);
        if let (true, Some(from)) = (activation.board_changed(), from) {
            self.outbox.push(RelayMessage::Move { from, to: square });
        }
        activation
    }

    fn resolve_promotion(&mut self, kind: PieceKind) -> bool {
        let local_pending = self
            .game
            .pending_promotion()
            .is_some_and(|pending| Some(pending.color) == self.local_color);
        if !local_pending || !self.game.resolve_promotion(kind) {
            return false;
        }
        self.outbox.push(RelayMessage::Promotion {
            kind: kind.promotion_choice(),
        });
        true
    }
}
