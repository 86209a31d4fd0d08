use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::{Duration, Instant};

use tracing::{debug, instrument, warn};
use uuid::Uuid;

use crate::arena::{
    action::{ActionKind, AgentAction},
    game_state::{ActionRequest, HandState},
    snapshot::HandSnapshot,
};

use super::Agent;

/// Everything sent out when a channel seat has to decide.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionPrompt {
    pub hand_id: Uuid,
    /// Counts up with every prompt the agent sends. Replies carry it back.
    pub seq: u64,
    /// The hand as the deciding seat sees it, opponent cards hidden.
    pub snapshot: HandSnapshot,
    pub request: ActionRequest,
}

impl ActionPrompt {
    /// Answer this prompt.
    pub fn reply(&self, action: AgentAction) -> ActionReply {
        ActionReply {
            seq: self.seq,
            action,
        }
    }
}

/// A decision sent back for the prompt with the same `seq`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionReply {
    pub seq: u64,
    pub action: AgentAction,
}

/// The far end of a [`ChannelAgent`]: prompts come in, decisions go out.
#[derive(Debug)]
pub struct ChannelSeat {
    pub prompts: Receiver<ActionPrompt>,
    pub replies: Sender<ActionReply>,
}

/// An agent that forwards every decision over a channel, usually to a person
/// or a network connection, and waits for the reply.
///
/// Invalid replies are answered with a new prompt. If the other end goes
/// away the seat folds, or checks when folding isn't allowed. With a reply
/// timeout set a slow reply is treated as a check, or a fold when checking
/// isn't allowed. Replies to older prompts, such as one that showed up
/// after its timeout, are dropped.
///
/// ```
/// use std::thread;
///
/// use rs_plo::arena::action::AgentAction;
/// use rs_plo::arena::agent::{CallingAgent, ChannelAgent};
/// use rs_plo::arena::{HandSimulationBuilder, Seats, TableConfig};
///
/// let (agent, seat) = ChannelAgent::pair("remote");
/// let handle = thread::spawn(move || {
///     for prompt in seat.prompts.iter() {
///         if seat.replies.send(prompt.reply(AgentAction::Fold)).is_err() {
///             break;
///         }
///     }
/// });
///
/// let mut sim = HandSimulationBuilder::default()
///     .table_config(TableConfig::default())
///     .agents(Seats::new(
///         Box::new(CallingAgent::default()),
///         Box::new(agent),
///     ))
///     .build()
///     .unwrap();
/// sim.run().unwrap();
/// drop(sim);
/// handle.join().unwrap();
/// ```
#[derive(Debug)]
pub struct ChannelAgent {
    name: String,
    prompts: Sender<ActionPrompt>,
    replies: Receiver<ActionReply>,
    timeout: Option<Duration>,
    next_seq: u64,
}

impl ChannelAgent {
    pub fn new(
        name: impl Into<String>,
        prompts: Sender<ActionPrompt>,
        replies: Receiver<ActionReply>,
    ) -> Self {
        Self {
            name: name.into(),
            prompts,
            replies,
            timeout: None,
            next_seq: 0,
        }
    }

    /// Create the agent along with the other end of its channels.
    pub fn pair(name: impl Into<String>) -> (Self, ChannelSeat) {
        let (prompt_tx, prompt_rx) = mpsc::channel();
        let (reply_tx, reply_rx) = mpsc::channel();
        (
            Self::new(name, prompt_tx, reply_rx),
            ChannelSeat {
                prompts: prompt_rx,
                replies: reply_tx,
            },
        )
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn disconnected_action(request: &ActionRequest) -> AgentAction {
        if request.legal.contains(ActionKind::Fold) {
            AgentAction::Fold
        } else {
            AgentAction::Check
        }
    }

    fn timed_out_action(request: &ActionRequest) -> AgentAction {
        if request.legal.contains(ActionKind::Check) {
            AgentAction::Check
        } else {
            AgentAction::Fold
        }
    }

    /// Wait for the reply to prompt `seq`, skipping anything older.
    fn wait_for_reply(&self, seq: u64) -> Result<AgentAction, RecvTimeoutError> {
        let deadline = self.timeout.map(|timeout| Instant::now() + timeout);
        loop {
            let reply = match deadline {
                Some(deadline) => self
                    .replies
                    .recv_timeout(deadline.saturating_duration_since(Instant::now()))?,
                None => self
                    .replies
                    .recv()
                    .map_err(|_| RecvTimeoutError::Disconnected)?,
            };
            if reply.seq == seq {
                return Ok(reply.action);
            }
            debug!(stale = reply.seq, seq, action = ?reply.action, "Dropping stale reply");
        }
    }
}

impl Agent for ChannelAgent {
    #[instrument(level = "trace", skip(self, game_state, request), fields(agent_name = %self.name))]
    fn act(&mut self, id: Uuid, game_state: &HandState, request: &ActionRequest) -> AgentAction {
        let seq = self.next_seq;
        self.next_seq += 1;
        let prompt = ActionPrompt {
            hand_id: id,
            seq,
            snapshot: HandSnapshot::from(game_state).public_for(request.position),
            request: *request,
        };
        if self.prompts.send(prompt).is_err() {
            warn!("Prompt channel closed");
            return Self::disconnected_action(request);
        }

        match self.wait_for_reply(seq) {
            Ok(action) => action,
            Err(RecvTimeoutError::Timeout) => {
                debug!(timeout = ?self.timeout, seq, "No reply in time");
                Self::timed_out_action(request)
            }
            Err(RecvTimeoutError::Disconnected) => {
                warn!("Reply channel closed");
                Self::disconnected_action(request)
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn reprompt_on_invalid(&self) -> bool {
        true
    }
}
