//! Run Debate use case
//!
//! Drives one debate instance through the round-bounded protocol:
//!
//! 1. **Baseline** (translation mode, optional): ask for a first translation
//! 2. **Opening**: Affirmative → Negative → Moderator
//! 3. **Rebuttal(n)**: each side rebuts the other's latest statement, the
//!    Moderator re-judges; repeated until resolved or `max_round` is spent
//! 4. **Judge tie-break**: candidates from each side's first statement,
//!    then a single selection
//!
//! Turns are strictly sequential because every prompt embeds the previous
//! reply. Independent instances may run concurrently; see
//! [`RunBatchUseCase`](super::run_batch::RunBatchUseCase).

mod player;
mod types;

pub use player::DebatePlayer;
pub use types::{RunDebateError, RunDebateInput};

use crate::config::DebateSettings;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::llm_gateway::LlmGateway;
use crate::ports::progress::{DebateProgressNotifier, NoProgress};
use chrono::Local;
use debate_domain::core::string::{preview, truncate};
use debate_domain::{
    AgentRole, BaselineSource, DebatePhase, DebatePrompts, DebateRecord, DebateState,
    DecisionObject, JudgePersona, Outcome, PromptTemplate, RecordMeta, TemplateVars,
    normalize_decision,
};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Record timestamp format
const TIME_FORMAT: &str = "%Y-%m-%d_%H:%M:%S";

const JUDGE_CONTEXT: &str = "judge final decision";

/// Use case for running one debate instance
pub struct RunDebateUseCase<G: LlmGateway + 'static> {
    gateway: Arc<G>,
    prompts: Arc<DebatePrompts>,
    settings: DebateSettings,
    logger: Arc<dyn ConversationLogger>,
}

impl<G: LlmGateway + 'static> RunDebateUseCase<G> {
    /// Validates the configuration; nothing here talks to the model.
    pub fn new(
        gateway: Arc<G>,
        prompts: Arc<DebatePrompts>,
        settings: DebateSettings,
    ) -> Result<Self, RunDebateError> {
        settings.validate()?;
        if settings.judge_persona == JudgePersona::Dedicated {
            prompts.require_judge_meta_prompt()?;
        }
        Ok(Self {
            gateway,
            prompts,
            settings,
            logger: Arc::new(NoConversationLogger),
        })
    }

    pub fn with_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn settings(&self) -> &DebateSettings {
        &self.settings
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, input: RunDebateInput) -> Result<DebateRecord, RunDebateError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: RunDebateInput,
        progress: &dyn DebateProgressNotifier,
    ) -> Result<DebateRecord, RunDebateError> {
        let RunDebateInput { instance_id, seed } = input;
        let id = instance_id.as_str();
        let start_time = Local::now();

        let baseline = seed.baseline();
        if baseline == BaselineSource::Generate {
            self.prompts.require_base_prompt()?;
        }
        let mut state = DebateState::new(self.settings.max_round)?;

        info!(
            instance = %id,
            mode = seed.mode().as_str(),
            "Starting debate: {}",
            truncate(seed.summary(), 80)
        );
        self.log(
            id,
            ConversationEvent::DEBATE_STARTED,
            json!({
                "mode": seed.mode().as_str(),
                "summary": seed.summary(),
                "model": self.settings.model.as_str(),
                "max_round": self.settings.max_round,
            }),
        );
        progress.on_debate_start(seed.summary(), state.max_round());

        // Baseline: the answer the debate critiques
        let mut vars = seed.vars();
        let mut baseline_player = None;
        let mut base_answer = match baseline {
            BaselineSource::Provided(text) => Some(text),
            BaselineSource::Generate => {
                let mut player = DebatePlayer::new(AgentRole::Baseline);
                let prompt = PromptTemplate::render(self.prompts.require_base_prompt()?, &vars);
                let reply = self.take_turn(&mut player, prompt, 0, id, progress).await?;
                vars.set(seed.base_answer_key(), reply.clone());
                baseline_player = Some(player);
                Some(reply)
            }
            BaselineSource::AffirmativeOpening => None,
        };

        let prompts = self.prompts.as_ref();
        let player_persona = fill(&prompts.player_meta_prompt, &vars, &[]);
        let moderator_persona = fill(&prompts.moderator_meta_prompt, &vars, &[]);

        let mut affirmative = DebatePlayer::with_persona(AgentRole::Affirmative, &player_persona)?;
        let mut negative = DebatePlayer::with_persona(AgentRole::Negative, &player_persona)?;
        let mut moderator = DebatePlayer::with_persona(AgentRole::Moderator, &moderator_persona)?;

        let mut phase = DebatePhase::Opening;
        while matches!(phase, DebatePhase::Opening | DebatePhase::Rebuttal(_)) {
            let round = state.round_index();
            let label = state.round_label();
            progress.on_round_start(round, &label);
            debug!(instance = %id, round, "Round {} ({:?})", label, phase);

            let affirmative_prompt = match phase {
                DebatePhase::Opening => fill(&prompts.affirmative_prompt, &vars, &[]),
                _ => fill(&prompts.debate_prompt, &vars, &[("oppo_ans", state.negative_last())]),
            };
            let reply = self
                .take_turn(&mut affirmative, affirmative_prompt, round, id, progress)
                .await?;
            if phase == DebatePhase::Opening {
                base_answer.get_or_insert_with(|| reply.clone());
            }
            state.record_affirmative(reply);

            // Negative always answers the freshest Affirmative statement
            let negative_prompt = match phase {
                DebatePhase::Opening => fill(
                    &prompts.negative_prompt,
                    &vars,
                    &[("aff_ans", state.affirmative_last())],
                ),
                _ => fill(
                    &prompts.debate_prompt,
                    &vars,
                    &[("oppo_ans", state.affirmative_last())],
                ),
            };
            let reply = self
                .take_turn(&mut negative, negative_prompt, round, id, progress)
                .await?;
            state.record_negative(reply);

            let moderator_prompt = fill(
                &prompts.moderator_prompt,
                &vars,
                &[
                    ("aff_ans", state.affirmative_last()),
                    ("neg_ans", state.negative_last()),
                    ("round", label.as_str()),
                ],
            );
            let reply = self
                .take_turn(&mut moderator, moderator_prompt, round, id, progress)
                .await?;
            let decision = normalize_decision(&reply, &format!("moderator ({} round)", label));
            let resolved = decision.is_decided();

            self.log(
                id,
                ConversationEvent::MODERATOR_DECISION,
                json!({ "round": round, "resolved": resolved, "decision": decision_json(&decision) }),
            );
            progress.on_moderator_decision(round, resolved);
            phase = state.record_moderator(decision);
        }

        let mut judge_player = None;
        if phase == DebatePhase::JudgeTieBreak {
            info!(instance = %id, "No decision after {} rounds, invoking the Judge", state.max_round());
            progress.on_judge_invoked();

            let persona = match self.settings.judge_persona {
                JudgePersona::Moderator => moderator_persona.clone(),
                JudgePersona::Dedicated => fill(prompts.require_judge_meta_prompt()?, &vars, &[]),
            };
            let mut judge = DebatePlayer::with_persona(AgentRole::Judge, &persona)?;
            let round = state.round_index();

            // Each side's first substantive statement, not its latest
            let candidates_prompt = fill(
                &prompts.judge_prompt_last1,
                &vars,
                &[
                    ("aff_ans", affirmative.conversation().first_reply().unwrap_or_default()),
                    ("neg_ans", negative.conversation().first_reply().unwrap_or_default()),
                ],
            );
            self.take_turn(&mut judge, candidates_prompt, round, id, progress)
                .await?;
            let reply = self
                .take_turn(
                    &mut judge,
                    fill(&prompts.judge_prompt_last2, &vars, &[]),
                    round,
                    id,
                    progress,
                )
                .await?;

            let decision = normalize_decision(&reply, JUDGE_CONTEXT);
            self.log(
                id,
                ConversationEvent::JUDGE_DECISION,
                json!({ "resolved": decision.is_decided(), "decision": decision_json(&decision) }),
            );
            state.record_judge(decision);
            judge_player = Some(judge);
        }

        let outcome = state.outcome().unwrap_or(Outcome::Unresolved);
        let decision = state.final_decision().cloned().unwrap_or_default();
        if outcome == Outcome::Unresolved {
            warn!(instance = %id, "Debate ended without an answer: {}", decision.rationale);
        }

        let players = baseline_player
            .into_iter()
            .chain([affirmative, negative, moderator])
            .chain(judge_player)
            .map(|player| (player.role(), player.into_conversation()))
            .collect();

        let record = DebateRecord::assemble(
            RecordMeta {
                start_time: start_time.format(TIME_FORMAT).to_string(),
                end_time: Local::now().format(TIME_FORMAT).to_string(),
                model_name: self.settings.model.to_string(),
                temperature: self.settings.temperature,
                max_round: self.settings.max_round,
            },
            seed.as_ref(),
            base_answer.as_deref().unwrap_or_default(),
            &decision,
            outcome,
            state.rounds_played(),
            players,
        );

        info!(
            instance = %id,
            outcome = %outcome,
            rounds = record.rounds_played,
            "Debate finished"
        );
        self.log(
            id,
            ConversationEvent::DEBATE_FINISHED,
            json!({
                "outcome": outcome.as_str(),
                "success": record.success,
                "rounds_played": record.rounds_played,
                "final_answer": decision.final_answer,
            }),
        );
        progress.on_debate_complete(outcome);

        Ok(record)
    }

    /// Append `prompt`, ask, and commit the reply
    async fn take_turn(
        &self,
        player: &mut DebatePlayer,
        prompt: String,
        round: usize,
        instance_id: &str,
        progress: &dyn DebateProgressNotifier,
    ) -> Result<String, RunDebateError> {
        let role = player.role();
        player.add_event(prompt.clone())?;

        let reply = match player.next_reply(self.gateway.as_ref(), &self.settings).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(instance = %instance_id, role = %role, round, "Model call failed: {}", e);
                return Err(e.into());
            }
        };
        player.record_reply(reply.clone())?;

        debug!(instance = %instance_id, role = %role, round, "{}", preview(&reply, 120));
        self.log(
            instance_id,
            ConversationEvent::AGENT_TURN,
            json!({
                "role": role.as_str(),
                "round": round,
                "prompt": prompt,
                "reply": reply,
            }),
        );
        progress.on_turn_complete(role, round);
        Ok(reply)
    }

    fn log(&self, instance_id: &str, event_type: &'static str, payload: Value) {
        self.logger
            .log(ConversationEvent::new(event_type, payload).for_instance(instance_id));
    }
}

/// Render `template` once with the seed values plus this turn's values
fn fill(template: &str, seed: &TemplateVars, turn: &[(&str, &str)]) -> String {
    let mut vars = seed.clone();
    for (name, value) in turn {
        vars.set(*name, *value);
    }
    PromptTemplate::render(template, &vars)
}

fn decision_json(decision: &DecisionObject) -> Value {
    serde_json::to_value(decision).unwrap_or(Value::Null)
}
