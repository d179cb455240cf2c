// src/responder/simulated.rs — Canned responses behind an artificial delay
//
// Models an unreliable remote dependency: a uniform delay in
// [min_delay_ms, max_delay_ms), a fixed probability of unavailability, and a
// uniformly chosen template that embeds the user's text verbatim.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::Responder;
use crate::infra::config::ResponderConfig;
use crate::infra::errors::ChatError;

const TEMPLATES: [&str; 8] = [
    "I understand you're asking about \"{}\". Here's what I can help you with...",
    "Based on your message \"{}\", I'd recommend considering these options...",
    "That's an interesting question about \"{}\". Let me analyze that for you...",
    "I can help you with \"{}\". Here are some insights regarding your query...",
    "Thank you for sharing \"{}\". I've processed your request and here's my response...",
    "Great question! Let me break \"{}\" down for you step by step...",
    "I see what you're looking for in \"{}\". Here are some comprehensive insights...",
    "Based on my analysis of \"{}\", here are the key points to consider...",
];

pub struct SimulatedResponder {
    config: ResponderConfig,
    rng: Mutex<StdRng>,
}

impl SimulatedResponder {
    pub fn new(config: ResponderConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            config,
            rng: Mutex::new(rng),
        }
    }

    /// Sample delay, outcome, and template choice in one short critical
    /// section, before suspending.
    fn draw(&self) -> (Duration, bool, usize) {
        let mut rng = match self.rng.lock() {
            Ok(rng) => rng,
            // A poisoned RNG lock only happens after a panic elsewhere;
            // fall back to fixed values rather than propagate it.
            Err(_) => return (Duration::from_millis(self.config.min_delay_ms), false, 0),
        };
        let delay_ms = if self.config.max_delay_ms > self.config.min_delay_ms {
            rng.gen_range(self.config.min_delay_ms..self.config.max_delay_ms)
        } else {
            self.config.min_delay_ms
        };
        let fail = rng.gen_bool(self.config.failure_rate.clamp(0.0, 1.0));
        let template = rng.gen_range(0..TEMPLATES.len());
        (Duration::from_millis(delay_ms), fail, template)
    }
}

impl Default for SimulatedResponder {
    fn default() -> Self {
        Self::new(ResponderConfig::default())
    }
}

#[async_trait]
impl Responder for SimulatedResponder {
    async fn respond(&self, user_text: &str) -> Result<String, ChatError> {
        let (delay, fail, template) = self.draw();

        tracing::debug!(delay_ms = delay.as_millis() as u64, fail, "simulating response");
        tokio::time::sleep(delay).await;

        if fail {
            return Err(ChatError::ServiceUnavailable);
        }

        Ok(TEMPLATES[template].replacen("{}", user_text, 1))
    }
}
