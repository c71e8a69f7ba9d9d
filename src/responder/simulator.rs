use crate::config::AssistantConfig;
use crate::latency::Latency;
use crate::models::{Conversation, Message};
use crate::responder::KnowledgeBase;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info};

pub const GREETING: &str =
    "¡Hola! Soy el asistente de HostMate. ¿En qué puedo ayudarte con tu estadía?";

/// Canned questions a host can fire at the bot with one click
pub const COMMON_QUESTIONS: [&str; 8] = [
    "¿Cuál es el horario de check-in?",
    "¿Cuál es el horario de check-out?",
    "¿Cuál es la información del WiFi?",
    "¿Hay estacionamiento disponible?",
    "¿Cuáles son las reglas de la casa?",
    "¿Qué amenidades incluye el apartamento?",
    "¿Dónde está ubicado el apartamento?",
    "¿Tienes recomendaciones de lugares cercanos?",
];

/// Simulated guest/bot chat backed by a shared conversation log.
///
/// Cloning is cheap and clones share the same log, so several sends can be
/// in flight at once. Messages land in the log when their operation
/// completes, not when it starts.
#[derive(Clone)]
pub struct ChatSimulator {
    knowledge: Arc<KnowledgeBase>,
    conversation: Arc<Mutex<Conversation>>,
    enabled: bool,
    reply_latency: Latency,
    quick_latency: Latency,
}

impl ChatSimulator {
    pub fn new(config: &AssistantConfig) -> Self {
        Self::with_knowledge(config, KnowledgeBase::default())
    }

    pub fn with_knowledge(config: &AssistantConfig, knowledge: KnowledgeBase) -> Self {
        debug!(
            "Chatbot ready (language: {}, personality: {}, enabled: {})",
            config.chatbot.language, config.chatbot.personality, config.chatbot.enabled
        );

        let mut conversation = Conversation::new();
        conversation.push(Message::assistant(GREETING));

        Self {
            knowledge: Arc::new(knowledge),
            conversation: Arc::new(Mutex::new(conversation)),
            enabled: config.chatbot.enabled,
            reply_latency: config.reply_latency(),
            quick_latency: config.quick_question_latency(),
        }
    }

    /// Override both delays, e.g. `Latency::None` in tests
    pub fn with_latency(mut self, reply: Latency, quick_question: Latency) -> Self {
        self.reply_latency = reply;
        self.quick_latency = quick_question;
        self
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    /// Post a guest message and wait for the bot's reply.
    ///
    /// Blank input is ignored. Returns the reply text, or `None` when
    /// nothing was answered.
    pub async fn send(&self, text: &str) -> Option<String> {
        if text.trim().is_empty() {
            debug!("Ignoring blank message");
            return None;
        }

        self.append(Message::guest(text));
        self.reply(text).await
    }

    /// Post one of `COMMON_QUESTIONS` after a short typing delay.
    pub async fn ask_quick_question(&self, index: usize) -> Option<String> {
        let question = *COMMON_QUESTIONS.get(index)?;

        self.quick_latency.wait().await;
        self.append(Message::guest(question));
        self.reply(question).await
    }

    /// Snapshot of the log in append order
    pub fn transcript(&self) -> Vec<Message> {
        self.log().messages().to_vec()
    }

    async fn reply(&self, text: &str) -> Option<String> {
        if !self.enabled {
            info!("Chatbot disabled, no reply sent");
            return None;
        }

        self.reply_latency.wait().await;

        let response = self.knowledge.respond(text).to_string();
        debug!("Replying to {:?} with {:?}", text, response);
        self.append(Message::assistant(response.clone()));
        Some(response)
    }

    fn append(&self, message: Message) {
        self.log().push(message);
    }

    fn log(&self) -> MutexGuard<'_, Conversation> {
        // Pushes are atomic, so a poisoned log is still consistent
        self.conversation
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
