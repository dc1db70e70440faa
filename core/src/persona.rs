//! Persona Registry
//!
//! Personas are the characters a user can chat with. Each one carries its
//! identity (name, avatar, personality), the greeting that opens every
//! session, and a pool of canned replies.
//!
//! The registry is a read-only lookup table handed to the conductor at
//! construction time. It is never a global, so tests can run against
//! fixture personas.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Persona identifier (the key used in `/chat/{id}` addresses)
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PersonaId(pub String);

impl PersonaId {
    /// Create an identifier from any string-like value
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PersonaId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for PersonaId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Avatar reference
///
/// The asset path points at an image supplied by whatever loads assets for
/// the surface. Text surfaces draw the initials instead.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Avatar {
    /// Path of the avatar image asset
    pub asset: String,
    /// One or two characters drawn when the image cannot be shown
    pub initials: String,
}

impl Avatar {
    /// Create an avatar reference
    pub fn new(asset: impl Into<String>, initials: impl Into<String>) -> Self {
        Self {
            asset: asset.into(),
            initials: initials.into(),
        }
    }
}

/// A predefined conversational character
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Persona {
    /// Lookup key
    pub id: PersonaId,
    /// Display name
    pub name: String,
    /// Avatar reference
    pub avatar: Avatar,
    /// Short personality label (e.g. "Creative & Empathetic")
    pub personality: String,
    /// Longer description shown on the selection card
    pub description: String,
    /// Opening message of every session
    pub greeting: String,
    /// Candidate replies, in declaration order
    pub replies: Vec<String>,
}

impl Persona {
    /// Start building a persona with the given id and display name.
    ///
    /// The avatar defaults to the first letter of the name.
    pub fn new(id: impl Into<PersonaId>, name: impl Into<String>) -> Self {
        let id = id.into();
        let name = name.into();
        let initials: String = name.chars().take(1).collect();
        Self {
            avatar: Avatar::new(format!("assets/{id}-avatar.png"), initials),
            id,
            name,
            personality: String::new(),
            description: String::new(),
            greeting: String::new(),
            replies: Vec::new(),
        }
    }

    /// Set the personality label
    #[must_use]
    pub fn with_personality(mut self, personality: impl Into<String>) -> Self {
        self.personality = personality.into();
        self
    }

    /// Set the card description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the greeting
    #[must_use]
    pub fn with_greeting(mut self, greeting: impl Into<String>) -> Self {
        self.greeting = greeting.into();
        self
    }

    /// Set the avatar reference
    #[must_use]
    pub fn with_avatar(mut self, avatar: Avatar) -> Self {
        self.avatar = avatar;
        self
    }

    /// Set the reply pool
    #[must_use]
    pub fn with_replies<I, S>(mut self, replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.replies = replies.into_iter().map(Into::into).collect();
        self
    }

    /// Placeholder shown in an empty composer while chatting with this persona
    #[must_use]
    pub fn composer_placeholder(&self) -> String {
        format!("Message {}...", self.name)
    }
}

/// Id of the persona whose replies back up an empty pool
pub const BUILTIN_FALLBACK: &str = "alex";

/// Luna and Alex, as shipped
#[must_use]
pub fn builtin_personas() -> Vec<Persona> {
    let luna = Persona::new("luna", "Luna")
        .with_avatar(Avatar::new("assets/luna-avatar.png", "L"))
        .with_personality("Creative & Empathetic")
        .with_description(
            "A warm and intuitive AI who loves exploring creative ideas, understanding \
             emotions, and helping with artistic projects. Luna excels at brainstorming, \
             creative writing, and providing thoughtful emotional support.",
        )
        .with_greeting(
            "Hi there! I'm Luna, your creative companion. I love exploring ideas, \
             discussing art, and helping with creative projects. What would you like to \
             chat about today?",
        )
        .with_replies([
            "That's a fascinating perspective! Let me think about this creatively...",
            "I love how you're approaching this! Here's what I'm thinking...",
            "What an interesting question! From a creative standpoint...",
            "That resonates with me deeply. Let me share some thoughts...",
        ]);

    let alex = Persona::new("alex", "Alex")
        .with_avatar(Avatar::new("assets/alex-avatar.png", "A"))
        .with_personality("Analytical & Practical")
        .with_description(
            "A logical and efficient AI focused on problem-solving, technical discussions, \
             and productivity. Alex is perfect for coding help, business strategy, data \
             analysis, and systematic thinking.",
        )
        .with_greeting(
            "Hello! I'm Alex, your analytical assistant. I'm here to help with \
             problem-solving, technical questions, and strategic thinking. How can I \
             assist you today?",
        )
        .with_replies([
            "Let me analyze this systematically for you...",
            "Based on logical reasoning, here's my assessment...",
            "That's a good question. Let me break this down step by step...",
            "From a practical standpoint, I would suggest...",
        ]);

    vec![luna, alex]
}

/// Errors raised while building or querying a registry
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// No persona with this id
    #[error("Unknown persona: {0}")]
    UnknownPersona(PersonaId),

    /// Two personas share an id
    #[error("Duplicate persona id: {0}")]
    DuplicateId(PersonaId),

    /// A persona was declared with an empty id
    #[error("Persona id must not be empty")]
    EmptyId,

    /// A persona has no greeting, so its session could not be seeded
    #[error("Persona {0} has an empty greeting")]
    EmptyGreeting(PersonaId),

    /// A canned reply is blank, so it would append an empty message
    #[error("Persona {0} has an empty reply")]
    EmptyReply(PersonaId),

    /// The named fallback persona is not in the registry
    #[error("Fallback persona {0} is not registered")]
    MissingFallback(PersonaId),

    /// A persona has no replies of its own and no fallback pool to borrow
    #[error("Persona {0} has no replies and no fallback pool is available")]
    NoReplies(PersonaId),
}

/// Read-only persona lookup table
#[derive(Clone, Debug)]
pub struct PersonaRegistry {
    /// Personas in declaration order
    order: Vec<PersonaId>,
    /// Personas by id
    personas: HashMap<PersonaId, Arc<Persona>>,
    /// Persona whose replies stand in for an empty pool
    fallback: Option<PersonaId>,
}

impl PersonaRegistry {
    /// Build a validated registry.
    ///
    /// Every persona must end up with a usable reply pool: either its own,
    /// or the fallback persona's.
    ///
    /// # Errors
    ///
    /// Returns a [`RegistryError`] describing the first invalid persona.
    pub fn new(
        personas: impl IntoIterator<Item = Persona>,
        fallback: Option<PersonaId>,
    ) -> Result<Self, RegistryError> {
        let mut order = Vec::new();
        let mut map = HashMap::new();

        for persona in personas {
            if persona.id.0.trim().is_empty() {
                return Err(RegistryError::EmptyId);
            }
            if persona.greeting.trim().is_empty() {
                return Err(RegistryError::EmptyGreeting(persona.id.clone()));
            }
            if persona.replies.iter().any(|reply| reply.trim().is_empty()) {
                return Err(RegistryError::EmptyReply(persona.id.clone()));
            }
            if map.contains_key(&persona.id) {
                return Err(RegistryError::DuplicateId(persona.id.clone()));
            }
            order.push(persona.id.clone());
            map.insert(persona.id.clone(), Arc::new(persona));
        }

        let fallback_has_replies = match &fallback {
            Some(id) => {
                let persona = map
                    .get(id)
                    .ok_or_else(|| RegistryError::MissingFallback(id.clone()))?;
                !persona.replies.is_empty()
            }
            None => false,
        };

        for id in &order {
            if map[id].replies.is_empty() && !fallback_has_replies {
                return Err(RegistryError::NoReplies(id.clone()));
            }
        }

        Ok(Self {
            order,
            personas: map,
            fallback,
        })
    }

    /// The two personas the application ships with, falling back to Alex
    #[must_use]
    pub fn builtin() -> Self {
        let personas = builtin_personas();
        Self {
            order: personas.iter().map(|p| p.id.clone()).collect(),
            fallback: Some(PersonaId::from(BUILTIN_FALLBACK)),
            personas: personas
                .into_iter()
                .map(|p| (p.id.clone(), Arc::new(p)))
                .collect(),
        }
    }

    /// Look up a persona by id
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownPersona`] for any id outside the set.
    pub fn lookup(&self, id: &PersonaId) -> Result<Arc<Persona>, RegistryError> {
        self.personas
            .get(id)
            .cloned()
            .ok_or_else(|| RegistryError::UnknownPersona(id.clone()))
    }

    /// Whether an id is registered
    #[must_use]
    pub fn contains(&self, id: &PersonaId) -> bool {
        self.personas.contains_key(id)
    }

    /// Personas in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Persona>> {
        self.order.iter().filter_map(|id| self.personas.get(id))
    }

    /// Persona ids in declaration order
    #[must_use]
    pub fn ids(&self) -> &[PersonaId] {
        &self.order
    }

    /// Number of personas
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the registry has no personas
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// The fallback persona, if one is configured
    #[must_use]
    pub fn fallback(&self) -> Option<&Arc<Persona>> {
        self.fallback.as_ref().and_then(|id| self.personas.get(id))
    }

    /// The pool a persona's replies are drawn from.
    ///
    /// A persona with an empty pool borrows the fallback persona's replies.
    #[must_use]
    pub fn reply_pool<'a>(&'a self, persona: &'a Persona) -> &'a [String] {
        if !persona.replies.is_empty() {
            return &persona.replies;
        }
        self.fallback()
            .map(|fallback| fallback.replies.as_slice())
            .unwrap_or_default()
    }
}

impl Default for PersonaRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
