use crate::error::ProtocolError;
use crate::model::room::RoomId;
use serde::{Deserialize, Serialize};

/// Negotiation body the relay forwards without looking inside.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Payload(pub serde_json::Value);

impl From<serde_json::Value> for Payload {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}

/// Frames sent from a client to the relay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ClientEvent {
    JoinRoom(RoomId),
    Offer { offer: Payload, room: RoomId },
    Answer { answer: Payload, room: RoomId },
    IceCandidate { candidate: Payload, room: RoomId },
}

/// Frames sent from the relay to a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ServerEvent {
    UserConnected,
    Offer(Payload),
    Answer(Payload),
    IceCandidate(Payload),
}

/// What the relay has to do with one inbound [`ClientEvent`].
#[derive(Debug, Clone, PartialEq)]
pub enum Routing {
    Join(RoomId),
    /// Fan `event` out to everyone in `room` but the sender. The room key is
    /// stripped from the forwarded frame.
    Forward { room: RoomId, event: ServerEvent },
}

impl From<ClientEvent> for Routing {
    fn from(event: ClientEvent) -> Self {
        match event {
            ClientEvent::JoinRoom(room) => Routing::Join(room),
            ClientEvent::Offer { offer, room } => Routing::Forward {
                room,
                event: ServerEvent::Offer(offer),
            },
            ClientEvent::Answer { answer, room } => Routing::Forward {
                room,
                event: ServerEvent::Answer(answer),
            },
            ClientEvent::IceCandidate { candidate, room } => Routing::Forward {
                room,
                event: ServerEvent::IceCandidate(candidate),
            },
        }
    }
}

impl ClientEvent {
    pub fn name(&self) -> &'static str {
        match self {
            ClientEvent::JoinRoom(_) => "join-room",
            ClientEvent::Offer { .. } => "offer",
            ClientEvent::Answer { .. } => "answer",
            ClientEvent::IceCandidate { .. } => "ice-candidate",
        }
    }

    pub fn from_json(text: &str) -> Result<Self, ProtocolError> {
        serde_json::from_str(text).map_err(ProtocolError::MalformedFrame)
    }

    pub fn to_json(&self) -> Result<String, ProtocolError> {
        serde_json::to_string(self).map_err(ProtocolError::MalformedFrame)
    }
}

impl ServerEvent {
    pub fn name(&self) -> &'static str {
        match self {
            ServerEvent::UserConnected => "user-connected",
            ServerEvent::Offer(_) => "offer",
            ServerEvent::Answer(_) => "answer",
            ServerEvent::IceCandidate(_) => "ice-candidate",
        }
    }

    pub fn from_json(text: &str) -> Result<Self, ProtocolError> {
        serde_json::from_str(text).map_err(ProtocolError::MalformedFrame)
    }

    pub fn to_json(&self) -> Result<String, ProtocolError> {
        serde_json::to_string(self).map_err(ProtocolError::MalformedFrame)
    }
}
