use crate::error::ProtocolError;
use crate::model::signaling::Payload;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SdpType {
    Offer,
    Answer,
}

impl SdpType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SdpType::Offer => "offer",
            SdpType::Answer => "answer",
        }
    }
}

/// Negotiated media parameters, in the JSON shape browsers use for
/// `RTCSessionDescriptionInit`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionDescription {
    #[serde(rename = "type")]
    pub sdp_type: SdpType,
    pub sdp: String,
}

impl SessionDescription {
    pub fn offer(sdp: impl Into<String>) -> Self {
        Self {
            sdp_type: SdpType::Offer,
            sdp: sdp.into(),
        }
    }

    pub fn answer(sdp: impl Into<String>) -> Self {
        Self {
            sdp_type: SdpType::Answer,
            sdp: sdp.into(),
        }
    }

    /// Decodes a relayed body, requiring the given description type.
    pub fn from_payload(payload: &Payload, expected: SdpType) -> Result<Self, ProtocolError> {
        let desc: Self = serde_json::from_value(payload.0.clone()).map_err(|source| {
            ProtocolError::MalformedPayload {
                what: "session description",
                source,
            }
        })?;

        if desc.sdp_type != expected {
            return Err(ProtocolError::UnexpectedSdpType {
                expected: expected.as_str(),
                actual: desc.sdp_type.as_str(),
            });
        }
        Ok(desc)
    }

    pub fn to_payload(&self) -> Payload {
        Payload(serde_json::json!({
            "type": self.sdp_type.as_str(),
            "sdp": self.sdp,
        }))
    }
}

/// Network reachability descriptor, in the JSON shape of `RTCIceCandidateInit`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IceCandidate {
    pub candidate: String,
    #[serde(default)]
    pub sdp_mid: Option<String>,
    #[serde(rename = "sdpMLineIndex", default)]
    pub sdp_m_line_index: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username_fragment: Option<String>,
}

impl IceCandidate {
    pub fn from_payload(payload: &Payload) -> Result<Self, ProtocolError> {
        serde_json::from_value(payload.0.clone()).map_err(|source| {
            ProtocolError::MalformedPayload {
                what: "ICE candidate",
                source,
            }
        })
    }

    pub fn to_payload(&self) -> Result<Payload, ProtocolError> {
        serde_json::to_value(self)
            .map(Payload)
            .map_err(|source| ProtocolError::MalformedPayload {
                what: "ICE candidate",
                source,
            })
    }
}
