//! Face++ detect request/response types.

use serde::{Deserialize, Serialize};
use skinsight_models::{Gender, RawSkinScores, SubjectMeta, DEFAULT_AGE};

/// Attributes requested from the detect endpoint.
pub const RETURN_ATTRIBUTES: &str = "skinstatus,gender,age";

/// Response from `POST /facepp/v3/detect`.
///
/// Every field is optional on the wire; anything missing takes its default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DetectResponse {
    #[serde(default)]
    pub faces: Vec<Face>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl DetectResponse {
    /// The face analysis is based on, if any was found.
    pub fn primary_face(&self) -> Option<&Face> {
        self.faces.first()
    }
}

/// One detected face.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Face {
    #[serde(default)]
    pub attributes: FaceAttributes,
    #[serde(default)]
    pub face_rectangle: FaceRectangle,
}

impl Face {
    pub fn skin_scores(&self) -> RawSkinScores {
        self.attributes.skinstatus
    }

    /// Gender and age, defaulting to unknown / 25 when absent.
    pub fn subject(&self) -> SubjectMeta {
        let gender = self
            .attributes
            .gender
            .as_ref()
            .map(|g| Gender::from_label(&g.value))
            .unwrap_or_default();
        let age = self
            .attributes
            .age
            .as_ref()
            .map(|a| a.value)
            .unwrap_or(DEFAULT_AGE);
        SubjectMeta::new(gender, age)
    }

    /// Detection confidence as reported, in `[0, 1]`.
    pub fn confidence(&self) -> f64 {
        self.face_rectangle.confidence
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FaceAttributes {
    #[serde(default)]
    pub skinstatus: RawSkinScores,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<ValueAttr<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<ValueAttr<u32>>,
}

/// Face++ wraps scalar attributes as `{"value": ...}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValueAttr<T> {
    pub value: T,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FaceRectangle {
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub top: i64,
    #[serde(default)]
    pub left: i64,
    #[serde(default)]
    pub width: i64,
    #[serde(default)]
    pub height: i64,
}
