use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::VoiceError;

/// The closed vocabulary of actions Pidog can perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Action {
    #[serde(rename = "forward")]
    Forward,
    #[serde(rename = "backward")]
    Backward,
    #[serde(rename = "lie")]
    Lie,
    #[serde(rename = "stand")]
    Stand,
    #[serde(rename = "sit")]
    Sit,
    #[serde(rename = "bark")]
    Bark,
    #[serde(rename = "bark harder")]
    BarkHarder,
    #[serde(rename = "pant")]
    Pant,
    #[serde(rename = "howling")]
    Howling,
    #[serde(rename = "wag tail")]
    WagTail,
    #[serde(rename = "stretch")]
    Stretch,
    #[serde(rename = "push up")]
    PushUp,
    #[serde(rename = "scratch")]
    Scratch,
    #[serde(rename = "handshake")]
    Handshake,
    #[serde(rename = "high five")]
    HighFive,
    #[serde(rename = "lick hand")]
    LickHand,
    #[serde(rename = "shake head")]
    ShakeHead,
    #[serde(rename = "relax neck")]
    RelaxNeck,
    #[serde(rename = "nod")]
    Nod,
    #[serde(rename = "think")]
    Think,
    #[serde(rename = "recall")]
    Recall,
    #[serde(rename = "head down")]
    HeadDown,
    #[serde(rename = "fluster")]
    Fluster,
    #[serde(rename = "surprise")]
    Surprise,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyPart {
    Legs,
    Head,
    Tail,
    Multi,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Posture {
    Stand,
    Sit,
    Lie,
}

/// Catalogue entry describing one action.
#[derive(Debug, Clone, Serialize)]
pub struct ActionInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub body_part: BodyPart,
    pub required_posture: Option<Posture>,
    pub has_sound: bool,
}

impl Action {
    pub const ALL: [Action; 24] = [
        Action::Forward,
        Action::Backward,
        Action::Lie,
        Action::Stand,
        Action::Sit,
        Action::Bark,
        Action::BarkHarder,
        Action::Pant,
        Action::Howling,
        Action::WagTail,
        Action::Stretch,
        Action::PushUp,
        Action::Scratch,
        Action::Handshake,
        Action::HighFive,
        Action::LickHand,
        Action::ShakeHead,
        Action::RelaxNeck,
        Action::Nod,
        Action::Think,
        Action::Recall,
        Action::HeadDown,
        Action::Fluster,
        Action::Surprise,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Action::Forward => "forward",
            Action::Backward => "backward",
            Action::Lie => "lie",
            Action::Stand => "stand",
            Action::Sit => "sit",
            Action::Bark => "bark",
            Action::BarkHarder => "bark harder",
            Action::Pant => "pant",
            Action::Howling => "howling",
            Action::WagTail => "wag tail",
            Action::Stretch => "stretch",
            Action::PushUp => "push up",
            Action::Scratch => "scratch",
            Action::Handshake => "handshake",
            Action::HighFive => "high five",
            Action::LickHand => "lick hand",
            Action::ShakeHead => "shake head",
            Action::RelaxNeck => "relax neck",
            Action::Nod => "nod",
            Action::Think => "think",
            Action::Recall => "recall",
            Action::HeadDown => "head down",
            Action::Fluster => "fluster",
            Action::Surprise => "surprise",
        }
    }

    /// Vocal actions make their own sound, so no spoken answer accompanies them.
    pub fn is_vocal(self) -> bool {
        matches!(
            self,
            Action::Bark | Action::BarkHarder | Action::Pant | Action::Howling
        )
    }

    pub fn info(self) -> ActionInfo {
        use BodyPart::*;
        use Posture::*;

        let (description, body_part, required_posture) = match self {
            Action::Forward => ("Walk forward", Legs, Some(Stand)),
            Action::Backward => ("Walk backward", Legs, Some(Stand)),
            Action::Lie => ("Lie down", Legs, None),
            Action::Stand => ("Stand up", Legs, None),
            Action::Sit => ("Sit down", Legs, None),
            Action::Bark => ("Single bark with head bob", Multi, None),
            Action::BarkHarder => ("Aggressive bark with attack posture", Multi, Some(Stand)),
            Action::Pant => ("Panting animation with sound", Head, None),
            Action::Howling => ("Sit and howl", Multi, None),
            Action::WagTail => ("Wag tail side to side", Tail, None),
            Action::Stretch => ("Full body stretch", Multi, None),
            Action::PushUp => ("Push-up exercise", Multi, Some(Stand)),
            Action::Scratch => ("Scratch self with foreleg", Legs, Some(Sit)),
            Action::Handshake => ("Raise paw for handshake", Multi, Some(Sit)),
            Action::HighFive => ("Raise paw for high five", Multi, Some(Sit)),
            Action::LickHand => ("Reach out and lick", Multi, Some(Sit)),
            Action::ShakeHead => ("Shake head side to side", Head, None),
            Action::RelaxNeck => ("Neck roll stretch", Head, Some(Sit)),
            Action::Nod => ("Nod head up and down", Head, Some(Sit)),
            Action::Think => ("Tilt head up-left (thinking)", Head, Some(Sit)),
            Action::Recall => ("Tilt head up-right (recalling)", Head, Some(Sit)),
            Action::HeadDown => ("Lower head", Head, None),
            Action::Fluster => ("Rapid head flickering (panic)", Head, Some(Sit)),
            Action::Surprise => ("Jump-back surprise reaction", Multi, Some(Sit)),
        };

        ActionInfo {
            name: self.label(),
            description,
            body_part,
            required_posture,
            has_sound: self.is_vocal(),
        }
    }

    pub fn catalogue() -> Vec<ActionInfo> {
        Self::ALL.iter().map(|a| a.info()).collect()
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Action {
    type Err = VoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|a| a.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| VoiceError::UnknownAction(s.to_string()))
    }
}
