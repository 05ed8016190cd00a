//! Severity labels assigned by the skin classifier.
//!
//! Every enum is declared in ascending order so the derived `Ord` matches
//! the severity scale. The serialized form is the human-readable label.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! label_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $variant:ident => $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
            JsonSchema,
        )]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            /// All labels in ascending order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Human-readable label.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }
    };
}

label_enum! {
    /// Acne severity.
    pub enum AcneSeverity {
        None => "None",
        VeryMild => "Very Mild",
        Mild => "Mild",
        Moderate => "Moderate",
        Severe => "Severe",
    }
}

label_enum! {
    /// How many pimples are visible.
    pub enum PimpleCount {
        None => "None",
        Few => "Few",
        Several => "Several",
        Many => "Many",
    }
}

label_enum! {
    /// Dark circle severity.
    pub enum DarkCircleSeverity {
        None => "None",
        Mild => "Mild",
        Moderate => "Moderate",
        Heavy => "Heavy",
    }
}

label_enum! {
    /// How many blackheads are visible.
    pub enum BlackheadCount {
        None => "None",
        Few => "Few",
        Moderate => "Moderate",
        Many => "Many",
    }
}

label_enum! {
    /// Skin tone, best first.
    pub enum SkinTone {
        Radiant => "Radiant",
        Healthy => "Healthy",
        Normal => "Normal",
        Dull => "Dull",
        Uneven => "Uneven",
    }
}

label_enum! {
    /// Letter grade for the combined score, best first.
    pub enum SkinGrade {
        A => "A",
        B => "B",
        C => "C",
        D => "D",
    }
}

label_enum! {
    /// Overall condition, paired one-to-one with [`SkinGrade`].
    pub enum OverallCondition {
        Excellent => "Excellent",
        Good => "Good",
        Fair => "Fair",
        NeedsCare => "Needs Care",
    }
}

label_enum! {
    /// Skin moisture estimate.
    pub enum Moisture {
        Low => "Low",
        Medium => "Medium",
        High => "High",
    }
}

label_enum! {
    /// Pore visibility, least visible first.
    pub enum PoreVisibility {
        Minimal => "Minimal",
        Visible => "Visible",
        Prominent => "Prominent",
    }
}

impl SkinGrade {
    /// The overall condition that accompanies this grade.
    pub fn condition(&self) -> OverallCondition {
        match self {
            SkinGrade::A => OverallCondition::Excellent,
            SkinGrade::B => OverallCondition::Good,
            SkinGrade::C => OverallCondition::Fair,
            SkinGrade::D => OverallCondition::NeedsCare,
        }
    }
}
