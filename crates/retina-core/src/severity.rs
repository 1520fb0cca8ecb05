use std::fmt;

use serde::{Deserialize, Serialize};

/// Ordinal clinical risk tier of a diagnosis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SeverityLevel {
    #[default]
    Healthy,
    Mild,
    Moderate,
    Severe,
    Proliferative,
}

/// Vocabulary matched against free-text labels, in priority order.
const LABEL_KEYWORDS: [(&str, SeverityLevel); 5] = [
    ("Sain", SeverityLevel::Healthy),
    ("Légère", SeverityLevel::Mild),
    ("Modérée", SeverityLevel::Moderate),
    ("Sévère", SeverityLevel::Severe),
    ("Proliférante", SeverityLevel::Proliferative),
];

impl SeverityLevel {
    pub const ALL: [Self; 5] = [
        Self::Healthy,
        Self::Mild,
        Self::Moderate,
        Self::Severe,
        Self::Proliferative,
    ];

    pub fn ordinal(self) -> u8 {
        self as u8
    }

    /// Typed severity as delivered by the inference service.
    pub fn from_ordinal(value: u8) -> Option<Self> {
        Self::ALL.get(value as usize).copied()
    }

    /// Canonical diagnosis label for this level.
    pub fn label(self) -> &'static str {
        match self {
            Self::Healthy => "Pas de Rétinopathie (Sain)",
            Self::Mild => "Rétinopathie Légère",
            Self::Moderate => "Rétinopathie Modérée",
            Self::Severe => "Rétinopathie Sévère",
            Self::Proliferative => "Rétinopathie Proliférante",
        }
    }

    /// Static presentation record shared by every view.
    pub fn profile(self) -> &'static SeverityProfile {
        &PROFILES[self as usize]
    }

    /// Queue rank of a known level: Proliferative 1 through Healthy 5.
    pub fn queue_priority(self) -> u8 {
        Self::Proliferative.ordinal() + 1 - self.ordinal()
    }

    pub fn is_urgent(self) -> bool {
        self >= Self::Severe
    }
}

impl fmt::Display for SeverityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Healthy => write!(f, "Healthy"),
            Self::Mild => write!(f, "Mild"),
            Self::Moderate => write!(f, "Moderate"),
            Self::Severe => write!(f, "Severe"),
            Self::Proliferative => write!(f, "Proliferative"),
        }
    }
}

/// Colour family of a severity badge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorTier {
    Success,
    Info,
    Warning,
    Danger,
}

impl ColorTier {
    pub fn rgb(self) -> [u8; 3] {
        match self {
            Self::Success => [25, 135, 84],
            Self::Info => [13, 202, 240],
            Self::Warning => [255, 193, 7],
            Self::Danger => [220, 53, 69],
        }
    }
}

impl fmt::Display for ColorTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Danger => write!(f, "danger"),
        }
    }
}

/// Recommendation text, badge colour and advice bullets for one level.
#[derive(Debug)]
pub struct SeverityProfile {
    pub follow_up: &'static str,
    pub color_tier: ColorTier,
    pub advice: [&'static str; 3],
}

static PROFILES: [SeverityProfile; 5] = [
    SeverityProfile {
        follow_up: "Prochain contrôle dans 12 mois.",
        color_tier: ColorTier::Success,
        advice: [
            "Hygiène : Continuez à maintenir un équilibre glycémique stable.",
            "Alimentation : Privilégiez les légumes verts et les oméga-3.",
            "Suivi : Prochain fond d'œil de contrôle recommandé dans 12 mois.",
        ],
    },
    SeverityProfile {
        follow_up: "Surveillance recommandée tous les 6 à 12 mois.",
        color_tier: ColorTier::Info,
        advice: [
            "Tension : Contrôlez strictement votre tension artérielle.",
            "Diabète : Surveillez votre taux d'hémoglobine glyquée (HbA1c).",
            "Suivi : Consultez votre ophtalmologue dans les 6 à 12 mois.",
        ],
    },
    SeverityProfile {
        follow_up: "Consultez un ophtalmologue sous 3 mois.",
        color_tier: ColorTier::Warning,
        advice: [
            "Alerte : Une prise en charge médicale est nécessaire.",
            "Traitement : Vérifiez votre traitement diabétique avec votre médecin traitant.",
            "Suivi : Consultation ophtalmologique recommandée sous 3 mois.",
        ],
    },
    SeverityProfile {
        follow_up: "Consultation ophtalmologique URGENTE requise.",
        color_tier: ColorTier::Danger,
        advice: [
            "Urgence : Risque élevé pour la vision. Ne négligez pas vos symptômes.",
            "Intervention : Un traitement laser (panphotocoagulation) peut être discuté.",
            "Suivi : Prenez rendez-vous sans tarder (sous 1 mois).",
        ],
    },
    SeverityProfile {
        follow_up: "Consultation ophtalmologique URGENTE requise.",
        color_tier: ColorTier::Danger,
        advice: [
            "URGENCE ABSOLUE : Risque de cécité ou d'hémorragie.",
            "Traitement : Des injections intravitréennes ou du laser sont requis immédiatement.",
            "Précautions : Évitez les efforts physiques violents et le port de charges lourdes.",
        ],
    },
];

/// Map a diagnosis label to a severity level.
///
/// Case-sensitive substring match in fixed priority order; absent or
/// unrecognised labels are `Healthy`.
pub fn classify(label: Option<&str>) -> SeverityLevel {
    let Some(label) = label else {
        return SeverityLevel::Healthy;
    };
    LABEL_KEYWORDS
        .iter()
        .find(|(keyword, _)| label.contains(keyword))
        .map(|(_, level)| *level)
        .unwrap_or_default()
}

/// Rank used to order the active review queue; lower is more urgent.
///
/// Unlike [`classify`], an unknown or absent label sorts last rather than
/// being treated as healthy.
pub fn queue_priority(label: Option<&str>) -> u8 {
    const UNRANKED: u8 = 10;
    let Some(label) = label else {
        return UNRANKED;
    };
    LABEL_KEYWORDS
        .iter()
        .rev()
        .find(|(keyword, _)| label.contains(keyword))
        .map(|(_, level)| level.queue_priority())
        .unwrap_or(UNRANKED)
}
