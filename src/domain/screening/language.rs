//! Display languages offered to the candidate.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Language all model reasoning happens in.
pub const WORKING_LANGUAGE: DisplayLanguage = DisplayLanguage::English;

/// Language the candidate reads and writes in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DisplayLanguage {
    #[default]
    English,
    Hindi,
    French,
    German,
}

impl DisplayLanguage {
    pub const ALL: [DisplayLanguage; 4] = [
        DisplayLanguage::English,
        DisplayLanguage::Hindi,
        DisplayLanguage::French,
        DisplayLanguage::German,
    ];

    /// ISO 639-1 code used by the translation capability.
    pub fn code(&self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Hindi => "hi",
            Self::French => "fr",
            Self::German => "de",
        }
    }

    pub fn is_working_language(&self) -> bool {
        *self == WORKING_LANGUAGE
    }

    /// Opening message shown in the chat for this language.
    pub fn greeting(&self) -> &'static str {
        match self {
            Self::English => "Hello, This chatbot is used for initial screening of candidates. So, let's get started:\nFirstly, What is your name, phone number and email address?",
            Self::Hindi => "नमस्ते, यह चैटबॉट उम्मीदवारों की प्रारंभिक स्क्रीनिंग के लिए उपयोग किया जाता है। तो चलिए शुरू करते हैं:\nसबसे पहले, आपका नाम, फ़ोन नंबर और ईमेल पता क्या है?",
            Self::French => "Bonjour, ce chatbot est utilisé pour la présélection des candidats. Alors, commençons :\nTout d'abord, quel est votre nom, numéro de téléphone et adresse e-mail ?",
            Self::German => "Hallo, dieser Chatbot wird für die Vorauswahl von Kandidaten verwendet. Also, lassen Sie uns beginnen:\nZuerst, wie heißen Sie, wie lautet Ihre Telefonnummer und E-Mail-Adresse?",
        }
    }
}

impl fmt::Display for DisplayLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::English => "English",
            Self::Hindi => "Hindi",
            Self::French => "French",
            Self::German => "German",
        };
        f.write_str(name)
    }
}

impl FromStr for DisplayLanguage {
    type Err = ValidationError;

    /// Accepts either the English name or the ISO code, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|lang| lang.code() == needle || lang.to_string().to_lowercase() == needle)
            .ok_or_else(|| {
                ValidationError::invalid_format("language", format!("unsupported language '{}'", s))
            })
    }
}
