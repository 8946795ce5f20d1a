use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::ClassificationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Label {
    Spam,
    Ham,
}

impl Label {
    pub fn is_spam(self) -> bool {
        matches!(self, Label::Spam)
    }
}

impl TryFrom<u8> for Label {
    type Error = ClassificationError;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        match raw {
            1 => Ok(Label::Spam),
            0 => Ok(Label::Ham),
            other => Err(ClassificationError::InvalidLabel(other)),
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Spam => f.write_str("Spam"),
            Label::Ham => f.write_str("Ham"),
        }
    }
}

/// One input line paired with the label the classifier assigned to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub message: String,
    pub label: Label,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_predictions_map_to_labels() {
        assert_eq!(Label::try_from(1).unwrap(), Label::Spam);
        assert_eq!(Label::try_from(0).unwrap(), Label::Ham);
        assert!(matches!(
            Label::try_from(2),
            Err(ClassificationError::InvalidLabel(2))
        ));
    }

    #[test]
    fn labels_display_and_serialize_by_name() {
        assert_eq!(Label::Spam.to_string(), "Spam");
        assert_eq!(serde_json::to_string(&Label::Ham).unwrap(), "\"Ham\"");
    }
}
