//! Air quality label tables
//!
//! Labels follow the Arrêté du 22 juillet 2004 relatif aux indices de la
//! qualité de l'air (article 6). The informal register is the wording used in
//! campaign messages ("la qualité de l'air est bonne").

/// Which wording goes into the air quality column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelRegister {
    /// "Très bon", "Médiocre", ...
    Regulatory,
    /// "très bonne", "médiocre", ...
    Informal,
}

/// Index to label lookups, passed to the transformer rather than read from globals
#[derive(Debug, Clone, Copy)]
pub struct QualifierTables {
    /// Regulatory label for ATMO index 1 to 10
    pub index_labels: [&'static str; 10],
    /// Regulatory label to informal wording
    pub informal_labels: &'static [(&'static str, &'static str)],
}

pub const TRES_BON: &str = "Très bon";
pub const BON: &str = "Bon";
pub const MOYEN: &str = "Moyen";
pub const MEDIOCRE: &str = "Médiocre";
pub const MAUVAIS: &str = "Mauvais";
pub const TRES_MAUVAIS: &str = "Très mauvais";

pub const ATMO_2004: QualifierTables = QualifierTables {
    index_labels: [
        TRES_BON,
        TRES_BON,
        BON,
        BON,
        MOYEN,
        MEDIOCRE,
        MEDIOCRE,
        MAUVAIS,
        MAUVAIS,
        TRES_MAUVAIS,
    ],
    informal_labels: &[
        (TRES_BON, "très bonne"),
        (BON, "bonne"),
        (MOYEN, "moyenne"),
        (MEDIOCRE, "médiocre"),
        (MAUVAIS, "mauvaise"),
        (TRES_MAUVAIS, "très mauvaise"),
    ],
};

impl QualifierTables {
    /// Regulatory label for an index, `None` outside 1..=10
    #[must_use]
    pub fn regulatory_label(&self, index: i64) -> Option<&'static str> {
        let position = usize::try_from(index).ok()?.checked_sub(1)?;
        self.index_labels.get(position).copied()
    }

    /// Canonical regulatory label matching `text`, ignoring case and surrounding spaces
    #[must_use]
    pub fn find_regulatory(&self, text: &str) -> Option<&'static str> {
        let text = text.trim().to_lowercase();
        self.informal_labels
            .iter()
            .map(|(regulatory, _)| *regulatory)
            .find(|label| label.to_lowercase() == text)
    }

    #[must_use]
    pub fn informal_label(&self, regulatory: &str) -> Option<&'static str> {
        self.informal_labels
            .iter()
            .find(|(label, _)| *label == regulatory)
            .map(|(_, informal)| *informal)
    }

    /// Label for an index in the requested register
    #[must_use]
    pub fn label(&self, index: i64, register: LabelRegister) -> Option<&'static str> {
        self.render(self.regulatory_label(index)?, register)
    }

    /// Regulatory label rendered in the requested register
    #[must_use]
    pub fn render(&self, regulatory: &'static str, register: LabelRegister) -> Option<&'static str> {
        match register {
            LabelRegister::Regulatory => Some(regulatory),
            LabelRegister::Informal => self.informal_label(regulatory),
        }
    }
}
