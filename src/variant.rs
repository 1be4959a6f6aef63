//! Survey form variants
//!
//! Two survey forms feed the tool. The first is a plain CSV export producing a
//! single campaign file; the second is a Framaforms TSV export whose rows are
//! split into one file per (frequency, channel) pair. Everything that differs
//! between them is described here as data and read by the parser, the
//! transformer and the exporter.

use crate::delimited::{Delimiter, ParseOptions};
use crate::scale::LabelRegister;
use crate::{EcosanteError, Result};

pub const OUI: &str = "Oui";
pub const NON: &str = "Non";

pub const CHANNEL_EMAIL: &str = "Mail";
pub const CHANNEL_SMS: &str = "SMS";
pub const UNKNOWN_CHANNEL: &str = "?";

/// Output column names
pub mod columns {
    pub const MAIL: &str = "Mail";
    pub const TELEPHONE: &str = "Téléphone";
    pub const REGION: &str = "Région";
    pub const VILLE: &str = "Ville";
    pub const QUALITE_AIR: &str = "Qualité de l'air";
    pub const LIEN_AASQA: &str = "Lien_AASQA";
    pub const PATHOLOGIE_RESPIRATOIRE: &str = "Pathologie_respiratoire";
    pub const ALLERGIES: &str = "Allergies";
    pub const ACTIVITE_SPORTIVE: &str = "Activité_sportive";
    pub const CYCLISTE: &str = "Cycliste";
    pub const AUTOMOBILISTE: &str = "Automobiliste";
    pub const FUMEUR: &str = "Fumeur";
    pub const FORMAT: &str = "Format";
    pub const FREQUENCE: &str = "Fréquence";
    pub const RECOMMANDATION: &str = "Recommandation";
    pub const PRECISIONS: &str = "Précisions";
}

/// How an output cell is derived
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputField {
    Email,
    Phone,
    City,
    /// Omitted from the row when no label can be derived
    AirQuality,
    /// Region answered in the survey
    InputRegion,
    /// Region name from the forecast metadata
    ForecastRegion,
    RegionWebsite,
    RespiratoryCondition,
    Allergy,
    PhysicalActivity,
    Cyclist,
    Motorist,
    Smoker,
    Channel,
    Frequency,
    /// Single space, filled in by hand downstream
    Placeholder,
}

/// Where cyclist / motorist answers live in the export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportStrategy {
    /// One free-text answer listing the means of transport
    FreeText {
        column: &'static str,
        cyclist_keyword: &'static str,
        motorist_keyword: &'static str,
    },
    /// One checkbox column per means of transport
    Checkboxes {
        cyclist_column: &'static str,
        motorist_column: &'static str,
        marker: &'static str,
    },
}

impl TransportStrategy {
    fn columns(&self) -> Vec<&'static str> {
        match self {
            TransportStrategy::FreeText { column, .. } => vec![*column],
            TransportStrategy::Checkboxes {
                cyclist_column,
                motorist_column,
                ..
            } => vec![*cyclist_column, *motorist_column],
        }
    }
}

/// Input column names of a survey form
#[derive(Debug, Clone, Copy)]
pub struct InputColumns {
    pub email: &'static str,
    pub phone: &'static str,
    pub region: Option<&'static str>,
    pub city: &'static str,
    pub respiratory: &'static str,
    pub allergy: &'static str,
    pub activity: &'static str,
    pub smoker: &'static str,
    pub channel: &'static str,
    pub frequency: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Every row in one file
    Single { filename: &'static str },
    /// One file per (frequency, channel) bucket
    Partitioned,
}

#[derive(Debug, Clone, Copy)]
pub struct FormVariant {
    pub name: &'static str,
    pub parse: ParseOptions,
    pub input: InputColumns,
    pub transport: TransportStrategy,
    pub register: LabelRegister,
    pub layout: &'static [(&'static str, OutputField)],
    pub output: OutputMode,
}

impl FormVariant {
    /// Input columns the variant reads
    #[must_use]
    pub fn required_columns(&self) -> Vec<&'static str> {
        let input = &self.input;
        let mut required = vec![
            input.email,
            input.phone,
            input.city,
            input.respiratory,
            input.allergy,
            input.activity,
            input.smoker,
            input.channel,
            input.frequency,
        ];
        required.extend(input.region);
        required.extend(self.transport.columns());
        required
    }

    /// Fail with the first required column missing from `header`
    pub fn check_columns(&self, header: &[String]) -> Result<()> {
        match self
            .required_columns()
            .into_iter()
            .find(|required| !header.iter().any(|c| c.as_str() == *required))
        {
            Some(missing) => Err(EcosanteError::missing_column(missing)),
            None => Ok(()),
        }
    }

    /// Output column names in layout order
    pub fn column_names(&self) -> impl Iterator<Item = &'static str> {
        self.layout.iter().map(|(name, _)| *name)
    }
}

pub const SIMPLE_SURVEY: FormVariant = FormVariant {
    name: "simple",
    parse: ParseOptions::csv(),
    input: InputColumns {
        email: "Adresse e-mail",
        phone: "Si vous avez choisi par SMS ou WhatsApp, veuillez renseigner votre numéro de téléphone",
        region: Some("Région"),
        city: "Ville",
        respiratory: "Vivez-vous avec une pathologie respiratoire ?",
        allergy: "Êtes-vous allergique aux pollens (graminées, ambroisie, etc.) ?",
        activity: "Pratiquez-vous une activité sportive ? ",
        smoker: "Êtes-vous fumeur.euse (cigarette, cigare, cigarette électronique) ?",
        channel: "Souhaitez-vous recevoir les recommandations Ecosanté par :",
        frequency: "A quelle fréquence souhaitez-vous recevoir les notifications ? ",
    },
    transport: TransportStrategy::FreeText {
        column: "Quel(s) moyen(s) de transport utilisez-vous pour vos déplacements ?",
        cyclist_keyword: "Vélo",
        motorist_keyword: "Voiture",
    },
    register: LabelRegister::Regulatory,
    layout: &[
        (columns::MAIL, OutputField::Email),
        (columns::REGION, OutputField::InputRegion),
        (columns::VILLE, OutputField::City),
        (columns::QUALITE_AIR, OutputField::AirQuality),
        (columns::PATHOLOGIE_RESPIRATOIRE, OutputField::RespiratoryCondition),
        (columns::ALLERGIES, OutputField::Allergy),
        (columns::ACTIVITE_SPORTIVE, OutputField::PhysicalActivity),
        (columns::CYCLISTE, OutputField::Cyclist),
        (columns::AUTOMOBILISTE, OutputField::Motorist),
        (columns::FUMEUR, OutputField::Smoker),
        (columns::FORMAT, OutputField::Channel),
        (columns::TELEPHONE, OutputField::Phone),
        (columns::FREQUENCE, OutputField::Frequency),
    ],
    output: OutputMode::Single {
        filename: "fichier de sortie écosanté.csv",
    },
};

pub const FRAMAFORMS_SURVEY: FormVariant = FormVariant {
    name: "partitioned",
    parse: ParseOptions {
        delimiter: Delimiter::Tab,
        preamble_rows: 2,
        header_renames: &[("Aucun", "Aucun extérieur"), ("Oui", "Consentement")],
    },
    input: InputColumns {
        email: "Adresse e-mail",
        phone: "Numéro de téléphone",
        region: None,
        city: "Dans quelle ville vivez-vous ?",
        respiratory: "Vivez-vous avec une pathologie respiratoire ? ",
        allergy: "Êtes-vous allergique aux pollens ?",
        activity: "Pratiquez-vous une activité sportive au moins une fois par semaine ?",
        smoker: "Êtes-vous fumeur.euse ?",
        channel: "Souhaitez-vous recevoir les recommandations par :",
        frequency: "A quelle fréquence souhaitez-vous recevoir les recommandations ? ",
    },
    transport: TransportStrategy::Checkboxes {
        cyclist_column: "Vélo",
        motorist_column: "Voiture",
        marker: "X",
    },
    register: LabelRegister::Informal,
    layout: &[
        (columns::MAIL, OutputField::Email),
        (columns::TELEPHONE, OutputField::Phone),
        (columns::VILLE, OutputField::City),
        (columns::QUALITE_AIR, OutputField::AirQuality),
        (columns::REGION, OutputField::ForecastRegion),
        (columns::LIEN_AASQA, OutputField::RegionWebsite),
        (columns::PATHOLOGIE_RESPIRATOIRE, OutputField::RespiratoryCondition),
        (columns::ALLERGIES, OutputField::Allergy),
        (columns::ACTIVITE_SPORTIVE, OutputField::PhysicalActivity),
        (columns::CYCLISTE, OutputField::Cyclist),
        (columns::AUTOMOBILISTE, OutputField::Motorist),
        (columns::FUMEUR, OutputField::Smoker),
        (columns::RECOMMANDATION, OutputField::Placeholder),
        (columns::PRECISIONS, OutputField::Placeholder),
    ],
    output: OutputMode::Partitioned,
};
