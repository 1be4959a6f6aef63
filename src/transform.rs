//! Survey row to campaign row
//!
//! Pure mapping from one parsed answer, plus the forecast resolved for it, to
//! the output columns of the form variant.

use crate::models::{ForecastRecord, OutputRow, RawRow};
use crate::scale::QualifierTables;
use crate::variant::{
    CHANNEL_EMAIL, CHANNEL_SMS, FormVariant, NON, OUI, OutputField, TransportStrategy,
    UNKNOWN_CHANNEL,
};

pub struct RowTransformer<'v> {
    variant: &'v FormVariant,
    tables: QualifierTables,
}

impl<'v> RowTransformer<'v> {
    pub fn new(variant: &'v FormVariant, tables: QualifierTables) -> Self {
        Self { variant, tables }
    }

    /// Build the output row; only the air quality column may be missing
    #[must_use]
    pub fn transform(&self, row: &RawRow, forecast: Option<&ForecastRecord>) -> OutputRow {
        let mut output = OutputRow::with_capacity(self.variant.layout.len());
        for (column, field) in self.variant.layout {
            if let Some(value) = self.field(*field, row, forecast) {
                output.push(*column, value);
            }
        }
        output
    }

    fn field(
        &self,
        field: OutputField,
        row: &RawRow,
        forecast: Option<&ForecastRecord>,
    ) -> Option<String> {
        let input = &self.variant.input;
        let value = match field {
            OutputField::Email => row.trimmed(input.email).to_string(),
            OutputField::Phone => row.trimmed(input.phone).to_string(),
            OutputField::City => row.trimmed(input.city).to_string(),
            OutputField::AirQuality => {
                return forecast
                    .and_then(|record| self.air_quality_label(record))
                    .map(str::to_string);
            }
            OutputField::InputRegion => input
                .region
                .map(|column| row.trimmed(column).to_string())
                .unwrap_or_default(),
            OutputField::ForecastRegion => forecast
                .and_then(|record| record.region_name.clone())
                .unwrap_or_default(),
            OutputField::RegionWebsite => forecast
                .and_then(|record| record.region_website.clone())
                .unwrap_or_default(),
            OutputField::RespiratoryCondition => row.trimmed(input.respiratory).to_string(),
            OutputField::Allergy => allergy_prefix(row.value(input.allergy)),
            OutputField::PhysicalActivity => activity_answer(row.value(input.activity)).to_string(),
            OutputField::Cyclist => self.uses_transport(row, Transport::Bike).to_string(),
            OutputField::Motorist => self.uses_transport(row, Transport::Car).to_string(),
            OutputField::Smoker => row.trimmed(input.smoker).to_string(),
            OutputField::Channel => channel_or_sentinel(row.value(input.channel)).to_string(),
            OutputField::Frequency => row.trimmed(input.frequency).to_string(),
            OutputField::Placeholder => " ".to_string(),
        };
        Some(value)
    }

    /// Label of the forecast in the variant's register
    ///
    /// The ATMO index decides; a textual category is only used when the entry
    /// carries no index at all.
    #[must_use]
    pub fn air_quality_label(&self, forecast: &ForecastRecord) -> Option<&'static str> {
        match (forecast.indice, forecast.qualif.as_deref()) {
            (Some(index), _) => self.tables.label(index, self.variant.register),
            (None, Some(qualif)) => {
                let regulatory = self.tables.find_regulatory(qualif)?;
                self.tables.render(regulatory, self.variant.register)
            }
            (None, None) => None,
        }
    }

    fn uses_transport(&self, row: &RawRow, transport: Transport) -> &'static str {
        let uses = match self.variant.transport {
            TransportStrategy::FreeText {
                column,
                cyclist_keyword,
                motorist_keyword,
            } => {
                let keyword = match transport {
                    Transport::Bike => cyclist_keyword,
                    Transport::Car => motorist_keyword,
                };
                row.value(column).contains(keyword)
            }
            TransportStrategy::Checkboxes {
                cyclist_column,
                motorist_column,
                marker,
            } => {
                let column = match transport {
                    Transport::Bike => cyclist_column,
                    Transport::Car => motorist_column,
                };
                row.value(column) == marker
            }
        };
        if uses { OUI } else { NON }
    }
}

#[derive(Debug, Clone, Copy)]
enum Transport {
    Bike,
    Car,
}

/// First three characters of the trimmed answer ("Oui, au printemps" gives "Oui")
#[must_use]
pub fn allergy_prefix(answer: &str) -> String {
    answer.trim().chars().take(3).collect()
}

/// "Non" only for an exact "Non", anything else counts as active
#[must_use]
pub fn activity_answer(answer: &str) -> &'static str {
    if answer.trim() == NON { NON } else { OUI }
}

/// The trimmed channel when recognised, `?` otherwise
#[must_use]
pub fn channel_or_sentinel(answer: &str) -> &str {
    let channel = answer.trim();
    if channel == CHANNEL_EMAIL || channel == CHANNEL_SMS {
        channel
    } else {
        UNKNOWN_CHANNEL
    }
}

/// Header of one output file: layout order, the optional air quality column
/// kept only when some row carries it
#[must_use]
pub fn header_for(variant: &FormVariant, rows: &[OutputRow]) -> Vec<&'static str> {
    variant
        .layout
        .iter()
        .filter(|(column, field)| {
            *field != OutputField::AirQuality || rows.iter().any(|row| row.contains(column))
        })
        .map(|(column, _)| *column)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scale::ATMO_2004;
    use crate::variant::{FRAMAFORMS_SURVEY, SIMPLE_SURVEY, columns};
    use rstest::rstest;

    fn simple_row(pairs: &[(&str, &str)]) -> RawRow {
        let mut values: Vec<(&str, &str)> = SIMPLE_SURVEY
            .required_columns()
            .into_iter()
            .map(|column| (column, ""))
            .collect();
        values.extend_from_slice(pairs);
        values.into_iter().collect()
    }

    fn forecast(indice: Option<i64>) -> ForecastRecord {
        ForecastRecord {
            date: "2021-03-01".to_string(),
            indice,
            qualif: None,
            region_name: Some("Occitanie".to_string()),
            region_website: Some("https://www.atmo-occitanie.org/".to_string()),
        }
    }

    #[rstest]
    #[case("Oui, mais seulement au printemps", "Oui")]
    #[case("Non", "Non")]
    #[case("  Oui  ", "Oui")]
    #[case("Je ne sais pas", "Je ")]
    #[case("", "")]
    fn test_allergy_prefix(#[case] answer: &str, #[case] expected: &str) {
        assert_eq!(allergy_prefix(answer), expected);
    }

    #[rstest]
    #[case("Non", "Non")]
    #[case(" Non ", "Non")]
    #[case("", "Oui")]
    #[case("Parfois", "Oui")]
    #[case("non", "Oui")]
    #[case("Oui", "Oui")]
    fn test_activity_answer(#[case] answer: &str, #[case] expected: &str) {
        assert_eq!(activity_answer(answer), expected);
    }

    #[rstest]
    #[case("Mail", "Mail")]
    #[case(" SMS ", "SMS")]
    #[case("Courrier", "?")]
    #[case("", "?")]
    fn test_channel_or_sentinel(#[case] answer: &str, #[case] expected: &str) {
        assert_eq!(channel_or_sentinel(answer), expected);
    }

    #[test]
    fn test_simple_row_without_forecast_has_every_other_column() {
        let transformer = RowTransformer::new(&SIMPLE_SURVEY, ATMO_2004);
        let row = simple_row(&[
            ("Adresse e-mail", " a@b.fr "),
            ("Ville", " Lyon "),
            ("Région", "Auvergne-Rhône-Alpes"),
            (
                "Souhaitez-vous recevoir les recommandations Ecosanté par :",
                "Courrier",
            ),
        ]);

        let output = transformer.transform(&row, None);

        let expected: Vec<_> = SIMPLE_SURVEY
            .column_names()
            .filter(|c| *c != columns::QUALITE_AIR)
            .collect();
        assert_eq!(output.columns().collect::<Vec<_>>(), expected);
        assert_eq!(output.get(columns::MAIL), Some("a@b.fr"));
        assert_eq!(output.get(columns::VILLE), Some("Lyon"));
        assert_eq!(output.get(columns::REGION), Some("Auvergne-Rhône-Alpes"));
        assert_eq!(output.get(columns::FORMAT), Some("?"));
        assert_eq!(output.get(columns::ACTIVITE_SPORTIVE), Some("Oui"));
    }

    #[test]
    fn test_simple_transport_from_free_text() {
        let transformer = RowTransformer::new(&SIMPLE_SURVEY, ATMO_2004);
        let row = simple_row(&[(
            "Quel(s) moyen(s) de transport utilisez-vous pour vos déplacements ?",
            "Transports en commun, Vélo",
        )]);

        let output = transformer.transform(&row, None);
        assert_eq!(output.get(columns::CYCLISTE), Some("Oui"));
        assert_eq!(output.get(columns::AUTOMOBILISTE), Some("Non"));
    }

    #[test]
    fn test_partitioned_transport_from_checkboxes() {
        let transformer = RowTransformer::new(&FRAMAFORMS_SURVEY, ATMO_2004);
        let row: RawRow = [("Vélo", ""), ("Voiture", "X")].into_iter().collect();

        let output = transformer.transform(&row, None);
        assert_eq!(output.get(columns::CYCLISTE), Some("Non"));
        assert_eq!(output.get(columns::AUTOMOBILISTE), Some("Oui"));
        assert_eq!(output.get(columns::RECOMMANDATION), Some(" "));
        assert_eq!(output.get(columns::PRECISIONS), Some(" "));
        assert_eq!(output.get(columns::REGION), Some(""));
        assert_eq!(output.get(columns::LIEN_AASQA), Some(""));
    }

    #[rstest]
    #[case(Some(1), Some("Très bon"))]
    #[case(Some(8), Some("Mauvais"))]
    #[case(Some(11), None)]
    #[case(None, None)]
    fn test_simple_air_quality(#[case] indice: Option<i64>, #[case] expected: Option<&str>) {
        let transformer = RowTransformer::new(&SIMPLE_SURVEY, ATMO_2004);
        let output = transformer.transform(&simple_row(&[]), Some(&forecast(indice)));
        assert_eq!(output.get(columns::QUALITE_AIR), expected);
    }

    #[rstest]
    #[case(Some(1), Some("très bonne"))]
    #[case(Some(8), Some("mauvaise"))]
    #[case(Some(0), None)]
    fn test_partitioned_air_quality(#[case] indice: Option<i64>, #[case] expected: Option<&str>) {
        let transformer = RowTransformer::new(&FRAMAFORMS_SURVEY, ATMO_2004);
        let output = transformer.transform(&RawRow::default(), Some(&forecast(indice)));
        assert_eq!(output.get(columns::QUALITE_AIR), expected);
        assert_eq!(output.get(columns::REGION), Some("Occitanie"));
        assert_eq!(
            output.get(columns::LIEN_AASQA),
            Some("https://www.atmo-occitanie.org/")
        );
    }

    #[test]
    fn test_air_quality_from_textual_category() {
        let transformer = RowTransformer::new(&FRAMAFORMS_SURVEY, ATMO_2004);
        let mut record = forecast(None);
        record.qualif = Some("Médiocre".to_string());
        assert_eq!(transformer.air_quality_label(&record), Some("médiocre"));

        record.qualif = Some("inconnu".to_string());
        assert_eq!(transformer.air_quality_label(&record), None);

        // an out of range index is not rescued by the textual category
        record.indice = Some(12);
        record.qualif = Some("Bon".to_string());
        assert_eq!(transformer.air_quality_label(&record), None);
    }

    #[test]
    fn test_header_keeps_air_quality_only_when_present() {
        let transformer = RowTransformer::new(&SIMPLE_SURVEY, ATMO_2004);
        let without = transformer.transform(&simple_row(&[]), None);
        let with = transformer.transform(&simple_row(&[]), Some(&forecast(Some(4))));

        let header = header_for(&SIMPLE_SURVEY, &[without.clone()]);
        assert!(!header.contains(&columns::QUALITE_AIR));

        let header = header_for(&SIMPLE_SURVEY, &[without, with]);
        assert_eq!(header[3], columns::QUALITE_AIR);
        assert_eq!(header.len(), SIMPLE_SURVEY.layout.len());
    }
}
