//! Frequency / channel buckets of the partitioned export
//!
//! Rows are matched on their raw answers with strict equality. A row whose
//! channel or frequency answer is anything else belongs to no bucket and is
//! left out of every file.

use std::fmt;

use chrono::NaiveDate;

use crate::forecast::date_key;
use crate::models::RawRow;
use crate::variant::{CHANNEL_EMAIL, CHANNEL_SMS, InputColumns};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Frequency {
    EveryDay,
    BadAirQuality,
}

impl Frequency {
    /// Tag used in file names
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Frequency::EveryDay => "Tous-les-jours",
            Frequency::BadAirQuality => "Air-mauvais",
        }
    }

    /// Answer as it appears in the survey export
    #[must_use]
    pub fn input_label(self) -> &'static str {
        match self {
            Frequency::EveryDay => "Tous les jours",
            Frequency::BadAirQuality => "Lorsque la qualité de l'air est mauvaise",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Mail,
    Sms,
}

impl Channel {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Channel::Mail => CHANNEL_EMAIL,
            Channel::Sms => CHANNEL_SMS,
        }
    }
}

/// One output file of the partitioned export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bucket {
    pub frequency: Frequency,
    pub channel: Channel,
}

impl Bucket {
    /// Every bucket, in file generation order
    #[must_use]
    pub fn all() -> [Bucket; 4] {
        [
            Bucket::new(Frequency::EveryDay, Channel::Mail),
            Bucket::new(Frequency::EveryDay, Channel::Sms),
            Bucket::new(Frequency::BadAirQuality, Channel::Mail),
            Bucket::new(Frequency::BadAirQuality, Channel::Sms),
        ]
    }

    #[must_use]
    pub const fn new(frequency: Frequency, channel: Channel) -> Self {
        Self { frequency, channel }
    }

    /// `{date}-{frequency tag}-{channel}.csv`
    #[must_use]
    pub fn filename(&self, date: NaiveDate) -> String {
        format!(
            "{}-{}-{}.csv",
            date_key(date),
            self.frequency.tag(),
            self.channel.label()
        )
    }

    /// Whether the raw answers of `row` put it in this bucket
    #[must_use]
    pub fn matches(&self, row: &RawRow, input: &InputColumns) -> bool {
        row.value(input.frequency) == self.frequency.input_label()
            && row.value(input.channel) == self.channel.label()
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.frequency.tag(), self.channel.label())
    }
}

/// Rows of every bucket, buckets in generation order and rows in input order
#[must_use]
pub fn partition<'r>(rows: &'r [RawRow], input: &InputColumns) -> Vec<(Bucket, Vec<&'r RawRow>)> {
    Bucket::all()
        .into_iter()
        .map(|bucket| {
            let members = rows.iter().filter(|row| bucket.matches(row, input)).collect();
            (bucket, members)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variant::FRAMAFORMS_SURVEY;
    use rstest::rstest;

    fn row(email: &str, frequency: &str, channel: &str) -> RawRow {
        let input = &FRAMAFORMS_SURVEY.input;
        [
            (input.email, email),
            (input.frequency, frequency),
            (input.channel, channel),
        ]
        .into_iter()
        .collect()
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, 3, 1).unwrap()
    }

    #[rstest]
    #[case(Bucket::new(Frequency::EveryDay, Channel::Mail), "2021-03-01-Tous-les-jours-Mail.csv")]
    #[case(Bucket::new(Frequency::EveryDay, Channel::Sms), "2021-03-01-Tous-les-jours-SMS.csv")]
    #[case(Bucket::new(Frequency::BadAirQuality, Channel::Mail), "2021-03-01-Air-mauvais-Mail.csv")]
    #[case(Bucket::new(Frequency::BadAirQuality, Channel::Sms), "2021-03-01-Air-mauvais-SMS.csv")]
    fn test_bucket_filename(#[case] bucket: Bucket, #[case] expected: &str) {
        assert_eq!(bucket.filename(day()), expected);
    }

    #[test]
    fn test_four_distinct_rows_fill_four_buckets() {
        let rows = vec![
            row("a@b.fr", "Tous les jours", "Mail"),
            row("c@d.fr", "Tous les jours", "SMS"),
            row("e@f.fr", "Lorsque la qualité de l'air est mauvaise", "Mail"),
            row("g@h.fr", "Lorsque la qualité de l'air est mauvaise", "SMS"),
            row("i@j.fr", "Tous les jours", "Courrier"),
        ];

        let buckets = partition(&rows, &FRAMAFORMS_SURVEY.input);

        assert_eq!(buckets.len(), 4);
        let emails: Vec<Vec<&str>> = buckets
            .iter()
            .map(|(_, members)| members.iter().map(|r| r.value("Adresse e-mail")).collect())
            .collect();
        assert_eq!(
            emails,
            vec![
                vec!["a@b.fr"],
                vec!["c@d.fr"],
                vec!["e@f.fr"],
                vec!["g@h.fr"]
            ]
        );
    }

    #[rstest]
    #[case(" Mail")]
    #[case("mail")]
    #[case("")]
    fn test_channel_match_is_strict(#[case] channel: &str) {
        let rows = vec![row("a@b.fr", "Tous les jours", channel)];
        let buckets = partition(&rows, &FRAMAFORMS_SURVEY.input);
        assert!(buckets.iter().all(|(_, members)| members.is_empty()));
    }

    #[test]
    fn test_unknown_frequency_is_excluded() {
        let rows = vec![row("a@b.fr", "Une fois par semaine", "Mail")];
        let buckets = partition(&rows, &FRAMAFORMS_SURVEY.input);
        assert!(buckets.iter().all(|(_, members)| members.is_empty()));
    }

    #[test]
    fn test_bucket_display() {
        let bucket = Bucket::new(Frequency::BadAirQuality, Channel::Sms);
        assert_eq!(bucket.to_string(), "Air-mauvais/SMS");
    }
}
