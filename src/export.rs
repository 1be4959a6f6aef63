//! Survey export to campaign files
//!
//! Parses the export, checks its header against the variant, enriches rows
//! with today's forecast and serializes the result as one file (simple
//! variant) or one file per bucket (partitioned variant).

use chrono::NaiveDate;
use futures::future::join_all;
use tracing::{debug, info, instrument};

use crate::Result;
use crate::delimited::{format, parse_table};
use crate::enrichment::Enricher;
use crate::forecast::ForecastProvider;
use crate::geo::CommuneResolver;
use crate::models::{OutputFile, OutputFileSet, OutputRow, RawRow};
use crate::partition::partition;
use crate::scale::{ATMO_2004, QualifierTables};
use crate::transform::{RowTransformer, header_for};
use crate::variant::{FormVariant, OutputMode};

pub struct CampaignExporter<G, F> {
    enricher: Enricher<G, F>,
    tables: QualifierTables,
}

impl<G, F> CampaignExporter<G, F>
where
    G: CommuneResolver,
    F: ForecastProvider,
{
    pub fn new(geocoder: G, forecasts: F) -> Self {
        Self::with_tables(geocoder, forecasts, ATMO_2004)
    }

    pub fn with_tables(geocoder: G, forecasts: F, tables: QualifierTables) -> Self {
        Self {
            enricher: Enricher::new(geocoder, forecasts),
            tables,
        }
    }

    /// Build every campaign file for one survey export
    ///
    /// Only a malformed export fails; lookups that go wrong leave the air
    /// quality column of the affected rows empty.
    #[instrument(skip(self, variant, text), fields(variant = variant.name))]
    pub async fn export(
        &self,
        variant: &FormVariant,
        text: &str,
        today: NaiveDate,
    ) -> Result<OutputFileSet> {
        let table = parse_table(text, &variant.parse)?;
        variant.check_columns(&table.columns)?;
        info!("Parsed {} survey rows", table.rows.len());

        let transformer = RowTransformer::new(variant, self.tables);
        match variant.output {
            OutputMode::Single { filename } => {
                let rows = table.rows.iter().collect();
                let file = self
                    .build_file(&transformer, variant, filename.to_string(), rows, today)
                    .await?;

                let mut files = OutputFileSet::default();
                files.push(file);
                Ok(files)
            }
            OutputMode::Partitioned => {
                let buckets = partition(&table.rows, &variant.input);
                let assigned: usize = buckets.iter().map(|(_, rows)| rows.len()).sum();
                if assigned < table.rows.len() {
                    info!(
                        "{} rows match no frequency/channel bucket",
                        table.rows.len() - assigned
                    );
                }

                let transformer = &transformer;
                let files = join_all(buckets.into_iter().map(|(bucket, rows)| async move {
                    debug!("Bucket {} has {} rows", bucket, rows.len());
                    self.build_file(transformer, variant, bucket.filename(today), rows, today)
                        .await
                }))
                .await;
                files.into_iter().collect()
            }
        }
    }

    async fn build_file(
        &self,
        transformer: &RowTransformer<'_>,
        variant: &FormVariant,
        name: String,
        rows: Vec<&RawRow>,
        today: NaiveDate,
    ) -> Result<OutputFile> {
        let forecasts = self
            .enricher
            .enrich_all(rows.iter().copied(), variant.input.city, today)
            .await;

        let output: Vec<OutputRow> = rows
            .iter()
            .zip(&forecasts)
            .map(|(row, forecast)| transformer.transform(row, forecast.as_ref()))
            .collect();

        let header = header_for(variant, &output);
        let content = format(&header, &output)?;
        info!("Built {} with {} rows", name, output.len());
        Ok(OutputFile::new(name, content))
    }
}
